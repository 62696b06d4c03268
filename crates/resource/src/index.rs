//! Name index over live resources
//!
//! Maps a [`Name`] to a handle. Handles for the same base name and API are
//! kept together in a bucket with one local slot and one slot per remote, so
//! a locally owned `cam` and the `cam` imported from each remote can coexist.
//! Base names live in a suffix trie, which lets callers resolve a name
//! against every stored name that ends it.

use crate::api::Api;
use crate::error::{Error, Result};
use crate::name::{Name, REMOTE_SEPARATOR};
use rtrie::Trie;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct ApiBucket<H> {
    local: Option<H>,
    remote: BTreeMap<String, H>,
}

impl<H> ApiBucket<H> {
    fn new() -> Self {
        Self {
            local: None,
            remote: BTreeMap::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.local.is_none() && self.remote.is_empty()
    }

    /// Local entry first, then each remote entry
    fn entries<'a>(&'a self, api: &Api, base: &str) -> Vec<(Name, &'a H)> {
        let local = self
            .local
            .iter()
            .map(|handle| (Name::new(api.clone(), base), handle));
        let remote = self.remote.iter().map(|(remote, handle)| {
            (Name::new_remote(remote.clone(), api.clone(), base), handle)
        });
        local.chain(remote).collect()
    }
}

type ByApi<H> = BTreeMap<Api, ApiBucket<H>>;

/// Index from resource names to handles of type `H`.
///
/// Not internally synchronized; wrap it in a lock to share it between
/// writers. Cloning produces an independent copy of every entry.
#[derive(Debug, Clone)]
pub struct ResourceIndex<H> {
    trie: Trie<ByApi<H>>,
}

impl<H> Default for ResourceIndex<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> ResourceIndex<H> {
    pub fn new() -> Self {
        Self { trie: Trie::new() }
    }

    /// Store `handle` under `name`, returning the handle it replaced
    pub fn put_by_name(&mut self, name: &Name, handle: H) -> Result<Option<H>> {
        let (by_api, _) = self
            .trie
            .compute_if_absent(&name.name, BTreeMap::new)
            .ok_or(Error::EmptyName)?;
        let bucket = by_api.entry(name.api.clone()).or_insert_with(ApiBucket::new);
        let prev = if name.remote.is_empty() {
            bucket.local.replace(handle)
        } else {
            bucket.remote.insert(name.remote.clone(), handle)
        };
        log::trace!("Indexed {name} (replaced: {})", prev.is_some());
        Ok(prev)
    }

    /// Exact lookup; no suffix matching
    pub fn get_by_name(&self, name: &Name) -> Option<&H> {
        let bucket = self.trie.get(&name.name)?.get(&name.api)?;
        if name.remote.is_empty() {
            bucket.local.as_ref()
        } else {
            bucket.remote.get(&name.remote)
        }
    }

    /// Remove the handle stored under `name`.
    ///
    /// Empty buckets are dropped, and the base name leaves the trie once no
    /// API under it holds a handle.
    pub fn delete_by_name(&mut self, name: &Name) -> Option<H> {
        let by_api = self.trie.get_mut(&name.name)?;
        let bucket = by_api.get_mut(&name.api)?;
        let removed = if name.remote.is_empty() {
            bucket.local.take()
        } else {
            bucket.remote.remove(&name.remote)
        };
        if bucket.is_empty() {
            by_api.remove(&name.api);
            if by_api.is_empty() {
                self.trie.delete(&name.name);
            }
        }
        if removed.is_some() {
            log::trace!("Removed {name} from index");
        }
        removed
    }

    /// Every `(name, handle)` pair. Order across base names is unspecified.
    pub fn iter(&self) -> impl Iterator<Item = (Name, &H)> + '_ {
        self.trie.iter().flat_map(|(base, by_api)| {
            by_api
                .iter()
                .flat_map(move |(api, bucket)| bucket.entries(api, &base))
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = Name> + '_ {
        self.iter().map(|(name, _)| name)
    }

    pub fn values(&self) -> impl Iterator<Item = &H> + '_ {
        self.iter().map(|(_, handle)| handle)
    }

    /// Number of stored handles
    pub fn len(&self) -> usize {
        self.trie
            .values()
            .flat_map(BTreeMap::values)
            .map(|bucket| usize::from(bucket.local.is_some()) + bucket.remote.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    /// Every entry whose base name is a suffix of `query`, shortest first
    pub fn find_by_suffix(&self, query: &str) -> Vec<(Name, &H)> {
        self.trie
            .find_suffix_entries(query)
            .into_iter()
            .flat_map(|(base, by_api)| {
                by_api
                    .iter()
                    .flat_map(move |(api, bucket)| bucket.entries(api, base))
            })
            .collect()
    }

    /// Resolve a short name (`name` or `remote:name`) across every API.
    ///
    /// A bare name matches the local resource and every remote resource with
    /// that base name. A qualified name matches only that remote.
    pub fn find_by_short_name(&self, short: &str) -> Vec<(Name, &H)> {
        let (remote, base) = short.rsplit_once(REMOTE_SEPARATOR).unwrap_or(("", short));
        let Some(by_api) = self.trie.get(base) else {
            return Vec::new();
        };
        by_api
            .iter()
            .flat_map(|(api, bucket)| bucket.entries(api, base))
            .filter(|(name, _)| remote.is_empty() || name.remote == remote)
            .collect()
    }
}
