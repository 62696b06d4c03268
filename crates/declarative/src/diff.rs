//! Diff computation between configuration snapshots
//!
//! Every keyed collection is partitioned the same way:
//!
//! - in right but not left: added
//! - in both and not equal: modified (the right-hand value is kept)
//! - in both and equal: unmodified (only recorded when asked for)
//! - in left but not right: removed, in original left order

use crate::config::{Config, Module, NetworkConfig, PackageConfig, ProcessConfig, Remote};
use crate::error::Result;
use crate::redact;
use crate::summary::DiffSummary;
use crate::tls::tls_differs;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Value equality used when diffing collection items.
///
/// Lets an item type decide what counts as a change, for example by
/// ignoring state that is derived at runtime.
pub trait Equatable {
    fn equals(&self, other: &Self) -> bool;
}

impl Equatable for resource::Config {
    fn equals(&self, other: &Self) -> bool {
        self.settings_equal(other)
    }
}

impl Equatable for Remote {
    fn equals(&self, other: &Self) -> bool {
        self == other
    }
}

impl Equatable for ProcessConfig {
    fn equals(&self, other: &Self) -> bool {
        self == other
    }
}

impl Equatable for PackageConfig {
    fn equals(&self, other: &Self) -> bool {
        self == other
    }
}

impl Equatable for Module {
    fn equals(&self, other: &Self) -> bool {
        self == other
    }
}

/// One collection split into added / modified / removed / unmodified items
#[derive(Debug, Clone)]
pub struct Partition<T> {
    pub added: Vec<T>,
    pub modified: Vec<T>,
    pub removed: Vec<T>,
    pub unmodified: Vec<T>,
}

impl<T> Default for Partition<T> {
    fn default() -> Self {
        Self {
            added: Vec::new(),
            modified: Vec::new(),
            removed: Vec::new(),
            unmodified: Vec::new(),
        }
    }
}

impl<T> Partition<T> {
    /// Check if anything was added, modified or removed
    pub fn is_different(&self) -> bool {
        !self.added.is_empty() || !self.modified.is_empty() || !self.removed.is_empty()
    }
}

/// Partition `left` and `right` by the key returned from `key`.
///
/// When `left` holds the same key twice, the later item wins. Removed items
/// keep their relative order from `left`.
pub fn diff_all<T, K, F>(left: &[T], right: &[T], key: F, track_unmodified: bool) -> Partition<T>
where
    T: Equatable + Clone,
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut left_index: HashMap<K, usize> = HashMap::with_capacity(left.len());
    for (idx, item) in left.iter().enumerate() {
        left_index.insert(key(item), idx);
    }

    let mut partition = Partition::default();
    for item in right {
        match left_index.remove(&key(item)) {
            None => partition.added.push(item.clone()),
            Some(idx) if !left[idx].equals(item) => partition.modified.push(item.clone()),
            Some(_) => {
                if track_unmodified {
                    partition.unmodified.push(item.clone());
                }
            }
        }
    }

    let mut removed: Vec<usize> = left_index.into_values().collect();
    removed.sort_unstable();
    partition.removed = removed.into_iter().map(|idx| left[idx].clone()).collect();
    partition
}

/// Modified items, by collection
#[derive(Debug, Clone, Default)]
pub struct ModifiedConfigDiff {
    pub remotes: Vec<Remote>,
    pub components: Vec<resource::Config>,
    pub processes: Vec<ProcessConfig>,
    pub services: Vec<resource::Config>,
    pub packages: Vec<PackageConfig>,
    pub modules: Vec<Module>,
}

impl ModifiedConfigDiff {
    pub fn is_empty(&self) -> bool {
        self.remotes.is_empty()
            && self.components.is_empty()
            && self.processes.is_empty()
            && self.services.is_empty()
            && self.packages.is_empty()
            && self.modules.is_empty()
    }
}

/// The changes from `left` (usually old) to `right` (usually new)
#[derive(Debug, Clone)]
pub struct Diff {
    pub left: Config,
    pub right: Config,
    pub added: Config,
    pub modified: ModifiedConfigDiff,
    pub removed: Config,
    pub resources_equal: bool,
    pub network_equal: bool,
    pub log_equal: bool,
    /// Redacted text diff; empty unless requested
    pub pretty_diff: String,
    /// Components and services present and equal on both sides. Only filled
    /// in when the two revisions differ.
    pub unmodified_resources: Vec<resource::Config>,
}

impl Diff {
    /// Revision of the new config
    pub fn new_revision(&self) -> &str {
        &self.right.revision
    }

    /// Counts per collection
    pub fn summary(&self) -> DiffSummary {
        DiffSummary::from_diff(self)
    }
}

impl fmt::Display for Diff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty_diff)
    }
}

/// Compute the difference between two configs, from `left` to `right`.
///
/// `reveal_sensitive_diffs` requests the redacted text diff, which is the
/// only step that can fail.
pub fn diff_configs(left: Config, right: Config, reveal_sensitive_diffs: bool) -> Result<Diff> {
    let pretty_diff = if reveal_sensitive_diffs {
        redact::pretty_diff(&left, &right)?
    } else {
        String::new()
    };

    // Re-diffing the same revision is a no-op for the reconciler, so skip
    // collecting everything that stayed the same.
    let track_unmodified = left.revision != right.revision;

    let remotes = diff_all(&left.remotes, &right.remotes, |r| r.name.clone(), false);
    let components = diff_all(
        &left.components,
        &right.components,
        resource::Config::resource_name,
        track_unmodified,
    );
    let services = diff_all(
        &left.services,
        &right.services,
        resource::Config::resource_name,
        track_unmodified,
    );
    let processes = diff_all(&left.processes, &right.processes, |p| p.id.clone(), false);
    let packages = diff_all(&left.packages, &right.packages, |p| p.name.clone(), false);
    let modules = diff_all(&left.modules, &right.modules, |m| m.name.clone(), false);

    let components_different = components.is_different();
    let services_different = services.is_different();
    let resources_equal = !(remotes.is_different()
        || components_different
        || services_different
        || processes.is_different()
        || packages.is_different()
        || modules.is_different());
    let network_equal = !networking_differs(&left, &right);
    let log_equal = !log_differs(&left, &right, services_different, components_different);

    let mut unmodified_resources = components.unmodified;
    unmodified_resources.extend(services.unmodified);

    let diff = Diff {
        added: Config {
            remotes: remotes.added,
            components: components.added,
            services: services.added,
            processes: processes.added,
            packages: packages.added,
            modules: modules.added,
            ..Config::default()
        },
        modified: ModifiedConfigDiff {
            remotes: remotes.modified,
            components: components.modified,
            processes: processes.modified,
            services: services.modified,
            packages: packages.modified,
            modules: modules.modified,
        },
        removed: Config {
            remotes: remotes.removed,
            components: components.removed,
            services: services.removed,
            processes: processes.removed,
            packages: packages.removed,
            modules: modules.removed,
            ..Config::default()
        },
        left,
        right,
        resources_equal,
        network_equal,
        log_equal,
        pretty_diff,
        unmodified_resources,
    };

    log::debug!(
        "Config diff to revision {:?}: resources_equal={} network_equal={} log_equal={}",
        diff.new_revision(),
        diff.resources_equal,
        diff.network_equal,
        diff.log_equal
    );
    Ok(diff)
}

/// Check if cloud, network, auth or web profile settings differ
fn networking_differs(left: &Config, right: &Config) -> bool {
    left.cloud != right.cloud
        || network_differs(&left.network, &right.network)
        || left.auth != right.auth
        || left.enable_web_profile != right.enable_web_profile
}

/// Network settings compare field by field; TLS material compares by what
/// its resolvers produce.
fn network_differs(left: &NetworkConfig, right: &NetworkConfig) -> bool {
    tls_differs(left.tls.as_ref(), right.tls.as_ref()) || left.settings != right.settings
}

/// Check if logging may need to be reconfigured.
///
/// Any component or service change can carry a new per-resource log level,
/// so those count too.
fn log_differs(
    left: &Config,
    right: &Config,
    services_different: bool,
    components_different: bool,
) -> bool {
    left.log != right.log || services_different || components_different
}
