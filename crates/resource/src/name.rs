//! Resource names: (name, API, remote) identity triples

use crate::api::Api;
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Separator between nested remotes and the base name
pub const REMOTE_SEPARATOR: char = ':';

/// The identity of a resource.
///
/// An empty `remote` means the resource is owned locally. Resources imported
/// through several peers carry a colon-joined remote path such as
/// `gateway:arm`, nearest peer first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name {
    pub api: Api,
    pub remote: String,
    pub name: String,
}

impl Name {
    /// A locally owned resource name
    pub fn new(api: Api, name: impl Into<String>) -> Self {
        Self::new_remote("", api, name)
    }

    /// A resource name owned by `remote`
    pub fn new_remote(remote: impl Into<String>, api: Api, name: impl Into<String>) -> Self {
        Self {
            api,
            remote: remote.into(),
            name: name.into(),
        }
    }

    pub fn is_remote(&self) -> bool {
        !self.remote.is_empty()
    }

    /// `remote:name`, or just `name` for local resources
    pub fn short_name(&self) -> String {
        if self.remote.is_empty() {
            return self.name.clone();
        }
        format!("{}{REMOTE_SEPARATOR}{}", self.remote, self.name)
    }

    /// This name as seen from one peer further away, through `remote`
    pub fn prepend_remote(&self, remote: &str) -> Self {
        let remote = if self.remote.is_empty() {
            remote.to_string()
        } else {
            format!("{remote}{REMOTE_SEPARATOR}{}", self.remote)
        };
        Self::new_remote(remote, self.api.clone(), self.name.clone())
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.api, self.short_name())
    }
}

impl FromStr for Name {
    type Err = Error;

    /// Parse `api/name` or `api/remote:name`
    fn from_str(s: &str) -> Result<Self> {
        let (api, short) = s
            .split_once('/')
            .ok_or_else(|| Error::InvalidName(s.to_string()))?;
        let api: Api = api.parse()?;
        let (remote, name) = short.rsplit_once(REMOTE_SEPARATOR).unwrap_or(("", short));
        if name.is_empty() {
            return Err(Error::InvalidName(s.to_string()));
        }
        Ok(Self::new_remote(remote, api, name))
    }
}
