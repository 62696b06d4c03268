//! # Resource
//!
//! Resource identities and the runtime index that locates live resources.
//!
//! ## Core Concepts
//!
//! - **Api**: the class of a resource, e.g. `rdk:component:camera`
//! - **Name**: the (name, API, remote) triple identifying one resource; an
//!   empty remote means the resource is owned locally
//! - **Config**: the configuration of a single component or service
//! - **ResourceIndex**: maps names to handles, keeping locally owned
//!   resources apart from same-named resources imported from remotes
//!
//! ## Example
//!
//! ```
//! use resource::{Api, Name, ResourceIndex};
//!
//! let mut index = ResourceIndex::new();
//! let local = Name::new(Api::component("camera"), "cam");
//! let remote = Name::new_remote("gateway", Api::component("camera"), "cam");
//!
//! index.put_by_name(&local, "local handle")?;
//! index.put_by_name(&remote, "remote handle")?;
//!
//! assert_eq!(index.get_by_name(&local), Some(&"local handle"));
//! assert_eq!(index.find_by_short_name("cam").len(), 2);
//! # Ok::<(), resource::Error>(())
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod index;
pub mod name;

pub use api::Api;
pub use config::{Config, LogConfig};
pub use error::{Error, Result};
pub use index::ResourceIndex;
pub use name::Name;
