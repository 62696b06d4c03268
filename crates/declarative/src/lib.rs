//! # Declarative
//!
//! Declarative configuration snapshots and the diff between two of them.
//!
//! Given an old and a new [`Config`], [`diff_configs`] reports exactly what
//! changed so a reconciler can decide which resources to start, reconfigure
//! or stop. Nothing here acts on the diff.
//!
//! ## Core Concepts
//!
//! - **Config**: one full snapshot: remotes, components, services,
//!   processes, packages, modules, network, auth and log settings
//! - **Diff**: per collection added / modified / removed items, plus
//!   equality flags for resources, networking and logging
//! - **Equatable**: the value equality each item type uses when diffed
//! - **TlsConfig**: runtime TLS material, compared by what its certificate
//!   resolvers produce
//!
//! ## Example
//!
//! ```
//! use declarative::{Config, diff_configs};
//! use resource::Api;
//!
//! let old = Config::default();
//! let mut new = Config::default();
//! new.components.push(resource::Config::new(
//!     Api::component("camera"),
//!     "cam1",
//!     "rdk:builtin:fake",
//! ));
//!
//! let diff = diff_configs(old, new, false)?;
//! assert_eq!(diff.added.components.len(), 1);
//! assert!(!diff.resources_equal);
//! # Ok::<(), declarative::Error>(())
//! ```
//!
//! ## Redaction
//!
//! Passing `true` as the last argument of [`diff_configs`] also renders a
//! line diff of both snapshots with every secret replaced by
//! [`redact::MASK`].

pub mod config;
pub mod diff;
pub mod error;
pub mod redact;
pub mod summary;
pub mod tls;

// Re-export main types at crate root
pub use config::{
    AuthConfig, AuthHandlerConfig, Cloud, Config, Credentials, LocationSecret, LogPatternConfig,
    Module, NetworkConfig, NetworkSettings, PackageConfig, ProcessConfig, Remote, RemoteAuth,
    SessionsConfig, TrafficTunnelEndpoint,
};
pub use diff::{Diff, Equatable, ModifiedConfigDiff, Partition, diff_all, diff_configs};
pub use error::{Error, Result};
pub use summary::{CollectionSummary, DiffSummary};
pub use tls::{Certificate, CertificateResolver, ResolveError, TlsConfig, TlsVersion, tls_differs};
