//! Configuration snapshots
//!
//! A [`Config`] is one complete, declarative description of a machine:
//! which remotes to connect to, which components, services, processes,
//! packages and modules to run, and how to serve the network.

use crate::error::{Error, Result};
use crate::tls::TlsConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

// ============================================================================
// Main Config Schema
// ============================================================================

/// A full configuration snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud: Option<Cloud>,

    pub remotes: Vec<Remote>,

    pub components: Vec<resource::Config>,

    pub services: Vec<resource::Config>,

    pub processes: Vec<ProcessConfig>,

    pub packages: Vec<PackageConfig>,

    pub modules: Vec<Module>,

    pub network: NetworkConfig,

    pub auth: AuthConfig,

    /// Logger level overrides by name pattern
    pub log: Vec<LogPatternConfig>,

    pub enable_web_profile: bool,

    /// Revision marker of this snapshot
    #[serde(skip_serializing_if = "String::is_empty")]
    pub revision: String,
}

impl Config {
    /// Reject empty names and duplicate keys in every keyed collection
    pub fn validate(&self) -> Result<()> {
        validate_keys(
            "remote",
            self.remotes.iter().map(|r| (r.name.as_str(), r.name.clone())),
        )?;
        validate_keys(
            "component",
            self.components
                .iter()
                .map(|c| (c.name.as_str(), c.resource_name().to_string())),
        )?;
        validate_keys(
            "service",
            self.services
                .iter()
                .map(|s| (s.name.as_str(), s.resource_name().to_string())),
        )?;
        validate_keys(
            "process",
            self.processes.iter().map(|p| (p.id.as_str(), p.id.clone())),
        )?;
        validate_keys(
            "package",
            self.packages.iter().map(|p| (p.name.as_str(), p.name.clone())),
        )?;
        validate_keys(
            "module",
            self.modules.iter().map(|m| (m.name.as_str(), m.name.clone())),
        )?;
        Ok(())
    }

    /// Total number of keyed items across all collections
    pub fn resource_count(&self) -> usize {
        self.remotes.len()
            + self.components.len()
            + self.services.len()
            + self.processes.len()
            + self.packages.len()
            + self.modules.len()
    }
}

fn validate_keys<'a>(
    collection: &'static str,
    entries: impl Iterator<Item = (&'a str, String)>,
) -> Result<()> {
    let mut seen = HashSet::new();
    for (name, key) in entries {
        if name.is_empty() {
            return Err(Error::EmptyName { collection });
        }
        if seen.contains(&key) {
            return Err(Error::DuplicateKey { collection, key });
        }
        seen.insert(key);
    }
    Ok(())
}

// ============================================================================
// Cloud
// ============================================================================

/// Connection to the cloud app
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cloud {
    pub id: String,
    pub secret: String,
    pub location_secret: String,
    pub location_secrets: Vec<LocationSecret>,
    pub location_id: String,
    pub primary_org_id: String,
    pub app_address: String,
    pub signaling_address: String,
    pub tls_certificate: String,
    pub tls_private_key: String,
    pub refresh_interval_secs: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationSecret {
    pub id: String,
    pub secret: String,
}

// ============================================================================
// Remotes
// ============================================================================

/// A peer whose resources are imported into this machine's namespace
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Remote {
    pub name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame: Option<Value>,
    pub auth: RemoteAuth,
    pub secret: String,
    pub insecure: bool,
    pub connection_check_interval_secs: u64,
    pub reconnect_interval_secs: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteAuth {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Credentials>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signaling_creds: Option<Credentials>,
    pub signaling_server_address: String,
    pub managed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "type")]
    pub kind: String,
    pub payload: String,
}

// ============================================================================
// Processes, Packages, Modules
// ============================================================================

/// A supervised process
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessConfig {
    pub id: String,
    pub name: String,
    pub args: Vec<String>,
    pub cwd: String,
    pub one_shot: bool,
    pub log: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stop_signal: String,
    pub stop_timeout_secs: u64,
    pub env: BTreeMap<String, String>,
}

/// A package to fetch before resources start
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageConfig {
    pub name: String,
    pub package: String,
    pub version: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// An out-of-process module providing resource models
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Module {
    pub name: String,
    pub exe_path: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub log_level: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub module_id: String,
    pub environment: BTreeMap<String, String>,
}

// ============================================================================
// Network & Auth
// ============================================================================

/// How this machine serves its API.
///
/// `tls` is runtime-only material and never serialized.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    #[serde(flatten)]
    pub settings: NetworkSettings,

    #[serde(skip)]
    pub tls: Option<TlsConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSettings {
    pub fqdn: String,
    pub bind_address: String,
    pub tls_cert_file: String,
    pub tls_key_file: String,
    pub no_tls: bool,
    pub sessions: SessionsConfig,
    pub traffic_tunnel_endpoints: Vec<TrafficTunnelEndpoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionsConfig {
    pub heartbeat_window_secs: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrafficTunnelEndpoint {
    pub port: u16,
    pub connection_timeout_secs: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub handlers: Vec<AuthHandlerConfig>,
    pub tls_auth_entities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_auth_config: Option<Value>,
}

/// One credential handler, e.g. `api-key` with its keys in `config`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthHandlerConfig {
    #[serde(rename = "type")]
    pub kind: String,
    pub config: BTreeMap<String, Value>,
}

// ============================================================================
// Logging
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogPatternConfig {
    pub pattern: String,
    pub level: String,
}
