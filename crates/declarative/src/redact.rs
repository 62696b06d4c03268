//! Redacted text rendering of a config diff
//!
//! Both snapshots are copied through a serialize/deserialize round trip,
//! secrets in the copies are replaced with [`MASK`], and the two pretty
//! printed documents are compared line by line. Only changed lines are
//! kept.

use crate::config::Config;
use crate::error::Result;
use serde_json::Value;
use similar::{ChangeTag, TextDiff};

/// Replacement written over every secret
pub const MASK: &str = "******";

/// Render the changed lines between `left` and `right` with secrets masked
pub fn pretty_diff(left: &Config, right: &Config) -> Result<String> {
    let mut left = round_trip(left)?;
    let mut right = round_trip(right)?;
    sanitize(&mut left);
    sanitize(&mut right);

    let left = serde_json::to_string_pretty(&left)?;
    let right = serde_json::to_string_pretty(&right)?;
    Ok(render_changes(&left, &right))
}

fn round_trip(config: &Config) -> Result<Config> {
    let value = serde_json::to_value(config)?;
    Ok(serde_json::from_value(value)?)
}

fn mask(field: &mut String) {
    if !field.is_empty() {
        *field = MASK.to_string();
    }
}

/// Overwrite every secret in `config`.
///
/// Masking also hides real changes to these fields from the text diff;
/// the network comparison still sees them.
fn sanitize(config: &mut Config) {
    if let Some(cloud) = &mut config.cloud {
        mask(&mut cloud.secret);
        mask(&mut cloud.location_secret);
        for location in &mut cloud.location_secrets {
            mask(&mut location.secret);
        }
        // Not a secret, but unreadable in a diff
        mask(&mut cloud.tls_certificate);
        mask(&mut cloud.tls_private_key);
    }

    for handler in &mut config.auth.handlers {
        for value in handler.config.values_mut() {
            *value = Value::String(MASK.to_string());
        }
    }

    for remote in &mut config.remotes {
        mask(&mut remote.secret);
        if let Some(credentials) = &mut remote.auth.credentials {
            credentials.payload = MASK.to_string();
        }
        if let Some(credentials) = &mut remote.auth.signaling_creds {
            credentials.payload = MASK.to_string();
        }
    }
}

fn render_changes(left: &str, right: &str) -> String {
    let diff = TextDiff::from_lines(left, right);
    let mut out = String::new();
    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => '-',
            ChangeTag::Insert => '+',
            ChangeTag::Equal => continue,
        };
        out.push(sign);
        out.push(' ');
        out.push_str(change.value());
        if change.missing_newline() {
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuthHandlerConfig, Cloud, Credentials, LocationSecret, Remote};
    use std::collections::BTreeMap;

    fn secret_config(tag: &str) -> Config {
        let mut config = Config::default();
        config.cloud = Some(Cloud {
            id: "m1".to_string(),
            secret: format!("cloud-secret-{tag}"),
            location_secret: format!("location-secret-{tag}"),
            location_secrets: vec![LocationSecret {
                id: "loc".to_string(),
                secret: format!("extra-location-secret-{tag}"),
            }],
            tls_certificate: format!("cert-{tag}"),
            tls_private_key: format!("key-{tag}"),
            ..Cloud::default()
        });
        config.auth.handlers.push(AuthHandlerConfig {
            kind: "api-key".to_string(),
            config: BTreeMap::from([("key".to_string(), Value::from(format!("api-key-{tag}")))]),
        });
        let mut remote = Remote {
            name: "gw".to_string(),
            secret: format!("remote-secret-{tag}"),
            ..Remote::default()
        };
        remote.auth.credentials = Some(Credentials {
            kind: "robot-location-secret".to_string(),
            payload: format!("creds-{tag}"),
        });
        remote.auth.signaling_creds = Some(Credentials {
            kind: "robot-location-secret".to_string(),
            payload: format!("signaling-{tag}"),
        });
        config.remotes.push(remote);
        config
    }

    #[test]
    fn test_secrets_never_rendered() {
        let left = secret_config("old");
        let mut right = secret_config("new");
        right.revision = "r2".to_string();

        let out = pretty_diff(&left, &right).unwrap();
        for tag in ["old", "new"] {
            for secret in [
                "cloud-secret",
                "location-secret",
                "extra-location-secret",
                "cert",
                "key",
                "api-key",
                "remote-secret",
                "creds",
                "signaling",
            ] {
                let value = format!("{secret}-{tag}");
                assert!(!out.contains(&value), "{value} leaked into:\n{out}");
            }
        }
        assert!(out.contains("+   \"revision\": \"r2\""), "got:\n{out}");
    }

    #[test]
    fn test_cloud_secret_masked() {
        let mut left = Config::default();
        left.cloud = Some(Cloud {
            secret: "s3cr3t".to_string(),
            ..Cloud::default()
        });
        let mut right = left.clone();
        right.cloud.as_mut().unwrap().id = "m2".to_string();

        let out = pretty_diff(&left, &right).unwrap();
        assert!(!out.contains("s3cr3t"));
        assert!(out.contains("- "));
        assert!(out.contains("+ "));
        assert!(out.contains("m2"));
    }

    #[test]
    fn test_unchanged_lines_dropped() {
        let mut left = Config::default();
        left.revision = "r1".to_string();
        left.enable_web_profile = false;
        let mut right = left.clone();
        right.revision = "r2".to_string();

        let out = pretty_diff(&left, &right).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines, vec!["-   \"revision\": \"r1\"", "+   \"revision\": \"r2\""]);
    }

    #[test]
    fn test_identical_configs_render_nothing() {
        let config = secret_config("same");
        assert_eq!(pretty_diff(&config, &config).unwrap(), "");
    }

    #[test]
    fn test_inputs_untouched() {
        let left = secret_config("old");
        let right = secret_config("new");
        pretty_diff(&left, &right).unwrap();
        assert_eq!(left.cloud.unwrap().secret, "cloud-secret-old");
        assert_eq!(right.remotes[0].secret, "remote-secret-new");
    }

    #[test]
    fn test_empty_secret_not_masked() {
        let mut config = Config::default();
        config.cloud = Some(Cloud::default());
        sanitize(&mut config);
        assert!(config.cloud.unwrap().secret.is_empty());
    }
}
