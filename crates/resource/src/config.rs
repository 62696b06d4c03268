//! Per-resource configuration as it appears in a configuration snapshot

use crate::api::Api;
use crate::name::Name;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Logger settings attached to a single resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
}

/// Configuration of one component or service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub name: String,

    pub api: Api,

    /// Implementation model, e.g. `rdk:builtin:fake`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub model: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_configuration: Option<LogConfig>,

    /// Dependencies discovered from attributes at runtime. Never serialized
    /// and ignored by [`Config::settings_equal`].
    #[serde(skip)]
    pub implicit_depends_on: Vec<String>,
}

impl Config {
    pub fn new(api: Api, name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            api,
            model: model.into(),
            frame: None,
            depends_on: Vec::new(),
            attributes: BTreeMap::new(),
            log_configuration: None,
            implicit_depends_on: Vec::new(),
        }
    }

    /// Set an attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Add an explicit dependency
    pub fn with_dependency(mut self, name: impl Into<String>) -> Self {
        self.depends_on.push(name.into());
        self
    }

    /// The local name this config registers under
    pub fn resource_name(&self) -> Name {
        Name::new(self.api.clone(), self.name.clone())
    }

    /// Compare everything a user can configure, ignoring runtime-derived state
    pub fn settings_equal(&self, other: &Self) -> bool {
        self.name == other.name
            && self.api == other.api
            && self.model == other.model
            && self.frame == other.frame
            && self.depends_on == other.depends_on
            && self.attributes == other.attributes
            && self.log_configuration == other.log_configuration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(name: &str) -> Config {
        Config::new(Api::component("camera"), name, "rdk:builtin:fake")
    }

    #[test]
    fn test_resource_name() {
        let conf = camera("cam1");
        assert_eq!(conf.resource_name(), Name::new(Api::component("camera"), "cam1"));
    }

    #[test]
    fn test_settings_equal_ignores_implicit_dependencies() {
        let a = camera("cam1").with_attribute("width", 640);
        let mut b = a.clone();
        b.implicit_depends_on.push("board1".to_string());
        assert!(a.settings_equal(&b));

        let c = camera("cam1").with_attribute("width", 1280);
        assert!(!a.settings_equal(&c));

        let d = a.clone().with_dependency("board1");
        assert!(!a.settings_equal(&d));
    }

    #[test]
    fn test_deserialize_minimal() {
        let conf: Config =
            serde_json::from_str(r#"{"name": "cam1", "api": "rdk:component:camera"}"#).unwrap();
        assert_eq!(conf.name, "cam1");
        assert!(conf.model.is_empty());
        assert!(conf.attributes.is_empty());
    }

    #[test]
    fn test_implicit_dependencies_not_serialized() {
        let mut conf = camera("cam1");
        conf.implicit_depends_on.push("board1".to_string());
        let json = serde_json::to_string(&conf).unwrap();
        assert!(!json.contains("board1"));
    }
}
