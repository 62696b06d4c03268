//! Resource APIs, the class tag carried by every resource name

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Namespace used when none is given
pub const DEFAULT_NAMESPACE: &str = "rdk";

/// Type name shared by all component APIs
pub const COMPONENT_TYPE: &str = "component";

/// Type name shared by all service APIs
pub const SERVICE_TYPE: &str = "service";

/// A resource class such as `rdk:component:camera`.
///
/// Serialized as its colon-separated string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Api {
    pub namespace: String,
    pub type_name: String,
    pub subtype: String,
}

impl Api {
    pub fn new(
        namespace: impl Into<String>,
        type_name: impl Into<String>,
        subtype: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            type_name: type_name.into(),
            subtype: subtype.into(),
        }
    }

    /// A component API in the default namespace
    pub fn component(subtype: impl Into<String>) -> Self {
        Self::new(DEFAULT_NAMESPACE, COMPONENT_TYPE, subtype)
    }

    /// A service API in the default namespace
    pub fn service(subtype: impl Into<String>) -> Self {
        Self::new(DEFAULT_NAMESPACE, SERVICE_TYPE, subtype)
    }

    pub fn is_component(&self) -> bool {
        self.type_name == COMPONENT_TYPE
    }

    pub fn is_service(&self) -> bool {
        self.type_name == SERVICE_TYPE
    }
}

impl fmt::Display for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.namespace, self.type_name, self.subtype)
    }
}

impl FromStr for Api {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [namespace, type_name, subtype]
                if !namespace.is_empty() && !type_name.is_empty() && !subtype.is_empty() =>
            {
                Ok(Self::new(*namespace, *type_name, *subtype))
            }
            _ => Err(Error::InvalidApi(s.to_string())),
        }
    }
}

impl TryFrom<String> for Api {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Api> for String {
    fn from(api: Api) -> Self {
        api.to_string()
    }
}
