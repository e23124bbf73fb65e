//! Data model: the on-disk config file, module configuration and the
//! resolver configuration that ends up in the generated module.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The optional JSON config file read from the input tree.
///
/// Both members are kept as raw JSON so that falsy values (`null`, `false`,
/// `0`, `""`) can fall back to the defaults instead of failing to parse.
/// Unknown top-level members are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConfigFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_configuration: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_prefix: Option<Value>,
}

impl RawConfigFile {
    /// Pick the two known members out of a parsed top-level object.
    #[must_use]
    pub fn from_object(mut object: Map<String, Value>) -> Self {
        Self {
            module_configuration: object.remove("moduleConfiguration"),
            module_prefix: object.remove("modulePrefix"),
        }
    }
}

/// Type and collection descriptors for the module resolver.
///
/// Both members are opaque JSON passed through untouched, in the order they
/// were written. `None` means the key was absent; an explicit `null` is kept
/// as `Some(Value::Null)` and survives into the generated module. Only a JSON
/// object deserializes into this type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct ModuleConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collections: Option<Value>,
}

impl ModuleConfiguration {
    /// Read `types`/`collections` off a file's `moduleConfiguration` value.
    ///
    /// Non-object values carry neither member.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self {
                types: map.get("types").cloned(),
                collections: map.get("collections").cloned(),
            },
            _ => Self::default(),
        }
    }
}

impl From<Map<String, Value>> for ModuleConfiguration {
    fn from(mut map: Map<String, Value>) -> Self {
        Self {
            types: map.remove("types"),
            collections: map.remove("collections"),
        }
    }
}

/// A present key always yields `Some`, even when its value is `null`.
fn present_value<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// `app` block of the resolver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppInfo {
    pub name: String,
    pub root_name: String,
}

/// The derived configuration serialized into the generated module.
///
/// Field order is the serialized key order: `app`, `types`, `collections`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfiguration {
    pub app: AppInfo,
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub types: Option<Value>,
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub collections: Option<Value>,
}

/// Where a resolved member came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// The config file in the input tree.
    File,
    /// The builder options' defaults.
    Defaults,
}

impl Source {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Defaults => "defaults",
        }
    }
}

/// Loose truthiness: `null`, `false`, `0` and `""` count as absent.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
