//! Merge the config file with the builder defaults.
//!
//! Precedence is per member and wholesale: a truthy `moduleConfiguration` in
//! the file replaces the default entirely (no nested merge), and likewise for
//! `modulePrefix`.

use crate::error::{Error, Result};
use crate::model::{
    is_truthy, AppInfo, ModuleConfiguration, RawConfigFile, ResolverConfiguration, Source,
};
use crate::options::BuilderOptions;
use serde::de::Error as _;
use serde_json::Value;
use std::io;
use std::path::Path;

/// A resolved configuration and where each member came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub configuration: ResolverConfiguration,
    pub module_configuration_source: Source,
    pub module_prefix_source: Source,
}

/// Read the config file at `path`.
///
/// A missing file is not an error and yields an empty [`RawConfigFile`].
/// Anything else that prevents reading, or contents that are not a JSON
/// object, is fatal. A member given twice keeps its last value.
pub fn read_config_file(path: &Path) -> Result<RawConfigFile> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(RawConfigFile::default()),
        Err(source) => {
            return Err(Error::ConfigRead {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let parse_error = |source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    };

    match serde_json::from_str::<Value>(&contents).map_err(parse_error)? {
        Value::Object(object) => Ok(RawConfigFile::from_object(object)),
        other => Err(parse_error(serde_json::Error::custom(format!(
            "expected a JSON object at the top level, found {}",
            json_kind(&other)
        )))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Resolve `raw` against `options`. `config_path` is only used in error messages.
pub fn resolve(
    raw: &RawConfigFile,
    options: &BuilderOptions,
    config_path: &Path,
) -> Result<Resolution> {
    let (module_config, module_configuration_source) =
        match present(raw.module_configuration.as_ref()) {
            Some(value) => (ModuleConfiguration::from_value(value), Source::File),
            None => match &options.default_module_configuration {
                Some(config) => (config.clone(), Source::Defaults),
                None => {
                    return Err(Error::ModuleConfigurationMissing {
                        path: config_path.to_path_buf(),
                    })
                }
            },
        };

    let (module_prefix, module_prefix_source) = match present(raw.module_prefix.as_ref()) {
        Some(value) => (module_prefix_from(value, config_path)?, Source::File),
        None => match options.default_module_prefix.as_deref() {
            Some(prefix) if !prefix.is_empty() => (prefix.to_string(), Source::Defaults),
            _ => {
                return Err(Error::ModulePrefixMissing {
                    path: config_path.to_path_buf(),
                })
            }
        },
    };

    let name = match options.name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => module_prefix.clone(),
    };

    Ok(Resolution {
        configuration: ResolverConfiguration {
            app: AppInfo {
                name,
                root_name: module_prefix,
            },
            types: module_config.types,
            collections: module_config.collections,
        },
        module_configuration_source,
        module_prefix_source,
    })
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| is_truthy(v))
}

fn module_prefix_from(value: &Value, config_path: &Path) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(Error::ConfigInvalid {
            path: config_path.to_path_buf(),
            member: "modulePrefix",
            reason: format!("expected a string, found {other}"),
        }),
    }
}
