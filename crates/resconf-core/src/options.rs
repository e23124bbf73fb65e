use crate::error::{Error, Result};
use crate::model::ModuleConfiguration;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Config file location used when none is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/environment.json";

/// Caller-supplied options, fixed when the builder is constructed.
///
/// Deserializes from camelCase JSON so an options file can be handed to the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuilderOptions {
    /// Path of the optional config file, relative to the input root.
    pub config_path: PathBuf,

    /// Used when the config file has no `moduleConfiguration`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_module_configuration: Option<ModuleConfiguration>,

    /// Used when the config file has no `modulePrefix`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_module_prefix: Option<String>,

    /// Overrides `app.name`; `app.rootName` is unaffected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Keep the resolved configuration on the builder for read-back.
    pub log_result: bool,

    /// Diagnostic label for the host pipeline. Never affects output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            default_module_configuration: None,
            default_module_prefix: None,
            name: None,
            log_result: false,
            annotation: None,
        }
    }
}

impl BuilderOptions {
    /// Options reading the config file at `config_path`.
    #[must_use]
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            ..Default::default()
        }
    }

    /// Load options from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub fn with_config_path(mut self, config_path: impl Into<PathBuf>) -> Self {
        self.config_path = config_path.into();
        self
    }

    #[must_use]
    pub fn with_default_module_configuration(mut self, config: ModuleConfiguration) -> Self {
        self.default_module_configuration = Some(config);
        self
    }

    #[must_use]
    pub fn with_default_module_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.default_module_prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_log_result(mut self, log_result: bool) -> Self {
        self.log_result = log_result;
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    /// Check that `config_path` stays inside the input tree.
    pub fn validate(&self) -> Result<()> {
        if self.config_path.as_os_str().is_empty() {
            return Err(Error::OptionsInvalid("configPath is empty".to_string()));
        }
        for component in self.config_path.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                Component::ParentDir => {
                    return Err(Error::OptionsInvalid(format!(
                        "configPath '{}' must not leave the input tree",
                        self.config_path.display()
                    )));
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(Error::OptionsInvalid(format!(
                        "configPath '{}' must be relative to the input tree",
                        self.config_path.display()
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_camel_case() {
        let options: BuilderOptions = serde_json::from_value(json!({
            "configPath": "environment.json",
            "defaultModulePrefix": "my-app",
            "defaultModuleConfiguration": {
                "types": { "application": { "definitiveCollection": "main" } },
                "collections": { "main": { "types": ["application"] } }
            },
            "logResult": true,
            "annotation": "resolver config"
        }))
        .unwrap();

        assert_eq!(options.config_path, PathBuf::from("environment.json"));
        assert_eq!(options.default_module_prefix.as_deref(), Some("my-app"));
        assert_eq!(
            options
                .default_module_configuration
                .as_ref()
                .and_then(|mc| mc.types.as_ref())
                .and_then(serde_json::Value::as_object)
                .map(serde_json::Map::len),
            Some(1)
        );
        assert!(options.log_result);
        assert!(options.name.is_none());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let options: BuilderOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, BuilderOptions::default());
        assert_eq!(options.config_path, PathBuf::from(DEFAULT_CONFIG_PATH));
    }

    #[test]
    fn test_builder_setters() {
        let options = BuilderOptions::new("env.json")
            .with_default_module_prefix("p")
            .with_name("n")
            .with_log_result(true)
            .with_annotation("a");
        assert_eq!(options.config_path, PathBuf::from("env.json"));
        assert_eq!(options.default_module_prefix.as_deref(), Some("p"));
        assert_eq!(options.name.as_deref(), Some("n"));
        assert!(options.log_result);
        assert_eq!(options.annotation.as_deref(), Some("a"));
    }

    #[test]
    fn test_validate_rejects_escaping_paths() {
        assert!(BuilderOptions::new("config/environment.json").validate().is_ok());
        assert!(BuilderOptions::new("./environment.json").validate().is_ok());

        let err = BuilderOptions::new("../environment.json")
            .validate()
            .unwrap_err();
        assert_eq!(err.code(), crate::codes::OPTIONS_INVALID);

        assert!(BuilderOptions::new("/etc/environment.json").validate().is_err());
        assert!(BuilderOptions::new("").validate().is_err());
    }
}
