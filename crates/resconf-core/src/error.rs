use crate::codes;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias for resolver configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for resolving and emitting a resolver configuration.
#[derive(Error, Debug)]
pub enum Error {
    #[error("The module configuration could not be found. Please add a config file to '{path}' and export an object with a 'moduleConfiguration' member.")]
    ModuleConfigurationMissing { path: PathBuf },

    #[error("The module prefix could not be found. Add a config file to '{path}' and export an object with a 'modulePrefix' member.")]
    ModulePrefixMissing { path: PathBuf },

    #[error("Failed to read config at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid '{member}' in config at {path}: {reason}")]
    ConfigInvalid {
        path: PathBuf,
        member: &'static str,
        reason: String,
    },

    #[error("Invalid builder options: {0}")]
    OptionsInvalid(String),

    #[error("Failed to write {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize resolver configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::ModuleConfigurationMissing { .. } => codes::CONFIG_MODULE_CONFIGURATION_MISSING,
            Self::ModulePrefixMissing { .. } => codes::CONFIG_MODULE_PREFIX_MISSING,
            Self::ConfigRead { .. } => codes::CONFIG_READ_FAILED,
            Self::ConfigParse { .. } => codes::CONFIG_PARSE_FAILED,
            Self::ConfigInvalid { .. } => codes::CONFIG_INVALID,
            Self::OptionsInvalid(_) => codes::OPTIONS_INVALID,
            Self::OutputWrite { .. } => codes::OUTPUT_WRITE_FAILED,
            Self::Serialize(_) => codes::OUTPUT_SERIALIZE_FAILED,
        }
    }
}
