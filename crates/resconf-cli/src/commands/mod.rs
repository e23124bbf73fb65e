pub mod build;
pub mod print;
pub mod version;

use miette::{miette, Result};
use resconf_core::{codes, BuilderOptions, Config, Error, ModuleConfiguration, Source};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Schema version of the `--json` reports.
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// The input tree does not exist or is not a directory.
pub const CLI_INPUT_NOT_FOUND: &str = "CLI_INPUT_NOT_FOUND";

/// Builder options shared by `build` and `print`.
///
/// Flags override values loaded from `--options`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct OptionsArgs {
    /// JSON file with builder options (camelCase keys)
    #[arg(long, value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Config file path, relative to the input tree [default: config/environment.json]
    #[arg(long, value_name = "PATH")]
    pub config_path: Option<PathBuf>,

    /// Module prefix used when the config file has none
    #[arg(long, value_name = "PREFIX")]
    pub default_module_prefix: Option<String>,

    /// JSON file with the module configuration used when the config file has none
    #[arg(long, value_name = "FILE")]
    pub default_module_configuration: Option<PathBuf>,

    /// Override the emitted application name
    #[arg(long)]
    pub name: Option<String>,

    /// Include the resolved configuration in the output
    #[arg(long)]
    pub log_result: bool,

    /// Label for diagnostics
    #[arg(long)]
    pub annotation: Option<String>,
}

impl OptionsArgs {
    /// Build the options record: `--options` file first, then flags on top.
    pub fn load(&self, config: &Config) -> resconf_core::Result<BuilderOptions> {
        let mut options = match &self.options {
            Some(path) => BuilderOptions::from_file(&config.resolve_path(path))?,
            None => BuilderOptions::default(),
        };

        if let Some(path) = &self.config_path {
            options.config_path.clone_from(path);
        }
        if let Some(prefix) = &self.default_module_prefix {
            options.default_module_prefix = Some(prefix.clone());
        }
        if let Some(path) = &self.default_module_configuration {
            options.default_module_configuration =
                Some(read_module_configuration(&config.resolve_path(path))?);
        }
        if let Some(name) = &self.name {
            options.name = Some(name.clone());
        }
        if self.log_result {
            options.log_result = true;
        }
        if let Some(annotation) = &self.annotation {
            options.annotation = Some(annotation.clone());
        }

        Ok(options)
    }
}

fn read_module_configuration(path: &Path) -> resconf_core::Result<ModuleConfiguration> {
    let contents = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Provenance of the two resolved members, for reports.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcesJson {
    pub module_configuration: Source,
    pub module_prefix: Source,
}

#[derive(Serialize)]
pub struct ErrorJson {
    pub code: String,
    pub message: String,
}

/// Error report for `--json` output.
#[derive(Serialize)]
pub struct ErrorResult {
    pub schema_version: u32,
    pub ok: bool,
    pub error: ErrorJson,
    pub notes: Vec<String>,
}

/// A failure with its stable code, before it is rendered.
#[derive(Debug)]
pub struct Failure {
    pub code: &'static str,
    pub message: String,
    pub hint: Option<&'static str>,
}

impl From<Error> for Failure {
    fn from(err: Error) -> Self {
        let hint = match err.code() {
            codes::CONFIG_MODULE_CONFIGURATION_MISSING => {
                Some("pass --default-module-configuration <FILE> or add it to the config file")
            }
            codes::CONFIG_MODULE_PREFIX_MISSING => {
                Some("pass --default-module-prefix <PREFIX> or add it to the config file")
            }
            _ => None,
        };
        Self {
            code: err.code(),
            message: err.to_string(),
            hint,
        }
    }
}

/// Make sure the input tree exists before handing it to the builder.
///
/// A missing input would otherwise look like an absent config file and
/// silently fall back to the defaults.
pub fn canonical_input(input: &Path) -> std::result::Result<PathBuf, Failure> {
    match dunce::canonicalize(input) {
        Ok(path) if path.is_dir() => Ok(path),
        Ok(path) => Err(Failure {
            code: CLI_INPUT_NOT_FOUND,
            message: format!("input {} is not a directory", path.display()),
            hint: None,
        }),
        Err(e) => Err(Failure {
            code: CLI_INPUT_NOT_FOUND,
            message: format!("input {} not found: {e}", input.display()),
            hint: None,
        }),
    }
}

/// Report a failure and stop.
///
/// JSON mode prints the error object to stdout and exits with status 1;
/// otherwise the failure becomes a diagnostic for `main` to render.
pub fn fail(failure: Failure, json: bool) -> Result<()> {
    tracing::debug!(code = failure.code, "command failed");

    if json {
        let result = ErrorResult {
            schema_version: REPORT_SCHEMA_VERSION,
            ok: false,
            error: ErrorJson {
                code: failure.code.to_string(),
                message: failure.message,
            },
            notes: failure.hint.map(|h| vec![format!("hint: {h}")]).unwrap_or_default(),
        };
        println!("{}", serde_json::to_string(&result).unwrap());
        std::process::exit(1);
    }

    Err(match failure.hint {
        Some(hint) => miette!(code = failure.code, help = hint, "{}", failure.message),
        None => miette!(code = failure.code, "{}", failure.message),
    })
}
