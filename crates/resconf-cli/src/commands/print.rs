//! `resconf print` command implementation.
//!
//! Runs the transform without writing anything.

use super::{canonical_input, fail, OptionsArgs, SourcesJson, REPORT_SCHEMA_VERSION};
use miette::{IntoDiagnostic, Result};
use resconf_core::{transform, Config, ResolverConfiguration};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

#[derive(Serialize)]
struct PrintResultJson {
    schema_version: u32,
    ok: bool,
    config_path: String,
    sources: SourcesJson,
    result: ResolverConfiguration,
    notes: Vec<String>,
}

/// Run the print command.
pub fn run(config: &Config, input: &Path, args: &OptionsArgs, json: bool) -> Result<()> {
    let options = match args.load(config) {
        Ok(options) => options,
        Err(e) => return fail(e.into(), json),
    };
    let input = match canonical_input(input) {
        Ok(input) => input,
        Err(failure) => return fail(failure, json),
    };

    let output = match transform(&input, &options) {
        Ok(output) => output,
        Err(e) => return fail(e.into(), json),
    };
    debug!(
        config_path = %output.config_path.display(),
        module_configuration = output.resolution.module_configuration_source.as_str(),
        module_prefix = output.resolution.module_prefix_source.as_str(),
        "resolved configuration"
    );

    if json {
        let result = PrintResultJson {
            schema_version: REPORT_SCHEMA_VERSION,
            ok: true,
            config_path: output.config_path.display().to_string(),
            sources: SourcesJson {
                module_configuration: output.resolution.module_configuration_source,
                module_prefix: output.resolution.module_prefix_source,
            },
            result: output.resolution.configuration,
            notes: Vec::new(),
        };
        println!("{}", serde_json::to_string(&result).into_diagnostic()?);
        return Ok(());
    }

    // The module is always the first rendered file.
    if let Some(module) = output.files.first() {
        print!("{}", module.contents);
    }
    Ok(())
}
