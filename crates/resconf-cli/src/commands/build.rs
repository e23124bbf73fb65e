//! `resconf build` command implementation.

use super::{canonical_input, fail, Failure, OptionsArgs, SourcesJson, REPORT_SCHEMA_VERSION};
use miette::{IntoDiagnostic, Result};
use resconf_core::{
    BuildOutcome, Config, PipelineNode, ResolverConfiguration, ResolverConfigurationBuilder,
};
use resconf_util::hash::file_digest;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Build command action.
#[derive(Debug, Clone)]
pub struct BuildAction {
    pub input: PathBuf,
    pub out: PathBuf,
    pub options: OptionsArgs,
}

/// Successful build report for JSON output.
#[derive(Serialize)]
struct BuildResultJson {
    schema_version: u32,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    annotation: Option<String>,
    config_path: String,
    files: Vec<FileJson>,
    sources: SourcesJson,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<ResolverConfiguration>,
    notes: Vec<String>,
}

#[derive(Serialize)]
struct FileJson {
    /// Path relative to the output directory, `/`-separated.
    path: String,
    bytes: u64,
    /// BLAKE3 hex digest.
    hash: String,
}

/// Run the build command.
pub fn run(config: &Config, action: BuildAction, json: bool) -> Result<()> {
    let options = match action.options.load(config) {
        Ok(options) => options,
        Err(e) => return fail(e.into(), json),
    };
    let input = match canonical_input(&action.input) {
        Ok(input) => input,
        Err(failure) => return fail(failure, json),
    };

    info!(
        input = %input.display(),
        out = %action.out.display(),
        annotation = options.annotation.as_deref().unwrap_or(""),
        "building resolver configuration"
    );

    let mut node = ResolverConfigurationBuilder::new(&input, options);
    let outcome = match node.build(&action.out) {
        Ok(outcome) => outcome,
        Err(e) => return fail(e.into(), json),
    };

    debug!(
        config_path = %outcome.config_path.display(),
        module_configuration = outcome.module_configuration_source.as_str(),
        module_prefix = outcome.module_prefix_source.as_str(),
        "resolved configuration"
    );

    let files = match describe_files(&action.out, &outcome) {
        Ok(files) => files,
        Err(failure) => return fail(failure, json),
    };
    let notes = notes_for(&outcome);

    if json {
        let result = BuildResultJson {
            schema_version: REPORT_SCHEMA_VERSION,
            ok: true,
            annotation: node.annotation().map(str::to_string),
            config_path: outcome.config_path.display().to_string(),
            files,
            sources: SourcesJson {
                module_configuration: outcome.module_configuration_source,
                module_prefix: outcome.module_prefix_source,
            },
            result: node.result().cloned(),
            notes,
        };
        println!("{}", serde_json::to_string(&result).into_diagnostic()?);
        return Ok(());
    }

    for file in &files {
        println!("wrote {} ({} bytes, {})", file.path, file.bytes, &file.hash[..12]);
    }
    for note in &notes {
        println!("note: {note}");
    }
    if let Some(result) = node.result() {
        println!(
            "{}",
            serde_json::to_string_pretty(result).into_diagnostic()?
        );
    }

    Ok(())
}

fn describe_files(out: &Path, outcome: &BuildOutcome) -> std::result::Result<Vec<FileJson>, Failure> {
    outcome
        .written
        .iter()
        .map(|path| {
            let digest = file_digest(path).map_err(|e| Failure {
                code: resconf_core::codes::OUTPUT_WRITE_FAILED,
                message: format!("Failed to read back {}: {e}", path.display()),
                hint: None,
            })?;
            let rel = path.strip_prefix(out).unwrap_or(path);
            Ok(FileJson {
                path: rel.to_string_lossy().replace('\\', "/"),
                bytes: digest.bytes,
                hash: digest.hash,
            })
        })
        .collect()
}

fn notes_for(outcome: &BuildOutcome) -> Vec<String> {
    let mut notes = Vec::new();
    if !outcome.config_path.exists() {
        notes.push(format!(
            "no config file at {}; using defaults",
            outcome.config_path.display()
        ));
    }
    notes
}
