use crate::emit::{render_outputs, OutputFile};
use crate::error::Result;
use crate::options::BuilderOptions;
use crate::resolve::{read_config_file, resolve, Resolution};
use std::path::{Path, PathBuf};

/// Everything one transform produces, before anything is written.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOutput {
    /// Config file location that was consulted (it may not exist).
    pub config_path: PathBuf,
    pub resolution: Resolution,
    /// Rendered files, in write order.
    pub files: Vec<OutputFile>,
}

/// Read, resolve and render.
///
/// Only reads from `input_root`; the result is a pure function of the input
/// tree and `options`, so identical inputs give byte-identical files.
pub fn transform(input_root: &Path, options: &BuilderOptions) -> Result<TransformOutput> {
    options.validate()?;

    let config_path = input_root.join(&options.config_path);
    let raw = read_config_file(&config_path)?;
    let resolution = resolve(&raw, options, &config_path)?;
    let files = render_outputs(&resolution.configuration)?;

    Ok(TransformOutput {
        config_path,
        resolution,
        files,
    })
}
