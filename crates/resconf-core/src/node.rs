//! Host pipeline adapter.
//!
//! A host pipeline schedules nodes that each own one output directory. The
//! [`PipelineNode`] trait is the capability it needs; the resolver
//! configuration builder implements it by delegating to [`transform`] and
//! [`write_outputs`].

use crate::emit::write_outputs;
use crate::error::Result;
use crate::model::{ResolverConfiguration, Source};
use crate::options::BuilderOptions;
use crate::transform::transform;
use std::path::{Path, PathBuf};

/// A unit of work in a tree-transforming build pipeline.
///
/// The host calls `build` on startup and whenever an input changes, never
/// concurrently for the same node.
pub trait PipelineNode {
    /// Diagnostic label shown by the host.
    fn annotation(&self) -> Option<&str>;

    /// Input directories, in order.
    fn input_paths(&self) -> &[PathBuf];

    /// Run one read-transform-write pass into `output_root`.
    fn build(&mut self, output_root: &Path) -> Result<BuildOutcome>;
}

/// What one successful build wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOutcome {
    pub config_path: PathBuf,
    pub configuration: ResolverConfiguration,
    pub module_configuration_source: Source,
    pub module_prefix_source: Source,
    /// Absolute paths written, module first.
    pub written: Vec<PathBuf>,
}

/// Pipeline node that emits `config/resolver-configuration.{js,d.ts}`.
#[derive(Debug, Clone)]
pub struct ResolverConfigurationBuilder {
    inputs: Vec<PathBuf>,
    options: BuilderOptions,
    result: Option<ResolverConfiguration>,
}

impl ResolverConfigurationBuilder {
    /// Create a builder reading from the `input` tree.
    #[must_use]
    pub fn new(input: impl Into<PathBuf>, options: BuilderOptions) -> Self {
        Self {
            inputs: vec![input.into()],
            options,
            result: None,
        }
    }

    /// The configuration from the last successful build, when `logResult` is set.
    #[must_use]
    pub fn result(&self) -> Option<&ResolverConfiguration> {
        self.result.as_ref()
    }

    fn input_root(&self) -> &Path {
        &self.inputs[0]
    }
}

impl PipelineNode for ResolverConfigurationBuilder {
    fn annotation(&self) -> Option<&str> {
        self.options.annotation.as_deref()
    }

    fn input_paths(&self) -> &[PathBuf] {
        &self.inputs
    }

    fn build(&mut self, output_root: &Path) -> Result<BuildOutcome> {
        let output = transform(self.input_root(), &self.options)?;
        let configuration = output.resolution.configuration;

        if self.options.log_result {
            self.result = Some(configuration.clone());
        }

        let written = write_outputs(output_root, &output.files)?;

        Ok(BuildOutcome {
            config_path: output.config_path,
            configuration,
            module_configuration_source: output.resolution.module_configuration_source,
            module_prefix_source: output.resolution.module_prefix_source,
            written,
        })
    }
}
