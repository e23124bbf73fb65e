#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::return_self_not_must_use)]

//! Resolver configuration builder.
//!
//! Turns an optional `environment.json`-style config file plus caller defaults
//! into a generated `config/resolver-configuration.js` module and its
//! `.d.ts` companion. The transform itself is pure; [`node`] adapts it to a
//! host build pipeline.

pub mod codes;
pub mod config;
pub mod emit;
pub mod error;
pub mod model;
pub mod node;
pub mod options;
pub mod resolve;
pub mod transform;
pub mod version;

pub use config::Config;
pub use emit::{
    render_module, render_outputs, write_outputs, OutputFile, DECLARATION_FILE,
    DECLARATION_SOURCE, MODULE_FILE, OUTPUT_DIR, RESOLVER_LIBRARY_ID,
};
pub use error::{Error, Result};
pub use model::{AppInfo, ModuleConfiguration, RawConfigFile, ResolverConfiguration, Source};
pub use node::{BuildOutcome, PipelineNode, ResolverConfigurationBuilder};
pub use options::{BuilderOptions, DEFAULT_CONFIG_PATH};
pub use resolve::{read_config_file, resolve, Resolution};
pub use transform::{transform, TransformOutput};
pub use version::VERSION;
