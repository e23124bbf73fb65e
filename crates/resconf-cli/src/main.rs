#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

mod commands;
mod logging;

use clap::Parser;
use commands::OptionsArgs;
use miette::Result;
use resconf_core::Config;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "resconf")]
#[command(author, version, about = "Generate resolver configuration modules for a build pipeline", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Override the working directory
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Resolve the configuration and write config/resolver-configuration.{js,d.ts}
    Build {
        /// Input tree containing the optional config file
        input: PathBuf,

        /// Output directory (created if missing)
        #[arg(long, short = 'o', value_name = "DIR")]
        out: PathBuf,

        #[command(flatten)]
        options: OptionsArgs,
    },

    /// Resolve the configuration and print the generated module without writing
    Print {
        /// Input tree containing the optional config file
        input: PathBuf,

        #[command(flatten)]
        options: OptionsArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Determine working directory
    let cwd = cli
        .cwd
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let config = Config::new(cwd)
        .with_verbosity(cli.verbose)
        .with_json_logs(cli.json);

    logging::init(config.verbosity, config.json_logs);

    match cli.command {
        Some(Commands::Version) | None => commands::version::run(),
        Some(Commands::Build {
            input,
            out,
            options,
        }) => {
            let span = tracing::info_span!("build", cmd = "build", cwd = %config.cwd.display());
            let _guard = span.enter();
            let action = commands::build::BuildAction {
                input: config.resolve_path(&input),
                out: config.resolve_path(&out),
                options,
            };
            commands::build::run(&config, action, cli.json)
        }
        Some(Commands::Print { input, options }) => {
            let span = tracing::info_span!("print", cmd = "print", cwd = %config.cwd.display());
            let _guard = span.enter();
            commands::print::run(&config, &config.resolve_path(&input), &options, cli.json)
        }
    }
}
