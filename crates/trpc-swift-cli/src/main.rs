//! trpc-swift CLI - Swift client generator for tRPC routers
//!
//! Commands:
//! - `trpc-swift generate` - Generate a Swift client from a router definition
//! - `trpc-swift check` - Validate a trpc-swift.toml manifest and its definition

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use trpc_swift_core::GenerationError;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod generate;
mod manifest;

#[derive(Parser)]
#[command(name = "trpc-swift")]
#[command(author, version, about = "Generate Swift clients for tRPC routers", long_about = None)]
struct Cli {
    /// Increase verbosity (-v INFO, -vv DEBUG)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a Swift client
    Generate {
        /// Path to trpc-swift.toml manifest
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// JSON router definition
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Root class name
        #[arg(short, long)]
        name: Option<String>,

        /// Swift file to write
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit a top-level typealias for every model
        #[arg(long)]
        type_aliases: bool,

        /// Make generated declarations public
        #[arg(long)]
        public: bool,

        /// Runtime template replacing the bundled one
        #[arg(long)]
        template: Option<PathBuf>,

        /// Print the client to stdout instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate a trpc-swift.toml manifest
    Check {
        /// Path to trpc-swift.toml (default: ./trpc-swift.toml)
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },
}

/// Install the stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise 0 shows warnings, 1 (-v) info and
/// 2+ (-vv) debug.
fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "info".to_string(),
            _ => "debug".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose >= 2)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// Exit status for a failed run: the generator's error code when there is
/// one, 1 otherwise.
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<GenerationError>()
        .map_or(1, GenerationError::error_code)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Generate {
            manifest,
            input,
            name,
            output,
            type_aliases,
            public,
            template,
            dry_run,
        } => {
            generate::run(generate::GenerateOptions {
                manifest,
                input,
                name,
                output,
                template,
                type_aliases,
                public,
                dry_run,
            })?;
        }
        Commands::Check { manifest } => {
            generate::check(manifest)?;
        }
    }

    Ok(())
}
