use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use tokensmith::{handle_build, handle_check, handle_diff};
use tokensmith_drift::ChangeSeverity;

#[derive(Parser)]
#[command(name = "tokensmith")]
#[command(about = "Resolve, validate, and emit design tokens for every platform", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and write artifacts for every target
    Build {
        /// Pipeline config file
        #[arg(short, long, default_value = "tokensmith.toml")]
        config: PathBuf,

        /// Stop at the first target that fails to emit
        #[arg(long)]
        fail_fast: bool,
    },

    /// Run governance checks without emitting anything
    Check {
        /// Pipeline config file
        #[arg(short, long, default_value = "tokensmith.toml")]
        config: PathBuf,

        /// Report format
        #[arg(short, long, default_value = "text")]
        format: ReportFormat,
    },

    /// Diff two document sets and classify every change
    Diff {
        /// Config file supplying drift thresholds (optional)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Documents for the baseline set, in merge order
        #[arg(long, required = true, num_args = 1..)]
        before: Vec<PathBuf>,

        /// Documents for the candidate set, in merge order
        #[arg(long, required = true, num_args = 1..)]
        after: Vec<PathBuf>,

        /// Exit nonzero when any change is at least this severe
        #[arg(long)]
        fail_on: Option<Gate>,

        /// Report format
        #[arg(short, long, default_value = "text")]
        format: ReportFormat,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum Gate {
    Major,
    Minor,
    Patch,
}

impl From<Gate> for ChangeSeverity {
    fn from(gate: Gate) -> Self {
        match gate {
            Gate::Major => ChangeSeverity::Major,
            Gate::Minor => ChangeSeverity::Minor,
            Gate::Patch => ChangeSeverity::Patch,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.debug {
        tracing::Level::TRACE
    } else if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(cli.debug) // Show target module in debug mode
        .init();

    match cli.command {
        Commands::Build { config, fail_fast } => handle_build(&config, fail_fast).await,
        Commands::Check { config, format } => {
            handle_check(&config, format == ReportFormat::Json)
        }
        Commands::Diff {
            config,
            before,
            after,
            fail_on,
            format,
        } => handle_diff(
            config.as_deref(),
            &before,
            &after,
            fail_on.map(ChangeSeverity::from),
            format == ReportFormat::Json,
        ),
    }
}
