mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::select::SelectArgs;
use commands::{Session, SessionArgs};

/// Fixed-size portfolio selection from historical asset observations
#[derive(Parser)]
#[command(
    name = "pfs",
    version,
    about = "Fixed-size portfolio selection from historical asset observations",
    long_about = "Summarises price/value/dividend observations per asset (sample variance, \
                  effective and scenario-weighted expected return) and picks portfolios \
                  by random sampling or exhaustive search over every combination."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    session: SessionArgs,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    output: OutputFormat,

    /// Log selection details to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Per-asset statistics for every code in the data file
    Summary,
    /// Pick a portfolio with one policy
    Select(SelectArgs),
    /// Interactive menu
    Menu,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn fail(e: Box<dyn std::error::Error>) -> ! {
    eprintln!("{}: {}", "error".red().bold(), e);
    process::exit(1);
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Summary => Session::open(&cli.session)
            .and_then(|session| commands::summary::run_summary(&session)),
        Commands::Select(args) => Session::open(&cli.session)
            .and_then(|mut session| commands::select::run_select(&mut session, args)),
        Commands::Menu => {
            let outcome = Session::open(&cli.session)
                .and_then(|mut session| commands::menu::run_menu(&mut session, &cli.output));
            match outcome {
                Ok(()) => process::exit(0),
                Err(e) => fail(e),
            }
        }
        Commands::Version => {
            println!("pfs {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => fail(e),
    }
}
