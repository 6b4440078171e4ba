use anyhow::Result;
use clap::{Parser, Subcommand};
use recall_scoring::TaskKind;

mod commands;
mod config;
mod report;

#[derive(Parser)]
#[command(name = "recall", about = "Score serial and free recall experiments")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a folder of serial recall trials
    Serial(commands::analyze::AnalyzeArgs),
    /// Score a folder of free recall trials
    Free(commands::analyze::AnalyzeArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Serial(args) => commands::analyze::run(TaskKind::Serial, args),
        Commands::Free(args) => commands::analyze::run(TaskKind::Free, args),
        Commands::Config(args) => commands::config::run(args),
    }
}
