mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "cagrwatch")]
#[command(about = "Compound annual growth rates for tracked market symbols")]
struct Cli {
    /// Output format: table, json, csv, markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute growth rates once and print them
    Report(commands::report::ReportArgs),
    /// Recompute growth rates on a fixed interval until interrupted
    Watch(commands::watch::WatchArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cagrwatch=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = OutputFormat::parse(&cli.output);

    match &cli.command {
        Commands::Report(args) => commands::report::run(args, &format).await?,
        Commands::Watch(args) => commands::watch::run(args, &format).await?,
    }

    Ok(())
}
