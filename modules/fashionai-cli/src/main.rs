//! `fashionai` — drive the storefront and the studio from the terminal.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fashionai_common::Config;

mod cmd;

#[derive(Parser)]
#[command(name = "fashionai")]
#[command(about = "FashionAI storefront and studio CLI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Account and profile
    #[command(flatten)]
    Account(cmd::account::AccountCommand),

    /// Studio: generate artwork, create and publish products
    #[command(flatten)]
    Studio(cmd::studio::StudioCommand),
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    if let Err(e) = runtime.block_on(run()) {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("fashionai=info".parse()?)
                .add_directive("storefront_client=info".parse()?)
                .add_directive("mockup_client=info".parse()?)
                .add_directive("imagegen_client=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Account(command) => cmd::account::run(command, &config).await,
        Commands::Studio(command) => cmd::studio::run(command, &config).await,
    }
}
