//! jobsift - incremental job-posting extraction.

use clap::Parser;
use jobsift_cli::commands;
use jobsift_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> jobsift_cli::Result<()> {
    let cli = Cli::parse();

    // Credentials come from the environment; .env is optional.
    dotenvy::dotenv().ok();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = Config::load(cli.config.as_deref())?;
    let formatter = Formatter::new(!cli.no_color && config.settings.color);

    match cli.command {
        Command::Run(args) => commands::execute_run(args, config, &formatter).await?,
        Command::Status => commands::execute_status(&config, &formatter)?,
        Command::Report(args) => commands::execute_report(args, &config, &formatter)?,
        Command::Models => commands::execute_models(&config, &formatter).await?,
    }

    Ok(())
}
