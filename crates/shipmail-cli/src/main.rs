//! Shipmail CLI - extract shipment details from freight enquiry emails.

use anyhow::Context;
use clap::Parser;
use shipmail_cli::commands;
use shipmail_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "shipmail=debug" } else { "shipmail=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let color_enabled = !cli.no_color && config.settings.color;

    match cli.command {
        Command::Extract(args) => {
            let formatter = Formatter::new(config.settings.format, color_enabled);
            commands::execute_extract(args, &config, &formatter)
                .await
                .context("Extraction failed")?;
        }
        Command::Evaluate(args) => {
            let format = args.format.map(Into::into).unwrap_or(config.settings.format);
            let formatter = Formatter::new(format, color_enabled);
            commands::execute_evaluate(args, &config, &formatter).context("Evaluation failed")?;
        }
    }

    Ok(())
}
