mod commands;

use clap::Parser;
use nightlist::startup;
use tracing::debug;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    let cli = commands::Cli::parse();
    debug!("Running {:?}", cli.command);

    // Load configuration
    let config = startup::load_config()?;

    commands::run(cli, config).await
}
