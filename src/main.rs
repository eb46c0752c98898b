use clap::Parser;
use spin_facts::command::Cli;
use spin_facts::command::dispatcher::dispatch_command;
use spin_facts::logging;
use spin_facts::shared::config::{CONFIG, Settings, load_settings_from};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let settings: Arc<Settings> = match &cli.config {
        Some(path) => Arc::new(load_settings_from(path)?),
        None => Arc::clone(&CONFIG),
    };
    logging::init(&settings.logging)?;

    info!(command = ?cli.command, "spin_facts starting");
    let mut stdout = tokio::io::stdout();
    match dispatch_command(&cli.command, &settings, &mut stdout).await {
        Ok(true) => Ok(ExitCode::SUCCESS),
        Ok(false) => Ok(ExitCode::FAILURE),
        Err(e) => {
            error!("{:#}", e);
            Err(e)
        }
    }
}
