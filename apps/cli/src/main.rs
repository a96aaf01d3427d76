mod cli;
mod commands;
mod config;
mod context;
mod format;

use chrono::Utc;
use clap::Parser;
use log::debug;

use crate::cli::Cli;
use crate::config::{init_logging, AppConfig};
use crate::context::AppContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_cli(&cli);
    init_logging(config.log_level);
    debug!(
        "Data directory: {}, gist API: {}",
        config.data_dir.display(),
        config.api_url
    );

    let mut ctx = AppContext::open(&config)?;
    let output = commands::run(cli.command, &mut ctx, Utc::now()).await?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}
