use clap::Parser;
use std::path::Path;

mod api;
mod cli;
mod clipboard;
mod core;
mod logging;
mod models;
mod page;
mod utils;

use crate::cli::{handlers, Args, CliCommand};
use crate::core::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    if Path::new(".env").exists() {
        dotenvy::dotenv().ok();
    }

    let args = Args::parse();

    let mut config = Config::load();
    args.apply_to(&mut config);

    logging::init(&config)?;
    log::info!("🔒 Password generator client starting against {}", config.endpoint_url);
    log::debug!("Loaded config: {:?}", config);

    let result = match args.command.unwrap_or(CliCommand::Interactive) {
        CliCommand::Interactive => handlers::handle_interactive(&config).await,
        CliCommand::Generate(opts) => handlers::handle_generate(&config, opts).await,
        CliCommand::Health => handlers::handle_health(&config).await,
    };

    if let Err(e) = &result {
        log::error!("{:#}", e);
    }
    result
}
