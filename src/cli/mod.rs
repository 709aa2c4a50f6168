// src/cli/mod.rs
use clap::Parser;

use crate::core::config::{Config, Locale};

pub mod commands;
pub mod handlers;
pub mod menu;

pub use commands::{CliCommand, GenerateArgs};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Generation endpoint URL
    #[arg(long, short, env = "PASSGEN_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Anti-forgery token (read from the served page when omitted)
    #[arg(long, env = "CSRF_TOKEN")]
    pub csrf_token: Option<String>,

    /// Language of page messages (ja, en)
    #[arg(long)]
    pub locale: Option<Locale>,

    /// Command to execute (defaults to the interactive page)
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

impl Args {
    // Command line wins over environment and .env
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint_url = endpoint.clone();
        }
        if let Some(token) = &self.csrf_token {
            if !token.is_empty() {
                config.csrf_token = Some(token.clone());
            }
        }
        if let Some(locale) = self.locale {
            config.locale = locale;
        }
    }
}
