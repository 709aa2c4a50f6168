// src/cli/commands.rs
use clap::Subcommand;

use crate::core::config::Config;
use crate::models::PasswordLength;
use crate::page::template::PageDefaults;

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Open the generator page in the terminal
    Interactive,

    /// Generate a single password and print it
    Generate(GenerateArgs),

    /// Check that the generator server is up
    Health,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Password length (8 or 12)
    #[arg(long, short)]
    pub length: Option<PasswordLength>,

    /// Leave out uppercase letters
    #[arg(long)]
    pub no_uppercase: bool,

    /// Leave out lowercase letters
    #[arg(long)]
    pub no_lowercase: bool,

    /// Leave out numbers
    #[arg(long)]
    pub no_numbers: bool,

    /// Include symbols
    #[arg(long)]
    pub symbols: bool,

    /// Symbol set to draw from (implies --symbols)
    #[arg(long)]
    pub custom_symbols: Option<String>,

    /// Copy the password to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl GenerateArgs {
    pub fn page_defaults(&self, config: &Config) -> PageDefaults {
        PageDefaults {
            length: self.length.unwrap_or(config.default_length),
            uppercase: !self.no_uppercase,
            lowercase: !self.no_lowercase,
            numbers: !self.no_numbers,
            symbols: self.symbols || self.custom_symbols.is_some(),
            custom_symbols: self.custom_symbols.clone().unwrap_or_default(),
        }
    }
}
