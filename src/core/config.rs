// src/core/config.rs
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use log::LevelFilter;

use crate::models::PasswordLength;

// Language of the fixed strings the controller writes into the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Ja,
    En,
}

impl Locale {
    pub fn error_message(self) -> &'static str {
        match self {
            Locale::Ja => "エラーが発生しました",
            Locale::En => "An error occurred",
        }
    }

    pub fn copied_label(self) -> &'static str {
        match self {
            Locale::Ja => "コピーしました",
            Locale::En => "Copied!",
        }
    }

    pub fn copy_label(self) -> &'static str {
        match self {
            Locale::Ja => "コピー",
            Locale::En => "Copy",
        }
    }

    pub fn generate_label(self) -> &'static str {
        match self {
            Locale::Ja => "パスワード生成",
            Locale::En => "Generate",
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ja" | "ja-jp" | "japanese" => Ok(Locale::Ja),
            "en" | "en-us" | "en-gb" | "english" => Ok(Locale::En),
            other => Err(format!("Unknown locale '{}'", other)),
        }
    }
}

// Configuration for the generator client
#[derive(Debug, Clone)]
pub struct Config {
    // Generation endpoint
    pub endpoint_url: String,
    pub csrf_token: Option<String>,

    // Page
    pub locale: Locale,
    pub copy_feedback: Duration,
    pub default_length: PasswordLength,

    // Logging
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint_url: "http://localhost:8080/".to_string(),
            csrf_token: None,

            locale: Locale::default(),
            copy_feedback: Duration::from_secs(2),
            default_length: PasswordLength::default(),

            log_level: LevelFilter::Info,
            log_file: None, // Resolved in load()
        }
    }
}

impl Config {
    // Load configuration from environment variables
    pub fn load() -> Self {
        let mut config = Self::load_from(|key| env::var(key).ok());
        if config.log_file.is_none() && env::var("LOG_FILE").is_err() {
            config.log_file = crate::utils::get_app_data_dir().map(|dir| dir.join("passgen.log"));
        }
        config
    }

    // Same as load(), reading values through `lookup`
    pub fn load_from<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        // Endpoint
        if let Some(url) = lookup("PASSGEN_ENDPOINT") {
            if !url.trim().is_empty() {
                config.endpoint_url = url.trim().to_string();
            }
        }

        if let Some(token) = lookup("CSRF_TOKEN") {
            if !token.is_empty() {
                config.csrf_token = Some(token);
            }
        }

        // Page
        if let Some(val) = lookup("PASSGEN_LOCALE") {
            match val.parse() {
                Ok(locale) => config.locale = locale,
                Err(e) => log::warn!("{}, using {:?}", e, config.locale),
            }
        }

        if let Some(val) = lookup("COPY_FEEDBACK_MS") {
            if let Ok(ms) = val.parse::<u64>() {
                config.copy_feedback = Duration::from_millis(ms);
            }
        }

        if let Some(val) = lookup("DEFAULT_PASSWORD_LENGTH") {
            match val.parse() {
                Ok(length) => config.default_length = length,
                Err(e) => log::warn!("{}, using {}", e, config.default_length),
            }
        }

        // Logging
        if let Some(level) = lookup("LOG_LEVEL") {
            match level.to_lowercase().as_str() {
                "off" => config.log_level = LevelFilter::Off,
                "error" => config.log_level = LevelFilter::Error,
                "warn" => config.log_level = LevelFilter::Warn,
                "info" => config.log_level = LevelFilter::Info,
                "debug" => config.log_level = LevelFilter::Debug,
                "trace" => config.log_level = LevelFilter::Trace,
                _ => {}
            }
        }

        // "-" means stderr
        if let Some(file) = lookup("LOG_FILE") {
            config.log_file = match file.trim() {
                "" | "-" => None,
                path => Some(PathBuf::from(path)),
            };
        }

        config
    }
}
