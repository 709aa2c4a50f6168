// src/api/mod.rs
use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

use crate::models::ParseLengthError;

pub mod client;
pub mod types;

pub use client::HttpPasswordService;
pub use types::GenerationRequest;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("HTTP error! status: {status}")]
    Http { status: StatusCode },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("No password length selected")]
    MissingLength,

    #[error(transparent)]
    InvalidLength(#[from] ParseLengthError),

    #[error("Invalid endpoint: {0}")]
    Client(String),
}

/// The server side of the page: turns a set of options into a password.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordService: Send + Sync {
    /// Submit `request` with the page's anti-forgery token and return the
    /// response body on a 2xx status.
    async fn generate(
        &self,
        request: &GenerationRequest,
        csrf_token: &str,
    ) -> Result<String, GenerationError>;
}
