// src/api/types.rs
use serde::Serialize;

use crate::models::PasswordLength;

/// Form body posted to the generation endpoint.
///
/// Built fresh from the page right before each request and dropped once the
/// response has been applied. Booleans go over the wire as `"true"`/`"false"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Preset length, sent as `"8"` or `"12"`
    pub length: PasswordLength,
    pub uppercase: bool,
    pub lowercase: bool,
    pub numbers: bool,
    pub symbols: bool,
    /// Raw custom symbol set; the server only looks at it when `symbols` is set
    pub custom_symbols: String,
}

#[derive(Debug, Serialize)]
pub struct GeneratedPassword {
    pub password: String,
    pub length: usize,
}
