// src/models.rs
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::page::ids;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported password length '{0}' (expected 8 or 12)")]
pub struct ParseLengthError(pub String);

// Length presets offered by the page. The server coerces anything else to 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PasswordLength {
    Eight,
    #[default]
    Twelve,
}

impl PasswordLength {
    pub const PRESETS: [PasswordLength; 2] = [PasswordLength::Eight, PasswordLength::Twelve];

    pub fn chars(self) -> usize {
        match self {
            PasswordLength::Eight => 8,
            PasswordLength::Twelve => 12,
        }
    }

    /// Value of the matching `length` radio option, also sent as the form field.
    pub fn as_form_value(self) -> &'static str {
        match self {
            PasswordLength::Eight => "8",
            PasswordLength::Twelve => "12",
        }
    }
}

impl fmt::Display for PasswordLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_form_value())
    }
}

impl FromStr for PasswordLength {
    type Err = ParseLengthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "8" => Ok(PasswordLength::Eight),
            "12" => Ok(PasswordLength::Twelve),
            other => Err(ParseLengthError(other.to_string())),
        }
    }
}

impl Serialize for PasswordLength {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_form_value())
    }
}

// Character classes, one checkbox each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterClass {
    Uppercase,
    Lowercase,
    Numbers,
    Symbols,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Uppercase,
        CharacterClass::Lowercase,
        CharacterClass::Numbers,
        CharacterClass::Symbols,
    ];

    pub fn element_id(self) -> &'static str {
        match self {
            CharacterClass::Uppercase => ids::UPPERCASE,
            CharacterClass::Lowercase => ids::LOWERCASE,
            CharacterClass::Numbers => ids::NUMBERS,
            CharacterClass::Symbols => ids::SYMBOLS,
        }
    }
}
