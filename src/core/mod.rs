// src/core/mod.rs
pub mod config;
pub mod controller;

pub use controller::{FormController, GenerationOutcome, PageEvent};
