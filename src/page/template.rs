// src/page/template.rs
use super::{ids, Document};
use crate::core::config::Locale;
use crate::models::PasswordLength;

// Initial control state of the generator page
#[derive(Debug, Clone)]
pub struct PageDefaults {
    pub length: PasswordLength,
    pub uppercase: bool,
    pub lowercase: bool,
    pub numbers: bool,
    pub symbols: bool,
    pub custom_symbols: String,
}

impl Default for PageDefaults {
    fn default() -> Self {
        Self {
            length: PasswordLength::default(),
            uppercase: true,
            lowercase: true,
            numbers: true,
            symbols: false,
            custom_symbols: String::new(),
        }
    }
}

/// Build the generator page as the server renders it: every control the
/// controller needs, the copy button disabled until a password arrives, and
/// the custom symbols area hidden until the page is loaded.
pub fn standard_page(
    csrf_token: Option<&str>,
    locale: Locale,
    defaults: &PageDefaults,
) -> Document {
    let options: Vec<&str> = PasswordLength::PRESETS
        .iter()
        .map(|p| p.as_form_value())
        .collect();

    let doc = Document::new();
    doc.add_radio_group(ids::LENGTH_GROUP, &options, Some(defaults.length.as_form_value()))
        .add_checkbox(ids::UPPERCASE, defaults.uppercase)
        .add_checkbox(ids::LOWERCASE, defaults.lowercase)
        .add_checkbox(ids::NUMBERS, defaults.numbers)
        .add_checkbox(ids::SYMBOLS, defaults.symbols)
        .add_section(ids::SYMBOLS_AREA, false)
        .add_text_input(ids::CUSTOM_SYMBOLS, &defaults.custom_symbols)
        .add_text_input(ids::PASSWORD, "")
        .add_button(ids::GENERATE_BUTTON, locale.generate_label(), false)
        .add_button(ids::COPY_BUTTON, locale.copy_label(), true);

    if let Some(token) = csrf_token {
        doc.set_meta(ids::CSRF_META, token);
    }
    doc
}
