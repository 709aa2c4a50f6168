// src/page/elements.rs
use thiserror::Error;

use super::{ids, Button, Checkbox, Document, ElementKind, RadioGroupHandle, Section, TextInput};
use crate::models::CharacterClass;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("Page is missing required element '#{0}'")]
    MissingElement(String),

    #[error("Page is missing radio group '{0}'")]
    MissingRadioGroup(String),

    #[error("Element '#{id}' is a {found}, expected a {expected}")]
    WrongElementKind {
        id: String,
        expected: ElementKind,
        found: ElementKind,
    },
}

/// Every control the form controller touches, resolved once up front.
#[derive(Debug, Clone)]
pub struct PageElements {
    pub uppercase: Checkbox,
    pub lowercase: Checkbox,
    pub numbers: Checkbox,
    pub symbols: Checkbox,
    pub symbols_area: Section,
    pub generate_button: Button,
    pub copy_button: Button,
    pub password_field: TextInput,
    pub custom_symbols: TextInput,
    pub length: RadioGroupHandle,
    pub csrf_token: String,
}

impl PageElements {
    /// Resolve all required elements, failing on the first one that is absent
    /// or of the wrong kind.
    pub fn bind(doc: &Document) -> Result<Self, PageError> {
        let require = |id: &str, expected: ElementKind| -> Result<(), PageError> {
            match doc.element_kind(id) {
                None => Err(PageError::MissingElement(id.to_string())),
                Some(found) if found != expected => Err(PageError::WrongElementKind {
                    id: id.to_string(),
                    expected,
                    found,
                }),
                Some(_) => Ok(()),
            }
        };

        for class in CharacterClass::ALL {
            require(class.element_id(), ElementKind::Checkbox)?;
        }
        require(ids::SYMBOLS_AREA, ElementKind::Section)?;
        require(ids::GENERATE_BUTTON, ElementKind::Button)?;
        require(ids::COPY_BUTTON, ElementKind::Button)?;
        require(ids::PASSWORD, ElementKind::TextInput)?;
        require(ids::CUSTOM_SYMBOLS, ElementKind::TextInput)?;

        if !doc.has_radio_group(ids::LENGTH_GROUP) {
            return Err(PageError::MissingRadioGroup(ids::LENGTH_GROUP.to_string()));
        }

        let csrf_token = doc.meta(ids::CSRF_META).unwrap_or_else(|| {
            log::warn!("⚠️ No '{}' meta entry on page, sending empty token", ids::CSRF_META);
            String::new()
        });

        Ok(Self {
            uppercase: doc.checkbox(ids::UPPERCASE),
            lowercase: doc.checkbox(ids::LOWERCASE),
            numbers: doc.checkbox(ids::NUMBERS),
            symbols: doc.checkbox(ids::SYMBOLS),
            symbols_area: doc.section(ids::SYMBOLS_AREA),
            generate_button: doc.button(ids::GENERATE_BUTTON),
            copy_button: doc.button(ids::COPY_BUTTON),
            password_field: doc.text_input(ids::PASSWORD),
            custom_symbols: doc.text_input(ids::CUSTOM_SYMBOLS),
            length: doc.radio_group(ids::LENGTH_GROUP),
            csrf_token,
        })
    }

    pub fn checkbox(&self, class: CharacterClass) -> &Checkbox {
        match class {
            CharacterClass::Uppercase => &self.uppercase,
            CharacterClass::Lowercase => &self.lowercase,
            CharacterClass::Numbers => &self.numbers,
            CharacterClass::Symbols => &self.symbols,
        }
    }
}
