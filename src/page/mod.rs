// src/page/mod.rs
//! In-memory page model the form controller is bound to.
//!
//! A [`Document`] owns the state of every form control on the page. Handles
//! such as [`Checkbox`] or [`Button`] are cheap clones pointing back into the
//! same document, so the controller, the terminal renderer and the copy-label
//! timer can all observe and mutate the same controls.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

pub mod elements;
pub mod meta;
pub mod template;

pub use elements::PageElements;

/// Identifiers the page template guarantees.
pub mod ids {
    pub const UPPERCASE: &str = "uppercase";
    pub const LOWERCASE: &str = "lowercase";
    pub const NUMBERS: &str = "numbers";
    pub const SYMBOLS: &str = "symbols";
    pub const SYMBOLS_AREA: &str = "symbolsCustomArea";
    pub const GENERATE_BUTTON: &str = "generateButton";
    pub const COPY_BUTTON: &str = "copyButton";
    pub const PASSWORD: &str = "password";
    pub const CUSTOM_SYMBOLS: &str = "customSymbols";
    pub const LENGTH_GROUP: &str = "length";
    pub const CSRF_META: &str = "csrf-token";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Checkbox,
    Button,
    TextInput,
    Section,
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementKind::Checkbox => write!(f, "checkbox"),
            ElementKind::Button => write!(f, "button"),
            ElementKind::TextInput => write!(f, "text input"),
            ElementKind::Section => write!(f, "section"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Element {
    Checkbox { checked: bool },
    Button { label: String, disabled: bool },
    TextInput { value: String, selected: bool },
    Section { visible: bool },
}

impl Element {
    fn kind(&self) -> ElementKind {
        match self {
            Element::Checkbox { .. } => ElementKind::Checkbox,
            Element::Button { .. } => ElementKind::Button,
            Element::TextInput { .. } => ElementKind::TextInput,
            Element::Section { .. } => ElementKind::Section,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct RadioGroup {
    options: Vec<String>,
    checked: Option<String>,
}

#[derive(Debug, Default)]
struct DocumentState {
    elements: HashMap<String, Element>,
    radio_groups: HashMap<String, RadioGroup>,
    meta: HashMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    state: Arc<RwLock<DocumentState>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<R>(&self, f: impl FnOnce(&DocumentState) -> R) -> R {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    fn write<R>(&self, f: impl FnOnce(&mut DocumentState) -> R) -> R {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    fn insert(&self, id: &str, element: Element) -> &Self {
        self.write(|s| {
            s.elements.insert(id.to_string(), element);
        });
        self
    }

    pub fn add_checkbox(&self, id: &str, checked: bool) -> &Self {
        self.insert(id, Element::Checkbox { checked })
    }

    pub fn add_button(&self, id: &str, label: &str, disabled: bool) -> &Self {
        self.insert(
            id,
            Element::Button {
                label: label.to_string(),
                disabled,
            },
        )
    }

    pub fn add_text_input(&self, id: &str, value: &str) -> &Self {
        self.insert(
            id,
            Element::TextInput {
                value: value.to_string(),
                selected: false,
            },
        )
    }

    pub fn add_section(&self, id: &str, visible: bool) -> &Self {
        self.insert(id, Element::Section { visible })
    }

    pub fn add_radio_group(&self, name: &str, options: &[&str], checked: Option<&str>) -> &Self {
        self.write(|s| {
            s.radio_groups.insert(
                name.to_string(),
                RadioGroup {
                    options: options.iter().map(|o| o.to_string()).collect(),
                    checked: checked.map(String::from),
                },
            );
        });
        self
    }

    pub fn set_meta(&self, name: &str, content: &str) -> &Self {
        self.write(|s| {
            s.meta.insert(name.to_string(), content.to_string());
        });
        self
    }

    pub fn meta(&self, name: &str) -> Option<String> {
        self.read(|s| s.meta.get(name).cloned())
    }

    pub fn element_kind(&self, id: &str) -> Option<ElementKind> {
        self.read(|s| s.elements.get(id).map(Element::kind))
    }

    pub fn has_radio_group(&self, name: &str) -> bool {
        self.read(|s| s.radio_groups.contains_key(name))
    }

    fn with_element<R>(&self, id: &str, f: impl FnOnce(&mut Element) -> R) -> Option<R> {
        self.write(|s| s.elements.get_mut(id).map(f))
    }
}

// Handles. Kinds are checked once by `PageElements::bind`, so accessors treat
// a mismatch as an absent value rather than an error.

#[derive(Debug, Clone)]
pub struct Checkbox {
    doc: Document,
    id: String,
}

impl Checkbox {
    #[cfg(test)]
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_checked(&self) -> bool {
        self.doc
            .with_element(&self.id, |e| matches!(e, Element::Checkbox { checked: true }))
            .unwrap_or(false)
    }

    pub fn set_checked(&self, value: bool) {
        self.doc.with_element(&self.id, |e| {
            if let Element::Checkbox { checked } = e {
                *checked = value;
            }
        });
    }
}

#[derive(Debug, Clone)]
pub struct Button {
    doc: Document,
    id: String,
}

impl Button {
    pub fn is_disabled(&self) -> bool {
        self.doc
            .with_element(&self.id, |e| matches!(e, Element::Button { disabled: true, .. }))
            .unwrap_or(false)
    }

    pub fn set_disabled(&self, value: bool) {
        self.doc.with_element(&self.id, |e| {
            if let Element::Button { disabled, .. } = e {
                *disabled = value;
            }
        });
    }

    pub fn label(&self) -> String {
        self.doc
            .with_element(&self.id, |e| match e {
                Element::Button { label, .. } => label.clone(),
                _ => String::new(),
            })
            .unwrap_or_default()
    }

    pub fn set_label(&self, value: &str) {
        self.doc.with_element(&self.id, |e| {
            if let Element::Button { label, .. } = e {
                *label = value.to_string();
            }
        });
    }
}

#[derive(Debug, Clone)]
pub struct TextInput {
    doc: Document,
    id: String,
}

impl TextInput {
    #[cfg(test)]
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self) -> String {
        self.doc
            .with_element(&self.id, |e| match e {
                Element::TextInput { value, .. } => value.clone(),
                _ => String::new(),
            })
            .unwrap_or_default()
    }

    /// Replacing the value drops any selection, as a browser input does.
    pub fn set_value(&self, new_value: &str) {
        self.doc.with_element(&self.id, |e| {
            if let Element::TextInput { value, selected } = e {
                *value = new_value.to_string();
                *selected = false;
            }
        });
    }

    pub fn select(&self) {
        self.doc.with_element(&self.id, |e| {
            if let Element::TextInput { selected, .. } = e {
                *selected = true;
            }
        });
    }

    #[cfg(test)]
    pub fn is_selected(&self) -> bool {
        self.doc
            .with_element(&self.id, |e| {
                matches!(e, Element::TextInput { selected: true, .. })
            })
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone)]
pub struct Section {
    doc: Document,
    id: String,
}

impl Section {
    pub fn is_visible(&self) -> bool {
        self.doc
            .with_element(&self.id, |e| matches!(e, Element::Section { visible: true }))
            .unwrap_or(false)
    }

    pub fn set_visible(&self, value: bool) {
        self.doc.with_element(&self.id, |e| {
            if let Element::Section { visible } = e {
                *visible = value;
            }
        });
    }
}

#[derive(Debug, Clone)]
pub struct RadioGroupHandle {
    doc: Document,
    name: String,
}

impl RadioGroupHandle {
    pub fn options(&self) -> Vec<String> {
        self.doc.read(|s| {
            s.radio_groups
                .get(&self.name)
                .map(|g| g.options.clone())
                .unwrap_or_default()
        })
    }

    pub fn checked_value(&self) -> Option<String> {
        self.doc
            .read(|s| s.radio_groups.get(&self.name).and_then(|g| g.checked.clone()))
    }

    /// Checks the option with `value`; returns false if the group has no such option.
    pub fn check(&self, value: &str) -> bool {
        self.doc.write(|s| match s.radio_groups.get_mut(&self.name) {
            Some(group) if group.options.iter().any(|o| o == value) => {
                group.checked = Some(value.to_string());
                true
            }
            _ => false,
        })
    }
}

impl Document {
    pub(crate) fn checkbox(&self, id: &str) -> Checkbox {
        Checkbox {
            doc: self.clone(),
            id: id.to_string(),
        }
    }

    pub(crate) fn button(&self, id: &str) -> Button {
        Button {
            doc: self.clone(),
            id: id.to_string(),
        }
    }

    pub(crate) fn text_input(&self, id: &str) -> TextInput {
        TextInput {
            doc: self.clone(),
            id: id.to_string(),
        }
    }

    pub(crate) fn section(&self, id: &str) -> Section {
        Section {
            doc: self.clone(),
            id: id.to_string(),
        }
    }

    pub(crate) fn radio_group(&self, name: &str) -> RadioGroupHandle {
        RadioGroupHandle {
            doc: self.clone(),
            name: name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_share_document_state() {
        let doc = Document::new();
        doc.add_checkbox("a", false).add_button("b", "Copy", true);

        let first = doc.checkbox("a");
        let second = doc.clone().checkbox("a");
        first.set_checked(true);
        assert!(second.is_checked());

        let button = doc.button("b");
        button.set_disabled(false);
        button.set_label("Copied");
        assert!(!doc.button("b").is_disabled());
        assert_eq!(doc.button("b").label(), "Copied");
    }

    #[test]
    fn setting_a_value_clears_selection() {
        let doc = Document::new();
        doc.add_text_input("password", "old");
        let input = doc.text_input("password");
        input.select();
        assert!(input.is_selected());
        input.set_value("new");
        assert!(!input.is_selected());
        assert_eq!(input.value(), "new");
    }

    #[test]
    fn radio_group_rejects_unknown_options() {
        let doc = Document::new();
        doc.add_radio_group("length", &["8", "12"], Some("12"));
        let group = doc.radio_group("length");
        assert!(!group.check("16"));
        assert_eq!(group.checked_value().as_deref(), Some("12"));
        assert!(group.check("8"));
        assert_eq!(group.checked_value().as_deref(), Some("8"));
    }

    #[test]
    fn mismatched_kind_reads_as_absent() {
        let doc = Document::new();
        doc.add_section("area", true);
        assert!(!doc.checkbox("area").is_checked());
        assert_eq!(doc.button("area").label(), "");
    }
}
