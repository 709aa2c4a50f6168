// src/cli/menu.rs
use anyhow::Result;
use console::style;
use inquire::{InquireError, MultiSelect, Select, Text};

use crate::core::{FormController, GenerationOutcome, PageEvent};
use crate::models::CharacterClass;
use crate::page::PageElements;

const CLASSES: &str = "🔤  Character classes";
const LENGTH: &str = "📏  Password length";
const CUSTOM_SYMBOLS: &str = "✏️  Custom symbols";
const GENERATE: &str = "🔐  Generate";
const COPY: &str = "📋  Copy";
const QUIT: &str = "🚪  Quit";

fn class_label(class: CharacterClass) -> &'static str {
    match class {
        CharacterClass::Uppercase => "Uppercase (A-Z)",
        CharacterClass::Lowercase => "Lowercase (a-z)",
        CharacterClass::Numbers => "Numbers (0-9)",
        CharacterClass::Symbols => "Symbols",
    }
}

// Escape or Ctrl+C leaves the page
fn cancelled<T>(result: &std::result::Result<T, InquireError>) -> bool {
    matches!(
        result,
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted)
    )
}

pub async fn run_cli_menu(controller: &FormController) -> Result<()> {
    println!("╔══════════════════════════════════════╗");
    println!("║        🦀 PASSWORD GENERATOR         ║");
    println!("╚══════════════════════════════════════╝");

    controller.handle_event(PageEvent::Loaded).await;
    let elements = controller.elements();

    loop {
        render(elements);

        let mut actions = vec![CLASSES, LENGTH];
        if elements.symbols_area.is_visible() {
            actions.push(CUSTOM_SYMBOLS);
        }
        if !elements.generate_button.is_disabled() {
            actions.push(GENERATE);
        }
        if !elements.copy_button.is_disabled() {
            actions.push(COPY);
        }
        actions.push(QUIT);

        let choice = Select::new("Action:", actions).prompt();
        if cancelled(&choice) {
            break;
        }

        match choice? {
            CLASSES => {
                let labels: Vec<&str> = CharacterClass::ALL
                    .iter()
                    .map(|c| class_label(*c))
                    .collect();
                let checked: Vec<usize> = CharacterClass::ALL
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| elements.checkbox(**c).is_checked())
                    .map(|(i, _)| i)
                    .collect();

                let selected = MultiSelect::new("Character classes:", labels)
                    .with_default(&checked)
                    .prompt();
                if cancelled(&selected) {
                    continue;
                }
                let selected = selected?;

                // One change event per toggled box, like clicking each one
                for class in CharacterClass::ALL {
                    let now_checked = selected.contains(&class_label(class));
                    let checkbox = elements.checkbox(class);
                    if checkbox.is_checked() != now_checked {
                        checkbox.set_checked(now_checked);
                        let event = PageEvent::CharacterClassChanged(class);
                        report(controller.handle_event(event).await);
                    }
                }
            }
            LENGTH => {
                let options = elements.length.options();
                let current = elements.length.checked_value();
                let cursor = options
                    .iter()
                    .position(|o| Some(o) == current.as_ref())
                    .unwrap_or(0);

                let picked = Select::new("Password length:", options)
                    .with_starting_cursor(cursor)
                    .prompt();
                if cancelled(&picked) {
                    continue;
                }
                let picked = picked?;

                if current.as_deref() != Some(picked.as_str()) && elements.length.check(&picked) {
                    report(controller.handle_event(PageEvent::LengthChanged).await);
                }
            }
            CUSTOM_SYMBOLS => {
                let entered = Text::new("Custom symbols:")
                    .with_help_message("Leave empty to use the default symbol set")
                    .prompt();
                if cancelled(&entered) {
                    continue;
                }
                elements.custom_symbols.set_value(&entered?);
                report(controller.handle_event(PageEvent::CustomSymbolsChanged).await);
            }
            GENERATE => {
                report(controller.handle_event(PageEvent::GenerateClicked).await);
            }
            COPY => {
                controller.handle_event(PageEvent::CopyClicked).await;
            }
            _ => break,
        }
    }

    println!("👋 Goodbye!");
    Ok(())
}

fn report(outcome: Option<GenerationOutcome>) {
    if outcome == Some(GenerationOutcome::Skipped) {
        println!("{}", style("⚠️  Select at least one character class").yellow());
    }
}

fn render(elements: &PageElements) {
    let tick = |checked: bool| if checked { "☑" } else { "☐" };

    println!();
    println!(
        "{} {}",
        style("Password:").bold(),
        style(elements.password_field.value()).green().bold()
    );
    println!(
        "{} {}",
        style("Length:").bold(),
        elements.length.checked_value().unwrap_or_default()
    );
    for class in CharacterClass::ALL {
        println!("  {} {}", tick(elements.checkbox(class).is_checked()), class_label(class));
    }
    if elements.symbols_area.is_visible() {
        println!(
            "  {} {}",
            style("Custom symbols:").dim(),
            elements.custom_symbols.value()
        );
    }

    let button = |label: String, disabled: bool| {
        if disabled {
            style(format!("[ {} ]", label)).dim()
        } else {
            style(format!("[ {} ]", label)).cyan()
        }
    };
    println!(
        "{} {}",
        button(
            elements.generate_button.label(),
            elements.generate_button.is_disabled()
        ),
        button(elements.copy_button.label(), elements.copy_button.is_disabled())
    );
    println!();
}
