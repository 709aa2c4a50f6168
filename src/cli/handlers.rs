// src/cli/handlers.rs
use std::sync::Arc;

use anyhow::{bail, Result};
use log::{info, warn};

use super::{menu, GenerateArgs};
use crate::api::types::GeneratedPassword;
use crate::api::HttpPasswordService;
use crate::clipboard::{Clipboard, SystemClipboard};
use crate::core::config::Config;
use crate::core::controller::Feedback;
use crate::core::{FormController, GenerationOutcome, PageEvent};
use crate::page::template::{standard_page, PageDefaults};
use crate::page::PageElements;

// Build the page and bind a controller to it
pub async fn open_page(
    config: &Config,
    defaults: &PageDefaults,
    clipboard: Arc<dyn Clipboard>,
) -> Result<FormController> {
    let service = HttpPasswordService::new(&config.endpoint_url)?;

    let csrf_token = match &config.csrf_token {
        Some(token) => Some(token.clone()),
        None => match service.fetch_csrf_token().await {
            Ok(token) => token,
            Err(e) => {
                warn!("⚠️ Could not read token from {}: {}", service.endpoint(), e);
                None
            }
        },
    };

    let document = standard_page(csrf_token.as_deref(), config.locale, defaults);
    let elements = PageElements::bind(&document)?;

    Ok(FormController::new(
        elements,
        Arc::new(service),
        clipboard,
        Feedback::from_config(config),
    ))
}

pub async fn handle_interactive(config: &Config) -> Result<()> {
    let defaults = PageDefaults {
        length: config.default_length,
        ..PageDefaults::default()
    };
    let controller = open_page(config, &defaults, Arc::new(SystemClipboard)).await?;
    menu::run_cli_menu(&controller).await
}

/// Load the page once and return what ended up in the password field.
/// Unlike a click on the page, a failed copy is an error here.
pub async fn generate_once(controller: &FormController, copy: bool) -> Result<GeneratedPassword> {
    let elements = controller.elements();

    match controller.handle_event(PageEvent::Loaded).await {
        Some(GenerationOutcome::Displayed) => {}
        Some(GenerationOutcome::Skipped) => {
            bail!("At least one character class must be selected")
        }
        _ => bail!("{}", elements.password_field.value()),
    }

    let password = elements.password_field.value();
    if copy {
        if elements.copy_button.is_disabled() {
            bail!("Server returned an empty password, nothing to copy");
        }
        controller.copy_password()?;
    }

    Ok(GeneratedPassword {
        length: password.chars().count(),
        password,
    })
}

pub async fn handle_generate(config: &Config, args: GenerateArgs) -> Result<()> {
    let defaults = args.page_defaults(config);
    let controller = open_page(config, &defaults, Arc::new(SystemClipboard)).await?;
    let output = generate_once(&controller, args.copy).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", output.password);
    }
    Ok(())
}

pub async fn handle_health(config: &Config) -> Result<()> {
    let service = HttpPasswordService::new(&config.endpoint_url)?;
    if service.health().await? {
        info!("Health check passed for {}", service.endpoint());
        println!("✅ {} is healthy", service.endpoint());
        Ok(())
    } else {
        bail!("❌ {} did not report healthy", service.endpoint())
    }
}
