// src/core/controller.rs
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use log::{debug, error, info};
use tokio::task::JoinHandle;

use crate::api::{GenerationError, GenerationRequest, PasswordService};
use crate::clipboard::{Clipboard, ClipboardError};
use crate::core::config::Config;
use crate::models::{CharacterClass, PasswordLength};
use crate::page::PageElements;

/// User interactions the page forwards to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    Loaded,
    CharacterClassChanged(CharacterClass),
    LengthChanged,
    CustomSymbolsChanged,
    GenerateClicked,
    CopyClicked,
}

/// How a generation attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// No character class selected, nothing sent
    Skipped,
    /// Response body written to the password field
    Displayed,
    /// Error message written to the password field
    Failed,
    /// A newer request was issued while this one was in flight
    Superseded,
}

// Fixed strings and timings the controller writes into the page
#[derive(Debug, Clone)]
pub struct Feedback {
    pub error_message: String,
    pub copied_label: String,
    pub copy_duration: Duration,
}

impl Feedback {
    pub fn from_config(config: &Config) -> Self {
        Self {
            error_message: config.locale.error_message().to_string(),
            copied_label: config.locale.copied_label().to_string(),
            copy_duration: config.copy_feedback,
        }
    }
}

struct PendingRevert {
    handle: JoinHandle<()>,
    original_label: String,
}

pub struct FormController {
    elements: PageElements,
    service: Arc<dyn PasswordService>,
    clipboard: Arc<dyn Clipboard>,
    feedback: Feedback,
    latest_request: AtomicU64,
    pending_revert: Mutex<Option<PendingRevert>>,
}

impl FormController {
    pub fn new(
        elements: PageElements,
        service: Arc<dyn PasswordService>,
        clipboard: Arc<dyn Clipboard>,
        feedback: Feedback,
    ) -> Self {
        Self {
            elements,
            service,
            clipboard,
            feedback,
            latest_request: AtomicU64::new(0),
            pending_revert: Mutex::new(None),
        }
    }

    pub fn elements(&self) -> &PageElements {
        &self.elements
    }

    /// Route a page event to its handler. Returns the generation outcome for
    /// events that trigger a regeneration.
    pub async fn handle_event(&self, event: PageEvent) -> Option<GenerationOutcome> {
        debug!("Page event: {:?}", event);
        match event {
            PageEvent::Loaded => {
                self.sync_symbols_area();
                Some(self.generate_password().await)
            }
            PageEvent::CharacterClassChanged(class) => {
                if class == CharacterClass::Symbols {
                    self.sync_symbols_area();
                }
                self.validate_options();
                Some(self.generate_password().await)
            }
            PageEvent::LengthChanged | PageEvent::CustomSymbolsChanged => {
                Some(self.generate_password().await)
            }
            PageEvent::GenerateClicked => {
                // Disabled buttons don't fire
                if self.elements.generate_button.is_disabled() {
                    return None;
                }
                Some(self.generate_password().await)
            }
            PageEvent::CopyClicked => {
                if self.elements.copy_button.is_disabled() {
                    return None;
                }
                if let Err(e) = self.copy_password() {
                    error!("❌ {}", e);
                }
                None
            }
        }
    }

    /// Show the custom symbols input only while the symbols class is selected.
    pub fn sync_symbols_area(&self) {
        let visible = self.elements.symbols.is_checked();
        self.elements.symbols_area.set_visible(visible);
    }

    /// True iff at least one character class is checked. Enables or disables
    /// the generate button to match.
    pub fn validate_options(&self) -> bool {
        let any_checked = CharacterClass::ALL
            .iter()
            .any(|class| self.elements.checkbox(*class).is_checked());
        self.elements.generate_button.set_disabled(!any_checked);
        any_checked
    }

    /// Read the current form state into a request.
    pub fn current_request(&self) -> Result<GenerationRequest, GenerationError> {
        let length: PasswordLength = self
            .elements
            .length
            .checked_value()
            .ok_or(GenerationError::MissingLength)?
            .parse()?;

        Ok(GenerationRequest {
            length,
            uppercase: self.elements.uppercase.is_checked(),
            lowercase: self.elements.lowercase.is_checked(),
            numbers: self.elements.numbers.is_checked(),
            symbols: self.elements.symbols.is_checked(),
            custom_symbols: self.elements.custom_symbols.value(),
        })
    }

    pub async fn generate_password(&self) -> GenerationOutcome {
        if !self.validate_options() {
            return GenerationOutcome::Skipped;
        }

        let sequence = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
        let result = match self.current_request() {
            Ok(request) => {
                debug!("Request #{}: {:?}", sequence, request);
                self.service.generate(&request, &self.elements.csrf_token).await
            }
            Err(e) => Err(e),
        };

        // Only the most recent request may touch the page
        let latest = self.latest_request.load(Ordering::SeqCst);
        if latest != sequence {
            debug!("Discarding response #{} (latest is #{})", sequence, latest);
            return GenerationOutcome::Superseded;
        }

        match result {
            Ok(password) => {
                self.elements.password_field.set_value(&password);
                self.elements.copy_button.set_disabled(password.is_empty());
                info!("🔐 Password received ({} chars)", password.chars().count());
                GenerationOutcome::Displayed
            }
            Err(e) => {
                error!("Error: {}", e);
                self.elements.password_field.set_value(&self.feedback.error_message);
                GenerationOutcome::Failed
            }
        }
    }

    /// Copy the displayed password and flash the copied label on the copy
    /// button. A copy while a revert is pending replaces that revert.
    pub fn copy_password(&self) -> Result<(), ClipboardError> {
        let field = &self.elements.password_field;
        field.select();
        self.clipboard.copy_text(&field.value())?;

        let button = self.elements.copy_button.clone();
        let mut pending = self
            .pending_revert
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let original_label = match pending.take() {
            Some(previous) => {
                previous.handle.abort();
                previous.original_label
            }
            None => button.label(),
        };

        button.set_label(&self.feedback.copied_label);

        let delay = self.feedback.copy_duration;
        let label = original_label.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            button.set_label(&label);
        });

        *pending = Some(PendingRevert {
            handle,
            original_label,
        });
        info!("📋 Password copied to clipboard");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockPasswordService;
    use crate::clipboard::MockClipboard;
    use crate::core::config::Locale;
    use crate::page::template::{standard_page, PageDefaults};
    use crate::page::Document;
    use async_trait::async_trait;
    use reqwest::StatusCode;

    const ERROR_TEXT: &str = "エラーが発生しました";

    fn feedback() -> Feedback {
        Feedback {
            error_message: ERROR_TEXT.to_string(),
            copied_label: "コピーしました".to_string(),
            copy_duration: Duration::from_secs(2),
        }
    }

    fn page(defaults: &PageDefaults) -> Document {
        standard_page(Some("tok"), Locale::Ja, defaults)
    }

    fn controller_for(
        doc: &Document,
        service: impl PasswordService + 'static,
        clipboard: impl Clipboard + 'static,
    ) -> (FormController, PageElements) {
        let elements = PageElements::bind(doc).expect("page binds");
        let controller = FormController::new(
            elements.clone(),
            Arc::new(service),
            Arc::new(clipboard),
            feedback(),
        );
        (controller, elements)
    }

    fn replying(body: &'static str) -> MockPasswordService {
        let mut service = MockPasswordService::new();
        service
            .expect_generate()
            .returning(move |_, _| Ok(body.to_string()));
        service
    }

    #[test]
    fn generate_enabled_iff_any_class_checked() {
        let doc = page(&PageDefaults::default());
        let (controller, elements) =
            controller_for(&doc, MockPasswordService::new(), MockClipboard::new());

        for mask in 0u8..16 {
            for (bit, class) in CharacterClass::ALL.iter().enumerate() {
                elements.checkbox(*class).set_checked(mask & (1 << bit) != 0);
            }
            let valid = controller.validate_options();
            assert_eq!(valid, mask != 0, "mask {:04b}", mask);
            assert_eq!(elements.generate_button.is_disabled(), mask == 0, "mask {:04b}", mask);
        }
    }

    #[tokio::test]
    async fn displays_body_verbatim_and_enables_copy() {
        let doc = page(&PageDefaults::default());
        let mut service = MockPasswordService::new();
        service
            .expect_generate()
            .withf(|request, token| {
                token == "tok"
                    && request.length == PasswordLength::Twelve
                    && request.uppercase
                    && request.lowercase
                    && request.numbers
                    && !request.symbols
                    && request.custom_symbols.is_empty()
            })
            .times(1)
            .returning(|_, _| Ok("aB3$xyz1".to_string()));
        let (controller, elements) = controller_for(&doc, service, MockClipboard::new());

        let outcome = controller.handle_event(PageEvent::GenerateClicked).await;

        assert_eq!(outcome, Some(GenerationOutcome::Displayed));
        assert_eq!(elements.password_field.value(), "aB3$xyz1");
        assert!(!elements.copy_button.is_disabled());
    }

    #[tokio::test]
    async fn empty_body_disables_copy() {
        let doc = page(&PageDefaults::default());
        let (controller, elements) = controller_for(&doc, replying(""), MockClipboard::new());
        elements.copy_button.set_disabled(false);

        assert_eq!(controller.generate_password().await, GenerationOutcome::Displayed);
        assert_eq!(elements.password_field.value(), "");
        assert!(elements.copy_button.is_disabled());
    }

    #[tokio::test]
    async fn server_error_shows_fixed_message_and_keeps_copy_state() {
        let doc = page(&PageDefaults::default());
        let mut service = MockPasswordService::new();
        service.expect_generate().times(1).returning(|_, _| {
            Err(GenerationError::Http {
                status: StatusCode::INTERNAL_SERVER_ERROR,
            })
        });
        let (controller, elements) = controller_for(&doc, service, MockClipboard::new());
        elements.password_field.set_value("previous");
        elements.copy_button.set_disabled(false);

        assert_eq!(controller.generate_password().await, GenerationOutcome::Failed);
        assert_eq!(elements.password_field.value(), ERROR_TEXT);
        assert!(!elements.copy_button.is_disabled());
    }

    #[tokio::test]
    async fn every_failure_kind_shows_the_same_message() {
        let transport = reqwest::Client::new()
            .post("http://[::1")
            .build()
            .unwrap_err();
        let failures = vec![
            GenerationError::Http {
                status: StatusCode::FORBIDDEN,
            },
            GenerationError::Transport(transport),
            GenerationError::Client("connection reset".to_string()),
        ];

        for failure in failures {
            let label = failure.to_string();
            let doc = page(&PageDefaults::default());
            let mut service = MockPasswordService::new();
            let mut failure = Some(failure);
            service.expect_generate().times(1).returning(move |_, _| {
                Err(failure
                    .take()
                    .unwrap_or_else(|| GenerationError::Client("repeat".to_string())))
            });
            let (controller, elements) = controller_for(&doc, service, MockClipboard::new());

            assert_eq!(
                controller.generate_password().await,
                GenerationOutcome::Failed,
                "{}",
                label
            );
            assert_eq!(elements.password_field.value(), ERROR_TEXT, "{}", label);
        }
    }

    #[tokio::test]
    async fn unreadable_length_is_reported_like_a_server_failure() {
        let doc = page(&PageDefaults::default());
        doc.add_radio_group("length", &["8", "12"], None);
        let mut service = MockPasswordService::new();
        service.expect_generate().never();
        let (controller, elements) = controller_for(&doc, service, MockClipboard::new());

        assert_eq!(controller.generate_password().await, GenerationOutcome::Failed);
        assert_eq!(elements.password_field.value(), ERROR_TEXT);
    }

    #[tokio::test]
    async fn unchecking_every_class_disables_generation_and_keeps_display() {
        let doc = page(&PageDefaults::default());
        let mut service = MockPasswordService::new();
        service.expect_generate().never();
        let (controller, elements) = controller_for(&doc, service, MockClipboard::new());
        elements.password_field.set_value("keep-me");
        elements.copy_button.set_disabled(false);

        for class in CharacterClass::ALL {
            elements.checkbox(class).set_checked(false);
        }
        let outcome = controller
            .handle_event(PageEvent::CharacterClassChanged(CharacterClass::Numbers))
            .await;

        assert_eq!(outcome, Some(GenerationOutcome::Skipped));
        assert!(elements.generate_button.is_disabled());
        assert_eq!(elements.password_field.value(), "keep-me");
        assert!(!elements.copy_button.is_disabled());
        assert_eq!(controller.handle_event(PageEvent::GenerateClicked).await, None);
    }

    #[tokio::test]
    async fn symbols_checkbox_drives_custom_area() {
        let defaults = PageDefaults {
            symbols: true,
            ..PageDefaults::default()
        };
        let doc = page(&defaults);
        let (controller, elements) = controller_for(&doc, replying("x"), MockClipboard::new());
        assert!(!elements.symbols_area.is_visible());

        controller.handle_event(PageEvent::Loaded).await;
        assert!(elements.symbols_area.is_visible());

        elements.symbols.set_checked(false);
        controller
            .handle_event(PageEvent::CharacterClassChanged(CharacterClass::Symbols))
            .await;
        assert!(!elements.symbols_area.is_visible());

        elements.symbols.set_checked(true);
        controller
            .handle_event(PageEvent::CharacterClassChanged(CharacterClass::Symbols))
            .await;
        assert!(elements.symbols_area.is_visible());
    }

    #[tokio::test]
    async fn option_changes_regenerate_with_current_state() {
        let doc = page(&PageDefaults::default());
        let mut service = MockPasswordService::new();
        service
            .expect_generate()
            .withf(|request, _| {
                request.length == PasswordLength::Eight
                    && request.symbols
                    && request.custom_symbols == "!?"
            })
            .times(2)
            .returning(|_, _| Ok("Ab1!Ab1?".to_string()));
        let (controller, elements) = controller_for(&doc, service, MockClipboard::new());
        elements.symbols.set_checked(true);
        elements.custom_symbols.set_value("!?");
        assert!(elements.length.check("8"));

        assert_eq!(
            controller.handle_event(PageEvent::LengthChanged).await,
            Some(GenerationOutcome::Displayed)
        );
        assert_eq!(
            controller.handle_event(PageEvent::CustomSymbolsChanged).await,
            Some(GenerationOutcome::Displayed)
        );
        assert_eq!(elements.password_field.value(), "Ab1!Ab1?");
    }

    struct SlowForEight;

    #[async_trait]
    impl PasswordService for SlowForEight {
        async fn generate(
            &self,
            request: &GenerationRequest,
            _csrf_token: &str,
        ) -> Result<String, GenerationError> {
            let delay = match request.length {
                PasswordLength::Eight => 300,
                PasswordLength::Twelve => 10,
            };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(format!("pw-{}", request.length))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stale_response_never_overwrites_newer_one() {
        let doc = page(&PageDefaults::default());
        let (controller, elements) = controller_for(&doc, SlowForEight, MockClipboard::new());
        assert!(elements.length.check("8"));

        let older = controller.generate_password();
        let newer = async {
            elements.length.check("12");
            controller.generate_password().await
        };
        let (older, newer) = tokio::join!(older, newer);

        assert_eq!(newer, GenerationOutcome::Displayed);
        assert_eq!(older, GenerationOutcome::Superseded);
        assert_eq!(elements.password_field.value(), "pw-12");
    }

    #[tokio::test(start_paused = true)]
    async fn copy_label_reverts_after_two_seconds() {
        let doc = page(&PageDefaults::default());
        let mut clipboard = MockClipboard::new();
        clipboard
            .expect_copy_text()
            .withf(|text| text == "aB3$xyz1")
            .times(1)
            .returning(|_| Ok(()));
        let (controller, elements) = controller_for(&doc, replying("aB3$xyz1"), clipboard);
        controller.generate_password().await;
        let original = elements.copy_button.label();

        controller.handle_event(PageEvent::CopyClicked).await;
        assert!(elements.password_field.is_selected());
        assert_eq!(elements.copy_button.label(), "コピーしました");

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert_eq!(elements.copy_button.label(), "コピーしました");

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(elements.copy_button.label(), original);
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_copies_revert_once_to_original_label() {
        let doc = page(&PageDefaults::default());
        let mut clipboard = MockClipboard::new();
        clipboard.expect_copy_text().times(2).returning(|_| Ok(()));
        let (controller, elements) = controller_for(&doc, replying("pw"), clipboard);
        controller.generate_password().await;
        let original = elements.copy_button.label();

        controller.copy_password().expect("first copy");
        tokio::time::sleep(Duration::from_millis(1500)).await;
        controller.copy_password().expect("second copy");

        // The first revert would have fired at 2000ms
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(elements.copy_button.label(), "コピーしました");

        tokio::time::sleep(Duration::from_millis(1001)).await;
        assert_eq!(elements.copy_button.label(), original);
    }

    #[tokio::test]
    async fn clipboard_failure_leaves_label_alone() {
        let doc = page(&PageDefaults::default());
        let mut clipboard = MockClipboard::new();
        clipboard
            .expect_copy_text()
            .returning(|_| Err(ClipboardError::Unavailable("no display".to_string())));
        let (controller, elements) = controller_for(&doc, replying("pw"), clipboard);
        controller.generate_password().await;
        let original = elements.copy_button.label();

        assert!(controller.copy_password().is_err());
        assert_eq!(controller.handle_event(PageEvent::CopyClicked).await, None);
        assert_eq!(elements.copy_button.label(), original);
    }

    #[tokio::test]
    async fn copy_click_is_ignored_while_disabled() {
        let doc = page(&PageDefaults::default());
        let mut clipboard = MockClipboard::new();
        clipboard.expect_copy_text().never();
        let (controller, elements) = controller_for(&doc, MockPasswordService::new(), clipboard);

        assert!(elements.copy_button.is_disabled());
        assert_eq!(controller.handle_event(PageEvent::CopyClicked).await, None);
    }
}
