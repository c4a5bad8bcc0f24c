//! The verification form controller.
//!
//! Owns every piece of UI state and exposes one method per user action. Each
//! failure ends in a toast (and, for submission, the result area) rather than
//! an error escaping to the caller.

use chrono::Local;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::capture::{CaptureController, CaptureState};
use crate::data_url::DataUrl;
use crate::error::{SubmitError, ValidationError};
use crate::i18n::{keys, Language, Localizer, Page, Translations};
use crate::quality::QualityGate;
use crate::submission::{MultipartPayload, ResultArea, VerificationClient, VerificationResponse};
use crate::toast::{ToastKind, ToastNotifier};
use crate::upload::{DocumentFile, UploadHandler};
use crate::validation::{self, age_from_dob, parse_age, FormFields};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Everything the form displays or submits.
#[derive(Debug)]
pub struct UiState {
    pub language: Language,
    pub theme: Theme,
    pub fields: FormFields,
    /// Most recent accepted capture. Kept across retakes until replaced.
    pub captured_image: Option<DataUrl>,
    pub upload: UploadHandler,
    pub result: Option<ResultArea>,
    pub page: Page,
}

impl UiState {
    fn new(language: Language) -> Self {
        Self {
            language,
            theme: Theme::default(),
            fields: FormFields::default(),
            captured_image: None,
            upload: UploadHandler::new(),
            result: None,
            page: Page::verification_form(),
        }
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Validation failed, nothing was sent
    Blocked(ValidationError),
    Verified(VerificationResponse),
    Failed(SubmitError),
}

pub struct VerificationForm {
    state: UiState,
    capture: CaptureController,
    gate: QualityGate,
    client: VerificationClient,
    toasts: ToastNotifier,
}

impl VerificationForm {
    /// Build the form and localize it into `language` straight away.
    pub fn new(
        capture: CaptureController,
        gate: QualityGate,
        client: VerificationClient,
        language: Language,
    ) -> Self {
        let mut form = Self {
            state: UiState::new(language),
            capture,
            gate,
            client,
            toasts: ToastNotifier::default(),
        };
        form.change_language(language);
        form
    }

    pub fn with_toast_duration(mut self, duration: Duration) -> Self {
        self.toasts = ToastNotifier::new(duration);
        self
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn toasts(&self) -> &ToastNotifier {
        &self.toasts
    }

    pub fn capture_state(&self) -> CaptureState {
        self.capture.state()
    }

    /// Switch language and re-translate the page. Returns the number of
    /// elements rewritten.
    pub fn change_language(&mut self, language: Language) -> usize {
        self.state.language = language;
        let updated = Localizer::apply(Translations::get(), language, &mut self.state.page);
        info!("Language set to {} ({} elements updated)", language.name(), updated);
        updated
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.state.fields.name = name.into();
    }

    pub fn set_age(&mut self, age: impl Into<String>) {
        self.state.fields.age = age.into();
    }

    pub fn set_dob(&mut self, dob: impl Into<String>) {
        self.state.fields.dob = dob.into();
    }

    /// Start the camera. A live camera clears any previous result.
    pub async fn open_camera(&mut self) -> bool {
        match self.capture.open_camera().await {
            Ok(()) => {
                self.state.result = None;
                true
            }
            Err(e) => {
                self.toast(e.message_key(), ToastKind::Error);
                false
            }
        }
    }

    /// Grab and gate a still. On success the image replaces any earlier one.
    pub async fn capture(&mut self) -> bool {
        match self.capture.capture(&self.gate).await {
            Ok(image) => {
                self.state.captured_image = Some(image);
                self.toast(keys::TOAST_CAPTURE_SUCCESS, ToastKind::Success);
                true
            }
            Err(e) => {
                self.toast(e.message_key(), ToastKind::Error);
                false
            }
        }
    }

    pub async fn retake(&mut self) -> bool {
        match self.capture.retake().await {
            Ok(()) => {
                self.state.result = None;
                true
            }
            Err(e) => {
                self.toast(e.message_key(), ToastKind::Error);
                false
            }
        }
    }

    pub fn drag_over(&mut self) {
        self.state.upload.drag_over();
    }

    pub fn drag_leave(&mut self) {
        self.state.upload.drag_leave();
    }

    pub async fn drop_files(&mut self, files: Vec<DocumentFile>) -> bool {
        match self.state.upload.drop(files).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Dropped document rejected: {}", e);
                self.toast(keys::TOAST_INVALID_FILE, ToastKind::Error);
                false
            }
        }
    }

    pub async fn choose_file(&mut self, file: DocumentFile) -> bool {
        match self.state.upload.choose(file).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Chosen document rejected: {}", e);
                self.toast(keys::TOAST_INVALID_FILE, ToastKind::Error);
                false
            }
        }
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.state.theme = self.state.theme.toggled();
        let key = match self.state.theme {
            Theme::Dark => keys::TOAST_DARK_MODE,
            Theme::Light => keys::TOAST_LIGHT_MODE,
        };
        self.toast(key, ToastKind::Success);
        self.state.theme
    }

    /// Run the validator, raising an error toast on the first failure.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        let result = validation::validate(
            &self.state.fields,
            self.state.captured_image.as_ref(),
            self.state.upload.selected(),
        );
        if let Err(e) = result {
            debug!("Validation failed: {}", e);
            self.toast(e.message_key(), ToastKind::Error);
        }
        result
    }

    /// Validate and build the request body. `None` means nothing may be sent.
    pub fn prepare_submission(&mut self) -> Option<MultipartPayload> {
        self.build_payload().ok()
    }

    /// Validate, send once and render the outcome. Form state is kept either way.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let payload = match self.build_payload() {
            Ok(payload) => payload,
            Err(outcome) => return outcome,
        };

        info!("Submitting verification to {}", self.client.endpoint());
        match self.client.submit(payload).await {
            Ok(response) => {
                self.state.result = Some(ResultArea::success(self.state.language, &response));
                self.toast(keys::TOAST_FORM_SUCCESS, ToastKind::Success);
                SubmitOutcome::Verified(response)
            }
            Err(e) => {
                self.state.result = Some(ResultArea::failure(self.state.language, &e));
                self.toast(keys::TOAST_FORM_ERROR, ToastKind::Error);
                SubmitOutcome::Failed(e)
            }
        }
    }

    fn build_payload(&mut self) -> Result<MultipartPayload, SubmitOutcome> {
        self.validate().map_err(SubmitOutcome::Blocked)?;
        self.warn_on_age_mismatch();

        let (Some(image), Some(document)) = (
            self.state.captured_image.as_ref(),
            self.state.upload.selected(),
        ) else {
            return Err(SubmitOutcome::Blocked(ValidationError::MissingCapture));
        };

        match MultipartPayload::new(&self.state.fields, image, document) {
            Ok(payload) => Ok(payload),
            Err(e) => {
                warn!("Failed to build submission: {}", e);
                self.state.result = Some(ResultArea::failure(self.state.language, &e));
                self.toast(keys::TOAST_FORM_ERROR, ToastKind::Error);
                Err(SubmitOutcome::Failed(e))
            }
        }
    }

    fn warn_on_age_mismatch(&self) {
        let fields = &self.state.fields;
        let today = Local::now().date_naive();
        if let (Some(typed), Some(derived)) =
            (parse_age(&fields.age), age_from_dob(&fields.dob, today))
        {
            if typed != derived {
                warn!(
                    "Age {} does not match date of birth {} (expected {})",
                    typed, fields.dob, derived
                );
            }
        }
    }

    fn toast(&mut self, key: &str, kind: ToastKind) {
        self.toasts.show(self.state.language, key, kind);
    }
}
