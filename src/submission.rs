//! Multipart submission to the verification backend.

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::fmt;
use tracing::{info, warn};
use url::Url;

use crate::data_url::DataUrl;
use crate::error::SubmitError;
use crate::i18n::{keys, Language, Translations};
use crate::upload::DocumentFile;
use crate::validation::FormFields;

pub const VERIFY_PATH: &str = "verify";
pub const CAPTURED_IMAGE_FILENAME: &str = "captured-image.png";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// The five-field request body. Built only from a validated form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartPayload {
    pub name: String,
    pub age: String,
    pub dob: String,
    pub image: FilePart,
    pub document: FilePart,
}

impl MultipartPayload {
    /// Text fields are sent exactly as typed; the captured data URL is decoded
    /// back into raw image bytes.
    pub fn new(
        fields: &FormFields,
        captured_image: &DataUrl,
        document: &DocumentFile,
    ) -> Result<Self, SubmitError> {
        let image = FilePart {
            file_name: CAPTURED_IMAGE_FILENAME.to_string(),
            media_type: captured_image.media_type().unwrap_or("image/png").to_string(),
            bytes: captured_image.decode()?,
        };

        Ok(Self {
            name: fields.name.clone(),
            age: fields.age.clone(),
            dob: fields.dob.clone(),
            image,
            document: FilePart {
                file_name: document.file_name.clone(),
                media_type: document.media_type.clone(),
                bytes: document.bytes.clone(),
            },
        })
    }

    pub fn field_names(&self) -> [&'static str; 5] {
        ["name", "age", "dob", "image", "document"]
    }

    pub fn into_form(self) -> Result<Form, SubmitError> {
        Ok(Form::new()
            .text("name", self.name)
            .text("age", self.age)
            .text("dob", self.dob)
            .part("image", file_part(self.image)?)
            .part("document", file_part(self.document)?))
    }
}

fn file_part(file: FilePart) -> Result<Part, SubmitError> {
    Part::bytes(file.bytes)
        .file_name(file.file_name)
        .mime_str(&file.media_type)
        .map_err(|e| SubmitError::Transport(format!("invalid media type: {}", e)))
}

/// A displayed response field that the backend may send as text or a number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ResponseValue {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl fmt::Display for ResponseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseValue::Text(text) => f.write_str(text),
            ResponseValue::Number(number) => write!(f, "{}", number),
            ResponseValue::Flag(flag) => write!(f, "{}", flag),
        }
    }
}

/// Successful verification body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VerificationResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub dob: ResponseValue,
    pub age: ResponseValue,
    #[serde(default)]
    pub is_adult: Option<bool>,
    pub face_match_score: ResponseValue,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

pub struct VerificationClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl VerificationClient {
    /// `base_url` is the backend origin; requests go to `<base_url>/verify`.
    pub fn new(client: reqwest::Client, base_url: &Url) -> Result<Self, url::ParseError> {
        let mut base = base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            client,
            endpoint: base.join(VERIFY_PATH)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// POST the payload once. No retry.
    pub async fn submit(
        &self,
        payload: MultipartPayload,
    ) -> Result<VerificationResponse, SubmitError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(payload.into_form()?)
            .send()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .map(|e| e.error);
            warn!(
                "Verification rejected ({}): {}",
                status,
                error.as_deref().unwrap_or("no details")
            );
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                error,
            });
        }

        let verification: VerificationResponse = response
            .json()
            .await
            .map_err(|e| SubmitError::Transport(format!("unreadable response: {}", e)))?;

        info!(
            "Verification succeeded (age {}, face match {})",
            verification.age, verification.face_match_score
        );
        Ok(verification)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultStyle {
    Green,
    Red,
}

impl ResultStyle {
    pub fn class_name(&self) -> &'static str {
        match self {
            ResultStyle::Green => "green",
            ResultStyle::Red => "red",
        }
    }
}

/// The result area below the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultArea {
    pub text: String,
    pub style: ResultStyle,
}

impl ResultArea {
    pub fn success(language: Language, response: &VerificationResponse) -> Self {
        let headline = Translations::get().translate(language, keys::TOAST_FORM_SUCCESS);
        Self {
            text: format!(
                "{} DOB: {}, Age: {}, Face Match: {}",
                headline, response.dob, response.age, response.face_match_score
            ),
            style: ResultStyle::Green,
        }
    }

    /// Server text when the backend supplied one, otherwise the localized
    /// generic failure.
    pub fn failure(language: Language, error: &SubmitError) -> Self {
        let text = match error.server_error() {
            Some(message) => message.to_string(),
            None => Translations::get()
                .translate(language, keys::TOAST_FORM_ERROR)
                .to_string(),
        };
        Self {
            text,
            style: ResultStyle::Red,
        }
    }
}
