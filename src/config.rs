use anyhow::{Context, Result};
use std::time::Duration;
use url::Url;

use crate::capture::{DEFAULT_CAPTURE_HEIGHT, DEFAULT_CAPTURE_WIDTH};
use crate::i18n::Language;
use crate::quality::DEFAULT_BLUR_THRESHOLD;
use crate::toast::DEFAULT_TOAST_DURATION;

pub const DEFAULT_VERIFY_BASE_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone)]
pub struct Config {
    // Backend
    pub verify_base_url: Url,
    pub request_timeout: Duration,

    // Localization
    pub default_language: Language,
    pub toast_duration: Duration,

    // Capture
    pub blur_threshold: f64,
    pub capture_width: u32,
    pub capture_height: u32,

    // Face detection model (file takes precedence over URL)
    pub face_model_path: Option<String>,
    pub face_model_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("VERIFY_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_VERIFY_BASE_URL.to_string());
        let language_code =
            std::env::var("DEFAULT_LANGUAGE").unwrap_or_else(|_| "eng".to_string());

        Ok(Self {
            // Backend
            verify_base_url: Url::parse(&base_url)
                .with_context(|| format!("VERIFY_BASE_URL is not a valid URL: {}", base_url))?,
            request_timeout: Duration::from_secs(parse_env("REQUEST_TIMEOUT_SECS", 30)),

            // Localization
            default_language: Language::from_code(&language_code)
                .context("DEFAULT_LANGUAGE must name an enabled language")?,
            toast_duration: Duration::from_millis(parse_env(
                "TOAST_DURATION_MS",
                DEFAULT_TOAST_DURATION.as_millis() as u64,
            )),

            // Capture
            blur_threshold: parse_env("BLUR_THRESHOLD", DEFAULT_BLUR_THRESHOLD),
            capture_width: parse_env("CAPTURE_WIDTH", DEFAULT_CAPTURE_WIDTH),
            capture_height: parse_env("CAPTURE_HEIGHT", DEFAULT_CAPTURE_HEIGHT),

            // Face detection
            face_model_path: non_empty_env("FACE_MODEL_PATH"),
            face_model_url: non_empty_env("FACE_MODEL_URL"),
        })
    }
}

/// Parsed value of `name`, or `default` when unset or unparsable.
fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
