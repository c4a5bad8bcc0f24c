//! Pre-submission form validation.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

use crate::data_url::DataUrl;
use crate::error::ValidationError;
use crate::upload::DocumentFile;

pub const MIN_AGE: u32 = 1;
pub const MAX_AGE: u32 = 120;

/// Document media types accepted for submission.
pub const ALLOWED_DOCUMENT_TYPES: [&str; 3] = ["image/jpeg", "image/png", "application/pdf"];

const DOB_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];

static NAME_REGEX: OnceLock<Regex> = OnceLock::new();

/// Personal details exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub age: String,
    pub dob: String,
}

impl FormFields {
    pub fn new(name: impl Into<String>, age: impl Into<String>, dob: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age: age.into(),
            dob: dob.into(),
        }
    }
}

/// Letters and whitespace only, at least one character after trimming.
pub fn validate_name(name: &str) -> bool {
    let regex = NAME_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z\s]+$").unwrap());
    let trimmed = name.trim();
    !trimmed.is_empty() && regex.is_match(trimmed)
}

/// Whole number of years within `MIN_AGE..=MAX_AGE`.
pub fn parse_age(age: &str) -> Option<u32> {
    age.trim()
        .parse::<u32>()
        .ok()
        .filter(|years| (MIN_AGE..=MAX_AGE).contains(years))
}

pub fn is_allowed_document_type(media_type: &str) -> bool {
    ALLOWED_DOCUMENT_TYPES.contains(&media_type)
}

/// Check every field in order and stop at the first failure.
pub fn validate(
    fields: &FormFields,
    captured_image: Option<&DataUrl>,
    document: Option<&DocumentFile>,
) -> Result<(), ValidationError> {
    if !validate_name(&fields.name) {
        return Err(ValidationError::InvalidName);
    }
    if parse_age(&fields.age).is_none() {
        return Err(ValidationError::InvalidAge);
    }
    if fields.dob.is_empty() {
        return Err(ValidationError::MissingDob);
    }
    if !captured_image.is_some_and(DataUrl::is_image) {
        return Err(ValidationError::MissingCapture);
    }
    let document = document.ok_or(ValidationError::MissingDocument)?;
    if !is_allowed_document_type(&document.media_type) {
        return Err(ValidationError::InvalidDocumentType);
    }
    Ok(())
}

pub fn parse_dob(dob: &str) -> Option<NaiveDate> {
    let dob = dob.trim();
    DOB_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(dob, format).ok())
}

/// Completed years between `dob` and `today`, or `None` when the date cannot
/// be parsed or lies in the future.
pub fn age_from_dob(dob: &str, today: NaiveDate) -> Option<u32> {
    let born = parse_dob(dob)?;
    if born > today {
        return None;
    }

    let mut years = today.year() - born.year();
    if (today.month(), today.day()) < (born.month(), born.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}
