//! Message table validation.
//!
//! Checks every non-canonical table against the canonical one: keys must be
//! present, and numbers and upper-case format names (e.g. `120`, `PDF`) must
//! survive translation.

use regex::Regex;
use std::sync::OnceLock;

use crate::i18n::strings::MessageTable;

/// Validation report containing errors and warnings about the message tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Keys missing from a translated table
    pub errors: Vec<String>,

    /// Non-critical issues (unknown keys, dropped literals)
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for message table completeness.
pub struct TableValidator;

static NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();
static ACRONYM_REGEX: OnceLock<Regex> = OnceLock::new();

impl TableValidator {
    /// Validate `tables` against `canonical`.
    pub fn validate(canonical: &MessageTable, tables: &[MessageTable]) -> ValidationReport {
        let mut report = ValidationReport::new();

        for table in tables.iter().filter(|t| t.language != canonical.language) {
            for (key, original) in canonical.entries {
                match Self::find(table, key) {
                    None => report
                        .errors
                        .push(format!("{}: missing key '{}'", table.language, key)),
                    Some(translated) => {
                        let orig_numbers = Self::extract_numbers(original);
                        let trans_numbers = Self::extract_numbers(translated);
                        if orig_numbers != trans_numbers {
                            report.warnings.push(format!(
                                "{}: '{}' number mismatch: original has {:?}, translation has {:?}",
                                table.language, key, orig_numbers, trans_numbers
                            ));
                        }

                        let orig_acronyms = Self::extract_acronyms(original);
                        let trans_acronyms = Self::extract_acronyms(translated);
                        if !orig_acronyms.iter().all(|a| trans_acronyms.contains(a)) {
                            report.warnings.push(format!(
                                "{}: '{}' dropped {:?}",
                                table.language, key, orig_acronyms
                            ));
                        }
                    }
                }
            }

            for (key, _) in table.entries {
                if Self::find(canonical, key).is_none() {
                    report.warnings.push(format!(
                        "{}: key '{}' is not in the {} table",
                        table.language, key, canonical.language
                    ));
                }
            }
        }

        report
    }

    fn find(table: &MessageTable, key: &str) -> Option<&'static str> {
        table
            .entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    fn extract_numbers(text: &str) -> Vec<String> {
        let regex = NUMBER_REGEX.get_or_init(|| Regex::new(r"\d+").unwrap());

        regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    fn extract_acronyms(text: &str) -> Vec<String> {
        let regex = ACRONYM_REGEX.get_or_init(|| Regex::new(r"\b[A-Z]{2,}\b").unwrap());

        regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
