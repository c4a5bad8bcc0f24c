//! Internationalization (i18n) for the verification form.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for the selectable languages
//! - `language`: Type-safe Language validated against the registry
//! - `strings`: Message tables and exact-key lookup with raw-key fallback
//! - `localizer`: Rewrites page text and placeholders for a language
//! - `validator`: Completeness checks of translated tables
//!
//! # Example
//!
//! ```rust
//! use identity_verify::i18n::{keys, Language, Translations};
//!
//! let hindi = Language::from_code("hin").unwrap();
//! let message = Translations::get().translate(hindi, keys::TOAST_NO_FACE);
//! assert_ne!(message, keys::TOAST_NO_FACE);
//! ```

mod language;
mod localizer;
mod registry;
mod strings;
mod validator;

pub use language::Language;
pub use localizer::{LocalizedElement, Localizer, Page, Target};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use strings::{
    keys, MessageTable, Translations, ALL_TABLES, ENGLISH_MESSAGES, HINDI_MESSAGES,
    TAMIL_MESSAGES,
};
pub use validator::{TableValidator, ValidationReport};
