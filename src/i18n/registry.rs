//! Language registry: Single source of truth for the languages offered by the
//! language selector.
//!
//! The registry is a lazily initialized singleton (`OnceLock`) and is immutable
//! after first access.

use std::sync::OnceLock;

/// Configuration for a selectable language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// Three-letter code used by the selector (e.g., "eng", "hin")
    pub code: &'static str,

    /// English name of the language (e.g., "English", "Hindi")
    pub name: &'static str,

    /// Native name of the language (e.g., "English", "हिन्दी")
    pub native_name: &'static str,

    /// Whether this is the canonical language every message table is checked against
    pub is_canonical: bool,

    /// Whether this language is offered in the selector
    pub enabled: bool,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get all enabled languages, in selector order.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// Get the canonical language configuration.
    ///
    /// # Panics
    /// Panics if the registry does not define exactly one canonical language,
    /// which is a programming error in `default_languages`.
    pub fn canonical(&self) -> &LanguageConfig {
        let canonical_langs: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_canonical)
            .collect();

        match canonical_langs.len() {
            0 => panic!("No canonical language found in registry"),
            1 => canonical_langs[0],
            _ => panic!("Multiple canonical languages found in registry"),
        }
    }

    /// Check if a language code is known and enabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|lang| lang.enabled)
            .unwrap_or(false)
    }
}

fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "eng",
            name: "English",
            native_name: "English",
            is_canonical: true,
            enabled: true,
        },
        LanguageConfig {
            code: "hin",
            name: "Hindi",
            native_name: "हिन्दी",
            is_canonical: false,
            enabled: true,
        },
        LanguageConfig {
            code: "tam",
            name: "Tamil",
            native_name: "தமிழ்",
            is_canonical: false,
            enabled: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LanguageRegistry::get();
        let registry2 = LanguageRegistry::get();

        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_get_by_code_english() {
        let config = LanguageRegistry::get()
            .get_by_code("eng")
            .expect("English should be registered");

        assert_eq!(config.name, "English");
        assert!(config.is_canonical);
        assert!(config.enabled);
    }

    #[test]
    fn test_get_by_code_hindi() {
        let config = LanguageRegistry::get()
            .get_by_code("hin")
            .expect("Hindi should be registered");

        assert_eq!(config.name, "Hindi");
        assert_eq!(config.native_name, "हिन्दी");
        assert!(!config.is_canonical);
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        assert!(LanguageRegistry::get().get_by_code("fra").is_none());
        // Two-letter codes are not accepted
        assert!(LanguageRegistry::get().get_by_code("en").is_none());
    }

    #[test]
    fn test_list_enabled_order() {
        let codes: Vec<_> = LanguageRegistry::get()
            .list_enabled()
            .iter()
            .map(|lang| lang.code)
            .collect();

        assert_eq!(codes, vec!["eng", "hin", "tam"]);
    }

    #[test]
    fn test_canonical_returns_english() {
        assert_eq!(LanguageRegistry::get().canonical().code, "eng");
    }

    #[test]
    fn test_is_enabled() {
        let registry = LanguageRegistry::get();
        assert!(registry.is_enabled("eng"));
        assert!(registry.is_enabled("tam"));
        assert!(!registry.is_enabled("xyz"));
    }
}
