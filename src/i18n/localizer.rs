//! Localization applier: rewrites visible text and placeholders of a page model
//! whenever the language selector changes.

use tracing::debug;

use crate::i18n::strings::keys;
use crate::i18n::{Language, Translations};

/// Which property of an element carries the localized string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Element text content (`data-i18n`)
    Text,
    /// Input placeholder (`data-i18n-placeholder`)
    Placeholder,
}

/// One localizable element of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedElement {
    pub key: String,
    pub target: Target,
    pub text: String,
}

impl LocalizedElement {
    pub fn new(key: &str, target: Target) -> Self {
        Self {
            key: key.to_string(),
            target,
            text: key.to_string(),
        }
    }
}

/// Page model: the localizable elements of the verification form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    elements: Vec<LocalizedElement>,
}

impl Page {
    pub fn new(elements: Vec<LocalizedElement>) -> Self {
        Self { elements }
    }

    /// Layout of the verification form, including the drop-zone caption.
    pub fn verification_form() -> Self {
        let text = [
            keys::PAGE_TITLE,
            keys::LABEL_LANGUAGE,
            keys::LABEL_NAME,
            keys::LABEL_AGE,
            keys::LABEL_DOB,
            keys::LABEL_PHOTO,
            keys::BTN_OPEN_CAMERA,
            keys::BTN_CAPTURE,
            keys::BTN_RETAKE,
            keys::LABEL_DOCUMENT,
            keys::DROP_FILE,
            keys::BTN_SUBMIT,
            keys::BTN_THEME,
        ];
        let placeholders = [keys::PLACEHOLDER_NAME, keys::PLACEHOLDER_AGE];

        let elements = text
            .iter()
            .map(|key| LocalizedElement::new(key, Target::Text))
            .chain(
                placeholders
                    .iter()
                    .map(|key| LocalizedElement::new(key, Target::Placeholder)),
            )
            .collect();

        Self { elements }
    }

    pub fn elements(&self) -> &[LocalizedElement] {
        &self.elements
    }

    /// Current text of the first element bound to `key` with the given target.
    pub fn text_of(&self, key: &str, target: Target) -> Option<&str> {
        self.elements
            .iter()
            .find(|el| el.key == key && el.target == target)
            .map(|el| el.text.as_str())
    }
}

pub struct Localizer;

impl Localizer {
    /// Rewrite every element whose key exists in the table for `language`.
    ///
    /// Elements with unknown keys keep their current text. Returns the number
    /// of rewritten elements.
    pub fn apply(translations: &Translations, language: Language, page: &mut Page) -> usize {
        let mut rewritten = 0;

        for element in &mut page.elements {
            if let Some(text) = translations.lookup(language, &element.key) {
                element.text = text.to_string();
                rewritten += 1;
            }
        }

        debug!(
            "Localized {}/{} elements to {}",
            rewritten,
            page.elements.len(),
            language.code()
        );

        rewritten
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_english_rewrites_all_form_elements() {
        let mut page = Page::verification_form();
        let total = page.elements().len();

        let rewritten = Localizer::apply(Translations::get(), Language::ENGLISH, &mut page);

        assert_eq!(rewritten, total);
        assert_eq!(page.text_of(keys::BTN_CAPTURE, Target::Text), Some("Capture"));
        assert_eq!(
            page.text_of(keys::PLACEHOLDER_NAME, Target::Placeholder),
            Some("Enter your full name")
        );
    }

    #[test]
    fn test_apply_switches_drop_zone_caption() {
        let mut page = Page::verification_form();
        Localizer::apply(Translations::get(), Language::ENGLISH, &mut page);
        Localizer::apply(Translations::get(), Language::TAMIL, &mut page);

        let caption = page.text_of(keys::DROP_FILE, Target::Text).unwrap();
        assert!(caption.starts_with("உங்கள்"));
    }

    #[test]
    fn test_unknown_key_keeps_current_text() {
        let mut page = Page::new(vec![
            LocalizedElement {
                key: "legacy_label".to_string(),
                target: Target::Text,
                text: "Legacy".to_string(),
            },
            LocalizedElement::new(keys::LABEL_AGE, Target::Text),
        ]);

        let rewritten = Localizer::apply(Translations::get(), Language::HINDI, &mut page);

        assert_eq!(rewritten, 1);
        assert_eq!(page.text_of("legacy_label", Target::Text), Some("Legacy"));
        assert_eq!(page.text_of(keys::LABEL_AGE, Target::Text), Some("आयु"));
    }

    #[test]
    fn test_text_of_respects_target() {
        let page = Page::verification_form();
        assert!(page.text_of(keys::PLACEHOLDER_AGE, Target::Text).is_none());
    }
}
