//! Toast notifier: a transient, localized on-screen message that auto-dismisses
//! after a fixed duration.

use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::i18n::{Language, Translations};

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Message key the toast was raised with
    pub key: String,
    /// Localized message (the raw key when no translation exists)
    pub message: String,
    pub kind: ToastKind,
    pub shown_at: Instant,
}

impl Toast {
    /// Class list applied to the toast element while visible.
    pub fn class_name(&self) -> String {
        format!("toast show {}", self.kind.as_str())
    }
}

#[derive(Debug)]
pub struct ToastNotifier {
    duration: Duration,
    current: Option<Toast>,
    history: Vec<Toast>,
}

impl ToastNotifier {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            current: None,
            history: Vec::new(),
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Show a toast now, replacing whatever is on screen.
    pub fn show(&mut self, language: Language, key: &str, kind: ToastKind) -> &Toast {
        self.show_at(language, key, kind, Instant::now())
    }

    pub fn show_at(
        &mut self,
        language: Language,
        key: &str,
        kind: ToastKind,
        now: Instant,
    ) -> &Toast {
        let message = Translations::get().translate(language, key).to_string();

        match kind {
            ToastKind::Success => info!("Toast [{}] {}", key, message),
            ToastKind::Error => warn!("Toast [{}] {}", key, message),
        }

        let toast = Toast {
            key: key.to_string(),
            message,
            kind,
            shown_at: now,
        };
        self.history.push(toast.clone());
        self.current.insert(toast)
    }

    /// The toast visible at `now`, if it has not yet expired.
    pub fn current_at(&self, now: Instant) -> Option<&Toast> {
        self.current
            .as_ref()
            .filter(|toast| now < toast.shown_at + self.duration)
    }

    /// Drop the current toast once its display time has elapsed.
    pub fn dismiss_expired(&mut self, now: Instant) {
        if self.current_at(now).is_none() {
            self.current = None;
        }
    }

    /// Every toast shown so far, oldest first.
    pub fn history(&self) -> &[Toast] {
        &self.history
    }

    pub fn last(&self) -> Option<&Toast> {
        self.history.last()
    }
}

impl Default for ToastNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::keys;

    // ==================== Show Tests ====================

    #[test]
    fn test_show_localizes_message() {
        let mut notifier = ToastNotifier::default();
        let toast = notifier.show(Language::ENGLISH, keys::TOAST_CAMERA_FAIL, ToastKind::Error);

        assert_eq!(toast.message, "Unable to access the camera");
        assert_eq!(toast.class_name(), "toast show error");
    }

    #[test]
    fn test_show_unknown_key_uses_raw_key() {
        let mut notifier = ToastNotifier::default();
        let toast = notifier.show(Language::HINDI, "toast_unlisted", ToastKind::Success);

        assert_eq!(toast.message, "toast_unlisted");
    }

    #[test]
    fn test_show_replaces_current() {
        let mut notifier = ToastNotifier::default();
        let now = Instant::now();
        notifier.show_at(Language::ENGLISH, keys::TOAST_NO_FACE, ToastKind::Error, now);
        notifier.show_at(
            Language::ENGLISH,
            keys::TOAST_CAPTURE_SUCCESS,
            ToastKind::Success,
            now,
        );

        assert_eq!(
            notifier.current_at(now).map(|t| t.key.as_str()),
            Some(keys::TOAST_CAPTURE_SUCCESS)
        );
        assert_eq!(notifier.history().len(), 2);
    }

    // ==================== Auto-dismiss Tests ====================

    #[test]
    fn test_toast_visible_before_duration() {
        let mut notifier = ToastNotifier::default();
        let now = Instant::now();
        notifier.show_at(Language::ENGLISH, keys::TOAST_NO_FACE, ToastKind::Error, now);

        assert!(notifier
            .current_at(now + Duration::from_millis(2999))
            .is_some());
    }

    #[test]
    fn test_toast_hidden_after_duration() {
        let mut notifier = ToastNotifier::default();
        let now = Instant::now();
        notifier.show_at(Language::ENGLISH, keys::TOAST_NO_FACE, ToastKind::Error, now);

        let later = now + DEFAULT_TOAST_DURATION;
        assert!(notifier.current_at(later).is_none());

        notifier.dismiss_expired(later);
        assert!(notifier.current_at(now).is_none());
        // History survives dismissal
        assert_eq!(notifier.last().unwrap().key, keys::TOAST_NO_FACE);
    }

    #[test]
    fn test_custom_duration() {
        let mut notifier = ToastNotifier::new(Duration::from_millis(500));
        let now = Instant::now();
        notifier.show_at(Language::TAMIL, keys::TOAST_DARK_MODE, ToastKind::Success, now);

        assert!(notifier.current_at(now + Duration::from_millis(499)).is_some());
        assert!(notifier.current_at(now + Duration::from_millis(500)).is_none());
    }
}
