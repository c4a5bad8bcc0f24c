//! Localized UI labels, placeholders and toast messages.
//!
//! Tables are keyed by the exact message key used in markup (`data-i18n`) and
//! by the toast notifier. Lookups never fail: a missing key resolves to the
//! raw key string.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::i18n::Language;

/// Message keys referenced from code.
pub mod keys {
    // ==================== Page Labels ====================
    pub const PAGE_TITLE: &str = "page_title";
    pub const LABEL_LANGUAGE: &str = "label_language";
    pub const LABEL_NAME: &str = "label_name";
    pub const PLACEHOLDER_NAME: &str = "placeholder_name";
    pub const LABEL_AGE: &str = "label_age";
    pub const PLACEHOLDER_AGE: &str = "placeholder_age";
    pub const LABEL_DOB: &str = "label_dob";
    pub const LABEL_PHOTO: &str = "label_photo";
    pub const BTN_OPEN_CAMERA: &str = "btn_open_camera";
    pub const BTN_CAPTURE: &str = "btn_capture";
    pub const BTN_RETAKE: &str = "btn_retake";
    pub const LABEL_DOCUMENT: &str = "label_document";
    pub const DROP_FILE: &str = "drop_file";
    pub const BTN_SUBMIT: &str = "btn_submit";
    pub const BTN_THEME: &str = "btn_theme";

    // ==================== Toasts ====================
    pub const TOAST_CAMERA_FAIL: &str = "toast_camera_fail";
    pub const TOAST_BLURRY_IMAGE: &str = "toast_blurry_image";
    pub const TOAST_NO_FACE: &str = "toast_no_face";
    pub const TOAST_MULTIPLE_FACES: &str = "toast_multiple_faces";
    pub const TOAST_FACE_CHECK_FAILED: &str = "toast_face_check_failed";
    pub const TOAST_CAPTURE_FAIL: &str = "toast_capture_fail";
    pub const TOAST_CAPTURE_SUCCESS: &str = "toast_capture_success";
    pub const TOAST_DARK_MODE: &str = "toast_dark_mode";
    pub const TOAST_LIGHT_MODE: &str = "toast_light_mode";
    pub const TOAST_INVALID_NAME: &str = "toast_invalid_name";
    pub const TOAST_INVALID_AGE: &str = "toast_invalid_age";
    pub const TOAST_SELECT_DOB: &str = "toast_select_dob";
    pub const TOAST_CAPTURE_FIRST: &str = "toast_capture_first";
    pub const TOAST_UPLOAD_DOC: &str = "toast_upload_doc";
    pub const TOAST_INVALID_FILE: &str = "toast_invalid_file";
    pub const TOAST_FORM_SUCCESS: &str = "toast_form_success";
    pub const TOAST_FORM_ERROR: &str = "toast_form_error";
}

/// Message table for one language.
#[derive(Debug, Clone, Copy)]
pub struct MessageTable {
    pub language: &'static str,
    pub entries: &'static [(&'static str, &'static str)],
}

// ==================== English Strings ====================

pub const ENGLISH_MESSAGES: MessageTable = MessageTable {
    language: "eng",
    entries: &[
        (keys::PAGE_TITLE, "Identity Verification"),
        (keys::LABEL_LANGUAGE, "Language"),
        (keys::LABEL_NAME, "Full Name"),
        (keys::PLACEHOLDER_NAME, "Enter your full name"),
        (keys::LABEL_AGE, "Age"),
        (keys::PLACEHOLDER_AGE, "Enter your age"),
        (keys::LABEL_DOB, "Date of Birth"),
        (keys::LABEL_PHOTO, "Live Photo"),
        (keys::BTN_OPEN_CAMERA, "Open Camera"),
        (keys::BTN_CAPTURE, "Capture"),
        (keys::BTN_RETAKE, "Retake"),
        (keys::LABEL_DOCUMENT, "Identity Document"),
        (keys::DROP_FILE, "Drag & drop your document here or click to browse"),
        (keys::BTN_SUBMIT, "Verify"),
        (keys::BTN_THEME, "Toggle Theme"),
        (keys::TOAST_CAMERA_FAIL, "Unable to access the camera"),
        (keys::TOAST_BLURRY_IMAGE, "Image is blurry, please retake"),
        (keys::TOAST_NO_FACE, "No face detected, please retake"),
        (
            keys::TOAST_MULTIPLE_FACES,
            "Multiple faces detected, only you should be in the frame",
        ),
        (keys::TOAST_FACE_CHECK_FAILED, "Face check failed, please try again"),
        (keys::TOAST_CAPTURE_FAIL, "Failed to capture image"),
        (keys::TOAST_CAPTURE_SUCCESS, "Photo captured successfully"),
        (keys::TOAST_DARK_MODE, "Dark mode enabled"),
        (keys::TOAST_LIGHT_MODE, "Light mode enabled"),
        (
            keys::TOAST_INVALID_NAME,
            "Please enter a valid name (letters and spaces only)",
        ),
        (
            keys::TOAST_INVALID_AGE,
            "Please enter a valid age between 1 and 120",
        ),
        (keys::TOAST_SELECT_DOB, "Please select your date of birth"),
        (keys::TOAST_CAPTURE_FIRST, "Please capture your photo first"),
        (keys::TOAST_UPLOAD_DOC, "Please upload your identity document"),
        (
            keys::TOAST_INVALID_FILE,
            "Only JPG, PNG or PDF documents are allowed",
        ),
        (keys::TOAST_FORM_SUCCESS, "Verification successful!"),
        (keys::TOAST_FORM_ERROR, "Verification failed. Please try again."),
    ],
};

// ==================== Hindi Strings ====================

pub const HINDI_MESSAGES: MessageTable = MessageTable {
    language: "hin",
    entries: &[
        (keys::PAGE_TITLE, "पहचान सत्यापन"),
        (keys::LABEL_LANGUAGE, "भाषा"),
        (keys::LABEL_NAME, "पूरा नाम"),
        (keys::PLACEHOLDER_NAME, "अपना पूरा नाम दर्ज करें"),
        (keys::LABEL_AGE, "आयु"),
        (keys::PLACEHOLDER_AGE, "अपनी आयु दर्ज करें"),
        (keys::LABEL_DOB, "जन्म तिथि"),
        (keys::LABEL_PHOTO, "लाइव फ़ोटो"),
        (keys::BTN_OPEN_CAMERA, "कैमरा खोलें"),
        (keys::BTN_CAPTURE, "फ़ोटो लें"),
        (keys::BTN_RETAKE, "फिर से लें"),
        (keys::LABEL_DOCUMENT, "पहचान दस्तावेज़"),
        (
            keys::DROP_FILE,
            "अपना दस्तावेज़ यहाँ खींचें और छोड़ें या ब्राउज़ करने के लिए क्लिक करें",
        ),
        (keys::BTN_SUBMIT, "सत्यापित करें"),
        (keys::BTN_THEME, "थीम बदलें"),
        (keys::TOAST_CAMERA_FAIL, "कैमरा उपलब्ध नहीं है"),
        (keys::TOAST_BLURRY_IMAGE, "फ़ोटो धुंधली है, कृपया फिर से लें"),
        (keys::TOAST_NO_FACE, "कोई चेहरा नहीं मिला, कृपया फिर से लें"),
        (
            keys::TOAST_MULTIPLE_FACES,
            "एक से अधिक चेहरे मिले, फ़्रेम में केवल आप होने चाहिए",
        ),
        (
            keys::TOAST_FACE_CHECK_FAILED,
            "चेहरे की जाँच विफल रही, कृपया पुनः प्रयास करें",
        ),
        (keys::TOAST_CAPTURE_FAIL, "फ़ोटो लेने में विफल"),
        (keys::TOAST_CAPTURE_SUCCESS, "फ़ोटो सफलतापूर्वक ली गई"),
        (keys::TOAST_DARK_MODE, "डार्क मोड चालू"),
        (keys::TOAST_LIGHT_MODE, "लाइट मोड चालू"),
        (
            keys::TOAST_INVALID_NAME,
            "कृपया मान्य नाम दर्ज करें (केवल अक्षर और रिक्त स्थान)",
        ),
        (
            keys::TOAST_INVALID_AGE,
            "कृपया 1 से 120 के बीच मान्य आयु दर्ज करें",
        ),
        (keys::TOAST_SELECT_DOB, "कृपया अपनी जन्म तिथि चुनें"),
        (keys::TOAST_CAPTURE_FIRST, "कृपया पहले अपनी फ़ोटो लें"),
        (keys::TOAST_UPLOAD_DOC, "कृपया अपना पहचान दस्तावेज़ अपलोड करें"),
        (keys::TOAST_INVALID_FILE, "केवल JPG, PNG या PDF दस्तावेज़ मान्य हैं"),
        (keys::TOAST_FORM_SUCCESS, "सत्यापन सफल रहा!"),
        (keys::TOAST_FORM_ERROR, "सत्यापन विफल रहा। कृपया पुनः प्रयास करें।"),
    ],
};

// ==================== Tamil Strings ====================

pub const TAMIL_MESSAGES: MessageTable = MessageTable {
    language: "tam",
    entries: &[
        (keys::PAGE_TITLE, "அடையாள சரிபார்ப்பு"),
        (keys::LABEL_LANGUAGE, "மொழி"),
        (keys::LABEL_NAME, "முழு பெயர்"),
        (keys::PLACEHOLDER_NAME, "உங்கள் முழு பெயரை உள்ளிடவும்"),
        (keys::LABEL_AGE, "வயது"),
        (keys::PLACEHOLDER_AGE, "உங்கள் வயதை உள்ளிடவும்"),
        (keys::LABEL_DOB, "பிறந்த தேதி"),
        (keys::LABEL_PHOTO, "நேரடி புகைப்படம்"),
        (keys::BTN_OPEN_CAMERA, "கேமராவைத் திற"),
        (keys::BTN_CAPTURE, "படம் எடு"),
        (keys::BTN_RETAKE, "மீண்டும் எடு"),
        (keys::LABEL_DOCUMENT, "அடையாள ஆவணம்"),
        (
            keys::DROP_FILE,
            "உங்கள் ஆவணத்தை இங்கே இழுத்து விடவும் அல்லது தேர்வு செய்ய கிளிக் செய்யவும்",
        ),
        (keys::BTN_SUBMIT, "சரிபார்"),
        (keys::BTN_THEME, "தீம் மாற்று"),
        (keys::TOAST_CAMERA_FAIL, "கேமராவை அணுக முடியவில்லை"),
        (
            keys::TOAST_BLURRY_IMAGE,
            "படம் மங்கலாக உள்ளது, மீண்டும் எடுக்கவும்",
        ),
        (
            keys::TOAST_NO_FACE,
            "முகம் கண்டறியப்படவில்லை, மீண்டும் எடுக்கவும்",
        ),
        (
            keys::TOAST_MULTIPLE_FACES,
            "பல முகங்கள் கண்டறியப்பட்டன, நீங்கள் மட்டும் இருக்க வேண்டும்",
        ),
        (
            keys::TOAST_FACE_CHECK_FAILED,
            "முக சரிபார்ப்பு தோல்வியடைந்தது, மீண்டும் முயற்சிக்கவும்",
        ),
        (keys::TOAST_CAPTURE_FAIL, "படம் எடுக்க முடியவில்லை"),
        (
            keys::TOAST_CAPTURE_SUCCESS,
            "புகைப்படம் வெற்றிகரமாக எடுக்கப்பட்டது",
        ),
        (keys::TOAST_DARK_MODE, "இருண்ட பயன்முறை இயக்கப்பட்டது"),
        (keys::TOAST_LIGHT_MODE, "ஒளி பயன்முறை இயக்கப்பட்டது"),
        (
            keys::TOAST_INVALID_NAME,
            "சரியான பெயரை உள்ளிடவும் (எழுத்துகள் மற்றும் இடைவெளிகள் மட்டும்)",
        ),
        (
            keys::TOAST_INVALID_AGE,
            "1 முதல் 120 வரையிலான சரியான வயதை உள்ளிடவும்",
        ),
        (
            keys::TOAST_SELECT_DOB,
            "உங்கள் பிறந்த தேதியைத் தேர்ந்தெடுக்கவும்",
        ),
        (
            keys::TOAST_CAPTURE_FIRST,
            "முதலில் உங்கள் புகைப்படத்தை எடுக்கவும்",
        ),
        (
            keys::TOAST_UPLOAD_DOC,
            "உங்கள் அடையாள ஆவணத்தைப் பதிவேற்றவும்",
        ),
        (
            keys::TOAST_INVALID_FILE,
            "JPG, PNG அல்லது PDF ஆவணங்கள் மட்டுமே அனுமதிக்கப்படும்",
        ),
        (keys::TOAST_FORM_SUCCESS, "சரிபார்ப்பு வெற்றிகரமாக முடிந்தது!"),
        (
            keys::TOAST_FORM_ERROR,
            "சரிபார்ப்பு தோல்வியடைந்தது. மீண்டும் முயற்சிக்கவும்.",
        ),
    ],
};

/// Every bundled message table, canonical first.
pub const ALL_TABLES: [MessageTable; 3] = [ENGLISH_MESSAGES, HINDI_MESSAGES, TAMIL_MESSAGES];

/// Language code → (message key → localized string).
pub struct Translations {
    tables: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

static TRANSLATIONS: OnceLock<Translations> = OnceLock::new();

impl Translations {
    /// The bundled tables, built on first access.
    pub fn get() -> &'static Translations {
        TRANSLATIONS.get_or_init(|| Translations::from_tables(&ALL_TABLES))
    }

    pub fn from_tables(tables: &[MessageTable]) -> Self {
        let tables = tables
            .iter()
            .map(|table| (table.language, table.entries.iter().copied().collect()))
            .collect();
        Self { tables }
    }

    /// Exact-key lookup; `None` when the language or key is absent.
    pub fn lookup(&self, language: Language, key: &str) -> Option<&'static str> {
        self.tables
            .get(language.code())
            .and_then(|table| table.get(key))
            .copied()
    }

    /// Lookup falling back to the raw key string.
    pub fn translate<'a>(&self, language: Language, key: &'a str) -> &'a str {
        self.lookup(language, key).unwrap_or(key)
    }
}
