use thiserror::Error;

use crate::i18n::keys;

/// Camera access and frame grabbing failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CameraError {
    #[error("camera permission denied")]
    PermissionDenied,

    #[error("no camera device available")]
    NoDevice,

    #[error("camera is not live")]
    NotLive,

    #[error("failed to read camera frame: {0}")]
    Frame(String),
}

impl CameraError {
    pub fn message_key(&self) -> &'static str {
        match self {
            CameraError::PermissionDenied | CameraError::NoDevice => keys::TOAST_CAMERA_FAIL,
            CameraError::NotLive | CameraError::Frame(_) => keys::TOAST_CAPTURE_FAIL,
        }
    }
}

/// Failures reported by a face detection backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DetectionError {
    #[error("face detection model is not loaded")]
    ModelUnavailable,

    #[error("face detection failed: {0}")]
    Failed(String),
}

/// Reasons the image-quality gate refuses a captured frame.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Rejection {
    #[error("captured frame is empty")]
    EmptyCapture,

    #[error("captured frame is blurred (variance {variance:.2})")]
    Blurry { variance: f64 },

    #[error("no face found in captured frame")]
    NoFace,

    #[error("{count} faces found in captured frame, expected exactly one")]
    MultipleFaces { count: usize },

    #[error("face check failed: {0}")]
    DetectionFailed(#[from] DetectionError),
}

impl Rejection {
    pub fn message_key(&self) -> &'static str {
        match self {
            Rejection::EmptyCapture => keys::TOAST_CAPTURE_FAIL,
            Rejection::Blurry { .. } => keys::TOAST_BLURRY_IMAGE,
            Rejection::NoFace => keys::TOAST_NO_FACE,
            Rejection::MultipleFaces { .. } => keys::TOAST_MULTIPLE_FACES,
            Rejection::DetectionFailed(_) => keys::TOAST_FACE_CHECK_FAILED,
        }
    }
}

/// Outcome of a failed capture attempt.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CaptureError {
    #[error(transparent)]
    Camera(#[from] CameraError),

    #[error(transparent)]
    Rejected(#[from] Rejection),
}

impl CaptureError {
    pub fn message_key(&self) -> &'static str {
        match self {
            CaptureError::Camera(e) => e.message_key(),
            CaptureError::Rejected(r) => r.message_key(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataUrlError {
    #[error("not a data URL")]
    NotDataUrl,

    #[error("data URL has no payload separator")]
    MissingPayload,

    #[error("data URL payload is not base64 encoded")]
    NotBase64,

    #[error("invalid base64 payload: {0}")]
    Decode(String),

    #[error("failed to encode image: {0}")]
    Encode(String),
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("failed to read document {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build preview: {0}")]
    Preview(String),
}

/// Form validation failures, checked in this order.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name must contain letters and spaces only")]
    InvalidName,

    #[error("age must be a whole number between 1 and 120")]
    InvalidAge,

    #[error("date of birth is required")]
    MissingDob,

    #[error("a face image must be captured first")]
    MissingCapture,

    #[error("a document must be uploaded")]
    MissingDocument,

    #[error("document must be a JPEG, PNG or PDF file")]
    InvalidDocumentType,
}

impl ValidationError {
    pub fn message_key(&self) -> &'static str {
        match self {
            ValidationError::InvalidName => keys::TOAST_INVALID_NAME,
            ValidationError::InvalidAge => keys::TOAST_INVALID_AGE,
            ValidationError::MissingDob => keys::TOAST_SELECT_DOB,
            ValidationError::MissingCapture => keys::TOAST_CAPTURE_FIRST,
            ValidationError::MissingDocument => keys::TOAST_UPLOAD_DOC,
            ValidationError::InvalidDocumentType => keys::TOAST_INVALID_FILE,
        }
    }
}

/// Submission failures. Form state is left untouched in every case.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("invalid payload: {0}")]
    Payload(#[from] DataUrlError),

    #[error("verification request failed: {0}")]
    Transport(String),

    #[error("verification rejected ({status}): {}", .error.as_deref().unwrap_or("no details"))]
    Rejected { status: u16, error: Option<String> },
}

impl SubmitError {
    /// Server supplied error text, if any.
    pub fn server_error(&self) -> Option<&str> {
        match self {
            SubmitError::Rejected { error, .. } => error.as_deref(),
            _ => None,
        }
    }
}
