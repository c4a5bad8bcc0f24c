//! Face detection capability used by the image-quality gate.

#[cfg(feature = "rustface")]
mod rustface_backend;

#[cfg(feature = "rustface")]
pub use rustface_backend::RustfaceDetector;

use async_trait::async_trait;
use image::RgbaImage;

use crate::error::DetectionError;

/// Bounding box of a detected face within a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceBounds {
    /// X coordinate of the top-left corner (pixels).
    pub x: f64,
    /// Y coordinate of the top-left corner (pixels).
    pub y: f64,
    /// Width of the bounding box (pixels).
    pub width: f64,
    /// Height of the bounding box (pixels).
    pub height: f64,
    /// Detection confidence score.
    pub confidence: f64,
}

/// Pluggable face detection backend.
///
/// Only the number of detections is consumed. Implementations report model or
/// inference problems as [`DetectionError`]; callers treat those as a rejected
/// frame.
#[async_trait]
pub trait FaceDetector: Send + Sync {
    /// Detect every face in an RGBA frame.
    async fn detect_faces(&self, frame: &RgbaImage) -> Result<Vec<FaceBounds>, DetectionError>;
}

/// Row-major grayscale buffer of `frame`, as detection engines expect.
pub fn to_grayscale(frame: &RgbaImage) -> Vec<u8> {
    image::imageops::grayscale(frame).into_raw()
}

/// Detector with a fixed outcome, for tests and for runs without a model.
#[derive(Debug, Clone)]
pub struct StaticFaceDetector {
    outcome: Result<usize, DetectionError>,
}

impl StaticFaceDetector {
    /// Always report `count` faces.
    pub fn new(count: usize) -> Self {
        Self { outcome: Ok(count) }
    }

    /// Always fail with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(DetectionError::Failed(message.to_string())),
        }
    }
}

#[async_trait]
impl FaceDetector for StaticFaceDetector {
    async fn detect_faces(&self, frame: &RgbaImage) -> Result<Vec<FaceBounds>, DetectionError> {
        let count = self.outcome.clone()?;
        let (width, height) = frame.dimensions();
        let side = f64::from(width.min(height)) / 2.0;

        Ok((0..count)
            .map(|i| FaceBounds {
                x: i as f64 * side / 4.0,
                y: 0.0,
                width: side,
                height: side,
                confidence: 1.0,
            })
            .collect())
    }
}
