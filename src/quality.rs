//! Image-quality gate: blur heuristic plus an exactly-one-face check.

use image::RgbaImage;
use tracing::{debug, warn};

use crate::detector::{FaceBounds, FaceDetector};
use crate::error::Rejection;

/// Frames whose luminance variance falls below this are considered blurred.
pub const DEFAULT_BLUR_THRESHOLD: f64 = 100.0;

/// Variance of per-pixel luminance, where luminance is the mean of R, G and B.
///
/// Accumulates integer channel sums so uniform frames score exactly zero.
/// An empty frame scores zero.
pub fn blur_variance(frame: &RgbaImage) -> f64 {
    let count = u128::from(frame.width()) * u128::from(frame.height());
    if count == 0 {
        return 0.0;
    }

    let mut sum: u128 = 0;
    let mut sum_squared: u128 = 0;
    for pixel in frame.pixels() {
        let [r, g, b, _] = pixel.0;
        let channels = u128::from(r) + u128::from(g) + u128::from(b);
        sum += channels;
        sum_squared += channels * channels;
    }

    // Var(s / 3) = (n * Σs² - (Σs)²) / (9 * n²)
    let numerator = count * sum_squared - sum * sum;
    numerator as f64 / (9.0 * (count as f64) * (count as f64))
}

pub fn is_blurred(frame: &RgbaImage, threshold: f64) -> bool {
    blur_variance(frame) < threshold
}

/// Measurements of an accepted frame.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityReport {
    pub variance: f64,
    pub face: FaceBounds,
}

pub struct QualityGate {
    detector: Box<dyn FaceDetector>,
    blur_threshold: f64,
}

impl QualityGate {
    pub fn new(detector: Box<dyn FaceDetector>) -> Self {
        Self {
            detector,
            blur_threshold: DEFAULT_BLUR_THRESHOLD,
        }
    }

    pub fn with_blur_threshold(mut self, threshold: f64) -> Self {
        self.blur_threshold = threshold;
        self
    }

    pub fn blur_threshold(&self) -> f64 {
        self.blur_threshold
    }

    /// Accept a frame only when it is sharp and shows exactly one face.
    /// A failing detector rejects the frame.
    pub async fn inspect(&self, frame: &RgbaImage) -> Result<QualityReport, Rejection> {
        if frame.width() == 0 || frame.height() == 0 {
            return Err(Rejection::EmptyCapture);
        }

        let variance = blur_variance(frame);
        if variance < self.blur_threshold {
            debug!(
                "Frame rejected as blurred: variance {:.2} < {:.2}",
                variance, self.blur_threshold
            );
            return Err(Rejection::Blurry { variance });
        }

        let mut faces = self.detector.detect_faces(frame).await.map_err(|e| {
            warn!("Face detection failed: {}", e);
            Rejection::from(e)
        })?;

        match faces.len() {
            0 => Err(Rejection::NoFace),
            1 => {
                let face = faces.remove(0);
                debug!(
                    "Frame accepted: variance {:.2}, face confidence {:.2}",
                    variance, face.confidence
                );
                Ok(QualityReport { variance, face })
            }
            count => Err(Rejection::MultipleFaces { count }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::StaticFaceDetector;
    use crate::error::DetectionError;
    use image::Rgba;
    use proptest::prelude::*;

    fn checkerboard(width: u32, height: u32, square: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            if ((x / square) + (y / square)) % 2 == 0 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        })
    }

    fn gate(faces: usize) -> QualityGate {
        QualityGate::new(Box::new(StaticFaceDetector::new(faces)))
    }

    // ==================== Blur Variance Tests ====================

    #[test]
    fn test_uniform_frame_has_zero_variance() {
        let frame = RgbaImage::from_pixel(32, 24, Rgba([120, 60, 200, 255]));

        assert_eq!(blur_variance(&frame), 0.0);
        assert!(is_blurred(&frame, DEFAULT_BLUR_THRESHOLD));
    }

    #[test]
    fn test_checkerboard_variance() {
        let frame = checkerboard(32, 32, 1);

        assert_eq!(blur_variance(&frame), 16256.25);
        assert!(!is_blurred(&frame, DEFAULT_BLUR_THRESHOLD));
    }

    #[test]
    fn test_alpha_is_ignored() {
        let opaque = checkerboard(8, 8, 2);
        let mut translucent = opaque.clone();
        for pixel in translucent.pixels_mut() {
            pixel.0[3] = 10;
        }

        assert_eq!(blur_variance(&opaque), blur_variance(&translucent));
    }

    #[test]
    fn test_empty_frame_has_zero_variance() {
        assert_eq!(blur_variance(&RgbaImage::new(0, 0)), 0.0);
    }

    #[test]
    fn test_low_contrast_is_blurred() {
        // Luminance alternates 100/110: variance 25
        let frame = RgbaImage::from_fn(10, 10, |x, _| {
            if x % 2 == 0 {
                Rgba([100, 100, 100, 255])
            } else {
                Rgba([110, 110, 110, 255])
            }
        });

        assert_eq!(blur_variance(&frame), 25.0);
        assert!(is_blurred(&frame, DEFAULT_BLUR_THRESHOLD));
    }

    proptest! {
        #[test]
        fn prop_uniform_frames_are_blurred(
            r in any::<u8>(), g in any::<u8>(), b in any::<u8>(),
            w in 1u32..40, h in 1u32..40,
        ) {
            let frame = RgbaImage::from_pixel(w, h, Rgba([r, g, b, 255]));
            prop_assert_eq!(blur_variance(&frame), 0.0);
            prop_assert!(is_blurred(&frame, DEFAULT_BLUR_THRESHOLD));
        }

        #[test]
        fn prop_variance_is_bounded(pixels in proptest::collection::vec(any::<u8>(), 3..300)) {
            let width = (pixels.len() / 3) as u32;
            let frame = RgbaImage::from_fn(width, 1, |x, _| {
                let i = x as usize * 3;
                Rgba([pixels[i], pixels[i + 1], pixels[i + 2], 255])
            });
            let variance = blur_variance(&frame);
            prop_assert!(variance >= 0.0);
            prop_assert!(variance <= 16256.25);
        }
    }

    // ==================== Gate Tests ====================

    #[tokio::test]
    async fn test_gate_accepts_sharp_single_face() {
        let report = gate(1).inspect(&checkerboard(64, 48, 4)).await.unwrap();

        assert_eq!(report.variance, 16256.25);
    }

    #[tokio::test]
    async fn test_gate_rejects_blurred_before_detection() {
        let gate = QualityGate::new(Box::new(StaticFaceDetector::failing("unused")));
        let frame = RgbaImage::from_pixel(64, 48, Rgba([90, 90, 90, 255]));

        assert_eq!(
            gate.inspect(&frame).await,
            Err(Rejection::Blurry { variance: 0.0 })
        );
    }

    #[tokio::test]
    async fn test_gate_rejects_zero_faces() {
        let result = gate(0).inspect(&checkerboard(64, 48, 4)).await;
        assert_eq!(result, Err(Rejection::NoFace));
    }

    #[tokio::test]
    async fn test_gate_rejects_multiple_faces() {
        for count in [2, 3, 7] {
            let result = gate(count).inspect(&checkerboard(64, 48, 4)).await;
            assert_eq!(result, Err(Rejection::MultipleFaces { count }));
        }
    }

    #[tokio::test]
    async fn test_gate_treats_detection_error_as_rejection() {
        let gate = QualityGate::new(Box::new(StaticFaceDetector::failing("model not loaded")));
        let result = gate.inspect(&checkerboard(64, 48, 4)).await;

        assert_eq!(
            result,
            Err(Rejection::DetectionFailed(DetectionError::Failed(
                "model not loaded".to_string()
            )))
        );
    }

    #[tokio::test]
    async fn test_gate_rejects_empty_frame() {
        let result = gate(1).inspect(&RgbaImage::new(0, 0)).await;
        assert_eq!(result, Err(Rejection::EmptyCapture));
    }

    #[tokio::test]
    async fn test_custom_threshold() {
        let frame = RgbaImage::from_fn(10, 10, |x, _| {
            if x % 2 == 0 {
                Rgba([100, 100, 100, 255])
            } else {
                Rgba([110, 110, 110, 255])
            }
        });

        let lenient = gate(1).with_blur_threshold(10.0);
        assert_eq!(lenient.blur_threshold(), 10.0);
        assert!(lenient.inspect(&frame).await.is_ok());
    }
}
