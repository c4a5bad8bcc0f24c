use anyhow::{Context, Result};
use async_trait::async_trait;
use image::RgbaImage;
use std::path::Path;
use tracing::info;

use crate::detector::{to_grayscale, FaceBounds, FaceDetector};
use crate::error::DetectionError;

/// Face detector backed by the `rustface` crate (SeetaFace engine).
///
/// The model is loaded once, either from a local file or from a remote weights
/// URI, and cloned into a fresh detector for each frame.
pub struct RustfaceDetector {
    model: rustface::Model,
}

impl RustfaceDetector {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let model = rustface::read_model(std::io::Cursor::new(bytes))
            .map_err(|e| anyhow::anyhow!("Failed to parse SeetaFace model: {}", e))?;
        Ok(Self { model })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read face model {}", path.display()))?;
        info!("Loaded face model from {} ({} bytes)", path.display(), bytes.len());
        Self::from_bytes(&bytes)
    }

    /// Fetch model weights from `uri` and load them.
    pub async fn load_from_uri(client: &reqwest::Client, uri: &str) -> Result<Self> {
        let response = client
            .get(uri)
            .send()
            .await
            .context("Failed to request face model weights")?;

        if !response.status().is_success() {
            let status = response.status();
            anyhow::bail!("Face model download failed ({}): {}", status, uri);
        }

        let bytes = response
            .bytes()
            .await
            .context("Failed to read face model weights")?;
        info!("Downloaded face model from {} ({} bytes)", uri, bytes.len());

        Self::from_bytes(&bytes)
    }
}

#[async_trait]
impl FaceDetector for RustfaceDetector {
    /// The pyramid scan is CPU-bound, so it runs on the blocking pool.
    async fn detect_faces(&self, frame: &RgbaImage) -> Result<Vec<FaceBounds>, DetectionError> {
        let (width, height) = frame.dimensions();
        if width == 0 || height == 0 {
            return Ok(Vec::new());
        }

        let gray = to_grayscale(frame);
        let model = self.model.clone();

        tokio::task::spawn_blocking(move || scan(model, &gray, width, height))
            .await
            .map_err(|e| DetectionError::Failed(e.to_string()))
    }
}

fn scan(model: rustface::Model, gray: &[u8], width: u32, height: u32) -> Vec<FaceBounds> {
    let mut detector = rustface::create_detector_with_model(model);
    detector.set_min_face_size(20);
    detector.set_score_thresh(2.0);
    detector.set_pyramid_scale_factor(0.8);
    detector.set_slide_window_step(4, 4);

    detector
        .detect(&rustface::ImageData::new(gray, width, height))
        .iter()
        .map(|face| {
            let bbox = face.bbox();
            FaceBounds {
                x: bbox.x() as f64,
                y: bbox.y() as f64,
                width: bbox.width() as f64,
                height: bbox.height() as f64,
                confidence: face.score(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file_missing() {
        let err = RustfaceDetector::from_file("/nonexistent/seeta.bin")
            .err()
            .expect("missing file should fail");
        assert!(err.to_string().contains("Failed to read face model"));
    }

    /// Runs only when a SeetaFace model is available locally.
    fn local_model() -> Option<RustfaceDetector> {
        let path = std::env::var("FACE_MODEL_PATH").ok()?;
        RustfaceDetector::from_file(path).ok()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_detect_faces_on_featureless_frames() {
        let Some(detector) = local_model() else {
            return;
        };

        let flat = RgbaImage::from_pixel(160, 120, image::Rgba([128, 128, 128, 255]));
        assert!(detector.detect_faces(&flat).await.unwrap().is_empty());

        let empty = RgbaImage::new(0, 0);
        assert!(detector.detect_faces(&empty).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_from_uri_http_error() {
        use wiremock::{matchers::method, Mock, MockServer, ResponseTemplate};

        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let uri = format!("{}/weights/seeta.bin", mock_server.uri());
        let result = RustfaceDetector::load_from_uri(&reqwest::Client::new(), &uri).await;

        assert!(result.is_err());
    }
}
