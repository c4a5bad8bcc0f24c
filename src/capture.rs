//! Camera capture controller.
//!
//! Drives the `Idle -> Live -> Captured -> Live` cycle: open a stream, grab a
//! still frame, run it through the quality gate and keep the accepted frame as
//! a PNG data URL.

use anyhow::{Context, Result};
use async_trait::async_trait;
use image::RgbaImage;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::data_url::DataUrl;
use crate::error::{CameraError, CaptureError, Rejection};
use crate::quality::QualityGate;

pub const DEFAULT_CAPTURE_WIDTH: u32 = 320;
pub const DEFAULT_CAPTURE_HEIGHT: u32 = 240;

/// Source of live video streams (a webcam, or a stand-in).
#[async_trait]
pub trait Camera: Send + Sync {
    /// Request access and start a stream.
    async fn open(&self) -> Result<Box<dyn MediaStream>, CameraError>;
}

/// An open stream of frames. Stopping ends every track.
pub trait MediaStream: Send {
    /// Draw the current frame scaled to `width` x `height`.
    fn grab_frame(&mut self, width: u32, height: u32) -> Result<RgbaImage, CameraError>;

    fn stop(&mut self);

    fn is_active(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Live,
    Captured,
}

pub struct CaptureController {
    camera: Box<dyn Camera>,
    stream: Option<Box<dyn MediaStream>>,
    state: CaptureState,
    width: u32,
    height: u32,
}

impl CaptureController {
    pub fn new(camera: Box<dyn Camera>) -> Self {
        Self {
            camera,
            stream: None,
            state: CaptureState::Idle,
            width: DEFAULT_CAPTURE_WIDTH,
            height: DEFAULT_CAPTURE_HEIGHT,
        }
    }

    pub fn with_frame_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn frame_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True while a stream is attached and running.
    pub fn is_streaming(&self) -> bool {
        self.stream.as_ref().is_some_and(|s| s.is_active())
    }

    /// Open a fresh stream. On failure the controller is left as it was.
    pub async fn open_camera(&mut self) -> Result<(), CameraError> {
        let stream = match self.camera.open().await {
            Ok(stream) => stream,
            Err(e) => {
                warn!("Camera access failed: {}", e);
                return Err(e);
            }
        };

        self.stop_stream();
        self.stream = Some(stream);
        self.state = CaptureState::Live;
        info!("Camera live ({}x{})", self.width, self.height);
        Ok(())
    }

    /// Grab a still, gate it and encode it.
    ///
    /// Only valid while live. A rejected frame leaves the stream running so the
    /// user can try again; an accepted one stops every track.
    pub async fn capture(&mut self, gate: &QualityGate) -> Result<DataUrl, CaptureError> {
        if self.state != CaptureState::Live {
            return Err(CameraError::NotLive.into());
        }
        let stream = self.stream.as_mut().ok_or(CameraError::NotLive)?;

        let frame = stream.grab_frame(self.width, self.height)?;

        let report = gate.inspect(&frame).await.map_err(|rejection| {
            info!("Capture rejected: {}", rejection);
            rejection
        })?;

        let image = DataUrl::from_png_frame(&frame).map_err(|e| {
            warn!("Failed to encode captured frame: {}", e);
            Rejection::EmptyCapture
        })?;
        if image.is_empty() {
            return Err(Rejection::EmptyCapture.into());
        }

        self.stop_stream();
        self.state = CaptureState::Captured;
        info!(
            "Frame captured (variance {:.2}, {} bytes encoded)",
            report.variance,
            image.as_str().len()
        );
        Ok(image)
    }

    /// Reopen the camera after a capture.
    pub async fn retake(&mut self) -> Result<(), CameraError> {
        self.open_camera().await
    }

    fn stop_stream(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            debug!("Camera stream stopped");
        }
    }
}

impl Drop for CaptureController {
    fn drop(&mut self) {
        self.stop_stream();
    }
}

/// Stands in when no camera device exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCamera;

#[async_trait]
impl Camera for NoCamera {
    async fn open(&self) -> Result<Box<dyn MediaStream>, CameraError> {
        Err(CameraError::NoDevice)
    }
}

/// Camera that replays a single still image, for headless runs.
#[derive(Debug, Clone)]
pub struct StillCamera {
    image: RgbaImage,
}

impl StillCamera {
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .with_context(|| format!("Failed to open photo {}", path.display()))?
            .to_rgba8();
        Ok(Self { image })
    }
}

#[async_trait]
impl Camera for StillCamera {
    async fn open(&self) -> Result<Box<dyn MediaStream>, CameraError> {
        Ok(Box::new(StillStream {
            image: self.image.clone(),
            active: true,
        }))
    }
}

struct StillStream {
    image: RgbaImage,
    active: bool,
}

impl MediaStream for StillStream {
    fn grab_frame(&mut self, width: u32, height: u32) -> Result<RgbaImage, CameraError> {
        if !self.active {
            return Err(CameraError::NotLive);
        }
        if self.image.dimensions() == (width, height) {
            return Ok(self.image.clone());
        }
        Ok(image::imageops::resize(
            &self.image,
            width,
            height,
            image::imageops::FilterType::Nearest,
        ))
    }

    fn stop(&mut self) {
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::StaticFaceDetector;
    use image::Rgba;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn sharp_frame() -> RgbaImage {
        RgbaImage::from_fn(DEFAULT_CAPTURE_WIDTH, DEFAULT_CAPTURE_HEIGHT, |x, y| {
            if (x / 4 + y / 4) % 2 == 0 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        })
    }

    fn gate(faces: usize) -> QualityGate {
        QualityGate::new(Box::new(StaticFaceDetector::new(faces)))
    }

    struct DeniedCamera;

    #[async_trait]
    impl Camera for DeniedCamera {
        async fn open(&self) -> Result<Box<dyn MediaStream>, CameraError> {
            Err(CameraError::PermissionDenied)
        }
    }

    /// Counts how many streams were stopped.
    struct TrackedCamera {
        frame: RgbaImage,
        stopped: Arc<AtomicUsize>,
    }

    struct TrackedStream {
        frame: RgbaImage,
        active: bool,
        stopped: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Camera for TrackedCamera {
        async fn open(&self) -> Result<Box<dyn MediaStream>, CameraError> {
            Ok(Box::new(TrackedStream {
                frame: self.frame.clone(),
                active: true,
                stopped: Arc::clone(&self.stopped),
            }))
        }
    }

    impl MediaStream for TrackedStream {
        fn grab_frame(&mut self, _width: u32, _height: u32) -> Result<RgbaImage, CameraError> {
            Ok(self.frame.clone())
        }

        fn stop(&mut self) {
            if self.active {
                self.active = false;
                self.stopped.fetch_add(1, Ordering::SeqCst);
            }
        }

        fn is_active(&self) -> bool {
            self.active
        }
    }

    fn tracked(frame: RgbaImage) -> (CaptureController, Arc<AtomicUsize>) {
        let stopped = Arc::new(AtomicUsize::new(0));
        let camera = TrackedCamera {
            frame,
            stopped: Arc::clone(&stopped),
        };
        (CaptureController::new(Box::new(camera)), stopped)
    }

    // ==================== Open Tests ====================

    #[tokio::test]
    async fn test_open_camera_goes_live() {
        let mut controller = CaptureController::new(Box::new(StillCamera::from_image(sharp_frame())));
        assert_eq!(controller.state(), CaptureState::Idle);

        controller.open_camera().await.unwrap();

        assert_eq!(controller.state(), CaptureState::Live);
        assert!(controller.is_streaming());
    }

    #[tokio::test]
    async fn test_open_camera_failure_leaves_state() {
        let mut controller = CaptureController::new(Box::new(DeniedCamera));

        let err = controller.open_camera().await.unwrap_err();

        assert_eq!(err, CameraError::PermissionDenied);
        assert_eq!(controller.state(), CaptureState::Idle);
        assert!(!controller.is_streaming());
    }

    #[tokio::test]
    async fn test_reopen_stops_previous_stream() {
        let (mut controller, stopped) = tracked(sharp_frame());

        controller.open_camera().await.unwrap();
        controller.open_camera().await.unwrap();

        assert_eq!(stopped.load(Ordering::SeqCst), 1);
        assert!(controller.is_streaming());
    }

    // ==================== Capture Tests ====================

    #[tokio::test]
    async fn test_capture_requires_live_stream() {
        let mut controller = CaptureController::new(Box::new(StillCamera::from_image(sharp_frame())));

        let err = controller.capture(&gate(1)).await.unwrap_err();

        assert_eq!(err, CaptureError::Camera(CameraError::NotLive));
    }

    #[tokio::test]
    async fn test_capture_success_stops_tracks() {
        let (mut controller, stopped) = tracked(sharp_frame());
        controller.open_camera().await.unwrap();

        let image = controller.capture(&gate(1)).await.unwrap();

        assert!(image.is_image());
        assert_eq!(image.media_type(), Some("image/png"));
        assert_eq!(controller.state(), CaptureState::Captured);
        assert_eq!(stopped.load(Ordering::SeqCst), 1);
        assert!(!controller.is_streaming());
    }

    #[tokio::test]
    async fn test_rejected_capture_stays_live() {
        let (mut controller, stopped) = tracked(sharp_frame());
        controller.open_camera().await.unwrap();

        let err = controller.capture(&gate(2)).await.unwrap_err();

        assert_eq!(
            err,
            CaptureError::Rejected(Rejection::MultipleFaces { count: 2 })
        );
        assert_eq!(controller.state(), CaptureState::Live);
        assert_eq!(stopped.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_blurred_capture_rejected() {
        let flat = RgbaImage::from_pixel(32, 32, Rgba([128, 128, 128, 255]));
        let (mut controller, _) = tracked(flat);
        controller.open_camera().await.unwrap();

        let err = controller.capture(&gate(1)).await.unwrap_err();

        assert!(matches!(err, CaptureError::Rejected(Rejection::Blurry { .. })));
    }

    #[tokio::test]
    async fn test_empty_frame_rejected() {
        let (mut controller, _) = tracked(RgbaImage::new(0, 0));
        controller.open_camera().await.unwrap();

        let err = controller.capture(&gate(1)).await.unwrap_err();

        assert_eq!(err, CaptureError::Rejected(Rejection::EmptyCapture));
    }

    #[tokio::test]
    async fn test_retake_after_capture() {
        let (mut controller, _) = tracked(sharp_frame());
        controller.open_camera().await.unwrap();
        controller.capture(&gate(1)).await.unwrap();

        controller.retake().await.unwrap();

        assert_eq!(controller.state(), CaptureState::Live);
        assert!(controller.capture(&gate(1)).await.is_ok());
    }

    #[tokio::test]
    async fn test_drop_stops_stream() {
        let (mut controller, stopped) = tracked(sharp_frame());
        controller.open_camera().await.unwrap();

        drop(controller);

        assert_eq!(stopped.load(Ordering::SeqCst), 1);
    }

    // ==================== Stand-in Camera Tests ====================

    #[tokio::test]
    async fn test_no_camera_reports_no_device() {
        let mut controller = CaptureController::new(Box::new(NoCamera));

        assert_eq!(controller.open_camera().await, Err(CameraError::NoDevice));
        assert_eq!(controller.state(), CaptureState::Idle);
    }

    #[tokio::test]
    async fn test_still_camera_resizes_to_frame_size() {
        let camera = StillCamera::from_image(RgbaImage::new(64, 64));
        let mut stream = camera.open().await.unwrap();

        let frame = stream.grab_frame(32, 16).unwrap();
        assert_eq!(frame.dimensions(), (32, 16));

        stream.stop();
        assert_eq!(stream.grab_frame(32, 16), Err(CameraError::NotLive));
    }

    #[test]
    fn test_still_camera_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("face.png");
        sharp_frame().save(&path).unwrap();

        assert!(StillCamera::from_path(&path).is_ok());
        assert!(StillCamera::from_path(dir.path().join("missing.png")).is_err());
    }
}
