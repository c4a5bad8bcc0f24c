//! `data:` URL encoding for captured frames and document previews.

use base64::Engine as _;
use image::codecs::png::PngEncoder;
use image::{ImageEncoder, RgbaImage};
use std::fmt;

use crate::error::DataUrlError;

/// What a zero-sized surface encodes to.
pub const EMPTY_DATA_URL: &str = "data:,";

/// A string-embedded binary resource (`data:<type>;base64,<payload>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl(String);

impl DataUrl {
    /// Encode `bytes` as a base64 data URL with the given media type.
    pub fn encode(media_type: &str, bytes: &[u8]) -> Self {
        let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
        Self(format!("data:{};base64,{}", media_type, payload))
    }

    /// Encode a raster frame as a PNG data URL.
    ///
    /// A zero-sized frame yields [`EMPTY_DATA_URL`].
    pub fn from_png_frame(frame: &RgbaImage) -> Result<Self, DataUrlError> {
        let (width, height) = frame.dimensions();
        if width == 0 || height == 0 {
            return Ok(Self(EMPTY_DATA_URL.to_string()));
        }

        let mut buffer = Vec::new();
        PngEncoder::new(&mut buffer)
            .write_image(frame.as_raw(), width, height, image::ExtendedColorType::Rgba8)
            .map_err(|e| DataUrlError::Encode(e.to_string()))?;

        Ok(Self::encode("image/png", &buffer))
    }

    /// Accept any string with a `data:` scheme and a payload separator.
    pub fn parse(value: impl Into<String>) -> Result<Self, DataUrlError> {
        let value = value.into();
        if !value.starts_with("data:") {
            return Err(DataUrlError::NotDataUrl);
        }
        if !value.contains(',') {
            return Err(DataUrlError::MissingPayload);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for data URLs carrying an image (`data:image…`).
    pub fn is_image(&self) -> bool {
        self.0.starts_with("data:image")
    }

    /// True when nothing was encoded (`data:,`).
    pub fn is_empty(&self) -> bool {
        self.payload().is_empty()
    }

    /// Media type from the header (`data:<type>;…`).
    pub fn media_type(&self) -> Option<&str> {
        let header = self.header();
        let start = header.find(':')? + 1;
        let end = start + header[start..].find(';')?;
        Some(&header[start..end])
    }

    /// Decode the base64 payload.
    pub fn decode(&self) -> Result<Vec<u8>, DataUrlError> {
        if !self.header().ends_with(";base64") {
            return Err(DataUrlError::NotBase64);
        }
        base64::engine::general_purpose::STANDARD
            .decode(self.payload())
            .map_err(|e| DataUrlError::Decode(e.to_string()))
    }

    fn header(&self) -> &str {
        self.0.split_once(',').map(|(h, _)| h).unwrap_or(&self.0)
    }

    fn payload(&self) -> &str {
        self.0.split_once(',').map(|(_, p)| p).unwrap_or("")
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
