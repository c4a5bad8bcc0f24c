//! Document upload through the file picker or the drop zone.

use std::path::Path;
use tracing::{debug, info};

use crate::data_url::DataUrl;
use crate::error::UploadError;

/// A user-selected supporting document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFile {
    pub file_name: String,
    /// Declared media type, e.g. `image/jpeg`
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl DocumentFile {
    pub fn new(file_name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Read a document from disk, declaring its media type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, UploadError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|source| UploadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::new(file_name, media_type_for(path), bytes))
    }

    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }
}

pub fn media_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "pdf" => "application/pdf",
        "webp" => "image/webp",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// What the upload area shows for the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// Inline thumbnail for image documents
    Thumbnail(DataUrl),
    /// Caption for anything else
    FileName(String),
}

/// Build the preview for a document. Image encoding runs off the async task.
pub async fn preview(document: &DocumentFile) -> Result<Preview, UploadError> {
    if !document.is_image() {
        return Ok(Preview::FileName(format!("Uploaded: {}", document.file_name)));
    }

    let media_type = document.media_type.clone();
    let bytes = document.bytes.clone();
    let url = tokio::task::spawn_blocking(move || DataUrl::encode(&media_type, &bytes))
        .await
        .map_err(|e| UploadError::Preview(e.to_string()))?;

    Ok(Preview::Thumbnail(url))
}

#[derive(Debug, Default)]
pub struct UploadHandler {
    drop_active: bool,
    selected: Option<DocumentFile>,
    preview: Option<Preview>,
}

impl UploadHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is hovering over the drop zone.
    pub fn is_drop_active(&self) -> bool {
        self.drop_active
    }

    pub fn selected(&self) -> Option<&DocumentFile> {
        self.selected.as_ref()
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn drag_over(&mut self) {
        self.drop_active = true;
    }

    pub fn drag_leave(&mut self) {
        self.drop_active = false;
    }

    /// Handle a drop. Only the first file is kept; an empty drop keeps the
    /// previous selection.
    pub async fn drop(&mut self, files: Vec<DocumentFile>) -> Result<(), UploadError> {
        self.drop_active = false;

        let Some(first) = files.into_iter().next() else {
            debug!("Empty drop ignored");
            return Ok(());
        };
        self.select(first).await
    }

    /// Handle a file picked through the chooser.
    pub async fn choose(&mut self, file: DocumentFile) -> Result<(), UploadError> {
        self.select(file).await
    }

    async fn select(&mut self, file: DocumentFile) -> Result<(), UploadError> {
        let preview = preview(&file).await?;
        info!(
            "Document selected: {} ({}, {} bytes)",
            file.file_name,
            file.media_type,
            file.bytes.len()
        );
        self.selected = Some(file);
        self.preview = Some(preview);
        Ok(())
    }
}
