//! Media capture behind a capability interface.
//!
//! Front-ends acquire a [`CaptureSource`], grab a frame and must release it
//! again; tests substitute a fake source without touching real hardware.

use crate::error::{Result, StudioError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// A captured portrait ready for submission.
#[derive(Debug, Clone)]
pub struct CapturedImage {
    pub bytes: Vec<u8>,
    pub mime: String,
    pub filename: String,
}

/// A source of portrait images with an explicit acquire/release lifecycle.
///
/// `release` is synchronous and infallible so owners can call it from `Drop`;
/// failures inside a source are logged by the source, never propagated.
#[async_trait]
pub trait CaptureSource: Send {
    /// Open the underlying device. Must be called before `capture_frame`.
    async fn acquire(&mut self) -> Result<()>;

    /// Grab one frame from an acquired source.
    async fn capture_frame(&mut self) -> Result<CapturedImage>;

    /// Close the underlying device. Safe to call more than once.
    fn release(&mut self);

    /// Whether the source currently holds a live device handle.
    fn is_acquired(&self) -> bool;
}

/// Capture source backed by an image file on disk, used by the demo binary in
/// place of a camera.
pub struct FileSource {
    path: PathBuf,
    acquired: bool,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            acquired: false,
        }
    }
}

#[async_trait]
impl CaptureSource for FileSource {
    async fn acquire(&mut self) -> Result<()> {
        if !self.path.exists() {
            return Err(StudioError::DeviceError(format!(
                "image not found: {}",
                self.path.display()
            )));
        }
        self.acquired = true;
        log::debug!("Acquired file source {}", self.path.display());
        Ok(())
    }

    async fn capture_frame(&mut self) -> Result<CapturedImage> {
        if !self.acquired {
            return Err(StudioError::DeviceError(
                "capture source not acquired".into(),
            ));
        }
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            StudioError::DeviceError(format!("failed to read {}: {}", self.path.display(), e))
        })?;
        let filename = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "uploaded.png".to_string());

        Ok(CapturedImage {
            mime: mime_for_path(&self.path),
            bytes,
            filename,
        })
    }

    fn release(&mut self) {
        if self.acquired {
            log::debug!("Released file source {}", self.path.display());
        }
        self.acquired = false;
    }

    fn is_acquired(&self) -> bool {
        self.acquired
    }
}

/// Guess the image MIME type from the file extension, falling back to PNG.
pub fn mime_for_path(path: &Path) -> String {
    let kind = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match kind.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg".to_string(),
        Some("webp") => "image/webp".to_string(),
        Some("gif") => "image/gif".to_string(),
        _ => "image/png".to_string(),
    }
}
