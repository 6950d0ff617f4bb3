//! Session state for a hairstyle generation front-end.
//!
//! All mutable UI-facing state (prompt, selected image, capture handle,
//! results) lives in one [`StudioSession`] and changes only through discrete
//! event methods, so a front-end never scatters it across ad hoc variables.

use crate::{
    capture::CaptureSource,
    error::{Result, StudioError},
    models::{Gallery, GenerationRequest},
    prompt::{self, DEFAULT_PROMPT, PROMPT_LIBRARY},
    studio::StudioClient,
};

/// Image currently selected for submission, from upload or capture.
#[derive(Debug, Clone)]
pub struct SelectedImage {
    pub bytes: Vec<u8>,
    pub mime: String,
    pub filename: String,
}

/// Terminal state of the most recent submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Complete { produced: usize },
    Failed(String),
}

pub struct StudioSession {
    prompt: String,
    image: Option<SelectedImage>,
    camera: Option<Box<dyn CaptureSource>>,
    gallery: Gallery,
    status: SessionStatus,
}

impl Default for StudioSession {
    fn default() -> Self {
        Self::new()
    }
}

impl StudioSession {
    pub fn new() -> Self {
        Self {
            prompt: prompt::normalize(DEFAULT_PROMPT),
            image: None,
            camera: None,
            gallery: Gallery::new(),
            status: SessionStatus::Idle,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Free-text prompt edit. Normalized immediately; blank input leaves the
    /// prompt empty and submission blocked.
    pub fn set_prompt(&mut self, input: &str) {
        self.prompt = prompt::normalize(input);
    }

    /// Pick a prompt from the curated library.
    pub fn use_library_prompt(&mut self, index: usize) -> Result<()> {
        let chosen = PROMPT_LIBRARY.get(index).ok_or_else(|| {
            StudioError::ValidationError(format!("no library prompt at index {}", index))
        })?;
        self.prompt = prompt::normalize(chosen);
        Ok(())
    }

    /// One-click recommended prompt.
    pub fn use_recommended_prompt(&mut self) {
        self.prompt = prompt::recommended();
    }

    pub fn image(&self) -> Option<&SelectedImage> {
        self.image.as_ref()
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn camera_active(&self) -> bool {
        self.camera.is_some()
    }

    /// An uploaded file was chosen as the image source. Any live capture
    /// session is released first.
    pub fn choose_file(&mut self, bytes: Vec<u8>, filename: impl Into<String>, mime: impl Into<String>) {
        self.stop_camera();
        self.image = Some(SelectedImage {
            bytes,
            mime: mime.into(),
            filename: filename.into(),
        });
    }

    /// Start a capture session, releasing any previous one.
    pub async fn start_camera(&mut self, mut source: Box<dyn CaptureSource>) -> Result<()> {
        self.stop_camera();
        source.acquire().await.map_err(|e| {
            log::warn!("Failed to start capture source: {}", e);
            e
        })?;
        self.camera = Some(source);
        Ok(())
    }

    /// Capture a photo from the live source. The source is released whether
    /// or not the capture succeeds; a failure never touches the selected
    /// image or any in-flight results.
    pub async fn capture_photo(&mut self) -> Result<()> {
        let mut camera = self.camera.take().ok_or_else(|| {
            StudioError::DeviceError("no capture session is active".into())
        })?;
        let frame = camera.capture_frame().await;
        camera.release();
        let frame = frame?;
        self.image = Some(SelectedImage {
            bytes: frame.bytes,
            mime: frame.mime,
            filename: frame.filename,
        });
        Ok(())
    }

    /// Stop the capture session, if any. Best effort.
    pub fn stop_camera(&mut self) {
        if let Some(mut camera) = self.camera.take() {
            camera.release();
        }
    }

    /// Clear results and status for a fresh run.
    pub fn reset(&mut self) {
        self.gallery.clear();
        self.status = SessionStatus::Idle;
    }

    /// Submit the current prompt and image for `count` variants. Previous
    /// results are cleared before dispatch and each new result lands in the
    /// gallery as it arrives. Any failure becomes the session status; results
    /// received before a mid-stream failure stay visible.
    pub async fn submit(&mut self, client: &StudioClient, count: u32) -> Result<usize> {
        let request = match self.build_request(client, count) {
            Ok(request) => request,
            Err(e) => {
                self.status = SessionStatus::Failed(e.to_string());
                return Err(e);
            }
        };

        self.gallery.clear();
        let gallery = &mut self.gallery;
        match client.generate(&request, |item| gallery.push(item)).await {
            Ok(produced) => {
                self.status = SessionStatus::Complete { produced };
                Ok(produced)
            }
            Err(e) => {
                self.status = SessionStatus::Failed(e.to_string());
                Err(e)
            }
        }
    }

    fn build_request(&self, client: &StudioClient, count: u32) -> Result<GenerationRequest> {
        let image = self.image.as_ref().ok_or_else(|| {
            StudioError::ValidationError("Please upload or capture an image first".into())
        })?;
        GenerationRequest::new(
            &self.prompt,
            count,
            image.bytes.clone(),
            image.filename.clone(),
            image.mime.clone(),
            client.config().max_count,
        )
    }
}

impl Drop for StudioSession {
    fn drop(&mut self) {
        // A live camera handle must not outlive the session.
        self.stop_camera();
    }
}
