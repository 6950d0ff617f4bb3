use crate::{
    config::StudioConfig,
    error::{Result, StudioError},
    models::{GenerationRequest, ResultItem},
};
use reqwest::multipart::{Form, Part};
use std::time::Duration;

/// Client for the single-shot `/hairstyle` endpoint. The whole 2xx response
/// body is one opaque image.
#[derive(Clone)]
pub struct SingleClient {
    http: reqwest::Client,
    config: StudioConfig,
}

impl SingleClient {
    pub fn new(http: reqwest::Client, config: StudioConfig) -> Self {
        Self { http, config }
    }

    pub async fn generate(&self, request: &GenerationRequest) -> Result<ResultItem> {
        let url = self.config.single_url();
        log::info!("Requesting single hairstyle from {}", url);

        let form = build_form(request)?;
        let response = self
            .http
            .post(&url)
            .multipart(form)
            .timeout(Duration::from_secs(self.config.timeouts.single_secs))
            .send()
            .await
            .map_err(|e| StudioError::RequestError(format!("Error contacting service: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(transport_error(status, response).await);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StudioError::RequestError(format!("Failed to read image body: {}", e)))?;

        log::info!("Received generated hairstyle ({} bytes)", bytes.len());
        Ok(ResultItem {
            index: 0,
            image: bytes.to_vec(),
        })
    }
}

/// Multipart form shared by both endpoints: `prompt`, `count` (stringified)
/// and the image blob with its original filename and MIME type.
pub(crate) fn build_form(request: &GenerationRequest) -> Result<Form> {
    let part = Part::bytes(request.image.clone())
        .file_name(request.filename.clone())
        .mime_str(&request.mime)
        .map_err(|e| StudioError::RequestError(format!("Invalid image MIME type: {}", e)))?;

    Ok(Form::new()
        .text("prompt", request.prompt.clone())
        .text("count", request.count.to_string())
        .part("image", part))
}

/// Turn a non-2xx response into a transport error carrying the body text, or
/// a generic status message when the body is empty or unreadable.
pub(crate) async fn transport_error(
    status: reqwest::StatusCode,
    response: reqwest::Response,
) -> StudioError {
    let detail = match response.text().await {
        Ok(body) if !body.trim().is_empty() => body,
        _ => "No details provided.".to_string(),
    };
    StudioError::TransportError(format!(
        "Request failed with status {}: {}",
        status.as_u16(),
        detail
    ))
}
