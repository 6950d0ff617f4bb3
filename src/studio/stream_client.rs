use crate::{
    config::StudioConfig,
    error::{Result, StudioError},
    models::{GenerationRequest, ResultItem},
    studio::decoder::StreamDecoder,
    studio::single_client::{build_form, transport_error},
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use futures::stream::Stream;
use futures::StreamExt;
use std::pin::Pin;
use std::time::Duration;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Client for the streaming `/hairstyles/stream` endpoint. The response body
/// is newline-delimited JSON decoded incrementally by [`StreamDecoder`].
#[derive(Clone)]
pub struct StreamClient {
    http: reqwest::Client,
    config: StudioConfig,
}

impl StreamClient {
    pub fn new(http: reqwest::Client, config: StudioConfig) -> Self {
        Self { http, config }
    }

    /// Run a streaming generation, handing each decoded image to `sink` as it
    /// arrives. Returns the number of results produced.
    ///
    /// A mid-stream error stops decoding but results already handed to the
    /// sink stay with the caller.
    pub async fn generate<F>(&self, request: &GenerationRequest, mut sink: F) -> Result<usize>
    where
        F: FnMut(ResultItem),
    {
        let url = self.config.stream_url();
        log::info!(
            "Requesting {} hairstyle variants from {}",
            request.count,
            url
        );

        let form = build_form(request)?;
        let response = self
            .http
            .post(&url)
            .multipart(form)
            .timeout(Duration::from_secs(self.config.timeouts.stream_secs))
            .send()
            .await
            .map_err(|e| StudioError::RequestError(format!("Error contacting service: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(transport_error(status, response).await);
        }

        let mut produced = 0usize;
        let mut decoder = StreamDecoder::new();
        let mut emit = |event: crate::models::StreamEvent| {
            // An undecodable payload in an otherwise well-formed record is
            // skipped rather than failing the stream.
            match BASE64.decode(event.image_base64.as_bytes()) {
                Ok(image) => {
                    log::debug!("Decoded variant with index {}", event.index);
                    produced += 1;
                    sink(ResultItem {
                        index: event.index,
                        image,
                    });
                }
                Err(e) => {
                    log::warn!(
                        "Skipping variant with index {}: invalid base64 payload: {}",
                        event.index,
                        e
                    );
                }
            }
        };

        let mut body = response.bytes_stream();
        while let Some(chunk) = body.next().await {
            let chunk = chunk
                .map_err(|e| StudioError::RequestError(format!("Error reading stream: {}", e)))?;
            decoder.push(&chunk, &mut emit)?;
        }
        decoder.finish(&mut emit)?;

        log::info!("Stream complete, {} variants received", produced);
        Ok(produced)
    }

    /// Stream-shaped variant of [`generate`](Self::generate): results arrive
    /// as items of an async stream, with a trailing `Err` if decoding failed.
    pub fn generate_events(
        &self,
        request: GenerationRequest,
    ) -> Pin<Box<dyn Stream<Item = Result<ResultItem>> + Send>> {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let client = self.clone();

        tokio::spawn(async move {
            let sender = tx.clone();
            let outcome = client
                .generate(&request, move |item| {
                    let _ = sender.send(Ok(item));
                })
                .await;
            if let Err(e) = outcome {
                let _ = tx.send(Err(e));
            }
        });

        Box::pin(UnboundedReceiverStream::new(rx))
    }
}
