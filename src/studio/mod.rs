pub mod decoder;
pub mod single_client;
pub mod stream_client;

use crate::{
    config::StudioConfig,
    error::{Result, StudioError},
    models::{GenerationRequest, ResultItem},
};
use std::time::Duration;

pub use decoder::StreamDecoder;
pub use single_client::SingleClient;
pub use stream_client::StreamClient;

/// Client for the hairstyle generation service, aggregating the single-shot
/// and streaming sub-clients over one shared HTTP connection pool.
#[derive(Clone)]
pub struct StudioClient {
    single_client: SingleClient,
    stream_client: StreamClient,
    config: StudioConfig,
}

impl StudioClient {
    pub fn new(config: StudioConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| StudioError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            single_client: SingleClient::new(http.clone(), config.clone()),
            stream_client: StreamClient::new(http, config.clone()),
            config,
        })
    }

    pub fn single(&self) -> &SingleClient {
        &self.single_client
    }

    pub fn stream(&self) -> &StreamClient {
        &self.stream_client
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    /// Dispatch a generation request on the transport its count calls for:
    /// one variant goes through `/hairstyle`, more than one through
    /// `/hairstyles/stream`. Every result is handed to `sink` as soon as it
    /// is available; the return value is the number of results produced.
    pub async fn generate<F>(&self, request: &GenerationRequest, mut sink: F) -> Result<usize>
    where
        F: FnMut(ResultItem),
    {
        if request.count == 1 {
            let item = self.single_client.generate(request).await?;
            sink(item);
            Ok(1)
        } else {
            self.stream_client.generate(request, sink).await
        }
    }
}
