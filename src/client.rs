//! HTTP client for the cracking-demo backend.
//!
//! The backend exposes one non-streaming endpoint (`/gui`) and three streaming
//! plain-text endpoints (`/demo`, `/test`, `/plot`). Streaming calls verify the
//! HTTP status before handing back the body, so a failed open is always a
//! `Network` error and anything after the first chunk is a `StreamRead` error.

use crate::stream::FetchError;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Body of a streaming response, one `Bytes` item per transport chunk.
pub type ChunkStream = BoxStream<'static, Result<Bytes, FetchError>>;

/// Response of the non-streaming `/gui` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuiStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let base: String = base_url.into();
        Ok(Self {
            http,
            base_url: base.trim_end_matches('/').to_string(),
        })
    }

    /// Launch the GUI application on the backend host. Single JSON response,
    /// nothing streamed.
    pub async fn launch_gui(&self) -> Result<GuiStatus, FetchError> {
        let url = format!("{}/gui", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Network(format!("{url} returned {status}")));
        }
        response
            .json::<GuiStatus>()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))
    }

    /// Run the command-line demo, streaming its output.
    pub async fn run_demo(&self) -> Result<ChunkStream, FetchError> {
        self.open_stream("/demo", &[]).await
    }

    /// Run the quick verification test, streaming its output.
    pub async fn run_quick_test(&self) -> Result<ChunkStream, FetchError> {
        self.open_stream("/test", &[]).await
    }

    /// Run the performance benchmark with the given CUDA lookup time.
    pub async fn plot_performance(&self, time_ms: f64) -> Result<ChunkStream, FetchError> {
        self.open_stream("/plot", &[("time_ms", time_ms.to_string())])
            .await
    }

    async fn open_stream(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<ChunkStream, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Network(format!("{url} returned {status}")));
        }
        debug!("opened stream {} ({})", url, status);
        Ok(response
            .bytes_stream()
            .map(|item| item.map_err(|e| FetchError::StreamRead(e.to_string())))
            .boxed())
    }
}
