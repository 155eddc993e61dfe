//! Multipart upload client for finished seed documents.
//!
//! The endpoint receives one POST per document: a `file` part carrying the
//! serialized JSON and a `path` field carrying the root-relative location.
//! No retries, authentication, or connection management — failures are
//! reported per file and the batch carries on.

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use thiserror::Error;

/// Errors from one upload attempt.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("network error: {0}")]
    Network(String),

    #[error("endpoint rejected {path}: {status} - {message}")]
    Rejected {
        path: String,
        status: u16,
        message: String,
    },

    #[error("invalid file part: {0}")]
    InvalidPart(String),
}

/// Client bound to one seed endpoint.
pub struct UploadClient {
    client: Client,
    endpoint: String,
}

impl UploadClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// Submit one serialized document as a multipart form.
    pub async fn upload(
        &self,
        rel_path: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<(), UploadError> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/json")
            .map_err(|e| UploadError::InvalidPart(e.to_string()))?;
        let form = Form::new()
            .text("path", rel_path.to_string())
            .part("file", part);

        let resp = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(UploadError::Rejected {
                path: rel_path.to_string(),
                status,
                message,
            });
        }
        Ok(())
    }
}
