//! HTTP backend client

use std::time::Duration;

use async_trait::async_trait;
use libtreedrop_core::config::BackendConfig;
use libtreedrop_core::{BackendError, ChatBackend, ChatReply, ChatRequest, IngestManifest, IngestNotifier};
use reqwest::{Client, Response};
use serde::Serialize;
use tracing::debug;

use crate::error::from_reqwest;
use crate::messages::FileInfoNotice;
use crate::{FILE_INFO_ENDPOINT, FILE_QUERY_ENDPOINT, QUERY_ENDPOINT};

/// Backend reached over HTTP with JSON bodies. Requests are never retried.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(from_reqwest)?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<T: Serialize + ?Sized>(&self, endpoint: &str, body: &T) -> Result<Response, BackendError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(url = %url, "POST");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, BackendError> {
        let endpoint = if request.has_attachments() {
            FILE_QUERY_ENDPOINT
        } else {
            QUERY_ENDPOINT
        };
        let response = self.post(endpoint, request).await?;
        let text = response.text().await.map_err(from_reqwest)?;
        // Some endpoints answer with an empty or non-object body
        if text.trim().is_empty() {
            return Ok(ChatReply::default());
        }
        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(value) if value.is_object() => {
                serde_json::from_value(value).map_err(|e| BackendError::Decode(e.to_string()))
            }
            Ok(_) => Ok(ChatReply::default()),
            Err(e) => Err(BackendError::Decode(e.to_string())),
        }
    }
}

#[async_trait]
impl IngestNotifier for HttpBackend {
    async fn notify(&self, manifest: &IngestManifest) -> Result<(), BackendError> {
        self.post(FILE_INFO_ENDPOINT, &FileInfoNotice::new(manifest)).await?;
        Ok(())
    }
}
