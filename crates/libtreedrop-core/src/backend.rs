//! Backend collaborator interfaces
//!
//! The chat/report backend and the indexing endpoint live outside this
//! crate. `libtreedrop-http` provides the HTTP implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ingest::IngestManifest;

/// Errors returned by backend collaborators
#[derive(Debug, Error)]
pub enum BackendError {
    /// Request could not be sent or timed out
    #[error("request failed: {0}")]
    Request(String),

    /// Backend answered with a non-success status
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body could not be decoded
    #[error("invalid response: {0}")]
    Decode(String),
}

/// File reference sent along with a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    pub name: String,
}

/// A chat query, optionally about specific files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub data: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<AttachmentRef>,
    pub feedback: u8,
}

impl ChatRequest {
    pub fn has_attachments(&self) -> bool {
        !self.files.is_empty()
    }
}

/// Backend answer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub response: Option<String>,
}

/// Answers chat queries
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, BackendError>;
}

/// Receives the fire-and-forget notice that an ingestion completed
#[async_trait]
pub trait IngestNotifier: Send + Sync {
    async fn notify(&self, manifest: &IngestManifest) -> Result<(), BackendError>;
}
