//! Wire bodies sent to the backend

use libtreedrop_core::{ChatRequest, IngestManifest};
use serde::Serialize;

/// Body of both chat endpoints
pub type QueryBody = ChatRequest;

/// Body of the ingestion notice
#[derive(Debug, Clone, Serialize)]
pub struct FileInfoNotice<'a> {
    /// Root path of the ingested tree
    pub data: &'a str,
    pub manifest: &'a IngestManifest,
}

impl<'a> FileInfoNotice<'a> {
    pub fn new(manifest: &'a IngestManifest) -> Self {
        Self {
            data: &manifest.root,
            manifest,
        }
    }
}
