//! HTTP client for the treedrop backend
//!
//! This crate provides:
//! - Request bodies for the backend endpoints
//! - `HttpBackend`, implementing `ChatBackend` and `IngestNotifier`

pub mod client;
pub mod error;
pub mod messages;

pub use client::HttpBackend;
pub use messages::{FileInfoNotice, QueryBody};

/// Chat query without attachments
pub const QUERY_ENDPOINT: &str = "/getuserquery";

/// Chat query about specific files
pub const FILE_QUERY_ENDPOINT: &str = "/getspecificfileinfo";

/// Notice that an ingestion completed
pub const FILE_INFO_ENDPOINT: &str = "/getfileinfo";
