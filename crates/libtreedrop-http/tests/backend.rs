//! HTTP backend tests against a mock server

use std::sync::Arc;

use libtreedrop_core::config::BackendConfig;
use libtreedrop_core::host::MemoryHost;
use libtreedrop_core::{
    AttachmentRef, BackendError, ChatBackend, ChatRequest, IngestNotifier, Ingestor,
};
use libtreedrop_http::HttpBackend;
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend(server: &MockServer) -> HttpBackend {
    let config = BackendConfig {
        base_url: format!("{}/", server.uri()),
        timeout_ms: 5_000,
        notify_on_ingest: true,
    };
    HttpBackend::new(&config).unwrap()
}

fn query(data: &str, files: &[&str]) -> ChatRequest {
    ChatRequest {
        data: data.to_string(),
        files: files
            .iter()
            .map(|name| AttachmentRef {
                name: name.to_string(),
            })
            .collect(),
        feedback: 1,
    }
}

#[tokio::test]
async fn test_plain_query_hits_user_query_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/getuserquery"))
        .and(body_json(json!({"data": "hello", "feedback": 1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "hi there"})))
        .expect(1)
        .mount(&server)
        .await;

    let reply = backend(&server).send(&query("hello", &[])).await.unwrap();
    assert_eq!(reply.response.as_deref(), Some("hi there"));
}

#[tokio::test]
async fn test_query_with_files_hits_file_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/getspecificfileinfo"))
        .and(body_json(json!({
            "data": "",
            "files": [{"name": "a.txt"}, {"name": "c.txt"}],
            "feedback": 1
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "two files"})))
        .expect(1)
        .mount(&server)
        .await;

    let reply = backend(&server).send(&query("", &["a.txt", "c.txt"])).await.unwrap();
    assert_eq!(reply.response.as_deref(), Some("two files"));
}

#[tokio::test]
async fn test_reply_without_response_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/getspecificfileinfo"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let reply = backend(&server).send(&query("x", &["a.txt"])).await.unwrap();
    assert!(reply.response.is_none());
}

#[tokio::test]
async fn test_server_error_maps_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/getuserquery"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let err = backend(&server).send(&query("hello", &[])).await.unwrap_err();
    match err {
        BackendError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_garbage_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/getuserquery"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let err = backend(&server).send(&query("hello", &[])).await.unwrap_err();
    assert!(matches!(err, BackendError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_backend_is_request_error() {
    let config = BackendConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        timeout_ms: 2_000,
        notify_on_ingest: false,
    };
    let err = HttpBackend::new(&config)
        .unwrap()
        .send(&query("hello", &[]))
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::Request(_)));
}

#[tokio::test]
async fn test_ingestion_notice_carries_manifest() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/getfileinfo"))
        .and(body_partial_json(json!({
            "data": "/",
            "manifest": {
                "root": "/",
                "file_count": 2,
                "total_bytes": 15,
                "files": [
                    {"path": "/a.txt", "name": "a.txt", "size": 10, "type": "text/plain"},
                    {"path": "/b/c.txt", "name": "c.txt", "size": 5, "type": "text/plain"}
                ]
            }
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let host = MemoryHost::new()
        .typed_file("/a.txt", &[0; 10], "text/plain")
        .typed_file("/b/c.txt", &[0; 5], "text/plain");
    let ingestor = Ingestor::new().with_notifier(Arc::new(backend(&server)));
    let ingestion = ingestor.ingest(&host, host.drop_event()).await;
    ingestor.flush_notices().await;

    assert_eq!(ingestion.files.len(), 2);
    backend(&server).notify(&ingestion.manifest()).await.unwrap();
}
