//
//  abuseipdb-client
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Transport Executor
//!
//! Executes exactly one [`PreparedRequest`] and captures the response body
//! into a [`RawResponse`]. The outcome is either `Ok` (body captured, possibly
//! empty) or a [`TransportError`]. HTTP error statuses are NOT failures at
//! this layer: AbuseIPDB sends its error documents with 4xx codes and those
//! bodies are decoded like any other.
//!
//! The [`Transport`] trait is the seam between the client and the network.
//! [`HttpTransport`] is the reqwest-backed implementation; tests substitute
//! their own.

use std::borrow::Cow;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use thiserror::Error;
use tracing::trace;

use super::request::{PreparedRequest, RequestBody};

/// Default per-request deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Failure of the transport layer itself (not an HTTP error status).
#[derive(Error, Debug)]
pub enum TransportError {
    /// The request could not be sent: connection refused, DNS, TLS, timeout,
    /// or a header the HTTP stack rejected.
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The response started but its body could not be read to the end.
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    /// Failure reported by a non-reqwest transport.
    #[error("{0}")]
    Failed(String),
}

/// Response body accumulated during a single call.
///
/// Chunks that are empty or consist only of ASCII whitespace are dropped
/// instead of appended. This mirrors long-standing client behaviour; it means
/// whitespace that arrives in a chunk of its own never reaches the decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    status: Option<u16>,
    body: Vec<u8>,
}

impl RawResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty accumulator tagged with the HTTP status it belongs to.
    pub fn with_status(status: u16) -> Self {
        Self {
            status: Some(status),
            body: Vec::new(),
        }
    }

    /// Builds a complete response in one go, passing `body` through
    /// [`push_chunk`](Self::push_chunk).
    pub fn from_body(status: u16, body: impl AsRef<[u8]>) -> Self {
        let mut raw = Self::with_status(status);
        raw.push_chunk(body.as_ref());
        raw
    }

    /// Appends one streamed chunk and returns the number of bytes consumed.
    ///
    /// The whole chunk counts as consumed even when it is dropped.
    pub fn push_chunk(&mut self, chunk: &[u8]) -> usize {
        if !is_blank(chunk) {
            self.body.extend_from_slice(chunk);
        }
        chunk.len()
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// The body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// `true` for empty chunks and chunks made only of C `isspace` characters.
fn is_blank(chunk: &[u8]) -> bool {
    chunk
        .iter()
        .all(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c))
}

/// Performs a single HTTP exchange.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: PreparedRequest) -> Result<RawResponse, TransportError>;
}

/// reqwest-backed [`Transport`].
///
/// Holds one `reqwest::Client` (and therefore one connection pool) for its
/// whole lifetime. Headers and bodies are attached per request, so nothing
/// configured for one call is visible to the next.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    /// Creates a transport with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION))
            .timeout(timeout)
            .build()?;
        Ok(Self { http })
    }

    fn build(&self, request: PreparedRequest) -> Result<reqwest::RequestBuilder, TransportError> {
        let mut builder = self.http.request(request.method.clone(), request.full_url());

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Form(encoded) => builder
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(encoded),
            RequestBody::Multipart(upload) => {
                let part = Part::bytes(upload.contents)
                    .file_name(upload.file_name)
                    .mime_str(upload.mime)
                    .map_err(TransportError::Request)?;

                let form = upload
                    .text_fields
                    .into_iter()
                    .fold(Form::new().part(upload.file_field, part), |form, (name, value)| {
                        form.text(name, value)
                    });

                builder.multipart(form)
            }
        };

        Ok(builder)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: PreparedRequest) -> Result<RawResponse, TransportError> {
        let mut response = self
            .build(request)?
            .send()
            .await
            .map_err(TransportError::Request)?;

        let mut raw = RawResponse::with_status(response.status().as_u16());
        while let Some(chunk) = response.chunk().await.map_err(TransportError::Body)? {
            let consumed = raw.push_chunk(&chunk);
            trace!("received {} byte chunk", consumed);
        }

        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::request::RequestBuilder;
    use mockito::Matcher;

    #[test]
    fn test_accumulator_drops_blank_chunks() {
        let mut raw = RawResponse::new();
        assert_eq!(raw.push_chunk(b"  "), 2);
        assert_eq!(raw.push_chunk(b"data"), 4);
        assert_eq!(raw.push_chunk(b""), 0);
        assert_eq!(raw.text(), "data");
    }

    #[test]
    fn test_accumulator_keeps_whitespace_inside_chunks() {
        let mut raw = RawResponse::new();
        raw.push_chunk(b"{\"a\": ");
        raw.push_chunk(b"\n\t");
        raw.push_chunk(b"1}\n");
        // The lone "\n\t" chunk is dropped; whitespace mixed with data is kept.
        assert_eq!(raw.text(), "{\"a\": 1}\n");
    }

    #[test]
    fn test_from_body_applies_quirk() {
        assert!(RawResponse::from_body(200, " \r\n").is_empty());
        assert_eq!(RawResponse::from_body(204, "x").status(), Some(204));
    }

    #[tokio::test]
    async fn test_http_transport_sends_headers_and_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/check")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("ipAddress".into(), "1.2.3.4".into()),
                Matcher::Regex("verbose".into()),
            ]))
            .match_header("key", "test-key")
            .match_header("accept", "application/json")
            .with_status(200)
            .with_body(r#"{"data":{"ipAddress":"1.2.3.4"}}"#)
            .create_async()
            .await;

        let base = server.url();
        let request = RequestBuilder::new(&base, "test-key").check("1.2.3.4");
        let transport = HttpTransport::new(DEFAULT_TIMEOUT).unwrap();

        let raw = transport.execute(request).await.unwrap();
        assert_eq!(raw.status(), Some(200));
        assert_eq!(raw.text(), r#"{"data":{"ipAddress":"1.2.3.4"}}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_http_transport_posts_form() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/report")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body("ip=1.2.3.4&categories=18%2C22")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let base = server.url();
        let categories = crate::api::ReportCategory::BruteForce | crate::api::ReportCategory::Ssh;
        let request = RequestBuilder::new(&base, "k")
            .report("1.2.3.4", categories, None)
            .unwrap();

        HttpTransport::new(DEFAULT_TIMEOUT)
            .unwrap()
            .execute(request)
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_http_error_status_is_not_a_transport_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("DELETE", "/clear-address")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"errors":[{"detail":"Authentication failed.","status":401}]}"#)
            .create_async()
            .await;

        let base = server.url();
        let request = RequestBuilder::new(&base, "bad").clear_address("1.2.3.4");
        let raw = HttpTransport::new(DEFAULT_TIMEOUT)
            .unwrap()
            .execute(request)
            .await
            .unwrap();

        assert_eq!(raw.status(), Some(401));
        assert!(raw.text().contains("Authentication failed."));
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        // Port 9 (discard) on localhost is expected to refuse connections.
        let request = RequestBuilder::new("http://127.0.0.1:9", "k").check("1.2.3.4");
        let err = HttpTransport::new(Duration::from_secs(5))
            .unwrap()
            .execute(request)
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Request(_)));
    }
}
