//
//  abuseipdb-client
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client for the AbuseIPDB API
//!
//! [`AbuseIpDbClient`] composes the request builder, the transport and the
//! decoder into one method per endpoint. Every call follows the same path:
//!
//! ```text
//! Idle -> Configuring (URL, headers, body)
//!      -> Executing   (network I/O)
//!      -> Decoding    (skipped on transport failure)
//!      -> Idle
//! ```
//!
//! Per-call state lives only inside the call. The transport handle is created
//! once, at construction, and dropped with the client.
//!
//! ## Results
//!
//! | Outcome | JSON endpoints | Plaintext blacklist |
//! |---------|----------------|---------------------|
//! | Parsed | `Ok(document)` | `Ok(pretty JSON)` |
//! | Unparseable body | `Ok(Value::Null)` | `Ok(raw text)` |
//! | Transport failure | `Err(ApiError::Transport)` | `Err(ApiError::Transport)` |
//! | Bad arguments | `Err(..)` before any I/O | n/a |

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error};

use super::categories::CategorySet;
use super::common::ApiError;
use super::decode::{decode_json, decode_plaintext};
use super::request::{
    encode_params, BlacklistQuery, PreparedRequest, RequestBody, RequestBuilder, DEFAULT_BASE_URL,
};
use super::transport::{HttpTransport, RawResponse, Transport, DEFAULT_TIMEOUT};

/// Construction options for [`AbuseIpDbClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// API base URL, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout applied by the transport.
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Client bound to a single API key.
///
/// # Example
///
/// ```rust,no_run
/// use abuseipdb_client::api::{AbuseIpDbClient, ReportCategory};
///
/// # async fn example() -> Result<(), abuseipdb_client::api::ApiError> {
/// let client = AbuseIpDbClient::new("my-api-key")?;
///
/// let check = client.check_ip_address("118.25.6.39").await?;
/// println!("{}", check["data"]["abuseConfidenceScore"]);
///
/// client
///     .report_ip(
///         "118.25.6.39",
///         ReportCategory::BruteForce | ReportCategory::Ssh,
///         Some("sshd: 40 failed logins"),
///     )
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct AbuseIpDbClient {
    api_key: String,
    base_url: String,
    transport: Box<dyn Transport>,
}

impl fmt::Debug for AbuseIpDbClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AbuseIpDbClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl AbuseIpDbClient {
    /// Creates a client for the public API with default options.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] if the HTTP stack cannot be initialised
    /// (for example, no TLS backend available).
    pub fn new(api_key: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_options(api_key, ClientOptions::default())
    }

    /// Creates a client using a reqwest transport configured from `options`.
    pub fn with_options(api_key: impl Into<String>, options: ClientOptions) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(options.timeout).map_err(ApiError::ClientBuild)?;
        Ok(Self::with_transport(api_key, transport).with_base_url(options.base_url))
    }

    /// Creates a client on top of an arbitrary [`Transport`].
    pub fn with_transport(api_key: impl Into<String>, transport: impl Transport + 'static) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            transport: Box::new(transport),
        }
    }

    /// Points the client at a different base URL (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn requests(&self) -> RequestBuilder<'_> {
        RequestBuilder::new(&self.base_url, &self.api_key)
    }

    /// Runs one prepared request through the transport.
    async fn execute(&self, request: PreparedRequest) -> Result<RawResponse, ApiError> {
        debug!("Connecting to {} {}", request.method, request.full_url());
        if let RequestBody::Form(_) = &request.body {
            debug!("Post fields: {}", encode_params(&request.form));
        }

        let endpoint = request.endpoint;
        let raw = self.transport.execute(request).await.map_err(|e| {
            error!("Request to {} failed: {}", endpoint.path(), e);
            ApiError::Transport(e)
        })?;

        debug!(
            "{} answered with status {:?} ({} bytes)",
            endpoint.path(),
            raw.status(),
            raw.body().len()
        );
        Ok(raw)
    }

    async fn execute_json(&self, request: PreparedRequest) -> Result<Value, ApiError> {
        let endpoint = request.endpoint;
        let raw = self.execute(request).await?;
        Ok(decode_json(endpoint, &raw).into_document())
    }

    /// Reports a single IP address.
    ///
    /// `comment` is sent only when non-empty. Strip personal information from
    /// it before calling; AbuseIPDB publishes comments.
    ///
    /// # Errors
    ///
    /// - [`ApiError::EmptyCategories`] / [`ApiError::CategoryDecode`] before any I/O
    /// - [`ApiError::Transport`] if the request could not be completed
    pub async fn report_ip(
        &self,
        ip_address: &str,
        categories: CategorySet,
        comment: Option<&str>,
    ) -> Result<Value, ApiError> {
        let request = self.requests().report(ip_address, categories, comment)?;
        self.execute_json(request).await
    }

    /// Checks whether a single IP address has been reported (verbose mode).
    pub async fn check_ip_address(&self, ip_address: &str) -> Result<Value, ApiError> {
        self.execute_json(self.requests().check(ip_address)).await
    }

    /// Checks a network in CIDR notation, e.g. `193.41.200.0` / `24`.
    pub async fn check_block(&self, network_address: &str, cidr: u8) -> Result<Value, ApiError> {
        self.execute_json(self.requests().check_block(network_address, cidr))
            .await
    }

    /// Removes every report of `ip_address` made with this API key.
    pub async fn clear_ip_address(&self, ip_address: &str) -> Result<Value, ApiError> {
        self.execute_json(self.requests().clear_address(ip_address))
            .await
    }

    /// Uploads a bulk-report CSV.
    ///
    /// # Errors
    ///
    /// - [`ApiError::BulkFileInvalid`] / [`ApiError::BulkFileUnreadable`] before any I/O
    /// - [`ApiError::Transport`] if the upload could not be completed
    pub async fn bulk_report(&self, csv: impl AsRef<Path>) -> Result<Value, ApiError> {
        let request = self.requests().bulk_report(csv.as_ref())?;
        self.execute_json(request).await
    }

    /// Fetches the blacklist as JSON.
    pub async fn blacklist(&self, query: &BlacklistQuery) -> Result<Value, ApiError> {
        self.execute_json(self.requests().blacklist(query, false))
            .await
    }

    /// Fetches the blacklist as plain text, one address per line.
    pub async fn blacklist_plaintext(&self, query: &BlacklistQuery) -> Result<String, ApiError> {
        let raw = self.execute(self.requests().blacklist(query, true)).await?;
        Ok(decode_plaintext(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::categories::ReportCategory;
    use crate::api::request::Endpoint;
    use crate::api::transport::TransportError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    /// In-memory transport that records requests and replays canned outcomes.
    #[derive(Clone, Default)]
    struct FakeTransport {
        seen: Arc<Mutex<Vec<PreparedRequest>>>,
        reply: Option<(u16, Vec<Vec<u8>>)>,
    }

    impl FakeTransport {
        fn replying(status: u16, chunks: &[&str]) -> Self {
            Self {
                seen: Arc::default(),
                reply: Some((status, chunks.iter().map(|c| c.as_bytes().to_vec()).collect())),
            }
        }

        fn failing() -> Self {
            Self::default()
        }

        fn calls(&self) -> Vec<PreparedRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn execute(&self, request: PreparedRequest) -> Result<RawResponse, TransportError> {
            self.seen.lock().unwrap().push(request);
            match &self.reply {
                Some((status, chunks)) => {
                    let mut raw = RawResponse::with_status(*status);
                    for chunk in chunks {
                        raw.push_chunk(chunk);
                    }
                    Ok(raw)
                }
                None => Err(TransportError::Failed("could not resolve host".into())),
            }
        }
    }

    fn client(transport: &FakeTransport) -> AbuseIpDbClient {
        AbuseIpDbClient::with_transport("key-123", transport.clone())
    }

    #[tokio::test]
    async fn test_check_decodes_document() {
        let transport = FakeTransport::replying(200, &[r#"{"ip":"1.2.3.4"}"#]);
        let doc = client(&transport).check_ip_address("1.2.3.4").await.unwrap();

        assert_eq!(doc["ip"], "1.2.3.4");
        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].endpoint, Endpoint::Check);
        assert_eq!(calls[0].header_values("Key"), vec!["key-123"]);
    }

    #[tokio::test]
    async fn test_transport_failure_short_circuits() {
        let transport = FakeTransport::failing();
        let err = client(&transport).check_block("10.0.0.0", 8).await.unwrap_err();

        assert!(matches!(err, ApiError::Transport(TransportError::Failed(_))));
        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_on_plaintext_is_an_error() {
        let transport = FakeTransport::failing();
        let result = client(&transport)
            .blacklist_plaintext(&BlacklistQuery::default())
            .await;
        assert!(matches!(result, Err(ApiError::Transport(_))));
    }

    #[tokio::test]
    async fn test_unparseable_body_yields_null() {
        let transport = FakeTransport::replying(500, &["Internal Server Error"]);
        let doc = client(&transport).clear_ip_address("1.2.3.4").await.unwrap();
        assert_eq!(doc, Value::Null);
    }

    #[tokio::test]
    async fn test_plaintext_blacklist_returned_verbatim() {
        let transport = FakeTransport::replying(200, &["1.2.3.4\n", "5.6.7.8\n"]);
        let text = client(&transport)
            .blacklist_plaintext(&BlacklistQuery::default())
            .await
            .unwrap();

        assert_eq!(text, "1.2.3.4\n5.6.7.8\n");
        assert_eq!(
            transport.calls()[0].header_values("accept"),
            vec!["application/json", "text/plain"]
        );
    }

    #[tokio::test]
    async fn test_report_with_empty_categories_never_hits_transport() {
        let transport = FakeTransport::replying(200, &["{}"]);
        let err = client(&transport)
            .report_ip("1.2.3.4", CategorySet::EMPTY, None)
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::EmptyCategories));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_bulk_report_bad_paths_never_hit_transport() {
        let transport = FakeTransport::replying(200, &["{}"]);
        let dir = tempfile::tempdir().unwrap();

        let missing = client(&transport)
            .bulk_report(dir.path().join("missing.csv"))
            .await
            .unwrap_err();
        let directory = client(&transport).bulk_report(dir.path()).await.unwrap_err();

        assert!(matches!(missing, ApiError::BulkFileInvalid(_)));
        assert!(matches!(directory, ApiError::BulkFileInvalid(_)));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_report_sends_form() {
        let transport = FakeTransport::replying(
            200,
            &[r#"{"data":{"ipAddress":"1.2.3.4","abuseConfidenceScore":52}}"#],
        );
        let doc = client(&transport)
            .report_ip("1.2.3.4", ReportCategory::PortScan | ReportCategory::Hacking, Some("scan"))
            .await
            .unwrap();

        assert_eq!(doc["data"]["abuseConfidenceScore"], 52);
        assert_eq!(
            transport.calls()[0].body,
            RequestBody::Form("ip=1.2.3.4&categories=14%2C15&comment=scan".into())
        );
    }

    #[tokio::test]
    async fn test_calls_do_not_share_state() {
        let transport = FakeTransport::replying(200, &[r#"{"data":[]}"#]);
        let client = client(&transport);

        client
            .blacklist_plaintext(&BlacklistQuery::default())
            .await
            .unwrap();
        client.blacklist(&BlacklistQuery::default()).await.unwrap();

        let calls = transport.calls();
        assert_eq!(calls[1].header_values("accept"), vec!["application/json"]);
        assert!(calls[1].param("plaintext").is_none());
    }

    #[tokio::test]
    async fn test_against_http_server() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/blacklist")
            .match_query(mockito::Matcher::UrlEncoded(
                "onlyCountries".into(),
                "US,CA".into(),
            ))
            .match_header("key", "key-123")
            .with_status(200)
            .with_body(r#"{"meta":{"generatedAt":"2024-01-01T00:00:00+00:00"},"data":[]}"#)
            .create_async()
            .await;

        let options = ClientOptions {
            base_url: format!("{}/", server.url()),
            ..ClientOptions::default()
        };
        let client = AbuseIpDbClient::with_options("key-123", options).unwrap();
        let query = BlacklistQuery::default()
            .with_only_countries(["US", "CA"])
            .with_except_countries(["DE"]);

        let doc = client.blacklist(&query).await.unwrap();
        assert_eq!(doc["data"], json!([]));
        mock.assert_async().await;
    }

    #[test]
    fn test_debug_redacts_key() {
        let client = client(&FakeTransport::default());
        let printed = format!("{client:?}");
        assert!(!printed.contains("key-123"));
        assert!(printed.contains("redacted"));
    }
}
