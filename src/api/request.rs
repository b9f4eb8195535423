//
//  abuseipdb-client
//  api/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Request Construction
//!
//! Turns typed endpoint parameters into a [`PreparedRequest`]: method, URL,
//! escaped query or form body, and header list. Nothing here touches the
//! network, so every caller-input check happens before a transport is involved.
//!
//! ## Escaping
//!
//! Each parameter value is escaped on its own with [`escape`], which is the
//! `application/x-www-form-urlencoded` serializer from the `url` crate. reqwest
//! uses the same serializer for its own query and form encoding, so values
//! escaped here and values escaped by the transport agree on the wire.
//!
//! ## Endpoints
//!
//! | Endpoint | Method | Parameters |
//! |----------|--------|------------|
//! | `/report` | POST form | `ip`, `categories`, `comment` |
//! | `/check` | GET | `ipAddress`, `verbose` |
//! | `/check-block` | GET | `network` |
//! | `/clear-address` | DELETE | `ipAddress`, `verbose` |
//! | `/bulk-report` | POST multipart | `csv`, `submit=send` |
//! | `/blacklist` | GET | `confidenceMinimum`, `limit`, `onlyCountries` or `exceptCountries`, `plaintext` |

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use reqwest::Method;

use super::categories::CategorySet;
use super::common::ApiError;

/// Base URL of the AbuseIPDB v2 API.
pub const DEFAULT_BASE_URL: &str = "https://api.abuseipdb.com/api/v2";

/// Blacklist size available to standard accounts.
pub const MAX_IPS_STANDARD: usize = 10_000;
/// Blacklist size available to basic subscriptions.
pub const MAX_IPS_BASIC_SUB: usize = 100_000;
/// Blacklist size available to premium subscriptions.
pub const MAX_IPS_PREMIUM_SUB: usize = 500_000;

/// Name of the authentication header.
pub const API_KEY_HEADER: &str = "Key";

const ACCEPT: &str = "Accept";
const ACCEPT_JSON: &str = "application/json";
const ACCEPT_PLAINTEXT: &str = "text/plain";

/// The REST endpoints this client speaks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Report,
    Check,
    CheckBlock,
    ClearAddress,
    BulkReport,
    Blacklist,
}

impl Endpoint {
    /// Path relative to the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::Report => "/report",
            Self::Check => "/check",
            Self::CheckBlock => "/check-block",
            Self::ClearAddress => "/clear-address",
            Self::BulkReport => "/bulk-report",
            Self::Blacklist => "/blacklist",
        }
    }

    pub fn method(self) -> Method {
        match self {
            Self::Report | Self::BulkReport => Method::POST,
            Self::ClearAddress => Method::DELETE,
            Self::Check | Self::CheckBlock | Self::Blacklist => Method::GET,
        }
    }
}

/// A single query or form parameter.
///
/// A parameter without a value is a bare flag (`&verbose`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: &'static str,
    pub value: Option<String>,
}

impl Param {
    pub fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: Some(value.into()),
        }
    }

    pub fn flag(name: &'static str) -> Self {
        Self { name, value: None }
    }
}

/// Percent-encodes a single parameter value.
///
/// # Example
///
/// ```rust
/// use abuseipdb_client::api::request::escape;
///
/// assert_eq!(escape("1.2.3.0/24"), "1.2.3.0%2F24");
/// assert_eq!(escape("18,22"), "18%2C22");
/// ```
pub fn escape(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Joins parameters into `name=value&flag` form, escaping each value.
pub fn encode_params(params: &[Param]) -> String {
    params
        .iter()
        .map(|param| match &param.value {
            Some(value) => format!("{}={}", param.name, escape(value)),
            None => param.name.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// A file upload for the bulk-report endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartUpload {
    pub file_field: &'static str,
    pub file_name: String,
    pub mime: &'static str,
    pub contents: Vec<u8>,
    pub text_fields: Vec<(&'static str, String)>,
}

/// Request body variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Empty,
    /// Pre-encoded `application/x-www-form-urlencoded` body.
    Form(String),
    Multipart(MultipartUpload),
}

/// Everything the transport needs to perform one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub endpoint: Endpoint,
    pub method: Method,
    /// Endpoint URL without the query string.
    pub url: String,
    /// Query parameters (GET and DELETE endpoints).
    pub query: Vec<Param>,
    /// Form parameters (the report endpoint); already encoded into `body`.
    pub form: Vec<Param>,
    /// Headers in the order they are sent. Overrides are appended, never merged.
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl PreparedRequest {
    /// The endpoint URL including the escaped query string.
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            self.url.clone()
        } else {
            format!("{}?{}", self.url, encode_params(&self.query))
        }
    }

    /// All values of a header, in send order. Lookup is case-insensitive.
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// Looks up a query or form parameter by name.
    pub fn param(&self, name: &str) -> Option<&Param> {
        self.query
            .iter()
            .chain(self.form.iter())
            .find(|param| param.name == name)
    }
}

/// Options for fetching a blacklist.
///
/// `only_countries` wins whenever it is non-empty; `except_countries` is then
/// ignored without complaint.
///
/// # Example
///
/// ```rust
/// use abuseipdb_client::api::BlacklistQuery;
///
/// let query = BlacklistQuery::default()
///     .with_limit(500)
///     .with_minimum_confidence(90)
///     .with_only_countries(["US", "CA"]);
/// assert_eq!(query.limit, 500);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlacklistQuery {
    /// Maximum number of entries returned.
    pub limit: usize,
    /// Minimum abuse confidence score, 0-100.
    pub minimum_confidence: u8,
    /// Only include these country codes.
    pub only_countries: Vec<String>,
    /// Include every country except these.
    pub except_countries: Vec<String>,
}

impl Default for BlacklistQuery {
    fn default() -> Self {
        Self {
            limit: MAX_IPS_BASIC_SUB,
            minimum_confidence: 100,
            only_countries: Vec::new(),
            except_countries: Vec::new(),
        }
    }
}

impl BlacklistQuery {
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_minimum_confidence(mut self, minimum_confidence: u8) -> Self {
        self.minimum_confidence = minimum_confidence;
        self
    }

    pub fn with_only_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only_countries = countries.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_except_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.except_countries = countries.into_iter().map(Into::into).collect();
        self
    }

    /// The single country-filter parameter sent with the request.
    pub fn country_param(&self) -> Param {
        if self.only_countries.is_empty() {
            Param::new("exceptCountries", self.except_countries.join(","))
        } else {
            Param::new("onlyCountries", self.only_countries.join(","))
        }
    }

    /// Query parameters for the blacklist endpoint.
    pub fn params(&self, plaintext: bool) -> Vec<Param> {
        let mut params = vec![
            Param::new("confidenceMinimum", self.minimum_confidence.to_string()),
            Param::new("limit", self.limit.to_string()),
            self.country_param(),
        ];
        if plaintext {
            params.push(Param::flag("plaintext"));
        }
        params
    }
}

/// Builds [`PreparedRequest`]s for one base URL and API key.
#[derive(Debug, Clone, Copy)]
pub struct RequestBuilder<'a> {
    base_url: &'a str,
    api_key: &'a str,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(base_url: &'a str, api_key: &'a str) -> Self {
        Self { base_url, api_key }
    }

    /// Default headers followed by `overrides`, in that order.
    pub fn headers(&self, overrides: &[(&str, &str)]) -> Vec<(String, String)> {
        let mut headers = vec![
            (API_KEY_HEADER.to_string(), self.api_key.to_string()),
            (ACCEPT.to_string(), ACCEPT_JSON.to_string()),
        ];
        headers.extend(
            overrides
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string())),
        );
        headers
    }

    fn prepare(&self, endpoint: Endpoint, overrides: &[(&str, &str)]) -> PreparedRequest {
        PreparedRequest {
            endpoint,
            method: endpoint.method(),
            url: format!("{}{}", self.base_url, endpoint.path()),
            query: Vec::new(),
            form: Vec::new(),
            headers: self.headers(overrides),
            body: RequestBody::Empty,
        }
    }

    /// `POST /report`
    ///
    /// # Errors
    ///
    /// - [`ApiError::EmptyCategories`] if `categories` is empty
    /// - [`ApiError::CategoryDecode`] if it holds only unknown bits
    pub fn report(
        &self,
        ip_address: &str,
        categories: CategorySet,
        comment: Option<&str>,
    ) -> Result<PreparedRequest, ApiError> {
        if categories.is_empty() {
            return Err(ApiError::EmptyCategories);
        }

        let codes = categories.to_param();
        if codes.is_empty() {
            return Err(ApiError::CategoryDecode(categories.bits()));
        }

        let mut form = vec![Param::new("ip", ip_address), Param::new("categories", codes)];
        if let Some(comment) = comment.filter(|c| !c.is_empty()) {
            form.push(Param::new("comment", comment));
        }

        let mut request = self.prepare(Endpoint::Report, &[]);
        request.body = RequestBody::Form(encode_params(&form));
        request.form = form;
        Ok(request)
    }

    /// `GET /check?ipAddress=..&verbose`
    pub fn check(&self, ip_address: &str) -> PreparedRequest {
        let mut request = self.prepare(Endpoint::Check, &[]);
        request.query = vec![Param::new("ipAddress", ip_address), Param::flag("verbose")];
        request
    }

    /// `GET /check-block?network=addr/cidr`
    pub fn check_block(&self, network_address: &str, cidr: u8) -> PreparedRequest {
        let mut request = self.prepare(Endpoint::CheckBlock, &[]);
        request.query = vec![Param::new("network", format!("{}/{}", network_address, cidr))];
        request
    }

    /// `DELETE /clear-address?ipAddress=..&verbose`
    pub fn clear_address(&self, ip_address: &str) -> PreparedRequest {
        let mut request = self.prepare(Endpoint::ClearAddress, &[]);
        request.query = vec![Param::new("ipAddress", ip_address), Param::flag("verbose")];
        request
    }

    /// `POST /bulk-report` with the CSV at `csv` attached as field `csv`.
    ///
    /// The file is read here, so a missing or unreadable file is reported
    /// before any request is made.
    ///
    /// # Errors
    ///
    /// - [`ApiError::BulkFileInvalid`] if the path is missing or not a regular file
    /// - [`ApiError::BulkFileUnreadable`] if it cannot be read
    pub fn bulk_report(&self, csv: &Path) -> Result<PreparedRequest, ApiError> {
        match fs::metadata(csv) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Err(ApiError::BulkFileInvalid(csv.to_path_buf())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ApiError::BulkFileInvalid(csv.to_path_buf()))
            }
            Err(source) => {
                return Err(ApiError::BulkFileUnreadable {
                    path: csv.to_path_buf(),
                    source,
                })
            }
        }

        let contents = fs::read(csv).map_err(|source| ApiError::BulkFileUnreadable {
            path: csv.to_path_buf(),
            source,
        })?;

        let file_name = csv
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "report.csv".to_string());

        let mut request = self.prepare(Endpoint::BulkReport, &[]);
        request.body = RequestBody::Multipart(MultipartUpload {
            file_field: "csv",
            file_name,
            mime: "text/csv",
            contents,
            text_fields: vec![("submit", "send".to_string())],
        });
        Ok(request)
    }

    /// `GET /blacklist`, JSON or plaintext.
    pub fn blacklist(&self, query: &BlacklistQuery, plaintext: bool) -> PreparedRequest {
        let overrides: &[(&str, &str)] = if plaintext {
            &[(ACCEPT, ACCEPT_PLAINTEXT)]
        } else {
            &[]
        };

        let mut request = self.prepare(Endpoint::Blacklist, overrides);
        request.query = query.params(plaintext);
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::categories::ReportCategory;
    use std::io::Write;

    const BASE: &str = "https://api.abuseipdb.com/api/v2";

    fn builder() -> RequestBuilder<'static> {
        RequestBuilder::new(BASE, "secret-key")
    }

    #[test]
    fn test_escape_matches_form_encoding() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a b&c=d"), "a+b%26c%3Dd");
        assert_eq!(escape("2001:db8::1"), "2001%3Adb8%3A%3A1");
    }

    #[test]
    fn test_default_headers() {
        let request = builder().check("1.2.3.4");
        assert_eq!(request.header_values("key"), vec!["secret-key"]);
        assert_eq!(request.header_values("accept"), vec!["application/json"]);
    }

    #[test]
    fn test_overrides_are_appended_not_merged() {
        let headers = builder().headers(&[("Accept", "text/plain"), ("X-Extra", "1")]);
        let names: Vec<&str> = headers.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["Key", "Accept", "Accept", "X-Extra"]);
    }

    #[test]
    fn test_report_body() {
        let request = builder()
            .report(
                "1.2.3.4",
                ReportCategory::BruteForce | ReportCategory::Ssh,
                Some("failed login & scan"),
            )
            .unwrap();

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.full_url(), format!("{BASE}/report"));
        assert_eq!(
            request.body,
            RequestBody::Form("ip=1.2.3.4&categories=18%2C22&comment=failed+login+%26+scan".into())
        );
    }

    #[test]
    fn test_report_without_comment_omits_param() {
        let request = builder()
            .report("1.2.3.4", ReportCategory::PortScan.into(), None)
            .unwrap();
        assert!(request.param("comment").is_none());
        assert_eq!(request.body, RequestBody::Form("ip=1.2.3.4&categories=14".into()));
    }

    #[test]
    fn test_report_rejects_empty_categories() {
        let err = builder().report("1.2.3.4", CategorySet::EMPTY, None).unwrap_err();
        assert!(matches!(err, ApiError::EmptyCategories));
    }

    #[test]
    fn test_report_rejects_undecodable_categories() {
        let err = builder()
            .report("1.2.3.4", CategorySet::from_bits(1 << 30), None)
            .unwrap_err();
        assert!(matches!(err, ApiError::CategoryDecode(bits) if bits == 1 << 30));
    }

    #[test]
    fn test_check_query() {
        let request = builder().check("1.2.3.4");
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.full_url(), format!("{BASE}/check?ipAddress=1.2.3.4&verbose"));
    }

    #[test]
    fn test_check_block_escapes_network_as_one_unit() {
        let request = builder().check_block("193.41.200.0", 24);
        assert_eq!(
            request.full_url(),
            format!("{BASE}/check-block?network=193.41.200.0%2F24")
        );
    }

    #[test]
    fn test_clear_address_uses_delete() {
        let request = builder().clear_address("::1");
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.full_url(), format!("{BASE}/clear-address?ipAddress=%3A%3A1&verbose"));
    }

    #[test]
    fn test_blacklist_only_countries_take_precedence() {
        let query = BlacklistQuery::default()
            .with_only_countries(["US", "CA"])
            .with_except_countries(["DE"]);
        let request = builder().blacklist(&query, false);

        assert_eq!(
            request.param("onlyCountries").and_then(|p| p.value.as_deref()),
            Some("US,CA")
        );
        assert!(request.param("exceptCountries").is_none());
    }

    #[test]
    fn test_blacklist_defaults() {
        let request = builder().blacklist(&BlacklistQuery::default(), false);
        assert_eq!(
            request.full_url(),
            format!("{BASE}/blacklist?confidenceMinimum=100&limit=100000&exceptCountries=")
        );
    }

    #[test]
    fn test_blacklist_plaintext() {
        let query = BlacklistQuery::default().with_except_countries(["DE", "FR"]);
        let request = builder().blacklist(&query, true);

        assert!(request.full_url().ends_with("exceptCountries=DE%2CFR&plaintext"));
        assert_eq!(
            request.header_values("accept"),
            vec!["application/json", "text/plain"]
        );
    }

    #[test]
    fn test_bulk_report_missing_file() {
        let err = builder()
            .bulk_report(Path::new("/definitely/not/here.csv"))
            .unwrap_err();
        assert!(matches!(err, ApiError::BulkFileInvalid(_)));
    }

    #[test]
    fn test_bulk_report_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = builder().bulk_report(dir.path()).unwrap_err();
        assert!(matches!(err, ApiError::BulkFileInvalid(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_bulk_report_uninspectable_path_is_unreadable() {
        // A regular file used as a directory component fails with ENOTDIR,
        // which is neither "missing" nor "not a file".
        let file = tempfile::NamedTempFile::new().unwrap();
        let csv = file.path().join("report.csv");

        let err = builder().bulk_report(&csv).unwrap_err();
        match err {
            ApiError::BulkFileUnreadable { path, source } => {
                assert_eq!(path, csv);
                assert_ne!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected unreadable file, got {other:?}"),
        }
        assert!(builder().bulk_report(&csv).unwrap_err().is_input_error());
    }

    #[test]
    fn test_bulk_report_reads_file() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "IP,Categories,ReportDate,Comment").unwrap();
        writeln!(file, "1.2.3.4,\"18,22\",2024-01-01T00:00:00Z,ssh").unwrap();

        let request = builder().bulk_report(file.path()).unwrap();
        match request.body {
            RequestBody::Multipart(upload) => {
                assert_eq!(upload.file_field, "csv");
                assert!(upload.file_name.ends_with(".csv"));
                assert!(upload.contents.starts_with(b"IP,Categories"));
                assert_eq!(upload.text_fields, vec![("submit", "send".to_string())]);
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }
}
