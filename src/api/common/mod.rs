//
//  abuseipdb-client
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types
//!
//! Shared error handling and response envelopes used by every endpoint of the
//! AbuseIPDB client.
//!
//! # Error Taxonomy
//!
//! | Kind | Variants | Raised |
//! |------|----------|--------|
//! | Caller input | `EmptyCategories`, `CategoryDecode`, `BulkFileInvalid`, `BulkFileUnreadable` | before any network I/O |
//! | Transport | `Transport` | connection, DNS, TLS, timeout |
//! | Lifecycle | `KeyMismatch`, `ClientBuild` | factory / construction |
//!
//! Decode failures are not errors: they yield the empty document (see
//! [`crate::api::decode`]). Error bodies sent by the API itself are ordinary
//! documents; use [`api_errors`] to pull them out.
//!
//! # Example
//!
//! ```rust
//! use abuseipdb_client::api::common::ApiError;
//!
//! fn describe(result: Result<(), ApiError>) -> &'static str {
//!     match result {
//!         Ok(()) => "ok",
//!         Err(e) if e.is_input_error() => "fix your arguments",
//!         Err(ApiError::Transport(_)) => "network trouble",
//!         Err(_) => "something else",
//!     }
//! }
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::transport::TransportError;

/// Unified error type for all AbuseIPDB client operations.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A report was requested with no categories set.
    #[error("At least one report category is required")]
    EmptyCategories,

    /// The category flags were non-zero but contained no known category.
    ///
    /// # Parameters
    ///
    /// - `0` - The raw flag bits that failed to decode
    #[error("Failed to decode report categories from flags {0:#x}")]
    CategoryDecode(u64),

    /// The bulk-report CSV path does not exist or is not a regular file.
    #[error("CSV must be a valid file: {}", .0.display())]
    BulkFileInvalid(PathBuf),

    /// The bulk-report CSV exists but could not be read.
    #[error("Failed to open file {}: {source}", path.display())]
    BulkFileUnreadable {
        /// The offending path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The HTTP call itself failed; no response body was decoded.
    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),

    /// The factory already holds a client bound to another API key.
    #[error("API key mismatch: a client for a different API key is already active")]
    KeyMismatch,

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl ApiError {
    /// Returns `true` for errors caused by caller-supplied arguments.
    ///
    /// These are always raised before the transport is touched.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyCategories
                | Self::CategoryDecode(_)
                | Self::BulkFileInvalid(_)
                | Self::BulkFileUnreadable { .. }
        )
    }
}

/// The `{"data": ...}` envelope AbuseIPDB wraps successful responses in.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// One entry of an AbuseIPDB error response.
///
/// The API reports failures (bad key, invalid IP, rate limits) as:
///
/// ```json
/// {"errors": [{"detail": "The ip address must be a valid IPv4 or IPv6 address.",
///              "status": 422, "source": {"parameter": "ipAddress"}}]}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub detail: String,

    #[serde(default)]
    pub status: Option<u16>,

    #[serde(default)]
    pub source: Option<Value>,
}

/// Extracts API-reported errors from a decoded document.
///
/// Returns `None` when the document carries no `errors` array (including the
/// empty `null` document).
///
/// # Example
///
/// ```rust
/// use abuseipdb_client::api::common::api_errors;
/// use serde_json::json;
///
/// let doc = json!({"errors": [{"detail": "Authentication failed.", "status": 401}]});
/// let errors = api_errors(&doc).unwrap();
/// assert_eq!(errors[0].status, Some(401));
///
/// assert!(api_errors(&json!({"data": {}})).is_none());
/// ```
pub fn api_errors(document: &Value) -> Option<Vec<ApiErrorDetail>> {
    let errors = document.get("errors")?;
    serde_json::from_value::<Vec<ApiErrorDetail>>(errors.clone())
        .ok()
        .filter(|errors| !errors.is_empty())
}

/// Joins API-reported errors into one user-facing message.
pub fn format_api_errors(errors: &[ApiErrorDetail]) -> String {
    errors
        .iter()
        .map(|e| match e.status {
            Some(status) => format!("{} ({})", e.detail, status),
            None => e.detail.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_errors_extracts_details() {
        let doc = json!({
            "errors": [
                {"detail": "Daily rate limit of 1000 requests exceeded.", "status": 429},
                {"detail": "Bad key"}
            ]
        });

        let errors = api_errors(&doc).unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[1].status, None);
        assert_eq!(
            format_api_errors(&errors),
            "Daily rate limit of 1000 requests exceeded. (429); Bad key"
        );
    }

    #[test]
    fn test_api_errors_absent() {
        assert!(api_errors(&Value::Null).is_none());
        assert!(api_errors(&json!({"errors": []})).is_none());
        assert!(api_errors(&json!({"errors": "not a list"})).is_none());
    }

    #[test]
    fn test_input_error_classification() {
        assert!(ApiError::EmptyCategories.is_input_error());
        assert!(ApiError::BulkFileInvalid(PathBuf::from("x.csv")).is_input_error());
        assert!(!ApiError::KeyMismatch.is_input_error());
    }
}
