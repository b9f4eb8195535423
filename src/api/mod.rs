//
//  abuseipdb-client
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! HTTP client for the AbuseIPDB v2 REST API.
//!
//! ## Architecture
//!
//! Data flows one way, leaves first:
//!
//! - [`categories`]: report categories as bit flags
//! - [`request`]: endpoint parameters to URL, headers and body
//! - [`transport`]: one HTTP exchange, body captured into a `RawResponse`
//! - [`decode`]: body to JSON document or plaintext
//! - [`client`]: one method per endpoint, composing the above
//! - [`factory`]: one client per API key
//! - [`common`]: error types and the `data` envelope
//! - [`models`]: typed views of response payloads
//!
//! ## Usage
//!
//! ```rust,no_run
//! use abuseipdb_client::api::{BlacklistQuery, ClientFactory, ClientOptions};
//!
//! # async fn example() -> Result<(), abuseipdb_client::api::ApiError> {
//! let mut factory = ClientFactory::new(ClientOptions::default());
//! let client = factory.get_instance("your-api-key", false)?;
//!
//! let list = client
//!     .blacklist_plaintext(&BlacklistQuery::default().with_limit(1000))
//!     .await?;
//! println!("{list}");
//! # Ok(())
//! # }
//! ```

/// Report categories and category sets.
pub mod categories;

/// One-client-per-key reuse policy.
pub mod factory;

/// Core HTTP client wrapper for the AbuseIPDB API.
///
/// Provides the [`AbuseIpDbClient`] struct which handles:
/// - Request construction per endpoint
/// - Authentication header injection
/// - Transport failure classification
/// - Response decoding with empty-document fallback
pub mod client;

/// Common types: [`ApiError`] and the [`ApiResponse`] envelope.
pub mod common;

pub mod decode;

pub mod models;

pub mod request;

pub mod transport;

pub use categories::{CategorySet, ReportCategory};
pub use client::{AbuseIpDbClient, ClientOptions};
pub use common::{ApiError, ApiResponse};
pub use factory::ClientFactory;
pub use request::{BlacklistQuery, Endpoint};
pub use transport::{HttpTransport, RawResponse, Transport, TransportError};
