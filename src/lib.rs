//
//  abuseipdb-client
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # AbuseIPDB Client Library
//!
//! A client for the [AbuseIPDB](https://www.abuseipdb.com) v2 API and the
//! library behind the `abuseipdb` command-line tool.
//!
//! ## Features
//!
//! - **Reputation lookups**: single addresses (`check`) and whole networks (`check-block`)
//! - **Reporting**: single reports with typed category flags, and CSV bulk reports
//! - **Blacklist**: JSON or plaintext, filtered by confidence, size and country
//! - **Report cleanup**: remove every report made with your key for an address
//!
//! ## Module Structure
//!
//! - [`api`]: request building, HTTP transport, decoding and the client itself
//! - [`config`]: JSON configuration with dotted-key lookups
//! - [`cli`]: command-line interface definitions using clap
//! - [`output`]: table and JSON rendering
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use abuseipdb_client::api::{AbuseIpDbClient, ReportCategory};
//!
//! # async fn example() -> Result<(), abuseipdb_client::api::ApiError> {
//! let client = AbuseIpDbClient::new("your-api-key")?;
//!
//! let document = client.check_ip_address("118.25.6.39").await?;
//! println!("score: {}", document["data"]["abuseConfidenceScore"]);
//!
//! client
//!     .report_ip("118.25.6.39", ReportCategory::Ssh | ReportCategory::BruteForce, None)
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Failure Model
//!
//! | Situation | Result |
//! |-----------|--------|
//! | Bad arguments (no categories, missing CSV) | `Err(ApiError)` before any request |
//! | Network failure, timeout | `Err(ApiError::Transport)` |
//! | Empty or unparseable body | `Ok(Value::Null)` |
//! | API error (401, 422, 429) | `Ok` document with an `errors` array |

/// Command-line interface definitions.
///
/// Each command is a clap `Args` struct with an async `run` method.
pub mod cli;

/// AbuseIPDB API client.
///
/// Builds requests for each endpoint, runs them through a pluggable
/// [`Transport`](api::Transport), and decodes the body into a JSON document.
pub mod api;

/// Configuration file management.
///
/// Manages the JSON configuration stored in platform-specific locations:
/// - Linux: `~/.config/abuseipdb/config.json`
/// - macOS: `~/Library/Application Support/abuseipdb/config.json`
/// - Windows: `%APPDATA%\abuseipdb\config\config.json`
pub mod config;

/// Output formatting: tables for people, JSON for scripts.
pub mod output;

/// Re-export of the main CLI struct.
pub use cli::Cli;

/// Re-export of the configuration struct.
pub use config::Config;

/// Application name, used for the binary, the user agent and the config directory.
pub const APP_NAME: &str = "abuseipdb";

/// Application version, taken from Cargo.toml at compile time.
///
/// ```rust
/// use abuseipdb_client::VERSION;
///
/// println!("abuseipdb version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// # Exit Code Ranges
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `32+`: External service issues
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error, including transport failures and empty responses.
    pub const ERROR: i32 = 1;

    /// Invalid arguments, detected before any request was made.
    pub const USAGE_ERROR: i32 = 2;

    /// No API key could be found.
    pub const AUTH_ERROR: i32 = 4;

    /// AbuseIPDB answered with an `errors` document.
    ///
    /// Covers rejected keys, invalid addresses and rate limiting.
    pub const API_ERROR: i32 = 32;
}
