//
//  abuseipdb-client
//  api/models.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Typed views over AbuseIPDB response documents.
//!
//! The client returns raw `serde_json::Value` documents. These structs give the
//! documented `data` payloads a shape for display; fields the API may omit are
//! optional, and unknown fields are ignored.
//!
//! ```rust
//! use abuseipdb_client::api::common::ApiResponse;
//! use abuseipdb_client::api::models::CheckData;
//!
//! let body = r#"{"data": {"ipAddress": "118.25.6.39", "abuseConfidenceScore": 100,
//!                "totalReports": 1, "numDistinctUsers": 1}}"#;
//! let check: ApiResponse<CheckData> = serde_json::from_str(body).unwrap();
//! assert_eq!(check.data.abuse_confidence_score, 100);
//! ```

use serde::{Deserialize, Serialize};

/// Payload of `GET /check`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckData {
    pub ip_address: String,

    #[serde(default)]
    pub is_public: Option<bool>,

    #[serde(default)]
    pub ip_version: Option<u8>,

    #[serde(default)]
    pub is_whitelisted: Option<bool>,

    pub abuse_confidence_score: u32,

    #[serde(default)]
    pub country_code: Option<String>,

    /// Only present in verbose mode.
    #[serde(default)]
    pub country_name: Option<String>,

    #[serde(default)]
    pub usage_type: Option<String>,

    #[serde(default)]
    pub isp: Option<String>,

    #[serde(default)]
    pub domain: Option<String>,

    #[serde(default)]
    pub hostnames: Vec<String>,

    #[serde(default)]
    pub is_tor: Option<bool>,

    #[serde(default)]
    pub total_reports: u64,

    #[serde(default)]
    pub num_distinct_users: u64,

    #[serde(default)]
    pub last_reported_at: Option<String>,

    /// Individual reports; only present in verbose mode.
    #[serde(default)]
    pub reports: Vec<CheckReport>,
}

/// One report attached to a verbose check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub reported_at: String,

    #[serde(default)]
    pub comment: Option<String>,

    #[serde(default)]
    pub categories: Vec<u8>,

    #[serde(default)]
    pub reporter_id: Option<u64>,

    #[serde(default)]
    pub reporter_country_code: Option<String>,
}

/// Payload of `GET /check-block`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckBlockData {
    pub network_address: String,
    pub netmask: String,

    #[serde(default)]
    pub min_address: Option<String>,

    #[serde(default)]
    pub max_address: Option<String>,

    #[serde(default)]
    pub num_possible_hosts: u64,

    #[serde(default)]
    pub address_space_desc: Option<String>,

    #[serde(default)]
    pub reported_address: Vec<ReportedAddress>,
}

/// An address inside a checked block that has reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportedAddress {
    pub ip_address: String,

    #[serde(default)]
    pub num_reports: u64,

    #[serde(default)]
    pub most_recent_report: Option<String>,

    #[serde(default)]
    pub abuse_confidence_score: u32,

    #[serde(default)]
    pub country_code: Option<String>,
}

/// Payload of `POST /report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub ip_address: String,
    pub abuse_confidence_score: u32,
}

/// Payload of `DELETE /clear-address`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearAddressData {
    pub num_reports_deleted: u64,
}

/// Payload of `POST /bulk-report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkReportData {
    pub saved_reports: u64,

    #[serde(default)]
    pub invalid_reports: Vec<InvalidReport>,
}

/// A CSV row the API rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidReport {
    pub error: String,
    pub input: String,
    pub row_number: u64,
}

/// Full `GET /blacklist` response (metadata sits beside `data`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlacklistResponse {
    #[serde(default)]
    pub meta: Option<BlacklistMeta>,
    pub data: Vec<BlacklistEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlacklistMeta {
    #[serde(default)]
    pub generated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlacklistEntry {
    pub ip_address: String,

    #[serde(default)]
    pub country_code: Option<String>,

    #[serde(default)]
    pub abuse_confidence_score: u32,

    #[serde(default)]
    pub last_reported_at: Option<String>,
}
