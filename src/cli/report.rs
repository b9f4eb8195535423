//
//  abuseipdb-client
//  cli/report.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Reporting commands: single reports and CSV bulk reports.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::api::models::{BulkReportData, ReportData};
use crate::api::{CategorySet, ReportCategory};
use crate::config::Config;

use super::{render_data, Session};

/// Report an abusive IP address
#[derive(Args, Debug)]
pub struct ReportCommand {
    /// IP address to report (IPv4 or IPv6)
    pub ip: String,

    /// Report category, by name or code (repeatable, or comma-separated)
    ///
    /// Falls back to report.categories from the configuration.
    /// Run 'abuseipdb categories' for the full list.
    #[arg(long = "category", short = 'c', value_delimiter = ',')]
    pub categories: Vec<ReportCategory>,

    /// Comment attached to the report (falls back to report.comment)
    ///
    /// Comments are public; strip any personal information first.
    #[arg(long, short = 'm')]
    pub comment: Option<String>,
}

impl ReportCommand {
    pub async fn run(&self, session: &mut Session) -> Result<()> {
        let client = session.client()?;
        let config = session.config()?;

        let categories = self.categories(config)?;
        let comment = self.comment.clone().or_else(|| config.default_comment());

        let document = client
            .report_ip(&self.ip, categories, comment.as_deref())
            .await?;

        render_data::<ReportData>(&document, session.global())
    }

    /// Categories from the command line, or the configured defaults.
    fn categories(&self, config: &Config) -> Result<CategorySet> {
        if self.categories.is_empty() {
            return Ok(config.default_categories()?);
        }
        Ok(self.categories.iter().copied().collect())
    }
}

/// Submit many reports from a CSV file
///
/// The CSV follows AbuseIPDB's bulk format: IP, Categories, ReportDate, Comment.
#[derive(Args, Debug)]
pub struct BulkReportCommand {
    /// Path to the CSV file
    pub csv: PathBuf,
}

impl BulkReportCommand {
    pub async fn run(&self, session: &mut Session) -> Result<()> {
        let client = session.client()?;
        let document = client.bulk_report(&self.csv).await?;
        render_data::<BulkReportData>(&document, session.global())
    }
}
