//
//  abuseipdb-client
//  cli/blacklist.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Blacklist download command.

use anyhow::Result;
use clap::Args;
use serde_json::Value;
use tracing::debug;

use crate::api::models::BlacklistResponse;
use crate::api::request::{MAX_IPS_PREMIUM_SUB, MAX_IPS_STANDARD};
use crate::api::BlacklistQuery;
use crate::config::Config;
use crate::output::OutputWriter;

use super::{ensure_data, Session};

/// Download the blacklist
///
/// Defaults come from blacklist.limit and blacklist.confidence_minimum in
/// the configuration. When both country filters are given, only
/// --only-countries is sent.
#[derive(Args, Debug)]
pub struct BlacklistCommand {
    /// Maximum number of addresses (10000 on the free tier)
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,

    /// Minimum abuse confidence score, 25-100 on subscriber plans
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub confidence_minimum: Option<u8>,

    /// Only include these countries (ISO codes, comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub only_countries: Vec<String>,

    /// Exclude these countries (ISO codes, comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub except_countries: Vec<String>,

    /// Print one address per line instead of JSON or a table
    #[arg(long)]
    pub plaintext: bool,
}

impl BlacklistCommand {
    pub async fn run(&self, session: &mut Session) -> Result<()> {
        let client = session.client()?;
        let config = session.config()?;
        let query = self.query(config);

        if query.limit > MAX_IPS_STANDARD {
            debug!(
                "Requested {} addresses; the free tier returns at most {} (subscriptions up to {})",
                query.limit, MAX_IPS_STANDARD, MAX_IPS_PREMIUM_SUB
            );
        }

        if self.plaintext {
            let text = client.blacklist_plaintext(&query).await?;
            // Errors still come back as JSON on the plaintext endpoint.
            if let Ok(document) = serde_json::from_str::<Value>(&text) {
                ensure_data(&document)?;
            }
            print!("{}", text);
            if !text.ends_with('\n') && !text.is_empty() {
                println!();
            }
            return Ok(());
        }

        let document = client.blacklist(&query).await?;
        ensure_data(&document)?;

        let json = session.global().json;
        let writer = OutputWriter::from_json_flag(json);
        if json {
            return writer.write_raw(&document);
        }

        match serde_json::from_value::<BlacklistResponse>(document.clone()) {
            Ok(response) => writer.write(&response),
            Err(e) => {
                debug!("Unexpected blacklist shape ({}); printing raw document", e);
                writer.write_raw(&document)
            }
        }
    }

    /// Merges command-line options over the configured defaults.
    fn query(&self, config: &Config) -> BlacklistQuery {
        let mut query = config.blacklist_query();
        if let Some(limit) = self.limit {
            query = query.with_limit(limit);
        }
        if let Some(confidence) = self.confidence_minimum {
            query = query.with_minimum_confidence(confidence);
        }
        query
            .with_only_countries(&self.only_countries)
            .with_except_countries(&self.except_countries)
    }
}
