//
//  abuseipdb-client
//  cli/check.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Lookup commands: single addresses, network blocks, and clearing reports.

use anyhow::Result;
use clap::Args;

use crate::api::models::{CheckBlockData, CheckData, ClearAddressData};

use super::{render_data, CliError, Session};

/// Check the reputation of an IP address
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// IP address to check (IPv4 or IPv6)
    pub ip: String,
}

impl CheckCommand {
    pub async fn run(&self, session: &mut Session) -> Result<()> {
        let client = session.client()?;
        let document = client.check_ip_address(&self.ip).await?;
        render_data::<CheckData>(&document, session.global())
    }
}

/// Check every reported address in a network
#[derive(Args, Debug)]
pub struct CheckBlockCommand {
    /// Network address, optionally with a prefix length (193.41.200.0/24)
    pub network: String,

    /// Prefix length, used when NETWORK carries none
    #[arg(long, default_value_t = 24, value_parser = clap::value_parser!(u8).range(0..=128))]
    pub cidr: u8,
}

impl CheckBlockCommand {
    pub async fn run(&self, session: &mut Session) -> Result<()> {
        let (address, cidr) = self.split_network()?;
        let client = session.client()?;
        let document = client.check_block(address, cidr).await?;
        render_data::<CheckBlockData>(&document, session.global())
    }

    /// Splits `addr/len`; a bare address takes `--cidr`.
    fn split_network(&self) -> Result<(&str, u8), CliError> {
        let Some((address, prefix)) = self.network.split_once('/') else {
            return Ok((self.network.as_str(), self.cidr));
        };

        let cidr = prefix
            .parse::<u8>()
            .ok()
            .filter(|len| *len <= 128)
            .ok_or_else(|| CliError::InvalidInput(format!("Invalid prefix length '{prefix}'")))?;

        Ok((address, cidr))
    }
}

/// Remove your reports of an IP address
#[derive(Args, Debug)]
pub struct ClearCommand {
    /// IP address whose reports should be removed
    pub ip: String,
}

impl ClearCommand {
    pub async fn run(&self, session: &mut Session) -> Result<()> {
        let client = session.client()?;
        let document = client.clear_ip_address(&self.ip).await?;
        render_data::<ClearAddressData>(&document, session.global())
    }
}
