//
//  abuseipdb-client
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! Read-only inspection of the JSON configuration. The file is edited by hand.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use crate::config::Config;

use super::{load_config, GlobalOptions};

/// Dotted path of the one secret in the configuration.
const API_KEY_PATH: &str = "api.key";

const REDACTED: &str = "<redacted>";

/// Masks the API key inside `value`, the value found at `key`.
///
/// Covers the key itself and any parent (`api`) whose object holds it.
fn redact_api_key(key: &str, mut value: Value) -> Value {
    if key == API_KEY_PATH {
        return Value::String(REDACTED.to_string());
    }

    let Some(rest) = API_KEY_PATH
        .strip_prefix(key)
        .and_then(|rest| rest.strip_prefix('.'))
    else {
        return value;
    };

    let pointer = format!("/{}", rest.replace('.', "/"));
    if let Some(secret) = value.pointer_mut(&pointer).filter(|secret| !secret.is_null()) {
        *secret = Value::String(REDACTED.to_string());
    }
    value
}

/// Inspect configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Print a configuration value by dotted key (e.g. api.base_url)
    Get(GetArgs),

    /// Show configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => self.get(args, global),
            ConfigSubcommand::Path => self.path(global),
        }
    }

    fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        let config = load_config(global)?;
        let value = redact_api_key(&args.key, config.get_value(&args.key)?.clone());

        if global.json {
            let result = serde_json::json!({
                "key": args.key,
                "value": value,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            match &value {
                Value::String(s) => println!("{}", s),
                other => println!("{}", serde_json::to_string_pretty(other)?),
            }
        }

        Ok(())
    }

    fn path(&self, global: &GlobalOptions) -> Result<()> {
        let path = match &global.config {
            Some(path) => path.clone(),
            None => Config::config_path()?,
        };
        let exists = path.is_file();

        if global.json {
            let result = serde_json::json!({
                "path": path,
                "exists": exists,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}", path.display());
            if !exists {
                eprintln!("{}", style("(file does not exist; defaults are in use)").dim());
            }
        }

        Ok(())
    }
}
