//
//  abuseipdb-client
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod blacklist;
mod categories;
mod check;
mod completion;
mod config;
mod report;

pub use blacklist::BlacklistCommand;
pub use categories::CategoriesCommand;
pub use check::{CheckBlockCommand, CheckCommand, ClearCommand};
pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use report::{BulkReportCommand, ReportCommand};

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::api::common::{api_errors, format_api_errors, ApiErrorDetail};
use crate::api::{AbuseIpDbClient, ApiError, ApiResponse, ClientFactory};
use crate::config::{Config, ConfigError};
use crate::exit_codes;
use crate::output::{OutputWriter, TableOutput};

/// AbuseIPDB client - Check and report abusive IP addresses from the command line
#[derive(Parser, Debug)]
#[command(
    name = "abuseipdb",
    version,
    about = "Check and report abusive IP addresses with AbuseIPDB",
    long_about = "abuseipdb is a client for the AbuseIPDB v2 API.\n\n\
                  It checks addresses and networks, files reports, and downloads the blacklist.",
    propagate_version = true,
    after_help = "Use 'abuseipdb <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Path to the JSON configuration file
    #[arg(long, global = true, env = "ABUSEIPDB_CONFIG")]
    pub config: Option<PathBuf>,

    /// AbuseIPDB API key (overrides api.key from the configuration)
    #[arg(long, global = true, env = "ABUSEIPDB_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report an abusive IP address
    Report(ReportCommand),

    /// Check the reputation of an IP address
    Check(CheckCommand),

    /// Check every reported address in a network
    #[command(name = "check-block")]
    CheckBlock(CheckBlockCommand),

    /// Remove your reports of an IP address
    Clear(ClearCommand),

    /// Submit many reports from a CSV file
    #[command(name = "bulk-report")]
    BulkReport(BulkReportCommand),

    /// Download the blacklist
    #[command(visible_alias = "bl")]
    Blacklist(BlacklistCommand),

    /// List report categories
    Categories(CategoriesCommand),

    /// Inspect configuration
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print version information
    Version,
}

/// Failures detected by the command layer rather than the API client.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(
        "No API key configured. Pass --api-key, set ABUSEIPDB_API_KEY, or add api.key to {}",
        .0.display()
    )]
    MissingApiKey(PathBuf),

    /// The API answered with an `errors` document.
    #[error("AbuseIPDB rejected the request: {}", format_api_errors(.0))]
    Api(Vec<ApiErrorDetail>),

    /// The response body was empty or could not be parsed.
    #[error("No data returned by AbuseIPDB")]
    NoData,

    #[error("{0}")]
    InvalidInput(String),
}

/// Maps a command failure to a process exit code.
pub fn exit_code_for(error: &anyhow::Error) -> i32 {
    if let Some(cli) = error.downcast_ref::<CliError>() {
        return match cli {
            CliError::MissingApiKey(_) => exit_codes::AUTH_ERROR,
            CliError::Api(_) => exit_codes::API_ERROR,
            CliError::InvalidInput(_) => exit_codes::USAGE_ERROR,
            CliError::NoData => exit_codes::ERROR,
        };
    }

    // A malformed key or value in the configuration is bad input too.
    if let Some(ConfigError::InvalidKey(_) | ConfigError::InvalidValue { .. }) =
        error.downcast_ref::<ConfigError>()
    {
        return exit_codes::USAGE_ERROR;
    }

    match error.downcast_ref::<ApiError>() {
        Some(api) if api.is_input_error() => exit_codes::USAGE_ERROR,
        _ => exit_codes::ERROR,
    }
}

/// Loads the configuration named by `--config`, or the default one.
pub(crate) fn load_config(global: &GlobalOptions) -> Result<Config> {
    let config = match &global.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(config)
}

/// Resolves the API key: `--api-key`/`ABUSEIPDB_API_KEY` first, then `api.key`.
pub(crate) fn resolve_api_key(global: &GlobalOptions, config: &Config) -> Result<String, CliError> {
    global
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .or_else(|| config.api_key())
        .ok_or_else(|| {
            let path = config
                .path()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("config.json"));
            CliError::MissingApiKey(path)
        })
}

/// Per-run state handed to the API commands.
///
/// Owns the loaded configuration and the [`ClientFactory`]. Both are created
/// on first use, so commands that never talk to the API never load a client.
#[derive(Debug)]
pub struct Session {
    global: GlobalOptions,
    config: Option<Config>,
    factory: Option<ClientFactory>,
}

impl Session {
    pub fn new(global: GlobalOptions) -> Self {
        Self {
            global,
            config: None,
            factory: None,
        }
    }

    pub fn global(&self) -> &GlobalOptions {
        &self.global
    }

    /// The configuration, loaded once per session.
    pub fn config(&mut self) -> Result<&Config> {
        let config = match self.config.take() {
            Some(config) => config,
            None => load_config(&self.global)?,
        };
        Ok(self.config.insert(config))
    }

    /// A client for the resolved API key, built by the session's factory.
    pub fn client(&mut self) -> Result<Arc<AbuseIpDbClient>> {
        let config = self.config()?.clone();
        let api_key = resolve_api_key(&self.global, &config)?;

        let factory = self
            .factory
            .get_or_insert_with(|| ClientFactory::new(config.client_options()));
        let client = factory
            .get_instance(&api_key, false)
            .context("Failed to create AbuseIPDB client")?;

        Ok(client)
    }
}

/// Rejects empty documents and API error documents.
pub(crate) fn ensure_data(document: &Value) -> Result<(), CliError> {
    if document.is_null() {
        return Err(CliError::NoData);
    }
    match api_errors(document) {
        Some(errors) => Err(CliError::Api(errors)),
        None => Ok(()),
    }
}

/// Renders the `data` payload of `document` as `T`.
///
/// JSON mode prints the document untouched. In table mode a payload that does
/// not fit `T` is printed as JSON instead.
pub(crate) fn render_data<T>(document: &Value, global: &GlobalOptions) -> Result<()>
where
    T: DeserializeOwned + Serialize + TableOutput,
{
    ensure_data(document)?;
    let writer = OutputWriter::from_json_flag(global.json);

    if global.json {
        return writer.write_raw(document);
    }

    match serde_json::from_value::<ApiResponse<T>>(document.clone()) {
        Ok(response) => writer.write(&response.data),
        Err(e) => {
            debug!("Unexpected response shape ({}); printing raw document", e);
            writer.write_raw(document)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_api_key_precedence() {
        let config = Config::from_json(r#"{"api": {"key": "from-file"}}"#).unwrap();

        let global = GlobalOptions {
            api_key: Some("from-flag".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_api_key(&global, &config).unwrap(), "from-flag");

        let global = GlobalOptions {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_api_key(&global, &config).unwrap(), "from-file");

        let err = resolve_api_key(&GlobalOptions::default(), &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::MissingApiKey(_)));
    }

    #[test]
    fn test_session_reuses_client() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut session = Session::new(GlobalOptions {
            config: Some(dir.path().join("config.json")),
            api_key: Some("session-key".to_string()),
            ..Default::default()
        });

        let first = session.client().unwrap();
        let second = session.client().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_session_without_key() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut session = Session::new(GlobalOptions {
            config: Some(dir.path().join("config.json")),
            ..Default::default()
        });

        let err = session.client().unwrap_err();
        assert_eq!(exit_code_for(&err), exit_codes::AUTH_ERROR);
        assert!(session.config().is_ok());
    }

    #[test]
    fn test_ensure_data() {
        assert!(matches!(ensure_data(&Value::Null), Err(CliError::NoData)));
        assert!(ensure_data(&json!({"data": {}})).is_ok());

        let doc = json!({"errors": [{"detail": "Authentication failed.", "status": 401}]});
        match ensure_data(&doc) {
            Err(CliError::Api(errors)) => assert_eq!(errors[0].status, Some(401)),
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[test]
    fn test_exit_codes() {
        let cases: Vec<(anyhow::Error, i32)> = vec![
            (CliError::MissingApiKey(PathBuf::new()).into(), exit_codes::AUTH_ERROR),
            (CliError::Api(Vec::new()).into(), exit_codes::API_ERROR),
            (CliError::NoData.into(), exit_codes::ERROR),
            (CliError::InvalidInput("bad".into()).into(), exit_codes::USAGE_ERROR),
            (ApiError::EmptyCategories.into(), exit_codes::USAGE_ERROR),
            (ApiError::KeyMismatch.into(), exit_codes::ERROR),
            (ConfigError::InvalidKey("a..b".into()).into(), exit_codes::USAGE_ERROR),
            (
                ConfigError::InvalidValue {
                    key: "report.categories".into(),
                    message: "unknown category 'nope'".into(),
                }
                .into(),
                exit_codes::USAGE_ERROR,
            ),
            (ConfigError::MissingKey("api.key".into()).into(), exit_codes::ERROR),
            (ConfigError::NoConfigDir.into(), exit_codes::ERROR),
            (anyhow::anyhow!("other"), exit_codes::ERROR),
        ];

        for (error, code) in cases {
            assert_eq!(exit_code_for(&error), code, "{error}");
        }
    }

    #[test]
    fn test_exit_code_survives_context() {
        let error = anyhow::Error::from(ApiError::EmptyCategories).context("while reporting");
        assert_eq!(exit_code_for(&error), exit_codes::USAGE_ERROR);
    }
}
