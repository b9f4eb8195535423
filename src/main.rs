//
//  abuseipdb-client
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use abuseipdb_client::cli::{exit_code_for, Cli, Commands, Session};
use abuseipdb_client::exit_codes;

#[tokio::main]
async fn main() {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    let result = run(cli).await;

    // Handle result and exit
    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code_for(&e));
        }
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("ABUSEIPDB_LOG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Main command dispatcher
///
/// Owns the session, and with it the client factory, for the whole run.
async fn run(cli: Cli) -> Result<()> {
    let mut session = Session::new(cli.global.clone());

    match cli.command {
        Commands::Report(cmd) => cmd.run(&mut session).await,
        Commands::Check(cmd) => cmd.run(&mut session).await,
        Commands::CheckBlock(cmd) => cmd.run(&mut session).await,
        Commands::Clear(cmd) => cmd.run(&mut session).await,
        Commands::BulkReport(cmd) => cmd.run(&mut session).await,
        Commands::Blacklist(cmd) => cmd.run(&mut session).await,
        Commands::Categories(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Completion(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("{} version {}", abuseipdb_client::APP_NAME, abuseipdb_client::VERSION);
            Ok(())
        }
    }
}
