// Tracklift - Listener Data ETL from PostgreSQL to a Search Index
// Copyright (c) 2025 Tracklift Contributors
// Licensed under the MIT License

use tracklift::cli::{Cli, Commands};
use tracklift::config::{load_config, LoggingConfig, TrackliftConfig};
use tracklift::domain::Result;
use tracklift::logging::init_logging;
use clap::Parser;
use std::process;

/// Exit code for a run aborted by SIGINT/SIGTERM
const INTERRUPTED_EXIT_CODE: i32 = 130;

#[tokio::main]
async fn main() {
    // Optional; a missing .env is ignored
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Loaded once; logging is set up from it here and the command reports load errors
    let loaded = load_config(&cli.config);
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| loaded.as_ref().ok().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let logging_config = match (&cli.command, &loaded) {
        (Commands::Run(_), Ok(config)) => config.logging.clone(),
        _ => LoggingConfig::default(),
    };

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Tracklift - Listener Data ETL"
    );

    let exit_code = tokio::select! {
        result = execute_command(&cli, loaded) => match result {
            Ok(code) => code,
            Err(e) => {
                tracing::error!(error = %e, "Command execution failed");
                eprintln!("Error: {e}");
                5
            }
        },
        signal = shutdown_signal() => {
            tracing::warn!(signal, "Shutdown signal received, aborting run");
            println!("\n⚠️  {signal} received, run aborted. Re-run to start over.");
            INTERRUPTED_EXIT_CODE
        }
    };

    // process::exit skips destructors; flush the file writer first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, loaded: Result<TrackliftConfig>) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Run(args) => args.execute(loaded).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config, loaded).await,
        Commands::Status(args) => args.execute(loaded).await,
        Commands::Init(args) => args.execute().await,
    }
}

/// Resolves with the signal name once SIGINT or SIGTERM arrives
#[cfg(unix)]
async fn shutdown_signal() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            tokio::select! {
                _ = wait_for_ctrl_c() => "SIGINT",
                _ = sigterm.recv() => "SIGTERM",
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install SIGTERM handler");
            wait_for_ctrl_c().await
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> &'static str {
    wait_for_ctrl_c().await
}

async fn wait_for_ctrl_c() -> &'static str {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    "SIGINT"
}
