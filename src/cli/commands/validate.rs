//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Tracklift configuration file.

use crate::config::{redact_credentials, TrackliftConfig};
use crate::domain::Result;
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(
        &self,
        config_path: &str,
        loaded: Result<TrackliftConfig>,
    ) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading also validates every section
        let config = match loaded {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        for line in summary_lines(&config) {
            println!("{line}");
        }
        println!();
        Ok(0)
    }
}

/// Human-readable configuration summary with secrets redacted
pub fn summary_lines(config: &TrackliftConfig) -> Vec<String> {
    let mut lines = vec![
        "Configuration Summary:".to_string(),
        format!("  Environment: {:?}", config.environment),
        format!("  Log Level: {}", config.application.log_level),
        format!("  Dry Run: {}", config.application.dry_run),
        format!(
            "  Source: {}",
            redact_credentials(config.source.connection_string.expose_secret().as_str())
        ),
        format!("  Source Table: {}", config.source.table),
        format!("  SSL Mode: {}", config.source.ssl_mode),
        format!("  Staging Artifact: {}", config.staging.raw_path().display()),
        format!(
            "  Canonical Artifact: {}",
            config.staging.canonical_path().display()
        ),
        format!("  Index URL: {}", config.index.url),
        format!("  Index Name: {}", config.index.index_name),
        format!(
            "  Index Auth: {}",
            match (&config.index.username, &config.index.password) {
                (Some(user), Some(_)) => format!("{user} / ***"),
                (Some(user), None) => user.clone(),
                _ => "none".to_string(),
            }
        ),
        format!("  Bulk Batch Size: {}", config.index.bulk_batch_size),
        format!("  Connect Attempts: {}", config.index.retry.max_retries),
    ];

    if let Some(cron) = &config.schedule.cron {
        lines.push(format!("  Schedule: {cron}"));
    }

    lines
}
