//! Status command implementation
//!
//! This module implements the `status` command for displaying whether the
//! destination index exists and how many documents it holds.

use crate::adapters::backend::factory::LiveBackends;
use crate::config::TrackliftConfig;
use crate::domain::Result;
use crate::core::load::index_status;
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Check a different index than the configured one
    #[arg(long)]
    pub index: Option<String>,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, loaded: Result<TrackliftConfig>) -> anyhow::Result<i32> {
        tracing::info!("Checking index status");

        println!("📊 Index Status");
        println!();

        let mut config = match loaded {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        if let Some(index) = &self.index {
            config.index.index_name = index.clone();
        }

        let backends = LiveBackends::new(config.source.clone(), config.index.clone());
        let status = match index_status(&backends, &config.index).await {
            Ok(s) => s,
            Err(e) if e.is_connection_error() => {
                println!("❌ Failed to connect to {}", config.index.url);
                println!("   Error: {e}");
                return Ok(4);
            }
            Err(e) => {
                println!("❌ Failed to read index status");
                println!("   Error: {e}");
                return Ok(5);
            }
        };

        println!("  Service: {}", config.index.url);
        println!("  Index: {}", status.index);
        match status.documents {
            Some(count) => {
                println!("  Exists: ✅ yes");
                println!("  Documents: {count}");
            }
            None => {
                println!("  Exists: ❌ no");
                println!("Run 'tracklift run' to create and populate it.");
            }
        }
        println!();
        Ok(0)
    }
}
