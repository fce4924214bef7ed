//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{Environment, TrackliftConfig};
use super::secret::secret_string;
use crate::domain::errors::TrackliftError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into TrackliftConfig
/// 4. Applies environment variable overrides (TRACKLIFT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`TrackliftError::Configuration`] if the file is missing or
/// unreadable, a referenced variable is unset, the TOML is malformed, or
/// validation fails.
///
/// # Examples
///
/// ```no_run
/// use tracklift::config::loader::load_config;
///
/// let config = load_config("tracklift.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<TrackliftConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(TrackliftError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        TrackliftError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_from_str(&contents)
}

/// Parses, overrides and validates configuration held in memory
pub fn load_config_from_str(contents: &str) -> Result<TrackliftConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: TrackliftConfig = toml::from_str(&contents)
        .map_err(|e| TrackliftError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        TrackliftError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| TrackliftError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(TrackliftError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        TrackliftError::Configuration(format!("Invalid value '{value}' for {name}"))
    })
}

/// Applies environment variable overrides using TRACKLIFT_* prefix
///
/// Environment variables follow the pattern: TRACKLIFT_<SECTION>_<KEY>
/// For example: TRACKLIFT_INDEX_URL, TRACKLIFT_SOURCE_TABLE
fn apply_env_overrides(config: &mut TrackliftConfig) -> Result<()> {
    let var = |name: &str| std::env::var(name).ok();

    // Application
    if let Some(val) = var("TRACKLIFT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Some(val) = var("TRACKLIFT_APPLICATION_DRY_RUN") {
        config.application.dry_run = parse_override("TRACKLIFT_APPLICATION_DRY_RUN", &val)?;
    }
    if let Some(val) = var("TRACKLIFT_ENVIRONMENT") {
        config.environment = match val.to_lowercase().as_str() {
            "development" => Environment::Development,
            "staging" => Environment::Staging,
            "production" => Environment::Production,
            other => {
                return Err(TrackliftError::Configuration(format!(
                    "Invalid value '{other}' for TRACKLIFT_ENVIRONMENT"
                )))
            }
        };
    }

    // Source
    if let Some(val) = var("TRACKLIFT_SOURCE_CONNECTION_STRING") {
        config.source.connection_string = secret_string(val);
    }
    if let Some(val) = var("TRACKLIFT_SOURCE_TABLE") {
        config.source.table = val;
    }
    if let Some(val) = var("TRACKLIFT_SOURCE_SSL_MODE") {
        config.source.ssl_mode = val;
    }

    // Staging
    if let Some(val) = var("TRACKLIFT_STAGING_DIRECTORY") {
        config.staging.directory = val;
    }

    // Index
    if let Some(val) = var("TRACKLIFT_INDEX_URL") {
        config.index.url = val;
    }
    if let Some(val) = var("TRACKLIFT_INDEX_INDEX_NAME") {
        config.index.index_name = val;
    }
    if let Some(val) = var("TRACKLIFT_INDEX_USERNAME") {
        config.index.username = Some(val);
    }
    if let Some(val) = var("TRACKLIFT_INDEX_PASSWORD") {
        config.index.password = Some(secret_string(val));
    }
    if let Some(val) = var("TRACKLIFT_INDEX_TLS_VERIFY") {
        config.index.tls_verify = parse_override("TRACKLIFT_INDEX_TLS_VERIFY", &val)?;
    }
    if let Some(val) = var("TRACKLIFT_INDEX_BULK_BATCH_SIZE") {
        config.index.bulk_batch_size = parse_override("TRACKLIFT_INDEX_BULK_BATCH_SIZE", &val)?;
    }
    if let Some(val) = var("TRACKLIFT_INDEX_RETRY_MAX_RETRIES") {
        config.index.retry.max_retries =
            parse_override("TRACKLIFT_INDEX_RETRY_MAX_RETRIES", &val)?;
    }

    // Logging
    if let Some(val) = var("TRACKLIFT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("TRACKLIFT_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Some(val) = var("TRACKLIFT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
