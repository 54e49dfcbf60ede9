//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::DumpConfig;
use super::secret::secret_string;
use crate::domain::errors::DumpError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Prefix of environment variables that override configuration values
pub const ENV_PREFIX: &str = "CLOUD_DUMP";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into DumpConfig
/// 4. Applies environment variable overrides (CLOUD_DUMP_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use cloud_dump::config::loader::load_config;
///
/// let config = load_config("cloud-dump.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<DumpConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(DumpError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        DumpError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let mut config = parse_config(&contents)?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        DumpError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    tracing::debug!(path = %path.display(), "Configuration loaded");

    Ok(config)
}

/// Parses TOML text after `${VAR}` substitution, without overrides or validation
pub fn parse_config(contents: &str) -> Result<DumpConfig> {
    let contents = substitute_env_vars(contents)?;
    let config: DumpConfig = toml::from_str(&contents)?;
    Ok(config)
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is a valid regex")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_pattern();
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(DumpError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env(key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}_{key}")).ok()
}

/// Applies environment variable overrides using the CLOUD_DUMP_* prefix
///
/// Variables follow the pattern CLOUD_DUMP_<SECTION>_<KEY>, for example
/// CLOUD_DUMP_API_BASE_URL or CLOUD_DUMP_DUMP_DATABASE_ID. Unparseable
/// numeric and boolean values are ignored.
fn apply_env_overrides(config: &mut DumpConfig) {
    if let Some(val) = env("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // API overrides
    if let Some(val) = env("API_BASE_URL") {
        config.api.base_url = val;
    }
    if let Some(val) = env("API_ACCOUNT_ID") {
        config.api.account_id = val;
    }
    if let Some(val) = env("API_TOKEN") {
        config.api.api_token = Some(secret_string(val));
    }
    if let Some(Ok(timeout)) = env("API_TIMEOUT_SECONDS").map(|v| v.parse()) {
        config.api.timeout_seconds = timeout;
    }
    if let Some(Ok(verify)) = env("API_TLS_VERIFY").map(|v| v.parse()) {
        config.api.tls_verify = verify;
    }

    // Dump overrides
    if let Some(val) = env("DUMP_DATABASE_ID") {
        config.dump.database_id = Some(val);
    }
    if let Some(val) = env("DUMP_TABLES") {
        config.dump.tables = split_list(&val);
    }
    if let Some(val) = env("DUMP_OUTPUT_PATH") {
        config.dump.output_path = Some(val);
    }
    if let Some(Ok(interval)) = env("DUMP_POLL_INTERVAL_MS").map(|v| v.parse()) {
        config.dump.poll_interval_ms = interval;
    }

    // Logging overrides
    if let Some(Ok(enabled)) = env("LOGGING_LOCAL_ENABLED").map(|v| v.parse()) {
        config.logging.local_enabled = enabled;
    }
    if let Some(val) = env("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

/// Splits a comma-separated list, trimming entries and dropping empty ones
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
