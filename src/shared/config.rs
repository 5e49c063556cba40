/// Process configuration read from the environment (and `.env` via dotenvy)
use crate::shared::errors::{AppError, AppResult};
use std::env;
use std::time::Duration;

const DEFAULT_IMPORT_SOURCE: &str = "__ALL__";
const DEFAULT_IMPORT_INTERVAL_SECS: u64 = 300;
const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    /// Value for the import job's `source_id` setting
    pub import_source: String,
    pub run_import: bool,
    pub import_interval: Duration,
    pub poll_interval: Duration,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary lookup (used by tests)
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or_else(|| {
            AppError::ConfigError("DATABASE_URL environment variable not found".to_string())
        })?;

        if !database_url.starts_with("postgres://") && !database_url.starts_with("postgresql://") {
            return Err(AppError::ConfigError(
                "Invalid database URL format. Must start with postgres:// or postgresql://"
                    .to_string(),
            ));
        }

        let import_source = lookup("IMPORT_JOB_SOURCE")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_IMPORT_SOURCE.to_string());

        let run_import = match lookup("IMPORT_JOB_RUN_IMPORT") {
            Some(value) => parse_yes_no(&value)?,
            None => false,
        };

        let import_interval = seconds(&lookup, "IMPORT_JOB_INTERVAL_SECS", DEFAULT_IMPORT_INTERVAL_SECS)?;
        let poll_interval = seconds(&lookup, "SCHEDULER_POLL_INTERVAL_SECS", DEFAULT_POLL_INTERVAL_SECS)?;

        Ok(Self {
            database_url,
            import_source,
            run_import,
            import_interval,
            poll_interval,
        })
    }
}

fn parse_yes_no(value: &str) -> AppResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => Ok(true),
        "n" | "no" | "false" | "0" => Ok(false),
        other => Err(AppError::ConfigError(format!(
            "Expected y/n for IMPORT_JOB_RUN_IMPORT, got '{}'",
            other
        ))),
    }
}

fn seconds<F>(lookup: &F, key: &str, default: u64) -> AppResult<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let secs = match lookup(key) {
        Some(raw) => raw.trim().parse::<u64>()?,
        None => default,
    };

    if secs == 0 {
        return Err(AppError::ConfigError(format!("{} must be greater than 0", key)));
    }

    Ok(Duration::from_secs(secs))
}
