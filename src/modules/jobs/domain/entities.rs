/// Domain entities for scheduled jobs
///
/// A job definition binds a registered job hook to its settings and run
/// interval. The scheduler keeps one `JobRunState` per definition.
use crate::shared::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A configured job: which hook to run, with what settings, how often
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDefinition {
    pub job_name: String,
    /// Name the job hook is registered under
    pub job_class: String,
    pub settings: serde_json::Value,
    /// Seconds between two attempts
    pub run_interval: u64,
    #[serde(default)]
    pub disabled: bool,
}

impl JobDefinition {
    pub fn new(
        job_name: impl Into<String>,
        job_class: impl Into<String>,
        settings: serde_json::Value,
        run_interval: Duration,
    ) -> Self {
        Self {
            job_name: job_name.into(),
            job_class: job_class.into(),
            settings,
            run_interval: run_interval.as_secs(),
            disabled: false,
        }
    }

    pub fn run_interval(&self) -> Duration {
        Duration::from_secs(self.run_interval)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.job_name.trim().is_empty() {
            return Err(AppError::ValidationError("Job name must not be empty".to_string()));
        }
        if self.job_class.trim().is_empty() {
            return Err(AppError::ValidationError(format!(
                "Job '{}' has no job class",
                self.job_name
            )));
        }
        if self.run_interval == 0 {
            return Err(AppError::ValidationError(format!(
                "Job '{}' needs a run interval greater than 0",
                self.job_name
            )));
        }
        Ok(())
    }
}

/// Outcome history of a job, kept by the scheduler
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JobRunState {
    pub last_attempt_at: Option<DateTime<Utc>>,
    pub last_attempt_succeeded: Option<bool>,
    pub last_error_message: Option<String>,
    pub last_error_at: Option<DateTime<Utc>>,
    pub success_count: u64,
    pub error_count: u64,
}

impl JobRunState {
    pub fn record_success(&mut self, at: DateTime<Utc>) {
        self.last_attempt_at = Some(at);
        self.last_attempt_succeeded = Some(true);
        self.success_count += 1;
    }

    pub fn record_failure(&mut self, at: DateTime<Utc>, message: impl Into<String>) {
        self.last_attempt_at = Some(at);
        self.last_attempt_succeeded = Some(false);
        self.last_error_message = Some(message.into());
        self.last_error_at = Some(at);
        self.error_count += 1;
    }

    /// Whether `interval` has passed since the last attempt (or there was none)
    pub fn is_due(&self, interval: Duration, now: DateTime<Utc>) -> bool {
        match self.last_attempt_at {
            None => true,
            Some(last) => match chrono::Duration::from_std(interval) {
                Ok(interval) => now - last >= interval,
                Err(_) => false,
            },
        }
    }
}
