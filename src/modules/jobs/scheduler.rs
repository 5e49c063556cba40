/// Scheduler running registered job hooks at their configured interval
///
/// The scheduler polls its job definitions and runs every job that is due,
/// one after another. Job failures are recorded in the job's run state and
/// never stop the loop. Spawn `run` with tokio::spawn and call `stop` to
/// shut it down.
use crate::modules::jobs::domain::entities::{JobDefinition, JobRunState};
use crate::modules::jobs::registry::JobRegistry;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::{LogContext, TimedOperation};
use crate::{log_debug, log_info, log_warn};
use chrono::Utc;
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub struct Scheduler {
    registry: Arc<JobRegistry>,
    definitions: Vec<JobDefinition>,
    states: DashMap<String, JobRunState>,
    poll_interval: Duration,
    shutdown: CancellationToken,
    is_running: Arc<tokio::sync::RwLock<bool>>,
}

impl Scheduler {
    /// Create a scheduler for the given job definitions
    ///
    /// Definitions must be valid and have unique names.
    pub fn new(
        registry: Arc<JobRegistry>,
        definitions: Vec<JobDefinition>,
        poll_interval: Duration,
    ) -> AppResult<Self> {
        let mut seen = HashSet::new();
        for definition in &definitions {
            definition.validate()?;
            if !seen.insert(definition.job_name.clone()) {
                return Err(AppError::ValidationError(format!(
                    "Duplicate job name '{}'",
                    definition.job_name
                )));
            }
            if registry.get(&definition.job_class).is_none() {
                log_warn!(
                    "Job '{}' references unknown job class '{}'",
                    definition.job_name,
                    definition.job_class
                );
            }
        }

        Ok(Self {
            registry,
            definitions,
            states: DashMap::new(),
            poll_interval,
            shutdown: CancellationToken::new(),
            is_running: Arc::new(tokio::sync::RwLock::new(false)),
        })
    }

    /// Run the scheduler loop until `stop` is called
    pub async fn run(self: Arc<Self>) {
        log_info!(
            "Scheduler started with {} job(s), polling every {:?}",
            self.definitions.len(),
            self.poll_interval
        );

        {
            let mut running = self.is_running.write().await;
            *running = true;
        }

        while !self.shutdown.is_cancelled() {
            let ran = self.run_due_jobs().await;
            if ran > 0 {
                log_debug!("Scheduler tick ran {} job(s)", ran);
            }

            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                _ = tokio::time::sleep(self.poll_interval) => {}
            }
        }

        {
            let mut running = self.is_running.write().await;
            *running = false;
        }
        log_info!("Scheduler stopped");
    }

    /// Stop the scheduler loop after the job currently running (if any)
    pub fn stop(&self) {
        self.shutdown.cancel();
        log_info!("Scheduler stop requested");
    }

    /// Run every enabled job whose interval has elapsed
    ///
    /// Returns the number of jobs attempted.
    pub async fn run_due_jobs(&self) -> usize {
        let now = Utc::now();
        let mut attempted = 0;

        for definition in self.definitions.iter().filter(|d| !d.disabled) {
            if !self.is_due(definition, now) {
                continue;
            }
            // Errors are already recorded in the run state
            let _ = self.execute(definition).await;
            attempted += 1;
        }

        attempted
    }

    /// Run a job immediately, regardless of its interval
    pub async fn run_job(&self, job_name: &str) -> AppResult<()> {
        let definition = self
            .definitions
            .iter()
            .find(|d| d.job_name == job_name)
            .ok_or_else(|| AppError::NotFound(format!("Job '{}' not found", job_name)))?;

        self.execute(definition).await
    }

    /// Recorded run state of a job, `None` if it never ran
    pub fn job_state(&self, job_name: &str) -> Option<JobRunState> {
        self.states.get(job_name).map(|state| state.value().clone())
    }

    /// Get statistics about the scheduler and its jobs
    pub async fn get_statistics(&self) -> SchedulerStatistics {
        let is_running = *self.is_running.read().await;
        let mut stats = SchedulerStatistics {
            is_running,
            total_jobs: self.definitions.len(),
            disabled_jobs: self.definitions.iter().filter(|d| d.disabled).count(),
            ..SchedulerStatistics::default()
        };

        for definition in &self.definitions {
            match self
                .states
                .get(&definition.job_name)
                .and_then(|s| s.last_attempt_succeeded)
            {
                Some(true) => stats.succeeding_jobs += 1,
                Some(false) => stats.failing_jobs += 1,
                None => stats.never_run_jobs += 1,
            }
        }

        stats
    }

    fn is_due(&self, definition: &JobDefinition, now: chrono::DateTime<Utc>) -> bool {
        match self.states.get(&definition.job_name) {
            Some(state) => state.is_due(definition.run_interval(), now),
            None => true,
        }
    }

    async fn execute(&self, definition: &JobDefinition) -> AppResult<()> {
        let timer = TimedOperation::new(&format!("job '{}'", definition.job_name));

        let result = match self.registry.get(&definition.job_class) {
            Some(hook) => hook.run(&definition.settings).await,
            None => Err(AppError::NotFound(format!(
                "No job hook registered as '{}'",
                definition.job_class
            ))),
        };

        let now = Utc::now();
        let mut state = self.states.entry(definition.job_name.clone()).or_default();
        match &result {
            Ok(()) => state.record_success(now),
            Err(e) => {
                log_warn!("Job '{}' failed: {}", definition.job_name, e);
                state.record_failure(now, e.to_string());
            }
        }
        drop(state);

        LogContext::job_run(&definition.job_name, result.is_ok(), timer.elapsed_ms());
        result
    }
}

/// Scheduler statistics for monitoring
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct SchedulerStatistics {
    pub is_running: bool,
    pub total_jobs: usize,
    pub disabled_jobs: usize,
    pub succeeding_jobs: usize,
    pub failing_jobs: usize,
    pub never_run_jobs: usize,
}
