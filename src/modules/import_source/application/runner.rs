/// Import runner: reconciles each selected import source with the outcome
/// of its import procedure.
///
/// Sources are processed one at a time. In "all sources" mode every
/// source gets its own failure boundary, so one broken source never keeps
/// the others from being reconciled.
use crate::modules::import_source::domain::entities::{ImportSource, ImportState};
use crate::modules::import_source::domain::importer::Importer;
use crate::modules::import_source::domain::repository::ImportSourceRepository;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::{LogContext, TimedOperation};
use crate::{log_debug, log_error, log_warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Which import sources a run covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SourceSelector {
    All,
    Source(Uuid),
}

impl SourceSelector {
    /// Wire value selecting every import source
    pub const ALL_SENTINEL: &'static str = "__ALL__";
}

impl std::fmt::Display for SourceSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceSelector::All => write!(f, "{}", Self::ALL_SENTINEL),
            SourceSelector::Source(id) => write!(f, "{}", id),
        }
    }
}

impl std::str::FromStr for SourceSelector {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == Self::ALL_SENTINEL {
            return Ok(SourceSelector::All);
        }
        if s.is_empty() {
            return Err(AppError::ValidationError(
                "An import source must be chosen".to_string(),
            ));
        }
        Ok(SourceSelector::Source(Uuid::parse_str(s)?))
    }
}

impl TryFrom<String> for SourceSelector {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SourceSelector> for String {
    fn from(selector: SourceSelector) -> Self {
        selector.to_string()
    }
}

/// What happened to one source during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceOutcome {
    /// The import reported nothing to do
    Unchanged,
    /// Changes were found but not applied
    PendingChanges,
    /// Changes were applied successfully
    Applied,
    /// Applying changes returned a failure without an error
    Rejected,
    /// Checking or applying raised an error
    Failed,
}

impl SourceOutcome {
    /// State to assign for this outcome, `None` leaves the loaded state
    pub fn target_state(&self) -> Option<ImportState> {
        match self {
            SourceOutcome::Unchanged => None,
            SourceOutcome::PendingChanges => Some(ImportState::PendingChanges),
            SourceOutcome::Applied => Some(ImportState::InSync),
            SourceOutcome::Rejected | SourceOutcome::Failed => Some(ImportState::Failing),
        }
    }
}

/// Result of processing a single source
#[derive(Debug, Clone, Serialize)]
pub struct SourceReport {
    pub source_id: Uuid,
    pub source_name: String,
    pub outcome: SourceOutcome,
    pub import_state: ImportState,
    pub stored: bool,
}

/// Tally of a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportRunSummary {
    pub processed: usize,
    pub stored: usize,
    pub unchanged: usize,
    pub pending_changes: usize,
    pub applied: usize,
    pub rejected: usize,
    pub failed: usize,
    /// Sources whose write-back failed
    pub store_errors: usize,
}

impl SourceReport {
    fn new(source: &ImportSource, outcome: SourceOutcome, stored: bool) -> Self {
        Self {
            source_id: source.id(),
            source_name: source.source_name().to_string(),
            outcome,
            import_state: source.import_state(),
            stored,
        }
    }
}

impl ImportRunSummary {
    fn record(&mut self, report: &SourceReport) {
        self.processed += 1;
        if report.stored {
            self.stored += 1;
        }
        match report.outcome {
            SourceOutcome::Unchanged => self.unchanged += 1,
            SourceOutcome::PendingChanges => self.pending_changes += 1,
            SourceOutcome::Applied => self.applied += 1,
            SourceOutcome::Rejected => self.rejected += 1,
            SourceOutcome::Failed => self.failed += 1,
        }
    }
}

impl std::fmt::Display for ImportRunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} processed, {} stored, {} unchanged, {} pending, {} applied, {} rejected, {} failed, {} store errors",
            self.processed,
            self.stored,
            self.unchanged,
            self.pending_changes,
            self.applied,
            self.rejected,
            self.failed,
            self.store_errors
        )
    }
}

pub struct ImportRunner {
    repository: Arc<dyn ImportSourceRepository>,
    importer: Arc<dyn Importer>,
}

impl ImportRunner {
    pub fn new(repository: Arc<dyn ImportSourceRepository>, importer: Arc<dyn Importer>) -> Self {
        Self {
            repository,
            importer,
        }
    }

    /// Run the import for every source the selector resolves to
    ///
    /// A single-source selector that does not resolve is returned as
    /// `AppError::NotFound` before anything is processed.
    pub async fn run_all(
        &self,
        selector: &SourceSelector,
        run_changes_immediately: bool,
    ) -> AppResult<ImportRunSummary> {
        let timer = TimedOperation::new(&format!("import run for {}", selector));
        let mut summary = ImportRunSummary::default();

        match selector {
            SourceSelector::All => {
                let sources = self.repository.load_all().await?;
                let total = sources.len();

                for (index, source) in sources.into_iter().enumerate() {
                    LogContext::import_progress(index + 1, total, source.source_name());

                    let (source, outcome) = self.reconcile(source, run_changes_immediately).await;
                    match self.write_back(&source).await {
                        Ok(stored) => summary.record(&SourceReport::new(&source, outcome, stored)),
                        Err(e) => {
                            log_error!(
                                "Import source '{}' could not be stored: {}",
                                source.source_name(),
                                e
                            );
                            summary.record(&SourceReport::new(&source, outcome, false));
                            summary.store_errors += 1;
                        }
                    }
                }
            }
            SourceSelector::Source(id) => {
                let source = self.repository.load(*id).await?;
                let report = self.process_one(source, run_changes_immediately).await?;
                summary.record(&report);
            }
        }

        timer.finish_with_info(&summary.to_string());
        Ok(summary)
    }

    /// Reconcile one loaded source and store it if anything changed
    ///
    /// Errors from the importer are folded into the `failing` state; only
    /// a failing `store` is returned as an error.
    pub async fn process_one(
        &self,
        source: ImportSource,
        run_changes_immediately: bool,
    ) -> AppResult<SourceReport> {
        let (source, outcome) = self.reconcile(source, run_changes_immediately).await;
        let stored = self.write_back(&source).await?;
        Ok(SourceReport::new(&source, outcome, stored))
    }

    /// Apply the import outcome to the source's state, without storing
    async fn reconcile(
        &self,
        mut source: ImportSource,
        run_changes_immediately: bool,
    ) -> (ImportSource, SourceOutcome) {
        let attempt = self.attempt_import(&source, run_changes_immediately).await;
        let outcome = match attempt {
            Ok(outcome) => outcome,
            Err(e) => {
                log_warn!("Import for '{}' failed: {}", source.source_name(), e);
                source.set_last_error_message(e.message());
                SourceOutcome::Failed
            }
        };

        if let Some(state) = outcome.target_state() {
            source.set_import_state(state);
        }

        LogContext::state_transition(
            source.source_name(),
            source.loaded_state().as_str(),
            source.import_state().as_str(),
        );

        (source, outcome)
    }

    /// Store the source if it changed, returns whether it was written
    async fn write_back(&self, source: &ImportSource) -> AppResult<bool> {
        if !source.has_been_modified() {
            log_debug!("Import source '{}' unchanged, not storing", source.source_name());
            return Ok(false);
        }

        self.repository.store(source).await?;
        Ok(true)
    }

    async fn attempt_import(
        &self,
        source: &ImportSource,
        run_changes_immediately: bool,
    ) -> AppResult<SourceOutcome> {
        if !self.importer.provides_changes(source.record()).await? {
            return Ok(SourceOutcome::Unchanged);
        }

        if !run_changes_immediately {
            return Ok(SourceOutcome::PendingChanges);
        }

        if self.importer.run(source.record()).await? {
            Ok(SourceOutcome::Applied)
        } else {
            Ok(SourceOutcome::Rejected)
        }
    }
}
