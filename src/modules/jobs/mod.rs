/// Scheduled job system module
///
/// Runs registered job hooks (such as the import job) at the interval of
/// their job definitions.
///
/// Architecture:
/// - Domain: job definition, run state and the `JobHook` trait
/// - Registry: hooks by name
/// - Scheduler: polling loop that runs due jobs and records outcomes
pub mod domain;
pub mod import_job;
pub mod registry;
pub mod scheduler;

// Re-exports for easy access
pub use domain::{
    entities::{JobDefinition, JobRunState},
    hook::JobHook,
};
pub use import_job::{ImportJob, ImportJobSettings};
pub use registry::JobRegistry;
pub use scheduler::{Scheduler, SchedulerStatistics};
