/// Import source reconciliation module
///
/// Tracks the synchronization state of each configured import source and
/// updates it from the outcome of the import procedure.
///
/// Architecture:
/// - Domain: entities, the repository trait and the `Importer` capability
/// - Infrastructure: Diesel-based repository implementation
/// - Application: `ImportRunner`, the per-source state machine
pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy access
pub use application::{
    ImportRunSummary, ImportRunner, SourceOutcome, SourceReport, SourceSelector,
};
pub use domain::{ImportSource, ImportSourceRecord, ImportSourceRepository, ImportState, Importer};
pub use infrastructure::ImportSourceRepositoryImpl;
