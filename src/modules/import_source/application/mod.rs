pub mod runner;

pub use runner::{ImportRunSummary, ImportRunner, SourceOutcome, SourceReport, SourceSelector};
