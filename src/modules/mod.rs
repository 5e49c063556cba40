pub mod import_source;
pub mod jobs;
