// Shared kernel: configuration, errors, persistence and logging used by all modules

pub mod config;
pub mod errors;
pub mod infrastructure;
pub mod utils;

// Re-exports for convenience
pub use infrastructure::database::Database;
