pub mod entities;
pub mod hook;

pub use entities::{JobDefinition, JobRunState};
pub use hook::JobHook;
