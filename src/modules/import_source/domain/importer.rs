/// The import procedure as seen by the reconciliation runner
///
/// Fetching, diffing and applying rows lives behind this trait.
use crate::modules::import_source::domain::entities::ImportSourceRecord;
use crate::shared::errors::AppResult;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Importer: Send + Sync {
    /// Whether the source currently has changes that have not been applied
    async fn provides_changes(&self, source: &ImportSourceRecord) -> AppResult<bool>;

    /// Apply pending changes. `Ok(false)` means the import rejected them.
    async fn run(&self, source: &ImportSourceRecord) -> AppResult<bool>;
}
