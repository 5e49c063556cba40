/// Repository trait for import source persistence
///
/// Each call loads fresh values; nothing is cached between import runs.
use crate::modules::import_source::domain::entities::ImportSource;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImportSourceRepository: Send + Sync {
    /// Load every import source, ordered by source name ascending
    async fn load_all(&self) -> AppResult<Vec<ImportSource>>;

    /// Load a single import source, `AppError::NotFound` if it does not exist
    async fn load(&self, id: Uuid) -> AppResult<ImportSource>;

    /// Write back name, state and last error message
    async fn store(&self, source: &ImportSource) -> AppResult<()>;
}
