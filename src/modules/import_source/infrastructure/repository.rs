/// Diesel-based implementation of ImportSourceRepository
use crate::modules::import_source::domain::entities::ImportSource;
use crate::modules::import_source::domain::repository::ImportSourceRepository;
use crate::modules::import_source::infrastructure::models::{
    ImportSourceChangeset, ImportSourceModel,
};
use crate::schema::import_source;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::database::{DbConnection, DbPool};
use crate::shared::utils::logger::{LogContext, TimedOperation};
use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

pub struct ImportSourceRepositoryImpl {
    pool: DbPool,
}

impl ImportSourceRepositoryImpl {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get database connection from pool
    fn get_conn(&self) -> AppResult<DbConnection> {
        self.pool
            .get()
            .map_err(|e| AppError::DatabaseError(format!("Failed to get connection: {}", e)))
    }
}

#[async_trait]
impl ImportSourceRepository for ImportSourceRepositoryImpl {
    async fn load_all(&self) -> AppResult<Vec<ImportSource>> {
        let mut conn = self.get_conn()?;
        let timer = TimedOperation::new("load_all import_source");

        let rows: Vec<ImportSourceModel> = import_source::table
            .order(import_source::source_name.asc())
            .select(ImportSourceModel::as_select())
            .load(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to load import sources: {}", e)))?;

        timer.finish_with_info(&format!("{} rows", rows.len()));
        Ok(rows.into_iter().map(|row| row.to_import_source()).collect())
    }

    async fn load(&self, id: Uuid) -> AppResult<ImportSource> {
        let mut conn = self.get_conn()?;

        let row: Option<ImportSourceModel> = import_source::table
            .find(id)
            .select(ImportSourceModel::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| AppError::DatabaseError(format!("Failed to load import source: {}", e)))?;

        row.map(|r| r.to_import_source())
            .ok_or_else(|| AppError::NotFound(format!("Import source {} not found", id)))
    }

    async fn store(&self, source: &ImportSource) -> AppResult<()> {
        let mut conn = self.get_conn()?;
        let changeset = ImportSourceChangeset::from(source.record());
        LogContext::db_operation("store", "import_source", None);

        let updated = diesel::update(import_source::table.find(source.id()))
            .set(&changeset)
            .execute(&mut conn)
            .map_err(|e| AppError::DatabaseError(format!("Failed to store import source: {}", e)))?;

        if updated == 0 {
            return Err(AppError::NotFound(format!(
                "Import source {} not found",
                source.id()
            )));
        }

        Ok(())
    }
}
