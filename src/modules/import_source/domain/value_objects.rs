/// Value objects for the import source domain
use super::entities::ImportState;
use serde::{Deserialize, Serialize};

/// Import state enum matching database type
#[derive(
    diesel_derive_enum::DbEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::ImportState"]
#[serde(rename_all = "kebab-case")]
pub enum ImportStateDb {
    #[db_rename = "unmodified"]
    Unmodified,
    #[db_rename = "in-sync"]
    InSync,
    #[db_rename = "failing"]
    Failing,
    #[db_rename = "pending-changes"]
    PendingChanges,
}

impl From<ImportStateDb> for ImportState {
    fn from(value: ImportStateDb) -> Self {
        match value {
            ImportStateDb::Unmodified => ImportState::Unmodified,
            ImportStateDb::InSync => ImportState::InSync,
            ImportStateDb::Failing => ImportState::Failing,
            ImportStateDb::PendingChanges => ImportState::PendingChanges,
        }
    }
}

impl From<ImportState> for ImportStateDb {
    fn from(value: ImportState) -> Self {
        match value {
            ImportState::Unmodified => ImportStateDb::Unmodified,
            ImportState::InSync => ImportStateDb::InSync,
            ImportState::Failing => ImportStateDb::Failing,
            ImportState::PendingChanges => ImportStateDb::PendingChanges,
        }
    }
}
