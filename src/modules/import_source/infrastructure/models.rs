/// Diesel models for the import_source table
use crate::modules::import_source::domain::entities::{ImportSource, ImportSourceRecord};
use crate::modules::import_source::domain::value_objects::ImportStateDb;
use crate::schema::import_source;
use diesel::prelude::*;
use uuid::Uuid;

/// Diesel model for querying import sources
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = import_source)]
pub struct ImportSourceModel {
    pub id: Uuid,
    pub source_name: String,
    pub import_state: ImportStateDb,
    pub last_error_message: Option<String>,
}

impl ImportSourceModel {
    /// Convert to a domain ImportSource with a fresh loaded snapshot
    pub fn to_import_source(self) -> ImportSource {
        ImportSource::from_record(ImportSourceRecord {
            id: self.id,
            source_name: self.source_name,
            import_state: self.import_state.into(),
            last_error_message: self.last_error_message,
        })
    }
}

/// Diesel changeset written back by `store`
#[derive(AsChangeset, Debug)]
#[diesel(table_name = import_source, treat_none_as_null = true)]
pub struct ImportSourceChangeset<'a> {
    pub source_name: &'a str,
    pub import_state: ImportStateDb,
    pub last_error_message: Option<&'a str>,
}

impl<'a> From<&'a ImportSourceRecord> for ImportSourceChangeset<'a> {
    fn from(record: &'a ImportSourceRecord) -> Self {
        Self {
            source_name: &record.source_name,
            import_state: record.import_state.into(),
            last_error_message: record.last_error_message.as_deref(),
        }
    }
}
