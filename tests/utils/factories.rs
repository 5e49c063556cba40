/// Test data factories using builder pattern
///
/// Provides convenient methods to create test data with sensible defaults
use import_sync_lib::modules::import_source::{ImportSourceRecord, ImportState};
use uuid::Uuid;

pub struct ImportSourceFactory {
    id: Uuid,
    source_name: String,
    import_state: ImportState,
    last_error_message: Option<String>,
}

impl Default for ImportSourceFactory {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            source_name: format!("source-{}", Uuid::new_v4().simple()),
            import_state: ImportState::Unmodified,
            last_error_message: None,
        }
    }
}

impl ImportSourceFactory {
    pub fn named(source_name: &str) -> Self {
        Self {
            source_name: source_name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_state(mut self, import_state: ImportState) -> Self {
        self.import_state = import_state;
        self
    }

    pub fn with_error(mut self, message: &str) -> Self {
        self.last_error_message = Some(message.to_string());
        self
    }

    pub fn build(self) -> ImportSourceRecord {
        ImportSourceRecord {
            id: self.id,
            source_name: self.source_name,
            import_state: self.import_state,
            last_error_message: self.last_error_message,
        }
    }
}
