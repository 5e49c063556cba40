/// Domain entities for import sources
///
/// An import source is a configured origin of external data. Its
/// `import_state` tells whether the last import attempt left it in sync,
/// with changes waiting to be applied, or failing.
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Synchronization state of an import source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ImportState {
    #[default]
    Unmodified,
    InSync,
    Failing,
    PendingChanges,
}

impl ImportState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportState::Unmodified => "unmodified",
            ImportState::InSync => "in-sync",
            ImportState::Failing => "failing",
            ImportState::PendingChanges => "pending-changes",
        }
    }
}

impl std::fmt::Display for ImportState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ImportState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unmodified" => Ok(ImportState::Unmodified),
            "in-sync" => Ok(ImportState::InSync),
            "failing" => Ok(ImportState::Failing),
            "pending-changes" => Ok(ImportState::PendingChanges),
            _ => Err(format!("Invalid import state: {}", s)),
        }
    }
}

/// Import source row as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSourceRecord {
    pub id: Uuid,
    pub source_name: String,
    pub import_state: ImportState,
    pub last_error_message: Option<String>,
}

impl ImportSourceRecord {
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_name: source_name.into(),
            import_state: ImportState::Unmodified,
            last_error_message: None,
        }
    }
}

/// A freshly loaded import source that remembers what it looked like on load
///
/// Mutations go through the setters; `has_been_modified` compares the
/// current values against the loaded snapshot so callers only write back
/// rows that actually changed.
#[derive(Debug, Clone)]
pub struct ImportSource {
    loaded: ImportSourceRecord,
    current: ImportSourceRecord,
}

impl ImportSource {
    pub fn from_record(record: ImportSourceRecord) -> Self {
        Self {
            loaded: record.clone(),
            current: record,
        }
    }

    pub fn id(&self) -> Uuid {
        self.current.id
    }

    pub fn source_name(&self) -> &str {
        &self.current.source_name
    }

    pub fn import_state(&self) -> ImportState {
        self.current.import_state
    }

    pub fn last_error_message(&self) -> Option<&str> {
        self.current.last_error_message.as_deref()
    }

    pub fn record(&self) -> &ImportSourceRecord {
        &self.current
    }

    pub fn set_import_state(&mut self, state: ImportState) {
        self.current.import_state = state;
    }

    pub fn set_last_error_message(&mut self, message: impl Into<String>) {
        self.current.last_error_message = Some(message.into());
    }

    /// Whether any field differs from the loaded snapshot
    pub fn has_been_modified(&self) -> bool {
        self.loaded != self.current
    }

    /// State the source had when it was loaded
    pub fn loaded_state(&self) -> ImportState {
        self.loaded.import_state
    }
}
