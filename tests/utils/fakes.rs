/// In-memory stand-ins for the import source store and the import procedure
use async_trait::async_trait;
use import_sync_lib::modules::import_source::{
    ImportSource, ImportSourceRecord, ImportSourceRepository, Importer,
};
use import_sync_lib::shared::errors::{AppError, AppResult};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// Import source table kept in memory, counting every `store` call
#[derive(Default)]
pub struct InMemoryImportSourceRepository {
    rows: Mutex<Vec<ImportSourceRecord>>,
    stores: Mutex<Vec<Uuid>>,
}

impl InMemoryImportSourceRepository {
    pub fn with_sources(sources: Vec<ImportSourceRecord>) -> Self {
        Self {
            rows: Mutex::new(sources),
            stores: Mutex::new(Vec::new()),
        }
    }

    pub fn get(&self, id: Uuid) -> ImportSourceRecord {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .expect("source exists")
    }

    pub fn store_count(&self, id: Uuid) -> usize {
        self.stores.lock().unwrap().iter().filter(|s| **s == id).count()
    }

    pub fn total_stores(&self) -> usize {
        self.stores.lock().unwrap().len()
    }
}

#[async_trait]
impl ImportSourceRepository for InMemoryImportSourceRepository {
    async fn load_all(&self) -> AppResult<Vec<ImportSource>> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| a.source_name.cmp(&b.source_name));
        Ok(rows.into_iter().map(ImportSource::from_record).collect())
    }

    async fn load(&self, id: Uuid) -> AppResult<ImportSource> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .map(ImportSource::from_record)
            .ok_or_else(|| AppError::NotFound(format!("Import source {} not found", id)))
    }

    async fn store(&self, source: &ImportSource) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id == source.id())
            .ok_or_else(|| AppError::NotFound(format!("Import source {} not found", source.id())))?;
        *row = source.record().clone();
        self.stores.lock().unwrap().push(source.id());
        Ok(())
    }
}

/// How the scripted import behaves for one source
#[derive(Debug, Clone)]
pub enum Script {
    NoChanges,
    /// Changes pending; applying returns the given result
    Pending(Result<bool, String>),
    /// The pending-changes check itself errors
    CheckFails(String),
}

/// Import procedure driven by a per-source script
///
/// A successful apply clears the pending changes, like a real import would.
#[derive(Default)]
pub struct ScriptedImporter {
    scripts: Mutex<HashMap<Uuid, Script>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedImporter {
    pub fn script(self, id: Uuid, script: Script) -> Self {
        self.scripts.lock().unwrap().insert(id, script);
        self
    }

    /// Calls made so far, as "check:<name>" / "apply:<name>"
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn script_for(&self, id: Uuid) -> Script {
        self.scripts
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .unwrap_or(Script::NoChanges)
    }
}

#[async_trait]
impl Importer for ScriptedImporter {
    async fn provides_changes(&self, source: &ImportSourceRecord) -> AppResult<bool> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("check:{}", source.source_name));

        match self.script_for(source.id) {
            Script::NoChanges => Ok(false),
            Script::Pending(_) => Ok(true),
            Script::CheckFails(message) => Err(AppError::DatabaseError(message)),
        }
    }

    async fn run(&self, source: &ImportSourceRecord) -> AppResult<bool> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("apply:{}", source.source_name));

        match self.script_for(source.id) {
            Script::Pending(Ok(true)) => {
                self.scripts
                    .lock()
                    .unwrap()
                    .insert(source.id, Script::NoChanges);
                Ok(true)
            }
            Script::Pending(Ok(false)) => Ok(false),
            Script::Pending(Err(message)) => Err(AppError::ImportError(message)),
            Script::NoChanges | Script::CheckFails(_) => Ok(false),
        }
    }
}
