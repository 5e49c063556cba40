/// Test helper functions and service builders
use super::fakes::{InMemoryImportSourceRepository, ScriptedImporter};
use import_sync_lib::modules::import_source::ImportRunner;
use std::sync::Arc;

pub struct TestServices {
    pub repository: Arc<InMemoryImportSourceRepository>,
    pub importer: Arc<ScriptedImporter>,
    pub runner: Arc<ImportRunner>,
}

/// Wire a runner over the given fakes
pub fn build_test_services(
    repository: InMemoryImportSourceRepository,
    importer: ScriptedImporter,
) -> TestServices {
    let repository = Arc::new(repository);
    let importer = Arc::new(importer);
    let runner = Arc::new(ImportRunner::new(repository.clone(), importer.clone()));

    TestServices {
        repository,
        importer,
        runner,
    }
}
