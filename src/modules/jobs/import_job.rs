/// Job hook running the import reconciliation at regular intervals
use crate::modules::import_source::application::runner::{ImportRunner, SourceSelector};
use crate::modules::jobs::domain::hook::JobHook;
use crate::shared::errors::AppResult;
use crate::log_info;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use std::sync::Arc;

/// Settings of an import job definition
///
/// `run_import` applies changes only when it is `"y"` or `true`. Any other
/// value, or none at all, makes the job only record which sources have
/// pending changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImportJobSettings {
    pub source_id: SourceSelector,
    #[serde(default, deserialize_with = "yes_no")]
    pub run_import: bool,
}

impl ImportJobSettings {
    pub fn from_value(settings: &serde_json::Value) -> AppResult<Self> {
        Ok(Self::deserialize(settings)?)
    }
}

fn yes_no<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    // Only an explicit yes applies changes, anything else means learn-only
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(flag) => flag,
        serde_json::Value::String(text) => text == "y",
        _ => false,
    })
}

pub struct ImportJob {
    runner: Arc<ImportRunner>,
}

impl ImportJob {
    pub const NAME: &'static str = "import";

    pub fn new(runner: Arc<ImportRunner>) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl JobHook for ImportJob {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "The Import job allows to run import actions at regular intervals"
    }

    async fn run(&self, settings: &serde_json::Value) -> AppResult<()> {
        let settings = ImportJobSettings::from_value(settings)?;

        let summary = self
            .runner
            .run_all(&settings.source_id, settings.run_import)
            .await?;

        log_info!("Import job for {} done: {}", settings.source_id, summary);
        Ok(())
    }
}
