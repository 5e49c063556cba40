/// Capability the scheduler needs from a job implementation
use crate::shared::errors::AppResult;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobHook: Send + Sync {
    /// Registry key, referenced by `JobDefinition::job_class`
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Run the job once with the settings of its definition
    async fn run(&self, settings: &serde_json::Value) -> AppResult<()>;
}
