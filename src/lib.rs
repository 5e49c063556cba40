pub mod modules;
mod schema;
pub mod shared;

use anyhow::Context;
use modules::{
    import_source::{
        ImportRunner, ImportSourceRepository, ImportSourceRepositoryImpl, Importer, SourceSelector,
    },
    jobs::{ImportJob, JobDefinition, JobRegistry, Scheduler},
};
use shared::{config::AppConfig, utils::init_logger, Database};
use std::sync::Arc;

/// Start the import scheduler and block until ctrl-c
///
/// The import procedure itself is supplied by the host through `importer`;
/// everything else (database, migrations, job wiring) is set up from the
/// environment.
pub async fn run(importer: Arc<dyn Importer>) -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();
    init_logger();

    let config = AppConfig::from_env().context("Failed to load configuration")?;

    let database = Database::new(&config.database_url).context("Database unavailable")?;
    database
        .run_migrations()
        .context("Failed to run database migrations")?;

    let repository: Arc<dyn ImportSourceRepository> =
        Arc::new(ImportSourceRepositoryImpl::new(database.pool().clone()));
    let runner = Arc::new(ImportRunner::new(repository, importer));

    let mut registry = JobRegistry::new();
    registry.register(Arc::new(ImportJob::new(runner)));
    log_info!("Registered job hooks: {}", registry.names().join(", "));

    let definitions = vec![import_job_definition(&config)?];
    let scheduler = Arc::new(
        Scheduler::new(Arc::new(registry), definitions, config.poll_interval)
            .context("Invalid job definitions")?,
    );

    let worker = scheduler.clone();
    let worker_handle = tokio::spawn(async move {
        worker.run().await;
    });
    log_info!("Scheduler initialized for import sources");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    scheduler.stop();
    worker_handle.await.context("Scheduler task panicked")?;

    Ok(())
}

/// Job definition for the import job configured through the environment
pub fn import_job_definition(config: &AppConfig) -> anyhow::Result<JobDefinition> {
    let selector: SourceSelector = config
        .import_source
        .parse()
        .context("IMPORT_JOB_SOURCE must be __ALL__ or an import source id")?;

    Ok(JobDefinition::new(
        "import",
        ImportJob::NAME,
        serde_json::json!({
            "source_id": selector,
            "run_import": if config.run_import { "y" } else { "n" },
        }),
        config.import_interval,
    ))
}
