//! paw-adoption - schema migration and ledger audit entry point.
//!
//! Loads configuration, prepares the database and replays every user's
//! PawPoints ledger against the cached balance. Exits non-zero when any
//! balance has drifted.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};

use paw_adoption::adapters::{
    PostgresAdoptionReader, PostgresAdoptionStore, PostgresLedgerReader, PostgresStoryRepository,
    SystemClock, TracingEventPublisher,
};
use paw_adoption::application::AdoptionWorkflow;
use paw_adoption::config::{AppConfig, LoggingConfig};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let config = AppConfig::load().context("loading configuration")?;
    config.validate().context("validating configuration")?;
    init_logging(&config.logging)?;

    let connect_options = config
        .database
        .connect_options()
        .context("parsing database URL")?;
    let pool = config
        .database
        .pool_options()
        .connect_with(connect_options)
        .await
        .context("connecting to PostgreSQL")?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("running migrations")?;
        info!("Migrations applied");
    }

    let workflow = AdoptionWorkflow::new(
        Arc::new(PostgresAdoptionStore::new(pool.clone())),
        Arc::new(PostgresAdoptionReader::new(pool.clone())),
        Arc::new(PostgresStoryRepository::new(pool.clone())),
        Arc::new(PostgresLedgerReader::new(pool)),
        Arc::new(TracingEventPublisher::new()),
        Arc::new(SystemClock),
        config.policy.to_policy(),
    );

    let report = workflow.audit_ledger().await?;
    if report.is_consistent() {
        info!(users_checked = report.users_checked, "PawPoints ledger consistent");
        Ok(ExitCode::SUCCESS)
    } else {
        for finding in &report.findings {
            error!(
                user_id = %finding.user_id,
                discrepancies = %serde_json::to_string(&finding.discrepancies)?,
                "PawPoints ledger inconsistent"
            );
        }
        Ok(ExitCode::FAILURE)
    }
}

fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = config.env_filter()?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    if config.json {
        builder
            .json()
            .try_init()
            .map_err(|err| anyhow::anyhow!("installing JSON subscriber: {err}"))
    } else {
        builder
            .try_init()
            .map_err(|err| anyhow::anyhow!("installing subscriber: {err}"))
    }
}
