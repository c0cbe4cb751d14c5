use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::DatabaseConfig;
use crate::database::DatabaseManager;

pub async fn handle(database: &DatabaseConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let manager = DatabaseManager::connect_lazy(database)?;
    let result = manager.migrate().await;
    manager.close().await;
    result?;

    output_success(output_format, "Database migrations applied", None)
}
