use clap::Subcommand;
use serde_json::json;

use crate::cli::{utils::output_success, OutputFormat};
use crate::config;
use crate::database::{schema, DatabaseManager};

#[derive(Subcommand)]
pub enum DbCommands {
    #[command(about = "Create the catalog tables if they do not exist")]
    Init,

    #[command(about = "Check that the configured database is reachable")]
    Ping,
}

pub async fn handle(cmd: DbCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let database = &config::config().database;
    let pool = DatabaseManager::connect(database).await?;
    let target = database
        .url
        .as_deref()
        .map(DatabaseManager::redact_url)
        .unwrap_or_default();

    let result = match cmd {
        DbCommands::Init => {
            schema::ensure_schema(&pool).await?;
            output_success(
                &output_format,
                "Catalog schema is in place",
                Some(json!({ "database": target })),
            )
        }
        DbCommands::Ping => {
            DatabaseManager::health_check(&pool).await?;
            output_success(
                &output_format,
                &format!("Database reachable: {}", target),
                Some(json!({ "database": target })),
            )
        }
    };

    pool.close().await;
    result
}
