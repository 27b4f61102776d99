//! Natural-language order search server backed by MySQL
//!
//! Configuration is read from the YAML file named by `NL_SEARCH_CONFIG`
//! (defaults otherwise) with `NL_SEARCH_*` environment overrides.

use anyhow::Result;
use nlsearch::prelude::*;
use sqlx::mysql::MySqlPoolOptions;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = AppConfig::from_env_or_default()?;
    tracing::info!(
        endpoint = %config.completion.endpoint,
        model = %config.completion.model,
        "Completion service configured"
    );

    let pool = MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    ensure_schema(&pool).await?;
    tracing::info!("Database schema ready");

    ServerBuilder::new()
        .with_completion_service(HttpCompletionService::from_config(&config.completion)?)
        .with_order_store(MysqlOrderStore::new(pool))
        .with_settings(SearchSettings::from_config(&config))
        .serve(&config.server.bind_addr)
        .await
}
