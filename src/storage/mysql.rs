//! MySQL storage backend using sqlx.
//!
//! Provides `MysqlOrderStore`, an [`OrderStore`] backed by a
//! `sqlx::MySqlPool`.
//!
//! # Feature flag
//!
//! This module is gated behind the `mysql` feature flag:
//! ```toml
//! [dependencies]
//! order-nl-search = { version = "0.1", features = ["mysql"] }
//! ```
//!
//! # Schema
//!
//! Orders reference a location and a company (both required) and an
//! optional carrier. `orders.flags` is a comma-joined token list matched
//! with `FIND_IN_SET`.

use crate::core::order::OrderRow;
use crate::core::service::OrderStore;
use crate::query::CompiledQuery;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use sqlx::MySqlPool;

// ---------------------------------------------------------------------------
// Schema management
// ---------------------------------------------------------------------------

const SCHEMA: &[(&str, &str)] = &[
    (
        "locations",
        "CREATE TABLE IF NOT EXISTS locations (
            id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            location_type VARCHAR(32) NULL,
            city VARCHAR(255) NULL,
            INDEX idx_location_type (location_type)
        )",
    ),
    (
        "companies",
        "CREATE TABLE IF NOT EXISTS companies (
            id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
            name VARCHAR(255) NOT NULL
        )",
    ),
    (
        "carriers",
        "CREATE TABLE IF NOT EXISTS carriers (
            id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
            name VARCHAR(255) NOT NULL
        )",
    ),
    (
        "orders",
        "CREATE TABLE IF NOT EXISTS orders (
            id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
            tracking_no VARCHAR(64) NULL,
            order_no VARCHAR(64) NULL,
            service VARCHAR(32) NULL,
            status VARCHAR(32) NULL,
            collected_by_type VARCHAR(32) NULL,
            recipient_phone VARCHAR(32) NULL,
            compartment_no INT NULL,
            time_created DATETIME NOT NULL,
            time_stored DATETIME NULL,
            time_collected DATETIME NULL,
            expires_at DATETIME NULL,
            flags VARCHAR(255) NULL,
            location_id BIGINT NOT NULL,
            company_id BIGINT NOT NULL,
            carrier_id BIGINT NULL,
            INDEX idx_time_created (time_created),
            INDEX idx_status (status),
            FOREIGN KEY (location_id) REFERENCES locations(id),
            FOREIGN KEY (company_id) REFERENCES companies(id),
            FOREIGN KEY (carrier_id) REFERENCES carriers(id)
        )",
    ),
];

/// Apply the required tables and indexes (idempotent).
///
/// Creates `locations`, `companies`, `carriers` and `orders`.
/// Safe to call on every startup.
pub async fn ensure_schema(pool: &MySqlPool) -> Result<()> {
    for (table, ddl) in SCHEMA {
        sqlx::query(*ddl)
            .execute(pool)
            .await
            .map_err(|e| anyhow!("Failed to create {} table: {}", table, e))?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// MysqlOrderStore
// ---------------------------------------------------------------------------

/// Order store executing compiled queries against MySQL
#[derive(Clone, Debug)]
pub struct MysqlOrderStore {
    pool: MySqlPool,
}

impl MysqlOrderStore {
    /// Create a new MySQL order store with the given connection pool
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for MysqlOrderStore {
    async fn execute(&self, query: &CompiledQuery) -> Result<Vec<OrderRow>> {
        let sql = query.sql();
        tracing::debug!(%sql, params = query.params.len(), "Executing order search");

        let mut statement = sqlx::query_as::<_, OrderRow>(&sql);
        for param in &query.params {
            statement = statement.bind(param);
        }

        statement
            .fetch_all(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to execute order search: {}", e))
    }
}
