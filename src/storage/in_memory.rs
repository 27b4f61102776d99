//! In-memory implementation of OrderStore for testing and development

use crate::core::order::OrderRow;
use crate::core::service::OrderStore;
use crate::query::CompiledQuery;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// In-memory order store
///
/// Holds already-joined rows and evaluates compiled predicates directly.
/// Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    rows: Arc<RwLock<Vec<OrderRow>>>,
}

impl InMemoryOrderStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with rows
    pub fn with_rows(rows: impl IntoIterator<Item = OrderRow>) -> Self {
        Self {
            rows: Arc::new(RwLock::new(rows.into_iter().collect())),
        }
    }

    /// Add one row
    pub fn insert(&self, row: OrderRow) -> Result<()> {
        self.rows
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?
            .push(row);
        Ok(())
    }

    /// Number of stored rows
    pub fn len(&self) -> Result<usize> {
        let rows = self
            .rows
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        Ok(rows.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn execute(&self, query: &CompiledQuery) -> Result<Vec<OrderRow>> {
        let rows = self
            .rows
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(query.apply(rows.iter()))
    }
}
