//! ServerBuilder for fluent API to build the search HTTP server

use super::handlers::AppState;
use super::router::build_search_routes;
use crate::core::service::{CompletionService, OrderStore};
use crate::search::{SearchService, SearchSettings};
use anyhow::{Result, anyhow};
use axum::Router;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the search server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_completion_service(HttpCompletionService::from_config(&config.completion)?)
///     .with_order_store(MysqlOrderStore::new(pool))
///     .with_settings(SearchSettings::from_config(&config))
///     .build()?;
/// ```
#[derive(Default)]
pub struct ServerBuilder {
    completion: Option<Arc<dyn CompletionService>>,
    store: Option<Arc<dyn OrderStore>>,
    settings: SearchSettings,
    today: Option<NaiveDate>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the completion service (required)
    pub fn with_completion_service(mut self, service: impl CompletionService + 'static) -> Self {
        self.completion = Some(Arc::new(service));
        self
    }

    /// Set the order store (required)
    pub fn with_order_store(mut self, store: impl OrderStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    pub fn with_settings(mut self, settings: SearchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Pin the date given to the model (tests and demos)
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Build the search service without a router
    pub fn build_service(&mut self) -> Result<SearchService> {
        let completion = self
            .completion
            .clone()
            .ok_or_else(|| anyhow!("Completion service is required"))?;
        let store = self
            .store
            .clone()
            .ok_or_else(|| anyhow!("Order store is required"))?;

        let mut service =
            SearchService::new(completion, store).with_settings(self.settings.clone());
        if let Some(today) = self.today {
            service = service.with_today(today);
        }
        Ok(service)
    }

    /// Build the final router
    pub fn build(mut self) -> Result<Router> {
        let service = self.build_service()?;
        let state = AppState {
            search: Arc::new(service),
        };

        Ok(build_search_routes(state))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Wait for Ctrl+C or SIGTERM
///
/// A handler that cannot be installed never fires; the other one still
/// triggers shutdown.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
