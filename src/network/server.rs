//! HTTP Server
//!
//! Binds the listener and serves the read-only router.

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::error::Result;
use crate::storage::TableStore;

use super::handler::get_records;

/// Build the query router over `store`
///
/// `/api/records/:table` is kept as an alias of `/records/:table`.
pub fn router(store: TableStore) -> Router {
    Router::new()
        .route("/records/:table", get(get_records))
        .route("/api/records/:table", get(get_records))
        .with_state(store)
}

/// HTTP server for the query service
pub struct Server {
    config: Config,
    store: TableStore,
}

impl Server {
    /// Create a server over the tables in `config.data_dir`
    pub fn new(config: Config) -> Result<Self> {
        let store = TableStore::open(&config.data_dir)?;
        Ok(Self { config, store })
    }

    /// Serve until Ctrl+C
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.listen_addr).await?;
        tracing::info!(
            addr = %self.config.listen_addr,
            data_dir = %self.store.dir().display(),
            "query service listening"
        );

        axum::serve(listener, router(self.store))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("query service stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "unable to install ctrl+c handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("received Ctrl+C, shutting down");
}
