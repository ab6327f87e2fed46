//! API server lifecycle — starts/stops the axum HTTP server.
//!
//! Pattern: bind → spawn background task → return handle with shutdown
//! channel. The handle owns the bound address so callers (and tests)
//! know the actual port when binding to an ephemeral one.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::oneshot;

use crate::api::router::api_router;
use crate::interactions::InteractionTable;

/// Handle to a running API server.
pub struct ApiServer {
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl ApiServer {
    /// Shut down the server gracefully. Idempotent.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("API server shutdown signal sent");
        }
    }
}

/// Start the API server on the given address.
///
/// Binds, builds the router over the shared table, and spawns the axum
/// server in a background tokio task. Returns a handle with the bound
/// address and a shutdown channel.
pub async fn start_api_server(
    table: Arc<InteractionTable>,
    addr: SocketAddr,
) -> Result<ApiServer, std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let addr = listener.local_addr()?;

    tracing::info!(%addr, "API server binding");

    let app = api_router(table);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("API server received shutdown signal");
        };

        tracing::info!(%addr, "API server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("API server error: {e}");
        }

        tracing::info!("API server stopped");
    });

    Ok(ApiServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn localhost_ephemeral() -> SocketAddr {
        "127.0.0.1:0".parse().unwrap()
    }

    #[tokio::test]
    async fn start_and_stop_server() {
        let table = Arc::new(InteractionTable::load_test());
        let mut server = start_api_server(table, localhost_ephemeral())
            .await
            .expect("server should start");

        assert!(server.addr.port() > 0);

        let url = format!("http://{}/api/health", server.addr);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        server.shutdown();
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }

    #[tokio::test]
    async fn server_serves_check_endpoint() {
        let table = Arc::new(InteractionTable::load_test());
        let mut server = start_api_server(table, localhost_ephemeral())
            .await
            .expect("server should start");

        let client = reqwest::Client::new();
        let resp = client
            .post(format!("http://{}/api/interactions", server.addr))
            .json(&serde_json::json!({
                "drugs": ["aspirin", "warfarin"],
                "age": 45,
                "conditions": ""
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["findings"].as_array().unwrap().len(), 1);

        server.shutdown();
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let table = Arc::new(InteractionTable::load_test());
        let mut server = start_api_server(table, localhost_ephemeral())
            .await
            .expect("server should start");

        server.shutdown();
        server.shutdown(); // Second call should be safe
    }
}
