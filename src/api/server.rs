//! API server lifecycle.
//!
//! Binds a listener, mounts the clinic router, and runs axum in a
//! background task. The returned handle owns a shutdown channel; the
//! accept loop drains gracefully when it fires.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::api::router::clinic_router;
use crate::api::types::ApiContext;

/// Handle to a running API server.
pub struct ApiServer {
    local_addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl ApiServer {
    /// The address the listener actually bound. With port 0 this is
    /// where the ephemeral port shows up.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting connections. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("API server shutdown signal sent");
        }
    }
}

/// Bind `addr` and serve the clinic API in a background task.
pub async fn start_server(addr: SocketAddr, ctx: ApiContext) -> std::io::Result<ApiServer> {
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    let app = clinic_router(ctx);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("API server received shutdown signal");
        };

        tracing::info!(%local_addr, "API server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("API server error: {e}");
        }

        tracing::info!("API server stopped");
    });

    Ok(ApiServer {
        local_addr,
        shutdown_tx: Some(shutdown_tx),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Store;

    async fn start_test_server() -> ApiServer {
        let store = Store::open_in_memory().unwrap();
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        start_server(addr, ApiContext::new(store)).await.unwrap()
    }

    #[tokio::test]
    async fn serves_health_over_tcp() {
        let mut server = start_test_server().await;

        let url = format!("http://{}/health", server.local_addr());
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["status"], "ok");

        server.shutdown();
    }

    #[tokio::test]
    async fn round_trips_a_doctor() {
        let mut server = start_test_server().await;
        let base = format!("http://{}", server.local_addr());
        let client = reqwest::Client::new();

        let resp = client
            .post(format!("{base}/doctors"))
            .json(&serde_json::json!({
                "name": "Ana Souza",
                "specialty": "Cardiologia",
                "crm": "12345",
                "email": "ana@clinica.com",
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::CREATED);
        let created: serde_json::Value = resp.json().await.unwrap();

        let resp = client
            .get(format!("{base}/doctors/{}", created["id"].as_str().unwrap()))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        server.shutdown();
    }

    #[tokio::test]
    async fn error_bodies_keep_the_contract_on_the_wire() {
        let mut server = start_test_server().await;

        let url = format!(
            "http://{}/doctors/{}",
            server.local_addr(),
            uuid::Uuid::new_v4()
        );
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["errors"][0], "Doctor not found.");

        server.shutdown();
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let mut server = start_test_server().await;
        server.shutdown();
        server.shutdown();
    }
}
