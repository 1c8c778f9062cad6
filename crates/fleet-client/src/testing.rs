//! Test utilities for fleet-client
//!
//! Provides helpers for standing up in-process backends in tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::{BackendClient, CallObserver, ClientConfig, Result};

/// A test server that automatically shuts down when dropped
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: BackendClient,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    /// Serve an axum Router on an ephemeral port
    ///
    /// # Example
    ///
    /// ```ignore
    /// use axum::{routing::get, Router};
    /// use fleet_client::testing::TestServer;
    ///
    /// let router = Router::new().route("/health", get(|| async { "OK" }));
    /// let server = TestServer::start(router).await?;
    /// let health = server.client.health_check(&server.base_url()).await;
    /// assert!(health.available);
    /// ```
    pub async fn start(router: axum::Router) -> Result<Self> {
        Self::start_with_config(router, ClientConfig::default()).await
    }

    /// Serve a Router with a client using custom timeouts
    pub async fn start_with_config(router: axum::Router, config: ClientConfig) -> Result<Self> {
        let client = BackendClient::new(config)?;
        Self::start_with_client(router, client).await
    }

    /// Serve a Router with a client reporting to the given observer
    pub async fn start_with_observer(
        router: axum::Router,
        config: ClientConfig,
        observer: Arc<dyn CallObserver>,
    ) -> Result<Self> {
        let client = BackendClient::with_observer(config, observer)?;
        Self::start_with_client(router, client).await
    }

    async fn start_with_client(router: axum::Router, client: BackendClient) -> Result<Self> {
        // Bind to any available port
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        // Spawn the server
        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        // Give server a moment to start
        tokio::time::sleep(Duration::from_millis(10)).await;

        Ok(Self {
            addr,
            client,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Get the base URL of the test server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get a reference to the client
    pub fn client(&self) -> &BackendClient {
        &self.client
    }

    /// Shutdown the server gracefully
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        // Send shutdown signal if not already done
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        // Abort the task if still running
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Base URL of a local port nothing is listening on.
///
/// Binds an ephemeral port and releases it immediately, so connections to
/// the returned URL are refused.
pub async fn unreachable_base_url() -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}", addr))
}
