//! Server Implementation
//!
//! HTTP 服务器启动和管理

use tokio::net::TcpListener;

use crate::core::{Result, ServerError, ServerState};
use crate::routes::build_app;

/// HTTP Server
pub struct Server {
    state: ServerState,
}

impl Server {
    /// Create server with initialized state
    pub fn new(state: ServerState) -> Self {
        Self { state }
    }

    /// Bind and serve until Ctrl-C
    pub async fn run(self) -> Result<()> {
        let addr = self.state.config.bind_addr();
        let app = build_app(&self.state).with_state(self.state);

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ServerError::Config(format!("Cannot bind {addr}: {e}")))?;
        tracing::info!("Inventory server listening on http://{}", addr);

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}
