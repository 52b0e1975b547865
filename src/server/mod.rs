//! HTTP server for the law-rag service

pub mod routes;

use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::RagConfig;
use crate::error::{Error, Result};
use crate::pipeline::QueryPipeline;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The query pipeline with its providers and index cache
    pub pipeline: Arc<QueryPipeline>,
}

/// law-rag HTTP server
pub struct RagServer {
    config: RagConfig,
    state: AppState,
}

impl RagServer {
    /// Create the server. Provider construction validates the API credential,
    /// so a missing key fails here rather than on the first query.
    pub fn new(config: RagConfig) -> Result<Self> {
        let pipeline = Arc::new(QueryPipeline::new(config.clone())?);
        Ok(Self {
            config,
            state: AppState { pipeline },
        })
    }

    /// Build the router with all routes and middleware
    fn build_router(&self) -> Router {
        let mut router = routes::api_routes().with_state(self.state.clone());

        if self.config.server.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            router = router.layer(cors);
        }

        router.layer(TraceLayer::new_for_http())
    }

    /// Bind and serve until shutdown
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.server.host, self.config.server.port)
            .parse()
            .map_err(|e| Error::Config(format!("Invalid address: {}", e)))?;

        let router = self.build_router();

        tracing::info!("Starting law-rag server on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Config(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| Error::Config(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// The configured server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.server.host, self.config.server.port)
    }
}
