//! law-rag server binary
//!
//! Run with: cargo run --bin law-rag-server

use law_rag::{config::RagConfig, server::RagServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "law_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RagConfig::from_env()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Document: {}", config.document.path.display());
    tracing::info!("  - Embedding model: {}", config.openai.embed_model);
    tracing::info!("  - Extraction model: {}", config.openai.extraction_model);
    tracing::info!("  - Generation model: {}", config.openai.generate_model);
    tracing::info!("  - Top-k: {}", config.retrieval.top_k);

    let server = RagServer::new(config)?;

    tracing::info!("Endpoints:");
    tracing::info!("  GET  /        - liveness");
    tracing::info!("  GET  /health  - health check");
    tracing::info!("  GET  /query   - ask a question (query parameter: query)");

    server.start().await?;

    Ok(())
}
