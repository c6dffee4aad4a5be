use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::{Extension, Router};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use partpal::analytics::handlers::{
    handle_part_view, handle_popular_searches, handle_search_event, handle_seller_contact,
    handle_summary, handle_top_parts,
};
use partpal::analytics::{EventStore, MemoryEventStore};
use partpal::catalog::types::CatalogFile;
use partpal::catalog::{CatalogStore, MemoryCatalog};
use partpal::search::handlers::{handle_featured, handle_search, handle_suggestions};

#[derive(Parser)]
#[command(name = "partpal")]
struct Args {
    #[arg(long, env = "PORT", default_value = "8080")]
    port: u16,

    /// JSON catalog seed loaded into the in-memory store at startup.
    #[arg(long, env = "PARTPAL_CATALOG")]
    catalog: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let catalog = MemoryCatalog::new();
    if let Some(path) = &args.catalog {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading catalog file {}", path.display()))?;
        let file: CatalogFile = serde_json::from_str(&raw)
            .with_context(|| format!("parsing catalog file {}", path.display()))?;
        catalog.load(file);
        info!(
            parts = catalog.part_count(),
            sellers = catalog.seller_count(),
            "catalog loaded from {}",
            path.display()
        );
    }

    let catalog: Arc<dyn CatalogStore> = Arc::new(catalog);
    let events: Arc<dyn EventStore> = Arc::new(MemoryEventStore::new());

    let app = Router::new()
        .route("/parts/search", get(handle_search))
        .route("/parts/featured", get(handle_featured))
        .route("/parts/suggestions", get(handle_suggestions))
        .route("/analytics/part-view", post(handle_part_view))
        .route("/analytics/search", post(handle_search_event))
        .route("/analytics/seller-contact", post(handle_seller_contact))
        .route("/analytics/summary", get(handle_summary))
        .route("/analytics/top-parts", get(handle_top_parts))
        .route("/analytics/popular-searches", get(handle_popular_searches))
        .route("/health", get(health_check))
        .layer(Extension(catalog))
        .layer(Extension(events))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("PartPal search service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
