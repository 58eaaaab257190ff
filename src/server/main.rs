//! HTTP server for zoning lookups.
//!
//! Thin boundary over the resolution pipeline: routing, parameter parsing
//! and error-to-status translation only.

use std::sync::Arc;

use anyhow::Result;
use axum::{routing::get, Router};
use clap::Parser;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use ipe::geocode::GoogleGeocoder;
use ipe::pipeline::ResolutionPipeline;
use ipe::zone::{PostgisZoneStore, ZoneResolver};

mod routes;
use routes::{by_address_handler, by_coordinate_handler, health_handler};

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Urban zoning lookup server")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:3000")]
    listen: String,

    /// PostGIS connection string
    #[arg(long, default_value = "postgres://localhost/zoning")]
    database_url: String,
}

/// Application state shared across handlers
struct AppState {
    pipeline: ResolutionPipeline<GoogleGeocoder, PostgisZoneStore>,
    store: PostgisZoneStore,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Ipe zoning lookup server");
    info!("Connecting to spatial store at {}", args.database_url);

    let store = PostgisZoneStore::connect(&args.database_url).await?;
    store.ping().await?;

    // A missing credential only disables the address path; lookups by
    // coordinate keep working, so this is not fatal at startup.
    let api_key = std::env::var("GEOCODING_API_KEY").ok();
    if api_key.is_none() {
        warn!("GEOCODING_API_KEY is not set; address lookups will fail");
    }

    let geocoder = GoogleGeocoder::new(api_key);
    let pipeline = ResolutionPipeline::new(geocoder, ZoneResolver::new(store.clone()));

    let state = Arc::new(AppState { pipeline, store });

    // Build router
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/zone/by-coordinate", get(by_coordinate_handler))
        .route("/v1/zone/by-address", get(by_address_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("Starting server on {}", args.listen);

    let listener = tokio::net::TcpListener::bind(&args.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
