//! LootHub Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::header::HeaderName;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use loothub_engine::api::{self, http::ADMIN_PIN_HEADER};
use loothub_engine::infrastructure::{
    clock::{SystemClock, SystemRandom},
    config::{EngineConfig, StoreBackend},
    memory_store::MemoryStore,
    ports::{ClockPort, KeyValueStore},
    sqlite_store::SqliteStore,
    youtube::YouTubeClient,
};
use loothub_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine is often run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loothub_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting LootHub Engine");

    let config = EngineConfig::from_env();
    if !config.admin_pin_configured {
        tracing::warn!("ADMIN_PIN is not set, operator routes accept the default PIN");
    }

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());

    let store: Arc<dyn KeyValueStore> = match config.store_backend {
        StoreBackend::Sqlite => {
            tracing::info!(path = %config.store_db, "Opening SQLite store");
            Arc::new(SqliteStore::new(&config.store_db, clock.clone()).await?)
        }
        StoreBackend::Memory => {
            tracing::info!("Using in-memory store, data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    if config.youtube.api_key.is_none() {
        tracing::warn!("YOUTUBE_API_KEY is not set, news will not include the video feed");
    }
    let feed = Arc::new(YouTubeClient::new(config.youtube.clone()));

    let app = Arc::new(App::new(
        store,
        feed,
        clock,
        Arc::new(SystemRandom::new()),
        &config,
    ));
    app.initialize().await?;

    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer_from_env() {
        router = router.layer(cors);
    }

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
    let _ = dotenvy::dotenv();
}

fn build_cors_layer_from_env() -> Option<CorsLayer> {
    let allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())?;

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        // Operator requests send the PIN header and JSON bodies, both of which trigger preflights.
        .allow_headers([
            HeaderName::from_static(ADMIN_PIN_HEADER),
            axum::http::header::CONTENT_TYPE,
        ]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
