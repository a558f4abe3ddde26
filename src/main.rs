//! stax-gateway server entry point.
//!
//! Starts the Axum HTTP server with the registration and admin endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use stax_gateway::api;
use stax_gateway::app_state::AppState;
use stax_gateway::auth::{AdminTokenService, IdentityVerifier};
use stax_gateway::config::{self, AppConfig, StorageBackend, StoreBackend};
use stax_gateway::persistence::{AdminStore, MemoryStore, PostgresStore, RegistrationStore};
use stax_gateway::service::{AdminAuthService, RegistrationService};
use stax_gateway::storage::{
    HttpObjectStorage, LocalObjectStorage, MemoryObjectStorage, ObjectStorage,
};

/// Path the local storage directory is served under.
const LOCAL_UPLOADS_ROUTE: &str = "/uploads";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    init_tracing(config::json_logs_requested());

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, ?config, "starting stax-gateway");

    // Build persistence and storage
    let (registration_store, admin_store) = build_stores(&config).await?;
    let (storage, zumba_storage) = build_storage(&config.storage_backend);

    // Build service layer
    let admin_tokens = Arc::new(AdminTokenService::new(
        &config.admin_jwt_secret,
        config.admin_token_ttl,
    ));
    let identity = Arc::new(IdentityVerifier::new(
        &config.identity_jwt_secret,
        &config.identity_jwt_audience,
    ));
    let registrations = Arc::new(
        RegistrationService::new(registration_store, storage, config.max_upload_bytes)
            .with_zumba_storage(zumba_storage),
    );
    let admin_auth = Arc::new(AdminAuthService::new(admin_store, Arc::clone(&admin_tokens)));

    // Build application state
    let app_state = AppState {
        registrations,
        admin_auth,
        admin_tokens,
        identity,
    };

    // Build router
    let mut app = Router::new().merge(api::build_router(config.max_upload_bytes));
    if let StorageBackend::Local { dir, .. } = &config.storage_backend {
        app = app.nest_service(LOCAL_UPLOADS_ROUTE, ServeDir::new(dir));
    }
    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn build_stores(
    config: &AppConfig,
) -> Result<(Arc<dyn RegistrationStore>, Arc<dyn AdminStore>), Box<dyn std::error::Error>> {
    match config.store_backend {
        StoreBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .min_connections(config.database_min_connections)
                .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
                .connect(&config.database_url)
                .await?;
            let store = Arc::new(PostgresStore::new(pool));
            store.migrate().await?;
            tracing::info!("connected to PostgreSQL, migrations applied");
            let registrations: Arc<dyn RegistrationStore> = Arc::clone(&store) as _;
            let admins: Arc<dyn AdminStore> = store;
            Ok((registrations, admins))
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store, data is lost on restart");
            let store = Arc::new(MemoryStore::new());
            let registrations: Arc<dyn RegistrationStore> = Arc::clone(&store) as _;
            let admins: Arc<dyn AdminStore> = store;
            Ok((registrations, admins))
        }
    }
}

/// Returns the gathering and zumba proof storages. Only the HTTP backend
/// keeps them in separate buckets.
fn build_storage(backend: &StorageBackend) -> (Arc<dyn ObjectStorage>, Arc<dyn ObjectStorage>) {
    let shared: Arc<dyn ObjectStorage> = match backend {
        StorageBackend::Http {
            url,
            bucket,
            zumba_bucket,
            service_key,
        } => {
            return (
                Arc::new(HttpObjectStorage::new(url, bucket, service_key)),
                Arc::new(HttpObjectStorage::new(url, zumba_bucket, service_key)),
            );
        }
        StorageBackend::Local {
            dir,
            public_base_url,
        } => Arc::new(LocalObjectStorage::new(dir.clone(), public_base_url)),
        StorageBackend::Memory => {
            tracing::warn!("using in-memory object storage, proofs are lost on restart");
            Arc::new(MemoryObjectStorage::default())
        }
    };
    (Arc::clone(&shared), shared)
}
