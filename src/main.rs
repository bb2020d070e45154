use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, SessionRegistry};
use oncora_core::config::{
    flag_from_env_value, genomic_markers_from_env_value, page_limit_from_env_value,
    session_ttl_from_env_value,
};
use oncora_core::constants::{DEFAULT_MAX_PAGE_LIMIT, DEFAULT_PAGE_LIMIT};
use oncora_core::seed::seed_store;
use oncora_core::{
    CaseService, CoreConfig, DirectoryVerifier, HospitalDirectory, InMemoryCaseStore,
    RandomIdGenerator,
};

/// Resolves [`CoreConfig`] from the process environment.
fn config_from_env() -> anyhow::Result<CoreConfig> {
    let env = |name: &str| std::env::var(name).ok();

    let cfg = CoreConfig::new(
        genomic_markers_from_env_value(env("ONCORA_GENOMIC_MARKERS"))?,
        page_limit_from_env_value(
            "ONCORA_DEFAULT_PAGE_LIMIT",
            env("ONCORA_DEFAULT_PAGE_LIMIT"),
            DEFAULT_PAGE_LIMIT,
        )?,
        page_limit_from_env_value(
            "ONCORA_MAX_PAGE_LIMIT",
            env("ONCORA_MAX_PAGE_LIMIT"),
            DEFAULT_MAX_PAGE_LIMIT,
        )?,
        flag_from_env_value("ONCORA_SEED_DEMO_DATA", env("ONCORA_SEED_DEMO_DATA"), true)?,
        session_ttl_from_env_value(env("ONCORA_SESSION_TTL_HOURS"))?,
    )?;
    Ok(cfg)
}

/// Main entry point for the Oncora registry server
///
/// Serves the REST API (with OpenAPI/Swagger UI) on `ONCORA_REST_ADDR`.
///
/// # Environment Variables
/// - `ONCORA_REST_ADDR`: Server address (default: "0.0.0.0:3001")
/// - `ONCORA_GENOMIC_MARKERS`: Marker vocabulary (default: "myc,bcl2,p53,cd30")
/// - `ONCORA_DEFAULT_PAGE_LIMIT` / `ONCORA_MAX_PAGE_LIMIT`: Window sizes (default: 50 / 500)
/// - `ONCORA_SEED_DEMO_DATA`: Load the demo cases (default: true)
/// - `ONCORA_SESSION_TTL_HOURS`: Bearer token lifetime (default: 24)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - a configuration value is malformed,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("oncora=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("ONCORA_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".into());
    let cfg = Arc::new(config_from_env()?);

    let store = Arc::new(InMemoryCaseStore::new());
    let ids = Arc::new(RandomIdGenerator);
    if cfg.seed_demo_data() {
        seed_store(store.as_ref(), ids.as_ref())?;
    }

    let sessions = Arc::new(SessionRegistry::new(cfg.session_ttl()));
    let directory = Arc::new(HospitalDirectory::default());
    let verifier = Arc::new(DirectoryVerifier::new(directory.as_ref().clone()));
    let service = CaseService::new(store, ids, cfg);

    let app = api_rest::router(AppState::new(service, directory, verifier, sessions));

    tracing::info!("++ Starting Oncora REST on {}", rest_addr);

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("-- Shutting down Oncora REST");
        })
        .await?;

    Ok(())
}
