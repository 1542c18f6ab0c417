//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use anyhow::Context;
use axum::{
    Router, http,
    http::{HeaderName, Method, header},
    middleware,
};
use ledger::{LedgerBackend, LedgerConfig, protected_routes, public_routes};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zklogin::domain::clock::SystemClock;
use zklogin::middleware::{SessionAuthGuard, check_sui_token, require_sui_token};
use zklogin::{IdentitySessionService, PgZkLoginRepository, ZkLoginConfig, zklogin_router};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

type Repo = PgZkLoginRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,zklogin=info,ledger=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url =
        env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let zklogin_config = ZkLoginConfig::from_env();
    tracing::info!(
        network = %zklogin_config.network_env,
        max_epoch = %zklogin_config.max_epoch,
        "zkLogin configured"
    );

    let repo = Arc::new(PgZkLoginRepository::new(pool.clone()));
    let service = Arc::new(IdentitySessionService::new(
        Arc::clone(&repo),
        repo,
        Arc::new(zklogin_config),
        Arc::new(SystemClock),
    ));

    // Startup sweep: rewrite stale active sessions as expired
    // Errors here should not prevent server startup
    if let Err(e) = service.sessions().sweep_expired().await {
        tracing::warn!(error = %e, "Session expiry sweep failed, continuing anyway");
    }

    // Ledger gateway
    let ledger_config = Arc::new(LedgerConfig::from_env());
    tracing::info!(mode = ?ledger_config.mode, node = %ledger_config.node_url, "Ledger configured");
    let gateway = Arc::new(LedgerBackend::from_config(ledger_config)?);

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:40922,http://127.0.0.1:40922".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let token_header = HeaderName::from_bytes(service.config().token_header.as_bytes())
        .context("invalid session token header name")?;

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            token_header,
        ]))
        .allow_credentials(true);

    // Build router
    let guard = SessionAuthGuard::new(Arc::clone(&service));

    let ledger_writes = protected_routes(Arc::clone(&gateway)).route_layer(
        middleware::from_fn_with_state(guard.clone(), require_sui_token::<Repo, Repo>),
    );
    let ledger_reads = public_routes(gateway).route_layer(middleware::from_fn_with_state(
        guard,
        check_sui_token::<Repo, Repo>,
    ));

    let sui_api = zklogin_router(service)
        .merge(ledger_writes)
        .merge(ledger_reads);

    let app = Router::new()
        .nest("/api/sui", sui_api)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:31113".to_string())
        .parse()
        .context("BIND_ADDR must be host:port")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
