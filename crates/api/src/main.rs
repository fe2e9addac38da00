use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::http::header::InvalidHeaderValue;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use streamer_api::app::build_router;
use streamer_api::config::{ConfigError, ServerConfig};
use streamer_api::state::AppState;
use streamer_db::store::PgAccountStore;

const DEFAULT_LOG_FILTER: &str = "streamer_api=debug,streamer_db=debug,tower_http=debug";

/// Anything that stops the server from coming up.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,

    #[error("HOST {0:?} is not an IP address")]
    Host(String),

    #[error("database unavailable: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migrations failed: {0}")]
    Migrations(#[from] sqlx::migrate::MigrateError),

    #[error("invalid CORS origin: {0}")]
    Cors(#[from] InvalidHeaderValue),

    #[error("server I/O: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    if let Err(err) = run().await {
        tracing::error!(error = %err, "Server failed to start");
        std::process::exit(1);
    }
}

/// `LOG_FORMAT=json` switches to one JSON object per event; `RUST_LOG`
/// overrides the default filter.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

async fn run() -> Result<(), StartupError> {
    let config = ServerConfig::from_env()?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        token_ttl_secs = config.token.ttl.num_seconds(),
        "Loaded server configuration"
    );

    let ip: IpAddr = config
        .host
        .parse()
        .map_err(|_| StartupError::Host(config.host.clone()))?;
    let addr = SocketAddr::new(ip, config.port);

    let database_url = std::env::var("DATABASE_URL").map_err(|_| StartupError::MissingDatabaseUrl)?;
    let pool = streamer_db::create_pool(&database_url).await?;
    streamer_db::health_check(&pool).await?;
    streamer_db::run_migrations(&pool).await?;
    tracing::info!("Database ready (pool created, migrations applied)");

    let state = AppState::new(Arc::new(PgAccountStore::new(pool)), config);
    let app = build_router(state)?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Resolves on SIGINT, or SIGTERM on Unix. If a handler cannot be installed
/// that branch never resolves and the other one still works.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "Ctrl-C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("SIGINT received, shutting down"),
        () = terminate => tracing::info!("SIGTERM received, shutting down"),
    }
}
