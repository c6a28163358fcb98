//! osintdeck API Gateway
//!
//! The main entry point for dashboard requests.
//! Handles:
//! - The access gate and session state
//! - Rate limiting
//! - Request routing
//! - Observability (logging, metrics)

mod handlers;
mod middleware;

use axum::{
    extract::Request,
    middleware::Next,
    routing::{delete, get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusBuilder;
use osintdeck_common::{
    archive::Archive,
    auth::AccessGate,
    config::{AppConfig, ObservabilityConfig},
    dashboard::{Action, DashboardState, DashboardStore},
    metrics,
    search::SearchService,
    watchlist::Watchlist,
};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::{signal, sync::oneshot, task::JoinHandle};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<DashboardStore>,
    pub search: Arc<SearchService>,
    pub gate: Arc<AccessGate>,
    pub archive: Arc<Archive>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let initial = DashboardState::with_watchlist(Watchlist::sample(chrono::Utc::now()));

        Self {
            store: Arc::new(DashboardStore::new(initial)),
            search: Arc::new(SearchService::new(config.search.clone())),
            gate: Arc::new(AccessGate::new(&config.auth)),
            archive: Arc::new(Archive::sample()),
            config: Arc::new(config),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    init_tracing(&config.observability)?;
    info!(
        service = %config.observability.service_name,
        "Starting osintdeck gateway v{}",
        osintdeck_common::VERSION
    );

    // Initialize metrics
    install_metrics_exporter(&config.observability)?;
    metrics::register_metrics();

    let state = AppState::new(config);
    spawn_boot(state.store.clone(), state.config.dashboard.boot_delay());

    // Build the router
    let app = create_router(state.clone());

    // Start the server
    let addr: SocketAddr = format!("{}:{}", state.config.server.host, state.config.server.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid listen address: {e}"))?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Open connections get the shutdown timeout to drain once a signal arrives
    let timeout = state.config.shutdown_timeout();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = stop_tx.send(());
    });
    let drain_deadline = async move {
        match stop_rx.await {
            Ok(()) => tokio::time::sleep(timeout).await,
            Err(_) => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        result = server.into_future() => result?,
        _ = drain_deadline => {
            tracing::warn!(timeout_secs = timeout.as_secs(), "Shutdown timeout elapsed, closing open connections");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Install the global subscriber; `RUST_LOG` overrides the configured level
fn init_tracing(config: &ObservabilityConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.json_logging {
        builder.json().init();
    } else {
        builder.pretty().init();
    }

    Ok(())
}

/// Serve Prometheus metrics on their own port; port 0 disables the exporter
fn install_metrics_exporter(config: &ObservabilityConfig) -> anyhow::Result<()> {
    let port = config.metrics_port;
    if port == 0 {
        return Ok(());
    }

    PrometheusBuilder::new()
        .with_http_listener(SocketAddr::from(([0, 0, 0, 0], port)))
        .add_global_label("service", config.service_name.clone())
        .set_buckets(metrics::LATENCY_BUCKETS)?
        .install()?;

    info!(port, "Prometheus exporter listening");
    Ok(())
}

/// Leave the boot screen once the boot delay has passed
fn spawn_boot(store: Arc<DashboardStore>, delay: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let state = store.dispatch(Action::BootCompleted).await;
        info!(screen = ?state.screen, "Boot completed");
    })
}

/// Create the main application router
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    // Routes behind the access gate
    let gated_routes = Router::new()
        .route("/session", delete(handlers::session::logout))
        .route("/search", post(handlers::search::search))
        .route("/search/preview", post(handlers::search::preview))
        .route("/modules/{id}/open", post(handlers::modules::open_module))
        .route("/modules/close", post(handlers::modules::close_module))
        .route("/archive/sources", get(handlers::archive::list_sources))
        .route("/archive/search", post(handlers::archive::search))
        .route(
            "/watchlist",
            get(handlers::watchlist::get_watchlist).post(handlers::watchlist::create_alert),
        )
        .route("/watchlist/{id}/toggle", post(handlers::watchlist::toggle_alert))
        .route("/watchlist/{id}", delete(handlers::watchlist::delete_alert))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::session::require_session,
        ));

    // API routes
    let api_routes = Router::new()
        // Health endpoints
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        // Catalogues
        .route("/sources", get(handlers::catalog::list_sources))
        .route("/modules", get(handlers::catalog::list_modules))
        // Session
        .route("/session", post(handlers::session::login))
        .route("/state", get(handlers::session::get_state))
        .merge(gated_routes);

    let mut app = Router::new()
        .nest("/v1", api_routes)
        .layer(axum::middleware::from_fn(
            middleware::request_metrics::track_requests,
        ));

    let limits = &state.config.rate_limit;
    if limits.enabled {
        let limiter = middleware::rate_limit::create_rate_limiter(limits);
        let limit = limits.requests_per_second;
        app = app.layer(axum::middleware::from_fn(move |request: Request, next: Next| {
            middleware::rate_limit::rate_limit_middleware(request, next, limiter.clone(), limit)
        }));
    }

    // Compose the app
    app.layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(request_id)
        .layer(propagate_id)
        .with_state(state)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}
