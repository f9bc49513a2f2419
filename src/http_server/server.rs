//! # HTTP Server
//!
//! Combines the event, debug and observability routers into one axum
//! service with CORS and per-request logging.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::observability::{log_event_with_fields, LogEvent, Logger, Timer};

use super::config::ServerConfig;
use super::event_routes::{debug_routes, event_routes};
use super::observability_routes::observability_routes;
use super::state::AppState;

/// HTTP server over one shared store
pub struct HttpServer {
    config: ServerConfig,
    state: Arc<AppState>,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration and an empty store
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    /// Create a new HTTP server with custom configuration and an empty store
    pub fn with_config(config: ServerConfig) -> Self {
        Self::with_state(config, Arc::new(AppState::new()))
    }

    /// Create a server over existing state
    pub fn with_state(config: ServerConfig, state: Arc<AppState>) -> Self {
        let router = Self::build_router(&config, Arc::clone(&state));
        Self {
            config,
            state,
            router,
        }
    }

    fn build_router(config: &ServerConfig, state: Arc<AppState>) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        let mut router = Router::new()
            .merge(event_routes(Arc::clone(&state)))
            .merge(observability_routes(Arc::clone(&state)));

        if config.debug_routes {
            router = router.merge(debug_routes(Arc::clone(&state)));
        }

        router
            .layer(middleware::from_fn_with_state(state, track_request))
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Shared state, for callers that need the store or counters directly
    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process exits
    pub async fn start(self) -> Result<(), io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("{}", e)))?;

        let listener = TcpListener::bind(addr).await?;
        log_event_with_fields(
            LogEvent::ServerReady,
            &[
                ("addr", &addr.to_string()),
                ("debug_routes", if self.config.debug_routes { "true" } else { "false" }),
            ],
        );

        axum::serve(listener, self.router).await
    }
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Counts every request and logs its method, path, status and duration.
/// Server errors are logged at ERROR.
async fn track_request(State(state): State<Arc<AppState>>, request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let timer = Timer::new();

    let response = next.run(request).await;

    state.metrics.increment_http_requests();
    let duration = timer.elapsed_us();
    let status = response.status();
    let fields = [
        ("duration_us", duration.as_str()),
        ("method", method.as_str()),
        ("path", path.as_str()),
        ("status", status.as_str()),
    ];
    if response.status().is_server_error() {
        Logger::error(LogEvent::HttpRequest.as_str(), &fields);
    } else {
        log_event_with_fields(LogEvent::HttpRequest, &fields);
    }
    response
}
