//! # HTTP Server
//!
//! Builds the router over a store gateway and serves it.
//!
//! Cross-origin policy: only the configured allow-list of origins may call
//! the API, with credentials enabled. There is no permissive fallback; an
//! empty allow-list means no cross-origin caller is accepted.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::observability::{Logger, Severity};
use crate::store::EmployeeStore;

use super::config::ServerConfig;
use super::employee_routes::{employee_routes, EmployeeState};
use super::health::health_routes;

/// HTTP server for the employee directory API
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server with default configuration
    pub fn new(store: EmployeeStore) -> Self {
        Self::with_config(ServerConfig::default(), store)
    }

    /// Create a server with custom configuration
    pub fn with_config(config: ServerConfig, store: EmployeeStore) -> Self {
        let router = Self::build_router(&config, store);
        Self { config, router }
    }

    /// Build the router: employee CRUD and the health probe, all under
    /// /api, behind the CORS layer.
    fn build_router(config: &ServerConfig, store: EmployeeStore) -> Router {
        let state = Arc::new(EmployeeState::new(store));

        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        // credentials require explicit origin/method/header lists
        let cors = CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true);

        let api = employee_routes(state).merge(health_routes());

        Router::new().nest("/api", api).layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process is stopped
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        let listener = TcpListener::bind(addr).await?;
        let port = self.config.port.to_string();
        Logger::log(
            Severity::Info,
            "server_started",
            &[("host", self.config.host.as_str()), ("port", port.as_str())],
        );

        axum::serve(listener, self.router).await
    }
}
