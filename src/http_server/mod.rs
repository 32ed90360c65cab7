//! HTTP route layer: the REST surface over the employee store.

pub mod config;
pub mod employee_routes;
pub mod errors;
pub mod health;
pub mod server;

pub use config::{ConfigError, ServerConfig};
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
