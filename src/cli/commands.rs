//! CLI command implementations
//!
//! `start` performs the whole boot sequence: load config, build the store
//! once (connect-on-startup, shared for the lifetime of the process), then
//! block on the server inside a tokio runtime.

use std::path::Path;
use std::sync::Arc;

use crate::http_server::{HttpServer, ServerConfig};
use crate::store::{EmployeeStore, MemoryStore};

use super::args::{Cli, Command};
use super::errors::CliResult;

/// Parse arguments and dispatch
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    match cli.command {
        Command::Start { config, port } => start(&config, port),
    }
}

/// Boot the server
pub fn start(config_path: &Path, port_override: Option<u16>) -> CliResult<()> {
    let mut config = ServerConfig::load_or_default(config_path)?;
    if let Some(port) = port_override {
        config.port = port;
    }

    let store = EmployeeStore::open(Arc::new(MemoryStore::new()))?;
    let server = HttpServer::with_config(config, store);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.start())?;
    Ok(())
}
