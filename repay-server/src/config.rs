//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::warn;

/// Environment variable holding the listen address.
pub const ADDR_VAR: &str = "REPAY_ADDR";

/// Environment variable holding the catalog path.
pub const CATALOG_VAR: &str = "REPAY_CATALOG";

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on.
    pub addr: SocketAddr,

    /// Path to the operator catalog JSON file.
    pub catalog_path: PathBuf,
}

impl ServerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(addr: SocketAddr, catalog_path: impl Into<PathBuf>) -> Self {
        Self {
            addr,
            catalog_path: catalog_path.into(),
        }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through a lookup function, falling back to the
    /// defaults for anything missing or unparsable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let addr = match lookup(ADDR_VAR) {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!(var = ADDR_VAR, value = %raw, error = %e, "Invalid address, using default");
                defaults.addr
            }),
            None => defaults.addr,
        };

        let catalog_path = lookup(CATALOG_VAR)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.catalog_path);

        Self { addr, catalog_path }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            catalog_path: PathBuf::from("data/operators.json"),
        }
    }
}
