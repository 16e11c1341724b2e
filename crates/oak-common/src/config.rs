//! Configuration structures for OakDB.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage configuration for the block store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the backing file.
    pub file_path: PathBuf,
    /// Enable fsync after each block write.
    pub fsync_enabled: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            file_path: PathBuf::from("./data/db"),
            fsync_enabled: false,
        }
    }
}

/// Server configuration for the OakDB front-end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port number to listen on.
    pub port: u16,
    /// Path of the store served to connections.
    pub store_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 6379,
            store_path: PathBuf::from("./data/db"),
        }
    }
}

impl ServerConfig {
    /// Returns the bind address in `host:port` form.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
