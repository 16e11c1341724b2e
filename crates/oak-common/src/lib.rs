//! OakDB common types, errors, and configuration.
//!
//! This crate provides shared definitions used across all OakDB components.

pub mod config;
pub mod error;

pub use config::{ServerConfig, StorageConfig};
pub use error::{OakError, Result};
