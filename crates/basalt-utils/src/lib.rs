//! Shared utilities for the Basalt workspace.

pub mod config;

pub use config::{CONFIG_FILE_NAME, Config, Package, ResolverConfig};
