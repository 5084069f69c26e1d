pub mod cli;
pub mod config;
pub mod date_utils;
pub mod error;
pub mod filters;
pub mod forms;
pub mod handlers;
pub mod models;
pub mod services;
pub mod session;
pub mod state;

/// Application version from Cargo.toml (single source of truth)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
