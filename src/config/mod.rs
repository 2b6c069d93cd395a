//! Configuration module for Linkalyser
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; a missing file section falls back to the defaults.
//!
//! # Example
//!
//! ```no_run
//! use linkalyser::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("linkalyser.toml")).unwrap();
//! println!("Concurrent fetches: {}", config.fetch.max_concurrent_fetches);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetchConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
