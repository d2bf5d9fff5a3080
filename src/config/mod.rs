//! Configuration module for Tolvu-Catalog
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; missing values fall back to the defaults in
//! [`types`].
//!
//! # Example
//!
//! ```no_run
//! use tolvu_catalog::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("catalog.toml")).unwrap();
//! println!("Shop lives at: {}", config.site.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, HttpConfig, OutputConfig, SiteConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
