//! Tolvu-Catalog: a product catalog client for a server-rendered web shop
//!
//! This crate logs into the retailer, discovers its category tree, walks
//! paginated product listings and extracts product details from the human
//! facing HTML. A small build-list accumulator sits on top of the catalog.

pub mod builder;
pub mod catalog;
pub mod config;
pub mod encoding;
pub mod model;
pub mod output;
pub mod prompt;
pub mod url;

use thiserror::Error;

/// Main error type for catalog operations
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Login failed: {0}")]
    Auth(String),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Unexpected HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Scrape error: {0}")]
    Scrape(#[from] ScrapeError),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Adding {product} to cart failed with HTTP status {status}")]
    Cart { product: String, status: u16 },

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// Returns true for transient transport failures worth retrying
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Http { source, .. } => source.is_connect() || source.is_request(),
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Text shown to an interactive user for this error
    pub fn user_message(&self) -> String {
        match self {
            Self::Scrape(_)
            | Self::Http { .. }
            | Self::Timeout { .. }
            | Self::Status { .. }
            | Self::Reqwest(_) => "Catalog temporarily unavailable, try again.".to_string(),
            Self::Validation(msg) => format!("{}. Please choose again.", msg),
            other => other.to_string(),
        }
    }
}

/// Page structure did not match what the extractor expects
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScrapeError {
    #[error("Missing {field} (expected at '{selector}')")]
    MissingElement { field: String, selector: String },

    #[error("Could not parse price from '{text}'")]
    InvalidPrice { text: String },

    #[error("Category path not found: {path}")]
    MissingCategory { path: String },
}

impl ScrapeError {
    pub(crate) fn missing(field: &str, selector: &str) -> Self {
        Self::MissingElement {
            field: field.to_string(),
            selector: selector.to_string(),
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use catalog::{Catalog, ExtractMode, LazyProduct};
pub use config::Config;
pub use model::{CategoryTree, Product, ProductDetails};
pub use crate::url::normalize_url;
