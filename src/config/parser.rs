use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Reads, parses and validates the TOML file at `path`
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    parse_config(&std::fs::read_to_string(path)?)
}

/// Parses and validates configuration text
///
/// Absent sections and keys take their defaults.
pub fn parse_config(text: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(text)?;
    validate(&config)?;
    Ok(config)
}

/// Hex SHA-256 of the file at `path`
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    Ok(content_hash(&std::fs::read_to_string(path)?))
}

/// Loads the file once and returns the config with the hash of exactly
/// the text that was parsed
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let text = std::fs::read_to_string(path)?;
    let config = parse_config(&text)?;
    Ok((config, content_hash(&text)))
}

fn content_hash(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}
