use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::portfolio::renderer::DEFAULT_TEMPLATE;

const DEFAULT_PORT: u16 = 9000;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Template identifier used for every upload.
    pub template_name: String,
    pub max_upload_bytes: usize,
    /// Extra given names for the name recognizer, one per line.
    pub name_gazetteer_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
            template_name: DEFAULT_TEMPLATE.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            name_gazetteer_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            template_name: std::env::var("PORTFOLIO_TEMPLATE").unwrap_or(defaults.template_name),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            name_gazetteer_path: std::env::var("NAME_GAZETTEER_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 9000);
        assert_eq!(config.template_name, "generated_portfolio_template");
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert!(config.name_gazetteer_path.is_none());
    }

    #[test]
    fn test_parse_value_accepts_padded_numbers() {
        let port: u16 = parse_value("PORT", " 8080 ").unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_parse_value_names_the_variable_on_error() {
        let err = parse_value::<u16>("PORT", "eighty").unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
