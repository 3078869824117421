//! Configuration for the schedule backend and client.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::errors::AppError;
use crate::i18n::Locale;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Base URL the schedule gateway sends requests to
    pub api_base_url: String,
    /// Language of user-facing notifications
    pub locale: Locale,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let db_path = env::var("SCHEDULE_DB_PATH")
            .unwrap_or_else(|_| "./data/schedule.sqlite".to_string())
            .into();

        let raw_addr =
            env::var("SCHEDULE_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let bind_addr = raw_addr.parse().map_err(|_| {
            AppError::Config(format!("Invalid SCHEDULE_BIND_ADDR format: {}", raw_addr))
        })?;

        let log_level = env::var("SCHEDULE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let api_base_url = env::var("SCHEDULE_API_BASE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8080/api".to_string())
            .trim_end_matches('/')
            .to_string();

        let locale = match env::var("SCHEDULE_LOCALE") {
            Ok(raw) => Locale::parse(&raw).ok_or_else(|| {
                AppError::Config(format!("Unsupported SCHEDULE_LOCALE: {}", raw))
            })?,
            Err(_) => Locale::default(),
        };

        Ok(Self {
            db_path,
            bind_addr,
            log_level,
            api_base_url,
            locale,
        })
    }
}
