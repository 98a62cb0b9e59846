use std::env::{self, VarError};

use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite:data/data.db";
const DEFAULT_PAGE_SIZE: usize = 10;
const DEFAULT_MAX_RECORDS_PER_AGENT: usize = 500;
const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// Errors raised while reading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is missing or not valid unicode.
    #[error("Missing environment variable: {0}")]
    MissingVar(#[from] VarError),
    /// `PAGE_SIZE` is not a positive integer.
    #[error("PAGE_SIZE must be a positive integer, got '{0}'")]
    InvalidPageSize(String),
}

/// Represents the application configuration.
#[derive(Debug)]
pub struct Config {
    /// The Telegram bot token.
    pub telegram_bot_token: String,
    /// The URL of the database.
    pub database_url: String,
    /// The number of records shown on one listing page.
    pub page_size: usize,
    /// The maximum number of records of each kind an agent can keep.
    pub max_records_per_agent: usize,
    /// The maximum number of records added concurrently from one message.
    /// Never zero, which would lift the bound entirely.
    pub max_concurrency: usize,
}

impl Config {
    /// Creates a new `Config` instance from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            telegram_bot_token: env::var("TELOXIDE_TOKEN")?,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            page_size: page_size_from_env()?,
            max_records_per_agent: env::var("MAX_RECORDS_PER_AGENT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_RECORDS_PER_AGENT),
            max_concurrency: env::var("MAX_CONCURRENCY")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .filter(|&max_concurrency| max_concurrency > 0)
                .unwrap_or(DEFAULT_MAX_CONCURRENCY),
        })
    }
}

// Unlike the limits, a bad page size is fatal rather than defaulted.
fn page_size_from_env() -> Result<usize, ConfigError> {
    let Ok(raw) = env::var("PAGE_SIZE") else {
        return Ok(DEFAULT_PAGE_SIZE);
    };

    match raw.trim().parse::<usize>() {
        Ok(page_size) if page_size > 0 => Ok(page_size),
        _ => Err(ConfigError::InvalidPageSize(raw)),
    }
}
