use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;

/// Default database: a `sqlite.db` file in the working directory, created on first run.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://sqlite.db?mode=rwc";

pub const DEFAULT_PORT: u16 = 8080;

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => bail!("LOG_FORMAT must be `pretty` or `json`, got `{}`", other),
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            database_url: lookup("DATABASE_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            port: match lookup("PORT") {
                Some(port) => port
                    .trim()
                    .parse::<u16>()
                    .with_context(|| format!("PORT must be a valid number, got `{}`", port))?,
                None => DEFAULT_PORT,
            },
            log_format: match lookup("LOG_FORMAT") {
                Some(format) => LogFormat::parse(&format)?,
                None => LogFormat::default(),
            },
        })
    }
}
