//! Settings read from the environment (after `.env` is loaded).

use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub http_host: String,
    pub http_port: u16,
    /// Prefix joined with a post's stored image path.
    pub media_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

        let database_max_connections: u32 = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value
                .parse()
                .with_context(|| format!("Invalid DATABASE_MAX_CONNECTIONS: {}", value))?,
            None => 5,
        };

        let http_port: u16 = match lookup("HTTP_PORT") {
            Some(value) => value
                .parse()
                .with_context(|| format!("Invalid HTTP_PORT: {}", value))?,
            None => 3000,
        };

        let mut media_url = lookup("MEDIA_URL").unwrap_or_else(|| "/media/".to_string());
        if !media_url.ends_with('/') {
            media_url.push('/');
        }

        Ok(Self {
            database_url,
            database_max_connections,
            http_host: lookup("HTTP_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            http_port,
            media_url,
        })
    }

    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}
