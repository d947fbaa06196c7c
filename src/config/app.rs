use anyhow::{Context, Result};
use std::env;

const DEFAULT_MAX_PAYLOAD_SIZE_MB: usize = 50;
// 30 minutes at 30 fps
const DEFAULT_MAX_HISTORY_FRAMES: usize = 54_000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub log_level: String,
    pub max_payload_size_mb: usize,
    pub max_history_frames: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .context("PORT must be a valid port number")?;
        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());
        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        let max_payload_size_mb = match lookup("MAX_PAYLOAD_SIZE_MB") {
            Some(value) => value
                .parse()
                .context("MAX_PAYLOAD_SIZE_MB must be a whole number of megabytes")?,
            None => DEFAULT_MAX_PAYLOAD_SIZE_MB,
        };
        let max_history_frames = match lookup("MAX_HISTORY_FRAMES") {
            Some(value) => value
                .parse()
                .context("MAX_HISTORY_FRAMES must be a whole number")?,
            None => DEFAULT_MAX_HISTORY_FRAMES,
        };

        Ok(AppConfig {
            host,
            port,
            environment,
            log_level,
            max_payload_size_mb,
            max_history_frames,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Request body limit in bytes
    pub fn max_payload_bytes(&self) -> usize {
        self.max_payload_size_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "development".to_string(),
            log_level: "info".to_string(),
            max_payload_size_mb: DEFAULT_MAX_PAYLOAD_SIZE_MB,
            max_history_frames: DEFAULT_MAX_HISTORY_FRAMES,
        }
    }
}
