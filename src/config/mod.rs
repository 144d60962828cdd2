use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    /// Per-request timeout in seconds
    pub request_timeout: u64,
    /// Print the example product payload after the listener is bound
    pub print_sample_payload: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            host: "0.0.0.0".to_string(),
            port: 4000,
            log_level: "debug".to_string(),
            request_timeout: 30,
            print_sample_payload: true,
        }
    }
}

impl Config {
    /// Load configuration from the environment. Every setting has a default so
    /// the harness starts on a bare machine.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let defaults = Config::default();

        Ok(Config {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", defaults.port)?,
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            request_timeout: parse_var("REQUEST_TIMEOUT", defaults.request_timeout)?,
            print_sample_payload: parse_var("PRINT_SAMPLE_PAYLOAD", defaults.print_sample_payload)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} has an invalid value {:?}: {}", name, raw, e)),
        Err(_) => Ok(default),
    }
}
