//! Configuration handling for the application.
//!
//! Everything comes from environment variables with development defaults, so
//! the server starts without any setup. `Config::from_env` is the single
//! place where validation can be added later.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Environment variable names. Keeping them public lets tests refer to them.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_OPENAI_MODEL: &str = "OPENAI_MODEL";
/// Comma-separated list of reference URLs to scrape per request.
pub const ENV_SOURCE_URLS: &str = "SOURCE_URLS";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_SOURCE_URLS: &str = "\
https://www.bris.se/for-vuxna-om-barn/,\
https://friends.se/kunskapsbanken/,\
https://www.1177.se/barn--gravid/,\
https://www.saffle.se/utbildning--barnomsorg.html";

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    openai_api_key: String,
    openai_base_url: String,
    openai_model: String,
    source_urls: Vec<String>,
}

impl Config {
    /// Load from environment variables, falling back to development defaults.
    /// Only the API key is mandatory.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let openai_api_key = env::var(ENV_OPENAI_API_KEY).map_err(|_| ConfigError::Missing {
            field: ENV_OPENAI_API_KEY,
        })?;
        let openai_base_url =
            env::var(ENV_OPENAI_BASE_URL).unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string());
        let openai_model =
            env::var(ENV_OPENAI_MODEL).unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string());
        let source_urls =
            parse_source_urls(&env::var(ENV_SOURCE_URLS).unwrap_or_else(|_| DEFAULT_SOURCE_URLS.to_string()));
        Ok(Self {
            bind_addr,
            openai_api_key,
            openai_base_url,
            openai_model,
            source_urls,
        })
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// API key for the completion endpoint.
    pub fn openai_api_key(&self) -> &str {
        &self.openai_api_key
    }
    /// Base URL of the completion endpoint.
    pub fn openai_base_url(&self) -> &str {
        &self.openai_base_url
    }
    /// Model identifier sent with every completion request.
    pub fn openai_model(&self) -> &str {
        &self.openai_model
    }
    /// Reference URLs scraped for every answer, in order.
    pub fn source_urls(&self) -> &[String] {
        &self.source_urls
    }
}

fn parse_source_urls(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect()
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    Missing { field: &'static str },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing { field } => {
                write!(f, "missing required environment variable '{}'", field)
            }
        }
    }
}

impl Error for ConfigError {}
