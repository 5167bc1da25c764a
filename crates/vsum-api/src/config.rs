//! API configuration.
//!
//! Read once at startup and handed to [`crate::AppState`]; nothing else in
//! the crate reads the process environment.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_PORT: u16 = 5002;
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1";
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro";

/// Configuration errors detected at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing Google Gemini API key. Please set GEMINI_API_KEY in the environment or .env")]
    MissingApiKey,

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Gemini client configuration.
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key, sent as the `key` query parameter
    pub api_key: String,
    /// Base URL up to and including the API version
    pub base_url: String,
    /// Model name used in `models/{model}:generateContent`
    pub model: String,
    /// Total attempts per summarization call (including the first)
    pub max_attempts: u32,
    /// Delay used on 429 when the server sends no usable `retry-after`
    pub default_retry_after: Duration,
    /// Per-attempt HTTP timeout
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Config with defaults for everything except the key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            max_attempts: 3,
            default_retry_after: Duration::from_secs(5),
            timeout: Duration::from_secs(120),
        }
    }

    /// Full `generateContent` endpoint, without the key.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_attempts", &self.max_attempts)
            .field("default_retry_after", &self.default_retry_after)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Max request body size
    pub max_body_size: usize,
    /// Environment (development/production)
    pub environment: String,
    /// Expose Prometheus metrics on /metrics
    pub metrics_enabled: bool,
    /// Preferred caption languages, in order
    pub transcript_languages: Vec<String>,
    /// Summarization API settings
    pub gemini: GeminiConfig,
}

impl ApiConfig {
    /// Config with defaults for everything except the key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            cors_origins: vec!["*".to_string()],
            max_body_size: 1024 * 1024, // 1MB
            environment: "development".to_string(),
            metrics_enabled: true,
            transcript_languages: vec!["en".to_string()],
            gemini: GeminiConfig::new(api_key),
        }
    }

    /// Create config from environment variables, loading `.env` first.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GEMINI_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let mut config = Self::new(api_key);

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }

        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key: "PORT", value: port })?;
        }

        if let Some(origins) = lookup("CORS_ORIGINS") {
            config.cors_origins = split_list(&origins);
        }

        config.max_body_size = parse_or(&lookup, "MAX_BODY_SIZE", config.max_body_size);

        if let Some(environment) = lookup("ENVIRONMENT") {
            config.environment = environment;
        }

        config.metrics_enabled = lookup("METRICS_ENABLED")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(true);

        if let Some(languages) = lookup("TRANSCRIPT_LANGUAGES") {
            let languages = split_list(&languages);
            if !languages.is_empty() {
                config.transcript_languages = languages;
            }
        }

        let gemini = &mut config.gemini;
        if let Some(base_url) = lookup("GEMINI_API_BASE") {
            gemini.base_url = base_url;
        }
        if let Some(model) = lookup("GEMINI_MODEL") {
            gemini.model = model;
        }
        gemini.max_attempts = parse_or(&lookup, "GEMINI_MAX_ATTEMPTS", gemini.max_attempts).max(1);
        gemini.default_retry_after = Duration::from_secs(parse_or(
            &lookup,
            "GEMINI_DEFAULT_RETRY_AFTER_SECS",
            gemini.default_retry_after.as_secs(),
        ));
        gemini.timeout = Duration::from_secs(parse_or(
            &lookup,
            "GEMINI_TIMEOUT_SECS",
            gemini.timeout.as_secs(),
        ));

        Ok(config)
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
