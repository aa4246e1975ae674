//! Server configuration read from the environment.

use std::net::SocketAddr;

use chrono::Duration;
use geoquiz_quiz::store::{DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_TTL_SECS, SessionStoreConfig};

use crate::error::AppError;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Human-readable multi-line output.
    Pretty,
}

/// Settings for the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Session expiry and capacity.
    pub session_store: SessionStoreConfig,
    /// Seed for reproducible question generation.
    pub rng_seed: Option<u64>,
    /// Log output format.
    pub log_format: LogFormat,
    /// OTLP collector endpoint; span export is off when unset.
    pub otlp_endpoint: Option<String>,
}

impl ApiConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable holds an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or("PORT", lookup("PORT"), 3000u16)?;

        let ttl_secs = parse_or(
            "QUIZ_SESSION_TTL_SECS",
            lookup("QUIZ_SESSION_TTL_SECS"),
            DEFAULT_SESSION_TTL_SECS,
        )?;
        if ttl_secs < 0 {
            return Err(AppError::Config(
                "QUIZ_SESSION_TTL_SECS must not be negative".to_string(),
            ));
        }
        let max_sessions = parse_or(
            "QUIZ_MAX_SESSIONS",
            lookup("QUIZ_MAX_SESSIONS"),
            DEFAULT_MAX_SESSIONS,
        )?;
        let ttl = if ttl_secs > 0 {
            let ttl = Duration::try_seconds(ttl_secs).ok_or_else(|| {
                AppError::Config("QUIZ_SESSION_TTL_SECS is out of range".to_string())
            })?;
            Some(ttl)
        } else {
            None
        };
        let session_store = SessionStoreConfig {
            ttl,
            max_sessions: (max_sessions > 0).then_some(max_sessions),
        };

        let rng_seed = lookup("QUIZ_RNG_SEED")
            .map(|raw| parse("QUIZ_RNG_SEED", &raw))
            .transpose()?;

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("json") => LogFormat::Json,
            Some("pretty") => LogFormat::Pretty,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "LOG_FORMAT must be json or pretty, got {other:?}"
                )));
            }
        };

        let otlp_endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|v| !v.is_empty());

        Ok(Self {
            host,
            port,
            session_store,
            rng_seed,
            log_format,
            otlp_endpoint,
        })
    }

    /// Socket address built from `host` and `port`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the pair is not a valid address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn parse<T>(key: &str, raw: &str) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| AppError::Config(format!("{key} is invalid: {e}")))
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.map_or(Ok(default), |raw| parse(key, &raw))
}
