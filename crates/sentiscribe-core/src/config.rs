use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_SENTIMENT_MODEL: &str = "cardiffnlp/twitter-roberta-base-sentiment";
pub const DEFAULT_WHISPER_MODEL: &str = "base";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can feed a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let sentiment_url = require("SENTISCRIBE_SENTIMENT_URL")?;
    let whisper_url = require("SENTISCRIBE_WHISPER_URL")?;

    let env = parse_environment(&or_default("SENTISCRIBE_ENV", "development"))?;
    let bind_addr = parse("SENTISCRIBE_BIND_ADDR", "127.0.0.1:5000")?;
    let log_level = or_default("SENTISCRIBE_LOG_LEVEL", "info");

    let sentiment_model = or_default("SENTISCRIBE_SENTIMENT_MODEL", DEFAULT_SENTIMENT_MODEL);
    let whisper_model = or_default("SENTISCRIBE_WHISPER_MODEL", DEFAULT_WHISPER_MODEL);

    let model_timeout_secs = parse_u64("SENTISCRIBE_MODEL_TIMEOUT_SECS", "120")?;
    if model_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SENTISCRIBE_MODEL_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let max_upload_bytes = parse_usize("SENTISCRIBE_MAX_UPLOAD_BYTES", "26214400")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        sentiment_url,
        sentiment_model,
        whisper_url,
        whisper_model,
        model_timeout_secs,
        max_upload_bytes,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SENTISCRIBE_ENV".to_string(),
            reason: format!("expected development, test or production; got '{other}'"),
        }),
    }
}
