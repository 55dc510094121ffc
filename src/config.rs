// src/config.rs

use chrono_tz::Tz;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::error::ConfigError;

pub const API_KEY_VAR: &str = "YOUTUBE_API_KEY";
pub const API_BASE_URL_VAR: &str = "YOUTUBE_API_BASE_URL";
pub const BIND_VAR: &str = "YTGROWTH_BIND";
pub const TIMEZONE_VAR: &str = "YTGROWTH_TIMEZONE";
pub const HTTP_TIMEOUT_VAR: &str = "YTGROWTH_HTTP_TIMEOUT_SECS";

pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Process configuration, resolved once at startup and handed to whatever needs it.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_key: String,
    pub api_base_url: String,
    pub bind_addr: SocketAddr,
    /// Timezone used to turn creation timestamps into calendar dates.
    pub timezone: Tz,
    pub http_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds the config from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = get(API_KEY_VAR).ok_or(ConfigError::MissingVar(API_KEY_VAR))?;
        let api_base_url = get(API_BASE_URL_VAR)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let bind_addr = get(BIND_VAR)
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidVar { var: BIND_VAR, message: e.to_string() })?;

        let timezone = match get(TIMEZONE_VAR) {
            Some(name) => parse_timezone(&name)
                .map_err(|message| ConfigError::InvalidVar { var: TIMEZONE_VAR, message })?,
            None => Tz::UTC,
        };

        let http_timeout_secs = match get(HTTP_TIMEOUT_VAR) {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidVar {
                    var: HTTP_TIMEOUT_VAR,
                    message: format!("expected a positive number of seconds, got {raw:?}"),
                })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(AppConfig {
            api_key,
            api_base_url,
            bind_addr,
            timezone,
            http_timeout: Duration::from_secs(http_timeout_secs),
        })
    }
}

pub fn parse_timezone(name: &str) -> Result<Tz, String> {
    name.parse::<Tz>().map_err(|e| e.to_string())
}
