//! Application configuration
//!
//! Read once from the process environment (after `.env` is loaded) and split
//! into the per-crate configs.

use std::str::FromStr;
use std::time::Duration;

use agent::AgentConfig;
use agent::application::config::DEFAULT_MODEL;
use kernel::error::app_error::{AppError, AppResult};
use kernel::validation::validate_url;
use platform::ThrottleSettings;
use records::RecordsConfig;
use search::SearchConfig;

pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub openai_model: String,
    pub google_api_key: Option<String>,
    pub google_cse_id: Option<String>,
    pub public_records_api_key: Option<String>,
    /// Include error kind and suggested action in error reports
    pub debug: bool,
    pub log_level: String,
    /// Applied to both the search API and the records source
    pub throttle: ThrottleSettings,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let defaults = ThrottleSettings::default();
        let throttle = ThrottleSettings {
            capacity: parse_or(get("RATE_LIMIT_CAPACITY"), "RATE_LIMIT_CAPACITY", defaults.capacity)?,
            window: secs_or(get("RATE_LIMIT_WINDOW_SECS"), "RATE_LIMIT_WINDOW_SECS", defaults.window)?,
            ttl: secs_or(get("CACHE_TTL_SECS"), "CACHE_TTL_SECS", defaults.ttl)?,
            housekeeping_interval: secs_or(
                get("CACHE_SWEEP_SECS"),
                "CACHE_SWEEP_SECS",
                defaults.housekeeping_interval,
            )?,
            max_wait: None,
        };
        throttle
            .validate()
            .map_err(|e| AppError::configuration(format!("Invalid rate limit settings: {e}")))?;

        let openai_base_url = get("OPENAI_BASE_URL");
        if let Some(url) = &openai_base_url {
            validate_url(url).map_err(|e| {
                AppError::configuration(format!("OPENAI_BASE_URL is not usable: {e}"))
            })?;
        }

        Ok(Self {
            openai_api_key: get("OPENAI_API_KEY"),
            openai_base_url,
            openai_model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            google_api_key: get("GOOGLE_API_KEY"),
            google_cse_id: get("GOOGLE_CSE_ID"),
            public_records_api_key: get("PUBLIC_RECORDS_API_KEY"),
            debug: get("DEBUG").is_some_and(|v| parse_flag(&v)),
            log_level: get("LOG_LEVEL")
                .map(|v| v.to_lowercase())
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            throttle,
        })
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            google_api_key: self.google_api_key.clone(),
            google_cse_id: self.google_cse_id.clone(),
            throttle: self.throttle.clone(),
            ..Default::default()
        }
    }

    pub fn records_config(&self) -> RecordsConfig {
        RecordsConfig {
            api_key: self.public_records_api_key.clone(),
            throttle: self.throttle.clone(),
            ..Default::default()
        }
    }

    pub fn agent_config(&self) -> AgentConfig {
        let defaults = AgentConfig::default();
        AgentConfig {
            api_key: self.openai_api_key.clone(),
            base_url: self.openai_base_url.clone().unwrap_or(defaults.base_url),
            model: self.openai_model.clone(),
            ..defaults
        }
    }
}

/// `true`, `1` and `t` in any case are truthy
fn parse_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "t")
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &str, default: T) -> AppResult<T> {
    match raw {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| {
            AppError::configuration(format!("{key} must be a non-negative integer, got {raw:?}"))
        }),
    }
}

fn secs_or(raw: Option<String>, key: &str, default: Duration) -> AppResult<Duration> {
    parse_or(raw, key, default.as_secs()).map(Duration::from_secs)
}
