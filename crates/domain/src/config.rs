//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_API_MAX_ATTEMPTS, DEFAULT_API_TIMEOUT_SECS, DEFAULT_DAYS_FUTURE,
    DEFAULT_DAYS_PAST, DEFAULT_DEADLINES_LIMIT, DEFAULT_STORAGE_PATH, EXTERNAL_CALENDAR_PROVIDER,
    NOTES_STORAGE_KEY,
};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote collaborator API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    /// Total attempts per request (initial try + retries)
    pub max_attempts: usize,
    pub deadlines_limit: usize,
    #[serde(skip_serializing)]
    pub bearer_token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_API_TIMEOUT_SECS,
            max_attempts: DEFAULT_API_MAX_ATTEMPTS,
            deadlines_limit: DEFAULT_DEADLINES_LIMIT,
            bearer_token: None,
        }
    }
}

/// Calendar aggregation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Provider name external events are fetched from
    pub provider: String,
    pub days_past: u32,
    pub days_future: u32,
    pub include_past_interviews: bool,
    /// Collapse external events reported by several accounts
    pub dedupe_external: bool,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            provider: EXTERNAL_CALENDAR_PROVIDER.to_string(),
            days_past: DEFAULT_DAYS_PAST,
            days_future: DEFAULT_DAYS_FUTURE,
            include_past_interviews: true,
            dedupe_external: false,
        }
    }
}

/// Client-local storage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: String,
    pub notes_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { path: DEFAULT_STORAGE_PATH.to_string(), notes_key: NOTES_STORAGE_KEY.to_string() }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `"info,careerdeck_core=debug"`
    pub filter: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: "info".to_string(), json: false }
    }
}
