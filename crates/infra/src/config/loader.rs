//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Environment variables, when `CAREERDECK_API_BASE_URL` is set
//! 2. Otherwise the first config file found by [`probe_config_paths`]
//! 3. Otherwise built-in defaults
//!
//! ## Environment Variables
//! - `CAREERDECK_API_BASE_URL`: collaborator base URL (required for env loading)
//! - `CAREERDECK_API_TOKEN`: bearer token sent to the collaborators
//! - `CAREERDECK_API_TIMEOUT_SECS`: per-request timeout
//! - `CAREERDECK_API_MAX_ATTEMPTS`: attempts per request, including the first
//! - `CAREERDECK_DEADLINES_LIMIT`: maximum deadlines fetched
//! - `CAREERDECK_CALENDAR_PROVIDER`: external calendar provider name
//! - `CAREERDECK_DAYS_PAST` / `CAREERDECK_DAYS_FUTURE`: external fetch window
//! - `CAREERDECK_INCLUDE_PAST_INTERVIEWS`: true/false
//! - `CAREERDECK_DEDUPE_EXTERNAL`: true/false
//! - `CAREERDECK_STORAGE_PATH`: local storage file
//! - `CAREERDECK_LOG` / `CAREERDECK_LOG_JSON`: log filter and JSON output
//!
//! ## File Locations
//! `config.{json,toml}` then `careerdeck.{json,toml}` in the working
//! directory and its two parents, then the same names next to the executable.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use careerdeck_domain::{CareerDeckError, Config, Result};

const FILE_NAMES: [&str; 4] = ["config.json", "config.toml", "careerdeck.json", "careerdeck.toml"];

/// Load configuration: environment, then file, then defaults.
///
/// # Errors
/// Returns `CareerDeckError::Config` when a source is present but invalid.
pub fn load() -> Result<Config> {
    if std::env::var_os("CAREERDECK_API_BASE_URL").is_some() {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        return Ok(config);
    }

    match probe_config_paths() {
        Some(path) => load_from_file(Some(path)),
        None => {
            tracing::info!("No configuration source found; using defaults");
            Ok(Config::default())
        }
    }
}

/// Load configuration from `CAREERDECK_*` environment variables.
///
/// Unset optional variables keep their defaults.
///
/// # Errors
/// Returns `CareerDeckError::Config` if the base URL is missing or a value
/// does not parse.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();

    config.api.base_url = env_var("CAREERDECK_API_BASE_URL")?;
    config.api.bearer_token = std::env::var("CAREERDECK_API_TOKEN").ok().filter(|t| !t.is_empty());
    if let Some(timeout) = env_parse("CAREERDECK_API_TIMEOUT_SECS")? {
        config.api.timeout_seconds = timeout;
    }
    if let Some(attempts) = env_parse("CAREERDECK_API_MAX_ATTEMPTS")? {
        config.api.max_attempts = attempts;
    }
    if let Some(limit) = env_parse("CAREERDECK_DEADLINES_LIMIT")? {
        config.api.deadlines_limit = limit;
    }

    if let Ok(provider) = std::env::var("CAREERDECK_CALENDAR_PROVIDER") {
        config.calendar.provider = provider;
    }
    if let Some(days) = env_parse("CAREERDECK_DAYS_PAST")? {
        config.calendar.days_past = days;
    }
    if let Some(days) = env_parse("CAREERDECK_DAYS_FUTURE")? {
        config.calendar.days_future = days;
    }
    config.calendar.include_past_interviews =
        env_bool("CAREERDECK_INCLUDE_PAST_INTERVIEWS", config.calendar.include_past_interviews);
    config.calendar.dedupe_external =
        env_bool("CAREERDECK_DEDUPE_EXTERNAL", config.calendar.dedupe_external);

    if let Ok(path) = std::env::var("CAREERDECK_STORAGE_PATH") {
        config.storage.path = path;
    }

    if let Ok(filter) = std::env::var("CAREERDECK_LOG") {
        config.logging.filter = filter;
    }
    config.logging.json = env_bool("CAREERDECK_LOG_JSON", config.logging.json);

    Ok(config)
}

/// Load configuration from a file.
///
/// If `path` is `None`, probes the standard locations. Format is chosen by
/// extension (`.json` or `.toml`); omitted sections keep their defaults.
///
/// # Errors
/// Returns `CareerDeckError::Config` if the file is missing, unreadable or
/// malformed.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CareerDeckError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            CareerDeckError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| CareerDeckError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| CareerDeckError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| CareerDeckError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(CareerDeckError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// First existing config file in the standard locations, if any.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd.clone());
        roots.push(cwd.join(".."));
        roots.push(cwd.join("../.."));
    }

    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf)) {
        roots.push(exe_dir);
    }

    roots
        .iter()
        .flat_map(|root| FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.is_file())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| CareerDeckError::Config(format!("Missing required environment variable: {}", key)))
}

/// Parse an optional environment variable; unset yields `None`.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| CareerDeckError::Config(format!("Invalid value for {}: {}", key, e))),
        Err(_) => Ok(None),
    }
}

/// Accepts `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive).
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use once_cell::sync::Lazy;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const VARS: [&str; 6] = [
        "CAREERDECK_API_BASE_URL",
        "CAREERDECK_API_TOKEN",
        "CAREERDECK_API_MAX_ATTEMPTS",
        "CAREERDECK_DAYS_FUTURE",
        "CAREERDECK_DEDUPE_EXTERNAL",
        "CAREERDECK_LOG_JSON",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("CAREERDECK_TEST_BOOL_ON", " ON ");
        std::env::set_var("CAREERDECK_TEST_BOOL_OFF", "no");
        std::env::remove_var("CAREERDECK_TEST_BOOL_MISSING");

        assert!(env_bool("CAREERDECK_TEST_BOOL_ON", false));
        assert!(!env_bool("CAREERDECK_TEST_BOOL_OFF", true));
        assert!(env_bool("CAREERDECK_TEST_BOOL_MISSING", true));

        std::env::remove_var("CAREERDECK_TEST_BOOL_ON");
        std::env::remove_var("CAREERDECK_TEST_BOOL_OFF");
    }

    #[test]
    fn test_load_from_env_overrides_defaults() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("CAREERDECK_API_BASE_URL", "https://api.example/v1");
        std::env::set_var("CAREERDECK_API_TOKEN", "tok");
        std::env::set_var("CAREERDECK_API_MAX_ATTEMPTS", "5");
        std::env::set_var("CAREERDECK_DAYS_FUTURE", "14");
        std::env::set_var("CAREERDECK_DEDUPE_EXTERNAL", "true");
        std::env::set_var("CAREERDECK_LOG_JSON", "1");

        let config = load_from_env().unwrap();
        assert_eq!(config.api.base_url, "https://api.example/v1");
        assert_eq!(config.api.bearer_token.as_deref(), Some("tok"));
        assert_eq!(config.api.max_attempts, 5);
        assert_eq!(config.calendar.days_future, 14);
        assert_eq!(config.calendar.days_past, Config::default().calendar.days_past);
        assert!(config.calendar.dedupe_external);
        assert!(config.logging.json);

        clear_env();
    }

    #[test]
    fn test_load_from_env_missing_base_url() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, CareerDeckError::Config(msg) if msg.contains("CAREERDECK_API_BASE_URL")));
    }

    #[test]
    fn test_load_from_env_invalid_number() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("CAREERDECK_API_BASE_URL", "https://api.example/v1");
        std::env::set_var("CAREERDECK_DAYS_FUTURE", "soon");

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, CareerDeckError::Config(msg) if msg.contains("CAREERDECK_DAYS_FUTURE")));

        clear_env();
    }

    #[test]
    fn test_parse_config_partial_toml_keeps_defaults() {
        let toml_content = r#"
[calendar]
days_past = 7
dedupe_external = true
"#;

        let config = parse_config(toml_content, &PathBuf::from("careerdeck.toml")).unwrap();
        assert_eq!(config.calendar.days_past, 7);
        assert!(config.calendar.dedupe_external);
        assert_eq!(config.api, Config::default().api);
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("some content", &PathBuf::from("test.yaml"));
        assert!(matches!(result, Err(CareerDeckError::Config(_))));
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/careerdeck.json")));
        assert!(matches!(result, Err(CareerDeckError::Config(_))));
    }
}
