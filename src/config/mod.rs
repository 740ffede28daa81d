// src/config/mod.rs

use crate::error::ConfigError;
use crate::retry::RetryConfig;
use reqwest::Url;
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::level_filters::LevelFilter;

/// Startup configuration. Built once and handed to the components that need it.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub weather_agent_url: String,
    pub planning_agent_url: String,
    pub retry: RetryConfig,
    /// Bounds one stage of a trip: every attempt plus the backoff between them.
    pub stage_timeout: Duration,
    pub pause_between_trips: Duration,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            weather_agent_url: "http://localhost:5001".into(),
            planning_agent_url: "http://localhost:5002".into(),
            retry: RetryConfig::default(),
            stage_timeout: Duration::from_secs(30),
            pause_between_trips: Duration::from_secs(2),
            log_level: "info".into(),
        }
    }
}

impl Settings {
    /// Reads the process environment, falling back to `./.env` if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_file(Path::new(".env"))
    }

    /// Process environment first, then the pairs in `path`. A missing file is
    /// fine; an unreadable or malformed one is a [`ConfigError`].
    pub fn from_env_file(path: &Path) -> Result<Self, ConfigError> {
        let file = read_env_file(path)?;
        Self::from_lookup(|key| std::env::var(key).ok().or_else(|| file.get(key).cloned()))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();

        let weather_port: u16 = parse_or(&lookup, "WEATHER_AGENT_PORT", 5001)?;
        let planning_port: u16 = parse_or(&lookup, "PLANNING_AGENT_PORT", 5002)?;

        let weather_agent_url = lookup("WEATHER_AGENT_URL")
            .unwrap_or_else(|| format!("http://localhost:{weather_port}"));
        let planning_agent_url = lookup("PLANNING_AGENT_URL")
            .unwrap_or_else(|| format!("http://localhost:{planning_port}"));

        let retry = RetryConfig {
            max_retries: parse_or(&lookup, "TRIP_MAX_RETRIES", defaults.retry.max_retries)?,
            base_delay: Duration::from_millis(parse_or(
                &lookup,
                "TRIP_BASE_DELAY_MS",
                defaults.retry.base_delay.as_millis() as u64,
            )?),
            max_delay: Duration::from_millis(parse_or(
                &lookup,
                "TRIP_MAX_DELAY_MS",
                defaults.retry.max_delay.as_millis() as u64,
            )?),
        };

        let settings = Settings {
            weather_agent_url,
            planning_agent_url,
            retry,
            stage_timeout: Duration::from_secs(parse_or(
                &lookup,
                "TRIP_TIMEOUT_SECS",
                defaults.stage_timeout.as_secs(),
            )?),
            pause_between_trips: Duration::from_millis(parse_or(
                &lookup,
                "TRIP_PAUSE_MS",
                defaults.pause_between_trips.as_millis() as u64,
            )?),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url("WEATHER_AGENT_URL", &self.weather_agent_url)?;
        check_url("PLANNING_AGENT_URL", &self.planning_agent_url)?;

        if self.retry.max_retries < 1 {
            return Err(ConfigError::invalid(
                "TRIP_MAX_RETRIES",
                self.retry.max_retries.to_string(),
                "must be at least 1",
            ));
        }
        if self.retry.max_delay < self.retry.base_delay {
            return Err(ConfigError::invalid(
                "TRIP_MAX_DELAY_MS",
                self.retry.max_delay.as_millis().to_string(),
                "must not be below TRIP_BASE_DELAY_MS",
            ));
        }
        if self.stage_timeout.is_zero() {
            return Err(ConfigError::invalid("TRIP_TIMEOUT_SECS", "0", "must be positive"));
        }
        if LevelFilter::from_str(&self.log_level).is_err() {
            return Err(ConfigError::invalid(
                "LOG_LEVEL",
                self.log_level.clone(),
                "expected trace, debug, info, warn or error",
            ));
        }
        Ok(())
    }
}

fn read_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let dotenv_error =
        |err: dotenvy::Error| ConfigError::invalid(".env", path.display().to_string(), err.to_string());

    let pairs = match dotenvy::from_path_iter(path) {
        Ok(pairs) => pairs,
        Err(err) if err.not_found() => return Ok(HashMap::new()),
        Err(err) => return Err(dotenv_error(err)),
    };
    pairs.map(|pair| pair.map_err(&dotenv_error)).collect()
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::invalid(key, raw.clone(), e.to_string())),
    }
}

fn check_url(key: &'static str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::invalid(key, value, e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::invalid(
            key,
            value,
            format!("unsupported scheme {other:?}"),
        )),
    }
}
