use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::models::entries::SectionKind;

pub const DEFAULT_DRAFT_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_NOTIFICATION_TIMEOUT_MS: u64 = 3000;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Editor configuration loaded from environment variables.
/// Fails at startup if `API_BASE_URL` is missing or a numeric variable does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub sections: Vec<SectionKind>,
    pub draft_debounce_ms: u64,
    pub notification_timeout_ms: u64,
    pub http_timeout_secs: u64,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let sections = match std::env::var("SECTIONS") {
            Ok(raw) => parse_sections(&raw)?,
            Err(_) => SectionKind::ALL.to_vec(),
        };

        Ok(Config {
            api_base_url: require_env("API_BASE_URL")?,
            sections,
            draft_debounce_ms: parse_env("DRAFT_DEBOUNCE_MS", DEFAULT_DRAFT_DEBOUNCE_MS)?,
            notification_timeout_ms: parse_env(
                "NOTIFICATION_TIMEOUT_MS",
                DEFAULT_NOTIFICATION_TIMEOUT_MS,
            )?,
            http_timeout_secs: parse_env("HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn timeline_settings(&self) -> TimelineSettings {
        TimelineSettings {
            notification_timeout: Duration::from_millis(self.notification_timeout_ms),
            draft_debounce: Duration::from_millis(self.draft_debounce_ms),
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

/// Timing knobs handed to the library components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineSettings {
    /// How long a transient notification stays visible.
    pub notification_timeout: Duration,
    /// Quiet period before a draft is propagated into the shared document.
    pub draft_debounce: Duration,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            notification_timeout: Duration::from_millis(DEFAULT_NOTIFICATION_TIMEOUT_MS),
            draft_debounce: Duration::from_millis(DEFAULT_DRAFT_DEBOUNCE_MS),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// Parses a comma-separated section list such as `education, work,skills`.
pub fn parse_sections(raw: &str) -> Result<Vec<SectionKind>> {
    let mut sections = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let kind = name
            .parse::<SectionKind>()
            .with_context(|| format!("Invalid SECTIONS entry '{name}'"))?;
        if !sections.contains(&kind) {
            sections.push(kind);
        }
    }
    Ok(sections)
}
