//! Runtime configuration read from the environment.
//!
//! Every variable is optional and unparseable values fall back to the
//! default, so a bad environment never prevents startup.

use std::time::Duration;

use super::logging::LogDestination;

/// The field-filtered REST Countries endpoint the browser was written against.
pub const DEFAULT_ENDPOINT: &str = "https://restcountries.com/v2/all?fields=name,region,area,flag";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub struct Config {
    /// `ATLAS_ENDPOINT`: where to fetch the country list.
    pub endpoint: String,
    /// `ATLAS_TIMEOUT_SECS`: per-request timeout, in whole seconds.
    pub request_timeout: Duration,
    /// `ATLAS_LOG`: `terminal` (default), `file` or `both`.
    pub log_destination: LogDestination,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            endpoint: endpoint_from(std::env::var("ATLAS_ENDPOINT").ok().as_deref()),
            request_timeout: timeout_from(std::env::var("ATLAS_TIMEOUT_SECS").ok().as_deref()),
            log_destination: log_destination_from(std::env::var("ATLAS_LOG").ok().as_deref()),
        }
    }
}

fn endpoint_from(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => DEFAULT_ENDPOINT.to_string(),
    }
}

fn timeout_from(raw: Option<&str>) -> Duration {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}

fn log_destination_from(raw: Option<&str>) -> LogDestination {
    match raw.map(str::trim) {
        Some("file") => LogDestination::File,
        Some("both") => LogDestination::Both,
        _ => LogDestination::Terminal,
    }
}
