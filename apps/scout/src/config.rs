use std::collections::HashSet;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::cache::JOB_CACHE_TTL;
use crate::jobs::processor::{MAX_PROCESS_WORKERS, MAX_SEARCH_WORKERS};

/// Companies whose postings are dropped unless `BLACKLIST` overrides the list.
const DEFAULT_BLACKLIST: &[&str] = &[
    "Revature",
    "BeaconFire Inc.",
    "BeaconFire Solution Inc.",
    "Canonical",
    "SynergisticIT",
    "Talentify.io",
    "Jobs via Dice",
    "Robert Half",
];

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// In-memory cache when unset.
    pub redis_url: Option<String>,
    /// Keyword scorer when unset.
    pub anthropic_api_key: Option<String>,
    pub catalog_path: Option<PathBuf>,
    pub resume_path: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub max_process_workers: usize,
    pub max_search_workers: usize,
    pub cache_ttl: Duration,
    pub blacklist: HashSet<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let ttl_secs: u64 = parse_env("JOB_CACHE_TTL_SECS", JOB_CACHE_TTL.as_secs())?;
        if ttl_secs == 0 {
            anyhow::bail!("JOB_CACHE_TTL_SECS must be greater than zero");
        }

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            redis_url: optional_env("REDIS_URL"),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            catalog_path: optional_env("CATALOG_PATH").map(PathBuf::from),
            resume_path: optional_env("RESUME_PATH").map(PathBuf::from),
            output_dir: optional_env("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("output")),
            max_process_workers: parse_env("MAX_PROCESS_WORKERS", MAX_PROCESS_WORKERS)?,
            max_search_workers: parse_env("MAX_SEARCH_WORKERS", MAX_SEARCH_WORKERS)?,
            cache_ttl: Duration::from_secs(ttl_secs),
            blacklist: optional_env("BLACKLIST")
                .map(|raw| parse_blacklist(&raw))
                .unwrap_or_else(default_blacklist),
        })
    }
}

pub fn default_blacklist() -> HashSet<String> {
    DEFAULT_BLACKLIST.iter().map(|s| s.to_string()).collect()
}

/// Comma-separated company names; entries are trimmed and blanks ignored.
fn parse_blacklist(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Unset and blank variables both read as `None`.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
