use std::env;
use std::path::PathBuf;

use crate::site_data::SiteSource;
use crate::state::DEFAULT_SEARCH_LIMIT;

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOG_FILE: &str = "nocap_terminal.log";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub source: SiteSource,
    pub search_limit: usize,
    pub log_file: PathBuf,
}

impl AppConfig {
    /// Reads `NOCAP_*` variables; call after `.env` files are loaded.
    pub fn from_env() -> Self {
        Self {
            source: site_source_from_env(),
            search_limit: search_limit(),
            log_file: env_non_empty("NOCAP_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }
}

/// `NOCAP_SITE_URL` wins over `NOCAP_SITE_DIR`; the default is the working directory.
pub fn site_source_from_env() -> SiteSource {
    if let Some(url) = env_non_empty("NOCAP_SITE_URL") {
        return SiteSource::Remote(url);
    }
    let dir = env_non_empty("NOCAP_SITE_DIR").unwrap_or_else(|| ".".to_string());
    SiteSource::Local(PathBuf::from(dir))
}

pub fn search_limit() -> usize {
    env::var("NOCAP_SEARCH_LIMIT")
        .ok()
        .and_then(|val| val.trim().parse::<usize>().ok())
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
}

pub fn http_timeout_secs() -> u64 {
    env::var("NOCAP_HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|val| val.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS)
        .clamp(1, 120)
}

fn env_non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}
