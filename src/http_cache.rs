use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, anyhow};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{ETAG, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED, USER_AGENT};
use serde::{Deserialize, Serialize};

const CACHE_VERSION: u32 = 1;
const CACHE_DIR: &str = "nocap_terminal";
const CACHE_FILE: &str = "http_cache.json";
const MAX_ENTRIES: usize = 512;
const AGENT: &str = concat!("nocap_terminal/", env!("CARGO_PKG_VERSION"));

static CACHE: Mutex<Option<HttpCacheFile>> = Mutex::new(None);

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct HttpCacheFile {
    version: u32,
    entries: HashMap<String, CacheEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    body: String,
    etag: Option<String>,
    last_modified: Option<String>,
    fetched_at: u64,
}

/// GETs a static asset, revalidating against the on-disk copy.
///
/// A 404 is `Ok(None)`. When the server cannot be reached but a cached body
/// exists, the cached body is returned.
pub fn fetch_text_cached(client: &Client, url: &str) -> Result<Option<String>> {
    let cached_entry = with_cache(|cache| cache.entries.get(url).cloned());

    let mut req = client.get(url).header(USER_AGENT, AGENT);
    if let Some(entry) = cached_entry.as_ref() {
        if let Some(etag) = entry.etag.as_ref() {
            req = req.header(IF_NONE_MATCH, etag);
        }
        if let Some(last_modified) = entry.last_modified.as_ref() {
            req = req.header(IF_MODIFIED_SINCE, last_modified);
        }
    }

    let resp = match req.send() {
        Ok(resp) => resp,
        Err(err) => {
            if let Some(entry) = cached_entry {
                log::warn!("{url} unreachable, serving cached copy: {err}");
                return Ok(Some(entry.body));
            }
            return Err(err).context("request failed");
        }
    };
    let status = resp.status();
    let headers = resp.headers().clone();
    if status == StatusCode::NOT_MODIFIED {
        if let Some(entry) = cached_entry {
            return Ok(Some(entry.body));
        }
        return Err(anyhow!("received 304 without cache body"));
    }
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }

    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow!("http {status} for {url}"));
    }

    let etag = headers
        .get(ETAG)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());
    let last_modified = headers
        .get(LAST_MODIFIED)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    let entry = CacheEntry {
        body: body.clone(),
        etag,
        last_modified,
        fetched_at: system_time_to_secs(SystemTime::now()).unwrap_or_default(),
    };
    store_cache_entry(url, entry);
    Ok(Some(body))
}

fn with_cache<T>(f: impl FnOnce(&mut HttpCacheFile) -> T) -> T {
    let mut guard = match CACHE.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    let cache = guard.get_or_insert_with(load_cache_file);
    f(cache)
}

fn store_cache_entry(key: &str, entry: CacheEntry) {
    with_cache(|cache| {
        cache.version = CACHE_VERSION;
        cache.entries.insert(key.to_string(), entry);
        evict_oldest(cache, MAX_ENTRIES);
        if let Err(err) = save_cache_file(cache) {
            log::warn!("http cache not saved: {err:#}");
        }
    });
}

/// Drops the least recently fetched entries until at most `max` remain.
fn evict_oldest(cache: &mut HttpCacheFile, max: usize) {
    let excess = cache.entries.len().saturating_sub(max);
    if excess == 0 {
        return;
    }
    let mut by_age: Vec<(u64, String)> = cache
        .entries
        .iter()
        .map(|(url, entry)| (entry.fetched_at, url.clone()))
        .collect();
    by_age.sort();
    for (_, url) in by_age.into_iter().take(excess) {
        cache.entries.remove(&url);
    }
}

fn load_cache_file() -> HttpCacheFile {
    let Some(path) = cache_path() else {
        return HttpCacheFile::default();
    };
    let Ok(raw) = fs::read_to_string(path) else {
        return HttpCacheFile::default();
    };
    let mut cache = serde_json::from_str::<HttpCacheFile>(&raw).unwrap_or_default();
    if cache.version != CACHE_VERSION {
        return HttpCacheFile::default();
    }
    evict_oldest(&mut cache, MAX_ENTRIES);
    cache
}

fn save_cache_file(cache: &HttpCacheFile) -> Result<()> {
    let Some(path) = cache_path() else {
        return Ok(());
    };
    let Some(dir) = path.parent() else {
        return Ok(());
    };
    fs::create_dir_all(dir).context("create cache dir")?;
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string(cache).context("serialize http cache")?;
    fs::write(&tmp, json).context("write http cache")?;
    fs::rename(&tmp, &path).context("swap http cache")?;
    Ok(())
}

fn app_cache_dir() -> Option<PathBuf> {
    if let Ok(base) = std::env::var("XDG_CACHE_HOME")
        && !base.trim().is_empty()
    {
        return Some(PathBuf::from(base).join(CACHE_DIR));
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(home).join(".cache").join(CACHE_DIR))
}

fn cache_path() -> Option<PathBuf> {
    app_cache_dir().map(|dir| dir.join(CACHE_FILE))
}

fn system_time_to_secs(time: SystemTime) -> Option<u64> {
    time.duration_since(UNIX_EPOCH).ok().map(|d| d.as_secs())
}

#[cfg(test)]
mod tests {
    use super::{CacheEntry, HttpCacheFile, evict_oldest};

    fn entry(fetched_at: u64) -> CacheEntry {
        CacheEntry {
            body: String::new(),
            etag: None,
            last_modified: None,
            fetched_at,
        }
    }

    #[test]
    fn eviction_keeps_most_recent_entries() {
        let mut cache = HttpCacheFile::default();
        for (idx, at) in [30u64, 10, 50, 20, 40].into_iter().enumerate() {
            cache.entries.insert(format!("https://site/{idx}"), entry(at));
        }
        evict_oldest(&mut cache, 3);
        let mut kept: Vec<u64> = cache.entries.values().map(|e| e.fetched_at).collect();
        kept.sort();
        assert_eq!(kept, vec![30, 40, 50]);

        evict_oldest(&mut cache, 10);
        assert_eq!(cache.entries.len(), 3);
    }
}
