use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::http_cache::fetch_text_cached;
use crate::http_client::http_client;
use crate::state::{CoachEntry, PlayerRecord, TeamEntry};

pub const PLAYER_INDEX_PATHS: [&str; 2] = [
    "data/site_data/player_index.json",
    "data/site_data/players/index.json",
];
pub const TEAM_INDEX_PATH: &str = "data/site_data/team_index.json";
pub const COACH_INDEX_PATH: &str = "data/site_data/coach_index.json";

/// Where the pre-built site artifacts live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteSource {
    Local(PathBuf),
    Remote(String),
}

impl SiteSource {
    pub fn describe(&self) -> String {
        match self {
            SiteSource::Local(root) => root.display().to_string(),
            SiteSource::Remote(base) => base.clone(),
        }
    }

    /// Reads an artifact by its site-relative path; `Ok(None)` when it does not exist.
    pub fn read_optional(&self, rel: &str) -> Result<Option<String>> {
        let rel = rel.trim_start_matches('/');
        ensure_relative(rel)?;
        match self {
            SiteSource::Local(root) => {
                let path = root.join(rel);
                match fs::read_to_string(&path) {
                    Ok(body) => Ok(Some(body)),
                    Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
                    Err(err) => {
                        Err(err).with_context(|| format!("failed reading {}", path.display()))
                    }
                }
            }
            SiteSource::Remote(base) => {
                let client = http_client()?;
                let url = format!("{}/{rel}", base.trim_end_matches('/'));
                fetch_text_cached(client, &url)
            }
        }
    }

    pub fn read(&self, rel: &str) -> Result<String> {
        self.read_optional(rel)?
            .ok_or_else(|| anyhow!("{rel} not found under {}", self.describe()))
    }
}

fn ensure_relative(rel: &str) -> Result<()> {
    let escapes = Path::new(rel)
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(anyhow!("refusing to read outside the site root: {rel}"));
    }
    Ok(())
}

pub fn load_player_index(source: &SiteSource) -> Result<Vec<PlayerRecord>> {
    for rel in PLAYER_INDEX_PATHS {
        if let Some(raw) = source.read_optional(rel)? {
            log::info!("player index loaded from {rel}");
            let players = parse_player_index_json(&raw).with_context(|| format!("parse {rel}"))?;
            return Ok(players);
        }
    }
    Err(anyhow!("no player index under {}", source.describe()))
}

pub fn load_team_index(source: &SiteSource) -> Result<Vec<TeamEntry>> {
    let raw = source.read(TEAM_INDEX_PATH)?;
    parse_team_index_json(&raw).context("parse team index")
}

pub fn load_coach_index(source: &SiteSource) -> Result<Vec<CoachEntry>> {
    let raw = source.read(COACH_INDEX_PATH)?;
    parse_coach_index_json(&raw).context("parse coach index")
}

/// Player index records, keeping the first record for any repeated slug.
/// Records without a slug have no page and are dropped.
pub fn parse_player_index_json(raw: &str) -> Result<Vec<PlayerRecord>> {
    let records: Vec<PlayerRecord> = parse_records(raw, "player")?;
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(records.len());
    for record in records {
        if record.slug.trim().is_empty() {
            log::warn!("player {:?} has no slug; skipped", record.player_id);
            continue;
        }
        if !seen.insert(record.slug.clone()) {
            log::warn!("duplicate player slug {:?} skipped", record.slug);
            continue;
        }
        out.push(record);
    }
    Ok(out)
}

pub fn parse_team_index_json(raw: &str) -> Result<Vec<TeamEntry>> {
    parse_records(raw, "team")
}

pub fn parse_coach_index_json(raw: &str) -> Result<Vec<CoachEntry>> {
    parse_records(raw, "coach")
}

// A document that is valid JSON but not an array is an empty index.
fn parse_records<T: DeserializeOwned>(raw: &str, what: &str) -> Result<Vec<T>> {
    let value: Value = serde_json::from_str(raw).with_context(|| format!("invalid {what} index json"))?;
    let Value::Array(items) = value else {
        log::warn!("{what} index is not an array; treating as empty");
        return Ok(Vec::new());
    };
    let mut out = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<T>(item) {
            Ok(record) => out.push(record),
            Err(err) => log::warn!("{what} index entry {idx} skipped: {err}"),
        }
    }
    Ok(out)
}

/// Active teams that carry both an abbreviation and a slug, sorted by abbreviation.
pub fn active_teams(teams: &[TeamEntry]) -> Vec<&TeamEntry> {
    let mut rows: Vec<&TeamEntry> = teams
        .iter()
        .filter(|t| t.active && !t.team_abbr.is_empty() && !t.slug.is_empty())
        .collect();
    rows.sort_by(|a, b| a.team_abbr.cmp(&b.team_abbr));
    rows
}

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Strings and numbers become text; anything else becomes "".
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_string(value).unwrap_or_default())
}

/// Like [`lenient_string`] but empty text and non-scalars are `None`.
pub fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_string(value).filter(|s| !s.trim().is_empty()))
}

pub fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    })
}

pub fn lenient_opt_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_f64(&value).map(|n| n as i32))
}

/// Numbers and numeric strings; `NaN`-like text such as "NA" is `None`.
pub fn lenient_opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_f64(&value)
        .filter(|n| *n >= 0.0)
        .map(|n| n.round() as u32))
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::ensure_relative;

    #[test]
    fn rejects_paths_leaving_the_root() {
        assert!(ensure_relative("data/site_data/team_index.json").is_ok());
        assert!(ensure_relative("../secrets.json").is_err());
        assert!(ensure_relative("content/players/../../x.md").is_err());
    }
}
