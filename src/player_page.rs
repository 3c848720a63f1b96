use anyhow::{Context, Result};
use serde::Deserialize;

use crate::site_data::{SiteSource, lenient_opt_string, lenient_opt_u32};
use crate::state::PlayerRecord;

pub const BIO_PREVIEW_CHARS: usize = 450;
pub const BIO_PANEL_WIDTH: u16 = 42;
pub const MISSING: &str = "—";

pub const SECTIONS: [&str; 15] = [
    "XFP Summary",
    "XFP Splits",
    "XFP Weekly",
    "XFP WOWY",
    "XFP Environment",
    "Snap Rates – Weekly",
    "Snap Rates – Situational",
    "Route Participation",
    "Metrics – Efficiency",
    "Metrics – Descriptive",
    "Heatmap – Targets",
    "Heatmap – Alignment",
    "Injury Timeline",
    "Contract History",
    "Depth Chart Timeline",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TeamColors {
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub primary: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub secondary: Option<String>,
}

impl TeamColors {
    pub fn primary_rgb(&self) -> Option<(u8, u8, u8)> {
        self.primary.as_deref().and_then(hex_rgb)
    }
}

/// `#RRGGBB` to its components; anything else is `None`.
pub fn hex_rgb(raw: &str) -> Option<(u8, u8, u8)> {
    let hex = raw.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |idx: usize| u8::from_str_radix(&hex[idx..idx + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Contents of a player's `player.json`. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlayerDetail {
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub team: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub pos: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub gsis_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub age: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub season: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub college: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub jersey_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_u32")]
    pub height: Option<u32>,
    #[serde(default, deserialize_with = "lenient_opt_u32")]
    pub weight: Option<u32>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub draft_team: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_u32")]
    pub draft_pick: Option<u32>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub years_exp: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub highest_finish: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub avg_finish: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub archetype: Option<String>,
    #[serde(default)]
    pub team_colors: Option<TeamColors>,
}

impl PlayerDetail {
    /// Header fields the index already knows, for players without a detail file.
    pub fn from_record(record: &PlayerRecord) -> Self {
        Self {
            name: Some(record.name.clone()).filter(|n| !n.is_empty()),
            team: record.team.clone(),
            pos: Some(record.position.clone()).filter(|p| !p.is_empty()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BioPanel {
    #[default]
    Collapsed,
    Open,
}

impl BioPanel {
    pub fn is_open(self) -> bool {
        self == BioPanel::Open
    }

    pub fn toggle(&mut self) {
        *self = match self {
            BioPanel::Collapsed => BioPanel::Open,
            BioPanel::Open => BioPanel::Collapsed,
        };
    }

    pub fn close(&mut self) {
        *self = BioPanel::Collapsed;
    }

    /// Columns the page content shifts right while the panel is out.
    pub fn content_offset(self) -> u16 {
        if self.is_open() { BIO_PANEL_WIDTH } else { 0 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerPage {
    pub record: PlayerRecord,
    pub detail: PlayerDetail,
    pub bio: String,
    pub bio_panel: BioPanel,
    pub detail_missing: bool,
}

impl PlayerPage {
    pub fn new(record: PlayerRecord, detail: Option<PlayerDetail>, bio: String) -> Self {
        let detail_missing = detail.is_none();
        let detail = detail.unwrap_or_else(|| PlayerDetail::from_record(&record));
        Self {
            record,
            detail,
            bio,
            bio_panel: BioPanel::Collapsed,
            detail_missing,
        }
    }

    pub fn display_name(&self) -> &str {
        self.detail.name.as_deref().unwrap_or(&self.record.name)
    }

    pub fn has_bio(&self) -> bool {
        !self.bio.trim().is_empty()
    }

    pub fn bio_preview(&self) -> String {
        preview_text(&self.bio, BIO_PREVIEW_CHARS)
    }

    pub fn header_lines(&self) -> Vec<String> {
        let d = &self.detail;
        let mut lines = vec![
            self.display_name().to_string(),
            format!(
                "{} — {}{}",
                team_label(d.team.as_deref()),
                position_label(d.pos.as_deref()),
                jersey_label(d.jersey_number.as_deref())
            ),
            format!(
                "Age: {} • Season {} • {}",
                or_missing(d.age.as_deref()),
                or_missing(d.season.as_deref()),
                or_missing(d.status.as_deref())
            ),
            format!(
                "Height: {} • Weight: {}",
                height_label(d.height),
                weight_label(d.weight)
            ),
            format!("College: {}", or_missing(d.college.as_deref())),
        ];
        if let Some(draft) = draft_label(d.draft_team.as_deref(), d.draft_pick) {
            lines.push(draft);
        }
        let mut extras = Vec::new();
        if let Some(exp) = d.years_exp.as_deref() {
            extras.push(format!("Exp: {exp} yrs"));
        }
        if let Some(best) = d.highest_finish.as_deref() {
            extras.push(format!("Best finish: {best}"));
        }
        if let Some(avg) = d.avg_finish.as_deref() {
            extras.push(format!("Avg finish: {avg}"));
        }
        if let Some(archetype) = d.archetype.as_deref() {
            extras.push(format!("Archetype: {archetype}"));
        }
        if !extras.is_empty() {
            lines.push(extras.join(" • "));
        }
        lines
    }
}

#[derive(Debug, Clone, Copy)]
pub enum PageLookup<'a> {
    Found(&'a PlayerRecord),
    NotFound,
}

pub fn lookup<'a>(players: &'a [PlayerRecord], slug: &str) -> PageLookup<'a> {
    match players.iter().find(|p| !slug.is_empty() && p.slug == slug) {
        Some(record) => PageLookup::Found(record),
        None => PageLookup::NotFound,
    }
}

pub fn detail_path(player_id: &str) -> String {
    format!("data/site_data/players/player_id={player_id}/player.json")
}

pub fn bio_path(gsis_id: &str) -> String {
    format!("content/players/{gsis_id}.md")
}

pub fn parse_player_detail_json(raw: &str) -> Result<PlayerDetail> {
    let detail: Option<PlayerDetail> =
        serde_json::from_str(raw).context("invalid player detail json")?;
    Ok(detail.unwrap_or_default())
}

/// Missing bios are an empty string.
pub fn load_player_bio(source: &SiteSource, gsis_id: &str) -> Result<String> {
    if gsis_id.trim().is_empty() {
        return Ok(String::new());
    }
    Ok(source.read_optional(&bio_path(gsis_id))?.unwrap_or_default())
}

pub fn load_player_detail(source: &SiteSource, player_id: &str) -> Result<PlayerDetail> {
    let raw = source.read(&detail_path(player_id))?;
    parse_player_detail_json(&raw)
}

/// Builds the page for an index record. Problems become warnings, never errors.
pub fn load_player_page(source: &SiteSource, record: &PlayerRecord) -> (PlayerPage, Vec<String>) {
    let mut warnings = Vec::new();
    let detail = match load_player_detail(source, &record.player_id) {
        Ok(detail) => Some(detail),
        Err(err) => {
            warnings.push(format!("detail for {} unavailable: {err:#}", record.slug));
            None
        }
    };
    let gsis_id = detail
        .as_ref()
        .and_then(|d| d.gsis_id.clone())
        .unwrap_or_default();
    let bio = match load_player_bio(source, &gsis_id) {
        Ok(bio) => bio,
        Err(err) => {
            warnings.push(format!("bio for {} unavailable: {err:#}", record.slug));
            String::new()
        }
    };
    (PlayerPage::new(record.clone(), detail, bio), warnings)
}

/// Collapses newlines, trims, and caps at `max_chars` with a trailing ellipsis.
pub fn preview_text(text: &str, max_chars: usize) -> String {
    let mut clean = String::with_capacity(text.len());
    let mut in_break = false;
    for c in text.chars() {
        if c == '\n' {
            if !in_break {
                clean.push(' ');
            }
            in_break = true;
        } else {
            clean.push(c);
            in_break = false;
        }
    }
    let clean = clean.trim();
    if clean.chars().count() <= max_chars {
        return clean.to_string();
    }
    let cut: String = clean.chars().take(max_chars).collect();
    format!("{}…", cut.trim())
}

pub fn team_label(team: Option<&str>) -> &str {
    team.unwrap_or("FA")
}

pub fn position_label(pos: Option<&str>) -> &str {
    pos.unwrap_or("UNK")
}

/// " #12" for a numeric jersey, otherwise nothing.
pub fn jersey_label(jersey: Option<&str>) -> String {
    match jersey.map(str::trim).filter(|j| !j.is_empty()) {
        Some(j) if j.parse::<f64>().is_ok_and(f64::is_finite) => format!(" #{j}"),
        _ => String::new(),
    }
}

pub fn height_label(inches: Option<u32>) -> String {
    match inches.filter(|h| *h > 0) {
        Some(h) => format!("{}'{}\"", h / 12, h % 12),
        None => MISSING.to_string(),
    }
}

pub fn weight_label(lbs: Option<u32>) -> String {
    match lbs.filter(|w| *w > 0) {
        Some(w) => format!("{w} lbs"),
        None => MISSING.to_string(),
    }
}

/// Round and pick-in-round for an overall pick, assuming 32 picks per round.
pub fn draft_round_pick(overall: u32) -> Option<(u32, u32)> {
    if overall == 0 {
        return None;
    }
    Some((overall.div_ceil(32), (overall - 1) % 32 + 1))
}

pub fn draft_label(team: Option<&str>, pick: Option<u32>) -> Option<String> {
    let slot = pick.and_then(draft_round_pick);
    if team.is_none() && slot.is_none() {
        return None;
    }
    let mut label = format!("Draft: {}", team.unwrap_or(MISSING));
    if let (Some(overall), Some((round, in_round))) = (pick, slot) {
        label.push_str(&format!(", Round {round} Pick {in_round} (#{overall})"));
    }
    Some(label)
}

fn or_missing(value: Option<&str>) -> &str {
    value.unwrap_or(MISSING)
}

#[cfg(test)]
mod tests {
    use super::{draft_round_pick, hex_rgb, preview_text};

    #[test]
    fn draft_round_boundaries() {
        assert_eq!(draft_round_pick(1), Some((1, 1)));
        assert_eq!(draft_round_pick(32), Some((1, 32)));
        assert_eq!(draft_round_pick(33), Some((2, 1)));
        assert_eq!(draft_round_pick(0), None);
    }

    #[test]
    fn hex_colors_parse_only_ascii_hex() {
        assert_eq!(hex_rgb("#03202F"), Some((3, 32, 47)));
        assert_eq!(hex_rgb(" #a71930 "), Some((167, 25, 48)));
        // Six bytes, but not six hex digits.
        assert_eq!(hex_rgb("#aébcd"), None);
        assert_eq!(hex_rgb("#+1+2+3"), None);
        assert_eq!(hex_rgb("#12345"), None);
        assert_eq!(hex_rgb("03202F"), None);
    }

    #[test]
    fn preview_collapses_blank_lines() {
        assert_eq!(preview_text("\nA\n\n\nB\n", 450), "A B");
        assert_eq!(preview_text("", 450), "");
    }
}
