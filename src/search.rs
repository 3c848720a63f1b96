use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::state::PlayerRecord;

/// Lower-cases `text` and keeps only `[a-z0-9]`.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Splits a display name on whitespace and hyphens, then normalizes each word.
///
/// Splitting happens before punctuation is stripped so "Amon-Ra St. Brown" keeps
/// four words. Words that normalize to nothing (a lone "." or "&") are dropped.
pub fn name_tokens(name: &str) -> Vec<String> {
    name.to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-')
        .map(normalize)
        .filter(|token| !token.is_empty())
        .collect()
}

pub fn initials(tokens: &[String]) -> String {
    tokens
        .iter()
        .filter_map(|token| token.chars().next())
        .collect()
}

/// `needle` must already be normalized.
pub fn name_matches(name: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    let tokens = name_tokens(name);
    tokens.iter().any(|token| token.starts_with(needle)) || initials(&tokens).starts_with(needle)
}

/// Active players whose name has a word (or initials run) starting with `query`,
/// ordered by name. An empty query matches nobody.
pub fn search_players<'a>(query: &str, players: &'a [PlayerRecord]) -> Vec<&'a PlayerRecord> {
    let needle = normalize(query);
    if needle.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<&PlayerRecord> = players
        .iter()
        .filter(|p| p.active)
        .filter(|p| name_matches(&p.name, &needle))
        .collect();
    matches.sort_by(|a, b| compare_players(a, b));
    matches
}

/// Players at `position` (case-insensitive), either the active or the inactive set.
pub fn players_at_position<'a>(
    players: &'a [PlayerRecord],
    position: &str,
    active: bool,
) -> Vec<&'a PlayerRecord> {
    let mut rows: Vec<&PlayerRecord> = players
        .iter()
        .filter(|p| p.active == active)
        .filter(|p| p.position.eq_ignore_ascii_case(position))
        .collect();
    rows.sort_by(|a, b| compare_players(a, b));
    rows
}

fn compare_players(a: &PlayerRecord, b: &PlayerRecord) -> Ordering {
    compare_names(&a.name, &b.name).then_with(|| a.slug.cmp(&b.slug))
}

/// Collation for display names: accents and case are ignored first, so "Émile"
/// sorts with the E names. Ties go unaccented before accented, then lower case
/// ahead of upper case.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| lowercase(a).cmp(lowercase(b)))
        .then_with(|| {
            for (ca, cb) in a.chars().zip(b.chars()) {
                if ca == cb {
                    continue;
                }
                return match (ca.is_lowercase(), cb.is_lowercase()) {
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    _ => ca.cmp(&cb),
                };
            }
            a.len().cmp(&b.len())
        })
}

fn base_letters(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn lowercase(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd().flat_map(char::to_lowercase)
}
