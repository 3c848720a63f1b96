use std::fs;
use std::path::PathBuf;

use nocap_terminal::site_data::{
    SiteSource, active_teams, load_coach_index, load_player_index, load_team_index,
    parse_coach_index_json, parse_player_index_json, parse_team_index_json,
};

fn fixture_site() -> SiteSource {
    SiteSource::Local(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/site"))
}

#[test]
fn player_index_skips_bad_entries_and_duplicate_slugs() {
    let players = load_player_index(&fixture_site()).expect("player index");
    assert_eq!(players.len(), 9);

    let mixon: Vec<_> = players.iter().filter(|p| p.slug == "joe-mixon").collect();
    assert_eq!(mixon.len(), 1);
    assert_eq!(mixon[0].name, "Joe Mixon");
    assert_eq!(mixon[0].team.as_deref(), Some("HOU"));
}

#[test]
fn player_index_tolerates_loose_field_types() {
    let players = load_player_index(&fixture_site()).expect("player index");

    let brady = players.iter().find(|p| p.slug == "tom-brady").expect("brady");
    assert_eq!(brady.player_id, "19596");
    assert_eq!(brady.position, "QB");
    assert!(!brady.active);
    assert_eq!(brady.first_season, Some(2000));

    let prospect = players
        .iter()
        .find(|p| p.slug == "unnamed-prospect")
        .expect("prospect");
    assert_eq!(prospect.name, "");
    assert_eq!(prospect.team, None);
    assert_eq!(prospect.last_season, None);
}

#[test]
fn missing_active_flag_reads_as_inactive() {
    let raw = r#"[{"player_id": "1", "name": "No Flag", "slug": "no-flag"}]"#;
    let players = parse_player_index_json(raw).expect("parse");
    assert_eq!(players.len(), 1);
    assert!(!players[0].active);
}

#[test]
fn non_array_documents_are_empty_indexes() {
    let raw = fs::read_to_string(
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/not_an_array.json"),
    )
    .expect("fixture");
    assert!(parse_player_index_json(&raw).expect("parse").is_empty());
    assert!(parse_team_index_json(&raw).expect("parse").is_empty());
    assert!(parse_coach_index_json(&raw).expect("parse").is_empty());
}

#[test]
fn invalid_json_is_an_error() {
    assert!(parse_player_index_json("[{").is_err());
    assert!(parse_team_index_json("not json").is_err());
}

#[test]
fn active_teams_filters_and_sorts() {
    let teams = load_team_index(&fixture_site()).expect("team index");
    assert_eq!(teams.len(), 5);
    let abbrs: Vec<&str> = active_teams(&teams)
        .iter()
        .map(|t| t.team_abbr.as_str())
        .collect();
    assert_eq!(abbrs, vec!["CIN", "DET", "HOU"]);
}

#[test]
fn coach_index_loads() {
    let coaches = load_coach_index(&fixture_site()).expect("coach index");
    assert_eq!(coaches.len(), 6);
    assert_eq!(coaches[0].name, "Zac Taylor");
    assert_eq!(coaches[0].role, "HC");
}

#[test]
fn missing_player_index_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = SiteSource::Local(dir.path().to_path_buf());
    let err = load_player_index(&source).expect_err("no index");
    assert!(err.to_string().contains("no player index"));
}

#[test]
fn player_index_falls_back_to_players_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("data/site_data/players");
    fs::create_dir_all(&nested).expect("mkdir");
    fs::write(
        nested.join("index.json"),
        r#"[{"player_id": "7", "name": "Fallback Guy", "slug": "fallback-guy", "position": "TE", "active": true}]"#,
    )
    .expect("write");

    let players = load_player_index(&SiteSource::Local(dir.path().to_path_buf())).expect("index");
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].slug, "fallback-guy");
}

#[test]
fn reads_outside_the_root_are_refused() {
    let source = fixture_site();
    assert!(source.read_optional("../Cargo.toml").is_err());
    assert!(
        source
            .read_optional("data/site_data/missing.json")
            .expect("read")
            .is_none()
    );
    assert!(source.read("data/site_data/missing.json").is_err());
}

#[test]
fn records_without_slug_are_dropped_without_hiding_others() {
    let raw = r#"[
        {"player_id": "1", "name": "No Slug One", "active": true},
        {"player_id": "2", "name": "No Slug Two", "slug": " ", "active": true},
        {"player_id": "3", "name": "Has Slug", "slug": "has-slug", "active": true},
        {"player_id": "4", "name": "Has Slug Again", "slug": "has-slug", "active": true}
    ]"#;
    let players = parse_player_index_json(raw).expect("parse");
    let ids: Vec<&str> = players.iter().map(|p| p.player_id.as_str()).collect();
    assert_eq!(ids, vec!["3"]);
}
