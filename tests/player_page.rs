use std::path::PathBuf;

use nocap_terminal::markdown::{BlockKind, parse_blocks};
use nocap_terminal::player_page::{
    BIO_PANEL_WIDTH, BioPanel, PageLookup, PlayerDetail, PlayerPage, draft_label, height_label,
    jersey_label, load_player_page, lookup, parse_player_detail_json, preview_text, weight_label,
};
use nocap_terminal::site_data::{SiteSource, load_player_index};
use nocap_terminal::state::PlayerRecord;

fn fixture_site() -> SiteSource {
    SiteSource::Local(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/site"))
}

fn record(slug: &str) -> PlayerRecord {
    let players = load_player_index(&fixture_site()).expect("player index");
    match lookup(&players, slug) {
        PageLookup::Found(record) => record.clone(),
        PageLookup::NotFound => panic!("{slug} missing from fixture index"),
    }
}

#[test]
fn full_page_loads_detail_and_bio() {
    let (page, warnings) = load_player_page(&fixture_site(), &record("joe-mixon"));
    assert!(warnings.is_empty(), "{warnings:?}");
    assert!(!page.detail_missing);
    assert_eq!(page.display_name(), "Joe Mixon");
    assert_eq!(
        page.header_lines(),
        vec![
            "Joe Mixon".to_string(),
            "HOU — RB #28".to_string(),
            "Age: 29 • Season 2025 • ACT".to_string(),
            "Height: 6'1\" • Weight: 220 lbs".to_string(),
            "College: Oklahoma".to_string(),
            "Draft: CIN, Round 2 Pick 16 (#48)".to_string(),
            "Exp: 8 yrs • Best finish: RB3 • Avg finish: RB11 • Archetype: Workhorse".to_string(),
        ]
    );
    let colors = page.detail.team_colors.as_ref().expect("colors");
    assert_eq!(colors.primary.as_deref(), Some("#03202F"));
    assert_eq!(colors.primary_rgb(), Some((0x03, 0x20, 0x2F)));

    assert!(page.has_bio());
    assert!(page.bio_preview().starts_with("# Joe Mixon Joe Mixon is a **three-down** back"));
    let blocks = parse_blocks(&page.bio);
    assert_eq!(blocks[0].kind, BlockKind::Heading(1));
}

#[test]
fn missing_detail_falls_back_to_index_fields() {
    let (page, warnings) = load_player_page(&fixture_site(), &record("jalen-hurts"));
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("jalen-hurts"));
    assert!(page.detail_missing);
    assert!(!page.has_bio());
    let header = page.header_lines();
    assert_eq!(header[0], "Jalen Hurts");
    assert_eq!(header[1], "PHI — QB");
    assert_eq!(header[3], "Height: — • Weight: —");
    assert_eq!(header.len(), 5);
}

#[test]
fn unknown_slug_is_not_found() {
    let players = load_player_index(&fixture_site()).expect("player index");
    assert!(matches!(lookup(&players, "nobody-here"), PageLookup::NotFound));
    assert!(matches!(lookup(&players, ""), PageLookup::NotFound));
    assert!(matches!(lookup(&players, "tom-brady"), PageLookup::Found(_)));
}

#[test]
fn null_detail_document_is_empty() {
    assert_eq!(
        parse_player_detail_json("null").expect("parse"),
        PlayerDetail::default()
    );
    let detail =
        parse_player_detail_json(r#"{"height": "NA", "weight": "215.4", "draft_pick": -3}"#)
            .expect("parse");
    assert_eq!(detail.height, None);
    assert_eq!(detail.weight, Some(215));
    assert_eq!(detail.draft_pick, None);
}

#[test]
fn bio_panel_toggles_and_shifts_content() {
    let mut page = PlayerPage::new(record("joe-mixon"), None, "Some bio".to_string());
    assert_eq!(page.bio_panel, BioPanel::Collapsed);
    assert_eq!(page.bio_panel.content_offset(), 0);
    page.bio_panel.toggle();
    assert!(page.bio_panel.is_open());
    assert_eq!(page.bio_panel.content_offset(), BIO_PANEL_WIDTH);
    page.bio_panel.close();
    assert!(!page.bio_panel.is_open());
}

#[test]
fn formatting_helpers() {
    assert_eq!(jersey_label(Some("12")), " #12");
    assert_eq!(jersey_label(Some("NA")), "");
    assert_eq!(jersey_label(None), "");
    assert_eq!(height_label(Some(77)), "6'5\"");
    assert_eq!(height_label(Some(0)), "—");
    assert_eq!(weight_label(Some(245)), "245 lbs");
    assert_eq!(weight_label(None), "—");
    assert_eq!(draft_label(None, None), None);
    assert_eq!(draft_label(Some("KC"), None).as_deref(), Some("Draft: KC"));
    assert_eq!(
        draft_label(None, Some(1)).as_deref(),
        Some("Draft: —, Round 1 Pick 1 (#1)")
    );
}

#[test]
fn long_bios_are_cut_with_ellipsis() {
    let text = "word ".repeat(200);
    let preview = preview_text(&text, 20);
    assert!(preview.ends_with('…'));
    assert_eq!(preview.chars().count(), 20);
}
