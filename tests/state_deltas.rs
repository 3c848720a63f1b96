use std::path::PathBuf;
use std::sync::mpsc;

use nocap_terminal::feed;
use nocap_terminal::player_page::PlayerPage;
use nocap_terminal::site_data::{SiteSource, load_player_index};
use nocap_terminal::state::{AppState, Delta, ProviderCommand, Screen, apply_delta};

fn fixture_site() -> SiteSource {
    SiteSource::Local(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/site"))
}

fn loaded_state(search_limit: usize) -> AppState {
    let mut state = AppState::new(search_limit);
    let players = load_player_index(&fixture_site()).expect("player index");
    apply_delta(&mut state, Delta::SetPlayers(players));
    state
}

#[test]
fn listing_route_selects_position() {
    let mut state = loaded_state(8);
    assert!(state.navigate("/players/qb").is_none());
    assert_eq!(
        state.screen,
        Screen::Listing {
            title: "QB".to_string(),
            position: "qb".to_string(),
            historical: false,
        }
    );
    let slugs: Vec<&str> = state
        .listing_players()
        .iter()
        .map(|p| p.slug.as_str())
        .collect();
    assert_eq!(slugs, vec!["jalen-hurts", "josh-allen"]);

    state.select_listing_prev();
    assert_eq!(state.selected_listing_slug().as_deref(), Some("josh-allen"));
    state.select_listing_next();
    assert_eq!(state.selected_listing_slug().as_deref(), Some("jalen-hurts"));

    state.navigate("/players/historical/qb");
    assert_eq!(state.selected_listing_slug().as_deref(), Some("tom-brady"));
}

#[test]
fn unknown_player_slug_is_not_found() {
    let mut state = loaded_state(8);
    assert!(state.navigate("/players/nobody-here").is_none());
    assert_eq!(
        state.screen,
        Screen::NotFound {
            slug: "nobody-here".to_string()
        }
    );
}

#[test]
fn player_route_requests_page_load() {
    let mut state = loaded_state(8);
    let cmd = state.navigate("/players/joe-mixon");
    let Some(ProviderCommand::LoadPlayerPage { record }) = cmd else {
        panic!("expected a page load");
    };
    assert_eq!(record.player_id, "00-0036442");
    assert!(state.page_loading);
    assert_eq!(
        state.screen,
        Screen::Player {
            slug: "joe-mixon".to_string()
        }
    );
}

#[test]
fn other_routes_render_placeholders() {
    let mut state = loaded_state(8);
    state.navigate("/tools/xfp");
    assert_eq!(
        state.screen,
        Screen::Placeholder {
            title: "Tools: XFP".to_string()
        }
    );
    state.navigate("/");
    assert_eq!(state.screen, Screen::Home);
}

#[test]
fn stale_player_page_is_dropped() {
    let mut state = loaded_state(8);
    let Some(ProviderCommand::LoadPlayerPage { record }) = state.navigate("/players/joe-mixon")
    else {
        panic!("expected a page load");
    };
    state.navigate("/players/josh-allen");

    apply_delta(
        &mut state,
        Delta::SetPlayerPage(PlayerPage::new(record, None, String::new())),
    );
    assert!(state.page.is_none());
    assert!(state.page_loading);
}

#[test]
fn current_player_page_is_applied() {
    let mut state = loaded_state(8);
    let Some(ProviderCommand::LoadPlayerPage { record }) = state.navigate("/players/joe-mixon")
    else {
        panic!("expected a page load");
    };
    apply_delta(
        &mut state,
        Delta::SetPlayerPage(PlayerPage::new(record, None, "A bio.".to_string())),
    );
    assert!(!state.page_loading);

    state.toggle_bio();
    assert!(state.page.as_ref().expect("page").bio_panel.is_open());
}

#[test]
fn bio_toggle_needs_a_bio() {
    let mut state = loaded_state(8);
    let Some(ProviderCommand::LoadPlayerPage { record }) = state.navigate("/players/joe-mixon")
    else {
        panic!("expected a page load");
    };
    apply_delta(
        &mut state,
        Delta::SetPlayerPage(PlayerPage::new(record, None, "  ".to_string())),
    );
    state.toggle_bio();
    assert!(!state.page.as_ref().expect("page").bio_panel.is_open());
}

#[test]
fn search_results_respect_limit() {
    let mut capped = loaded_state(2);
    capped.set_query("j");
    assert_eq!(capped.search_results().len(), 2);

    let mut unbounded = loaded_state(0);
    unbounded.set_query("j");
    assert_eq!(unbounded.search_results().len(), 5);
}

#[test]
fn search_selection_wraps_and_resets() {
    let mut state = loaded_state(8);
    for c in "jo".chars() {
        state.push_query_char(c);
    }
    let slugs: Vec<String> = state.search_results().iter().map(|p| p.slug.clone()).collect();
    assert_eq!(slugs, vec!["joe-mixon", "josh-allen"]);

    state.select_prev_result();
    assert_eq!(state.selected_result_slug().as_deref(), Some("josh-allen"));
    state.select_next_result();
    assert_eq!(state.selected_result_slug().as_deref(), Some("joe-mixon"));

    state.select_next_result();
    state.pop_query_char();
    assert_eq!(state.search.query, "j");
    assert_eq!(state.search.selected, 0);
}

#[test]
fn team_and_coach_deltas_rebuild_nav() {
    let mut state = AppState::default();
    assert!(state.nav.menus[1].items.is_empty());

    let (tx, rx) = mpsc::channel();
    feed::handle_command(&fixture_site(), ProviderCommand::LoadIndexes, &tx).expect("send");
    drop(tx);
    for delta in rx {
        apply_delta(&mut state, delta);
    }
    assert_eq!(state.players.len(), 9);
    assert_eq!(state.nav.menus[1].items.len(), 3);
    assert!(state.nav.menus[2].item("CIN").expect("CIN").has_submenu());
    assert!(!state.indexes_loading);
    assert!(state.logs.iter().any(|l| l.contains("Loaded 9 players, 5 teams, 6 coaches")));
}

#[test]
fn provider_reports_missing_indexes_and_finishes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (tx, rx) = mpsc::channel();
    feed::handle_command(
        &SiteSource::Local(dir.path().to_path_buf()),
        ProviderCommand::LoadIndexes,
        &tx,
    )
    .expect("send");
    drop(tx);

    let deltas: Vec<Delta> = rx.into_iter().collect();
    let warnings = deltas
        .iter()
        .filter(|d| matches!(d, Delta::Log(msg) if msg.starts_with("[WARN]")))
        .count();
    assert_eq!(warnings, 3);
    assert!(matches!(deltas.last(), Some(Delta::IndexesLoaded)));
}

#[test]
fn provider_loads_player_page() {
    let mut state = loaded_state(8);
    let cmd = state.navigate("/players/joe-mixon").expect("command");

    let (tx, rx) = mpsc::channel();
    feed::handle_command(&fixture_site(), cmd, &tx).expect("send");
    drop(tx);
    for delta in rx {
        apply_delta(&mut state, delta);
    }
    let page = state.page.as_ref().expect("page");
    assert_eq!(page.display_name(), "Joe Mixon");
    assert!(page.has_bio());
}

#[test]
fn log_buffer_is_bounded() {
    let mut state = AppState::default();
    for idx in 0..250 {
        apply_delta(&mut state, Delta::Log(format!("line {idx}")));
    }
    assert_eq!(state.logs.len(), 200);
    assert!(state.logs.back().expect("log").ends_with("line 249"));
}
