use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use nocap_terminal::markdown::parse_blocks;
use nocap_terminal::player_page::parse_player_detail_json;
use nocap_terminal::search::search_players;
use nocap_terminal::site_data::parse_player_index_json;
use nocap_terminal::state::{AppState, Delta, PlayerRecord, apply_delta};

const FIRST: [&str; 8] = [
    "Joe", "Ja'Marr", "Amon-Ra", "Josh", "Jalen", "D'Angelo", "Brian", "Tyreek",
];
const LAST: [&str; 8] = [
    "Mixon", "Chase", "St. Brown", "Allen", "Hurts", "Russell", "Robinson Jr.", "Hill",
];
const POSITIONS: [&str; 4] = ["QB", "RB", "WR", "TE"];

fn synthetic_index(count: usize) -> Vec<PlayerRecord> {
    (0..count)
        .map(|idx| {
            let name = format!(
                "{} {}{}",
                FIRST[idx % FIRST.len()],
                LAST[(idx / FIRST.len()) % LAST.len()],
                idx
            );
            PlayerRecord {
                player_id: format!("00-{idx:07}"),
                slug: format!("player-{idx}"),
                name,
                position: POSITIONS[idx % POSITIONS.len()].to_string(),
                team: Some("CIN".to_string()),
                active: idx % 5 != 0,
                first_season: Some(2010),
                last_season: Some(2025),
                team_logo: None,
            }
        })
        .collect()
}

fn bench_search(c: &mut Criterion) {
    let players = synthetic_index(5000);
    c.bench_function("search_players_prefix", |b| {
        b.iter(|| {
            let hits = search_players(black_box("ja"), &players);
            black_box(hits.len());
        })
    });
    c.bench_function("search_players_initials", |b| {
        b.iter(|| {
            let hits = search_players(black_box("jm"), &players);
            black_box(hits.len());
        })
    });
}

fn bench_capped_results(c: &mut Criterion) {
    let mut state = AppState::default();
    apply_delta(&mut state, Delta::SetPlayers(synthetic_index(5000)));
    state.set_query("jo");
    c.bench_function("app_search_results_capped", |b| {
        b.iter(|| {
            black_box(state.search_results().len());
        })
    });
}

fn bench_player_index_parse(c: &mut Criterion) {
    let raw = serde_json::to_string(&synthetic_index(5000)).expect("serialize index");
    c.bench_function("player_index_parse", |b| {
        b.iter(|| {
            let rows = parse_player_index_json(black_box(&raw)).expect("parse index");
            black_box(rows.len());
        })
    });
}

fn bench_player_page_parse(c: &mut Criterion) {
    c.bench_function("player_detail_parse", |b| {
        b.iter(|| {
            let detail = parse_player_detail_json(black_box(PLAYER_JSON)).expect("parse detail");
            black_box(detail.height);
        })
    });
    c.bench_function("bio_markdown_parse", |b| {
        b.iter(|| {
            black_box(parse_blocks(black_box(BIO_MD)).len());
        })
    });
}

criterion_group!(
    perf,
    bench_search,
    bench_capped_results,
    bench_player_index_parse,
    bench_player_page_parse
);
criterion_main!(perf);

static PLAYER_JSON: &str = include_str!(
    "../tests/fixtures/site/data/site_data/players/player_id=00-0036442/player.json"
);
static BIO_MD: &str = include_str!("../tests/fixtures/site/content/players/00-0033897.md");
