use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

use nocap_terminal::config;
use nocap_terminal::player_page;
use nocap_terminal::search;
use nocap_terminal::site_data;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let query = positional_query(&args).ok_or_else(|| {
        anyhow!("usage: player_search <query> [--index PATH] [--limit N]")
    })?;

    let players = match parse_flag(&args, "index") {
        Some(path) => {
            let path = PathBuf::from(path);
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed reading {}", path.display()))?;
            site_data::parse_player_index_json(&raw)?
        }
        None => site_data::load_player_index(&config::site_source_from_env())?,
    };
    let limit = parse_flag(&args, "limit")
        .and_then(|val| val.parse::<usize>().ok())
        .unwrap_or_else(config::search_limit);

    let mut matches = search::search_players(&query, &players);
    if limit > 0 {
        matches.truncate(limit);
    }
    if matches.is_empty() {
        println!("No active players match {query:?}");
        return Ok(());
    }
    for p in matches {
        println!(
            "{} ({}, {}) /players/{}",
            p.name,
            player_page::position_label(Some(p.position.as_str()).filter(|s| !s.is_empty())),
            player_page::team_label(p.team.as_deref()),
            p.slug
        );
    }
    Ok(())
}

fn parse_flag(args: &[String], name: &str) -> Option<String> {
    let long = format!("--{name}");
    let prefixed = format!("--{name}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefixed) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if *arg == long {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(next.clone());
            }
        }
    }
    None
}

/// Every argument that is neither a flag nor a flag's value, joined by spaces.
fn positional_query(args: &[String]) -> Option<String> {
    let mut words = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg.starts_with("--") {
            skip_next = !arg.contains('=');
            continue;
        }
        words.push(arg.as_str());
    }
    let query = words.join(" ");
    if query.trim().is_empty() {
        None
    } else {
        Some(query)
    }
}
