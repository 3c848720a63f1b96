use std::sync::mpsc::{Receiver, SendError, Sender};
use std::thread;

use anyhow::Result;

use crate::player_page;
use crate::site_data::{self, SiteSource};
use crate::state::{Delta, ProviderCommand};

/// Runs load requests off the UI thread until either channel closes.
pub fn spawn_provider(
    source: SiteSource,
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for cmd in cmd_rx {
            if handle_command(&source, cmd, &tx).is_err() {
                // UI side hung up.
                break;
            }
        }
    })
}

type SendResult = Result<(), SendError<Delta>>;

pub fn handle_command(
    source: &SiteSource,
    cmd: ProviderCommand,
    tx: &Sender<Delta>,
) -> SendResult {
    match cmd {
        ProviderCommand::LoadIndexes => load_indexes(source, tx),
        ProviderCommand::LoadPlayerPage { record } => {
            let (page, warnings) = player_page::load_player_page(source, &record);
            for warning in warnings {
                log::warn!("{warning}");
                tx.send(Delta::Log(format!("[WARN] {warning}")))?;
            }
            tx.send(Delta::SetPlayerPage(page))
        }
    }
}

fn load_indexes(source: &SiteSource, tx: &Sender<Delta>) -> SendResult {
    tx.send(Delta::Log(format!(
        "[INFO] Loading indexes from {}",
        source.describe()
    )))?;

    let players = or_empty(site_data::load_player_index(source), "player", tx)?;
    let teams = or_empty(site_data::load_team_index(source), "team", tx)?;
    let coaches = or_empty(site_data::load_coach_index(source), "coach", tx)?;

    tx.send(Delta::Log(format!(
        "[INFO] Loaded {} players, {} teams, {} coaches",
        players.len(),
        teams.len(),
        coaches.len()
    )))?;
    tx.send(Delta::SetPlayers(players))?;
    tx.send(Delta::SetTeams(teams))?;
    tx.send(Delta::SetCoaches(coaches))?;
    tx.send(Delta::IndexesLoaded)
}

/// A failed load is logged and replaced by an empty dataset.
fn or_empty<T>(
    result: Result<Vec<T>>,
    what: &str,
    tx: &Sender<Delta>,
) -> Result<Vec<T>, SendError<Delta>> {
    match result {
        Ok(rows) => Ok(rows),
        Err(err) => {
            log::error!("{what} index load failed: {err:#}");
            tx.send(Delta::Log(format!("[WARN] {what} index unavailable: {err:#}")))?;
            Ok(Vec::new())
        }
    }
}
