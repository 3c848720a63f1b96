use std::collections::VecDeque;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::nav::NavBar;
use crate::player_page::{self, PageLookup, PlayerPage};
use crate::route::{self, Route};
use crate::search;
use crate::site_data::{lenient_bool, lenient_opt_i32, lenient_opt_string, lenient_string};

pub const DEFAULT_SEARCH_LIMIT: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Home,
    Listing {
        title: String,
        position: String,
        historical: bool,
    },
    Player {
        slug: String,
    },
    NotFound {
        slug: String,
    },
    Placeholder {
        title: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Content,
    Search,
    Nav,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub player_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: String,
    #[serde(default, alias = "pos", deserialize_with = "lenient_string")]
    pub position: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub team: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub active: bool,
    #[serde(default, deserialize_with = "lenient_opt_i32")]
    pub first_season: Option<i32>,
    #[serde(default, deserialize_with = "lenient_opt_i32")]
    pub last_season: Option<i32>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub team_logo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub team_abbr: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub coach_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub team: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub role: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
    pub selected: usize,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub focus: Focus,
    pub players: Vec<PlayerRecord>,
    pub teams: Vec<TeamEntry>,
    pub coaches: Vec<CoachEntry>,
    pub indexes_loading: bool,
    pub search: SearchState,
    // 0 renders every match with scrolling.
    pub search_limit: usize,
    pub nav: NavBar,
    pub page: Option<PlayerPage>,
    pub page_loading: bool,
    pub listing_selected: usize,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_LIMIT)
    }
}

impl AppState {
    pub fn new(search_limit: usize) -> Self {
        Self {
            screen: Screen::Home,
            focus: Focus::Content,
            players: Vec::new(),
            teams: Vec::new(),
            coaches: Vec::new(),
            indexes_loading: false,
            search: SearchState::default(),
            search_limit,
            nav: NavBar::new(&[], &[]),
            page: None,
            page_loading: false,
            listing_selected: 0,
            logs: VecDeque::new(),
            help_overlay: false,
        }
    }

    /// Matches for the current query, capped by `search_limit`.
    pub fn search_results(&self) -> Vec<&PlayerRecord> {
        let mut results = search::search_players(&self.search.query, &self.players);
        if self.search_limit > 0 {
            results.truncate(self.search_limit);
        }
        results
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.search.query = query.into();
        self.search.selected = 0;
    }

    pub fn push_query_char(&mut self, c: char) {
        let mut query = std::mem::take(&mut self.search.query);
        query.push(c);
        self.set_query(query);
    }

    pub fn pop_query_char(&mut self) {
        let mut query = std::mem::take(&mut self.search.query);
        query.pop();
        self.set_query(query);
    }

    pub fn select_next_result(&mut self) {
        let total = self.search_results().len();
        if total == 0 {
            self.search.selected = 0;
            return;
        }
        self.search.selected = (self.search.selected + 1) % total;
    }

    pub fn select_prev_result(&mut self) {
        let total = self.search_results().len();
        if total == 0 {
            self.search.selected = 0;
            return;
        }
        if self.search.selected == 0 {
            self.search.selected = total - 1;
        } else {
            self.search.selected -= 1;
        }
    }

    pub fn selected_result_slug(&self) -> Option<String> {
        self.search_results()
            .get(self.search.selected)
            .map(|p| p.slug.clone())
    }

    /// Players shown on the current listing screen.
    pub fn listing_players(&self) -> Vec<&PlayerRecord> {
        match &self.screen {
            Screen::Listing {
                position,
                historical,
                ..
            } => search::players_at_position(&self.players, position, !historical),
            _ => Vec::new(),
        }
    }

    pub fn select_listing_next(&mut self) {
        let total = self.listing_players().len();
        if total == 0 {
            self.listing_selected = 0;
            return;
        }
        self.listing_selected = (self.listing_selected + 1) % total;
    }

    pub fn select_listing_prev(&mut self) {
        let total = self.listing_players().len();
        if total == 0 {
            self.listing_selected = 0;
            return;
        }
        if self.listing_selected == 0 {
            self.listing_selected = total - 1;
        } else {
            self.listing_selected -= 1;
        }
    }

    pub fn selected_listing_slug(&self) -> Option<String> {
        self.listing_players()
            .get(self.listing_selected)
            .map(|p| p.slug.clone())
    }

    /// Switches to the screen behind `target` and returns the load request it needs, if any.
    pub fn navigate(&mut self, target: &str) -> Option<ProviderCommand> {
        self.listing_selected = 0;
        self.page = None;
        self.page_loading = false;
        let resolved = route::resolve(target);
        match resolved {
            Route::Home => {
                self.screen = Screen::Home;
                None
            }
            Route::PositionListing {
                ref position,
                historical,
            } => {
                self.screen = Screen::Listing {
                    title: route::title(&resolved),
                    position: position.clone(),
                    historical,
                };
                None
            }
            Route::Player { slug } => self.open_player(&slug),
            other => {
                self.screen = Screen::Placeholder {
                    title: route::title(&other),
                };
                None
            }
        }
    }

    pub fn open_player(&mut self, slug: &str) -> Option<ProviderCommand> {
        match player_page::lookup(&self.players, slug) {
            PageLookup::Found(record) => {
                let record = record.clone();
                self.screen = Screen::Player {
                    slug: slug.to_string(),
                };
                self.page = None;
                self.page_loading = true;
                Some(ProviderCommand::LoadPlayerPage { record })
            }
            PageLookup::NotFound => {
                self.screen = Screen::NotFound {
                    slug: slug.to_string(),
                };
                self.page = None;
                self.page_loading = false;
                None
            }
        }
    }

    pub fn toggle_bio(&mut self) {
        if let Some(page) = self.page.as_mut()
            && page.has_bio()
        {
            page.bio_panel.toggle();
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        let stamp = Local::now().format("%H:%M:%S");
        self.logs.push_back(format!("{stamp} {}", msg.into()));
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    fn rebuild_nav(&mut self) {
        let focused = self.nav.focused();
        self.nav = NavBar::new(&self.teams, &self.coaches);
        if self.focus == Focus::Nav
            && let Some(idx) = focused
        {
            self.nav.focus_root(idx);
        }
    }
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetPlayers(Vec<PlayerRecord>),
    SetTeams(Vec<TeamEntry>),
    SetCoaches(Vec<CoachEntry>),
    IndexesLoaded,
    SetPlayerPage(PlayerPage),
    Log(String),
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    LoadIndexes,
    LoadPlayerPage { record: PlayerRecord },
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetPlayers(players) => {
            state.players = players;
            state.search.selected = 0;
            state.listing_selected = 0;
        }
        Delta::SetTeams(teams) => {
            state.teams = teams;
            state.rebuild_nav();
        }
        Delta::SetCoaches(coaches) => {
            state.coaches = coaches;
            state.rebuild_nav();
        }
        Delta::IndexesLoaded => {
            state.indexes_loading = false;
        }
        Delta::SetPlayerPage(page) => {
            // A page for a player the user already navigated away from is dropped.
            let current = matches!(&state.screen, Screen::Player { slug } if *slug == page.record.slug);
            if current {
                state.page = Some(page);
                state.page_loading = false;
            }
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}

pub fn focus_label(focus: Focus) -> &'static str {
    match focus {
        Focus::Content => "BROWSE",
        Focus::Search => "SEARCH",
        Focus::Nav => "MENU",
    }
}
