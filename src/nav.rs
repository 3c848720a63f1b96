use std::cmp::Ordering;

use crate::search::compare_names;
use crate::site_data::active_teams;
use crate::state::{CoachEntry, TeamEntry};

pub const PLAYER_POSITIONS: [&str; 4] = ["QB", "RB", "WR", "TE"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuState {
    Closed,
    Open,
    OpenWithSubmenu(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub key: String,
    pub label: String,
    pub target: Option<String>,
    pub icon: Option<String>,
    pub children: Vec<NavItem>,
}

impl NavItem {
    pub fn link(label: impl Into<String>, target: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            key: label.clone(),
            label,
            target: Some(target.into()),
            icon: None,
            children: Vec::new(),
        }
    }

    pub fn submenu(key: impl Into<String>, label: impl Into<String>, children: Vec<NavItem>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            target: None,
            icon: None,
            children,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn has_submenu(&self) -> bool {
        !self.children.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuConfig {
    pub label: String,
    /// Defaults to `/<label lower-cased>`.
    pub target: Option<String>,
    pub icon: Option<String>,
    pub items: Vec<NavItem>,
}

impl MenuConfig {
    pub fn new(label: impl Into<String>, items: Vec<NavItem>) -> Self {
        Self {
            label: label.into(),
            target: None,
            icon: None,
            items,
        }
    }
}

/// One dropdown: a root link plus items, at most one of which shows its submenu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavMenu {
    pub label: String,
    pub target: String,
    pub icon: Option<String>,
    pub items: Vec<NavItem>,
    state: MenuState,
}

impl NavMenu {
    pub fn from_config(config: MenuConfig) -> Self {
        let target = config
            .target
            .unwrap_or_else(|| format!("/{}", config.label.to_lowercase()));
        Self {
            label: config.label,
            target,
            icon: config.icon,
            items: config.items,
            state: MenuState::Closed,
        }
    }

    pub fn state(&self) -> &MenuState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != MenuState::Closed
    }

    pub fn open_submenu(&self) -> Option<&str> {
        match &self.state {
            MenuState::OpenWithSubmenu(key) => Some(key.as_str()),
            _ => None,
        }
    }

    pub fn pointer_enter_root(&mut self) {
        if self.state == MenuState::Closed {
            self.state = MenuState::Open;
        }
    }

    /// Leaving the root also leaves every descendant.
    pub fn pointer_leave_root(&mut self) {
        self.state = MenuState::Closed;
    }

    pub fn pointer_enter_item(&mut self, key: &str) {
        if self.state == MenuState::Closed {
            return;
        }
        let Some(item) = self.item(key) else {
            return;
        };
        self.state = if item.has_submenu() {
            MenuState::OpenWithSubmenu(key.to_string())
        } else {
            MenuState::Open
        };
    }

    pub fn pointer_leave_item(&mut self, key: &str) {
        if self.open_submenu() == Some(key) {
            self.state = MenuState::Open;
        }
    }

    pub fn item(&self, key: &str) -> Option<&NavItem> {
        self.items.iter().find(|item| item.key == key)
    }

    pub fn submenu_items(&self) -> &[NavItem] {
        self.open_submenu()
            .and_then(|key| self.item(key))
            .map(|item| item.children.as_slice())
            .unwrap_or(&[])
    }
}

pub fn players_menu() -> NavMenu {
    let mut items: Vec<NavItem> = PLAYER_POSITIONS
        .iter()
        .map(|pos| NavItem::link(*pos, format!("/players/{}", pos.to_lowercase())))
        .collect();
    let historical = PLAYER_POSITIONS
        .iter()
        .map(|pos| NavItem::link(*pos, format!("/players/historical/{}", pos.to_lowercase())))
        .collect();
    items.push(NavItem::submenu("historical", "Historical", historical));
    NavMenu::from_config(MenuConfig::new("Players", items))
}

pub fn teams_menu(teams: &[TeamEntry]) -> NavMenu {
    let items = active_teams(teams)
        .into_iter()
        .map(|t| {
            NavItem::link(t.team_abbr.clone(), format!("/teams/{}", t.slug))
                .with_icon(team_logo_path(&t.team_abbr))
        })
        .collect();
    NavMenu::from_config(MenuConfig::new("Teams", items))
}

pub fn coaches_menu(teams: &[TeamEntry], coaches: &[CoachEntry]) -> NavMenu {
    let mut items: Vec<NavItem> = active_teams(teams)
        .into_iter()
        .map(|team| {
            let mut staff: Vec<&CoachEntry> = coaches
                .iter()
                .filter(|c| c.active && c.team == team.team_abbr)
                .collect();
            staff.sort_by(|a, b| compare_coaches(a, b));
            let children = staff
                .into_iter()
                .map(|c| NavItem::link(format!("{} ({})", c.name, c.role), format!("/coaches/{}", c.slug)))
                .collect();
            NavItem::submenu(team.team_abbr.clone(), team.team_abbr.clone(), children)
                .with_icon(team_logo_path(&team.team_abbr))
        })
        .collect();
    items.push(NavItem::link("Historical Coaches", "/coaches/historical"));
    NavMenu::from_config(MenuConfig::new("Coaches", items))
}

pub fn research_menu() -> NavMenu {
    NavMenu::from_config(MenuConfig::new(
        "Research",
        vec![NavItem::link("Latest Posts", "/research")],
    ))
}

pub fn tools_menu() -> NavMenu {
    NavMenu::from_config(MenuConfig::new(
        "Tools",
        vec![NavItem::link("XFP Model", "/tools/xfp")],
    ))
}

pub fn team_logo_path(team_abbr: &str) -> String {
    format!("/data/team_logos/{team_abbr}.png")
}

/// Head coach first, then assistant head coach, then everyone else; by name within a role.
pub fn compare_coaches(a: &CoachEntry, b: &CoachEntry) -> Ordering {
    fn rank(role: &str) -> u8 {
        match role {
            "HC" => 0,
            "AC" => 1,
            _ => 2,
        }
    }
    rank(&a.role)
        .cmp(&rank(&b.role))
        .then_with(|| compare_names(&a.name, &b.name))
}

/// The row of dropdowns plus a keyboard cursor standing in for the pointer.
#[derive(Debug, Clone)]
pub struct NavBar {
    pub menus: Vec<NavMenu>,
    focused: Option<usize>,
    item: Option<usize>,
    sub_item: Option<usize>,
}

impl NavBar {
    pub fn new(teams: &[TeamEntry], coaches: &[CoachEntry]) -> Self {
        Self {
            menus: vec![
                players_menu(),
                teams_menu(teams),
                coaches_menu(teams, coaches),
                research_menu(),
                tools_menu(),
            ],
            focused: None,
            item: None,
            sub_item: None,
        }
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    pub fn item_cursor(&self) -> Option<usize> {
        self.item
    }

    pub fn sub_item_cursor(&self) -> Option<usize> {
        self.sub_item
    }

    pub fn focused_menu(&self) -> Option<&NavMenu> {
        self.focused.and_then(|idx| self.menus.get(idx))
    }

    pub fn focus_root(&mut self, idx: usize) {
        if idx >= self.menus.len() {
            return;
        }
        if let Some(prev) = self.focused
            && let Some(menu) = self.menus.get_mut(prev)
        {
            menu.pointer_leave_root();
        }
        self.focused = Some(idx);
        self.item = None;
        self.sub_item = None;
        self.menus[idx].pointer_enter_root();
    }

    pub fn focus_next_root(&mut self) {
        let total = self.menus.len();
        if total == 0 {
            return;
        }
        let next = self.focused.map(|idx| (idx + 1) % total).unwrap_or(0);
        self.focus_root(next);
    }

    pub fn focus_prev_root(&mut self) {
        let total = self.menus.len();
        if total == 0 {
            return;
        }
        let prev = match self.focused {
            Some(0) | None => total - 1,
            Some(idx) => idx - 1,
        };
        self.focus_root(prev);
    }

    pub fn blur(&mut self) {
        if let Some(idx) = self.focused.take()
            && let Some(menu) = self.menus.get_mut(idx)
        {
            menu.pointer_leave_root();
        }
        self.item = None;
        self.sub_item = None;
    }

    pub fn move_down(&mut self) {
        if self.sub_item.is_some() {
            let total = self.current_submenu_len();
            self.sub_item = self.sub_item.map(|i| step_forward(i, total));
            return;
        }
        let total = self.focused_menu().map(|m| m.items.len()).unwrap_or(0);
        if total == 0 {
            return;
        }
        let next = self.item.map(|i| step_forward(i, total)).unwrap_or(0);
        self.hover_item(next);
    }

    pub fn move_up(&mut self) {
        if self.sub_item.is_some() {
            let total = self.current_submenu_len();
            self.sub_item = self.sub_item.map(|i| step_back(i, total));
            return;
        }
        let total = self.focused_menu().map(|m| m.items.len()).unwrap_or(0);
        if total == 0 {
            return;
        }
        let next = self.item.map(|i| step_back(i, total)).unwrap_or(total - 1);
        self.hover_item(next);
    }

    /// Moves into the open submenu, or on to the next dropdown when there is none.
    pub fn move_right(&mut self) {
        if self.sub_item.is_none() && self.current_submenu_len() > 0 {
            self.sub_item = Some(0);
            return;
        }
        self.focus_next_root();
    }

    pub fn move_left(&mut self) {
        if self.sub_item.is_some() {
            self.sub_item = None;
            return;
        }
        self.focus_prev_root();
    }

    /// Target path under the cursor: the submenu entry, the item, or the root link.
    pub fn activate(&self) -> Option<String> {
        let menu = self.focused_menu()?;
        let Some(item_idx) = self.item else {
            return Some(menu.target.clone());
        };
        let item = menu.items.get(item_idx)?;
        if let Some(sub_idx) = self.sub_item {
            return menu.submenu_items().get(sub_idx)?.target.clone();
        }
        item.target.clone()
    }

    fn hover_item(&mut self, idx: usize) {
        let Some(menu_idx) = self.focused else {
            return;
        };
        let menu = &mut self.menus[menu_idx];
        if let Some(prev) = self.item.and_then(|i| menu.items.get(i)).map(|item| item.key.clone()) {
            menu.pointer_leave_item(&prev);
        }
        if let Some(key) = menu.items.get(idx).map(|item| item.key.clone()) {
            menu.pointer_enter_item(&key);
        }
        self.item = Some(idx);
        self.sub_item = None;
    }

    fn current_submenu_len(&self) -> usize {
        self.focused_menu()
            .map(|m| m.submenu_items().len())
            .unwrap_or(0)
    }
}

fn step_forward(idx: usize, total: usize) -> usize {
    if total == 0 { 0 } else { (idx + 1) % total }
}

fn step_back(idx: usize, total: usize) -> usize {
    if total == 0 {
        0
    } else if idx == 0 {
        total - 1
    } else {
        idx - 1
    }
}
