use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use nocap_terminal::config::AppConfig;
use nocap_terminal::feed;
use nocap_terminal::markdown::{self, BlockKind};
use nocap_terminal::nav::{NavBar, NavItem};
use nocap_terminal::player_page::{self, BIO_PANEL_WIDTH, PlayerPage};
use nocap_terminal::state::{
    self, AppState, Delta, Focus, PlayerRecord, ProviderCommand, Screen, apply_delta,
};

const SEARCH_WIDTH: u16 = 34;
const NAV_LABEL_PAD: u16 = 4;

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
    page_scroll: u16,
}

impl App {
    fn new(config: &AppConfig, cmd_tx: Option<mpsc::Sender<ProviderCommand>>) -> Self {
        Self {
            state: AppState::new(config.search_limit),
            should_quit: false,
            cmd_tx,
            page_scroll: 0,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if self.state.help_overlay {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
                self.state.help_overlay = false;
            }
            return;
        }
        match self.state.focus {
            Focus::Search => self.on_search_key(key),
            Focus::Nav => self.on_nav_key(key),
            Focus::Content => self.on_content_key(key),
        }
    }

    fn on_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.state.set_query("");
                self.state.focus = Focus::Content;
            }
            KeyCode::Enter => {
                let Some(slug) = self.state.selected_result_slug() else {
                    return;
                };
                self.state.set_query("");
                self.state.focus = Focus::Content;
                self.open(&format!("/players/{slug}"));
            }
            KeyCode::Down => self.state.select_next_result(),
            KeyCode::Up => self.state.select_prev_result(),
            KeyCode::Backspace => self.state.pop_query_char(),
            KeyCode::Char(c) => self.state.push_query_char(c),
            _ => {}
        }
    }

    fn on_nav_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.state.nav.blur();
                self.state.focus = Focus::Content;
            }
            KeyCode::Left | KeyCode::Char('h') => self.state.nav.move_left(),
            KeyCode::Right | KeyCode::Char('l') => self.state.nav.move_right(),
            KeyCode::Down | KeyCode::Char('j') => self.state.nav.move_down(),
            KeyCode::Up | KeyCode::Char('k') => self.state.nav.move_up(),
            KeyCode::Enter => {
                let Some(target) = self.state.nav.activate() else {
                    return;
                };
                self.state.nav.blur();
                self.state.focus = Focus::Content;
                self.open(&target);
            }
            _ => {}
        }
    }

    fn on_content_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') => self.state.focus = Focus::Search,
            KeyCode::Char('n') | KeyCode::Tab => {
                self.state.focus = Focus::Nav;
                self.state.nav.focus_root(0);
            }
            KeyCode::Char('1') | KeyCode::Char('H') => self.open("/"),
            KeyCode::Char('?') => self.state.help_overlay = true,
            KeyCode::Char('r') => self.request_indexes(),
            KeyCode::Char('m') => self.state.toggle_bio(),
            KeyCode::Esc | KeyCode::Char('b') => {
                if let Some(page) = self.state.page.as_mut()
                    && page.bio_panel.is_open()
                {
                    page.bio_panel.close();
                } else {
                    self.open("/");
                }
            }
            KeyCode::Char('j') | KeyCode::Down => match self.state.screen {
                Screen::Listing { .. } => self.state.select_listing_next(),
                _ => self.page_scroll = self.page_scroll.saturating_add(1),
            },
            KeyCode::Char('k') | KeyCode::Up => match self.state.screen {
                Screen::Listing { .. } => self.state.select_listing_prev(),
                _ => self.page_scroll = self.page_scroll.saturating_sub(1),
            },
            KeyCode::Enter => {
                if let Some(slug) = self.state.selected_listing_slug() {
                    self.open(&format!("/players/{slug}"));
                }
            }
            _ => {}
        }
    }

    fn open(&mut self, target: &str) {
        self.page_scroll = 0;
        if let Some(cmd) = self.state.navigate(target) {
            self.send(cmd, "Player page");
        }
    }

    fn request_indexes(&mut self) {
        self.state.indexes_loading = true;
        self.send(ProviderCommand::LoadIndexes, "Index load");
    }

    fn send(&mut self, cmd: ProviderCommand, what: &str) {
        let Some(tx) = &self.cmd_tx else {
            self.state.push_log(format!("[INFO] {what} unavailable"));
            return;
        };
        if tx.send(cmd).is_err() {
            self.state.push_log(format!("[WARN] {what} request failed"));
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    let config = AppConfig::from_env();
    init_logging(&config.log_file);
    log::info!("starting with site source {}", config.source.describe());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    feed::spawn_provider(config.source.clone(), tx, cmd_rx);

    let mut app = App::new(&config, Some(cmd_tx));
    app.request_indexes();
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("terminal loop failed: {err}");
        eprintln!("error: {err}");
    }
    Ok(())
}

fn init_logging(path: &Path) {
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("log file {} unavailable: {err}", path.display());
            return;
        }
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.on_key(key);
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(2),
        ])
        .split(frame.size());

    render_header(frame, chunks[0], &app.state);
    render_nav(frame, chunks[1], &app.state.nav, app.state.focus == Focus::Nav);

    match &app.state.screen {
        Screen::Home => render_home(frame, chunks[2], &app.state),
        Screen::Listing { title, .. } => render_listing(frame, chunks[2], &app.state, title),
        Screen::Player { .. } => render_player(frame, chunks[2], app),
        Screen::NotFound { slug } => render_not_found(frame, chunks[2], slug),
        Screen::Placeholder { title } => render_placeholder(frame, chunks[2], title),
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[3]);

    let footer = Paragraph::new(footer_text(&app.state))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[4]);

    if app.state.focus == Focus::Nav {
        render_dropdown(frame, chunks[1], chunks[2], &app.state.nav);
    }
    if app.state.focus == Focus::Search {
        render_search_results(frame, chunks[0], &app.state);
    }
    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(SEARCH_WIDTH)])
        .split(area);

    let loading = if state.indexes_loading { " (loading…)" } else { "" };
    let title = Paragraph::new(format!(
        " NO CAP FANTASY | {}{loading}",
        state::focus_label(state.focus)
    ))
    .style(Style::default().add_modifier(Modifier::BOLD))
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, cols[0]);

    let searching = state.focus == Focus::Search;
    let text = if state.search.query.is_empty() && !searching {
        "Search players... (/)".to_string()
    } else if searching {
        format!("{}▏", state.search.query)
    } else {
        state.search.query.clone()
    };
    let style = if searching {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let input = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(input, cols[1]);
}

fn nav_label_offsets(nav: &NavBar) -> Vec<u16> {
    let mut x = 1u16;
    nav.menus
        .iter()
        .map(|menu| {
            let start = x;
            x = x.saturating_add(menu.label.chars().count() as u16 + NAV_LABEL_PAD);
            start
        })
        .collect()
}

fn render_nav(frame: &mut Frame, area: Rect, nav: &NavBar, focused: bool) {
    let mut spans = vec![Span::raw(" ")];
    for (idx, menu) in nav.menus.iter().enumerate() {
        let active = focused && nav.focused() == Some(idx);
        let style = if active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        spans.push(Span::styled(format!(" {} ", menu.label), style));
        spans.push(Span::raw("  "));
    }
    let bar = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(bar, area);
}

fn render_dropdown(frame: &mut Frame, nav_area: Rect, body: Rect, nav: &NavBar) {
    let Some(idx) = nav.focused() else {
        return;
    };
    let Some(menu) = nav.focused_menu() else {
        return;
    };
    if !menu.is_open() || menu.items.is_empty() {
        return;
    }
    let offsets = nav_label_offsets(nav);
    let x = nav_area.x + offsets.get(idx).copied().unwrap_or(0);

    let width = dropdown_width(&menu.items);
    let list_area = popup_rect(x, body.y, width, menu.items.len(), body);
    let lines: Vec<Line> = menu
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let marker = if item.has_submenu() { " ▸" } else { "" };
            let selected = nav.item_cursor() == Some(i) && nav.sub_item_cursor().is_none();
            item_line(item, marker, selected)
        })
        .collect();
    frame.render_widget(Clear, list_area);
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL)),
        list_area,
    );

    let children = menu.submenu_items();
    if children.is_empty() {
        return;
    }
    let row = nav.item_cursor().unwrap_or(0) as u16;
    let sub_width = dropdown_width(children);
    let sub_area = popup_rect(
        list_area.x + list_area.width,
        list_area.y + row,
        sub_width,
        children.len(),
        body,
    );
    let sub_lines: Vec<Line> = children
        .iter()
        .enumerate()
        .map(|(i, item)| item_line(item, "", nav.sub_item_cursor() == Some(i)))
        .collect();
    frame.render_widget(Clear, sub_area);
    frame.render_widget(
        Paragraph::new(sub_lines).block(Block::default().borders(Borders::ALL)),
        sub_area,
    );
}

fn item_line(item: &NavItem, marker: &str, selected: bool) -> Line<'static> {
    let style = if selected {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    } else {
        Style::default()
    };
    Line::from(Span::styled(format!(" {}{marker} ", item.label), style))
}

fn dropdown_width(items: &[NavItem]) -> u16 {
    let longest = items
        .iter()
        .map(|item| item.label.chars().count())
        .max()
        .unwrap_or(0) as u16;
    (longest + 6).max(14)
}

/// A bordered popup clipped to `bounds`.
fn popup_rect(x: u16, y: u16, width: u16, rows: usize, bounds: Rect) -> Rect {
    let right = bounds.x + bounds.width;
    let bottom = bounds.y + bounds.height;
    let x = x.min(right.saturating_sub(1));
    let y = y.min(bottom.saturating_sub(1));
    Rect {
        x,
        y,
        width: width.min(right.saturating_sub(x)),
        height: (rows as u16 + 2).min(bottom.saturating_sub(y)),
    }
}

fn render_search_results(frame: &mut Frame, header: Rect, state: &AppState) {
    let results = state.search_results();
    if results.is_empty() {
        return;
    }
    let full = frame.size();
    let x = header.x + header.width.saturating_sub(SEARCH_WIDTH);
    let y = header.y + header.height;
    let max_rows = full.height.saturating_sub(y).saturating_sub(2) as usize;
    let (start, end) = visible_range(state.search.selected, results.len(), max_rows.max(1));
    let area = popup_rect(x, y, SEARCH_WIDTH, end - start, full);

    let lines: Vec<Line> = (start..end)
        .map(|idx| {
            let p = results[idx];
            let style = if idx == state.search.selected {
                Style::default().fg(Color::White).bg(Color::DarkGray)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(format!(" {} ", p.name), style),
                Span::styled(
                    format!("({})", p.position),
                    style.fg(Color::Gray).add_modifier(Modifier::DIM),
                ),
            ])
        })
        .collect();
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn render_home(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let hero = Paragraph::new(format!(
        "Landing Hero Area\n\n{} players indexed · {} teams · {} coaches",
        state.players.len(),
        state.teams.len(),
        state.coaches.len()
    ))
    .block(Block::default().title("No Cap Fantasy").borders(Borders::ALL));
    frame.render_widget(hero, rows[0]);

    let featured = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    frame.render_widget(
        Paragraph::new("Coming soon")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title("Featured Players").borders(Borders::ALL)),
        featured[0],
    );
    frame.render_widget(
        Paragraph::new("Coming soon")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title("Featured Research").borders(Borders::ALL)),
        featured[1],
    );
}

fn render_listing(frame: &mut Frame, area: Rect, state: &AppState, title: &str) {
    let block = Block::default()
        .title(format!("Players · {title}"))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let players = state.listing_players();
    if players.is_empty() {
        let empty = Paragraph::new("No players at this position")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    let visible = inner.height as usize;
    let (start, end) = visible_range(state.listing_selected, players.len(), visible);
    let lines: Vec<Line> = (start..end)
        .map(|idx| {
            let style = if idx == state.listing_selected {
                Style::default().fg(Color::White).bg(Color::DarkGray)
            } else {
                Style::default()
            };
            Line::from(Span::styled(listing_row(players[idx]), style))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn listing_row(p: &PlayerRecord) -> String {
    let seasons = match (p.first_season, p.last_season) {
        (Some(first), Some(last)) if first != last => format!("{first}–{last}"),
        (Some(first), _) => first.to_string(),
        (None, Some(last)) => last.to_string(),
        (None, None) => String::new(),
    };
    format!(
        " {:<28} {:<4} {:<4} {}",
        p.name,
        p.position,
        player_page::team_label(p.team.as_deref()),
        seasons
    )
}

fn render_player(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let Some(page) = state.page.as_ref() else {
        let msg = if state.page_loading {
            "Loading player…"
        } else {
            "No player loaded"
        };
        frame.render_widget(
            Paragraph::new(msg).style(Style::default().fg(Color::DarkGray)),
            area,
        );
        return;
    };

    let content = if page.bio_panel.is_open() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(page.bio_panel.content_offset().min(BIO_PANEL_WIDTH)),
                Constraint::Min(1),
            ])
            .split(area);
        render_bio_panel(frame, cols[0], page);
        cols[1]
    } else {
        area
    };

    let mut lines: Vec<Line> = Vec::new();
    for (i, text) in page.header_lines().into_iter().enumerate() {
        let style = if i == 0 {
            Style::default().add_modifier(Modifier::BOLD).fg(team_color(page))
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(text, style)));
    }
    if page.detail_missing {
        lines.push(Line::from(Span::styled(
            "Detail file missing; showing index data",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));

    if page.has_bio() && !page.bio_panel.is_open() {
        lines.push(Line::from(Span::styled(
            "Bio",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(page.bio_preview()));
        lines.push(Line::from(Span::styled(
            "[m] More",
            Style::default().fg(Color::Yellow),
        )));
        lines.push(Line::from(""));
    }

    for section in player_page::SECTIONS {
        lines.push(Line::from(Span::styled(
            section,
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )));
        lines.push(Line::from(Span::styled(
            "  no data yet",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.page_scroll, 0))
        .block(
            Block::default()
                .title(format!("/players/{}", page.record.slug))
                .borders(Borders::ALL),
        );
    frame.render_widget(body, content);
}

fn team_color(page: &PlayerPage) -> Color {
    page.detail
        .team_colors
        .as_ref()
        .and_then(|c| c.primary_rgb())
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::White)
}

fn render_bio_panel(frame: &mut Frame, area: Rect, page: &PlayerPage) {
    let lines = bio_lines(&page.bio);
    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(format!("{} · Player Bio [Esc] Close", page.display_name()))
                .borders(Borders::ALL),
        );
    frame.render_widget(Clear, area);
    frame.render_widget(panel, area);
}

fn bio_lines(text: &str) -> Vec<Line<'static>> {
    markdown::parse_blocks(text)
        .into_iter()
        .map(|block| {
            let (prefix, base) = match block.kind {
                BlockKind::Heading(1) => (
                    "",
                    Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                ),
                BlockKind::Heading(_) => ("", Style::default().add_modifier(Modifier::BOLD)),
                BlockKind::ListItem => ("• ", Style::default()),
                BlockKind::Quote => (
                    "│ ",
                    Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
                ),
                BlockKind::Paragraph | BlockKind::Blank => ("", Style::default()),
            };
            let mut spans = Vec::with_capacity(block.runs.len() + 1);
            if !prefix.is_empty() {
                spans.push(Span::styled(prefix, base));
            }
            for run in block.runs {
                let mut style = base;
                if run.strong {
                    style = style.add_modifier(Modifier::BOLD);
                }
                if run.emphasis {
                    style = style.add_modifier(Modifier::ITALIC);
                }
                spans.push(Span::styled(run.text, style));
            }
            Line::from(spans)
        })
        .collect()
}

fn render_not_found(frame: &mut Frame, area: Rect, slug: &str) {
    let text = format!("Player not found\n\nNo player with slug \"{slug}\" in the index.");
    frame.render_widget(
        Paragraph::new(text).block(Block::default().title("404").borders(Borders::ALL)),
        area,
    );
}

fn render_placeholder(frame: &mut Frame, area: Rect, title: &str) {
    frame.render_widget(
        Paragraph::new("Coming soon")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title(title.to_string()).borders(Borders::ALL)),
        area,
    );
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    let start = state.logs.len().saturating_sub(3);
    state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn footer_text(state: &AppState) -> String {
    match state.focus {
        Focus::Search => "Type to search | ↑/↓ Select | Enter Open | Esc Cancel".to_string(),
        Focus::Nav => "←/→ Menu | ↑/↓ Item | → Submenu | Enter Go | Esc Close".to_string(),
        Focus::Content => match state.screen {
            Screen::Player { .. } => {
                "/ Search | n Menu | m Bio | j/k Scroll | b/Esc Back | ? Help | q Quit".to_string()
            }
            Screen::Listing { .. } => {
                "/ Search | n Menu | j/k Move | Enter Open | b/Esc Back | ? Help | q Quit"
                    .to_string()
            }
            _ => "/ Search | n Menu | 1 Home | r Reload | ? Help | q Quit".to_string(),
        },
    }
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "No Cap Fantasy - Help",
        "",
        "Global:",
        "  /            Search players",
        "  n / Tab      Navigation menus",
        "  1            Home",
        "  r            Reload indexes",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Menus:",
        "  ←/→          Switch menu, open submenu",
        "  ↑/↓          Move",
        "  Enter        Go",
        "",
        "Player page:",
        "  m            Open/close bio",
        "  j/k          Scroll",
        "  b / Esc      Back",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
