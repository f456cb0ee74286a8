//! App — component-based event loop.
//!
//! - `App` owns all components and `AppState` (read-only data for components).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background
//!   tasks: terminal input, catalog loads, and history change notifications.
//! - Components return `Vec<Action>`; the App dispatches each Action.
//! - Navigation actions go through the `Navigator`, whose `Effect`s are
//!   applied here. `RestoreScroll` waits for the next tick so the list has
//!   been laid out with the restored results first.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use songbook_core::catalog::fetch_catalog;
use songbook_core::config::Config;
use songbook_core::prefs::{PrefStore, ThemeMode};
use songbook_core::{
    Catalog, CatalogSource, Effect, History, MemoryHistory, NavAction, Navigator, QueryParams,
    View,
};

use crate::{
    action::{Action, ComponentId},
    app_state::{AppState, CatalogStatus},
    audio::AudioPlayer,
    component::Component,
    components::{
        header::Header, help_overlay::HelpOverlay, lyrics_view::LyricsView, song_list::SongList,
    },
    session::{save_ui_session_state, UiSessionState},
    transition::{self, ViewTransition},
    widgets::{
        status_bar::{self, InputMode},
        toast::{Severity, ToastManager},
    },
    workspace::WorkspaceManager,
};

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    CatalogLoaded(Catalog),
    CatalogFailed(String),
    /// The location moved through history (back/forward).
    HistoryChanged,
}

/// Screen areas from the last draw, for mouse hit-testing.
#[derive(Default)]
struct PaneAreas {
    list: Rect,
    lyrics: Rect,
}

pub struct App {
    state: AppState,
    wm: WorkspaceManager,

    // ── Components ───────────────────────────────────────────────────────────
    header: Header,
    song_list: SongList,
    lyrics: LyricsView,
    help_overlay: HelpOverlay,
    toast: ToastManager,

    // ── Services ─────────────────────────────────────────────────────────────
    transition: ViewTransition,
    audio: AudioPlayer,
    prefs: PrefStore,
    catalog_source: CatalogSource,
    session_path: PathBuf,

    pane_areas: PaneAreas,
    tx: Option<mpsc::Sender<AppMessage>>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, location: String, session: UiSessionState) -> Self {
        // Theme is read before the first frame so it never flashes.
        let prefs = PrefStore::open(&config.paths.prefs_file);
        let theme = ThemeMode::load(&prefs);

        let catalog_source = CatalogSource::parse(&config.catalog.source);
        let history = MemoryHistory::from_location(&location);
        let nav = Navigator::new(Catalog::default(), history)
            .with_breakpoint(config.layout.breakpoint);
        debug!(
            "start location {:?}, breakpoint {}",
            location, config.layout.breakpoint
        );

        let mut audio = AudioPlayer::new(config.audio.player.clone(), config.audio.args.clone());
        audio.set_base_dir(match &catalog_source {
            CatalogSource::Path(p) => p.parent().map(|d| d.to_path_buf()),
            CatalogSource::Url(_) => None,
        });

        let state = AppState::new(nav, catalog_source.describe(), theme);
        let mut wm = WorkspaceManager::new(state.nav.panels());
        wm.show_keys_bar = session.show_keys_bar;
        if let Some(id) = ComponentId::from_label(&session.focused_component) {
            wm.focus_set(id);
        }

        Self {
            state,
            wm,
            header: Header::new(),
            song_list: SongList::new(),
            lyrics: LyricsView::new(),
            help_overlay: HelpOverlay::new(),
            toast: ToastManager::new(),
            transition: ViewTransition::new(config.layout.animations),
            audio,
            prefs,
            catalog_source,
            session_path: config.paths.session_file.clone(),
            pane_areas: PaneAreas::default(),
            tx: None,
            should_quit: false,
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);
        self.tx = Some(tx.clone());

        // Back/forward notifications arrive as messages, like popstate events.
        let history_tx = tx.clone();
        self.state.nav.history_mut().on_change(Box::new(move |_: &QueryParams| {
            let _ = history_tx.try_send(AppMessage::HistoryChanged);
        }));

        let size = terminal.size()?;
        self.dispatch(Action::Nav(NavAction::Resize(size.width))).await;

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        self.spawn_catalog_fetch();

        // Toasts, spinner, transition frames, deferred scroll restore.
        let mut ui_tick = tokio::time::interval(Duration::from_millis(80));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    needs_redraw = self.handle_message(msg).await;
                    while let Ok(next) = rx.try_recv() {
                        needs_redraw |= self.handle_message(next).await;
                    }
                }

                _ = ui_tick.tick() => {
                    needs_redraw = self.tick();
                }
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        self.audio.stop().await;
        self.save_ui_session_state();
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    fn spawn_catalog_fetch(&mut self) {
        let Some(tx) = self.tx.clone() else {
            return;
        };
        let source = self.catalog_source.clone();
        self.state.catalog_status = CatalogStatus::Loading;
        if self.toast.has_spinner() {
            self.toast.dismiss_spinner();
        }
        self.toast.spinner(format!("loading {}", source.describe()));

        tokio::spawn(async move {
            let msg = match fetch_catalog(&source).await {
                Ok(catalog) => AppMessage::CatalogLoaded(catalog),
                Err(e) if e.is_load_error() => {
                    error!("cannot load catalog from {}: {}", source.describe(), e);
                    AppMessage::CatalogFailed(e.to_string())
                }
                Err(e) => {
                    error!("cannot parse catalog from {}: {}", source.describe(), e);
                    AppMessage::CatalogFailed(e.to_string())
                }
            };
            let _ = tx.send(msg).await;
        });
    }

    /// Returns whether a redraw is needed.
    async fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(ev) => match ev {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        return false;
                    }
                    for action in self.handle_key(key) {
                        self.dispatch(action).await;
                    }
                }
                Event::Mouse(mouse) => {
                    for action in self.handle_mouse(mouse) {
                        self.dispatch(action).await;
                    }
                }
                Event::Resize(width, _) => {
                    self.dispatch(Action::Nav(NavAction::Resize(width))).await;
                }
                _ => return false,
            },

            AppMessage::CatalogLoaded(catalog) => {
                info!("catalog ready: {} songs", catalog.len());
                let count = catalog.len();
                self.state.catalog_status = CatalogStatus::Ready;
                self.toast.resolve_spinner(
                    Severity::Success,
                    format!("{} songs", count),
                    Duration::from_secs(2),
                );
                let before = self.state.nav.view();
                let mut effects = self.state.nav.replace_catalog(catalog);
                effects.extend(self.state.nav.hydrate_from_url());
                self.apply_effects(effects).await;
                self.after_nav(before);
                self.song_list.follow_selection(&self.state);
            }

            AppMessage::CatalogFailed(msg) => {
                self.state.catalog_status = CatalogStatus::Failed(msg.clone());
                self.toast.resolve_spinner(
                    Severity::Error,
                    format!("catalog: {}", msg),
                    Duration::from_secs(8),
                );
            }

            AppMessage::HistoryChanged => {
                self.dispatch(Action::Nav(NavAction::HydrateFromUrl)).await;
                self.song_list.follow_selection(&self.state);
            }
        }
        true
    }

    /// Periodic maintenance. Returns whether a redraw is needed.
    fn tick(&mut self) -> bool {
        let mut redraw = !self.toast.is_empty();
        self.toast.tick();

        if self.transition.is_running() {
            redraw |= self.transition.tick();
            self.state.transition = self.transition.hint();
        }

        match self.audio.reap() {
            Some(Ok(())) => {
                self.state.audio = self.audio.status();
                redraw = true;
            }
            Some(Err(e)) => {
                self.state.audio = self.audio.status();
                self.toast.error(e.to_string());
                redraw = true;
            }
            None => {}
        }

        redraw |= self.song_list.apply_pending_scroll();
        redraw
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('c') {
            return vec![Action::Quit];
        }

        // Help overlay captures all keys when visible.
        if self.help_overlay.visible {
            return self.help_overlay.handle_key(key, &self.state);
        }

        if ctrl && key.code == KeyCode::Char('l') {
            return vec![Action::ToggleLyricsSearch];
        }

        if self.state.input_mode == InputMode::Search {
            return match key.code {
                KeyCode::Tab => vec![Action::CloseSearch, Action::FocusNext],
                KeyCode::BackTab => vec![Action::CloseSearch, Action::FocusPrev],
                KeyCode::Up | KeyCode::Down | KeyCode::PageUp | KeyCode::PageDown => {
                    self.song_list.handle_key(key, &self.state)
                }
                _ => self.header.handle_key(key, &self.state),
            };
        }

        match key.code {
            KeyCode::Char('q') => return vec![Action::Quit],
            KeyCode::Char('?') => return vec![Action::ToggleHelp],
            KeyCode::Char('/') => return vec![Action::OpenSearch],
            KeyCode::Char('t') => return vec![Action::ToggleTheme],
            KeyCode::Char('y') => return vec![Action::CopyLocation],
            KeyCode::Char('p') => return vec![Action::ToggleAudio],
            KeyCode::Char('r') => return vec![Action::ReloadCatalog],
            KeyCode::Char('K') => return vec![Action::ToggleKeys],
            KeyCode::Char('[') => return vec![Action::HistoryBack],
            KeyCode::Char(']') => return vec![Action::HistoryForward],
            KeyCode::Tab => return vec![Action::FocusNext],
            KeyCode::BackTab => return vec![Action::FocusPrev],
            KeyCode::Char('1') => return vec![Action::FocusPane(ComponentId::SongList)],
            KeyCode::Char('2') => return vec![Action::FocusPane(ComponentId::Lyrics)],
            _ => {}
        }

        let s = &self.state;
        match self.wm.focused() {
            Some(ComponentId::SongList) => self.song_list.handle_key(key, s),
            Some(ComponentId::Lyrics) => self.lyrics.handle_key(key, s),
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        fn hit(r: Rect, col: u16, row: u16) -> bool {
            col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
        }
        if self.help_overlay.visible {
            return match event.kind {
                MouseEventKind::Down(_) => vec![Action::ToggleHelp],
                _ => vec![],
            };
        }
        let s = &self.state;
        if hit(self.pane_areas.list, event.column, event.row) {
            self.song_list.handle_mouse(event, self.pane_areas.list, s)
        } else if hit(self.pane_areas.lyrics, event.column, event.row) {
            self.lyrics.handle_mouse(event, self.pane_areas.lyrics, s)
        } else {
            vec![]
        }
    }

    // ── Dispatch ──────────────────────────────────────────────────────────────

    async fn dispatch(&mut self, action: Action) {
        let secondary: Vec<Action> = {
            let s = &self.state;
            let mut out = Vec::new();
            out.extend(self.header.on_action(&action, s));
            out.extend(self.song_list.on_action(&action, s));
            out.extend(self.lyrics.on_action(&action, s));
            out.extend(self.help_overlay.on_action(&action, s));
            out
        };

        self.apply_action(action).await;

        // Depth-limited to one level.
        for a in secondary {
            self.apply_action(a).await;
        }
    }

    async fn apply_action(&mut self, action: Action) {
        debug!("apply_action: {:?}", action);
        match action {
            Action::Nav(nav_action) => {
                let before = self.state.nav.view();
                let effects = self.state.nav.dispatch(nav_action);
                self.apply_effects(effects).await;
                self.after_nav(before);
            }
            Action::HistoryBack => {
                if !self.state.nav.history_mut().go_back() {
                    self.toast.info("no earlier location");
                }
            }
            Action::HistoryForward => {
                if !self.state.nav.history_mut().go_forward() {
                    self.toast.info("no later location");
                }
            }

            Action::FocusNext => {
                self.wm.focus_next();
            }
            Action::FocusPrev => {
                self.wm.focus_prev();
            }
            Action::FocusPane(id) => {
                self.wm.focus_set(id);
            }

            Action::OpenSearch => self.state.input_mode = InputMode::Search,
            Action::CloseSearch => self.state.input_mode = InputMode::Normal,
            Action::ToggleLyricsSearch => {
                let flag = !self.state.nav.state().search_lyrics;
                let effects = self.state.nav.set_search_lyrics(flag);
                self.apply_effects(effects).await;
                self.toast
                    .info(if flag { "searching lyrics too" } else { "searching titles and artists" });
            }

            Action::ToggleAudio => match self.audio.toggle().await {
                Ok(_) => self.state.audio = self.audio.status(),
                Err(e) => {
                    warn!("audio: {}", e);
                    self.toast.error(e.to_string());
                }
            },

            Action::ToggleTheme => {
                let theme = self.state.theme.toggle();
                self.state.set_theme(theme);
                if let Err(e) = theme.save(&mut self.prefs) {
                    warn!("cannot save theme to {}: {}", self.prefs.path().display(), e);
                    self.toast.warning(format!("theme not saved: {}", e));
                }
            }
            Action::ToggleHelp => {}
            Action::ToggleKeys => self.wm.show_keys_bar = !self.wm.show_keys_bar,

            Action::CopyLocation => {
                let location = self.state.nav.location();
                let text = if location.is_empty() { "?".to_string() } else { location };
                match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.clone())) {
                    Ok(()) => {
                        let display = if text.chars().count() > 40 {
                            format!("{}…", text.chars().take(40).collect::<String>())
                        } else {
                            text
                        };
                        self.toast.success(format!("copied: {}", display));
                    }
                    Err(e) => {
                        warn!("clipboard error: {}", e);
                        self.toast.error(format!("clipboard error: {}", e));
                    }
                }
            }

            Action::ReloadCatalog => self.spawn_catalog_fetch(),

            Action::Quit => self.should_quit = true,
        }
    }

    async fn apply_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ResultsChanged => {
                    self.song_list.sync(&self.state);
                    self.header.sync_query(&self.state.nav.state().query);
                }
                Effect::SetupAudio(resource) => {
                    self.audio.setup(resource).await;
                    self.state.audio = self.audio.status();
                }
                Effect::RestoreScroll(offset) => self.song_list.defer_scroll(offset),
            }
        }
    }

    /// Bring panes, focus, and the transition in line with the navigator.
    fn after_nav(&mut self, before: View) {
        let view = self.state.nav.view();
        self.wm.sync_panels(self.state.nav.panels());
        if view != before {
            match view {
                View::Detail => {
                    self.transition.start(transition::Direction::Enter);
                    if self.state.nav.layout().is_narrow() {
                        self.wm.focus_set(ComponentId::Lyrics);
                    }
                }
                View::List => {
                    self.transition.start(transition::Direction::Leave);
                    self.wm.focus_set(ComponentId::SongList);
                }
            }
            self.state.transition = self.transition.hint();
        }
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        let palette = self.state.palette;
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(palette.bg)), area);

        let status_h = if self.wm.show_keys_bar { 2u16 } else { 0 };
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(status_h),
            ])
            .split(area);
        let (header_area, body_area, status_area) = (outer[0], outer[1], outer[2]);

        let searching = self.state.input_mode == InputMode::Search;
        self.header.draw(frame, header_area, searching, &self.state);

        let panels = self.wm.panels();
        let (list_area, lyrics_area) = match (panels.list, panels.detail) {
            (true, true) => {
                let cols = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
                    .split(body_area);
                (cols[0], cols[1])
            }
            (true, false) => (body_area, Rect::default()),
            (false, _) => (Rect::default(), body_area),
        };
        self.pane_areas = PaneAreas {
            list: list_area,
            lyrics: lyrics_area,
        };

        if panels.list {
            let focused = !searching && self.wm.focus.is_focused(self.song_list.id());
            self.song_list.draw(frame, list_area, focused, &self.state);
        }
        if panels.detail {
            let focused = !searching && self.wm.focus.is_focused(self.lyrics.id());
            self.lyrics.draw(frame, lyrics_area, focused, &self.state);
        }

        if self.wm.show_keys_bar {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Length(1)])
                .split(status_area);
            status_bar::draw_separator(frame, rows[0], &palette);
            status_bar::draw_keys_bar(
                frame,
                rows[1],
                self.state.input_mode,
                self.state.nav.view(),
                panels.back,
                &palette,
            );
        }

        self.help_overlay.draw(frame, area, false, &self.state);
        self.toast.draw(frame, area, &palette);
    }

    fn save_ui_session_state(&self) {
        let ui_state = UiSessionState {
            last_location: self.state.nav.location(),
            focused_component: self
                .wm
                .focused()
                .map(|id| id.label().to_string())
                .unwrap_or_default(),
            show_keys_bar: self.wm.show_keys_bar,
        };
        if let Err(e) = save_ui_session_state(&self.session_path, &ui_state) {
            warn!("cannot save session to {}: {}", self.session_path.display(), e);
        }
    }
}
