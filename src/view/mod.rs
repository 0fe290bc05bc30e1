//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod grid;
mod help;
mod layout;
mod search_input;
pub mod styles;
mod viewer_pane;

pub use grid::truncate_to_width;
pub use help::render_help_overlay;
pub use layout::{RenderedAreas, render_layout};
pub use search_input::SearchInput;
pub use styles::{ColorConfig, Theme};

use crate::codec::{CookieJar, KeyValueStore, export_to_dir, import_file};
use crate::config::keybindings::KeyBindings;
use crate::model::{KeyAction, Record};
use crate::source::{DocumentFetcher, Location, load_records};
use crate::state::{
    AppState, CatalogEvent, Command, FocusPane, StatusMessage, TextInput, ViewerState,
    text_input,
};
use crate::viewer::{LaunchOutcome, RenderTarget, ViewerLauncher, write_detached};
use constants::{VIEWER_SCROLL_STEP, grid_columns};
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Key under which the dark-mode preference is stored.
pub const DARK_MODE_KEY: &str = "darkMode";

/// Starting dark-mode state: `--dark` wins, then the stored preference,
/// then the configured default.
pub fn resolve_dark_mode(cli_flag: bool, kv: &dyn KeyValueStore, configured: bool) -> bool {
    if cli_flag {
        return true;
    }
    match kv.get_item(DARK_MODE_KEY).as_deref() {
        Some("true") => true,
        Some("false") => false,
        _ => configured,
    }
}

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// Raw mode, the alternate screen or a draw call failed.
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// How the session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The user quit.
    Quit,
    /// An external record was opened; the caller should hand this URL on.
    Navigate(String),
}

/// Everything the shell needs to act on the outside world.
pub struct Services {
    /// Loads the record list on start and on reload.
    pub fetcher: Arc<dyn DocumentFetcher>,
    /// Opens records into the viewer or the pop-out directory.
    pub launcher: ViewerLauncher,
    /// Where the record list lives.
    pub zones: Location,
    /// Saved key-value pairs, including the dark-mode preference.
    pub kv: Box<dyn KeyValueStore>,
    /// Saved cookies.
    pub cookies: Box<dyn CookieJar>,
    /// Directory the `e` key exports into.
    pub export_dir: PathBuf,
    /// Directory popped-out documents are written to.
    pub detached_dir: PathBuf,
}

/// Startup options applied once the record list is loaded.
#[derive(Debug, Clone, Default)]
pub struct StartupOptions {
    /// Record to open immediately, compared against `id.to_string()`.
    pub open_id: Option<String>,
    /// Initial search text.
    pub search: Option<String>,
    /// Color override; `None` reads `NO_COLOR`.
    pub colors: Option<ColorConfig>,
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    services: Services,
    key_bindings: KeyBindings,
    colors: ColorConfig,
    last_areas: RenderedAreas,
    exit: Option<RunOutcome>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Put the terminal in raw mode on the alternate screen.
    pub fn new(app_state: AppState, services: Services) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self::with_terminal(terminal, app_state, services))
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    fn with_terminal(terminal: Terminal<B>, app_state: AppState, services: Services) -> Self {
        Self {
            terminal,
            app_state,
            services,
            key_bindings: KeyBindings::default(),
            colors: ColorConfig::from_env_and_args(false),
            last_areas: RenderedAreas::default(),
            exit: None,
        }
    }

    /// Load the record list and apply startup options.
    pub fn start(&mut self, options: StartupOptions) {
        if let Some(colors) = options.colors {
            self.colors = colors;
        }
        if let Some(search) = options.search {
            self.dispatch(CatalogEvent::SearchChanged(TextInput::new(search)));
        }
        self.reload();
        if let Some(id) = options.open_id {
            self.dispatch(CatalogEvent::OpenByIdStr(id));
        }
    }

    /// Run the event loop until the user quits or navigates away.
    pub fn run(&mut self) -> Result<RunOutcome, TuiError> {
        const TICK: Duration = Duration::from_millis(100);

        self.draw()?;
        loop {
            if let Some(outcome) = self.exit.take() {
                return Ok(outcome);
            }

            let mut dirty = self.drain_viewer_events();

            if event::poll(TICK)? {
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        if self.handle_key(key) {
                            return Ok(self.exit.take().unwrap_or(RunOutcome::Quit));
                        }
                        dirty = true;
                    }
                    Event::Resize(_, _) => dirty = true,
                    _ => {}
                }
            }

            if dirty {
                self.draw()?;
            }
        }
    }

    /// Feed completed viewer fetches into the state. Returns true if any
    /// arrived.
    fn drain_viewer_events(&mut self) -> bool {
        let events = self.services.launcher.poll();
        let any = !events.is_empty();
        for event in events {
            self.dispatch(CatalogEvent::ViewerDelivered(event));
        }
        any
    }

    fn dispatch(&mut self, event: CatalogEvent) {
        let commands = self.app_state.dispatch(event);
        for command in commands {
            self.execute(command);
        }
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::Launch { record, target } => self.launch(&record, target),
            Command::WriteDetached { record, document } => {
                match write_detached(&self.services.detached_dir, &record, &document) {
                    Ok(path) => {
                        info!(id = %record.id, path = %path.display(), "Popped out zone");
                        self.app_state.status = Some(StatusMessage::info(format!(
                            "Opened {} in {}",
                            record.name,
                            path.display()
                        )));
                    }
                    Err(err) => {
                        warn!(id = %record.id, error = %err, "Pop-out write failed");
                        self.app_state.status =
                            Some(StatusMessage::error(format!("Failed to pop out zone: {err}")));
                    }
                }
            }
            Command::PersistDarkMode(enabled) => {
                if let Err(err) = self
                    .services
                    .kv
                    .set_item(DARK_MODE_KEY, &enabled.to_string())
                {
                    warn!(error = %err, "Could not persist dark mode");
                    self.app_state.status = Some(StatusMessage::error(err.to_string()));
                }
            }
        }
    }

    fn launch(&mut self, record: &Record, target: RenderTarget) {
        match self.services.launcher.open(record, target) {
            LaunchOutcome::Navigate(url) => {
                self.exit = Some(RunOutcome::Navigate(url));
            }
            LaunchOutcome::Pending { location, .. } => {
                debug!(id = %record.id, %location, "Viewer load pending");
                self.app_state.pending_loads += 1;
            }
        }
    }

    /// Fetch the record list and install it. A failure keeps the old list.
    fn reload(&mut self) {
        info!(location = %self.services.zones, "Loading zones");
        let result = load_records(self.services.fetcher.as_ref(), &self.services.zones);
        match &result {
            Ok(records) => info!(count = records.len(), "Zones loaded"),
            Err(err) => warn!(error = %err, "Zone list fetch failed"),
        }
        self.dispatch(CatalogEvent::RecordsLoaded(result));
    }

    fn export_state(&mut self) {
        let result = export_to_dir(
            self.services.kv.as_ref(),
            self.services.cookies.as_ref(),
            &self.services.export_dir,
            chrono::Utc::now(),
        );
        self.app_state.status = Some(match result {
            Ok(path) => StatusMessage::info(format!("Exported to {}", path.display())),
            Err(err) => StatusMessage::error(format!("Export failed: {err}")),
        });
    }

    fn import_state(&mut self, path: PathBuf) {
        let result = import_file(
            &path,
            self.services.kv.as_mut(),
            self.services.cookies.as_mut(),
        );
        self.app_state.status = Some(match result {
            Ok(report) if report.cookies_skipped.is_empty() && report.cookies_failed == 0 => {
                StatusMessage::info(format!(
                    "Imported {} keys and {} cookies",
                    report.keys_written, report.cookies_applied
                ))
            }
            Ok(report) => StatusMessage::info(format!(
                "Imported {} keys and {} cookies ({} cookies skipped)",
                report.keys_written,
                report.cookies_applied,
                report.cookies_skipped.len() + report.cookies_failed
            )),
            Err(err) => StatusMessage::error(format!("Import failed: {err}")),
        });
    }

    fn columns(&self) -> usize {
        self.last_areas
            .grid
            .map_or(1, |area| grid_columns(area.width))
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if the app should exit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if self.app_state.help_visible {
            match key.code {
                KeyCode::Esc | KeyCode::Char('?') => self.app_state.help_visible = false,
                KeyCode::Char('q') => return true,
                _ => {}
            }
            return false;
        }

        match self.app_state.focus {
            FocusPane::Search => {
                if self.handle_search_key(key) {
                    return false;
                }
            }
            FocusPane::ImportPrompt => {
                self.handle_import_key(key);
                return false;
            }
            FocusPane::Grid | FocusPane::Viewer => {}
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };
        self.apply_action(action);
        self.exit.is_some()
    }

    /// Typing into the search bar. Returns true if the key was consumed.
    fn handle_search_key(&mut self, key: KeyEvent) -> bool {
        let current = self.app_state.search().clone();
        let next = match key.code {
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                text_input::handle_char_input(current, ch)
            }
            KeyCode::Backspace => text_input::handle_backspace(current),
            KeyCode::Left => text_input::handle_cursor_left(current),
            KeyCode::Right => text_input::handle_cursor_right(current),
            KeyCode::Enter | KeyCode::Esc | KeyCode::Down | KeyCode::Tab => {
                self.app_state.focus = FocusPane::Grid;
                return true;
            }
            _ => return false,
        };
        self.dispatch(CatalogEvent::SearchChanged(next));
        true
    }

    fn handle_import_key(&mut self, key: KeyEvent) {
        let current = std::mem::take(&mut self.app_state.import_prompt);
        self.app_state.import_prompt = match key.code {
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                text_input::handle_char_input(current, ch)
            }
            KeyCode::Backspace => text_input::handle_backspace(current),
            KeyCode::Left => text_input::handle_cursor_left(current),
            KeyCode::Right => text_input::handle_cursor_right(current),
            KeyCode::Enter => {
                self.app_state.focus = FocusPane::Grid;
                let path = current.text().trim().to_string();
                if !path.is_empty() {
                    self.import_state(PathBuf::from(path));
                }
                TextInput::default()
            }
            KeyCode::Esc => {
                self.app_state.focus = FocusPane::Grid;
                TextInput::default()
            }
            _ => current,
        };
    }

    fn apply_action(&mut self, action: KeyAction) {
        let viewer_focused = self.app_state.focus == FocusPane::Viewer;
        let columns = self.columns() as isize;

        match action {
            KeyAction::Quit => self.exit = Some(RunOutcome::Quit),

            KeyAction::SelectUp | KeyAction::ViewerScrollUp if viewer_focused => {
                self.scroll_viewer(-1)
            }
            KeyAction::SelectDown | KeyAction::ViewerScrollDown if viewer_focused => {
                self.scroll_viewer(1)
            }
            KeyAction::ViewerScrollUp => self.scroll_viewer(-1),
            KeyAction::ViewerScrollDown => self.scroll_viewer(1),
            KeyAction::SelectLeft
            | KeyAction::SelectRight
            | KeyAction::SelectUp
            | KeyAction::SelectDown
                if viewer_focused =>
            {
                self.app_state.focus = FocusPane::Grid;
                self.move_selection(action, columns);
            }
            KeyAction::SelectLeft
            | KeyAction::SelectRight
            | KeyAction::SelectUp
            | KeyAction::SelectDown => self.move_selection(action, columns),

            KeyAction::OpenSelected => {
                if let Some(id) = self.app_state.selected_record().map(|r| r.id) {
                    self.dispatch(CatalogEvent::OpenRecord {
                        id,
                        target: RenderTarget::Embedded,
                    });
                }
            }
            KeyAction::LoadMore => self.dispatch(CatalogEvent::LoadMore),

            KeyAction::StartSearch => self.app_state.focus = FocusPane::Search,
            KeyAction::ClearSearch => {
                self.dispatch(CatalogEvent::SearchChanged(TextInput::default()))
            }
            KeyAction::CycleSort => {
                let next = self.app_state.sort().cycle();
                self.dispatch(CatalogEvent::SortChanged(next));
            }

            KeyAction::CloseViewer => {
                if self.app_state.viewer.is_open() {
                    self.dispatch(CatalogEvent::CloseViewer);
                } else {
                    self.app_state.status = None;
                }
            }
            KeyAction::ToggleFullscreen => self.dispatch(CatalogEvent::ToggleFullscreen),
            KeyAction::PopOut => {
                let id = self
                    .app_state
                    .viewer
                    .record_id()
                    .or_else(|| self.app_state.selected_record().map(|r| r.id));
                if let Some(id) = id {
                    self.dispatch(CatalogEvent::OpenRecord {
                        id,
                        target: RenderTarget::Detached,
                    });
                }
            }

            KeyAction::ExportState => self.export_state(),
            KeyAction::ImportState => {
                self.app_state.import_prompt = TextInput::default();
                self.app_state.focus = FocusPane::ImportPrompt;
            }

            KeyAction::ToggleDarkMode => self.dispatch(CatalogEvent::ToggleDarkMode),
            KeyAction::Reload => self.reload(),
            KeyAction::Help => self.app_state.help_visible = !self.app_state.help_visible,
        }
    }

    fn move_selection(&mut self, action: KeyAction, columns: isize) {
        let delta = match action {
            KeyAction::SelectLeft => -1,
            KeyAction::SelectRight => 1,
            KeyAction::SelectUp => -columns,
            KeyAction::SelectDown => columns,
            _ => 0,
        };
        self.app_state.move_selection(delta);
    }

    fn scroll_viewer(&mut self, direction: i8) {
        if let ViewerState::Open { scroll, .. } = &mut self.app_state.viewer {
            *scroll = if direction < 0 {
                scroll.saturating_sub(VIEWER_SCROLL_STEP)
            } else {
                scroll.saturating_add(VIEWER_SCROLL_STEP)
            };
        }
    }

    fn draw(&mut self) -> Result<(), TuiError> {
        let theme = Theme::new(self.app_state.dark_mode, self.colors);
        let state = &self.app_state;
        let templates = self.services.launcher.templates();
        let mut areas = RenderedAreas::default();
        self.terminal
            .draw(|frame| areas = render_layout(frame, state, templates, &theme))?;
        self.last_areas = areas;
        Ok(())
    }
}

// ===== Test Helpers =====

#[cfg(test)]
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        app_state: AppState,
        services: Services,
    ) -> Self {
        let mut app = Self::with_terminal(terminal, app_state, services);
        app.colors = ColorConfig::enabled();
        app
    }

    pub(crate) fn app_state(&self) -> &AppState {
        &self.app_state
    }

    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    /// Block until one viewer fetch completes and apply it.
    pub(crate) fn wait_for_viewer(&mut self) -> bool {
        match self.services.launcher.wait(Duration::from_secs(5)) {
            Some(event) => {
                self.dispatch(CatalogEvent::ViewerDelivered(event));
                true
            }
            None => false,
        }
    }

    pub(crate) fn exit_outcome(&self) -> Option<&RunOutcome> {
        self.exit.as_ref()
    }

    pub(crate) fn services(&self) -> &Services {
        &self.services
    }
}

/// Set up the terminal, run the catalog, and always restore the terminal.
///
/// Logging must be initialized by the caller.
pub fn run_with_services(
    app_state: AppState,
    services: Services,
    options: StartupOptions,
) -> Result<RunOutcome, TuiError> {
    let mut app = TuiApp::new(app_state, services)?;
    app.start(options);
    let result = app.run();
    restore_terminal()?;
    result
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
