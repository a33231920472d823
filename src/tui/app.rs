//! Main TUI application.

use std::io;
use std::time::{Duration, Instant};

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, info, warn};

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::mount::Mount;
use super::render::render;
use super::state::{COPIED_LABEL, COPY_FAILED_LABEL, UiState};
use crate::clipboard::Clipboard;
use crate::config::TableConfig;
use crate::provider::SnapshotProvider;
use crate::table::{LiveTable, TableError};

/// Label durations and pulse length, taken from the config.
#[derive(Debug, Clone, Copy)]
struct Timings {
    copied: Duration,
    failed: Duration,
    pulse: Duration,
}

/// Main TUI application.
pub struct App {
    table: LiveTable,
    provider: Box<dyn SnapshotProvider>,
    clipboard: Box<dyn Clipboard>,
    state: UiState,
    timings: Timings,
    should_quit: bool,
}

impl App {
    /// Creates the dashboard. Requires a [`Mount`], so a missing terminal
    /// fails before anything is drawn.
    pub fn new(
        _mount: Mount,
        config: &TableConfig,
        table: LiveTable,
        provider: Box<dyn SnapshotProvider>,
        clipboard: Box<dyn Clipboard>,
    ) -> Self {
        let state = UiState::new(provider.name());
        Self {
            table,
            provider,
            clipboard,
            state,
            timings: Timings {
                copied: config.copied_duration(),
                failed: config.failed_duration(),
                pulse: config.pulse_duration(),
            },
            should_quit: false,
        }
    }

    /// Runs the TUI application until the user quits. Returns the table.
    pub fn run(mut self, tick_rate: Duration) -> io::Result<LiveTable> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let events = EventHandler::new(tick_rate);

        // Initial data fetch
        self.advance(Instant::now());

        let result = self.event_loop(&mut terminal, &events);

        // Restore terminal even when drawing failed
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result.map(|()| self.table)
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        events: &EventHandler,
    ) -> io::Result<()> {
        loop {
            let now = Instant::now();
            let pulse = self.timings.pulse;
            terminal.draw(|frame| render(frame, &mut self.state, &self.table, now, pulse))?;

            match events.next() {
                Ok(Event::Tick) => self.advance(Instant::now()),
                Ok(Event::Key(key)) => {
                    let action = handle_key(&mut self.state, &mut self.table, key);
                    self.handle_action(action, Instant::now());
                }
                Ok(Event::Resize) => {}
                Err(_) => self.should_quit = true,
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    /// Pulls the newest snapshot from the provider into the table.
    fn advance(&mut self, now: Instant) {
        if let Some(snapshot) = self.provider.advance().cloned() {
            let outcome = self.table.update_at(snapshot, now);
            debug!(
                created = outcome.created,
                changed = outcome.changed,
                ignored = outcome.ignored_keys,
                frozen = outcome.frozen,
                "snapshot applied"
            );
        }
        self.state.source_error = self.provider.last_error().map(|e| e.to_string());
        if self.provider.is_exhausted() && !self.state.source_ended {
            info!(source = self.provider.name(), "provider exhausted");
            self.state.source_ended = true;
        }
    }

    fn handle_action(&mut self, action: KeyAction, now: Instant) {
        match action {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::CopyJson => self.copy_json(now),
            KeyAction::CopyCsv => self.copy_csv(now),
            KeyAction::None => {}
        }
    }

    /// Copies the last snapshot. Does nothing before the first snapshot.
    fn copy_json(&mut self, now: Instant) {
        let text = match self.table.export_json() {
            Ok(text) => text,
            Err(TableError::NoSnapshot) => return,
            Err(e) => {
                warn!(error = %e, "JSON export failed");
                self.state
                    .copy_json
                    .flash(COPY_FAILED_LABEL, now, self.timings.failed);
                return;
            }
        };
        let label = match self.clipboard.set_text(&text) {
            Ok(()) => {
                info!(bytes = text.len(), "copied JSON");
                (COPIED_LABEL, self.timings.copied)
            }
            Err(e) => {
                warn!(error = %e, "copy JSON failed");
                (COPY_FAILED_LABEL, self.timings.failed)
            }
        };
        self.state.copy_json.flash(label.0, now, label.1);
    }

    fn copy_csv(&mut self, now: Instant) {
        let text = self.table.export_csv();
        let label = match self.clipboard.set_text(&text) {
            Ok(()) => {
                info!(bytes = text.len(), "copied CSV");
                (COPIED_LABEL, self.timings.copied)
            }
            Err(e) => {
                warn!(error = %e, "copy CSV failed");
                (COPY_FAILED_LABEL, self.timings.failed)
            }
        };
        self.state.copy_csv.flash(label.0, now, label.1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::{ClipboardError, MemoryClipboard};
    use crate::model::{Snapshot, Value};
    use crate::provider::ProviderError;
    use crate::store::MemoryStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Provider handing out a fixed list of snapshots, one per advance.
    struct ScriptedProvider {
        pending: Vec<Snapshot>,
        current: Option<Snapshot>,
    }

    impl SnapshotProvider for ScriptedProvider {
        fn current(&self) -> Option<&Snapshot> {
            self.current.as_ref()
        }

        fn advance(&mut self) -> Option<&Snapshot> {
            if self.pending.is_empty() {
                return None;
            }
            self.current = Some(self.pending.remove(0));
            self.current.as_ref()
        }

        fn is_exhausted(&self) -> bool {
            self.pending.is_empty()
        }

        fn last_error(&self) -> Option<&ProviderError> {
            None
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    /// Clipboard shared with the test so writes can be inspected.
    #[derive(Clone, Default)]
    struct SharedClipboard(Rc<RefCell<MemoryClipboard>>);

    impl Clipboard for SharedClipboard {
        fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            self.0.borrow_mut().set_text(text)
        }
    }

    fn app(pending: Vec<Snapshot>, clipboard: SharedClipboard) -> App {
        let config = TableConfig::default();
        let table = LiveTable::new(&config, Box::new(MemoryStore::new())).unwrap();
        let provider = ScriptedProvider {
            pending,
            current: None,
        };
        App::new(
            Mount::from_is_terminal(true).unwrap(),
            &config,
            table,
            Box::new(provider),
            Box::new(clipboard),
        )
    }

    fn snap(rpm: f64) -> Snapshot {
        [("RPM", Value::Number(rpm)), ("Note", Value::from("a\"b"))]
            .into_iter()
            .collect()
    }

    #[test]
    fn ticks_feed_the_table_until_exhausted() {
        let mut app = app(vec![snap(1000.0), snap(2000.0)], SharedClipboard::default());
        let now = Instant::now();
        app.advance(now);
        assert_eq!(app.table.row("RPM").unwrap().display_text(), "1000");
        assert!(!app.state.source_ended);
        app.advance(now);
        assert_eq!(app.table.row("RPM").unwrap().display_text(), "2000");
        assert!(app.state.source_ended);
    }

    #[test]
    fn copy_csv_writes_clipboard_and_flashes() {
        let clipboard = SharedClipboard::default();
        let mut app = app(vec![snap(5000.0)], clipboard.clone());
        let now = Instant::now();
        app.advance(now);
        app.handle_action(KeyAction::CopyCsv, now);
        assert_eq!(
            clipboard.0.borrow().contents.as_deref(),
            Some("Parameter,Value\n\"Note\",\"a\"\"b\"\n\"RPM\",\"5000\"")
        );
        assert_eq!(app.state.copy_csv.text(now), COPIED_LABEL);
        assert_eq!(app.state.copy_csv.text(now + Duration::from_millis(900)), "Copy CSV");
        assert_eq!(app.state.copy_json.text(now), "Copy JSON");
    }

    #[test]
    fn copy_json_before_first_snapshot_does_nothing() {
        let clipboard = SharedClipboard::default();
        let mut app = app(Vec::new(), clipboard.clone());
        let now = Instant::now();
        app.handle_action(KeyAction::CopyJson, now);
        assert_eq!(clipboard.0.borrow().contents, None);
        assert_eq!(app.state.copy_json.text(now), "Copy JSON");
    }

    #[test]
    fn clipboard_failure_shows_failed_label() {
        let clipboard = SharedClipboard::default();
        clipboard.0.borrow_mut().fail_with = Some("no display".to_string());
        let mut app = app(vec![snap(5000.0)], clipboard.clone());
        let now = Instant::now();
        app.advance(now);
        app.handle_action(KeyAction::CopyJson, now);
        assert_eq!(app.state.copy_json.text(now), COPY_FAILED_LABEL);
        assert_eq!(app.state.copy_json.text(now + Duration::from_millis(1199)), COPY_FAILED_LABEL);
        assert_eq!(app.state.copy_json.text(now + Duration::from_millis(1200)), "Copy JSON");
    }

    #[test]
    fn quit_action_stops_loop() {
        let mut app = app(Vec::new(), SharedClipboard::default());
        app.handle_action(KeyAction::Quit, Instant::now());
        assert!(app.should_quit);
    }
}
