use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::Action;
use crate::config::{Config, parse_key};
use crate::logger::PerformanceLogger;
use crate::system::{CounterSource, Monitor, Snapshot, SysinfoSource};
use crate::ui::theme::{BorderStyle, Theme};

pub struct App<S = SysinfoSource> {
    pub running: bool,
    pub monitor: Monitor<S>,
    /// The latest published snapshot; replaced wholesale on every tick.
    pub snapshot: Snapshot,
    pub logger: PerformanceLogger,
    /// Most recent logger failure, shown in the status bar until a write
    /// succeeds again.
    pub log_error: Option<String>,
    pub theme: Theme,
    pub border_style: BorderStyle,
    pub ticks: u64,
    quit_key: KeyCode,
}

impl App<SysinfoSource> {
    pub fn new(config: &Config) -> Self {
        Self::with_source(SysinfoSource::new(), config)
    }
}

impl<S: CounterSource> App<S> {
    pub fn with_source(source: S, config: &Config) -> Self {
        let mut monitor = Monitor::new(source, config.monitor_settings(), Instant::now());
        let snapshot = monitor.idle_snapshot();

        App {
            running: true,
            monitor,
            snapshot,
            logger: PerformanceLogger::new(config.logging.log_file.clone()),
            log_error: None,
            theme: Theme::from_config(&config.colors.theme),
            border_style: BorderStyle::from_config_str(&config.colors.border_style),
            ticks: 0,
            quit_key: parse_key(&config.keybinds.quit).unwrap_or(KeyCode::Char('q')),
        }
    }

    /// One pass of sample, publish, log.
    pub fn tick(&mut self, now: Instant) {
        self.snapshot = self.monitor.build(now);
        self.ticks += 1;

        match self.logger.append(&self.snapshot) {
            Ok(()) => self.log_error = None,
            Err(err) => {
                tracing::warn!(%err, "performance log write failed");
                self.log_error = Some(err.to_string());
            }
        }
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits (raw mode swallows SIGINT)
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }
        match key.code {
            code if code == self.quit_key => Action::Quit,
            KeyCode::Esc => Action::Quit,
            KeyCode::Char('r') => Action::Refresh,
            _ => Action::None,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Refresh => self.tick(Instant::now()),
            Action::None => {}
        }
    }

    pub fn quit_label(&self) -> String {
        match self.quit_key {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            _ => "?".to_string(),
        }
    }
}
