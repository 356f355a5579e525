//! Application core: event loop, background fetches, and action dispatch.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use netwatch_core::{FetchTicket, Monitor, PurgeConfirmation, Selection};

use crate::action::{Action, Notification, NotificationLevel};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screens::HistoryScreen;
use crate::theme;
use crate::tui::Tui;

/// How long a status-line notification stays visible.
const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

/// Top-level application state and event loop.
pub struct App {
    monitor: Monitor,
    screen: HistoryScreen,
    running: bool,
    help_visible: bool,
    /// Current status-line message and when it was posted.
    notification: Option<(Notification, Instant)>,
    /// Auto-refresh period; `None` disables it.
    refresh_every: Option<Duration>,
    last_fetch: Instant,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(monitor: Monitor, selection: Selection, refresh_every: Option<Duration>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let screen = HistoryScreen::new(selection, *monitor.windows());

        Self {
            monitor,
            screen,
            running: true,
            help_visible: false,
            notification: None,
            refresh_every,
            last_fetch: Instant::now(),
            action_tx,
            action_rx,
        }
    }

    /// Run the main event loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::enter()?;
        self.screen.init(self.action_tx.clone())?;

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!(url = %self.monitor.config().url, "TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Resize | Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Global keys first, then the screen. An open modal gets every key
    /// except Ctrl+C.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.screen.captures_input() {
            return self.screen.handle_key_event(key);
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            });
        }

        match key.code {
            KeyCode::Char('q') => Ok(Some(Action::Quit)),
            KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
            _ => self.screen.handle_key_event(key),
        }
    }

    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,
            Action::ToggleHelp => self.help_visible = !self.help_visible,
            Action::Render => {}

            Action::Tick => self.on_tick()?,

            Action::Fetch(ticket) => {
                self.last_fetch = Instant::now();
                self.spawn_fetch(*ticket);
            }

            Action::Notify(notification) => {
                self.notification = Some((notification.clone(), Instant::now()));
            }

            Action::Purge(confirmation) => {
                self.spawn_purge(*confirmation);
                self.forward(action)?;
            }

            Action::PurgeFinished { category, result } => {
                let notification = match result {
                    Ok(message) => Notification::success(message.clone()),
                    Err(e) => Notification::error(format!("Purge of {category} failed: {e}")),
                };
                self.notification = Some((notification, Instant::now()));
                self.forward(action)?;
            }

            other => self.forward(other)?,
        }
        Ok(())
    }

    /// Hand an action to the screen and queue whatever it asks for next.
    fn forward(&mut self, action: &Action) -> Result<()> {
        if let Some(follow_up) = self.screen.update(action)? {
            self.action_tx.send(follow_up)?;
        }
        Ok(())
    }

    fn on_tick(&mut self) -> Result<()> {
        if self
            .notification
            .as_ref()
            .is_some_and(|(_, posted)| posted.elapsed() >= NOTIFICATION_TTL)
        {
            self.notification = None;
        }

        let due = self
            .refresh_every
            .is_some_and(|every| self.last_fetch.elapsed() >= every);
        if due {
            debug!("auto-refresh");
            self.last_fetch = Instant::now();
            self.action_tx.send(Action::Refresh)?;
        }
        Ok(())
    }

    fn spawn_fetch(&self, ticket: FetchTicket) {
        let monitor = self.monitor.clone();
        let tx = self.action_tx.clone();
        debug!(category = %ticket.category(), generation = ticket.generation(), "fetch started");

        tokio::spawn(async move {
            let records = monitor.fetch_history(ticket.category()).await;
            let _ = tx.send(Action::HistoryLoaded { ticket, records });
        });
    }

    fn spawn_purge(&self, confirmation: PurgeConfirmation) {
        let monitor = self.monitor.clone();
        let tx = self.action_tx.clone();
        let category = confirmation.category();

        tokio::spawn(async move {
            let result = match monitor.purge(category, confirmation).await {
                Ok(receipt) => Ok(receipt
                    .message
                    .unwrap_or_else(|| format!("{} history purged", category.label()))),
                Err(e) => {
                    warn!(%category, error = %e, "purge failed");
                    Err(e.to_string())
                }
            };
            let _ = tx.send(Action::PurgeFinished { category, result });
        });
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let [content, status] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

        self.screen.render(frame, content);
        self.render_status_bar(frame, status);

        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(" ● ", Style::default().fg(theme::CYAN)),
            Span::styled(self.monitor.config().url.to_string(), theme::muted()),
        ];

        if let Some((ref n, _)) = self.notification {
            let color = match n.level {
                NotificationLevel::Info => theme::YELLOW,
                NotificationLevel::Success => theme::GREEN,
                NotificationLevel::Error => theme::RED,
            };
            spans.push(Span::styled(" │ ", theme::key_hint()));
            spans.push(Span::styled(n.message.clone(), Style::default().fg(color)));
        }

        if let Some(every) = self.refresh_every {
            spans.push(Span::styled(
                format!(" │ auto {}", humantime::format_duration(every)),
                theme::key_hint(),
            ));
        }

        spans.push(Span::styled(" │ ? help  q quit", theme::key_hint()));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let width = 48u16.min(area.width.saturating_sub(4));
        let height = 17u16.min(area.height.saturating_sub(2));
        let help_area = Rect::new(
            area.x + area.width.saturating_sub(width) / 2,
            area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        );

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default())
            .style(Style::default().bg(theme::BG_DARK));

        let entry = |key: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
                Span::styled(what, theme::key_hint()),
            ])
        };

        let lines = vec![
            Line::from(""),
            entry("1-4", "Select category"),
            entry("Tab", "Next category"),
            entry("a f t", "All / 5 min / 30 min"),
            entry("h w m", "1 hour / 1 week / 1 month"),
            entry("[ ]", "Previous / next window"),
            entry("j k", "Move selection"),
            entry("g G", "First / last row"),
            entry("r", "Refresh"),
            entry("D", "Purge this category"),
            entry("?", "Toggle help"),
            entry("q", "Quit"),
        ];

        frame.render_widget(Clear, help_area);
        frame.render_widget(Paragraph::new(lines).block(block), help_area);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use netwatch_core::{HistoryCategory, MonitorConfig};

    fn app(refresh: Option<Duration>) -> App {
        let config = MonitorConfig::new("http://127.0.0.1:9".parse().unwrap());
        App::new(Monitor::new(config).unwrap(), Selection::default(), refresh)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn q_quits_unless_modal_is_open() {
        let mut app = app(None);
        assert!(matches!(
            app.handle_key_event(key(KeyCode::Char('q'))).unwrap(),
            Some(Action::Quit)
        ));

        app.handle_key_event(KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT))
            .unwrap();
        assert!(app.handle_key_event(key(KeyCode::Char('q'))).unwrap().is_none());

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(
            app.handle_key_event(ctrl_c).unwrap(),
            Some(Action::Quit)
        ));
    }

    #[test]
    fn help_overlay_swallows_screen_keys() {
        let mut app = app(None);
        app.process_action(&Action::ToggleHelp).unwrap();
        assert!(app.help_visible);
        assert!(app.handle_key_event(key(KeyCode::Char('2'))).unwrap().is_none());
        assert!(matches!(
            app.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::ToggleHelp)
        ));
    }

    #[tokio::test]
    async fn failed_purge_posts_error_notification() {
        let mut app = app(None);
        app.process_action(&Action::PurgeFinished {
            category: HistoryCategory::Traffic,
            result: Err("server error (500)".into()),
        })
        .unwrap();

        let (n, _) = app.notification.as_ref().unwrap();
        assert_eq!(n.level, NotificationLevel::Error);
        assert!(n.message.contains("traffic"));
    }

    #[tokio::test]
    async fn tick_triggers_auto_refresh_when_due() {
        let mut app = app(Some(Duration::ZERO));
        app.process_action(&Action::Tick).unwrap();
        assert!(matches!(app.action_rx.try_recv(), Ok(Action::Refresh)));
    }

    #[tokio::test]
    async fn no_auto_refresh_by_default() {
        let mut app = app(None);
        app.process_action(&Action::Tick).unwrap();
        assert!(app.action_rx.try_recv().is_err());
    }
}
