//! History screen: category tabs, window selector, record table, and chart.
//!
//! ┌─ 1 Devices  2 Speed Test  3 Traffic  4 Sessions ───────────────────┐
//! │ a All  f 5 min  t 30 min  [h 1 hour]  w 1 week  m 1 month          │
//! │ ┌─ Speed Test · 12 of 40 records ─────────────────────────────────┐│
//! │ │ Time             Down (Mbps)  Up (Mbps)  Ping (ms)  Total (Mbps)││
//! │ └─────────────────────────────────────────────────────────────────┘│
//! │ ┌─ Chart ─────────────────────────────────────────────────────────┐│
//! │ │  Braille line per projected series                              ││
//! │ └─────────────────────────────────────────────────────────────────┘│
//! │ 1-4 category  r refresh  D purge  j/k move                         │
//! └────────────────────────────────────────────────────────────────────┘

use chrono::{Local, NaiveDateTime};
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Block, BorderType, Borders, Cell, Chart, Clear, Dataset, GraphType, Paragraph, Row,
    Table, TableState, Tabs,
};
use tokio::sync::mpsc::UnboundedSender;

use netwatch_core::display::{amount, stamp, text};
use netwatch_core::{
    ChartData, HistoryCategory, HistoryRecord, HistoryView, PurgeConfirmation, Selection, Series,
    TimeWindow, WindowTable,
};

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::theme;
use crate::widgets::sub_tabs;

/// Hotkey for each window, in `TimeWindow::ALL` order.
const WINDOW_KEYS: [&str; 6] = ["a", "f", "t", "h", "w", "m"];

pub struct HistoryScreen {
    view: HistoryView,
    table_state: TableState,
    purge_prompt: bool,
    purging: bool,
    action_tx: Option<UnboundedSender<Action>>,
}

impl HistoryScreen {
    pub fn new(selection: Selection, windows: WindowTable) -> Self {
        Self {
            view: HistoryView::new(selection, windows),
            table_state: TableState::default(),
            purge_prompt: false,
            purging: false,
            action_tx: None,
        }
    }

    /// Rows are the records inside the current window, not everything fetched.
    fn move_selection(&mut self, delta: isize) {
        let len = self.view.visible(Local::now().naive_local()).len();
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(len - 1);
        self.table_state.select(Some(next));
    }

    fn reset_selection(&mut self) {
        self.table_state.select(None);
    }

    fn window_index(&self) -> usize {
        TimeWindow::ALL
            .iter()
            .position(|&w| w == self.view.selection().window)
            .unwrap_or(0)
    }

    fn step_window(&self, forward: bool) -> TimeWindow {
        let n = TimeWindow::ALL.len();
        let idx = self.window_index();
        let next = if forward { (idx + 1) % n } else { (idx + n - 1) % n };
        TimeWindow::ALL[next]
    }

    fn handle_purge_prompt(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('y' | 'Y') => {
                self.purge_prompt = false;
                let category = self.view.selection().category;
                Some(Action::Purge(PurgeConfirmation::confirm(category)))
            }
            KeyCode::Char('n' | 'N') | KeyCode::Esc => {
                self.purge_prompt = false;
                Some(Action::Notify(Notification::info("Purge cancelled")))
            }
            _ => None,
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render_category_tabs(&self, frame: &mut Frame, area: Rect) {
        let active = self.view.selection().category;
        let titles: Vec<Line> = HistoryCategory::ALL
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let style = if c == active {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(format!(" {} {} ", i + 1, c.label()), style))
            })
            .collect();

        let selected = HistoryCategory::ALL
            .iter()
            .position(|&c| c == active)
            .unwrap_or(0);
        let tabs = Tabs::new(titles)
            .divider(Span::styled("│", theme::muted()))
            .select(selected);
        frame.render_widget(tabs, area);
    }

    fn render_window_tabs(&self, frame: &mut Frame, area: Rect) {
        let options: Vec<(&str, &str)> = WINDOW_KEYS
            .iter()
            .zip(TimeWindow::ALL)
            .map(|(key, w)| (*key, w.label()))
            .collect();
        let line = sub_tabs::render_sub_tabs(&options, self.window_index());
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_table(&self, frame: &mut Frame, area: Rect, visible: &[HistoryRecord]) {
        let category = self.view.selection().category;
        let status = if self.purging {
            " · purging…".to_owned()
        } else if self.view.is_loading() {
            " · loading…".to_owned()
        } else {
            String::new()
        };
        let title = format!(
            " {} · {} of {} records{status} ",
            category.label(),
            visible.len(),
            self.view.records().len()
        );
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        if visible.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let message = if self.view.is_loading() {
                "  Loading…"
            } else {
                "  No records in this window"
            };
            frame.render_widget(Paragraph::new(message).style(theme::muted()), inner);
            return;
        }

        let header = Row::new(
            headers(category)
                .iter()
                .map(|h| Cell::from(*h).style(theme::table_header())),
        );
        let rows: Vec<Row> = visible.iter().map(record_row).collect();

        let table = Table::new(rows, widths(category))
            .header(header)
            .block(block)
            .style(theme::table_row())
            .row_highlight_style(theme::table_selected());

        let mut state = self.table_state;
        if let Some(selected) = state.selected() {
            state.select(Some(selected.min(visible.len() - 1)));
        }
        frame.render_stateful_widget(table, area, &mut state);
    }

    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    fn render_chart(frame: &mut Frame, area: Rect, data: &ChartData) {
        let block = Block::default()
            .title(" Chart ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        if data.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(
                Paragraph::new("  Nothing to chart yet").style(theme::muted()),
                inner,
            );
            return;
        }

        // Datasets borrow their points, so collect them first.
        let points: Vec<Vec<(f64, f64)>> = data.series.iter().map(Series::points).collect();
        let datasets: Vec<Dataset> = data
            .series
            .iter()
            .zip(&points)
            .map(|(series, pts)| {
                Dataset::default()
                    .name(series.label)
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(theme::series(series.color)))
                    .data(pts)
            })
            .collect();

        let x_max = (data.labels.len().saturating_sub(1) as f64).max(1.0);
        let [y_min, y_max] = data.y_bounds();
        let first = data.labels.first().cloned().unwrap_or_default();
        let last = data.labels.last().cloned().unwrap_or_default();

        let chart = Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .bounds([0.0, x_max])
                    .labels([Span::raw(first), Span::raw(last)])
                    .style(theme::muted()),
            )
            .y_axis(
                Axis::default()
                    .bounds([y_min, y_max])
                    .labels([
                        Span::raw(format!("{y_min:.0}")),
                        Span::raw(format!("{:.1}", y_max / 2.0)),
                        Span::raw(format!("{y_max:.1}")),
                    ])
                    .style(theme::muted()),
            );
        frame.render_widget(chart, area);
    }

    fn render_hints(frame: &mut Frame, area: Rect) {
        let hints = Line::from(vec![
            Span::styled("  1-4 ", theme::key_hint_key()),
            Span::styled("category  ", theme::key_hint()),
            Span::styled("[ ] ", theme::key_hint_key()),
            Span::styled("window  ", theme::key_hint()),
            Span::styled("j/k ", theme::key_hint_key()),
            Span::styled("move  ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("refresh  ", theme::key_hint()),
            Span::styled("D ", theme::key_hint_key()),
            Span::styled("purge", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), area);
    }

    fn render_purge_prompt(&self, frame: &mut Frame, area: Rect) {
        let [popup] = Layout::horizontal([Constraint::Length(56)])
            .flex(Flex::Center)
            .areas(area);
        let [popup] = Layout::vertical([Constraint::Length(6)])
            .flex(Flex::Center)
            .areas(popup);

        let category = self.view.selection().category;
        let block = Block::default()
            .title(" Purge history ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_alert());

        let text = vec![
            Line::from(format!(
                " Delete ALL stored {} history?",
                category.label().to_lowercase()
            )),
            Line::from(Span::styled(" This cannot be undone.", theme::offline())),
            Line::from(""),
            Line::from(vec![
                Span::styled(" y ", theme::key_hint_key()),
                Span::styled("delete   ", theme::key_hint()),
                Span::styled("n ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ]),
        ];

        frame.render_widget(Clear, popup);
        frame.render_widget(Paragraph::new(text).block(block), popup);
    }

    fn render_at(&self, frame: &mut Frame, area: Rect, now: NaiveDateTime) {
        let layout = Layout::vertical([
            Constraint::Length(1),      // category tabs
            Constraint::Length(1),      // window selector
            Constraint::Percentage(50), // table
            Constraint::Min(6),         // chart
            Constraint::Length(1),      // hints
        ])
        .split(area);

        let visible = self.view.visible(now);
        let data = netwatch_core::chart(self.view.selection().category, &visible);

        self.render_category_tabs(frame, layout[0]);
        self.render_window_tabs(frame, layout[1]);
        self.render_table(frame, layout[2], &visible);
        Self::render_chart(frame, layout[3], &data);
        Self::render_hints(frame, layout[4]);

        if self.purge_prompt {
            self.render_purge_prompt(frame, area);
        }
    }
}

// ── Per-category table layout ────────────────────────────────────────

fn headers(category: HistoryCategory) -> &'static [&'static str] {
    match category {
        HistoryCategory::Devices => &["IP", "MAC", "Hostname", "Vendor", "Type", "State", "Last Checked"],
        HistoryCategory::Speedtest => &["Time", "Down (Mbps)", "Up (Mbps)", "Ping (ms)", "Total (Mbps)"],
        HistoryCategory::Traffic => &["Time", "Down (MB)", "Up (MB)", "Total (MB)"],
        HistoryCategory::Sessions => &["Started", "Ended", "Down (MB)", "Up (MB)", "Total (MB)"],
    }
}

fn widths(category: HistoryCategory) -> Vec<Constraint> {
    match category {
        HistoryCategory::Devices => vec![
            Constraint::Length(15),
            Constraint::Length(17),
            Constraint::Fill(2),
            Constraint::Fill(2),
            Constraint::Fill(1),
            Constraint::Length(7),
            Constraint::Length(19),
        ],
        HistoryCategory::Speedtest => vec![
            Constraint::Length(26),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(12),
        ],
        HistoryCategory::Traffic => vec![
            Constraint::Length(26),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(12),
        ],
        HistoryCategory::Sessions => vec![
            Constraint::Length(26),
            Constraint::Length(26),
            Constraint::Length(11),
            Constraint::Length(11),
            Constraint::Length(11),
        ],
    }
}

fn record_row(record: &HistoryRecord) -> Row<'static> {
    match record {
        HistoryRecord::Device(d) => {
            let state = if d.online {
                Cell::from("online").style(theme::online())
            } else {
                Cell::from("offline").style(theme::offline())
            };
            Row::new(vec![
                Cell::from(text(d.ip.as_ref())),
                Cell::from(text(d.mac.as_ref())),
                Cell::from(text(d.hostname.as_ref())),
                Cell::from(text(d.vendor.as_ref())),
                Cell::from(text(d.kind.as_ref())),
                state,
                Cell::from(stamp(d.last_checked.as_ref())),
            ])
        }
        HistoryRecord::Speedtest(s) => Row::new(vec![
            stamp(s.taken_at.as_ref()),
            amount(s.download_mbps),
            amount(s.upload_mbps),
            amount(s.ping_ms),
            amount(s.total_mb()),
        ]),
        HistoryRecord::Traffic(t) => Row::new(vec![
            stamp(t.taken_at.as_ref()),
            amount(t.download_mb),
            amount(t.upload_mb),
            amount(t.total_mb()),
        ]),
        HistoryRecord::Session(s) => Row::new(vec![
            stamp(s.started_at.as_ref()),
            stamp(s.ended_at.as_ref()),
            amount(s.download_used_mb),
            amount(s.upload_used_mb),
            amount(s.total_used_mb),
        ]),
    }
}

impl Component for HistoryScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        // Initial load of the starting category.
        action_tx.send(Action::Fetch(self.view.refresh()))?;
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.purge_prompt {
            return Ok(self.handle_purge_prompt(key));
        }

        let action = match key.code {
            KeyCode::Char(c @ '1'..='4') => {
                let idx = usize::from(u8::try_from(c).unwrap_or(b'1') - b'1');
                HistoryCategory::ALL
                    .get(idx)
                    .map(|&category| Action::SelectCategory(category))
            }
            KeyCode::Tab => Some(Action::SelectCategory(
                self.view.selection().category.next(),
            )),
            KeyCode::Char(c @ ('a' | 'f' | 't' | 'h' | 'w' | 'm')) => WINDOW_KEYS
                .iter()
                .position(|k| k.starts_with(c))
                .map(|idx| Action::SelectWindow(TimeWindow::ALL[idx])),
            KeyCode::Char(']') => Some(Action::SelectWindow(self.step_window(true))),
            KeyCode::Char('[') => Some(Action::SelectWindow(self.step_window(false))),
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Char('D') => {
                if !self.purging {
                    self.purge_prompt = true;
                }
                None
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
                None
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.move_selection(isize::MIN);
                None
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.move_selection(isize::MAX);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::SelectCategory(category) => {
                if let Some(ticket) = self.view.select_category(*category) {
                    self.reset_selection();
                    return Ok(Some(Action::Fetch(ticket)));
                }
            }
            Action::SelectWindow(window) => {
                self.view.select_window(*window);
                self.reset_selection();
            }
            Action::Refresh => return Ok(Some(Action::Fetch(self.view.refresh()))),
            Action::HistoryLoaded { ticket, records } => {
                if self.view.apply(*ticket, records.clone()) {
                    self.reset_selection();
                }
            }
            Action::Purge(_) => self.purging = true,
            Action::PurgeFinished { category, result } => {
                self.purging = false;
                if result.is_ok() && *category == self.view.selection().category {
                    return Ok(Some(Action::Fetch(self.view.refresh())));
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        self.render_at(frame, area, Local::now().naive_local());
    }

    fn captures_input(&self) -> bool {
        self.purge_prompt
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use chrono::TimeDelta;
    use netwatch_core::{DeviceRecord, SpeedtestRecord, Stamp, TrafficRecord};
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn screen() -> HistoryScreen {
        HistoryScreen::new(Selection::default(), WindowTable::default())
    }

    fn traffic(at: &str) -> HistoryRecord {
        HistoryRecord::Traffic(TrafficRecord {
            taken_at: Some(Stamp::parse(at)),
            download_mb: Some(2.0),
            upload_mb: Some(3.456),
        })
    }

    fn screen_text(screen: &HistoryScreen, now: NaiveDateTime) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 32)).unwrap();
        terminal
            .draw(|frame| screen.render_at(frame, frame.area(), now))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    fn noon() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2024, 5, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn number_keys_select_categories() {
        let mut s = screen();
        let action = s.handle_key_event(key(KeyCode::Char('3'))).unwrap();
        assert!(matches!(
            action,
            Some(Action::SelectCategory(HistoryCategory::Traffic))
        ));
        assert!(s.handle_key_event(key(KeyCode::Char('9'))).unwrap().is_none());
    }

    #[test]
    fn window_keys_and_stepping() {
        let mut s = screen();
        assert!(matches!(
            s.handle_key_event(key(KeyCode::Char('h'))).unwrap(),
            Some(Action::SelectWindow(TimeWindow::LastHour))
        ));
        assert!(matches!(
            s.handle_key_event(key(KeyCode::Char('['))).unwrap(),
            Some(Action::SelectWindow(TimeWindow::LastMonth))
        ));
    }

    #[test]
    fn category_switch_issues_fetch_and_stale_result_is_dropped() {
        let mut s = screen();
        let Some(Action::Fetch(first)) = s
            .update(&Action::SelectCategory(HistoryCategory::Traffic))
            .unwrap()
        else {
            panic!("expected a fetch");
        };
        let Some(Action::Fetch(second)) = s.update(&Action::Refresh).unwrap() else {
            panic!("expected a fetch");
        };

        s.update(&Action::HistoryLoaded {
            ticket: first,
            records: vec![traffic("2024-05-10 11:00:00")],
        })
        .unwrap();
        assert!(s.view.records().is_empty());

        s.update(&Action::HistoryLoaded {
            ticket: second,
            records: vec![traffic("2024-05-10 11:00:00")],
        })
        .unwrap();
        assert_eq!(s.view.records().len(), 1);
    }

    #[test]
    fn purge_needs_explicit_yes() {
        let mut s = screen();
        assert!(s.handle_key_event(key(KeyCode::Char('D'))).unwrap().is_none());
        assert!(s.captures_input());

        // Other keys are swallowed while the prompt is open.
        assert!(s.handle_key_event(key(KeyCode::Char('2'))).unwrap().is_none());

        let action = s.handle_key_event(key(KeyCode::Char('y'))).unwrap();
        match action {
            Some(Action::Purge(confirmation)) => {
                assert_eq!(confirmation.category(), HistoryCategory::Devices);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(!s.captures_input());
    }

    #[test]
    fn purge_prompt_can_be_declined() {
        let mut s = screen();
        s.handle_key_event(key(KeyCode::Char('D'))).unwrap();
        let action = s.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert!(matches!(action, Some(Action::Notify(_))));
        assert!(!s.captures_input());
    }

    #[test]
    fn successful_purge_of_current_category_refetches() {
        let mut s = screen();
        s.update(&Action::Purge(PurgeConfirmation::confirm(
            HistoryCategory::Devices,
        )))
        .unwrap();
        assert!(s.purging);

        let follow_up = s
            .update(&Action::PurgeFinished {
                category: HistoryCategory::Devices,
                result: Ok("ok".into()),
            })
            .unwrap();
        assert!(matches!(follow_up, Some(Action::Fetch(_))));
        assert!(!s.purging);
    }

    #[test]
    fn renders_filtered_rows_and_chart() {
        let mut s = screen();
        let Some(Action::Fetch(ticket)) = s
            .update(&Action::SelectCategory(HistoryCategory::Traffic))
            .unwrap()
        else {
            panic!("expected a fetch");
        };
        s.update(&Action::SelectWindow(TimeWindow::LastHour)).unwrap();
        s.update(&Action::HistoryLoaded {
            ticket,
            records: vec![traffic("2024-05-10 09:00:00"), traffic("2024-05-10 11:30:00")],
        })
        .unwrap();

        let text = screen_text(&s, noon());
        assert!(text.contains("Traffic · 1 of 2 records"));
        assert!(text.contains("2024-05-10 11:30:00"));
        assert!(!text.contains("2024-05-10 09:00:00"));
        assert!(text.contains("5.46"));
        assert!(text.contains("Total (MB)"));
    }

    #[test]
    fn selection_stays_within_the_window() {
        let mut s = screen();
        let Some(Action::Fetch(ticket)) = s
            .update(&Action::SelectCategory(HistoryCategory::Traffic))
            .unwrap()
        else {
            panic!("expected a fetch");
        };
        s.update(&Action::SelectWindow(TimeWindow::LastHour)).unwrap();

        let now = Local::now().naive_local();
        let ago = |delta: TimeDelta| (now - delta).format("%Y-%m-%d %H:%M:%S").to_string();
        let mut records: Vec<HistoryRecord> = (0..20)
            .map(|i| traffic(&ago(TimeDelta::hours(3) + TimeDelta::minutes(i))))
            .collect();
        records.push(traffic(&ago(TimeDelta::minutes(10))));
        records.push(traffic(&ago(TimeDelta::minutes(5))));
        s.update(&Action::HistoryLoaded { ticket, records }).unwrap();

        s.handle_key_event(key(KeyCode::Char('G'))).unwrap();
        assert_eq!(s.table_state.selected(), Some(1));
        s.handle_key_event(key(KeyCode::Char('k'))).unwrap();
        assert_eq!(s.table_state.selected(), Some(0));
        s.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        s.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        assert_eq!(s.table_state.selected(), Some(1));
    }

    #[test]
    fn speedtest_rows_show_total() {
        let mut s = screen();
        let Some(Action::Fetch(ticket)) = s
            .update(&Action::SelectCategory(HistoryCategory::Speedtest))
            .unwrap()
        else {
            panic!("expected a fetch");
        };
        s.update(&Action::HistoryLoaded {
            ticket,
            records: vec![HistoryRecord::Speedtest(SpeedtestRecord {
                taken_at: Some(Stamp::parse("2024-05-10 11:30:00")),
                download_mbps: Some(93.414),
                upload_mbps: Some(11.2),
                ping_ms: Some(14.0),
            })],
        })
        .unwrap();

        let text = screen_text(&s, noon());
        assert!(text.contains("Total (Mbps)"));
        assert!(text.contains("104.61"));
    }

    #[test]
    fn empty_device_list_renders_placeholder() {
        let mut s = screen();
        let Some(Action::Fetch(ticket)) = s.update(&Action::Refresh).unwrap() else {
            panic!("expected a fetch");
        };
        s.update(&Action::HistoryLoaded {
            ticket,
            records: Vec::<HistoryRecord>::new(),
        })
        .unwrap();
        let text = screen_text(&s, noon());
        assert!(text.contains("No records in this window"));
        assert!(text.contains("Nothing to chart yet"));
    }

    #[test]
    fn device_rows_show_state() {
        let row_count = {
            let mut s = screen();
            let Some(Action::Fetch(ticket)) = s.update(&Action::Refresh).unwrap() else {
                panic!("expected a fetch");
            };
            s.update(&Action::HistoryLoaded {
                ticket,
                records: vec![HistoryRecord::Device(DeviceRecord {
                    ip: Some("192.168.0.10".into()),
                    online: true,
                    ..DeviceRecord::default()
                })],
            })
            .unwrap();
            let text = screen_text(&s, noon());
            assert!(text.contains("192.168.0.10"));
            assert!(text.contains("online"));
            s.view.records().len()
        };
        assert_eq!(row_count, 1);
    }
}
