// Browse a synthetic log feed grouped by severity and source, with
// multi-select over individual lines and a copy action on `y`.
use std::borrow::Cow;
use std::io;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Local};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::layout::Constraint;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Cell;
use ratatui::{DefaultTerminal, Frame};

use tui_recordtree::{
    BrowseAction, BrowseEvent, ColumnDef, Identify, LevelDef, RecordTree, RecordTreeState,
    RecordTreeStyle, RecordTreeView, SimpleColumns,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AppAction {
    CopySelected,
}

struct LogLine {
    level: &'static str,
    source: &'static str,
    timestamp: String,
    message: String,
}

impl Identify for LogLine {
    fn timestamp(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.timestamp)
    }

    fn message(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.message)
    }
}

fn by_level(record: &LogLine) -> Option<String> {
    Some(record.level.to_owned())
}

fn by_source(record: &LogLine) -> Option<String> {
    if record.source.is_empty() {
        None
    } else {
        Some(record.source.to_owned())
    }
}

const SEVERITY: &[&str] = &["ERROR", "WARNING", "INFO", "DEBUG"];

fn log_levels() -> [LevelDef<LogLine>; 2] {
    [
        LevelDef::new(by_level).fallback("UNKNOWN").ranked(SEVERITY),
        LevelDef::new(by_source).fallback("SYSTEM"),
    ]
}

fn sample_feed() -> Vec<LogLine> {
    let start = Local::now() - ChronoDuration::minutes(30);
    let entries = [
        ("ERROR", "DatabaseConnector", "connection pool exhausted"),
        ("INFO", "Scheduler", "nightly build started"),
        ("ERROR", "DatabaseConnector", "statement timeout after 30s"),
        ("WARNING", "MaskingPolicy", "policy fallback applied to column ssn"),
        ("INFO", "CsvImporter", "catalog refresh finished"),
        ("DEBUG", "Scheduler", "tick"),
        ("ERROR", "CsvImporter", "malformed row skipped"),
        ("INFO", "Scheduler", "nightly build finished"),
        ("WARNING", "DatabaseConnector", "slow query detected"),
        ("DEBUG", "Scheduler", "tick"),
        ("ERROR", "", "watchdog restarted worker"),
        ("INFO", "MaskingPolicy", "policy cache warmed"),
    ];
    entries
        .iter()
        .enumerate()
        .map(|(i, &(level, source, message))| {
            let at = start + ChronoDuration::minutes(i as i64 * 2);
            LogLine {
                level,
                source,
                timestamp: at.format("%H:%M:%S").to_string(),
                message: message.to_owned(),
            }
        })
        .collect()
}

fn message_label(record: &LogLine) -> Cow<'_, str> {
    Cow::Borrowed(&record.message)
}

fn timestamp_cell(record: &LogLine) -> Cell<'_> {
    Cell::from(record.timestamp.as_str())
}

fn render(
    frame: &mut Frame,
    tree: &RecordTree<LogLine>,
    columns: &SimpleColumns<1, LogLine>,
    state: &mut RecordTreeState,
    style: &RecordTreeStyle<'_>,
) {
    let widget = RecordTreeView::new(tree, message_label, columns, style.clone());
    frame.render_stateful_widget(widget, frame.area(), state);
}

fn run_app(
    mut terminal: DefaultTerminal,
    tree: &RecordTree<LogLine>,
    columns: SimpleColumns<1, LogLine>,
    style: RecordTreeStyle<'_>,
) -> io::Result<Vec<String>> {
    let mut state = RecordTreeState::new();
    let mut copied = Vec::new();

    loop {
        terminal.draw(|frame| render(frame, tree, &columns, &mut state, &style))?;

        if event::poll(Duration::from_millis(200))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    _ => {
                        let event = state.handle_key_with(tree, key, |key| {
                            (key.code == KeyCode::Char('y')).then_some(AppAction::CopySelected)
                        });
                        if let BrowseEvent::Action(BrowseAction::Custom(AppAction::CopySelected)) =
                            event
                        {
                            // Stand-in for the host app's copy-to-clipboard.
                            copied = state
                                .selection()
                                .materialize(tree.records())
                                .iter()
                                .map(|line| {
                                    format!("{} [{}] {}", line.timestamp, line.level, line.message)
                                })
                                .collect();
                        }
                    }
                },
                _ => {}
            }
        }
    }

    Ok(copied)
}

fn main() -> io::Result<()> {
    let tree = RecordTree::build(sample_feed(), &log_levels());

    let columns = SimpleColumns::new(
        Constraint::Fill(1),
        "Message",
        [ColumnDef::new("Time", Constraint::Length(8), timestamp_cell)],
    )
    .header_style(
        Style::default()
            .fg(Color::Rgb(229, 201, 133))
            .add_modifier(Modifier::BOLD),
    );

    let mut style = RecordTreeStyle::default();
    style.branch_style = Style::default()
        .fg(Color::Rgb(136, 192, 208))
        .add_modifier(Modifier::BOLD);
    style.selected_style = Style::default().fg(Color::Rgb(163, 190, 140));
    style.line_style = Style::default().fg(Color::Rgb(86, 98, 120));
    style.highlight_style = Style::default()
        .fg(Color::Rgb(255, 255, 255))
        .bg(Color::Rgb(52, 66, 96))
        .add_modifier(Modifier::BOLD);
    style.title = Some(Line::from(
        "Log browser: Space select, a all, x clear, y copy, q quit",
    ));

    let terminal = ratatui::init();
    let result = run_app(terminal, &tree, columns, style);
    ratatui::restore();

    let copied = result?;
    if !copied.is_empty() {
        println!("copied {} lines:", copied.len());
        for line in copied {
            println!("{line}");
        }
    }
    Ok(())
}
