//! Main UI rendering and the event loop.

use super::app::{App, MountedView, TabKind};
use super::events::{handle_key_event, Event, EventHandler};
use super::theme::colors;
use super::views;
use super::widgets;
use crate::tasks::TaggedOutcome;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Clear, Paragraph, Tabs},
};
use std::io::{self, stdout};
use std::sync::mpsc::Receiver;

/// Run the TUI application.
pub fn run_tui(app: &mut App, outcomes: &Receiver<TaggedOutcome>) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::default();

    let result = run_loop(app, outcomes, &mut terminal, &events);

    // Restore the terminal even when the loop failed.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    app: &mut App,
    outcomes: &Receiver<TaggedOutcome>,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    events: &EventHandler,
) -> io::Result<()> {
    loop {
        // Drain completed background calls before drawing.
        while let Ok(tagged) = outcomes.try_recv() {
            app.apply(tagged);
        }

        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            Event::Key(key) => handle_key_event(app, key),
            Event::Resize(_, _) | Event::Tick => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Main render function.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    if widgets::too_small(area) {
        widgets::render_too_small(frame, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(10),   // Content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_tabs(frame, chunks[0], app);

    match &app.view {
        MountedView::Submission(state) => views::render_submission(frame, chunks[1], state),
        MountedView::Batch(state) => views::render_batch(frame, chunks[1], state),
        MountedView::Review(state) => views::render_review(frame, chunks[1], state),
        MountedView::Insights(state) => views::render_insights(frame, chunks[1], state),
    }

    render_status_bar(frame, chunks[2], app);
    render_footer(frame, chunks[3], app);

    if app.show_help {
        render_help_overlay(frame, area);
    }
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let scheme = colors();
    let titles: Vec<Line> = TabKind::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            Line::from(vec![
                Span::styled(format!("{}:", i + 1), Style::default().fg(scheme.text_muted)),
                Span::raw(tab.title()),
            ])
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.active_tab.index())
        .highlight_style(Style::default().fg(scheme.primary).bold())
        .block(widgets::bordered_block("siftboard"));
    frame.render_widget(tabs, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &mut App) {
    let scheme = colors();
    // Only the insights view carries a transient status; expiry happens
    // here so a stale message clears on the next draw.
    let message = match &mut app.view {
        MountedView::Insights(state) => state.status.message().map(String::from),
        _ => None,
    };
    let line = match message {
        Some(msg) => Line::styled(format!(" {msg}"), Style::default().fg(scheme.accent).bold()),
        None => Line::raw(""),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let scheme = colors();
    let hints = match app.active_tab {
        TabKind::Submission => "Enter: analyze | Tab: next tab | Ctrl+C: quit",
        TabKind::Batch => {
            "f: pick file | a: analyze | h: history | Tab: next tab | q: quit | ?: help"
        }
        TabKind::Review => {
            "j/k: move | e: remark | l: label | d: delete | p: push | q: quit"
        }
        TabKind::Insights => "r: refresh | j/k: scroll plan | Tab: next tab | q: quit | ?: help",
    };
    let footer = Paragraph::new(Line::styled(
        format!(" {hints}"),
        Style::default().fg(scheme.text_muted),
    ));
    frame.render_widget(footer, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let scheme = colors();
    let width = 62.min(area.width.saturating_sub(4));
    let height = 16.min(area.height.saturating_sub(2));
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::styled("Global", Style::default().fg(scheme.primary).bold()),
        Line::raw("  Tab / Shift+Tab   switch tab"),
        Line::raw("  1-4               jump to tab (outside text entry)"),
        Line::raw("  T                 toggle theme"),
        Line::raw("  q / Ctrl+C        quit"),
        Line::raw(""),
        Line::styled("Tabs", Style::default().fg(scheme.primary).bold()),
        Line::raw("  Submit    type a complaint, Enter to analyze"),
        Line::raw("  Batch     f to pick a file path, a to upload"),
        Line::raw("  Review    correct flagged items, p to push all"),
        Line::raw("  Insights  r to refresh stats and report"),
        Line::raw(""),
        Line::styled("Esc or ? closes this help", Style::default().fg(scheme.text_muted)),
    ];
    let help = Paragraph::new(lines).block(widgets::bordered_block("Help"));
    frame.render_widget(help, popup);
}
