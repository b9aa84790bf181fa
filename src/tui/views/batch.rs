//! Batch tab: file picker, run list, preview table, and derived metrics.

use crate::tui::state::{BatchState, UploadBanner};
use crate::tui::theme::colors;
use crate::tui::widgets;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Table},
};

pub fn render_batch(frame: &mut Frame, area: Rect, state: &BatchState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(4),
        ])
        .split(area);

    render_picker(frame, chunks[0], state);
    render_banner(frame, chunks[1], state);
    render_preview(frame, chunks[2], state);
    render_metrics(frame, chunks[3], state);

    if state.show_history {
        render_history_overlay(frame, area, state);
    }
}

fn render_picker(frame: &mut Frame, area: Rect, state: &BatchState) {
    let scheme = colors();
    let (text, style) = if state.editing_path {
        (
            format!("{}\u{2588}", state.path_input),
            Style::default().fg(scheme.text),
        )
    } else if let Some(path) = &state.selected_file {
        (
            format!("Selected: {}", path.display()),
            Style::default().fg(scheme.primary),
        )
    } else {
        (
            "Press 'f' to enter a CSV/JSON path".to_string(),
            Style::default().fg(scheme.text_muted),
        )
    };

    let title = if state.processing { "Upload (processing...)" } else { "Upload" };
    let border = if state.editing_path {
        scheme.border_focused
    } else {
        scheme.border
    };
    let paragraph = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(format!(" {title} ")),
    );
    frame.render_widget(paragraph, area);
}

fn render_banner(frame: &mut Frame, area: Rect, state: &BatchState) {
    let scheme = colors();
    let line = match &state.banner {
        Some(UploadBanner::Success(msg)) => {
            Line::styled(msg.clone(), Style::default().fg(scheme.success))
        }
        Some(UploadBanner::Error(msg)) => {
            Line::styled(msg.clone(), Style::default().fg(scheme.error))
        }
        None if state.processing => Line::styled(
            "Uploading and analyzing...",
            Style::default().fg(scheme.warning),
        ),
        None => Line::raw(""),
    };
    let paragraph = Paragraph::new(line).block(widgets::bordered_block(""));
    frame.render_widget(paragraph, area);
}

fn render_preview(frame: &mut Frame, area: Rect, state: &BatchState) {
    let Some(current) = &state.current else {
        widgets::render_empty_state(
            frame,
            area,
            "No batch processed yet",
            Some("Upload a file or wait for the latest batch to load"),
        );
        return;
    };

    let scheme = colors();
    let header = Row::new(["ID", "Text", "Sentiment", "Score", "Tag", "Action"])
        .style(Style::default().fg(scheme.primary).bold());

    let text_width = area.width.saturating_sub(46) as usize;
    let rows: Vec<Row> = current
        .preview
        .iter()
        .skip(state.table_offset)
        .map(|row| {
            Row::new(vec![
                Cell::from(row.id.clone()),
                Cell::from(widgets::truncate_text(&row.text, text_width)),
                Cell::from(widgets::sentiment_badge(&row.sentiment)),
                Cell::from(format!("{}", row.sentiment_score)),
                Cell::from(row.tag.clone()),
                Cell::from(row.action.clone()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Min(20),
            Constraint::Length(10),
            Constraint::Length(6),
            Constraint::Length(12),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .block(widgets::bordered_block(&format!(
        "Preview: {} ({} rows)",
        current.filename,
        current.preview.len()
    )));
    frame.render_widget(table, area);
}

fn render_metrics(frame: &mut Frame, area: Rect, state: &BatchState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let scheme = colors();
    widgets::render_stat_card(
        frame,
        chunks[0],
        "Total Processed",
        &state.total_processed().to_string(),
        scheme.primary,
    );

    let (critical, negative) = state
        .insights
        .as_ref()
        .map_or((0, 0), |i| (i.critical, i.negative));
    widgets::render_stat_card(frame, chunks[1], "Critical", &critical.to_string(), scheme.error);
    widgets::render_stat_card(frame, chunks[2], "Negative", &negative.to_string(), scheme.warning);

    let gauge = Gauge::default()
        .block(widgets::bordered_block("Resolution Rate"))
        .gauge_style(Style::default().fg(scheme.success))
        .ratio(state.resolution_ratio())
        .label(format!("{}%", state.resolution_rate()));
    frame.render_widget(gauge, chunks[3]);
}

fn render_history_overlay(frame: &mut Frame, area: Rect, state: &BatchState) {
    let scheme = colors();
    let width = (area.width * 3 / 4).max(40).min(area.width);
    let height = (state.records.len() as u16 + 4).min(area.height.saturating_sub(2));
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    );
    frame.render_widget(Clear, popup);

    let header = Row::new(["File", "Status", "Items", "Processed"])
        .style(Style::default().fg(scheme.primary).bold());
    let rows: Vec<Row> = state
        .records
        .iter()
        .map(|r| {
            let status_color = if r.status == "completed" {
                scheme.success
            } else {
                scheme.warning
            };
            Row::new(vec![
                Cell::from(r.filename.clone()),
                Cell::from(Span::styled(r.status.clone(), Style::default().fg(status_color))),
                Cell::from(r.items.to_string()),
                Cell::from(r.processed.to_string()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(24),
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(widgets::bordered_block("Batch History (h to close)"));
    frame.render_widget(table, popup);
}
