//! Review tab: flagged queue table, correction editor, session counter.

use crate::tui::state::ReviewState;
use crate::tui::theme::colors;
use crate::tui::widgets;
use ratatui::{
    prelude::*,
    widgets::{Cell, Paragraph, Row, Table},
};

pub fn render_review(frame: &mut Frame, area: Rect, state: &ReviewState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(8), Constraint::Length(6)])
        .split(area);

    render_summary(frame, chunks[0], state);
    render_queue(frame, chunks[1], state);
    render_editor(frame, chunks[2], state);
}

fn render_summary(frame: &mut Frame, area: Rect, state: &ReviewState) {
    let scheme = colors();
    let status = if state.pushing {
        Span::styled("pushing...", Style::default().fg(scheme.warning))
    } else if state.loading {
        Span::styled("loading...", Style::default().fg(scheme.text_muted))
    } else {
        Span::raw("")
    };
    let line = Line::from(vec![
        Span::styled("Pending: ", Style::default().fg(scheme.text_muted)),
        Span::styled(
            state.queue.len().to_string(),
            Style::default().fg(scheme.warning).bold(),
        ),
        Span::raw("    "),
        Span::styled("Validated this session: ", Style::default().fg(scheme.text_muted)),
        Span::styled(
            state.validated_session.to_string(),
            Style::default().fg(scheme.success).bold(),
        ),
        Span::raw("    "),
        status,
    ]);
    let paragraph = Paragraph::new(line).block(widgets::bordered_block("Human Review"));
    frame.render_widget(paragraph, area);
}

fn render_queue(frame: &mut Frame, area: Rect, state: &ReviewState) {
    if state.queue.is_empty() {
        let (title, hint) = if state.loading {
            ("Loading queue...", None)
        } else {
            ("Queue is clear", Some("Nothing is waiting for review"))
        };
        widgets::render_empty_state(frame, area, title, hint);
        return;
    }

    let scheme = colors();
    let header = Row::new(["Priority", "Text", "Label", "Remark"])
        .style(Style::default().fg(scheme.primary).bold());

    let text_width = area.width.saturating_sub(44) as usize;
    let rows: Vec<Row> = state
        .queue
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let label = state.label_for(&item.id);
            let remark = state.remark_for(&item.id);
            let row = Row::new(vec![
                Cell::from(widgets::severity_badge(item.priority.label())),
                Cell::from(widgets::truncate_text(&item.text, text_width)),
                Cell::from(if label.is_empty() { "-" } else { label }.to_string()),
                Cell::from(widgets::truncate_text(remark, 18)),
            ]);
            if i == state.selected {
                row.style(Style::default().bg(scheme.selection).fg(Color::Black))
            } else {
                row
            }
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Min(24),
            Constraint::Length(10),
            Constraint::Length(20),
        ],
    )
    .header(header)
    .block(widgets::bordered_block(&format!(
        "Flagged Items ({})",
        state.queue.len()
    )));
    frame.render_widget(table, area);
}

fn render_editor(frame: &mut Frame, area: Rect, state: &ReviewState) {
    let scheme = colors();
    let Some(item) = state.selected_item() else {
        let paragraph = Paragraph::new(Line::styled(
            "p: push all",
            Style::default().fg(scheme.text_muted),
        ))
        .block(widgets::bordered_block(""));
        frame.render_widget(paragraph, area);
        return;
    };

    let remark = state.remark_for(&item.id);
    let mut lines = vec![Line::from(vec![
        Span::styled("Reason: ", Style::default().fg(scheme.text_muted)),
        Span::styled(
            item.reason.clone().unwrap_or_else(|| "(none recorded)".into()),
            Style::default().italic(),
        ),
    ])];
    if state.editing_remark {
        lines.push(Line::from(vec![
            Span::styled("Remark: ", Style::default().fg(scheme.text_muted)),
            Span::raw(format!("{remark}\u{2588}")),
        ]));
        lines.push(Line::styled(
            "Esc: done editing",
            Style::default().fg(scheme.text_muted),
        ));
    } else {
        lines.push(Line::from(vec![
            Span::styled("Remark: ", Style::default().fg(scheme.text_muted)),
            Span::raw(if remark.is_empty() { "(none)" } else { remark }.to_string()),
        ]));
        lines.push(Line::styled(
            "e: edit remark    l: cycle label    d: delete    p: push all",
            Style::default().fg(scheme.text_muted),
        ));
    }

    let paragraph = Paragraph::new(lines).block(widgets::bordered_block("Correction"));
    frame.render_widget(paragraph, area);
}
