//! Submission tab: input box, analysis result panel, recent history.

use crate::api::{Decision, SubmissionRecord};
use crate::tui::state::SubmissionState;
use crate::tui::theme::{colors, sentiment_color, severity_color};
use crate::tui::widgets;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

pub fn render_submission(frame: &mut Frame, area: Rect, state: &SubmissionState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(8), Constraint::Length(9)])
        .split(area);

    render_input(frame, chunks[0], state);
    render_result(frame, chunks[1], state);
    render_history(frame, chunks[2], state);
}

fn render_input(frame: &mut Frame, area: Rect, state: &SubmissionState) {
    let scheme = colors();
    let title = if state.loading {
        "Complaint Text (analyzing...)"
    } else {
        "Complaint Text"
    };
    let input = Paragraph::new(state.input.as_str())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(scheme.border_focused))
                .title(format!(" {title} "))
                .title_style(Style::default().fg(scheme.primary).bold()),
        );
    frame.render_widget(input, area);
}

fn render_result(frame: &mut Frame, area: Rect, state: &SubmissionState) {
    let Some(record) = &state.result else {
        let hint = if state.loading {
            "Waiting for the backend..."
        } else {
            "Press Enter to analyze the text above"
        };
        widgets::render_empty_state(frame, area, "No analysis yet", Some(hint));
        return;
    };

    let scheme = colors();
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Routing: ", Style::default().fg(scheme.text_muted)),
            Span::styled(
                record.routing.decision.label(),
                Style::default().fg(decision_color(record.routing.decision)).bold(),
            ),
            Span::raw("  "),
            Span::styled(
                format!("confidence {:.0}%", record.routing.confidence * 100.0),
                Style::default().fg(scheme.text_muted),
            ),
        ]),
        Line::from(vec![
            Span::styled("Status:  ", Style::default().fg(scheme.text_muted)),
            Span::raw(record.status.clone()),
        ]),
    ];

    if !record.routing.tags.is_empty() {
        let mut spans = vec![Span::styled("Tags:    ", Style::default().fg(scheme.text_muted))];
        for tag in &record.routing.tags {
            spans.push(Span::styled(
                format!(" {tag} "),
                Style::default().fg(Color::Black).bg(scheme.accent),
            ));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }

    if !record.routing.reason.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Reason:  ", Style::default().fg(scheme.text_muted)),
            Span::styled(record.routing.reason.clone(), Style::default().italic()),
        ]));
    }

    if let Some(analysis) = &record.analysis {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Deep Analysis",
            Style::default().fg(scheme.primary).bold(),
        ));
        lines.push(Line::raw(analysis.summary.clone()));
        for aspect in &analysis.aspects {
            let mut spans = vec![
                Span::raw("  \u{2022} "),
                Span::raw(aspect.aspect.clone()),
                Span::raw(": "),
                Span::styled(
                    aspect.sentiment.clone(),
                    Style::default().fg(sentiment_color(&aspect.sentiment)),
                ),
            ];
            if let Some(severity) = &aspect.severity {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(
                    severity.clone(),
                    Style::default().fg(severity_color(severity)).bold(),
                ));
            }
            lines.push(Line::from(spans));
        }
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(widgets::bordered_block("Analysis Result"));
    frame.render_widget(paragraph, area);
}

fn render_history(frame: &mut Frame, area: Rect, state: &SubmissionState) {
    let visible = state.visible_history();
    if visible.is_empty() {
        widgets::render_empty_state(frame, area, "No submissions yet", None);
        return;
    }

    let width = area.width.saturating_sub(14) as usize;
    let items: Vec<ListItem> = visible.iter().map(|r| history_item(r, width)).collect();
    let list = List::new(items).block(widgets::bordered_block(&format!(
        "Recent ({} of {})",
        visible.len(),
        state.history.len()
    )));
    frame.render_widget(list, area);
}

fn history_item(record: &SubmissionRecord, width: usize) -> ListItem<'static> {
    let decision = record.routing.decision;
    let badge = Span::styled(
        format!(" {} ", decision.badge()),
        Style::default().fg(Color::Black).bg(decision_color(decision)),
    );
    ListItem::new(Line::from(vec![
        badge,
        Span::raw(" "),
        Span::raw(widgets::truncate_text(&record.text, width)),
    ]))
}

fn decision_color(decision: Decision) -> Color {
    let scheme = colors();
    match decision {
        Decision::Simple => scheme.success,
        Decision::Complex => scheme.primary,
        Decision::ReviewQueue => scheme.warning,
    }
}
