//! Insights tab: stats cards, top issues, and the remediation plan.

use crate::tui::state::InsightsState;
use crate::tui::theme::colors;
use crate::tui::widgets;
use ratatui::{
    prelude::*,
    widgets::{Cell, Paragraph, Row, Table, Wrap},
};

pub fn render_insights(frame: &mut Frame, area: Rect, state: &InsightsState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(10)])
        .split(area);

    render_stats_row(frame, chunks[0], state);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    render_top_issues(frame, body[0], state);
    render_plan(frame, body[1], state);
}

fn render_stats_row(frame: &mut Frame, area: Rect, state: &InsightsState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ])
        .split(area);

    let scheme = colors();
    let stats = &state.stats;
    widgets::render_stat_card(
        frame,
        chunks[0],
        "Total Processed",
        &stats.total_processed.to_string(),
        scheme.primary,
    );
    widgets::render_stat_card(
        frame,
        chunks[1],
        "Auto-Resolved",
        &stats.auto_resolved.to_string(),
        scheme.success,
    );
    widgets::render_stat_card(
        frame,
        chunks[2],
        "Human Review",
        &stats.human_review_count.to_string(),
        scheme.warning,
    );
    widgets::render_stat_card(
        frame,
        chunks[3],
        "Critical",
        &stats.critical_count.to_string(),
        scheme.error,
    );
    widgets::render_stat_card(
        frame,
        chunks[4],
        "Growth",
        &stats.growth_rate,
        scheme.accent,
    );
}

fn render_top_issues(frame: &mut Frame, area: Rect, state: &InsightsState) {
    let Some(report) = &state.report else {
        let hint = if state.loading() {
            "Generating report..."
        } else {
            "Press 'r' to refresh"
        };
        widgets::render_empty_state(frame, area, "No report yet", Some(hint));
        return;
    };

    let scheme = colors();
    let header = Row::new(["Issue", "Mentions", "Severity"])
        .style(Style::default().fg(scheme.primary).bold());
    let width = area.width.saturating_sub(24) as usize;
    let rows: Vec<Row> = report
        .top_issues
        .iter()
        .map(|issue| {
            Row::new(vec![
                Cell::from(widgets::truncate_text(&issue.issue, width)),
                Cell::from(issue.count.to_string()),
                Cell::from(widgets::severity_badge(&issue.severity)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [Constraint::Min(16), Constraint::Length(9), Constraint::Length(10)],
    )
    .header(header)
    .block(widgets::bordered_block(&format!(
        "Top Issues ({} mentions)",
        state.issue_mentions()
    )));
    frame.render_widget(table, area);
}

fn render_plan(frame: &mut Frame, area: Rect, state: &InsightsState) {
    let Some(plan) = state.plan_text() else {
        widgets::render_empty_state(frame, area, "No remediation plan", None);
        return;
    };

    let paragraph = Paragraph::new(plan)
        .wrap(Wrap { trim: false })
        .scroll((state.plan_scroll as u16, 0))
        .block(widgets::bordered_block("Remediation Plan"));
    frame.render_widget(paragraph, area);
}
