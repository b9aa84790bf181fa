//! Shared rendering helpers used across the views.

use crate::tui::theme::{colors, sentiment_color, severity_color};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Centered placeholder for views with nothing to show yet.
pub fn render_empty_state(frame: &mut Frame, area: Rect, title: &str, hint: Option<&str>) {
    let scheme = colors();
    let mut lines = vec![
        Line::raw(""),
        Line::styled(title.to_string(), Style::default().fg(scheme.text_muted)),
    ];
    if let Some(hint) = hint {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            hint.to_string(),
            Style::default().fg(scheme.text_muted).italic(),
        ));
    }
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(bordered_block(""));
    frame.render_widget(paragraph, area);
}

/// A small labeled metric panel ("Total Processed: 1,813").
pub fn render_stat_card(frame: &mut Frame, area: Rect, label: &str, value: &str, accent: Color) {
    let scheme = colors();
    let paragraph = Paragraph::new(vec![
        Line::styled(
            value.to_string(),
            Style::default().fg(accent).bold(),
        ),
        Line::styled(label.to_string(), Style::default().fg(scheme.text_muted)),
    ])
    .alignment(Alignment::Center)
    .block(bordered_block(""));
    frame.render_widget(paragraph, area);
}

/// Standard bordered block with an optional title.
#[must_use]
pub fn bordered_block(title: &str) -> Block<'static> {
    let scheme = colors();
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(scheme.border));
    if !title.is_empty() {
        block = block
            .title(format!(" {title} "))
            .title_style(Style::default().fg(scheme.text).bold());
    }
    block
}

/// Inline badge for a sentiment value.
#[must_use]
pub fn sentiment_badge(sentiment: &str) -> Span<'static> {
    Span::styled(
        format!(" {sentiment} "),
        Style::default().fg(Color::Black).bg(sentiment_color(sentiment)),
    )
}

/// Inline badge for a severity or priority value.
#[must_use]
pub fn severity_badge(severity: &str) -> Span<'static> {
    Span::styled(
        format!(" {severity} "),
        Style::default()
            .fg(Color::Black)
            .bg(severity_color(severity))
            .bold(),
    )
}

/// Truncate to a display width, appending an ellipsis when cut.
#[must_use]
pub fn truncate_text(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let c_width = UnicodeWidthChar::width(c).unwrap_or(0);
        if width + c_width > max_width.saturating_sub(1) {
            break;
        }
        width += c_width;
        out.push(c);
    }
    out.push('\u{2026}');
    out
}

/// Terminals below this size get a resize prompt instead of the dashboard.
pub const MIN_WIDTH: u16 = 80;
pub const MIN_HEIGHT: u16 = 20;

/// True when the terminal is too small to render the dashboard.
#[must_use]
pub const fn too_small(area: Rect) -> bool {
    area.width < MIN_WIDTH || area.height < MIN_HEIGHT
}

/// Full-screen prompt asking for a bigger terminal.
pub fn render_too_small(frame: &mut Frame, area: Rect) {
    let scheme = colors();
    let paragraph = Paragraph::new(vec![
        Line::raw(""),
        Line::styled(
            "Terminal too small",
            Style::default().fg(scheme.warning).bold(),
        ),
        Line::raw(""),
        Line::styled(
            format!(
                "Need at least {MIN_WIDTH}x{MIN_HEIGHT}, have {}x{}",
                area.width, area.height
            ),
            Style::default().fg(scheme.text_muted),
        ),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
