//! Centralized theme and color scheme for the TUI.

use ratatui::prelude::*;
use std::sync::RwLock;

/// Semantic colors for the dashboard.
#[derive(Debug, Clone, Copy)]
pub struct ColorScheme {
    // Sentiment / severity
    pub negative: Color,
    pub positive: Color,
    pub neutral: Color,
    pub high: Color,
    pub medium: Color,
    pub low: Color,

    // UI elements
    pub primary: Color,
    pub accent: Color,
    pub border: Color,
    pub border_focused: Color,
    pub text: Color,
    pub text_muted: Color,
    pub selection: Color,

    // Status
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl ColorScheme {
    const fn dark() -> Self {
        Self {
            negative: Color::Red,
            positive: Color::Green,
            neutral: Color::Blue,
            high: Color::Red,
            medium: Color::Yellow,
            low: Color::Cyan,

            primary: Color::Cyan,
            accent: Color::Magenta,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            text: Color::White,
            text_muted: Color::Gray,
            selection: Color::Cyan,

            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }

    const fn light() -> Self {
        Self {
            negative: Color::Red,
            positive: Color::Green,
            neutral: Color::Blue,
            high: Color::Red,
            medium: Color::Magenta,
            low: Color::Blue,

            primary: Color::Blue,
            accent: Color::Magenta,
            border: Color::Gray,
            border_focused: Color::Blue,
            text: Color::Black,
            text_muted: Color::DarkGray,
            selection: Color::Blue,

            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Available themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::Light,
            _ => Self::Dark,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    #[must_use]
    const fn scheme(self) -> ColorScheme {
        match self {
            Self::Dark => ColorScheme::dark(),
            Self::Light => ColorScheme::light(),
        }
    }
}

static CURRENT_THEME: RwLock<Theme> = RwLock::new(Theme::Dark);

/// Set the active theme.
pub fn set_theme(theme: Theme) {
    if let Ok(mut current) = CURRENT_THEME.write() {
        *current = theme;
    }
}

/// Toggle between dark and light, returning the new theme.
pub fn toggle_theme() -> Theme {
    let mut guard = match CURRENT_THEME.write() {
        Ok(guard) => guard,
        Err(_) => return Theme::Dark,
    };
    *guard = match *guard {
        Theme::Dark => Theme::Light,
        Theme::Light => Theme::Dark,
    };
    *guard
}

/// Colors of the active theme.
#[must_use]
pub fn colors() -> ColorScheme {
    CURRENT_THEME
        .read()
        .map(|theme| theme.scheme())
        .unwrap_or_default()
}

/// Map a sentiment string to its display color: case-insensitive substring
/// match on "negative"/"positive", neutral otherwise.
#[must_use]
pub fn sentiment_color(sentiment: &str) -> Color {
    let scheme = colors();
    let lower = sentiment.to_lowercase();
    if lower.contains("negative") {
        scheme.negative
    } else if lower.contains("positive") {
        scheme.positive
    } else {
        scheme.neutral
    }
}

/// Map a severity string to its display color: case-insensitive substring
/// match on "high"/"medium", low otherwise.
#[must_use]
pub fn severity_color(severity: &str) -> Color {
    let scheme = colors();
    let lower = severity.to_lowercase();
    if lower.contains("high") {
        scheme.high
    } else if lower.contains("medium") {
        scheme.medium
    } else {
        scheme.low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_color_substring_match() {
        set_theme(Theme::Dark);
        assert_eq!(sentiment_color("Strongly Negative"), Color::Red);
        assert_eq!(sentiment_color("positive"), Color::Green);
        assert_eq!(sentiment_color("Mixed"), Color::Blue);
        assert_eq!(sentiment_color(""), Color::Blue);
    }

    #[test]
    fn test_severity_color_substring_match() {
        set_theme(Theme::Dark);
        assert_eq!(severity_color("HIGH"), Color::Red);
        assert_eq!(severity_color("medium-ish"), Color::Yellow);
        assert_eq!(severity_color("whatever"), Color::Cyan);
    }

    #[test]
    fn test_theme_from_name_falls_back_to_dark() {
        assert_eq!(Theme::from_name("light"), Theme::Light);
        assert_eq!(Theme::from_name("solarized"), Theme::Dark);
    }
}
