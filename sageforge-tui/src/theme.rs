//! Neon-on-dark style helpers shared by every render module.
//!
//! Palette:
//! - **Accent**: electric cyan (focus, highlights, headers)
//! - **Positive**: neon green (positive sentiment, good readability)
//! - **Negative**: hot pink (negative sentiment, errors)
//! - **Warning**: neon orange (warnings, high complexity)
//! - **Neutral**: cool purple (neutral sentiment, secondary info)
//! - **Muted**: steel blue (hints, disabled, secondary text)

use ratatui::style::{Color, Modifier, Style};

use sageforge_core::Sentiment;

const ACCENT: Color = Color::Rgb(0, 255, 255);
const POSITIVE: Color = Color::Rgb(0, 255, 128);
const NEGATIVE: Color = Color::Rgb(255, 20, 147);
const WARNING: Color = Color::Rgb(255, 140, 0);
const NEUTRAL: Color = Color::Rgb(147, 112, 219);
const MUTED: Color = Color::Rgb(100, 149, 237);
const TEXT_SECONDARY: Color = Color::Rgb(170, 170, 170);

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text_secondary() -> Style {
    Style::default().fg(TEXT_SECONDARY)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Style the cursor row in a list (reversed accent).
pub fn cursor_row() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::REVERSED)
}

pub fn sentiment_style(sentiment: Sentiment) -> Style {
    match sentiment {
        Sentiment::Positive => positive(),
        Sentiment::Negative => negative(),
        Sentiment::Neutral => neutral(),
    }
}

/// Complexity badge color: the backend reports low/medium/high.
pub fn complexity_style(complexity: &str) -> Style {
    match complexity.to_lowercase().as_str() {
        "low" => positive(),
        "medium" => warning(),
        "high" => negative(),
        _ => text_secondary(),
    }
}

/// Readability score color (0-100, higher reads easier).
pub fn readability_style(score: f64) -> Style {
    match score {
        s if s >= 70.0 => positive(),
        s if s >= 40.0 => warning(),
        _ => negative(),
    }
}

/// Color for the simplify character counter as it approaches the cap.
pub fn char_count_style(len: usize, max: usize) -> Style {
    if len > max {
        negative()
    } else if len * 10 >= max * 9 {
        warning()
    } else {
        muted()
    }
}
