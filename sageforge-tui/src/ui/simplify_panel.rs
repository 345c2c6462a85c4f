//! Panel 2 — Simplify: free-text input with a character counter, then the
//! original/simplified comparison with jargon and insights.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Gauge, Paragraph, Wrap};
use ratatui::Frame;

use sageforge_core::MAX_CUSTOM_TEXT_LEN;

use crate::app::{AppState, ViewState};
use crate::theme;
use crate::ui::news_panel::snippet;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let s = &app.simplify;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(area);

    render_input(f, chunks[0], app);

    match &s.view {
        ViewState::Idle => {
            let hint = Paragraph::new(vec![
                Line::from(Span::styled(
                    "Paste or type financial text above, then Ctrl+S to simplify.",
                    theme::muted(),
                )),
                Line::from(Span::styled(
                    "Enter inserts a newline, Ctrl+X clears, Ctrl+L cycles the level.",
                    theme::muted(),
                )),
            ]);
            f.render_widget(hint, chunks[1]);
        }
        ViewState::Loading { pct, stage } => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
                .split(chunks[1]);
            let gauge = Gauge::default()
                .gauge_style(theme::accent())
                .ratio(f64::from(*pct) / 100.0);
            f.render_widget(gauge, rows[0]);
            f.render_widget(
                Paragraph::new(Span::styled(stage.to_string(), theme::muted())),
                rows[1],
            );
        }
        ViewState::Results => render_result(f, chunks[1], app),
        // A completed simplification always carries a result, so this panel
        // never reaches NoResults.
        ViewState::NoResults => {}
        ViewState::Error => {
            let msg = Paragraph::new(vec![
                Line::from(Span::styled("Simplification failed", theme::negative())),
                Line::from(Span::styled(
                    "Ctrl+S to retry, Ctrl+E for error details.",
                    theme::muted(),
                )),
            ]);
            f.render_widget(msg, chunks[1]);
        }
    }
}

fn render_input(f: &mut Frame, area: Rect, app: &AppState) {
    let s = &app.simplify;
    // Counter matches the validation cap, which is in characters.
    let len = s.input.chars().count();

    let mut lines = vec![Line::from(vec![
        Span::styled("Text to simplify ", theme::accent_bold()),
        Span::styled(
            format!("[Level: {}]", s.level.label()),
            theme::neutral(),
        ),
        Span::styled(
            format!("  {len}/{MAX_CUSTOM_TEXT_LEN}"),
            theme::char_count_style(len, MAX_CUSTOM_TEXT_LEN),
        ),
    ])];

    // Show the tail of the buffer so the typing position stays visible.
    let visible_rows = area.height.saturating_sub(2) as usize;
    let input_lines: Vec<&str> = s.input.lines().collect();
    let start = input_lines.len().saturating_sub(visible_rows);
    for l in &input_lines[start..] {
        lines.push(Line::from(Span::styled(*l, theme::text_secondary())));
    }
    lines.push(Line::from(Span::styled("_", theme::accent())));

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_result(f: &mut Frame, area: Rect, app: &AppState) {
    let s = &app.simplify;
    let Some(result) = &s.result else {
        return;
    };

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled("Complexity: ", theme::muted()),
        Span::styled(
            result.complexity.as_str(),
            theme::complexity_style(&result.complexity),
        ),
        Span::styled("   Jargon terms: ", theme::muted()),
        Span::styled(result.jargon_count.to_string(), theme::accent()),
        Span::styled("   Readability: ", theme::muted()),
        Span::styled(
            format!("{:.0}", result.readability_score),
            theme::readability_style(result.readability_score),
        ),
    ]));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Original", theme::accent_bold())));
    lines.push(Line::from(Span::styled(
        snippet(&result.original_text, 400),
        theme::text_secondary(),
    )));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Simplified", theme::accent_bold())));
    lines.push(Line::from(Span::styled(
        result.simplified_text.as_str(),
        theme::positive(),
    )));
    lines.push(Line::from(""));

    if !result.jargon_detected.is_empty() {
        lines.push(Line::from(Span::styled(
            "Jargon explained",
            theme::accent_bold(),
        )));
        for item in &result.jargon_detected {
            lines.push(Line::from(vec![
                Span::styled(format!("  {}: ", item.display_term()), theme::warning()),
                Span::styled(item.explanation.as_str(), theme::muted()),
            ]));
        }
        lines.push(Line::from(""));
    }

    if !result.insights.is_empty() {
        lines.push(Line::from(Span::styled(
            "Key insights",
            theme::accent_bold(),
        )));
        for insight in &result.insights {
            lines.push(Line::from(vec![
                Span::styled(format!("  {} ", insight.title), theme::accent()),
                Span::styled(insight.description.as_str(), theme::muted()),
            ]));
        }
    }

    let para = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((s.scroll as u16, 0));
    f.render_widget(para, area);
}
