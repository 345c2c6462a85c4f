//! Panel 3 — Sentiment: company search with suggestions, aggregate summary
//! card, filtered article list.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, ViewState};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_header(f, chunks[0], app);

    // Suggestions take priority over the body while typing.
    if !app.sentiment.suggestions.is_empty() {
        render_suggestions(f, chunks[1], app);
        return;
    }

    match &app.sentiment.view {
        ViewState::Idle => {
            let hint = Paragraph::new(vec![
                Line::from(Span::styled(
                    "Type a company name or symbol and press Enter.",
                    theme::muted(),
                )),
                Line::from(Span::styled(
                    "Ctrl+D cycles the date range, Ctrl+F filters by sentiment.",
                    theme::muted(),
                )),
            ]);
            f.render_widget(hint, chunks[1]);
        }
        ViewState::Loading { stage, .. } => {
            let para = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(stage.to_string(), theme::accent())),
            ]);
            f.render_widget(para, chunks[1]);
        }
        ViewState::Results => render_results(f, chunks[1], app),
        ViewState::NoResults => {
            let para = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!(
                        "No recent news for {} in this date range.",
                        app.sentiment.company
                    ),
                    theme::warning(),
                )),
            ]);
            f.render_widget(para, chunks[1]);
        }
        ViewState::Error => {
            let para = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled("Sentiment fetch failed", theme::negative())),
                Line::from(Span::styled(
                    "Ctrl+R to retry, Ctrl+E for error details.",
                    theme::muted(),
                )),
            ]);
            f.render_widget(para, chunks[1]);
        }
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let s = &app.sentiment;
    let lines = vec![
        Line::from(vec![
            Span::styled("Company: ", theme::muted()),
            Span::styled("> ", theme::accent()),
            Span::styled(s.input.as_str(), theme::accent_bold()),
            Span::styled("_", theme::accent()),
        ]),
        Line::from(vec![
            Span::styled(
                format!("[Range: {}]", s.date_range.label()),
                theme::neutral(),
            ),
            Span::styled(
                format!("  [Filter: {}]", s.filter.label()),
                theme::neutral(),
            ),
        ]),
        Line::from(""),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_suggestions(f: &mut Frame, area: Rect, app: &AppState) {
    let s = &app.sentiment;
    let mut lines = vec![Line::from(Span::styled(
        "Suggestions [Up/Down]select [Enter]analyze",
        theme::muted(),
    ))];
    for (i, company) in s.suggestions.iter().enumerate() {
        let style = if i == s.suggestion_cursor {
            theme::cursor_row()
        } else {
            theme::accent()
        };
        lines.push(Line::from(Span::styled(
            format!("  {}", company.display()),
            style,
        )));
    }
    f.render_widget(Paragraph::new(lines), area);
}

fn render_results(f: &mut Frame, area: Rect, app: &AppState) {
    let s = &app.sentiment;
    let mut lines: Vec<Line> = Vec::new();

    if let Some(summary) = &s.summary {
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", s.company), theme::accent_bold()),
            Span::styled(
                format!(" {} ", summary.dominant.label()),
                theme::sentiment_style(summary.dominant),
            ),
            Span::styled(
                format!("  {}% confidence", summary.confidence_pct),
                theme::muted(),
            ),
            Span::styled(
                format!(
                    "  +{} / -{} / ={} of {}",
                    summary.positive, summary.negative, summary.neutral, summary.total
                ),
                theme::muted(),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            summary.reasoning(),
            theme::text_secondary(),
        )));
        for factor in summary.factors() {
            lines.push(Line::from(vec![
                Span::styled("  • ", theme::sentiment_style(factor.sentiment)),
                Span::styled(factor.text, theme::muted()),
                Span::styled(format!("  ({})", factor.note), theme::muted()),
            ]));
        }
        lines.push(Line::from(""));
    }

    let filtered = s.filtered_indices();
    lines.push(Line::from(Span::styled(
        format!(
            "{} of {} articles  [Up/Down]select [Enter]detail",
            filtered.len(),
            s.articles.len()
        ),
        theme::muted(),
    )));

    let header_rows = lines.len();
    let visible = (area.height as usize).saturating_sub(header_rows).max(1);
    let start = s.cursor.saturating_sub(visible.saturating_sub(1));

    for (pos, &idx) in filtered.iter().enumerate().take(start + visible).skip(start) {
        let article = &s.articles[idx];
        let is_cursor = pos == s.cursor;
        let style = if is_cursor {
            theme::cursor_row()
        } else {
            theme::text_secondary()
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", article.sentiment.label()),
                theme::sentiment_style(article.sentiment),
            ),
            Span::styled(format!(" {}", article.confidence_pct()), theme::muted()),
            Span::styled(format!("  {}", article.title), style),
            Span::styled(format!("  ({})", article.source.name), theme::muted()),
        ]));
    }

    f.render_widget(Paragraph::new(lines), area);
}
