//! Panel 1 — News: query input, trending topics, result cards.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Gauge, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, ViewState};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_header(f, chunks[0], app);

    let news = &app.news;
    match &news.view {
        ViewState::Idle => render_idle(f, chunks[1], app),
        ViewState::Loading { pct, stage } => render_loading(f, chunks[1], *pct, stage),
        ViewState::Results => render_results(f, chunks[1], app),
        ViewState::NoResults => {
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled("No articles found", theme::warning())),
                Line::from(Span::styled(
                    format!(
                        "Nothing matched \"{}\". Try different keywords.",
                        news.last_query
                    ),
                    theme::muted(),
                )),
            ];
            f.render_widget(Paragraph::new(lines), chunks[1]);
        }
        ViewState::Error => {
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled("Search failed", theme::negative())),
                Line::from(Span::styled(
                    "Press Enter to retry, Ctrl+E for error details.",
                    theme::muted(),
                )),
            ];
            f.render_widget(Paragraph::new(lines), chunks[1]);
        }
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let news = &app.news;
    let mut lines = vec![Line::from(vec![
        Span::styled("Search: ", theme::muted()),
        Span::styled("> ", theme::accent()),
        Span::styled(news.query_input.as_str(), theme::accent_bold()),
        Span::styled("_", theme::accent()),
        Span::styled(
            format!("   [Level: {}]", news.level.label()),
            theme::neutral(),
        ),
    ])];

    if news.trending.is_empty() {
        lines.push(Line::from(Span::styled(
            "Trending: (none loaded, Ctrl+T to retry)",
            theme::muted(),
        )));
    } else {
        let topics = news.trending.join(" · ");
        lines.push(Line::from(vec![
            Span::styled("Trending: ", theme::muted()),
            Span::styled(topics, theme::neutral()),
        ]));
    }
    lines.push(Line::from(""));

    f.render_widget(Paragraph::new(lines), area);
}

fn render_idle(f: &mut Frame, area: Rect, _app: &AppState) {
    let lines = vec![
        Line::from(Span::styled(
            "Type a company, topic, or ticker and press Enter.",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "Ctrl+L cycles the reading level (Basic / Detailed / Expert).",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_loading(f: &mut Frame, area: Rect, pct: u8, stage: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let gauge = Gauge::default()
        .gauge_style(theme::accent())
        .ratio(f64::from(pct) / 100.0);
    f.render_widget(gauge, chunks[0]);
    f.render_widget(
        Paragraph::new(Span::styled(stage.to_string(), theme::muted())),
        chunks[1],
    );
}

fn render_results(f: &mut Frame, area: Rect, app: &AppState) {
    let news = &app.news;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled(
            format!("Results for \"{}\"", news.last_query),
            theme::accent_bold(),
        ),
        Span::styled(
            format!("  {}", results_count(news.results.len(), news.total_found)),
            theme::muted(),
        ),
        Span::styled("  [Up/Down]select [Enter]detail", theme::muted()),
    ]));
    lines.push(Line::from(""));

    // Four lines per card; keep the cursor's card visible.
    let card_height = 4usize;
    let visible = (area.height.saturating_sub(2) as usize / card_height).max(1);
    let start = news.cursor.saturating_sub(visible.saturating_sub(1));
    let end = (start + visible).min(news.results.len());

    for (i, article) in news.results.iter().enumerate().take(end).skip(start) {
        let is_cursor = i == news.cursor;
        let title_style = if is_cursor {
            theme::cursor_row()
        } else {
            theme::accent()
        };

        lines.push(Line::from(Span::styled(
            format!("{}. {}", i + 1, article.original.title),
            title_style,
        )));
        lines.push(Line::from(vec![
            Span::styled(format!("   {}", article.original.source), theme::muted()),
            Span::styled(
                format!("  {}", article.original.published_date()),
                theme::muted(),
            ),
            Span::styled(
                format!("  [{}]", article.analysis.complexity),
                theme::complexity_style(&article.analysis.complexity),
            ),
            Span::styled(
                format!(
                    "  {} jargon terms, readability {:.0}",
                    article.analysis.jargon_count, article.analysis.readability_score
                ),
                theme::readability_style(article.analysis.readability_score),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("   {}", snippet(&article.simplified.summary, 120)),
            theme::text_secondary(),
        )));
        lines.push(Line::from(""));
    }

    f.render_widget(Paragraph::new(lines), area);
}

/// Header count; the backend may find more articles than it returns.
pub(crate) fn results_count(shown: usize, total_found: usize) -> String {
    if total_found > shown {
        format!("showing {shown} of {total_found} articles")
    } else {
        format!("{shown} articles found")
    }
}

/// First `max` characters on one line, ellipsized on a char boundary.
pub(crate) fn snippet(s: &str, max: usize) -> String {
    let one_line = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if one_line.chars().count() <= max {
        one_line
    } else {
        let cut: String = one_line.chars().take(max).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_count_reports_backend_total() {
        assert_eq!(results_count(2, 2), "2 articles found");
        assert_eq!(results_count(5, 12), "showing 5 of 12 articles");
        // A backend that omits the total never claims more than it returned.
        assert_eq!(results_count(3, 0), "3 articles found");
    }

    #[test]
    fn snippet_flattens_and_caps() {
        assert_eq!(snippet("a  b\nc", 10), "a b c");
        let long = "word ".repeat(50);
        let s = snippet(&long, 20);
        assert!(s.ends_with("..."));
        assert_eq!(s.chars().count(), 23);
    }
}
