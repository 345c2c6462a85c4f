//! Overlay widgets — welcome, article detail, sentiment detail, error history.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

/// First-run welcome overlay.
pub fn render_welcome(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 40, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Welcome to SageForge ")
        .title_style(theme::accent_bold());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Getting started:", theme::accent_bold())),
        Line::from(""),
        Line::from(Span::styled(
            "  1. Type a company or topic and press Enter to search the news",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  2. Tab to the Simplify panel to rewrite any financial text",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  3. Tab to the Sentiment panel for a company mood check",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  4. Ctrl+L anywhere with a level cycles Basic / Detailed / Expert",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled("Press any key to dismiss...", theme::neutral())),
    ];

    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let visible_height = inner.height as usize;
    let start = app.error_scroll;
    let end = (start + visible_height).min(app.error_history.len());

    let mut lines: Vec<Line> = Vec::new();
    for i in start..end {
        let err = &app.error_history[i];
        let is_active = i == app.error_scroll;
        let style = if is_active {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", err.timestamp.format("%H:%M:%S")),
                theme::muted(),
            ),
            Span::styled(format!("[{}] ", err.category.label()), theme::warning()),
            Span::styled(&err.message, style),
        ]));

        if !err.context.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(&err.context, theme::muted()),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}

/// Full article detail: original vs simplified plus the analysis sections.
pub fn render_article_detail(f: &mut Frame, area: Rect, app: &AppState, idx: usize) {
    let popup = centered_rect(85, 85, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Article Detail [Esc]close [j/k]scroll ")
        .title_style(theme::accent_bold());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let Some(article) = app.news.results.get(idx) else {
        let text = Paragraph::new(Span::styled("Article not found.", theme::muted()));
        f.render_widget(text, inner);
        return;
    };

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        article.original.title.as_str(),
        theme::accent_bold(),
    )));
    lines.push(Line::from(vec![
        Span::styled(article.original.source.as_str(), theme::muted()),
        Span::styled(
            format!("  {}", article.original.published_date()),
            theme::muted(),
        ),
        Span::styled(
            format!("  [{}]", article.analysis.complexity),
            theme::complexity_style(&article.analysis.complexity),
        ),
        Span::styled(
            format!("  readability {:.0}", article.analysis.readability_score),
            theme::readability_style(article.analysis.readability_score),
        ),
    ]));
    if !article.original.url.is_empty() {
        lines.push(Line::from(Span::styled(
            article.original.url.as_str(),
            theme::muted(),
        )));
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Original", theme::accent_bold())));
    let original = if article.original.content.is_empty() {
        &article.original.description
    } else {
        &article.original.content
    };
    lines.push(Line::from(Span::styled(
        original.as_str(),
        theme::text_secondary(),
    )));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Simplified", theme::accent_bold())));
    lines.push(Line::from(Span::styled(
        article.simplified.content.as_str(),
        theme::positive(),
    )));
    lines.push(Line::from(""));

    if !article.analysis.jargon_detected.is_empty() {
        lines.push(Line::from(Span::styled(
            "Jargon explained",
            theme::accent_bold(),
        )));
        for item in &article.analysis.jargon_detected {
            lines.push(Line::from(vec![
                Span::styled(format!("  {}: ", item.display_term()), theme::warning()),
                Span::styled(item.explanation.as_str(), theme::muted()),
            ]));
        }
        lines.push(Line::from(""));
    }

    if !article.analysis.insights.is_empty() {
        lines.push(Line::from(Span::styled("Key insights", theme::accent_bold())));
        for insight in &article.analysis.insights {
            lines.push(Line::from(vec![
                Span::styled(format!("  {} ", insight.title), theme::accent()),
                Span::styled(insight.description.as_str(), theme::muted()),
            ]));
        }
    }

    let para = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.overlay_scroll as u16, 0));
    f.render_widget(para, inner);
}

/// Sentiment article detail: headline, source, timestamp, score, description.
pub fn render_sentiment_detail(f: &mut Frame, area: Rect, app: &AppState, idx: usize) {
    let popup = centered_rect(70, 60, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Article [Esc]close ")
        .title_style(theme::accent_bold());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let Some(article) = app.sentiment.articles.get(idx) else {
        let text = Paragraph::new(Span::styled("Article not found.", theme::muted()));
        f.render_widget(text, inner);
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        article.title.as_str(),
        theme::accent_bold(),
    )));
    lines.push(Line::from(vec![
        Span::styled(article.source.name.as_str(), theme::muted()),
        Span::styled(format!("  {}", article.published_at), theme::muted()),
    ]));
    lines.push(Line::from(vec![
        Span::styled(
            format!(" {} ", article.sentiment.label()),
            theme::sentiment_style(article.sentiment),
        ),
        Span::styled(
            format!("  confidence {}", article.confidence_pct()),
            theme::muted(),
        ),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        article.description.as_str(),
        theme::text_secondary(),
    )));
    if !article.url.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(article.url.as_str(), theme::muted())));
    }

    let para = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.overlay_scroll as u16, 0));
    f.render_widget(para, inner);
}
