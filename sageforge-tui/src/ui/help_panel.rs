//! Panel 4 — Help: keyboard shortcuts.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, _app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "Ctrl+Q", "Quit");
    key(&mut lines, "Ctrl+E", "Open error history overlay");
    key(&mut lines, "Esc", "Cancel an in-flight request / close overlay");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 1 — News");
    key(&mut lines, "typing", "Edit the search query");
    key(&mut lines, "Enter", "Search; on unchanged query, open article detail");
    key(&mut lines, "Up / Down", "Move through result cards");
    key(&mut lines, "Ctrl+L", "Cycle reading level (Basic / Detailed / Expert)");
    key(&mut lines, "Ctrl+T", "Reload trending topics");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 2 — Simplify");
    key(&mut lines, "typing / Enter", "Edit the text (Enter inserts a newline)");
    key(&mut lines, "Ctrl+S", "Simplify the text");
    key(&mut lines, "Ctrl+X", "Clear the input");
    key(&mut lines, "Ctrl+L", "Cycle reading level");
    key(&mut lines, "Up / Down", "Scroll the result");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 3 — Sentiment");
    key(&mut lines, "typing", "Edit the company (suggestions from 2+ chars)");
    key(&mut lines, "Up / Down", "Move through suggestions or articles");
    key(&mut lines, "Enter", "Analyze; on unchanged company, open article detail");
    key(&mut lines, "Ctrl+D", "Cycle date range (1d / 3d / 1w / 1m) and refresh");
    key(&mut lines, "Ctrl+F", "Cycle sentiment filter (All / Positive / Negative / Neutral)");
    key(&mut lines, "Ctrl+R", "Refresh the current company");
    lines.push(Line::from(""));

    section(&mut lines, "This panel");
    key(&mut lines, "1 / 2 / 3", "Jump to a panel");
    key(&mut lines, "e", "Open error history overlay");
    key(&mut lines, "q", "Quit");

    let para = Paragraph::new(lines);
    f.render_widget(para, area);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>18}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
