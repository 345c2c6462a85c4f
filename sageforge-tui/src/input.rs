//! Keyboard input dispatch — overlays first, then global keys, then the
//! active panel.
//!
//! Every panel except Help carries a text input, so plain characters always
//! edit and panel actions live on Ctrl chords (quit is Ctrl+Q, level cycling
//! Ctrl+L, and so on). Enter is dual-role on the news and sentiment panels:
//! it submits when the input changed since the last request and opens the
//! highlighted detail otherwise.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use sageforge_core::companies;

use crate::app::{AppState, Overlay, Panel, ViewState};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match &app.overlay {
        Overlay::Welcome => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::ArticleDetail(_) | Overlay::SentimentDetail(_) => {
            handle_detail_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys.
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('c') if ctrl => {
            app.running = false;
            return;
        }
        KeyCode::Char('e') if ctrl => {
            app.overlay = Overlay::ErrorHistory;
            app.error_scroll = 0;
            return;
        }
        KeyCode::Tab => {
            app.active_panel = app.active_panel.next();
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        _ => {}
    }

    // 3. Panel-specific keys.
    match app.active_panel {
        Panel::News => handle_news_key(app, key),
        Panel::Simplify => handle_simplify_key(app, key),
        Panel::Sentiment => handle_sentiment_key(app, key),
        Panel::Help => handle_help_key(app, key),
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_detail_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
            app.overlay = Overlay::None;
            app.overlay_scroll = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.overlay_scroll += 1;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.overlay_scroll = app.overlay_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_news_key(app: &mut AppState, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('l') if ctrl => {
            app.news.level = app.news.level.next();
            let label = app.news.level.label();
            app.set_status(format!("Reading level: {label}"));
        }
        KeyCode::Char('t') if ctrl => {
            app.request_trending();
            app.set_status("Loading trending topics...");
        }
        KeyCode::Enter => {
            let unchanged = app.news.query_input.trim() == app.news.last_query;
            if app.news.view == ViewState::Results && unchanged {
                app.open_article_detail();
            } else {
                app.submit_search();
            }
        }
        KeyCode::Down => {
            if !app.news.results.is_empty() && app.news.cursor + 1 < app.news.results.len() {
                app.news.cursor += 1;
            }
        }
        KeyCode::Up => {
            app.news.cursor = app.news.cursor.saturating_sub(1);
        }
        KeyCode::Esc => {
            if app.news.searching {
                app.request_cancel(app.news.req_id);
                app.set_warning("Cancelling search...");
            }
        }
        KeyCode::Backspace => {
            app.news.query_input.pop();
        }
        KeyCode::Char(c) if !ctrl => {
            app.news.query_input.push(c);
        }
        _ => {}
    }
}

fn handle_simplify_key(app: &mut AppState, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('s') if ctrl => {
            app.submit_simplify();
        }
        KeyCode::Char('l') if ctrl => {
            app.simplify.level = app.simplify.level.next();
            let label = app.simplify.level.label();
            app.set_status(format!("Reading level: {label}"));
        }
        KeyCode::Char('x') if ctrl => {
            app.simplify.input.clear();
        }
        KeyCode::Enter => {
            app.simplify.input.push('\n');
        }
        KeyCode::Down => {
            if app.simplify.view == ViewState::Results {
                app.simplify.scroll += 1;
            }
        }
        KeyCode::Up => {
            app.simplify.scroll = app.simplify.scroll.saturating_sub(1);
        }
        KeyCode::Esc => {
            if app.simplify.simplifying {
                app.request_cancel(app.simplify.req_id);
                app.set_warning("Cancelling...");
            }
        }
        KeyCode::Backspace => {
            app.simplify.input.pop();
        }
        KeyCode::Char(c) if !ctrl => {
            app.simplify.input.push(c);
        }
        _ => {}
    }
}

fn handle_sentiment_key(app: &mut AppState, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('d') if ctrl => {
            app.sentiment.date_range = app.sentiment.date_range.next();
            let label = app.sentiment.date_range.label();
            app.set_status(format!("Date range: {label}"));
            app.refresh_sentiment();
        }
        KeyCode::Char('f') if ctrl => {
            app.sentiment.filter = app.sentiment.filter.next();
            app.sentiment.cursor = 0;
            let label = app.sentiment.filter.label();
            app.set_status(format!("Filter: {label}"));
        }
        KeyCode::Char('r') if ctrl => {
            app.refresh_sentiment();
        }
        KeyCode::Enter => {
            if let Some(pick) = app
                .sentiment
                .suggestions
                .get(app.sentiment.suggestion_cursor)
            {
                app.sentiment.input = pick.display();
            }
            let unchanged =
                companies::resolve(&app.sentiment.input) == app.sentiment.company;
            if app.sentiment.view == ViewState::Results
                && unchanged
                && app.sentiment.suggestions.is_empty()
            {
                app.open_sentiment_detail();
            } else {
                app.submit_sentiment();
            }
        }
        KeyCode::Down => {
            if !app.sentiment.suggestions.is_empty() {
                if app.sentiment.suggestion_cursor + 1 < app.sentiment.suggestions.len() {
                    app.sentiment.suggestion_cursor += 1;
                }
            } else {
                let count = app.sentiment.filtered_indices().len();
                if count > 0 && app.sentiment.cursor + 1 < count {
                    app.sentiment.cursor += 1;
                }
            }
        }
        KeyCode::Up => {
            if !app.sentiment.suggestions.is_empty() {
                app.sentiment.suggestion_cursor =
                    app.sentiment.suggestion_cursor.saturating_sub(1);
            } else {
                app.sentiment.cursor = app.sentiment.cursor.saturating_sub(1);
            }
        }
        KeyCode::Esc => {
            if app.sentiment.analyzing {
                app.request_cancel(app.sentiment.req_id);
                app.set_warning("Cancelling...");
            } else {
                app.sentiment.suggestions.clear();
            }
        }
        KeyCode::Backspace => {
            app.sentiment.input.pop();
            app.sentiment.refresh_suggestions();
        }
        KeyCode::Char(c) if !ctrl => {
            app.sentiment.input.push(c);
            app.sentiment.refresh_suggestions();
        }
        _ => {}
    }
}

fn handle_help_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('1') => app.active_panel = Panel::News,
        KeyCode::Char('2') => app.active_panel = Panel::Simplify,
        KeyCode::Char('3') => app.active_panel = Panel::Sentiment,
        KeyCode::Char('e') => {
            app.overlay = Overlay::ErrorHistory;
            app.error_scroll = 0;
        }
        _ => {}
    }
}
