//! App state persistence — JSON save/load across restarts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use sageforge_core::model::{DateRange, Level};

use crate::app::{AppState, Overlay, Panel};

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Serialize, Deserialize)]
pub struct PersistedState {
    pub news_level: Level,
    pub simplify_level: Level,
    pub date_range: DateRange,
    pub active_panel: Panel,
    pub welcome_dismissed: bool,
    pub last_company: String,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            news_level: Level::default(),
            simplify_level: Level::default(),
            date_range: DateRange::default(),
            active_panel: Panel::News,
            welcome_dismissed: false,
            last_company: String::new(),
        }
    }
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract persisted state from AppState.
pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        news_level: app.news.level,
        simplify_level: app.simplify.level,
        date_range: app.sentiment.date_range,
        active_panel: app.active_panel,
        welcome_dismissed: app.overlay != Overlay::Welcome,
        last_company: app.sentiment.company.clone(),
    }
}

/// Apply persisted state to AppState.
pub fn apply(app: &mut AppState, state: PersistedState) {
    app.news.level = state.news_level;
    app.simplify.level = state.simplify_level;
    app.sentiment.date_range = state.date_range;
    app.active_panel = state.active_panel;
    if !state.last_company.is_empty() {
        app.sentiment.input = state.last_company.clone();
        app.sentiment.company = state.last_company;
    }
    if !state.welcome_dismissed {
        app.overlay = Overlay::Welcome;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let dir = std::env::temp_dir().join("sageforge_persist_test");
        let path = dir.join("state.json");

        let state = PersistedState {
            news_level: Level::Expert,
            date_range: DateRange::OneMonth,
            welcome_dismissed: true,
            last_company: "TSLA".into(),
            ..Default::default()
        };

        save(&path, &state).unwrap();
        let loaded = load(&path);

        assert_eq!(loaded.news_level, Level::Expert);
        assert_eq!(loaded.date_range, DateRange::OneMonth);
        assert!(loaded.welcome_dismissed);
        assert_eq!(loaded.last_company, "TSLA");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_returns_defaults() {
        let loaded = load(Path::new("/nonexistent/path/state.json"));
        assert_eq!(loaded.news_level, Level::Basic);
        assert!(!loaded.welcome_dismissed);
        assert!(loaded.last_company.is_empty());
    }

    #[test]
    fn corrupt_file_returns_defaults() {
        let dir = std::env::temp_dir().join("sageforge_persist_corrupt");
        let path = dir.join("state.json");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "not valid json {{{").unwrap();

        let loaded = load(&path);
        assert_eq!(loaded.active_panel, Panel::News);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
