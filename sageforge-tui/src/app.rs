//! Application state — single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels;
//! `apply_response` folds worker responses back into panel state and is the
//! only place view-state transitions happen after a submit.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use sageforge_core::companies::{self, Company};
use sageforge_core::model::{validate_custom_text, DateRange, Level, SearchQuery};
use sageforge_core::sentiment::SentimentFilter;
use sageforge_core::{ArticleResult, SentimentArticle, SentimentSummary, SimplifyResponse};

use crate::worker::{WorkerCommand, WorkerResponse};

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Panel {
    News,
    Simplify,
    Sentiment,
    Help,
}

impl Panel {
    pub fn index(self) -> usize {
        match self {
            Panel::News => 0,
            Panel::Simplify => 1,
            Panel::Sentiment => 2,
            Panel::Help => 3,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::News),
            1 => Some(Panel::Simplify),
            2 => Some(Panel::Sentiment),
            3 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::News => "News",
            Panel::Simplify => "Simplify",
            Panel::Sentiment => "Sentiment",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % 4).unwrap()
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + 3) % 4).unwrap()
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Backend,
    Cancelled,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Network => "NET",
            ErrorCategory::Backend => "API",
            ErrorCategory::Cancelled => "CXL",
            ErrorCategory::Other => "ERR",
        }
    }

    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "network" => ErrorCategory::Network,
            "backend" => ErrorCategory::Backend,
            "cancelled" => ErrorCategory::Cancelled,
            _ => ErrorCategory::Other,
        }
    }
}

/// Request lifecycle view for a panel. Exactly one is active at a time and
/// transitions happen only on submit and on worker responses.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle,
    Loading { pct: u8, stage: String },
    Results,
    NoResults,
    Error,
}

/// News search panel state.
pub struct NewsPanelState {
    pub query_input: String,
    pub level: Level,
    pub trending: Vec<String>,
    pub results: Vec<ArticleResult>,
    pub total_found: usize,
    pub last_query: String,
    pub view: ViewState,
    pub cursor: usize,
    pub searching: bool,
    pub req_id: u64,
}

impl NewsPanelState {
    fn new() -> Self {
        Self {
            query_input: String::new(),
            level: Level::default(),
            trending: Vec::new(),
            results: Vec::new(),
            total_found: 0,
            last_query: String::new(),
            view: ViewState::Idle,
            cursor: 0,
            searching: false,
            req_id: 0,
        }
    }
}

/// Standalone text simplification panel state.
pub struct SimplifyPanelState {
    pub input: String,
    pub level: Level,
    pub result: Option<SimplifyResponse>,
    pub view: ViewState,
    pub scroll: usize,
    pub simplifying: bool,
    pub req_id: u64,
}

impl SimplifyPanelState {
    fn new() -> Self {
        Self {
            input: String::new(),
            level: Level::default(),
            result: None,
            view: ViewState::Idle,
            scroll: 0,
            simplifying: false,
            req_id: 0,
        }
    }
}

/// Company sentiment panel state.
pub struct SentimentPanelState {
    pub input: String,
    pub suggestions: Vec<&'static Company>,
    pub suggestion_cursor: usize,
    /// Resolved symbol of the last submitted company.
    pub company: String,
    pub date_range: DateRange,
    pub filter: SentimentFilter,
    pub articles: Vec<SentimentArticle>,
    pub summary: Option<SentimentSummary>,
    pub view: ViewState,
    pub cursor: usize,
    pub analyzing: bool,
    pub req_id: u64,
}

impl SentimentPanelState {
    fn new() -> Self {
        Self {
            input: String::new(),
            suggestions: Vec::new(),
            suggestion_cursor: 0,
            company: String::new(),
            date_range: DateRange::default(),
            filter: SentimentFilter::All,
            articles: Vec::new(),
            summary: None,
            view: ViewState::Idle,
            cursor: 0,
            analyzing: false,
            req_id: 0,
        }
    }

    /// Indices into `articles` admitted by the current filter, in order.
    pub fn filtered_indices(&self) -> Vec<usize> {
        self.articles
            .iter()
            .enumerate()
            .filter(|(_, a)| self.filter.admits(a.sentiment))
            .map(|(i, _)| i)
            .collect()
    }

    /// Recompute suggestions after the input changed.
    pub fn refresh_suggestions(&mut self) {
        self.suggestions = companies::suggest(&self.input);
        self.suggestions.truncate(8);
        self.suggestion_cursor = 0;
    }
}

/// Which overlay (if any) is shown on top. Detail indices point into the
/// owning panel's stored articles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Welcome,
    ArticleDetail(usize),
    SentimentDetail(usize),
    ErrorHistory,
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Panel states
    pub news: NewsPanelState,
    pub simplify: SimplifyPanelState,
    pub sentiment: SentimentPanelState,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,
    /// Id of the request the user asked to abandon; 0 means none. Ids are
    /// unique, so a cancel can never hit another panel's request.
    pub cancel: Arc<AtomicU64>,
    request_seq: u64,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
    pub overlay_scroll: usize,

    // Paths
    pub state_path: PathBuf,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        cancel: Arc<AtomicU64>,
        state_path: PathBuf,
    ) -> Self {
        Self {
            active_panel: Panel::News,
            running: true,
            news: NewsPanelState::new(),
            simplify: SimplifyPanelState::new(),
            sentiment: SentimentPanelState::new(),
            worker_tx,
            worker_rx,
            cancel,
            request_seq: 0,
            status_message: None,
            error_history: VecDeque::with_capacity(50),
            error_scroll: 0,
            overlay: Overlay::None,
            overlay_scroll: 0,
            state_path,
        }
    }

    fn next_request_id(&mut self) -> u64 {
        self.request_seq += 1;
        self.request_seq
    }

    /// Ask the worker to abandon one specific request.
    pub fn request_cancel(&self, id: u64) {
        self.cancel.store(id, Ordering::Relaxed);
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > 50 {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    /// Submit the news search. Validation failures stay local; a request
    /// already in flight makes this a no-op.
    pub fn submit_search(&mut self) {
        if self.news.searching {
            return;
        }
        match SearchQuery::new(&self.news.query_input, self.news.level, None) {
            Ok(query) => {
                let id = self.next_request_id();
                self.news.req_id = id;
                self.news.searching = true;
                self.news.last_query = query.query.clone();
                self.news.cursor = 0;
                self.news.view = ViewState::Loading {
                    pct: 0,
                    stage: "Contacting backend...".into(),
                };
                let _ = self.worker_tx.send(WorkerCommand::SearchNews { id, query });
                self.set_status(format!("Searching \"{}\"", self.news.last_query));
            }
            Err(e) => self.set_warning(e.to_string()),
        }
    }

    /// Submit the standalone simplify request.
    pub fn submit_simplify(&mut self) {
        if self.simplify.simplifying {
            return;
        }
        let text = match validate_custom_text(&self.simplify.input) {
            Ok(t) => t.to_string(),
            Err(e) => {
                self.set_warning(e.to_string());
                return;
            }
        };
        let id = self.next_request_id();
        self.simplify.req_id = id;
        self.simplify.simplifying = true;
        self.simplify.view = ViewState::Loading {
            pct: 0,
            stage: "Contacting backend...".into(),
        };
        let level = self.simplify.level;
        let _ = self
            .worker_tx
            .send(WorkerCommand::SimplifyText { id, text, level });
        self.set_status("Simplifying text...");
    }

    /// Submit a company sentiment request from the panel input.
    pub fn submit_sentiment(&mut self) {
        let company = companies::resolve(&self.sentiment.input).to_string();
        if company.is_empty() {
            self.set_warning("Enter a company name or symbol");
            return;
        }
        self.send_sentiment_request(company);
    }

    /// Re-run the sentiment request for the already-selected company, e.g.
    /// after the date range changed.
    pub fn refresh_sentiment(&mut self) {
        let company = self.sentiment.company.clone();
        if company.is_empty() {
            return;
        }
        self.send_sentiment_request(company);
    }

    fn send_sentiment_request(&mut self, company: String) {
        if self.sentiment.analyzing {
            return;
        }
        let id = self.next_request_id();
        self.sentiment.req_id = id;
        self.sentiment.analyzing = true;
        self.sentiment.company = company.clone();
        self.sentiment.cursor = 0;
        self.sentiment.suggestions.clear();
        self.sentiment.view = ViewState::Loading {
            pct: 0,
            stage: "Contacting backend...".into(),
        };
        let date_range = self.sentiment.date_range;
        let _ = self.worker_tx.send(WorkerCommand::FetchCompanyNews {
            id,
            company: company.clone(),
            date_range,
        });
        self.set_status(format!("Analyzing sentiment for {company}"));
    }

    /// Ask the worker for trending topics. Failure is non-fatal.
    pub fn request_trending(&mut self) {
        let _ = self.worker_tx.send(WorkerCommand::LoadTrending);
    }

    /// Open the article detail overlay for the news cursor. Out-of-range is
    /// a no-op.
    pub fn open_article_detail(&mut self) {
        if self.news.cursor < self.news.results.len() {
            self.overlay = Overlay::ArticleDetail(self.news.cursor);
            self.overlay_scroll = 0;
        }
    }

    /// Open the sentiment article detail for the cursor within the filtered
    /// list.
    pub fn open_sentiment_detail(&mut self) {
        let filtered = self.sentiment.filtered_indices();
        if let Some(&idx) = filtered.get(self.sentiment.cursor) {
            self.overlay = Overlay::SentimentDetail(idx);
            self.overlay_scroll = 0;
        }
    }

    /// Fold a worker response into panel state. Responses whose request id
    /// is not the panel's current one are dropped entirely.
    pub fn apply_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::Progress { id, pct, stage } => {
                let view = ViewState::Loading {
                    pct,
                    stage: stage.to_string(),
                };
                if id == self.news.req_id && self.news.searching {
                    self.news.view = view;
                } else if id == self.simplify.req_id && self.simplify.simplifying {
                    self.simplify.view = view;
                } else if id == self.sentiment.req_id && self.sentiment.analyzing {
                    self.sentiment.view = view;
                }
            }
            WorkerResponse::SearchDone {
                id,
                total_found,
                articles,
            } => {
                if id != self.news.req_id || !self.news.searching {
                    return;
                }
                self.news.searching = false;
                self.news.total_found = total_found;
                if articles.is_empty() {
                    self.news.results.clear();
                    self.news.view = ViewState::NoResults;
                    self.set_status(format!(
                        "No articles found for \"{}\"",
                        self.news.last_query
                    ));
                } else {
                    let n = articles.len();
                    self.news.results = articles;
                    self.news.cursor = 0;
                    self.news.view = ViewState::Results;
                    self.set_status(format!("Found {n} articles"));
                }
            }
            WorkerResponse::SearchFailed {
                id,
                category,
                error,
            } => {
                if id != self.news.req_id || !self.news.searching {
                    return;
                }
                self.news.searching = false;
                self.news.view = ViewState::Error;
                self.push_error(
                    ErrorCategory::from_tag(category),
                    error,
                    format!("search \"{}\"", self.news.last_query),
                );
            }
            WorkerResponse::SimplifyDone { id, result } => {
                if id != self.simplify.req_id || !self.simplify.simplifying {
                    return;
                }
                self.simplify.simplifying = false;
                self.simplify.result = Some(*result);
                self.simplify.scroll = 0;
                self.simplify.view = ViewState::Results;
                self.set_status("Text simplified");
            }
            WorkerResponse::SimplifyFailed {
                id,
                category,
                error,
            } => {
                if id != self.simplify.req_id || !self.simplify.simplifying {
                    return;
                }
                self.simplify.simplifying = false;
                self.simplify.view = ViewState::Error;
                self.push_error(
                    ErrorCategory::from_tag(category),
                    error,
                    "simplify text".into(),
                );
            }
            WorkerResponse::CompanyNewsDone { id, articles } => {
                if id != self.sentiment.req_id || !self.sentiment.analyzing {
                    return;
                }
                self.sentiment.analyzing = false;
                self.sentiment.summary = SentimentSummary::from_articles(&articles);
                if articles.is_empty() {
                    self.sentiment.articles.clear();
                    self.sentiment.view = ViewState::NoResults;
                    self.set_status(format!("No recent news for {}", self.sentiment.company));
                } else {
                    let n = articles.len();
                    self.sentiment.articles = articles;
                    self.sentiment.cursor = 0;
                    self.sentiment.view = ViewState::Results;
                    self.set_status(format!("{n} articles for {}", self.sentiment.company));
                }
            }
            WorkerResponse::CompanyNewsFailed {
                id,
                category,
                error,
            } => {
                if id != self.sentiment.req_id || !self.sentiment.analyzing {
                    return;
                }
                self.sentiment.analyzing = false;
                self.sentiment.view = ViewState::Error;
                let company = self.sentiment.company.clone();
                self.push_error(
                    ErrorCategory::from_tag(category),
                    error,
                    format!("sentiment {company}"),
                );
            }
            WorkerResponse::TrendingLoaded { topics } => {
                self.news.trending = topics;
                self.news.trending.truncate(8);
            }
            WorkerResponse::TrendingFailed { error } => {
                self.set_warning(format!("Trending topics unavailable: {error}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::{self, TryRecvError};

    use sageforge_core::Sentiment;

    fn test_app() -> (AppState, Receiver<WorkerCommand>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (_resp_tx, resp_rx) = mpsc::channel();
        let cancel = Arc::new(AtomicU64::new(0));
        let app = AppState::new(cmd_tx, resp_rx, cancel, PathBuf::from("."));
        (app, cmd_rx)
    }

    fn article(title: &str) -> ArticleResult {
        let mut a = ArticleResult::default();
        a.original.title = title.to_string();
        a
    }

    #[test]
    fn panel_cycle() {
        assert_eq!(Panel::News.next(), Panel::Simplify);
        assert_eq!(Panel::Help.next(), Panel::News);
        assert_eq!(Panel::News.prev(), Panel::Help);
        for i in 0..4 {
            assert_eq!(Panel::from_index(i).unwrap().index(), i);
        }
        assert!(Panel::from_index(4).is_none());
    }

    #[test]
    fn empty_query_sends_nothing() {
        let (mut app, cmd_rx) = test_app();
        app.news.query_input = "   ".into();
        app.submit_search();

        assert!(matches!(cmd_rx.try_recv(), Err(TryRecvError::Empty)));
        assert_eq!(app.news.view, ViewState::Idle);
        assert!(!app.news.searching);
        assert!(matches!(
            app.status_message,
            Some((_, StatusLevel::Warning))
        ));
    }

    #[test]
    fn second_submit_while_in_flight_is_dropped() {
        let (mut app, cmd_rx) = test_app();
        app.news.query_input = "Tesla".into();
        app.submit_search();
        app.submit_search();

        assert!(cmd_rx.try_recv().is_ok());
        assert!(matches!(cmd_rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn oversized_text_sends_nothing() {
        let (mut app, cmd_rx) = test_app();
        app.simplify.input = "x".repeat(10_001);
        app.submit_simplify();

        assert!(matches!(cmd_rx.try_recv(), Err(TryRecvError::Empty)));
        assert_eq!(app.simplify.view, ViewState::Idle);
        assert!(matches!(
            app.status_message,
            Some((_, StatusLevel::Warning))
        ));
    }

    #[test]
    fn empty_simplify_sets_validation_message() {
        let (mut app, cmd_rx) = test_app();
        app.submit_simplify();

        assert!(matches!(cmd_rx.try_recv(), Err(TryRecvError::Empty)));
        let (msg, level) = app.status_message.clone().unwrap();
        assert_eq!(level, StatusLevel::Warning);
        assert!(msg.contains("empty"));
    }

    #[test]
    fn empty_search_result_is_no_results() {
        let (mut app, _cmd_rx) = test_app();
        app.news.query_input = "Tesla".into();
        app.submit_search();
        let id = app.news.req_id;

        app.apply_response(WorkerResponse::SearchDone {
            id,
            total_found: 0,
            articles: vec![],
        });

        assert_eq!(app.news.view, ViewState::NoResults);
        assert!(!app.news.searching);
        assert!(app.news.results.is_empty());
    }

    #[test]
    fn search_results_stored_wholesale_in_order() {
        let (mut app, _cmd_rx) = test_app();
        app.news.query_input = "Tesla".into();
        app.submit_search();
        let id = app.news.req_id;

        app.apply_response(WorkerResponse::SearchDone {
            id,
            total_found: 2,
            articles: vec![article("first"), article("second")],
        });

        assert_eq!(app.news.view, ViewState::Results);
        assert_eq!(app.news.results.len(), 2);
        assert_eq!(app.news.results[0].original.title, "first");
        assert_eq!(app.news.results[1].original.title, "second");
        assert_eq!(app.news.cursor, 0);
        assert_eq!(app.news.last_query, "Tesla");
    }

    #[test]
    fn simplify_done_is_always_results() {
        let (mut app, _cmd_rx) = test_app();
        app.simplify.input = "EBITDA margin expanded".into();
        app.submit_simplify();
        let id = app.simplify.req_id;

        // Even an empty payload is a result, never NoResults.
        app.apply_response(WorkerResponse::SimplifyDone {
            id,
            result: Box::new(SimplifyResponse::default()),
        });

        assert_eq!(app.simplify.view, ViewState::Results);
        assert!(!app.simplify.simplifying);
        assert!(app.simplify.result.is_some());
    }

    #[test]
    fn stale_response_is_ignored() {
        let (mut app, _cmd_rx) = test_app();
        app.news.query_input = "Tesla".into();
        app.submit_search();
        let stale_id = app.news.req_id;

        // A newer request supersedes the first.
        app.news.searching = false;
        app.news.query_input = "Nvidia".into();
        app.submit_search();

        app.apply_response(WorkerResponse::SearchDone {
            id: stale_id,
            total_found: 1,
            articles: vec![article("old news")],
        });

        // Still loading the newer request; the stale payload never landed.
        assert!(app.news.searching);
        assert!(app.news.results.is_empty());
        assert!(matches!(app.news.view, ViewState::Loading { .. }));
    }

    #[test]
    fn search_failure_records_exactly_one_error() {
        let (mut app, _cmd_rx) = test_app();
        app.news.query_input = "Tesla".into();
        app.submit_search();
        let id = app.news.req_id;

        app.apply_response(WorkerResponse::SearchFailed {
            id,
            category: "network",
            error: "network error: connection refused".into(),
        });

        assert_eq!(app.news.view, ViewState::Error);
        assert!(!app.news.searching);
        assert_eq!(app.error_history.len(), 1);
        assert_eq!(app.error_history[0].category, ErrorCategory::Network);
        assert!(app.error_history[0].context.contains("Tesla"));
    }

    #[test]
    fn open_detail_out_of_range_is_noop() {
        let (mut app, _cmd_rx) = test_app();
        app.news.cursor = 3;
        app.open_article_detail();
        assert_eq!(app.overlay, Overlay::None);

        app.news.results = vec![article("only one")];
        app.news.cursor = 0;
        app.open_article_detail();
        assert_eq!(app.overlay, Overlay::ArticleDetail(0));
    }

    #[test]
    fn sentiment_detail_respects_filter() {
        let (mut app, _cmd_rx) = test_app();
        let mk = |s: Sentiment| SentimentArticle {
            sentiment: s,
            ..Default::default()
        };
        app.sentiment.articles = vec![
            mk(Sentiment::Neutral),
            mk(Sentiment::Positive),
            mk(Sentiment::Positive),
        ];
        app.sentiment.filter = SentimentFilter::Only(Sentiment::Positive);
        app.sentiment.cursor = 1;

        app.open_sentiment_detail();
        // Second positive article is index 2 of the unfiltered list.
        assert_eq!(app.overlay, Overlay::SentimentDetail(2));
    }

    #[test]
    fn sentiment_success_aggregates_summary() {
        let (mut app, _cmd_rx) = test_app();
        app.sentiment.input = "Tesla (TSLA)".into();
        app.submit_sentiment();
        assert_eq!(app.sentiment.company, "TSLA");
        let id = app.sentiment.req_id;

        app.apply_response(WorkerResponse::CompanyNewsDone {
            id,
            articles: vec![
                SentimentArticle {
                    sentiment: Sentiment::Positive,
                    ..Default::default()
                },
                SentimentArticle {
                    sentiment: Sentiment::Positive,
                    ..Default::default()
                },
                SentimentArticle {
                    sentiment: Sentiment::Negative,
                    ..Default::default()
                },
            ],
        });

        assert_eq!(app.sentiment.view, ViewState::Results);
        let summary = app.sentiment.summary.as_ref().unwrap();
        assert_eq!(summary.positive, 2);
        assert_eq!(summary.dominant, Sentiment::Positive);
    }

    #[test]
    fn trending_failure_is_status_only() {
        let (mut app, _cmd_rx) = test_app();
        app.apply_response(WorkerResponse::TrendingFailed {
            error: "backend returned HTTP 503".into(),
        });
        assert!(app.error_history.is_empty());
        assert!(matches!(
            app.status_message,
            Some((_, StatusLevel::Warning))
        ));
    }

    #[test]
    fn error_history_caps_at_50() {
        let (mut app, _cmd_rx) = test_app();
        for i in 0..60 {
            app.push_error(ErrorCategory::Other, format!("error {i}"), String::new());
        }
        assert_eq!(app.error_history.len(), 50);
        assert!(app.error_history[0].message.contains("59"));
    }
}
