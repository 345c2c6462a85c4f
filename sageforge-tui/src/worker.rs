//! Background worker thread — all network I/O runs here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. Every
//! request-scoped command carries a generation id; the main loop drops any
//! response whose id is no longer current, so a superseded request can never
//! overwrite newer state. The cancel token holds the id of the request the
//! user asked to abandon (0 = none), so a cancel aimed at one request never
//! aborts another queued behind it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use sageforge_core::client::{ApiError, NewsBackend};
use sageforge_core::model::{DateRange, Level, SearchQuery};
use sageforge_core::{ArticleResult, SentimentArticle, SimplifyResponse};

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    SearchNews {
        id: u64,
        query: SearchQuery,
    },
    SimplifyText {
        id: u64,
        text: String,
        level: Level,
    },
    FetchCompanyNews {
        id: u64,
        company: String,
        date_range: DateRange,
    },
    LoadTrending,
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug)]
pub enum WorkerResponse {
    Progress {
        id: u64,
        pct: u8,
        stage: &'static str,
    },
    SearchDone {
        id: u64,
        total_found: usize,
        articles: Vec<ArticleResult>,
    },
    SearchFailed {
        id: u64,
        category: &'static str,
        error: String,
    },
    SimplifyDone {
        id: u64,
        result: Box<SimplifyResponse>,
    },
    SimplifyFailed {
        id: u64,
        category: &'static str,
        error: String,
    },
    CompanyNewsDone {
        id: u64,
        articles: Vec<SentimentArticle>,
    },
    CompanyNewsFailed {
        id: u64,
        category: &'static str,
        error: String,
    },
    TrendingLoaded {
        topics: Vec<String>,
    },
    TrendingFailed {
        error: String,
    },
}

const SEARCH_STAGES: [(u8, &str); 3] = [
    (25, "Searching news sources..."),
    (50, "Analyzing financial content..."),
    (75, "Simplifying complex terms..."),
];

const SIMPLIFY_STAGES: [(u8, &str); 3] = [
    (25, "Analyzing text complexity..."),
    (50, "Identifying financial jargon..."),
    (75, "Writing the simpler version..."),
];

const STAGE_PACING: Duration = Duration::from_millis(200);

/// Spawn the background worker thread. The worker owns the backend.
pub fn spawn_worker(
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    cancel: Arc<AtomicU64>,
    backend: Box<dyn NewsBackend>,
) -> JoinHandle<()> {
    thread::Builder::new()
        .name("sageforge-worker".into())
        .spawn(move || {
            worker_loop(rx, tx, cancel, backend);
        })
        .expect("failed to spawn worker thread")
}

fn worker_loop(
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    cancel: Arc<AtomicU64>,
    backend: Box<dyn NewsBackend>,
) {
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(cmd) => handle_command(cmd, backend.as_ref(), &tx, &cancel),
        }
    }
}

fn handle_command(
    cmd: WorkerCommand,
    backend: &dyn NewsBackend,
    tx: &Sender<WorkerResponse>,
    cancel: &Arc<AtomicU64>,
) {
    match cmd {
        WorkerCommand::SearchNews { id, query } => {
            if staged_progress(id, &SEARCH_STAGES, tx, cancel) {
                send_search_failure(id, &ApiError::Cancelled, tx);
                return;
            }
            match backend.search_news(&query) {
                Ok(resp) => {
                    let _ = tx.send(WorkerResponse::Progress {
                        id,
                        pct: 100,
                        stage: "Finalizing results...",
                    });
                    let _ = tx.send(WorkerResponse::SearchDone {
                        id,
                        total_found: resp.total_found,
                        articles: resp.articles,
                    });
                }
                Err(e) => send_search_failure(id, &e, tx),
            }
        }
        WorkerCommand::SimplifyText { id, text, level } => {
            if staged_progress(id, &SIMPLIFY_STAGES, tx, cancel) {
                send_simplify_failure(id, &ApiError::Cancelled, tx);
                return;
            }
            match backend.simplify_text(&text, level) {
                Ok(result) => {
                    let _ = tx.send(WorkerResponse::Progress {
                        id,
                        pct: 100,
                        stage: "Finalizing results...",
                    });
                    let _ = tx.send(WorkerResponse::SimplifyDone {
                        id,
                        result: Box::new(result),
                    });
                }
                Err(e) => send_simplify_failure(id, &e, tx),
            }
        }
        WorkerCommand::FetchCompanyNews {
            id,
            company,
            date_range,
        } => {
            let _ = tx.send(WorkerResponse::Progress {
                id,
                pct: 50,
                stage: "Fetching company news...",
            });
            if cancel.load(Ordering::Relaxed) == id {
                send_company_news_failure(id, &ApiError::Cancelled, tx);
                return;
            }
            match backend.company_news(&company, date_range) {
                Ok(articles) => {
                    let _ = tx.send(WorkerResponse::CompanyNewsDone { id, articles });
                }
                Err(e) => send_company_news_failure(id, &e, tx),
            }
        }
        WorkerCommand::LoadTrending => match backend.trending_topics() {
            Ok(topics) => {
                let _ = tx.send(WorkerResponse::TrendingLoaded { topics });
            }
            Err(e) => {
                let _ = tx.send(WorkerResponse::TrendingFailed {
                    error: e.to_string(),
                });
            }
        },
        WorkerCommand::Shutdown => {} // handled in loop
    }
}

/// Emit the fixed progress steps, pausing between them. Returns true if this
/// request was cancelled before completion.
fn staged_progress(
    id: u64,
    stages: &[(u8, &'static str)],
    tx: &Sender<WorkerResponse>,
    cancel: &Arc<AtomicU64>,
) -> bool {
    for &(pct, stage) in stages {
        if cancel.load(Ordering::Relaxed) == id {
            return true;
        }
        let _ = tx.send(WorkerResponse::Progress { id, pct, stage });
        thread::sleep(STAGE_PACING);
    }
    cancel.load(Ordering::Relaxed) == id
}

/// Error category tag for the TUI's error history.
fn classify(e: &ApiError) -> &'static str {
    match e {
        ApiError::Transport(_) | ApiError::Status { .. } => "network",
        ApiError::Api(_) | ApiError::Decode(_) => "backend",
        ApiError::Cancelled => "cancelled",
        _ => "other",
    }
}

fn send_search_failure(id: u64, e: &ApiError, tx: &Sender<WorkerResponse>) {
    let _ = tx.send(WorkerResponse::SearchFailed {
        id,
        category: classify(e),
        error: e.to_string(),
    });
}

fn send_simplify_failure(id: u64, e: &ApiError, tx: &Sender<WorkerResponse>) {
    let _ = tx.send(WorkerResponse::SimplifyFailed {
        id,
        category: classify(e),
        error: e.to_string(),
    });
}

fn send_company_news_failure(id: u64, e: &ApiError, tx: &Sender<WorkerResponse>) {
    let _ = tx.send(WorkerResponse::CompanyNewsFailed {
        id,
        category: classify(e),
        error: e.to_string(),
    });
}
