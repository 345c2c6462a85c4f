//! SageForge Core — shared client logic for the news simplifier and sentiment views.
//!
//! This crate contains everything the TUI and CLI share:
//! - Wire/view models for the backend API (articles, simplification, sentiment)
//! - The `NewsBackend` trait and its blocking HTTP implementation
//! - Per-company sentiment aggregation
//! - The static company directory with search suggestions
//! - Backend configuration loading

pub mod client;
pub mod companies;
pub mod config;
pub mod model;
pub mod sentiment;

pub use client::{ApiError, HttpBackend, NewsBackend};
pub use config::BackendConfig;
pub use model::{
    ArticleResult, DateRange, Level, SearchQuery, SearchResponse, SentimentArticle,
    SimplifyResponse, MAX_CUSTOM_TEXT_LEN,
};
pub use sentiment::{Sentiment, SentimentSummary};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything crossing the worker channel is Send.
    #[allow(dead_code)]
    fn assert_send() {
        fn require_send<T: Send>() {}

        require_send::<model::ArticleResult>();
        require_send::<model::SearchResponse>();
        require_send::<model::SimplifyResponse>();
        require_send::<model::SentimentArticle>();
        require_send::<model::SearchQuery>();
        require_send::<sentiment::SentimentSummary>();
        require_send::<client::ApiError>();
        require_send::<Box<dyn client::NewsBackend>>();
    }
}
