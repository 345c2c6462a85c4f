//! Backend client trait and structured error types.
//!
//! The `NewsBackend` trait abstracts over the news/sentiment API so the TUI
//! worker and the CLI share one implementation and tests can substitute a
//! mock transport. The HTTP implementation is deliberately simple: one
//! request per operation, an explicit timeout, and no automatic retries —
//! every failure is terminal for that request and the caller resubmits.

use std::time::Duration;

use thiserror::Error;

use crate::config::BackendConfig;
use crate::model::{
    CompanyNewsResponse, DateRange, Level, SearchQuery, SearchResponse, SentimentArticle,
    SimplifyResponse, TrendingResponse,
};

/// Structured error types for backend operations.
///
/// Validation variants are raised locally and never correspond to a network
/// call; the rest map one request's failure mode.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("search query is empty")]
    EmptyQuery,

    #[error("text to simplify is empty")]
    EmptyText,

    #[error("text too long ({len} chars, max {max})")]
    TextTooLong { len: usize, max: usize },

    #[error("network error: {0}")]
    Transport(String),

    #[error("backend returned HTTP {status}")]
    Status { status: u16 },

    #[error("backend error: {0}")]
    Api(String),

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Validation errors are handled locally; everything else crossed the wire.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ApiError::EmptyQuery | ApiError::EmptyText | ApiError::TextTooLong { .. }
        )
    }
}

/// Operations exposed by the news backend.
pub trait NewsBackend: Send {
    /// POST `/api/search-news` — fetch and simplify articles for a query.
    fn search_news(&self, query: &SearchQuery) -> Result<SearchResponse, ApiError>;

    /// POST `/api/simplify-text` — simplify standalone text.
    fn simplify_text(&self, text: &str, level: Level) -> Result<SimplifyResponse, ApiError>;

    /// GET `/api/trending-topics` — suggested search terms.
    fn trending_topics(&self) -> Result<Vec<String>, ApiError>;

    /// GET `/api/news?company=&date_range=` — sentiment-scored company feed.
    fn company_news(
        &self,
        company: &str,
        date_range: DateRange,
    ) -> Result<Vec<SentimentArticle>, ApiError>;
}

/// Blocking HTTP implementation of [`NewsBackend`].
pub struct HttpBackend {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Map a completed response: non-2xx is a failure before any decoding.
    fn check_status(resp: reqwest::blocking::Response) -> Result<reqwest::blocking::Response, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }
        Ok(resp)
    }

    fn transport_err(e: reqwest::Error) -> ApiError {
        ApiError::Transport(e.to_string())
    }
}

impl NewsBackend for HttpBackend {
    fn search_news(&self, query: &SearchQuery) -> Result<SearchResponse, ApiError> {
        let resp = self
            .client
            .post(self.url("/api/search-news"))
            .json(query)
            .send()
            .map_err(Self::transport_err)?;

        let resp: SearchResponse = Self::check_status(resp)?
            .json()
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        if let Some(err) = resp.error {
            return Err(ApiError::Api(err));
        }
        Ok(resp)
    }

    fn simplify_text(&self, text: &str, level: Level) -> Result<SimplifyResponse, ApiError> {
        let body = serde_json::json!({ "text": text, "level": level.as_str() });
        let resp = self
            .client
            .post(self.url("/api/simplify-text"))
            .json(&body)
            .send()
            .map_err(Self::transport_err)?;

        let resp: SimplifyResponse = Self::check_status(resp)?
            .json()
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        if let Some(err) = resp.error {
            return Err(ApiError::Api(err));
        }
        Ok(resp)
    }

    fn trending_topics(&self) -> Result<Vec<String>, ApiError> {
        let resp = self
            .client
            .get(self.url("/api/trending-topics"))
            .send()
            .map_err(Self::transport_err)?;

        let resp: TrendingResponse = Self::check_status(resp)?
            .json()
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        if let Some(err) = resp.error {
            return Err(ApiError::Api(err));
        }
        Ok(resp.trending_topics)
    }

    fn company_news(
        &self,
        company: &str,
        date_range: DateRange,
    ) -> Result<Vec<SentimentArticle>, ApiError> {
        let resp = self
            .client
            .get(self.url("/api/news"))
            .query(&[("company", company), ("date_range", date_range.as_str())])
            .send()
            .map_err(Self::transport_err)?;

        let resp: CompanyNewsResponse = Self::check_status(resp)?
            .json()
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        if let Some(err) = resp.error {
            return Err(ApiError::Api(err));
        }
        Ok(resp.articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_classification() {
        assert!(ApiError::EmptyQuery.is_validation());
        assert!(ApiError::TextTooLong { len: 10_001, max: 10_000 }.is_validation());
        assert!(!ApiError::Status { status: 500 }.is_validation());
        assert!(!ApiError::Transport("refused".into()).is_validation());
    }

    #[test]
    fn base_url_trailing_slash_normalized() {
        let backend = HttpBackend::new(&BackendConfig {
            base_url: "http://localhost:5000/".into(),
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(backend.url("/api/news"), "http://localhost:5000/api/news");
    }

    #[test]
    fn error_display_is_user_presentable() {
        let e = ApiError::TextTooLong { len: 12_000, max: 10_000 };
        assert_eq!(e.to_string(), "text too long (12000 chars, max 10000)");
        let e = ApiError::Status { status: 503 };
        assert_eq!(e.to_string(), "backend returned HTTP 503");
    }
}
