//! Wire and view models for the news backend.
//!
//! Everything here is request-scoped: built for one search, replaced wholesale
//! by the next. The response structs mirror the backend JSON exactly; each
//! envelope carries an optional `error` field that the client treats as a
//! failure even when the HTTP status is 2xx.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::client::ApiError;

/// Hard cap on standalone text submitted for simplification.
pub const MAX_CUSTOM_TEXT_LEN: usize = 10_000;

/// Simplification tier understood by the backend.
///
/// Key-term extraction only runs server-side at `Detailed` and `Expert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Basic,
    Detailed,
    Expert,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Basic => "basic",
            Level::Detailed => "detailed",
            Level::Expert => "expert",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Level::Basic => "Basic",
            Level::Detailed => "Detailed",
            Level::Expert => "Expert",
        }
    }

    pub fn next(self) -> Level {
        match self {
            Level::Basic => Level::Detailed,
            Level::Detailed => Level::Expert,
            Level::Expert => Level::Basic,
        }
    }
}

/// Lookback window for news queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateRange {
    #[default]
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "3d")]
    ThreeDays,
    #[serde(rename = "1w")]
    OneWeek,
    #[serde(rename = "1m")]
    OneMonth,
}

impl DateRange {
    pub fn as_str(self) -> &'static str {
        match self {
            DateRange::OneDay => "1d",
            DateRange::ThreeDays => "3d",
            DateRange::OneWeek => "1w",
            DateRange::OneMonth => "1m",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DateRange::OneDay => "Today",
            DateRange::ThreeDays => "3 Days",
            DateRange::OneWeek => "1 Week",
            DateRange::OneMonth => "1 Month",
        }
    }

    pub fn next(self) -> DateRange {
        match self {
            DateRange::OneDay => DateRange::ThreeDays,
            DateRange::ThreeDays => DateRange::OneWeek,
            DateRange::OneWeek => DateRange::OneMonth,
            DateRange::OneMonth => DateRange::OneDay,
        }
    }
}

/// A validated search request. Construct via [`SearchQuery::new`]; an empty
/// or whitespace-only query never reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    pub query: String,
    pub level: Level,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
}

impl SearchQuery {
    pub fn new(
        raw: &str,
        level: Level,
        date_range: Option<DateRange>,
    ) -> Result<Self, ApiError> {
        let query = raw.trim();
        if query.is_empty() {
            return Err(ApiError::EmptyQuery);
        }
        Ok(Self {
            query: query.to_string(),
            level,
            date_range,
        })
    }
}

/// Validate standalone text for the simplify endpoint.
///
/// Returns the trimmed text; empty and oversized inputs are rejected locally.
pub fn validate_custom_text(raw: &str) -> Result<&str, ApiError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ApiError::EmptyText);
    }
    // The cap is in characters, matching the backend's own count.
    let len = text.chars().count();
    if len > MAX_CUSTOM_TEXT_LEN {
        return Err(ApiError::TextTooLong {
            len,
            max: MAX_CUSTOM_TEXT_LEN,
        });
    }
    Ok(text)
}

/// One processed article from `/api/search-news`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleResult {
    pub original: OriginalArticle,
    pub simplified: SimplifiedArticle,
    pub analysis: ArticleAnalysis,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OriginalArticle {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, rename = "publishedAt")]
    pub published_at: String,
    #[serde(default)]
    pub source: String,
}

impl OriginalArticle {
    /// Publish date formatted for display; falls back to the raw string.
    pub fn published_date(&self) -> String {
        DateTime::parse_from_rfc3339(&self.published_at)
            .map(|dt| dt.format("%b %d, %Y").to_string())
            .unwrap_or_else(|_| self.published_at.clone())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimplifiedArticle {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleAnalysis {
    #[serde(default)]
    pub complexity: String,
    #[serde(default)]
    pub jargon_count: usize,
    #[serde(default)]
    pub readability_score: f64,
    #[serde(default)]
    pub jargon_detected: Vec<JargonItem>,
    #[serde(default)]
    pub insights: Vec<Insight>,
}

/// A server-identified financial term with a plain-language explanation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JargonItem {
    pub term: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default = "one")]
    pub count: usize,
}

fn one() -> usize {
    1
}

impl JargonItem {
    /// Display form: `Liquidity (3x)` when the term appears more than once.
    pub fn display_term(&self) -> String {
        if self.count > 1 {
            format!("{} ({}x)", self.term, self.count)
        } else {
            self.term.clone()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Response envelope for `/api/search-news`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total_found: usize,
    #[serde(default)]
    pub articles: Vec<ArticleResult>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response envelope for `/api/simplify-text`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimplifyResponse {
    #[serde(default)]
    pub original_text: String,
    #[serde(default)]
    pub simplified_text: String,
    #[serde(default)]
    pub complexity: String,
    #[serde(default)]
    pub jargon_count: usize,
    #[serde(default)]
    pub readability_score: f64,
    #[serde(default)]
    pub jargon_detected: Vec<JargonItem>,
    #[serde(default)]
    pub insights: Vec<Insight>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response envelope for `/api/trending-topics`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrendingResponse {
    #[serde(default)]
    pub trending_topics: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One article from the per-company sentiment feed (`/api/news`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SentimentArticle {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub source: ArticleSource,
    #[serde(default, rename = "publishedAt")]
    pub published_at: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sentiment: crate::sentiment::Sentiment,
    #[serde(default)]
    pub sentiment_confidence: Option<f64>,
}

impl SentimentArticle {
    pub fn published_date(&self) -> String {
        DateTime::parse_from_rfc3339(&self.published_at)
            .map(|dt| dt.format("%b %d, %Y").to_string())
            .unwrap_or_else(|_| self.published_at.clone())
    }

    /// Confidence formatted as a whole percentage, `N/A` when absent.
    pub fn confidence_pct(&self) -> String {
        match self.sentiment_confidence {
            Some(c) => format!("{:.0}%", c * 100.0),
            None => "N/A".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleSource {
    #[serde(default)]
    pub name: String,
}

/// Response envelope for `/api/news`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyNewsResponse {
    #[serde(default)]
    pub articles: Vec<SentimentArticle>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::Sentiment;

    #[test]
    fn query_trims_and_rejects_empty() {
        let q = SearchQuery::new("  Tesla  ", Level::Basic, None).unwrap();
        assert_eq!(q.query, "Tesla");

        assert!(matches!(
            SearchQuery::new("   ", Level::Basic, None),
            Err(ApiError::EmptyQuery)
        ));
        assert!(matches!(
            SearchQuery::new("", Level::Expert, Some(DateRange::OneWeek)),
            Err(ApiError::EmptyQuery)
        ));
    }

    #[test]
    fn query_serializes_wire_names() {
        let q = SearchQuery::new("rbi rate cut", Level::Detailed, Some(DateRange::OneWeek))
            .unwrap();
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["query"], "rbi rate cut");
        assert_eq!(json["level"], "detailed");
        assert_eq!(json["date_range"], "1w");

        let q = SearchQuery::new("x", Level::Basic, None).unwrap();
        let json = serde_json::to_value(&q).unwrap();
        assert!(json.get("date_range").is_none());
    }

    #[test]
    fn custom_text_cap() {
        assert!(matches!(
            validate_custom_text("  "),
            Err(ApiError::EmptyText)
        ));
        let long = "a".repeat(MAX_CUSTOM_TEXT_LEN + 1);
        assert!(matches!(
            validate_custom_text(&long),
            Err(ApiError::TextTooLong { .. })
        ));
        let exact = "a".repeat(MAX_CUSTOM_TEXT_LEN);
        assert_eq!(validate_custom_text(&exact).unwrap().len(), MAX_CUSTOM_TEXT_LEN);
    }

    #[test]
    fn custom_text_cap_counts_chars_not_bytes() {
        // 9,000 chars of a three-byte rupee sign is 27,000 bytes, well under
        // the character cap.
        let under = "₹".repeat(9_000);
        assert!(under.len() > MAX_CUSTOM_TEXT_LEN);
        assert!(validate_custom_text(&under).is_ok());

        let over = "₹".repeat(MAX_CUSTOM_TEXT_LEN + 1);
        assert!(matches!(
            validate_custom_text(&over),
            Err(ApiError::TextTooLong { len, .. }) if len == MAX_CUSTOM_TEXT_LEN + 1
        ));
    }

    #[test]
    fn search_response_parses_backend_shape() {
        let body = r#"{
            "total_found": 1,
            "articles": [{
                "original": {
                    "title": "RBI cuts repo rate",
                    "description": "The central bank eased policy.",
                    "content": "Full text",
                    "url": "https://example.com/a",
                    "publishedAt": "2026-08-20T09:30:00+00:00",
                    "source": "Economic Times"
                },
                "simplified": {
                    "content": "The RBI made loans cheaper.",
                    "summary": "Loans get cheaper."
                },
                "analysis": {
                    "complexity": "medium",
                    "jargon_count": 2,
                    "readability_score": 64.5,
                    "jargon_detected": [
                        {"term": "repo rate", "explanation": "the rate banks borrow at", "count": 2},
                        {"term": "basis points", "explanation": "hundredths of a percent"}
                    ],
                    "insights": [{"title": "Policy easing", "description": "Rates are falling"}]
                }
            }],
            "query": "rbi",
            "status": "success",
            "ai_powered": true
        }"#;
        let resp: SearchResponse = serde_json::from_str(body).unwrap();
        assert!(resp.error.is_none());
        assert_eq!(resp.total_found, 1);
        let a = &resp.articles[0];
        assert_eq!(a.original.source, "Economic Times");
        assert_eq!(a.original.published_date(), "Aug 20, 2026");
        assert_eq!(a.analysis.jargon_detected[0].display_term(), "repo rate (2x)");
        // count defaults to 1 when the backend omits it
        assert_eq!(a.analysis.jargon_detected[1].count, 1);
        assert_eq!(a.analysis.jargon_detected[1].display_term(), "basis points");
    }

    #[test]
    fn error_envelope_parses() {
        let resp: SearchResponse = serde_json::from_str(r#"{"error": "Query is required"}"#).unwrap();
        assert_eq!(resp.error.as_deref(), Some("Query is required"));
        assert!(resp.articles.is_empty());
    }

    #[test]
    fn sentiment_article_parses_nested_source() {
        let body = r#"{
            "articles": [{
                "title": "Tesla beats delivery estimates",
                "source": {"name": "Reuters"},
                "publishedAt": "2026-08-28T12:00:00+00:00",
                "url": "https://example.com/t",
                "description": "Record quarter.",
                "sentiment": "positive",
                "sentiment_confidence": 0.87
            }]
        }"#;
        let resp: CompanyNewsResponse = serde_json::from_str(body).unwrap();
        let a = &resp.articles[0];
        assert_eq!(a.source.name, "Reuters");
        assert_eq!(a.sentiment, Sentiment::Positive);
        assert_eq!(a.confidence_pct(), "87%");
    }

    #[test]
    fn unknown_sentiment_defaults_to_neutral() {
        let body = r#"{"articles": [{"title": "x", "sentiment": "mixed"}]}"#;
        let resp: CompanyNewsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.articles[0].sentiment, Sentiment::Neutral);
        assert_eq!(resp.articles[0].confidence_pct(), "N/A");
    }

    #[test]
    fn level_and_range_cycle() {
        assert_eq!(Level::Basic.next(), Level::Detailed);
        assert_eq!(Level::Expert.next(), Level::Basic);
        assert_eq!(DateRange::OneMonth.next(), DateRange::OneDay);
        assert_eq!(DateRange::OneDay.as_str(), "1d");
    }

    #[test]
    fn published_date_falls_back_to_raw() {
        let a = OriginalArticle {
            published_at: "yesterday".into(),
            ..Default::default()
        };
        assert_eq!(a.published_date(), "yesterday");
    }
}
