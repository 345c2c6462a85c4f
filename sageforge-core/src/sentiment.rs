//! Per-company sentiment aggregation.
//!
//! The backend scores each article with FinBERT; this module folds a result
//! set into the overall view: class counts, the dominant class, a confidence
//! percentage, and the explanatory lines shown next to the badge.

use serde::{Deserialize, Serialize};

use crate::model::SentimentArticle;

/// Article-level sentiment class. Unknown wire values fall back to neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    #[serde(other)]
    Neutral,
}

impl Sentiment {
    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

/// List filter for the sentiment panel: all articles or one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SentimentFilter {
    #[default]
    All,
    Only(Sentiment),
}

impl SentimentFilter {
    pub fn label(self) -> &'static str {
        match self {
            SentimentFilter::All => "All",
            SentimentFilter::Only(s) => s.label(),
        }
    }

    pub fn next(self) -> SentimentFilter {
        match self {
            SentimentFilter::All => SentimentFilter::Only(Sentiment::Positive),
            SentimentFilter::Only(Sentiment::Positive) => {
                SentimentFilter::Only(Sentiment::Negative)
            }
            SentimentFilter::Only(Sentiment::Negative) => {
                SentimentFilter::Only(Sentiment::Neutral)
            }
            SentimentFilter::Only(Sentiment::Neutral) => SentimentFilter::All,
        }
    }

    pub fn admits(self, sentiment: Sentiment) -> bool {
        match self {
            SentimentFilter::All => true,
            SentimentFilter::Only(s) => s == sentiment,
        }
    }
}

/// One explanatory line under the overall badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Factor {
    pub sentiment: Sentiment,
    pub text: String,
    pub note: &'static str,
}

/// Aggregated view of one company's article set.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentSummary {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub dominant: Sentiment,
    /// Share of the dominant class, rounded to whole percent.
    pub confidence_pct: u32,
}

impl SentimentSummary {
    /// Fold a non-empty article set into a summary. Returns `None` for an
    /// empty set — that is the no-data view, not a zero summary.
    pub fn from_articles(articles: &[SentimentArticle]) -> Option<Self> {
        if articles.is_empty() {
            return None;
        }

        let mut positive = 0usize;
        let mut negative = 0usize;
        let mut neutral = 0usize;
        for a in articles {
            match a.sentiment {
                Sentiment::Positive => positive += 1,
                Sentiment::Negative => negative += 1,
                Sentiment::Neutral => neutral += 1,
            }
        }

        // Ties resolve toward the later class in (positive, negative,
        // neutral) order, matching the original aggregation.
        let mut dominant = Sentiment::Positive;
        let mut best = positive;
        for (s, n) in [
            (Sentiment::Negative, negative),
            (Sentiment::Neutral, neutral),
        ] {
            if n >= best {
                dominant = s;
                best = n;
            }
        }

        let total = articles.len();
        let confidence_pct = ((best as f64 / total as f64) * 100.0).round() as u32;

        Some(Self {
            total,
            positive,
            negative,
            neutral,
            dominant,
            confidence_pct,
        })
    }

    pub fn count_of(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    /// The overall reasoning sentence shown under the badge.
    pub fn reasoning(&self) -> String {
        format!(
            "Based on {} recent articles within the selected date range, the overall \
             sentiment is {} with {}% confidence. Scores come from FinBERT, a \
             sentiment model trained on financial news.",
            self.total,
            self.dominant.label().to_lowercase(),
            self.confidence_pct,
        )
    }

    /// One factor line per class that actually occurred.
    pub fn factors(&self) -> Vec<Factor> {
        let mut out = Vec::new();
        if self.positive > 0 {
            out.push(Factor {
                sentiment: Sentiment::Positive,
                text: format!("Strong positive coverage in {} articles", self.positive),
                note: "Sources analyzed with high confidence scores",
            });
        }
        if self.negative > 0 {
            out.push(Factor {
                sentiment: Sentiment::Negative,
                text: format!("Negative sentiment detected in {} articles", self.negative),
                note: "Requires attention and monitoring",
            });
        }
        if self.neutral > 0 {
            out.push(Factor {
                sentiment: Sentiment::Neutral,
                text: format!("Neutral reporting in {} articles", self.neutral),
                note: "Balanced coverage without strong bias",
            });
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(sentiment: Sentiment) -> SentimentArticle {
        SentimentArticle {
            title: "t".into(),
            sentiment,
            ..Default::default()
        }
    }

    #[test]
    fn empty_set_has_no_summary() {
        assert_eq!(SentimentSummary::from_articles(&[]), None);
    }

    #[test]
    fn counts_and_dominant() {
        let articles = vec![
            article(Sentiment::Positive),
            article(Sentiment::Positive),
            article(Sentiment::Negative),
            article(Sentiment::Neutral),
        ];
        let s = SentimentSummary::from_articles(&articles).unwrap();
        assert_eq!((s.positive, s.negative, s.neutral), (2, 1, 1));
        assert_eq!(s.dominant, Sentiment::Positive);
        assert_eq!(s.confidence_pct, 50);
    }

    #[test]
    fn tie_resolves_to_later_class() {
        let articles = vec![article(Sentiment::Positive), article(Sentiment::Negative)];
        let s = SentimentSummary::from_articles(&articles).unwrap();
        assert_eq!(s.dominant, Sentiment::Negative);

        let articles = vec![article(Sentiment::Negative), article(Sentiment::Neutral)];
        let s = SentimentSummary::from_articles(&articles).unwrap();
        assert_eq!(s.dominant, Sentiment::Neutral);
    }

    #[test]
    fn single_class_is_full_confidence() {
        let articles = vec![article(Sentiment::Negative); 3];
        let s = SentimentSummary::from_articles(&articles).unwrap();
        assert_eq!(s.dominant, Sentiment::Negative);
        assert_eq!(s.confidence_pct, 100);
        assert_eq!(s.factors().len(), 1);
        assert_eq!(s.factors()[0].sentiment, Sentiment::Negative);
    }

    #[test]
    fn reasoning_mentions_count_and_class() {
        let articles = vec![article(Sentiment::Positive); 5];
        let s = SentimentSummary::from_articles(&articles).unwrap();
        let r = s.reasoning();
        assert!(r.contains("5 recent articles"));
        assert!(r.contains("positive"));
        assert!(r.contains("100%"));
    }

    #[test]
    fn filter_cycle_and_admit() {
        let f = SentimentFilter::All;
        assert!(f.admits(Sentiment::Neutral));
        let f = f.next();
        assert_eq!(f, SentimentFilter::Only(Sentiment::Positive));
        assert!(!f.admits(Sentiment::Negative));
        assert_eq!(
            f.next().next().next(),
            SentimentFilter::All,
        );
    }
}
