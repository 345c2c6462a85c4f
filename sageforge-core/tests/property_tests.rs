//! Property tests for client-side invariants.
//!
//! Uses proptest to verify:
//! 1. Query validation — whitespace-only input is always rejected, and an
//!    accepted query is always the trimmed input
//! 2. Text cap — the 10,000-character limit is exact
//! 3. Suggestions — every suggestion actually matches the input
//! 4. Sentiment aggregation — counts partition the set and confidence stays
//!    within (0, 100]

use proptest::prelude::*;
use sageforge_core::companies;
use sageforge_core::client::ApiError;
use sageforge_core::model::{
    validate_custom_text, Level, SearchQuery, SentimentArticle, MAX_CUSTOM_TEXT_LEN,
};
use sageforge_core::sentiment::{Sentiment, SentimentSummary};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_whitespace() -> impl Strategy<Value = String> {
    proptest::collection::vec(prop_oneof![Just(' '), Just('\t'), Just('\n')], 0..20)
        .prop_map(|chars| chars.into_iter().collect())
}

fn arb_sentiment() -> impl Strategy<Value = Sentiment> {
    prop_oneof![
        Just(Sentiment::Positive),
        Just(Sentiment::Negative),
        Just(Sentiment::Neutral),
    ]
}

fn arb_articles() -> impl Strategy<Value = Vec<SentimentArticle>> {
    proptest::collection::vec(arb_sentiment(), 1..50).prop_map(|classes| {
        classes
            .into_iter()
            .map(|sentiment| SentimentArticle {
                title: "t".into(),
                sentiment,
                ..Default::default()
            })
            .collect()
    })
}

// ── 1. Query validation ──────────────────────────────────────────────

proptest! {
    /// Whitespace-only queries are always rejected.
    #[test]
    fn whitespace_query_rejected(ws in arb_whitespace()) {
        let rejected = matches!(
            SearchQuery::new(&ws, Level::Basic, None),
            Err(ApiError::EmptyQuery)
        );
        prop_assert!(rejected);
    }

    /// An accepted query equals the trimmed input.
    #[test]
    fn accepted_query_is_trimmed(
        core in "[a-zA-Z0-9 ]{1,40}",
        lead in arb_whitespace(),
        trail in arb_whitespace(),
    ) {
        let raw = format!("{lead}{core}{trail}");
        match SearchQuery::new(&raw, Level::Basic, None) {
            Ok(q) => prop_assert_eq!(q.query, core.trim().to_string()),
            Err(ApiError::EmptyQuery) => prop_assert!(core.trim().is_empty()),
            Err(e) => prop_assert!(false, "unexpected error: {e}"),
        }
    }

    /// The cap is exact and counts characters, not bytes: a multibyte text
    /// of at most MAX chars passes, one char over fails.
    #[test]
    fn text_cap_is_exact(extra in 0usize..100) {
        let text = "₹".repeat(MAX_CUSTOM_TEXT_LEN + extra);
        let result = validate_custom_text(&text);
        if extra == 0 {
            prop_assert!(result.is_ok());
        } else {
            let rejected = matches!(result, Err(ApiError::TextTooLong { .. }));
            prop_assert!(rejected, "oversized text accepted at {} extra chars", extra);
        }
    }
}

// ── 2. Suggestions ───────────────────────────────────────────────────

proptest! {
    /// Every suggestion matches the input on name or symbol.
    #[test]
    fn suggestions_actually_match(input in "[a-zA-Z]{2,8}") {
        let needle = input.to_lowercase();
        for c in companies::suggest(&input) {
            prop_assert!(
                c.name.to_lowercase().contains(&needle)
                    || c.symbol.to_lowercase().contains(&needle)
            );
        }
    }

    /// Inputs under two characters never suggest anything.
    #[test]
    fn short_input_never_suggests(input in "[a-zA-Z]{0,1}") {
        prop_assert!(companies::suggest(&input).is_empty());
    }
}

// ── 3. Sentiment aggregation ─────────────────────────────────────────

proptest! {
    /// Class counts partition the article set, the dominant class holds the
    /// maximum count, and confidence is a valid percentage share.
    #[test]
    fn summary_counts_partition(articles in arb_articles()) {
        let s = SentimentSummary::from_articles(&articles).unwrap();
        prop_assert_eq!(s.positive + s.negative + s.neutral, articles.len());
        prop_assert_eq!(s.total, articles.len());

        let max = s.positive.max(s.negative).max(s.neutral);
        prop_assert_eq!(s.count_of(s.dominant), max);

        prop_assert!(s.confidence_pct >= 1);
        prop_assert!(s.confidence_pct <= 100);
    }
}
