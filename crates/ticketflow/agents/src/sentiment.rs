//! Lexicon-based sentiment analyzer

use ticketflow_types::Sentiment;

use crate::traits::SentimentAnalyzer;

const POSITIVE_KEYWORDS: &[&str] = &[
    "good", "great", "love", "excellent", "happy", "thanks", "thank", "awesome",
];

const NEGATIVE_KEYWORDS: &[&str] = &[
    "bad",
    "terrible",
    "hate",
    "awful",
    "poor",
    "not working",
    "fail",
    "error",
    "crash",
    "angry",
];

/// Total sentiment analyzer over two small keyword lexicons.
///
/// Positive evidence without negative evidence is `Positive`, the reverse is
/// `Negative`; mixed or absent evidence is `Neutral`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordSentimentAnalyzer;

impl KeywordSentimentAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl SentimentAnalyzer for KeywordSentimentAnalyzer {
    fn analyze(&self, text: &str) -> Sentiment {
        let text = text.to_lowercase();
        let pos = POSITIVE_KEYWORDS.iter().any(|k| text.contains(k));
        let neg = NEGATIVE_KEYWORDS.iter().any(|k| text.contains(k));

        match (pos, neg) {
            (true, false) => Sentiment::Positive,
            (false, true) => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }
}
