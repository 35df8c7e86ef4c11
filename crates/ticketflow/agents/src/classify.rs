//! Keyword-based ticket classifier

use ticketflow_types::{Ticket, TicketCategory};

use crate::error::AgentResult;
use crate::traits::TicketClassifier;

/// Evidence of a concrete product defect. Defects win over tone: an angry
/// ticket about a broken item is a complaint, not feedback.
const DEFECT_KEYWORDS: &[&str] = &[
    "broken",
    "defect",
    "damaged",
    "missing part",
    "wrong item",
    "not working",
    "doesn't work",
    "does not work",
    "refund",
    "return",
    "exchange",
    "stopped working",
];

/// Markers of a factual or procedural question
const QUESTION_KEYWORDS: &[&str] = &[
    "how do",
    "how to",
    "how can",
    "where is",
    "where can",
    "what is",
    "when will",
    "can i",
    "could you tell",
    "instructions",
];

/// Deterministic classifier routing tickets on keyword evidence.
///
/// Priority order: defect evidence, then question markers, then feedback as
/// the catch-all. Matches are case-insensitive over subject and body.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    fn matches_any(haystack: &str, needles: &[&str]) -> bool {
        needles.iter().any(|k| haystack.contains(k))
    }
}

impl TicketClassifier for KeywordClassifier {
    fn classify(&self, ticket: &Ticket) -> AgentResult<String> {
        let text = format!("{} {}", ticket.subject, ticket.body).to_lowercase();

        let category = if Self::matches_any(&text, DEFECT_KEYWORDS) {
            TicketCategory::ProductComplaint
        } else if Self::matches_any(&text, QUESTION_KEYWORDS) || text.contains('?') {
            TicketCategory::InformationSearch
        } else {
            TicketCategory::Feedback
        };

        Ok(category.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticketflow_types::TicketId;

    fn classify(subject: &str, body: &str) -> String {
        KeywordClassifier::new()
            .classify(&Ticket::new(TicketId::new(1), subject, body))
            .unwrap()
    }

    #[test]
    fn test_defect_beats_question_mark() {
        assert_eq!(
            classify("Broken on arrival", "Can I get a refund?"),
            "product_complaint"
        );
    }

    #[test]
    fn test_questions_route_to_information_search() {
        assert_eq!(
            classify("Setup help", "How do I pair the device with my phone?"),
            "information_search"
        );
        assert_eq!(classify("Quick one", "Is the charger included?"), "information_search");
    }

    #[test]
    fn test_everything_else_is_feedback() {
        assert_eq!(
            classify("Love it", "Really happy with the purchase."),
            "feedback"
        );
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(classify("REFUND NOW", ""), "product_complaint");
    }
}
