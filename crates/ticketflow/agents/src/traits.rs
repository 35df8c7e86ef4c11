//! Agent trait seams
//!
//! All traits are `Send + Sync` so agents can be shared behind `Arc` by the
//! step graph.

use ticketflow_types::{Sentiment, Ticket};

use crate::error::AgentResult;

/// Assigns a raw category label to a ticket.
///
/// The label is a free-form string on purpose: a model-backed classifier may
/// emit padding or odd casing. The categorize step normalizes and parses the
/// label; anything unrecognized leaves the ticket uncategorized.
pub trait TicketClassifier: Send + Sync {
    fn classify(&self, ticket: &Ticket) -> AgentResult<String>;
}

/// Judges the sentiment of a piece of customer text. Total by contract:
/// every input maps to one of the three labels.
pub trait SentimentAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> Sentiment;
}

/// Drafts an answer to a customer question given knowledge-base context
pub trait AnswerGenerator: Send + Sync {
    fn generate(&self, context: &str, question: &str) -> AgentResult<String>;
}

/// Delivers a notification and reports whether the send went through.
///
/// Total by contract: delivery failure is data (`false`), not an error, so
/// one bounced address never aborts a batch.
pub trait NotificationTransport: Send + Sync {
    fn send(&self, subject: &str, body: &str, to: &str) -> bool;
}
