//! Pluggable agents for the Ticketflow pipeline
//!
//! Every judgment call in the pipeline (which branch a ticket belongs to,
//! how a customer feels, what answer to draft, how a notification leaves the
//! system) is behind a trait, so deployments can swap in model-backed or
//! service-backed implementations without touching the workflow steps.
//!
//! The crate ships deterministic fallback implementations:
//!
//! - [`KeywordClassifier`]: routes tickets on keyword evidence
//! - [`KeywordSentimentAnalyzer`]: lexicon-based sentiment
//! - [`TemplateAnswerGenerator`]: drafts answers from knowledge-base excerpts
//! - [`DryRunTransport`] / [`RecordingTransport`]: transports that log or
//!   capture instead of sending
//!
//! The fallbacks are total where the pipeline needs totality: sentiment
//! analysis and answer generation never fail, so a batch is never lost to a
//! single bad ticket.

#![deny(unsafe_code)]

pub mod answer;
pub mod classify;
pub mod error;
pub mod knowledge;
pub mod sentiment;
pub mod transport;
pub mod traits;

pub use answer::TemplateAnswerGenerator;
pub use classify::KeywordClassifier;
pub use error::{AgentError, AgentResult};
pub use knowledge::KnowledgeBase;
pub use sentiment::KeywordSentimentAnalyzer;
pub use transport::{DryRunTransport, RecordingTransport, SentNotification};
pub use traits::{AnswerGenerator, NotificationTransport, SentimentAnalyzer, TicketClassifier};
