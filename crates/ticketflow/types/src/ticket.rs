//! Tickets and their classification labels
//!
//! A ticket is immutable except for the fields below that are each assigned
//! once by exactly one step: `category` (categorization), `sentiment` and
//! `feedback_type` (feedback branch), `validated` (human review), `sent`
//! (notification dispatch).

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ── Identifiers ──────────────────────────────────────────────────────

/// Unique identifier for a ticket within a batch
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TicketId(pub u64);

impl TicketId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TicketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Classification labels ────────────────────────────────────────────

/// The category assigned to a ticket by the categorization step
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketCategory {
    /// The user asks for information or how-to guidance
    InformationSearch,
    /// The user expresses an opinion about the product or service
    Feedback,
    /// The user reports a concrete product defect or order problem
    ProductComplaint,
}

impl TicketCategory {
    /// The wire label used by classifiers and routing
    pub const fn as_str(&self) -> &'static str {
        match self {
            TicketCategory::InformationSearch => "information_search",
            TicketCategory::Feedback => "feedback",
            TicketCategory::ProductComplaint => "product_complaint",
        }
    }
}

impl std::fmt::Display for TicketCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TicketCategory {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "information_search" => Ok(TicketCategory::InformationSearch),
            "feedback" => Ok(TicketCategory::Feedback),
            "product_complaint" => Ok(TicketCategory::ProductComplaint),
            other => Err(UnknownLabel(other.to_string())),
        }
    }
}

/// A sentiment label. Sentiment analysis is total: every input maps to
/// exactly one of these three labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            other => Err(UnknownLabel(other.to_string())),
        }
    }
}

/// Error produced when parsing an unrecognized classification label
#[derive(Debug, thiserror::Error)]
#[error("unrecognized label: {0}")]
pub struct UnknownLabel(pub String);

// ── Ticket ───────────────────────────────────────────────────────────

/// A support ticket.
///
/// `subject` and `body` default to empty on deserialization so that minimal
/// operator-supplied records (`{"id": 3}`) are accepted by the resume-value
/// normalization; missing display fields are resolved against the original
/// batch at dispatch time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique within a batch
    pub id: TicketId,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    /// Assigned once by the categorization step; `None` means the
    /// classifier produced no recognized label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TicketCategory>,
    /// Assigned once by the feedback branch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    /// Assigned once by the feedback-type classification step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_type: Option<Sentiment>,
    /// Set by the human-review step when absent; an operator-supplied
    /// explicit `false` is preserved and the ticket is not dispatched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validated: Option<bool>,
    /// Set only by a notification step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent: Option<bool>,
}

impl Ticket {
    pub fn new(id: TicketId, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            subject: subject.into(),
            body: body.into(),
            category: None,
            sentiment: None,
            feedback_type: None,
            validated: None,
            sent: None,
        }
    }

    pub fn with_category(mut self, category: TicketCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = Some(sentiment);
        self
    }
}
