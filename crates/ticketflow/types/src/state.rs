//! Shared workflow state and the shallow-overwrite patch model
//!
//! One `WorkflowState` exists per run. Steps never mutate it directly; they
//! return a `StatePatch` and the scheduler merges it. The merge rule is
//! shallow overwrite per field: a patch replaces exactly the fields it names
//! in full and leaves every other field untouched. A step that changes a
//! mapping must therefore submit the complete replacement mapping.

use crate::{Sentiment, Ticket, TicketId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ── Send outcomes ────────────────────────────────────────────────────

/// Per-ticket outcome recorded by a notification step
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SendOutcome {
    /// The transport was invoked and reported success or failure
    Sent { id: TicketId, sent: bool },
    /// The send could not be attempted
    Failed { id: TicketId, error: String },
}

impl SendOutcome {
    pub fn id(&self) -> TicketId {
        match self {
            SendOutcome::Sent { id, .. } | SendOutcome::Failed { id, .. } => *id,
        }
    }

    pub fn was_sent(&self) -> bool {
        matches!(self, SendOutcome::Sent { sent: true, .. })
    }
}

/// Normalized result of a tool-style call routed through the suspension
/// channel
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolCallOutcome {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl ToolCallOutcome {
    pub fn ok(info: impl Into<String>) -> Self {
        Self {
            ok: true,
            info: Some(info.into()),
        }
    }

    pub fn failed(info: impl Into<String>) -> Self {
        Self {
            ok: false,
            info: Some(info.into()),
        }
    }
}

// ── Workflow state ───────────────────────────────────────────────────

/// The single shared record threaded through every step of a run.
///
/// Invariant: every map keyed by ticket id only contains ids present in
/// `categorized_tickets`. The three branch lists form a disjoint partition
/// of the categorized tickets that carry a recognized category.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowState {
    /// The original input batch, write-once at load time
    pub tickets: Vec<Ticket>,
    /// Tickets with their category assigned
    pub categorized_tickets: Vec<Ticket>,
    /// Branch list: information-search tickets
    pub information_search_tickets: Vec<Ticket>,
    /// Branch list: feedback tickets pending sentiment triage / review
    pub feedback_tickets: Vec<Ticket>,
    /// Branch list: product-complaint tickets
    pub product_complaint_tickets: Vec<Ticket>,
    /// Generated knowledge-base queries per ticket
    pub rag_queries: BTreeMap<TicketId, Vec<String>>,
    /// Generated answers per ticket
    pub rag_answers: BTreeMap<TicketId, String>,
    /// Sentiment label per feedback ticket
    pub ticket_sentiments: BTreeMap<TicketId, Sentiment>,
    /// Feedback-type label per feedback ticket
    pub ticket_feedback_types: BTreeMap<TicketId, Sentiment>,
    /// Tickets approved by the human-review step
    pub human_validated_tickets: Vec<Ticket>,
    /// Send outcomes from the feedback notification step
    pub notification_results: Vec<SendOutcome>,
    /// Send outcomes from the product-complaint step
    pub complaint_results: Vec<SendOutcome>,
    /// Outcome recorded by the tool-call demonstration step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_outcome: Option<ToolCallOutcome>,
}

impl WorkflowState {
    /// Create the state for a new run from the input batch
    pub fn with_tickets(tickets: Vec<Ticket>) -> Self {
        Self {
            tickets,
            ..Self::default()
        }
    }

    /// Merge a patch into this state, field by field.
    ///
    /// Fields the patch leaves as `None` are untouched; fields it names are
    /// replaced in full.
    pub fn apply(&mut self, patch: StatePatch) {
        if let Some(v) = patch.tickets {
            self.tickets = v;
        }
        if let Some(v) = patch.categorized_tickets {
            self.categorized_tickets = v;
        }
        if let Some(v) = patch.information_search_tickets {
            self.information_search_tickets = v;
        }
        if let Some(v) = patch.feedback_tickets {
            self.feedback_tickets = v;
        }
        if let Some(v) = patch.product_complaint_tickets {
            self.product_complaint_tickets = v;
        }
        if let Some(v) = patch.rag_queries {
            self.rag_queries = v;
        }
        if let Some(v) = patch.rag_answers {
            self.rag_answers = v;
        }
        if let Some(v) = patch.ticket_sentiments {
            self.ticket_sentiments = v;
        }
        if let Some(v) = patch.ticket_feedback_types {
            self.ticket_feedback_types = v;
        }
        if let Some(v) = patch.human_validated_tickets {
            self.human_validated_tickets = v;
        }
        if let Some(v) = patch.notification_results {
            self.notification_results = v;
        }
        if let Some(v) = patch.complaint_results {
            self.complaint_results = v;
        }
        if let Some(v) = patch.tool_call_outcome {
            self.tool_call_outcome = Some(v);
        }
    }

    /// Look up a ticket by id, preferring the categorized list over the
    /// original batch. Dispatch uses this to resolve display fields on
    /// minimal operator-supplied tickets.
    pub fn lookup_ticket(&self, id: TicketId) -> impl Iterator<Item = &Ticket> {
        self.categorized_tickets
            .iter()
            .chain(self.tickets.iter())
            .filter(move |t| t.id == id)
    }
}

// ── State patch ──────────────────────────────────────────────────────

/// A partial state update returned by a step.
///
/// Builder-style constructors mirror the state fields one to one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tickets: Option<Vec<Ticket>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categorized_tickets: Option<Vec<Ticket>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub information_search_tickets: Option<Vec<Ticket>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_tickets: Option<Vec<Ticket>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_complaint_tickets: Option<Vec<Ticket>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rag_queries: Option<BTreeMap<TicketId, Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rag_answers: Option<BTreeMap<TicketId, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_sentiments: Option<BTreeMap<TicketId, Sentiment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_feedback_types: Option<BTreeMap<TicketId, Sentiment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub human_validated_tickets: Option<Vec<Ticket>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_results: Option<Vec<SendOutcome>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complaint_results: Option<Vec<SendOutcome>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_outcome: Option<ToolCallOutcome>,
}

impl StatePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn with_tickets(mut self, v: Vec<Ticket>) -> Self {
        self.tickets = Some(v);
        self
    }

    pub fn with_categorized_tickets(mut self, v: Vec<Ticket>) -> Self {
        self.categorized_tickets = Some(v);
        self
    }

    pub fn with_information_search_tickets(mut self, v: Vec<Ticket>) -> Self {
        self.information_search_tickets = Some(v);
        self
    }

    pub fn with_feedback_tickets(mut self, v: Vec<Ticket>) -> Self {
        self.feedback_tickets = Some(v);
        self
    }

    pub fn with_product_complaint_tickets(mut self, v: Vec<Ticket>) -> Self {
        self.product_complaint_tickets = Some(v);
        self
    }

    pub fn with_rag_queries(mut self, v: BTreeMap<TicketId, Vec<String>>) -> Self {
        self.rag_queries = Some(v);
        self
    }

    pub fn with_rag_answers(mut self, v: BTreeMap<TicketId, String>) -> Self {
        self.rag_answers = Some(v);
        self
    }

    pub fn with_ticket_sentiments(mut self, v: BTreeMap<TicketId, Sentiment>) -> Self {
        self.ticket_sentiments = Some(v);
        self
    }

    pub fn with_ticket_feedback_types(mut self, v: BTreeMap<TicketId, Sentiment>) -> Self {
        self.ticket_feedback_types = Some(v);
        self
    }

    pub fn with_human_validated_tickets(mut self, v: Vec<Ticket>) -> Self {
        self.human_validated_tickets = Some(v);
        self
    }

    pub fn with_notification_results(mut self, v: Vec<SendOutcome>) -> Self {
        self.notification_results = Some(v);
        self
    }

    pub fn with_complaint_results(mut self, v: Vec<SendOutcome>) -> Self {
        self.complaint_results = Some(v);
        self
    }

    pub fn with_tool_call_outcome(mut self, v: ToolCallOutcome) -> Self {
        self.tool_call_outcome = Some(v);
        self
    }
}
