//! Feedback branch: sentiment triage and the human-review loop

use std::collections::BTreeSet;
use std::sync::Arc;

use ticketflow_agents::SentimentAnalyzer;
use ticketflow_engine::{channel, Step, StepContext};
use ticketflow_types::{
    Sentiment, StatePatch, StepError, SuspendPayload, Ticket, Transition, WorkflowState,
};

use crate::graph::names;

/// Judges each feedback ticket's sentiment and records it both in the
/// sentiment map and on the ticket copies in the branch list.
pub struct AnalyzeSentimentStep {
    analyzer: Arc<dyn SentimentAnalyzer>,
}

impl AnalyzeSentimentStep {
    pub fn new(analyzer: Arc<dyn SentimentAnalyzer>) -> Self {
        Self { analyzer }
    }
}

impl Step for AnalyzeSentimentStep {
    fn run(&self, state: &WorkflowState, _ctx: &mut StepContext) -> Result<Transition, StepError> {
        let mut sentiments = std::collections::BTreeMap::new();
        let mut stamped = Vec::with_capacity(state.feedback_tickets.len());

        for ticket in &state.feedback_tickets {
            let sentiment = self.analyzer.analyze(&ticket.body);
            tracing::info!(ticket = %ticket.id, sentiment = %sentiment, "feedback sentiment");
            sentiments.insert(ticket.id, sentiment);
            stamped.push(ticket.clone().with_sentiment(sentiment));
        }

        let patch = StatePatch::new()
            .with_ticket_sentiments(sentiments)
            .with_feedback_tickets(stamped);
        Ok(Transition::update(patch))
    }
}

/// Derives the feedback-type label from the sentiment map, defaulting to
/// neutral for tickets the analyzer never saw.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassifyFeedbackTypeStep;

impl Step for ClassifyFeedbackTypeStep {
    fn run(&self, state: &WorkflowState, _ctx: &mut StepContext) -> Result<Transition, StepError> {
        let mut feedback_types = std::collections::BTreeMap::new();
        let mut stamped = Vec::with_capacity(state.feedback_tickets.len());

        for ticket in &state.feedback_tickets {
            let feedback_type = state
                .ticket_sentiments
                .get(&ticket.id)
                .copied()
                .unwrap_or(Sentiment::Neutral);
            feedback_types.insert(ticket.id, feedback_type);
            let mut ticket = ticket.clone();
            ticket.feedback_type = Some(feedback_type);
            stamped.push(ticket);
        }

        let patch = StatePatch::new()
            .with_ticket_feedback_types(feedback_types)
            .with_feedback_tickets(stamped);
        Ok(Transition::update(patch))
    }
}

/// Human review of negative feedback.
///
/// Suspends with the negative subset of the feedback tickets and waits for
/// an operator decision. The decision is normalized leniently (structured
/// record, `all`, id list, empty plus the auto-approve flag); approved
/// tickets get `validated = true` and leave the pending list. Routing is
/// dynamic: approved tickets go through the tool-call demonstration first,
/// an empty approval skips straight to the send step.
pub struct HumanValidationStep {
    auto_validate: bool,
}

impl HumanValidationStep {
    pub fn new(auto_validate: bool) -> Self {
        Self { auto_validate }
    }
}

impl Step for HumanValidationStep {
    fn run(&self, state: &WorkflowState, ctx: &mut StepContext) -> Result<Transition, StepError> {
        let negative: Vec<Ticket> = state
            .feedback_tickets
            .iter()
            .filter(|t| {
                state.ticket_sentiments.get(&t.id).copied() == Some(Sentiment::Negative)
            })
            .cloned()
            .collect();

        if negative.is_empty() {
            tracing::info!("no negative feedback; skipping human review");
            let patch = StatePatch::new().with_human_validated_tickets(Vec::new());
            return Ok(Transition::redirect(patch, names::SEND_NOTIFICATIONS));
        }

        let resume = ctx.interrupt(SuspendPayload::ReviewRequired {
            tickets_to_validate: negative.clone(),
        })?;
        let approved = channel::normalize_validation(&resume, &negative, self.auto_validate);

        // Stamp approval only where the operator left it unset; an explicit
        // `validated: false` in the resume record is preserved
        let validated: Vec<Ticket> = approved
            .into_iter()
            .map(|mut t| {
                t.validated.get_or_insert(true);
                t
            })
            .collect();
        let validated_ids: BTreeSet<_> = validated.iter().map(|t| t.id).collect();

        // Approved tickets leave the pending list so they are not re-reviewed
        let remaining: Vec<Ticket> = state
            .feedback_tickets
            .iter()
            .filter(|t| !validated_ids.contains(&t.id))
            .cloned()
            .collect();

        tracing::info!(
            validated = validated.len(),
            remaining = remaining.len(),
            "human review resolved"
        );

        let patch = StatePatch::new()
            .with_human_validated_tickets(validated.clone())
            .with_feedback_tickets(remaining);
        let next = if validated.is_empty() {
            names::SEND_NOTIFICATIONS
        } else {
            names::NOTIFY_TOOL_CALL
        };
        Ok(Transition::redirect(patch, next))
    }
}
