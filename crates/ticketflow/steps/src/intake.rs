//! Intake steps: container initialization and categorization

use std::sync::Arc;

use ticketflow_agents::TicketClassifier;
use ticketflow_engine::{Step, StepContext};
use ticketflow_types::{StatePatch, StepError, Transition, WorkflowState};

/// First step of every run: reset all derived containers so the pipeline
/// starts from a clean slate regardless of how the state was constructed.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadTicketsStep;

impl Step for LoadTicketsStep {
    fn run(&self, state: &WorkflowState, _ctx: &mut StepContext) -> Result<Transition, StepError> {
        tracing::info!(tickets = state.tickets.len(), "loading ticket batch");
        let patch = StatePatch::new()
            .with_categorized_tickets(Vec::new())
            .with_information_search_tickets(Vec::new())
            .with_feedback_tickets(Vec::new())
            .with_product_complaint_tickets(Vec::new())
            .with_rag_queries(Default::default())
            .with_rag_answers(Default::default())
            .with_ticket_sentiments(Default::default())
            .with_ticket_feedback_types(Default::default())
            .with_human_validated_tickets(Vec::new())
            .with_notification_results(Vec::new())
            .with_complaint_results(Vec::new());
        Ok(Transition::update(patch))
    }
}

/// Assigns a category to each ticket in the batch.
///
/// Per-item error boundary: a classifier failure logs and skips that ticket;
/// the rest of the batch proceeds. An unrecognized label leaves the category
/// unset, and the router drops the ticket later.
pub struct CategorizeStep {
    classifier: Arc<dyn TicketClassifier>,
}

impl CategorizeStep {
    pub fn new(classifier: Arc<dyn TicketClassifier>) -> Self {
        Self { classifier }
    }
}

impl Step for CategorizeStep {
    fn run(&self, state: &WorkflowState, _ctx: &mut StepContext) -> Result<Transition, StepError> {
        let mut categorized = Vec::with_capacity(state.tickets.len());

        for ticket in &state.tickets {
            let label = match self.classifier.classify(ticket) {
                Ok(label) => label,
                Err(err) => {
                    tracing::warn!(ticket = %ticket.id, error = %err, "classification failed; skipping ticket");
                    continue;
                }
            };

            let category = label.trim().to_lowercase().parse().ok();
            match &category {
                Some(cat) => {
                    tracing::info!(ticket = %ticket.id, category = %cat, "ticket categorized")
                }
                None => {
                    tracing::warn!(ticket = %ticket.id, label = %label, "unrecognized category label")
                }
            }

            let mut ticket = ticket.clone();
            ticket.category = category;
            categorized.push(ticket);
        }

        Ok(Transition::update(
            StatePatch::new().with_categorized_tickets(categorized),
        ))
    }
}
