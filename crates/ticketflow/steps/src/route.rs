//! Router: partition categorized tickets into branch lists

use ticketflow_engine::{Step, StepContext};
use ticketflow_types::{StatePatch, StepError, Ticket, TicketCategory, Transition, WorkflowState};

/// Splits the categorized batch into the three branch lists.
///
/// The lists form a disjoint partition; a ticket without a recognized
/// category belongs to no branch and is dropped here with a warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteStep;

impl Step for RouteStep {
    fn run(&self, state: &WorkflowState, _ctx: &mut StepContext) -> Result<Transition, StepError> {
        let mut info: Vec<Ticket> = Vec::new();
        let mut feedback: Vec<Ticket> = Vec::new();
        let mut complaints: Vec<Ticket> = Vec::new();

        for ticket in &state.categorized_tickets {
            match ticket.category {
                Some(TicketCategory::InformationSearch) => info.push(ticket.clone()),
                Some(TicketCategory::Feedback) => feedback.push(ticket.clone()),
                Some(TicketCategory::ProductComplaint) => complaints.push(ticket.clone()),
                None => {
                    tracing::warn!(ticket = %ticket.id, "uncategorized ticket dropped by router")
                }
            }
        }

        tracing::info!(
            information_search = info.len(),
            feedback = feedback.len(),
            product_complaint = complaints.len(),
            "batch routed"
        );

        let patch = StatePatch::new()
            .with_information_search_tickets(info)
            .with_feedback_tickets(feedback)
            .with_product_complaint_tickets(complaints);
        Ok(Transition::update(patch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;
    use ticketflow_types::TicketId;

    fn routed(categorized: Vec<Ticket>) -> WorkflowState {
        let mut state = WorkflowState::default();
        state.categorized_tickets = categorized;
        let transition = RouteStep.run(&state, &mut StepContext::new()).unwrap();
        let (patch, _) = transition.into_parts();
        state.apply(patch);
        state
    }

    fn ticket(id: u64, category: Option<TicketCategory>) -> Ticket {
        let mut t = Ticket::new(TicketId::new(id), "s", "b");
        t.category = category;
        t
    }

    #[test]
    fn test_partition_by_category() {
        let state = routed(vec![
            ticket(1, Some(TicketCategory::InformationSearch)),
            ticket(2, Some(TicketCategory::Feedback)),
            ticket(3, Some(TicketCategory::ProductComplaint)),
            ticket(4, Some(TicketCategory::Feedback)),
        ]);
        assert_eq!(state.information_search_tickets.len(), 1);
        assert_eq!(state.feedback_tickets.len(), 2);
        assert_eq!(state.product_complaint_tickets.len(), 1);
    }

    #[test]
    fn test_uncategorized_tickets_are_dropped() {
        let state = routed(vec![ticket(1, None), ticket(2, Some(TicketCategory::Feedback))]);
        assert_eq!(state.feedback_tickets.len(), 1);
        assert_eq!(state.information_search_tickets.len(), 0);
        assert_eq!(state.product_complaint_tickets.len(), 0);
    }

    fn arb_category() -> impl Strategy<Value = Option<TicketCategory>> {
        prop_oneof![
            Just(None),
            Just(Some(TicketCategory::InformationSearch)),
            Just(Some(TicketCategory::Feedback)),
            Just(Some(TicketCategory::ProductComplaint)),
        ]
    }

    proptest! {
        // The branch lists are pairwise disjoint and together hold exactly
        // the categorized tickets
        #[test]
        fn prop_routing_is_a_partition(categories in proptest::collection::vec(arb_category(), 0..32)) {
            let categorized: Vec<Ticket> = categories
                .iter()
                .enumerate()
                .map(|(i, c)| ticket(i as u64, *c))
                .collect();
            let with_category = categorized.iter().filter(|t| t.category.is_some()).count();

            let state = routed(categorized);
            let mut seen = HashSet::new();
            for t in state
                .information_search_tickets
                .iter()
                .chain(&state.feedback_tickets)
                .chain(&state.product_complaint_tickets)
            {
                prop_assert!(seen.insert(t.id), "ticket {} routed twice", t.id);
            }
            prop_assert_eq!(seen.len(), with_category);
        }
    }
}
