//! Information-search branch: filter, query construction, answer generation

use std::sync::Arc;

use ticketflow_agents::{AnswerGenerator, KnowledgeBase};
use ticketflow_engine::{Step, StepContext};
use ticketflow_types::{StatePatch, StepError, Transition, WorkflowState};

/// Entry of the information-search branch.
///
/// Re-submits the branch list as-is; with an empty list the whole branch is
/// a no-op and the batch flows on to the feedback steps.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterInformationSearchStep;

impl Step for FilterInformationSearchStep {
    fn run(&self, state: &WorkflowState, _ctx: &mut StepContext) -> Result<Transition, StepError> {
        tracing::debug!(
            tickets = state.information_search_tickets.len(),
            "entering information-search branch"
        );
        let patch = StatePatch::new()
            .with_information_search_tickets(state.information_search_tickets.clone());
        Ok(Transition::update(patch))
    }
}

/// Builds the knowledge-base queries for each information-search ticket.
/// The ticket body is the query.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstructQueriesStep;

impl Step for ConstructQueriesStep {
    fn run(&self, state: &WorkflowState, _ctx: &mut StepContext) -> Result<Transition, StepError> {
        let mut queries = std::collections::BTreeMap::new();
        for ticket in &state.information_search_tickets {
            queries.insert(ticket.id, vec![ticket.body.clone()]);
        }
        Ok(Transition::update(StatePatch::new().with_rag_queries(queries)))
    }
}

/// Answers each ticket's queries against the knowledge base.
///
/// A generation failure drops that ticket's answer and moves on; the rest of
/// the branch is unaffected.
pub struct GenerateAnswersStep {
    generator: Arc<dyn AnswerGenerator>,
    knowledge: Arc<KnowledgeBase>,
}

impl GenerateAnswersStep {
    pub fn new(generator: Arc<dyn AnswerGenerator>, knowledge: Arc<KnowledgeBase>) -> Self {
        Self {
            generator,
            knowledge,
        }
    }
}

impl Step for GenerateAnswersStep {
    fn run(&self, state: &WorkflowState, _ctx: &mut StepContext) -> Result<Transition, StepError> {
        let mut answers = std::collections::BTreeMap::new();

        'tickets: for ticket in &state.information_search_tickets {
            let Some(queries) = state.rag_queries.get(&ticket.id) else {
                continue;
            };

            let mut parts = Vec::with_capacity(queries.len());
            for query in queries {
                match self.generator.generate(self.knowledge.content(), query) {
                    Ok(answer) => parts.push(answer),
                    Err(err) => {
                        tracing::warn!(ticket = %ticket.id, error = %err, "answer generation failed; dropping ticket's answer");
                        continue 'tickets;
                    }
                }
            }
            answers.insert(ticket.id, parts.join("\n\n"));
        }

        tracing::info!(answered = answers.len(), "information-search answers generated");
        Ok(Transition::update(StatePatch::new().with_rag_answers(answers)))
    }
}
