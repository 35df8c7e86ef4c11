//! Support-ticket graph wiring

use std::sync::Arc;

use ticketflow_agents::{
    AnswerGenerator, DryRunTransport, KeywordClassifier, KeywordSentimentAnalyzer, KnowledgeBase,
    NotificationTransport, SentimentAnalyzer, TemplateAnswerGenerator, TicketClassifier,
};
use ticketflow_engine::GraphDefinition;
use ticketflow_types::WorkflowResult;

use crate::complaint::ProductComplaintStep;
use crate::config::WorkflowConfig;
use crate::feedback::{AnalyzeSentimentStep, ClassifyFeedbackTypeStep, HumanValidationStep};
use crate::info_search::{ConstructQueriesStep, FilterInformationSearchStep, GenerateAnswersStep};
use crate::intake::{CategorizeStep, LoadTicketsStep};
use crate::notify::{SendNotificationsStep, ToolCallStep};
use crate::route::RouteStep;

/// Step names of the support-ticket graph
pub mod names {
    pub const LOAD_TICKETS: &str = "load_tickets";
    pub const CATEGORIZE_TICKETS: &str = "categorize_tickets";
    pub const ROUTE_TICKETS: &str = "route_tickets";
    pub const FILTER_INFORMATION_SEARCH: &str = "filter_information_search";
    pub const CONSTRUCT_RAG_QUERIES: &str = "construct_rag_queries";
    pub const GENERATE_RAG_ANSWERS: &str = "generate_rag_answers";
    pub const ANALYZE_SENTIMENT: &str = "analyze_sentiment";
    pub const CLASSIFY_FEEDBACK_TYPE: &str = "classify_feedback_type";
    pub const HUMAN_VALIDATION: &str = "human_validation";
    pub const NOTIFY_TOOL_CALL: &str = "notify_tool_call";
    pub const SEND_NOTIFICATIONS: &str = "send_notifications";
    pub const HANDLE_PRODUCT_COMPLAINT: &str = "handle_product_complaint";
}

/// The collaborator bundle the graph is built from
pub struct SupportAgents {
    pub classifier: Arc<dyn TicketClassifier>,
    pub sentiment: Arc<dyn SentimentAnalyzer>,
    pub generator: Arc<dyn AnswerGenerator>,
    pub transport: Arc<dyn NotificationTransport>,
    pub knowledge: Arc<KnowledgeBase>,
}

impl SupportAgents {
    /// The deterministic fallback agents over a given knowledge base, with a
    /// dry-run transport
    pub fn with_fallbacks(knowledge: KnowledgeBase) -> Self {
        Self {
            classifier: Arc::new(KeywordClassifier::new()),
            sentiment: Arc::new(KeywordSentimentAnalyzer::new()),
            generator: Arc::new(TemplateAnswerGenerator::new()),
            transport: Arc::new(DryRunTransport::new()),
            knowledge: Arc::new(knowledge),
        }
    }
}

/// Build the full support-ticket graph.
///
/// The branches run in sequence: information search, then feedback triage
/// and review, then notifications, then product complaints. The review step
/// is the only branch point; it redirects to the tool-call demonstration
/// when tickets were approved and straight to sending otherwise.
pub fn support_ticket_graph(
    agents: &SupportAgents,
    config: &WorkflowConfig,
) -> WorkflowResult<GraphDefinition> {
    let mut graph = GraphDefinition::new();

    graph.add_step(names::LOAD_TICKETS, Arc::new(LoadTicketsStep))?;
    graph.add_step(
        names::CATEGORIZE_TICKETS,
        Arc::new(CategorizeStep::new(agents.classifier.clone())),
    )?;
    graph.add_step(names::ROUTE_TICKETS, Arc::new(RouteStep))?;
    graph.add_step(
        names::FILTER_INFORMATION_SEARCH,
        Arc::new(FilterInformationSearchStep),
    )?;
    graph.add_step(names::CONSTRUCT_RAG_QUERIES, Arc::new(ConstructQueriesStep))?;
    graph.add_step(
        names::GENERATE_RAG_ANSWERS,
        Arc::new(GenerateAnswersStep::new(
            agents.generator.clone(),
            agents.knowledge.clone(),
        )),
    )?;
    graph.add_step(
        names::ANALYZE_SENTIMENT,
        Arc::new(AnalyzeSentimentStep::new(agents.sentiment.clone())),
    )?;
    graph.add_step(names::CLASSIFY_FEEDBACK_TYPE, Arc::new(ClassifyFeedbackTypeStep))?;
    graph.add_step(
        names::HUMAN_VALIDATION,
        Arc::new(HumanValidationStep::new(config.auto_validate_negative)),
    )?;
    graph.add_step(
        names::NOTIFY_TOOL_CALL,
        Arc::new(ToolCallStep::new(config.support_team_email.clone())),
    )?;
    graph.add_step(
        names::SEND_NOTIFICATIONS,
        Arc::new(SendNotificationsStep::new(
            agents.transport.clone(),
            config.support_team_email.clone(),
            config.show_send_as_tool,
        )),
    )?;
    graph.add_step(
        names::HANDLE_PRODUCT_COMPLAINT,
        Arc::new(ProductComplaintStep::new(
            agents.transport.clone(),
            config.product_team_email.clone(),
            config.show_send_as_tool,
        )),
    )?;

    graph.add_edge(names::LOAD_TICKETS, names::CATEGORIZE_TICKETS)?;
    graph.add_edge(names::CATEGORIZE_TICKETS, names::ROUTE_TICKETS)?;
    graph.add_edge(names::ROUTE_TICKETS, names::FILTER_INFORMATION_SEARCH)?;
    graph.add_edge(names::FILTER_INFORMATION_SEARCH, names::CONSTRUCT_RAG_QUERIES)?;
    graph.add_edge(names::CONSTRUCT_RAG_QUERIES, names::GENERATE_RAG_ANSWERS)?;
    graph.add_edge(names::GENERATE_RAG_ANSWERS, names::ANALYZE_SENTIMENT)?;
    graph.add_edge(names::ANALYZE_SENTIMENT, names::CLASSIFY_FEEDBACK_TYPE)?;
    graph.add_edge(names::CLASSIFY_FEEDBACK_TYPE, names::HUMAN_VALIDATION)?;
    // Branch point; the review step always picks one of these at runtime
    graph.add_edge(names::HUMAN_VALIDATION, names::NOTIFY_TOOL_CALL)?;
    graph.add_edge(names::HUMAN_VALIDATION, names::SEND_NOTIFICATIONS)?;
    graph.add_edge(names::NOTIFY_TOOL_CALL, names::SEND_NOTIFICATIONS)?;
    graph.add_edge(names::SEND_NOTIFICATIONS, names::HANDLE_PRODUCT_COMPLAINT)?;
    graph.add_terminal_edge(names::HANDLE_PRODUCT_COMPLAINT)?;

    graph.set_entry(names::LOAD_TICKETS)?;
    graph.validate()?;

    tracing::debug!(
        steps = graph.step_count(),
        edges = graph.edge_count(),
        "support-ticket graph built"
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticketflow_types::StepName;

    #[test]
    fn test_graph_builds_and_validates() {
        let agents = SupportAgents::with_fallbacks(KnowledgeBase::default());
        let graph = support_ticket_graph(&agents, &WorkflowConfig::default()).unwrap();
        assert_eq!(graph.step_count(), 12);
        assert_eq!(graph.entry(), Some(&StepName::new(names::LOAD_TICKETS)));
    }

    #[test]
    fn test_review_is_the_only_branch_point() {
        let agents = SupportAgents::with_fallbacks(KnowledgeBase::default());
        let graph = support_ticket_graph(&agents, &WorkflowConfig::default()).unwrap();

        assert_eq!(
            graph
                .static_successors(&StepName::new(names::HUMAN_VALIDATION))
                .len(),
            2
        );
        // Every other step has exactly one default successor
        for name in [
            names::LOAD_TICKETS,
            names::ROUTE_TICKETS,
            names::NOTIFY_TOOL_CALL,
            names::SEND_NOTIFICATIONS,
            names::HANDLE_PRODUCT_COMPLAINT,
        ] {
            assert!(graph.default_successor(&StepName::new(name)).is_ok(), "{name}");
        }
    }
}
