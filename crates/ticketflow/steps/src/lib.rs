//! Concrete workflow steps for the support-ticket pipeline
//!
//! Each step here corresponds to one node of the support workflow:
//! load the batch, categorize, route into branches, answer
//! information-search tickets, triage feedback sentiment, run the
//! human-review loop, and deliver notifications.
//!
//! Steps are wired into a runnable graph by [`graph::support_ticket_graph`],
//! parameterized by a [`graph::SupportAgents`] bundle (the pluggable
//! classifier/analyzer/generator/transport collaborators) and a
//! [`WorkflowConfig`].
//!
//! # Pipeline shape
//!
//! ```text
//! load_tickets → categorize_tickets → route_tickets
//!   → filter_information_search → construct_rag_queries → generate_rag_answers
//!   → analyze_sentiment → classify_feedback_type → human_validation
//!   → (notify_tool_call)? → send_notifications → handle_product_complaint → end
//! ```
//!
//! The branches run in sequence over the shared state; a branch whose input
//! list is empty is a no-op, so one batch flows through the whole pipeline
//! regardless of its category mix.

#![deny(unsafe_code)]

pub mod complaint;
pub mod config;
pub mod feedback;
pub mod graph;
pub mod info_search;
pub mod intake;
pub mod notify;
pub mod route;

pub use complaint::ProductComplaintStep;
pub use config::WorkflowConfig;
pub use feedback::{AnalyzeSentimentStep, ClassifyFeedbackTypeStep, HumanValidationStep};
pub use graph::{names, support_ticket_graph, SupportAgents};
pub use info_search::{ConstructQueriesStep, FilterInformationSearchStep, GenerateAnswersStep};
pub use intake::{CategorizeStep, LoadTicketsStep};
pub use notify::{SendNotificationsStep, ToolCallStep};
pub use route::RouteStep;
