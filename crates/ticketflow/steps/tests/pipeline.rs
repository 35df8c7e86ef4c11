//! End-to-end runs of the support-ticket pipeline through the scheduler

use std::sync::Arc;

use ticketflow_agents::{
    AgentResult, KnowledgeBase, RecordingTransport, SentimentAnalyzer, TicketClassifier,
};
use ticketflow_engine::{RunOutcome, Scheduler, SuspendedHandle};
use ticketflow_steps::{support_ticket_graph, SupportAgents, WorkflowConfig};
use ticketflow_types::{
    ResumeValue, Sentiment, SuspendPayload, Ticket, TicketId, WorkflowState,
};

/// Classifier keyed on the ticket subject, so tests control routing exactly
struct SubjectLabel;

impl TicketClassifier for SubjectLabel {
    fn classify(&self, ticket: &Ticket) -> AgentResult<String> {
        Ok(ticket.subject.clone())
    }
}

/// Analyzer keyed on a literal body marker
struct BodyMarker;

impl SentimentAnalyzer for BodyMarker {
    fn analyze(&self, text: &str) -> Sentiment {
        if text.contains("NEG") {
            Sentiment::Negative
        } else if text.contains("POS") {
            Sentiment::Positive
        } else {
            Sentiment::Neutral
        }
    }
}

fn harness(config: WorkflowConfig) -> (Scheduler, Arc<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::new());
    let agents = SupportAgents {
        classifier: Arc::new(SubjectLabel),
        sentiment: Arc::new(BodyMarker),
        generator: Arc::new(ticketflow_agents::TemplateAnswerGenerator::new()),
        transport: transport.clone(),
        knowledge: Arc::new(KnowledgeBase::from_text(
            "The tracker pairs over Bluetooth from the app settings page.",
        )),
    };
    let graph = support_ticket_graph(&agents, &config).unwrap();
    (Scheduler::new(graph).unwrap(), transport)
}

fn ticket(id: u64, category_label: &str, body: &str) -> Ticket {
    Ticket::new(TicketId::new(id), category_label, body)
}

fn completed(outcome: RunOutcome) -> WorkflowState {
    match outcome {
        RunOutcome::Completed(state) => state,
        RunOutcome::Suspended(handle) => panic!("unexpected suspension at {}", handle.step),
    }
}

fn suspended(outcome: RunOutcome) -> SuspendedHandle {
    match outcome {
        RunOutcome::Suspended(handle) => handle,
        RunOutcome::Completed(_) => panic!("run completed instead of suspending"),
    }
}

#[test]
fn information_search_ticket_gets_an_answer() {
    let (mut scheduler, transport) = harness(WorkflowConfig::default());

    let batch = vec![ticket(7, "information_search", "How does Bluetooth pairing work?")];
    let state = completed(scheduler.run(batch).unwrap());

    assert_eq!(state.information_search_tickets.len(), 1);
    assert_eq!(state.rag_answers.len(), 1);
    assert!(state
        .rag_answers
        .get(&TicketId::new(7))
        .unwrap()
        .contains("Bluetooth"));
    // Nothing to review, notify or escalate
    assert!(state.human_validated_tickets.is_empty());
    assert!(state.notification_results.is_empty());
    assert!(transport.sent().is_empty());
}

#[test]
fn negative_feedback_suspends_then_notifies_after_approval() {
    let (mut scheduler, transport) = harness(WorkflowConfig::default());

    let batch = vec![ticket(3, "feedback", "NEG this is unacceptable")];
    let handle = suspended(scheduler.run(batch).unwrap());

    match &handle.payload {
        SuspendPayload::ReviewRequired { tickets_to_validate } => {
            assert_eq!(tickets_to_validate.len(), 1);
            assert_eq!(tickets_to_validate[0].id, TicketId::new(3));
        }
        other => panic!("unexpected payload: {other:?}"),
    }

    // Approve ticket 3; the run then pauses again at the tool-call demo step
    let approval = ResumeValue::record(serde_json::json!({
        "validated_tickets": [{"id": 3}]
    }));
    let handle = suspended(scheduler.resume(&handle.token, approval).unwrap());
    assert!(matches!(handle.payload, SuspendPayload::ToolCall { .. }));

    let state = completed(scheduler.resume(&handle.token, ResumeValue::text("ok")).unwrap());

    assert_eq!(state.human_validated_tickets.len(), 1);
    assert_eq!(state.human_validated_tickets[0].validated, Some(true));
    assert_eq!(state.notification_results.len(), 1);
    assert!(state.notification_results[0].was_sent());
    assert_eq!(state.tool_call_outcome.as_ref().unwrap().ok, true);
    // The pending list no longer holds the approved ticket
    assert!(state.feedback_tickets.is_empty());

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].subject.starts_with("[Ticket #3]"));
}

#[test]
fn operator_refusal_in_approval_record_is_not_sent() {
    let (mut scheduler, transport) = harness(WorkflowConfig::default());

    let handle = suspended(
        scheduler
            .run(vec![ticket(3, "feedback", "NEG bad")])
            .unwrap(),
    );
    let refusal = ResumeValue::record(serde_json::json!({
        "validated_tickets": [{"id": 3, "validated": false}]
    }));
    // The returned list is non-empty, so the demo tool call still runs
    let handle = suspended(scheduler.resume(&handle.token, refusal).unwrap());
    let state = completed(scheduler.resume(&handle.token, ResumeValue::text("ok")).unwrap());

    assert_eq!(state.human_validated_tickets[0].validated, Some(false));
    assert!(state.notification_results.is_empty());
    assert!(transport.sent().is_empty());
}

#[test]
fn positive_feedback_flows_through_without_review() {
    let (mut scheduler, transport) = harness(WorkflowConfig::default());

    let batch = vec![ticket(4, "feedback", "POS love the product")];
    let state = completed(scheduler.run(batch).unwrap());

    assert_eq!(
        state.ticket_sentiments.get(&TicketId::new(4)),
        Some(&Sentiment::Positive)
    );
    assert!(state.human_validated_tickets.is_empty());
    assert!(state.notification_results.is_empty());
    assert!(transport.sent().is_empty());
}

#[test]
fn product_complaint_is_escalated_directly() {
    let (mut scheduler, transport) = harness(WorkflowConfig::default());

    let batch = vec![ticket(9, "product_complaint", "Arrived with a cracked screen")];
    let state = completed(scheduler.run(batch).unwrap());

    assert_eq!(state.complaint_results.len(), 1);
    assert!(state.complaint_results[0].was_sent());
    // The feedback and information-search branches never touched their fields
    assert!(state.rag_queries.is_empty());
    assert!(state.ticket_sentiments.is_empty());
    assert!(state.notification_results.is_empty());

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].subject.starts_with("[Product Complaint #9]"));
    assert_eq!(sent[0].to, WorkflowConfig::default().product_team_email);
}

#[test]
fn mixed_batch_runs_every_branch() {
    let (mut scheduler, transport) = harness(WorkflowConfig::default());

    let batch = vec![
        ticket(1, "information_search", "How does Bluetooth pairing work?"),
        ticket(2, "feedback", "NEG terrible"),
        ticket(3, "feedback", "POS lovely"),
        ticket(4, "product_complaint", "Broken hinge"),
        ticket(5, "junk_category", "should be dropped"),
    ];

    let handle = suspended(scheduler.run(batch).unwrap());
    let handle = suspended(scheduler.resume(&handle.token, ResumeValue::text("all")).unwrap());
    let state = completed(scheduler.resume(&handle.token, ResumeValue::text("ok")).unwrap());

    assert_eq!(state.rag_answers.len(), 1);
    assert_eq!(state.notification_results.len(), 1);
    assert_eq!(state.complaint_results.len(), 1);
    // Ticket 5 was dropped by the router
    assert_eq!(state.information_search_tickets.len(), 1);
    assert_eq!(state.product_complaint_tickets.len(), 1);

    // One feedback notification plus one complaint escalation
    assert_eq!(transport.sent().len(), 2);
}

#[test]
fn id_list_shorthand_selects_a_subset() {
    let (mut scheduler, _) = harness(WorkflowConfig::default());

    let batch = vec![
        ticket(3, "feedback", "NEG one"),
        ticket(5, "feedback", "NEG two"),
        ticket(6, "feedback", "NEG three"),
    ];
    let handle = suspended(scheduler.run(batch).unwrap());

    // "3,5" plus an id that was never pending
    let handle = suspended(
        scheduler
            .resume(&handle.token, ResumeValue::text("3, 5, 99"))
            .unwrap(),
    );
    let state = completed(scheduler.resume(&handle.token, ResumeValue::text("ok")).unwrap());

    let validated: Vec<u64> = state.human_validated_tickets.iter().map(|t| t.id.0).collect();
    assert_eq!(validated, vec![3, 5]);
    // Ticket 6 stays pending
    let pending: Vec<u64> = state.feedback_tickets.iter().map(|t| t.id.0).collect();
    assert_eq!(pending, vec![6]);
    assert_eq!(state.notification_results.len(), 2);
}

#[test]
fn empty_answer_without_auto_approve_skips_notifications() {
    let (mut scheduler, transport) = harness(WorkflowConfig::default());

    let handle = suspended(
        scheduler
            .run(vec![ticket(3, "feedback", "NEG bad")])
            .unwrap(),
    );
    let state = completed(scheduler.resume(&handle.token, ResumeValue::text("")).unwrap());

    assert!(state.human_validated_tickets.is_empty());
    assert!(state.notification_results.is_empty());
    // Tool-call demo step was skipped entirely
    assert!(state.tool_call_outcome.is_none());
    assert!(transport.sent().is_empty());
}

#[test]
fn empty_answer_with_auto_approve_validates_everything() {
    let config = WorkflowConfig {
        auto_validate_negative: true,
        ..WorkflowConfig::default()
    };
    let (mut scheduler, transport) = harness(config);

    let handle = suspended(
        scheduler
            .run(vec![ticket(3, "feedback", "NEG bad"), ticket(5, "feedback", "NEG worse")])
            .unwrap(),
    );
    let handle = suspended(scheduler.resume(&handle.token, ResumeValue::Empty).unwrap());
    let state = completed(scheduler.resume(&handle.token, ResumeValue::text("ok")).unwrap());

    assert_eq!(state.human_validated_tickets.len(), 2);
    assert_eq!(transport.sent().len(), 2);
}

#[test]
fn malformed_json_answer_degrades_to_no_approval() {
    let (mut scheduler, _) = harness(WorkflowConfig::default());

    let handle = suspended(
        scheduler
            .run(vec![ticket(3, "feedback", "NEG bad")])
            .unwrap(),
    );
    let state = completed(
        scheduler
            .resume(&handle.token, ResumeValue::text("{\"validated_tickets\": ["))
            .unwrap(),
    );
    assert!(state.human_validated_tickets.is_empty());
    assert!(state.notification_results.is_empty());
}

#[test]
fn failed_tool_call_demo_still_sends_notifications() {
    let (mut scheduler, transport) = harness(WorkflowConfig::default());

    let handle = suspended(
        scheduler
            .run(vec![ticket(3, "feedback", "NEG bad")])
            .unwrap(),
    );
    let handle = suspended(scheduler.resume(&handle.token, ResumeValue::text("all")).unwrap());
    // The demo call is rejected; delivery must proceed regardless
    let state = completed(
        scheduler
            .resume(&handle.token, ResumeValue::text("nope"))
            .unwrap(),
    );

    assert_eq!(state.tool_call_outcome.as_ref().unwrap().ok, false);
    assert_eq!(state.notification_results.len(), 1);
    assert_eq!(transport.sent().len(), 1);
}

#[test]
fn suspended_run_survives_scheduler_teardown() {
    let (mut scheduler, _) = harness(WorkflowConfig::default());

    let handle = suspended(
        scheduler
            .run(vec![ticket(3, "feedback", "NEG bad")])
            .unwrap(),
    );
    let serialized = serde_json::to_string(scheduler.checkpoint().unwrap()).unwrap();
    drop(scheduler);

    let (mut rebuilt, transport) = harness(WorkflowConfig::default());
    rebuilt.restore(serde_json::from_str(&serialized).unwrap());

    let handle = suspended(rebuilt.resume(&handle.token, ResumeValue::text("all")).unwrap());
    let state = completed(rebuilt.resume(&handle.token, ResumeValue::text("ok")).unwrap());
    assert_eq!(state.notification_results.len(), 1);
    assert_eq!(transport.sent().len(), 1);
}
