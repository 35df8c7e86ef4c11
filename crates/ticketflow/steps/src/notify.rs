//! Notification steps for validated feedback

use std::sync::Arc;

use ticketflow_agents::NotificationTransport;
use ticketflow_engine::{channel, Step, StepContext};
use ticketflow_types::{
    SendOutcome, StatePatch, StepError, SuspendPayload, Ticket, ToolCallArgs, Transition,
    WorkflowState,
};

use crate::graph::names;

/// Tool name surfaced through the suspension channel for tool-mode sends
pub(crate) const NOTIFIER_TOOL: &str = "notifier.send";

/// Resolve a display field on a possibly minimal ticket: its own value if
/// present, then the same ticket in the categorized list or the original
/// batch, then a placeholder.
pub(crate) fn resolve_field<'a>(
    ticket: &'a Ticket,
    state: &'a WorkflowState,
    field: impl Fn(&Ticket) -> Option<&str>,
    placeholder: &'a str,
) -> &'a str {
    if let Some(own) = field(ticket).filter(|v| !v.is_empty()) {
        return own;
    }
    state
        .lookup_ticket(ticket.id)
        .find_map(|t| field(t).filter(|v| !v.is_empty()))
        .unwrap_or(placeholder)
}

/// Compose the HTML notification body for a validated feedback ticket
pub(crate) fn notification_body(ticket: &Ticket, state: &WorkflowState) -> String {
    let subject = resolve_field(ticket, state, |t| Some(t.subject.as_str()), "(no subject)");
    let category = resolve_field(
        ticket,
        state,
        |t| t.category.map(|c| c.as_str()),
        "(unknown)",
    );
    let body = resolve_field(ticket, state, |t| Some(t.body.as_str()), "(no message body)");
    let sentiment = state
        .ticket_sentiments
        .get(&ticket.id)
        .map(|s| s.as_str())
        .unwrap_or("unknown");
    let feedback_type = state
        .ticket_feedback_types
        .get(&ticket.id)
        .map(|s| s.as_str())
        .unwrap_or("N/A");

    format!(
        r#"<html>
    <body>
        <p>Hello support team,</p>
        <p>The ticket workflow flagged a validated ticket for follow-up:</p>
        <h3>Ticket #{id} - {subject}</h3>
        <ul>
            <li><strong>Category:</strong> {category}</li>
            <li><strong>Sentiment:</strong> {sentiment}</li>
            <li><strong>Feedback type:</strong> {feedback_type}</li>
        </ul>
        <h4>Message</h4>
        <blockquote style="border-left:4px solid #ddd;padding-left:12px;color:#333">{body}</blockquote>
        <p>Recommended action: review and handle the ticket in the support tool.</p>
        <hr />
        <p style="font-size:0.9em;color:#666">Sent by the Ticketflow monitoring system. Do not reply to this message.</p>
    </body>
</html>"#,
        id = ticket.id
    )
}

pub(crate) fn notification_subject(ticket: &Ticket, state: &WorkflowState) -> String {
    let subject = resolve_field(ticket, state, |t| Some(t.subject.as_str()), "(no subject)");
    format!("[Ticket #{}] {}", ticket.id, subject)
}

/// Demonstration step that routes one fixed notifier call through the
/// suspension channel, so a driver can see and answer a tool call end to
/// end. The parsed outcome is recorded for inspection; delivery of the real
/// notifications happens in the send step regardless.
pub struct ToolCallStep {
    support_email: String,
}

impl ToolCallStep {
    pub fn new(support_email: impl Into<String>) -> Self {
        Self {
            support_email: support_email.into(),
        }
    }
}

impl Step for ToolCallStep {
    fn run(&self, _state: &WorkflowState, ctx: &mut StepContext) -> Result<Transition, StepError> {
        let payload = SuspendPayload::ToolCall {
            tool: NOTIFIER_TOOL.to_string(),
            args: ToolCallArgs {
                subject: "[Ticketflow Test] Notification channel check".to_string(),
                body: "<p>This is a test message from the notification check step.</p>"
                    .to_string(),
                to: self.support_email.clone(),
            },
            description: "Demo: direct notifier call from the workflow".to_string(),
        };

        let resume = ctx.interrupt(payload)?;
        let outcome = channel::normalize_outcome(&resume);
        tracing::info!(ok = outcome.ok, "notifier tool call answered");

        // Proceed to sending either way; a failed demo call never loops the
        // run back into review
        let patch = StatePatch::new().with_tool_call_outcome(outcome);
        Ok(Transition::redirect(patch, names::SEND_NOTIFICATIONS))
    }
}

/// Delivers one notification per validated ticket.
///
/// In direct mode the transport is called; in tool mode each send is
/// surfaced as a tool call through the suspension channel and the answer
/// decides the outcome. Either way every attempted ticket gets an
/// `{id, sent}` record and the step never fails the run.
pub struct SendNotificationsStep {
    transport: Arc<dyn NotificationTransport>,
    support_email: String,
    show_as_tool: bool,
}

impl SendNotificationsStep {
    pub fn new(
        transport: Arc<dyn NotificationTransport>,
        support_email: impl Into<String>,
        show_as_tool: bool,
    ) -> Self {
        Self {
            transport,
            support_email: support_email.into(),
            show_as_tool,
        }
    }
}

impl Step for SendNotificationsStep {
    fn run(&self, state: &WorkflowState, ctx: &mut StepContext) -> Result<Transition, StepError> {
        let mut results = Vec::new();

        for ticket in &state.human_validated_tickets {
            if !ticket.validated.unwrap_or(false) {
                continue;
            }

            let subject = notification_subject(ticket, state);
            let body = notification_body(ticket, state);

            let sent = if self.show_as_tool {
                let payload = SuspendPayload::ToolCall {
                    tool: NOTIFIER_TOOL.to_string(),
                    args: ToolCallArgs {
                        subject: subject.clone(),
                        body: body.clone(),
                        to: self.support_email.clone(),
                    },
                    description: format!("Send notification for ticket #{}", ticket.id),
                };
                let resume = ctx.interrupt(payload)?;
                channel::normalize_outcome(&resume).ok
            } else {
                self.transport.send(&subject, &body, &self.support_email)
            };

            if sent {
                tracing::info!(ticket = %ticket.id, to = %self.support_email, "notification sent");
            } else {
                tracing::warn!(ticket = %ticket.id, "notification delivery failed");
            }
            results.push(SendOutcome::Sent {
                id: ticket.id,
                sent,
            });
        }

        Ok(Transition::update(
            StatePatch::new().with_notification_results(results),
        ))
    }
}
