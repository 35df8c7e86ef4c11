//! Product-complaint branch: notify the product team

use std::sync::Arc;

use ticketflow_agents::NotificationTransport;
use ticketflow_engine::{channel, Step, StepContext};
use ticketflow_types::{
    SendOutcome, StatePatch, StepError, SuspendPayload, Ticket, ToolCallArgs, Transition,
    WorkflowState,
};

use crate::notify::{resolve_field, NOTIFIER_TOOL};

/// Sends one escalation per product-complaint ticket.
///
/// Complaints skip human review: every routed ticket is escalated. With an
/// empty branch list the step records an empty result set and makes no
/// sends. Tool mode mirrors the feedback send step.
pub struct ProductComplaintStep {
    transport: Arc<dyn NotificationTransport>,
    product_email: String,
    show_as_tool: bool,
}

impl ProductComplaintStep {
    pub fn new(
        transport: Arc<dyn NotificationTransport>,
        product_email: impl Into<String>,
        show_as_tool: bool,
    ) -> Self {
        Self {
            transport,
            product_email: product_email.into(),
            show_as_tool,
        }
    }
}

fn complaint_subject(ticket: &Ticket, state: &WorkflowState) -> String {
    let subject = resolve_field(ticket, state, |t| Some(t.subject.as_str()), "(no subject)");
    format!("[Product Complaint #{}] {}", ticket.id, subject)
}

fn complaint_body(ticket: &Ticket, state: &WorkflowState) -> String {
    let subject = resolve_field(ticket, state, |t| Some(t.subject.as_str()), "(no subject)");
    let body = resolve_field(ticket, state, |t| Some(t.body.as_str()), "(no message body)");

    format!(
        r#"<html>
    <body>
        <p>Hello product team,</p>
        <p>A customer reported a product issue that needs your attention:</p>
        <h3>Complaint #{id} - {subject}</h3>
        <h4>Message</h4>
        <blockquote style="border-left:4px solid #ddd;padding-left:12px;color:#333">{body}</blockquote>
        <p>Recommended action: investigate the reported defect and follow up with the customer.</p>
        <hr />
        <p style="font-size:0.9em;color:#666">Sent by the Ticketflow monitoring system. Do not reply to this message.</p>
    </body>
</html>"#,
        id = ticket.id
    )
}

impl Step for ProductComplaintStep {
    fn run(&self, state: &WorkflowState, ctx: &mut StepContext) -> Result<Transition, StepError> {
        if state.product_complaint_tickets.is_empty() {
            tracing::info!("no product complaints to escalate");
            return Ok(Transition::update(
                StatePatch::new().with_complaint_results(Vec::new()),
            ));
        }

        let mut results = Vec::new();
        for ticket in &state.product_complaint_tickets {
            let subject = complaint_subject(ticket, state);
            let body = complaint_body(ticket, state);

            let sent = if self.show_as_tool {
                let payload = SuspendPayload::ToolCall {
                    tool: NOTIFIER_TOOL.to_string(),
                    args: ToolCallArgs {
                        subject: subject.clone(),
                        body: body.clone(),
                        to: self.product_email.clone(),
                    },
                    description: format!("Escalate product complaint #{}", ticket.id),
                };
                let resume = ctx.interrupt(payload)?;
                channel::normalize_outcome(&resume).ok
            } else {
                self.transport.send(&subject, &body, &self.product_email)
            };

            if sent {
                tracing::info!(ticket = %ticket.id, to = %self.product_email, "complaint escalated");
            } else {
                tracing::warn!(ticket = %ticket.id, "complaint escalation failed");
            }
            results.push(SendOutcome::Sent {
                id: ticket.id,
                sent,
            });
        }

        Ok(Transition::update(
            StatePatch::new().with_complaint_results(results),
        ))
    }
}
