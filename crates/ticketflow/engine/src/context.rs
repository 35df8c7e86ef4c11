//! Per-invocation step context and the interrupt primitive
//!
//! `StepContext` makes suspension replay-safe. Resume values consumed by a
//! step are recorded in call order; when the scheduler re-executes the step
//! after a resume, earlier `interrupt` calls are answered from the record
//! and only the first unanswered call suspends the run again.

use ticketflow_types::{ResumeValue, StepError, SuspendPayload};

/// Raised (as an `Err`) by [`StepContext::interrupt`] when no resume value
/// is recorded for the call. Steps propagate it with `?`; the scheduler
/// converts it into a suspended run handle.
#[derive(Debug)]
pub struct Interrupt(pub SuspendPayload);

impl From<Interrupt> for StepError {
    fn from(interrupt: Interrupt) -> Self {
        StepError::Suspended(interrupt.0)
    }
}

/// Execution context handed to each step invocation
#[derive(Debug, Default)]
pub struct StepContext {
    resumes: Vec<ResumeValue>,
    cursor: usize,
}

impl StepContext {
    /// A fresh context with no recorded resume values
    pub fn new() -> Self {
        Self::default()
    }

    /// A context replaying previously recorded resume values
    pub fn with_resumes(resumes: Vec<ResumeValue>) -> Self {
        Self { resumes, cursor: 0 }
    }

    /// Pause here and ask the external operator for input.
    ///
    /// Returns the recorded resume value if this call has already been
    /// answered on an earlier pass, otherwise signals suspension. Typical
    /// use inside a step:
    ///
    /// ```ignore
    /// let resume = ctx.interrupt(payload)?;
    /// ```
    pub fn interrupt(&mut self, payload: SuspendPayload) -> Result<ResumeValue, Interrupt> {
        if self.cursor < self.resumes.len() {
            let value = self.resumes[self.cursor].clone();
            self.cursor += 1;
            Ok(value)
        } else {
            Err(Interrupt(payload))
        }
    }

    /// Number of interrupt calls answered so far in this invocation
    pub fn answered(&self) -> usize {
        self.cursor
    }

    /// Recover the recorded resume values for checkpointing
    pub(crate) fn into_resumes(self) -> Vec<ResumeValue> {
        self.resumes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticketflow_types::{Ticket, TicketId};

    fn payload() -> SuspendPayload {
        SuspendPayload::ReviewRequired {
            tickets_to_validate: vec![Ticket::new(TicketId::new(1), "s", "b")],
        }
    }

    #[test]
    fn test_fresh_context_suspends_immediately() {
        let mut ctx = StepContext::new();
        assert!(ctx.interrupt(payload()).is_err());
        assert_eq!(ctx.answered(), 0);
    }

    #[test]
    fn test_replay_answers_in_order_then_suspends() {
        let mut ctx = StepContext::with_resumes(vec![
            ResumeValue::text("first"),
            ResumeValue::text("second"),
        ]);

        assert_eq!(ctx.interrupt(payload()).unwrap(), ResumeValue::text("first"));
        assert_eq!(ctx.interrupt(payload()).unwrap(), ResumeValue::text("second"));
        assert_eq!(ctx.answered(), 2);
        // Third call has no recorded answer
        assert!(ctx.interrupt(payload()).is_err());
    }

    #[test]
    fn test_interrupt_converts_to_step_error() {
        let mut ctx = StepContext::new();
        let err: StepError = ctx.interrupt(payload()).unwrap_err().into();
        assert!(matches!(err, StepError::Suspended(_)));
    }
}
