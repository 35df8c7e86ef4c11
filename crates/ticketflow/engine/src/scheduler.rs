//! Single-threaded scheduler: drive, suspend, resume
//!
//! The scheduler walks the graph one step at a time. A run either finishes
//! at the terminal marker or suspends at an interrupt; a suspended run is
//! held as a checkpoint inside the scheduler and can also be serialized for
//! storage and reconstructed later.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ticketflow_types::{
    NextStep, ResumeValue, StepError, StepName, SuspendPayload, Ticket, WorkflowError,
    WorkflowResult, WorkflowState,
};

use crate::context::StepContext;
use crate::graph::GraphDefinition;

/// Safety valve against redirect cycles
const DEFAULT_STEP_LIMIT: usize = 128;

// ── Tokens and handles ──

/// Opaque token identifying one suspension. Consumed by the matching
/// resume call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResumeToken(pub String);

impl ResumeToken {
    fn mint() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResumeToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the caller gets back when a run pauses for external input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuspendedHandle {
    pub token: ResumeToken,
    pub payload: SuspendPayload,
    pub step: StepName,
    pub suspended_at: DateTime<Utc>,
}

/// Result of driving a run: it either finished or paused
#[derive(Debug)]
pub enum RunOutcome {
    Completed(WorkflowState),
    Suspended(SuspendedHandle),
}

impl RunOutcome {
    pub fn completed(self) -> Option<WorkflowState> {
        match self {
            RunOutcome::Completed(state) => Some(state),
            RunOutcome::Suspended(_) => None,
        }
    }

    pub fn suspended(self) -> Option<SuspendedHandle> {
        match self {
            RunOutcome::Completed(_) => None,
            RunOutcome::Suspended(handle) => Some(handle),
        }
    }
}

// ── Checkpoints ──

/// Everything needed to reconstruct a suspended run.
///
/// `state` is the shared state as it was when the suspended step started;
/// `resumes` are the values the step has already consumed, in call order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunCheckpoint {
    pub token: ResumeToken,
    pub step: StepName,
    pub state: WorkflowState,
    pub resumes: Vec<ResumeValue>,
    pub payload: SuspendPayload,
    pub suspended_at: DateTime<Utc>,
}

// ── Scheduler ──

/// Drives a batch of tickets through a validated graph
pub struct Scheduler {
    graph: GraphDefinition,
    max_steps: usize,
    pending: Option<RunCheckpoint>,
}

impl Scheduler {
    /// Build a scheduler over a graph, validating the graph first
    pub fn new(graph: GraphDefinition) -> WorkflowResult<Self> {
        graph.validate()?;
        Ok(Self {
            graph,
            max_steps: DEFAULT_STEP_LIMIT,
            pending: None,
        })
    }

    /// Override the step-execution limit
    pub fn with_step_limit(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Start a fresh run over a batch of tickets
    pub fn run(&mut self, tickets: Vec<Ticket>) -> WorkflowResult<RunOutcome> {
        let entry = self
            .graph
            .entry()
            .cloned()
            .ok_or(WorkflowError::NoEntryStep)?;
        tracing::info!(entry = %entry, tickets = tickets.len(), "starting workflow run");
        self.drive(entry, WorkflowState::with_tickets(tickets), Vec::new())
    }

    /// Continue a suspended run with an operator-supplied value.
    ///
    /// The token must match the pending suspension exactly; on mismatch the
    /// suspension is kept intact so a later call with the right token still
    /// works. Each token is consumed by its one successful resume.
    pub fn resume(&mut self, token: &ResumeToken, value: ResumeValue) -> WorkflowResult<RunOutcome> {
        let checkpoint = self.pending.take().ok_or(WorkflowError::NotSuspended)?;
        if checkpoint.token != *token {
            self.pending = Some(checkpoint);
            return Err(WorkflowError::TokenMismatch);
        }

        let RunCheckpoint {
            step,
            state,
            mut resumes,
            ..
        } = checkpoint;
        resumes.push(value);
        tracing::info!(step = %step, answers = resumes.len(), "resuming suspended run");
        self.drive(step, state, resumes)
    }

    /// Whether a suspended run is waiting for input
    pub fn is_suspended(&self) -> bool {
        self.pending.is_some()
    }

    /// Snapshot the pending suspension for storage
    pub fn checkpoint(&self) -> Option<&RunCheckpoint> {
        self.pending.as_ref()
    }

    /// Reinstall a previously serialized suspension
    pub fn restore(&mut self, checkpoint: RunCheckpoint) {
        self.pending = Some(checkpoint);
    }

    fn drive(
        &mut self,
        mut current: StepName,
        mut state: WorkflowState,
        mut resumes: Vec<ResumeValue>,
    ) -> WorkflowResult<RunOutcome> {
        let mut executed = 0usize;

        loop {
            if executed >= self.max_steps {
                return Err(WorkflowError::StepLimitExceeded(self.max_steps));
            }
            executed += 1;

            let step = self.graph.step(&current)?.clone();
            let mut ctx = StepContext::with_resumes(std::mem::take(&mut resumes));

            tracing::debug!(step = %current, "executing step");
            match step.run(&state, &mut ctx) {
                Ok(transition) => {
                    let (patch, directive) = transition.into_parts();
                    state.apply(patch);

                    let next = match directive {
                        Some(next) => next,
                        None => self.graph.default_successor(&current)?,
                    };
                    match next {
                        NextStep::End => {
                            tracing::info!(steps = executed, "workflow run completed");
                            return Ok(RunOutcome::Completed(state));
                        }
                        NextStep::Step(name) => current = name,
                    }
                }
                Err(StepError::Suspended(payload)) => {
                    let token = ResumeToken::mint();
                    let suspended_at = Utc::now();
                    tracing::info!(step = %current, token = %token, "run suspended");
                    self.pending = Some(RunCheckpoint {
                        token: token.clone(),
                        step: current.clone(),
                        state,
                        resumes: ctx.into_resumes(),
                        payload: payload.clone(),
                        suspended_at,
                    });
                    return Ok(RunOutcome::Suspended(SuspendedHandle {
                        token,
                        payload,
                        step: current,
                        suspended_at,
                    }));
                }
                Err(StepError::Fatal(reason)) => {
                    tracing::error!(step = %current, reason = %reason, "step failed");
                    return Err(WorkflowError::StepFailed {
                        step: current,
                        reason,
                    });
                }
            }
        }
    }
}
