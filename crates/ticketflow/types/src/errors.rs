//! Error types for the workflow layer

use crate::{StepName, SuspendPayload};

/// Errors that can occur in workflow operations
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("step not found: {0}")]
    StepNotFound(StepName),

    #[error("duplicate step: {0}")]
    DuplicateStep(StepName),

    #[error("no entry step defined")]
    NoEntryStep,

    #[error("edge references unknown step: {from} -> {to}")]
    UnknownEdgeTarget { from: StepName, to: StepName },

    #[error("duplicate edge: {from} -> {to}")]
    DuplicateEdge { from: StepName, to: StepName },

    #[error("step '{0}' has no static edge and returned no directive")]
    MissingDefaultEdge(StepName),

    #[error("step '{step}' declares {count} static edges; a directive is required to choose one")]
    AmbiguousDefaultEdge { step: StepName, count: usize },

    #[error("disconnected graph: unreachable steps")]
    DisconnectedGraph,

    #[error("step limit exceeded after {0} transitions")]
    StepLimitExceeded(usize),

    #[error("no suspended run to resume")]
    NotSuspended,

    #[error("resume token does not match the active suspension")]
    TokenMismatch,

    #[error("fatal failure in step '{step}': {reason}")]
    StepFailed { step: StepName, reason: String },
}

/// Result type alias for workflow operations
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Errors a step invocation can produce.
///
/// `Suspended` is control flow, not failure: the scheduler converts it into
/// a suspended run handle. `Fatal` aborts the run; per-item problems are
/// caught inside steps and never reach this type.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("step suspended awaiting external input")]
    Suspended(SuspendPayload),

    #[error("{0}")]
    Fatal(String),
}
