//! Agent error type

use thiserror::Error;

/// Errors surfaced by agent implementations.
///
/// Steps treat these as per-ticket failures: log, skip the ticket, keep the
/// batch moving.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("classification failed: {0}")]
    Classification(String),

    #[error("answer generation failed: {0}")]
    Generation(String),

    #[error("knowledge base unavailable: {0}")]
    Io(#[from] std::io::Error),
}

pub type AgentResult<T> = Result<T, AgentError>;
