//! Step names and step results
//!
//! A step returns a [`Transition`]: a state patch, optionally paired with an
//! explicit successor. The scheduler merges the patch and then resolves the
//! next step; an explicit redirect always overrides the graph's static edge.

use crate::StatePatch;
use serde::{Deserialize, Serialize};

// ── Step names ───────────────────────────────────────────────────────

/// Name of a step registered in the workflow graph
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StepName(pub String);

impl StepName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StepName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StepName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Where control goes after a step completes
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NextStep {
    /// Continue with the named step
    Step(StepName),
    /// The terminal marker: the run stops and the final state is returned
    End,
}

impl NextStep {
    pub fn step(name: impl Into<StepName>) -> Self {
        NextStep::Step(name.into())
    }

    pub fn is_end(&self) -> bool {
        matches!(self, NextStep::End)
    }
}

impl std::fmt::Display for NextStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NextStep::Step(name) => write!(f, "{name}"),
            NextStep::End => write!(f, "__end__"),
        }
    }
}

// ── Transitions ──────────────────────────────────────────────────────

/// The result of a successful step invocation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Transition {
    /// Merge the patch and follow the step's static default edge
    Update(StatePatch),
    /// Merge the patch and jump to an explicitly named successor,
    /// overriding the static edge
    Redirect { patch: StatePatch, next: NextStep },
}

impl Transition {
    pub fn update(patch: StatePatch) -> Self {
        Transition::Update(patch)
    }

    pub fn redirect(patch: StatePatch, next: impl Into<StepName>) -> Self {
        Transition::Redirect {
            patch,
            next: NextStep::Step(next.into()),
        }
    }

    /// Split into the patch and the optional explicit successor
    pub fn into_parts(self) -> (StatePatch, Option<NextStep>) {
        match self {
            Transition::Update(patch) => (patch, None),
            Transition::Redirect { patch, next } => (patch, Some(next)),
        }
    }
}
