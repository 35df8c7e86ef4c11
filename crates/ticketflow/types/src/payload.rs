//! Suspension channel payloads
//!
//! When a step needs external attention it emits a [`SuspendPayload`] and the
//! run pauses. The operator answers with a [`ResumeValue`]: a structured
//! record, free text, or nothing at all. Normalization of resume values lives
//! in the engine; these are the wire shapes.

use crate::Ticket;
use serde::{Deserialize, Serialize};

/// Structured record describing why a run is suspended
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SuspendPayload {
    /// Human validation is required for the listed tickets
    ReviewRequired { tickets_to_validate: Vec<Ticket> },
    /// A tool-style outbound call is surfaced to the operator/driver
    ToolCall {
        tool: String,
        args: ToolCallArgs,
        description: String,
    },
}

/// Arguments of a tool-style send call
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolCallArgs {
    pub subject: String,
    pub body: String,
    pub to: String,
}

/// Externally supplied data that unblocks a suspended step.
///
/// Operators are humans: the value may be well-formed JSON, a shorthand
/// string (`"all"`, `"3,5"`), or missing entirely. Normalization never fails;
/// it degrades to "nothing validated".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ResumeValue {
    /// A structured record, used as-is
    Record(serde_json::Value),
    /// Free text, parsed leniently
    Text(String),
    /// No payload was supplied
    Empty,
}

impl ResumeValue {
    pub fn record(value: serde_json::Value) -> Self {
        ResumeValue::Record(value)
    }

    pub fn text(value: impl Into<String>) -> Self {
        ResumeValue::Text(value.into())
    }
}

impl Default for ResumeValue {
    fn default() -> Self {
        ResumeValue::Empty
    }
}
