//! Domain types for Ticketflow
//!
//! A Ticketflow run pushes a batch of support tickets through a directed
//! graph of steps: categorization, branch-specific handling (knowledge-base
//! lookup, sentiment triage with human review, product-complaint escalation),
//! and notification dispatch.
//!
//! # Key Concepts
//!
//! - **Ticket**: the unit of work. Immutable except for a handful of fields,
//!   each owned by exactly one step (category by categorization, sentiment by
//!   the feedback branch, `validated` by human review, `sent` by dispatch).
//! - **WorkflowState**: the single record threaded through every step of a
//!   run. Created once per run, discarded when the run terminates.
//! - **StatePatch**: a partial update to the state. Merging is
//!   shallow-overwrite per field: a patch replaces exactly the fields it
//!   names and leaves the rest untouched.
//! - **Transition**: what a step returns, a patch optionally paired with an
//!   explicit successor that overrides the graph's static edge.
//! - **SuspendPayload / ResumeValue**: the two halves of the suspension
//!   channel used for human-in-the-loop review and tool-style sends.
//!
//! # Design Principles
//!
//! 1. One concrete `Ticket` type end to end. No duck-typed shapes.
//! 2. Patches replace whole fields. No step merges into a nested collection.
//! 3. Malformed operator input degrades to "nothing validated", never panics.

#![deny(unsafe_code)]

mod errors;
mod payload;
mod state;
mod step;
mod ticket;

pub use errors::*;
pub use payload::*;
pub use state::*;
pub use step::*;
pub use ticket::*;
