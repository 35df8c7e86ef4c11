//! Workflow engine for Ticketflow
//!
//! The engine drives a batch of tickets through a directed graph of steps.
//! It owns three things:
//!
//! - [`GraphDefinition`]: the registry of named steps, the static edge set,
//!   and the entry point.
//! - [`Scheduler`]: the single-threaded execution loop. Invoke the current
//!   step, merge its patch, resolve the successor (an explicit redirect
//!   overrides the static edge), stop at the terminal marker.
//! - The suspension channel: [`StepContext::interrupt`] pauses a run
//!   mid-step and [`Scheduler::resume`] continues it with an injected value.
//!
//! # Suspension model
//!
//! Suspension is replay-based. When a step interrupts, the scheduler
//! checkpoints the state *as it was when the step started* together with all
//! resume values the step has consumed so far. On resume the step runs again
//! from the top; earlier interrupt calls are answered in order from the
//! recorded values and the first unanswered call suspends again. A step may
//! therefore interrupt any number of times, as long as its behavior up to
//! each interrupt is deterministic in the state plus the injected values.
//!
//! Each suspension carries a fresh opaque token and is resumable exactly
//! once: the token is consumed by the matching [`Scheduler::resume`] call and
//! a new one is issued if the run suspends again. A suspended run can idle
//! indefinitely, or be serialized through [`Scheduler::checkpoint`] and
//! reconstructed later with [`Scheduler::restore`].
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use ticketflow_engine::{GraphDefinition, RunOutcome, Scheduler, Step, StepContext};
//! use ticketflow_types::*;
//!
//! struct Greet;
//!
//! impl Step for Greet {
//!     fn run(&self, state: &WorkflowState, _ctx: &mut StepContext)
//!         -> Result<Transition, StepError>
//!     {
//!         let patch = StatePatch::new().with_categorized_tickets(state.tickets.clone());
//!         Ok(Transition::update(patch))
//!     }
//! }
//!
//! let mut graph = GraphDefinition::new();
//! graph.add_step("greet", Arc::new(Greet)).unwrap();
//! graph.add_terminal_edge("greet").unwrap();
//! graph.set_entry("greet").unwrap();
//!
//! let mut scheduler = Scheduler::new(graph).unwrap();
//! let outcome = scheduler.run(vec![Ticket::new(TicketId::new(1), "hi", "there")]).unwrap();
//! assert!(matches!(outcome, RunOutcome::Completed(_)));
//! ```

#![deny(unsafe_code)]

pub mod channel;
pub mod context;
pub mod graph;
pub mod scheduler;

pub use context::{Interrupt, StepContext};
pub use graph::{GraphDefinition, Step};
pub use scheduler::{ResumeToken, RunCheckpoint, RunOutcome, Scheduler, SuspendedHandle};
