//! Deterministic execution of validated plan graphs.
//!
//! [`execute`] walks a `PlanGraph` against a private copy of the robot
//! state and always terminates: successor references are guaranteed to
//! resolve by the graph's invariants, and non-terminating plans are bounded
//! by the step budget and exact-state cycle detection. The result is always
//! a complete trace, never a partial or crashed run.

#![forbid(unsafe_code)]

pub mod interp;
pub mod trace;

pub use interp::{execute, DEFAULT_STEP_BUDGET};
pub use trace::{Branch, ExecutedKind, ExecutionTrace, RunOutcome, TraceEntry};
