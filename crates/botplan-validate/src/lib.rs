//! The untrusted-producer boundary: raw candidate plans, the validator, and
//! the generator schema contract.
//!
//! Generator output is never trusted as already typed. It is deserialized
//! into the loosely-typed [`RawPlan`] first, then [`validate`] either
//! produces a strongly-typed `PlanGraph` or rejects the candidate with a
//! structured error naming the offending step and field.

#![forbid(unsafe_code)]

pub mod raw;
pub mod schema;
pub mod validate;

pub use raw::{parse_plan, PlanParseError, RawPlan, RawStep};
pub use schema::{instruction_for, SCHEMA_INSTRUCTION};
pub use validate::{validate, Validated, ValidationError, ValidationWarning};
