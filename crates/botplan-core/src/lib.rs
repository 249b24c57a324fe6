//! World model, plan graph types, and the condition mini-grammar.
//!
//! This crate is pure data: nothing here performs I/O or mutates state on
//! its own. Candidate plans from untrusted generators are turned into the
//! [`PlanGraph`] defined here by `botplan-validate`; `botplan-exec` walks a
//! validated graph against a [`RobotState`].

#![forbid(unsafe_code)]

pub mod action;
pub mod condition;
pub mod graph;
pub mod world;

pub use action::{ActionCommand, RotateDirection};
pub use condition::{CompareOp, Condition, ConditionField, ConditionParseError, Literal};
pub use graph::{PlanGraph, Step, StepId};
pub use world::{Coordinates, Location, RobotState, WorldMap};
