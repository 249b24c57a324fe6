//! The validated plan graph: a start id plus an id-keyed set of steps.

use std::collections::HashMap;

use crate::action::ActionCommand;
use crate::condition::Condition;

pub type StepId = String;

/// One node of a plan graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Applies a deterministic effect and advances to `next`, or terminates
    /// the plan when `next` is `None`.
    Action {
        command: ActionCommand,
        next: Option<StepId>,
    },
    /// Branches on a condition. Both branches are mandatory; a decision
    /// never terminates a plan directly.
    Decision {
        condition: Condition,
        on_true: StepId,
        on_false: StepId,
    },
}

impl Step {
    /// Step ids this step can advance to.
    pub fn successors(&self) -> Vec<&StepId> {
        match self {
            Step::Action { next, .. } => next.iter().collect(),
            Step::Decision {
                on_true, on_false, ..
            } => vec![on_true, on_false],
        }
    }
}

/// A validated, immutable plan.
///
/// Invariants (established by `botplan-validate`, relied upon by the
/// interpreter): step ids are unique and non-empty, `start` and every
/// `next`/`on_true`/`on_false` reference resolve to a defined step, and
/// every `navigate_to` target names a known location.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanGraph {
    start: StepId,
    order: Vec<StepId>,
    steps: HashMap<StepId, Step>,
}

impl PlanGraph {
    /// Assemble a graph without validation.
    ///
    /// Callers must uphold the invariants documented on [`PlanGraph`];
    /// intended for tests and benches that build graphs by hand. Everything
    /// else should go through `botplan-validate`.
    pub fn from_parts(start: impl Into<StepId>, steps: Vec<(StepId, Step)>) -> Self {
        let order = steps.iter().map(|(id, _)| id.clone()).collect();
        Self {
            start: start.into(),
            order,
            steps: steps.into_iter().collect(),
        }
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn get(&self, id: &str) -> Option<&Step> {
        self.steps.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.steps.contains_key(id)
    }

    /// Steps in the order they were defined.
    pub fn iter(&self) -> impl Iterator<Item = (&StepId, &Step)> {
        self.order.iter().filter_map(|id| Some((id, self.steps.get(id)?)))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
