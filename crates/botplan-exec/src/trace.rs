//! Execution traces: dumb data recorded during a run, rendered by tooling.

use serde::{Deserialize, Serialize};

use botplan_core::RobotState;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// An action step with no successor was executed.
    CompletedNormally,
    /// The step budget ran out before the plan terminated.
    BudgetExceeded,
    /// A `(step, state)` pair repeated exactly; continuing could never
    /// produce a different outcome.
    CycleDetected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    True,
    False,
}

/// What kind of step produced a trace entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kindExecuted", rename_all = "lowercase")]
pub enum ExecutedKind {
    Action { cmd: String },
    Decision { branch: Branch },
}

/// One visited step: what ran, what it did, and the state afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceEntry {
    pub step_id: String,
    #[serde(flatten)]
    pub executed: ExecutedKind,
    /// Human-readable effect summary.
    #[serde(rename = "effectSummary")]
    pub effect: String,
    /// State snapshot after this step.
    #[serde(rename = "resultingState")]
    pub state: RobotState,
}

/// The ordered record of one execution run. Immutable once the run ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionTrace {
    pub entries: Vec<TraceEntry>,
    pub outcome: RunOutcome,
    pub final_state: RobotState,
}

impl ExecutionTrace {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
