//! Loosely-typed candidate plan shape, exactly as generators emit it.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid plan JSON: {0}")]
pub struct PlanParseError(#[from] serde_json::Error);

/// A candidate plan as received from a generator. Field types and reference
/// integrity are unchecked here; that is the validator's job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPlan {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub steps: Vec<RawStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawStep {
    #[serde(default)]
    pub id: String,
    /// `"action"` or `"decision"`.
    #[serde(rename = "type", default)]
    pub step_type: String,
    /// Action command name; actions only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmd: Option<String>,
    /// Condition string; decisions only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// Kind-specific params; shape checked during validation.
    #[serde(default)]
    pub params: Value,
    /// Successor for actions; `null` (or absent) terminates the plan.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(rename = "true", default, skip_serializing_if = "Option::is_none")]
    pub on_true: Option<String>,
    #[serde(rename = "false", default, skip_serializing_if = "Option::is_none")]
    pub on_false: Option<String>,
}

/// Deserialize a candidate plan from generator output.
pub fn parse_plan(json: &str) -> Result<RawPlan, PlanParseError> {
    Ok(serde_json::from_str(json)?)
}
