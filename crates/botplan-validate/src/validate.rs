//! Structural and semantic validation of candidate plans.

use std::collections::{HashMap, HashSet};

use serde_json::Value;
use thiserror::Error;

use botplan_core::{
    ActionCommand, Condition, ConditionParseError, PlanGraph, RotateDirection, Step, StepId,
    WorldMap,
};

use crate::raw::{RawPlan, RawStep};

/// Why a candidate plan was rejected. Every variant names the offending
/// step (and field where one exists) so generators can be steered.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("plan has no start step id")]
    MissingStart,
    #[error("step at index {index} has an empty id")]
    MissingStepId { index: usize },
    #[error("duplicate step id `{step}`")]
    DuplicateStepId { step: String },
    #[error("start step `{start}` is not defined")]
    UnknownStartStep { start: String },
    #[error("step `{step}`: `type` must be \"action\" or \"decision\", got `{kind}`")]
    UnknownStepType { step: String, kind: String },
    #[error("step `{step}`: unknown action kind `{kind}`")]
    UnknownActionKind { step: String, kind: String },
    #[error("step `{step}`: missing or invalid required param `{field}`")]
    MissingRequiredParam { step: String, field: &'static str },
    #[error("step `{step}`: unknown location `{location}`")]
    UnknownLocationReference { step: String, location: String },
    #[error("step `{step}`: `{field}` references undefined step `{target}`")]
    DanglingReference {
        step: String,
        field: &'static str,
        target: String,
    },
    #[error("step `{step}`: invalid condition: {source}")]
    InvalidCondition {
        step: String,
        source: ConditionParseError,
    },
}

/// Non-fatal findings. Dead steps are suspicious, not invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    UnreachableStep { step: String },
}

/// A validated plan together with any warnings raised along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated {
    pub plan: PlanGraph,
    pub warnings: Vec<ValidationWarning>,
}

/// Check a candidate plan against the supplied world map.
///
/// Rules are applied in a fixed order and the first failure wins. Pure:
/// no robot state is read or written here.
pub fn validate(candidate: &RawPlan, map: &WorldMap) -> Result<Validated, ValidationError> {
    if candidate.start.is_empty() {
        return Err(ValidationError::MissingStart);
    }

    let mut defined: HashSet<&str> = HashSet::new();
    for (index, step) in candidate.steps.iter().enumerate() {
        if step.id.is_empty() {
            return Err(ValidationError::MissingStepId { index });
        }
        if !defined.insert(step.id.as_str()) {
            return Err(ValidationError::DuplicateStepId {
                step: step.id.clone(),
            });
        }
    }

    if !defined.contains(candidate.start.as_str()) {
        return Err(ValidationError::UnknownStartStep {
            start: candidate.start.clone(),
        });
    }

    for raw in &candidate.steps {
        if raw.step_type != "action" && raw.step_type != "decision" {
            return Err(ValidationError::UnknownStepType {
                step: raw.id.clone(),
                kind: raw.step_type.clone(),
            });
        }
    }

    // Action rules before decision rules, each in definition order.
    let mut built: Vec<Option<Step>> = vec![None; candidate.steps.len()];
    for (i, raw) in candidate.steps.iter().enumerate() {
        if raw.step_type == "action" {
            built[i] = Some(build_action(raw, map, &defined)?);
        }
    }
    for (i, raw) in candidate.steps.iter().enumerate() {
        if raw.step_type == "decision" {
            built[i] = Some(build_decision(raw, &defined)?);
        }
    }
    let built: Vec<(StepId, Step)> = candidate
        .steps
        .iter()
        .zip(built)
        .filter_map(|(raw, step)| Some((raw.id.clone(), step?)))
        .collect();

    let warnings = unreachable_steps(&candidate.start, &built)
        .into_iter()
        .map(|step| ValidationWarning::UnreachableStep { step })
        .collect::<Vec<_>>();

    tracing::debug!(
        steps = built.len(),
        warnings = warnings.len(),
        "candidate plan accepted"
    );

    Ok(Validated {
        plan: PlanGraph::from_parts(candidate.start.clone(), built),
        warnings,
    })
}

fn build_action(
    raw: &RawStep,
    map: &WorldMap,
    defined: &HashSet<&str>,
) -> Result<Step, ValidationError> {
    let Some(cmd) = raw.cmd.as_deref().filter(|c| !c.is_empty()) else {
        return Err(ValidationError::MissingRequiredParam {
            step: raw.id.clone(),
            field: "cmd",
        });
    };
    let command = build_command(&raw.id, cmd, &raw.params, map)?;

    if let Some(next) = raw.next.as_deref() {
        if !defined.contains(next) {
            return Err(ValidationError::DanglingReference {
                step: raw.id.clone(),
                field: "next",
                target: next.to_string(),
            });
        }
    }

    Ok(Step::Action {
        command,
        next: raw.next.clone(),
    })
}

fn build_decision(raw: &RawStep, defined: &HashSet<&str>) -> Result<Step, ValidationError> {
    let condition = match raw.condition.as_deref().map(str::trim) {
        None | Some("") => {
            return Err(ValidationError::MissingRequiredParam {
                step: raw.id.clone(),
                field: "condition",
            })
        }
        Some(text) => Condition::parse(text).map_err(|source| ValidationError::InvalidCondition {
            step: raw.id.clone(),
            source,
        })?,
    };

    let branch = |field: &'static str, target: &Option<String>| -> Result<StepId, ValidationError> {
        let Some(target) = target.as_deref().filter(|t| !t.is_empty()) else {
            return Err(ValidationError::MissingRequiredParam {
                step: raw.id.clone(),
                field,
            });
        };
        if !defined.contains(target) {
            return Err(ValidationError::DanglingReference {
                step: raw.id.clone(),
                field,
                target: target.to_string(),
            });
        }
        Ok(target.to_string())
    };

    Ok(Step::Decision {
        condition,
        on_true: branch("true", &raw.on_true)?,
        on_false: branch("false", &raw.on_false)?,
    })
}

/// Turn a `cmd` + loose params into a typed command, or reject.
fn build_command(
    step: &str,
    cmd: &str,
    params: &Value,
    map: &WorldMap,
) -> Result<ActionCommand, ValidationError> {
    let missing = |field: &'static str| ValidationError::MissingRequiredParam {
        step: step.to_string(),
        field,
    };

    let command = match cmd {
        "navigate_to" => {
            let target = str_param(params, "target").ok_or_else(|| missing("target"))?;
            if !map.contains(target) {
                return Err(ValidationError::UnknownLocationReference {
                    step: step.to_string(),
                    location: target.to_string(),
                });
            }
            ActionCommand::NavigateTo {
                target: target.to_string(),
            }
        }
        "move_forward" | "move_backward" => {
            let distance = num_param(params, "distance").ok_or_else(|| missing("distance"))?;
            let speed = opt_num_param(params, "speed").map_err(|()| missing("speed"))?;
            if cmd == "move_forward" {
                ActionCommand::MoveForward { distance, speed }
            } else {
                ActionCommand::MoveBackward { distance, speed }
            }
        }
        "rotate" => {
            let angle = num_param(params, "angle").ok_or_else(|| missing("angle"))?;
            let direction = match opt_str_param(params, "direction").map_err(|()| missing("direction"))? {
                None => None,
                Some(d) => Some(RotateDirection::parse(d).ok_or_else(|| missing("direction"))?),
            };
            ActionCommand::Rotate { angle, direction }
        }
        "stop" => ActionCommand::Stop,
        "charge" => {
            let level = int_param(params, "targetLevel").ok_or_else(|| missing("targetLevel"))?;
            if !(0..=100).contains(&level) {
                return Err(missing("targetLevel"));
            }
            ActionCommand::Charge {
                target_level: level as u8,
            }
        }
        "go_to_dock" => {
            // Dock navigation is only meaningful against a map with a dock.
            if !map.contains("dock") {
                return Err(ValidationError::UnknownLocationReference {
                    step: step.to_string(),
                    location: "dock".to_string(),
                });
            }
            ActionCommand::GoToDock
        }
        "pick_up" => ActionCommand::PickUp {
            object_name: str_param(params, "objectName")
                .ok_or_else(|| missing("objectName"))?
                .to_string(),
        },
        "drop" => ActionCommand::Drop,
        "scan_object" => ActionCommand::ScanObject {
            object_name: opt_str_param(params, "objectName")
                .map_err(|()| missing("objectName"))?
                .map(str::to_string),
        },
        "detect_object" => ActionCommand::DetectObject {
            object_type: str_param(params, "objectType")
                .ok_or_else(|| missing("objectType"))?
                .to_string(),
        },
        "scan_environment" => ActionCommand::ScanEnvironment,
        "say" => ActionCommand::Say {
            text: str_param(params, "text")
                .ok_or_else(|| missing("text"))?
                .to_string(),
            language: opt_str_param(params, "language")
                .map_err(|()| missing("language"))?
                .map(str::to_string),
        },
        "play_sound" => ActionCommand::PlaySound,
        "display_message" => ActionCommand::DisplayMessage {
            text: str_param(params, "text")
                .ok_or_else(|| missing("text"))?
                .to_string(),
        },
        "wait" => {
            let duration = num_param(params, "duration").ok_or_else(|| missing("duration"))?;
            if !duration.is_finite() || duration < 0.0 {
                return Err(missing("duration"));
            }
            ActionCommand::Wait { duration }
        }
        "check_battery" => ActionCommand::CheckBattery,
        "check_location" => ActionCommand::CheckLocation,
        other => {
            return Err(ValidationError::UnknownActionKind {
                step: step.to_string(),
                kind: other.to_string(),
            })
        }
    };

    Ok(command)
}

/// Ids of steps not reachable from `start` by following successors.
fn unreachable_steps(start: &str, steps: &[(StepId, Step)]) -> Vec<String> {
    let by_id: HashMap<&str, &Step> = steps.iter().map(|(id, s)| (id.as_str(), s)).collect();

    let mut reachable: HashSet<&str> = HashSet::new();
    let mut frontier = vec![start];
    while let Some(id) = frontier.pop() {
        if !reachable.insert(id) {
            continue;
        }
        if let Some(step) = by_id.get(id) {
            for succ in step.successors() {
                frontier.push(succ.as_str());
            }
        }
    }

    steps
        .iter()
        .filter(|(id, _)| !reachable.contains(id.as_str()))
        .map(|(id, _)| id.clone())
        .collect()
}

fn str_param<'a>(params: &'a Value, key: &str) -> Option<&'a str> {
    params.get(key)?.as_str()
}

fn num_param(params: &Value, key: &str) -> Option<f64> {
    params.get(key)?.as_f64()
}

fn int_param(params: &Value, key: &str) -> Option<i64> {
    params.get(key)?.as_i64()
}

/// Absent or null is fine; present with the wrong type is `Err`.
fn opt_str_param<'a>(params: &'a Value, key: &str) -> Result<Option<&'a str>, ()> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v.as_str().map(Some).ok_or(()),
    }
}

fn opt_num_param(params: &Value, key: &str) -> Result<Option<f64>, ()> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v.as_f64().map(Some).ok_or(()),
    }
}
