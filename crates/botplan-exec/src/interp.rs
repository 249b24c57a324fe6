//! The plan interpreter: a bounded, deterministic walk of a validated graph.

use std::collections::HashSet;

use botplan_core::{ActionCommand, PlanGraph, RobotState, Step};

use crate::trace::{Branch, ExecutedKind, ExecutionTrace, RunOutcome, TraceEntry};

/// Default bound for callers that have no better number.
pub const DEFAULT_STEP_BUDGET: u32 = 256;

/// Execute a validated plan against a snapshot of the robot state.
///
/// The caller's `initial` state is never mutated; the run owns a private
/// copy. No clock, RNG, or I/O is consulted, so identical inputs always
/// yield an identical trace.
pub fn execute(plan: &PlanGraph, initial: &RobotState, step_budget: u32) -> ExecutionTrace {
    let mut state = initial.clone();
    let mut entries: Vec<TraceEntry> = Vec::new();
    let mut seen: HashSet<(String, RobotState)> = HashSet::new();
    let mut current = plan.start().to_string();

    let outcome = loop {
        if entries.len() as u32 >= step_budget {
            tracing::debug!(step = %current, visited = entries.len(), "step budget exhausted");
            break RunOutcome::BudgetExceeded;
        }

        // Revisiting the same step under byte-identical state can never
        // produce a different outcome.
        if !seen.insert((current.clone(), state.clone())) {
            tracing::debug!(step = %current, "cycle detected");
            break RunOutcome::CycleDetected;
        }

        // Every followed id resolves, by the PlanGraph invariants.
        let Some(step) = plan.get(&current) else {
            unreachable!("plan graph invariant violated: step `{current}` not defined")
        };

        match step {
            Step::Action { command, next } => {
                let effect = apply(command, &mut state);
                tracing::trace!(step = %current, cmd = command.name(), %effect, "action");
                entries.push(TraceEntry {
                    step_id: current.clone(),
                    executed: ExecutedKind::Action {
                        cmd: command.name().to_string(),
                    },
                    effect,
                    state: state.clone(),
                });
                match next {
                    Some(next) => current = next.clone(),
                    None => break RunOutcome::CompletedNormally,
                }
            }
            Step::Decision {
                condition,
                on_true,
                on_false,
            } => {
                let taken = condition.evaluate(&state);
                let branch = if taken { Branch::True } else { Branch::False };
                tracing::trace!(step = %current, %condition, taken, "decision");
                entries.push(TraceEntry {
                    step_id: current.clone(),
                    executed: ExecutedKind::Decision { branch },
                    effect: format!("{condition} -> {}", if taken { "true" } else { "false" }),
                    state: state.clone(),
                });
                current = if taken { on_true.clone() } else { on_false.clone() };
            }
        }
    };

    tracing::debug!(?outcome, visited = entries.len(), "run finished");

    ExecutionTrace {
        entries,
        outcome,
        final_state: state,
    }
}

/// Apply one action's deterministic state transition; returns the effect
/// summary recorded in the trace.
fn apply(command: &ActionCommand, state: &mut RobotState) -> String {
    match command {
        ActionCommand::NavigateTo { target } => {
            state.current_location_id = target.clone();
            format!("moved to `{target}`")
        }
        ActionCommand::GoToDock => {
            state.current_location_id = "dock".to_string();
            "moved to `dock`".to_string()
        }
        ActionCommand::Charge { target_level } => {
            state.is_charging = true;
            state.battery_level = (*target_level).min(100);
            format!("charging to {}%", state.battery_level)
        }
        ActionCommand::PickUp { object_name } => {
            // Single-object capacity: a prior object is silently replaced.
            state.carrying_object = Some(object_name.clone());
            format!("picked up `{object_name}`")
        }
        ActionCommand::Drop => {
            state.carrying_object = None;
            "dropped carried object".to_string()
        }
        ActionCommand::DetectObject { object_type } => {
            state.detected_object = Some(object_type.clone());
            format!("detected `{object_type}`")
        }

        // The remaining kinds mutate nothing; they are recorded purely for
        // trace completeness.
        ActionCommand::MoveForward { distance, .. } => format!("moved forward {distance}m"),
        ActionCommand::MoveBackward { distance, .. } => format!("moved backward {distance}m"),
        ActionCommand::Rotate { angle, .. } => format!("rotated {angle} degrees"),
        ActionCommand::Stop => "stopped".to_string(),
        ActionCommand::ScanObject { object_name } => match object_name {
            Some(name) => format!("scanned `{name}`"),
            None => "scanned object".to_string(),
        },
        ActionCommand::ScanEnvironment => "scanned environment".to_string(),
        ActionCommand::Say { text, .. } => format!("said \"{text}\""),
        ActionCommand::PlaySound => "played sound".to_string(),
        ActionCommand::DisplayMessage { text } => format!("displayed \"{text}\""),
        ActionCommand::Wait { duration } => format!("waited {duration}s"),
        ActionCommand::CheckBattery => format!("battery at {}%", state.battery_level),
        ActionCommand::CheckLocation => format!("at `{}`", state.current_location_id),
    }
}
