use botplan_core::{ActionCommand, Condition, PlanGraph, RobotState, Step, StepId};
use botplan_exec::{execute, Branch, ExecutedKind, RunOutcome};

fn action(command: ActionCommand, next: Option<&str>) -> Step {
    Step::Action {
        command,
        next: next.map(String::from),
    }
}

fn decision(condition: &str, on_true: &str, on_false: &str) -> Step {
    Step::Decision {
        condition: Condition::parse(condition).unwrap(),
        on_true: on_true.to_string(),
        on_false: on_false.to_string(),
    }
}

fn graph(start: &str, steps: Vec<(&str, Step)>) -> PlanGraph {
    PlanGraph::from_parts(
        start,
        steps
            .into_iter()
            .map(|(id, s)| (StepId::from(id), s))
            .collect(),
    )
}

fn initial() -> RobotState {
    RobotState {
        battery_level: 80,
        current_location_id: "dock".to_string(),
        is_charging: false,
        carrying_object: None,
        detected_object: None,
    }
}

#[test]
fn navigate_then_pick_up() {
    let plan = graph(
        "1",
        vec![
            (
                "1",
                action(
                    ActionCommand::NavigateTo {
                        target: "kitchen".to_string(),
                    },
                    Some("2"),
                ),
            ),
            (
                "2",
                action(
                    ActionCommand::PickUp {
                        object_name: "cup".to_string(),
                    },
                    None,
                ),
            ),
        ],
    );

    let trace = execute(&plan, &initial(), 16);
    assert_eq!(trace.outcome, RunOutcome::CompletedNormally);
    assert_eq!(trace.len(), 2);
    assert_eq!(trace.entries[0].step_id, "1");
    assert_eq!(
        trace.entries[0].executed,
        ExecutedKind::Action {
            cmd: "navigate_to".to_string()
        }
    );
    assert_eq!(trace.final_state.current_location_id, "kitchen");
    assert_eq!(trace.final_state.carrying_object.as_deref(), Some("cup"));
    assert_eq!(trace.final_state.battery_level, 80);
}

#[test]
fn decision_takes_both_branches() {
    let plan = graph(
        "check",
        vec![
            ("check", decision("batteryLevel < 20", "low", "high")),
            (
                "low",
                action(ActionCommand::Charge { target_level: 90 }, None),
            ),
            ("high", action(ActionCommand::Stop, None)),
        ],
    );

    let mut low = initial();
    low.battery_level = 15;
    let trace = execute(&plan, &low, 16);
    assert_eq!(
        trace.entries[0].executed,
        ExecutedKind::Decision {
            branch: Branch::True
        }
    );
    assert_eq!(trace.entries[1].step_id, "low");
    assert_eq!(trace.final_state.battery_level, 90);
    assert!(trace.final_state.is_charging);

    let mut high = initial();
    high.battery_level = 50;
    let trace = execute(&plan, &high, 16);
    assert_eq!(
        trace.entries[0].executed,
        ExecutedKind::Decision {
            branch: Branch::False
        }
    );
    assert_eq!(trace.entries[1].step_id, "high");
}

#[test]
fn mutual_next_cycle_is_detected() {
    // Two steps referencing each other with no mutating action between.
    let plan = graph(
        "a",
        vec![
            ("a", action(ActionCommand::Stop, Some("b"))),
            ("b", action(ActionCommand::CheckBattery, Some("a"))),
        ],
    );

    let trace = execute(&plan, &initial(), 100);
    assert_eq!(trace.outcome, RunOutcome::CycleDetected);
    // a, b executed once; the revisit of a under identical state stops the run.
    assert_eq!(trace.len(), 2);
    assert_eq!(trace.final_state, initial());
}

#[test]
fn mutating_loop_with_repeating_state_cycles() {
    // pick_up/drop mutate state every step, but the combined effect is a
    // round trip, so the fingerprint still repeats.
    let plan = graph(
        "take",
        vec![
            (
                "take",
                action(
                    ActionCommand::PickUp {
                        object_name: "box".to_string(),
                    },
                    Some("put"),
                ),
            ),
            ("put", action(ActionCommand::Drop, Some("take"))),
        ],
    );

    let trace = execute(&plan, &initial(), 7);
    // drop restores the starting state, so the second visit of `take`
    // repeats the (step, state) pair exactly and fires the cycle check.
    assert_eq!(trace.outcome, RunOutcome::CycleDetected);
    assert_eq!(trace.len(), 2);
}

#[test]
fn budget_bounds_distinct_state_runs() {
    // A countdown via charge levels keeps producing fresh states.
    let mut steps = Vec::new();
    for i in 0..10u8 {
        steps.push((
            format!("s{i}"),
            Step::Action {
                command: ActionCommand::Charge {
                    target_level: 50 + i,
                },
                next: Some(format!("s{}", (i + 1) % 10)),
            },
        ));
    }
    let plan = PlanGraph::from_parts("s0", steps);

    let trace = execute(&plan, &initial(), 5);
    assert_eq!(trace.outcome, RunOutcome::BudgetExceeded);
    assert_eq!(trace.len(), 5);
}

#[test]
fn caller_state_is_never_mutated() {
    let plan = graph(
        "1",
        vec![(
            "1",
            action(
                ActionCommand::DetectObject {
                    object_type: "ball".to_string(),
                },
                None,
            ),
        )],
    );
    let state = initial();
    let trace = execute(&plan, &state, 4);
    assert_eq!(state, initial());
    assert_eq!(trace.final_state.detected_object.as_deref(), Some("ball"));
}

#[test]
fn reruns_are_byte_identical() {
    let plan = graph(
        "check",
        vec![
            ("check", decision("carryingObject == null", "take", "done")),
            (
                "take",
                action(
                    ActionCommand::PickUp {
                        object_name: "cup".to_string(),
                    },
                    Some("check"),
                ),
            ),
            (
                "done",
                action(
                    ActionCommand::Say {
                        text: "done".to_string(),
                        language: None,
                    },
                    None,
                ),
            ),
        ],
    );

    let a = execute(&plan, &initial(), 32);
    let b = execute(&plan, &initial(), 32);
    assert_eq!(a, b);
    assert_eq!(a.outcome, RunOutcome::CompletedNormally);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn trace_serializes_with_wire_field_names() {
    let plan = graph(
        "1",
        vec![(
            "1",
            action(
                ActionCommand::NavigateTo {
                    target: "kitchen".to_string(),
                },
                None,
            ),
        )],
    );
    let trace = execute(&plan, &initial(), 4);
    let json = serde_json::to_value(&trace).unwrap();
    assert_eq!(json["outcome"], "completed_normally");
    let entry = &json["entries"][0];
    assert_eq!(entry["stepId"], "1");
    assert_eq!(entry["kindExecuted"], "action");
    assert_eq!(entry["cmd"], "navigate_to");
    assert_eq!(entry["resultingState"]["currentLocationId"], "kitchen");
    assert!(entry["effectSummary"].is_string());
}

#[test]
fn charge_clamps_to_full() {
    let plan = graph(
        "1",
        vec![(
            "1",
            action(ActionCommand::Charge { target_level: 180 }, None),
        )],
    );
    let trace = execute(&plan, &initial(), 4);
    assert_eq!(trace.final_state.battery_level, 100);
    assert!(trace.final_state.is_charging);
}

#[test]
fn pick_up_overwrites_carried_object() {
    let plan = graph(
        "1",
        vec![
            (
                "1",
                action(
                    ActionCommand::PickUp {
                        object_name: "plate".to_string(),
                    },
                    Some("2"),
                ),
            ),
            (
                "2",
                action(
                    ActionCommand::PickUp {
                        object_name: "cup".to_string(),
                    },
                    None,
                ),
            ),
        ],
    );
    let trace = execute(&plan, &initial(), 4);
    assert_eq!(trace.final_state.carrying_object.as_deref(), Some("cup"));
}

#[test]
fn validated_wire_plan_executes_end_to_end() {
    use botplan_core::WorldMap;
    use botplan_validate::{parse_plan, validate};

    let raw = parse_plan(
        r#"{"start":"1","steps":[
            {"id":"1","type":"action","cmd":"navigate_to","params":{"target":"kitchen"},"next":"2"},
            {"id":"2","type":"decision","condition":"batteryLevel >= 20","true":"3","false":"4"},
            {"id":"3","type":"action","cmd":"pick_up","params":{"objectName":"cup"},"next":null},
            {"id":"4","type":"action","cmd":"go_to_dock","params":{},"next":null}
        ]}"#,
    )
    .unwrap();
    let validated = validate(&raw, &WorldMap::home()).unwrap();

    let trace = execute(&validated.plan, &initial(), 16);
    assert_eq!(trace.outcome, RunOutcome::CompletedNormally);
    let visited: Vec<_> = trace.entries.iter().map(|e| e.step_id.as_str()).collect();
    assert_eq!(visited, ["1", "2", "3"]);
    assert_eq!(trace.final_state.carrying_object.as_deref(), Some("cup"));
}
