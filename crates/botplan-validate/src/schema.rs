//! The schema contract a plan generator must target.
//!
//! Any producer (LLM or otherwise) must emit exactly this shape for the
//! validator to accept its output.

use botplan_core::{ActionCommand, WorldMap};

/// Canonical instruction text describing the plan JSON shape.
pub const SCHEMA_INSTRUCTION: &str = r#"You are a robot planning assistant. You MUST output a valid JSON plan.
The plan must have a "start" step id and a list of "steps".
Each action step has an "id", "type": "action", a "cmd" with its "params", and a "next" step id (null to finish).
Each decision step has an "id", "type": "decision", a "condition" of the form "<field> <op> <literal>" over batteryLevel, isCharging, currentLocationId, carryingObject or detectedObject, and "true"/"false" step ids for both branches.

Example:
{"start":"1","steps":[{"id":"1","type":"action","cmd":"navigate_to","params":{"target":"kitchen"},"next":null}]}"#;

/// The schema instruction extended with the commands and locations valid
/// for a given world map.
pub fn instruction_for(map: &WorldMap) -> String {
    let locations = map.ids().collect::<Vec<_>>().join(", ");
    format!(
        "{SCHEMA_INSTRUCTION}\n\nAllowed commands: {}.\nKnown location ids: {locations}.",
        ActionCommand::NAMES.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instruction_lists_world_locations() {
        let text = instruction_for(&WorldMap::home());
        assert!(text.contains("dock, kitchen, living_room, bedroom"));
        assert!(text.contains("navigate_to"));
        assert!(text.contains("\"start\""));
    }
}
