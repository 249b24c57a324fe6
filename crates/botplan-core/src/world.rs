//! Simulated robot world: named locations and mutable robot state.

use serde::{Deserialize, Serialize};

/// A 2-D pose with an optional heading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theta: Option<f64>,
}

impl Coordinates {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, theta: None }
    }
}

/// A named location the robot can navigate to.
///
/// The set of locations is supplied by the caller and immutable for the
/// duration of a plan execution; plan steps reference locations by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub coordinates: Coordinates,
}

/// The caller-supplied world map: all locations known at validation time.
///
/// Iteration preserves the order locations were supplied in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorldMap {
    locations: Vec<Location>,
}

impl WorldMap {
    pub fn new(locations: Vec<Location>) -> Self {
        Self { locations }
    }

    /// The default home layout shipped with the simulator.
    pub fn home() -> Self {
        let loc = |id: &str, name: &str, x: f64, y: f64| Location {
            id: id.to_string(),
            name: name.to_string(),
            coordinates: Coordinates::new(x, y),
        };
        Self::new(vec![
            loc("dock", "Dock", 0.0, 0.0),
            loc("kitchen", "Kitchen", 2.5, 1.0),
            loc("living_room", "Living Room", -1.5, 3.0),
            loc("bedroom", "Bedroom", 3.0, -2.0),
        ])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.locations.iter().any(|l| l.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.locations.iter().map(|l| l.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

/// Mutable simulated robot state.
///
/// Mutated only by the interpreter as a side effect of executing action
/// steps. `Eq + Hash` so that a `(step id, state)` pair can serve directly
/// as the cycle-detection fingerprint during execution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotState {
    /// Battery percentage in `0..=100`.
    pub battery_level: u8,
    /// Id of a location in the supplied [`WorldMap`].
    pub current_location_id: String,
    pub is_charging: bool,
    #[serde(default)]
    pub carrying_object: Option<String>,
    #[serde(default)]
    pub detected_object: Option<String>,
}

impl RobotState {
    /// The default initial state: fully charged and docked.
    pub fn docked() -> Self {
        Self {
            battery_level: 100,
            current_location_id: "dock".to_string(),
            is_charging: true,
            carrying_object: None,
            detected_object: None,
        }
    }
}
