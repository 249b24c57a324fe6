//! The closed set of robot action commands.
//!
//! Adding a kind means extending this enum together with its validator and
//! interpreter match arms; there is no open string-keyed dispatch.

/// Direction qualifier for `rotate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateDirection {
    Left,
    Right,
    Clockwise,
    Counterclockwise,
}

impl RotateDirection {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "clockwise" => Some(Self::Clockwise),
            "counterclockwise" => Some(Self::Counterclockwise),
            _ => None,
        }
    }
}

/// An action kind together with its kind-specific parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionCommand {
    // Navigation
    NavigateTo { target: String },
    MoveForward { distance: f64, speed: Option<f64> },
    MoveBackward { distance: f64, speed: Option<f64> },
    Rotate { angle: f64, direction: Option<RotateDirection> },
    Stop,

    // Power
    Charge { target_level: u8 },
    GoToDock,

    // Manipulation
    PickUp { object_name: String },
    Drop,
    ScanObject { object_name: Option<String> },

    // Perception
    DetectObject { object_type: String },
    ScanEnvironment,

    // Communication
    Say { text: String, language: Option<String> },
    PlaySound,
    DisplayMessage { text: String },

    // Control
    Wait { duration: f64 },
    CheckBattery,
    CheckLocation,
}

impl ActionCommand {
    /// The wire name of this command, as emitted by plan generators.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NavigateTo { .. } => "navigate_to",
            Self::MoveForward { .. } => "move_forward",
            Self::MoveBackward { .. } => "move_backward",
            Self::Rotate { .. } => "rotate",
            Self::Stop => "stop",
            Self::Charge { .. } => "charge",
            Self::GoToDock => "go_to_dock",
            Self::PickUp { .. } => "pick_up",
            Self::Drop => "drop",
            Self::ScanObject { .. } => "scan_object",
            Self::DetectObject { .. } => "detect_object",
            Self::ScanEnvironment => "scan_environment",
            Self::Say { .. } => "say",
            Self::PlaySound => "play_sound",
            Self::DisplayMessage { .. } => "display_message",
            Self::Wait { .. } => "wait",
            Self::CheckBattery => "check_battery",
            Self::CheckLocation => "check_location",
        }
    }

    /// All wire names in the closed enumeration, in declaration order.
    pub const NAMES: &'static [&'static str] = &[
        "navigate_to",
        "move_forward",
        "move_backward",
        "rotate",
        "stop",
        "charge",
        "go_to_dock",
        "pick_up",
        "drop",
        "scan_object",
        "detect_object",
        "scan_environment",
        "say",
        "play_sound",
        "display_message",
        "wait",
        "check_battery",
        "check_location",
    ];
}
