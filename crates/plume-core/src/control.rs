//! Parameter changes requested by the input layer

use crate::error::{PlumeError, Result};
use serde::{Deserialize, Serialize};

/// A single request to nudge a simulation parameter.
///
/// Controls are produced by whatever handles keyboard or menu input and are
/// consumed by the simulation at the start of the next frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    GravityUp,
    GravityDown,
    ChaosUp,
    ChaosDown,
    FountainMore,
    FountainFewer,
    SmokeMore,
    SmokeFewer,
    RedUp,
    RedDown,
    GreenUp,
    GreenDown,
    BlueUp,
    BlueDown,
    WindFaster,
    WindSlower,
    WindClockwise,
    WindCounterClockwise,
    Reset,
    Quit,
}

impl Control {
    pub const ALL: [Control; 20] = [
        Control::GravityUp,
        Control::GravityDown,
        Control::ChaosUp,
        Control::ChaosDown,
        Control::FountainMore,
        Control::FountainFewer,
        Control::SmokeMore,
        Control::SmokeFewer,
        Control::RedUp,
        Control::RedDown,
        Control::GreenUp,
        Control::GreenDown,
        Control::BlueUp,
        Control::BlueDown,
        Control::WindFaster,
        Control::WindSlower,
        Control::WindClockwise,
        Control::WindCounterClockwise,
        Control::Reset,
        Control::Quit,
    ];

    /// Stable snake_case name, as used in key binding tables
    pub fn name(self) -> &'static str {
        match self {
            Control::GravityUp => "gravity_up",
            Control::GravityDown => "gravity_down",
            Control::ChaosUp => "chaos_up",
            Control::ChaosDown => "chaos_down",
            Control::FountainMore => "fountain_more",
            Control::FountainFewer => "fountain_fewer",
            Control::SmokeMore => "smoke_more",
            Control::SmokeFewer => "smoke_fewer",
            Control::RedUp => "red_up",
            Control::RedDown => "red_down",
            Control::GreenUp => "green_up",
            Control::GreenDown => "green_down",
            Control::BlueUp => "blue_up",
            Control::BlueDown => "blue_down",
            Control::WindFaster => "wind_faster",
            Control::WindSlower => "wind_slower",
            Control::WindClockwise => "wind_clockwise",
            Control::WindCounterClockwise => "wind_counter_clockwise",
            Control::Reset => "reset",
            Control::Quit => "quit",
        }
    }

    /// Look a control up by its snake_case name
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name() == name)
            .ok_or_else(|| PlumeError::UnknownControl(name.to_string()))
    }

    /// One-line human description
    pub fn description(self) -> &'static str {
        match self {
            Control::GravityUp => "Strengthen gravity",
            Control::GravityDown => "Weaken gravity",
            Control::ChaosUp => "More chaotic smoke motion",
            Control::ChaosDown => "Less chaotic smoke motion",
            Control::FountainMore => "Double the fountain population",
            Control::FountainFewer => "Halve the fountain population",
            Control::SmokeMore => "Double the smoke population",
            Control::SmokeFewer => "Halve the smoke population",
            Control::RedUp => "More red in the smoke tint",
            Control::RedDown => "Less red in the smoke tint",
            Control::GreenUp => "More green in the smoke tint",
            Control::GreenDown => "Less green in the smoke tint",
            Control::BlueUp => "More blue in the smoke tint",
            Control::BlueDown => "Less blue in the smoke tint",
            Control::WindFaster => "Stronger wind",
            Control::WindSlower => "Weaker wind",
            Control::WindClockwise => "Turn the wind clockwise",
            Control::WindCounterClockwise => "Turn the wind counter-clockwise",
            Control::Reset => "Restore all defaults and empty both emitters",
            Control::Quit => "Stop the simulation",
        }
    }
}
