use super::DroneState;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Autopilot mode reported by the flight controller.
#[derive(
    Debug, PartialEq, Eq, Clone, Copy, Hash, Default, Display, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FlightMode {
    #[default]
    Stabilize,
    Takeoff,
    Land,
    Hover,
    Auto,
    Emergency,
}

impl FlightMode {
    /// Modes in which the vehicle is expected to be flying under automatic control.
    pub fn is_airborne(self) -> bool { matches!(self, Self::Takeoff | Self::Hover | Self::Auto) }
}

impl TryFrom<&str> for FlightMode {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "stabilize" => Ok(FlightMode::Stabilize),
            "takeoff" => Ok(FlightMode::Takeoff),
            "land" => Ok(FlightMode::Land),
            "hover" => Ok(FlightMode::Hover),
            "auto" => Ok(FlightMode::Auto),
            "emergency" => Ok(FlightMode::Emergency),
            other => Err(format!("unknown flight mode '{other}'")),
        }
    }
}

/// Coarse phase of the flight state machine, derived from a [`DroneState`].
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FlightPhase {
    Disarmed,
    Armed,
    ArmedAirborne,
    Landing,
    Emergency,
}

impl FlightPhase {
    /// Classifies a drone state into its state machine phase.
    pub fn of(state: &DroneState) -> Self {
        if state.mode() == FlightMode::Emergency {
            return FlightPhase::Emergency;
        }
        if !state.armed() {
            return FlightPhase::Disarmed;
        }
        match state.mode() {
            FlightMode::Land if state.altitude() > 0.0 => FlightPhase::Landing,
            mode if mode.is_airborne() || state.is_airborne() => FlightPhase::ArmedAirborne,
            _ => FlightPhase::Armed,
        }
    }
}
