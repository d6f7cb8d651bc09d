//! Vehicle-side half of the core: the state the drone is in, the commands that change
//! it and the integrator that moves it through simulated time.

mod command;
mod drone_state;
mod flight_mode;
mod geo;
mod state_machine;
mod telemetry;

pub use command::{Command, CommandError, CommandKind, CommandParseError};
pub use drone_state::{BatteryLevel, DroneState, ManualControl};
pub use flight_mode::{FlightMode, FlightPhase};
pub use geo::GeoPoint;
pub use state_machine::FlightStateMachine;
pub use telemetry::{DriftSource, Guidance, NoDrift, RandomDrift, TelemetryIntegrator};
