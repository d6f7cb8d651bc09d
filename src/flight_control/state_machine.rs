use super::{Command, CommandError, DroneState, FlightMode};
use crate::events::{EventKind, EventLog};
use crate::util::Vec3D;

/// Validates commands against the current [`DroneState`] and applies legal ones.
///
/// The machine itself is stateless apart from its configuration; the phase it operates
/// on is always derived from the state it is handed (see [`FlightPhase`](super::FlightPhase)).
/// An `EMERGENCY` drone can only leave that mode by being re-armed.
#[derive(Debug, Clone, Copy)]
pub struct FlightStateMachine {
    takeoff_altitude: f64,
}

impl FlightStateMachine {
    pub fn new(takeoff_altitude: f64) -> Self { Self { takeoff_altitude } }

    pub fn takeoff_altitude(&self) -> f64 { self.takeoff_altitude }

    /// Computes the state resulting from `command`.
    ///
    /// # Arguments
    /// * `command` - The command to validate.
    /// * `state` - The state the command is issued in. It is never modified.
    ///
    /// # Returns
    /// The successor state, or the reason the command is illegal right now.
    pub fn apply(&self, command: &Command, state: &DroneState) -> Result<DroneState, CommandError> {
        let mut next = *state;
        let in_emergency = state.mode() == FlightMode::Emergency;
        match command {
            Command::Arm => {
                next.set_armed(true);
                if in_emergency {
                    next.set_mode(FlightMode::Stabilize);
                }
            }
            Command::Disarm => {
                if state.is_airborne() {
                    return Err(CommandError::InvalidTransition);
                }
                next.set_armed(false);
            }
            Command::Takeoff => {
                if !state.armed() {
                    return Err(CommandError::NotArmed);
                }
                if state.is_airborne() {
                    return Err(CommandError::AlreadyAirborne);
                }
                next.set_mode(FlightMode::Takeoff);
                next.set_altitude(self.takeoff_altitude);
            }
            Command::Land => {
                if state.altitude() < DroneState::AIRBORNE_ALTITUDE {
                    return Err(CommandError::AlreadyLanded);
                }
                next.set_mode(FlightMode::Land);
            }
            Command::Hover => {
                Self::require_link(state)?;
                if in_emergency {
                    return Err(CommandError::InvalidTransition);
                }
                next.set_mode(FlightMode::Hover);
                next.set_velocity(Vec3D::zero());
            }
            Command::Navigate(_) | Command::ReturnHome => {
                Self::require_link(state)?;
                if in_emergency {
                    return Err(CommandError::InvalidTransition);
                }
                if let Command::Navigate(target) = command {
                    if !target.is_finite() {
                        return Err(CommandError::InvalidTransition);
                    }
                }
                next.set_mode(FlightMode::Auto);
            }
            Command::Emergency => {
                next.set_armed(false);
                next.set_velocity(Vec3D::zero());
                next.set_altitude(0.0);
                next.set_mode(FlightMode::Emergency);
            }
        }
        Ok(next)
    }

    /// Applies `command` to `state` in place and records the outcome in `log`.
    ///
    /// On rejection the state is left untouched.
    pub fn execute(
        &self,
        command: &Command,
        state: &mut DroneState,
        log: &mut EventLog,
    ) -> Result<(), CommandError> {
        match self.apply(command, state) {
            Ok(next) => {
                log.emit(EventKind::CommandAccepted(command.kind()));
                Self::record_change(state, &next, log);
                *state = next;
                Ok(())
            }
            Err(error) => {
                log.emit(EventKind::CommandRejected { command: command.kind(), error });
                Err(error)
            }
        }
    }

    /// Switches mode outside of command handling, e.g. when a mission completes.
    pub(crate) fn force_mode(state: &mut DroneState, mode: FlightMode, log: &mut EventLog) {
        let mut next = *state;
        next.set_mode(mode);
        Self::record_change(state, &next, log);
        *state = next;
    }

    fn require_link(state: &DroneState) -> Result<(), CommandError> {
        if state.connected() { Ok(()) } else { Err(CommandError::NotConnected) }
    }

    fn record_change(prev: &DroneState, next: &DroneState, log: &mut EventLog) {
        if prev.mode() != next.mode() || prev.armed() != next.armed() {
            log.emit(EventKind::StateChanged { from: prev.mode(), to: next.mode(), armed: next.armed() });
        }
    }
}
