use crate::flight_control::{CommandError, CommandKind, FlightMode};
use crate::planning::PlanningError;
use crate::util::Vec3D;
use chrono::{DateTime, Utc};
use fixed::types::I32F32;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use strum_macros::{Display, EnumIter};

/// Display severity of a [`CoreEvent`], fixed at the point of emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Success,
}

/// What happened inside the core.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// The drone state changed as the result of a command or supervision.
    StateChanged { from: FlightMode, to: FlightMode, armed: bool },
    CommandAccepted(CommandKind),
    CommandRejected { command: CommandKind, error: CommandError },
    ConnectionChanged(bool),
    PlanRequested { target: Vec3D<f64> },
    PlanReady { waypoints: usize },
    PlanFailed(PlanningError),
    WaypointReached { id: String, index: usize, total: usize },
    MissionComplete,
    MissionCleared,
    BatteryLow(I32F32),
    BatteryDepleted,
}

impl EventKind {
    /// The severity a display layer should render this event with.
    pub fn severity(&self) -> Severity {
        match self {
            EventKind::StateChanged { to: FlightMode::Emergency, .. }
            | EventKind::CommandAccepted(CommandKind::Emergency)
            | EventKind::PlanFailed(PlanningError::Blocked)
            | EventKind::BatteryDepleted => Severity::Error,
            EventKind::CommandRejected { .. }
            | EventKind::ConnectionChanged(false)
            | EventKind::PlanFailed(_)
            | EventKind::BatteryLow(_) => Severity::Warning,
            EventKind::ConnectionChanged(true)
            | EventKind::PlanReady { .. }
            | EventKind::MissionComplete => Severity::Success,
            EventKind::StateChanged { .. }
            | EventKind::CommandAccepted(_)
            | EventKind::PlanRequested { .. }
            | EventKind::WaypointReached { .. }
            | EventKind::MissionCleared => Severity::Info,
        }
    }
}

impl Display for EventKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::StateChanged { from, to, armed } => {
                let arming = if *armed { "armed" } else { "disarmed" };
                if from == to {
                    write!(f, "State updated in {to} ({arming})")
                } else {
                    write!(f, "Flight mode {from} -> {to} ({arming})")
                }
            }
            EventKind::CommandAccepted(kind) => write!(f, "{}", kind.describe()),
            EventKind::CommandRejected { command, error } => {
                write!(f, "Cannot {command}: {error}")
            }
            EventKind::ConnectionChanged(true) => write!(f, "Connected to flight controller"),
            EventKind::ConnectionChanged(false) => write!(f, "Lost link to flight controller"),
            EventKind::PlanRequested { target } => write!(f, "Computing path to {target}"),
            EventKind::PlanReady { waypoints } => write!(f, "Path ready with {waypoints} waypoints"),
            EventKind::PlanFailed(err) => write!(f, "Path planning failed: {err}"),
            EventKind::WaypointReached { id, index, total } => {
                write!(f, "Reached waypoint {id} ({}/{total})", index + 1)
            }
            EventKind::MissionComplete => write!(f, "Mission complete"),
            EventKind::MissionCleared => write!(f, "Mission cleared"),
            EventKind::BatteryLow(charge) => write!(f, "Battery low: {charge:.1}%"),
            EventKind::BatteryDepleted => write!(f, "Battery depleted"),
        }
    }
}

/// A timestamped, severity-tagged record for the logging collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreEvent {
    timestamp: DateTime<Utc>,
    severity: Severity,
    kind: EventKind,
    message: String,
}

impl CoreEvent {
    pub fn new(kind: EventKind) -> Self {
        Self { timestamp: Utc::now(), severity: kind.severity(), message: kind.to_string(), kind }
    }

    pub fn timestamp(&self) -> DateTime<Utc> { self.timestamp }
    pub fn severity(&self) -> Severity { self.severity }
    pub fn kind(&self) -> &EventKind { &self.kind }
    pub fn message(&self) -> &str { &self.message }
}

impl Display for CoreEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.timestamp.format("%H:%M:%S"), self.message)
    }
}
