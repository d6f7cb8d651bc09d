use crate::planning::Waypoint;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Lifecycle of the active mission.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MissionStatus {
    #[default]
    Idle,
    Planning,
    Ready,
    Executing,
    Complete,
    Cleared,
}

impl MissionStatus {
    /// Checks if the mission currently steers the drone.
    pub fn is_active(self) -> bool { matches!(self, Self::Ready | Self::Executing) }
}

/// How the executor decides that the current waypoint is done.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompletionPolicy {
    /// The drone is within `tolerance` metres of the waypoint.
    Arrival { tolerance: f64 },
    /// One waypoint per elapsed period, regardless of position.
    Interval(TimeDelta),
}

impl CompletionPolicy {
    pub const DEFAULT_TOLERANCE: f64 = 0.5;

    /// One waypoint every 1.5 seconds.
    pub fn fixed_interval() -> Self { Self::Interval(TimeDelta::milliseconds(1500)) }
}

impl Default for CompletionPolicy {
    fn default() -> Self { Self::Arrival { tolerance: Self::DEFAULT_TOLERANCE } }
}

/// An ordered set of waypoints plus the cursor of the next unreached one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mission {
    waypoints: Vec<Waypoint>,
    cursor: usize,
    status: MissionStatus,
}

impl Mission {
    pub(crate) fn with_status(status: MissionStatus) -> Self {
        Self { waypoints: Vec::new(), cursor: 0, status }
    }

    pub(crate) fn from_waypoints(waypoints: Vec<Waypoint>) -> Self {
        Self { waypoints, cursor: 0, status: MissionStatus::Ready }
    }

    pub fn waypoints(&self) -> &[Waypoint] { &self.waypoints }
    pub fn cursor(&self) -> usize { self.cursor }
    pub fn status(&self) -> MissionStatus { self.status }

    /// The next unreached waypoint, if any.
    pub fn current(&self) -> Option<&Waypoint> { self.waypoints.get(self.cursor) }

    pub fn remaining(&self) -> usize { self.waypoints.len().saturating_sub(self.cursor) }

    pub(crate) fn set_status(&mut self, status: MissionStatus) { self.status = status; }

    /// Marks the current waypoint completed and moves the cursor past it.
    pub(crate) fn advance(&mut self) -> Option<&Waypoint> {
        let index = self.cursor;
        let waypoint = self.waypoints.get_mut(index)?;
        waypoint.mark_completed();
        self.cursor += 1;
        self.waypoints.get(index)
    }
}
