use crate::util::Vec3D;
use serde::{Deserialize, Serialize};

/// A single point of a planned path.
///
/// Waypoints are created in bulk by the [`PathPlanner`](super::PathPlanner) and only
/// ever mutated by the mission executor, which flags them as completed on arrival.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    id: String,
    position: Vec3D<f64>,
    completed: bool,
}

impl Waypoint {
    pub fn new(index: usize, position: Vec3D<f64>) -> Self {
        Self { id: format!("wp_{index}"), position, completed: false }
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn position(&self) -> Vec3D<f64> { self.position }
    pub fn is_completed(&self) -> bool { self.completed }

    pub(crate) fn mark_completed(&mut self) { self.completed = true; }
}
