use super::{ObstacleMap, Waypoint};
use crate::config::PlannerConfig;
use crate::util::Vec3D;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Reasons a plan could not be produced.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanningError {
    /// Start and target coincide, there is nothing to fly.
    #[strum(to_string = "target coincides with the current position")]
    NoTarget,
    /// Every candidate path crosses an obstacle footprint.
    #[strum(to_string = "no obstacle-free path to the target")]
    Blocked,
    /// The request was superseded or aborted before it completed.
    #[strum(to_string = "planning was cancelled")]
    Cancelled,
}

impl std::error::Error for PlanningError {}

/// Side of the straight start-target line the intermediate points are placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Detour {
    Primary,
    Mirrored,
}

impl Detour {
    fn sign(self) -> f64 {
        match self {
            Detour::Primary => 1.0,
            Detour::Mirrored => -1.0,
        }
    }
}

/// Produces four-point polylines from the current position to a target.
///
/// The path starts at the current position, passes a point offset from the start and a
/// point offset from the target (both at target altitude), and ends at the target. The
/// planner is pure: identical inputs always yield identical waypoints.
#[derive(Debug, Clone, Copy)]
pub struct PathPlanner {
    config: PlannerConfig,
}

impl PathPlanner {
    pub fn new(config: PlannerConfig) -> Self { Self { config } }

    pub fn config(&self) -> &PlannerConfig { &self.config }

    /// Checks if start and target are too close for a meaningful plan.
    pub fn is_degenerate(&self, start: Vec3D<f64>, target: Vec3D<f64>) -> bool {
        start.in_radius_of(&target, self.config.tolerance)
    }

    /// Plans a path from `start` to `target`.
    ///
    /// # Arguments
    /// * `start` - Current drone position.
    /// * `target` - Requested destination.
    /// * `obstacles` - Footprints the path must avoid when validation is enabled.
    ///
    /// # Returns
    /// Four waypoints `wp_0..wp_3`, or a [`PlanningError`] if the target is degenerate
    /// or both the primary and the mirrored detour are blocked.
    pub fn plan(
        &self,
        start: Vec3D<f64>,
        target: Vec3D<f64>,
        obstacles: &ObstacleMap,
    ) -> Result<Vec<Waypoint>, PlanningError> {
        if self.is_degenerate(start, target) {
            return Err(PlanningError::NoTarget);
        }
        let path = [Detour::Primary, Detour::Mirrored]
            .into_iter()
            .map(|detour| self.polyline(start, target, detour))
            .find(|path| !self.config.validate_obstacles || obstacles.is_clear(path))
            .ok_or(PlanningError::Blocked)?;
        Ok(path.into_iter().enumerate().map(|(i, pos)| Waypoint::new(i, pos)).collect())
    }

    fn polyline(&self, start: Vec3D<f64>, target: Vec3D<f64>, detour: Detour) -> [Vec3D<f64>; 4] {
        let sign = detour.sign();
        let (sx, sy) = self.config.start_offset;
        let (tx, ty) = self.config.target_offset;
        [
            start,
            Vec3D::new(start.x() + sign * sx, start.y() + sign * sy, target.z()),
            Vec3D::new(target.x() + sign * tx, target.y() + sign * ty, target.z()),
            target,
        ]
    }
}
