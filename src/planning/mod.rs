//! Obstacle-aware path planning.
//!
//! The [`PathPlanner`] turns a start and a target into a short polyline of
//! [`Waypoint`]s; a [`PlanRequest`] runs it off the tick path with an optional
//! artificial latency and can be cancelled at any time.

mod obstacle_map;
mod path_planner;
mod plan_request;
mod waypoint;

pub use obstacle_map::{Obstacle, ObstacleMap, Probe};
pub use path_planner::{PathPlanner, PlanningError};
pub use plan_request::{PlanRequest, PlanResult};
pub use waypoint::Waypoint;

#[cfg(test)]
mod tests;
