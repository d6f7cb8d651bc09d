//! Flight control core of a simulated drone.
//!
//! A [`DroneCore`] owns the drone state and is driven by a host through commands and a
//! periodic tick. It validates commands with a flight state machine, integrates
//! position and battery over time, plans obstacle-checked paths and flies missions
//! through their waypoints, reporting everything on a severity-tagged event stream.
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]

mod logger;

pub mod config;
mod drone_core;
pub mod events;
pub mod flight_control;
pub mod mission;
pub mod planning;
pub mod util;

pub use config::CoreConfig;
pub use drone_core::DroneCore;

#[cfg(test)]
mod tests;
