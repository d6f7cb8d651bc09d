//! Mission bookkeeping: which waypoints exist, which are done and what the drone
//! should fly to next.

mod executor;
#[allow(clippy::module_inception)]
mod mission;

pub use executor::MissionExecutor;
pub use mission::{CompletionPolicy, Mission, MissionStatus};

#[cfg(test)]
mod tests;
