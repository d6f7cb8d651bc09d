//! Runtime configuration of the flight control core.
//!
//! [`CoreConfig::default`] is tuned for tests: no planning latency and a fresh random
//! drift seed. [`CoreConfig::from_env`] is what the host binary uses; it restores the
//! two second "computing" window of the dashboard and reads `DRONE_*` overrides.

use crate::flight_control::{DroneState, GeoPoint};
use crate::mission::CompletionPolicy;
use crate::warn;
use chrono::TimeDelta;
use fixed::types::I32F32;
use std::{env, fmt::Display, str::FromStr, time::Duration};
use strum_macros::{Display, EnumString};

/// Width of the uniform per-tick perturbation applied by the telemetry integrator.
/// A width `w` samples from `[-w/2, w/2]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftConfig {
    /// Altitude perturbation in metres per tick.
    pub altitude: f64,
    /// Perturbation of the x and y velocity components in m/s per tick.
    pub horizontal_velocity: f64,
    /// Perturbation of the z velocity component in m/s per tick.
    pub vertical_velocity: f64,
}

impl DriftConfig {
    pub const NONE: DriftConfig =
        DriftConfig { altitude: 0.0, horizontal_velocity: 0.0, vertical_velocity: 0.0 };
}

impl Default for DriftConfig {
    fn default() -> Self { Self { altitude: 0.1, horizontal_velocity: 0.2, vertical_velocity: 0.1 } }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryConfig {
    pub drift: DriftConfig,
    /// Seed for the default random drift source; `None` draws one from the OS.
    pub drift_seed: Option<u64>,
    /// Battery percent drained per second of simulated time.
    pub battery_drain_per_sec: I32F32,
    /// Upper bound for commanded horizontal speed in m/s.
    pub max_speed: f64,
    /// Climb or sink rate at full throttle deflection in m/s.
    pub max_climb_rate: f64,
    /// Turn rate at full yaw deflection in degrees per second.
    pub max_yaw_rate: f64,
    /// Sink rate while landing in m/s.
    pub descent_rate: f64,
}

impl TelemetryConfig {
    /// Highest speed an operator may configure, in m/s.
    pub const MAX_SPEED_LIMIT: f64 = 25.0;
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            drift: DriftConfig::default(),
            drift_seed: None,
            battery_drain_per_sec: I32F32::lit("0.1"),
            max_speed: 10.0,
            max_climb_rate: 3.0,
            max_yaw_rate: 90.0,
            descent_rate: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerConfig {
    /// Horizontal offset of the first intermediate point from the start.
    pub start_offset: (f64, f64),
    /// Horizontal offset of the second intermediate point from the target.
    pub target_offset: (f64, f64),
    /// Distance below which start and target are considered identical, in metres.
    pub tolerance: f64,
    /// Reject or replan paths whose legs cross an obstacle footprint.
    pub validate_obstacles: bool,
    /// Artificial "computing" window before a plan is delivered.
    pub latency: Duration,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            start_offset: (20.0, 10.0),
            target_offset: (-15.0, -20.0),
            tolerance: 0.1,
            validate_obstacles: true,
            latency: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MissionConfig {
    pub completion: CompletionPolicy,
}

/// What to do with a navigate request while another plan is still being computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum PlanPolicy {
    /// Cancel the stale request and plan the new target.
    #[default]
    Replace,
    /// Refuse the new request with `CommandError::Busy`.
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoreConfig {
    pub telemetry: TelemetryConfig,
    pub planner: PlannerConfig,
    pub mission: MissionConfig,
    /// Altitude the drone is placed at by `takeoff`, in metres.
    pub takeoff_altitude: f64,
    pub plan_policy: PlanPolicy,
    /// Number of events retained for display.
    pub event_log_capacity: usize,
    /// Geodetic position of the local origin.
    pub home: GeoPoint,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            telemetry: TelemetryConfig::default(),
            planner: PlannerConfig::default(),
            mission: MissionConfig::default(),
            takeoff_altitude: 10.0,
            plan_policy: PlanPolicy::default(),
            event_log_capacity: 50,
            home: GeoPoint::new(47.6062, -122.3321),
        }
    }
}

impl CoreConfig {
    /// Planning latency used by the host when `DRONE_PLAN_LATENCY_MS` is unset.
    const HOST_PLAN_LATENCY: Duration = Duration::from_secs(2);

    /// Builds the host configuration from the process environment.
    pub fn from_env() -> Self { Self::from_lookup(|key| env::var(key).ok()) }

    /// Builds the host configuration from an arbitrary key lookup.
    ///
    /// # Arguments
    /// * `lookup` - Returns the raw value for a variable name, if set.
    ///
    /// # Returns
    /// The defaults with every valid override applied. Invalid values are reported and skipped.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.planner.latency = Self::HOST_PLAN_LATENCY;

        if let Some(speed) = parse_finite(&lookup, "DRONE_MAX_SPEED") {
            config.telemetry.max_speed = speed.clamp(0.0, TelemetryConfig::MAX_SPEED_LIMIT);
        }
        if let Some(alt) = parse_finite(&lookup, "DRONE_TAKEOFF_ALT") {
            // must end above the airborne threshold, otherwise `land` would be refused
            if alt > DroneState::AIRBORNE_ALTITUDE {
                config.takeoff_altitude = alt;
            } else {
                warn!("Ignoring DRONE_TAKEOFF_ALT={alt}, must exceed {}", DroneState::AIRBORNE_ALTITUDE);
            }
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, "DRONE_PLAN_LATENCY_MS") {
            config.planner.latency = Duration::from_millis(ms);
        }
        if let Some(seed) = parse_var::<u64, _>(&lookup, "DRONE_DRIFT_SEED") {
            config.telemetry.drift_seed = Some(seed);
        }
        if let Some(ms) = parse_var::<i64, _>(&lookup, "DRONE_WAYPOINT_INTERVAL_MS") {
            config.mission.completion = CompletionPolicy::Interval(TimeDelta::milliseconds(ms.max(0)));
        }
        if let Some(capacity) = parse_var::<usize, _>(&lookup, "DRONE_LOG_CAPACITY") {
            config.event_log_capacity = capacity;
        }
        if let Some(policy) = parse_var::<PlanPolicy, _>(&lookup, "DRONE_PLAN_POLICY") {
            config.plan_policy = policy;
        }
        config
    }
}

/// Like [`parse_var`], additionally rejecting `NaN` and infinities.
fn parse_finite<F>(lookup: &F, key: &str) -> Option<f64>
where
    F: Fn(&str) -> Option<String>,
{
    let value = parse_var::<f64, F>(lookup, key)?;
    if value.is_finite() {
        Some(value)
    } else {
        warn!("Ignoring non-finite value {value} for {key}");
        None
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("Ignoring invalid value '{raw}' for {key}: {err}");
            None
        }
    }
}
