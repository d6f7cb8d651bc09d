use super::FlightMode;
use crate::util::Vec3D;
use chrono::TimeDelta;
use fixed::types::I32F32;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Kinematic and control state of the simulated drone.
///
/// The state is exclusively written by the [`DroneCore`](crate::DroneCore) that owns it;
/// callers only ever receive copies. `altitude` is not stored separately but read from
/// `position.z`, which is kept non-negative by every mutator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DroneState {
    /// Position in metres, local world frame (x east, y north, z up).
    position: Vec3D<f64>,
    /// Velocity in m/s, same frame as `position`.
    velocity: Vec3D<f64>,
    /// Heading in degrees, clockwise from north, within `[0, 360)`.
    heading: f64,
    /// Remaining battery charge in percent, within `[0, 100]`.
    battery: I32F32,
    armed: bool,
    connected: bool,
    mode: FlightMode,
}

/// Battery classification used for status display and supervision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BatteryLevel {
    Low,
    Caution,
    Nominal,
}

impl Default for DroneState {
    fn default() -> Self {
        Self {
            position: Vec3D::zero(),
            velocity: Vec3D::zero(),
            heading: 0.0,
            battery: Self::MAX_BATTERY,
            armed: false,
            connected: false,
            mode: FlightMode::Stabilize,
        }
    }
}

impl DroneState {
    /// Altitude above which the drone counts as airborne.
    pub const AIRBORNE_ALTITUDE: f64 = 1.0;
    pub const MAX_BATTERY: I32F32 = I32F32::lit("100");
    pub const MIN_BATTERY: I32F32 = I32F32::ZERO;
    /// Charge above which the battery is nominal.
    const NOMINAL_BATTERY: I32F32 = I32F32::lit("50");
    /// Charge above which the battery is only a caution.
    const CAUTION_BATTERY: I32F32 = I32F32::lit("20");
    /// Seconds of flight time per percent of charge (0.3 minutes).
    const FLIGHT_SECONDS_PER_PERCENT: I32F32 = I32F32::lit("18");

    /// Returns a copy placed at `position`; negative altitudes are clamped to the ground.
    #[must_use]
    pub fn with_position(mut self, position: Vec3D<f64>) -> Self {
        self.set_position(position);
        self
    }

    /// Returns a copy with the given battery charge, clamped to `[0, 100]`.
    #[must_use]
    pub fn with_battery(mut self, battery: I32F32) -> Self {
        self.set_battery(battery);
        self
    }

    /// Returns a copy with the given link state.
    #[must_use]
    pub fn with_connected(mut self, connected: bool) -> Self {
        self.connected = connected;
        self
    }

    pub fn position(&self) -> Vec3D<f64> { self.position }
    pub fn velocity(&self) -> Vec3D<f64> { self.velocity }
    pub fn altitude(&self) -> f64 { self.position.z() }
    pub fn heading(&self) -> f64 { self.heading }
    pub fn battery(&self) -> I32F32 { self.battery }
    pub fn armed(&self) -> bool { self.armed }
    pub fn connected(&self) -> bool { self.connected }
    pub fn mode(&self) -> FlightMode { self.mode }

    /// Checks if the drone is above [`Self::AIRBORNE_ALTITUDE`].
    pub fn is_airborne(&self) -> bool { self.altitude() > Self::AIRBORNE_ALTITUDE }

    /// Horizontal speed over ground in m/s.
    pub fn ground_speed(&self) -> f64 { self.velocity.horizontal_abs() }

    pub fn battery_level(&self) -> BatteryLevel {
        if self.battery > Self::NOMINAL_BATTERY {
            BatteryLevel::Nominal
        } else if self.battery > Self::CAUTION_BATTERY {
            BatteryLevel::Caution
        } else {
            BatteryLevel::Low
        }
    }

    /// Estimated remaining flight time at the current charge.
    pub fn est_flight_time(&self) -> TimeDelta {
        TimeDelta::seconds((self.battery * Self::FLIGHT_SECONDS_PER_PERCENT).to_num::<i64>())
    }

    pub(crate) fn set_position(&mut self, position: Vec3D<f64>) {
        self.position = position.with_z(position.z().max(0.0));
    }

    pub(crate) fn set_altitude(&mut self, altitude: f64) {
        self.position = self.position.with_z(altitude.max(0.0));
    }

    pub(crate) fn set_velocity(&mut self, velocity: Vec3D<f64>) { self.velocity = velocity; }

    pub(crate) fn set_heading(&mut self, heading: f64) { self.heading = heading.rem_euclid(360.0); }

    pub(crate) fn set_battery(&mut self, battery: I32F32) {
        self.battery = battery.clamp(Self::MIN_BATTERY, Self::MAX_BATTERY);
    }

    pub(crate) fn set_armed(&mut self, armed: bool) { self.armed = armed; }

    pub(crate) fn set_connected(&mut self, connected: bool) { self.connected = connected; }

    pub(crate) fn set_mode(&mut self, mode: FlightMode) { self.mode = mode; }
}

/// Pilot stick input, read by the telemetry integrator on every tick.
///
/// Throttle is in `[0, 100]` with 50 as the neutral hold point; pitch, roll and yaw are
/// in `[-100, 100]`. Out-of-range values are clamped, non-finite values fall back to neutral.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ManualControl {
    throttle: f64,
    pitch: f64,
    roll: f64,
    yaw: f64,
}

impl Default for ManualControl {
    fn default() -> Self { Self::centered() }
}

impl ManualControl {
    pub const NEUTRAL_THROTTLE: f64 = 50.0;

    pub fn new(throttle: f64, pitch: f64, roll: f64, yaw: f64) -> Self {
        Self {
            throttle: Self::clamp_or(throttle, 0.0, 100.0, Self::NEUTRAL_THROTTLE),
            pitch: Self::clamp_or(pitch, -100.0, 100.0, 0.0),
            roll: Self::clamp_or(roll, -100.0, 100.0, 0.0),
            yaw: Self::clamp_or(yaw, -100.0, 100.0, 0.0),
        }
    }

    /// Sticks centred, throttle at the hold point.
    pub const fn centered() -> Self {
        Self { throttle: Self::NEUTRAL_THROTTLE, pitch: 0.0, roll: 0.0, yaw: 0.0 }
    }

    pub fn throttle(&self) -> f64 { self.throttle }
    pub fn pitch(&self) -> f64 { self.pitch }
    pub fn roll(&self) -> f64 { self.roll }
    pub fn yaw(&self) -> f64 { self.yaw }

    /// Throttle deflection from the hold point, in `[-1, 1]`.
    pub fn climb_ratio(&self) -> f64 {
        (self.throttle - Self::NEUTRAL_THROTTLE) / Self::NEUTRAL_THROTTLE
    }

    fn clamp_or(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
        if value.is_finite() { value.clamp(min, max) } else { fallback }
    }
}
