use super::{DroneState, ManualControl};
use crate::config::TelemetryConfig;
use crate::util::Vec3D;
use chrono::TimeDelta;
use fixed::types::I32F32;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Source of the bounded perturbation the integrator applies every tick.
///
/// Production uses [`RandomDrift`]; tests inject a seeded one or [`NoDrift`] so that
/// integration is reproducible.
pub trait DriftSource: Send {
    /// Draws a value from `[-width/2, width/2]`. Must return `0.0` for a zero width.
    fn sample(&mut self, width: f64) -> f64;
}

/// Uniform drift backed by a standard RNG.
#[derive(Debug, Clone)]
pub struct RandomDrift {
    rng: StdRng,
}

impl RandomDrift {
    pub fn seeded(seed: u64) -> Self { Self { rng: StdRng::seed_from_u64(seed) } }

    pub fn from_os_rng() -> Self { Self { rng: StdRng::from_os_rng() } }
}

impl DriftSource for RandomDrift {
    fn sample(&mut self, width: f64) -> f64 {
        if width <= 0.0 {
            return 0.0;
        }
        let half = width / 2.0;
        self.rng.random_range(-half..=half)
    }
}

/// Drift source that never perturbs anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDrift;

impl DriftSource for NoDrift {
    fn sample(&mut self, _width: f64) -> f64 { 0.0 }
}

/// What the integrator should steer towards during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Guidance {
    /// Motors off. Only battery drain and drift apply.
    Idle,
    /// Hold the current position.
    Hold,
    /// Follow the pilot's sticks.
    Manual,
    /// Fly straight towards a point, arriving without overshoot.
    Toward(Vec3D<f64>),
    /// Sink vertically to the ground.
    Descend,
}

/// Advances position, velocity, heading and battery over simulated time.
pub struct TelemetryIntegrator {
    config: TelemetryConfig,
    drift: Box<dyn DriftSource>,
}

impl TelemetryIntegrator {
    pub fn new(config: TelemetryConfig, drift: Box<dyn DriftSource>) -> Self { Self { config, drift } }

    /// Integrator with the drift source described by `config`: seeded if a seed is
    /// configured, otherwise seeded from the OS.
    pub fn from_config(config: TelemetryConfig) -> Self {
        let drift: Box<dyn DriftSource> = match config.drift_seed {
            Some(seed) => Box::new(RandomDrift::seeded(seed)),
            None => Box::new(RandomDrift::from_os_rng()),
        };
        Self::new(config, drift)
    }

    pub fn config(&self) -> &TelemetryConfig { &self.config }

    /// Advances `state` by `dt`.
    ///
    /// # Arguments
    /// * `dt` - Elapsed simulated time. Zero or negative durations leave the state untouched.
    /// * `state` - The state at the start of the tick.
    /// * `manual` - Current stick input, only read under [`Guidance::Manual`].
    /// * `guidance` - Steering target chosen by the caller for the current mode.
    ///
    /// # Returns
    /// The state at the end of the tick. Battery never increases and stays in `[0, 100]`,
    /// altitude never drops below zero.
    pub fn tick(
        &mut self,
        dt: TimeDelta,
        state: &DroneState,
        manual: &ManualControl,
        guidance: Guidance,
    ) -> DroneState {
        let secs = Self::seconds(dt);
        if secs <= 0.0 {
            return *state;
        }
        let mut next = *state;

        let commanded = self.commanded_velocity(secs, state, manual, guidance);
        if guidance == Guidance::Manual {
            let yaw_rate = manual.yaw() / 100.0 * self.config.max_yaw_rate;
            next.set_heading(state.heading() + yaw_rate * secs);
        }

        // on the ground without a climb command only horizontal travel is possible
        let on_ground = state.altitude() <= 0.0 && commanded.z() <= 0.0;
        if on_ground && commanded.horizontal_abs() <= f64::EPSILON {
            next.set_velocity(Vec3D::zero());
        } else {
            let drift = self.config.drift;
            let vertical_noise =
                if on_ground { 0.0 } else { self.drift.sample(drift.vertical_velocity) };
            let noise = Vec3D::new(
                self.drift.sample(drift.horizontal_velocity),
                self.drift.sample(drift.horizontal_velocity),
                vertical_noise,
            );
            let velocity = commanded + noise;
            let mut position = state.position() + velocity * secs;
            if position.z() > 0.0 {
                position = position.with_z(position.z() + self.drift.sample(drift.altitude));
            }
            next.set_velocity(velocity);
            next.set_position(position);
        }

        next.set_battery(state.battery().saturating_sub(self.drain(secs)));
        next
    }

    fn commanded_velocity(
        &self,
        secs: f64,
        state: &DroneState,
        manual: &ManualControl,
        guidance: Guidance,
    ) -> Vec3D<f64> {
        match guidance {
            Guidance::Idle | Guidance::Hold => Vec3D::zero(),
            Guidance::Manual => {
                let scale = self.config.max_speed / 100.0;
                let mut body = Vec3D::new(
                    manual.roll() * scale,
                    manual.pitch() * scale,
                    manual.climb_ratio() * self.config.max_climb_rate,
                );
                body.rotate_heading_by(state.heading());
                body
            }
            Guidance::Toward(target) => {
                let to_target = state.position().to(&target);
                let distance = to_target.abs();
                if distance <= f64::EPSILON {
                    return Vec3D::zero();
                }
                let speed = self.config.max_speed.min(distance / secs);
                to_target.normalize() * speed
            }
            Guidance::Descend => {
                let rate = self.config.descent_rate.min(state.altitude() / secs);
                Vec3D::new(0.0, 0.0, -rate)
            }
        }
    }

    fn drain(&self, secs: f64) -> I32F32 {
        self.config.battery_drain_per_sec.saturating_mul(I32F32::saturating_from_num(secs))
    }

    #[allow(clippy::cast_precision_loss)]
    fn seconds(dt: TimeDelta) -> f64 {
        dt.num_microseconds().map_or(dt.num_milliseconds() as f64 / 1e3, |us| us as f64 / 1e6)
    }
}
