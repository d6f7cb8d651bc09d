//! The [`DroneCore`] facade: one instance per session, owning the drone state and
//! every component that reads or writes it.

use crate::config::{CoreConfig, PlanPolicy};
use crate::events::{CoreEvent, EventKind, EventLog, Severity};
use crate::flight_control::{
    BatteryLevel, Command, CommandError, DriftSource, DroneState, FlightMode, FlightPhase,
    FlightStateMachine, GeoPoint, Guidance, ManualControl, TelemetryIntegrator,
};
use crate::mission::{MissionExecutor, MissionStatus};
use crate::planning::{ObstacleMap, PathPlanner, PlanRequest, PlanResult, PlanningError, Waypoint};
use crate::util::Vec3D;
use chrono::TimeDelta;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::broadcast;

/// Single writer of the simulated drone.
///
/// Hosts drive it through [`DroneCore::command`] and a periodic [`DroneCore::tick`];
/// everything handed out is a copy, so a renderer never observes a half-updated state.
/// Path planning is the only work spanning several ticks. It runs as a [`PlanRequest`]
/// whose result is installed by the first tick after it completes.
pub struct DroneCore {
    config: CoreConfig,
    state: DroneState,
    manual: ManualControl,
    state_machine: FlightStateMachine,
    integrator: TelemetryIntegrator,
    planner: PathPlanner,
    obstacles: Arc<ObstacleMap>,
    executor: MissionExecutor,
    pending: Option<PlanRequest>,
    events: EventLog,
    elapsed: TimeDelta,
}

impl DroneCore {
    /// Creates a grounded, disarmed and disconnected drone at the origin, with the
    /// city block obstacle set and drift as configured.
    pub fn new(config: CoreConfig) -> Self {
        let integrator = TelemetryIntegrator::from_config(config.telemetry);
        Self::assemble(config, integrator)
    }

    /// Like [`DroneCore::new`], with an explicit drift source.
    pub fn with_drift(config: CoreConfig, drift: Box<dyn DriftSource>) -> Self {
        let integrator = TelemetryIntegrator::new(config.telemetry, drift);
        Self::assemble(config, integrator)
    }

    fn assemble(config: CoreConfig, integrator: TelemetryIntegrator) -> Self {
        Self {
            state: DroneState::default(),
            manual: ManualControl::centered(),
            state_machine: FlightStateMachine::new(config.takeoff_altitude),
            integrator,
            planner: PathPlanner::new(config.planner),
            obstacles: Arc::new(ObstacleMap::city_block()),
            executor: MissionExecutor::new(config.mission.completion),
            pending: None,
            events: EventLog::new(config.event_log_capacity),
            elapsed: TimeDelta::zero(),
            config,
        }
    }

    /// Replaces the obstacle set for the rest of the session.
    #[must_use]
    pub fn with_obstacles(mut self, obstacles: ObstacleMap) -> Self {
        self.obstacles = Arc::new(obstacles);
        self
    }

    /// Replaces the initial drone state.
    #[must_use]
    pub fn with_state(mut self, state: DroneState) -> Self {
        self.state = state;
        self
    }

    /// Validates and applies a command.
    ///
    /// `Emergency` additionally cancels any pending plan and clears the mission.
    /// `Navigate` and `ReturnHome` start a new plan; a plan still being computed is
    /// either replaced or causes [`CommandError::Busy`], depending on the configured
    /// [`PlanPolicy`]. Rejected commands leave the state untouched.
    pub fn command(&mut self, command: Command) -> Result<(), CommandError> {
        match command {
            Command::Emergency => {
                self.state_machine.execute(&command, &mut self.state, &mut self.events)?;
                self.cancel_pending();
                self.executor.clear(&mut self.events);
                Ok(())
            }
            Command::Navigate(_) | Command::ReturnHome => {
                if self.pending.is_some() && self.config.plan_policy == PlanPolicy::Reject {
                    let error = CommandError::Busy;
                    self.events.emit(EventKind::CommandRejected { command: command.kind(), error });
                    return Err(error);
                }
                let target = self.resolve_target(&command);
                self.state_machine.execute(&command, &mut self.state, &mut self.events)?;
                self.request_plan(target);
                Ok(())
            }
            _ => self.state_machine.execute(&command, &mut self.state, &mut self.events),
        }
    }

    /// Advances the simulation by `dt`. A non-positive `dt` is ignored.
    pub fn tick(&mut self, dt: TimeDelta) {
        if dt <= TimeDelta::zero() {
            return;
        }
        self.elapsed += dt;

        let before = self.state;
        let guidance = self.guidance();
        self.state = self.integrator.tick(dt, &before, &self.manual, guidance);
        self.supervise_battery(&before);

        if self.state.mode() == FlightMode::Auto
            && self.executor.tick(dt, &self.state, &mut self.events) == MissionStatus::Complete
        {
            FlightStateMachine::force_mode(&mut self.state, FlightMode::Hover, &mut self.events);
        }

        let outcome = self.pending.as_mut().and_then(PlanRequest::poll);
        if let Some(outcome) = outcome {
            self.pending = None;
            // failures are already reported through the event log
            let _ = self.install_plan(outcome);
        }
    }

    /// Waits for the pending plan and installs it.
    ///
    /// # Returns
    /// `None` if no plan is pending, otherwise whether planning succeeded.
    pub async fn await_plan(&mut self) -> Option<Result<(), PlanningError>> {
        let request = self.pending.as_mut()?;
        let outcome = request.wait().await;
        self.pending = None;
        Some(self.install_plan(outcome))
    }

    /// Drops the mission and any plan still being computed. Idempotent.
    pub fn clear_mission(&mut self) -> MissionStatus {
        self.cancel_pending();
        self.executor.clear(&mut self.events)
    }

    /// Feeds the link state of the (stubbed) flight controller connection.
    pub fn set_connected(&mut self, connected: bool) {
        if self.state.connected() != connected {
            self.state.set_connected(connected);
            self.events.emit(EventKind::ConnectionChanged(connected));
        }
    }

    pub fn set_manual_control(&mut self, manual: ManualControl) { self.manual = manual; }

    pub fn snapshot(&self) -> DroneState { self.state }
    pub fn manual_control(&self) -> ManualControl { self.manual }
    pub fn plan_status(&self) -> MissionStatus { self.executor.status() }
    pub fn waypoints(&self) -> Vec<Waypoint> { self.executor.waypoints().to_vec() }
    pub fn phase(&self) -> FlightPhase { FlightPhase::of(&self.state) }
    pub fn is_planning(&self) -> bool { self.pending.is_some() }
    pub fn elapsed(&self) -> TimeDelta { self.elapsed }
    pub fn obstacles(&self) -> &ObstacleMap { &self.obstacles }
    pub fn config(&self) -> &CoreConfig { &self.config }

    /// Geodetic position of the drone relative to the configured home point.
    pub fn gps(&self) -> GeoPoint { self.config.home.locate(self.state.position()) }

    pub fn subscribe(&self) -> broadcast::Receiver<CoreEvent> { self.events.subscribe() }
    pub fn recent_events(&self) -> Vec<CoreEvent> { self.events.recent() }
    pub fn severity_counts(&self) -> HashMap<Severity, usize> { self.events.severity_counts() }

    fn resolve_target(&self, command: &Command) -> Vec3D<f64> {
        match command {
            Command::Navigate(target) => *target,
            _ => {
                let altitude = self.state.altitude().max(self.config.takeoff_altitude);
                Vec3D::new(0.0, 0.0, altitude)
            }
        }
    }

    fn request_plan(&mut self, target: Vec3D<f64>) {
        self.cancel_pending();
        let start = self.state.position();
        self.executor.begin_planning(target, &mut self.events);
        if self.planner.is_degenerate(start, target) {
            self.executor.complete_in_place(&mut self.events);
            self.leave_auto();
            return;
        }
        self.pending = Some(PlanRequest::spawn(
            self.planner,
            Arc::clone(&self.obstacles),
            start,
            target,
            self.config.planner.latency,
        ));
    }

    fn install_plan(&mut self, outcome: PlanResult) -> Result<(), PlanningError> {
        match outcome {
            Ok(waypoints) => {
                if self.executor.start(waypoints, &mut self.events) == MissionStatus::Complete {
                    self.leave_auto();
                }
                Ok(())
            }
            Err(error) => {
                self.executor.planning_failed(error, &mut self.events);
                self.leave_auto();
                Err(error)
            }
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(stale) = self.pending.take() {
            stale.cancel();
            self.events.emit(EventKind::PlanFailed(PlanningError::Cancelled));
        }
    }

    fn leave_auto(&mut self) {
        if self.state.mode() == FlightMode::Auto {
            FlightStateMachine::force_mode(&mut self.state, FlightMode::Hover, &mut self.events);
        }
    }

    fn guidance(&self) -> Guidance {
        if !self.state.armed() {
            return Guidance::Idle;
        }
        match self.state.mode() {
            FlightMode::Stabilize => Guidance::Manual,
            FlightMode::Takeoff | FlightMode::Hover => Guidance::Hold,
            FlightMode::Land => Guidance::Descend,
            FlightMode::Auto => self.executor.target().map_or(Guidance::Hold, Guidance::Toward),
            FlightMode::Emergency => Guidance::Idle,
        }
    }

    /// Reports battery thresholds once when crossed and lands a drone that ran dry.
    fn supervise_battery(&mut self, before: &DroneState) {
        let battery = self.state.battery();
        if before.battery_level() != BatteryLevel::Low && self.state.battery_level() == BatteryLevel::Low {
            self.events.emit(EventKind::BatteryLow(battery));
        }
        if before.battery() > DroneState::MIN_BATTERY && battery == DroneState::MIN_BATTERY {
            self.events.emit(EventKind::BatteryDepleted);
            let flying = self.state.armed() && self.state.altitude() > 0.0;
            if flying && self.state.mode() != FlightMode::Land {
                self.cancel_pending();
                self.executor.clear(&mut self.events);
                FlightStateMachine::force_mode(&mut self.state, FlightMode::Land, &mut self.events);
            }
        }
    }
}
