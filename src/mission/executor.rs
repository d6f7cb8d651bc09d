use super::{CompletionPolicy, Mission, MissionStatus};
use crate::events::{EventKind, EventLog};
use crate::flight_control::DroneState;
use crate::planning::{PlanningError, Waypoint};
use crate::util::Vec3D;
use chrono::TimeDelta;

/// Owns the active [`Mission`] and walks the drone through it.
///
/// The executor never moves the drone itself. It exposes the current waypoint through
/// [`MissionExecutor::target`], which the core hands to the telemetry integrator as
/// guidance, and judges progress from the state the integrator produced.
#[derive(Debug, Clone)]
pub struct MissionExecutor {
    policy: CompletionPolicy,
    mission: Mission,
    since_advance: TimeDelta,
}

impl MissionExecutor {
    pub fn new(policy: CompletionPolicy) -> Self {
        Self { policy, mission: Mission::default(), since_advance: TimeDelta::zero() }
    }

    pub fn policy(&self) -> CompletionPolicy { self.policy }
    pub fn mission(&self) -> &Mission { &self.mission }
    pub fn status(&self) -> MissionStatus { self.mission.status() }
    pub fn waypoints(&self) -> &[Waypoint] { self.mission.waypoints() }

    /// Position the drone should currently fly to, if the mission is steering.
    pub fn target(&self) -> Option<Vec3D<f64>> {
        if self.status().is_active() { self.mission.current().map(Waypoint::position) } else { None }
    }

    /// Discards the previous mission and waits for a new plan.
    pub fn begin_planning(&mut self, target: Vec3D<f64>, log: &mut EventLog) {
        self.mission = Mission::with_status(MissionStatus::Planning);
        log.emit(EventKind::PlanRequested { target });
    }

    /// Installs a freshly planned path.
    ///
    /// # Arguments
    /// * `waypoints` - The planner output, in flight order.
    /// * `log` - Receives `PlanReady`, or `MissionComplete` for an empty plan.
    ///
    /// # Returns
    /// `Ready`, or `Complete` if there is nothing to fly.
    pub fn start(&mut self, waypoints: Vec<Waypoint>, log: &mut EventLog) -> MissionStatus {
        if waypoints.is_empty() {
            return self.complete_in_place(log);
        }
        log.emit(EventKind::PlanReady { waypoints: waypoints.len() });
        self.mission = Mission::from_waypoints(waypoints);
        self.since_advance = TimeDelta::zero();
        self.status()
    }

    /// Finishes a mission whose target coincides with the current position.
    pub fn complete_in_place(&mut self, log: &mut EventLog) -> MissionStatus {
        self.mission = Mission::with_status(MissionStatus::Complete);
        log.emit(EventKind::MissionComplete);
        self.status()
    }

    pub fn planning_failed(&mut self, error: PlanningError, log: &mut EventLog) {
        self.mission = Mission::with_status(MissionStatus::Idle);
        log.emit(EventKind::PlanFailed(error));
    }

    /// Advances the mission by one tick.
    ///
    /// A `Ready` mission starts executing on its first tick. Under
    /// [`CompletionPolicy::Arrival`] every waypoint already within tolerance is completed,
    /// so consecutive coincident waypoints finish in the same tick.
    pub fn tick(&mut self, dt: TimeDelta, state: &DroneState, log: &mut EventLog) -> MissionStatus {
        match self.status() {
            MissionStatus::Ready => self.mission.set_status(MissionStatus::Executing),
            MissionStatus::Executing => {}
            other => return other,
        }

        match self.policy {
            CompletionPolicy::Arrival { tolerance } => {
                while self
                    .mission
                    .current()
                    .is_some_and(|wp| state.position().in_radius_of(&wp.position(), tolerance))
                {
                    self.reach(log);
                }
            }
            CompletionPolicy::Interval(period) => {
                self.since_advance += dt;
                if self.since_advance >= period {
                    self.since_advance -= period;
                    self.reach(log);
                }
            }
        }

        if self.mission.remaining() == 0 {
            self.mission.set_status(MissionStatus::Complete);
            log.emit(EventKind::MissionComplete);
        }
        self.status()
    }

    /// Drops all waypoints. Calling it on an idle or already cleared executor changes
    /// nothing and emits nothing.
    pub fn clear(&mut self, log: &mut EventLog) -> MissionStatus {
        let idle = matches!(self.status(), MissionStatus::Idle | MissionStatus::Cleared);
        if idle && self.mission.waypoints().is_empty() {
            return self.status();
        }
        self.mission = Mission::with_status(MissionStatus::Cleared);
        self.since_advance = TimeDelta::zero();
        log.emit(EventKind::MissionCleared);
        self.status()
    }

    fn reach(&mut self, log: &mut EventLog) {
        let total = self.mission.waypoints().len();
        let index = self.mission.cursor();
        if let Some(wp) = self.mission.advance() {
            log.emit(EventKind::WaypointReached { id: wp.id().to_string(), index, total });
        }
    }
}
