use super::{CompletionPolicy, MissionExecutor, MissionStatus};
use crate::events::{EventKind, EventLog};
use crate::flight_control::DroneState;
use crate::planning::Waypoint;
use crate::util::Vec3D;
use chrono::TimeDelta;

fn square() -> Vec<Waypoint> {
    [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]
        .into_iter()
        .enumerate()
        .map(|(i, (x, y))| Waypoint::new(i, Vec3D::new(x, y, 10.0)))
        .collect()
}

fn at(x: f64, y: f64) -> DroneState { DroneState::default().with_position(Vec3D::new(x, y, 10.0)) }

fn tick() -> TimeDelta { TimeDelta::milliseconds(100) }

#[test]
fn test_lifecycle_by_arrival() {
    let mut log = EventLog::new(50);
    let mut executor = MissionExecutor::new(CompletionPolicy::default());
    executor.begin_planning(Vec3D::new(0.0, 10.0, 10.0), &mut log);
    assert_eq!(executor.status(), MissionStatus::Planning);
    assert_eq!(executor.target(), None);

    assert_eq!(executor.start(square(), &mut log), MissionStatus::Ready);
    assert!(executor.waypoints().iter().all(|wp| !wp.is_completed()));

    // starting point is reached immediately
    assert_eq!(executor.tick(tick(), &at(0.0, 0.0), &mut log), MissionStatus::Executing);
    assert_eq!(executor.mission().cursor(), 1);
    assert_eq!(executor.target(), Some(Vec3D::new(10.0, 0.0, 10.0)));

    assert_eq!(executor.tick(tick(), &at(5.0, 0.0), &mut log), MissionStatus::Executing);
    assert_eq!(executor.mission().cursor(), 1);

    executor.tick(tick(), &at(9.8, 0.2), &mut log);
    executor.tick(tick(), &at(10.0, 10.0), &mut log);
    assert_eq!(executor.tick(tick(), &at(0.3, 10.0), &mut log), MissionStatus::Complete);
    assert!(executor.waypoints().iter().all(Waypoint::is_completed));
    assert_eq!(executor.target(), None);
    assert_eq!(log.recent().last().unwrap().kind(), &EventKind::MissionComplete);
}

#[test]
fn test_coincident_waypoints_finish_together() {
    let mut log = EventLog::new(50);
    let mut executor = MissionExecutor::new(CompletionPolicy::default());
    let stacked = (0..3).map(|i| Waypoint::new(i, Vec3D::new(1.0, 1.0, 10.0))).collect();
    executor.start(stacked, &mut log);
    assert_eq!(executor.tick(tick(), &at(1.0, 1.0), &mut log), MissionStatus::Complete);

    let reached = log
        .recent()
        .iter()
        .filter(|e| matches!(e.kind(), EventKind::WaypointReached { .. }))
        .count();
    assert_eq!(reached, 3);
}

#[test]
fn test_interval_policy() {
    let mut log = EventLog::new(50);
    let mut executor = MissionExecutor::new(CompletionPolicy::fixed_interval());
    executor.start(square(), &mut log);
    let far_away = at(500.0, 500.0);

    for _ in 0..14 {
        executor.tick(tick(), &far_away, &mut log);
    }
    assert_eq!(executor.mission().cursor(), 0);
    executor.tick(tick(), &far_away, &mut log);
    assert_eq!(executor.mission().cursor(), 1);
    assert!(executor.waypoints()[0].is_completed());

    for _ in 0..45 {
        executor.tick(tick(), &far_away, &mut log);
    }
    assert_eq!(executor.status(), MissionStatus::Complete);
}

#[test]
fn test_empty_plan_completes() {
    let mut log = EventLog::new(50);
    let mut executor = MissionExecutor::new(CompletionPolicy::default());
    assert_eq!(executor.start(Vec::new(), &mut log), MissionStatus::Complete);
    assert!(executor.waypoints().is_empty());
}

#[test]
fn test_clear_is_idempotent() {
    let mut log = EventLog::new(50);
    let mut executor = MissionExecutor::new(CompletionPolicy::default());
    assert_eq!(executor.clear(&mut log), MissionStatus::Idle);
    assert!(log.is_empty());

    executor.start(square(), &mut log);
    assert_eq!(executor.clear(&mut log), MissionStatus::Cleared);
    assert!(executor.waypoints().is_empty());
    let events = log.len();

    assert_eq!(executor.clear(&mut log), MissionStatus::Cleared);
    assert_eq!(log.len(), events);
    assert_eq!(executor.tick(tick(), &at(0.0, 0.0), &mut log), MissionStatus::Cleared);
}

#[test]
fn test_planning_failure_resets() {
    let mut log = EventLog::new(50);
    let mut executor = MissionExecutor::new(CompletionPolicy::default());
    executor.start(square(), &mut log);
    executor.begin_planning(Vec3D::new(1.0, 2.0, 3.0), &mut log);
    assert!(executor.waypoints().is_empty());
    executor.planning_failed(crate::planning::PlanningError::Blocked, &mut log);
    assert_eq!(executor.status(), MissionStatus::Idle);
}
