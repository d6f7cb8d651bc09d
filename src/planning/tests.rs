use super::{Obstacle, ObstacleMap, PathPlanner, PlanRequest, PlanningError, Probe};
use crate::config::PlannerConfig;
use crate::util::Vec3D;
use std::{sync::Arc, time::Duration};

fn planner() -> PathPlanner { PathPlanner::new(PlannerConfig::default()) }

#[test]
fn test_plan_has_four_waypoints() {
    let start = Vec3D::new(0.0, 0.0, 10.0);
    let target = Vec3D::new(50.0, 50.0, 20.0);
    let wps = planner().plan(start, target, &ObstacleMap::city_block()).unwrap();

    assert_eq!(wps.len(), 4);
    let ids: Vec<&str> = wps.iter().map(|wp| wp.id()).collect();
    assert_eq!(ids, ["wp_0", "wp_1", "wp_2", "wp_3"]);
    assert_eq!(wps[0].position(), start);
    assert_eq!(wps[1].position(), Vec3D::new(20.0, 10.0, 20.0));
    assert_eq!(wps[2].position(), Vec3D::new(35.0, 30.0, 20.0));
    assert_eq!(wps[3].position(), target);
    assert!(wps.iter().all(|wp| !wp.is_completed()));
}

#[test]
fn test_plan_is_deterministic() {
    let start = Vec3D::new(-3.0, 7.5, 4.0);
    let target = Vec3D::new(60.0, -20.0, 15.0);
    let map = ObstacleMap::city_block();
    assert_eq!(planner().plan(start, target, &map), planner().plan(start, target, &map));
}

#[test]
fn test_degenerate_target() {
    let start = Vec3D::new(5.0, 5.0, 10.0);
    let result = planner().plan(start, Vec3D::new(5.0, 5.05, 10.0), &ObstacleMap::empty());
    assert_eq!(result, Err(PlanningError::NoTarget));
}

#[test]
fn test_mirrored_detour_avoids_obstacle() {
    let map = ObstacleMap::new(vec![Obstacle::new(15.0, 5.0, 10.0, 10.0)]);
    let start = Vec3D::new(0.0, 0.0, 10.0);
    let target = Vec3D::new(100.0, 0.0, 10.0);
    let wps = planner().plan(start, target, &map).unwrap();

    assert_eq!(wps[1].position(), Vec3D::new(-20.0, -10.0, 10.0));
    assert_eq!(wps[2].position(), Vec3D::new(115.0, 20.0, 10.0));
    let path: Vec<_> = wps.iter().map(|wp| wp.position()).collect();
    assert!(map.is_clear(&path));
}

#[test]
fn test_blocked_by_wall() {
    let map = ObstacleMap::new(vec![Obstacle::new(-1000.0, 40.0, 2000.0, 5.0)]);
    let result = planner().plan(Vec3D::new(0.0, 0.0, 10.0), Vec3D::new(0.0, 100.0, 10.0), &map);
    assert_eq!(result, Err(PlanningError::Blocked));
}

#[test]
fn test_validation_disabled_keeps_primary_path() {
    let map = ObstacleMap::new(vec![Obstacle::new(-1000.0, 40.0, 2000.0, 5.0)]);
    let config = PlannerConfig { validate_obstacles: false, ..PlannerConfig::default() };
    let wps = PathPlanner::new(config)
        .plan(Vec3D::new(0.0, 0.0, 10.0), Vec3D::new(0.0, 100.0, 10.0), &map)
        .unwrap();
    assert_eq!(wps[1].position(), Vec3D::new(20.0, 10.0, 10.0));
}

#[test]
fn test_obstacle_geometry() {
    let obstacle = Obstacle::new(10.0, 10.0, -5.0, 20.0);
    assert_eq!((obstacle.x(), obstacle.width()), (5.0, 5.0));
    assert!(obstacle.contains(Vec3D::new(5.0, 30.0, 100.0)));
    assert!(!obstacle.contains(Vec3D::new(4.9, 15.0, 0.0)));

    // crosses the footprint without an endpoint inside it
    assert!(obstacle.intersects_segment(Vec3D::new(0.0, 15.0, 0.0), Vec3D::new(20.0, 15.0, 0.0)));
    // parallel and outside
    assert!(!obstacle.intersects_segment(Vec3D::new(0.0, 5.0, 0.0), Vec3D::new(20.0, 5.0, 0.0)));
    // stops short
    assert!(!obstacle.intersects_segment(Vec3D::new(0.0, 15.0, 0.0), Vec3D::new(4.0, 15.0, 0.0)));

    let map = ObstacleMap::new(vec![obstacle]);
    assert!(map.intersects(Probe::Point(Vec3D::new(7.0, 12.0, 0.0))));
    assert!(!map.intersects(Probe::Point(Vec3D::new(0.0, 0.0, 0.0))));
}

#[test]
fn test_city_block_layout() {
    let map = ObstacleMap::city_block();
    assert_eq!(map.len(), 4);
    assert!(map.intersects(Probe::Point(Vec3D::new(-140.0, 0.0, 30.0))));
    assert!(!map.intersects(Probe::Point(Vec3D::zero())));
}

#[test]
fn test_request_without_latency_is_ready() {
    let mut request = PlanRequest::spawn(
        planner(),
        Arc::new(ObstacleMap::empty()),
        Vec3D::zero(),
        Vec3D::new(10.0, 10.0, 10.0),
        Duration::ZERO,
    );
    let wps = request.poll().unwrap().unwrap();
    assert_eq!(wps.len(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_request_latency() {
    let mut request = PlanRequest::spawn(
        planner(),
        Arc::new(ObstacleMap::empty()),
        Vec3D::zero(),
        Vec3D::new(10.0, 10.0, 10.0),
        Duration::from_secs(2),
    );
    assert!(request.poll().is_none());
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert!(request.poll().is_none());
    let wps = request.wait().await.unwrap();
    assert_eq!(wps.len(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_request_cancel() {
    let mut request = PlanRequest::spawn(
        planner(),
        Arc::new(ObstacleMap::empty()),
        Vec3D::zero(),
        Vec3D::new(10.0, 10.0, 10.0),
        Duration::from_secs(2),
    );
    request.cancel();
    assert_eq!(request.wait().await, Err(PlanningError::Cancelled));
}
