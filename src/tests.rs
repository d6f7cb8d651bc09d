use crate::config::{CoreConfig, PlanPolicy};
use crate::mission::CompletionPolicy;
use chrono::TimeDelta;
use std::{collections::HashMap, time::Duration};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> =
        vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn test_default_config() {
    let config = CoreConfig::default();
    assert_eq!(config.planner.latency, Duration::ZERO);
    assert_eq!(config.plan_policy, PlanPolicy::Replace);
    assert_eq!(config.event_log_capacity, 50);
    assert_eq!(config.mission.completion, CompletionPolicy::Arrival { tolerance: 0.5 });
    assert!((config.takeoff_altitude - 10.0).abs() < f64::EPSILON);
}

#[test]
fn test_host_config_from_lookup() {
    let config = CoreConfig::from_lookup(lookup(&[
        ("DRONE_MAX_SPEED", "40"),
        ("DRONE_TAKEOFF_ALT", "25.5"),
        ("DRONE_DRIFT_SEED", "1234"),
        ("DRONE_WAYPOINT_INTERVAL_MS", "1500"),
        ("DRONE_PLAN_POLICY", "reject"),
    ]));
    assert_eq!(config.planner.latency, Duration::from_secs(2));
    assert!((config.telemetry.max_speed - 25.0).abs() < f64::EPSILON);
    assert!((config.takeoff_altitude - 25.5).abs() < f64::EPSILON);
    assert_eq!(config.telemetry.drift_seed, Some(1234));
    assert_eq!(config.mission.completion, CompletionPolicy::Interval(TimeDelta::milliseconds(1500)));
    assert_eq!(config.plan_policy, PlanPolicy::Reject);
}

#[test]
fn test_invalid_values_are_ignored() {
    let config = CoreConfig::from_lookup(lookup(&[
        ("DRONE_MAX_SPEED", "fast"),
        ("DRONE_TAKEOFF_ALT", "0.5"),
        ("DRONE_PLAN_LATENCY_MS", "-3"),
        ("DRONE_LOG_CAPACITY", "12"),
        ("DRONE_PLAN_POLICY", "queue"),
    ]));
    let defaults = CoreConfig::default();
    assert!((config.telemetry.max_speed - defaults.telemetry.max_speed).abs() < f64::EPSILON);
    assert!((config.takeoff_altitude - defaults.takeoff_altitude).abs() < f64::EPSILON);
    assert_eq!(config.planner.latency, Duration::from_secs(2));
    assert_eq!(config.event_log_capacity, 12);
    assert_eq!(config.plan_policy, PlanPolicy::Replace);
}

#[test]
fn test_non_finite_values_are_ignored() {
    let config = CoreConfig::from_lookup(lookup(&[
        ("DRONE_MAX_SPEED", "NaN"),
        ("DRONE_TAKEOFF_ALT", "inf"),
    ]));
    let defaults = CoreConfig::default();
    assert!((config.telemetry.max_speed - defaults.telemetry.max_speed).abs() < f64::EPSILON);
    assert!((config.takeoff_altitude - defaults.takeoff_altitude).abs() < f64::EPSILON);

    let speed_only = CoreConfig::from_lookup(lookup(&[("DRONE_MAX_SPEED", "-inf")]));
    assert!(speed_only.telemetry.max_speed.is_finite());
}
