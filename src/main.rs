use chrono::TimeDelta;
use flightdeck_core::events::{CoreEvent, Severity};
use flightdeck_core::flight_control::{Command, ManualControl};
use flightdeck_core::{CoreConfig, DroneCore, error, info, log, warn};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::time::MissedTickBehavior;

const TICK_PERIOD: Duration = Duration::from_millis(100);
const TICK_DT: TimeDelta = TimeDelta::milliseconds(100);
const STATUS_PERIOD: Duration = Duration::from_secs(5);
/// Simulated time until the flight controller link comes up.
const HANDSHAKE_DELAY: Duration = Duration::from_secs(2);

const HELP: &str = "commands: arm | disarm | takeoff | land | hover | emergency | rth | \
                    goto X Y Z | stick THROTTLE PITCH ROLL YAW | link on|off | clear | status | quit";

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() {
    let mut core = DroneCore::new(CoreConfig::from_env());
    let mut events = core.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let mut ticker = tokio::time::interval(TICK_PERIOD);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut status = tokio::time::interval(STATUS_PERIOD);
    let handshake = tokio::time::sleep(HANDSHAKE_DELAY);
    tokio::pin!(handshake);
    let mut linked = false;

    info!("Flight control core up, connecting to flight controller...");
    info!("{HELP}");
    loop {
        tokio::select! {
            _ = ticker.tick() => core.tick(TICK_DT),
            () = &mut handshake, if !linked => {
                linked = true;
                core.set_connected(true);
            }
            _ = status.tick() => print_status(&core),
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if !handle_line(&mut core, line.trim()) {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    error!("Failed to read from stdin: {e}");
                    break;
                }
            },
            event = events.recv() => match event {
                Ok(core_event) => print_event(&core_event),
                Err(RecvError::Lagged(missed)) => warn!("Event display lagging, skipped {missed} events"),
                Err(RecvError::Closed) => break,
            },
        }
    }
    info!("Shutting down after {}s of flight time", core.elapsed().num_seconds());
}

/// Handles one line of operator input. Returns `false` once the host should exit.
fn handle_line(core: &mut DroneCore, line: &str) -> bool {
    let mut words = line.split_whitespace();
    match words.next() {
        None => {}
        Some("quit" | "exit") => return false,
        Some("help") => info!("{HELP}"),
        Some("status") => print_status(core),
        Some("clear") => {
            let mission = core.clear_mission();
            info!("Mission {mission}");
        }
        Some("link") => match words.next() {
            Some("on") => core.set_connected(true),
            Some("off") => core.set_connected(false),
            _ => warn!("usage: link on|off"),
        },
        Some("stick") => {
            let axes: Vec<f64> = words.filter_map(|w| w.parse().ok()).collect();
            if let [throttle, pitch, roll, yaw] = axes[..] {
                core.set_manual_control(ManualControl::new(throttle, pitch, roll, yaw));
            } else {
                warn!("usage: stick THROTTLE PITCH ROLL YAW");
            }
        }
        Some(_) => match line.parse::<Command>() {
            // rejections are reported on the event stream
            Ok(command) => {
                let _ = core.command(command);
            }
            Err(e) => warn!("{e}"),
        },
    }
    true
}

fn print_event(core_event: &CoreEvent) {
    let message = core_event.message();
    match core_event.severity() {
        Severity::Info => info!("{message}"),
        Severity::Success => log!("{message}"),
        Severity::Warning => warn!("{message}"),
        Severity::Error => error!("{message}"),
    }
}

fn print_status(core: &DroneCore) {
    let state = core.snapshot();
    let waypoints = core.waypoints();
    let done = waypoints.iter().filter(|wp| wp.is_completed()).count();
    log!(
        "{} | {} | pos {} | alt {:.1} m | {:.1} m/s | hdg {:.0} | bat {:.1}% {} ({} min) | {} | mission {} {}/{}",
        core.phase(),
        state.mode(),
        state.position(),
        state.altitude(),
        state.ground_speed(),
        state.heading(),
        state.battery(),
        state.battery_level(),
        state.est_flight_time().num_minutes(),
        core.gps(),
        core.plan_status(),
        done,
        waypoints.len(),
    );
}
