use super::{ObstacleMap, PathPlanner, PlanningError, Waypoint};
use crate::util::Vec3D;
use std::{sync::Arc, time::Duration};
use tokio::{
    runtime::Handle,
    sync::oneshot::{self, error::TryRecvError},
};
use tokio_util::sync::CancellationToken;

pub type PlanResult = Result<Vec<Waypoint>, PlanningError>;

/// Handle to a path computation that may still be running.
///
/// With a non-zero latency and an ambient tokio runtime the computation runs as a task
/// that delivers its result after the latency has elapsed. Otherwise the plan is
/// computed on the spot and is available on the first [`PlanRequest::poll`].
/// Dropping the handle cancels the computation.
#[derive(Debug)]
pub struct PlanRequest {
    target: Vec3D<f64>,
    cancel: CancellationToken,
    result: oneshot::Receiver<PlanResult>,
}

impl PlanRequest {
    pub fn spawn(
        planner: PathPlanner,
        obstacles: Arc<ObstacleMap>,
        start: Vec3D<f64>,
        target: Vec3D<f64>,
        latency: Duration,
    ) -> Self {
        let cancel = CancellationToken::new();
        let (tx, result) = oneshot::channel();
        match Handle::try_current() {
            Ok(handle) if !latency.is_zero() => {
                let token = cancel.clone();
                handle.spawn(async move {
                    let outcome = tokio::select! {
                        biased;
                        () = token.cancelled() => Err(PlanningError::Cancelled),
                        () = tokio::time::sleep(latency) => planner.plan(start, target, &obstacles),
                    };
                    // the receiver is gone if the request was dropped meanwhile
                    let _ = tx.send(outcome);
                });
            }
            _ => {
                let _ = tx.send(planner.plan(start, target, &obstacles));
            }
        }
        Self { target, cancel, result }
    }

    pub fn target(&self) -> Vec3D<f64> { self.target }

    /// Returns the outcome if it is ready, without blocking.
    pub fn poll(&mut self) -> Option<PlanResult> {
        match self.result.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(PlanningError::Cancelled)),
        }
    }

    /// Waits until the outcome is ready.
    pub async fn wait(&mut self) -> PlanResult {
        (&mut self.result).await.unwrap_or(Err(PlanningError::Cancelled))
    }

    pub fn cancel(&self) { self.cancel.cancel(); }
}

impl Drop for PlanRequest {
    fn drop(&mut self) { self.cancel.cancel(); }
}
