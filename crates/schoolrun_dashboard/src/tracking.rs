use rand::{Rng, SeedableRng, rngs::SmallRng};
use schoolrun_routing::GeoPoint;
use tokio::{sync::watch, task::JoinHandle, time::MissedTickBehavior};
use tracing::{debug, trace};

use crate::{
    error::DashboardError,
    params::{DashboardParams, to_std},
};

/// Simulated live position of a bus.
///
/// Every tick publishes the origin perturbed by up to `tracking_jitter`
/// degrees per axis. Stopping or dropping the tracker aborts the task.
pub struct LiveTracker {
    origin: GeoPoint,
    position: watch::Receiver<GeoPoint>,
    task: JoinHandle<()>,
}

impl LiveTracker {
    /// Spawns the tracking task on the current tokio runtime.
    ///
    /// Fails when `tracking_interval` is zero.
    pub fn start(origin: GeoPoint, params: &DashboardParams) -> Result<Self, DashboardError> {
        let period = to_std(params.tracking_interval);
        if period.is_zero() {
            return Err(DashboardError::InvalidState(
                "tracking interval must be non-zero".to_string(),
            ));
        }

        let (sender, position) = watch::channel(origin);
        let jitter = params.tracking_jitter;
        let mut rng = match params.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let next = origin.offset(
                    rng.random_range(-jitter..=jitter),
                    rng.random_range(-jitter..=jitter),
                );
                trace!("Tracked position {:?}", next);

                if sender.send(next).is_err() {
                    break;
                }
            }
        });

        debug!("Started tracking around {:?}", origin);

        Ok(Self {
            origin,
            position,
            task,
        })
    }

    pub fn origin(&self) -> GeoPoint {
        self.origin
    }

    pub fn position(&self) -> GeoPoint {
        *self.position.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<GeoPoint> {
        self.position.clone()
    }

    pub fn stop(self) {
        debug!("Stopped tracking around {:?}", self.origin);
    }
}

impl Drop for LiveTracker {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn params() -> DashboardParams {
        DashboardParams {
            seed: Some(4),
            ..DashboardParams::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_publishes_jittered_positions() {
        let origin = GeoPoint::new(51.5077, 0.0650);
        let tracker = LiveTracker::start(origin, &params()).unwrap();
        let mut positions = tracker.subscribe();

        assert_eq!(tracker.position(), origin);

        for _ in 0..5 {
            positions.changed().await.unwrap();
            let position = *positions.borrow_and_update();
            assert!((position.lat - origin.lat).abs() <= 0.0005);
            assert!((position.lng - origin.lng).abs() <= 0.0005);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_follow_interval() {
        let origin = GeoPoint::new(51.5054, -0.0235);
        let tracker = LiveTracker::start(origin, &params()).unwrap();

        tokio::time::sleep(Duration::from_millis(2900)).await;
        assert_eq!(tracker.position(), origin);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_ne!(tracker.position(), origin);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_ends_updates() {
        let tracker = LiveTracker::start(GeoPoint::new(51.5, 0.0), &params()).unwrap();
        let mut positions = tracker.subscribe();

        tracker.stop();
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert!(positions.changed().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_is_rejected() {
        let params = DashboardParams {
            tracking_interval: jiff::SignedDuration::ZERO,
            ..params()
        };

        let result = LiveTracker::start(GeoPoint::new(51.5, 0.0), &params);
        assert!(matches!(result, Err(DashboardError::InvalidState(_))));
    }
}
