//! Tokio driver for inertia playback
//!
//! Hosts without their own animation-frame loop can let tokio tick a
//! playback at a fixed interval. Wall-clock time is measured with
//! `instant::Instant` and mapped onto the playback's host clock, so the
//! release time stays the origin of the trajectory.

use crate::{
    animation::playback::{CancellationToken, InertiaPlayback},
    core::camera::Camera,
};
use instant::Instant;
use std::time::Duration;
use tokio::{
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};

/// Ticks `playback` every `frame_interval` until it finishes or is
/// cancelled, handing each camera to `on_frame`. Returns the frame count.
pub async fn drive_playback<F>(
    mut playback: InertiaPlayback,
    frame_interval: Duration,
    mut on_frame: F,
) -> usize
where
    F: FnMut(Camera),
{
    let clock = Instant::now();
    let mut ticker = interval(frame_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut frames = 0;
    loop {
        ticker.tick().await;
        if playback.is_cancelled() {
            log::debug!("inertia playback cancelled after {} frames", frames);
            break;
        }
        let now = playback.started_at() + clock.elapsed().as_secs_f64() * 1000.0;
        match playback.tick(now) {
            Some(camera) => {
                on_frame(camera);
                frames += 1;
            }
            None => break,
        }
    }
    log::trace!("inertia playback emitted {} frames", frames);
    frames
}

/// Spawns [`drive_playback`] on the current runtime.
/// The returned token stops the task at its next tick.
pub fn spawn_playback<F>(
    playback: InertiaPlayback,
    frame_interval: Duration,
    on_frame: F,
) -> (JoinHandle<usize>, CancellationToken)
where
    F: FnMut(Camera) + Send + 'static,
{
    let token = playback.token();
    let handle = tokio::spawn(drive_playback(playback, frame_interval, on_frame));
    (handle, token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        animation::inertia::{InertiaModel, ScaledCamera},
        core::{config::InertiaConfig, geo::Point},
    };
    use std::sync::{Arc, Mutex};

    fn short_flick() -> InertiaPlayback {
        let model = InertiaModel::new(
            ScaledCamera::new(Point::zero(), 1.0),
            ScaledCamera::new(Point::new(10.0, 0.0), 1.0),
            50.0,
        );
        let config = InertiaConfig {
            braking_time_ms: 100.0,
            ..InertiaConfig::default()
        };
        InertiaPlayback::from_release(model, 0.0, &config)
    }

    #[tokio::test]
    async fn test_drive_until_settled() {
        let mut last = None;
        let frames = drive_playback(short_flick(), Duration::from_millis(5), |camera| {
            last = Some(camera)
        })
        .await;
        assert!(frames >= 2);
        // rest position: 10 + 0.2 * 100 / 2
        let last = last.unwrap();
        assert!(last.offset.x > 10.0 && last.offset.x <= 20.0 + 1e-9);
    }

    #[tokio::test]
    async fn test_cancelled_playback_emits_nothing() {
        let playback = short_flick();
        playback.stop();
        let frames = drive_playback(playback, Duration::from_millis(5), |_| {}).await;
        assert_eq!(frames, 0);
    }

    #[tokio::test]
    async fn test_spawned_playback_can_be_stopped() {
        let seen = Arc::new(Mutex::new(0usize));
        let counter = seen.clone();
        let (handle, token) = spawn_playback(short_flick(), Duration::from_millis(5), move |_| {
            *counter.lock().unwrap() += 1;
        });
        token.cancel();
        let frames = handle.await.unwrap();
        assert_eq!(frames, *seen.lock().unwrap());
    }
}
