//! Preview session coordination.
//!
//! The coordinator owns the live registry of preview sessions: one
//! cancelable periodic capture task per monitor the user is inspecting.
//! All registry mutation funnels through [`PreviewCoordinator`] methods;
//! the raw map is never exposed.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::backend::{CaptureBackend, PreviewFrame, PreviewOptions, PreviewOptionsUpdate};

/// Callback invoked with each captured frame for one monitor.
pub type FrameCallback = Arc<dyn Fn(PreviewFrame) + Send + Sync>;

/// Snapshot of one live preview session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewSession {
    pub monitor_id: String,
    pub cadence_ms: u64,
    pub target_width: u32,
    pub target_height: u32,
    pub quality: u8,
    pub active: bool,
    /// Wall-clock time of the most recent delivered frame (epoch ms).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_frame_at: Option<i64>,
}

struct SessionHandle {
    cadence_ms: u64,
    callback: FrameCallback,
    cancel: CancellationToken,
    task: JoinHandle<()>,
    /// Epoch ms of the last delivered frame; 0 means none yet.
    last_frame_at: Arc<AtomicI64>,
    /// Held by the loop around the cancellation check and callback, and
    /// acquired by `stop` after cancelling. Once `stop` has taken it, no
    /// delivery can still be in flight.
    delivery: Arc<Mutex<()>>,
}

/// Coordinates concurrent per-monitor preview capture loops.
///
/// State machine per monitor id: Inactive → Active on [`start`], back to
/// Inactive on [`stop`]/[`stop_all`]. At most one session exists per
/// monitor id at any time, and each session serializes its own ticks:
/// one capture request in flight, the next tick waits.
///
/// [`start`]: PreviewCoordinator::start
/// [`stop`]: PreviewCoordinator::stop
/// [`stop_all`]: PreviewCoordinator::stop_all
pub struct PreviewCoordinator {
    backend: Arc<dyn CaptureBackend>,
    options: Mutex<PreviewOptions>,
    sessions: Mutex<HashMap<String, SessionHandle>>,
}

impl PreviewCoordinator {
    pub fn new(backend: Arc<dyn CaptureBackend>, options: PreviewOptions) -> Self {
        Self {
            backend,
            options: Mutex::new(options),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Start a preview session for `monitor_id`.
    ///
    /// A no-op (logged) when a session already exists for that monitor.
    /// Must be called from within a tokio runtime.
    pub fn start(&self, monitor_id: &str, callback: FrameCallback) {
        let options = *self.options.lock().unwrap();
        let mut sessions = self.sessions.lock().unwrap();

        if sessions.contains_key(monitor_id) {
            tracing::warn!(monitor_id = %monitor_id, "Preview already active for monitor");
            return;
        }

        let cancel = CancellationToken::new();
        let last_frame_at = Arc::new(AtomicI64::new(0));
        let delivery = Arc::new(Mutex::new(()));

        let task = spawn_capture_loop(
            Arc::clone(&self.backend),
            monitor_id.to_string(),
            options,
            Arc::clone(&callback),
            cancel.clone(),
            Arc::clone(&last_frame_at),
            Arc::clone(&delivery),
        );

        tracing::info!(
            monitor_id = %monitor_id,
            cadence_ms = options.cadence_ms(),
            "Preview session started"
        );

        sessions.insert(
            monitor_id.to_string(),
            SessionHandle {
                cadence_ms: options.cadence_ms(),
                callback,
                cancel,
                task,
                last_frame_at,
                delivery,
            },
        );
    }

    /// Stop the preview session for `monitor_id`.
    ///
    /// Once this returns, no further tick or callback for that monitor
    /// fires: the timer is dead, any in-flight capture result is
    /// discarded, and a callback already executing has completed.
    /// Returns false when no session existed.
    ///
    /// Must not be called from inside a frame callback: waiting for the
    /// callback to finish would then wait on the calling thread itself.
    pub fn stop(&self, monitor_id: &str) -> bool {
        let handle = self.sessions.lock().unwrap().remove(monitor_id);
        match handle {
            Some(handle) => {
                handle.cancel.cancel();
                handle.task.abort();
                // The loop holds this lock from its cancellation check
                // through the callback. Taking it here waits out a
                // delivery that was already past the check.
                drop(handle.delivery.lock().unwrap());
                tracing::info!(monitor_id = %monitor_id, "Preview session stopped");
                true
            }
            None => false,
        }
    }

    /// Stop every active preview session. Same guarantee and callback
    /// restriction as [`stop`](PreviewCoordinator::stop).
    pub fn stop_all(&self) {
        let drained: Vec<(String, SessionHandle)> =
            self.sessions.lock().unwrap().drain().collect();
        let count = drained.len();
        for (_, handle) in drained {
            handle.cancel.cancel();
            handle.task.abort();
            drop(handle.delivery.lock().unwrap());
        }
        if count > 0 {
            tracing::info!(count, "Stopped all preview sessions");
        }
    }

    /// Apply a partial options update.
    ///
    /// A changed fps drains every active session and restarts all of them
    /// at the new cadence with their callbacks preserved - a full
    /// drain-and-restart, never a partial retune, so no two sessions ever
    /// run at mixed cadences.
    pub fn update_options(&self, update: PreviewOptionsUpdate) {
        let fps_changed = {
            let mut options = self.options.lock().unwrap();
            let old_fps = options.fps;
            if let Some(width) = update.target_width {
                options.target_width = width;
            }
            if let Some(height) = update.target_height {
                options.target_height = height;
            }
            if let Some(fps) = update.fps {
                options.fps = fps;
            }
            if let Some(quality) = update.quality {
                options.quality = quality;
            }
            options.fps != old_fps
        };

        if !fps_changed {
            return;
        }

        let restart: Vec<(String, FrameCallback)> = {
            let sessions = self.sessions.lock().unwrap();
            sessions
                .iter()
                .map(|(id, handle)| (id.clone(), Arc::clone(&handle.callback)))
                .collect()
        };

        if restart.is_empty() {
            return;
        }

        tracing::info!(
            count = restart.len(),
            "FPS changed - restarting all preview sessions"
        );
        self.stop_all();
        for (monitor_id, callback) in restart {
            self.start(&monitor_id, callback);
        }
    }

    /// Current options snapshot.
    pub fn options(&self) -> PreviewOptions {
        *self.options.lock().unwrap()
    }

    /// Whether a session exists for `monitor_id`.
    pub fn is_active(&self, monitor_id: &str) -> bool {
        self.sessions.lock().unwrap().contains_key(monitor_id)
    }

    /// Ids of all monitors with an active session.
    pub fn active_monitors(&self) -> Vec<String> {
        self.sessions.lock().unwrap().keys().cloned().collect()
    }

    /// Snapshot of one session's state, if active.
    pub fn session(&self, monitor_id: &str) -> Option<PreviewSession> {
        let options = *self.options.lock().unwrap();
        let sessions = self.sessions.lock().unwrap();
        sessions.get(monitor_id).map(|handle| {
            let last = handle.last_frame_at.load(Ordering::Relaxed);
            PreviewSession {
                monitor_id: monitor_id.to_string(),
                cadence_ms: handle.cadence_ms,
                target_width: options.target_width,
                target_height: options.target_height,
                quality: options.quality,
                active: true,
                last_frame_at: (last != 0).then_some(last),
            }
        })
    }
}

impl Drop for PreviewCoordinator {
    fn drop(&mut self) {
        self.stop_all();
    }
}

/// Spawn the periodic capture loop for one session.
///
/// The single task both paces and captures, so ticks for one monitor can
/// never overlap: a slow capture simply delays the next tick
/// (`MissedTickBehavior::Delay`). The first capture fires one full
/// cadence after start, not immediately.
fn spawn_capture_loop(
    backend: Arc<dyn CaptureBackend>,
    monitor_id: String,
    options: PreviewOptions,
    callback: FrameCallback,
    cancel: CancellationToken,
    last_frame_at: Arc<AtomicI64>,
    delivery: Arc<Mutex<()>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let period = Duration::from_millis(options.cadence_ms());
        let mut ticker = time::interval_at(time::Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let result = backend
                        .capture_preview(
                            &monitor_id,
                            options.target_width,
                            options.target_height,
                            options.quality,
                        )
                        .await;

                    // The delivery lock pairs the cancellation check with
                    // the callback: `stop` cancels and then takes the same
                    // lock, so a stop that raced the capture wins and the
                    // result is discarded, and `stop` cannot return while
                    // a callback is still executing.
                    let _delivery = delivery.lock().unwrap();
                    if cancel.is_cancelled() {
                        break;
                    }

                    match result {
                        Ok(image) => {
                            let timestamp_ms = chrono::Utc::now().timestamp_millis();
                            last_frame_at.store(timestamp_ms, Ordering::Relaxed);
                            callback(PreviewFrame {
                                monitor_id: monitor_id.clone(),
                                image_data: image.image_data,
                                timestamp_ms,
                                width: image.width,
                                height: image.height,
                            });
                        }
                        Err(e) => {
                            // Transient: keep the timer alive, retry next tick.
                            tracing::warn!(
                                monitor_id = %monitor_id,
                                error = %e,
                                "Preview capture failed"
                            );
                        }
                    }
                }
                _ = cancel.cancelled() => {
                    break;
                }
            }
        }

        tracing::debug!(monitor_id = %monitor_id, "Preview loop exited");
    })
}
