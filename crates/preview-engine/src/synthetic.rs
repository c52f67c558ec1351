//! Deterministic in-process capture backend.
//!
//! Produces fake frames without touching any display server, for tests
//! and for exercising the coordinator from the CLI. Scaling behaves like
//! a real backend: output dimensions preserve the monitor's aspect ratio
//! within the requested target box.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use base64::{engine::general_purpose, Engine as _};

use capview_common::{CapviewError, CapviewResult};
use capview_display_model::MonitorDescriptor;

use crate::backend::{CaptureBackend, CapturedImage};

/// A capture backend that synthesizes frames for known monitors.
pub struct SyntheticBackend {
    monitors: Vec<MonitorDescriptor>,
    captures: Mutex<HashMap<String, u64>>,
    failing: Mutex<HashSet<String>>,
}

impl SyntheticBackend {
    pub fn new(monitors: Vec<MonitorDescriptor>) -> Self {
        Self {
            monitors,
            captures: Mutex::new(HashMap::new()),
            failing: Mutex::new(HashSet::new()),
        }
    }

    /// Make subsequent captures of `monitor_id` fail until cleared.
    pub fn inject_failure(&self, monitor_id: &str) {
        self.failing.lock().unwrap().insert(monitor_id.to_string());
    }

    /// Let captures of `monitor_id` succeed again.
    pub fn clear_failure(&self, monitor_id: &str) {
        self.failing.lock().unwrap().remove(monitor_id);
    }

    /// How many capture requests (successful or not) this monitor has seen.
    pub fn capture_count(&self, monitor_id: &str) -> u64 {
        self.captures
            .lock()
            .unwrap()
            .get(monitor_id)
            .copied()
            .unwrap_or(0)
    }
}

/// Fit `(width, height)` into the target box, preserving aspect ratio.
pub fn scaled_dimensions(
    width: u32,
    height: u32,
    target_width: u32,
    target_height: u32,
) -> (u32, u32) {
    let aspect = width as f32 / height.max(1) as f32;
    let target_aspect = target_width as f32 / target_height.max(1) as f32;

    if aspect > target_aspect {
        // Width is the limiting factor.
        (target_width, (target_width as f32 / aspect) as u32)
    } else {
        // Height is the limiting factor.
        ((target_height as f32 * aspect) as u32, target_height)
    }
}

#[async_trait::async_trait]
impl CaptureBackend for SyntheticBackend {
    async fn capture_preview(
        &self,
        monitor_id: &str,
        target_width: u32,
        target_height: u32,
        _quality: u8,
    ) -> CapviewResult<CapturedImage> {
        let sequence = {
            let mut captures = self.captures.lock().unwrap();
            let entry = captures.entry(monitor_id.to_string()).or_insert(0);
            *entry += 1;
            *entry
        };

        if self.failing.lock().unwrap().contains(monitor_id) {
            return Err(CapviewError::capture(monitor_id, "injected capture failure"));
        }

        let monitor = self
            .monitors
            .iter()
            .find(|m| m.id == monitor_id)
            .ok_or_else(|| CapviewError::MonitorNotFound {
                monitor_id: monitor_id.to_string(),
            })?;

        let (width, height) = scaled_dimensions(
            monitor.width,
            monitor.height,
            target_width,
            target_height,
        );

        let payload = format!("{monitor_id}#{sequence}:{width}x{height}");
        Ok(CapturedImage {
            image_data: general_purpose::STANDARD.encode(payload.as_bytes()),
            width,
            height,
        })
    }
}
