//! Capture backend contract and preview frame types.

use serde::{Deserialize, Serialize};

use capview_common::CapviewResult;

/// One captured, scaled-down preview image from the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapturedImage {
    /// Base64-encoded image bytes.
    pub image_data: String,
    /// Actual dimensions after aspect-preserving scaling.
    pub width: u32,
    pub height: u32,
}

/// A preview frame delivered to a session callback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewFrame {
    pub monitor_id: String,
    /// Base64-encoded image bytes.
    pub image_data: String,
    /// Capture wall-clock time, milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
    pub width: u32,
    pub height: u32,
}

/// Preview capture parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewOptions {
    /// Target preview width in pixels.
    pub target_width: u32,
    /// Target preview height in pixels.
    pub target_height: u32,
    /// Captures per second for each active session.
    pub fps: u32,
    /// JPEG quality (0-100) requested from the backend.
    pub quality: u8,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            target_width: 320,
            target_height: 180,
            fps: 2,
            quality: 60,
        }
    }
}

impl PreviewOptions {
    /// Milliseconds between capture attempts for one session.
    pub fn cadence_ms(&self) -> u64 {
        1000 / self.fps.max(1) as u64
    }
}

/// Partial update for [`PreviewOptions`]; unset fields keep their value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreviewOptionsUpdate {
    pub target_width: Option<u32>,
    pub target_height: Option<u32>,
    pub fps: Option<u32>,
    pub quality: Option<u8>,
}

/// Abstract interface to the external screen capture collaborator.
///
/// Implementations may fail transiently (permissions, device churn,
/// compositor hiccups); the coordinator treats every failure as
/// recoverable and retries on the next natural tick.
#[async_trait::async_trait]
pub trait CaptureBackend: Send + Sync {
    /// Capture one scaled-down frame of the given monitor.
    async fn capture_preview(
        &self,
        monitor_id: &str,
        target_width: u32,
        target_height: u32,
        quality: u8,
    ) -> CapviewResult<CapturedImage>;
}
