//! Monitor descriptors and geometry helpers.

use serde::{Deserialize, Serialize};

/// Immutable snapshot of one physical display's geometry and identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonitorDescriptor {
    /// Stable identifier, unique across the connected set.
    pub id: String,
    /// Human-readable name (e.g. "DELL U2720Q").
    pub name: String,
    /// Whether this monitor is the primary/default display.
    pub is_primary: bool,
    /// Resolution in physical pixels.
    pub width: u32,
    pub height: u32,
    /// Position in the virtual desktop (pixels, may be negative).
    pub x: i32,
    pub y: i32,
    /// Scale factor (for example 1.0, 1.25, 2.0).
    pub scale_factor: f64,
}

impl MonitorDescriptor {
    /// Total pixel count, the measure used for "largest monitor" decisions.
    pub fn pixel_area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Logical resolution (physical / scale).
    pub fn logical_width(&self) -> u32 {
        (self.width as f64 / self.scale_factor) as u32
    }

    /// Logical resolution (physical / scale).
    pub fn logical_height(&self) -> u32 {
        (self.height as f64 / self.scale_factor) as u32
    }

    /// Whether two monitors' rectangles intersect in screen space.
    ///
    /// Strict test: rectangles that merely share an edge (the normal
    /// side-by-side arrangement) do not overlap.
    pub fn overlaps(&self, other: &MonitorDescriptor) -> bool {
        let self_right = self.x + self.width as i32;
        let self_bottom = self.y + self.height as i32;
        let other_right = other.x + other.width as i32;
        let other_bottom = other.y + other.height as i32;

        !(self_right <= other.x
            || other_right <= self.x
            || self_bottom <= other.y
            || other_bottom <= self.y)
    }
}

/// The largest monitor by pixel count.
///
/// Ties keep the earlier element in iteration order.
pub fn largest_monitor(monitors: &[MonitorDescriptor]) -> Option<&MonitorDescriptor> {
    monitors.iter().reduce(|largest, current| {
        if current.pixel_area() > largest.pixel_area() {
            current
        } else {
            largest
        }
    })
}

/// The primary monitor, or the first one when none is flagged primary.
pub fn primary_monitor(monitors: &[MonitorDescriptor]) -> Option<&MonitorDescriptor> {
    monitors
        .iter()
        .find(|m| m.is_primary)
        .or_else(|| monitors.first())
}

/// Total pixel count across the selected monitors.
pub fn total_pixels(monitors: &[MonitorDescriptor], selected_ids: &[String]) -> u64 {
    monitors
        .iter()
        .filter(|m| selected_ids.contains(&m.id))
        .map(|m| m.pixel_area())
        .sum()
}
