//! Smart default monitor selection.
//!
//! A fixed decision tree, evaluated top-down with first match winning.
//! The thresholds in this module encode product heuristics, not derived
//! physics: changing them changes user-visible defaults, so they stay
//! as-is unless the product decision changes.

use serde::{Deserialize, Serialize};

use capview_display_model::{largest_monitor, primary_monitor, total_pixels, MonitorDescriptor};

/// Displays at or above this scale factor are treated as laptop panels.
pub const LAPTOP_SCALE_MIN: f64 = 1.5;

/// Common built-in laptop panel resolutions, used to recognize a
/// laptop + external pair. The last two are MacBook Pro 14"/16" panels.
pub const LAPTOP_PANEL_RESOLUTIONS: &[(u32, u32)] = &[
    (1920, 1080),
    (2560, 1600),
    (2880, 1800),
    (3024, 1964),
    (3456, 2234),
];

/// Selections under this many megapixels record comfortably at full rate.
const LOW_IMPACT_MEGAPIXELS: f64 = 3.0;

/// Above this many megapixels the encoder falls back to its slowest rate.
const MEDIUM_IMPACT_MEGAPIXELS: f64 = 10.0;

/// Rough storage cost per megapixel per frame (bytes), based on typical
/// encoded output (1080p @ 30fps lands around 100-200 MB/hour).
const BYTES_PER_MEGAPIXEL_FRAME: f64 = 75_000.0;

/// Qualitative certainty attached to a heuristic default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// An alternative selection the user can pick instead of the default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlternativeOption {
    pub label: String,
    pub selected_ids: Vec<String>,
    pub use_all: bool,
    pub description: String,
}

/// A heuristic default selection with rationale and alternatives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmartDefaultResult {
    pub selected_ids: Vec<String>,
    pub use_all: bool,
    pub rationale: String,
    pub confidence: Confidence,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<AlternativeOption>,
}

/// Calculate the smart default selection for a monitor set.
///
/// Decision tree (first match wins):
/// 1. No monitors: empty selection, low confidence.
/// 2. Single monitor: select it, high confidence.
/// 3. Dual monitors: primary only (recording both doubles storage and
///    processing for little benefit), high confidence.
/// 4. Three or more: select all; multi-monitor power users usually want
///    comprehensive coverage, medium confidence.
pub fn smart_monitor_defaults(monitors: &[MonitorDescriptor]) -> SmartDefaultResult {
    if monitors.is_empty() {
        return SmartDefaultResult {
            selected_ids: vec![],
            use_all: false,
            rationale: "No monitors detected".to_string(),
            confidence: Confidence::Low,
            alternatives: vec![],
        };
    }

    if monitors.len() == 1 {
        return SmartDefaultResult {
            selected_ids: vec![monitors[0].id.clone()],
            use_all: false,
            rationale: "Only one monitor detected - selected automatically".to_string(),
            confidence: Confidence::High,
            alternatives: vec![],
        };
    }

    let all_ids: Vec<String> = monitors.iter().map(|m| m.id.clone()).collect();
    let primary_id = primary_monitor(monitors)
        .map(|m| m.id.clone())
        .unwrap_or_else(|| monitors[0].id.clone());
    let largest_id = largest_monitor(monitors)
        .map(|m| m.id.clone())
        .unwrap_or_else(|| monitors[0].id.clone());

    if monitors.len() == 2 {
        return SmartDefaultResult {
            selected_ids: vec![primary_id],
            use_all: false,
            rationale: "Dual monitor setup detected - recording primary display only \
                        to optimize performance"
                .to_string(),
            confidence: Confidence::High,
            alternatives: vec![
                AlternativeOption {
                    label: "Record both monitors".to_string(),
                    selected_ids: all_ids,
                    use_all: true,
                    description: "Capture everything across both displays".to_string(),
                },
                AlternativeOption {
                    label: "Record largest monitor".to_string(),
                    selected_ids: vec![largest_id],
                    use_all: false,
                    description: "Record the monitor with the highest resolution".to_string(),
                },
            ],
        };
    }

    SmartDefaultResult {
        selected_ids: all_ids.clone(),
        use_all: true,
        rationale: format!(
            "{} monitors detected - recording all displays for comprehensive coverage",
            monitors.len()
        ),
        confidence: Confidence::Medium,
        alternatives: vec![
            AlternativeOption {
                label: "Record primary only".to_string(),
                selected_ids: vec![primary_id],
                use_all: false,
                description: "Record just your main working display".to_string(),
            },
            AlternativeOption {
                label: "Record largest monitor".to_string(),
                selected_ids: vec![largest_id],
                use_all: false,
                description: "Record the monitor with the highest resolution".to_string(),
            },
        ],
    }
}

/// Whether this is a laptop + external monitor pair.
///
/// Heuristic: exactly two monitors, one of which looks like a built-in
/// laptop panel (a known panel resolution at high DPI) while the other
/// does not.
pub fn is_laptop_plus_external(monitors: &[MonitorDescriptor]) -> bool {
    if monitors.len() != 2 {
        return false;
    }

    let mut laptop_count = 0;
    let mut external_count = 0;

    for monitor in monitors {
        let panel_resolution = LAPTOP_PANEL_RESOLUTIONS
            .iter()
            .any(|&(w, h)| w == monitor.width && h == monitor.height);
        let high_dpi = monitor.scale_factor >= LAPTOP_SCALE_MIN;

        if panel_resolution && high_dpi {
            laptop_count += 1;
        } else {
            external_count += 1;
        }
    }

    laptop_count == 1 && external_count == 1
}

/// Smart defaults for a laptop + external pair.
///
/// Prefers the external display (typically the primary workspace). Falls
/// through to [`smart_monitor_defaults`] when the set is not recognized
/// as such a pair.
pub fn laptop_external_defaults(monitors: &[MonitorDescriptor]) -> SmartDefaultResult {
    if !is_laptop_plus_external(monitors) {
        return smart_monitor_defaults(monitors);
    }

    let external = monitors.iter().find(|m| m.scale_factor < LAPTOP_SCALE_MIN);
    let laptop = monitors.iter().find(|m| m.scale_factor >= LAPTOP_SCALE_MIN);

    let Some(external) = external else {
        return smart_monitor_defaults(monitors);
    };

    SmartDefaultResult {
        selected_ids: vec![external.id.clone()],
        use_all: false,
        rationale: "Laptop + external monitor detected - recording external display \
                    (typically your primary workspace)"
            .to_string(),
        confidence: Confidence::High,
        alternatives: vec![
            AlternativeOption {
                label: "Record both displays".to_string(),
                selected_ids: monitors.iter().map(|m| m.id.clone()).collect(),
                use_all: true,
                description: "Capture both laptop and external monitor".to_string(),
            },
            AlternativeOption {
                label: "Record laptop only".to_string(),
                selected_ids: vec![laptop.map(|m| m.id.clone()).unwrap_or_else(|| {
                    monitors[0].id.clone()
                })],
                use_all: false,
                description: "Record just the laptop screen".to_string(),
            },
        ],
    }
}

/// How hard a selection will hit the encoder and disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceImpact {
    Low,
    Medium,
    High,
}

/// Estimated recording cost for a selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceEstimate {
    /// Total pixels captured per frame.
    pub pixels_per_frame: u64,
    /// Frame rate the encoder is expected to sustain.
    pub estimated_fps: u32,
    /// Storage per hour, rendered as "NNN MB" or "N.N GB".
    pub storage_per_hour: String,
    pub impact: PerformanceImpact,
    pub recommendation: String,
}

/// Estimate storage and performance impact of recording a selection.
pub fn estimate_performance(
    monitors: &[MonitorDescriptor],
    selected_ids: &[String],
) -> PerformanceEstimate {
    let pixels_per_frame = total_pixels(monitors, selected_ids);
    let megapixels = pixels_per_frame as f64 / 1_000_000.0;

    let (estimated_fps, impact, recommendation) = if megapixels < LOW_IMPACT_MEGAPIXELS {
        (
            30,
            PerformanceImpact::Low,
            "Excellent performance expected".to_string(),
        )
    } else if megapixels < MEDIUM_IMPACT_MEGAPIXELS {
        (
            20,
            PerformanceImpact::Medium,
            "Good performance on modern hardware".to_string(),
        )
    } else {
        (
            10,
            PerformanceImpact::High,
            "High resource usage - consider reducing monitor count or resolution".to_string(),
        )
    };

    let bytes_per_hour = megapixels * estimated_fps as f64 * BYTES_PER_MEGAPIXEL_FRAME * 3600.0;
    let mb_per_hour = bytes_per_hour / 1_000_000.0;
    let gb_per_hour = mb_per_hour / 1000.0;

    let storage_per_hour = if gb_per_hour >= 1.0 {
        format!("{gb_per_hour:.1} GB")
    } else {
        format!("{mb_per_hour:.0} MB")
    };

    PerformanceEstimate {
        pixels_per_frame,
        estimated_fps,
        storage_per_hour,
        impact,
        recommendation,
    }
}

/// Sanity-check a smart default result against the monitor set.
///
/// Used as a guard in tests and by callers that combine defaults from
/// multiple heuristics.
pub fn validate_smart_defaults(
    result: &SmartDefaultResult,
    monitors: &[MonitorDescriptor],
) -> Vec<String> {
    let mut issues = Vec::new();

    for id in &result.selected_ids {
        if !monitors.iter().any(|m| &m.id == id) {
            issues.push(format!("Selected ID \"{id}\" does not exist"));
        }
    }

    if result.use_all && result.selected_ids.len() != monitors.len() {
        issues.push(format!(
            "use_all is set but only {}/{} monitors selected",
            result.selected_ids.len(),
            monitors.len()
        ));
    }

    if result.selected_ids.is_empty() && !result.use_all && !monitors.is_empty() {
        issues.push("No monitors selected".to_string());
    }

    issues
}
