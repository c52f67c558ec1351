//! Structural validation of monitor sets and selections.
//!
//! Monitor descriptors come from an external enumeration source and are
//! untrusted. Validation never halts the caller: every check produces a
//! [`ValidationFinding`] carried in a [`ValidationResult`], and callers
//! decide how to react. Errors make the configuration unusable; warnings
//! are informational and never block progress.

use serde::{Deserialize, Serialize};

use crate::monitor::MonitorDescriptor;

/// Monitors larger than this on either axis are suspicious (likely a bad
/// descriptor, not real hardware).
pub const MAX_SANE_DIMENSION: u32 = 16384;

/// Scale factors above this are unusual enough to warn about.
pub const MAX_SANE_SCALE: f64 = 4.0;

/// Below this resolution a monitor is considered small for recording.
pub const SMALL_MONITOR_WIDTH: u32 = 1280;
pub const SMALL_MONITOR_HEIGHT: u32 = 720;

/// Severity of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationSeverity {
    Error,
    Warning,
}

/// A single validation finding with a stable machine-readable code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationFinding {
    /// Stable code, e.g. `DUPLICATE_IDS` or `MONITORS_OVERLAP`.
    pub code: String,
    /// Human-readable explanation.
    pub message: String,
    pub severity: ValidationSeverity,
    /// The monitor this finding is about, when it concerns a single one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monitor_id: Option<String>,
}

impl ValidationFinding {
    fn error(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            severity: ValidationSeverity::Error,
            monitor_id: None,
        }
    }

    fn warning(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            severity: ValidationSeverity::Warning,
            monitor_id: None,
        }
    }

    fn for_monitor(mut self, id: impl Into<String>) -> Self {
        self.monitor_id = Some(id.into());
        self
    }
}

/// Outcome of validating a monitor set or selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True iff there are no error-severity findings.
    pub valid: bool,
    pub errors: Vec<ValidationFinding>,
    pub warnings: Vec<ValidationFinding>,
}

impl ValidationResult {
    fn from_findings(findings: Vec<ValidationFinding>) -> Self {
        let (errors, warnings): (Vec<_>, Vec<_>) = findings
            .into_iter()
            .partition(|f| f.severity == ValidationSeverity::Error);
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// One-line human-readable summary.
    pub fn summary(&self) -> String {
        if self.valid && self.warnings.is_empty() {
            "Configuration is valid".to_string()
        } else if self.valid {
            format!(
                "Configuration is valid with {} warning(s)",
                self.warnings.len()
            )
        } else {
            format!("Configuration has {} error(s)", self.errors.len())
        }
    }
}

/// Validate a monitor set for structural integrity.
///
/// An empty set short-circuits with `NO_MONITORS`; otherwise every check
/// runs and all findings are collected.
pub fn validate_monitors(monitors: &[MonitorDescriptor]) -> ValidationResult {
    let mut findings = Vec::new();

    if monitors.is_empty() {
        findings.push(ValidationFinding::error(
            "NO_MONITORS",
            "No monitors detected. Please check your display connections.",
        ));
        return ValidationResult::from_findings(findings);
    }

    for monitor in monitors {
        if monitor.width == 0 || monitor.height == 0 {
            findings.push(
                ValidationFinding::error(
                    "INVALID_DIMENSIONS",
                    format!(
                        "Monitor \"{}\" has invalid dimensions: {}x{}",
                        monitor.name, monitor.width, monitor.height
                    ),
                )
                .for_monitor(&monitor.id),
            );
        }

        if monitor.width > MAX_SANE_DIMENSION || monitor.height > MAX_SANE_DIMENSION {
            findings.push(
                ValidationFinding::warning(
                    "UNUSUALLY_LARGE",
                    format!(
                        "Monitor \"{}\" has unusually large dimensions: {}x{}",
                        monitor.name, monitor.width, monitor.height
                    ),
                )
                .for_monitor(&monitor.id),
            );
        }

        if monitor.scale_factor <= 0.0 {
            findings.push(
                ValidationFinding::error(
                    "INVALID_SCALE",
                    format!(
                        "Monitor \"{}\" has invalid scale factor: {}",
                        monitor.name, monitor.scale_factor
                    ),
                )
                .for_monitor(&monitor.id),
            );
        }

        if monitor.scale_factor > MAX_SANE_SCALE {
            findings.push(
                ValidationFinding::warning(
                    "UNUSUAL_SCALE",
                    format!(
                        "Monitor \"{}\" has unusually high scale factor: {}x",
                        monitor.name, monitor.scale_factor
                    ),
                )
                .for_monitor(&monitor.id),
            );
        }
    }

    let primary_count = monitors.iter().filter(|m| m.is_primary).count();
    if primary_count == 0 {
        findings.push(ValidationFinding::warning(
            "NO_PRIMARY",
            "No monitor is marked as primary. This may cause unexpected behavior.",
        ));
    } else if primary_count > 1 {
        findings.push(ValidationFinding::error(
            "MULTIPLE_PRIMARY",
            format!("{primary_count} monitors are marked as primary. Only one should be primary."),
        ));
    }

    let mut duplicates: Vec<&str> = Vec::new();
    for (index, monitor) in monitors.iter().enumerate() {
        let first_index = monitors
            .iter()
            .position(|m| m.id == monitor.id)
            .unwrap_or(index);
        if first_index != index && !duplicates.contains(&monitor.id.as_str()) {
            duplicates.push(&monitor.id);
        }
    }
    if !duplicates.is_empty() {
        findings.push(ValidationFinding::error(
            "DUPLICATE_IDS",
            format!("Duplicate monitor IDs detected: {}", duplicates.join(", ")),
        ));
    }

    for (i, first) in monitors.iter().enumerate() {
        for second in &monitors[i + 1..] {
            if first.overlaps(second) {
                findings.push(
                    ValidationFinding::warning(
                        "MONITORS_OVERLAP",
                        format!(
                            "Monitors \"{}\" and \"{}\" appear to overlap. \
                             This may indicate a configuration issue.",
                            first.name, second.name
                        ),
                    )
                    .for_monitor(&first.id),
                );
            }
        }
    }

    ValidationResult::from_findings(findings)
}

/// Validate a monitor selection against the current monitor set.
///
/// Runs [`validate_monitors`] first; when the set itself is invalid its
/// findings are returned unchanged, since a selection cannot be
/// meaningfully validated against a broken monitor set.
pub fn validate_selection(
    monitors: &[MonitorDescriptor],
    selected_ids: &[String],
    use_all: bool,
) -> ValidationResult {
    let monitor_result = validate_monitors(monitors);
    if !monitor_result.valid {
        return monitor_result;
    }

    let mut findings: Vec<ValidationFinding> = monitor_result
        .warnings
        .into_iter()
        .chain(monitor_result.errors)
        .collect();

    if !use_all && selected_ids.is_empty() {
        findings.push(ValidationFinding::error(
            "NO_SELECTION",
            "At least one monitor must be selected for recording.",
        ));
    }

    for id in selected_ids {
        if !monitors.iter().any(|m| &m.id == id) {
            findings.push(
                ValidationFinding::error(
                    "INVALID_MONITOR_ID",
                    format!("Selected monitor ID \"{id}\" does not exist."),
                )
                .for_monitor(id),
            );
        }
    }

    if use_all && selected_ids.len() != monitors.len() {
        findings.push(ValidationFinding::warning(
            "INCONSISTENT_USE_ALL",
            format!(
                "\"Use All Monitors\" is enabled but only {} of {} monitors are selected.",
                selected_ids.len(),
                monitors.len()
            ),
        ));
    }

    let selected: Vec<&MonitorDescriptor> = monitors
        .iter()
        .filter(|m| selected_ids.contains(&m.id))
        .collect();
    let all_small = selected
        .iter()
        .all(|m| m.width < SMALL_MONITOR_WIDTH || m.height < SMALL_MONITOR_HEIGHT);
    if !selected.is_empty() && all_small {
        findings.push(ValidationFinding::warning(
            "SMALL_MONITORS_ONLY",
            "All selected monitors have low resolution. Recording quality may be limited.",
        ));
    }

    ValidationResult::from_findings(findings)
}

/// Result of [`auto_fix_configuration`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoFixOutcome {
    pub monitors: Vec<MonitorDescriptor>,
    pub selected_ids: Vec<String>,
    pub use_all: bool,
    /// Whether any repair was applied.
    pub fixed: bool,
    /// Human-readable description of each applied change.
    pub changes: Vec<String>,
}

/// Deterministic repair pass for common configuration problems.
///
/// Fixes are applied in a fixed order and each step is idempotent: running
/// the fixer on its own output records no further changes.
///
/// 1. Drop selected ids that reference no monitor.
/// 2. Nothing selected and not `use_all`: enable `use_all`, select all.
/// 3. `use_all` enabled: force the selection to exactly all monitor ids.
/// 4. No primary monitor: mark the first descriptor primary.
///
/// Dropping dead ids runs first so a selection that consists entirely of
/// stale ids collapses to empty and then falls into the `use_all` repair
/// in the same pass.
pub fn auto_fix_configuration(
    monitors: &[MonitorDescriptor],
    selected_ids: &[String],
    use_all: bool,
) -> AutoFixOutcome {
    let mut changes = Vec::new();
    let mut fixed_monitors = monitors.to_vec();
    let mut fixed_selection = selected_ids.to_vec();
    let mut fixed_use_all = use_all;

    let original_len = fixed_selection.len();
    fixed_selection.retain(|id| monitors.iter().any(|m| &m.id == id));
    if fixed_selection.len() < original_len {
        changes.push(format!(
            "Removed {} invalid monitor ID(s) from selection",
            original_len - fixed_selection.len()
        ));
    }

    if !fixed_use_all && fixed_selection.is_empty() && !monitors.is_empty() {
        fixed_use_all = true;
        fixed_selection = monitors.iter().map(|m| m.id.clone()).collect();
        changes.push("Enabled 'Use All Monitors' because no monitors were selected".to_string());
    }

    if fixed_use_all && fixed_selection.len() != monitors.len() {
        fixed_selection = monitors.iter().map(|m| m.id.clone()).collect();
        changes.push("Updated selection to include all monitors".to_string());
    }

    if !fixed_monitors.iter().any(|m| m.is_primary) && !fixed_monitors.is_empty() {
        fixed_monitors[0].is_primary = true;
        changes.push(format!(
            "Marked \"{}\" as primary monitor",
            fixed_monitors[0].name
        ));
    }

    if !changes.is_empty() {
        tracing::debug!(count = changes.len(), "Auto-fix applied changes");
    }

    AutoFixOutcome {
        monitors: fixed_monitors,
        selected_ids: fixed_selection,
        use_all: fixed_use_all,
        fixed: !changes.is_empty(),
        changes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor(id: &str, primary: bool, width: u32, height: u32) -> MonitorDescriptor {
        MonitorDescriptor {
            id: id.to_string(),
            name: format!("Monitor {id}"),
            is_primary: primary,
            width,
            height,
            x: 0,
            y: 0,
            scale_factor: 1.0,
        }
    }

    fn side_by_side(specs: &[(&str, bool, u32, u32)]) -> Vec<MonitorDescriptor> {
        let mut x = 0;
        specs
            .iter()
            .map(|&(id, primary, width, height)| {
                let mut m = monitor(id, primary, width, height);
                m.x = x;
                x += width as i32;
                m
            })
            .collect()
    }

    #[test]
    fn empty_set_fails_with_no_monitors() {
        let result = validate_monitors(&[]);
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, "NO_MONITORS");
    }

    #[test]
    fn zero_dimension_is_an_error() {
        let monitors = vec![monitor("a", true, 0, 1080)];
        let result = validate_monitors(&monitors);
        assert!(!result.valid);
        assert!(result.errors.iter().any(|f| f.code == "INVALID_DIMENSIONS"));
        assert_eq!(result.errors[0].monitor_id.as_deref(), Some("a"));
    }

    #[test]
    fn oversized_monitor_is_only_a_warning() {
        let monitors = vec![monitor("a", true, 20000, 1080)];
        let result = validate_monitors(&monitors);
        assert!(result.valid);
        assert!(result.warnings.iter().any(|f| f.code == "UNUSUALLY_LARGE"));
    }

    #[test]
    fn scale_factor_checks() {
        let mut bad = monitor("a", true, 1920, 1080);
        bad.scale_factor = 0.0;
        let result = validate_monitors(&[bad]);
        assert!(result.errors.iter().any(|f| f.code == "INVALID_SCALE"));

        let mut odd = monitor("b", true, 1920, 1080);
        odd.scale_factor = 5.0;
        let result = validate_monitors(&[odd]);
        assert!(result.valid);
        assert!(result.warnings.iter().any(|f| f.code == "UNUSUAL_SCALE"));
    }

    #[test]
    fn primary_count_rules() {
        let none = side_by_side(&[("a", false, 1920, 1080), ("b", false, 1920, 1080)]);
        let result = validate_monitors(&none);
        assert!(result.valid);
        assert!(result.warnings.iter().any(|f| f.code == "NO_PRIMARY"));

        let two = side_by_side(&[("a", true, 1920, 1080), ("b", true, 1920, 1080)]);
        let result = validate_monitors(&two);
        assert!(!result.valid);
        assert!(result.errors.iter().any(|f| f.code == "MULTIPLE_PRIMARY"));
    }

    #[test]
    fn duplicate_ids_detected_once() {
        let mut monitors = side_by_side(&[("a", true, 1920, 1080), ("b", false, 1920, 1080)]);
        monitors.push({
            let mut m = monitor("a", false, 1280, 720);
            m.x = 3840;
            m
        });
        let result = validate_monitors(&monitors);
        assert!(!result.valid);
        let dup: Vec<_> = result
            .errors
            .iter()
            .filter(|f| f.code == "DUPLICATE_IDS")
            .collect();
        assert_eq!(dup.len(), 1);
        assert!(dup[0].message.contains('a'));
    }

    #[test]
    fn overlapping_monitors_warn_per_pair() {
        let mut monitors = side_by_side(&[("a", true, 1920, 1080)]);
        monitors.push(monitor("b", false, 1920, 1080)); // same origin as "a"
        let result = validate_monitors(&monitors);
        assert!(result.valid);
        let overlaps: Vec<_> = result
            .warnings
            .iter()
            .filter(|f| f.code == "MONITORS_OVERLAP")
            .collect();
        assert_eq!(overlaps.len(), 1);
    }

    #[test]
    fn selection_validation_stops_on_invalid_monitors() {
        let monitors = vec![monitor("a", true, 0, 0)];
        let result = validate_selection(&monitors, &["a".to_string()], false);
        assert!(!result.valid);
        assert!(result.errors.iter().any(|f| f.code == "INVALID_DIMENSIONS"));
        // Selection-level checks must not have run.
        assert!(!result.errors.iter().any(|f| f.code == "NO_SELECTION"));
    }

    #[test]
    fn empty_selection_without_use_all_is_an_error() {
        let monitors = side_by_side(&[("a", true, 1920, 1080)]);
        let result = validate_selection(&monitors, &[], false);
        assert!(!result.valid);
        assert!(result.errors.iter().any(|f| f.code == "NO_SELECTION"));
    }

    #[test]
    fn unknown_selected_id_reports_one_finding_per_id() {
        let monitors = side_by_side(&[("a", true, 1920, 1080), ("b", false, 1920, 1080)]);
        let selected = vec!["c".to_string(), "d".to_string()];
        let result = validate_selection(&monitors, &selected, false);
        assert!(!result.valid);
        let invalid: Vec<_> = result
            .errors
            .iter()
            .filter(|f| f.code == "INVALID_MONITOR_ID")
            .collect();
        assert_eq!(invalid.len(), 2);
        assert_eq!(invalid[0].monitor_id.as_deref(), Some("c"));
    }

    #[test]
    fn inconsistent_use_all_warns() {
        let monitors = side_by_side(&[("a", true, 1920, 1080), ("b", false, 1920, 1080)]);
        let result = validate_selection(&monitors, &["a".to_string()], true);
        assert!(result.valid);
        assert!(result
            .warnings
            .iter()
            .any(|f| f.code == "INCONSISTENT_USE_ALL"));
    }

    #[test]
    fn small_monitors_only_requires_nonempty_selection() {
        let monitors = side_by_side(&[("a", true, 1024, 768), ("b", false, 1920, 1080)]);

        let small = validate_selection(&monitors, &["a".to_string()], false);
        assert!(small
            .warnings
            .iter()
            .any(|f| f.code == "SMALL_MONITORS_ONLY"));

        let mixed = validate_selection(
            &monitors,
            &["a".to_string(), "b".to_string()],
            false,
        );
        assert!(!mixed
            .warnings
            .iter()
            .any(|f| f.code == "SMALL_MONITORS_ONLY"));
    }

    #[test]
    fn auto_fix_selects_all_when_nothing_selected() {
        let monitors = side_by_side(&[("a", true, 1920, 1080), ("b", false, 1920, 1080)]);
        let outcome = auto_fix_configuration(&monitors, &[], false);
        assert!(outcome.fixed);
        assert!(outcome.use_all);
        assert_eq!(outcome.selected_ids, vec!["a", "b"]);
    }

    #[test]
    fn auto_fix_drops_unknown_ids_and_marks_primary() {
        let monitors = side_by_side(&[("a", false, 1920, 1080), ("b", false, 1920, 1080)]);
        let selected = vec!["a".to_string(), "ghost".to_string()];
        let outcome = auto_fix_configuration(&monitors, &selected, false);
        assert!(outcome.fixed);
        assert_eq!(outcome.selected_ids, vec!["a"]);
        assert!(outcome.monitors[0].is_primary);
        assert!(!outcome.monitors[1].is_primary);
    }

    #[test]
    fn auto_fix_is_idempotent() {
        let monitors = side_by_side(&[("a", false, 1920, 1080), ("b", false, 1920, 1080)]);
        let selected = vec!["ghost".to_string()];
        let first = auto_fix_configuration(&monitors, &selected, true);
        assert!(first.fixed);

        let second =
            auto_fix_configuration(&first.monitors, &first.selected_ids, first.use_all);
        assert!(!second.fixed);
        assert!(second.changes.is_empty());
    }

    #[test]
    fn summary_wording() {
        let monitors = side_by_side(&[("a", true, 1920, 1080)]);
        let ok = validate_monitors(&monitors);
        assert_eq!(ok.summary(), "Configuration is valid");

        let none = validate_monitors(&[]);
        assert_eq!(none.summary(), "Configuration has 1 error(s)");
    }
}
