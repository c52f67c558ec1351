//! Monitor selection state.

use serde::{Deserialize, Serialize};

use crate::monitor::MonitorDescriptor;

/// Which monitors a recording targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Record every connected monitor.
    All,
    /// Record an explicit set of monitor ids.
    Specific,
    /// Selection derived by applying a named profile.
    Profile,
}

/// The current monitor selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionState {
    pub mode: SelectionMode,
    /// Selected monitor ids, in selection order.
    pub monitor_ids: Vec<String>,
    /// The applied profile, when `mode` is [`SelectionMode::Profile`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
}

impl SelectionState {
    /// Select every monitor in `monitors`.
    pub fn all(monitors: &[MonitorDescriptor]) -> Self {
        Self {
            mode: SelectionMode::All,
            monitor_ids: monitors.iter().map(|m| m.id.clone()).collect(),
            profile_id: None,
        }
    }

    /// Select a specific set of monitor ids.
    pub fn specific(monitor_ids: Vec<String>) -> Self {
        Self {
            mode: SelectionMode::Specific,
            monitor_ids,
            profile_id: None,
        }
    }

    /// Check the mode invariants against the current monitor set.
    ///
    /// - `All` requires `monitor_ids` to equal the full current id set.
    /// - `Specific` requires a non-empty selection where every id
    ///   references an existing descriptor.
    ///
    /// Returns a list of violations; empty means consistent.
    pub fn check_invariants(&self, monitors: &[MonitorDescriptor]) -> Vec<String> {
        let mut violations = Vec::new();

        match self.mode {
            SelectionMode::All => {
                let mut expected: Vec<&str> = monitors.iter().map(|m| m.id.as_str()).collect();
                let mut actual: Vec<&str> = self.monitor_ids.iter().map(String::as_str).collect();
                expected.sort_unstable();
                actual.sort_unstable();
                if expected != actual {
                    violations.push(format!(
                        "mode is All but selection covers {} of {} monitors",
                        self.monitor_ids.len(),
                        monitors.len()
                    ));
                }
            }
            SelectionMode::Specific => {
                if self.monitor_ids.is_empty() {
                    violations.push("mode is Specific but no monitors are selected".to_string());
                }
                for id in &self.monitor_ids {
                    if !monitors.iter().any(|m| &m.id == id) {
                        violations.push(format!("selected monitor \"{id}\" does not exist"));
                    }
                }
            }
            SelectionMode::Profile => {
                if self.profile_id.is_none() {
                    violations.push("mode is Profile but no profile id is set".to_string());
                }
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitors() -> Vec<MonitorDescriptor> {
        vec![
            MonitorDescriptor {
                id: "a".to_string(),
                name: "A".to_string(),
                is_primary: true,
                width: 1920,
                height: 1080,
                x: 0,
                y: 0,
                scale_factor: 1.0,
            },
            MonitorDescriptor {
                id: "b".to_string(),
                name: "B".to_string(),
                is_primary: false,
                width: 2560,
                height: 1440,
                x: 1920,
                y: 0,
                scale_factor: 1.0,
            },
        ]
    }

    #[test]
    fn all_mode_requires_full_coverage() {
        let monitors = monitors();
        let full = SelectionState::all(&monitors);
        assert!(full.check_invariants(&monitors).is_empty());

        let partial = SelectionState {
            mode: SelectionMode::All,
            monitor_ids: vec!["a".to_string()],
            profile_id: None,
        };
        assert_eq!(partial.check_invariants(&monitors).len(), 1);
    }

    #[test]
    fn specific_mode_rejects_empty_and_unknown() {
        let monitors = monitors();
        let empty = SelectionState::specific(vec![]);
        assert_eq!(empty.check_invariants(&monitors).len(), 1);

        let unknown = SelectionState::specific(vec!["ghost".to_string()]);
        assert_eq!(unknown.check_invariants(&monitors).len(), 1);

        let valid = SelectionState::specific(vec!["b".to_string()]);
        assert!(valid.check_invariants(&monitors).is_empty());
    }

    #[test]
    fn mode_serializes_lowercase() {
        let json = serde_json::to_string(&SelectionMode::Specific).unwrap();
        assert_eq!(json, "\"specific\"");
    }
}
