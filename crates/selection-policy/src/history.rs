//! Profile usage history.
//!
//! The application log is owned by the caller (typically persisted next to
//! app settings) and passed into the stats functions explicitly; the
//! policy engine keeps no hidden usage state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use capview_display_model::MonitorDescriptor;

use crate::profiles::Profile;

/// A selection before or after a profile application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionSnapshot {
    pub selected_ids: Vec<String>,
    pub use_all: bool,
}

/// One entry in the append-only application log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileApplication {
    pub profile_id: String,
    /// ISO-8601 timestamp of the application.
    pub applied_at: String,
    pub previous_state: SelectionSnapshot,
    pub new_state: SelectionSnapshot,
    /// Monitor set at application time, kept for auditability.
    pub monitors: Vec<MonitorDescriptor>,
}

/// Build a log entry for applying `profile`.
pub fn record_application(
    profile: &Profile,
    previous_state: SelectionSnapshot,
    new_state: SelectionSnapshot,
    monitors: &[MonitorDescriptor],
) -> ProfileApplication {
    ProfileApplication {
        profile_id: profile.id.clone(),
        applied_at: chrono::Utc::now().to_rfc3339(),
        previous_state,
        new_state,
        monitors: monitors.to_vec(),
    }
}

/// Per-profile usage derived from the application log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUsage {
    pub count: u64,
    /// Timestamp of the latest application in log order.
    pub last_used: String,
}

/// Fold the application log into per-profile usage statistics.
pub fn profile_stats(history: &[ProfileApplication]) -> HashMap<String, ProfileUsage> {
    let mut stats: HashMap<String, ProfileUsage> = HashMap::new();

    for application in history {
        stats
            .entry(application.profile_id.clone())
            .and_modify(|usage| {
                usage.count += 1;
                usage.last_used = application.applied_at.clone();
            })
            .or_insert_with(|| ProfileUsage {
                count: 1,
                last_used: application.applied_at.clone(),
            });
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::builtin_profiles;

    fn snapshot(ids: &[&str], use_all: bool) -> SelectionSnapshot {
        SelectionSnapshot {
            selected_ids: ids.iter().map(|s| s.to_string()).collect(),
            use_all,
        }
    }

    #[test]
    fn record_captures_profile_and_states() {
        let profile = &builtin_profiles()[1];
        let entry = record_application(
            profile,
            snapshot(&["a"], false),
            snapshot(&["a", "b"], true),
            &[],
        );
        assert_eq!(entry.profile_id, "primary-only");
        assert_eq!(entry.new_state.selected_ids, vec!["a", "b"]);
        assert!(entry.new_state.use_all);
    }

    #[test]
    fn stats_count_applications_and_track_latest() {
        let profiles = builtin_profiles();
        let mut history = Vec::new();
        for (i, profile) in [&profiles[0], &profiles[0], &profiles[1]].iter().enumerate() {
            let mut entry = record_application(
                profile,
                snapshot(&[], false),
                snapshot(&["a"], false),
                &[],
            );
            entry.applied_at = format!("2026-08-0{}T00:00:00Z", i + 1);
            history.push(entry);
        }

        let stats = profile_stats(&history);
        assert_eq!(stats["all-monitors"].count, 2);
        assert_eq!(stats["all-monitors"].last_used, "2026-08-02T00:00:00Z");
        assert_eq!(stats["primary-only"].count, 1);
    }

    #[test]
    fn empty_history_yields_empty_stats() {
        assert!(profile_stats(&[]).is_empty());
    }
}
