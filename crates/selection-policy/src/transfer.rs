//! Profile import and export.
//!
//! Profiles are shared as a versioned JSON envelope. Exports strip usage
//! metadata; imports are treated as untrusted and re-derive every id,
//! creation timestamp, and usage counter rather than trusting the payload.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use capview_common::CapviewResult;

use crate::profiles::{Profile, ProfileRule};

/// Schema version written to export envelopes.
pub const EXPORT_FORMAT_VERSION: &str = "1.0";

/// Envelope written by [`export_profiles`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportEnvelope {
    pub version: String,
    /// ISO-8601 export timestamp.
    pub exported_at: String,
    pub profiles: Vec<Profile>,
}

/// Serialize profiles for sharing.
///
/// Usage statistics (`use_count`, `last_used`) are stripped for privacy.
pub fn export_profiles(profiles: &[Profile]) -> CapviewResult<String> {
    let envelope = ExportEnvelope {
        version: EXPORT_FORMAT_VERSION.to_string(),
        exported_at: chrono::Utc::now().to_rfc3339(),
        profiles: profiles
            .iter()
            .map(|p| Profile {
                use_count: None,
                last_used: None,
                ..p.clone()
            })
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// Outcome of importing a profile envelope.
///
/// Import failures are reported here as a structured result; they never
/// propagate as a panic or error past the import boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub profiles: Vec<Profile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ImportOutcome {
    fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            profiles: vec![],
            error: Some(error.into()),
        }
    }
}

/// Parse a profile envelope produced by [`export_profiles`].
///
/// Rejects payloads missing `version` or `profiles` with an
/// `Invalid profile format` error. Every imported profile gets a fresh
/// id and creation timestamp, and its usage count is zeroed - imported
/// usage statistics are never trusted.
pub fn import_profiles(json: &str) -> ImportOutcome {
    let data: Value = match serde_json::from_str(json) {
        Ok(data) => data,
        Err(e) => return ImportOutcome::failure(e.to_string()),
    };

    if data.get("version").is_none() || data.get("profiles").is_none() {
        return ImportOutcome::failure("Invalid profile format");
    }

    let Some(raw_profiles) = data["profiles"].as_array() else {
        return ImportOutcome::failure("Invalid profile format");
    };

    let now = chrono::Utc::now().to_rfc3339();
    let mut profiles = Vec::with_capacity(raw_profiles.len());
    for raw in raw_profiles {
        let rule: ProfileRule = match serde_json::from_value(raw["rule"].clone()) {
            Ok(rule) => rule,
            Err(e) => return ImportOutcome::failure(format!("Invalid profile rule: {e}")),
        };

        profiles.push(Profile {
            id: format!("imported-{}", fresh_profile_suffix()),
            name: raw["name"].as_str().unwrap_or("Unnamed Profile").to_string(),
            description: raw["description"].as_str().unwrap_or_default().to_string(),
            icon: raw["icon"].as_str().unwrap_or("⚙️").to_string(),
            rule,
            created_at: Some(now.clone()),
            last_used: None,
            use_count: Some(0),
        });
    }

    tracing::info!(count = profiles.len(), "Imported profiles");

    ImportOutcome {
        success: true,
        profiles,
        error: None,
    }
}

/// Timestamp-derived id suffix for created/imported profiles.
///
/// A process-local counter disambiguates profiles minted within the same
/// millisecond.
pub(crate) fn fresh_profile_suffix() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let sequence = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", chrono::Utc::now().timestamp_millis(), sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::builtin_profiles;

    #[test]
    fn export_strips_usage_metadata() {
        let mut profile = builtin_profiles().remove(0);
        profile.use_count = Some(42);
        profile.last_used = Some("2026-01-01T00:00:00Z".to_string());

        let json = export_profiles(&[profile]).unwrap();
        let envelope: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(envelope["version"], EXPORT_FORMAT_VERSION);
        assert!(envelope["exported_at"].is_string());
        assert!(envelope["profiles"][0].get("use_count").is_none());
        assert!(envelope["profiles"][0].get("last_used").is_none());
    }

    #[test]
    fn round_trip_preserves_identity_fields_and_resets_usage() {
        let mut originals = builtin_profiles();
        for profile in &mut originals {
            profile.use_count = Some(7);
        }

        let json = export_profiles(&originals).unwrap();
        let outcome = import_profiles(&json);
        assert!(outcome.success, "{:?}", outcome.error);
        assert_eq!(outcome.profiles.len(), originals.len());

        for (imported, original) in outcome.profiles.iter().zip(&originals) {
            assert_eq!(imported.name, original.name);
            assert_eq!(imported.description, original.description);
            assert_eq!(imported.rule, original.rule);
            assert_eq!(imported.use_count, Some(0));
            assert!(imported.last_used.is_none());
            assert!(imported.created_at.is_some());
        }
    }

    #[test]
    fn imported_ids_are_fresh_and_unique() {
        let json = export_profiles(&builtin_profiles()).unwrap();
        let outcome = import_profiles(&json);
        let mut ids: Vec<&str> = outcome.profiles.iter().map(|p| p.id.as_str()).collect();
        assert!(ids.iter().all(|id| id.starts_with("imported-")));
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), outcome.profiles.len());
    }

    #[test]
    fn missing_version_or_profiles_is_rejected() {
        let outcome = import_profiles(r#"{"profiles": []}"#);
        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("Invalid profile format"));

        let outcome = import_profiles(r#"{"version": "1.0"}"#);
        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("Invalid profile format"));
    }

    #[test]
    fn malformed_json_becomes_a_structured_failure() {
        let outcome = import_profiles("not json at all");
        assert!(!outcome.success);
        assert!(outcome.error.is_some());
        assert!(outcome.profiles.is_empty());
    }
}
