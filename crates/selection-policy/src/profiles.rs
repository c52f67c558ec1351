//! Named, reusable monitor selection profiles.
//!
//! A profile carries a [`ProfileRule`] that derives a selection from the
//! current monitor set. Built-in profiles are process-lifetime constants;
//! custom profiles are created from an explicit selection. Rules are a
//! closed union with exhaustive matching, so adding a rule kind is a
//! compile-time-checked change, never a silent fallthrough.

use serde::{Deserialize, Serialize};

use capview_display_model::{largest_monitor, MonitorDescriptor};

/// Displays at or below this scale factor are treated as external
/// monitors by the `ExternalOnly` rule.
pub const EXTERNAL_SCALE_MAX: f64 = 1.25;

/// Displays strictly above this scale factor are treated as laptop
/// panels by the `LaptopOnly` rule.
pub const LAPTOP_ONLY_SCALE_MIN: f64 = 1.5;

/// How a profile derives its selection from the monitor set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ProfileRule {
    /// Every connected monitor.
    All,
    /// The primary monitor, or the first one when none is flagged.
    Primary,
    /// The single largest monitor by pixel area.
    Largest,
    /// An explicit id set; ids that are no longer connected are dropped.
    Specific { monitor_ids: Vec<String> },
    /// Monitors that look external (scale factor at most 1.25).
    ExternalOnly,
    /// Monitors that look like laptop panels (scale factor above 1.5).
    LaptopOnly,
    /// Monitors meeting both resolution thresholds.
    ByResolution { min_width: u32, min_height: u32 },
}

/// A named selection rule with presentation metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub rule: ProfileRule,
    /// ISO-8601 creation timestamp (custom/imported profiles only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// ISO-8601 timestamp of the most recent application.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used: Option<String>,
    /// How many times the profile has been applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_count: Option<u64>,
}

/// The built-in profiles covering common setups.
pub fn builtin_profiles() -> Vec<Profile> {
    fn builtin(id: &str, name: &str, description: &str, icon: &str, rule: ProfileRule) -> Profile {
        Profile {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            rule,
            created_at: None,
            last_used: None,
            use_count: None,
        }
    }

    vec![
        builtin(
            "all-monitors",
            "All Monitors",
            "Record from all connected displays",
            "🖥️",
            ProfileRule::All,
        ),
        builtin(
            "primary-only",
            "Primary Display",
            "Record only your main working display",
            "⭐",
            ProfileRule::Primary,
        ),
        builtin(
            "largest-monitor",
            "Largest Monitor",
            "Record the monitor with the highest resolution",
            "📺",
            ProfileRule::Largest,
        ),
        builtin(
            "external-only",
            "External Display",
            "Record external monitor only (laptop + external setups)",
            "🖥️",
            ProfileRule::ExternalOnly,
        ),
        builtin(
            "laptop-only",
            "Laptop Screen",
            "Record built-in laptop display only",
            "💻",
            ProfileRule::LaptopOnly,
        ),
        builtin(
            "high-res-only",
            "High Resolution",
            "Record only monitors with 1920x1080 or higher",
            "🎯",
            ProfileRule::ByResolution {
                min_width: 1920,
                min_height: 1080,
            },
        ),
    ]
}

/// Selection produced by applying a profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSelection {
    pub selected_ids: Vec<String>,
    pub use_all: bool,
    pub rationale: String,
}

/// Apply a profile's rule to the current monitor set.
///
/// Total over every rule variant, including empty monitor lists: a rule
/// that matches nothing produces an empty or fallback selection with an
/// explanatory rationale, never an error.
pub fn apply_profile(profile: &Profile, monitors: &[MonitorDescriptor]) -> ProfileSelection {
    match &profile.rule {
        ProfileRule::All => ProfileSelection {
            selected_ids: monitors.iter().map(|m| m.id.clone()).collect(),
            use_all: true,
            rationale: format!(
                "Applied \"{}\" profile - recording all {} monitors",
                profile.name,
                monitors.len()
            ),
        },

        ProfileRule::Primary => match monitors.iter().find(|m| m.is_primary) {
            Some(primary) => ProfileSelection {
                selected_ids: vec![primary.id.clone()],
                use_all: false,
                rationale: format!(
                    "Applied \"{}\" profile - recording {}",
                    profile.name, primary.name
                ),
            },
            None => ProfileSelection {
                selected_ids: monitors.first().map(|m| vec![m.id.clone()]).unwrap_or_default(),
                use_all: false,
                rationale: format!(
                    "Applied \"{}\" profile - no primary monitor found, using first monitor",
                    profile.name
                ),
            },
        },

        ProfileRule::Largest => match largest_monitor(monitors) {
            Some(largest) => ProfileSelection {
                selected_ids: vec![largest.id.clone()],
                use_all: false,
                rationale: format!(
                    "Applied \"{}\" profile - recording {} ({}x{})",
                    profile.name, largest.name, largest.width, largest.height
                ),
            },
            None => ProfileSelection {
                selected_ids: vec![],
                use_all: false,
                rationale: format!("Applied \"{}\" profile - no monitors found", profile.name),
            },
        },

        ProfileRule::Specific { monitor_ids } => {
            let selected: Vec<String> = monitor_ids
                .iter()
                .filter(|id| monitors.iter().any(|m| &m.id == *id))
                .cloned()
                .collect();
            ProfileSelection {
                use_all: false,
                rationale: format!(
                    "Applied \"{}\" profile - recording {} specific monitors",
                    profile.name,
                    monitor_ids.len()
                ),
                selected_ids: selected,
            }
        }

        ProfileRule::ExternalOnly => {
            let external: Vec<&MonitorDescriptor> = monitors
                .iter()
                .filter(|m| m.scale_factor <= EXTERNAL_SCALE_MAX)
                .collect();
            if external.is_empty() {
                ProfileSelection {
                    selected_ids: monitors.iter().map(|m| m.id.clone()).collect(),
                    use_all: false,
                    rationale: format!(
                        "Applied \"{}\" profile - no external monitors detected, using all",
                        profile.name
                    ),
                }
            } else {
                ProfileSelection {
                    use_all: external.len() == monitors.len(),
                    rationale: format!(
                        "Applied \"{}\" profile - recording {} external monitor(s)",
                        profile.name,
                        external.len()
                    ),
                    selected_ids: external.iter().map(|m| m.id.clone()).collect(),
                }
            }
        }

        ProfileRule::LaptopOnly => {
            let laptop: Vec<&MonitorDescriptor> = monitors
                .iter()
                .filter(|m| m.scale_factor > LAPTOP_ONLY_SCALE_MIN)
                .collect();
            if laptop.is_empty() {
                let primary = monitors.iter().find(|m| m.is_primary);
                ProfileSelection {
                    selected_ids: primary.map(|m| vec![m.id.clone()]).unwrap_or_default(),
                    use_all: false,
                    rationale: format!(
                        "Applied \"{}\" profile - no laptop screen detected, using primary",
                        profile.name
                    ),
                }
            } else {
                ProfileSelection {
                    use_all: false,
                    rationale: format!(
                        "Applied \"{}\" profile - recording {} laptop screen(s)",
                        profile.name,
                        laptop.len()
                    ),
                    selected_ids: laptop.iter().map(|m| m.id.clone()).collect(),
                }
            }
        }

        ProfileRule::ByResolution {
            min_width,
            min_height,
        } => {
            let matching: Vec<&MonitorDescriptor> = monitors
                .iter()
                .filter(|m| m.width >= *min_width && m.height >= *min_height)
                .collect();
            if matching.is_empty() {
                ProfileSelection {
                    selected_ids: vec![],
                    use_all: false,
                    rationale: format!(
                        "Applied \"{}\" profile - no monitors meet resolution \
                         requirements ({min_width}x{min_height})",
                        profile.name
                    ),
                }
            } else {
                ProfileSelection {
                    use_all: matching.len() == monitors.len(),
                    rationale: format!(
                        "Applied \"{}\" profile - recording {} monitor(s) with \
                         {min_width}x{min_height}+",
                        profile.name,
                        matching.len()
                    ),
                    selected_ids: matching.iter().map(|m| m.id.clone()).collect(),
                }
            }
        }
    }
}

/// Create a custom profile from an explicit selection.
///
/// The id is derived from the creation timestamp; a process-local counter
/// keeps ids unique when profiles are created within the same millisecond.
pub fn create_custom_profile(
    name: impl Into<String>,
    description: impl Into<String>,
    selected_ids: Vec<String>,
) -> Profile {
    Profile {
        id: format!("custom-{}", crate::transfer::fresh_profile_suffix()),
        name: name.into(),
        description: description.into(),
        icon: "⚙️".to_string(),
        rule: ProfileRule::Specific {
            monitor_ids: selected_ids,
        },
        created_at: Some(chrono::Utc::now().to_rfc3339()),
        last_used: None,
        use_count: Some(0),
    }
}

/// Built-in profiles worth suggesting for the current monitor setup.
pub fn recommended_profiles(monitors: &[MonitorDescriptor]) -> Vec<Profile> {
    let builtins = builtin_profiles();
    let mut recommended = Vec::new();

    // All Monitors and Primary Display are always sensible.
    recommended.push(builtins[0].clone());
    recommended.push(builtins[1].clone());

    if monitors.len() >= 2 {
        recommended.push(builtins[2].clone());
    }

    let has_high_dpi = monitors.iter().any(|m| m.scale_factor > LAPTOP_ONLY_SCALE_MIN);
    let has_low_dpi = monitors.iter().any(|m| m.scale_factor <= EXTERNAL_SCALE_MAX);
    if has_high_dpi && has_low_dpi && monitors.len() == 2 {
        recommended.push(builtins[3].clone());
        recommended.push(builtins[4].clone());
    }

    let has_high_res = monitors.iter().any(|m| m.width >= 1920 && m.height >= 1080);
    if has_high_res && monitors.len() > 1 {
        recommended.push(builtins[5].clone());
    }

    recommended
}

/// Result of checking a profile against the connected monitor set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Compatibility {
    pub compatible: bool,
    pub warnings: Vec<String>,
}

/// Check whether a profile still makes sense for the current monitors.
///
/// A `Specific` profile whose monitors are all disconnected is
/// incompatible; partial matches and unsatisfied scale-factor heuristics
/// remain compatible with a warning.
pub fn profile_compatibility(profile: &Profile, monitors: &[MonitorDescriptor]) -> Compatibility {
    let mut warnings = Vec::new();

    if let ProfileRule::Specific { monitor_ids } = &profile.rule {
        let missing: Vec<&String> = monitor_ids
            .iter()
            .filter(|id| !monitors.iter().any(|m| &m.id == *id))
            .collect();

        if !missing.is_empty() && missing.len() == monitor_ids.len() {
            return Compatibility {
                compatible: false,
                warnings: vec![
                    "None of the monitors from this profile are currently connected".to_string(),
                ],
            };
        }

        if !missing.is_empty() {
            warnings.push(format!(
                "{} monitor(s) from this profile are not currently connected",
                missing.len()
            ));
        }
    }

    if profile.rule == ProfileRule::ExternalOnly
        && !monitors.iter().any(|m| m.scale_factor <= EXTERNAL_SCALE_MAX)
    {
        warnings.push("No external monitors detected".to_string());
    }

    if profile.rule == ProfileRule::LaptopOnly
        && !monitors.iter().any(|m| m.scale_factor > LAPTOP_ONLY_SCALE_MIN)
    {
        warnings.push("No laptop screen detected".to_string());
    }

    Compatibility {
        compatible: true,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor(id: &str, primary: bool, width: u32, height: u32, scale: f64) -> MonitorDescriptor {
        MonitorDescriptor {
            id: id.to_string(),
            name: format!("Monitor {id}"),
            is_primary: primary,
            width,
            height,
            x: 0,
            y: 0,
            scale_factor: scale,
        }
    }

    fn profile_with_rule(rule: ProfileRule) -> Profile {
        Profile {
            id: "test".to_string(),
            name: "Test".to_string(),
            description: String::new(),
            icon: String::new(),
            rule,
            created_at: None,
            last_used: None,
            use_count: None,
        }
    }

    #[test]
    fn largest_rule_picks_highest_pixel_count() {
        let monitors = vec![
            monitor("A", true, 1920, 1080, 1.0),
            monitor("B", false, 2560, 1440, 1.0),
        ];
        let selection = apply_profile(&profile_with_rule(ProfileRule::Largest), &monitors);
        assert_eq!(selection.selected_ids, vec!["B"]);
        assert!(!selection.use_all);
    }

    #[test]
    fn primary_rule_falls_back_to_first() {
        let monitors = vec![
            monitor("a", false, 1920, 1080, 1.0),
            monitor("b", false, 1920, 1080, 1.0),
        ];
        let selection = apply_profile(&profile_with_rule(ProfileRule::Primary), &monitors);
        assert_eq!(selection.selected_ids, vec!["a"]);
    }

    #[test]
    fn specific_rule_drops_missing_ids_silently() {
        let monitors = vec![monitor("a", true, 1920, 1080, 1.0)];
        let rule = ProfileRule::Specific {
            monitor_ids: vec!["a".to_string(), "gone".to_string()],
        };
        let selection = apply_profile(&profile_with_rule(rule), &monitors);
        assert_eq!(selection.selected_ids, vec!["a"]);
        assert!(!selection.use_all);
    }

    #[test]
    fn external_only_falls_back_to_all() {
        let monitors = vec![
            monitor("laptop", true, 2880, 1800, 2.0),
            monitor("tablet", false, 2560, 1600, 2.0),
        ];
        let selection = apply_profile(&profile_with_rule(ProfileRule::ExternalOnly), &monitors);
        assert_eq!(selection.selected_ids.len(), 2);
        assert!(!selection.use_all);
        assert!(selection.rationale.contains("using all"));
    }

    #[test]
    fn laptop_only_falls_back_to_primary() {
        let monitors = vec![
            monitor("a", true, 2560, 1440, 1.0),
            monitor("b", false, 1920, 1080, 1.0),
        ];
        let selection = apply_profile(&profile_with_rule(ProfileRule::LaptopOnly), &monitors);
        assert_eq!(selection.selected_ids, vec!["a"]);
    }

    #[test]
    fn by_resolution_may_select_nothing() {
        let monitors = vec![monitor("small", true, 1280, 720, 1.0)];
        let rule = ProfileRule::ByResolution {
            min_width: 1920,
            min_height: 1080,
        };
        let selection = apply_profile(&profile_with_rule(rule), &monitors);
        assert!(selection.selected_ids.is_empty());
        assert!(!selection.use_all);
    }

    #[test]
    fn every_rule_is_total_over_empty_monitor_lists() {
        let rules = vec![
            ProfileRule::All,
            ProfileRule::Primary,
            ProfileRule::Largest,
            ProfileRule::Specific {
                monitor_ids: vec!["x".to_string()],
            },
            ProfileRule::ExternalOnly,
            ProfileRule::LaptopOnly,
            ProfileRule::ByResolution {
                min_width: 1920,
                min_height: 1080,
            },
        ];
        for rule in rules {
            let selection = apply_profile(&profile_with_rule(rule), &[]);
            assert!(selection.selected_ids.is_empty());
        }
    }

    #[test]
    fn recommendations_follow_the_setup() {
        let single = vec![monitor("a", true, 1920, 1080, 1.0)];
        let recommended = recommended_profiles(&single);
        assert_eq!(recommended.len(), 2); // all + primary only

        let laptop_pair = vec![
            monitor("laptop", true, 2880, 1800, 2.0),
            monitor("external", false, 2560, 1440, 1.0),
        ];
        let recommended = recommended_profiles(&laptop_pair);
        let ids: Vec<&str> = recommended.iter().map(|p| p.id.as_str()).collect();
        assert!(ids.contains(&"largest-monitor"));
        assert!(ids.contains(&"external-only"));
        assert!(ids.contains(&"laptop-only"));
        assert!(ids.contains(&"high-res-only"));
    }

    #[test]
    fn fully_disconnected_specific_profile_is_incompatible() {
        let monitors = vec![monitor("a", true, 1920, 1080, 1.0)];
        let rule = ProfileRule::Specific {
            monitor_ids: vec!["x".to_string(), "y".to_string()],
        };
        let compat = profile_compatibility(&profile_with_rule(rule), &monitors);
        assert!(!compat.compatible);
        assert_eq!(compat.warnings.len(), 1);
    }

    #[test]
    fn partially_connected_specific_profile_warns_with_count() {
        let monitors = vec![monitor("a", true, 1920, 1080, 1.0)];
        let rule = ProfileRule::Specific {
            monitor_ids: vec!["a".to_string(), "gone".to_string()],
        };
        let compat = profile_compatibility(&profile_with_rule(rule), &monitors);
        assert!(compat.compatible);
        assert!(compat.warnings[0].contains("1 monitor(s)"));
    }

    #[test]
    fn scale_heuristic_profiles_warn_but_stay_compatible() {
        let all_external = vec![monitor("a", true, 2560, 1440, 1.0)];
        let compat =
            profile_compatibility(&profile_with_rule(ProfileRule::LaptopOnly), &all_external);
        assert!(compat.compatible);
        assert_eq!(compat.warnings, vec!["No laptop screen detected"]);
    }

    #[test]
    fn rule_serialization_is_kebab_tagged() {
        let json = serde_json::to_string(&ProfileRule::ExternalOnly).unwrap();
        assert_eq!(json, "{\"type\":\"external-only\"}");

        let rule: ProfileRule =
            serde_json::from_str("{\"type\":\"by-resolution\",\"min_width\":1920,\"min_height\":1080}")
                .unwrap();
        assert_eq!(
            rule,
            ProfileRule::ByResolution {
                min_width: 1920,
                min_height: 1080
            }
        );
    }
}
