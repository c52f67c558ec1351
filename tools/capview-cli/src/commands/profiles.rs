//! List, apply, export, and import selection profiles.

use std::path::PathBuf;

use clap::Subcommand;

use capview_selection_policy::{
    apply_profile, builtin_profiles, export_profiles, import_profiles, profile_compatibility,
    recommended_profiles,
};

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// List built-in profiles, marking the ones recommended for this setup
    List {
        /// Path to the monitor descriptor JSON file
        monitors: PathBuf,
    },

    /// Apply a profile and print the resulting selection
    Apply {
        /// Path to the monitor descriptor JSON file
        monitors: PathBuf,

        /// Profile id (e.g. "primary-only")
        profile_id: String,
    },

    /// Export the built-in profiles as a shareable JSON envelope
    Export {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import profiles from a JSON envelope
    Import {
        /// Path to the envelope file
        path: PathBuf,
    },
}

pub fn run(command: ProfileCommands) -> anyhow::Result<()> {
    match command {
        ProfileCommands::List { monitors } => {
            let monitors = super::load_monitors(&monitors)?;
            let recommended: Vec<String> = recommended_profiles(&monitors)
                .into_iter()
                .map(|p| p.id)
                .collect();

            for profile in builtin_profiles() {
                let marker = if recommended.contains(&profile.id) {
                    "*"
                } else {
                    " "
                };
                println!(
                    "{marker} {} {:<16} {}",
                    profile.icon, profile.id, profile.description
                );
            }
            println!("\n* recommended for the current monitor setup");
            Ok(())
        }

        ProfileCommands::Apply {
            monitors,
            profile_id,
        } => {
            let monitors = super::load_monitors(&monitors)?;
            let profile = builtin_profiles()
                .into_iter()
                .find(|p| p.id == profile_id)
                .ok_or_else(|| anyhow::anyhow!("Unknown profile: {profile_id}"))?;

            let compatibility = profile_compatibility(&profile, &monitors);
            for warning in &compatibility.warnings {
                println!("  WARN: {warning}");
            }
            if !compatibility.compatible {
                anyhow::bail!("Profile \"{}\" is not compatible with this setup", profile.name);
            }

            let selection = apply_profile(&profile, &monitors);
            println!("{}", selection.rationale);
            println!(
                "Selected: {:?} (use_all: {})",
                selection.selected_ids, selection.use_all
            );
            Ok(())
        }

        ProfileCommands::Export { output } => {
            let json = export_profiles(&builtin_profiles())?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("Exported profiles to {}", path.display());
                }
                None => println!("{json}"),
            }
            Ok(())
        }

        ProfileCommands::Import { path } => {
            let content = std::fs::read_to_string(&path)?;
            let outcome = import_profiles(&content);
            if !outcome.success {
                anyhow::bail!(
                    "Import failed: {}",
                    outcome.error.unwrap_or_else(|| "unknown error".to_string())
                );
            }
            println!("Imported {} profile(s):", outcome.profiles.len());
            for profile in &outcome.profiles {
                println!("  {} ({})", profile.name, profile.id);
            }
            Ok(())
        }
    }
}
