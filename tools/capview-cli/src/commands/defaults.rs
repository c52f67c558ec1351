//! Show smart default selection and performance estimate.

use std::path::PathBuf;

use capview_selection_policy::{
    estimate_performance, laptop_external_defaults, smart_monitor_defaults,
};

pub fn run(monitors_path: PathBuf, laptop_external: bool) -> anyhow::Result<()> {
    let monitors = super::load_monitors(&monitors_path)?;

    let result = if laptop_external {
        laptop_external_defaults(&monitors)
    } else {
        smart_monitor_defaults(&monitors)
    };

    println!("Smart default selection ({:?} confidence):", result.confidence);
    println!("  Selected: {:?} (use_all: {})", result.selected_ids, result.use_all);
    println!("  Rationale: {}", result.rationale);

    if !result.alternatives.is_empty() {
        println!("\nAlternatives:");
        for alternative in &result.alternatives {
            println!(
                "  - {}: {:?} ({})",
                alternative.label, alternative.selected_ids, alternative.description
            );
        }
    }

    let estimate = estimate_performance(&monitors, &result.selected_ids);
    println!("\nPerformance estimate:");
    println!(
        "  {:.1} MP/frame at ~{} fps, {:?} impact",
        estimate.pixels_per_frame as f64 / 1_000_000.0,
        estimate.estimated_fps,
        estimate.impact
    );
    println!("  Storage: {} per hour", estimate.storage_per_hour);
    println!("  {}", estimate.recommendation);

    Ok(())
}
