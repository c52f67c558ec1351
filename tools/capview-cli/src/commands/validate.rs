//! Validate a monitor set or selection.

use std::path::PathBuf;

use capview_display_model::{
    auto_fix_configuration, validate_monitors, validate_selection, ValidationResult,
};

pub fn run(
    monitors_path: PathBuf,
    select: Vec<String>,
    use_all: bool,
    fix: bool,
) -> anyhow::Result<()> {
    let monitors = super::load_monitors(&monitors_path)?;
    println!(
        "Validating {} monitor(s) from {}",
        monitors.len(),
        monitors_path.display()
    );

    let result = if select.is_empty() && !use_all {
        validate_monitors(&monitors)
    } else {
        validate_selection(&monitors, &select, use_all)
    };
    print_result(&result);

    if fix {
        let outcome = auto_fix_configuration(&monitors, &select, use_all);
        if outcome.fixed {
            println!("\nAuto-fix applied {} change(s):", outcome.changes.len());
            for change in &outcome.changes {
                println!("  - {change}");
            }
            println!(
                "Resulting selection: {:?} (use_all: {})",
                outcome.selected_ids, outcome.use_all
            );
        } else {
            println!("\nAuto-fix found nothing to change.");
        }
    }

    Ok(())
}

fn print_result(result: &ValidationResult) {
    for error in &result.errors {
        match &error.monitor_id {
            Some(id) => println!("  ERROR [{}] ({id}): {}", error.code, error.message),
            None => println!("  ERROR [{}]: {}", error.code, error.message),
        }
    }
    for warning in &result.warnings {
        match &warning.monitor_id {
            Some(id) => println!("  WARN  [{}] ({id}): {}", warning.code, warning.message),
            None => println!("  WARN  [{}]: {}", warning.code, warning.message),
        }
    }
    println!("\n{}", result.summary());
}
