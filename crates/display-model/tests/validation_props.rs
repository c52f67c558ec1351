//! Property tests for the validation engine.

use capview_display_model::{
    auto_fix_configuration, validate_monitors, validate_selection, MonitorDescriptor,
};
use proptest::prelude::*;

fn arb_monitor(id: String) -> impl Strategy<Value = MonitorDescriptor> {
    (
        640u32..4000,
        480u32..3000,
        -4000i32..4000,
        -4000i32..4000,
        prop::bool::ANY,
        prop::sample::select(vec![1.0f64, 1.25, 1.5, 2.0]),
    )
        .prop_map(
            move |(width, height, x, y, is_primary, scale_factor)| MonitorDescriptor {
                id: id.clone(),
                name: format!("Display {id}"),
                is_primary,
                width,
                height,
                x,
                y,
                scale_factor,
            },
        )
}

fn arb_monitor_set(max: usize) -> impl Strategy<Value = Vec<MonitorDescriptor>> {
    (1..=max).prop_flat_map(|count| {
        (0..count)
            .map(|i| arb_monitor(format!("m{i}")))
            .collect::<Vec<_>>()
    })
}

proptest! {
    #[test]
    fn duplicate_id_always_invalidates(mut monitors in arb_monitor_set(4)) {
        // Force a duplicate by cloning the first descriptor's id onto a copy.
        let mut dup = monitors[0].clone();
        dup.x += 10_000; // avoid influencing the overlap warning path
        monitors.push(dup);

        let result = validate_monitors(&monitors);
        prop_assert!(!result.valid);
        prop_assert!(result.errors.iter().any(|f| f.code == "DUPLICATE_IDS"));
    }

    #[test]
    fn auto_fix_is_idempotent(
        monitors in arb_monitor_set(4),
        extra_ids in prop::collection::vec("[a-z]{1,6}", 0..3),
        use_all in prop::bool::ANY,
    ) {
        let mut selected: Vec<String> = monitors.iter().map(|m| m.id.clone()).collect();
        selected.truncate(selected.len() / 2);
        selected.extend(extra_ids);

        let first = auto_fix_configuration(&monitors, &selected, use_all);
        let second = auto_fix_configuration(&first.monitors, &first.selected_ids, first.use_all);
        prop_assert!(!second.fixed, "second pass changed: {:?}", second.changes);
    }

    #[test]
    fn fixed_configuration_has_no_selection_errors(monitors in arb_monitor_set(4)) {
        // Keep at most one primary so the monitor set itself is valid.
        let mut monitors = monitors;
        let mut seen_primary = false;
        for m in &mut monitors {
            if m.is_primary && seen_primary {
                m.is_primary = false;
            }
            seen_primary |= m.is_primary;
        }

        let outcome = auto_fix_configuration(&monitors, &[], false);
        let result = validate_selection(&outcome.monitors, &outcome.selected_ids, outcome.use_all);
        prop_assert!(result.valid, "errors: {:?}", result.errors);
    }
}
