pub mod defaults;
pub mod preview;
pub mod profiles;
pub mod validate;

use std::path::Path;

use anyhow::Context;
use capview_display_model::MonitorDescriptor;

/// Load monitor descriptors from a JSON file.
///
/// The descriptors are untrusted input; callers validate before use.
pub fn load_monitors(path: &Path) -> anyhow::Result<Vec<MonitorDescriptor>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read monitor file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse monitor descriptors in {}", path.display()))
}
