//! Run preview sessions against the synthetic capture backend.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use capview_display_model::validate_monitors;
use capview_preview_engine::{
    CaptureBackend, FrameCallback, PreviewCoordinator, PreviewOptions, SyntheticBackend,
};

pub async fn run(
    monitors_path: PathBuf,
    monitor_ids: Vec<String>,
    fps: u32,
    duration: u64,
) -> anyhow::Result<()> {
    let monitors = super::load_monitors(&monitors_path)?;

    let validation = validate_monitors(&monitors);
    if !validation.valid {
        for error in &validation.errors {
            println!("  ERROR [{}]: {}", error.code, error.message);
        }
        anyhow::bail!("Monitor set is invalid; fix it before previewing");
    }

    let targets: Vec<String> = if monitor_ids.is_empty() {
        monitors.iter().map(|m| m.id.clone()).collect()
    } else {
        monitor_ids
    };

    let backend = Arc::new(SyntheticBackend::new(monitors));
    let coordinator = PreviewCoordinator::new(
        backend as Arc<dyn CaptureBackend>,
        PreviewOptions {
            fps,
            ..PreviewOptions::default()
        },
    );

    for monitor_id in &targets {
        let callback: FrameCallback = Arc::new(|frame| {
            tracing::info!(
                monitor_id = %frame.monitor_id,
                width = frame.width,
                height = frame.height,
                bytes = frame.image_data.len(),
                "Preview frame"
            );
        });
        coordinator.start(monitor_id, callback);
    }

    println!(
        "Previewing {} monitor(s) at {fps} fps for {duration}s...",
        targets.len()
    );
    tokio::time::sleep(Duration::from_secs(duration)).await;

    coordinator.stop_all();
    println!("Preview stopped.");
    Ok(())
}
