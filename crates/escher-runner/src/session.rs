//! Fixed-length runs that stream frames to an output directory.

use std::path::{Path, PathBuf};

use escher_core::CompositorState;
use escher_frames::{write_svg, FrameWriter};

use crate::driver::FrameDriver;
use crate::RunnerError;

/// Directory (inside the output directory) that holds SVG snapshots.
pub const SNAPSHOT_DIR_NAME: &str = "snapshots";

/// Parameters of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    /// Display refreshes to simulate, paused or not
    pub refreshes: u64,
    pub output_dir: PathBuf,
    /// Write an SVG every N rendered frames; 0 disables snapshots
    pub snapshot_interval: u64,
    /// Refreshes (1-based) at which the pause key is pressed
    pub toggle_at: Vec<u64>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            refreshes: 600,
            output_dir: PathBuf::from("output"),
            snapshot_interval: 60,
            toggle_at: Vec::new(),
        }
    }
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub refreshes: u64,
    /// Frames actually rendered; paused refreshes render nothing
    pub frames_rendered: u64,
    pub snapshots_written: u64,
    /// Tick of the first frame that overflowed, if the run stopped early
    pub overflowed_at: Option<u64>,
    pub final_state: CompositorState,
    pub frames_path: PathBuf,
}

/// Path of the snapshot for a given tick.
pub fn snapshot_path(output_dir: &Path, tick: u64) -> PathBuf {
    output_dir
        .join(SNAPSHOT_DIR_NAME)
        .join(format!("frame_{:06}.svg", tick))
}

/// Drives `driver` for `options.refreshes` refreshes.
///
/// The zoom grows without bound, so a long enough run eventually produces a
/// frame that is no longer finite. The run stops there; every frame already
/// written stays readable.
pub fn run(driver: &mut FrameDriver, options: &RunOptions) -> Result<RunSummary, RunnerError> {
    let mut writer = FrameWriter::new(&options.output_dir)?;
    let mut frames_rendered = 0u64;
    let mut snapshots_written = 0u64;
    let mut overflowed_at = None;

    for refresh in 1..=options.refreshes {
        if options.toggle_at.contains(&refresh) {
            driver.toggle_pause();
        }

        let Some(frame) = driver.on_refresh() else {
            continue;
        };
        if !frame.is_finite() {
            tracing::warn!(
                tick = frame.tick,
                zoom = frame.zoom_factor,
                "zoom overflowed, stopping run"
            );
            overflowed_at = Some(frame.tick);
            break;
        }
        writer.write_frame(&frame)?;
        frames_rendered += 1;

        if options.snapshot_interval > 0 && frames_rendered % options.snapshot_interval == 0 {
            let viewport = driver.compositor().projector().viewport();
            let path = snapshot_path(&options.output_dir, frame.tick);
            write_svg(&path, &frame, viewport.width(), viewport.height(), None)?;
            snapshots_written += 1;
            tracing::debug!(path = %path.display(), "wrote snapshot");
        }

        if frames_rendered % 100 == 0 {
            tracing::info!(
                tick = frame.tick,
                zoom = frame.zoom_factor,
                levels = frame.levels_rendered,
                "progress"
            );
        }
    }

    writer.flush()?;

    Ok(RunSummary {
        refreshes: options.refreshes,
        frames_rendered,
        snapshots_written,
        overflowed_at,
        final_state: *driver.state(),
        frames_path: writer.path().to_path_buf(),
    })
}
