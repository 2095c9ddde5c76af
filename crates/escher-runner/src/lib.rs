//! Frame driver and command-line runner for the Escher city.
//!
//! The binary `escher_city` loads a [`escher_core::EscherConfig`], drives the
//! compositor for a fixed number of display refreshes and streams the frames
//! to disk. The driver owns the run/pause flag; the core never sees it.

pub mod driver;
pub mod session;

pub use driver::{DriverStatus, FrameDriver};
pub use session::{run, snapshot_path, RunOptions, RunSummary, SNAPSHOT_DIR_NAME};

use thiserror::Error;

/// Errors that can stop a run.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Config file could not be read or parsed
    #[error("config error: {0}")]
    Config(#[from] escher_core::ConfigError),
    /// Invalid scene setup
    #[error("scene error: {0}")]
    Scene(#[from] escher_core::SceneError),
    /// Frame or snapshot output failed
    #[error("output error: {0}")]
    Output(#[from] escher_frames::OutputError),
}
