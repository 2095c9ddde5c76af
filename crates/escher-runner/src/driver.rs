//! Display-refresh driver.
//!
//! Wraps a compositor and its animation state. The host calls
//! [`FrameDriver::on_refresh`] once per display refresh; while paused no
//! tick runs, so resuming continues from exactly the held state.

use escher_core::{CompositorState, RecursiveCompositor, SceneError, Viewport};
use escher_frames::Frame;

/// Whether refreshes currently advance the animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverStatus {
    #[default]
    Running,
    Paused,
}

/// Owns the compositor, its state and the run/pause flag.
#[derive(Debug)]
pub struct FrameDriver {
    compositor: RecursiveCompositor,
    state: CompositorState,
    status: DriverStatus,
    /// Set once the first nested pass has been drawn
    nesting_seen: bool,
}

impl FrameDriver {
    pub fn new(compositor: RecursiveCompositor) -> Self {
        Self {
            compositor,
            state: CompositorState::default(),
            status: DriverStatus::Running,
            nesting_seen: false,
        }
    }

    /// Produces the next frame, or nothing while paused.
    pub fn on_refresh(&mut self) -> Option<Frame> {
        if self.status == DriverStatus::Paused {
            return None;
        }

        let frame = self.compositor.tick(&mut self.state);
        if !self.nesting_seen && frame.levels_rendered > 1 {
            self.nesting_seen = true;
            tracing::debug!(
                tick = frame.tick,
                anchor = self.compositor.anchor_index(),
                "anchor house finished growing, nesting lattice"
            );
        }
        Some(frame)
    }

    /// Flips between running and paused. Returns the new status.
    pub fn toggle_pause(&mut self) -> DriverStatus {
        self.status = match self.status {
            DriverStatus::Running => DriverStatus::Paused,
            DriverStatus::Paused => DriverStatus::Running,
        };
        tracing::info!(tick = self.state.tick, status = ?self.status, "toggled pause");
        self.status
    }

    pub fn is_paused(&self) -> bool {
        self.status == DriverStatus::Paused
    }

    pub fn status(&self) -> DriverStatus {
        self.status
    }

    /// Swaps the viewport; the next frame is centered on the new surface.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), SceneError> {
        let viewport = Viewport::new(width, height)?;
        self.compositor.set_viewport(viewport);
        Ok(())
    }

    pub fn state(&self) -> &CompositorState {
        &self.state
    }

    pub fn compositor(&self) -> &RecursiveCompositor {
        &self.compositor
    }
}
