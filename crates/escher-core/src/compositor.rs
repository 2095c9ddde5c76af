//! Recursive self-similar compositor.
//!
//! Every tick the compositor advances the global zoom, lets each house grow,
//! and emits the faces of the whole lattice back to front. Once the anchor
//! house has finished growing, the lattice is drawn again, nested inside the
//! anchor at a smaller scale, until the recursion budget runs out. Swapping
//! deeper levels in as the zoom grows is what fakes the infinite zoom.
//!
//! Recursion is decided fresh on every frame. The only state carried from one
//! frame to the next is the growth of each house and the caller-owned
//! [`CompositorState`].

use escher_frames::{DrawCommand, Frame};
use serde::{Deserialize, Serialize};

use crate::error::SceneError;
use crate::geometry::Point3;
use crate::house::House;
use crate::lattice::Lattice;
use crate::palette::FacePalette;
use crate::projector::{Projector, Viewport};

/// Where a nested pass places its lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OffsetStrategy {
    /// Keep the outer pass's offset
    #[default]
    ReuseOuter,
    /// Move the nested lattice's origin onto the anchor house's grown face
    AnchorRelative,
}

/// When houses advance their growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UpdateCadence {
    /// Once per tick, before any pass is drawn
    #[default]
    PerTick,
    /// At the start of every pass, so nested passes grow the city again
    PerPass,
}

/// Compositor tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositorConfig {
    /// Deepest pass level; the root pass is level 1
    pub max_recursion_level: u32,
    /// House to nest into; defaults to the lattice center
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_index: Option<usize>,
    /// Empirical constant `k` in the nested scale
    /// `scale * house_size / (level * k)`.
    ///
    /// It has no derivation beyond looking right; treat it as approximate.
    pub recursion_scale_constant: f64,
    /// Multiplier applied to the zoom factor every frame
    pub zoom_rate: f64,
    /// Frame units advanced per tick
    pub frame_dt: f64,
    pub offset_strategy: OffsetStrategy,
    pub update_cadence: UpdateCadence,
    /// Model-space offset of the root pass
    pub root_offset: Point3,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            max_recursion_level: 2,
            anchor_index: None,
            recursion_scale_constant: 2.325,
            zoom_rate: 1.005,
            frame_dt: 1.0,
            offset_strategy: OffsetStrategy::ReuseOuter,
            update_cadence: UpdateCadence::PerTick,
            root_offset: Point3::ZERO,
        }
    }
}

/// Caller-owned animation state, threaded through every tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositorState {
    /// Ticks processed so far
    pub tick: u64,
    /// Global zoom; grows without bound
    pub zoom_factor: f64,
}

impl Default for CompositorState {
    fn default() -> Self {
        Self {
            tick: 0,
            zoom_factor: 1.0,
        }
    }
}

/// Parameters of a single rendering pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecursionState {
    pub offset: Point3,
    pub scale: f64,
    pub level: u32,
}

/// Owns the lattice and turns it into frames.
#[derive(Debug, Clone)]
pub struct RecursiveCompositor {
    lattice: Lattice,
    projector: Projector,
    palette: FacePalette,
    config: CompositorConfig,
    anchor_index: usize,
}

impl RecursiveCompositor {
    /// Validates the configuration against the lattice.
    ///
    /// Every misconfiguration is reported here rather than on the first frame.
    pub fn new(
        lattice: Lattice,
        projector: Projector,
        palette: FacePalette,
        config: CompositorConfig,
    ) -> Result<Self, SceneError> {
        for (name, value) in [
            ("zoom_rate", config.zoom_rate),
            ("recursion_scale_constant", config.recursion_scale_constant),
            ("frame_dt", config.frame_dt),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SceneError::config(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )));
            }
        }

        // Level 1 is the root pass, so nesting needs a budget of at least 2
        if config.max_recursion_level < 2 && lattice.topology().requires_recursion() {
            return Err(SceneError::config(format!(
                "{:?} lattice needs max_recursion_level >= 2",
                lattice.topology()
            )));
        }

        let anchor_index = config
            .anchor_index
            .unwrap_or_else(|| lattice.center_index());
        if anchor_index >= lattice.len() {
            return Err(SceneError::config(format!(
                "anchor index {} out of range for lattice of {} houses",
                anchor_index,
                lattice.len()
            )));
        }

        tracing::debug!(
            anchor_index,
            max_recursion_level = config.max_recursion_level,
            strategy = ?config.offset_strategy,
            "compositor ready"
        );

        Ok(Self {
            lattice,
            projector,
            palette,
            config,
            anchor_index,
        })
    }

    /// Advances one frame and returns its draw commands.
    pub fn tick(&mut self, state: &mut CompositorState) -> Frame {
        let dt = self.config.frame_dt;
        state.tick += 1;
        state.zoom_factor *= self.config.zoom_rate.powf(dt);

        if self.config.update_cadence == UpdateCadence::PerTick {
            self.lattice.update_all(dt);
        }

        let root = self.root_pass(state);
        let mut frame = Frame::new(state.tick, state.zoom_factor);
        frame.commands.reserve(self.lattice.len() * 3);
        frame.levels_rendered = self.render(root, &mut frame.commands);
        frame
    }

    /// The outermost pass for the current zoom.
    pub fn root_pass(&self, state: &CompositorState) -> RecursionState {
        RecursionState {
            offset: self.config.root_offset,
            scale: self.projector.viewport().fit_scale() * state.zoom_factor,
            level: 1,
        }
    }

    /// Emits one pass, then recurses into the anchor while allowed.
    ///
    /// Returns the deepest level drawn. Passes only ever come from
    /// [`Self::root_pass`] and [`Self::descend`], so `pass.level >= 1`.
    fn render(&mut self, pass: RecursionState, commands: &mut Vec<DrawCommand>) -> u32 {
        if self.config.update_cadence == UpdateCadence::PerPass {
            self.lattice.update_all(self.config.frame_dt);
        }

        for (index, house) in self.lattice.iter().enumerate() {
            for (face, quad) in house.faces_in_draw_order() {
                let points = self.projector.project_quad(pass.offset, pass.scale, quad);
                commands.push(DrawCommand::new(
                    face,
                    self.palette.color_for(face),
                    pass.level,
                    index,
                    points,
                ));
            }
        }

        if pass.level < self.config.max_recursion_level && self.anchor().is_done() {
            let nested = self.descend(pass);
            tracing::trace!(level = nested.level, scale = nested.scale, "nesting lattice");
            return self.render(nested, commands);
        }

        pass.level
    }

    /// Pass parameters for the lattice nested one level below `pass`.
    fn descend(&self, pass: RecursionState) -> RecursionState {
        debug_assert!(pass.level >= 1, "recursion levels start at 1");
        let factor = self.lattice.house_size()
            / (pass.level as f64 * self.config.recursion_scale_constant);
        let scale = pass.scale * factor;

        let offset = match self.config.offset_strategy {
            OffsetStrategy::ReuseOuter => pass.offset,
            OffsetStrategy::AnchorRelative => {
                (self.anchor().anchor_point() + pass.offset) * (pass.scale / scale)
            }
        };

        RecursionState {
            offset,
            scale,
            level: pass.level + 1,
        }
    }

    /// Replaces the drawing surface, e.g. after a window resize.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.projector.set_viewport(viewport);
    }

    pub fn anchor(&self) -> &House {
        &self.lattice.houses()[self.anchor_index]
    }

    pub fn anchor_index(&self) -> usize {
        self.anchor_index
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    pub fn palette(&self) -> &FacePalette {
        &self.palette
    }

    pub fn config(&self) -> &CompositorConfig {
        &self.config
    }
}
