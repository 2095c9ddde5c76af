//! Frame and draw-command types.
//!
//! A [`Frame`] is the ordered list of filled quads for one display refresh.
//! Command order is the painter order: a consumer must fill them exactly as
//! given, later commands covering earlier ones.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::color::Rgb;

/// A point in screen space (pixels, y growing downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    /// Creates a new screen point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Which visible face of a house a command fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceKind {
    Roof,
    LateralWall,
    FrontWall,
}

impl FaceKind {
    /// Faces in the order they must be filled for correct occlusion.
    pub const DRAW_ORDER: [FaceKind; 3] =
        [FaceKind::Roof, FaceKind::LateralWall, FaceKind::FrontWall];
}

impl fmt::Display for FaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaceKind::Roof => write!(f, "roof"),
            FaceKind::LateralWall => write!(f, "lateral_wall"),
            FaceKind::FrontWall => write!(f, "front_wall"),
        }
    }
}

/// One filled, closed polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    /// Face this polygon belongs to
    pub face: FaceKind,
    /// Fill color
    pub color: Rgb,
    /// Recursion level of the pass that emitted it (root pass is 1)
    pub level: u32,
    /// Index of the house in lattice order
    pub house: usize,
    /// Polygon corners, in winding order
    pub points: [ScreenPoint; 4],
}

impl DrawCommand {
    /// Creates a new draw command.
    pub fn new(
        face: FaceKind,
        color: Rgb,
        level: u32,
        house: usize,
        points: [ScreenPoint; 4],
    ) -> Self {
        Self {
            face,
            color,
            level,
            house,
            points,
        }
    }
}

/// All draw commands for a single tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Tick number that produced this frame (first tick is 1)
    pub tick: u64,
    /// Global zoom factor after this tick's update
    pub zoom_factor: f64,
    /// Deepest recursion level rendered
    pub levels_rendered: u32,
    /// Ordered draw commands
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    /// Creates an empty frame.
    pub fn new(tick: u64, zoom_factor: f64) -> Self {
        Self {
            tick,
            zoom_factor,
            levels_rendered: 0,
            commands: Vec::new(),
        }
    }

    /// Returns the number of draw commands.
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Returns the commands emitted by the given recursion level.
    pub fn commands_at_level(&self, level: u32) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(move |c| c.level == level)
    }

    /// Whether the zoom and every corner are finite.
    ///
    /// JSON has no encoding for infinities or NaN, so only finite frames can
    /// be streamed and read back.
    pub fn is_finite(&self) -> bool {
        self.zoom_factor.is_finite()
            && self
                .commands
                .iter()
                .all(|c| c.points.iter().all(ScreenPoint::is_finite))
    }

    /// Serializes the frame to a single JSON line.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes a frame from a JSON line.
    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}
