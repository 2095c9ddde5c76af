//! Oblique projection from model space to screen space.
//!
//! Points are rotated about the vertical axis (yaw), then about the
//! horizontal axis (pitch), and then dropped onto the screen orthographically.
//! Depth never attenuates size: there is no divide-by-z anywhere in this
//! module, and the view is an affine map.

use escher_frames::ScreenPoint;

use crate::error::{require_positive, SceneError};
use crate::geometry::Point3;

/// Rotates `p` around the vertical (y) axis by `theta` radians.
pub fn rotate_y(p: Point3, theta: f64) -> Point3 {
    let (sin, cos) = (theta.sin(), theta.cos());
    Point3::new(p.z * sin + p.x * cos, p.y, p.z * cos - p.x * sin)
}

/// Rotates `p` around the horizontal (x) axis by `theta` radians.
pub fn rotate_x(p: Point3, theta: f64) -> Point3 {
    let (sin, cos) = (theta.sin(), theta.cos());
    Point3::new(p.x, p.y * cos - p.z * sin, p.y * sin + p.z * cos)
}

/// Pixel dimensions of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f64,
    height: f64,
}

impl Viewport {
    /// Creates a viewport; both dimensions must be positive.
    pub fn new(width: f64, height: f64) -> Result<Self, SceneError> {
        Ok(Self {
            width: require_positive("viewport width", width)?,
            height: require_positive("viewport height", height)?,
        })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    pub fn half_height(&self) -> f64 {
        self.height / 2.0
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Pixels per model unit so the `[-1, 1]` domain spans the viewport height.
    ///
    /// Equal to `half_width / aspect_ratio`, which keeps x and y on the same
    /// scale regardless of the window shape.
    pub fn fit_scale(&self) -> f64 {
        self.half_height()
    }
}

/// Fixed oblique view onto a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    yaw: f64,
    pitch: f64,
    viewport: Viewport,
}

impl Projector {
    /// Creates a projector with angles in radians.
    pub fn new(yaw: f64, pitch: f64, viewport: Viewport) -> Self {
        Self {
            yaw,
            pitch,
            viewport,
        }
    }

    /// Creates a projector with angles in degrees.
    pub fn from_degrees(yaw_degrees: f64, pitch_degrees: f64, viewport: Viewport) -> Self {
        Self::new(yaw_degrees.to_radians(), pitch_degrees.to_radians(), viewport)
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Swaps the drawing surface, keeping the view angles.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Applies the view rotation without mapping to pixels.
    pub fn rotate(&self, p: Point3) -> Point3 {
        rotate_x(rotate_y(p, self.yaw), self.pitch)
    }

    /// Maps a model-space point to screen space.
    ///
    /// `offset` translates the point before rotation and `scale` converts
    /// rotated model units into pixels. Screen y grows downward.
    pub fn project(&self, offset: Point3, scale: f64, p: Point3) -> ScreenPoint {
        let rotated = self.rotate(p + offset);
        ScreenPoint::new(
            self.viewport.half_width() + rotated.x * scale,
            self.viewport.half_height() - rotated.y * scale,
        )
    }

    /// Projects the four corners of a face.
    pub fn project_quad(&self, offset: Point3, scale: f64, quad: &[Point3; 4]) -> [ScreenPoint; 4] {
        quad.map(|p| self.project(offset, scale, p))
    }
}
