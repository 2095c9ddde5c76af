//! Face colors threaded into draw commands.

use escher_frames::{FaceKind, Rgb};
use serde::{Deserialize, Serialize};

/// Fill color per visible face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacePalette {
    /// Warm red-orange
    pub roof: Rgb,
    /// Light beige
    pub front_wall: Rgb,
    /// Near-black
    pub lateral_wall: Rgb,
}

impl Default for FacePalette {
    fn default() -> Self {
        Self {
            roof: Rgb::new(0xd6, 0x52, 0x26),
            front_wall: Rgb::new(0xff, 0xe0, 0xb3),
            lateral_wall: Rgb::new(0x1c, 0x1a, 0x19),
        }
    }
}

impl FacePalette {
    pub fn color_for(&self, face: FaceKind) -> Rgb {
        match face {
            FaceKind::Roof => self.roof,
            FaceKind::FrontWall => self.front_wall,
            FaceKind::LateralWall => self.lateral_wall,
        }
    }
}
