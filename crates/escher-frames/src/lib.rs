//! Draw-command types and frame serialization for the Escher city renderer.
//!
//! This crate contains pure data structures with no geometry or animation
//! logic. The core produces [`Frame`]s; anything that can fill closed polygons
//! (a canvas, an SVG file, a test assertion) consumes them.

pub mod color;
pub mod frame;
pub mod output;
pub mod svg;

// Re-export color types
pub use color::{ParseColorError, Rgb};

// Re-export frame types
pub use frame::{DrawCommand, FaceKind, Frame, ScreenPoint};

// Re-export output types
pub use output::{FrameReader, FrameWriter, OutputError, FRAMES_FILE_NAME};

// Re-export svg helpers
pub use svg::{render_svg, write_svg};
