//! Geometry and animation core for the Escher city.
//!
//! A city of cuboid houses is laid out on a lattice, viewed through a fixed
//! oblique projection, and animated so that each house grows along one axis.
//! Once the anchor house has finished growing, the whole city is drawn again
//! inside it at a smaller scale. Combined with a steadily increasing zoom this
//! produces the look of an endless self-similar zoom.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐   ┌─────────┐   ┌────────────┐   Frame    ┌───────────────┐
//! │ lattice  │──▶│  house  │──▶│ compositor │──────────▶ │ escher-frames │
//! └──────────┘   └─────────┘   └────────────┘            └───────────────┘
//!                     ▲              │
//!                  growth        projector
//! ```
//!
//! # Modules
//!
//! - [`geometry`]: 3D points and vector arithmetic
//! - [`projector`]: Fixed oblique projection onto the viewport
//! - [`growth`]: Per-house growth policies (breathing, grow-once)
//! - [`house`]: Cuboid houses and their three visible faces
//! - [`lattice`]: Square and triangular house arrangements
//! - [`compositor`]: Per-frame recursion and zoom
//! - [`palette`]: Face colors
//! - [`config`]: TOML configuration

pub mod compositor;
pub mod config;
pub mod error;
pub mod geometry;
pub mod growth;
pub mod house;
pub mod lattice;
pub mod palette;
pub mod projector;

// Re-export geometry types
pub use geometry::{centroid, Point3};
pub use projector::{rotate_x, rotate_y, Projector, Viewport};

// Re-export animation types
pub use growth::GrowthPolicy;
pub use house::{GrowthAxis, House, HouseFaces, Quad};
pub use lattice::{build_lattice, GrowthMode, Lattice, LatticeBuilder, Topology};

// Re-export compositor types
pub use compositor::{
    CompositorConfig, CompositorState, OffsetStrategy, RecursionState, RecursiveCompositor,
    UpdateCadence,
};
pub use palette::FacePalette;

// Re-export config types
pub use config::{
    default_config_toml, ConfigError, EscherConfig, LatticeConfig, ProjectionConfig,
    ViewportConfig, DEFAULT_CONFIG_PATH,
};

pub use error::SceneError;
