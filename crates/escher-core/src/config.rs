//! Configuration loading.
//!
//! All scene settings are loaded from a TOML file. Every section is optional
//! and falls back to its defaults.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::compositor::{CompositorConfig, RecursiveCompositor};
use crate::error::SceneError;
use crate::lattice::{GrowthMode, Lattice, LatticeBuilder, Topology};
use crate::palette::FacePalette;
use crate::projector::{Projector, Viewport};

/// Default config file path
pub const DEFAULT_CONFIG_PATH: &str = "escher.toml";

/// Complete scene configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EscherConfig {
    /// Drawing surface size
    #[serde(default)]
    pub viewport: ViewportConfig,
    /// View angles
    #[serde(default)]
    pub projection: ProjectionConfig,
    /// Lattice shape
    #[serde(default)]
    pub lattice: LatticeConfig,
    /// Growth mode; the topology's own default when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth: Option<GrowthMode>,
    /// Recursion and zoom
    #[serde(default)]
    pub compositor: CompositorConfig,
    /// Face colors
    #[serde(default)]
    pub palette: FacePalette,
}

impl EscherConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads from [`DEFAULT_CONFIG_PATH`], or uses defaults if it can't be read.
    pub fn load_or_default() -> Self {
        Self::from_file(Path::new(DEFAULT_CONFIG_PATH)).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", DEFAULT_CONFIG_PATH, e);
            Self::default()
        })
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn viewport(&self) -> Result<Viewport, SceneError> {
        Viewport::new(self.viewport.width, self.viewport.height)
    }

    pub fn projector(&self) -> Result<Projector, SceneError> {
        Ok(Projector::from_degrees(
            self.projection.yaw_degrees,
            self.projection.pitch_degrees,
            self.viewport()?,
        ))
    }

    /// Configured house size, or the one that fills the domain.
    pub fn house_size(&self) -> f64 {
        self.lattice.house_size.unwrap_or_else(|| {
            self.lattice
                .topology
                .natural_house_size(self.lattice.side, self.lattice.domain_scale)
        })
    }

    pub fn growth_mode(&self) -> GrowthMode {
        self.growth
            .clone()
            .unwrap_or_else(|| GrowthMode::default_for(self.lattice.topology))
    }

    pub fn build_lattice<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Lattice, SceneError> {
        LatticeBuilder::new(self.lattice.topology, self.lattice.side, self.house_size())
            .with_growth(self.growth_mode())
            .build(rng)
    }

    /// Builds a ready-to-tick compositor.
    pub fn build_compositor<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<RecursiveCompositor, SceneError> {
        let lattice = self.build_lattice(rng)?;
        RecursiveCompositor::new(
            lattice,
            self.projector()?,
            self.palette,
            self.compositor.clone(),
        )
    }
}

/// Drawing surface configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// View angle configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Rotation about the vertical axis
    pub yaw_degrees: f64,
    /// Rotation about the horizontal axis, applied after yaw
    pub pitch_degrees: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            yaw_degrees: 45.0,
            pitch_degrees: 35.0,
        }
    }
}

/// Lattice configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeConfig {
    pub topology: Topology,
    /// Houses along one side (rows for the triangular topology)
    pub side: usize,
    /// Explicit house edge length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_size: Option<f64>,
    /// Half-width of the domain the lattice fills when `house_size` is unset
    pub domain_scale: f64,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            topology: Topology::Triangular,
            side: 5,
            house_size: None,
            domain_scale: 0.8,
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Error parsing TOML config
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Error writing TOML config
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r##"# Escher city configuration

[viewport]
width = 1280.0
height = 720.0

[projection]
yaw_degrees = 45.0
pitch_degrees = 35.0

[lattice]
topology = "triangular"
side = 5
# house_size = 0.32
domain_scale = 0.8

# Omit [growth] to use the topology's own mode:
# square breathes, triangular grows once.
#
# [growth]
# mode = "breathing"
# amplitude = 0.25
# min_speed = 0.01
# max_speed = 0.05
#
# [growth]
# mode = "grow_once"
# step_divisor = 64.0

[compositor]
max_recursion_level = 2
# anchor_index = 10
recursion_scale_constant = 2.325
zoom_rate = 1.005
frame_dt = 1.0
offset_strategy = "reuse_outer"
update_cadence = "per_tick"
root_offset = [0.0, 0.0, 0.0]

[palette]
roof = "#d65226"
front_wall = "#ffe0b3"
lateral_wall = "#1c1a19"
"##
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::{CompositorState, OffsetStrategy, UpdateCadence};
    use escher_frames::Rgb;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = EscherConfig::default();

        assert_eq!(config.viewport.width, 1280.0);
        assert_eq!(config.projection.yaw_degrees, 45.0);
        assert_eq!(config.lattice.topology, Topology::Triangular);
        assert_eq!(config.lattice.side, 5);
        assert_eq!(config.compositor.max_recursion_level, 2);
        assert_eq!(config.compositor.recursion_scale_constant, 2.325);
        assert!(config.growth.is_none());
    }

    #[test]
    fn test_default_config_toml_parses() {
        let config = EscherConfig::from_str(&default_config_toml()).unwrap();
        assert_eq!(config, EscherConfig::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
            [lattice]
            topology = "square"
            side = 4
        "#;

        let config = EscherConfig::from_str(toml).unwrap();

        // Specified values
        assert_eq!(config.lattice.topology, Topology::Square);
        assert_eq!(config.lattice.side, 4);
        // Default values
        assert_eq!(config.lattice.domain_scale, 0.8);
        assert_eq!(config.compositor.zoom_rate, 1.005);
        assert_eq!(config.palette, FacePalette::default());
    }

    #[test]
    fn test_parse_growth_and_compositor() {
        let toml = r##"
            [growth]
            mode = "breathing"
            amplitude = 0.5
            min_speed = 0.02
            max_speed = 0.03

            [compositor]
            anchor_index = 3
            offset_strategy = "anchor_relative"
            update_cadence = "per_pass"
            root_offset = [0.5, 0.0, -1.0]

            [palette]
            roof = "#ff0000"
        "##;

        let config = EscherConfig::from_str(toml).unwrap();

        assert_eq!(
            config.growth,
            Some(GrowthMode::Breathing {
                amplitude: 0.5,
                min_speed: 0.02,
                max_speed: 0.03,
            })
        );
        assert_eq!(config.compositor.anchor_index, Some(3));
        assert_eq!(
            config.compositor.offset_strategy,
            OffsetStrategy::AnchorRelative
        );
        assert_eq!(config.compositor.update_cadence, UpdateCadence::PerPass);
        assert_eq!(
            config.compositor.root_offset,
            crate::geometry::Point3::new(0.5, 0.0, -1.0)
        );
        assert_eq!(config.palette.roof, Rgb::new(0xff, 0, 0));
        assert_eq!(config.palette.front_wall, FacePalette::default().front_wall);
    }

    #[test]
    fn test_bad_color_rejected() {
        let result = EscherConfig::from_str("[palette]\nroof = \"orange\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_to_toml_round_trip() {
        let mut config = EscherConfig::default();
        config.growth = Some(GrowthMode::GrowOnce { step_divisor: 32.0 });
        config.lattice.house_size = Some(0.25);
        config.compositor.root_offset = crate::geometry::Point3::new(0.25, -0.5, 1.0);

        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[lattice]"));
        assert!(toml.contains("[compositor]"));

        let parsed = EscherConfig::from_str(&toml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("escher.toml");
        std::fs::write(&path, "[lattice]\nside = 3\n").unwrap();

        let config = EscherConfig::from_file(&path).unwrap();
        assert_eq!(config.lattice.side, 3);

        let missing = EscherConfig::from_file(&dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_derived_house_size() {
        let mut config = EscherConfig::default();
        assert!((config.house_size() - 0.32).abs() < 1e-12);

        config.lattice.house_size = Some(0.5);
        assert_eq!(config.house_size(), 0.5);
    }

    #[test]
    fn test_build_default_compositor() {
        let config = EscherConfig::default();
        let mut comp = config
            .build_compositor(&mut SmallRng::seed_from_u64(42))
            .unwrap();

        assert_eq!(comp.lattice().len(), 15);
        assert_eq!(comp.anchor_index(), 10);

        let frame = comp.tick(&mut CompositorState::default());
        assert_eq!(frame.command_count(), 45);
    }

    #[test]
    fn test_build_rejects_bad_viewport() {
        let mut config = EscherConfig::default();
        config.viewport.height = 0.0;
        let result = config.build_compositor(&mut SmallRng::seed_from_u64(42));
        assert!(matches!(result, Err(SceneError::InvalidDimension { .. })));
    }
}
