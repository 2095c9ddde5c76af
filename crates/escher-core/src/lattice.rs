//! Lattice generation.
//!
//! Places houses on a square grid or a stepped triangular pyramid. The order
//! of the returned houses is the painter order (back to front) and must be
//! kept as is: faces are flat-filled without a depth buffer.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{require_positive, SceneError};
use crate::geometry::Point3;
use crate::growth::GrowthPolicy;
use crate::house::{GrowthAxis, House};

/// Arrangement of houses in the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// `side × side` grid in the x-y plane, houses grow toward the viewer
    Square,
    /// Rows of `side, side - 1, ..., 1` houses on the ground, growing upward
    #[default]
    Triangular,
}

impl Topology {
    /// Axis along which houses of this topology grow.
    pub fn growth_axis(self) -> GrowthAxis {
        match self {
            Topology::Square => GrowthAxis::Depth,
            Topology::Triangular => GrowthAxis::Height,
        }
    }

    /// Number of houses in each row, back row first.
    pub fn row_lengths(self, side: usize) -> Vec<usize> {
        match self {
            Topology::Square => vec![side; side],
            Topology::Triangular => (0..side).map(|r| side - r).collect(),
        }
    }

    /// Total number of houses for a lattice of this side.
    pub fn house_count(self, side: usize) -> usize {
        match self {
            Topology::Square => side * side,
            Topology::Triangular => side * (side + 1) / 2,
        }
    }

    /// House size that fills `[-domain_scale, domain_scale]` with `side` houses.
    pub fn natural_house_size(self, side: usize, domain_scale: f64) -> f64 {
        let extent = 2.0 * domain_scale;
        match self {
            Topology::Square if side > 1 => extent / (side - 1) as f64,
            Topology::Square => extent,
            Topology::Triangular => extent / side.max(1) as f64,
        }
    }

    /// Whether the zoom illusion of this topology depends on recursion.
    pub fn requires_recursion(self) -> bool {
        matches!(self, Topology::Triangular)
    }
}

/// How the builder equips each house with a growth policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum GrowthMode {
    /// Endless breathing with a random speed per house.
    ///
    /// Each house oscillates in `[0, 2 * amplitude * target]`.
    Breathing {
        amplitude: f64,
        min_speed: f64,
        max_speed: f64,
    },
    /// Grow once from zero to the house's target extent.
    GrowOnce {
        /// The step per frame is `house_size / step_divisor`
        step_divisor: f64,
    },
}

impl GrowthMode {
    /// The mode each topology was designed around.
    pub fn default_for(topology: Topology) -> Self {
        match topology {
            Topology::Square => GrowthMode::Breathing {
                amplitude: 0.25,
                min_speed: 0.01,
                max_speed: 0.05,
            },
            Topology::Triangular => GrowthMode::GrowOnce { step_divisor: 64.0 },
        }
    }

    fn validate(&self) -> Result<(), SceneError> {
        match *self {
            GrowthMode::Breathing {
                amplitude,
                min_speed,
                max_speed,
            } => {
                if !(amplitude.is_finite() && amplitude >= 0.0) {
                    return Err(SceneError::InvalidDimension {
                        what: "breathing amplitude",
                        value: amplitude,
                    });
                }
                if !(min_speed.is_finite() && max_speed.is_finite() && min_speed <= max_speed) {
                    return Err(SceneError::config(format!(
                        "breathing speed range {}..={} is empty",
                        min_speed, max_speed
                    )));
                }
                Ok(())
            }
            GrowthMode::GrowOnce { step_divisor } => {
                require_positive("step_divisor", step_divisor).map(|_| ())
            }
        }
    }
}

/// Ordered, fixed-size collection of houses.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    houses: Vec<House>,
    topology: Topology,
    side: usize,
    house_size: f64,
}

impl Lattice {
    pub fn len(&self) -> usize {
        self.houses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.houses.is_empty()
    }

    /// Houses in draw order.
    pub fn houses(&self) -> &[House] {
        &self.houses
    }

    pub fn get(&self, index: usize) -> Option<&House> {
        self.houses.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, House> {
        self.houses.iter()
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn house_size(&self) -> f64 {
        self.house_size
    }

    pub fn row_lengths(&self) -> Vec<usize> {
        self.topology.row_lengths(self.side)
    }

    /// Advances every house by `dt` frames, in draw order.
    pub fn update_all(&mut self, dt: f64) {
        for house in self.houses.iter_mut() {
            house.update(dt);
        }
    }

    /// Whether every house has finished growing.
    pub fn all_done(&self) -> bool {
        self.houses.iter().all(House::is_done)
    }

    /// Index of the house nearest the middle of the lattice.
    pub fn center_index(&self) -> usize {
        match self.topology {
            Topology::Square => {
                let mid = self.side / 2;
                mid * self.side + mid
            }
            Topology::Triangular => {
                let row = (self.side - 1) / 2;
                let before: usize = (0..row).map(|r| self.side - r).sum();
                before + (self.side - row - 1) / 2
            }
        }
    }
}

impl<'a> IntoIterator for &'a Lattice {
    type Item = &'a House;
    type IntoIter = std::slice::Iter<'a, House>;

    fn into_iter(self) -> Self::IntoIter {
        self.houses.iter()
    }
}

/// Builder for [`Lattice`].
///
/// ```
/// use escher_core::{LatticeBuilder, Topology};
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::SmallRng::seed_from_u64(7);
/// let lattice = LatticeBuilder::new(Topology::Triangular, 3, 0.5)
///     .build(&mut rng)
///     .unwrap();
/// assert_eq!(lattice.row_lengths(), vec![3, 2, 1]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeBuilder {
    topology: Topology,
    side: usize,
    house_size: f64,
    growth: GrowthMode,
}

impl LatticeBuilder {
    /// Creates a builder using the topology's default growth mode.
    pub fn new(topology: Topology, side: usize, house_size: f64) -> Self {
        Self {
            topology,
            side,
            house_size,
            growth: GrowthMode::default_for(topology),
        }
    }

    /// Overrides the growth mode.
    pub fn with_growth(mut self, growth: GrowthMode) -> Self {
        self.growth = growth;
        self
    }

    /// Validates the inputs and places every house.
    ///
    /// The RNG is only consulted for breathing speeds, one draw per house in
    /// draw order.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Lattice, SceneError> {
        if self.side < 1 {
            return Err(SceneError::InvalidDimension {
                what: "side",
                value: self.side as f64,
            });
        }
        let size = require_positive("house_size", self.house_size)?;
        self.growth.validate()?;

        let axis = self.topology.growth_axis();
        let mut houses = Vec::with_capacity(self.topology.house_count(self.side));

        for (origin, target) in self.placements(size) {
            let growth = match self.growth {
                GrowthMode::Breathing {
                    amplitude,
                    min_speed,
                    max_speed,
                } => {
                    let speed = rng.gen_range(min_speed..=max_speed);
                    GrowthPolicy::breathing(speed, amplitude * target)?
                }
                GrowthMode::GrowOnce { step_divisor } => {
                    GrowthPolicy::grow_once(0.0, target, size / step_divisor)?
                }
            };
            houses.push(House::new(origin, size, axis, growth)?);
        }

        tracing::debug!(
            topology = ?self.topology,
            side = self.side,
            house_size = size,
            houses = houses.len(),
            "built lattice"
        );

        Ok(Lattice {
            houses,
            topology: self.topology,
            side: self.side,
            house_size: size,
        })
    }

    /// Base-face centers and target extents, in painter order.
    fn placements(&self, size: f64) -> Vec<(Point3, f64)> {
        let side = self.side;
        let mid = (side - 1) as f64 / 2.0;
        let mut out = Vec::with_capacity(self.topology.house_count(side));

        match self.topology {
            Topology::Square => {
                // Rows bottom-to-top, columns right-to-left
                for row in 0..side {
                    let y = (row as f64 - mid) * size;
                    for col in 0..side {
                        let x = (mid - col as f64) * size;
                        out.push((Point3::new(x, y, 0.0), size));
                    }
                }
            }
            Topology::Triangular => {
                let ground = -(side as f64) * size / 2.0;
                for row in 0..side {
                    let count = side - row;
                    let z = (row as f64 - mid) * size;
                    let row_mid = (count - 1) as f64 / 2.0;
                    let target = count as f64 * size;
                    for col in 0..count {
                        let x = (row_mid - col as f64) * size;
                        out.push((Point3::new(x, ground, z), target));
                    }
                }
            }
        }

        out
    }
}

/// Builds a lattice with the topology's default growth mode.
pub fn build_lattice<R: Rng + ?Sized>(
    topology: Topology,
    side: usize,
    house_size: f64,
    rng: &mut R,
) -> Result<Lattice, SceneError> {
    LatticeBuilder::new(topology, side, house_size).build(rng)
}
