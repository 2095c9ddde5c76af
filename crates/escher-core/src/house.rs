//! Cuboid houses with three visible faces.
//!
//! A house is a square footprint extruded along one axis. Only the three faces
//! that can face the fixed oblique camera are modeled: the roof (+y), the
//! front wall (+z) and the lateral wall (-x).
//!
//! The extrusion length is the animated scalar. After every growth step the
//! vertices that sit on the moving face are rewritten in place; every other
//! coordinate keeps the value it was given at construction.

use escher_frames::FaceKind;
use serde::{Deserialize, Serialize};

use crate::error::SceneError;
use crate::geometry::{centroid, Point3};
use crate::growth::GrowthPolicy;

/// Four corners of a face, in winding order.
pub type Quad = [Point3; 4];

/// Model axis a house grows along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthAxis {
    /// Extruded toward the viewer along +z; the front wall moves
    Depth,
    /// Extruded upward along +y; the roof moves
    Height,
}

/// The three visible faces. Corners are never shared between faces.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseFaces {
    pub roof: Quad,
    pub front_wall: Quad,
    pub lateral_wall: Quad,
}

impl HouseFaces {
    /// Builds all faces from scratch for the given extent.
    pub fn at_extent(origin: Point3, size: f64, axis: GrowthAxis, extent: f64) -> Self {
        let h = size / 2.0;
        match axis {
            GrowthAxis::Depth => {
                let (x0, x1) = (origin.x - h, origin.x + h);
                let (y0, y1) = (origin.y - h, origin.y + h);
                let (zb, zf) = (origin.z, origin.z + extent);
                HouseFaces {
                    roof: [
                        Point3::new(x0, y1, zb),
                        Point3::new(x1, y1, zb),
                        Point3::new(x1, y1, zf),
                        Point3::new(x0, y1, zf),
                    ],
                    front_wall: [
                        Point3::new(x0, y1, zf),
                        Point3::new(x1, y1, zf),
                        Point3::new(x1, y0, zf),
                        Point3::new(x0, y0, zf),
                    ],
                    lateral_wall: [
                        Point3::new(x0, y1, zb),
                        Point3::new(x0, y1, zf),
                        Point3::new(x0, y0, zf),
                        Point3::new(x0, y0, zb),
                    ],
                }
            }
            GrowthAxis::Height => {
                let (x0, x1) = (origin.x - h, origin.x + h);
                let (z0, z1) = (origin.z - h, origin.z + h);
                let (yb, yt) = (origin.y, origin.y + extent);
                HouseFaces {
                    roof: [
                        Point3::new(x0, yt, z0),
                        Point3::new(x1, yt, z0),
                        Point3::new(x1, yt, z1),
                        Point3::new(x0, yt, z1),
                    ],
                    front_wall: [
                        Point3::new(x0, yt, z1),
                        Point3::new(x1, yt, z1),
                        Point3::new(x1, yb, z1),
                        Point3::new(x0, yb, z1),
                    ],
                    lateral_wall: [
                        Point3::new(x0, yt, z0),
                        Point3::new(x0, yt, z1),
                        Point3::new(x0, yb, z1),
                        Point3::new(x0, yb, z0),
                    ],
                }
            }
        }
    }

    /// Rewrites only the coordinates that sit on the moving face.
    fn apply_extent(&mut self, origin: Point3, axis: GrowthAxis, extent: f64) {
        match axis {
            GrowthAxis::Depth => {
                let far = origin.z + extent;
                for v in self.front_wall.iter_mut() {
                    v.z = far;
                }
                self.roof[2].z = far;
                self.roof[3].z = far;
                self.lateral_wall[1].z = far;
                self.lateral_wall[2].z = far;
            }
            GrowthAxis::Height => {
                let top = origin.y + extent;
                for v in self.roof.iter_mut() {
                    v.y = top;
                }
                self.front_wall[0].y = top;
                self.front_wall[1].y = top;
                self.lateral_wall[0].y = top;
                self.lateral_wall[1].y = top;
            }
        }
    }
}

/// One cuboid house in the lattice.
#[derive(Debug, Clone, PartialEq)]
pub struct House {
    origin: Point3,
    size: f64,
    axis: GrowthAxis,
    growth: GrowthPolicy,
    faces: HouseFaces,
}

impl House {
    /// Creates a house whose base face is centered on `origin`.
    pub fn new(
        origin: Point3,
        size: f64,
        axis: GrowthAxis,
        growth: GrowthPolicy,
    ) -> Result<Self, SceneError> {
        if !(size.is_finite() && size > 0.0) {
            return Err(SceneError::DegenerateGeometry { size });
        }

        let faces = HouseFaces::at_extent(origin, size, axis, growth.extent());
        Ok(Self {
            origin,
            size,
            axis,
            growth,
            faces,
        })
    }

    /// Advances growth by `dt` frames and refreshes the moving vertices.
    pub fn update(&mut self, dt: f64) {
        if self.growth.advance(dt) {
            let extent = self.growth.extent();
            self.faces.apply_extent(self.origin, self.axis, extent);
        }
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn axis(&self) -> GrowthAxis {
        self.axis
    }

    pub fn growth(&self) -> &GrowthPolicy {
        &self.growth
    }

    pub fn extent(&self) -> f64 {
        self.growth.extent()
    }

    pub fn is_done(&self) -> bool {
        self.growth.is_done()
    }

    pub fn faces(&self) -> &HouseFaces {
        &self.faces
    }

    /// Faces in the order they must be filled: roof, lateral wall, front wall.
    pub fn faces_in_draw_order(&self) -> [(FaceKind, &Quad); 3] {
        [
            (FaceKind::Roof, &self.faces.roof),
            (FaceKind::LateralWall, &self.faces.lateral_wall),
            (FaceKind::FrontWall, &self.faces.front_wall),
        ]
    }

    /// Center of the face that moves as the house grows.
    ///
    /// Nested lattices are anchored here.
    pub fn anchor_point(&self) -> Point3 {
        match self.axis {
            GrowthAxis::Depth => centroid(&self.faces.front_wall),
            GrowthAxis::Height => centroid(&self.faces.roof),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depth_house(growth: GrowthPolicy) -> House {
        House::new(Point3::new(0.25, -0.5, 0.0), 0.5, GrowthAxis::Depth, growth).unwrap()
    }

    fn height_house(growth: GrowthPolicy) -> House {
        House::new(Point3::new(0.0, -0.75, 0.25), 0.5, GrowthAxis::Height, growth).unwrap()
    }

    fn all_corners(faces: &HouseFaces) -> Vec<Point3> {
        faces
            .roof
            .iter()
            .chain(faces.front_wall.iter())
            .chain(faces.lateral_wall.iter())
            .copied()
            .collect()
    }

    #[test]
    fn test_degenerate_size_rejected() {
        let growth = GrowthPolicy::breathing(0.1, 0.1).unwrap();
        for size in [0.0, -0.5, f64::NAN] {
            let result = House::new(Point3::ZERO, size, GrowthAxis::Depth, growth.clone());
            assert!(matches!(result, Err(SceneError::DegenerateGeometry { .. })));
        }
    }

    #[test]
    fn test_initial_faces_match_extent() {
        let house = depth_house(GrowthPolicy::grow_once(0.0, 0.5, 0.5 / 64.0).unwrap());
        assert_eq!(house.extent(), 0.0);
        // Zero extent collapses the front wall onto the base plane
        for v in &house.faces().front_wall {
            assert_eq!(v.z, 0.0);
        }
        assert_eq!(house.faces().roof[0], Point3::new(0.0, -0.25, 0.0));
        assert_eq!(house.faces().roof[1], Point3::new(0.5, -0.25, 0.0));
    }

    #[test]
    fn test_depth_update_moves_only_far_edge() {
        let mut house = depth_house(GrowthPolicy::grow_once(0.0, 0.5, 0.125).unwrap());
        let before = house.faces().clone();
        house.update(1.0);
        let after = house.faces().clone();

        for v in &after.front_wall {
            assert_eq!(v.z, 0.125);
        }
        assert_eq!(after.roof[0], before.roof[0]);
        assert_eq!(after.roof[1], before.roof[1]);
        assert_eq!(after.roof[2].z, 0.125);
        assert_eq!(after.roof[3].z, 0.125);
        assert_eq!(after.lateral_wall[0], before.lateral_wall[0]);
        assert_eq!(after.lateral_wall[3], before.lateral_wall[3]);

        // x and y never move for a depth house
        for (a, b) in all_corners(&before).iter().zip(all_corners(&after).iter()) {
            assert_eq!(a.x, b.x);
            assert_eq!(a.y, b.y);
        }
    }

    #[test]
    fn test_height_update_moves_only_top_edge() {
        let mut house = height_house(GrowthPolicy::grow_once(0.0, 1.0, 0.25).unwrap());
        let before = house.faces().clone();
        house.update(1.0);
        let after = house.faces().clone();

        let top = -0.75 + 0.25;
        for v in &after.roof {
            assert_eq!(v.y, top);
        }
        assert_eq!(after.front_wall[0].y, top);
        assert_eq!(after.front_wall[1].y, top);
        assert_eq!(after.front_wall[2], before.front_wall[2]);
        assert_eq!(after.front_wall[3], before.front_wall[3]);
        assert_eq!(after.lateral_wall[2], before.lateral_wall[2]);
        assert_eq!(after.lateral_wall[3], before.lateral_wall[3]);

        for (a, b) in all_corners(&before).iter().zip(all_corners(&after).iter()) {
            assert_eq!(a.x, b.x);
            assert_eq!(a.z, b.z);
        }
    }

    #[test]
    fn test_in_place_update_matches_rebuild() {
        let mut house = depth_house(GrowthPolicy::breathing(0.37, 0.1).unwrap());
        for _ in 0..25 {
            house.update(1.0);
            let rebuilt =
                HouseFaces::at_extent(house.origin(), house.size(), house.axis(), house.extent());
            assert_eq!(house.faces(), &rebuilt);
        }

        let mut house = height_house(GrowthPolicy::grow_once(0.0, 1.0, 1.0 / 128.0).unwrap());
        for _ in 0..40 {
            house.update(1.0);
            let rebuilt =
                HouseFaces::at_extent(house.origin(), house.size(), house.axis(), house.extent());
            assert_eq!(house.faces(), &rebuilt);
        }
    }

    #[test]
    fn test_done_house_never_changes() {
        let mut house = height_house(GrowthPolicy::grow_once(0.0, 0.5, 0.25).unwrap());
        house.update(1.0);
        house.update(1.0);
        assert!(house.is_done());

        let frozen = house.clone();
        for _ in 0..50 {
            house.update(1.0);
        }
        assert_eq!(house, frozen);
    }

    #[test]
    fn test_static_breathing_house() {
        let mut house = depth_house(GrowthPolicy::breathing(0.0, 0.1).unwrap());
        let frozen = house.clone();
        for _ in 0..10 {
            house.update(1.0);
        }
        assert_eq!(house, frozen);
    }

    #[test]
    fn test_faces_in_draw_order() {
        let house = depth_house(GrowthPolicy::breathing(0.1, 0.1).unwrap());
        let kinds: Vec<FaceKind> = house.faces_in_draw_order().iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, FaceKind::DRAW_ORDER.to_vec());
    }

    #[test]
    fn test_anchor_point_tracks_moving_face() {
        let mut house = height_house(GrowthPolicy::grow_once(0.0, 1.0, 0.5).unwrap());
        house.update(1.0);
        house.update(1.0);
        assert_eq!(house.anchor_point(), Point3::new(0.0, 0.25, 0.25));
    }
}
