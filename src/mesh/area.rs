// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Planar area with openings: the meshing aggregate

use super::diagonals::DiagonalGenerator;
use super::edge::{EdgeMap, IndexPair};
use super::faces::{encode_faces, FaceExtractor};
use super::loop_model::{points_from_coords, MeshLoop, MeshPoint};
use crate::config::MeshConfig;
use crate::error::{MeshError, MeshResult};
use crate::geometry::reduce::MIN_LOOP_POINTS;
use crate::geometry::{essential_points, Plane};
use nalgebra::Point3;
use tracing::{debug, info, warn};

/// One exterior loop, its openings and the generated diagonals.
///
/// Built by [`MeshArea::init`], completed by
/// [`MeshArea::generate_internals`] and read-only afterwards.
#[derive(Debug, Clone)]
pub struct MeshArea {
    plane: Plane,
    loops: Vec<MeshLoop>,
    internals: Option<EdgeMap>,
    config: MeshConfig,
}

impl MeshArea {
    /// Build an area with the default tolerances
    pub fn init(exterior: &[f64], openings: &[Vec<f64>]) -> MeshResult<Self> {
        Self::init_with_config(exterior, openings, &MeshConfig::default())
    }

    /// Build an area from flat `[x, y, z, ...]` loops.
    ///
    /// The plane is fitted once to the essential exterior points and reused
    /// for every opening. Each opening's winding is flipped so its solid
    /// side matches the exterior's.
    pub fn init_with_config(
        exterior: &[f64],
        openings: &[Vec<f64>],
        config: &MeshConfig,
    ) -> MeshResult<Self> {
        let exterior_points = essential_points(
            &points_from_coords(exterior, 0)?,
            config.collinear_tolerance,
        );
        if exterior_points.len() < MIN_LOOP_POINTS {
            return Err(MeshError::TooFewPoints {
                loop_index: 0,
                required: MIN_LOOP_POINTS,
                actual: exterior_points.len(),
            });
        }

        let plane = Plane::fit(&exterior_points).ok_or(MeshError::DegeneratePlane)?;

        let mut loops = Vec::with_capacity(openings.len() + 1);
        loops.push(MeshLoop::build(&exterior_points, &plane, 0, 0, config)?);

        for (n, coords) in openings.iter().enumerate() {
            let offset: usize = loops.iter().map(MeshLoop::len).sum();
            let mut opening = MeshLoop::from_coords(coords, &plane, offset, n + 1, config)
                .inspect_err(|e| warn!(opening = n, "rejected opening: {}", e))?;
            opening.reverse_winding();
            loops.push(opening);
        }

        debug!(
            loops = loops.len(),
            vertices = loops.iter().map(MeshLoop::len).sum::<usize>(),
            "mesh area initialised"
        );

        Ok(Self {
            plane,
            loops,
            internals: None,
            config: config.clone(),
        })
    }

    /// Add the internal diagonals; a second call is a no-op
    pub fn generate_internals(&mut self) -> MeshResult<()> {
        if self.internals.is_some() {
            return Ok(());
        }

        let internals = DiagonalGenerator::new(&self.loops, self.config.tolerance()).generate()?;
        info!(
            vertices = self.vertex_count(),
            diagonals = internals.len(),
            "internal diagonals generated"
        );
        self.internals = Some(internals);
        Ok(())
    }

    pub fn is_generated(&self) -> bool {
        self.internals.is_some()
    }

    fn internals(&self) -> MeshResult<&EdgeMap> {
        self.internals.as_ref().ok_or(MeshError::NotGenerated)
    }

    /// Triangles as index triples
    pub fn triangles(&self) -> MeshResult<Vec<[usize; 3]>> {
        FaceExtractor::new(&self.loops, self.internals()?).extract()
    }

    /// Flat face list, `[0, i, j, k]` per triangle
    pub fn faces(&self) -> MeshResult<Vec<usize>> {
        Ok(encode_faces(&self.triangles()?))
    }

    /// Generated diagonals in insertion order
    pub fn internal_diagonals(&self) -> MeshResult<Vec<IndexPair>> {
        Ok(self.internals()?.pairs().collect())
    }

    /// Generated diagonals as `[x0, y0, z0, x1, y1, z1]` global segments
    pub fn internal_diagonals_as_global_coords(&self) -> MeshResult<Vec<[f64; 6]>> {
        let vertices = self.vertices();
        Ok(self
            .internals()?
            .pairs()
            .map(|pair| {
                let a = vertices[pair.low()];
                let b = vertices[pair.high()];
                [a.x, a.y, a.z, b.x, b.y, b.z]
            })
            .collect())
    }

    /// Essential global points in index order
    pub fn vertices(&self) -> Vec<Point3<f64>> {
        self.points().map(|p| p.global).collect()
    }

    pub fn points(&self) -> impl Iterator<Item = &MeshPoint> {
        self.loops.iter().flat_map(|l| l.points())
    }

    pub fn vertex_count(&self) -> usize {
        self.loops.iter().map(MeshLoop::len).sum()
    }

    /// Triangles in a complete triangulation: `n + 2h - 2` for `n` vertices
    /// and `h` openings
    pub fn expected_triangle_count(&self) -> usize {
        (self.vertex_count() + 2 * self.openings().len()).saturating_sub(2)
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    pub fn exterior(&self) -> &MeshLoop {
        &self.loops[0]
    }

    pub fn openings(&self) -> &[MeshLoop] {
        &self.loops[1..]
    }

    pub fn loops(&self) -> &[MeshLoop] {
        &self.loops
    }

    /// Exterior area minus the opening areas
    pub fn area(&self) -> f64 {
        self.exterior().area() - self.openings().iter().map(MeshLoop::area).sum::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{winding_direction, Winding};
    use approx::assert_relative_eq;

    const EXTERIOR: [f64; 12] = [0.0, 0.0, 0.0, 0.0, 50.0, 0.0, 100.0, 60.0, 0.0, 80.0, 0.0, 0.0];

    fn opening() -> Vec<f64> {
        vec![20.0, 20.0, 0.0, 40.0, 20.0, 0.0, 40.0, 40.0, 0.0, 20.0, 40.0, 0.0]
    }

    #[test]
    fn test_index_blocks_are_contiguous() {
        let area = MeshArea::init(&EXTERIOR, &[opening()]).unwrap();
        assert_eq!(area.exterior().first_index(), 0);
        assert_eq!(area.exterior().last_index(), 3);
        assert_eq!(area.openings()[0].first_index(), 4);
        assert_eq!(area.openings()[0].last_index(), 7);
        assert_eq!(area.vertex_count(), 8);
        assert_relative_eq!(area.area(), 4500.0, epsilon = 1e-6);
    }

    #[test]
    fn test_opening_winding_is_negated_own_winding() {
        let area = MeshArea::init(&EXTERIOR, &[opening()]).unwrap();

        // Flip is relative to the opening's own signed area, not to the
        // exterior. This opening runs against the exterior's sense, so its
        // own winding is clockwise and the stored one matches the exterior.
        let own: Vec<_> = area.openings()[0].points().iter().map(|p| p.local).collect();
        assert_eq!(winding_direction(&own), Winding::Clockwise);
        assert_eq!(area.openings()[0].winding(), winding_direction(&own).reversed());
        assert_eq!(area.exterior().winding(), Winding::CounterClockwise);
        assert_eq!(area.openings()[0].winding(), area.exterior().winding());
    }

    #[test]
    fn test_queries_require_generation() {
        let area = MeshArea::init(&EXTERIOR, &[]).unwrap();
        assert!(matches!(area.faces(), Err(MeshError::NotGenerated)));
        assert!(matches!(
            area.internal_diagonals_as_global_coords(),
            Err(MeshError::NotGenerated)
        ));
    }

    #[test]
    fn test_diagonals_in_global_coords() {
        let mut area = MeshArea::init(&EXTERIOR, &[]).unwrap();
        area.generate_internals().unwrap();

        let diagonals = area.internal_diagonals_as_global_coords().unwrap();
        assert_eq!(diagonals.len(), 1);
        assert_eq!(diagonals[0], [0.0, 0.0, 0.0, 100.0, 60.0, 0.0]);
        assert_eq!(area.internal_diagonals().unwrap(), vec![IndexPair::new(0, 2)]);
    }

    #[test]
    fn test_non_coplanar_opening() {
        let mut lifted = opening();
        lifted[8] = 3.0;
        let err = MeshArea::init(&EXTERIOR, &[lifted]).unwrap_err();
        assert!(matches!(err, MeshError::NonCoplanar { loop_index: 1, .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_collinear_exterior() {
        let err = MeshArea::init(&[0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 3.0, 3.0, 3.0], &[])
            .unwrap_err();
        assert!(matches!(err, MeshError::DegeneratePlane));
    }
}
