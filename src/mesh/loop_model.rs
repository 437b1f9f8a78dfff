// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Closed vertex loops sharing one projection plane

use super::edge::{EdgeMap, IndexPair};
use crate::config::MeshConfig;
use crate::error::{MeshError, MeshResult};
use crate::geometry::reduce::MIN_LOOP_POINTS;
use crate::geometry::{essential_points, signed_area, winding_direction, Line2D, Plane, Winding};
use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

/// Loop vertex with its area-wide index and both coordinate forms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshPoint {
    pub index: usize,
    pub local: Point2<f64>,
    pub global: Point3<f64>,
}

/// Split a flat `[x, y, z, ...]` array into points
pub fn points_from_coords(coords: &[f64], loop_index: usize) -> MeshResult<Vec<Point3<f64>>> {
    if coords.len() % 3 != 0 {
        return Err(MeshError::InvalidCoordinates {
            loop_index,
            len: coords.len(),
        });
    }

    Ok(coords
        .chunks_exact(3)
        .map(|c| Point3::new(c[0], c[1], c[2]))
        .collect())
}

/// Ordered closed loop of mesh points.
///
/// Indices form one contiguous block starting at the loop's offset; the last
/// point connects back to the first.
#[derive(Debug, Clone)]
pub struct MeshLoop {
    points: Vec<MeshPoint>,
    winding: Winding,
    edges: EdgeMap,
}

impl MeshLoop {
    /// Parse, reduce and project a flat coordinate array
    pub fn from_coords(
        coords: &[f64],
        plane: &Plane,
        index_offset: usize,
        loop_index: usize,
        config: &MeshConfig,
    ) -> MeshResult<Self> {
        let points = points_from_coords(coords, loop_index)?;
        Self::build(&points, plane, index_offset, loop_index, config)
    }

    /// Build a loop from global points.
    ///
    /// Collinear points are dropped first. Fails if the remaining points do
    /// not lie on `plane`.
    pub fn build(
        points: &[Point3<f64>],
        plane: &Plane,
        index_offset: usize,
        loop_index: usize,
        config: &MeshConfig,
    ) -> MeshResult<Self> {
        let essential = essential_points(points, config.collinear_tolerance);
        if essential.len() < MIN_LOOP_POINTS {
            return Err(MeshError::TooFewPoints {
                loop_index,
                required: MIN_LOOP_POINTS,
                actual: essential.len(),
            });
        }

        let off_plane = plane.count_off_plane(&essential, &config.tolerance());
        if off_plane > 0 {
            return Err(MeshError::NonCoplanar {
                loop_index,
                off_plane,
            });
        }

        let points: Vec<MeshPoint> = essential
            .iter()
            .enumerate()
            .map(|(i, global)| MeshPoint {
                index: index_offset + i,
                local: plane.project(global),
                global: *global,
            })
            .collect();

        let n = points.len();
        let mut edges = EdgeMap::new();
        for i in 0..n {
            let a = &points[i];
            let b = &points[(i + 1) % n];
            edges.insert(IndexPair::new(a.index, b.index), Line2D::new(a.local, b.local));
        }

        let locals: Vec<Point2<f64>> = points.iter().map(|p| p.local).collect();
        let winding = winding_direction(&locals);

        Ok(Self {
            points,
            winding,
            edges,
        })
    }

    /// Flip the stored winding without reordering points
    pub fn reverse_winding(&mut self) {
        self.winding = self.winding.reversed();
    }

    pub fn winding(&self) -> Winding {
        self.winding
    }

    pub fn points(&self) -> &[MeshPoint] {
        &self.points
    }

    pub fn edges(&self) -> &EdgeMap {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_index(&self) -> usize {
        self.points[0].index
    }

    pub fn last_index(&self) -> usize {
        self.points[self.points.len() - 1].index
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.first_index()..=self.last_index()).contains(&index)
    }

    pub fn point(&self, index: usize) -> Option<&MeshPoint> {
        if self.contains(index) {
            self.points.get(index - self.first_index())
        } else {
            None
        }
    }

    /// Following index, wrapping from last to first
    pub fn next(&self, index: usize) -> usize {
        if index >= self.last_index() {
            self.first_index()
        } else {
            index + 1
        }
    }

    /// Preceding index, wrapping from first to last
    pub fn prev(&self, index: usize) -> usize {
        if index <= self.first_index() {
            self.last_index()
        } else {
            index - 1
        }
    }

    /// Unsigned area enclosed by the loop in local coordinates
    pub fn area(&self) -> f64 {
        let locals: Vec<Point2<f64>> = self.points.iter().map(|p| p.local).collect();
        signed_area(&locals).abs()
    }
}
