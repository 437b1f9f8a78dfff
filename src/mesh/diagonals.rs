// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Internal diagonal generation by visibility sweep.
//!
//! Every vertex looks into the solid region between its two boundary edges.
//! Other vertices seen there are grouped by direction, and only the nearest
//! vertex on each ray is tried as a diagonal end. A diagonal is kept when it
//! is new and crosses neither a boundary edge nor an earlier diagonal.
//! Loops are visited exterior first, vertices in index order, so the result
//! is deterministic.

use super::edge::{EdgeMap, IndexPair};
use super::loop_model::{MeshLoop, MeshPoint};
use crate::error::{MeshError, MeshResult};
use crate::geometry::{is_between, segments_intersect, Line2D, Winding};
use crate::utils::Tolerance;
use ahash::AHashMap;
use nalgebra::{Point2, Vector2};
use tracing::{debug, trace};

/// Unit directions closer than this share one ray
const DIRECTION_QUANTUM: f64 = 1e-9;

type DirectionKey = (i64, i64);

fn direction_key(direction: &Vector2<f64>) -> DirectionKey {
    (
        (direction.x / DIRECTION_QUANTUM).round() as i64,
        (direction.y / DIRECTION_QUANTUM).round() as i64,
    )
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    index: usize,
    distance: f64,
}

/// Sweep-based diagonal generator over all loops of one area
pub struct DiagonalGenerator<'a> {
    loops: &'a [MeshLoop],
    points: Vec<&'a MeshPoint>,
    tolerance: Tolerance,
}

impl<'a> DiagonalGenerator<'a> {
    /// `loops` must hold contiguous index blocks starting at zero
    pub fn new(loops: &'a [MeshLoop], tolerance: Tolerance) -> Self {
        let points: Vec<&MeshPoint> = loops.iter().flat_map(|l| l.points()).collect();
        debug_assert!(points.iter().enumerate().all(|(i, p)| p.index == i));

        Self {
            loops,
            points,
            tolerance,
        }
    }

    /// Generate all internal diagonals.
    ///
    /// Fails without producing any edge if a loop has undetermined winding.
    pub fn generate(&self) -> MeshResult<EdgeMap> {
        if let Some(loop_index) = self
            .loops
            .iter()
            .position(|l| l.winding() == Winding::Undetermined)
        {
            return Err(MeshError::UndeterminedWinding { loop_index });
        }

        let mut internals = EdgeMap::new();
        for mesh_loop in self.loops {
            for point in mesh_loop.points() {
                self.connect_vertex(mesh_loop, point, &mut internals);
            }
        }

        debug!(
            loops = self.loops.len(),
            vertices = self.points.len(),
            diagonals = internals.len(),
            "generated internal diagonals"
        );
        Ok(internals)
    }

    fn local(&self, index: usize) -> Point2<f64> {
        self.points[index].local
    }

    fn unit(&self, from: usize, to: usize) -> Option<Vector2<f64>> {
        (self.local(to) - self.local(from)).try_normalize(0.0)
    }

    fn connect_vertex(&self, mesh_loop: &MeshLoop, point: &MeshPoint, internals: &mut EdgeMap) {
        let i = point.index;
        let next = mesh_loop.next(i);
        let prev = mesh_loop.prev(i);

        let (Some(to_next), Some(to_prev)) = (self.unit(i, next), self.unit(i, prev)) else {
            return;
        };

        let groups = self.sweep_groups(i, next, prev, &to_next, &to_prev, mesh_loop.winding());
        for group in groups {
            // Ties go to the lower index
            let Some(nearest) = group.iter().min_by(|a, b| {
                a.distance
                    .total_cmp(&b.distance)
                    .then(a.index.cmp(&b.index))
            }) else {
                continue;
            };

            let pair = IndexPair::new(i, nearest.index);
            let line = Line2D::new(point.local, self.local(nearest.index));
            if self.accepts(&pair, &line, internals) {
                trace!(from = i, to = nearest.index, "diagonal accepted");
                internals.insert(pair, line);
            }
        }
    }

    /// Vertices inside the solid-side sweep at `i`, grouped by ray direction
    /// in order of first appearance.
    fn sweep_groups(
        &self,
        i: usize,
        next: usize,
        prev: usize,
        to_next: &Vector2<f64>,
        to_prev: &Vector2<f64>,
        winding: Winding,
    ) -> Vec<Vec<Candidate>> {
        let origin = self.local(i);
        let mut slots: AHashMap<DirectionKey, usize> = AHashMap::new();
        let mut groups: Vec<Vec<Candidate>> = Vec::new();

        for k in self.points.iter().map(|p| p.index) {
            if k == i || k == next || k == prev {
                continue;
            }

            let offset = self.local(k) - origin;
            let distance = offset.norm();
            if distance <= 0.0 {
                continue;
            }
            let direction = offset / distance;

            // Sweep is always counter-clockwise, so the bounds swap with winding
            let inside = if winding == Winding::CounterClockwise {
                is_between(&direction, to_next, to_prev)
            } else {
                is_between(&direction, to_prev, to_next)
            };
            if !inside {
                continue;
            }

            let slot = *slots.entry(direction_key(&direction)).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(Candidate { index: k, distance });
        }

        groups
    }

    fn accepts(&self, pair: &IndexPair, line: &Line2D, internals: &EdgeMap) -> bool {
        if internals.contains(pair) || self.loops.iter().any(|l| l.edges().contains(pair)) {
            return false;
        }

        let crosses_boundary = self
            .loops
            .iter()
            .flat_map(|l| l.edges().lines())
            .any(|edge| segments_intersect(edge, line, &self.tolerance));
        if crosses_boundary {
            return false;
        }

        !internals
            .lines()
            .any(|diagonal| segments_intersect(diagonal, line, &self.tolerance))
    }
}
