// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Triangle reconstruction from the boundary + diagonal edge graph

use super::edge::EdgeMap;
use super::loop_model::MeshLoop;
use crate::error::{MeshError, MeshResult};
use ahash::AHashSet;
use nalgebra::Point2;
use std::collections::BTreeSet;
use tracing::debug;

/// Face-type tag for a three-vertex face in the flat face encoding
pub const TRIANGLE_TAG: usize = 0;

/// Flatten triangles into `[0, i, j, k]` quadruples
pub fn encode_faces(triangles: &[[usize; 3]]) -> Vec<usize> {
    triangles
        .iter()
        .flat_map(|&[a, b, c]| [TRIANGLE_TAG, a, b, c])
        .collect()
}

/// Rotate so the smallest index leads, keeping the cyclic order
fn canonical(triangle: [usize; 3]) -> [usize; 3] {
    let [a, b, c] = triangle;
    if a <= b && a <= c {
        [a, b, c]
    } else if b <= a && b <= c {
        [b, c, a]
    } else {
        [c, a, b]
    }
}

fn unordered_key(triangle: [usize; 3]) -> [usize; 3] {
    let mut key = triangle;
    key.sort_unstable();
    key
}

fn cross(origin: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    (a - origin).perp(&(b - origin))
}

/// Walks boundary edges, then diagonals, and closes each into a triangle
pub struct FaceExtractor<'a> {
    loops: &'a [MeshLoop],
    internals: &'a EdgeMap,
    adjacency: Vec<BTreeSet<usize>>,
    locals: Vec<Point2<f64>>,
}

impl<'a> FaceExtractor<'a> {
    pub fn new(loops: &'a [MeshLoop], internals: &'a EdgeMap) -> Self {
        let locals: Vec<Point2<f64>> = loops
            .iter()
            .flat_map(|l| l.points().iter().map(|p| p.local))
            .collect();

        let mut adjacency = vec![BTreeSet::new(); locals.len()];
        let boundary = loops.iter().flat_map(|l| l.edges().pairs());
        for pair in boundary.chain(internals.pairs()) {
            adjacency[pair.low()].insert(pair.high());
            adjacency[pair.high()].insert(pair.low());
        }

        Self {
            loops,
            internals,
            adjacency,
            locals,
        }
    }

    /// Vertices adjacent to both ends of an edge
    fn common_apexes(&self, a: usize, b: usize) -> Vec<usize> {
        self.adjacency[a]
            .intersection(&self.adjacency[b])
            .copied()
            .filter(|&m| m != a && m != b)
            .collect()
    }

    /// Extract all triangles.
    ///
    /// A boundary edge closed by more than one apex means the edge graph is
    /// not a valid triangulation; this aborts the extraction.
    ///
    /// Apexes are found by adjacency alone, so a triangular opening is always
    /// rejected: its own three edges close every one of its boundary edges,
    /// and any diagonal fan onto that edge adds a second apex. Openings need
    /// at least four essential points.
    pub fn extract(&self) -> MeshResult<Vec<[usize; 3]>> {
        let mut emitted: AHashSet<[usize; 3]> = AHashSet::new();
        let mut triangles = Vec::new();

        for mesh_loop in self.loops {
            for point in mesh_loop.points() {
                let i = point.index;
                let j = mesh_loop.next(i);
                let apexes = self.common_apexes(i, j);

                match apexes.as_slice() {
                    [] => debug!(from = i, to = j, "boundary edge closes no triangle"),
                    [m] => {
                        if emitted.insert(unordered_key([i, j, *m])) {
                            triangles.push(canonical([i, j, *m]));
                        }
                    }
                    _ => {
                        return Err(MeshError::InconsistentTriangulation {
                            from: i,
                            to: j,
                            apexes,
                        })
                    }
                }
            }
        }

        // Triangles bounded only by diagonals
        let orientation = self.loops.first().map_or(1, |l| l.winding().sign());
        for pair in self.internals.pairs() {
            let (a, b) = (pair.low(), pair.high());
            let (pa, pb) = (&self.locals[a], &self.locals[b]);

            for side in [1.0, -1.0] {
                let closest = self
                    .common_apexes(a, b)
                    .into_iter()
                    .map(|m| (m, cross(pa, pb, &self.locals[m]) * side))
                    .filter(|&(_, area)| area > 0.0)
                    .min_by(|x, y| x.1.total_cmp(&y.1).then(x.0.cmp(&y.0)));

                if let Some((m, _)) = closest {
                    if emitted.insert(unordered_key([a, b, m])) {
                        let same_sense = (side > 0.0) == (orientation >= 0);
                        let triangle = if same_sense { [a, b, m] } else { [b, a, m] };
                        triangles.push(canonical(triangle));
                    }
                }
            }
        }

        Ok(triangles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MeshConfig;
    use crate::geometry::{Line2D, Plane};
    use crate::mesh::edge::IndexPair;
    use crate::mesh::MeshArea;
    use nalgebra::Point3;

    fn single_loop(coords: &[f64]) -> Vec<MeshLoop> {
        let points: Vec<Point3<f64>> = coords
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect();
        let plane = Plane::fit(&points).unwrap();
        vec![MeshLoop::build(&points, &plane, 0, 0, &MeshConfig::default()).unwrap()]
    }

    fn diagonals(loops: &[MeshLoop], pairs: &[(usize, usize)]) -> EdgeMap {
        let locals: Vec<Point2<f64>> = loops[0].points().iter().map(|p| p.local).collect();
        let mut edges = EdgeMap::new();
        for &(a, b) in pairs {
            edges.insert(IndexPair::new(a, b), Line2D::new(locals[a], locals[b]));
        }
        edges
    }

    const SQUARE: [f64; 12] = [0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 10.0, 10.0, 0.0, 0.0, 10.0, 0.0];

    #[test]
    fn test_canonical_rotation() {
        assert_eq!(canonical([2, 3, 0]), [0, 2, 3]);
        assert_eq!(canonical([3, 0, 2]), [0, 2, 3]);
        assert_eq!(canonical([0, 1, 2]), [0, 1, 2]);
    }

    #[test]
    fn test_encode_faces() {
        assert_eq!(encode_faces(&[[0, 1, 2], [0, 2, 3]]), vec![0, 0, 1, 2, 0, 0, 2, 3]);
    }

    #[test]
    fn test_square_with_diagonal() {
        let loops = single_loop(&SQUARE);
        let internals = diagonals(&loops, &[(0, 2)]);
        let triangles = FaceExtractor::new(&loops, &internals).extract().unwrap();
        assert_eq!(triangles, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn test_crossing_diagonals_are_fatal() {
        let loops = single_loop(&SQUARE);
        let internals = diagonals(&loops, &[(0, 2), (1, 3)]);
        let err = FaceExtractor::new(&loops, &internals).extract().unwrap_err();

        assert!(!err.is_recoverable());
        match err {
            MeshError::InconsistentTriangulation { from, to, apexes } => {
                assert_eq!((from, to), (0, 1));
                assert_eq!(apexes, vec![2, 3]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_diagonal_leaves_gap() {
        let loops = single_loop(&SQUARE);
        let internals = EdgeMap::new();
        let triangles = FaceExtractor::new(&loops, &internals).extract().unwrap();
        assert!(triangles.is_empty());
    }

    #[test]
    fn test_inner_triangle_from_diagonals_only() {
        let hexagon = [
            10.0, 0.0, 0.0, //
            5.0, 8.66, 0.0, //
            -5.0, 8.66, 0.0, //
            -10.0, 0.0, 0.0, //
            -5.0, -8.66, 0.0, //
            5.0, -8.66, 0.0,
        ];
        let loops = single_loop(&hexagon);
        let internals = diagonals(&loops, &[(0, 2), (2, 4), (4, 0)]);
        let triangles = FaceExtractor::new(&loops, &internals).extract().unwrap();

        assert_eq!(triangles.len(), 4);
        assert!(triangles.contains(&[0, 2, 4]));
        assert!(triangles.contains(&[0, 1, 2]));
        assert!(triangles.contains(&[2, 3, 4]));
        assert!(triangles.contains(&[0, 4, 5]));
    }

    #[test]
    fn test_triangular_opening_is_reported_inconsistent() {
        let square = [0.0, 0.0, 0.0, 100.0, 0.0, 0.0, 100.0, 100.0, 0.0, 0.0, 100.0, 0.0];
        let opening = vec![30.0, 30.0, 0.0, 60.0, 30.0, 0.0, 45.0, 60.0, 0.0];

        let mut area = MeshArea::init(&square, &[opening]).unwrap();
        area.generate_internals().unwrap();

        match area.triangles() {
            Err(MeshError::InconsistentTriangulation { apexes, .. }) => {
                assert!(apexes.len() > 1);
            }
            other => panic!("expected inconsistent triangulation, got {:?}", other),
        }
        assert!(area.faces().is_err());
    }
}
