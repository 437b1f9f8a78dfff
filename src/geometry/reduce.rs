// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Essential point reduction for closed loops

use nalgebra::Point3;

/// Default distance tolerance for the collinearity test
pub const COLLINEAR_TOLERANCE: f64 = 0.001;

/// A polygon never shrinks below this many points
pub const MIN_LOOP_POINTS: usize = 3;

/// True if `point` lies on the straight segment between `prev` and `next`
pub fn lies_between(
    prev: &Point3<f64>,
    point: &Point3<f64>,
    next: &Point3<f64>,
    tolerance: f64,
) -> bool {
    let detour = (point - prev).norm() + (next - point).norm();
    (detour - (next - prev).norm()).abs() < tolerance
}

/// Drop every vertex lying on the segment between its cyclic neighbours.
///
/// Runs until no such vertex remains, so the result is a fixed point and a
/// second reduction is a no-op. Relative order is kept and the loop never
/// drops below three points.
pub fn essential_points(points: &[Point3<f64>], tolerance: f64) -> Vec<Point3<f64>> {
    let mut reduced = points.to_vec();

    loop {
        let mut removed = false;
        let mut i = 0;

        while i < reduced.len() && reduced.len() > MIN_LOOP_POINTS {
            let n = reduced.len();
            let prev = reduced[(i + n - 1) % n];
            let next = reduced[(i + 1) % n];

            if lies_between(&prev, &reduced[i], &next, tolerance) {
                reduced.remove(i);
                removed = true;
            } else {
                i += 1;
            }
        }

        if !removed {
            break;
        }
    }

    reduced
}
