// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Planar primitives: segments, loop winding and cheap angular ordering

use crate::utils::Tolerance;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Rotational sense of a closed loop in local 2D coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winding {
    Clockwise,
    Undetermined,
    CounterClockwise,
}

impl Winding {
    pub fn from_signed_area(area: f64) -> Self {
        if area > 0.0 {
            Winding::CounterClockwise
        } else if area < 0.0 {
            Winding::Clockwise
        } else {
            Winding::Undetermined
        }
    }

    /// -1, 0 or +1
    pub fn sign(self) -> i8 {
        match self {
            Winding::Clockwise => -1,
            Winding::Undetermined => 0,
            Winding::CounterClockwise => 1,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Winding::Clockwise => Winding::CounterClockwise,
            Winding::Undetermined => Winding::Undetermined,
            Winding::CounterClockwise => Winding::Clockwise,
        }
    }
}

/// Signed area of a closed loop (shoelace formula, last point wraps to first)
pub fn signed_area(points: &[Point2<f64>]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let twice_area: f64 = (0..n)
        .map(|i| {
            let a = &points[i];
            let b = &points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();

    twice_area / 2.0
}

/// Winding of a closed loop; `Undetermined` only for an exactly zero area
pub fn winding_direction(points: &[Point2<f64>]) -> Winding {
    Winding::from_signed_area(signed_area(points))
}

/// Trig-free angle proxy in `[0, 4)`.
///
/// Orders vectors counter-clockwise from the positive X axis exactly as
/// `atan2` would, one unit per quadrant. A zero vector maps to 0.
pub fn diamond_angle(v: &Vector2<f64>) -> f64 {
    let (x, y) = (v.x, v.y);
    if x == 0.0 && y == 0.0 {
        return 0.0;
    }

    if y >= 0.0 {
        if x >= 0.0 {
            y / (x + y)
        } else {
            1.0 - x / (-x + y)
        }
    } else if x < 0.0 {
        2.0 - y / (-x - y)
    } else {
        3.0 + x / (x - y)
    }
}

/// True if `candidate` lies strictly inside the counter-clockwise sweep
/// from `from` to `to`. Vectors parallel to either bound are excluded.
pub fn is_between(candidate: &Vector2<f64>, from: &Vector2<f64>, to: &Vector2<f64>) -> bool {
    let start = diamond_angle(from);
    let mut end = diamond_angle(to);
    let mut angle = diamond_angle(candidate);

    if start > end {
        end += 4.0;
    }
    if angle < start {
        angle += 4.0;
    }

    angle > start && angle < end
}

/// Straight segment in local 2D coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line2D {
    pub start: Point2<f64>,
    pub end: Point2<f64>,
}

impl Line2D {
    pub fn new(start: Point2<f64>, end: Point2<f64>) -> Self {
        Self { start, end }
    }

    pub fn direction(&self) -> Vector2<f64> {
        self.end - self.start
    }

    /// Intersection of the infinite lines through both segments
    pub fn line_intersection(&self, other: &Line2D) -> Option<Point2<f64>> {
        let d1 = self.direction();
        let d2 = other.direction();
        let denom = d1.perp(&d2);

        if denom.abs() <= f64::EPSILON * d1.norm() * d2.norm() {
            return None;
        }

        let t = (other.start - self.start).perp(&d2) / denom;
        Some(self.start + d1 * t)
    }

    /// Whether a point on this segment's line lies within its finite extent
    pub fn within_extent(&self, point: &Point2<f64>, tolerance: &Tolerance) -> bool {
        let eps = tolerance.epsilon();
        let (min_x, max_x) = min_max(self.start.x, self.end.x);
        let (min_y, max_y) = min_max(self.start.y, self.end.y);

        point.x >= min_x - eps
            && point.x <= max_x + eps
            && point.y >= min_y - eps
            && point.y <= max_y + eps
    }
}

fn min_max(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Does `candidate` cross `edge`?
///
/// Touching at one of the candidate's own endpoints does not count. Parallel
/// segments never intersect. Only valid where the candidate's endpoints are never
/// interior points of `edge`, which holds for ordered, non self-intersecting
/// loops.
pub fn segments_intersect(edge: &Line2D, candidate: &Line2D, tolerance: &Tolerance) -> bool {
    let Some(point) = edge.line_intersection(candidate) else {
        return false;
    };

    if tolerance.points_eq(&point, &candidate.start) || tolerance.points_eq(&point, &candidate.end) {
        return false;
    }

    edge.within_extent(&point, tolerance) && candidate.within_extent(&point, tolerance)
}
