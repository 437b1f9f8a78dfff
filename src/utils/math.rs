// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

/// Default number of decimal places used for coordinate comparisons
pub const DEFAULT_DECIMALS: u32 = 3;

/// Check if two floats are approximately equal
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// Decimal-place tolerance for coordinate comparisons.
///
/// Two values are considered equal when they agree once rounded to
/// `decimals` places, i.e. when they differ by less than half a unit in
/// the last kept place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    pub decimals: u32,
}

impl Tolerance {
    pub fn new(decimals: u32) -> Self {
        Self { decimals }
    }

    /// Largest difference still treated as zero
    pub fn epsilon(&self) -> f64 {
        0.5 * 10f64.powi(-(self.decimals as i32))
    }

    pub fn is_zero(&self, value: f64) -> bool {
        value.abs() < self.epsilon()
    }

    pub fn eq(&self, a: f64, b: f64) -> bool {
        approx_eq(a, b, self.epsilon())
    }

    pub fn points_eq(&self, a: &Point2<f64>, b: &Point2<f64>) -> bool {
        self.eq(a.x, b.x) && self.eq(a.y, b.y)
    }

    pub fn points3_eq(&self, a: &Point3<f64>, b: &Point3<f64>) -> bool {
        self.eq(a.x, b.x) && self.eq(a.y, b.y) && self.eq(a.z, b.z)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::new(DEFAULT_DECIMALS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_eq() {
        assert!(approx_eq(1.0, 1.0001, 0.001));
        assert!(!approx_eq(1.0, 1.1, 0.001));
    }

    #[test]
    fn test_tolerance_three_places() {
        let tol = Tolerance::default();
        assert!(tol.is_zero(0.0004));
        assert!(!tol.is_zero(0.0006));
        assert!(tol.eq(10.0001, 10.0));
        assert!(!tol.eq(10.001, 10.0));
    }

    #[test]
    fn test_points_eq() {
        let tol = Tolerance::new(2);
        assert!(tol.points_eq(&Point2::new(1.001, 2.0), &Point2::new(1.0, 2.004)));
        assert!(!tol.points_eq(&Point2::new(1.01, 2.0), &Point2::new(1.0, 2.0)));
        assert!(tol.points3_eq(
            &Point3::new(0.0, 0.0, 0.001),
            &Point3::new(0.0, 0.0, 0.0)
        ));
    }
}
