// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Local coordinate frame of a planar loop

use crate::utils::Tolerance;
use nalgebra::{
    Isometry3, Matrix3, Point2, Point3, Rotation3, Translation3, UnitQuaternion, Vector3,
};
use serde::{Deserialize, Serialize};

/// Orthonormal frame spanning the plane of a loop.
///
/// Origin is the first loop point, local X points towards the second point
/// and the normal follows the first three points. Local Y completes the
/// right-handed frame (`normal × x`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    frame: Isometry3<f64>,
}

impl Plane {
    /// Fit a frame to the first three points; `None` if they are collinear
    pub fn fit(points: &[Point3<f64>]) -> Option<Self> {
        let [p0, p1, p2] = points.get(..3)? else {
            return None;
        };

        let x_axis = (p1 - p0).try_normalize(f64::EPSILON)?;
        let normal = (p1 - p0).cross(&(p2 - p0)).try_normalize(f64::EPSILON)?;
        let y_axis = normal.cross(&x_axis);

        let rotation = Rotation3::from_matrix_unchecked(Matrix3::from_columns(&[
            x_axis, y_axis, normal,
        ]));
        let frame = Isometry3::from_parts(
            Translation3::from(p0.coords),
            UnitQuaternion::from_rotation_matrix(&rotation),
        );

        Some(Self { frame })
    }

    pub fn origin(&self) -> Point3<f64> {
        Point3::from(self.frame.translation.vector)
    }

    pub fn normal(&self) -> Vector3<f64> {
        self.frame.rotation * Vector3::z()
    }

    pub fn x_axis(&self) -> Vector3<f64> {
        self.frame.rotation * Vector3::x()
    }

    pub fn y_axis(&self) -> Vector3<f64> {
        self.frame.rotation * Vector3::y()
    }

    /// Global point expressed in the local frame (z is the out-of-plane offset)
    pub fn to_local(&self, point: &Point3<f64>) -> Point3<f64> {
        self.frame.inverse_transform_point(point)
    }

    /// Global point projected into local 2D coordinates
    pub fn project(&self, point: &Point3<f64>) -> Point2<f64> {
        self.to_local(point).xy()
    }

    /// Local 2D point mapped back onto the plane in global coordinates
    pub fn unproject(&self, point: &Point2<f64>) -> Point3<f64> {
        self.frame.transform_point(&Point3::new(point.x, point.y, 0.0))
    }

    /// Number of points whose local z is not zero at the given tolerance
    pub fn count_off_plane(&self, points: &[Point3<f64>], tolerance: &Tolerance) -> usize {
        points
            .iter()
            .filter(|p| !tolerance.is_zero(self.to_local(p).z))
            .count()
    }

    pub fn verify_coplanar(&self, points: &[Point3<f64>], tolerance: &Tolerance) -> bool {
        self.count_off_plane(points, tolerance) == 0
    }
}
