// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - planar primitives, plane fitting and point reduction

pub mod plane;
pub mod primitives;
pub mod reduce;

pub use plane::Plane;
pub use primitives::{
    diamond_angle, is_between, segments_intersect, signed_area, winding_direction, Line2D,
    Winding,
};
pub use reduce::essential_points;
