// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for meshing operations

use thiserror::Error;

/// Result type for meshing operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors that can occur while meshing a planar area.
///
/// Input problems (bad coordinate arrays, non-planar or degenerate loops) are
/// recoverable: the caller may fix the data and retry. An inconsistent edge
/// graph is an internal invariant violation and is never recoverable.
#[derive(Debug, Clone, Error)]
pub enum MeshError {
    /// Flat coordinate array is not made of whole (x, y, z) triples.
    #[error("loop {loop_index}: coordinate array length {len} is not a multiple of 3")]
    InvalidCoordinates { loop_index: usize, len: usize },

    /// Not enough points to form a polygon.
    #[error("loop {loop_index}: need at least {required} points, got {actual}")]
    TooFewPoints {
        loop_index: usize,
        required: usize,
        actual: usize,
    },

    /// No plane can be fitted because the leading exterior points are collinear.
    #[error("cannot fit a plane: the first three exterior points are collinear")]
    DegeneratePlane,

    /// Loop points leave the shared projection plane.
    #[error("loop {loop_index}: {off_plane} point(s) are not coplanar with the exterior")]
    NonCoplanar { loop_index: usize, off_plane: usize },

    /// Loop has zero signed area.
    #[error("loop {loop_index}: winding direction could not be determined")]
    UndeterminedWinding { loop_index: usize },

    /// Faces or diagonals were requested before internal edges were generated.
    #[error("internal edges have not been generated")]
    NotGenerated,

    /// More than one vertex closes a boundary edge into a triangle.
    #[error("inconsistent triangulation: boundary edge ({from}, {to}) has candidate apexes {apexes:?}")]
    InconsistentTriangulation {
        from: usize,
        to: usize,
        apexes: Vec<usize>,
    },
}

impl MeshError {
    /// Whether the caller can recover by correcting the input.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidCoordinates { .. }
                | Self::TooFewPoints { .. }
                | Self::DegeneratePlane
                | Self::NonCoplanar { .. }
                | Self::UndeterminedWinding { .. }
        )
    }
}
