// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polyframe Mesh
//!
//! Triangulates planar polygons with openings embedded in 3D space.
//! Loops are reduced to their essential points, projected onto a shared
//! plane, connected by a visibility sweep and returned as a flat face list.

pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod mesh;
pub mod utils;

#[cfg(feature = "wasm")]
pub mod ffi;

pub use config::MeshConfig;
pub use error::{MeshError, MeshResult};
pub use geometry::{essential_points, Plane, Winding};
pub use io::{export_json, export_stl, load_inputs, MeshInput, MeshOutput};
pub use mesh::{mesh_batch, triangulate_batch, IndexPair, MeshArea, MeshLoop, MeshPoint};

/// Triangulate an exterior loop with openings using default tolerances.
///
/// Coordinates are flat `[x, y, z, ...]` arrays. Returns `[0, i, j, k]` per
/// triangle, indexing the essential points of the exterior followed by
/// each opening in order.
pub fn triangulate(exterior: &[f64], openings: &[Vec<f64>]) -> MeshResult<Vec<usize>> {
    triangulate_with_config(exterior, openings, &MeshConfig::default())
}

/// Triangulate with explicit tolerances
pub fn triangulate_with_config(
    exterior: &[f64],
    openings: &[Vec<f64>],
    config: &MeshConfig,
) -> MeshResult<Vec<usize>> {
    let mut area = MeshArea::init_with_config(exterior, openings, config)?;
    area.generate_internals()?;
    area.faces()
}
