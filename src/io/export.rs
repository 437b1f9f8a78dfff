// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Export of meshed areas as JSON documents or STL

use crate::error::MeshResult;
use crate::mesh::MeshArea;
use anyhow::{Context, Result};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use stl_io::{Normal, Triangle as StlTriangle, Vertex as StlVertex};

/// Serializable result of meshing one area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub vertices: Vec<[f64; 3]>,
    /// `[0, i, j, k]` per triangle
    pub faces: Vec<usize>,
    pub diagonals: Vec<[f64; 6]>,
}

impl MeshOutput {
    /// Collect vertices, faces and diagonals of a generated area
    pub fn from_area(area: &MeshArea, name: Option<String>) -> MeshResult<Self> {
        Ok(Self {
            name,
            vertices: area.vertices().iter().map(|p| [p.x, p.y, p.z]).collect(),
            faces: area.faces()?,
            diagonals: area.internal_diagonals_as_global_coords()?,
        })
    }

    pub fn triangle_count(&self) -> usize {
        self.faces.len() / 4
    }
}

/// Write outputs as a pretty-printed JSON array
pub fn export_json(outputs: &[MeshOutput], path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(path.as_ref())
        .with_context(|| format!("Failed to create output file: {:?}", path.as_ref()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), outputs)
        .context("Failed to write JSON output")?;
    Ok(())
}

fn stl_triangle(
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
    fallback: [f32; 3],
) -> StlTriangle {
    let normal = (b - a)
        .cross(&(c - a))
        .try_normalize(0.0)
        .map_or(fallback, |n| [n.x as f32, n.y as f32, n.z as f32]);
    let vertex = |p: &Point3<f64>| StlVertex::new([p.x as f32, p.y as f32, p.z as f32]);

    StlTriangle {
        normal: Normal::new(normal),
        vertices: [vertex(a), vertex(b), vertex(c)],
    }
}

/// Write the triangles of one or more generated areas as binary STL
pub fn write_stl<W: Write>(areas: &[MeshArea], writer: &mut W) -> Result<()> {
    let mut triangles = Vec::new();
    for area in areas {
        let vertices = area.vertices();
        let n = area.plane().normal();
        let fallback = [n.x as f32, n.y as f32, n.z as f32];

        for [i, j, k] in area.triangles()? {
            triangles.push(stl_triangle(&vertices[i], &vertices[j], &vertices[k], fallback));
        }
    }

    stl_io::write_stl(writer, triangles.iter()).context("Failed to write STL data")?;
    Ok(())
}

/// Export generated areas to an STL file
pub fn export_stl(areas: &[MeshArea], path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(path.as_ref())
        .with_context(|| format!("Failed to create STL file: {:?}", path.as_ref()))?;
    let mut writer = BufWriter::new(file);
    write_stl(areas, &mut writer)?;
    writer.flush().context("Failed to flush STL file")?;
    Ok(())
}
