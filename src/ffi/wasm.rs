// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! WASM bindings using wasm-bindgen

use crate::{io, MeshArea};
use wasm_bindgen::prelude::*;

/// Split the flat opening buffer into loops of the given coordinate counts
fn split_openings(openings: &[f64], lengths: &[u32]) -> Result<Vec<Vec<f64>>, String> {
    let total: usize = lengths.iter().map(|&n| n as usize).sum();
    if total != openings.len() {
        return Err(format!(
            "opening lengths sum to {} but {} coordinates were given",
            total,
            openings.len()
        ));
    }

    let mut rest = openings;
    Ok(lengths
        .iter()
        .map(|&n| {
            let (head, tail) = rest.split_at(n as usize);
            rest = tail;
            head.to_vec()
        })
        .collect())
}

#[wasm_bindgen]
pub struct WasmMeshArea {
    inner: MeshArea,
}

#[wasm_bindgen]
impl WasmMeshArea {
    /// Mesh an exterior with openings packed back to back in `openings`;
    /// `opening_lengths` holds the coordinate count of each opening
    #[wasm_bindgen(constructor)]
    pub fn new(
        exterior: Vec<f64>,
        openings: Vec<f64>,
        opening_lengths: Vec<u32>,
    ) -> Result<WasmMeshArea, JsValue> {
        let openings = split_openings(&openings, &opening_lengths)
            .map_err(|e| JsValue::from_str(&format!("Input error: {}", e)))?;

        let mut inner = MeshArea::init(&exterior, &openings)
            .map_err(|e| JsValue::from_str(&format!("Mesh error: {}", e)))?;
        inner
            .generate_internals()
            .map_err(|e| JsValue::from_str(&format!("Mesh error: {}", e)))?;

        Ok(WasmMeshArea { inner })
    }

    pub fn vertex_count(&self) -> usize {
        self.inner.vertex_count()
    }

    /// Flat `[0, i, j, k]` face list
    pub fn faces(&self) -> Result<Vec<u32>, JsValue> {
        let faces = self
            .inner
            .faces()
            .map_err(|e| JsValue::from_str(&format!("Mesh error: {}", e)))?;
        Ok(faces.into_iter().map(|i| i as u32).collect())
    }

    /// Essential vertices as flat `[x, y, z, ...]`
    pub fn vertices(&self) -> Vec<f64> {
        self.inner
            .vertices()
            .iter()
            .flat_map(|p| [p.x, p.y, p.z])
            .collect()
    }

    /// Diagonals as flat `[x0, y0, z0, x1, y1, z1, ...]`
    pub fn diagonals(&self) -> Result<Vec<f64>, JsValue> {
        let diagonals = self
            .inner
            .internal_diagonals_as_global_coords()
            .map_err(|e| JsValue::from_str(&format!("Mesh error: {}", e)))?;
        Ok(diagonals.into_iter().flatten().collect())
    }

    /// Export to STL format (returns binary data)
    pub fn to_stl(&self) -> Result<Vec<u8>, JsValue> {
        let mut buffer = Vec::new();
        io::write_stl(std::slice::from_ref(&self.inner), &mut buffer)
            .map_err(|e| JsValue::from_str(&format!("STL export error: {}", e)))?;
        Ok(buffer)
    }
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
