// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Batch runner: load input documents, mesh them and time the work

use crate::config::MeshConfig;
use crate::error::MeshResult;
use crate::io::{self, MeshInput, MeshOutput};
use crate::mesh::{mesh_batch, MeshArea};
use anyhow::{Context, Result};
use std::path::Path;
use std::time::{Duration, Instant};

/// Outcome of meshing one input area
pub struct AreaRun {
    pub label: String,
    pub openings: usize,
    pub result: MeshResult<MeshArea>,
}

impl AreaRun {
    /// Triangles a complete triangulation of this area has
    pub fn expected_triangles(&self) -> Option<usize> {
        self.result.as_ref().ok().map(MeshArea::expected_triangle_count)
    }
}

/// Outcome of meshing a whole input document
pub struct BatchRun {
    pub areas: Vec<AreaRun>,
    pub duration: Duration,
}

impl BatchRun {
    pub fn failed(&self) -> usize {
        self.areas.iter().filter(|a| a.result.is_err()).count()
    }

    pub fn succeeded(&self) -> usize {
        self.areas.len() - self.failed()
    }

    /// Successfully meshed areas in input order
    pub fn meshed(&self) -> impl Iterator<Item = (&str, &MeshArea)> {
        self.areas
            .iter()
            .filter_map(|a| a.result.as_ref().ok().map(|area| (a.label.as_str(), area)))
    }

    /// Serializable outputs for every meshed area
    pub fn outputs(&self) -> Result<Vec<MeshOutput>> {
        self.meshed()
            .map(|(label, area)| {
                MeshOutput::from_area(area, Some(label.to_string()))
                    .with_context(|| format!("Failed to collect faces for {}", label))
            })
            .collect()
    }
}

/// Runner for meshing input documents
pub struct Runner {
    config: MeshConfig,
}

impl Runner {
    pub fn new(config: MeshConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MeshConfig {
        &self.config
    }

    /// Mesh every area of an input file
    pub fn run_file(&self, path: &Path) -> Result<BatchRun> {
        let inputs = io::load_inputs(path)?;
        Ok(self.run(&inputs))
    }

    /// Mesh already-loaded inputs in parallel
    pub fn run(&self, inputs: &[MeshInput]) -> BatchRun {
        let start = Instant::now();
        let results = mesh_batch(inputs, &self.config);
        let duration = start.elapsed();

        let areas = inputs
            .iter()
            .zip(results)
            .enumerate()
            .map(|(n, (input, result))| AreaRun {
                label: input.label(n),
                openings: input.openings.len(),
                result,
            })
            .collect();

        BatchRun { areas, duration }
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(MeshConfig::default())
    }
}
