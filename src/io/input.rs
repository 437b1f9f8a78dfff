// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! JSON input documents describing loops to mesh

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One planar area: exterior loop plus openings, all as flat `[x, y, z, ...]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub exterior: Vec<f64>,
    #[serde(default)]
    pub openings: Vec<Vec<f64>>,
}

impl MeshInput {
    pub fn new(exterior: Vec<f64>) -> Self {
        Self {
            name: None,
            exterior,
            openings: Vec::new(),
        }
    }

    pub fn with_opening(mut self, opening: Vec<f64>) -> Self {
        self.openings.push(opening);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name for reports, falling back to the position in a batch
    pub fn label(&self, position: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("area #{}", position))
    }
}

/// A document holds either one area or a list of them
#[derive(Deserialize)]
#[serde(untagged)]
enum InputDocument {
    Batch(Vec<MeshInput>),
    Single(MeshInput),
}

/// Parse a JSON document into mesh inputs
pub fn parse_inputs(json: &str) -> Result<Vec<MeshInput>> {
    let document: InputDocument =
        serde_json::from_str(json).context("Failed to parse mesh input document")?;

    Ok(match document {
        InputDocument::Batch(inputs) => inputs,
        InputDocument::Single(input) => vec![input],
    })
}

/// Load mesh inputs from a JSON file
pub fn load_inputs(path: impl AsRef<Path>) -> Result<Vec<MeshInput>> {
    let content = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read input file: {:?}", path.as_ref()))?;
    parse_inputs(&content).with_context(|| format!("Invalid input file: {:?}", path.as_ref()))
}
