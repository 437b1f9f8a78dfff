// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Meshing configuration

use crate::geometry::reduce::COLLINEAR_TOLERANCE;
use crate::utils::math::{Tolerance, DEFAULT_DECIMALS};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file looked up by [`MeshConfig::load`]
pub const CONFIG_FILE: &str = "mesh.toml";

/// Numeric tolerances used while meshing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Decimal places for coplanarity and intersection comparisons
    pub decimals: u32,
    /// Distance tolerance when dropping collinear loop points
    pub collinear_tolerance: f64,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            decimals: DEFAULT_DECIMALS,
            collinear_tolerance: COLLINEAR_TOLERANCE,
        }
    }
}

impl MeshConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: MeshConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };

        if let Ok(decimals) = std::env::var("POLYFRAME_MESH_DECIMALS") {
            config.decimals = decimals
                .parse()
                .with_context(|| format!("Invalid POLYFRAME_MESH_DECIMALS: {}", decimals))?;
        }

        if let Ok(tolerance) = std::env::var("POLYFRAME_MESH_COLLINEAR_TOLERANCE") {
            config.collinear_tolerance = tolerance.parse().with_context(|| {
                format!("Invalid POLYFRAME_MESH_COLLINEAR_TOLERANCE: {}", tolerance)
            })?;
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    pub fn tolerance(&self) -> Tolerance {
        Tolerance::new(self.decimals)
    }
}
