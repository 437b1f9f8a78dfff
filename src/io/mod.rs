// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - loop input documents and mesh export

mod export;
mod input;

pub use export::{export_json, export_stl, write_stl, MeshOutput};
pub use input::{load_inputs, parse_inputs, MeshInput};
