// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh module - loops, diagonal generation and face extraction

pub mod area;
pub mod batch;
pub mod diagonals;
pub mod edge;
pub mod faces;
pub mod loop_model;

pub use area::MeshArea;
pub use batch::{mesh_batch, triangulate_batch};
pub use diagonals::DiagonalGenerator;
pub use edge::{EdgeMap, IndexPair};
pub use faces::{encode_faces, FaceExtractor, TRIANGLE_TAG};
pub use loop_model::{MeshLoop, MeshPoint};
