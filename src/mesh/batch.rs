// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Parallel meshing of independent areas using rayon

use super::MeshArea;
use crate::config::MeshConfig;
use crate::error::MeshResult;
use crate::io::MeshInput;
use rayon::prelude::*;

/// Build and complete one area per input; results keep input order.
///
/// Faces are extracted once per area so an inconsistent edge graph is
/// reported as that input's error instead of surfacing on a later query.
pub fn mesh_batch(inputs: &[MeshInput], config: &MeshConfig) -> Vec<MeshResult<MeshArea>> {
    inputs
        .par_iter()
        .map(|input| {
            let mut area = MeshArea::init_with_config(&input.exterior, &input.openings, config)?;
            area.generate_internals()?;
            area.triangles()?;
            Ok(area)
        })
        .collect()
}

/// Flat face lists for many inputs
pub fn triangulate_batch(inputs: &[MeshInput], config: &MeshConfig) -> Vec<MeshResult<Vec<usize>>> {
    inputs
        .par_iter()
        .map(|input| crate::triangulate_with_config(&input.exterior, &input.openings, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MeshError;

    #[test]
    fn test_batch_keeps_order_and_errors() {
        let inputs = vec![
            MeshInput::new(vec![0.0, 0.0, 0.0, 100.0, 0.0, 0.0, 80.0, 50.0, 0.0]),
            MeshInput::new(vec![0.0, 0.0, 0.0, 1.0]),
            MeshInput::new(vec![
                111.0, -29.0, 0.0, 52.0, -29.0, 0.0, 83.0, 13.0, 0.0, 174.0, 13.0, 0.0,
            ]),
        ];

        let results = triangulate_batch(&inputs, &MeshConfig::default());
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap(), &vec![0, 0, 1, 2]);
        assert!(matches!(
            results[1],
            Err(MeshError::InvalidCoordinates { loop_index: 0, len: 4 })
        ));
        assert_eq!(results[2].as_ref().unwrap().len(), 8);
    }

    #[test]
    fn test_mesh_batch_matches_sequential() {
        let inputs: Vec<MeshInput> = (1..6)
            .map(|n| {
                let s = n as f64 * 10.0;
                MeshInput::new(vec![0.0, 0.0, 0.0, s, 0.0, 0.0, s, s, 0.0, 0.0, s, 0.0])
            })
            .collect();

        let areas = mesh_batch(&inputs, &MeshConfig::default());
        for (input, area) in inputs.iter().zip(&areas) {
            let faces = crate::triangulate(&input.exterior, &input.openings).unwrap();
            assert_eq!(area.as_ref().unwrap().faces().unwrap(), faces);
        }
    }

    #[test]
    fn test_mesh_batch_reports_face_errors() {
        let square = vec![0.0, 0.0, 0.0, 100.0, 0.0, 0.0, 100.0, 100.0, 0.0, 0.0, 100.0, 0.0];
        let inputs = vec![
            MeshInput::new(square.clone())
                .with_opening(vec![30.0, 30.0, 0.0, 60.0, 30.0, 0.0, 45.0, 60.0, 0.0]),
            MeshInput::new(square),
        ];

        let results = mesh_batch(&inputs, &MeshConfig::default());
        assert!(matches!(
            results[0],
            Err(MeshError::InconsistentTriangulation { .. })
        ));
        assert_eq!(results[1].as_ref().unwrap().triangles().unwrap().len(), 2);
    }
}
