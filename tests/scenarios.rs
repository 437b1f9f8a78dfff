// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! End-to-end meshing of reference areas

use approx::assert_relative_eq;
use nalgebra::Point3;
use polyframe_mesh::{triangulate, MeshArea, MeshError, Winding};

const TRIANGLE: [f64; 9] = [0.0, 0.0, 0.0, 100.0, 0.0, 0.0, 80.0, 50.0, 0.0];

const QUAD: [f64; 12] = [111.0, -29.0, 0.0, 52.0, -29.0, 0.0, 83.0, 13.0, 0.0, 174.0, 13.0, 0.0];

const WALL: [f64; 21] = [
    0.0, -107.0, -1.0, //
    0.0, -192.456877, -1.0, //
    0.0, -234.0, -1.0, //
    0.0, -234.0, 31.270637, //
    0.0, -234.0, 82.0, //
    0.0, -168.0, 20.0, //
    0.0, -107.0, 82.0,
];

const SLAB: [f64; 12] = [0.0, 0.0, 0.0, 0.0, 50.0, 0.0, 100.0, 60.0, 0.0, 80.0, 0.0, 0.0];

fn slab_opening() -> Vec<f64> {
    vec![20.0, 20.0, 0.0, 40.0, 20.0, 0.0, 40.0, 40.0, 0.0, 20.0, 40.0, 0.0]
}

fn generated(exterior: &[f64], openings: &[Vec<f64>]) -> MeshArea {
    let mut area = MeshArea::init(exterior, openings).unwrap();
    area.generate_internals().unwrap();
    area
}

fn triangle_area(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> f64 {
    (b - a).cross(&(c - a)).norm() / 2.0
}

fn covered_area(area: &MeshArea) -> f64 {
    let vertices = area.vertices();
    area.triangles()
        .unwrap()
        .iter()
        .map(|&[i, j, k]| triangle_area(&vertices[i], &vertices[j], &vertices[k]))
        .sum()
}

fn sorted(triangles: &[[usize; 3]]) -> Vec<[usize; 3]> {
    let mut keys: Vec<[usize; 3]> = triangles
        .iter()
        .map(|t| {
            let mut key = *t;
            key.sort_unstable();
            key
        })
        .collect();
    keys.sort_unstable();
    keys
}

#[test]
fn test_single_triangle() {
    assert_eq!(triangulate(&TRIANGLE, &[]).unwrap(), vec![0, 0, 1, 2]);
}

#[test]
fn test_quad() {
    let faces = triangulate(&QUAD, &[]).unwrap();
    assert_eq!(faces, vec![0, 0, 1, 2, 0, 0, 2, 3]);
}

#[test]
fn test_collinear_points_are_dropped() {
    let area = generated(&WALL, &[]);

    let vertices = area.vertices();
    assert_eq!(vertices.len(), 5);
    assert_eq!(vertices[0], Point3::new(0.0, -107.0, -1.0));
    assert_eq!(vertices[1], Point3::new(0.0, -234.0, -1.0));
    assert_eq!(vertices[2], Point3::new(0.0, -234.0, 82.0));

    // Notched outline: the reflex vertex takes both diagonals
    let diagonals: Vec<(usize, usize)> = area
        .internal_diagonals()
        .unwrap()
        .iter()
        .map(|p| (p.low(), p.high()))
        .collect();
    assert_eq!(diagonals, vec![(0, 3), (1, 3)]);

    assert_eq!(
        sorted(&area.triangles().unwrap()),
        vec![[0, 1, 3], [0, 3, 4], [1, 2, 3]]
    );
    assert_relative_eq!(covered_area(&area), 6604.0, epsilon = 1e-6);
}

#[test]
fn test_slab_with_opening() {
    let area = generated(&SLAB, &[slab_opening()]);

    let triangles = area.triangles().unwrap();
    assert_eq!(triangles.len(), 8);
    assert_eq!(
        sorted(&triangles),
        vec![
            [0, 1, 7],
            [0, 3, 5],
            [0, 4, 5],
            [0, 4, 7],
            [1, 2, 6],
            [1, 6, 7],
            [2, 3, 5],
            [2, 5, 6]
        ]
    );
    assert_relative_eq!(area.area(), 4500.0, epsilon = 1e-6);
    assert_relative_eq!(covered_area(&area), 4500.0, epsilon = 1e-6);
}

#[test]
fn test_two_openings() {
    let exterior = [0.0, 0.0, 0.0, 100.0, 0.0, 0.0, 100.0, 50.0, 0.0, 0.0, 50.0, 0.0];
    let left = vec![15.0, 15.0, 0.0, 35.0, 15.0, 0.0, 35.0, 35.0, 0.0, 15.0, 35.0, 0.0];
    let right = vec![65.0, 15.0, 0.0, 85.0, 15.0, 0.0, 85.0, 35.0, 0.0, 65.0, 35.0, 0.0];

    let area = generated(&exterior, &[left, right]);
    assert_eq!(area.vertex_count(), 12);

    // Loops occupy consecutive index blocks in input order
    let blocks: Vec<(usize, usize)> = area
        .loops()
        .iter()
        .map(|l| (l.first_index(), l.last_index()))
        .collect();
    assert_eq!(blocks, vec![(0, 3), (4, 7), (8, 11)]);

    let triangles = area.triangles().unwrap();
    assert_eq!(triangles.len(), 14);
    assert_eq!(triangles.len(), area.expected_triangle_count());
    assert!(triangles.iter().flatten().all(|&i| i < 12));

    assert_relative_eq!(area.area(), 4200.0, epsilon = 1e-6);
    assert_relative_eq!(covered_area(&area), 4200.0, epsilon = 1e-6);
}

#[test]
fn test_opening_listed_in_either_sense() {
    let mut reversed: Vec<f64> = slab_opening()
        .chunks_exact(3)
        .rev()
        .flatten()
        .copied()
        .collect();
    reversed.rotate_left(9);

    let area = generated(&SLAB, &[reversed]);
    assert_eq!(
        area.openings()[0].winding(),
        area.exterior().winding().reversed()
    );
    assert_ne!(area.openings()[0].winding(), Winding::Undetermined);

    assert_eq!(area.triangles().unwrap().len(), 8);
    assert_relative_eq!(covered_area(&area), 4500.0, epsilon = 1e-6);
}

#[test]
fn test_meshing_is_deterministic() {
    let first = triangulate(&SLAB, &[slab_opening()]).unwrap();
    for _ in 0..5 {
        assert_eq!(triangulate(&SLAB, &[slab_opening()]).unwrap(), first);
    }
}

#[test]
fn test_faces_use_triangle_tag() {
    let faces = triangulate(&SLAB, &[slab_opening()]).unwrap();
    assert_eq!(faces.len(), 32);
    assert!(faces.chunks_exact(4).all(|f| f[0] == 0));
    assert!(faces.chunks_exact(4).all(|f| f[1..].iter().all(|&i| i < 8)));
}

#[test]
fn test_regeneration_is_noop() {
    let mut area = generated(&SLAB, &[slab_opening()]);
    let before = area.internal_diagonals().unwrap();
    area.generate_internals().unwrap();
    assert_eq!(area.internal_diagonals().unwrap(), before);
}

#[test]
fn test_rejected_inputs() {
    assert!(matches!(
        triangulate(&TRIANGLE[..8], &[]),
        Err(MeshError::InvalidCoordinates { loop_index: 0, len: 8 })
    ));

    let mut tilted = slab_opening();
    tilted[2] = 0.5;
    assert!(matches!(
        triangulate(&SLAB, &[tilted]),
        Err(MeshError::NonCoplanar { loop_index: 1, .. })
    ));

    assert!(matches!(
        triangulate(&SLAB, &[vec![1.0, 1.0, 0.0, 2.0, 2.0, 0.0]]),
        Err(MeshError::TooFewPoints { loop_index: 1, .. })
    ));
}
