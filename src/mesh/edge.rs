// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Undirected edges keyed by vertex index pairs

use crate::geometry::Line2D;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Unordered pair of vertex indices, stored as `(min, max)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IndexPair(usize, usize);

impl IndexPair {
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    /// Smaller index
    pub fn low(&self) -> usize {
        self.0
    }

    /// Larger index
    pub fn high(&self) -> usize {
        self.1
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0 == index || self.1 == index
    }

    /// Opposite end of the edge, if `index` is one of its ends
    pub fn other(&self, index: usize) -> Option<usize> {
        if self.0 == index {
            Some(self.1)
        } else if self.1 == index {
            Some(self.0)
        } else {
            None
        }
    }
}

impl From<(usize, usize)> for IndexPair {
    fn from((a, b): (usize, usize)) -> Self {
        Self::new(a, b)
    }
}

/// Edge map that remembers insertion order
#[derive(Debug, Clone, Default)]
pub struct EdgeMap {
    edges: Vec<(IndexPair, Line2D)>,
    lookup: AHashMap<IndexPair, usize>,
}

impl EdgeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an edge; returns false if the pair was already present
    pub fn insert(&mut self, pair: IndexPair, line: Line2D) -> bool {
        if self.lookup.contains_key(&pair) {
            return false;
        }
        self.lookup.insert(pair, self.edges.len());
        self.edges.push((pair, line));
        true
    }

    pub fn contains(&self, pair: &IndexPair) -> bool {
        self.lookup.contains_key(pair)
    }

    pub fn get(&self, pair: &IndexPair) -> Option<&Line2D> {
        self.lookup.get(pair).map(|&slot| &self.edges[slot].1)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&IndexPair, &Line2D)> {
        self.edges.iter().map(|(pair, line)| (pair, line))
    }

    pub fn pairs(&self) -> impl Iterator<Item = IndexPair> + '_ {
        self.edges.iter().map(|(pair, _)| *pair)
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line2D> {
        self.edges.iter().map(|(_, line)| line)
    }
}
