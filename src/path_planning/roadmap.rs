//! Undirected weighted roadmap graph

use std::collections::HashMap;

use crate::common::{Point2D, PointKey};

/// Roadmap of collision-free vertices joined by validated straight edges.
///
/// Edges are stored in both directions with the Euclidean length as weight.
/// Self-loops and duplicate edges are rejected on insertion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoadmapGraph {
    vertices: Vec<Point2D>,
    adjacency: Vec<Vec<(usize, f64)>>,
    lookup: HashMap<PointKey, usize>,
}

impl RoadmapGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a vertex, returning the index of the existing one if the
    /// position is already present
    pub fn add_vertex(&mut self, p: Point2D) -> usize {
        if let Some(&index) = self.lookup.get(&p.key()) {
            return index;
        }
        let index = self.vertices.len();
        self.vertices.push(p);
        self.adjacency.push(Vec::new());
        self.lookup.insert(p.key(), index);
        index
    }

    /// Insert the undirected edge `a <-> b`. Returns false for self-loops,
    /// unknown vertices and edges that already exist.
    pub fn add_edge(&mut self, a: usize, b: usize) -> bool {
        if a == b || a >= self.vertices.len() || b >= self.vertices.len() || self.has_edge(a, b) {
            return false;
        }
        let weight = self.vertices[a].distance(&self.vertices[b]);
        self.adjacency[a].push((b, weight));
        self.adjacency[b].push((a, weight));
        true
    }

    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.adjacency
            .get(a)
            .map_or(false, |edges| edges.iter().any(|&(n, _)| n == b))
    }

    pub fn contains(&self, p: &Point2D) -> bool {
        self.lookup.contains_key(&p.key())
    }

    pub fn index_of(&self, p: &Point2D) -> Option<usize> {
        self.lookup.get(&p.key()).copied()
    }

    pub fn vertex(&self, index: usize) -> Point2D {
        self.vertices[index]
    }

    pub fn vertices(&self) -> &[Point2D] {
        &self.vertices
    }

    /// Adjacency of a vertex by index
    pub fn neighbor_indices(&self, index: usize) -> &[(usize, f64)] {
        &self.adjacency[index]
    }

    /// Neighbours and edge weights of the vertex at `p`
    pub fn neighbors(&self, p: &Point2D) -> Option<Vec<(Point2D, f64)>> {
        let index = self.index_of(p)?;
        Some(
            self.adjacency[index]
                .iter()
                .map(|&(n, w)| (self.vertices[n], w))
                .collect(),
        )
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Every undirected edge once, as `(a, b, weight)` for rendering
    pub fn edges(&self) -> Vec<(Point2D, Point2D, f64)> {
        let vertices = &self.vertices;
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(i, edges)| {
                edges
                    .iter()
                    .filter(move |&&(j, _)| i < j)
                    .map(move |&(j, w)| (vertices[i], vertices[j], w))
            })
            .collect()
    }
}
