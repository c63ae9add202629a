//! Constraint graph construction and conflict-free coloring.

use alloc::vec;
use alloc::vec::Vec;
use glam::Vec3;

use crate::constraint::DistanceConstraint;

/// Summary of a constraint graph build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphStats {
    /// Number of vertices in the mesh.
    pub vertices: usize,
    /// Number of unique undirected edges recorded.
    pub edges: usize,
    /// Number of color buffers produced (equals the maximum vertex degree).
    pub colors: usize,
    /// Largest neighbor count of any vertex after capping.
    pub max_degree: usize,
    /// Directional constraints dropped by the neighbor budget. Zero unless a
    /// `max_neighbors` cap was set and the mesh exceeded it.
    pub dropped_edges: usize,
}

/// Distance constraints partitioned into conflict-free color buffers.
///
/// Within one buffer, no vertex appears as the correction target of more than
/// one constraint, so the whole buffer can be projected as a single parallel
/// batch with no intra-batch ordering.
#[derive(Debug, Clone)]
pub struct ConstraintGraph {
    colors: Vec<Vec<DistanceConstraint>>,
    stats: GraphStats,
}

impl ConstraintGraph {
    /// Build the graph from rest positions and counter-clockwise quad faces.
    ///
    /// Each face contributes its four boundary edges (v0–v1, v1–v2, v2–v3,
    /// v3–v0). An edge shared by two faces is recorded once; each recorded
    /// edge yields a reciprocal pair of directional constraints with rest
    /// length equal to the distance between the rest positions.
    ///
    /// Coloring is by neighbor slot: the constraint correcting vertex `v`
    /// against its `j`-th neighbor lands in color `j`. A vertex contributes
    /// at most one constraint per slot, so no color ever targets the same
    /// vertex twice, and the color count equals the maximum degree.
    ///
    /// `max_neighbors` optionally caps per-vertex degree for fixed-size
    /// constraint layouts; capped-away entries are counted in
    /// [`GraphStats::dropped_edges`] rather than lost silently.
    pub fn build(
        positions: &[Vec3],
        quads: &[[usize; 4]],
        stiffness: f32,
        max_neighbors: Option<usize>,
    ) -> Self {
        let vertex_count = positions.len();
        let mut neighbors: Vec<Vec<usize>> = vec![Vec::new(); vertex_count];
        let mut edges = 0;
        let mut dropped = 0;

        let has_room = |list: &Vec<usize>| match max_neighbors {
            Some(cap) => list.len() < cap,
            None => true,
        };

        for quad in quads {
            for (a, b) in [
                (quad[0], quad[1]),
                (quad[1], quad[2]),
                (quad[2], quad[3]),
                (quad[3], quad[0]),
            ] {
                // dedup across faces sharing this edge
                if neighbors[a].contains(&b) || neighbors[b].contains(&a) {
                    continue;
                }
                edges += 1;
                if has_room(&neighbors[a]) {
                    neighbors[a].push(b);
                } else {
                    dropped += 1;
                }
                if has_room(&neighbors[b]) {
                    neighbors[b].push(a);
                } else {
                    dropped += 1;
                }
            }
        }

        let max_degree = neighbors.iter().map(Vec::len).max().unwrap_or(0);
        let mut colors: Vec<Vec<DistanceConstraint>> = vec![Vec::new(); max_degree];
        for (target, list) in neighbors.iter().enumerate() {
            for (slot, &anchor) in list.iter().enumerate() {
                let rest_length = positions[target].distance(positions[anchor]);
                colors[slot].push(DistanceConstraint::new(target, anchor, rest_length, stiffness));
            }
        }

        let stats = GraphStats {
            vertices: vertex_count,
            edges,
            colors: max_degree,
            max_degree,
            dropped_edges: dropped,
        };

        ConstraintGraph { colors, stats }
    }

    /// The color buffers, each a conflict-free batch.
    pub fn colors(&self) -> &[Vec<DistanceConstraint>] {
        &self.colors
    }

    pub fn stats(&self) -> GraphStats {
        self.stats
    }

    /// Total directional constraint count across all colors.
    pub fn constraint_count(&self) -> usize {
        self.colors.iter().map(Vec::len).sum()
    }

    pub(crate) fn into_colors(self) -> Vec<Vec<DistanceConstraint>> {
        self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::QuadMesh;

    #[test]
    fn shared_edges_recorded_once() {
        // Two quads sharing the edge 1-4 (3x2 grid of vertices).
        let mesh = QuadMesh::grid(3, 2, 1.0, Vec3::ZERO);
        let graph = ConstraintGraph::build(mesh.positions(), mesh.quads(), 1.0, None);
        // 7 unique edges: 2 + 2 horizontal, 3 vertical.
        assert_eq!(graph.stats().edges, 7);
        assert_eq!(graph.constraint_count(), 14);
    }

    #[test]
    fn neighbor_budget_reports_drops() {
        let mesh = QuadMesh::grid(3, 3, 1.0, Vec3::ZERO);
        let capped = ConstraintGraph::build(mesh.positions(), mesh.quads(), 1.0, Some(2));
        assert!(capped.stats().dropped_edges > 0);
        assert!(capped.stats().max_degree <= 2);

        let full = ConstraintGraph::build(mesh.positions(), mesh.quads(), 1.0, None);
        assert_eq!(full.stats().dropped_edges, 0);
        // The center vertex of a 3x3 grid touches all four of its sides.
        assert_eq!(full.stats().max_degree, 4);
    }
}
