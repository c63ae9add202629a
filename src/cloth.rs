//! Deformable cloth body: buffers, colored constraints, pins.

use alloc::vec;
use alloc::vec::Vec;
use glam::Vec3;

use crate::buffer::PredictedPair;
use crate::config::ClothParams;
use crate::constraint::{CollisionConstraint, DistanceConstraint, PinConstraint, PinTarget};
use crate::error::SimError;
use crate::graph::{ConstraintGraph, GraphStats};
use crate::mesh::QuadMesh;

/// A cloth body built from a quad mesh.
///
/// All buffers are allocated at construction; per-frame mutation is confined
/// to positions, velocities, predicted positions, and collision slots.
/// Constraint topology never changes after the build, though pin targets can
/// be re-bound before publishing.
pub struct Cloth {
    rest_positions: Vec<Vec3>,
    pub(crate) positions: Vec<Vec3>,
    triangles: Vec<[usize; 3]>,
    params: ClothParams,
    stats: GraphStats,

    pub(crate) velocities: Vec<Vec3>,
    pub(crate) inv_mass: Vec<f32>,
    /// Conflict-free batches of internal distance constraints.
    pub(crate) colors: Vec<Vec<DistanceConstraint>>,
    /// Host-side pin list; mutated freely, invisible to the solver.
    staged_pins: Vec<PinConstraint>,
    /// Published pin list the solver reads.
    pub(crate) pins: Vec<PinConstraint>,
    pub(crate) collisions: Vec<CollisionConstraint>,
    pub(crate) predicted: PredictedPair,
}

impl Cloth {
    /// Build a cloth body from rest-pose geometry.
    pub fn new(mesh: &QuadMesh, params: ClothParams) -> Self {
        let count = mesh.vertex_count();
        let graph =
            ConstraintGraph::build(mesh.positions(), mesh.quads(), params.stiffness, params.max_neighbors);
        let stats = graph.stats();

        Cloth {
            rest_positions: mesh.positions().to_vec(),
            positions: mesh.positions().to_vec(),
            triangles: mesh.triangles().to_vec(),
            velocities: vec![Vec3::ZERO; count],
            inv_mass: vec![params.inv_mass; count],
            colors: graph.into_colors(),
            staged_pins: Vec::new(),
            pins: Vec::new(),
            collisions: vec![CollisionConstraint::INACTIVE; count],
            predicted: PredictedPair::new(count),
            params,
            stats,
        }
    }

    /// Stage a pin tying `vertex` to `target`.
    ///
    /// Staged pins do not affect the solver until
    /// [`upload_external_constraints`](Self::upload_external_constraints)
    /// publishes them; pins are typically batch-configured once at scene
    /// setup, then published together.
    pub fn add_pin_constraint(&mut self, vertex: usize, target: PinTarget) -> Result<(), SimError> {
        let count = self.positions.len();
        if vertex >= count {
            return Err(SimError::VertexOutOfBounds { index: vertex, count });
        }
        self.staged_pins
            .push(PinConstraint::new(vertex, target, self.params.pin_stiffness));
        Ok(())
    }

    /// Publish the staged pin list to the solver.
    pub fn upload_external_constraints(&mut self) {
        self.pins = self.staged_pins.clone();
    }

    /// Move the whole body by `offset`. Scene-setup placement; rest
    /// positions (and so rest lengths) are unaffected.
    pub fn translate(&mut self, offset: Vec3) {
        for position in self.positions.iter_mut() {
            *position += offset;
        }
    }

    /// Overwrite one vertex position. Scene-setup displacement; velocity and
    /// rest pose are unaffected.
    pub fn set_position(&mut self, vertex: usize, position: Vec3) -> Result<(), SimError> {
        let count = self.positions.len();
        if vertex >= count {
            return Err(SimError::VertexOutOfBounds { index: vertex, count });
        }
        self.positions[vertex] = position;
        Ok(())
    }

    /// Current committed vertex positions, the body's externally visible
    /// output each frame.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn rest_positions(&self) -> &[Vec3] {
        &self.rest_positions
    }

    /// Triangles over the cloth surface, for the renderer.
    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    pub fn velocity(&self, vertex: usize) -> Vec3 {
        self.velocities[vertex]
    }

    pub fn inv_mass(&self, vertex: usize) -> f32 {
        self.inv_mass[vertex]
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn params(&self) -> &ClothParams {
        &self.params
    }

    /// Constraint-graph build report: color count, degree, dropped edges.
    pub fn graph_stats(&self) -> GraphStats {
        self.stats
    }

    /// Published pins, in upload order.
    pub fn pins(&self) -> &[PinConstraint] {
        &self.pins
    }
}
