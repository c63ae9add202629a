//! Quad-face mesh geometry consumed by cloth and rigid bodies.

use alloc::vec::Vec;
use glam::Vec3;

use crate::error::SimError;

/// A mesh of vertices and counter-clockwise quad faces.
///
/// Triangles are derived from the quads at construction and are what rigid
/// bodies collide with and what a renderer draws; the quads themselves drive
/// constraint generation for cloth bodies.
#[derive(Debug, Clone)]
pub struct QuadMesh {
    positions: Vec<Vec3>,
    quads: Vec<[usize; 4]>,
    triangles: Vec<[usize; 3]>,
}

impl QuadMesh {
    /// Build a mesh from in-memory arrays. Quad indices are 0-indexed and
    /// validated against the vertex count.
    pub fn from_parts(positions: Vec<Vec3>, quads: Vec<[usize; 4]>) -> Result<Self, SimError> {
        let count = positions.len();
        for quad in &quads {
            for &index in quad {
                if index >= count {
                    return Err(SimError::FaceIndexOutOfBounds { index, count });
                }
            }
        }
        let triangles = triangulate(&quads);
        Ok(QuadMesh { positions, quads, triangles })
    }

    /// Parse the vertex/quad-face text format.
    ///
    /// Recognized lines are `v x y z` (vertex position) and `f a b c d`
    /// (quad face, 1-indexed, counter-clockwise); all other lines are
    /// ignored. Face indices are converted to 0-indexed and validated.
    pub fn parse(source: &str) -> Result<Self, SimError> {
        let mut positions = Vec::new();
        let mut quads = Vec::new();

        for (number, text) in source.lines().enumerate() {
            let line = number + 1;
            let mut tokens = text.split_whitespace();
            match tokens.next() {
                Some("v") => {
                    let mut coords = [0.0f32; 3];
                    for coord in coords.iter_mut() {
                        *coord = tokens
                            .next()
                            .and_then(|t| t.parse().ok())
                            .ok_or(SimError::MalformedVertex { line })?;
                    }
                    positions.push(Vec3::from_array(coords));
                }
                Some("f") => {
                    let mut quad = [0usize; 4];
                    for index in quad.iter_mut() {
                        let raw: i64 = tokens
                            .next()
                            .and_then(|t| t.parse().ok())
                            .ok_or(SimError::MalformedFace { line })?;
                        if raw < 1 {
                            return Err(SimError::MalformedFace { line });
                        }
                        // source format is 1-indexed
                        *index = (raw - 1) as usize;
                    }
                    quads.push(quad);
                }
                _ => {}
            }
        }

        QuadMesh::from_parts(positions, quads)
    }

    /// Build a procedural grid of `cols` × `rows` vertices in the x/y plane,
    /// extending from `origin` in +x (columns) and +y (rows).
    ///
    /// Vertex at (col, row) has index `row * cols + col`. Dimensions are
    /// clamped to at least 2 so the mesh always has at least one quad.
    pub fn grid(cols: usize, rows: usize, spacing: f32, origin: Vec3) -> Self {
        let cols = cols.max(2);
        let rows = rows.max(2);

        let mut positions = Vec::with_capacity(cols * rows);
        for row in 0..rows {
            for col in 0..cols {
                positions.push(origin + Vec3::new(col as f32 * spacing, row as f32 * spacing, 0.0));
            }
        }

        let mut quads = Vec::with_capacity((cols - 1) * (rows - 1));
        for row in 0..(rows - 1) {
            for col in 0..(cols - 1) {
                let v0 = row * cols + col;
                let v1 = row * cols + col + 1;
                let v2 = (row + 1) * cols + col + 1;
                let v3 = (row + 1) * cols + col;
                quads.push([v0, v1, v2, v3]);
            }
        }

        let triangles = triangulate(&quads);
        QuadMesh { positions, quads, triangles }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn quads(&self) -> &[[usize; 4]] {
        &self.quads
    }

    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// Flattened `u32` triangle indices for a renderer's index buffer.
    pub fn triangle_indices(&self) -> Vec<u32> {
        let mut indices = Vec::with_capacity(self.triangles.len() * 3);
        for tri in &self.triangles {
            indices.push(tri[0] as u32);
            indices.push(tri[1] as u32);
            indices.push(tri[2] as u32);
        }
        indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

/// Split each counter-clockwise quad (0, 1, 2, 3) into triangles
/// (0, 1, 2) and (0, 2, 3).
fn triangulate(quads: &[[usize; 4]]) -> Vec<[usize; 3]> {
    let mut triangles = Vec::with_capacity(quads.len() * 2);
    for quad in quads {
        triangles.push([quad[0], quad[1], quad[2]]);
        triangles.push([quad[0], quad[2], quad[3]]);
    }
    triangles
}
