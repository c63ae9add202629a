//! Rigid collision bodies driven by scripted animation, not physics.

use alloc::vec::Vec;
use glam::{Affine3A, Quat, Vec3};

use crate::mesh::QuadMesh;

/// A time-parameterized rigid motion: a translation curve and a rotation
/// curve whose product is the body's transform.
///
/// Both components are pure functions of simulation time, so the same `t`
/// always yields the same transform and a scene replays deterministically.
#[derive(Debug, Clone, Copy)]
pub struct Motion {
    pub translation: fn(f32) -> Vec3,
    pub rotation: fn(f32) -> Quat,
}

impl Motion {
    /// The identity motion; a body with this motion never leaves rest pose.
    pub const STATIC: Motion = Motion {
        translation: rest_translation,
        rotation: rest_rotation,
    };

    /// Evaluate the rigid transform at time `t`.
    pub fn transform_at(&self, t: f32) -> Affine3A {
        Affine3A::from_translation((self.translation)(t))
            * Affine3A::from_quat((self.rotation)(t))
    }
}

fn rest_translation(_t: f32) -> Vec3 {
    Vec3::ZERO
}

fn rest_rotation(_t: f32) -> Quat {
    Quat::IDENTITY
}

/// Drift in +x while hopping on a rectified sine in z.
pub fn sine_hop(t: f32) -> Vec3 {
    Vec3::new(t * 0.5, 0.0, libm::fabsf(libm::sinf(t)) * 0.5)
}

/// Spin about the z axis at two radians per second.
pub fn twirl(t: f32) -> Quat {
    Quat::from_rotation_z(t * 2.0)
}

/// Triangle geometry cloth collides against.
///
/// Positions are updated from the rest pose by the motion every frame when
/// the body is animated; un-animated bodies keep their rest pose as static
/// collision geometry.
#[derive(Debug, Clone)]
pub struct RigidBody {
    rest_positions: Vec<Vec3>,
    positions: Vec<Vec3>,
    triangles: Vec<[usize; 3]>,
    animated: bool,
    motion: Motion,
}

impl RigidBody {
    /// Create a static body from mesh geometry.
    pub fn new(mesh: &QuadMesh) -> Self {
        RigidBody {
            rest_positions: mesh.positions().to_vec(),
            positions: mesh.positions().to_vec(),
            triangles: mesh.triangles().to_vec(),
            animated: false,
            motion: Motion::STATIC,
        }
    }

    /// Attach a motion and mark the body animated.
    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion = motion;
        self.animated = true;
        self
    }

    pub fn animated(&self) -> bool {
        self.animated
    }

    /// Evaluate the motion at `t`; pure, the body itself is untouched.
    pub fn transformation_at(&self, t: f32) -> Affine3A {
        self.motion.transform_at(t)
    }

    /// Move the body to its pose at time `t` by transforming a copy of the
    /// rest positions. No-op for un-animated bodies.
    pub fn animate_to(&mut self, t: f32) {
        if !self.animated {
            return;
        }
        let transform = self.motion.transform_at(t);
        for (current, rest) in self.positions.iter_mut().zip(&self.rest_positions) {
            *current = transform.transform_point3(*rest);
        }
    }

    /// Current vertex positions, read by collision queries, pins, and the
    /// renderer.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transformation_is_pure() {
        let motion = Motion { translation: sine_hop, rotation: twirl };
        let a = motion.transform_at(1.375);
        let b = motion.transform_at(1.375);
        assert_eq!(a, b);
    }

    #[test]
    fn static_body_ignores_animation() {
        let mesh = QuadMesh::grid(2, 2, 1.0, Vec3::ZERO);
        let mut body = RigidBody::new(&mesh);
        let before = body.positions().to_vec();
        body.animate_to(3.0);
        assert_eq!(body.positions(), &before[..]);
    }

    #[test]
    fn animated_body_tracks_motion() {
        let mesh = QuadMesh::grid(2, 2, 1.0, Vec3::ZERO);
        let motion = Motion { translation: sine_hop, rotation: rest_rotation };
        let mut body = RigidBody::new(&mesh).with_motion(motion);
        body.animate_to(0.0);
        assert_eq!(body.positions()[0], Vec3::ZERO);
        body.animate_to(2.0);
        // x drifts at half the clock
        assert!((body.positions()[0].x - 1.0).abs() < 1e-6);
    }
}
