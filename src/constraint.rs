//! Constraint types: distance, pin, and per-vertex collision slots.

use glam::Vec3;

use crate::sim::{ClothHandle, RigidHandle};

/// A directional distance constraint between two vertices of one body.
///
/// `target` is the vertex being corrected, using `anchor` as the reference;
/// every undirected edge of the mesh produces exactly two of these (A→B and
/// B→A), so corrections stay symmetric across a full projection pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceConstraint {
    /// Index of the vertex this constraint corrects.
    pub target: usize,
    /// Index of the reference vertex, left untouched by this constraint.
    pub anchor: usize,
    /// Rest length, measured between the two rest positions.
    pub rest_length: f32,
    /// Stiffness in (0, 1].
    pub stiffness: f32,
}

impl DistanceConstraint {
    pub fn new(target: usize, anchor: usize, rest_length: f32, stiffness: f32) -> Self {
        DistanceConstraint { target, anchor, rest_length, stiffness }
    }
}

/// Where a pin constraint sources its target position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PinTarget {
    /// A vertex of a rigid body; follows the body's animation.
    Rigid(RigidHandle, usize),
    /// A vertex of another cloth body; reads its most recently committed
    /// position.
    Cloth(ClothHandle, usize),
    /// A fixed point in world space.
    Point(Vec3),
}

/// A constraint binding a cloth vertex to a position outside the body.
///
/// Pinned vertices have their inverse mass forced to zero each frame, so
/// internal distance constraints treat them as immovable anchors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinConstraint {
    /// Index of the pinned vertex within its cloth.
    pub vertex: usize,
    /// Source of the target position.
    pub target: PinTarget,
    /// Stiffness in (0, 1]; 1.0 snaps the vertex to the target.
    pub stiffness: f32,
}

impl PinConstraint {
    pub fn new(vertex: usize, target: PinTarget, stiffness: f32) -> Self {
        PinConstraint { vertex, target, stiffness }
    }
}

/// A per-vertex, per-frame collision directive.
///
/// One slot exists per cloth vertex; collision generation rewrites every slot
/// each frame, so an inactive slot simply means the vertex had no contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionConstraint {
    /// Push-out position the vertex is blended toward.
    pub target: Vec3,
    /// Blend factor applied at resolution, in (0, 1].
    pub response: f32,
    /// Whether this slot holds a contact for the current frame.
    pub active: bool,
}

impl CollisionConstraint {
    /// The empty slot value; resolution skips it.
    pub const INACTIVE: CollisionConstraint = CollisionConstraint {
        target: Vec3::ZERO,
        response: 0.0,
        active: false,
    };
}
