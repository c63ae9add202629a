//! Position-based dynamics cloth simulation with animated rigid obstacles.
//!
//! `weft` simulates deformable cloth meshes colliding with scripted rigid
//! geometry. Predicted particle positions are corrected by iterative
//! constraint projection (distance and pin constraints), then reconciled
//! against rigid triangles by closest-point collision queries.
//!
//! # Features
//!
//! - **Conflict-free constraint batches**: distance constraints are colored so
//!   no batch writes the same vertex twice, keeping every batch safe to fan
//!   out as independent work-items
//! - **Quad-mesh cloth**: build bodies from a quad-face mesh description or a
//!   procedural grid
//! - **Pin constraints**: attach cloth vertices to rigid bodies, other cloths,
//!   or fixed points
//! - **Rigid obstacles**: static or time-animated triangle geometry with pure,
//!   replayable motion functions
//! - **Observable**: monitor pipeline stages via the `StepObserver` trait
//! - **`no_std` compatible**: the core allocates up front and performs no I/O
//!
//! # Quick start
//!
//! ```
//! use weft::{Cloth, ClothParams, QuadMesh, RigidBody, SimConfig, Simulation};
//! use weft::NoOpStepObserver;
//! use glam::Vec3;
//!
//! let mesh = QuadMesh::grid(10, 10, 0.1, Vec3::ZERO);
//! let floor = QuadMesh::grid(2, 2, 2.0, Vec3::new(-1.0, -1.0, -0.5));
//!
//! let mut sim = Simulation::new(SimConfig::new());
//! let cloth = sim.add_cloth(Cloth::new(&mesh, ClothParams::new()));
//! sim.add_rigid_body(RigidBody::new(&floor));
//!
//! sim.step_simulation(&mut NoOpStepObserver);
//! let _positions = sim.cloth(cloth).positions();
//! ```

#![no_std]

extern crate alloc;

pub mod buffer;
pub mod cloth;
pub mod collide;
pub mod config;
pub mod constraint;
pub mod error;
pub mod graph;
pub mod mesh;
pub mod observer;
pub mod rigid;
pub mod sim;

// Re-export primary API
pub use buffer::PredictedPair;
pub use cloth::Cloth;
pub use collide::closest_point_on_triangle;
pub use config::{ClothParams, SimConfig};
pub use constraint::{CollisionConstraint, DistanceConstraint, PinConstraint, PinTarget};
pub use error::SimError;
pub use graph::{ConstraintGraph, GraphStats};
pub use mesh::QuadMesh;
pub use observer::{NoOpStepObserver, StepObserver};
pub use rigid::{Motion, RigidBody};
pub use sim::{ClothHandle, RigidHandle, Simulation};
