//! The per-frame simulation loop over rigid and cloth bodies.

use alloc::vec::Vec;
use glam::Vec3;

use crate::cloth::Cloth;
use crate::collide::generate_collisions;
use crate::config::SimConfig;
use crate::constraint::PinTarget;
use crate::observer::StepObserver;
use crate::rigid::RigidBody;

/// Handle to a rigid body owned by a [`Simulation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RigidHandle(pub(crate) usize);

impl RigidHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle to a cloth body owned by a [`Simulation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClothHandle(pub(crate) usize);

impl ClothHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

const LENGTH_EPS: f32 = 1e-6;

/// A scene of rigid obstacles and cloth bodies advanced by a fixed timestep.
///
/// Each frame runs in two phases: every animated rigid body is moved to the
/// new frame time first, then every cloth steps through its stage sequence.
/// Pin and collision reads therefore always see current-frame rigid
/// geometry, independent of the order bodies were added in.
pub struct Simulation {
    config: SimConfig,
    rigids: Vec<RigidBody>,
    cloths: Vec<Cloth>,
    time: f32,
    frame: u64,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        Simulation {
            config,
            rigids: Vec::new(),
            cloths: Vec::new(),
            time: 0.0,
            frame: 0,
        }
    }

    pub fn add_rigid_body(&mut self, rigid: RigidBody) -> RigidHandle {
        let handle = RigidHandle(self.rigids.len());
        self.rigids.push(rigid);
        handle
    }

    pub fn add_cloth(&mut self, cloth: Cloth) -> ClothHandle {
        let handle = ClothHandle(self.cloths.len());
        self.cloths.push(cloth);
        handle
    }

    pub fn rigid(&self, handle: RigidHandle) -> &RigidBody {
        &self.rigids[handle.0]
    }

    pub fn cloth(&self, handle: ClothHandle) -> &Cloth {
        &self.cloths[handle.0]
    }

    pub fn cloth_mut(&mut self, handle: ClothHandle) -> &mut Cloth {
        &mut self.cloths[handle.0]
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Simulation time of the most recently completed frame.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance the whole scene by one fixed timestep.
    pub fn step_simulation<O: StepObserver>(&mut self, observer: &mut O) {
        let t = self.time + self.config.dt;

        // Phase one: rigid animation. Must complete for every body before
        // any cloth runs, so pins and collision queries read this frame's
        // geometry.
        for rigid in self.rigids.iter_mut() {
            rigid.animate_to(t);
        }
        observer.on_rigids_animated();

        // Phase two: cloth stepping.
        for i in 0..self.cloths.len() {
            let pin_targets = self.resolve_pin_targets(i);
            step_single_cloth(
                &mut self.cloths[i],
                &self.rigids,
                &pin_targets,
                &self.config,
                observer,
            );
        }

        self.time = t;
        self.frame += 1;
        observer.on_step_complete();
    }

    /// Snapshot the target position of every published pin on cloth `i`.
    ///
    /// Rigid targets see this frame's animated pose. Cloth targets read the
    /// other body's most recently committed positions: the previous frame's,
    /// or this frame's when that body stepped earlier in phase two.
    fn resolve_pin_targets(&self, i: usize) -> Vec<Vec3> {
        self.cloths[i]
            .pins
            .iter()
            .map(|pin| match pin.target {
                PinTarget::Rigid(handle, vertex) => self.rigids[handle.0].positions()[vertex],
                PinTarget::Cloth(handle, vertex) => self.cloths[handle.0].positions()[vertex],
                PinTarget::Point(point) => point,
            })
            .collect()
    }
}

/// Run one cloth body through the frame's stage sequence. Every stage
/// finishes before the next begins; within a stage, the work is independent
/// per vertex (or per constraint, inside one color batch).
fn step_single_cloth<O: StepObserver>(
    cloth: &mut Cloth,
    rigids: &[RigidBody],
    pin_targets: &[Vec3],
    config: &SimConfig,
    observer: &mut O,
) {
    let dt = config.dt;

    // External forces, then damping.
    for vel in cloth.velocities.iter_mut() {
        *vel += config.gravity * dt;
    }
    for vel in cloth.velocities.iter_mut() {
        *vel *= config.damping;
    }

    // Predict positions into both generations of the pair.
    {
        let Cloth { positions, velocities, predicted, .. } = cloth;
        predicted.seed_with(|i| positions[i] + velocities[i] * dt);
    }
    observer.on_integrate();

    // Pinned vertices become immovable for the rest of the frame.
    for pin in &cloth.pins {
        cloth.inv_mass[pin.vertex] = 0.0;
    }

    project_constraints(cloth, pin_targets, config, observer);

    let active = generate_collisions(cloth, rigids, config);
    observer.on_collisions_generated(active);

    resolve_collisions(cloth);
    observer.on_collisions_resolved();

    // Commit: implicit velocity from the corrected prediction.
    let Cloth { positions, velocities, predicted, .. } = cloth;
    let corrected = predicted.write();
    for i in 0..positions.len() {
        velocities[i] = (corrected[i] - positions[i]) / dt;
        positions[i] = corrected[i];
    }
}

/// Iterated constraint projection: color batches, then pins, then the
/// forward copy publishing this iteration's corrections.
fn project_constraints<O: StepObserver>(
    cloth: &mut Cloth,
    pin_targets: &[Vec3],
    config: &SimConfig,
    observer: &mut O,
) {
    let iterations = config.iterations.max(1);
    let inv_iterations = 1.0 / iterations as f32;

    for iteration in 0..iterations {
        for color_index in 0..cloth.colors.len() {
            let Cloth { colors, inv_mass, predicted, .. } = cloth;
            let (read, write) = predicted.split();

            for c in &colors[color_index] {
                let w_target = inv_mass[c.target];
                if w_target == 0.0 {
                    continue;
                }
                let delta = read[c.anchor] - read[c.target];
                let length = delta.length();
                if length < LENGTH_EPS {
                    // degenerate edge, leave the vertex where prediction put it
                    continue;
                }
                let w_anchor = inv_mass[c.anchor];
                // stiffness compensated for the iteration count, so the
                // effective correction after all iterations matches k
                let k = 1.0 - libm::powf(1.0 - c.stiffness, inv_iterations);
                let weight = w_target / (w_target + w_anchor);
                let correction = delta * ((length - c.rest_length) / length) * k * weight;
                // the write generation starts each iteration equal to the
                // read snapshot, so corrections from different color batches
                // accumulate rather than clobber one another
                write[c.target] += correction;
            }
        }

        {
            let Cloth { pins, predicted, .. } = cloth;
            let write = predicted.write_mut();
            for (pin, target) in pins.iter().zip(pin_targets) {
                write[pin.vertex] = write[pin.vertex].lerp(*target, pin.stiffness);
            }
        }

        cloth.predicted.copy_forward();
        observer.on_constraint_iteration(iteration);
    }
}

/// Blend each predicted position toward its active collision target.
fn resolve_collisions(cloth: &mut Cloth) {
    let Cloth { collisions, predicted, .. } = cloth;
    let write = predicted.write_mut();
    for (vertex, slot) in collisions.iter().enumerate() {
        if slot.active {
            write[vertex] = write[vertex].lerp(slot.target, slot.response);
        }
    }
}
