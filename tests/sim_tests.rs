use glam::Vec3;
use weft::{
    Cloth, ClothParams, Motion, NoOpStepObserver, PinTarget, QuadMesh, RigidBody, SimConfig,
    Simulation, StepObserver,
};

/// Two vertices joined by one reciprocal distance-constraint pair; the
/// degenerate quad collapses to a single undirected edge after dedup.
fn two_vertex_cloth(separation: f32, stiffness: f32) -> Cloth {
    let mesh = QuadMesh::from_parts(
        vec![Vec3::ZERO, Vec3::new(separation, 0.0, 0.0)],
        vec![[0, 1, 0, 1]],
    )
    .unwrap();
    Cloth::new(&mesh, ClothParams::new().with_stiffness(stiffness))
}

#[derive(Default)]
struct CountingObserver {
    rigid_phases: usize,
    integrations: usize,
    iterations: usize,
    active_collisions: usize,
    steps: usize,
}

impl StepObserver for CountingObserver {
    fn on_rigids_animated(&mut self) {
        self.rigid_phases += 1;
    }
    fn on_integrate(&mut self) {
        self.integrations += 1;
    }
    fn on_constraint_iteration(&mut self, _iteration: usize) {
        self.iterations += 1;
    }
    fn on_collisions_generated(&mut self, active: usize) {
        self.active_collisions += active;
    }
    fn on_step_complete(&mut self) {
        self.steps += 1;
    }
}

#[test]
fn unconstrained_vertices_integrate_gravity_exactly() {
    // Zero stiffness disables every distance correction, leaving pure
    // integration: new = old + vel * dt + gravity * dt^2.
    let mesh = QuadMesh::grid(2, 2, 1.0, Vec3::ZERO);
    let config = SimConfig::new()
        .with_gravity(Vec3::new(0.0, 0.0, -9.81))
        .with_damping(1.0);
    let dt = config.dt;

    let mut sim = Simulation::new(config);
    let handle = sim.add_cloth(Cloth::new(&mesh, ClothParams::new().with_stiffness(0.0)));
    let before: Vec<Vec3> = sim.cloth(handle).positions().to_vec();

    sim.step_simulation(&mut NoOpStepObserver);

    for (vertex, old) in before.iter().enumerate() {
        let expected = *old + Vec3::new(0.0, 0.0, -9.81) * dt * dt;
        let actual = sim.cloth(handle).positions()[vertex];
        assert!(
            actual.distance(expected) < 1e-6,
            "vertex {}: expected {:?}, got {:?}",
            vertex, expected, actual,
        );
    }

    // Second step carries the accumulated velocity term as well.
    let old = sim.cloth(handle).positions()[0];
    let velocity = sim.cloth(handle).velocity(0);
    sim.step_simulation(&mut NoOpStepObserver);

    let expected = old + (velocity + Vec3::new(0.0, 0.0, -9.81) * dt) * dt;
    let actual = sim.cloth(handle).positions()[0];
    assert!(
        actual.distance(expected) < 1e-6,
        "expected {:?}, got {:?}",
        expected, actual,
    );
}

#[test]
fn stretched_pair_converges_monotonically_to_rest_length() {
    for stiffness in [0.25, 0.5, 1.0] {
        // Zero damping kills the implicit velocity between steps, so each
        // step is a fresh projection pass and the distance trace shows the
        // solver's convergence alone.
        let config = SimConfig::new()
            .with_gravity(Vec3::ZERO)
            .with_damping(0.0);
        let mut sim = Simulation::new(config);
        let handle = sim.add_cloth(two_vertex_cloth(2.0, stiffness));

        // Stretch well past the rest length of 2.
        sim.cloth_mut(handle).set_position(1, Vec3::new(5.0, 0.0, 0.0)).unwrap();

        let mut previous = 3.0f32; // current excess over rest
        for step in 0..20 {
            sim.step_simulation(&mut NoOpStepObserver);
            let positions = sim.cloth(handle).positions();
            let excess = (positions[0].distance(positions[1]) - 2.0).abs();
            assert!(
                excess <= previous + 1e-5,
                "stiffness {}: error grew from {} to {} at step {}",
                stiffness, previous, excess, step,
            );
            previous = excess;
        }
        assert!(
            previous < 0.05,
            "stiffness {}: distance error {} after 20 steps",
            stiffness, previous,
        );
    }
}

#[test]
fn published_pin_freezes_a_vertex_under_gravity() {
    let mesh = QuadMesh::grid(3, 3, 1.0, Vec3::ZERO);
    let mut sim = Simulation::new(SimConfig::new().with_gravity(Vec3::new(0.0, 0.0, -9.81)));
    let handle = sim.add_cloth(Cloth::new(&mesh, ClothParams::new()));

    let anchor = sim.cloth(handle).positions()[0];
    let cloth = sim.cloth_mut(handle);
    cloth.add_pin_constraint(0, PinTarget::Point(anchor)).unwrap();
    cloth.upload_external_constraints();

    for _ in 0..60 {
        sim.step_simulation(&mut NoOpStepObserver);
    }

    let cloth = sim.cloth(handle);
    assert_eq!(cloth.inv_mass(0), 0.0, "pinned vertex must have zero inverse mass");
    assert!(
        cloth.positions()[0].distance(anchor) < 1e-4,
        "pinned vertex drifted to {:?}",
        cloth.positions()[0],
    );
    // the rest of the sheet still drapes
    assert!(cloth.positions()[8].z < -0.5);
}

#[test]
fn staged_pin_without_upload_has_no_effect() {
    let mesh = QuadMesh::grid(3, 3, 1.0, Vec3::ZERO);
    let mut sim = Simulation::new(SimConfig::new().with_gravity(Vec3::new(0.0, 0.0, -9.81)));
    let handle = sim.add_cloth(Cloth::new(&mesh, ClothParams::new()));

    let anchor = sim.cloth(handle).positions()[0];
    sim.cloth_mut(handle).add_pin_constraint(0, PinTarget::Point(anchor)).unwrap();
    // no upload_external_constraints call

    for _ in 0..60 {
        sim.step_simulation(&mut NoOpStepObserver);
    }

    assert!(
        sim.cloth(handle).positions()[0].z < -0.5,
        "vertex should fall while the pin is only staged",
    );
}

#[test]
fn pinned_vertex_tracks_an_animated_rigid_body() {
    let rigid_mesh = QuadMesh::grid(2, 2, 1.0, Vec3::ZERO);
    let motion = Motion { translation: weft::rigid::sine_hop, ..Motion::STATIC };

    let mut sim = Simulation::new(SimConfig::new().with_gravity(Vec3::ZERO));
    let rigid = sim.add_rigid_body(RigidBody::new(&rigid_mesh).with_motion(motion));

    let cloth_mesh = QuadMesh::grid(3, 3, 0.5, Vec3::new(0.0, 0.0, 1.0));
    let cloth = sim.add_cloth(Cloth::new(&cloth_mesh, ClothParams::new()));
    sim.cloth_mut(cloth).add_pin_constraint(0, PinTarget::Rigid(rigid, 0)).unwrap();
    sim.cloth_mut(cloth).upload_external_constraints();

    for _ in 0..30 {
        sim.step_simulation(&mut NoOpStepObserver);
    }

    let target = sim.rigid(rigid).positions()[0];
    let pinned = sim.cloth(cloth).positions()[0];
    assert!(
        pinned.distance(target) < 0.05,
        "pinned vertex {:?} should ride rigid vertex {:?}",
        pinned, target,
    );
    // the body actually moved; this is not a rest-pose coincidence
    assert!(target.x > 0.1);
}

#[test]
fn falling_cloth_rests_on_a_static_floor() {
    let floor = QuadMesh::grid(2, 2, 4.0, Vec3::new(-2.0, -2.0, -0.3));
    let cloth_mesh = QuadMesh::grid(5, 5, 0.25, Vec3::ZERO);

    let mut sim = Simulation::new(SimConfig::new());
    sim.add_rigid_body(RigidBody::new(&floor));
    let handle = sim.add_cloth(Cloth::new(&cloth_mesh, ClothParams::new()));

    let mut observer = CountingObserver::default();
    for _ in 0..300 {
        sim.step_simulation(&mut observer);
    }

    assert!(observer.active_collisions > 0, "the cloth never touched the floor");

    let cloth = sim.cloth(handle);
    for (vertex, position) in cloth.positions().iter().enumerate() {
        assert!(
            position.z > -0.42,
            "vertex {} sank through the floor: {:?}",
            vertex, position,
        );
        assert!(
            position.z < -0.1,
            "vertex {} never fell: {:?}",
            vertex, position,
        );
    }
}

#[test]
fn observer_sees_every_stage() {
    let mesh = QuadMesh::grid(3, 3, 1.0, Vec3::ZERO);
    let config = SimConfig::new().with_iterations(7);
    let mut sim = Simulation::new(config);
    sim.add_cloth(Cloth::new(&mesh, ClothParams::new()));

    let mut observer = CountingObserver::default();
    sim.step_simulation(&mut observer);
    sim.step_simulation(&mut observer);

    assert_eq!(observer.steps, 2);
    assert_eq!(observer.rigid_phases, 2);
    assert_eq!(observer.integrations, 2);
    assert_eq!(observer.iterations, 14); // 7 per frame for the single cloth
}
