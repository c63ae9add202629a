//! Configuration types for the simulation and per-cloth parameters.

use glam::Vec3;

/// Simulation-wide parameters shared by every body in a [`Simulation`].
///
/// [`Simulation`]: crate::Simulation
///
/// # Builder Pattern
/// ```
/// use weft::SimConfig;
/// use glam::Vec3;
///
/// let config = SimConfig::new()
///     .with_gravity(Vec3::new(0.0, 0.0, -9.81))
///     .with_dt(1.0 / 120.0)
///     .with_iterations(16);
/// ```
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Gravity acceleration vector. Default: (0, 0, -0.98).
    pub gravity: Vec3,
    /// Fixed timestep per `step_simulation` call. Default: 0.016.
    pub dt: f32,
    /// Number of constraint projection iterations per step.
    /// More iterations = stiffer cloth but slower. Default: 10.
    pub iterations: usize,
    /// Velocity damping factor [0, 1]. 1.0 = no damping. Default: 0.99.
    pub damping: f32,
    /// Maximum distance from a rigid triangle at which a predicted vertex
    /// position generates a collision constraint. Default: 0.1.
    pub collision_threshold: f32,
    /// Offset along the contact normal applied to collision push-out
    /// targets, keeping resolved vertices just off the surface. Default: 0.01.
    pub collision_margin: f32,
}

impl SimConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        SimConfig {
            gravity: Vec3::new(0.0, 0.0, -0.98),
            dt: 0.016,
            iterations: 10,
            damping: 0.99,
            collision_threshold: 0.1,
            collision_margin: 0.01,
        }
    }

    /// Set the gravity vector.
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the fixed timestep.
    pub fn with_dt(mut self, dt: f32) -> Self {
        self.dt = dt;
        self
    }

    /// Set the number of constraint projection iterations.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations.max(1);
        self
    }

    /// Set the velocity damping factor.
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// Set the collision detection distance threshold.
    pub fn with_collision_threshold(mut self, threshold: f32) -> Self {
        self.collision_threshold = threshold;
        self
    }

    /// Set the collision push-out margin.
    pub fn with_collision_margin(mut self, margin: f32) -> Self {
        self.collision_margin = margin;
        self
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-cloth material parameters, fixed at body construction.
#[derive(Debug, Clone)]
pub struct ClothParams {
    /// Stiffness of internal distance constraints, in (0, 1]. Default: 0.9.
    pub stiffness: f32,
    /// Stiffness of pin constraints, in (0, 1]. 1.0 snaps the pinned vertex
    /// to its target every iteration. Default: 1.0.
    pub pin_stiffness: f32,
    /// Inverse mass assigned to every vertex. 0 makes the whole body
    /// immovable; pinned vertices are forced to 0 regardless. Default: 1.0.
    pub inv_mass: f32,
    /// Blend factor applied when resolving a collision constraint, in (0, 1].
    /// Default: 0.2.
    pub collision_response: f32,
    /// Optional per-vertex neighbor budget for the constraint graph. `None`
    /// keeps every quad edge; `Some(n)` drops edges beyond `n` neighbors and
    /// reports the count in [`GraphStats`]. Default: `None`.
    ///
    /// [`GraphStats`]: crate::GraphStats
    pub max_neighbors: Option<usize>,
}

impl ClothParams {
    /// Create new params with default values.
    pub fn new() -> Self {
        ClothParams {
            stiffness: 0.9,
            pin_stiffness: 1.0,
            inv_mass: 1.0,
            collision_response: 0.2,
            max_neighbors: None,
        }
    }

    /// Set the internal constraint stiffness.
    pub fn with_stiffness(mut self, stiffness: f32) -> Self {
        self.stiffness = stiffness;
        self
    }

    /// Set the pin constraint stiffness.
    pub fn with_pin_stiffness(mut self, stiffness: f32) -> Self {
        self.pin_stiffness = stiffness;
        self
    }

    /// Set the per-vertex inverse mass.
    pub fn with_inv_mass(mut self, inv_mass: f32) -> Self {
        self.inv_mass = inv_mass;
        self
    }

    /// Set the collision response blend factor.
    pub fn with_collision_response(mut self, response: f32) -> Self {
        self.collision_response = response;
        self
    }

    /// Cap the number of internal neighbors per vertex.
    pub fn with_max_neighbors(mut self, max: usize) -> Self {
        self.max_neighbors = Some(max);
        self
    }
}

impl Default for ClothParams {
    fn default() -> Self {
        Self::new()
    }
}
