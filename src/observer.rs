//! Step observer trait for monitoring the simulation pipeline.

/// Trait for observing pipeline stages of a simulation step.
///
/// Implement this trait to monitor solver progress (e.g., for debugging,
/// visualization, or timing individual stages). All methods have default
/// no-op implementations. Hooks fire at the stage boundaries of each frame;
/// per-cloth hooks fire once per cloth body.
pub trait StepObserver {
    /// Called after every animated rigid body has been moved to the new
    /// frame time, before any cloth stage runs.
    fn on_rigids_animated(&mut self) {}

    /// Called after external forces, damping, and position prediction have
    /// been applied to a cloth body.
    fn on_integrate(&mut self) {}

    /// Called after each constraint projection iteration (all color batches,
    /// pins, and the forward copy).
    fn on_constraint_iteration(&mut self, _iteration: usize) {}

    /// Called after collision constraint generation for a cloth body, with
    /// the number of active constraints produced.
    fn on_collisions_generated(&mut self, _active: usize) {}

    /// Called after collision constraints have been resolved against the
    /// predicted positions of a cloth body.
    fn on_collisions_resolved(&mut self) {}

    /// Called when a simulation step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
