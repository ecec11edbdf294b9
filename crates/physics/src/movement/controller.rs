//! Character controller.
//!
//! The main entry point for character movement. One `update` call runs one
//! simulation tick in a fixed order: control force accumulation, aerial
//! pre-move rules, the momentum fold and collision sweep, then post-move
//! reclassification and wall detection. Everything completes synchronously
//! within the call; there is no engine-driven callback behind it.

use glam::Vec3;

use crate::collision::CollisionWorld;

use super::aerial;
use super::config::MovementConfig;
use super::integrator;
use super::state::{AerialState, ControlInput, MovementState};
use super::sweep::Sweep;

/// Drives one character's movement through the world.
///
/// Holds only configuration; all mutable state lives in the
/// [`MovementState`] / [`AerialState`] pair the caller owns. Several
/// characters can share one controller as long as each has its own state,
/// and characters are independent - an outer scheduler may tick them in
/// any order.
///
/// # Example
///
/// ```ignore
/// let controller = CharacterController::new(MovementConfig::default());
/// let mut state = MovementState::new(spawn_position);
/// let mut aerial = AerialState::new();
///
/// // Each tick:
/// controller.update(&mut state, &mut aerial, &input, &world, dt);
/// ```
#[derive(Debug, Clone)]
pub struct CharacterController {
    /// Movement configuration.
    pub config: MovementConfig,
}

impl CharacterController {
    /// Create a new controller with the given configuration.
    pub fn new(config: MovementConfig) -> Self {
        Self { config }
    }

    /// Create a controller with default configuration.
    pub fn with_default_config() -> Self {
        Self::new(MovementConfig::default())
    }

    /// Place a character at a spawn position with cleared motion.
    pub fn spawn_at(&self, state: &mut MovementState, aerial: &mut AerialState, position: Vec3) {
        state.position = position;
        state.force = Vec3::ZERO;
        state.momentum = Vec3::ZERO;
        state.deceleration_modifier = 1.0;
        state.reduced_input_duration = 0.0;
        *aerial = AerialState::new();
    }

    /// Advance one character by one tick.
    ///
    /// Returns the tick's sweep when the character moved, `None` when it
    /// stayed at rest. Ordering within the tick is strict: force
    /// accumulation, then the momentum fold and sweep, then state
    /// reclassification.
    pub fn update(
        &self,
        state: &mut MovementState,
        aerial: &mut AerialState,
        input: &ControlInput,
        world: &CollisionWorld,
        dt: f32,
    ) -> Option<Sweep> {
        integrator::accumulate_control_force(state, &self.config, input, dt);
        aerial::pre_move(state, aerial, &self.config, input, dt);

        let sweep = integrator::integrate_and_move(state, &self.config, world, dt);

        aerial::post_move(state, aerial, &self.config, world, sweep.as_ref(), dt);
        sweep
    }
}

// ============================================================================
// Tests
// ============================================================================
