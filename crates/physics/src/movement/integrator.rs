//! Force accumulation and the per-tick momentum fold.
//!
//! Forces are summed into `force` over the tick (control input here,
//! jump/gravity rules in the aerial machine), folded into `momentum` once,
//! and the momentum is then swept against the world. Summing first lets
//! counter-acting forces cancel before any geometry work happens.

use glam::Vec3;

use crate::collision::CollisionWorld;

use super::config::MovementConfig;
use super::state::{ControlInput, MovementState};
use super::sweep::{self, Sweep};

/// Derive this tick's control force from held directional input.
///
/// Per axis: accelerate while the direction is held and the momentum in
/// that direction has not reached the controlled max; otherwise decelerate
/// toward zero, with the last step clamped to exactly cancel the remaining
/// momentum rather than overshoot. Z movement is gated by `can_move_z`.
///
/// During the post-wall-jump window the whole control force is scaled by
/// `reduced_input_factor` and the window counts down.
pub fn accumulate_control_force(
    state: &mut MovementState,
    config: &MovementConfig,
    input: &ControlInput,
    dt: f32,
) {
    if !state.player_controlled {
        return;
    }

    let acceleration = config.acceleration();
    let deceleration = config.deceleration(state.deceleration_modifier);
    let max_speed = config.max_controlled_horizontal_speed();

    let mut control = Vec3::ZERO;

    if input.move_left {
        if -state.momentum.x < max_speed {
            control.x -= acceleration;
        }
    } else if state.momentum.x < 0.0 {
        if -state.momentum.x < deceleration {
            control.x = -state.momentum.x;
        } else {
            control.x += deceleration;
        }
    }
    if input.move_right {
        if state.momentum.x < max_speed {
            control.x += acceleration;
        }
    } else if state.momentum.x > 0.0 {
        if state.momentum.x < deceleration {
            control.x = -state.momentum.x;
        } else {
            control.x -= deceleration;
        }
    }

    if state.can_move_z {
        if input.move_backward {
            if -state.momentum.z < max_speed {
                control.z -= acceleration;
            }
        } else if state.momentum.z < 0.0 {
            if -state.momentum.z < deceleration {
                control.z = -state.momentum.z;
            } else {
                control.z += deceleration;
            }
        }
        if input.move_forward {
            if state.momentum.z < max_speed {
                control.z += acceleration;
            }
        } else if state.momentum.z > 0.0 {
            if state.momentum.z < deceleration {
                control.z = -state.momentum.z;
            } else {
                control.z -= deceleration;
            }
        }
    }

    if state.reduced_input_duration > 0.0 {
        state.force += control * config.reduced_input_factor;
        state.reduced_input_duration -= dt;
    } else {
        state.force += control;
    }
}

/// Fold accumulated force into momentum, then sweep the momentum against
/// the world and apply the realized displacement to the position.
///
/// Returns the sweep, or `None` when momentum is zero (a valid steady
/// state: nothing moved, no geometry was queried).
pub fn integrate_and_move(
    state: &mut MovementState,
    config: &MovementConfig,
    world: &CollisionWorld,
    dt: f32,
) -> Option<Sweep> {
    if state.force.length_squared() != 0.0 {
        state.momentum += state.force;
        state.force = Vec3::ZERO;
    }

    if state.momentum.length_squared() == 0.0 {
        return None;
    }

    let result = sweep::resolve(world, config, state.position, state.momentum, dt);
    state.position += result.displacement;
    Some(result)
}
