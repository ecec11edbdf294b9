//! Aerial state machine: jumping, falling, spinning and wall jumps.
//!
//! Built on top of the integrator and the sweep. Before the move it turns
//! jump input into forces and advances the rise/fall flags; after the move
//! it reclassifies the character against the contacted geometry and runs
//! the wall-detection probes that arm wall jumps.

use glam::Vec3;

use crate::collision::CollisionWorld;
use crate::math;

use super::config::MovementConfig;
use super::state::{AerialState, ControlInput, JumpFlags, MovementState};
use super::sweep::{self, Sweep};

/// Pre-move rules, in precedence order: jump trigger, jump sustain/decay,
/// free fall, wall-jump buffer decay.
pub fn pre_move(
    state: &mut MovementState,
    aerial: &mut AerialState,
    config: &MovementConfig,
    input: &ControlInput,
    dt: f32,
) {
    if state.player_controlled {
        try_jump(state, aerial, config, input);
    }

    sustain_jump(state, aerial, config, input, dt);

    // Fall toward terminal speed whenever not rising.
    if !aerial.flags.jumping() && -state.momentum.y < config.free_fall_speed() {
        state.force.y -= config.free_fall_speed() + state.momentum.y;
        state.deceleration_modifier = config.air_friction;
    }

    if aerial.wall_jump_buffer > 0.0 {
        aerial.wall_jump_buffer -= dt;
    }
}

/// Post-move rules: reclassify grounded/falling from the sweep, then probe
/// for walls while airborne.
pub fn post_move(
    state: &mut MovementState,
    aerial: &mut AerialState,
    config: &MovementConfig,
    world: &CollisionWorld,
    sweep: Option<&Sweep>,
    dt: f32,
) {
    if let Some(sweep) = sweep {
        reclassify(state, aerial, config, sweep);
    }

    // Wall jumps only arm in the air; there is no wall jumping off the ground.
    if config.allow_wall_jumps && aerial.flags.airborne() {
        detect_walls(state, aerial, config, world, dt);
    }
}

/// Jump trigger. Fires on the jump edge when not already rising, spending
/// either the air-jump budget or a buffered wall contact.
fn try_jump(
    state: &mut MovementState,
    aerial: &mut AerialState,
    config: &MovementConfig,
    input: &ControlInput,
) {
    if !input.jump_pressed || aerial.flags.jumping() {
        return;
    }

    let budget_jump_ok = aerial.current_jump < config.jump_count
        && (aerial.current_jump == 0
            || !config.air_jumps_require_spin
            || aerial.flags.spinning());

    // The sign product check gives "momentum opposes the wall" without any
    // magnitude handling; near-zero momentum does not count as opposing.
    let wall_jump_ok = config.allow_wall_jumps
        && config
            .max_wall_jumps
            .map_or(true, |max| aerial.wall_jumps_used < max)
        && aerial.wall_jump_buffer > 0.0
        && (!config.wall_jumps_need_opposite_direction
            || state.momentum.x * aerial.wall_jump_direction.x < 0.0
            || state.momentum.z * aerial.wall_jump_direction.z < 0.0);

    if !budget_jump_ok && !wall_jump_ok {
        return;
    }

    // A ground jump taken while already falling still spends a jump credit:
    // the budget is "ground jump" plus bonus air jumps.
    if aerial.current_jump == 0 && aerial.flags.falling() {
        aerial.current_jump += 1;
    }

    if aerial.wall_jump_buffer > 0.0 && state.reduced_input_duration <= 0.0 {
        wall_jump(state, aerial, config);
    }

    if aerial.current_jump > 0 {
        // Air jump: dampen the current vertical motion instead of fully
        // resetting it, so a double jump is not a double-height jump.
        if config.second_jump_momentum_cancel_factor != 0.0 {
            state.momentum.y -= state.momentum.y * config.second_jump_momentum_cancel_factor;
            state.force.y -= state.force.y * config.second_jump_momentum_cancel_factor;
        }
    } else {
        if state.momentum.y < 0.0 {
            state.momentum.y = 0.0;
        }
        enter_spin(aerial, config, state.momentum.x);
    }

    aerial.flags.begin_jump();
    state.deceleration_modifier = config.air_friction;
    aerial.jump_duration = 0.0;
    aerial.current_jump += 1;
    state.force.y += config.jump_speed();

    log::debug!(
        "jump {} of {} (wall buffer {:.3})",
        aerial.current_jump,
        config.jump_count,
        aerial.wall_jump_buffer
    );
}

/// The wall-jump branch of the trigger: restore the jump budget, kick away
/// from the wall and open the reduced-input window.
fn wall_jump(state: &mut MovementState, aerial: &mut AerialState, config: &MovementConfig) {
    aerial.current_jump = config.wall_jump_restore_jump_count;
    aerial.wall_jump_buffer = 0.0;

    // Reflect momentum off the wall plane, component-wise against the
    // stored inward direction.
    let wall = aerial.wall_jump_direction;
    state.momentum.x -= state.momentum.x.abs() * wall.x;
    state.momentum.y -= state.momentum.y.abs() * wall.y;
    state.momentum.z -= state.momentum.z.abs() * wall.z;

    state.force.x -= config.wall_jump_push_back() * wall.x;
    state.force.z -= config.wall_jump_push_back() * wall.z;

    state.reduced_input_duration += config.wall_jump_input_reduction;

    if config.max_wall_jumps.is_some() {
        aerial.wall_jumps_used += 1;
    }

    enter_spin(aerial, config, state.momentum.x);
}

/// Enter the spinning state if spin jumps are allowed and there is
/// horizontal momentum to take the spin direction from.
fn enter_spin(aerial: &mut AerialState, config: &MovementConfig, momentum_x: f32) {
    if config.allow_spin_jump && momentum_x != 0.0 {
        aerial.flags.set(JumpFlags::SPINNING, true);
        aerial.jump_direction = if momentum_x < 0.0 { -Vec3::X } else { Vec3::X };
    }
}

/// Jump sustain: keep rising while under the duration cap and the jump is
/// still wanted (or the minimum duration has not elapsed), then tip over
/// into falling.
fn sustain_jump(
    state: &mut MovementState,
    aerial: &mut AerialState,
    config: &MovementConfig,
    input: &ControlInput,
    dt: f32,
) {
    if !aerial.flags.jumping() {
        return;
    }

    // Air jumps get the shorter cap; only the ground-powered first jump
    // rises for the full duration.
    let duration_cap = if aerial.current_jump <= 1 {
        config.max_jump_duration
    } else {
        config.second_jump_duration
    };

    let wants_rise = aerial.jump_duration < config.minimum_jump_duration
        || (state.player_controlled && input.jump_held);

    if aerial.jump_duration < duration_cap && wants_rise {
        aerial.jump_duration += dt;
        state.force.y -= dt * config.jump_decay();
        state.deceleration_modifier = config.air_friction;
    } else {
        aerial.flags.begin_fall();
        state.deceleration_modifier = config.air_friction;
    }
}

/// Reclassify against the sweep result: landing on a walkable surface (or
/// failing to move vertically at all) grounds a downward-moving character
/// and tips an upward-moving one into falling.
fn reclassify(
    state: &mut MovementState,
    aerial: &mut AerialState,
    config: &MovementConfig,
    sweep: &Sweep,
) {
    let on_walkable = sweep
        .slope_degrees
        .is_some_and(|angle| config.is_walkable_angle(angle));

    if on_walkable || sweep.displacement.y == 0.0 {
        if state.momentum.y <= 0.0 {
            aerial.flags.land();
            state.deceleration_modifier = 1.0;
            aerial.current_jump = 0;
            state.momentum.y = 0.0;
            aerial.wall_jumps_used = 0;
        } else {
            aerial.flags.begin_fall();
        }
    }
}

/// Probe sideways for grabbable walls, only in directions momentum is not
/// already pushing away from. Contacts steep enough to count as walls arm
/// the wall-jump buffer and record the inward direction.
fn detect_walls(
    state: &mut MovementState,
    aerial: &mut AerialState,
    config: &MovementConfig,
    world: &CollisionWorld,
    dt: f32,
) {
    let mut contacts = Vec::new();
    let position = state.position;

    if state.momentum.x <= 0.0 {
        contacts.extend(sweep::probe_axis(world, config, position, -Vec3::X, dt).contacts);
    }
    if state.momentum.x >= 0.0 {
        contacts.extend(sweep::probe_axis(world, config, position, Vec3::X, dt).contacts);
    }
    if state.momentum.z <= 0.0 {
        contacts.extend(sweep::probe_axis(world, config, position, -Vec3::Z, dt).contacts);
    }
    if state.momentum.z >= 0.0 {
        contacts.extend(sweep::probe_axis(world, config, position, Vec3::Z, dt).contacts);
    }

    let wall_normals: Vec<Vec3> = contacts
        .iter()
        .filter(|c| config.is_wall_angle(math::angle_from_vertical_degrees(c.normal)))
        .map(|c| c.normal)
        .collect();

    if !wall_normals.is_empty() {
        aerial.wall_jump_buffer = config.wall_jump_buffer_duration;
        aerial.wall_jump_direction = -math::average(&wall_normals).normalize_or_zero();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn jump_press() -> ControlInput {
        ControlInput {
            jump_pressed: true,
            jump_held: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_first_jump_from_ground() {
        let mut state = MovementState::default();
        let mut aerial = AerialState::new();
        let config = MovementConfig::default();

        try_jump(&mut state, &mut aerial, &config, &jump_press());

        assert!(aerial.flags.jumping());
        assert_eq!(aerial.current_jump, 1);
        assert_eq!(state.force.y, config.jump_speed());
        assert_eq!(aerial.jump_duration, 0.0);
    }

    #[test]
    fn test_no_jump_without_edge() {
        let mut state = MovementState::default();
        let mut aerial = AerialState::new();
        let config = MovementConfig::default();

        let held_only = ControlInput {
            jump_held: true,
            ..Default::default()
        };
        try_jump(&mut state, &mut aerial, &config, &held_only);

        assert!(aerial.flags.grounded());
        assert_eq!(aerial.current_jump, 0);
    }

    #[test]
    fn test_no_jump_while_rising() {
        let mut state = MovementState::default();
        let mut aerial = AerialState::new();
        let config = MovementConfig::double_jumper();

        try_jump(&mut state, &mut aerial, &config, &jump_press());
        assert_eq!(aerial.current_jump, 1);

        // Still rising: the second press must not fire.
        try_jump(&mut state, &mut aerial, &config, &jump_press());
        assert_eq!(aerial.current_jump, 1);
    }

    #[test]
    fn test_budget_exhausted() {
        let mut state = MovementState::default();
        let mut aerial = AerialState::new();
        let config = MovementConfig::default(); // jump_count = 1

        aerial.current_jump = 1;
        aerial.flags.begin_fall();

        try_jump(&mut state, &mut aerial, &config, &jump_press());

        assert!(!aerial.flags.jumping());
        assert_eq!(aerial.current_jump, 1);
    }

    #[test]
    fn test_ground_jump_taken_airborne_spends_a_credit() {
        let mut state = MovementState::default();
        let mut aerial = AerialState::new();
        let config = MovementConfig::default();

        // Walked off a ledge: falling with the full budget.
        aerial.flags.begin_fall();
        state.momentum.y = -3.0;

        try_jump(&mut state, &mut aerial, &config, &jump_press());

        // The implicit credit plus the jump itself.
        assert_eq!(aerial.current_jump, 2);
        assert!(aerial.flags.jumping());
        assert!(!aerial.flags.falling());
        // Counted as an air jump: the fall is dampened, not zeroed.
        let expected = -3.0 - (-3.0) * config.second_jump_momentum_cancel_factor;
        assert!((state.momentum.y - expected).abs() < 1.0e-5);
    }

    #[test]
    fn test_air_jump_partially_cancels_fall() {
        let mut state = MovementState::default();
        let mut aerial = AerialState::new();
        let config = MovementConfig::double_jumper();

        aerial.current_jump = 1;
        aerial.flags.begin_fall();
        state.momentum.y = -10.0;

        try_jump(&mut state, &mut aerial, &config, &jump_press());

        assert_eq!(aerial.current_jump, 2);
        // 90% of the fall cancelled, not all of it.
        assert!((state.momentum.y - (-1.0)).abs() < 1.0e-4);
    }

    #[test]
    fn test_first_jump_clamps_downward_momentum() {
        let mut state = MovementState::default();
        let mut aerial = AerialState::new();
        let config = MovementConfig::default();

        state.momentum.y = -5.0;
        try_jump(&mut state, &mut aerial, &config, &jump_press());

        assert_eq!(state.momentum.y, 0.0);
    }

    #[test]
    fn test_spin_jump_takes_direction_from_momentum() {
        let mut state = MovementState::default();
        let mut aerial = AerialState::new();
        let config = MovementConfig::default();

        state.momentum.x = -2.0;
        try_jump(&mut state, &mut aerial, &config, &jump_press());

        assert!(aerial.flags.spinning());
        assert_eq!(aerial.jump_direction, -Vec3::X);
    }

    #[test]
    fn test_air_jumps_can_require_spin() {
        let mut state = MovementState::default();
        let mut aerial = AerialState::new();
        let config = MovementConfig {
            jump_count: 2,
            air_jumps_require_spin: true,
            allow_spin_jump: false,
            allow_wall_jumps: false,
            ..Default::default()
        };

        aerial.current_jump = 1;
        aerial.flags.begin_fall();

        // Not spinning: the air jump is refused.
        try_jump(&mut state, &mut aerial, &config, &jump_press());
        assert_eq!(aerial.current_jump, 1);

        // Spinning: allowed.
        aerial.flags.set(JumpFlags::SPINNING, true);
        try_jump(&mut state, &mut aerial, &config, &jump_press());
        assert_eq!(aerial.current_jump, 2);
    }

    #[test]
    fn test_wall_jump_restores_budget_and_pushes_away() {
        let mut state = MovementState::default();
        let mut aerial = AerialState::new();
        let config = MovementConfig::default();

        // Airborne with the budget spent, falling against a wall to the +X.
        aerial.current_jump = 1;
        aerial.flags.begin_fall();
        aerial.wall_jump_buffer = 0.1;
        aerial.wall_jump_direction = Vec3::X;
        state.momentum = Vec3::new(2.0, -4.0, 0.0);

        try_jump(&mut state, &mut aerial, &config, &jump_press());

        assert!(aerial.flags.jumping());
        // Budget restored to wall_jump_restore_jump_count, then incremented.
        assert_eq!(aerial.current_jump, config.wall_jump_restore_jump_count + 1);
        assert_eq!(aerial.wall_jump_buffer, 0.0);
        // Momentum into the wall was reflected away from it.
        assert!(state.momentum.x <= 0.0);
        // Pushed off the wall and input-dampened.
        assert!(state.force.x < 0.0);
        assert!((state.reduced_input_duration - config.wall_jump_input_reduction).abs() < 1.0e-6);
    }

    #[test]
    fn test_wall_jump_respects_cap() {
        let mut state = MovementState::default();
        let mut aerial = AerialState::new();
        let config = MovementConfig {
            jump_count: 0,
            max_wall_jumps: Some(1),
            ..Default::default()
        };

        aerial.flags.begin_fall();
        aerial.current_jump = 0;
        aerial.wall_jump_buffer = 0.1;
        aerial.wall_jump_direction = Vec3::X;

        // current_jump == 0 and falling spends the implicit credit, so only
        // the wall branch can grant this jump.
        try_jump(&mut state, &mut aerial, &config, &jump_press());
        assert!(aerial.flags.jumping());
        assert_eq!(aerial.wall_jumps_used, 1);

        // Cap reached: a second buffered wall contact is refused.
        aerial.flags.begin_fall();
        aerial.wall_jump_buffer = 0.1;
        aerial.current_jump = 1;
        try_jump(&mut state, &mut aerial, &config, &jump_press());
        assert!(!aerial.flags.jumping());
    }

    #[test]
    fn test_opposite_direction_gate() {
        let mut state = MovementState::default();
        let mut aerial = AerialState::new();
        let config = MovementConfig {
            jump_count: 0,
            wall_jumps_need_opposite_direction: true,
            ..Default::default()
        };

        aerial.flags.begin_fall();
        aerial.current_jump = 1;
        aerial.wall_jump_buffer = 0.1;
        aerial.wall_jump_direction = Vec3::X;

        // Momentum into the wall: not opposing, refused.
        state.momentum.x = 3.0;
        try_jump(&mut state, &mut aerial, &config, &jump_press());
        assert!(!aerial.flags.jumping());

        // Momentum away from the wall: sign product negative, allowed.
        state.momentum.x = -3.0;
        try_jump(&mut state, &mut aerial, &config, &jump_press());
        assert!(aerial.flags.jumping());

        // Zero momentum has a zero sign product: not opposing.
        aerial.flags.begin_fall();
        aerial.wall_jump_buffer = 0.1;
        aerial.current_jump = 1;
        state.momentum = Vec3::ZERO;
        try_jump(&mut state, &mut aerial, &config, &jump_press());
        assert!(!aerial.flags.jumping());
    }

    #[test]
    fn test_sustain_until_released_then_fall() {
        let mut state = MovementState::default();
        let mut aerial = AerialState::new();
        let config = MovementConfig::default();
        let dt = 0.05;

        try_jump(&mut state, &mut aerial, &config, &jump_press());

        // Held: rises, accruing duration and decay force.
        sustain_jump(&mut state, &mut aerial, &config, &jump_press(), dt);
        assert!(aerial.flags.jumping());
        assert_eq!(aerial.jump_duration, dt);
        assert!(state.force.y < config.jump_speed());

        // Released before the minimum: keeps rising anyway.
        let released = ControlInput::default();
        sustain_jump(&mut state, &mut aerial, &config, &released, dt);
        assert!(aerial.flags.jumping());

        // Past the minimum with the button released: tips into falling.
        aerial.jump_duration = config.minimum_jump_duration;
        sustain_jump(&mut state, &mut aerial, &config, &released, dt);
        assert!(aerial.flags.falling());
        assert!(!aerial.flags.jumping());
    }

    #[test]
    fn test_air_jump_uses_shorter_cap() {
        let mut state = MovementState::default();
        let mut aerial = AerialState::new();
        let config = MovementConfig::double_jumper();

        aerial.flags.begin_jump();
        aerial.current_jump = 2;
        aerial.jump_duration = config.second_jump_duration;

        sustain_jump(&mut state, &mut aerial, &config, &jump_press(), 0.05);
        assert!(aerial.flags.falling());
    }

    #[test]
    fn test_free_fall_approaches_terminal_speed() {
        let mut state = MovementState::default();
        let mut aerial = AerialState::new();
        let config = MovementConfig::default();

        pre_move(&mut state, &mut aerial, &config, &ControlInput::default(), 0.016);
        assert_eq!(state.force.y, -config.free_fall_speed());

        // At terminal speed no further force accrues.
        state.force = Vec3::ZERO;
        state.momentum.y = -config.free_fall_speed();
        pre_move(&mut state, &mut aerial, &config, &ControlInput::default(), 0.016);
        assert_eq!(state.force.y, 0.0);
    }

    #[test]
    fn test_wall_buffer_counts_down() {
        let mut state = MovementState {
            player_controlled: false,
            ..Default::default()
        };
        let mut aerial = AerialState::new();
        let config = MovementConfig::default();

        aerial.wall_jump_buffer = 0.1;
        pre_move(&mut state, &mut aerial, &config, &ControlInput::default(), 0.04);
        assert!((aerial.wall_jump_buffer - 0.06).abs() < 1.0e-6);
    }

    #[test]
    fn test_reclassify_lands_downward_mover() {
        let mut state = MovementState::default();
        let mut aerial = AerialState::new();
        let config = MovementConfig::default();

        aerial.flags.begin_fall();
        aerial.current_jump = 1;
        aerial.wall_jumps_used = 2;
        state.momentum.y = -3.0;
        state.deceleration_modifier = 0.0;

        let sweep = Sweep {
            displacement: Vec3::new(0.1, -0.05, 0.0),
            slope_degrees: Some(0.0),
            contacts: Vec::new(),
        };
        reclassify(&mut state, &mut aerial, &config, &sweep);

        assert!(aerial.flags.grounded());
        assert_eq!(aerial.current_jump, 0);
        assert_eq!(aerial.wall_jumps_used, 0);
        assert_eq!(state.momentum.y, 0.0);
        assert_eq!(state.deceleration_modifier, 1.0);
    }

    #[test]
    fn test_reclassify_keeps_upward_mover_airborne() {
        let mut state = MovementState::default();
        let mut aerial = AerialState::new();
        let config = MovementConfig::default();

        // Rising but vertically pinned (jumped under a ledge).
        aerial.flags.begin_jump();
        state.momentum.y = 2.0;

        let sweep = Sweep {
            displacement: Vec3::new(0.1, 0.0, 0.0),
            slope_degrees: None,
            contacts: Vec::new(),
        };
        reclassify(&mut state, &mut aerial, &config, &sweep);

        assert!(aerial.flags.falling());
        assert!(!aerial.flags.jumping());
    }

    #[test]
    fn test_reclassify_ignores_steep_contact_mid_fall() {
        let mut state = MovementState::default();
        let mut aerial = AerialState::new();
        let config = MovementConfig::default();

        aerial.flags.begin_fall();
        state.momentum.y = -3.0;

        // Graze along a wall while still descending.
        let sweep = Sweep {
            displacement: Vec3::new(0.0, -0.2, 0.0),
            slope_degrees: Some(90.0),
            contacts: Vec::new(),
        };
        reclassify(&mut state, &mut aerial, &config, &sweep);

        assert!(aerial.flags.falling());
        assert_eq!(state.momentum.y, -3.0);
    }
}
