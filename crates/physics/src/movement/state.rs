//! Movement state, aerial state and input structures.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Flags describing the character's aerial state.
///
/// The empty set means grounded. `JUMPING` and `FALLING` are mutually
/// exclusive; use [`begin_jump`](Self::begin_jump),
/// [`begin_fall`](Self::begin_fall) and [`land`](Self::land) instead of
/// setting them directly so the exclusion holds by construction.
/// `SPINNING` is orthogonal and may combine with either.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpFlags(pub u8);

impl JumpFlags {
    /// Rising phase of a jump.
    pub const JUMPING: u8 = 1 << 0;

    /// Dropping, either off a ledge or past a jump's peak.
    pub const FALLING: u8 = 1 << 1;

    /// Spin jump modifier; cosmetic plus gameplay gating for air jumps.
    pub const SPINNING: u8 = 1 << 2;

    /// Check if a flag is set.
    #[inline]
    pub fn has(self, flag: u8) -> bool {
        (self.0 & flag) != 0
    }

    /// Set or clear a flag.
    #[inline]
    pub fn set(&mut self, flag: u8, value: bool) {
        if value {
            self.0 |= flag;
        } else {
            self.0 &= !flag;
        }
    }

    /// Check if the character is on the ground (no aerial flags at all,
    /// spinning included).
    #[inline]
    pub fn grounded(self) -> bool {
        self.0 == 0
    }

    /// Check if the character is rising in a jump.
    #[inline]
    pub fn jumping(self) -> bool {
        self.has(Self::JUMPING)
    }

    /// Check if the character is falling.
    #[inline]
    pub fn falling(self) -> bool {
        self.has(Self::FALLING)
    }

    /// Check if the character is spinning.
    #[inline]
    pub fn spinning(self) -> bool {
        self.has(Self::SPINNING)
    }

    /// Check if the character is in the air at all.
    #[inline]
    pub fn airborne(self) -> bool {
        self.jumping() || self.falling()
    }

    /// Enter the rising phase, leaving the falling phase if it was active.
    #[inline]
    pub fn begin_jump(&mut self) {
        self.set(Self::JUMPING, true);
        self.set(Self::FALLING, false);
    }

    /// Enter the falling phase, leaving the rising phase if it was active.
    #[inline]
    pub fn begin_fall(&mut self) {
        self.set(Self::FALLING, true);
        self.set(Self::JUMPING, false);
    }

    /// Land: clears every aerial flag, spinning included.
    #[inline]
    pub fn land(&mut self) {
        self.0 = 0;
    }
}

/// Persistent movement state for one character.
///
/// `force` is the per-tick sum of applied forces; it is folded into
/// `momentum` and zeroed once per tick, so it always reads zero at the start
/// of a tick before new force is accumulated. `momentum` carries over
/// between ticks and is only changed by that fold, by slope redirection
/// during the sweep, and by explicit resets (landing, wall jumps).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementState {
    /// Position in world space (center of the collision box).
    pub position: Vec3,

    /// Per-tick sum of applied forces; zeroed after the momentum fold.
    pub force: Vec3,

    /// Velocity-like vector carried across ticks.
    pub momentum: Vec3,

    /// Scales deceleration: 1 on the ground, `air_friction` in the air.
    pub deceleration_modifier: f32,

    /// Remaining seconds of reduced control input after a wall jump.
    pub reduced_input_duration: f32,

    /// Whether control input can move the character along Z.
    pub can_move_z: bool,

    /// Whether control input drives this character at all.
    pub player_controlled: bool,
}

impl Default for MovementState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            force: Vec3::ZERO,
            momentum: Vec3::ZERO,
            deceleration_modifier: 1.0,
            reduced_input_duration: 0.0,
            can_move_z: true,
            player_controlled: true,
        }
    }
}

impl MovementState {
    /// Create a new movement state at the given position.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Current horizontal speed.
    pub fn horizontal_speed(&self) -> f32 {
        Vec3::new(self.momentum.x, 0.0, self.momentum.z).length()
    }

    /// Check if the character carries any momentum.
    pub fn is_moving(&self) -> bool {
        self.momentum.length_squared() > 0.0
    }
}

/// Aerial state for one jump-capable character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AerialState {
    /// Current jump/fall/spin flags.
    pub flags: JumpFlags,

    /// Jumps taken since last grounded; resets to 0 only on landing.
    pub current_jump: u8,

    /// Seconds the current jump has been rising.
    pub jump_duration: f32,

    /// Remaining seconds during which a recent wall contact still permits
    /// a wall jump. Positive only within the buffer window of a contact.
    pub wall_jump_buffer: f32,

    /// Wall jumps taken since last grounded (tracked only when capped).
    pub wall_jumps_used: u8,

    /// Inward direction of the most recently grabbed wall.
    pub wall_jump_direction: Vec3,

    /// Horizontal direction of the current jump; drives the spin animator.
    pub jump_direction: Vec3,
}

impl Default for AerialState {
    fn default() -> Self {
        Self {
            flags: JumpFlags::default(),
            current_jump: 0,
            jump_duration: 0.0,
            wall_jump_buffer: 0.0,
            wall_jumps_used: 0,
            wall_jump_direction: Vec3::ZERO,
            jump_direction: Vec3::X,
        }
    }
}

impl AerialState {
    /// Create a fresh grounded aerial state.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Control input for a single tick.
///
/// Held booleans are sampled once per tick; `jump_pressed` is an
/// edge-triggered signal (true only on the tick the jump action went down).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlInput {
    pub move_left: bool,
    pub move_right: bool,
    pub move_forward: bool,
    pub move_backward: bool,
    pub jump_held: bool,
    pub jump_pressed: bool,
}

impl ControlInput {
    /// Check if any movement direction is held.
    pub fn has_movement(&self) -> bool {
        self.move_left || self.move_right || self.move_forward || self.move_backward
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_flags_exclusion() {
        let mut flags = JumpFlags::default();
        assert!(flags.grounded());

        flags.begin_jump();
        assert!(flags.jumping());
        assert!(!flags.falling());

        flags.begin_fall();
        assert!(flags.falling());
        assert!(!flags.jumping());

        flags.begin_jump();
        assert!(flags.jumping());
        assert!(!flags.falling());
    }

    #[test]
    fn test_spinning_is_orthogonal() {
        let mut flags = JumpFlags::default();
        flags.begin_jump();
        flags.set(JumpFlags::SPINNING, true);

        assert!(flags.jumping() && flags.spinning());

        flags.begin_fall();
        assert!(flags.falling() && flags.spinning());
    }

    #[test]
    fn test_land_clears_everything() {
        let mut flags = JumpFlags::default();
        flags.begin_fall();
        flags.set(JumpFlags::SPINNING, true);

        flags.land();
        assert!(flags.grounded());
        assert!(!flags.spinning());
    }

    #[test]
    fn test_movement_state_defaults() {
        let state = MovementState::new(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(state.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(state.force, Vec3::ZERO);
        assert_eq!(state.momentum, Vec3::ZERO);
        assert!(!state.is_moving());
    }
}
