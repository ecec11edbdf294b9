//! Movement configuration constants.
//!
//! All tuning parameters for one character archetype are grouped here.
//! Several quantities are derived from `acceleration_multiplier` so a single
//! knob scales the whole feel of a character; those are exposed as methods.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Configuration for character movement and jumping.
///
/// Distances are world units, durations seconds, angles degrees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementConfig {
    // ========================================================================
    // Body
    // ========================================================================
    /// Half-size of the character's collision box in each axis.
    pub half_extents: Vec3,

    /// Mass, for being pushed and pushing back. Not used by self-movement.
    pub mass: f32,

    // ========================================================================
    // Horizontal control
    // ========================================================================
    /// Single knob most speed quantities derive from.
    pub acceleration_multiplier: f32,

    /// Factor applied to control force during the post-wall-jump window.
    pub reduced_input_factor: f32,

    /// Deceleration modifier while airborne. 0 keeps momentum in the air.
    pub air_friction: f32,

    // ========================================================================
    // Slopes
    // ========================================================================
    /// Surfaces within this many degrees of flat can be walked up.
    pub climbing_degrees: f32,

    /// Surfaces at least this steep (from vertical band edges) make a
    /// falling character slide. Between `climbing_degrees` and this lies
    /// the dead zone where motion simply stops.
    pub falling_degrees: f32,

    // ========================================================================
    // Jumping
    // ========================================================================
    /// Number of jumps permitted before landing again (ground jump + air jumps).
    pub jump_count: u8,

    /// Max duration of the first, full-power jump.
    pub max_jump_duration: f32,

    /// Max duration of each air jump; a boost rather than a second full jump.
    pub second_jump_duration: f32,

    /// Minimum rise time, so a tapped jump is not just a couple of pixels.
    pub minimum_jump_duration: f32,

    /// How much of the current vertical momentum an air jump cancels.
    /// 1.0 fully resets the fall, 0.0 only adds the jump force on top.
    pub second_jump_momentum_cancel_factor: f32,

    /// Whether jumps with horizontal momentum enter the spinning state.
    pub allow_spin_jump: bool,

    /// Whether air jumps beyond the first require the spinning state.
    pub air_jumps_require_spin: bool,

    // ========================================================================
    // Wall jumps
    // ========================================================================
    /// Master switch for wall jumping.
    pub allow_wall_jumps: bool,

    /// Cap on consecutive wall jumps before landing. `None` is unlimited.
    pub max_wall_jumps: Option<u8>,

    /// Jump budget restored on a wall jump. The jump counter is incremented
    /// right after, so 0 here grants the air jumps back.
    pub wall_jump_restore_jump_count: u8,

    /// Seconds after touching a grabbable wall during which a jump still
    /// counts as a wall jump.
    pub wall_jump_buffer_duration: f32,

    /// If true, wall jumps require momentum pushing away from the wall
    /// (compared by sign only, not magnitude).
    pub wall_jumps_need_opposite_direction: bool,

    /// Seconds of reduced control input after a wall jump, so the jump arc
    /// cannot be instantly steered back into the wall.
    pub wall_jump_input_reduction: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            half_extents: Vec3::splat(0.5),
            mass: 1.0,

            acceleration_multiplier: 4.0,
            reduced_input_factor: 0.0,
            air_friction: 0.0,

            // Equal thresholds leave no dead zone between climbing and
            // sliding; split them to get a band of surfaces that do neither.
            climbing_degrees: 45.0,
            falling_degrees: 45.0,

            jump_count: 1,
            max_jump_duration: 1.0,
            second_jump_duration: 0.5,
            minimum_jump_duration: 0.25,
            second_jump_momentum_cancel_factor: 0.9,
            allow_spin_jump: true,
            air_jumps_require_spin: false,

            allow_wall_jumps: true,
            max_wall_jumps: None,
            wall_jump_restore_jump_count: 0,
            wall_jump_buffer_duration: 0.2,
            wall_jumps_need_opposite_direction: false,
            wall_jump_input_reduction: 0.2,
        }
    }
}

impl MovementConfig {
    /// Create a config tuned for a double-jumping platformer hero.
    pub fn double_jumper() -> Self {
        Self {
            jump_count: 2,
            ..Default::default()
        }
    }

    /// Create a "space jump" config: unlimited-feeling air jumps that must
    /// be spun into, with wall jumps requiring a push away from the wall.
    pub fn spin_jumper() -> Self {
        Self {
            jump_count: 2,
            air_jumps_require_spin: true,
            wall_jumps_need_opposite_direction: true,
            ..Default::default()
        }
    }

    /// Acceleration applied per tick while a direction is held.
    #[inline]
    pub fn acceleration(&self) -> f32 {
        self.acceleration_multiplier
    }

    /// Deceleration applied per tick toward zero when no direction is held,
    /// scaled by the character's current deceleration modifier (full on the
    /// ground, `air_friction` while airborne).
    #[inline]
    pub fn deceleration(&self, modifier: f32) -> f32 {
        self.acceleration_multiplier * 2.0 * modifier
    }

    /// Max speed the character can push itself to horizontally.
    #[inline]
    pub fn max_controlled_horizontal_speed(&self) -> f32 {
        self.acceleration_multiplier * 4.0
    }

    /// Terminal downward speed approached in free fall.
    #[inline]
    pub fn free_fall_speed(&self) -> f32 {
        self.acceleration_multiplier * 4.0
    }

    /// Vertical force added when a jump starts.
    #[inline]
    pub fn jump_speed(&self) -> f32 {
        self.acceleration_multiplier * 4.0
    }

    /// Downward decay applied per second while a jump sustains, bleeding
    /// the jump force off over `max_jump_duration`.
    #[inline]
    pub fn jump_decay(&self) -> f32 {
        self.jump_speed() / self.max_jump_duration
    }

    /// Outward push applied along the wall normal on a wall jump.
    #[inline]
    pub fn wall_jump_push_back(&self) -> f32 {
        self.acceleration() * 2.0
    }

    /// Whether a surface at `angle` degrees from vertical is walkable.
    #[inline]
    pub fn is_walkable_angle(&self, angle: f32) -> bool {
        angle <= self.climbing_degrees % 180.0 || angle >= 180.0 - self.climbing_degrees % 180.0
    }

    /// Whether a surface at `angle` degrees from vertical counts as a wall
    /// (steep enough to slide on, grabbable for wall jumps).
    #[inline]
    pub fn is_wall_angle(&self, angle: f32) -> bool {
        angle >= self.falling_degrees % 180.0 && angle <= 180.0 - self.falling_degrees % 180.0
    }
}
