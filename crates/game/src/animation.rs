//! Cosmetic spin rotation for a character's visual model.
//!
//! Reads the aerial state read-only and rotates a model around the axis
//! matching the jump direction while the spinning flag is set. The physics
//! core never looks at these angles.

use hopper_physics::AerialState;

/// Spin rate in degrees per second.
pub const SPIN_RATE_DEGREES: f32 = 180.0;

/// Accumulated model rotation driven by the spin state.
///
/// `roll_degrees` spins around the forward axis for jumps along X,
/// `pitch_degrees` around the side axis for jumps along Z. When the
/// character stops spinning the roll snaps back to zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpinAnimator {
    pub roll_degrees: f32,
    pub pitch_degrees: f32,
}

impl SpinAnimator {
    /// Create an animator at rest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the spin by one frame.
    pub fn update(&mut self, aerial: &AerialState, dt: f32) {
        if aerial.flags.spinning() {
            let step = SPIN_RATE_DEGREES * dt;
            let dir = aerial.jump_direction;

            if dir.x < 0.0 {
                self.roll_degrees += step;
            }
            if dir.x > 0.0 {
                self.roll_degrees -= step;
            }
            if dir.z < 0.0 {
                self.pitch_degrees += step;
            }
            if dir.z > 0.0 {
                self.pitch_degrees -= step;
            }
        } else if self.roll_degrees != 0.0 {
            self.roll_degrees = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use hopper_physics::JumpFlags;

    #[test]
    fn test_spin_advances_while_spinning() {
        let mut animator = SpinAnimator::new();
        let mut aerial = AerialState::new();
        aerial.flags.begin_jump();
        aerial.flags.set(JumpFlags::SPINNING, true);
        aerial.jump_direction = Vec3::X;

        animator.update(&aerial, 0.5);
        assert_eq!(animator.roll_degrees, -90.0);

        animator.update(&aerial, 0.5);
        assert_eq!(animator.roll_degrees, -180.0);
    }

    #[test]
    fn test_spin_direction_flips_sign() {
        let mut animator = SpinAnimator::new();
        let mut aerial = AerialState::new();
        aerial.flags.set(JumpFlags::SPINNING, true);
        aerial.jump_direction = -Vec3::X;

        animator.update(&aerial, 0.25);
        assert_eq!(animator.roll_degrees, 45.0);
    }

    #[test]
    fn test_roll_snaps_back_when_not_spinning() {
        let mut animator = SpinAnimator::new();
        let mut aerial = AerialState::new();
        aerial.flags.set(JumpFlags::SPINNING, true);
        aerial.jump_direction = Vec3::X;

        animator.update(&aerial, 0.5);
        assert!(animator.roll_degrees != 0.0);

        aerial.flags.land();
        animator.update(&aerial, 0.016);
        assert_eq!(animator.roll_degrees, 0.0);
    }
}
