//! Player entity and state.

use glam::Vec3;
use hopper_physics::{AerialState, MovementState};
use serde::{Deserialize, Serialize};

/// Unique identifier for entities.
pub type EntityId = u32;

/// A player in the game.
///
/// Each player exclusively owns its movement and aerial state, so players
/// are independent and can be ticked in any order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Unique player ID.
    pub id: EntityId,

    /// Player name/handle.
    pub name: String,

    /// Movement physics state.
    pub movement: MovementState,

    /// Jump/fall/wall-jump state.
    pub aerial: AerialState,
}

impl Player {
    /// Create a new player at the given spawn position.
    pub fn new(id: EntityId, name: String, spawn_position: Vec3) -> Self {
        Self {
            id,
            name,
            movement: MovementState::new(spawn_position),
            aerial: AerialState::new(),
        }
    }

    /// Get the player's current position.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.movement.position
    }

    /// Check if the player is standing on the ground.
    #[inline]
    pub fn on_ground(&self) -> bool {
        self.aerial.flags.grounded()
    }

    /// Check if the player is in the air.
    #[inline]
    pub fn airborne(&self) -> bool {
        self.aerial.flags.airborne()
    }

    /// Check if the player is spin jumping.
    #[inline]
    pub fn spinning(&self) -> bool {
        self.aerial.flags.spinning()
    }
}
