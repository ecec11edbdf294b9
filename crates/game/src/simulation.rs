//! Game simulation - the main game loop.
//!
//! A deterministic fixed-timestep simulation: every tick, each player's
//! sampled input is fed through the character controller against the
//! level's collision world. Running the same inputs against the same level
//! always reproduces the same positions.

use glam::Vec3;
use hopper_physics::{CharacterController, MovementConfig};
use serde::{Deserialize, Serialize};

use crate::input::InputFrame;
use crate::level::Level;
use crate::player::{EntityId, Player};

/// Game simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Simulation tick rate (ticks per second).
    pub tick_rate: u32,

    /// Movement physics configuration.
    pub movement: MovementConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            movement: MovementConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Get the time step per tick in seconds.
    pub fn delta_time(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }
}

/// The main game simulation.
///
/// Owns the level, the players and the movement controller, and advances
/// them one fixed tick at a time. Players are independent; the per-tick
/// iteration order only affects log interleaving, never physics.
#[derive(Debug)]
pub struct Simulation {
    /// Current tick number.
    pub frame: u64,

    /// Simulation configuration.
    pub config: SimulationConfig,

    /// Current level.
    pub level: Level,

    /// All players in the game.
    pub players: Vec<Player>,

    /// Movement physics controller shared by all players.
    controller: CharacterController,

    /// Next entity ID to assign.
    next_entity_id: EntityId,
}

impl Simulation {
    /// Create a new simulation with the given configuration and level.
    pub fn new(config: SimulationConfig, level: Level) -> Self {
        let controller = CharacterController::new(config.movement.clone());

        Self {
            frame: 0,
            config,
            level,
            players: Vec::new(),
            controller,
            next_entity_id: 1,
        }
    }

    /// Create a simulation with default configuration and the test course.
    pub fn test() -> Self {
        Self::new(SimulationConfig::default(), Level::test_course())
    }

    /// Add a player to the simulation.
    ///
    /// Returns the player's ID.
    pub fn add_player(&mut self, name: &str) -> EntityId {
        let id = self.next_entity_id;
        self.next_entity_id += 1;

        let spawn_index = self.players.len() % self.level.player_spawn_count().max(1);
        let position = self
            .level
            .get_player_spawn(spawn_index)
            .map(|s| s.position)
            .unwrap_or(Vec3::ZERO);

        log::debug!("player {} '{}' spawned at {:?}", id, name, position);
        self.players.push(Player::new(id, name.to_string(), position));
        id
    }

    /// Remove a player from the simulation.
    pub fn remove_player(&mut self, player_id: EntityId) {
        self.players.retain(|p| p.id != player_id);
    }

    /// Get a player by ID.
    pub fn get_player(&self, player_id: EntityId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    /// Get a mutable reference to a player by ID.
    pub fn get_player_mut(&mut self, player_id: EntityId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == player_id)
    }

    /// Advance the simulation by one tick.
    ///
    /// # Arguments
    ///
    /// * `inputs` - Player inputs indexed by player position in the
    ///   `players` array; missing entries default to no input
    pub fn tick(&mut self, inputs: &[InputFrame]) {
        let dt = self.config.delta_time();

        for (i, player) in self.players.iter_mut().enumerate() {
            let input = inputs.get(i).copied().unwrap_or_default();

            self.controller.update(
                &mut player.movement,
                &mut player.aerial,
                &input.to_control_input(),
                &self.level.collision,
                dt,
            );
        }

        self.frame += 1;
    }

    /// Get the delta time for this simulation.
    pub fn delta_time(&self) -> f32 {
        self.config.delta_time()
    }
}

// ============================================================================
// Tests
// ============================================================================
