//! Level loading and management.

use glam::Vec3;
use hopper_physics::{CollisionWorld, ContentFlags};
use serde::{Deserialize, Serialize};

/// A game level containing collision geometry and spawn points.
#[derive(Debug)]
pub struct Level {
    /// Level identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Collision world for physics.
    pub collision: CollisionWorld,

    /// Spawn points.
    pub spawn_points: Vec<SpawnPoint>,
}

/// A spawn point for players or checkpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// Position in world space (character center).
    pub position: Vec3,

    /// Spawn point type.
    pub spawn_type: SpawnType,
}

/// Types of spawn points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnType {
    /// Player start.
    Player,
    /// Mid-level checkpoint.
    Checkpoint,
}

impl Level {
    /// Create an empty level.
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            collision: CollisionWorld::new(),
            spawn_points: Vec::new(),
        }
    }

    /// Create a small platforming course for development and tests.
    ///
    /// Layout along +X from the spawn: a flat run-up, a platform at jump
    /// height, a climbable ramp, a steep slide, and a wall-jump chimney of
    /// two facing walls at the far end.
    pub fn test_course() -> Self {
        let mut level = Self::new("test_course", "Test Course");

        // Floor, top surface at y=0.
        level.collision.add_box(
            Vec3::new(0.0, -0.5, 0.0),
            Vec3::new(60.0, 0.5, 30.0),
            ContentFlags::SOLID,
        );

        // Boundary walls.
        let wall_height = 12.0;
        let wall_thickness = 0.5;
        for (center, half_extents) in [
            (
                Vec3::new(0.0, wall_height / 2.0, -30.0),
                Vec3::new(60.0, wall_height / 2.0, wall_thickness),
            ),
            (
                Vec3::new(0.0, wall_height / 2.0, 30.0),
                Vec3::new(60.0, wall_height / 2.0, wall_thickness),
            ),
            (
                Vec3::new(-60.0, wall_height / 2.0, 0.0),
                Vec3::new(wall_thickness, wall_height / 2.0, 30.0),
            ),
            (
                Vec3::new(60.0, wall_height / 2.0, 0.0),
                Vec3::new(wall_thickness, wall_height / 2.0, 30.0),
            ),
        ] {
            level.collision.add_box(center, half_extents, ContentFlags::SOLID);
        }

        // Low platform reachable with a single jump.
        level.collision.add_box(
            Vec3::new(8.0, 1.0, 0.0),
            Vec3::new(2.0, 1.0, 2.0),
            ContentFlags::SOLID,
        );

        // Higher platform for double jumps.
        level.collision.add_box(
            Vec3::new(14.0, 2.0, 0.0),
            Vec3::new(2.0, 2.0, 2.0),
            ContentFlags::SOLID,
        );

        // Climbable 30-degree ramp.
        let ramp_rise = 3.0;
        let ramp_run = ramp_rise / 30.0_f32.to_radians().tan();
        level
            .collision
            .add_ramp(
                Vec3::new(20.0, 0.0, 0.0),
                ramp_run,
                ramp_rise,
                6.0,
                ContentFlags::SOLID,
            )
            .expect("ramp hull");

        // Steep 70-degree slide, too steep to walk up.
        let slide_rise = 6.0;
        let slide_run = slide_rise / 70.0_f32.to_radians().tan();
        level
            .collision
            .add_ramp(
                Vec3::new(32.0, 0.0, 0.0),
                slide_run,
                slide_rise,
                6.0,
                ContentFlags::SOLID,
            )
            .expect("slide hull");

        // Wall-jump chimney: two facing walls 2.5 apart.
        level.collision.add_box(
            Vec3::new(42.0, 5.0, 0.0),
            Vec3::new(0.5, 5.0, 3.0),
            ContentFlags::SOLID,
        );
        level.collision.add_box(
            Vec3::new(45.5, 5.0, 0.0),
            Vec3::new(0.5, 5.0, 3.0),
            ContentFlags::SOLID,
        );

        // Spawns (character centers; the character box is 1x1x1).
        level.spawn_points.push(SpawnPoint {
            position: Vec3::new(0.0, 0.5, 0.0),
            spawn_type: SpawnType::Player,
        });
        level.spawn_points.push(SpawnPoint {
            position: Vec3::new(-3.0, 0.5, 0.0),
            spawn_type: SpawnType::Player,
        });
        level.spawn_points.push(SpawnPoint {
            position: Vec3::new(20.0, 0.5, 0.0),
            spawn_type: SpawnType::Checkpoint,
        });

        level
    }

    /// Get a player spawn point.
    pub fn get_player_spawn(&self, index: usize) -> Option<&SpawnPoint> {
        self.spawn_points
            .iter()
            .filter(|s| s.spawn_type == SpawnType::Player)
            .nth(index)
    }

    /// Get the number of player spawn points.
    pub fn player_spawn_count(&self) -> usize {
        self.spawn_points
            .iter()
            .filter(|s| s.spawn_type == SpawnType::Player)
            .count()
    }
}
