//! Hopper Game Logic
//!
//! The game-side shell around the physics core:
//!
//! - Input sampling, action bindings and conversion to control input
//! - Player entities owning their movement and aerial state
//! - Level geometry and spawn points
//! - A deterministic fixed-timestep simulation loop
//! - The cosmetic spin animator reading jump state
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       Simulation                          │
//! │  ┌─────────┐    ┌────────────┐    ┌───────────────────┐  │
//! │  │ Input   │───►│ Physics    │───►│ Players           │  │
//! │  │ frames  │    │ (movement, │    │ (position, aerial │  │
//! │  └─────────┘    │ collision) │    │  state per player)│  │
//! │                 └────────────┘    └───────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod animation;
pub mod input;
pub mod level;
pub mod player;
pub mod simulation;

// Re-export main types
pub use animation::SpinAnimator;
pub use input::{Bindings, Control, InputFrame, InputSampler};
pub use level::Level;
pub use player::Player;
pub use simulation::{Simulation, SimulationConfig};

// Re-export physics types for convenience
pub use hopper_physics::{
    AerialState, CharacterController, CollisionWorld, ContentFlags, ControlInput, JumpFlags,
    MovementConfig, MovementState,
};
