//! Hopper Physics
//!
//! A deterministic character movement and collision-resolution engine for
//! a 3D platformer, designed to be driven tick-by-tick by an outer
//! simulation loop.
//!
//! # Architecture
//!
//! The engine is split into two main systems:
//!
//! - **Collision**: casts rays and swept boxes through static level
//!   geometry, reporting every contact with distance, normal and category
//! - **Movement**: integrates forces into momentum, sweeps the momentum
//!   against the collision world, and runs the jump/fall/wall-jump state
//!   machine on the result
//!
//! # Design Principles
//!
//! 1. **Determinism**: same inputs always produce the same outputs
//! 2. **Bounded work**: every sweep runs a fixed maximum of steps; blocked
//!    diagonal motion splits into at most three single-axis sub-sweeps
//! 3. **No hidden failure**: degenerate inputs and exhausted iteration
//!    bounds resolve to "stay put", never to errors

pub mod collision;
pub mod math;
pub mod movement;

// Re-export commonly used types
pub use collision::{CollisionWorld, Contact, ContentFlags};
pub use movement::{
    AerialState, CharacterController, ControlInput, JumpFlags, MovementConfig, MovementState,
    Sweep,
};
