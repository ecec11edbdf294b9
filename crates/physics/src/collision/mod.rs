//! Collision queries against static level geometry.
//!
//! This module provides the scene query capability movement is built on:
//! a brush-based world answering ray and swept-box casts.
//!
//! # Key Types
//!
//! - [`CollisionWorld`]: the collision environment containing all geometry
//! - [`Contact`]: a single reported intersection
//! - [`ContentFlags`]: category bits deciding what obstructs movement
//!
//! # Query model
//!
//! Casts return *every* intersection they find, each with a distance, a
//! unit surface normal, and the brush's content category. The movement
//! resolver filters to solid contacts and orders them by distance itself;
//! non-solid contacts pass through so callers can reuse them (wall
//! detection does).

mod contact;
mod flags;
mod world;

pub use contact::Contact;
pub use flags::ContentFlags;
pub use world::{CollisionBrush, CollisionWorld};
