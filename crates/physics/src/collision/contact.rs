//! Contact records produced by collision casts.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::flags::ContentFlags;

/// A single intersection reported by a ray or swept-box cast.
///
/// Contacts are ephemeral: they are produced by one cast, consumed within
/// the same simulation tick, and never persisted. Casts report *every*
/// intersection, not just the nearest - filtering by category and ordering
/// by distance is the caller's job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// World-space unit normal of the contacted surface, oriented to
    /// oppose the cast direction.
    pub normal: Vec3,

    /// Distance along the cast direction at which the contact occurred.
    pub distance: f32,

    /// Content category of the contacted brush. Only contacts intersecting
    /// [`ContentFlags::SOLID`] obstruct movement.
    pub contents: ContentFlags,

    /// Identity of the contacted brush. Opaque to movement code; used only
    /// to exclude the casting body from its own results and to tell
    /// contacts from distinct brushes apart.
    pub brush: u32,
}

impl Contact {
    /// Whether this contact blocks movement.
    #[inline]
    pub fn is_solid(&self) -> bool {
        self.contents.is_solid()
    }
}
