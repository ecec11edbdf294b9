//! Content flags for collision filtering.
//!
//! These flags classify world geometry so casts can decide what actually
//! obstructs movement. Category membership is resolved here, at the scene
//! query boundary - movement code never inspects names or tags.

use serde::{Deserialize, Serialize};

/// Content flags describe what kind of volume a brush is.
///
/// Movement treats anything intersecting [`ContentFlags::SOLID`] as an
/// obstacle. Other categories still show up in cast results (callers may
/// care about them for gameplay), they just never block a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ContentFlags(pub u32);

impl ContentFlags {
    /// Empty space - nothing here.
    pub const EMPTY: Self = Self(0);

    /// Solid world geometry - floors, walls, platforms, ramps.
    pub const SOLID: Self = Self(1 << 0);

    /// Trigger volume - activates events when entered, never blocks.
    pub const TRIGGER: Self = Self(1 << 1);

    /// Character body - collision with other characters.
    pub const CHARACTER_BODY: Self = Self(1 << 2);

    /// Decorative geometry with no gameplay collision.
    pub const DETAIL: Self = Self(1 << 3);

    /// Check if these flags contain a specific flag.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if any of the given flags are set.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Combine two flag sets.
    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether this volume blocks movement.
    #[inline]
    pub fn is_solid(self) -> bool {
        self.intersects(Self::SOLID)
    }
}

impl std::ops::BitOr for ContentFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for ContentFlags {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}
