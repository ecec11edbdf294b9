//! Collision world containing the static level geometry.
//!
//! The collision world stores brushes (boxes, ramps) and answers the two
//! cast queries movement needs: fan-out ray casts and a swept-box cast.
//! Both return every intersection they find so the caller can filter by
//! category and order by distance itself.

use glam::Vec3;
use parry3d::math::{Isometry, Point, Real, Vector};
use parry3d::query::{self, Ray, RayCast, ShapeCastOptions};
use parry3d::shape::{Cuboid, Shape, SharedShape};

use super::contact::Contact;
use super::flags::ContentFlags;

/// A piece of collision geometry in the world.
#[derive(Debug, Clone)]
pub struct CollisionBrush {
    /// Unique identifier for this brush.
    pub id: u32,
    /// The collision shape.
    pub shape: SharedShape,
    /// Position and orientation in world space.
    pub transform: Isometry<Real>,
    /// Content flags (solid, trigger, etc.).
    pub contents: ContentFlags,
}

/// The collision world containing all static geometry.
///
/// Contract offered to movement code:
///
/// - [`cast_rays`](Self::cast_rays) fires one ray per origin, all sharing a
///   direction, and reports one contact per (ray, brush) intersection.
/// - [`cast_swept_box`](Self::cast_swept_box) sweeps an axis-aligned box
///   and reports the time-of-impact contact against every brush it reaches,
///   excluding the casting body's own brush if it has one.
///
/// Every contact carries `distance`, a unit `normal` oriented against the
/// cast direction, and the brush's content category. Non-solid brushes are
/// reported like any other; deciding that they do not obstruct is up to the
/// caller.
///
/// The world is immutable once built and can be shared freely across
/// characters ticked by an outer scheduler.
#[derive(Debug, Default)]
pub struct CollisionWorld {
    /// Static world brushes (floors, walls, platforms, ramps).
    brushes: Vec<CollisionBrush>,
    /// Next brush ID to assign.
    next_id: u32,
}

impl CollisionWorld {
    /// Create an empty collision world.
    pub fn new() -> Self {
        Self {
            brushes: Vec::new(),
            next_id: 0,
        }
    }

    /// Add an axis-aligned box to the world.
    ///
    /// # Arguments
    ///
    /// * `center` - Center position of the box in world space
    /// * `half_extents` - Half-size in each axis (x, y, z)
    /// * `contents` - Content flags for collision filtering
    pub fn add_box(&mut self, center: Vec3, half_extents: Vec3, contents: ContentFlags) -> u32 {
        let id = self.next_id;
        self.next_id += 1;

        let shape = SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z);
        let transform = Isometry::translation(center.x, center.y, center.z);

        self.brushes.push(CollisionBrush {
            id,
            shape,
            transform,
            contents,
        });

        id
    }

    /// Add a ramp (triangular wedge) to the world.
    ///
    /// The wedge rises along +X from `base` over `length`, reaching `height`
    /// at the far edge, and spans `depth` along Z. A negative `length`
    /// produces a ramp rising along -X.
    ///
    /// # Returns
    ///
    /// The brush ID, or `None` if the hull could not be computed.
    pub fn add_ramp(
        &mut self,
        base: Vec3,
        length: f32,
        height: f32,
        depth: f32,
        contents: ContentFlags,
    ) -> Option<u32> {
        let hz = depth / 2.0;
        let points = [
            Vec3::new(base.x, base.y, base.z - hz),
            Vec3::new(base.x, base.y, base.z + hz),
            Vec3::new(base.x + length, base.y, base.z - hz),
            Vec3::new(base.x + length, base.y, base.z + hz),
            Vec3::new(base.x + length, base.y + height, base.z - hz),
            Vec3::new(base.x + length, base.y + height, base.z + hz),
        ];
        self.add_convex_hull(&points, contents)
    }

    /// Add a convex hull to the world.
    ///
    /// # Returns
    ///
    /// The brush ID, or `None` if the hull couldn't be computed.
    pub fn add_convex_hull(&mut self, points: &[Vec3], contents: ContentFlags) -> Option<u32> {
        let parry_points: Vec<Point<Real>> =
            points.iter().map(|p| Point::new(p.x, p.y, p.z)).collect();

        let shape = SharedShape::convex_hull(&parry_points)?;

        let id = self.next_id;
        self.next_id += 1;

        self.brushes.push(CollisionBrush {
            id,
            shape,
            transform: Isometry::identity(),
            contents,
        });

        Some(id)
    }

    /// Remove all collision geometry.
    pub fn clear(&mut self) {
        self.brushes.clear();
    }

    /// Get the number of collision brushes.
    pub fn brush_count(&self) -> usize {
        self.brushes.len()
    }

    /// Cast one ray per origin, all sharing `direction`.
    ///
    /// Reports every (ray, brush) intersection within `max_distance`, in no
    /// particular order. `direction` does not need to be normalized;
    /// distances are world-space units along the normalized direction.
    pub fn cast_rays(&self, origins: &[Vec3], direction: Vec3, max_distance: f32) -> Vec<Contact> {
        let mut contacts = Vec::new();

        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO {
            return contacts;
        }
        let parry_dir = Vector::new(dir.x, dir.y, dir.z);

        for origin in origins {
            let ray = Ray::new(Point::new(origin.x, origin.y, origin.z), parry_dir);

            for brush in &self.brushes {
                if let Some(hit) =
                    brush
                        .shape
                        .cast_ray_and_get_normal(&brush.transform, &ray, max_distance, true)
                {
                    let mut normal = Vec3::new(hit.normal.x, hit.normal.y, hit.normal.z);
                    if normal.dot(dir) > 0.0 {
                        normal = -normal;
                    }
                    contacts.push(Contact {
                        normal,
                        distance: hit.time_of_impact,
                        contents: brush.contents,
                        brush: brush.id,
                    });
                }
            }
        }

        contacts
    }

    /// Sweep an axis-aligned box along `direction` and report the
    /// time-of-impact contact against every brush it reaches.
    ///
    /// `exclude` is the casting body's own brush id, if it is registered in
    /// the world; that brush never appears in the results.
    pub fn cast_swept_box(
        &self,
        origin: Vec3,
        half_extents: Vec3,
        direction: Vec3,
        max_distance: f32,
        exclude: Option<u32>,
    ) -> Vec<Contact> {
        let mut contacts = Vec::new();

        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO {
            return contacts;
        }

        let cuboid = Cuboid::new(Vector::new(half_extents.x, half_extents.y, half_extents.z));
        let box_iso = Isometry::translation(origin.x, origin.y, origin.z);
        let vel = Vector::new(dir.x, dir.y, dir.z);

        for brush in &self.brushes {
            if exclude == Some(brush.id) {
                continue;
            }

            let mut opts = ShapeCastOptions::with_max_time_of_impact(max_distance);
            opts.stop_at_penetration = true;
            if let Ok(Some(hit)) = query::cast_shapes(
                &box_iso,
                &vel,
                &cuboid as &dyn Shape,
                &brush.transform,
                &Vector::zeros(),
                brush.shape.as_ref(),
                opts,
            ) {
                // Normal on the moving box; make sure it opposes the motion.
                let n = hit.normal1.into_inner();
                let mut normal = Vec3::new(n.x, n.y, n.z);
                if normal.dot(dir) > 0.0 {
                    normal = -normal;
                }
                contacts.push(Contact {
                    normal,
                    distance: hit.time_of_impact,
                    contents: brush.contents,
                    brush: brush.id,
                });
            }
        }

        contacts
    }
}

// ============================================================================
// Tests
// ============================================================================
