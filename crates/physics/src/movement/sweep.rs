//! Swept collision resolution.
//!
//! This is the core movement algorithm. A sweep marches the character's box
//! along the desired direction in "probe, advance, resolve" steps:
//!
//! 1. Cast probe rays from the leading faces of the box, plus one swept-box
//!    cast to catch thin obstacles and corners the discrete rays miss.
//! 2. No solid contact: advance the full remaining distance and finish.
//! 3. Solid contact: advance up to it (minus a small buffer). If already
//!    touching, either split a multi-axis move into per-axis sub-sweeps, or
//!    try redirecting along the surface of a traversable slope, or stop.
//!
//! Splitting happens at most one level deep: [`resolve`] may fan out into
//! up to three single-axis sub-sweeps, and a single-axis sweep never splits
//! again. Breaking the axes apart resolves conflicts such as a diagonal
//! move blocked on one axis by a wall while gravity slides the other axis
//! along a slope, and keeps slope angles attributable to one direction.

use glam::Vec3;

use crate::collision::{CollisionWorld, Contact};
use crate::math;

use super::config::MovementConfig;

/// Distance kept between the box surface and obstacles. Probe ray origins
/// are inset by this much so surface-coincident geometry is not self-hit.
pub const RAY_BUFFER: f32 = 1.0e-4;

/// Shrink applied to the swept box. Much larger than the ray buffer:
/// floating-point surface coincidence produces false contacts at the ray
/// buffer scale (a box resting exactly on a platform reports the platform
/// as blocking sideways movement).
pub const BOX_SHRINK: f32 = 100.0 * RAY_BUFFER;

/// Bound on "march, detect, resolve" steps per sweep. Exhausting it is a
/// reported but non-fatal condition: the sweep stops where it is.
pub const MAX_MOVE_ATTEMPTS: u32 = 10;

/// Result of one sweep.
#[derive(Debug, Clone)]
pub struct Sweep {
    /// Realized displacement for this tick.
    pub displacement: Vec3,

    /// Surface angle (degrees from vertical) of the last obstacle
    /// contacted, or `None` if the sweep met no obstacle.
    pub slope_degrees: Option<f32>,

    /// Every contact reported by every probe cast during the sweep, solid
    /// or not, in cast order. Owned by the caller; wall detection reuses it.
    pub contacts: Vec<Contact>,
}

impl Sweep {
    fn empty() -> Self {
        Self {
            displacement: Vec3::ZERO,
            slope_degrees: None,
            contacts: Vec::new(),
        }
    }
}

/// Resolve a desired movement against the world.
///
/// `direction` is momentum-scale: the attempted travel distance for the
/// tick is `|direction| * dt`. Returns the realized displacement, the last
/// contacted surface angle, and all contacts observed along the way.
pub fn resolve(
    world: &CollisionWorld,
    config: &MovementConfig,
    start: Vec3,
    direction: Vec3,
    dt: f32,
) -> Sweep {
    // No movement, don't bother trying.
    if direction.length_squared() == 0.0 {
        return Sweep::empty();
    }

    let mut contacts = Vec::new();
    let ray_distance = direction.length() * dt;

    let mut dir = direction;
    let mut displacement = Vec3::ZERO;
    let mut traveled = 0.0;
    let mut last_slope = None;
    let mut can_slope = true;
    let mut attempts = MAX_MOVE_ATTEMPTS;

    while traveled < ray_distance && attempts > 0 {
        attempts -= 1;

        let origin = start + displacement;
        let solids = cast_probes(world, config, origin, dir, ray_distance, &mut contacts);

        // Travel full distance
        let Some(closest) = solids.first() else {
            displacement += dir.normalize_or_zero() * (ray_distance - traveled);
            traveled = displacement.length();
            continue;
        };

        // Travel partial distance
        let advance = buffered_advance(closest.distance);
        let step = dir.normalize_or_zero() * advance;
        if step.length() > RAY_BUFFER {
            displacement += step;
            traveled = displacement.length();
            can_slope = true;
            continue;
        }

        // Touching the obstacle. A multi-axis direction is split into
        // per-axis sub-sweeps; only one should find anything in its way.
        if axis_count(dir) > 1 {
            let rem_x = Vec3::new(dir.x - displacement.x, 0.0, 0.0);
            let (moved, slope) =
                march_axis(world, config, start + displacement, rem_x, dt, &mut contacts);
            displacement += moved;
            last_slope = slope.or(last_slope);

            let rem_y = Vec3::new(0.0, dir.y - displacement.y, 0.0);
            let (moved, slope) =
                march_axis(world, config, start + displacement, rem_y, dt, &mut contacts);
            displacement += moved;
            last_slope = slope.or(last_slope);

            let rem_z = Vec3::new(0.0, 0.0, dir.z - displacement.z);
            let (moved, slope) =
                march_axis(world, config, start + displacement, rem_z, dt, &mut contacts);
            displacement += moved;
            last_slope = slope.or(last_slope);
            break;
        }

        // Single axis: try slope movement if not completely blocked.
        if can_slope {
            can_slope = false;
            match attempt_slope(&solids, closest.distance, dir, config) {
                SlopeAttempt::Redirect { direction, angle } => {
                    last_slope = Some(angle);
                    dir = direction;
                    continue;
                }
                SlopeAttempt::Blocked { angle } => {
                    last_slope = Some(angle);
                }
                SlopeAttempt::NoContact => {}
            }
        }
        break;
    }

    if attempts == 0 && traveled < ray_distance {
        log::warn!("movement sweep hit its step bound; stopping at partial displacement");
    }

    Sweep {
        displacement,
        slope_degrees: last_slope,
        contacts,
    }
}

/// Run a single-axis sweep purely to collect contacts along `direction`.
///
/// Used by wall detection: the displacement is discarded by callers, the
/// contact list is the product. Never splits into sub-sweeps.
pub fn probe_axis(
    world: &CollisionWorld,
    config: &MovementConfig,
    start: Vec3,
    direction: Vec3,
    dt: f32,
) -> Sweep {
    let mut contacts = Vec::new();
    let (displacement, slope_degrees) =
        march_axis(world, config, start, direction, dt, &mut contacts);
    Sweep {
        displacement,
        slope_degrees,
        contacts,
    }
}

/// Single-axis march: the same probe/advance/slope loop as [`resolve`],
/// minus the split case. Sub-sweeps bottom out here, so the decomposition
/// is at most one level deep by construction.
fn march_axis(
    world: &CollisionWorld,
    config: &MovementConfig,
    start: Vec3,
    direction: Vec3,
    dt: f32,
    contacts: &mut Vec<Contact>,
) -> (Vec3, Option<f32>) {
    if direction.length_squared() == 0.0 {
        return (Vec3::ZERO, None);
    }

    let ray_distance = direction.length() * dt;

    let mut dir = direction;
    let mut displacement = Vec3::ZERO;
    let mut traveled = 0.0;
    let mut last_slope = None;
    let mut can_slope = true;
    let mut attempts = MAX_MOVE_ATTEMPTS;

    while traveled < ray_distance && attempts > 0 {
        attempts -= 1;

        let origin = start + displacement;
        let solids = cast_probes(world, config, origin, dir, ray_distance, contacts);

        let Some(closest) = solids.first() else {
            displacement += dir.normalize_or_zero() * (ray_distance - traveled);
            traveled = displacement.length();
            continue;
        };

        let advance = buffered_advance(closest.distance);
        let step = dir.normalize_or_zero() * advance;
        if step.length() > RAY_BUFFER {
            displacement += step;
            traveled = displacement.length();
            can_slope = true;
            continue;
        }

        if can_slope {
            can_slope = false;
            match attempt_slope(&solids, closest.distance, dir, config) {
                SlopeAttempt::Redirect { direction, angle } => {
                    last_slope = Some(angle);
                    dir = direction;
                    continue;
                }
                SlopeAttempt::Blocked { angle } => {
                    last_slope = Some(angle);
                }
                SlopeAttempt::NoContact => {}
            }
        }
        break;
    }

    if attempts == 0 && traveled < ray_distance {
        log::warn!("axis sweep hit its step bound; stopping at partial displacement");
    }

    (displacement, last_slope)
}

/// Outcome of examining the contact geometry at a blocking obstacle.
enum SlopeAttempt {
    /// The surface is traversable; continue along its tangent.
    Redirect { direction: Vec3, angle: f32 },
    /// A surface was identified but is in neither traversable band.
    Blocked { angle: f32 },
    /// No usable surface to classify (several contacts, all equidistant).
    NoContact,
}

/// Classify the surface just beyond the immediate blocker and decide
/// whether the remaining motion can be redirected along it.
///
/// The next-closest contact is used rather than the blocker itself so a
/// slope is traversed smoothly instead of teleporting up its near edge.
/// When the blocker is the *only* contact it classifies itself - a single
/// ambiguous hit in a corner would otherwise stick forever.
fn attempt_slope(
    solids: &[Contact],
    closest_distance: f32,
    dir: Vec3,
    config: &MovementConfig,
) -> SlopeAttempt {
    let mut next = solids.iter().find(|c| c.distance > closest_distance);

    // Corner stick fix
    if next.is_none() && solids.len() == 1 {
        next = solids.first();
    }

    let Some(contact) = next else {
        return SlopeAttempt::NoContact;
    };

    let angle = math::angle_from_vertical_degrees(contact.normal);
    let tangent = math::surface_tangent(contact.normal, dir);

    let climbs = (dir.x != 0.0 || dir.z != 0.0) && config.is_walkable_angle(angle);
    let slides = dir.y < 0.0 && config.is_wall_angle(angle);

    if climbs || slides {
        SlopeAttempt::Redirect {
            direction: tangent,
            angle,
        }
    } else {
        // The in-between band: too steep to climb, not steep enough to
        // count as a sliding wall.
        SlopeAttempt::Blocked { angle }
    }
}

/// Advance distance for a contact at `distance`: stop one buffer short,
/// but never go negative when the contact is already inside the buffer.
#[inline]
fn buffered_advance(distance: f32) -> f32 {
    if distance > RAY_BUFFER {
        distance - RAY_BUFFER
    } else {
        distance
    }
}

/// Number of axes the direction moves along.
#[inline]
fn axis_count(dir: Vec3) -> u32 {
    (dir.x != 0.0) as u32 + (dir.y != 0.0) as u32 + (dir.z != 0.0) as u32
}

/// Cast the probe pattern for one march step: three rays along the main
/// diagonal of each leading face (only faces whose axis has a non-zero
/// direction component), plus the swept box. Appends every contact to
/// `sink` and returns the solid ones ordered by distance.
fn cast_probes(
    world: &CollisionWorld,
    config: &MovementConfig,
    origin: Vec3,
    dir: Vec3,
    ray_distance: f32,
    sink: &mut Vec<Contact>,
) -> Vec<Contact> {
    let extents = config.half_extents;
    let mut origins = Vec::with_capacity(9);

    for i in -1i32..2 {
        let i = i as f32;
        let x_off = i * (extents.x - RAY_BUFFER);
        let y_off = i * (extents.y - RAY_BUFFER);
        let z_off = i * (extents.z - RAY_BUFFER);

        // Bottom or top face if changing y position
        if dir.y < 0.0 {
            origins.push(origin + Vec3::new(x_off, RAY_BUFFER - extents.y, z_off));
        } else if dir.y > 0.0 {
            origins.push(origin + Vec3::new(x_off, extents.y - RAY_BUFFER, z_off));
        }

        // Left or right face if changing x position
        if dir.x < 0.0 {
            origins.push(origin + Vec3::new(RAY_BUFFER - extents.x, y_off, z_off));
        } else if dir.x > 0.0 {
            origins.push(origin + Vec3::new(extents.x - RAY_BUFFER, y_off, z_off));
        }

        // Back or front face if changing z position
        if dir.z < 0.0 {
            origins.push(origin + Vec3::new(x_off, y_off, RAY_BUFFER - extents.z));
        } else if dir.z > 0.0 {
            origins.push(origin + Vec3::new(x_off, y_off, extents.z - RAY_BUFFER));
        }
    }

    let mut found = world.cast_rays(&origins, dir, ray_distance + RAY_BUFFER);

    // Swept box against thin obstacles and corners the rays straddle.
    found.extend(world.cast_swept_box(
        origin,
        extents - Vec3::splat(BOX_SHRINK),
        dir,
        ray_distance,
        None,
    ));

    sink.extend_from_slice(&found);

    let mut solids: Vec<Contact> = found.into_iter().filter(|c| c.is_solid()).collect();
    solids.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    solids
}

// ============================================================================
// Tests
// ============================================================================
