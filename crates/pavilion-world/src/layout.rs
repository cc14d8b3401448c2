//! Deterministic exhibit placement on a platform.
//!
//! Every formula here is a pure function of `(platform, index, count)` for
//! the filtered exhibit list of one display kind. The viewpoint resolver
//! ([`crate::view`]) re-derives these exact placements to aim the camera,
//! so nothing may be cached or depend on hidden state.
//!
//! Booths occupy a contiguous angular arc covering 4 of the platform's 6
//! sectors (the remaining 2 are reserved for fixed furniture). From 6
//! booths upward they cluster into inward-facing triangle groups of 3,
//! one group per evenly spaced slot along the arc, with `count mod 3`
//! remainder booths interleaved individually. Below 6, every booth stands
//! alone on the arc. Wall posters cycle around the hexagon's perimeter
//! edges, two fixed slots per edge.
//!
//! Index/count combinations outside the contract (`index >= count`) are
//! programming errors and panic.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

use crate::platform::Platform;

// ---------------------------------------------------------------------------
// Arc and grouping constants
// ---------------------------------------------------------------------------

/// One hexagon sector, 60 degrees.
const SECTOR: f32 = TAU / 6.0;
/// Booths occupy 4 contiguous sectors of the 6.
const USED_SECTORS: f32 = 4.0;
/// First sector of the booth arc.
const START_SECTOR: f32 = 2.0;
/// The placed arc is pulled in from the full 4 sectors to keep clearance
/// from the reserved sectors.
const ARC_SPREAD_FACTOR: f32 = 0.85;

/// Booth count at which triangle grouping kicks in.
pub const TRIANGLE_GROUP_MIN: usize = 6;
/// Distance from a group's anchor to each of its three members.
pub const TRIANGLE_RADIUS: f32 = 2.5;
/// Members sit at 0, -120, -240 degrees around the anchor.
const TRIANGLE_STEP: f32 = -TAU / 3.0;
/// Group anchors sit at this fraction of the platform radius.
const GROUP_ANCHOR_FACTOR: f32 = 0.48;
/// Individual and remainder booths sit slightly further in.
const SINGLE_RING_FACTOR: f32 = 0.45;

// ---------------------------------------------------------------------------
// Wall constants
// ---------------------------------------------------------------------------

/// Hexagon perimeter edge count.
const EDGE_COUNT: usize = 6;
/// Fixed poster slots per perimeter edge.
pub const POSTERS_PER_EDGE: usize = 2;
/// Default first edge for poster assignment.
pub const DEFAULT_START_EDGE: usize = 3;
/// Walls stand just inside the hexagon apothem.
const WALL_INSET: f32 = 0.98;
/// Slot spacing is the hex edge length over this divisor.
const SLOT_SPACING_DIVISOR: f32 = 2.2;

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

/// Where an exhibit stands and which way its front faces.
///
/// `facing_angle` is measured in the world XZ plane, radians from +X toward
/// +Z, normalized to `[0, TAU)`. [`facing_unit`] turns it into the unit
/// vector the exhibit front points along.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Vec3,
    pub facing_angle: f32,
}

/// Unit vector in the world XZ plane for a facing angle.
pub fn facing_unit(angle: f32) -> Vec3 {
    Vec3::new(angle.cos(), 0.0, angle.sin())
}

fn wrap_angle(angle: f32) -> f32 {
    angle.rem_euclid(TAU)
}

/// Point on the platform deck at a polar angle and radius from the center.
fn deck_point(platform: &Platform, angle: f32, radius: f32) -> Vec3 {
    platform.center + Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius)
}

fn arc_start(platform: &Platform) -> f32 {
    START_SECTOR * SECTOR + platform.rotation_offset
}

fn arc_spread() -> f32 {
    USED_SECTORS * SECTOR * ARC_SPREAD_FACTOR
}

// ---------------------------------------------------------------------------
// Booth placement
// ---------------------------------------------------------------------------

/// Place booth `index` of `count` on a platform.
///
/// # Panics
///
/// Panics if `index >= count` -- the caller is expected to iterate the
/// filtered booth list, so an out-of-range index is a contract violation.
pub fn place_booth(platform: &Platform, index: usize, count: usize) -> Placement {
    assert!(
        index < count,
        "booth index {index} out of range for count {count}"
    );

    let start = arc_start(platform);
    let spread = arc_spread();

    if count >= TRIANGLE_GROUP_MIN {
        let triples = count / 3;
        let in_triples = triples * 3;
        let remainder = count - in_triples;
        // Remainder booths claim one extra slot along the arc.
        let groups = triples + usize::from(remainder > 0);

        if index < in_triples {
            // Triangle member: three booths around the group anchor, each
            // facing the group centroid.
            let group = index / 3;
            let corner = index % 3;
            let group_angle = start + (group as f32 / (groups - 1) as f32) * spread;
            let member_angle = group_angle + corner as f32 * TRIANGLE_STEP;

            let anchor = deck_point(platform, group_angle, platform.radius * GROUP_ANCHOR_FACTOR);
            let position = anchor
                + Vec3::new(
                    member_angle.cos() * TRIANGLE_RADIUS,
                    0.0,
                    member_angle.sin() * TRIANGLE_RADIUS,
                );
            Placement {
                position,
                facing_angle: wrap_angle(member_angle + PI),
            }
        } else {
            // Remainder booth: a single point interleaved past the triangle
            // slots, facing the platform center.
            let rest = index - in_triples;
            let fraction = (triples as f32 + rest as f32 * 0.5) / (groups as f32 - 0.5);
            let angle = start + fraction * spread;
            Placement {
                position: deck_point(platform, angle, platform.radius * SINGLE_RING_FACTOR),
                facing_angle: wrap_angle(angle + PI),
            }
        }
    } else {
        // Few booths: everyone stands alone, evenly spaced, facing the
        // platform center. A lone booth takes the arc midpoint.
        let angle = if count == 1 {
            start + spread / 2.0
        } else {
            start + (index as f32 / (count - 1) as f32) * spread
        };
        Placement {
            position: deck_point(platform, angle, platform.radius * SINGLE_RING_FACTOR),
            facing_angle: wrap_angle(angle + PI),
        }
    }
}

/// Full booth layout for a platform, one placement per filtered index.
pub fn booth_layout(platform: &Platform, count: usize) -> Vec<Placement> {
    (0..count).map(|i| place_booth(platform, i, count)).collect()
}

// ---------------------------------------------------------------------------
// Wall-poster placement
// ---------------------------------------------------------------------------

/// Core edge/slot placement shared by the catalog posters and the fixed
/// guideline walls: `edge = (start_edge + index / 2) % 6`, two slots per
/// edge symmetrically offset along the edge tangent.
pub(crate) fn edge_slot(
    platform: &Platform,
    start_edge: usize,
    index: usize,
    spacing: f32,
) -> Placement {
    let edge = (start_edge + index / POSTERS_PER_EDGE) % EDGE_COUNT;
    let slot = index % POSTERS_PER_EDGE;

    let angle = edge as f32 * SECTOR + platform.rotation_offset;
    let apothem = platform.radius * (PI / 6.0).cos() * WALL_INSET;
    let outward = Vec3::new(angle.cos(), 0.0, angle.sin());
    let tangent = Vec3::new(-angle.sin(), 0.0, angle.cos());

    // Slot 0 left of the edge midpoint, slot 1 right of it.
    let along = (slot as f32 - 0.5) * spacing;
    Placement {
        position: platform.center + outward * apothem + tangent * along,
        facing_angle: wrap_angle(angle),
    }
}

/// Place wall poster `index` of `count` on a platform, starting at the
/// given perimeter edge.
///
/// # Panics
///
/// Panics if `index >= count`.
pub fn place_wall_poster_at(
    platform: &Platform,
    start_edge: usize,
    index: usize,
    count: usize,
) -> Placement {
    assert!(
        index < count,
        "poster index {index} out of range for count {count}"
    );
    let spacing = platform.radius / SLOT_SPACING_DIVISOR;
    edge_slot(platform, start_edge, index, spacing)
}

/// Place wall poster `index` of `count` using the default start edge.
///
/// # Panics
///
/// Panics if `index >= count`.
pub fn place_wall_poster(platform: &Platform, index: usize, count: usize) -> Placement {
    place_wall_poster_at(platform, DEFAULT_START_EDGE, index, count)
}

/// Full poster layout for a platform, one placement per filtered index.
pub fn poster_layout(platform: &Platform, count: usize) -> Vec<Placement> {
    (0..count)
        .map(|i| place_wall_poster(platform, i, count))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
