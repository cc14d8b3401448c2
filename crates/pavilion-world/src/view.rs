//! Camera viewpoints -- the exact inverse of the layout engine.
//!
//! [`ViewpointResolver::resolve`] rebuilds the same filtered, ordered
//! exhibit list the layout engine consumes, re-derives the exhibit's
//! placement from the same formulas, and offsets the camera one fixed
//! standoff in front of the exhibit face: `camera = look_at + standoff *
//! facing`. The look-at point is the placement position lifted to the
//! booth banner center or the wall eye height, and the camera shares that
//! height, so the camera-to-look-at distance is always exactly the
//! standoff.
//!
//! A handful of fixed viewpoints (platform overview, the reception wall,
//! the guideline posters on the hub) are hand-specified offset pairs
//! relative to a platform center rather than derived placements.
//!
//! Unknown ids answer `None` -- the camera simply does not move.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

use crate::catalog::{DisplayKind, ExhibitCatalog};
use crate::layout::{self, facing_unit, Placement};
use crate::platform::{PlatformKind, PlatformRegistry};

// ---------------------------------------------------------------------------
// Standoff and height constants
// ---------------------------------------------------------------------------

/// Camera standoff when framing a booth banner.
pub const BOOTH_STANDOFF: f32 = 5.0;
/// Camera standoff when framing a wall poster.
pub const WALL_STANDOFF: f32 = 6.0;

/// Booth banner center above the deck: stand height plus half the banner
/// panel plus trim.
pub const BOOTH_BANNER_CENTER: f32 = 3.5 + 3.5 / 2.0 + 0.3;
/// Viewer eye height above the deck for wall posters and fixed views.
pub const WALL_EYE_HEIGHT: f32 = 4.0;

const OVERVIEW_DISTANCE: f32 = 18.0;
const OVERVIEW_LOOK_HEIGHT: f32 = 3.0;

const RECEPTION_STANDOFF: f32 = 9.0;
const GUIDELINE_STANDOFF: f32 = 8.0;
/// Guideline posters are image-only and wider than catalog posters.
const GUIDELINE_SPACING: f32 = 14.0;
/// Six guideline posters: four on the two left walls, two on the right.
const GUIDELINE_COUNT: usize = 6;
const GUIDELINE_LEFT_START_EDGE: usize = 5;
const GUIDELINE_RIGHT_START_EDGE: usize = 1;

// ---------------------------------------------------------------------------
// ViewPoint
// ---------------------------------------------------------------------------

/// A camera pose sufficient to frame one exhibit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewPoint {
    /// Where the camera stands.
    pub camera: Vec3,
    /// What the camera looks at.
    pub look_at: Vec3,
    /// The standoff distance the pose was built with.
    pub standoff: f32,
}

/// An exhibit placement paired with its id, for the rendering collaborator's
/// mesh transforms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedExhibit {
    pub exhibit_id: String,
    pub position: Vec3,
    pub facing_angle: f32,
}

/// Hand-specified camera pose relative to a platform center.
struct FixedPose {
    offset: Vec3,
    look_at_offset: Vec3,
    standoff: f32,
}

impl FixedPose {
    fn at(&self, center: Vec3) -> ViewPoint {
        ViewPoint {
            camera: center + self.offset,
            look_at: center + self.look_at_offset,
            standoff: self.standoff,
        }
    }
}

// ---------------------------------------------------------------------------
// ViewpointResolver
// ---------------------------------------------------------------------------

/// Resolves camera poses against a platform registry.
///
/// Owns no mutable state: the exhibit catalog is passed per call, so content
/// updates are picked up on the next resolve with nothing to invalidate.
#[derive(Debug, Clone)]
pub struct ViewpointResolver {
    registry: PlatformRegistry,
}

impl ViewpointResolver {
    pub fn new(registry: PlatformRegistry) -> Self {
        Self { registry }
    }

    /// The registry this resolver answers from.
    pub fn registry(&self) -> &PlatformRegistry {
        &self.registry
    }

    /// Resolve the camera pose framing an exhibit on a platform.
    ///
    /// `display` names the face being viewed and must be `Booth` or `Wall`;
    /// a `Both` request is ambiguous and answers `None`. `None` is also the
    /// answer when the platform is unknown or the exhibit is not in that
    /// platform's filtered list.
    pub fn resolve(
        &self,
        catalog: &ExhibitCatalog,
        exhibit_id: &str,
        display: DisplayKind,
        platform_id: &str,
    ) -> Option<ViewPoint> {
        match display {
            DisplayKind::Booth => self.booth_viewpoint(catalog, exhibit_id, platform_id),
            DisplayKind::Wall => self.wall_viewpoint(catalog, exhibit_id, platform_id),
            DisplayKind::Both => {
                tracing::debug!(exhibit_id, "view request must name booth or wall, not both");
                None
            }
        }
    }

    /// Camera pose framing a booth banner.
    pub fn booth_viewpoint(
        &self,
        catalog: &ExhibitCatalog,
        exhibit_id: &str,
        platform_id: &str,
    ) -> Option<ViewPoint> {
        let platform = self.registry.get(platform_id)?;
        let booths = catalog.booths_on(platform_id);
        let index = booths.iter().position(|e| e.id == exhibit_id)?;
        let placement = layout::place_booth(platform, index, booths.len());
        Some(frame(placement, platform.center.y + BOOTH_BANNER_CENTER, BOOTH_STANDOFF))
    }

    /// Camera pose framing a wall poster.
    pub fn wall_viewpoint(
        &self,
        catalog: &ExhibitCatalog,
        exhibit_id: &str,
        platform_id: &str,
    ) -> Option<ViewPoint> {
        let platform = self.registry.get(platform_id)?;
        let posters = catalog.posters_on(platform_id);
        let index = posters.iter().position(|e| e.id == exhibit_id)?;
        let placement = layout::place_wall_poster(platform, index, posters.len());
        Some(frame(placement, platform.center.y + WALL_EYE_HEIGHT, WALL_STANDOFF))
    }

    /// All booth placements for a platform, paired with exhibit ids.
    pub fn placed_booths(
        &self,
        catalog: &ExhibitCatalog,
        platform_id: &str,
    ) -> Vec<PlacedExhibit> {
        let Some(platform) = self.registry.get(platform_id) else {
            return Vec::new();
        };
        let booths = catalog.booths_on(platform_id);
        booths
            .iter()
            .enumerate()
            .map(|(i, e)| placed(e.id.clone(), layout::place_booth(platform, i, booths.len())))
            .collect()
    }

    /// All poster placements for a platform, paired with exhibit ids.
    pub fn placed_posters(
        &self,
        catalog: &ExhibitCatalog,
        platform_id: &str,
    ) -> Vec<PlacedExhibit> {
        let Some(platform) = self.registry.get(platform_id) else {
            return Vec::new();
        };
        let posters = catalog.posters_on(platform_id);
        posters
            .iter()
            .enumerate()
            .map(|(i, e)| {
                placed(
                    e.id.clone(),
                    layout::place_wall_poster(platform, i, posters.len()),
                )
            })
            .collect()
    }

    // -- fixed viewpoints ---------------------------------------------------

    /// Center-of-platform overview: the camera backs off south of the
    /// platform and looks at a point just above the deck.
    pub fn overview(&self, platform_id: &str) -> Option<ViewPoint> {
        let platform = self.registry.get(platform_id)?;
        let pose = FixedPose {
            offset: Vec3::new(0.0, WALL_EYE_HEIGHT, OVERVIEW_DISTANCE),
            look_at_offset: Vec3::new(0.0, OVERVIEW_LOOK_HEIGHT, 0.0),
            standoff: OVERVIEW_DISTANCE,
        };
        Some(pose.at(platform.center))
    }

    /// The reception wall on a platform's north rim, viewed from the south.
    pub fn reception(&self, platform_id: &str) -> Option<ViewPoint> {
        let platform = self.registry.get(platform_id)?;
        let wall = Vec3::new(-1.0, WALL_EYE_HEIGHT, -30.0);
        let pose = FixedPose {
            offset: wall + facing_unit(FRAC_PI_2) * RECEPTION_STANDOFF,
            look_at_offset: wall,
            standoff: RECEPTION_STANDOFF,
        };
        Some(pose.at(platform.center))
    }

    /// One of the six guideline posters on the hub's perimeter walls.
    /// Indices 0-3 hang on the two left walls, 4-5 on the right wall.
    pub fn guideline(&self, index: usize) -> Option<ViewPoint> {
        if index >= GUIDELINE_COUNT {
            return None;
        }
        let hub = self.registry.first_of_kind(PlatformKind::Hub)?;
        let (start_edge, local) = if index < 4 {
            (GUIDELINE_LEFT_START_EDGE, index)
        } else {
            (GUIDELINE_RIGHT_START_EDGE, index - 4)
        };
        let placement = layout::edge_slot(hub, start_edge, local, GUIDELINE_SPACING);
        Some(frame(
            placement,
            hub.center.y + WALL_EYE_HEIGHT,
            GUIDELINE_STANDOFF,
        ))
    }
}

/// Lift a placement to viewing height and stand the camera one standoff in
/// front of the exhibit face.
fn frame(placement: Placement, look_height: f32, standoff: f32) -> ViewPoint {
    let look_at = Vec3::new(placement.position.x, look_height, placement.position.z);
    ViewPoint {
        camera: look_at + facing_unit(placement.facing_angle) * standoff,
        look_at,
        standoff,
    }
}

fn placed(exhibit_id: String, placement: Placement) -> PlacedExhibit {
    PlacedExhibit {
        exhibit_id,
        position: placement.position,
        facing_angle: placement.facing_angle,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Exhibit;

    fn resolver() -> ViewpointResolver {
        ViewpointResolver::new(PlatformRegistry::builtin())
    }

    fn catalog() -> ExhibitCatalog {
        ExhibitCatalog::new(vec![
            Exhibit::new("p1", ["B2"], DisplayKind::Booth),
            Exhibit::new("p2", ["B2"], DisplayKind::Wall),
            Exhibit::new("p3", ["B2", "Q1"], DisplayKind::Both),
        ])
    }

    #[test]
    fn booth_camera_stands_one_standoff_in_front() {
        let vp = resolver()
            .resolve(&catalog(), "p1", DisplayKind::Booth, "B2")
            .unwrap();
        assert!(((vp.camera - vp.look_at).length() - BOOTH_STANDOFF).abs() < 1e-3);
        assert_eq!(vp.standoff, BOOTH_STANDOFF);
    }

    #[test]
    fn wall_camera_stands_one_standoff_in_front() {
        let vp = resolver()
            .resolve(&catalog(), "p2", DisplayKind::Wall, "B2")
            .unwrap();
        assert!(((vp.camera - vp.look_at).length() - WALL_STANDOFF).abs() < 1e-3);
    }

    #[test]
    fn look_at_matches_layout_position() {
        let r = resolver();
        let c = catalog();
        let vp = r.resolve(&c, "p3", DisplayKind::Booth, "B2").unwrap();
        let platform = r.registry().get("B2").unwrap();
        // p3 is the second booth of two on B2.
        let placement = layout::place_booth(platform, 1, 2);
        assert_eq!(vp.look_at.x, placement.position.x);
        assert_eq!(vp.look_at.z, placement.position.z);
        assert_eq!(vp.look_at.y, platform.center.y + BOOTH_BANNER_CENTER);
    }

    #[test]
    fn unknown_ids_answer_none() {
        let r = resolver();
        let c = catalog();
        assert!(r.resolve(&c, "p1", DisplayKind::Booth, "Z9").is_none());
        assert!(r.resolve(&c, "ghost", DisplayKind::Booth, "B2").is_none());
        // p1 has no wall face.
        assert!(r.resolve(&c, "p1", DisplayKind::Wall, "B2").is_none());
    }

    #[test]
    fn both_request_is_ambiguous() {
        assert!(resolver()
            .resolve(&catalog(), "p3", DisplayKind::Both, "B2")
            .is_none());
    }

    #[test]
    fn placed_booths_align_with_filter_order() {
        let placed = resolver().placed_booths(&catalog(), "B2");
        let ids: Vec<_> = placed.iter().map(|p| p.exhibit_id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p3"]);
        assert!(resolver().placed_booths(&catalog(), "Z9").is_empty());
    }

    #[test]
    fn overview_frames_platform_center() {
        let r = resolver();
        let vp = r.overview("Q2").unwrap();
        let center = r.registry().get("Q2").unwrap().center;
        assert_eq!(vp.look_at, center + Vec3::new(0.0, OVERVIEW_LOOK_HEIGHT, 0.0));
        assert_eq!(vp.camera.z, center.z + OVERVIEW_DISTANCE);
        assert!(r.overview("Z9").is_none());
    }

    #[test]
    fn reception_camera_faces_the_wall() {
        let r = resolver();
        let vp = r.reception("S").unwrap();
        assert!(((vp.camera - vp.look_at).length() - RECEPTION_STANDOFF).abs() < 1e-3);
        // Camera south of the wall, looking north.
        assert!(vp.camera.z > vp.look_at.z);
    }

    #[test]
    fn guideline_posters_exist_for_six_indices() {
        let r = resolver();
        for index in 0..6 {
            let vp = r.guideline(index).unwrap();
            assert!(((vp.camera - vp.look_at).length() - GUIDELINE_STANDOFF).abs() < 1e-3);
        }
        assert!(r.guideline(6).is_none());
    }
}
