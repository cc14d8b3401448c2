//! Integration tests for the viewpoint resolver.
//!
//! The resolver must invert the layout engine exactly: the look-at point is
//! the derived placement lifted to viewing height, and the camera stands one
//! standoff in front of the exhibit face for every platform, index, and
//! count.

use pavilion_world::catalog::{DisplayKind, Exhibit, ExhibitCatalog};
use pavilion_world::layout::{place_booth, place_wall_poster};
use pavilion_world::platform::PlatformRegistry;
use pavilion_world::view::{
    ViewpointResolver, BOOTH_BANNER_CENTER, BOOTH_STANDOFF, WALL_EYE_HEIGHT, WALL_STANDOFF,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn resolver() -> ViewpointResolver {
    ViewpointResolver::new(PlatformRegistry::builtin())
}

/// A catalog of `count` exhibits of one kind, all on one platform.
fn uniform_catalog(platform_id: &str, count: usize, display: DisplayKind) -> ExhibitCatalog {
    ExhibitCatalog::new(
        (0..count)
            .map(|i| Exhibit::new(format!("e{i}"), [platform_id], display))
            .collect(),
    )
}

// ---------------------------------------------------------------------------
// Standoff distance property
// ---------------------------------------------------------------------------

#[test]
fn booth_camera_distance_equals_standoff_everywhere() {
    let r = resolver();
    for platform_id in ["S", "B1", "B2", "B3", "Q1", "Q2", "Q3"] {
        for count in [1usize, 2, 5, 6, 7, 9, 12] {
            let catalog = uniform_catalog(platform_id, count, DisplayKind::Booth);
            for i in 0..count {
                let id = format!("e{i}");
                let vp = r
                    .resolve(&catalog, &id, DisplayKind::Booth, platform_id)
                    .expect("exhibit is on the platform");
                assert!(
                    ((vp.camera - vp.look_at).length() - BOOTH_STANDOFF).abs() < 1e-3,
                    "{platform_id} {i}/{count}: camera drifted off the standoff"
                );
            }
        }
    }
}

#[test]
fn wall_camera_distance_equals_standoff_everywhere() {
    let r = resolver();
    for platform_id in ["S", "B2", "Q1"] {
        for count in [1usize, 2, 3, 8, 12] {
            let catalog = uniform_catalog(platform_id, count, DisplayKind::Wall);
            for i in 0..count {
                let id = format!("e{i}");
                let vp = r
                    .resolve(&catalog, &id, DisplayKind::Wall, platform_id)
                    .expect("poster is on the platform");
                assert!(((vp.camera - vp.look_at).length() - WALL_STANDOFF).abs() < 1e-3);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Inversion against the layout engine
// ---------------------------------------------------------------------------

#[test]
fn resolver_rederives_booth_placement() {
    let registry = PlatformRegistry::builtin();
    let platform = registry.get("Q3").unwrap().clone();
    let r = ViewpointResolver::new(registry);
    let catalog = uniform_catalog("Q3", 8, DisplayKind::Booth);

    for i in 0..8 {
        let placement = place_booth(&platform, i, 8);
        let vp = r
            .resolve(&catalog, &format!("e{i}"), DisplayKind::Booth, "Q3")
            .unwrap();
        assert_eq!(vp.look_at.x, placement.position.x);
        assert_eq!(vp.look_at.z, placement.position.z);
        assert_eq!(vp.look_at.y, platform.center.y + BOOTH_BANNER_CENTER);
    }
}

#[test]
fn resolver_rederives_poster_placement() {
    let registry = PlatformRegistry::builtin();
    let platform = registry.get("B1").unwrap().clone();
    let r = ViewpointResolver::new(registry);
    let catalog = uniform_catalog("B1", 5, DisplayKind::Wall);

    for i in 0..5 {
        let placement = place_wall_poster(&platform, i, 5);
        let vp = r
            .resolve(&catalog, &format!("e{i}"), DisplayKind::Wall, "B1")
            .unwrap();
        assert_eq!(vp.look_at.x, placement.position.x);
        assert_eq!(vp.look_at.z, placement.position.z);
        assert_eq!(vp.look_at.y, platform.center.y + WALL_EYE_HEIGHT);
    }
}

#[test]
fn mixed_catalog_indices_follow_the_filtered_view() {
    // Exhibits of the other kind and other platforms must not shift the
    // filtered index the resolver derives placements from.
    let r = resolver();
    let catalog = ExhibitCatalog::new(vec![
        Exhibit::new("w1", ["B2"], DisplayKind::Wall),
        Exhibit::new("b1", ["B2"], DisplayKind::Booth),
        Exhibit::new("other", ["B3"], DisplayKind::Booth),
        Exhibit::new("b2", ["B2"], DisplayKind::Both),
        Exhibit::new("w2", ["B2"], DisplayKind::Both),
    ]);

    let platform = r.registry().get("B2").unwrap().clone();
    // Booth partition on B2 is [b1, b2, w2] -- b2 is filtered index 1 of 3.
    let vp = r.resolve(&catalog, "b2", DisplayKind::Booth, "B2").unwrap();
    let placement = place_booth(&platform, 1, 3);
    assert_eq!(vp.look_at.x, placement.position.x);
    assert_eq!(vp.look_at.z, placement.position.z);

    // Wall partition on B2 is [w1, b2, w2] -- w2 is filtered index 2 of 3.
    let vp = r.resolve(&catalog, "w2", DisplayKind::Wall, "B2").unwrap();
    let placement = place_wall_poster(&platform, 2, 3);
    assert_eq!(vp.look_at.x, placement.position.x);
    assert_eq!(vp.look_at.z, placement.position.z);
}

#[test]
fn reordering_the_catalog_moves_the_viewpoint() {
    let r = resolver();
    let forward = ExhibitCatalog::new(vec![
        Exhibit::new("a", ["B1"], DisplayKind::Booth),
        Exhibit::new("b", ["B1"], DisplayKind::Booth),
    ]);
    let reversed = ExhibitCatalog::new(vec![
        Exhibit::new("b", ["B1"], DisplayKind::Booth),
        Exhibit::new("a", ["B1"], DisplayKind::Booth),
    ]);

    let before = r.resolve(&forward, "a", DisplayKind::Booth, "B1").unwrap();
    let after = r.resolve(&reversed, "a", DisplayKind::Booth, "B1").unwrap();
    assert_ne!(before.look_at, after.look_at);

    // And the swapped exhibit takes the vacated slot exactly.
    let b_after = r.resolve(&reversed, "b", DisplayKind::Booth, "B1").unwrap();
    assert_eq!(before.look_at, b_after.look_at);
}

// ---------------------------------------------------------------------------
// NotFound behavior
// ---------------------------------------------------------------------------

#[test]
fn missing_exhibit_or_platform_answers_none() {
    let r = resolver();
    let catalog = uniform_catalog("B2", 3, DisplayKind::Booth);

    assert!(r.resolve(&catalog, "e0", DisplayKind::Booth, "Z1").is_none());
    assert!(r.resolve(&catalog, "nope", DisplayKind::Booth, "B2").is_none());
    // Right exhibit, wrong partition.
    assert!(r.resolve(&catalog, "e0", DisplayKind::Wall, "B2").is_none());
    // Right exhibit, platform it is not a member of.
    assert!(r.resolve(&catalog, "e0", DisplayKind::Booth, "B3").is_none());
}

#[test]
fn fixed_viewpoints_answer_none_off_the_table() {
    let r = resolver();
    assert!(r.overview("Z1").is_none());
    assert!(r.reception("Z1").is_none());
    assert!(r.guideline(99).is_none());
}
