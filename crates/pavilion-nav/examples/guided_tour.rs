//! Headless walkthrough of the exhibition space.
//!
//! Builds the built-in world, lays out a platform, and drives the
//! navigation machine through a cross-platform exhibit visit, printing the
//! events a renderer would consume.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example guided_tour -p pavilion-nav

use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pavilion_nav::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let registry = PlatformRegistry::builtin();
    let catalog = ExhibitCatalog::new(vec![
        Exhibit::new("kita", ["B1"], DisplayKind::Booth),
        Exhibit::new("school-cloud", ["B2"], DisplayKind::Both),
        Exhibit::new("adult-lab", ["B3", "Q3"], DisplayKind::Booth),
        Exhibit::new("study-2026", ["Q1"], DisplayKind::Wall),
        Exhibit::new("eu-exchange", ["Q2"], DisplayKind::Wall),
        Exhibit::new("makerspace", ["B2"], DisplayKind::Booth),
        Exhibit::new("reading-week", ["B2"], DisplayKind::Booth),
    ]);
    catalog.validate(&registry)?;

    let resolver = ViewpointResolver::new(registry);

    // What the renderer would instantiate on B2.
    for placed in resolver.placed_booths(&catalog, "B2") {
        info!(
            exhibit = %placed.exhibit_id,
            x = placed.position.x,
            z = placed.position.z,
            facing = placed.facing_angle.to_degrees(),
            "booth placed"
        );
    }

    let provider = WorldViewpoints::new(resolver, catalog);
    let mut nav = NavigationMachine::new(provider, "S");

    // A visitor on the hub clicks the wall poster on Q1.
    let mut now = Instant::now();
    nav.navigate_to_exhibit("study-2026", DisplayKind::Wall, "Q1", now);

    // Simulated frame loop: the camera animation takes 2.5 seconds, then
    // the renderer acknowledges.
    let frame = Duration::from_millis(100);
    for tick in 0..40 {
        now += frame;
        if tick == 25 {
            nav.finish_transport(now);
        }
        for event in nav.poll(now) {
            match event {
                NavEvent::TransportStarted { from, to } => {
                    info!(%from, %to, "transport started");
                }
                NavEvent::TransportArrived { platform } => {
                    info!(%platform, "transport arrived");
                }
                NavEvent::ViewpointReady {
                    exhibit_id,
                    viewpoint,
                } => {
                    info!(
                        %exhibit_id,
                        camera = ?viewpoint.camera,
                        look_at = ?viewpoint.look_at,
                        "camera pose published"
                    );
                }
            }
        }
    }

    info!(platform = nav.state().current_platform(), "tour finished");
    Ok(())
}
