//! Property tests for the navigation machine.
//!
//! Random operation sequences must never break the machine's invariants:
//! the transport flag and target move together, selection and the aspect
//! panel are mutually exclusive, and no sequence can leave the machine
//! stuck in Transporting past the fallback deadline.

use std::time::{Duration, Instant};

use proptest::prelude::*;

use pavilion_nav::machine::{NavigationMachine, TRANSPORT_FALLBACK};
use pavilion_nav::provider::WorldViewpoints;
use pavilion_world::catalog::{DisplayKind, Exhibit, ExhibitCatalog};
use pavilion_world::platform::PlatformRegistry;
use pavilion_world::view::ViewpointResolver;

const PLATFORMS: [&str; 4] = ["S", "B2", "Q1", "Q3"];
const EXHIBITS: [&str; 3] = ["e0", "e1", "e2"];

/// Operations the UI can throw at the machine.
#[derive(Debug, Clone)]
enum NavOp {
    StartTransport(usize),
    FinishTransport,
    Navigate(usize, usize),
    Poll(u64),
    Select(Option<usize>),
    ToggleAspect(usize),
    Hover(Option<usize>),
}

fn nav_op_strategy() -> impl Strategy<Value = NavOp> {
    prop_oneof![
        (0..PLATFORMS.len()).prop_map(NavOp::StartTransport),
        Just(NavOp::FinishTransport),
        (0..EXHIBITS.len(), 0..PLATFORMS.len()).prop_map(|(e, p)| NavOp::Navigate(e, p)),
        (0u64..5000).prop_map(NavOp::Poll),
        prop::option::of(0..EXHIBITS.len()).prop_map(NavOp::Select),
        (0..PLATFORMS.len()).prop_map(NavOp::ToggleAspect),
        prop::option::of(0..EXHIBITS.len()).prop_map(NavOp::Hover),
    ]
}

fn machine() -> NavigationMachine<WorldViewpoints> {
    let catalog = ExhibitCatalog::new(
        EXHIBITS
            .iter()
            .map(|id| Exhibit::new(*id, ["S", "B2", "Q1"], DisplayKind::Both))
            .collect(),
    );
    let provider = WorldViewpoints::new(
        ViewpointResolver::new(PlatformRegistry::builtin()),
        catalog,
    );
    NavigationMachine::new(provider, "S")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn random_ops_preserve_invariants(ops in prop::collection::vec(nav_op_strategy(), 1..60)) {
        let mut nav = machine();
        let mut now = Instant::now();

        for op in ops {
            match op {
                NavOp::StartTransport(p) => nav.start_transport(PLATFORMS[p], now),
                NavOp::FinishTransport => nav.finish_transport(now),
                NavOp::Navigate(e, p) => {
                    nav.navigate_to_exhibit(EXHIBITS[e], DisplayKind::Booth, PLATFORMS[p], now);
                }
                NavOp::Poll(ms) => {
                    now += Duration::from_millis(ms);
                    let _ = nav.poll(now);
                }
                NavOp::Select(e) => nav.select_exhibit(e.map(|i| EXHIBITS[i])),
                NavOp::ToggleAspect(p) => nav.toggle_aspect(PLATFORMS[p]),
                NavOp::Hover(e) => nav.set_hovered(e.map(|i| EXHIBITS[i])),
            }

            let state = nav.state();
            // The transport flag and target always move together.
            prop_assert_eq!(state.is_transporting(), state.transport_target().is_some());
            // The viewer is always somewhere known.
            prop_assert!(PLATFORMS.contains(&state.current_platform()));
            // Selection and the aspect panel never coexist.
            prop_assert!(state.selected().is_none() || state.active_aspect().is_none());
        }

        // No sequence can leave the machine stuck: one fallback period later
        // any in-flight transport has been forced to arrive.
        now += TRANSPORT_FALLBACK;
        let _ = nav.poll(now);
        prop_assert!(!nav.state().is_transporting());
    }

    #[test]
    fn drained_events_never_replay(ops in prop::collection::vec(nav_op_strategy(), 1..30)) {
        let mut nav = machine();
        let mut now = Instant::now();

        for op in ops {
            if let NavOp::Poll(ms) = &op {
                now += Duration::from_millis(*ms);
            }
            match op {
                NavOp::StartTransport(p) => nav.start_transport(PLATFORMS[p], now),
                NavOp::FinishTransport => nav.finish_transport(now),
                NavOp::Navigate(e, p) => {
                    nav.navigate_to_exhibit(EXHIBITS[e], DisplayKind::Booth, PLATFORMS[p], now);
                }
                NavOp::Poll(_) => {
                    let _ = nav.poll(now);
                }
                NavOp::Select(e) => nav.select_exhibit(e.map(|i| EXHIBITS[i])),
                NavOp::ToggleAspect(p) => nav.toggle_aspect(PLATFORMS[p]),
                NavOp::Hover(e) => nav.set_hovered(e.map(|i| EXHIBITS[i])),
            }
        }

        // Drain whatever is queued; an immediate second drain is empty.
        let _ = nav.drain_events();
        prop_assert!(nav.drain_events().is_empty());
    }
}
