//! Pavilion Nav -- transport sequencing for the exhibition space.
//!
//! This crate builds on [`pavilion_world`] to sequence camera movement
//! between platforms: a single in-flight transport, a single deferred view
//! request resolved after arrival, and the transient hover/selection state
//! the UI shares. The geometry stays in `pavilion_world`; this crate only
//! decides *when* a resolved viewpoint may be applied.
//!
//! The machine depends on viewpoints through the
//! [`ViewpointProvider`](provider::ViewpointProvider) trait and is handed a
//! concrete provider at construction -- typically
//! [`WorldViewpoints`](provider::WorldViewpoints), which pairs the pure
//! resolver with the current exhibit catalog.
//!
//! # Quick Start
//!
//! ```
//! use std::time::Instant;
//! use pavilion_nav::prelude::*;
//!
//! let registry = PlatformRegistry::builtin();
//! let catalog = ExhibitCatalog::new(vec![
//!     Exhibit::new("p5", ["B2"], DisplayKind::Booth),
//! ]);
//! let provider = WorldViewpoints::new(ViewpointResolver::new(registry), catalog);
//! let mut nav = NavigationMachine::new(provider, "S");
//!
//! // Asking for an exhibit on another platform queues the view request
//! // and starts the transport.
//! let now = Instant::now();
//! nav.navigate_to_exhibit("p5", DisplayKind::Booth, "B2", now);
//! assert_eq!(nav.state().transport_target(), Some("B2"));
//!
//! // The renderer acknowledges its animation; after the settle delay the
//! // deferred viewpoint is published.
//! nav.finish_transport(now);
//! let events = nav.poll(now + VIEW_SETTLE_DELAY);
//! assert!(events
//!     .iter()
//!     .any(|e| matches!(e, NavEvent::ViewpointReady { .. })));
//! ```

#![deny(unsafe_code)]

pub mod machine;
pub mod provider;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

/// Re-export the geometry crate for convenience.
pub use pavilion_world;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    // Re-export everything from the world prelude.
    pub use pavilion_world::prelude::*;

    pub use crate::machine::{
        NavEvent, NavState, NavigationMachine, PendingView, TRANSPORT_FALLBACK, VIEW_SETTLE_DELAY,
    };
    pub use crate::provider::{ViewpointProvider, WorldViewpoints};
}
