//! Pavilion World -- deterministic geometry core for the exhibition space.
//!
//! This crate computes *where things stand* and *where the camera must go*
//! in a world of floating platforms hosting exhibits. It has three parts:
//!
//! 1. [`PlatformRegistry`](platform::PlatformRegistry) -- the immutable
//!    platform geometry table plus the connection graph between platforms.
//! 2. The layout engine ([`layout`]) -- pure placement formulas mapping
//!    `(platform, index, count)` to a position and facing angle, for
//!    freestanding booths and wall-mounted posters.
//! 3. The viewpoint resolver ([`view`]) -- the exact inverse: given an
//!    exhibit id it re-derives the same placement and produces the camera
//!    pose that frames it.
//!
//! Everything here is a pure function of its inputs. Placements are never
//! cached: the resolver recomputes the same filtered exhibit list and the
//! same formulas the layout engine uses, so the two can never disagree.
//!
//! # Quick Start
//!
//! ```
//! use pavilion_world::prelude::*;
//!
//! let registry = PlatformRegistry::builtin();
//! let catalog = ExhibitCatalog::new(vec![
//!     Exhibit::new("p1", ["B2"], DisplayKind::Booth),
//!     Exhibit::new("p2", ["B2", "Q3"], DisplayKind::Both),
//! ]);
//!
//! let resolver = ViewpointResolver::new(registry);
//! let vp = resolver
//!     .resolve(&catalog, "p1", DisplayKind::Booth, "B2")
//!     .expect("p1 exhibits a booth on B2");
//!
//! // The camera stands exactly one standoff in front of the exhibit.
//! assert!(((vp.camera - vp.look_at).length() - vp.standoff).abs() < 1e-3);
//! ```

#![deny(unsafe_code)]

pub mod catalog;
pub mod layout;
pub mod platform;
pub mod view;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced when building or validating world data.
///
/// Lookup misses are *not* errors: unknown platform or exhibit ids at query
/// time answer `None` (the camera simply does not move). `WorldError` covers
/// malformed configuration, which is worth failing loudly at load time.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// Two platforms in the registry share an id.
    #[error("duplicate platform id '{id}' in registry")]
    DuplicatePlatform {
        id: String,
    },

    /// A platform was configured with a non-positive radius.
    #[error("platform '{id}' has non-positive radius {radius}")]
    InvalidRadius {
        id: String,
        radius: f32,
    },

    /// A connection endpoint names a platform the registry does not hold.
    #[error("connection references unknown platform '{platform}'")]
    UnknownConnectionEndpoint {
        platform: String,
    },

    /// An exhibit claims membership of a platform the registry does not hold.
    #[error("exhibit '{exhibit}' references unknown platform '{platform}'")]
    UnknownExhibitPlatform {
        exhibit: String,
        platform: String,
    },

    /// The registry config could not be parsed.
    #[error("failed to parse registry config: {details}")]
    MalformedConfig {
        details: String,
    },
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::catalog::{DisplayKind, Exhibit, ExhibitCatalog};
    pub use crate::layout::{
        booth_layout, place_booth, place_wall_poster, poster_layout, Placement,
    };
    pub use crate::platform::{
        Connection, ConnectionKind, Platform, PlatformKind, PlatformRegistry,
    };
    pub use crate::view::{PlacedExhibit, ViewPoint, ViewpointResolver};
    pub use crate::WorldError;
    pub use glam::Vec3;
}
