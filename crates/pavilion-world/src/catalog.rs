//! Exhibit records and the ordered, filtered per-platform views.
//!
//! Exhibit metadata is supplied by the content collaborator and never
//! mutated here. The catalog's only job is to derive, per platform, the
//! *stable* subsequences the layout engine and the viewpoint resolver both
//! consume: same catalog, same platform, same filter -> same ordered list,
//! every time. Order is input order; there is no sorting and no caching.

use serde::{Deserialize, Serialize};

use crate::platform::PlatformRegistry;
use crate::WorldError;

// ---------------------------------------------------------------------------
// DisplayKind
// ---------------------------------------------------------------------------

/// How an exhibit presents itself on a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayKind {
    /// Freestanding booth on the platform deck.
    Booth,
    /// Poster mounted on a perimeter wall.
    Wall,
    /// Both a booth and a wall poster.
    Both,
}

impl DisplayKind {
    /// Whether an exhibit of this kind appears in the booth partition.
    pub fn shows_booth(self) -> bool {
        matches!(self, Self::Booth | Self::Both)
    }

    /// Whether an exhibit of this kind appears in the wall partition.
    pub fn shows_wall(self) -> bool {
        matches!(self, Self::Wall | Self::Both)
    }
}

// ---------------------------------------------------------------------------
// Exhibit
// ---------------------------------------------------------------------------

/// A single exhibit record as supplied by the content collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exhibit {
    /// Stable id, unique across the catalog.
    pub id: String,
    /// Platforms this exhibit is shown on.
    pub platforms: Vec<String>,
    /// Booth, wall poster, or both.
    pub display: DisplayKind,
}

impl Exhibit {
    pub fn new(
        id: impl Into<String>,
        platforms: impl IntoIterator<Item = impl Into<String>>,
        display: DisplayKind,
    ) -> Self {
        Self {
            id: id.into(),
            platforms: platforms.into_iter().map(Into::into).collect(),
            display,
        }
    }

    /// Whether this exhibit is shown on the given platform.
    pub fn on_platform(&self, platform_id: &str) -> bool {
        self.platforms.iter().any(|p| p == platform_id)
    }
}

// ---------------------------------------------------------------------------
// ExhibitCatalog
// ---------------------------------------------------------------------------

/// Ordered, read-only view over the content collaborator's exhibit records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExhibitCatalog {
    exhibits: Vec<Exhibit>,
}

impl ExhibitCatalog {
    pub fn new(exhibits: Vec<Exhibit>) -> Self {
        Self { exhibits }
    }

    /// All exhibits, input order.
    pub fn exhibits(&self) -> &[Exhibit] {
        &self.exhibits
    }

    /// The booth partition for a platform: exhibits that are members of the
    /// platform and show a booth, in input order.
    pub fn booths_on(&self, platform_id: &str) -> Vec<&Exhibit> {
        self.exhibits
            .iter()
            .filter(|e| e.on_platform(platform_id) && e.display.shows_booth())
            .collect()
    }

    /// The wall-poster partition for a platform, in input order.
    pub fn posters_on(&self, platform_id: &str) -> Vec<&Exhibit> {
        self.exhibits
            .iter()
            .filter(|e| e.on_platform(platform_id) && e.display.shows_wall())
            .collect()
    }

    /// Check every platform reference against a registry.
    pub fn validate(&self, registry: &PlatformRegistry) -> Result<(), WorldError> {
        for e in &self.exhibits {
            for p in &e.platforms {
                if registry.get(p).is_none() {
                    return Err(WorldError::UnknownExhibitPlatform {
                        exhibit: e.id.clone(),
                        platform: p.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
