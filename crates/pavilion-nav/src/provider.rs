//! The viewpoint seam between navigation and geometry.
//!
//! The navigation machine never reaches into the geometry crate directly:
//! it depends on the [`ViewpointProvider`] trait and gets a concrete
//! provider injected at construction. This keeps the machine testable with
//! canned providers and breaks what would otherwise be a navigation <->
//! viewpoint dependency knot.

use pavilion_world::catalog::{DisplayKind, ExhibitCatalog};
use pavilion_world::view::{ViewPoint, ViewpointResolver};

// ---------------------------------------------------------------------------
// ViewpointProvider
// ---------------------------------------------------------------------------

/// Resolves the camera pose framing an exhibit, or `None` if the exhibit is
/// not currently viewable on that platform.
pub trait ViewpointProvider {
    fn resolve(
        &self,
        exhibit_id: &str,
        display: DisplayKind,
        platform_id: &str,
    ) -> Option<ViewPoint>;
}

impl<P: ViewpointProvider + ?Sized> ViewpointProvider for Box<P> {
    fn resolve(
        &self,
        exhibit_id: &str,
        display: DisplayKind,
        platform_id: &str,
    ) -> Option<ViewPoint> {
        (**self).resolve(exhibit_id, display, platform_id)
    }
}

// ---------------------------------------------------------------------------
// WorldViewpoints
// ---------------------------------------------------------------------------

/// The production provider: a [`ViewpointResolver`] paired with the current
/// exhibit catalog.
///
/// The resolver is pure, so swapping the catalog is the only mutation; the
/// next resolve sees the new content with nothing to invalidate.
#[derive(Debug, Clone)]
pub struct WorldViewpoints {
    resolver: ViewpointResolver,
    catalog: ExhibitCatalog,
}

impl WorldViewpoints {
    pub fn new(resolver: ViewpointResolver, catalog: ExhibitCatalog) -> Self {
        Self { resolver, catalog }
    }

    /// Replace the catalog after a content update.
    pub fn set_catalog(&mut self, catalog: ExhibitCatalog) {
        self.catalog = catalog;
    }

    pub fn catalog(&self) -> &ExhibitCatalog {
        &self.catalog
    }

    pub fn resolver(&self) -> &ViewpointResolver {
        &self.resolver
    }
}

impl ViewpointProvider for WorldViewpoints {
    fn resolve(
        &self,
        exhibit_id: &str,
        display: DisplayKind,
        platform_id: &str,
    ) -> Option<ViewPoint> {
        self.resolver
            .resolve(&self.catalog, exhibit_id, display, platform_id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
