//! The navigation state machine: transport sequencing and UI state.
//!
//! The machine rests in one of two states -- idle on `current_platform`, or
//! transporting toward `transport_target` -- plus a single slot for a
//! deferred "look at exhibit X" request that is resolved once the transport
//! completes and a short settle delay has passed.
//!
//! Time never comes from a hidden clock: every operation that arms or checks
//! a timer takes `now` explicitly, and [`NavigationMachine::poll`] fires
//! whatever deadlines have passed. The rendering collaborator acknowledges
//! its camera animation with [`NavigationMachine::finish_transport`]; the
//! fallback deadline exists only so a renderer that never calls back cannot
//! leave the machine stuck in Transporting.
//!
//! Outputs are [`NavEvent`]s drained in FIFO order, never callbacks: the
//! renderer polls once per frame and applies whatever came out.
//!
//! # Example
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
//! let now = Instant::now();
//! nav.navigate_to_exhibit("p5", DisplayKind::Booth, "B2", now);
//! assert!(nav.state().is_transporting());
//!
//! nav.finish_transport(now);
//! let events = nav.poll(now + VIEW_SETTLE_DELAY);
//! assert!(events
//!     .iter()
//!     .any(|e| matches!(e, NavEvent::ViewpointReady { .. })));
//! ```

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use pavilion_world::catalog::DisplayKind;
use pavilion_world::view::ViewPoint;

use crate::provider::ViewpointProvider;

// ---------------------------------------------------------------------------
// Timing constants
// ---------------------------------------------------------------------------

/// Safety net: a transport the renderer never acknowledges is forced to
/// arrive after this long. Longer than any real camera animation.
pub const TRANSPORT_FALLBACK: Duration = Duration::from_secs(4);

/// Pause between arrival and resolving a pending view request, so the
/// camera settles before it is re-aimed.
pub const VIEW_SETTLE_DELAY: Duration = Duration::from_millis(400);

// ---------------------------------------------------------------------------
// PendingView
// ---------------------------------------------------------------------------

/// A deferred "look at exhibit X" request, queued while a transport is in
/// flight and consumed exactly once after arrival.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingView {
    pub exhibit_id: String,
    pub display: DisplayKind,
    pub platform_id: String,
}

// ---------------------------------------------------------------------------
// NavEvent
// ---------------------------------------------------------------------------

/// Output events for the rendering collaborator, drained FIFO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NavEvent {
    /// A transport began; the renderer should start its camera animation
    /// and call [`NavigationMachine::finish_transport`] when it ends.
    TransportStarted {
        from: String,
        to: String,
    },
    /// The machine is at rest on a new platform.
    TransportArrived {
        platform: String,
    },
    /// A viewpoint is ready to apply to the camera.
    ViewpointReady {
        exhibit_id: String,
        viewpoint: ViewPoint,
    },
}

// ---------------------------------------------------------------------------
// NavState
// ---------------------------------------------------------------------------

/// The machine's externally readable state. Mutated only by
/// [`NavigationMachine`] operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavState {
    current_platform: String,
    transport_target: Option<String>,
    is_transporting: bool,
    pending_view: Option<PendingView>,
    hovered: Option<String>,
    selected: Option<String>,
    active_aspect: Option<String>,
    hovered_destination: Option<String>,
}

impl NavState {
    fn new(start_platform: String) -> Self {
        Self {
            current_platform: start_platform,
            transport_target: None,
            is_transporting: false,
            pending_view: None,
            hovered: None,
            selected: None,
            active_aspect: None,
            hovered_destination: None,
        }
    }

    /// The platform the viewer rests on (or is departing from).
    pub fn current_platform(&self) -> &str {
        &self.current_platform
    }

    /// The in-flight transport destination, if any.
    pub fn transport_target(&self) -> Option<&str> {
        self.transport_target.as_deref()
    }

    pub fn is_transporting(&self) -> bool {
        self.is_transporting
    }

    /// The queued deferred view request, if any.
    pub fn pending_view(&self) -> Option<&PendingView> {
        self.pending_view.as_ref()
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The platform whose aspect panel is open, if any.
    pub fn active_aspect(&self) -> Option<&str> {
        self.active_aspect.as_deref()
    }

    /// The transport button currently hovered, for route highlighting.
    pub fn hovered_destination(&self) -> Option<&str> {
        self.hovered_destination.as_deref()
    }
}

// ---------------------------------------------------------------------------
// NavigationMachine
// ---------------------------------------------------------------------------

/// Sequences camera movement between platforms and defers view requests
/// until the transport they depend on completes.
///
/// Single-threaded by design: operations are atomic because the runtime
/// never preempts mid-operation, and `is_transporting` is the only mutual
/// exclusion needed to serialize transports.
pub struct NavigationMachine<P> {
    provider: P,
    state: NavState,
    fallback_deadline: Option<Instant>,
    settle_deadline: Option<Instant>,
    events: VecDeque<NavEvent>,
}

impl<P: ViewpointProvider> NavigationMachine<P> {
    /// Create a machine at rest on `start_platform` with the injected
    /// viewpoint provider.
    pub fn new(provider: P, start_platform: impl Into<String>) -> Self {
        Self {
            provider,
            state: NavState::new(start_platform.into()),
            fallback_deadline: None,
            settle_deadline: None,
            events: VecDeque::new(),
        }
    }

    /// Read-only view of the machine state.
    pub fn state(&self) -> &NavState {
        &self.state
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Mutable access to the provider, e.g. to swap in a new catalog.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    // -- transport ----------------------------------------------------------

    /// Begin a transport toward `target`.
    ///
    /// No-op while a transport is in flight or when already on `target`.
    /// Arms the fallback deadline; the renderer is expected to call
    /// [`finish_transport`](Self::finish_transport) first.
    pub fn start_transport(&mut self, target: &str, now: Instant) {
        if self.state.is_transporting {
            debug!(destination = target, "transport already in flight, ignoring");
            return;
        }
        if target == self.state.current_platform {
            debug!(destination = target, "already on platform, ignoring transport");
            return;
        }
        self.state.transport_target = Some(target.to_owned());
        self.state.is_transporting = true;
        self.fallback_deadline = Some(now + TRANSPORT_FALLBACK);
        debug!(from = %self.state.current_platform, to = target, "transport started");
        self.events.push_back(NavEvent::TransportStarted {
            from: self.state.current_platform.clone(),
            to: target.to_owned(),
        });
    }

    /// Acknowledge transport completion: the viewer is now on the target
    /// platform. No-op when not transporting.
    ///
    /// If a view request is pending, its resolution is deferred one settle
    /// delay and delivered by a later [`poll`](Self::poll).
    pub fn finish_transport(&mut self, now: Instant) {
        if !self.state.is_transporting {
            debug!("finish_transport while idle, ignoring");
            return;
        }
        let Some(target) = self.state.transport_target.take() else {
            self.state.is_transporting = false;
            return;
        };
        self.state.current_platform = target.clone();
        self.state.is_transporting = false;
        self.fallback_deadline = None;
        debug!(platform = %target, "transport arrived");
        self.events
            .push_back(NavEvent::TransportArrived { platform: target });

        if self.state.pending_view.is_some() {
            self.settle_deadline = Some(now + VIEW_SETTLE_DELAY);
        }
    }

    /// Aim the camera at an exhibit, transporting first when it lives on
    /// another platform.
    ///
    /// On the current platform the viewpoint is resolved and published
    /// immediately. Otherwise the request is queued (replacing any earlier
    /// pending request -- there is only one slot) and a transport starts.
    pub fn navigate_to_exhibit(
        &mut self,
        exhibit_id: &str,
        display: DisplayKind,
        platform_id: &str,
        now: Instant,
    ) {
        if platform_id == self.state.current_platform {
            self.publish_viewpoint(exhibit_id, display, platform_id);
            return;
        }
        if let Some(previous) = self.state.pending_view.replace(PendingView {
            exhibit_id: exhibit_id.to_owned(),
            display,
            platform_id: platform_id.to_owned(),
        }) {
            debug!(replaced = %previous.exhibit_id, "pending view request superseded");
        }
        self.start_transport(platform_id, now);
    }

    /// Fire any deadlines that have passed and drain the event queue.
    ///
    /// Drives the fallback arrival (when the renderer never acknowledged)
    /// and the settle-delayed resolution of a pending view request.
    pub fn poll(&mut self, now: Instant) -> Vec<NavEvent> {
        if let Some(deadline) = self.fallback_deadline {
            if now >= deadline && self.state.is_transporting {
                warn!(
                    destination = ?self.state.transport_target,
                    "transport never acknowledged, forcing arrival"
                );
                self.finish_transport(now);
            }
        }
        if let Some(deadline) = self.settle_deadline {
            if now >= deadline && !self.state.is_transporting {
                self.settle_deadline = None;
                self.resolve_pending();
            }
        }
        self.drain_events()
    }

    /// Drain queued events in FIFO order.
    pub fn drain_events(&mut self) -> Vec<NavEvent> {
        self.events.drain(..).collect()
    }

    // -- UI state -----------------------------------------------------------

    /// Select an exhibit (or clear the selection). Selecting closes an open
    /// aspect panel.
    pub fn select_exhibit(&mut self, exhibit_id: Option<&str>) {
        self.state.selected = exhibit_id.map(ToOwned::to_owned);
        if self.state.selected.is_some() {
            self.state.active_aspect = None;
        }
    }

    pub fn set_hovered(&mut self, exhibit_id: Option<&str>) {
        self.state.hovered = exhibit_id.map(ToOwned::to_owned);
    }

    /// Toggle the aspect panel for a platform. Opening it clears the
    /// exhibit selection.
    pub fn toggle_aspect(&mut self, platform_id: &str) {
        if self.state.active_aspect.as_deref() == Some(platform_id) {
            self.state.active_aspect = None;
        } else {
            self.state.active_aspect = Some(platform_id.to_owned());
            self.state.selected = None;
        }
    }

    pub fn set_hovered_destination(&mut self, platform_id: Option<&str>) {
        self.state.hovered_destination = platform_id.map(ToOwned::to_owned);
    }

    // -- internal -----------------------------------------------------------

    /// Consume the pending view request: resolve it if the transport landed
    /// on the platform it asked for, drop it otherwise.
    fn resolve_pending(&mut self) {
        let Some(pending) = self.state.pending_view.take() else {
            return;
        };
        if pending.platform_id != self.state.current_platform {
            warn!(
                exhibit = %pending.exhibit_id,
                requested = %pending.platform_id,
                arrived = %self.state.current_platform,
                "dropping stale view request after transport"
            );
            return;
        }
        self.publish_viewpoint(&pending.exhibit_id, pending.display, &pending.platform_id);
    }

    fn publish_viewpoint(&mut self, exhibit_id: &str, display: DisplayKind, platform_id: &str) {
        match self.provider.resolve(exhibit_id, display, platform_id) {
            Some(viewpoint) => self.events.push_back(NavEvent::ViewpointReady {
                exhibit_id: exhibit_id.to_owned(),
                viewpoint,
            }),
            None => warn!(
                exhibit = exhibit_id,
                platform = platform_id,
                "exhibit not viewable, dropping view request"
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
