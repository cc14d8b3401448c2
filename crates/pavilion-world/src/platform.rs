//! Platform geometry table, classification, and the connection graph.
//!
//! Platforms are loaded once (from the built-in table or from JSON config)
//! and never mutated afterwards. Identity is the string id; the id prefix
//! encodes the orientation class: `S` is the central hub, `B` platforms form
//! the ground ring at hub height, `Q` platforms float elevated above it.
//!
//! The registry also carries the static light-line connection graph between
//! platforms, used by the rendering collaborator to draw and highlight
//! transport routes.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_6;

use crate::WorldError;

/// Rotation offset shared by every hexagonal platform: the hexagons are
/// turned half a sector so an edge (not a vertex) faces the world origin.
pub const HEX_ROTATION: f32 = FRAC_PI_6;

// ---------------------------------------------------------------------------
// PlatformKind
// ---------------------------------------------------------------------------

/// Orientation class of a platform, encoded in the id prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    /// The central marketplace platform (`S`).
    Hub,
    /// Ground-ring platforms at hub height (`B1`..`B3`).
    Ground,
    /// Elevated platforms floating above the ring (`Q1`..`Q3`).
    Elevated,
}

impl PlatformKind {
    /// Classify a platform id by its prefix convention.
    ///
    /// Returns `None` for ids outside the convention.
    pub fn classify(id: &str) -> Option<Self> {
        match id.chars().next() {
            Some('S') => Some(Self::Hub),
            Some('B') => Some(Self::Ground),
            Some('Q') => Some(Self::Elevated),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

/// A circular/hexagonal platform hosting exhibits.
///
/// `radius` is both the platform radius and the hexagon edge length (the
/// booth arc and the poster walls are derived from it). `rotation_offset`
/// turns the hexagon's sector grid in the world plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Stable id, e.g. `"S"`, `"B2"`, `"Q1"`. Identity of the platform.
    pub id: String,
    /// Display name for labels.
    pub name: String,
    /// World-space center of the platform deck.
    pub center: Vec3,
    /// Platform radius / hexagon edge length.
    pub radius: f32,
    /// Rotation of the hexagon sector grid, radians.
    pub rotation_offset: f32,
    /// Orientation class (hub / ground ring / elevated).
    pub kind: PlatformKind,
}

impl Platform {
    /// Build a platform with the standard hex rotation, deriving the kind
    /// from the id prefix (defaults to `Ground` outside the convention).
    pub fn new(id: impl Into<String>, name: impl Into<String>, center: Vec3, radius: f32) -> Self {
        let id = id.into();
        let kind = PlatformKind::classify(&id).unwrap_or(PlatformKind::Ground);
        Self {
            id,
            name: name.into(),
            center,
            radius,
            rotation_offset: HEX_ROTATION,
            kind,
        }
    }
}

// ---------------------------------------------------------------------------
// Connections
// ---------------------------------------------------------------------------

/// Visual weight of a light-line connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionKind {
    /// Hub spokes (S to every other platform).
    Primary,
    /// Vertical links between the ground ring and the elevated platforms.
    Secondary,
    /// Ring links among peers (B ring, Q ring).
    Ring,
}

/// A light-line between two platforms. Undirected for lookup purposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub from: String,
    pub to: String,
    pub kind: ConnectionKind,
}

impl Connection {
    fn new(from: &str, to: &str, kind: ConnectionKind) -> Self {
        Self {
            from: from.to_owned(),
            to: to.to_owned(),
            kind,
        }
    }

    /// Whether this connection touches the given platform.
    pub fn touches(&self, platform_id: &str) -> bool {
        self.from == platform_id || self.to == platform_id
    }
}

// ---------------------------------------------------------------------------
// PlatformRegistry
// ---------------------------------------------------------------------------

/// Serialized shape of a registry config file.
#[derive(Debug, Serialize, Deserialize)]
struct RegistryConfig {
    platforms: Vec<Platform>,
    #[serde(default)]
    connections: Vec<Connection>,
}

/// Immutable table of platform geometry plus the connection graph.
///
/// Lookup misses answer `None`; construction validates ids and radii and
/// answers [`WorldError`] on malformed input.
#[derive(Debug, Clone)]
pub struct PlatformRegistry {
    platforms: Vec<Platform>,
    connections: Vec<Connection>,
}

impl PlatformRegistry {
    /// The built-in seven-platform world: the hub, the B ground ring, and
    /// the three elevated Q platforms.
    pub fn builtin() -> Self {
        use ConnectionKind::{Primary, Ring, Secondary};
        let platforms = vec![
            Platform::new("S", "Marketplace", Vec3::new(0.0, 8.0, 0.0), 8.0),
            Platform::new("B1", "Early Years", Vec3::new(-22.0, 8.0, 0.0), 10.0),
            Platform::new("B2", "School & Youth", Vec3::new(0.0, 8.0, 18.0), 10.0),
            Platform::new("B3", "Adult Learning", Vec3::new(22.0, 8.0, 0.0), 10.0),
            Platform::new("Q1", "Research", Vec3::new(-16.0, 18.0, -14.0), 12.0),
            Platform::new("Q2", "International", Vec3::new(0.0, 24.0, -22.0), 12.0),
            Platform::new("Q3", "Digital", Vec3::new(16.0, 18.0, -14.0), 12.0),
        ];
        let connections = vec![
            Connection::new("S", "B1", Primary),
            Connection::new("S", "B2", Primary),
            Connection::new("S", "B3", Primary),
            Connection::new("S", "Q1", Primary),
            Connection::new("S", "Q2", Primary),
            Connection::new("S", "Q3", Primary),
            Connection::new("B1", "B2", Ring),
            Connection::new("B2", "B3", Ring),
            Connection::new("B3", "B1", Ring),
            Connection::new("Q1", "Q2", Ring),
            Connection::new("Q2", "Q3", Ring),
            Connection::new("Q3", "Q1", Ring),
            Connection::new("B1", "Q1", Secondary),
            Connection::new("B3", "Q3", Secondary),
        ];
        Self::from_parts(platforms, connections)
            .expect("built-in platform table is valid")
    }

    /// Build a registry from explicit parts, validating ids, radii, and
    /// connection endpoints.
    pub fn from_parts(
        platforms: Vec<Platform>,
        connections: Vec<Connection>,
    ) -> Result<Self, WorldError> {
        for (i, p) in platforms.iter().enumerate() {
            if p.radius <= 0.0 {
                return Err(WorldError::InvalidRadius {
                    id: p.id.clone(),
                    radius: p.radius,
                });
            }
            if platforms[..i].iter().any(|q| q.id == p.id) {
                return Err(WorldError::DuplicatePlatform { id: p.id.clone() });
            }
        }
        for c in &connections {
            for endpoint in [&c.from, &c.to] {
                if !platforms.iter().any(|p| &p.id == endpoint) {
                    return Err(WorldError::UnknownConnectionEndpoint {
                        platform: endpoint.clone(),
                    });
                }
            }
        }
        Ok(Self {
            platforms,
            connections,
        })
    }

    /// Load a registry from a JSON config string.
    pub fn from_json(json: &str) -> Result<Self, WorldError> {
        let config: RegistryConfig =
            serde_json::from_str(json).map_err(|e| WorldError::MalformedConfig {
                details: e.to_string(),
            })?;
        Self::from_parts(config.platforms, config.connections)
    }

    /// Serialize the registry back to JSON config form.
    pub fn to_json(&self) -> String {
        let config = RegistryConfig {
            platforms: self.platforms.clone(),
            connections: self.connections.clone(),
        };
        serde_json::to_string_pretty(&config).expect("registry serializes")
    }

    /// Look up a platform by id.
    pub fn get(&self, id: &str) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.id == id)
    }

    /// Ordered iterator over all platform ids (table order).
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.platforms.iter().map(|p| p.id.as_str())
    }

    /// Ordered iterator over all platforms.
    pub fn platforms(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter()
    }

    /// The first platform of the given kind, if any.
    pub fn first_of_kind(&self, kind: PlatformKind) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.kind == kind)
    }

    /// All connections in the graph.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Connections touching the given platform.
    pub fn connections_for<'a>(
        &'a self,
        platform_id: &'a str,
    ) -> impl Iterator<Item = &'a Connection> + 'a {
        self.connections
            .iter()
            .filter(move |c| c.touches(platform_id))
    }

    /// Midpoint between two connected platforms, raised slightly for the
    /// route label. `None` if either endpoint is unknown.
    pub fn connection_midpoint(&self, from: &str, to: &str) -> Option<Vec3> {
        let a = self.get(from)?.center;
        let b = self.get(to)?.center;
        Some((a + b) * 0.5 + Vec3::new(0.0, 1.0, 0.0))
    }

    /// Number of platforms in the table.
    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
