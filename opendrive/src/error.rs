//! Error types shared by the road network core.

use thiserror::Error;

/// Failures raised by a single geometry primitive.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    /// Sampling produced no candidate point (degenerate primitive).
    #[error("no nearest point found on geometry starting at s={s}")]
    NoNearestPoint { s: f64 },
    #[error("geometry length must be positive and finite, got {length}")]
    InvalidLength { length: f64 },
    #[error("geometry {field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },
}

/// Errors surfaced at the boundary of a query or an editing operation.
#[derive(Debug, Error)]
pub enum OdrError {
    #[error("no geometry found at s={s} on road {road}")]
    GeometryNotFoundAt { s: f64, road: u32 },
    #[error("no lane section found at s={s} on road {road}")]
    LaneSectionNotFound { s: f64, road: u32 },
    #[error("lane section at s={s} lies outside [0, {length}) on road {road}")]
    LaneSectionOutOfRange { s: f64, length: f64, road: u32 },
    #[error("lane {lane} not found in lane section {section} of road {road}")]
    LaneNotFound { lane: i32, section: usize, road: u32 },
    #[error("lane {0} already exists in this lane section")]
    DuplicateLane(i32),
    #[error("road {0} not found")]
    RoadNotFound(u32),
    #[error("junction {0} not found")]
    JunctionNotFound(u32),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error("invalid OpenDRIVE document: {0}")]
    Xml(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<roxmltree::Error> for OdrError {
    fn from(e: roxmltree::Error) -> Self {
        OdrError::Xml(e.to_string())
    }
}

impl From<std::fmt::Error> for OdrError {
    fn from(e: std::fmt::Error) -> Self {
        OdrError::Xml(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OdrError>;
