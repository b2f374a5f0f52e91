//! Error kinds raised by the geometry core.
//!
//! An empty polygon intersection is not an error; see `IntersectionResult::is_empty`.

/// Failures of the geometry operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeoError {
    /// Identical points where a direction is required.
    #[error("bearing is undefined between identical points")]
    DegenerateInput,

    /// Longitude scaling requested at (or numerically at) a pole.
    #[error("longitude scaling is singular at latitude {latitude}")]
    Singularity { latitude: f64 },

    #[error("invalid sector: {0}")]
    InvalidSector(String),

    #[error("invalid drift scenario: {0}")]
    InvalidScenario(String),

    #[error("coordinate out of range: ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// Input polygon has the wrong shape (too few vertices, non-finite values).
    #[error("malformed polygon: {0}")]
    MalformedPolygon(String),
}

pub type Result<T> = std::result::Result<T, GeoError>;
