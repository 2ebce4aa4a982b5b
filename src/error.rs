//! Error types for the breadboard simulation engine.
//!
//! These cover misuse of the engine API and scene loading. Wiring mistakes
//! are *not* errors in this sense: they are reported as data through
//! [`SimulationError`](crate::circuit::SimulationError) in every
//! [`SimulationResult`](crate::solver::SimulationResult).

use thiserror::Error;

/// Result type alias using [`BreadboardError`].
pub type Result<T> = std::result::Result<T, BreadboardError>;

/// Unified error type for all engine operations that can fail.
#[derive(Error, Debug)]
pub enum BreadboardError {
    // ============ Placement Errors ============
    /// Catalog has no entry for the requested type
    #[error("Unknown component type '{component_type}'")]
    UnknownComponentType { component_type: String },

    /// A placement with this id already exists
    #[error("Duplicate placement id '{id}'")]
    DuplicatePlacement { id: String },

    /// No placement with this id exists
    #[error("Placement '{id}' not found")]
    PlacementNotFound { id: String },

    /// A setter was applied to a component of the wrong kind
    #[error("Placement '{id}' is a {actual}, expected a {expected}")]
    WrongComponentKind {
        id: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A property value is out of range
    #[error("Invalid value for '{property}' on '{id}': {message}")]
    InvalidProperty {
        id: String,
        property: &'static str,
        message: String,
    },

    // ============ Scene Errors ============
    /// The scene document could not be decoded
    #[error("Invalid scene document: {source}")]
    SceneParse {
        #[source]
        source: serde_json::Error,
    },

    /// Error reading a scene file
    #[error("Failed to read scene file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error encoding a result for output
    #[error("Failed to encode simulation result: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },

    // ============ WASM Errors ============
    /// WASM-specific error
    #[cfg(feature = "wasm")]
    #[error("WASM error: {message}")]
    WasmError { message: String },
}

impl BreadboardError {
    /// Create an unknown component type error
    pub fn unknown_type(component_type: impl Into<String>) -> Self {
        Self::UnknownComponentType {
            component_type: component_type.into(),
        }
    }

    /// Create a placement-not-found error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::PlacementNotFound { id: id.into() }
    }

    /// Create an invalid property error
    pub fn invalid_property(
        id: impl Into<String>,
        property: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidProperty {
            id: id.into(),
            property,
            message: message.into(),
        }
    }
}
