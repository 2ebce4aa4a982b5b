//! Core identifier types for circuit representation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of one placed component on the canvas.
///
/// Distinct from the catalog type id: many placements can share a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlacementId(pub String);

impl PlacementId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlacementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlacementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PlacementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A unique identifier for a net within one simulation run.
///
/// Ids are dense and assigned in component order, then terminal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetId(pub usize);

impl fmt::Display for NetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

/// A unique identifier for a circuit cluster within one simulation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CircuitId(pub usize);

impl fmt::Display for CircuitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "circuit-{}", self.0)
    }
}

/// One terminal of one placement: the endpoint of a wire and the unit of
/// net membership.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminalRef {
    pub component_id: PlacementId,
    pub terminal_id: String,
}

impl TerminalRef {
    pub fn new(component_id: impl Into<PlacementId>, terminal_id: impl Into<String>) -> Self {
        Self {
            component_id: component_id.into(),
            terminal_id: terminal_id.into(),
        }
    }
}

impl fmt::Display for TerminalRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.component_id, self.terminal_id)
    }
}
