//! Terminal definitions shared by every catalog entry.

use serde::{Deserialize, Serialize};

/// Electrical role of a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerminalRole {
    Positive,
    Negative,
    Signal,
    Power,
    Ground,
    Data,
    Gpio,
}

/// Signal direction of a terminal, as seen from the component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerminalDirection {
    Input,
    Output,
    Bidirectional,
}

/// Position of a terminal relative to the component origin, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotate this offset by `degrees` around the component origin.
    pub fn rotated(&self, degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }
}

/// One terminal of a catalog component type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminalDef {
    /// Stable id, unique within the component type
    pub id: String,
    pub role: TerminalRole,
    pub offset: Offset,
    pub direction: TerminalDirection,
    /// Internal bus name. Terminals of one placement that share a bus are
    /// joined into the same net (breadboard strips and rails).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bus: Option<String>,
}

impl TerminalDef {
    pub fn new(
        id: impl Into<String>,
        role: TerminalRole,
        direction: TerminalDirection,
        offset: Offset,
    ) -> Self {
        Self {
            id: id.into(),
            role,
            offset,
            direction,
            bus: None,
        }
    }

    /// Attach this terminal to an internal bus.
    pub fn on_bus(mut self, bus: impl Into<String>) -> Self {
        self.bus = Some(bus.into());
        self
    }
}
