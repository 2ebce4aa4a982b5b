//! Placed components and wires: the caller-owned circuit description.

use serde::{Deserialize, Serialize};

use super::types::{PlacementId, TerminalRef};
use crate::catalog::{Offset, TerminalDef};
use crate::components::{ComponentKind, ComponentModel};

/// Mutable internal state of a placement.
///
/// Persists across ticks. Only the engine's explicit setters change it
/// between ticks; a simulation pass reads it and never writes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Properties {
    /// Resistance in ohms (resistors, potentiometer track)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resistance: Option<f64>,
    /// Button contact state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressed: Option<bool>,
    /// Potentiometer wiper position from 0.0 to 1.0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
    /// Supply voltage for sources, logic level for boards
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voltage: Option<f64>,
    /// Cosmetic LED color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Properties {
    /// Overlay every value set in `other` on top of `self`.
    pub fn merge(&mut self, other: &Properties) {
        if other.resistance.is_some() {
            self.resistance = other.resistance;
        }
        if other.pressed.is_some() {
            self.pressed = other.pressed;
        }
        if other.position.is_some() {
            self.position = other.position;
        }
        if other.voltage.is_some() {
            self.voltage = other.voltage;
        }
        if other.color.is_some() {
            self.color = other.color.clone();
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed.unwrap_or(false)
    }

    /// Wiper position, centered when unset.
    pub fn wiper_position(&self) -> f64 {
        self.position.unwrap_or(0.5).clamp(0.0, 1.0)
    }
}

/// One instance of a catalog component type on the canvas.
#[derive(Debug, Clone)]
pub struct PlacedComponent {
    pub id: PlacementId,
    /// Catalog type id (e.g. `led-red`)
    pub component_id: String,
    pub kind: ComponentKind,
    pub x: f64,
    pub y: f64,
    /// Rotation in degrees
    pub rotation: f64,
    pub terminals: Vec<TerminalDef>,
    pub properties: Properties,
}

impl PlacedComponent {
    /// Look up a terminal definition by id.
    pub fn terminal(&self, terminal_id: &str) -> Option<&TerminalDef> {
        self.terminals.iter().find(|t| t.id == terminal_id)
    }

    /// Endpoint reference for one of this placement's terminals.
    pub fn terminal_ref(&self, terminal_id: &str) -> TerminalRef {
        TerminalRef::new(self.id.clone(), terminal_id)
    }

    /// Absolute canvas position of a terminal, honoring rotation.
    pub fn terminal_position(&self, terminal_id: &str) -> Option<Offset> {
        let offset = self.terminal(terminal_id)?.offset.rotated(self.rotation);
        Some(Offset::new(self.x + offset.x, self.y + offset.y))
    }

    /// Behavioral model for this placement's kind.
    pub fn model(&self) -> &'static dyn ComponentModel {
        self.kind.model()
    }
}

/// A point-to-point wire between two terminals.
///
/// Geometry is owned by the caller; the engine only needs endpoint identity.
/// A wire still being drawn may have only one endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wire {
    pub id: String,
    #[serde(default)]
    pub start_terminal: Option<TerminalRef>,
    #[serde(default)]
    pub end_terminal: Option<TerminalRef>,
}

impl Wire {
    pub fn new(id: impl Into<String>, start: TerminalRef, end: TerminalRef) -> Self {
        Self {
            id: id.into(),
            start_terminal: Some(start),
            end_terminal: Some(end),
        }
    }

    /// Both endpoints, if the wire is fully connected.
    pub fn endpoints(&self) -> Option<(&TerminalRef, &TerminalRef)> {
        Some((self.start_terminal.as_ref()?, self.end_terminal.as_ref()?))
    }

    /// Check whether either end of this wire lands on the given placement.
    pub fn touches(&self, placement: &PlacementId) -> bool {
        [&self.start_terminal, &self.end_terminal]
            .into_iter()
            .flatten()
            .any(|t| &t.component_id == placement)
    }
}
