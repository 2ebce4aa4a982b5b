//! Per-tick control inputs supplied by the caller.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::circuit::PlacementId;

/// Logic level of a microcontroller pin as set by the running sketch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinLevel {
    High,
    Low,
}

/// Driven pins of one board, keyed by pin id.
pub type PinLevels = BTreeMap<String, PinLevel>;

/// Simulated physical quantities fed to one sensor or actuator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SensorInput {
    /// Commanded servo angle in degrees
    pub angle: Option<f64>,
    /// Measured distance in centimeters
    pub distance: Option<f64>,
    /// Motion detected by a PIR sensor
    pub motion: Option<bool>,
    /// Temperature in °C
    pub temperature: Option<f64>,
    /// Relative humidity in percent
    pub humidity: Option<f64>,
}

/// Control inputs for one tick, keyed by placement id.
///
/// Button and potentiometer state are not here: they live in component
/// properties and change through the simulator's setters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ControlState {
    pub pins: BTreeMap<PlacementId, PinLevels>,
    pub sensors: BTreeMap<PlacementId, SensorInput>,
}

impl ControlState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drive one board pin.
    pub fn with_pin(
        mut self,
        board: impl Into<PlacementId>,
        pin: impl Into<String>,
        level: PinLevel,
    ) -> Self {
        self.set_pin(board, pin, level);
        self
    }

    /// Supply readings for one sensor.
    pub fn with_sensor(mut self, id: impl Into<PlacementId>, input: SensorInput) -> Self {
        self.sensors.insert(id.into(), input);
        self
    }

    pub fn set_pin(&mut self, board: impl Into<PlacementId>, pin: impl Into<String>, level: PinLevel) {
        self.pins
            .entry(board.into())
            .or_default()
            .insert(pin.into(), level);
    }

    pub fn pin(&self, board: &PlacementId, pin: &str) -> Option<PinLevel> {
        self.pins.get(board)?.get(pin).copied()
    }

    /// Pins driven on one board, `None` when the sketch drives none.
    pub fn driven_pins(&self, board: &PlacementId) -> Option<&PinLevels> {
        self.pins.get(board).filter(|pins| !pins.is_empty())
    }

    pub fn sensor(&self, id: &PlacementId) -> Option<&SensorInput> {
        self.sensors.get(id)
    }
}
