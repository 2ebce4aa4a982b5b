//! JSON scene documents.
//!
//! A scene is a saved canvas: placements, wires, the control inputs for a
//! tick and optional engine configuration.
//!
//! ## Example
//!
//! ```json
//! {
//!   "components": [
//!     {"id": "psu", "componentId": "power-5v", "x": 0, "y": 0},
//!     {"id": "r1", "componentId": "resistor", "x": 40, "y": 0, "state": {"resistance": 330}},
//!     {"id": "led1", "componentId": "led-red", "x": 80, "y": 0},
//!     {"id": "gnd", "componentId": "ground", "x": 120, "y": 0}
//!   ],
//!   "wires": [
//!     {"id": "w1", "startTerminal": {"componentId": "psu", "terminalId": "vcc"},
//!                  "endTerminal": {"componentId": "r1", "terminalId": "a"}}
//!   ],
//!   "controls": {"pins": {}, "sensors": {}},
//!   "config": {"maxPropagationPasses": 64}
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::circuit::{PlacementId, Properties, Wire};
use crate::error::{BreadboardError, Result};
use crate::solver::{ControlState, Simulator, SimulatorConfig};

/// One placement entry in a scene document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenePlacement {
    pub id: PlacementId,
    /// Catalog type id
    pub component_id: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub rotation: f64,
    /// Overrides for the catalog's initial properties
    #[serde(default)]
    pub state: Properties,
}

/// A complete saved canvas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub components: Vec<ScenePlacement>,
    pub wires: Vec<Wire>,
    pub controls: ControlState,
    pub config: SimulatorConfig,
}

impl Scene {
    /// Parse a scene from a JSON string.
    pub fn parse(input: &str) -> Result<Scene> {
        serde_json::from_str(input).map_err(|source| BreadboardError::SceneParse { source })
    }

    /// Parse a scene from a file.
    pub fn parse_file(path: &Path) -> Result<Scene> {
        let content = std::fs::read_to_string(path).map_err(|e| BreadboardError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Place every entry from `catalog` and build a simulator for the scene.
    ///
    /// Returns the scene's control inputs alongside, ready for the first tick.
    pub fn into_simulator(self, catalog: Catalog) -> Result<(Simulator, ControlState)> {
        let mut simulator = Simulator::with_config(catalog, self.config);

        for entry in self.components {
            let mut component = simulator
                .catalog()
                .place(&entry.component_id, entry.id, entry.x, entry.y, entry.rotation)
                .ok_or_else(|| BreadboardError::unknown_type(&entry.component_id))?;
            component.properties.merge(&entry.state);
            simulator.insert_component(component)?;
        }
        for wire in self.wires {
            simulator.add_wire(wire);
        }

        debug!(
            components = simulator.components().len(),
            wires = simulator.wires().len(),
            "loaded scene"
        );
        Ok((simulator, self.controls))
    }
}
