//! WASM bindings for Breadboard Core.
//!
//! This module provides JavaScript-friendly bindings for the browser
//! editor. Scenes, control inputs and results cross the boundary as JSON.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmBreadboard } from 'breadboard_core';
//!
//! await init();
//!
//! const sim = new WasmBreadboard(sceneJson);
//!
//! // On every UI tick:
//! const result = JSON.parse(sim.simulate(JSON.stringify(controls)));
//! for (const [id, state] of Object.entries(result.componentStates)) {
//!   render(id, state);
//! }
//! ```

use wasm_bindgen::prelude::*;

use crate::catalog::Catalog;
use crate::circuit::PlacementId;
use crate::error::BreadboardError;
use crate::scene::Scene;
use crate::solver::{ControlState, Simulator};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn js_error(err: BreadboardError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// WASM-compatible breadboard engine.
///
/// Wraps the native [`Simulator`] over the standard catalog.
#[wasm_bindgen]
pub struct WasmBreadboard {
    simulator: Simulator,
}

#[wasm_bindgen]
impl WasmBreadboard {
    /// Create an engine from a scene document.
    ///
    /// # Arguments
    /// * `scene_json` - Scene in JSON format; `"{}"` gives an empty canvas
    ///
    /// # Example
    /// ```javascript
    /// const sim = new WasmBreadboard('{"components": [], "wires": []}');
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new(scene_json: &str) -> Result<WasmBreadboard, JsValue> {
        let simulator = Self::build(scene_json)?;
        Ok(WasmBreadboard { simulator })
    }

    /// Replace the whole canvas with a new scene document.
    ///
    /// The scene's `controls` section is ignored; controls are passed to
    /// every `simulate` call instead.
    #[wasm_bindgen]
    pub fn load_scene(&mut self, scene_json: &str) -> Result<(), JsValue> {
        self.simulator = Self::build(scene_json)?;
        Ok(())
    }

    /// Run one tick.
    ///
    /// # Arguments
    /// * `controls_json` - Pin levels and sensor inputs, see `ControlState`.
    ///   An empty string means no inputs.
    ///
    /// # Returns
    /// The `SimulationResult` as a JSON string.
    #[wasm_bindgen]
    pub fn simulate(&self, controls_json: &str) -> Result<String, JsValue> {
        let controls: ControlState = if controls_json.trim().is_empty() {
            ControlState::default()
        } else {
            serde_json::from_str(controls_json).map_err(|e| {
                js_error(BreadboardError::WasmError {
                    message: format!("invalid controls: {e}"),
                })
            })?
        };
        self.simulator.simulate(&controls).to_json().map_err(js_error)
    }

    #[wasm_bindgen]
    pub fn set_button_pressed(&mut self, id: &str, pressed: bool) -> Result<(), JsValue> {
        self.simulator
            .set_button_pressed(&PlacementId::from(id), pressed)
            .map_err(js_error)
    }

    #[wasm_bindgen]
    pub fn set_potentiometer_position(&mut self, id: &str, position: f64) -> Result<(), JsValue> {
        self.simulator
            .set_potentiometer_position(&PlacementId::from(id), position)
            .map_err(js_error)
    }

    #[wasm_bindgen]
    pub fn set_resistor_resistance(&mut self, id: &str, ohms: f64) -> Result<(), JsValue> {
        self.simulator
            .set_resistor_resistance(&PlacementId::from(id), ohms)
            .map_err(js_error)
    }

    /// Number of placements on the canvas.
    #[wasm_bindgen(getter)]
    pub fn component_count(&self) -> usize {
        self.simulator.components().len()
    }
}

impl WasmBreadboard {
    fn build(scene_json: &str) -> Result<Simulator, JsValue> {
        let scene = Scene::parse(scene_json).map_err(js_error)?;
        let (simulator, _) = scene.into_simulator(Catalog::standard()).map_err(js_error)?;
        Ok(simulator)
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
