//! # Breadboard Core
//!
//! Circuit simulation engine for a virtual electronics breadboard.
//!
//! This library provides:
//! - A component catalog (supplies, passives, LEDs, sensors, Arduino/ESP32 boards)
//! - Net construction from wires and breadboard strips
//! - Partitioning of the canvas into independent circuit clusters
//! - Nominal voltage propagation and per-component behavioral evaluation
//! - Detection of common wiring mistakes (shorts, missing resistors, ...)
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`catalog`] - Static component type definitions
//! - [`circuit`] - Placements, wires, nets, clusters and fault detection
//! - [`components`] - Behavioral models, one per component kind
//! - [`solver`] - Voltage propagation and the simulation pipeline
//! - [`scene`] - JSON scene documents
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! breadboard blink.json --format text
//! ```
//!
//! ### Library
//!
//! ```
//! use breadboard_core::circuit::{TerminalRef, Wire};
//! use breadboard_core::{Catalog, ControlState, Simulator};
//!
//! let mut sim = Simulator::new(Catalog::standard());
//! sim.place("power-5v", "psu", 0.0, 0.0, 0.0)?;
//! sim.place("ground", "gnd", 0.0, 0.0, 0.0)?;
//! sim.add_wire(Wire::new("w1", TerminalRef::new("psu", "vcc"), TerminalRef::new("gnd", "gnd")));
//!
//! let result = sim.simulate(&ControlState::default());
//! assert!(!result.is_valid);
//! # Ok::<(), breadboard_core::BreadboardError>(())
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmBreadboard } from 'breadboard_core';
//!
//! const sim = new WasmBreadboard(sceneJson);
//! const result = JSON.parse(sim.simulate('{"pins": {"uno": {"D13": "high"}}}'));
//! ```
//!
//! ## Simulation Method
//!
//! Each call to [`simulate`] rebuilds everything from the canvas:
//!
//! 1. Group terminals into nets by flood fill over wires and breadboard buses
//! 2. Partition components into clusters that share nets
//! 3. Seed source voltages, then relax across pass-through components
//! 4. Evaluate every component against its terminal voltages
//! 5. Run the fault rules per cluster

pub mod catalog;
pub mod circuit;
pub mod components;
pub mod error;
pub mod scene;
pub mod solver;

// Re-export main types for convenience
pub use catalog::Catalog;
pub use error::{BreadboardError, Result};
pub use scene::Scene;
pub use solver::{simulate, ControlState, SimulationResult, Simulator, SimulatorConfig};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmBreadboard;

/// Minimum LED forward drop in volts; the LED lights strictly above it
pub const LED_FORWARD_VOLTAGE: f64 = 1.8;

/// Drop above the forward voltage at which brightness saturates
pub const LED_BRIGHTNESS_SPAN: f64 = 3.0;

/// Minimum drop across a buzzer for it to sound
pub const BUZZER_MIN_VOLTAGE: f64 = 3.0;

/// Minimum `vcc` for 5 V sensor and servo modules
pub const MODULE_MIN_SUPPLY: f64 = 4.5;

/// Voltage tolerance for ground checks and supply conflicts
pub const GROUND_TOLERANCE: f64 = 1e-9;

/// Default cap on voltage propagation passes
pub const DEFAULT_MAX_PROPAGATION_PASSES: usize = 64;
