//! Simulation engine.
//!
//! One tick runs the whole pipeline from the caller-owned canvas:
//!
//! ```text
//! placements + wires + controls
//!   -> nets -> clusters -> voltages -> component states + faults
//! ```
//!
//! Voltages are nominal. Sources pin their nets; wires, resistors and closed
//! buttons copy a known voltage across unchanged; a potentiometer wiper sits
//! on the linear divider of its two ends. No current is solved for.

mod control;
mod propagation;
mod simulator;

pub use control::{ControlState, PinLevel, PinLevels, SensorInput};
pub use propagation::{propagate, PropagationReport};
pub use simulator::{simulate, NetState, SimulationResult, Simulator, SimulatorConfig};
