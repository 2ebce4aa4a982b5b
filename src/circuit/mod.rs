//! Circuit model: placements, wires, nets, clusters and fault detection.
//!
//! The caller owns [`PlacedComponent`]s and [`Wire`]s. Everything else in
//! this module is derived from them from scratch on every simulation tick:
//!
//! 1. [`Netlist::build`] groups terminals into [`Net`]s
//! 2. [`build_circuits`] partitions components and nets into [`Circuit`]s
//! 3. [`detect_errors`] runs the fault rules per circuit

mod netlist;
mod partition;
mod placement;
mod types;
mod validate;

pub use netlist::{build_nets, Net, Netlist};
pub use partition::{build_circuits, Circuit};
pub use placement::{PlacedComponent, Properties, Wire};
pub use types::*;
pub use validate::{detect_errors, ErrorKind, Severity, SimulationError};
