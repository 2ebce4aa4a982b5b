#![allow(dead_code)]

use breadboard_core::circuit::{PlacementId, TerminalRef, Wire};
use breadboard_core::components::ComponentState;
use breadboard_core::{Catalog, ControlState, SimulationResult, Simulator};

pub mod strategies;

/// Tolerance for nominal voltage comparisons
pub const EPSILON_VOLTS: f64 = 1e-9;

/// Small builder for wiring up test canvases.
///
/// Wires are numbered `w1`, `w2`, ... in the order they are added.
pub struct Bench {
    pub sim: Simulator,
    next_wire: usize,
}

impl Bench {
    pub fn new() -> Self {
        Self {
            sim: Simulator::new(Catalog::standard()),
            next_wire: 0,
        }
    }

    /// Place a catalog part at the origin.
    pub fn place(&mut self, type_id: &str, id: &str) -> &mut Self {
        self.sim
            .place(type_id, id, 0.0, 0.0, 0.0)
            .unwrap_or_else(|e| panic!("placing {id}: {e}"));
        self
    }

    /// Place a supply with a custom output voltage.
    pub fn supply(&mut self, id: &str, volts: f64) -> &mut Self {
        let mut psu = Catalog::standard()
            .place("power-5v", id, 0.0, 0.0, 0.0)
            .expect("power-5v is a standard part");
        psu.properties.voltage = Some(volts);
        self.sim.insert_component(psu).expect("unique supply id");
        self
    }

    /// Connect `"comp.terminal"` to `"comp.terminal"`.
    pub fn wire(&mut self, from: &str, to: &str) -> &mut Self {
        self.next_wire += 1;
        let id = format!("w{}", self.next_wire);
        self.sim.add_wire(Wire::new(id, terminal(from), terminal(to)));
        self
    }

    pub fn run(&self) -> SimulationResult {
        self.sim.simulate(&ControlState::default())
    }

    pub fn run_with(&self, control: &ControlState) -> SimulationResult {
        self.sim.simulate(control)
    }
}

/// Parse `"comp.terminal"`.
pub fn terminal(spec: &str) -> TerminalRef {
    let (component, terminal) = spec
        .split_once('.')
        .unwrap_or_else(|| panic!("terminal spec {spec} must be component.terminal"));
    TerminalRef::new(component, terminal)
}

pub fn id(s: &str) -> PlacementId {
    PlacementId::from(s)
}

pub fn state<'r>(result: &'r SimulationResult, component: &str) -> &'r ComponentState {
    result
        .component_state(&id(component))
        .unwrap_or_else(|| panic!("no state for {component}"))
}

/// Voltage on the net holding a terminal.
pub fn voltage_at(result: &SimulationResult, spec: &str) -> f64 {
    let t = terminal(spec);
    result
        .net_states
        .values()
        .find(|net| net.terminals.contains(&t))
        .map(|net| net.voltage)
        .unwrap_or_else(|| panic!("terminal {spec} is in no net"))
}

/// `psu(5V) -> r1 -> led1 -> gnd`, optionally without the resistor.
pub fn led_circuit(with_resistor: bool) -> Bench {
    let mut bench = Bench::new();
    bench.place("power-5v", "psu").place("led-red", "led1").place("ground", "gnd");
    if with_resistor {
        bench
            .place("resistor", "r1")
            .wire("psu.vcc", "r1.a")
            .wire("r1.b", "led1.anode");
    } else {
        bench.wire("psu.vcc", "led1.anode");
    }
    bench.wire("led1.cathode", "gnd.gnd");
    bench
}
