//! Net construction: grouping terminals into galvanically identical nodes.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use super::placement::{PlacedComponent, Wire};
use super::types::{NetId, TerminalRef};
use crate::components::Drive;
use crate::solver::ControlState;

/// Two supply voltages closer than this are considered the same.
const VOLTAGE_MATCH_TOLERANCE: f64 = 1e-9;

fn same_voltage(a: f64, b: f64) -> bool {
    (a - b).abs() <= VOLTAGE_MATCH_TOLERANCE
}

/// A maximal set of terminals joined by zero-resistance wiring.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Net {
    pub id: NetId,
    /// Member terminals, in component order then terminal order
    pub terminals: Vec<TerminalRef>,
    pub is_ground: bool,
    pub is_power: bool,
    /// Declared supply voltage (first source found wins)
    pub power_voltage: Option<f64>,
    /// Other supply voltages found on this net that disagree with
    /// `power_voltage`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conflicting_voltages: Vec<f64>,
    /// Resolved voltage, `NaN` while unknown
    pub voltage: f64,
}

impl Net {
    fn new(id: NetId, terminals: Vec<TerminalRef>) -> Self {
        Self {
            id,
            terminals,
            is_ground: false,
            is_power: false,
            power_voltage: None,
            conflicting_voltages: Vec::new(),
            voltage: f64::NAN,
        }
    }

    /// Record a fixed source found on one of the member terminals.
    fn apply(&mut self, drive: Drive) {
        match drive {
            Drive::Ground => self.is_ground = true,
            Drive::Supply(v) => match self.power_voltage {
                None => {
                    self.is_power = true;
                    self.power_voltage = Some(v);
                }
                Some(existing) if !same_voltage(existing, v) => {
                    if !self.conflicting_voltages.iter().any(|&c| same_voltage(c, v)) {
                        self.conflicting_voltages.push(v);
                    }
                }
                Some(_) => {}
            },
        }
    }

    /// More than one terminal: something is actually connected here.
    pub fn is_wired(&self) -> bool {
        self.terminals.len() > 1
    }

    /// No voltage could be resolved.
    pub fn is_floating(&self) -> bool {
        !self.voltage.is_finite()
    }

    /// Power and ground tied together, or two different supplies.
    pub fn is_shorted(&self) -> bool {
        (self.is_power && self.is_ground) || !self.conflicting_voltages.is_empty()
    }

    pub fn contains(&self, terminal: &TerminalRef) -> bool {
        self.terminals.contains(terminal)
    }
}

/// All nets of one simulation run plus the terminal → net index.
#[derive(Debug, Clone, Default)]
pub struct Netlist {
    nets: Vec<Net>,
    index: HashMap<TerminalRef, NetId>,
    dropped_wires: Vec<String>,
}

impl Netlist {
    /// Build the nets for a set of placements and wires.
    ///
    /// Terminals are connected only through wires and internal buses, never
    /// through a component's body. Microcontroller GPIO pins driven in
    /// `control` become supply or ground sources.
    pub fn build(components: &[PlacedComponent], wires: &[Wire], control: &ControlState) -> Self {
        // One graph node per (placement, terminal), in input order
        let mut nodes: Vec<(usize, usize)> = Vec::new();
        let mut lookup: HashMap<(&str, &str), usize> = HashMap::new();
        for (ci, component) in components.iter().enumerate() {
            for (ti, terminal) in component.terminals.iter().enumerate() {
                let key = (component.id.as_str(), terminal.id.as_str());
                if lookup.contains_key(&key) {
                    continue;
                }
                lookup.insert(key, nodes.len());
                nodes.push((ci, ti));
            }
        }

        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
        let mut link = |a: usize, b: usize| {
            adjacency[a].push(b);
            adjacency[b].push(a);
        };

        let mut dropped_wires = Vec::new();
        for wire in wires {
            let resolved = wire.endpoints().and_then(|(start, end)| {
                let a = lookup.get(&(start.component_id.as_str(), start.terminal_id.as_str()))?;
                let b = lookup.get(&(end.component_id.as_str(), end.terminal_id.as_str()))?;
                Some((*a, *b))
            });
            match resolved {
                Some((a, b)) => link(a, b),
                None => {
                    debug!(wire = %wire.id, "dropping wire with unresolved endpoint");
                    dropped_wires.push(wire.id.clone());
                }
            }
        }

        // Internal buses: chain every terminal on a bus to the previous one
        for component in components {
            let mut last_on_bus: HashMap<&str, usize> = HashMap::new();
            for terminal in &component.terminals {
                let Some(bus) = terminal.bus.as_deref() else {
                    continue;
                };
                let Some(&node) = lookup.get(&(component.id.as_str(), terminal.id.as_str())) else {
                    continue;
                };
                if let Some(prev) = last_on_bus.insert(bus, node) {
                    if prev != node {
                        link(prev, node);
                    }
                }
            }
        }

        let mut nets = Vec::new();
        let mut index = HashMap::with_capacity(nodes.len());
        let mut visited = vec![false; nodes.len()];

        for start in 0..nodes.len() {
            if visited[start] {
                continue;
            }
            let mut members = Vec::new();
            let mut stack = vec![start];
            visited[start] = true;
            while let Some(node) = stack.pop() {
                members.push(node);
                for &next in &adjacency[node] {
                    if !visited[next] {
                        visited[next] = true;
                        stack.push(next);
                    }
                }
            }
            members.sort_unstable();

            let id = NetId(nets.len());
            let mut net = Net::new(id, Vec::with_capacity(members.len()));
            for node in members {
                let (ci, ti) = nodes[node];
                let component = &components[ci];
                let terminal = &component.terminals[ti];
                let pins = control.driven_pins(&component.id);
                if let Some(drive) = component.model().source(terminal, &component.properties, pins) {
                    net.apply(drive);
                }
                let terminal_ref = component.terminal_ref(&terminal.id);
                index.insert(terminal_ref.clone(), id);
                net.terminals.push(terminal_ref);
            }
            nets.push(net);
        }

        debug!(
            nets = nets.len(),
            terminals = nodes.len(),
            dropped = dropped_wires.len(),
            "built netlist"
        );

        Self {
            nets,
            index,
            dropped_wires,
        }
    }

    pub fn nets(&self) -> &[Net] {
        &self.nets
    }

    pub(crate) fn nets_mut(&mut self) -> &mut [Net] {
        &mut self.nets
    }

    pub fn net(&self, id: NetId) -> Option<&Net> {
        self.nets.get(id.0)
    }

    pub fn net_id_of(&self, terminal: &TerminalRef) -> Option<NetId> {
        self.index.get(terminal).copied()
    }

    pub fn net_of(&self, terminal: &TerminalRef) -> Option<&Net> {
        self.net_id_of(terminal).and_then(|id| self.net(id))
    }

    /// Ids of wires that were ignored because an endpoint did not resolve.
    pub fn dropped_wires(&self) -> &[String] {
        &self.dropped_wires
    }

    pub fn len(&self) -> usize {
        self.nets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nets.is_empty()
    }
}

/// Build nets from placements and wires with no GPIO pins driven.
pub fn build_nets(components: &[PlacedComponent], wires: &[Wire]) -> Netlist {
    Netlist::build(components, wires, &ControlState::default())
}
