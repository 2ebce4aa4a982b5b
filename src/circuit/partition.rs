//! Partitioning a canvas into independent circuit clusters.

use std::collections::{BTreeSet, VecDeque};

use serde::Serialize;
use tracing::debug;

use super::netlist::Netlist;
use super::placement::{PlacedComponent, Wire};
use super::types::{CircuitId, NetId, PlacementId, TerminalRef};

/// A maximal group of components and nets reachable from one another.
///
/// Clusters are rebuilt every tick; their ids are only meaningful within the
/// result that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Circuit {
    pub id: CircuitId,
    /// Member nets, ascending
    pub nets: Vec<NetId>,
    /// Member placements, in input order
    pub components: Vec<PlacementId>,
    /// Wires with both endpoints inside the cluster
    pub wires: Vec<String>,
    pub has_ground: bool,
    pub has_power: bool,
    pub is_complete: bool,
}

impl Circuit {
    pub fn contains_component(&self, id: &PlacementId) -> bool {
        self.components.contains(id)
    }

    pub fn contains_net(&self, id: NetId) -> bool {
        self.nets.binary_search(&id).is_ok()
    }
}

/// Group components that share at least one net.
///
/// Connector components (the breadboard) join nets through their buses but
/// are not cluster members and never link clusters on their own.
pub fn build_circuits(components: &[PlacedComponent], netlist: &Netlist, wires: &[Wire]) -> Vec<Circuit> {
    // component -> nets, net -> components
    let mut component_nets: Vec<Vec<NetId>> = Vec::with_capacity(components.len());
    let mut net_components: Vec<Vec<usize>> = vec![Vec::new(); netlist.len()];
    for (ci, component) in components.iter().enumerate() {
        let mut nets: Vec<NetId> = component
            .terminals
            .iter()
            .filter_map(|t| netlist.net_id_of(&component.terminal_ref(&t.id)))
            .collect();
        nets.sort_unstable();
        nets.dedup();
        if !component.kind.is_connector() {
            for net in &nets {
                net_components[net.0].push(ci);
            }
        }
        component_nets.push(nets);
    }

    let mut assigned = vec![false; components.len()];
    let mut circuits = Vec::new();

    for seed in 0..components.len() {
        if assigned[seed] || components[seed].kind.is_connector() {
            continue;
        }

        let mut members = Vec::new();
        let mut nets = BTreeSet::new();
        let mut queue = VecDeque::from([seed]);
        assigned[seed] = true;

        while let Some(ci) = queue.pop_front() {
            members.push(ci);
            for &net in &component_nets[ci] {
                if !nets.insert(net) {
                    continue;
                }
                for &other in &net_components[net.0] {
                    if !assigned[other] {
                        assigned[other] = true;
                        queue.push_back(other);
                    }
                }
            }
        }
        members.sort_unstable();

        let nets: Vec<NetId> = nets.into_iter().collect();
        let has_ground = nets.iter().filter_map(|&id| netlist.net(id)).any(|n| n.is_ground);
        let has_power = nets.iter().filter_map(|&id| netlist.net(id)).any(|n| n.is_power);
        let inside = |t: &TerminalRef| {
            netlist
                .net_id_of(t)
                .is_some_and(|id| nets.binary_search(&id).is_ok())
        };
        let member_wires = wires
            .iter()
            .filter(|w| w.endpoints().is_some_and(|(a, b)| inside(a) && inside(b)))
            .map(|w| w.id.clone())
            .collect();

        circuits.push(Circuit {
            id: CircuitId(circuits.len()),
            components: members.iter().map(|&ci| components[ci].id.clone()).collect(),
            wires: member_wires,
            has_ground,
            has_power,
            is_complete: has_ground && has_power,
            nets,
        });
    }

    debug!(circuits = circuits.len(), "partitioned circuit clusters");
    circuits
}
