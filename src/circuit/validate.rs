//! Fault detection: wiring mistakes reported per circuit cluster.
//!
//! Faults are data, not errors. Every rule is evaluated for every cluster
//! and all matches are reported, so one cluster can be missing ground and a
//! resistor at the same time.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::netlist::{Net, Netlist};
use super::partition::Circuit;
use super::placement::PlacedComponent;
use super::types::{CircuitId, PlacementId};
use crate::components::{ComponentKind, Led};

/// Fault taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    NoGround,
    NoPower,
    ShortCircuit,
    MissingResistor,
    ReversePolarity,
    OpenCircuit,
    /// Reserved; not produced by the nominal model
    Overcurrent,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::NoGround => "NO_GROUND",
            ErrorKind::NoPower => "NO_POWER",
            ErrorKind::ShortCircuit => "SHORT_CIRCUIT",
            ErrorKind::MissingResistor => "MISSING_RESISTOR",
            ErrorKind::ReversePolarity => "REVERSE_POLARITY",
            ErrorKind::OpenCircuit => "OPEN_CIRCUIT",
            ErrorKind::Overcurrent => "OVERCURRENT",
        };
        f.write_str(name)
    }
}

/// Only `Error` severity makes a result invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One detected wiring problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationError {
    pub kind: ErrorKind,
    pub message: String,
    pub affected_components: Vec<PlacementId>,
    pub severity: Severity,
    pub circuit_id: CircuitId,
}

impl SimulationError {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.circuit_id, self.kind, self.message)
    }
}

/// Run every fault rule against every cluster.
///
/// Results are ordered by cluster, then by rule.
pub fn detect_errors(
    circuits: &[Circuit],
    netlist: &Netlist,
    components: &[PlacedComponent],
) -> Vec<SimulationError> {
    let by_id: HashMap<&PlacementId, &PlacedComponent> =
        components.iter().map(|c| (&c.id, c)).collect();

    let mut errors = Vec::new();
    for circuit in circuits {
        let members: Vec<&PlacedComponent> = circuit
            .components
            .iter()
            .filter_map(|id| by_id.get(id).copied())
            .collect();
        ClusterCheck {
            circuit,
            members: &members,
            netlist,
            out: &mut errors,
        }
        .run();
    }
    errors
}

struct ClusterCheck<'a> {
    circuit: &'a Circuit,
    members: &'a [&'a PlacedComponent],
    netlist: &'a Netlist,
    out: &'a mut Vec<SimulationError>,
}

impl ClusterCheck<'_> {
    fn run(&mut self) {
        let diagnosed = !self.members.iter().all(|c| c.kind.is_infrastructure());

        if diagnosed {
            self.check_ground();
            self.check_power();
            self.check_missing_resistor();
        }
        // A dead short across a supply is reported even with nothing else
        // on the net.
        self.check_shorts();
        if diagnosed {
            self.check_reverse_polarity();
            self.check_open_terminals();
        }
    }

    fn push(&mut self, kind: ErrorKind, severity: Severity, message: String, affected: Vec<PlacementId>) {
        self.out.push(SimulationError {
            kind,
            message,
            affected_components: affected,
            severity,
            circuit_id: self.circuit.id,
        });
    }

    fn all_members(&self) -> Vec<PlacementId> {
        self.members.iter().map(|c| c.id.clone()).collect()
    }

    fn net_of(&self, component: &PlacedComponent, terminal_id: &str) -> Option<&Net> {
        self.netlist.net_of(&component.terminal_ref(terminal_id))
    }

    fn check_ground(&mut self) {
        if !self.circuit.has_ground {
            let affected = self.all_members();
            self.push(
                ErrorKind::NoGround,
                Severity::Error,
                "Circuit has no ground connection".to_string(),
                affected,
            );
        }
    }

    fn check_power(&mut self) {
        if !self.circuit.has_power {
            let affected = self.all_members();
            self.push(
                ErrorKind::NoPower,
                Severity::Error,
                "Circuit has no power source".to_string(),
                affected,
            );
        }
    }

    fn check_missing_resistor(&mut self) {
        let has_resistor = self.members.iter().any(|c| c.kind == ComponentKind::Resistor);
        if has_resistor || !self.circuit.has_power {
            return;
        }
        let leds: Vec<PlacementId> = leds(self.members).map(|c| c.id.clone()).collect();
        if leds.is_empty() {
            return;
        }
        let names = leds.iter().map(|id| format!("'{id}'")).collect::<Vec<_>>().join(", ");
        self.push(
            ErrorKind::MissingResistor,
            Severity::Error,
            format!("LED {names} has no current-limiting resistor"),
            leds,
        );
    }

    fn check_shorts(&mut self) {
        let mut found = Vec::new();
        for &net_id in &self.circuit.nets {
            let Some(net) = self.netlist.net(net_id) else {
                continue;
            };
            if !net.is_shorted() {
                continue;
            }
            let mut affected: Vec<PlacementId> = Vec::new();
            for t in &net.terminals {
                if !affected.contains(&t.component_id) {
                    affected.push(t.component_id.clone());
                }
            }
            let message = if net.is_power && net.is_ground {
                format!("Power and ground are directly connected on net {net_id}")
            } else {
                let mut volts: Vec<String> = net.power_voltage.iter().map(|v| format!("{v}V")).collect();
                volts.extend(net.conflicting_voltages.iter().map(|v| format!("{v}V")));
                format!("Conflicting supply voltages ({}) on net {net_id}", volts.join(", "))
            };
            found.push((message, affected));
        }
        for (message, affected) in found {
            self.push(ErrorKind::ShortCircuit, Severity::Error, message, affected);
        }
    }

    fn check_reverse_polarity(&mut self) {
        let reversed: Vec<PlacementId> = leds(self.members)
            .filter(|led| {
                let anode = self.net_of(led, Led::ANODE);
                let cathode = self.net_of(led, Led::CATHODE);
                matches!((anode, cathode), (Some(a), Some(c)) if a.is_ground && c.is_power)
            })
            .map(|led| led.id.clone())
            .collect();
        for id in reversed {
            self.push(
                ErrorKind::ReversePolarity,
                Severity::Warning,
                format!("LED '{id}' is connected backwards (anode to ground, cathode to power)"),
                vec![id],
            );
        }
    }

    fn check_open_terminals(&mut self) {
        let mut found = Vec::new();
        for component in self.members.iter().filter(|c| !c.kind.is_infrastructure()) {
            let open: Vec<&str> = component
                .model()
                .required_terminals(component)
                .into_iter()
                .filter(|t| !self.net_of(component, t).is_some_and(Net::is_wired))
                .collect();
            if !open.is_empty() {
                found.push((
                    component.id.clone(),
                    format!(
                        "{} '{}' has unconnected terminals: {}",
                        component.kind.label(),
                        component.id,
                        open.join(", ")
                    ),
                ));
            }
        }
        for (id, message) in found {
            self.push(ErrorKind::OpenCircuit, Severity::Warning, message, vec![id]);
        }
    }
}

fn leds<'m>(members: &'m [&'m PlacedComponent]) -> impl Iterator<Item = &'m PlacedComponent> + 'm {
    members.iter().copied().filter(|c| c.kind == ComponentKind::Led)
}
