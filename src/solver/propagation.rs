//! Voltage propagation across voltage-transparent components.
//!
//! Sources fix the voltage of their nets. Every other net starts unknown
//! (`NaN`) and is filled in by relaxation: a component that is transparent
//! in its current state copies a known voltage from one of its terminals
//! onto another. No current or voltage drop is computed.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{trace, warn};

use crate::circuit::{Netlist, PlacedComponent, PlacementId};
use crate::components::Probe;

/// Outcome of one propagation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropagationReport {
    /// Relaxation passes performed
    pub passes: usize,
    /// A pass completed without changes before the cap
    pub converged: bool,
    /// Nets left at `NaN`
    pub unresolved: usize,
}

/// Assign a voltage to every net reachable from a source.
///
/// Stops at a fixed point or after `max_passes` relaxation passes, whichever
/// comes first. Hitting the cap is not an error: the remaining nets stay
/// floating.
pub fn propagate(netlist: &mut Netlist, components: &[PlacedComponent], max_passes: usize) -> PropagationReport {
    for net in netlist.nets_mut() {
        net.voltage = if net.is_ground {
            0.0
        } else if let Some(v) = net.power_voltage.filter(|_| net.is_power) {
            v
        } else {
            f64::NAN
        };
    }

    let by_id: HashMap<&PlacementId, &PlacedComponent> =
        components.iter().map(|c| (&c.id, c)).collect();

    let mut passes = 0;
    let mut converged = false;
    while passes < max_passes {
        passes += 1;
        let mut changed = 0usize;

        for idx in 0..netlist.len() {
            let view: &Netlist = netlist;
            let net = &view.nets()[idx];
            if net.voltage.is_finite() {
                continue;
            }
            let candidate = net.terminals.iter().find_map(|t| {
                let component = by_id.get(&t.component_id)?;
                component
                    .model()
                    .transfer(&t.terminal_id, &Probe::new(component, view))
            });
            if let Some(v) = candidate {
                netlist.nets_mut()[idx].voltage = v;
                changed += 1;
            }
        }

        trace!(pass = passes, changed, "propagation pass");
        if changed == 0 {
            converged = true;
            break;
        }
    }

    let unresolved = netlist.nets().iter().filter(|n| n.is_floating()).count();
    if !converged && max_passes > 0 {
        warn!(passes, unresolved, "voltage propagation hit the pass cap");
    }

    PropagationReport {
        passes,
        converged,
        unresolved,
    }
}
