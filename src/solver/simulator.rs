//! Main simulator interface.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::circuit::{
    build_circuits, detect_errors, Circuit, CircuitId, ErrorKind, NetId, Netlist, PlacedComponent,
    PlacementId, SimulationError, TerminalRef, Wire,
};
use crate::components::{evaluate_component, ComponentKind, ComponentState};
use crate::error::{BreadboardError, Result};
use crate::DEFAULT_MAX_PROPAGATION_PASSES;

use super::control::ControlState;
use super::propagation::{propagate, PropagationReport};

/// Configuration for the simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulatorConfig {
    /// Maximum relaxation passes for voltage propagation.
    pub max_propagation_passes: usize,
    /// Report unwired required terminals as `OPEN_CIRCUIT` warnings.
    pub report_open_terminals: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_propagation_passes: DEFAULT_MAX_PROPAGATION_PASSES,
            report_open_terminals: true,
        }
    }
}

impl SimulatorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the propagation pass cap.
    ///
    /// Chains of pass-through components longer than the cap may leave
    /// their far end floating. The default covers any realistic breadboard.
    pub fn with_max_propagation_passes(mut self, passes: usize) -> Self {
        self.max_propagation_passes = passes;
        self
    }

    /// Enable or disable `OPEN_CIRCUIT` warnings.
    pub fn with_report_open_terminals(mut self, enabled: bool) -> Self {
        self.report_open_terminals = enabled;
        self
    }
}

/// Resolved state of one net.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetState {
    /// `NaN` (serialized as `null`) when floating
    pub voltage: f64,
    pub is_ground: bool,
    pub is_power: bool,
    pub is_floating: bool,
    pub terminals: Vec<TerminalRef>,
}

/// Snapshot produced by one simulation tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// No error-severity faults anywhere on the canvas
    pub is_valid: bool,
    pub circuits: Vec<Circuit>,
    pub errors: Vec<SimulationError>,
    pub warnings: Vec<SimulationError>,
    pub component_states: BTreeMap<PlacementId, ComponentState>,
    pub net_states: BTreeMap<NetId, NetState>,
    pub propagation: PropagationReport,
    /// Wires ignored because an endpoint is missing or unknown
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dropped_wires: Vec<String>,
}

impl SimulationResult {
    /// Errors and warnings raised for one cluster.
    pub fn errors_for(&self, circuit: CircuitId) -> impl Iterator<Item = &SimulationError> {
        self.errors
            .iter()
            .chain(&self.warnings)
            .filter(move |e| e.circuit_id == circuit)
    }

    pub fn component_state(&self, id: &PlacementId) -> Option<&ComponentState> {
        self.component_states.get(id)
    }

    /// The cluster containing a placement.
    pub fn circuit_of(&self, id: &PlacementId) -> Option<&Circuit> {
        self.circuits.iter().find(|c| c.contains_component(id))
    }

    pub fn has_error(&self, kind: ErrorKind) -> bool {
        self.errors.iter().any(|e| e.kind == kind)
    }

    pub fn has_warning(&self, kind: ErrorKind) -> bool {
        self.warnings.iter().any(|e| e.kind == kind)
    }

    /// Encode as camelCase JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|source| BreadboardError::Encode { source })
    }

    /// Encode as indented camelCase JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|source| BreadboardError::Encode { source })
    }
}

/// Run one full simulation pass over a canvas.
///
/// Everything is rebuilt from scratch: nets, clusters, voltages, component
/// states and faults. Wiring mistakes are reported in the result; this
/// function never fails.
pub fn simulate(
    components: &[PlacedComponent],
    wires: &[Wire],
    control: &ControlState,
    config: &SimulatorConfig,
) -> SimulationResult {
    let mut netlist = Netlist::build(components, wires, control);
    let circuits = build_circuits(components, &netlist, wires);
    let propagation = propagate(&mut netlist, components, config.max_propagation_passes);

    let component_states = components
        .iter()
        .map(|c| (c.id.clone(), evaluate_component(c, &netlist, control)))
        .collect();

    let (errors, warnings): (Vec<_>, Vec<_>) = detect_errors(&circuits, &netlist, components)
        .into_iter()
        .filter(|e| config.report_open_terminals || e.kind != ErrorKind::OpenCircuit)
        .partition(SimulationError::is_error);

    let net_states = netlist
        .nets()
        .iter()
        .map(|net| {
            (
                net.id,
                NetState {
                    voltage: net.voltage,
                    is_ground: net.is_ground,
                    is_power: net.is_power,
                    is_floating: net.is_floating(),
                    terminals: net.terminals.clone(),
                },
            )
        })
        .collect();

    debug!(
        components = components.len(),
        circuits = circuits.len(),
        errors = errors.len(),
        warnings = warnings.len(),
        "simulation pass complete"
    );

    SimulationResult {
        is_valid: errors.is_empty(),
        circuits,
        errors,
        warnings,
        component_states,
        net_states,
        propagation,
        dropped_wires: netlist.dropped_wires().to_vec(),
    }
}

/// The breadboard engine: a canvas of placements and wires plus the
/// catalog they are drawn from.
#[derive(Debug, Clone)]
pub struct Simulator {
    catalog: Catalog,
    components: Vec<PlacedComponent>,
    wires: Vec<Wire>,
    config: SimulatorConfig,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(Catalog::standard())
    }
}

impl Simulator {
    /// Create an empty canvas with default configuration.
    pub fn new(catalog: Catalog) -> Self {
        Self::with_config(catalog, SimulatorConfig::default())
    }

    /// Create an empty canvas with custom configuration.
    pub fn with_config(catalog: Catalog, config: SimulatorConfig) -> Self {
        Self {
            catalog,
            components: Vec::new(),
            wires: Vec::new(),
            config,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SimulatorConfig) {
        self.config = config;
    }

    pub fn components(&self) -> &[PlacedComponent] {
        &self.components
    }

    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    pub fn component(&self, id: &PlacementId) -> Option<&PlacedComponent> {
        self.components.iter().find(|c| &c.id == id)
    }

    /// Place a new instance of a catalog type.
    pub fn place(
        &mut self,
        type_id: &str,
        id: impl Into<PlacementId>,
        x: f64,
        y: f64,
        rotation: f64,
    ) -> Result<&PlacedComponent> {
        let id = id.into();
        self.ensure_unique(&id)?;
        let component = self
            .catalog
            .place(type_id, id, x, y, rotation)
            .ok_or_else(|| BreadboardError::unknown_type(type_id))?;
        self.components.push(component);
        let index = self.components.len() - 1;
        Ok(&self.components[index])
    }

    /// Add an already-built placement.
    pub fn insert_component(&mut self, component: PlacedComponent) -> Result<()> {
        self.ensure_unique(&component.id)?;
        self.components.push(component);
        Ok(())
    }

    /// Remove a placement together with every wire attached to it.
    pub fn remove_component(&mut self, id: &PlacementId) -> Result<PlacedComponent> {
        let index = self
            .components
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| BreadboardError::not_found(id.as_str()))?;
        self.wires.retain(|w| !w.touches(id));
        Ok(self.components.remove(index))
    }

    pub fn move_component(&mut self, id: &PlacementId, x: f64, y: f64, rotation: f64) -> Result<()> {
        let component = self.component_mut(id)?;
        component.x = x;
        component.y = y;
        component.rotation = rotation;
        Ok(())
    }

    /// Add a wire, replacing any existing wire with the same id.
    pub fn add_wire(&mut self, wire: Wire) {
        match self.wires.iter_mut().find(|w| w.id == wire.id) {
            Some(existing) => *existing = wire,
            None => self.wires.push(wire),
        }
    }

    pub fn remove_wire(&mut self, id: &str) -> Option<Wire> {
        let index = self.wires.iter().position(|w| w.id == id)?;
        Some(self.wires.remove(index))
    }

    /// Replace the whole placement list.
    ///
    /// The list is rejected, and the canvas left untouched, when two
    /// placements share an id.
    pub fn set_components(&mut self, components: Vec<PlacedComponent>) -> Result<()> {
        let mut seen = HashSet::with_capacity(components.len());
        if let Some(dup) = components.iter().find(|c| !seen.insert(&c.id)) {
            return Err(BreadboardError::DuplicatePlacement { id: dup.id.to_string() });
        }
        self.components = components;
        Ok(())
    }

    /// Replace the whole wire list.
    pub fn set_wires(&mut self, wires: Vec<Wire>) {
        self.wires = wires;
    }

    pub fn set_resistor_resistance(&mut self, id: &PlacementId, ohms: f64) -> Result<()> {
        let component = self.component_of_kind(id, ComponentKind::Resistor)?;
        if !ohms.is_finite() || ohms <= 0.0 {
            return Err(BreadboardError::invalid_property(
                id.as_str(),
                "resistance",
                format!("expected a positive number of ohms, got {ohms}"),
            ));
        }
        component.properties.resistance = Some(ohms);
        Ok(())
    }

    pub fn set_button_pressed(&mut self, id: &PlacementId, pressed: bool) -> Result<()> {
        let component = self.component_of_kind(id, ComponentKind::Button)?;
        component.properties.pressed = Some(pressed);
        Ok(())
    }

    pub fn set_potentiometer_position(&mut self, id: &PlacementId, position: f64) -> Result<()> {
        let component = self.component_of_kind(id, ComponentKind::Potentiometer)?;
        if !(0.0..=1.0).contains(&position) {
            return Err(BreadboardError::invalid_property(
                id.as_str(),
                "position",
                format!("expected a value in [0, 1], got {position}"),
            ));
        }
        component.properties.position = Some(position);
        Ok(())
    }

    /// Run one simulation tick over the current canvas.
    pub fn simulate(&self, control: &ControlState) -> SimulationResult {
        simulate(&self.components, &self.wires, control, &self.config)
    }

    fn ensure_unique(&self, id: &PlacementId) -> Result<()> {
        if self.component(id).is_some() {
            return Err(BreadboardError::DuplicatePlacement { id: id.to_string() });
        }
        Ok(())
    }

    fn component_mut(&mut self, id: &PlacementId) -> Result<&mut PlacedComponent> {
        self.components
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| BreadboardError::not_found(id.as_str()))
    }

    fn component_of_kind(&mut self, id: &PlacementId, kind: ComponentKind) -> Result<&mut PlacedComponent> {
        let component = self.component_mut(id)?;
        if component.kind != kind {
            return Err(BreadboardError::WrongComponentKind {
                id: id.to_string(),
                expected: kind.label(),
                actual: component.kind.label(),
            });
        }
        Ok(component)
    }
}
