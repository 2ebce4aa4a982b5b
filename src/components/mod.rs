//! Behavioral models for every component kind.
//!
//! This module provides one model per [`ComponentKind`]:
//! - Sources: Power Supply, Battery, Ground
//! - Passive: Resistor, Push Button, Potentiometer, Breadboard
//! - Indicators & actuators: LED, Buzzer, Servo
//! - Sensors: Ultrasonic, PIR, DHT
//! - Boards: Arduino Uno / Nano, ESP32
//!
//! Each model implements [`ComponentModel`]. The net builder asks it which
//! terminals are fixed sources, the propagator asks it whether it passes a
//! voltage through, and the evaluator asks it for a [`ComponentState`].

mod actuators;
mod boards;
mod led;
mod passive;
mod sensors;
mod sources;

pub use actuators::{Buzzer, Servo};
pub use boards::Microcontroller;
pub use led::Led;
pub use passive::{Breadboard, Button, Potentiometer, Resistor};
pub use sensors::{DhtSensor, PirSensor, UltrasonicSensor};
pub use sources::{Battery, Ground, PowerSupply};

use serde::{Deserialize, Serialize};

use crate::catalog::TerminalDef;
use crate::circuit::{Net, Netlist, PlacedComponent, Properties};
use crate::solver::{ControlState, PinLevels, SensorInput};
use crate::{GROUND_TOLERANCE, MODULE_MIN_SUPPLY};

/// Type tag of a component. Selects the behavioral model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKind {
    PowerSupply,
    Battery,
    Ground,
    Resistor,
    Button,
    Potentiometer,
    Led,
    Buzzer,
    Servo,
    UltrasonicSensor,
    PirSensor,
    DhtSensor,
    Microcontroller,
    Breadboard,
}

impl ComponentKind {
    /// The behavioral model for this kind.
    pub fn model(&self) -> &'static dyn ComponentModel {
        match self {
            ComponentKind::PowerSupply => &PowerSupply,
            ComponentKind::Battery => &Battery,
            ComponentKind::Ground => &Ground,
            ComponentKind::Resistor => &Resistor,
            ComponentKind::Button => &Button,
            ComponentKind::Potentiometer => &Potentiometer,
            ComponentKind::Led => &Led,
            ComponentKind::Buzzer => &Buzzer,
            ComponentKind::Servo => &Servo,
            ComponentKind::UltrasonicSensor => &UltrasonicSensor,
            ComponentKind::PirSensor => &PirSensor,
            ComponentKind::DhtSensor => &DhtSensor,
            ComponentKind::Microcontroller => &Microcontroller,
            ComponentKind::Breadboard => &Breadboard,
        }
    }

    /// Short human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ComponentKind::PowerSupply => "power supply",
            ComponentKind::Battery => "battery",
            ComponentKind::Ground => "ground",
            ComponentKind::Resistor => "resistor",
            ComponentKind::Button => "push button",
            ComponentKind::Potentiometer => "potentiometer",
            ComponentKind::Led => "LED",
            ComponentKind::Buzzer => "buzzer",
            ComponentKind::Servo => "servo",
            ComponentKind::UltrasonicSensor => "ultrasonic sensor",
            ComponentKind::PirSensor => "PIR sensor",
            ComponentKind::DhtSensor => "DHT sensor",
            ComponentKind::Microcontroller => "microcontroller",
            ComponentKind::Breadboard => "breadboard",
        }
    }

    /// Sources and the breadboard. A cluster made only of these is not
    /// diagnosed for missing ground/power.
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            ComponentKind::PowerSupply
                | ComponentKind::Battery
                | ComponentKind::Ground
                | ComponentKind::Breadboard
        )
    }

    /// Pure wiring aids whose internal buses join nets but which never link
    /// clusters by themselves.
    pub fn is_connector(&self) -> bool {
        matches!(self, ComponentKind::Breadboard)
    }
}

/// A fixed electrical source imposed on a terminal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Drive {
    /// Fixed supply voltage
    Supply(f64),
    /// Ground reference (0 V)
    Ground,
}

/// Computed state of one placement for the rendering layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentState {
    pub is_active: bool,
    pub is_powered: bool,
    /// LED brightness from 0.0 to 1.0
    pub brightness: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<ComponentOutput>,
}

impl ComponentState {
    /// Active and powered, with no reported value.
    pub fn on() -> Self {
        Self {
            is_active: true,
            is_powered: true,
            ..Default::default()
        }
    }

    /// Powered modules report `is_active` as readiness.
    pub fn powered(is_powered: bool) -> Self {
        Self {
            is_active: is_powered,
            is_powered,
            ..Default::default()
        }
    }

    pub fn with_output(mut self, output: Option<ComponentOutput>) -> Self {
        self.output = output;
        self
    }
}

/// Value reported by a sensor, actuator or control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ComponentOutput {
    Angle { degrees: f64 },
    Position { value: f64, voltage: f64 },
    Distance { centimeters: f64 },
    Motion { detected: bool },
    Climate { temperature: f64, humidity: f64 },
}

/// Read-only view of one placement's terminals inside a netlist.
pub struct Probe<'a> {
    component: &'a PlacedComponent,
    netlist: &'a Netlist,
}

impl<'a> Probe<'a> {
    pub fn new(component: &'a PlacedComponent, netlist: &'a Netlist) -> Self {
        Self { component, netlist }
    }

    pub fn component(&self) -> &'a PlacedComponent {
        self.component
    }

    pub fn properties(&self) -> &'a Properties {
        &self.component.properties
    }

    /// The net holding one of this placement's terminals.
    pub fn net(&self, terminal_id: &str) -> Option<&'a Net> {
        self.netlist.net_of(&self.component.terminal_ref(terminal_id))
    }

    /// Voltage on a terminal's net. `NaN` when unknown or not a terminal.
    pub fn voltage(&self, terminal_id: &str) -> f64 {
        self.net(terminal_id).map_or(f64::NAN, |net| net.voltage)
    }

    /// A terminal is wired when its net reaches any other terminal.
    pub fn is_wired(&self, terminal_id: &str) -> bool {
        self.net(terminal_id).is_some_and(Net::is_wired)
    }

    /// The terminal opposite `terminal_id` on a two-terminal component.
    pub fn opposite(&self, terminal_id: &str) -> Option<&'a str> {
        match self.component.terminals.as_slice() {
            [a, b] if a.id == terminal_id => Some(b.id.as_str()),
            [a, b] if b.id == terminal_id => Some(a.id.as_str()),
            _ => None,
        }
    }

    /// Known voltage on the opposite terminal of a two-terminal component.
    pub fn pass_through(&self, terminal_id: &str) -> Option<f64> {
        let v = self.voltage(self.opposite(terminal_id)?);
        v.is_finite().then_some(v)
    }
}

/// Everything a model may read while evaluating one placement.
pub struct EvalContext<'a> {
    pub probe: Probe<'a>,
    /// Caller-supplied physical inputs for this placement
    pub inputs: Option<&'a SensorInput>,
    /// Board pins driven by the sketch this tick
    pub pins: Option<&'a PinLevels>,
}

impl EvalContext<'_> {
    /// Module supply check: `vcc ≥ 4.5 V` and `gnd` at exactly ground.
    pub fn supply_ok(&self, vcc: &str, gnd: &str) -> bool {
        self.probe.voltage(vcc) >= MODULE_MIN_SUPPLY
            && self.probe.voltage(gnd).abs() < GROUND_TOLERANCE
    }
}

/// Uniform interface implemented once per component kind.
pub trait ComponentModel: Sync {
    /// Fixed source imposed on `terminal`, if any. `pins` holds the
    /// placement's sketch-driven pins.
    fn source(&self, _terminal: &TerminalDef, _props: &Properties, _pins: Option<&PinLevels>) -> Option<Drive> {
        None
    }

    /// Voltage this component passes onto `terminal` from its other terminals
    /// in its current internal state. `None` means opaque.
    fn transfer(&self, _terminal: &str, _probe: &Probe<'_>) -> Option<f64> {
        None
    }

    /// Derive the output state from terminal voltages and inputs.
    fn evaluate(&self, _ctx: &EvalContext<'_>) -> ComponentState {
        ComponentState::default()
    }

    /// Terminals that must be wired for the component to work.
    fn required_terminals<'c>(&self, component: &'c PlacedComponent) -> Vec<&'c str> {
        component.terminals.iter().map(|t| t.id.as_str()).collect()
    }
}

/// Evaluate one placement against a propagated netlist.
pub fn evaluate_component(
    component: &PlacedComponent,
    netlist: &Netlist,
    control: &ControlState,
) -> ComponentState {
    let ctx = EvalContext {
        probe: Probe::new(component, netlist),
        inputs: control.sensor(&component.id),
        pins: control.driven_pins(&component.id),
    };
    component.model().evaluate(&ctx)
}
