//! Passive parts: Resistor, Push Button, Potentiometer and the Breadboard.
//!
//! None of these compute current. A resistor and a closed button pass the
//! DC level of one terminal straight to the other; the potentiometer taps a
//! nominal fraction of the voltage across its track.

use super::{ComponentModel, ComponentOutput, ComponentState, EvalContext, Probe};
use crate::circuit::PlacedComponent;

/// A resistor. Always voltage-transparent, with no IR drop.
#[derive(Debug, Clone, Copy)]
pub struct Resistor;

impl ComponentModel for Resistor {
    fn transfer(&self, terminal: &str, probe: &Probe<'_>) -> Option<f64> {
        probe.pass_through(terminal)
    }
}

/// A momentary push button. Transparent only while pressed.
#[derive(Debug, Clone, Copy)]
pub struct Button;

impl ComponentModel for Button {
    fn transfer(&self, terminal: &str, probe: &Probe<'_>) -> Option<f64> {
        if probe.properties().is_pressed() {
            probe.pass_through(terminal)
        } else {
            None
        }
    }
}

/// A three-terminal potentiometer wired as a voltage divider.
///
/// The wiper sits at `gnd + position * (vcc - gnd)` once both ends of the
/// track are known.
#[derive(Debug, Clone, Copy)]
pub struct Potentiometer;

impl Potentiometer {
    pub const WIPER: &'static str = "wiper";
}

impl ComponentModel for Potentiometer {
    fn transfer(&self, terminal: &str, probe: &Probe<'_>) -> Option<f64> {
        if terminal != Self::WIPER {
            return None;
        }
        let hi = probe.voltage("vcc");
        let lo = probe.voltage("gnd");
        if !(hi.is_finite() && lo.is_finite()) {
            return None;
        }
        Some(lo + probe.properties().wiper_position() * (hi - lo))
    }

    fn evaluate(&self, ctx: &EvalContext<'_>) -> ComponentState {
        let powered = ctx.supply_ok("vcc", "gnd");
        let output = powered.then(|| ComponentOutput::Position {
            value: ctx.probe.properties().wiper_position(),
            voltage: ctx.probe.voltage(Self::WIPER),
        });
        ComponentState::powered(powered).with_output(output)
    }

    fn required_terminals<'c>(&self, _component: &'c PlacedComponent) -> Vec<&'c str> {
        vec!["vcc", "gnd"]
    }
}

/// Solderless breadboard. Its strips are internal buses resolved by the
/// net builder, so the model itself is inert.
#[derive(Debug, Clone, Copy)]
pub struct Breadboard;

impl ComponentModel for Breadboard {
    fn required_terminals<'c>(&self, _component: &'c PlacedComponent) -> Vec<&'c str> {
        Vec::new()
    }
}
