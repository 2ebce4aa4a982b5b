//! Microcontroller development boards (Arduino Uno, Arduino Nano, ESP32).
//!
//! A board whose sketch drives any pin runs from USB: its GPIO pins act as
//! sources at the board's logic level and its GND headers are ground. An
//! idle board is powered only when its VCC and GND pins are fed by the
//! circuit. The VCC headers never source anything.

use super::{ComponentModel, ComponentState, Drive, EvalContext};
use crate::catalog::{TerminalDef, TerminalRole};
use crate::circuit::{PlacedComponent, Properties};
use crate::solver::{PinLevel, PinLevels};

/// Any microcontroller board from the catalog.
#[derive(Debug, Clone, Copy)]
pub struct Microcontroller;

impl Microcontroller {
    pub const DEFAULT_LOGIC_VOLTAGE: f64 = 5.0;

    /// Header pins recognized as board supply inputs.
    pub const VCC_PINS: [&'static str; 3] = ["5V", "3V3", "VIN"];
}

impl ComponentModel for Microcontroller {
    fn source(&self, terminal: &TerminalDef, props: &Properties, pins: Option<&PinLevels>) -> Option<Drive> {
        let pins = pins?;
        match terminal.role {
            TerminalRole::Ground => Some(Drive::Ground),
            TerminalRole::Gpio => match pins.get(&terminal.id)? {
                PinLevel::High => Some(Drive::Supply(
                    props.voltage.unwrap_or(Self::DEFAULT_LOGIC_VOLTAGE),
                )),
                PinLevel::Low => Some(Drive::Ground),
            },
            _ => None,
        }
    }

    fn evaluate(&self, ctx: &EvalContext<'_>) -> ComponentState {
        if ctx.pins.is_some() {
            return ComponentState::powered(true);
        }
        let component = ctx.probe.component();
        let vcc = component
            .terminals
            .iter()
            .filter(|t| Self::VCC_PINS.contains(&t.id.as_str()))
            .map(|t| ctx.probe.voltage(&t.id))
            .filter(|v| v.is_finite())
            .fold(f64::NAN, f64::max);
        let gnd = component
            .terminals
            .iter()
            .filter(|t| t.role == TerminalRole::Ground)
            .map(|t| ctx.probe.voltage(&t.id))
            .filter(|v| v.is_finite())
            .fold(f64::NAN, f64::min);

        ComponentState::powered(vcc.is_finite() && gnd.is_finite() && vcc > gnd)
    }

    fn required_terminals<'c>(&self, _component: &'c PlacedComponent) -> Vec<&'c str> {
        Vec::new()
    }
}
