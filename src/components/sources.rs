//! Fixed sources: power supplies, batteries and ground.

use super::{ComponentModel, ComponentState, Drive, EvalContext};
use crate::catalog::{TerminalDef, TerminalRole};
use crate::circuit::Properties;
use crate::solver::PinLevels;

/// A regulated bench supply with a single `vcc` output.
///
/// The output voltage comes from the `voltage` property (5.0 by default).
#[derive(Debug, Clone, Copy)]
pub struct PowerSupply;

impl PowerSupply {
    pub const DEFAULT_VOLTAGE: f64 = 5.0;
}

impl ComponentModel for PowerSupply {
    fn source(&self, terminal: &TerminalDef, props: &Properties, _pins: Option<&PinLevels>) -> Option<Drive> {
        (terminal.role == TerminalRole::Power)
            .then(|| Drive::Supply(props.voltage.unwrap_or(Self::DEFAULT_VOLTAGE)))
    }

    fn evaluate(&self, _ctx: &EvalContext<'_>) -> ComponentState {
        ComponentState::on()
    }
}

/// A battery. The positive terminal is a supply, the negative terminal is
/// its own ground reference.
#[derive(Debug, Clone, Copy)]
pub struct Battery;

impl Battery {
    pub const DEFAULT_VOLTAGE: f64 = 9.0;
}

impl ComponentModel for Battery {
    fn source(&self, terminal: &TerminalDef, props: &Properties, _pins: Option<&PinLevels>) -> Option<Drive> {
        match terminal.role {
            TerminalRole::Positive => Some(Drive::Supply(
                props.voltage.unwrap_or(Self::DEFAULT_VOLTAGE),
            )),
            TerminalRole::Negative => Some(Drive::Ground),
            _ => None,
        }
    }

    fn evaluate(&self, _ctx: &EvalContext<'_>) -> ComponentState {
        ComponentState::on()
    }
}

/// Ground reference symbol.
#[derive(Debug, Clone, Copy)]
pub struct Ground;

impl ComponentModel for Ground {
    fn source(&self, terminal: &TerminalDef, _props: &Properties, _pins: Option<&PinLevels>) -> Option<Drive> {
        (terminal.role == TerminalRole::Ground).then_some(Drive::Ground)
    }

    fn evaluate(&self, _ctx: &EvalContext<'_>) -> ComponentState {
        ComponentState::on()
    }
}
