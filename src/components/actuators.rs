//! Actuators: piezo buzzer and hobby servo.

use super::{ComponentModel, ComponentOutput, ComponentState, EvalContext};
use crate::BUZZER_MIN_VOLTAGE;

/// A piezo buzzer. Sounds when at least [`BUZZER_MIN_VOLTAGE`] is applied.
#[derive(Debug, Clone, Copy)]
pub struct Buzzer;

impl ComponentModel for Buzzer {
    fn evaluate(&self, ctx: &EvalContext<'_>) -> ComponentState {
        let pos = ctx.probe.voltage("positive");
        let neg = ctx.probe.voltage("negative");
        // NaN on either side fails the comparison
        let on = pos - neg >= BUZZER_MIN_VOLTAGE;
        ComponentState::powered(on)
    }
}

/// A 180° hobby servo.
///
/// The commanded angle comes from the control state; the engine only decides
/// whether the servo is powered and receiving a signal.
#[derive(Debug, Clone, Copy)]
pub struct Servo;

impl Servo {
    pub const MAX_ANGLE: f64 = 180.0;
}

impl ComponentModel for Servo {
    fn evaluate(&self, ctx: &EvalContext<'_>) -> ComponentState {
        let powered = ctx.supply_ok("vcc", "gnd");
        let driven = powered && ctx.probe.is_wired("signal");
        let angle = ctx
            .inputs
            .and_then(|i| i.angle)
            .filter(|_| driven)
            .map(|degrees| ComponentOutput::Angle {
                degrees: degrees.clamp(0.0, Self::MAX_ANGLE),
            });

        ComponentState {
            is_active: driven,
            is_powered: powered,
            ..Default::default()
        }
        .with_output(angle)
    }
}
