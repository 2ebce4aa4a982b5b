//! Light-emitting diode.

use super::{ComponentModel, ComponentState, EvalContext};
use crate::{LED_BRIGHTNESS_SPAN, LED_FORWARD_VOLTAGE};

/// An LED with a fixed forward-voltage threshold.
///
/// Lit only when both legs are wired, both nets resolve, and the
/// anode-to-cathode drop exceeds [`LED_FORWARD_VOLTAGE`]. Brightness rises
/// linearly over the next [`LED_BRIGHTNESS_SPAN`] volts and saturates at 1.
#[derive(Debug, Clone, Copy)]
pub struct Led;

impl Led {
    pub const ANODE: &'static str = "anode";
    pub const CATHODE: &'static str = "cathode";

    /// Brightness for a given forward drop, or `None` below threshold.
    pub fn brightness(drop: f64) -> Option<f64> {
        (drop > LED_FORWARD_VOLTAGE)
            .then(|| ((drop - LED_FORWARD_VOLTAGE) / LED_BRIGHTNESS_SPAN).clamp(0.0, 1.0))
    }
}

impl ComponentModel for Led {
    fn evaluate(&self, ctx: &EvalContext<'_>) -> ComponentState {
        let probe = &ctx.probe;
        if !(probe.is_wired(Self::ANODE) && probe.is_wired(Self::CATHODE)) {
            return ComponentState::default();
        }

        let anode = probe.voltage(Self::ANODE);
        let cathode = probe.voltage(Self::CATHODE);
        if !(anode.is_finite() && cathode.is_finite()) {
            return ComponentState::default();
        }

        match Self::brightness(anode - cathode) {
            Some(brightness) => ComponentState {
                brightness,
                ..ComponentState::on()
            },
            None => ComponentState::default(),
        }
    }
}
