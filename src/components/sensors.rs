//! Sensor modules.
//!
//! Sensors need a 5 V class supply (`vcc ≥ 4.5 V`, `gnd` at ground). Their
//! readings are simulated physical inputs taken from the control state and
//! are only reported while the module is powered.

use super::{ComponentModel, ComponentOutput, ComponentState, EvalContext};

/// HC-SR04 ultrasonic distance sensor.
#[derive(Debug, Clone, Copy)]
pub struct UltrasonicSensor;

impl ComponentModel for UltrasonicSensor {
    fn evaluate(&self, ctx: &EvalContext<'_>) -> ComponentState {
        let powered = ctx.supply_ok("vcc", "gnd");
        let output = ctx
            .inputs
            .and_then(|i| i.distance)
            .filter(|_| powered)
            .map(|cm| ComponentOutput::Distance {
                centimeters: cm.max(0.0),
            });
        ComponentState::powered(powered).with_output(output)
    }
}

/// Passive infrared motion sensor.
#[derive(Debug, Clone, Copy)]
pub struct PirSensor;

impl ComponentModel for PirSensor {
    fn evaluate(&self, ctx: &EvalContext<'_>) -> ComponentState {
        let powered = ctx.supply_ok("vcc", "gnd");
        let output = ctx
            .inputs
            .and_then(|i| i.motion)
            .filter(|_| powered)
            .map(|detected| ComponentOutput::Motion { detected });
        ComponentState::powered(powered).with_output(output)
    }
}

/// DHT11/DHT22 temperature and humidity sensor.
#[derive(Debug, Clone, Copy)]
pub struct DhtSensor;

impl ComponentModel for DhtSensor {
    fn evaluate(&self, ctx: &EvalContext<'_>) -> ComponentState {
        let powered = ctx.supply_ok("vcc", "gnd");
        let output = ctx
            .inputs
            .filter(|_| powered)
            .and_then(|i| match (i.temperature, i.humidity) {
                (Some(temperature), Some(humidity)) => Some(ComponentOutput::Climate {
                    temperature,
                    humidity: humidity.clamp(0.0, 100.0),
                }),
                _ => None,
            });
        ComponentState::powered(powered).with_output(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{Netlist, PlacedComponent};
    use crate::components::test_support::{place, wire};
    use crate::components::Probe;
    use crate::solver::{propagate, ControlState, SensorInput};

    fn powered_module(type_id: &str, supply: &str) -> (Vec<PlacedComponent>, Netlist) {
        let components = vec![place(supply, "psu"), place("ground", "gnd"), place(type_id, "m")];
        let wires = vec![
            wire("w1", ("psu", "vcc"), ("m", "vcc")),
            wire("w2", ("gnd", "gnd"), ("m", "gnd")),
        ];
        let mut netlist = Netlist::build(&components, &wires, &ControlState::default());
        propagate(&mut netlist, &components, 8);
        (components, netlist)
    }

    #[test]
    fn test_ultrasonic_reports_supplied_distance() {
        let (components, netlist) = powered_module("ultrasonic", "power-5v");
        let input = SensorInput {
            distance: Some(42.0),
            ..Default::default()
        };
        let ctx = EvalContext {
            probe: Probe::new(&components[2], &netlist),
            inputs: Some(&input),
            pins: None,
        };
        let state = UltrasonicSensor.evaluate(&ctx);
        assert!(state.is_powered);
        assert_eq!(state.output, Some(ComponentOutput::Distance { centimeters: 42.0 }));
    }

    #[test]
    fn test_sensor_underpowered_at_3v3() {
        let (components, netlist) = powered_module("pir-sensor", "power-3v3");
        let input = SensorInput {
            motion: Some(true),
            ..Default::default()
        };
        let ctx = EvalContext {
            probe: Probe::new(&components[2], &netlist),
            inputs: Some(&input),
            pins: None,
        };
        let state = PirSensor.evaluate(&ctx);
        assert!(!state.is_powered);
        assert_eq!(state.output, None);
    }

    #[test]
    fn test_dht_needs_both_readings() {
        let (components, netlist) = powered_module("dht11", "power-5v");
        let partial = SensorInput {
            temperature: Some(21.5),
            ..Default::default()
        };
        let ctx = EvalContext {
            probe: Probe::new(&components[2], &netlist),
            inputs: Some(&partial),
            pins: None,
        };
        assert_eq!(DhtSensor.evaluate(&ctx).output, None);
    }
}
