use approx::assert_relative_eq;

use breadboard_core::circuit::ErrorKind;
use breadboard_core::components::ComponentOutput;
use breadboard_core::solver::{PinLevel, SensorInput};
use breadboard_core::{simulate, Catalog, ControlState, Scene, SimulatorConfig};

mod common;
use common::*;

// ============ Reference scenarios ============

#[test]
fn test_resistor_led_circuit_is_valid() {
    let result = led_circuit(true).run();
    assert!(result.is_valid);
    assert!(result.errors.is_empty());
    assert!(result.warnings.is_empty());
    assert!(state(&result, "led1").is_active);
    assert_eq!(result.circuits.len(), 1);
    assert!(result.circuits[0].is_complete);
}

#[test]
fn test_led_without_resistor_names_the_led() {
    let result = led_circuit(false).run();
    assert!(!result.is_valid);
    let missing: Vec<_> = result
        .errors
        .iter()
        .filter(|e| e.kind == ErrorKind::MissingResistor)
        .collect();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].affected_components, vec![id("led1")]);
}

#[test]
fn test_supply_wired_to_ground_is_short() {
    let mut bench = Bench::new();
    bench.place("power-5v", "psu").place("ground", "gnd").wire("psu.vcc", "gnd.gnd");
    let result = bench.run();
    assert!(!result.is_valid);
    assert!(result.has_error(ErrorKind::ShortCircuit));
    assert_eq!(voltage_at(&result, "psu.vcc"), 0.0);
}

#[test]
fn test_battery_across_led_needs_resistor() {
    let mut bench = Bench::new();
    bench
        .place("battery-9v", "bat")
        .place("led-blue", "led1")
        .wire("bat.positive", "led1.anode")
        .wire("led1.cathode", "bat.negative");
    let result = bench.run();
    assert!(result.has_error(ErrorKind::MissingResistor));
    assert!(!result.has_error(ErrorKind::NoGround));
    assert!(!result.has_error(ErrorKind::NoPower));
    assert!(state(&result, "led1").is_active);
}

#[test]
fn test_unpowered_led_is_not_missing_a_resistor() {
    let mut bench = Bench::new();
    bench
        .place("led-red", "led1")
        .place("ground", "gnd")
        .wire("led1.cathode", "gnd.gnd");
    let result = bench.run();
    let kinds: Vec<ErrorKind> = result.errors.iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![ErrorKind::NoPower]);
    assert!(!result.has_error(ErrorKind::MissingResistor));
    assert!(result.has_warning(ErrorKind::OpenCircuit));
    assert!(!state(&result, "led1").is_active);
}

#[test]
fn test_mismatched_supplies_on_one_net_is_short() {
    let mut bench = Bench::new();
    bench
        .place("power-5v", "p5")
        .place("power-3v3", "p3")
        .place("resistor", "r1")
        .place("ground", "gnd")
        .wire("p5.vcc", "p3.vcc")
        .wire("p3.vcc", "r1.a")
        .wire("r1.b", "gnd.gnd");
    let result = bench.run();
    let shorts: Vec<_> = result
        .errors
        .iter()
        .filter(|e| e.kind == ErrorKind::ShortCircuit)
        .collect();
    assert_eq!(shorts.len(), 1);
    assert_eq!(voltage_at(&result, "p3.vcc"), 5.0);
}

// ============ Cluster independence ============

#[test]
fn test_disjoint_circuits_keep_errors_apart() {
    let mut bench = led_circuit(true);
    bench
        .place("power-5v", "psu2")
        .place("led-green", "led2")
        .place("ground", "gnd2")
        .wire("psu2.vcc", "led2.anode")
        .wire("led2.cathode", "gnd2.gnd");
    let result = bench.run();

    assert_eq!(result.circuits.len(), 2);
    let good = result.circuit_of(&id("led1")).unwrap();
    let bad = result.circuit_of(&id("led2")).unwrap();
    assert_ne!(good.id, bad.id);

    assert_eq!(result.errors_for(good.id).count(), 0);
    assert!(result
        .errors_for(bad.id)
        .any(|e| e.kind == ErrorKind::MissingResistor));
    assert!(state(&result, "led1").is_active);
}

#[test]
fn test_empty_canvas_is_valid() {
    let result = Bench::new().run();
    assert!(result.is_valid);
    assert!(result.circuits.is_empty());
    assert!(result.net_states.is_empty());
}

#[test]
fn test_repeated_simulation_is_identical() {
    let bench = led_circuit(true);
    let first = bench.run();
    let second = bench.run();
    for (a, b) in first.net_states.values().zip(second.net_states.values()) {
        assert_eq!(a.voltage.to_bits(), b.voltage.to_bits());
    }
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

// ============ LED threshold ============

fn led_at(volts: f64) -> (bool, f64) {
    let mut bench = Bench::new();
    bench
        .supply("psu", volts)
        .place("resistor", "r1")
        .place("led-red", "led1")
        .place("ground", "gnd")
        .wire("psu.vcc", "r1.a")
        .wire("r1.b", "led1.anode")
        .wire("led1.cathode", "gnd.gnd");
    let result = bench.run();
    let led = state(&result, "led1");
    (led.is_active, led.brightness)
}

#[test]
fn test_led_threshold_boundary() {
    assert_eq!(led_at(1.8), (false, 0.0));

    let (active, brightness) = led_at(1.81);
    assert!(active);
    assert_relative_eq!(brightness, 0.01 / 3.0, epsilon = EPSILON_VOLTS);

    let (active, brightness) = led_at(4.8);
    assert!(active);
    assert_relative_eq!(brightness, 1.0, epsilon = EPSILON_VOLTS);
    assert_eq!(led_at(9.0), (true, 1.0));
}

#[test]
fn test_reversed_led_stays_dark_and_warns() {
    let mut bench = Bench::new();
    bench
        .place("power-5v", "psu")
        .place("resistor", "r1")
        .place("led-red", "led1")
        .place("ground", "gnd")
        .wire("psu.vcc", "led1.cathode")
        .wire("led1.anode", "gnd.gnd")
        .wire("psu.vcc", "r1.a")
        .wire("r1.b", "gnd.gnd");
    let result = bench.run();
    assert!(!state(&result, "led1").is_active);
    assert!(result.has_warning(ErrorKind::ReversePolarity));
    assert!(result.is_valid);
}

// ============ Controls ============

#[test]
fn test_button_gates_propagation() {
    let mut bench = Bench::new();
    bench
        .place("power-5v", "psu")
        .place("push-button", "btn")
        .place("resistor", "r1")
        .place("led-yellow", "led1")
        .place("ground", "gnd")
        .wire("psu.vcc", "btn.a")
        .wire("btn.b", "r1.a")
        .wire("r1.b", "led1.anode")
        .wire("led1.cathode", "gnd.gnd");

    let released = bench.run();
    assert!(voltage_at(&released, "btn.b").is_nan());
    assert!(!state(&released, "led1").is_active);

    bench.sim.set_button_pressed(&id("btn"), true).unwrap();
    let pressed = bench.run();
    assert_eq!(voltage_at(&pressed, "led1.anode"), 5.0);
    assert!(state(&pressed, "led1").is_active);
}

#[test]
fn test_potentiometer_divides_supply() {
    let mut bench = Bench::new();
    bench
        .place("power-5v", "psu")
        .place("potentiometer", "pot")
        .place("resistor", "r1")
        .place("led-red", "led1")
        .place("ground", "gnd")
        .wire("psu.vcc", "pot.vcc")
        .wire("pot.gnd", "gnd.gnd")
        .wire("pot.wiper", "r1.a")
        .wire("r1.b", "led1.anode")
        .wire("led1.cathode", "gnd.gnd");

    bench.sim.set_potentiometer_position(&id("pot"), 0.25).unwrap();
    let low = bench.run();
    assert_relative_eq!(voltage_at(&low, "pot.wiper"), 1.25, epsilon = EPSILON_VOLTS);
    assert!(!state(&low, "led1").is_active);
    match state(&low, "pot").output {
        Some(ComponentOutput::Position { value, voltage }) => {
            assert_relative_eq!(value, 0.25);
            assert_relative_eq!(voltage, 1.25, epsilon = EPSILON_VOLTS);
        }
        ref other => panic!("unexpected potentiometer output {other:?}"),
    }

    bench.sim.set_potentiometer_position(&id("pot"), 1.0).unwrap();
    let high = bench.run();
    assert_relative_eq!(voltage_at(&high, "led1.anode"), 5.0);
    assert!(state(&high, "led1").is_active);

    assert!(bench.sim.set_potentiometer_position(&id("pot"), 1.5).is_err());
}

fn blink_bench() -> Bench {
    let mut bench = Bench::new();
    bench
        .place("arduino-uno", "uno")
        .place("resistor", "r1")
        .place("led-red", "led1")
        .place("ground", "gnd")
        .wire("uno.D13", "r1.a")
        .wire("r1.b", "led1.anode")
        .wire("led1.cathode", "gnd.gnd");
    bench
}

#[test]
fn test_gpio_high_lights_led() {
    let bench = blink_bench();
    let high = ControlState::new().with_pin("uno", "D13", PinLevel::High);
    let result = bench.run_with(&high);
    assert!(result.is_valid, "{:?}", result.errors);
    assert!(state(&result, "led1").is_active);
    assert_eq!(voltage_at(&result, "led1.anode"), 5.0);
    assert!(state(&result, "uno").is_powered);
}

#[test]
fn test_gpio_returns_through_board_gnd() {
    let mut bench = Bench::new();
    bench
        .place("arduino-uno", "uno")
        .place("resistor", "r1")
        .place("led-red", "led1")
        .wire("uno.D13", "r1.a")
        .wire("r1.b", "led1.anode")
        .wire("led1.cathode", "uno.GND");

    let high = ControlState::new().with_pin("uno", "D13", PinLevel::High);
    let result = bench.run_with(&high);
    assert!(result.is_valid, "{:?}", result.errors);
    assert!(!result.has_error(ErrorKind::NoGround));
    assert_eq!(voltage_at(&result, "led1.cathode"), 0.0);
    assert!(state(&result, "led1").is_active);
    assert!(state(&result, "uno").is_powered);

    let idle = bench.run();
    assert!(!state(&idle, "led1").is_active);
    assert!(!state(&idle, "uno").is_powered);
    assert!(idle.has_error(ErrorKind::NoGround));
}

#[test]
fn test_gpio_low_or_undriven_leaves_led_dark() {
    let bench = blink_bench();

    let low = ControlState::new().with_pin("uno", "D13", PinLevel::Low);
    let result = bench.run_with(&low);
    assert!(!state(&result, "led1").is_active);
    assert_eq!(voltage_at(&result, "led1.anode"), 0.0);

    let result = bench.run();
    assert!(!state(&result, "led1").is_active);
    assert!(result.has_error(ErrorKind::NoPower));
}

#[test]
fn test_esp32_logic_level_is_3v3() {
    let mut bench = Bench::new();
    bench
        .place("esp32-devkit", "esp")
        .place("resistor", "r1")
        .place("led-green", "led1")
        .place("ground", "gnd")
        .wire("esp.D2", "r1.a")
        .wire("r1.b", "led1.anode")
        .wire("led1.cathode", "gnd.gnd");
    let result = bench.run_with(&ControlState::new().with_pin("esp", "D2", PinLevel::High));
    let led = state(&result, "led1");
    assert!(led.is_active);
    assert_relative_eq!(led.brightness, (3.3 - 1.8) / 3.0, epsilon = EPSILON_VOLTS);
}

// ============ Modules ============

#[test]
fn test_sensor_readings_need_power() {
    let mut bench = Bench::new();
    bench
        .place("power-5v", "psu")
        .place("ground", "gnd")
        .place("ultrasonic", "sonar")
        .place("servo", "arm")
        .wire("psu.vcc", "sonar.vcc")
        .wire("sonar.gnd", "gnd.gnd")
        .wire("psu.vcc", "arm.vcc")
        .wire("arm.gnd", "gnd.gnd");

    let control = ControlState::new()
        .with_sensor(
            "sonar",
            SensorInput {
                distance: Some(42.0),
                ..Default::default()
            },
        )
        .with_sensor(
            "arm",
            SensorInput {
                angle: Some(270.0),
                ..Default::default()
            },
        );
    let result = bench.run_with(&control);

    let sonar = state(&result, "sonar");
    assert!(sonar.is_powered);
    assert_eq!(sonar.output, Some(ComponentOutput::Distance { centimeters: 42.0 }));

    // servo powered but its signal pin is unwired
    let arm = state(&result, "arm");
    assert!(arm.is_powered);
    assert!(!arm.is_active);
    assert!(result.has_warning(ErrorKind::OpenCircuit));

    bench.sim.remove_component(&id("psu")).unwrap();
    let unpowered = bench.run_with(&control);
    assert!(!state(&unpowered, "sonar").is_powered);
    assert_eq!(state(&unpowered, "sonar").output, None);
}

#[test]
fn test_breadboard_rails_carry_supply() {
    let mut bench = Bench::new();
    bench
        .place("breadboard-half", "bb")
        .place("power-5v", "psu")
        .place("ground", "gnd")
        .place("resistor", "r1")
        .place("led-red", "led1")
        .wire("psu.vcc", "bb.top+1")
        .wire("gnd.gnd", "bb.top-1")
        .wire("bb.top+25", "r1.a")
        .wire("r1.b", "bb.a10")
        .wire("bb.e10", "led1.anode")
        .wire("led1.cathode", "bb.top-12");
    let result = bench.run();
    assert!(result.is_valid, "{:?}", result.errors);
    assert!(state(&result, "led1").is_active);
    assert!(voltage_at(&result, "bb.f10").is_nan());
    assert!(result.circuits.iter().all(|c| !c.contains_component(&id("bb"))));
}

// ============ Propagation cap ============

#[test]
fn test_pass_cap_leaves_far_nets_floating() {
    let catalog = Catalog::standard();
    let place = |type_id: &str, pid: &str| catalog.place(type_id, pid, 0.0, 0.0, 0.0).unwrap();
    let components = vec![place("resistor", "r2"), place("resistor", "r1"), place("power-5v", "psu")];
    let mut bench = Bench::new();
    bench.wire("psu.vcc", "r1.a").wire("r1.b", "r2.b");
    let wires = bench.sim.wires().to_vec();

    let capped = simulate(
        &components,
        &wires,
        &ControlState::default(),
        &SimulatorConfig::new().with_max_propagation_passes(1),
    );
    assert!(!capped.propagation.converged);
    assert!(voltage_at(&capped, "r2.a").is_nan());

    let full = simulate(&components, &wires, &ControlState::default(), &SimulatorConfig::default());
    assert!(full.propagation.converged);
    assert_eq!(voltage_at(&full, "r2.a"), 5.0);
}

// ============ Scenes ============

#[test]
fn test_scene_round_trip_through_simulator() {
    let json = r#"{
        "components": [
            {"id": "psu", "componentId": "power-5v"},
            {"id": "r1", "componentId": "resistor", "state": {"resistance": 1000}},
            {"id": "led1", "componentId": "led-red"},
            {"id": "gnd", "componentId": "ground"}
        ],
        "wires": [
            {"id": "w1", "startTerminal": {"componentId": "psu", "terminalId": "vcc"},
                         "endTerminal": {"componentId": "r1", "terminalId": "a"}},
            {"id": "w2", "startTerminal": {"componentId": "r1", "terminalId": "b"},
                         "endTerminal": {"componentId": "led1", "terminalId": "anode"}},
            {"id": "w3", "startTerminal": {"componentId": "led1", "terminalId": "cathode"},
                         "endTerminal": {"componentId": "gnd", "terminalId": "gnd"}},
            {"id": "w4", "startTerminal": {"componentId": "led1", "terminalId": "anode"}}
        ]
    }"#;
    let (sim, controls) = Scene::parse(json)
        .unwrap()
        .into_simulator(Catalog::standard())
        .unwrap();
    let result = sim.simulate(&controls);
    assert!(result.is_valid);
    assert_eq!(result.dropped_wires, vec!["w4".to_string()]);

    let value: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
    assert_eq!(value["isValid"], true);
    assert_eq!(value["componentStates"]["led1"]["isActive"], true);
    assert_eq!(value["droppedWires"][0], "w4");
}
