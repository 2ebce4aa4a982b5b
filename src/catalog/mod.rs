//! Component catalog: static terminal layouts and initial state per type.
//!
//! The catalog is plain data. A [`Catalog`] value is passed to the engine
//! explicitly, so independent simulations never share it implicitly.

mod terminals;

pub use terminals::{Offset, TerminalDef, TerminalDirection, TerminalRole};

use std::collections::BTreeMap;

use crate::circuit::{PlacedComponent, PlacementId, Properties};
use crate::components::ComponentKind;

use TerminalDirection::{Bidirectional, Input, Output};

/// A catalog entry describing one component type.
#[derive(Debug, Clone)]
pub struct ComponentDef {
    /// Type id (e.g. `led-red`)
    pub id: String,
    /// Human-readable name
    pub name: String,
    pub kind: ComponentKind,
    pub terminals: Vec<TerminalDef>,
    /// Initial internal state of a fresh placement
    pub initial: Properties,
}

impl ComponentDef {
    pub fn new(id: &str, name: &str, kind: ComponentKind, terminals: Vec<TerminalDef>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            terminals,
            initial: Properties::default(),
        }
    }

    pub fn with_initial(mut self, initial: Properties) -> Self {
        self.initial = initial;
        self
    }
}

/// The set of component types available for placement.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    defs: BTreeMap<String, ComponentDef>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard parts bin: sources, passives, LEDs, actuators, sensors,
    /// microcontroller boards and a half-size breadboard.
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for def in standard_parts() {
            catalog.insert(def);
        }
        catalog
    }

    /// Add or replace a catalog entry.
    pub fn insert(&mut self, def: ComponentDef) {
        self.defs.insert(def.id.clone(), def);
    }

    pub fn get(&self, type_id: &str) -> Option<&ComponentDef> {
        self.defs.get(type_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentDef> {
        self.defs.values()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Instantiate a catalog type on the canvas.
    ///
    /// Returns `None` when the type is not in the catalog.
    pub fn place(
        &self,
        type_id: &str,
        id: impl Into<PlacementId>,
        x: f64,
        y: f64,
        rotation: f64,
    ) -> Option<PlacedComponent> {
        let def = self.get(type_id)?;
        Some(PlacedComponent {
            id: id.into(),
            component_id: def.id.clone(),
            kind: def.kind,
            x,
            y,
            rotation,
            terminals: def.terminals.clone(),
            properties: def.initial.clone(),
        })
    }
}

fn term(id: &str, role: TerminalRole, direction: TerminalDirection, x: f64, y: f64) -> TerminalDef {
    TerminalDef::new(id, role, direction, Offset::new(x, y))
}

fn voltage(v: f64) -> Properties {
    Properties {
        voltage: Some(v),
        ..Default::default()
    }
}

fn standard_parts() -> Vec<ComponentDef> {
    use TerminalRole::*;

    let mut parts = vec![
        ComponentDef::new(
            "power-5v",
            "5V Power Supply",
            ComponentKind::PowerSupply,
            vec![term("vcc", Power, Output, 0.0, 10.0)],
        )
        .with_initial(voltage(5.0)),
        ComponentDef::new(
            "power-3v3",
            "3.3V Power Supply",
            ComponentKind::PowerSupply,
            vec![term("vcc", Power, Output, 0.0, 10.0)],
        )
        .with_initial(voltage(3.3)),
        ComponentDef::new(
            "battery-9v",
            "9V Battery",
            ComponentKind::Battery,
            vec![
                term("positive", Positive, Output, -6.0, -20.0),
                term("negative", Negative, Output, 6.0, -20.0),
            ],
        )
        .with_initial(voltage(9.0)),
        ComponentDef::new(
            "ground",
            "Ground",
            ComponentKind::Ground,
            vec![term("gnd", Ground, Input, 0.0, -10.0)],
        ),
        ComponentDef::new(
            "resistor",
            "Resistor",
            ComponentKind::Resistor,
            vec![
                term("a", Signal, Bidirectional, -20.0, 0.0),
                term("b", Signal, Bidirectional, 20.0, 0.0),
            ],
        )
        .with_initial(Properties {
            resistance: Some(220.0),
            ..Default::default()
        }),
        ComponentDef::new(
            "push-button",
            "Push Button",
            ComponentKind::Button,
            vec![
                term("a", Signal, Bidirectional, -10.0, 0.0),
                term("b", Signal, Bidirectional, 10.0, 0.0),
            ],
        )
        .with_initial(Properties {
            pressed: Some(false),
            ..Default::default()
        }),
        ComponentDef::new(
            "potentiometer",
            "Potentiometer",
            ComponentKind::Potentiometer,
            vec![
                term("vcc", Power, Input, -10.0, 15.0),
                term("wiper", Signal, Output, 0.0, 15.0),
                term("gnd", Ground, Input, 10.0, 15.0),
            ],
        )
        .with_initial(Properties {
            resistance: Some(10_000.0),
            position: Some(0.5),
            ..Default::default()
        }),
        ComponentDef::new(
            "buzzer",
            "Piezo Buzzer",
            ComponentKind::Buzzer,
            vec![
                term("positive", Positive, Input, -5.0, 12.0),
                term("negative", Negative, Input, 5.0, 12.0),
            ],
        ),
        ComponentDef::new(
            "servo",
            "Servo Motor",
            ComponentKind::Servo,
            vec![
                term("signal", Signal, Input, -20.0, -5.0),
                term("vcc", Power, Input, -20.0, 0.0),
                term("gnd", Ground, Input, -20.0, 5.0),
            ],
        ),
        ComponentDef::new(
            "ultrasonic",
            "HC-SR04 Ultrasonic Sensor",
            ComponentKind::UltrasonicSensor,
            vec![
                term("vcc", Power, Input, -15.0, 20.0),
                term("trig", Signal, Input, -5.0, 20.0),
                term("echo", Signal, Output, 5.0, 20.0),
                term("gnd", Ground, Input, 15.0, 20.0),
            ],
        ),
        ComponentDef::new(
            "pir-sensor",
            "PIR Motion Sensor",
            ComponentKind::PirSensor,
            vec![
                term("vcc", Power, Input, -10.0, 18.0),
                term("out", Signal, Output, 0.0, 18.0),
                term("gnd", Ground, Input, 10.0, 18.0),
            ],
        ),
        ComponentDef::new(
            "dht11",
            "DHT11 Temperature & Humidity Sensor",
            ComponentKind::DhtSensor,
            vec![
                term("vcc", Power, Input, -10.0, 18.0),
                term("data", Data, Bidirectional, 0.0, 18.0),
                term("gnd", Ground, Input, 10.0, 18.0),
            ],
        ),
    ];

    for (color, name) in [
        ("red", "Red LED"),
        ("green", "Green LED"),
        ("yellow", "Yellow LED"),
        ("blue", "Blue LED"),
    ] {
        parts.push(
            ComponentDef::new(
                &format!("led-{color}"),
                name,
                ComponentKind::Led,
                vec![
                    term("anode", Positive, Input, -5.0, 15.0),
                    term("cathode", Negative, Output, 5.0, 15.0),
                ],
            )
            .with_initial(Properties {
                color: Some(color.to_string()),
                ..Default::default()
            }),
        );
    }

    parts.push(arduino_uno());
    parts.push(arduino_nano());
    parts.push(esp32_devkit());
    parts.push(half_breadboard());
    parts
}

fn gpio_row(ids: impl IntoIterator<Item = String>, x0: f64, y: f64) -> Vec<TerminalDef> {
    ids.into_iter()
        .enumerate()
        .map(|(i, id)| term(&id, TerminalRole::Gpio, Bidirectional, x0 + 10.0 * i as f64, y))
        .collect()
}

fn arduino_uno() -> ComponentDef {
    use TerminalRole::*;

    let mut terminals = vec![
        term("3V3", Power, Output, -30.0, 60.0),
        term("5V", Power, Output, -20.0, 60.0),
        term("GND", Ground, Input, -10.0, 60.0),
        term("GND.2", Ground, Input, 0.0, 60.0),
        term("VIN", Power, Input, 10.0, 60.0),
    ];
    terminals.extend(gpio_row((0..14).rev().map(|n| format!("D{n}")), -60.0, -60.0));
    terminals.extend(gpio_row((0..6).map(|n| format!("A{n}")), 30.0, 60.0));
    ComponentDef::new("arduino-uno", "Arduino Uno", ComponentKind::Microcontroller, terminals)
        .with_initial(voltage(5.0))
}

fn arduino_nano() -> ComponentDef {
    use TerminalRole::*;

    let mut terminals = vec![
        term("5V", Power, Output, -70.0, 20.0),
        term("3V3", Power, Output, -60.0, 20.0),
        term("GND", Ground, Input, -50.0, 20.0),
        term("VIN", Power, Input, -40.0, 20.0),
    ];
    terminals.extend(gpio_row((2..14).map(|n| format!("D{n}")), -70.0, -20.0));
    terminals.extend(gpio_row((0..8).map(|n| format!("A{n}")), -30.0, 20.0));
    ComponentDef::new("arduino-nano", "Arduino Nano", ComponentKind::Microcontroller, terminals)
        .with_initial(voltage(5.0))
}

fn esp32_devkit() -> ComponentDef {
    use TerminalRole::*;

    let mut terminals = vec![
        term("3V3", Power, Output, -70.0, 30.0),
        term("GND", Ground, Input, -60.0, 30.0),
        term("VIN", Power, Input, -50.0, 30.0),
    ];
    let pins = [2, 4, 5, 12, 13, 14, 15, 16, 17, 18, 19, 21, 22, 23, 25, 26, 27, 32, 33];
    terminals.extend(gpio_row(pins.iter().map(|n| format!("D{n}")), -70.0, -30.0));
    ComponentDef::new("esp32-devkit", "ESP32 DevKit", ComponentKind::Microcontroller, terminals)
        .with_initial(voltage(3.3))
}

/// Number of numbered columns on the half-size breadboard.
pub const BREADBOARD_COLUMNS: usize = 30;

/// Holes per power rail on the half-size breadboard.
pub const BREADBOARD_RAIL_HOLES: usize = 25;

/// Half-size breadboard: 30 columns of `a..e` / `f..j` strips plus two
/// `+`/`-` power rail pairs. Hole ids look like `a12` or `top+7`.
fn half_breadboard() -> ComponentDef {
    let mut terminals = Vec::new();

    for (rail, y) in [("top+", -80.0), ("top-", -70.0), ("bottom+", 70.0), ("bottom-", 80.0)] {
        for n in 1..=BREADBOARD_RAIL_HOLES {
            terminals.push(
                term(&format!("{rail}{n}"), TerminalRole::Signal, Bidirectional, 12.0 * n as f64, y)
                    .on_bus(rail),
            );
        }
    }

    for col in 1..=BREADBOARD_COLUMNS {
        for (i, row) in ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j'].into_iter().enumerate() {
            let half = if i < 5 { "top" } else { "bottom" };
            let y = -50.0 + 10.0 * i as f64 + if i < 5 { 0.0 } else { 10.0 };
            terminals.push(
                term(&format!("{row}{col}"), TerminalRole::Signal, Bidirectional, 10.0 * col as f64, y)
                    .on_bus(format!("col{col}-{half}")),
            );
        }
    }

    ComponentDef::new("breadboard-half", "Half-size Breadboard", ComponentKind::Breadboard, terminals)
}
