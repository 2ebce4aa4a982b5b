/// strategies.rs
use proptest::prelude::*;

use breadboard_core::circuit::{PlacedComponent, Wire};
use breadboard_core::Catalog;

/// Catalog parts used to build random canvases
pub const PART_POOL: &[&str] = &[
    "power-5v",
    "power-3v3",
    "battery-9v",
    "ground",
    "resistor",
    "push-button",
    "potentiometer",
    "led-red",
    "buzzer",
    "servo",
    "breadboard-half",
];

/// A random placement list with wires between random terminals.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub components: Vec<PlacedComponent>,
    pub wires: Vec<Wire>,
}

impl Canvas {
    pub fn terminal_count(&self) -> usize {
        self.components.iter().map(|c| c.terminals.len()).sum()
    }
}

/// Generate canvases of up to 12 parts and 24 wires.
///
/// Buttons are randomly pressed and some wires are left half-drawn.
pub fn arbitrary_canvas() -> impl Strategy<Value = Canvas> {
    let parts = prop::collection::vec((0..PART_POOL.len(), any::<bool>()), 1..=12);
    let wires = prop::collection::vec(
        (any::<usize>(), any::<usize>(), any::<usize>(), any::<usize>(), 0u8..10),
        0..=24,
    );
    (parts, wires).prop_map(|(parts, raw_wires)| {
        let catalog = Catalog::standard();
        let components: Vec<PlacedComponent> = parts
            .into_iter()
            .enumerate()
            .map(|(i, (part, pressed))| {
                let mut c = catalog
                    .place(PART_POOL[part], format!("p{i}"), 0.0, 0.0, 0.0)
                    .expect("pool parts are in the standard catalog");
                if c.properties.pressed.is_some() {
                    c.properties.pressed = Some(pressed);
                }
                c
            })
            .collect();

        let wires = raw_wires
            .into_iter()
            .enumerate()
            .map(|(i, (ca, ta, cb, tb, roll))| {
                let a = &components[ca % components.len()];
                let b = &components[cb % components.len()];
                let start = a.terminal_ref(&a.terminals[ta % a.terminals.len()].id);
                let end = b.terminal_ref(&b.terminals[tb % b.terminals.len()].id);
                let mut wire = Wire::new(format!("w{i}"), start, end);
                if roll == 0 {
                    wire.end_terminal = None;
                }
                wire
            })
            .collect();

        Canvas { components, wires }
    })
}
