//! Breadboard - Virtual Breadboard Circuit Simulator
//!
//! Runs one simulation tick over a saved scene and prints the result.
//!
//! # Usage
//!
//! ```bash
//! breadboard blink.json
//! breadboard blink.json --format text -vv
//! ```
//!
//! Exits with status 2 when the circuit has error-severity faults.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use breadboard_core::{error::Result, Catalog, Scene, SimulationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

/// Virtual breadboard circuit simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the scene file (.json)
    #[arg(value_name = "SCENE_FILE")]
    scene_file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Override the propagation pass cap from the scene
    #[arg(long, value_name = "N")]
    max_passes: Option<usize>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| "breadboard_core=warn".into()),
        1 => "breadboard_core=debug".into(),
        _ => "breadboard_core=trace".into(),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    // Load the scene
    let mut scene = Scene::parse_file(&args.scene_file)?;
    if let Some(passes) = args.max_passes {
        scene.config.max_propagation_passes = passes;
    }

    let (simulator, controls) = scene.into_simulator(Catalog::standard())?;
    let result = simulator.simulate(&controls);

    match args.format {
        Format::Json => println!("{}", result.to_json_pretty()?),
        Format::Text => print_text(&result),
    }

    Ok(if result.is_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    })
}

fn print_text(result: &SimulationResult) {
    println!("valid: {}", result.is_valid);
    for circuit in &result.circuits {
        let members: Vec<&str> = circuit.components.iter().map(|id| id.as_str()).collect();
        println!(
            "{}: {} (power: {}, ground: {})",
            circuit.id,
            members.join(", "),
            circuit.has_power,
            circuit.has_ground
        );
    }

    for error in &result.errors {
        println!("error   {error}");
    }
    for warning in &result.warnings {
        println!("warning {warning}");
    }

    for (id, state) in &result.component_states {
        if !state.is_active && !state.is_powered {
            continue;
        }
        let mut line = format!("{id}: active={} powered={}", state.is_active, state.is_powered);
        if state.brightness > 0.0 {
            line.push_str(&format!(" brightness={:.2}", state.brightness));
        }
        if let Some(output) = &state.output {
            line.push_str(&format!(" output={output:?}"));
        }
        println!("{line}");
    }

    for (id, net) in &result.net_states {
        if net.is_floating {
            continue;
        }
        let terminals: Vec<String> = net.terminals.iter().map(ToString::to_string).collect();
        println!("{id} = {:.2} V [{}]", net.voltage, terminals.join(" "));
    }
}
