//! Wrecking Cubes headless driver
//!
//! Stands in for the render loop: builds a simulation, steps it once per
//! frame and writes the poses a renderer would consume as JSON lines.
//!
//! Usage: `wrecking-cubes [preset | config.json] [frames] [start-angle]`

use std::error::Error;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use serde::Serialize;
use wrecking_cubes::sim::{BlockPose, PendulumPose};
use wrecking_cubes::{ConfigError, Preset, SimConfig, Simulation};

const DEFAULT_FRAMES: u64 = 600;
/// Released from the far side so the first forward swing reaches the wall
const DEFAULT_ANGLE: f64 = -1.0;

/// One line of output
#[derive(Serialize)]
struct FrameOutput {
    frame: u64,
    pendulum: PendulumPose,
    blocks: Vec<BlockPose>,
    impacts: Vec<usize>,
}

fn load_config(arg: Option<&str>) -> Result<SimConfig, ConfigError> {
    match arg {
        None => Ok(SimConfig::default()),
        Some(path) if path.ends_with(".json") => SimConfig::load(path),
        Some(name) => Ok(SimConfig::from_preset(name.parse::<Preset>()?)),
    }
}

fn run(args: &[String]) -> Result<(), Box<dyn Error>> {
    let config = load_config(args.first().map(String::as_str))?;
    let frames = match args.get(1) {
        Some(s) => s.parse::<u64>()?,
        None => DEFAULT_FRAMES,
    };
    let angle = match args.get(2) {
        Some(s) => s.parse::<f64>()?,
        None => DEFAULT_ANGLE,
    };

    let mut sim = Simulation::new(config)?;
    sim.set_pendulum_angle(angle);
    log::info!("Running {} frames from θ={}", frames, angle);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut total_impacts = 0;

    for _ in 0..frames {
        let report = sim.step();
        total_impacts += report.impacts.len();

        let line = FrameOutput {
            frame: report.frame,
            pendulum: sim.pendulum_pose(),
            blocks: sim.block_poses(),
            impacts: report.impacts.iter().map(|(index, _)| *index).collect(),
        };
        serde_json::to_writer(&mut out, &line)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    let struck = sim.blocks().iter().filter(|b| b.is_struck()).count();
    log::info!(
        "Done: {} impacts, {} blocks still sliding, θ={:.4}",
        total_impacts,
        struck,
        sim.pendulum().theta
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Wrecking Cubes (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
