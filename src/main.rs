use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

use asv_dynamics::config::{load_config, SimulationConfig};
use asv_dynamics::simulation::Simulation;

/// Command-line tool to simulate a swarm of wave gliders in an irregular sea
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Significant wave height in m
    #[arg(long)]
    wave_height: Option<f64>,

    /// Predominant wave heading in degrees from north
    #[arg(long)]
    wave_heading: Option<f64>,

    /// Random seed for the wave spectrum
    #[arg(long)]
    seed: Option<u64>,

    /// Number of component waves (odd, at least 3)
    #[arg(long)]
    components: Option<usize>,

    /// Longest simulated time in s
    #[arg(short, long)]
    duration: Option<f64>,

    /// Number of vehicles to launch
    #[arg(long)]
    vehicles: Option<usize>,

    /// Output CSV file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Args {
    fn apply(self, config: &mut SimulationConfig) {
        if let Some(v) = self.wave_height {
            config.sea_state.significant_wave_height = v;
        }
        if let Some(v) = self.wave_heading {
            config.sea_state.predominant_heading_deg = v;
        }
        if let Some(v) = self.seed {
            config.sea_state.seed = v;
        }
        if let Some(v) = self.components {
            config.sea_state.num_component_waves = v;
        }
        if let Some(v) = self.duration {
            config.duration = v;
        }
        if let Some(v) = self.vehicles {
            config.vehicles = v;
        }
        if self.output.is_some() {
            config.output = self.output;
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "asv_dynamics=info,asv_sim=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    // Parse command line arguments
    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SimulationConfig::default(),
    };
    args.apply(&mut config);

    info!(
        wave_height = config.sea_state.significant_wave_height,
        heading = config.sea_state.predominant_heading_deg,
        vehicles = config.vehicles,
        "building sea surface"
    );
    let sea_surface = config.sea_state.build().context("invalid sea state")?;
    let mut sim = config.simulation(&sea_surface).context("invalid vehicle configuration")?;
    let summary = sim.run(config.duration).context("simulation failed")?;

    let out: Box<dyn Write> = match &config.output {
        Some(path) => Box::new(File::create(path).with_context(|| format!("creating {}", path.display()))?),
        None => Box::new(io::stdout().lock()),
    };
    let mut out = BufWriter::new(out);
    write_csv(&mut out, &sim)?;
    out.flush()?;

    info!(
        time = summary.time,
        finished = summary.finished,
        buffer_full = summary.buffer_full,
        vehicles = summary.vehicles,
        "done"
    );
    Ok(())
}

/// One row per vehicle per step, in time order.
fn write_csv(out: &mut impl Write, sim: &Simulation) -> Result<()> {
    writeln!(out, "id,time,x,y,z,submersion,roll,pitch,yaw,v_surge,v_heave,f_heave")?;
    let steps = sim.nodes().iter().map(|n| n.snapshots().len()).max().unwrap_or(0);
    for step in 0..steps {
        for node in sim.nodes() {
            let Some(s) = node.snapshots().get(step) else {
                continue;
            };
            writeln!(
                out,
                "{},{:.3},{:.4},{:.4},{:.4},{:.4},{:.5},{:.5},{:.5},{:.4},{:.4},{:.3}",
                node.id(),
                s.time,
                s.position.x,
                s.position.y,
                s.position.z,
                s.submersion_depth,
                s.attitude.x,
                s.attitude.y,
                s.attitude.z,
                s.velocity.surge,
                s.velocity.heave,
                s.net_force.heave,
            )?;
        }
    }
    Ok(())
}
