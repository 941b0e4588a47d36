mod host;

use clap::Parser;
use glam::DVec3;
use host::PointMassHost;
use rand::rngs::StdRng;
use rand::SeedableRng;
use simple_car_dashboard::goal::GOAL_ELEVATION;
use simple_car_dashboard::scene::{pack_instances, GeometryBuffer};
use simple_car_dashboard::settings::{self, DashboardSettings, SETTINGS_FILE_NAME};
use simple_car_dashboard::task::SimpleCarTask;
use std::path::PathBuf;
use std::time::Duration;
use web_time::Instant;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Headless simple-car dashboard overlay run")]
struct Args {
    /// Number of simulation steps to run
    #[arg(long, default_value_t = 2000)]
    steps: u64,

    /// Simulation timestep in seconds
    #[arg(long, default_value_t = 0.01)]
    dt: f64,

    /// Goal RNG seed (overrides the settings file; entropy when absent from both)
    #[arg(long)]
    seed: Option<u64>,

    /// Settings file path
    #[arg(long, default_value = SETTINGS_FILE_NAME)]
    settings: PathBuf,

    /// Geometry buffer capacity (overrides the settings file)
    #[arg(long)]
    capacity: Option<usize>,

    /// Write the effective settings back to the settings file and exit
    #[arg(long)]
    write_settings: bool,
}

fn effective_settings(args: &Args) -> Result<DashboardSettings, settings::SettingsError> {
    let mut settings = settings::load_settings(&args.settings)?.unwrap_or_default();
    if let Some(seed) = args.seed {
        settings.rng_seed = Some(seed);
    }
    if let Some(capacity) = args.capacity {
        settings.geometry_capacity = capacity;
    }
    Ok(settings.sanitized())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let settings = effective_settings(&args)?;

    if args.write_settings {
        settings::save_settings(&args.settings, &settings)?;
        log::info!("wrote settings to {}", args.settings.display());
        return Ok(());
    }

    let rng = match settings.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let initial_goal = DVec3::new(
        settings.initial_goal_x,
        settings.initial_goal_y,
        GOAL_ELEVATION,
    );
    let mut task = SimpleCarTask::new(rng, initial_goal).with_diagnostics(settings.diagnostics);
    let mut host = PointMassHost::new();
    let mut buffer =
        GeometryBuffer::with_label_capacity(settings.geometry_capacity, settings.label_capacity);

    log::info!(
        "{}: {} steps at dt={}s, geometry capacity {}",
        task.name(),
        args.steps,
        args.dt,
        buffer.capacity()
    );

    let mut render_time = Duration::ZERO;
    let mut dropped_total = 0usize;
    let mut peak_instances = 0usize;
    for _ in 0..args.steps {
        let sample = host.step(task.goal(), args.dt);
        task.transition(&sample);

        let frame_start = Instant::now();
        buffer.clear();
        let report = task.modify_scene(&host, &mut buffer);
        let (instances, labels) = pack_instances(&buffer);
        render_time += frame_start.elapsed();

        dropped_total += report.dropped;
        peak_instances = peak_instances.max(instances.len());
        log::debug!(
            "frame: {} primitives ({} labels, {} bytes), residual {:?}",
            report.appended,
            labels.len(),
            std::mem::size_of_val(instances.as_slice()),
            task.residual(host.position(), host.ctrl())
        );
    }

    let mean_frame_us = if args.steps > 0 {
        render_time.as_secs_f64() * 1e6 / args.steps as f64
    } else {
        0.0
    };
    log::info!(
        "done: {} goals reached, peak {} instances, {} dropped, {:.1}us per frame",
        task.relocations(),
        peak_instances,
        dropped_total,
        mean_frame_us
    );
    log::debug!("final {}", task.telemetry());
    Ok(())
}
