mod app;
mod cli;

use anyhow::Result;

use orrery_engine::device::GpuInit;
use orrery_engine::logging::{LoggingConfig, init_logging};
use orrery_engine::window::{LogicalSize, Runtime, RuntimeConfig};
use orrery_scene::descriptor::SystemDescriptor;
use orrery_scene::exercise::{Exercise, Quadrants, SolarSystem, SunEarthMoon};

use app::StudioApp;
use cli::{Args, ExerciseKind};

fn main() -> Result<()> {
    let args = cli::parse();

    init_logging(match &args.log_level {
        Some(filter) => LoggingConfig::with_filter(filter.clone()),
        None => LoggingConfig::default(),
    });

    let exercise = build_exercise(&args)?;
    let (width, height) = args.window_size();
    log::info!("starting {} ({width}x{height})", exercise.name());

    let config = RuntimeConfig {
        title: format!("orrery - {}", exercise.name()),
        initial_size: LogicalSize::new(width, height),
    };

    Runtime::run(config, GpuInit::default(), StudioApp::new(exercise))
}

fn build_exercise(args: &Args) -> Result<Box<dyn Exercise>> {
    if args.system.is_some() && args.exercise != ExerciseKind::Solar {
        log::warn!("--system only applies to the solar exercise; ignoring it");
    }

    let exercise: Box<dyn Exercise> = match args.exercise {
        ExerciseKind::Quadrants => Box::new(Quadrants::new()),
        ExerciseKind::Orbits => Box::new(SunEarthMoon::new()?),
        ExerciseKind::Solar => {
            let descriptor = match &args.system {
                Some(path) => SystemDescriptor::load(path)?,
                None => SystemDescriptor::solar_system()?,
            };
            Box::new(SolarSystem::new(&descriptor)?)
        }
    };
    Ok(exercise)
}
