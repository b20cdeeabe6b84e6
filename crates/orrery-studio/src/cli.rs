use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Orrery: animated classroom orbits on wgpu.
#[derive(Parser, Debug)]
#[command(name = "orrery", version, about)]
pub struct Args {
    /// Exercise to run.
    #[arg(short = 'x', long, value_enum, default_value_t = ExerciseKind::Solar)]
    pub exercise: ExerciseKind,

    /// JSON system file replacing the built-in solar system.
    #[arg(long)]
    pub system: Option<PathBuf>,

    /// Initial window width in logical pixels.
    #[arg(long)]
    pub width: Option<f64>,

    /// Initial window height in logical pixels.
    #[arg(long)]
    pub height: Option<f64>,

    /// Log filter override (error, warn, info, debug, trace, or env_logger syntax).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum ExerciseKind {
    /// Four scissor-filled quadrants.
    Quadrants,
    /// Sun, Earth and Moon in the plane.
    Orbits,
    /// Sun and four planets in 3D.
    Solar,
}

impl ExerciseKind {
    /// Window size each exercise was laid out for.
    pub fn default_size(self) -> (f64, f64) {
        match self {
            ExerciseKind::Quadrants => (500.0, 500.0),
            ExerciseKind::Orbits => (700.0, 700.0),
            ExerciseKind::Solar => (1280.0, 720.0),
        }
    }
}

impl Args {
    pub fn window_size(&self) -> (f64, f64) {
        let (w, h) = self.exercise.default_size();
        (self.width.unwrap_or(w), self.height.unwrap_or(h))
    }
}

pub fn parse() -> Args {
    Args::parse()
}
