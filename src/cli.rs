use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Vector backend used for the whole render
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Precision {
    /// f32 lanes in a 16-byte aligned SIMD register
    Single,
    /// f64 scalar reference math
    Double,
}

/// Command line arguments structure using clap derive macros
#[derive(Debug, Parser)]
#[command(name = "weekend_simd")]
#[command(about = "Render the demo scene with the scalar or SIMD ray tracing core")]
pub struct Args {
    /// Set the logging level (defaults to "info")
    #[arg(long, value_enum, default_value = "info")]
    pub debug_level: LogLevel,

    /// Image width in pixels
    #[arg(long, default_value_t = 400, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Image width divided by height; height is derived from it
    #[arg(long, default_value_t = 16.0 / 9.0, value_parser = parse_aspect_ratio)]
    pub aspect_ratio: f64,

    /// Number of samples per pixel
    #[arg(
        long,
        short = 's',
        default_value_t = 100,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub samples_per_pixel: u32,

    /// Seed for all random streams; fresh entropy when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Vector backend
    #[arg(long, value_enum, default_value = "single")]
    pub precision: Precision,

    /// Vertical field of view in degrees, strictly between 0 and 180
    #[arg(long, default_value_t = 90.0, value_parser = parse_vfov)]
    pub vfov: f64,

    /// Lens diameter for depth of field (0 = pinhole)
    #[arg(long, default_value_t = 0.0)]
    pub aperture: f64,

    /// Hide the progress bar
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Output file path (.ppm ASCII, .png 8-bit, .exr linear HDR)
    #[arg(short, long, default_value = "image.ppm")]
    pub output: PathBuf,
}

fn parse_f64(s: &str) -> Result<f64, String> {
    s.parse::<f64>().map_err(|e| format!("`{}` is not a number: {}", s, e))
}

/// Aspect ratio must be a positive finite number
fn parse_aspect_ratio(s: &str) -> Result<f64, String> {
    let value = parse_f64(s)?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("aspect ratio must be positive and finite, got {}", value))
    }
}

/// Field of view in degrees, open interval (0, 180)
fn parse_vfov(s: &str) -> Result<f64, String> {
    let value = parse_f64(s)?;
    if value > 0.0 && value < 180.0 {
        Ok(value)
    } else {
        Err(format!("vertical field of view must be in (0, 180) degrees, got {}", value))
    }
}
