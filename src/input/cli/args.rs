use std::f64::consts::PI;
use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::core::data::render_params::{
    DEFAULT_CX, DEFAULT_CY, DEFAULT_ESCAPE_RADIUS_SQUARED, DEFAULT_HEIGHT,
    DEFAULT_MAX_ITERATIONS, DEFAULT_WIDTH, RenderParams, RenderParamsError,
};

/// Render the Thorn fractal as a binary PGM image.
///
/// Plane bounds take plain numbers or multiples of pi: `pi`, `-pi`,
/// `0.5pi`, `2*pi`.
#[derive(Debug, Parser)]
#[command(name = "thorn", version, disable_help_flag = true)]
pub struct Args {
    /// Image width in pixels
    #[arg(short = 'w', long, default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    /// Image height in pixels
    #[arg(short = 'h', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    /// Real part of the fractal constant
    #[arg(short = 'x', long, default_value_t = DEFAULT_CX, allow_negative_numbers = true)]
    pub cx: f64,

    /// Imaginary part of the fractal constant
    #[arg(short = 'y', long, default_value_t = DEFAULT_CY, allow_negative_numbers = true)]
    pub cy: f64,

    /// Left edge of the plane window
    #[arg(
        long,
        default_value = "-pi",
        value_parser = parse_plane_bound,
        allow_hyphen_values = true
    )]
    pub xmin: f64,

    /// Right edge of the plane window (exclusive)
    #[arg(
        long,
        default_value = "pi",
        value_parser = parse_plane_bound,
        allow_hyphen_values = true
    )]
    pub xmax: f64,

    /// Top edge of the plane window
    #[arg(
        long,
        default_value = "-pi",
        value_parser = parse_plane_bound,
        allow_hyphen_values = true
    )]
    pub ymin: f64,

    /// Bottom edge of the plane window (exclusive)
    #[arg(
        long,
        default_value = "pi",
        value_parser = parse_plane_bound,
        allow_hyphen_values = true
    )]
    pub ymax: f64,

    /// Maximum iterations per pixel
    #[arg(short = 'i', long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub iterations: u32,

    /// Escape threshold for the squared magnitude
    #[arg(short = 'e', long, default_value_t = DEFAULT_ESCAPE_RADIUS_SQUARED)]
    pub escape: f64,

    /// Worker threads [default: one per core]
    #[arg(short = 't', long, value_parser = parse_thread_count)]
    pub threads: Option<usize>,

    /// Output file
    #[arg(value_name = "PGMFILE")]
    pub pgmfile: PathBuf,

    // -h is taken by --height, so help is long-only
    #[allow(dead_code)]
    #[arg(long, action = ArgAction::Help, help = "Print help")]
    help: Option<bool>,
}

impl Args {
    pub fn to_params(&self) -> Result<RenderParams, RenderParamsError> {
        RenderParams::from_bounds(
            self.width,
            self.height,
            (self.xmin, self.xmax),
            (self.ymin, self.ymax),
            (self.cx, self.cy),
            self.iterations,
            self.escape,
        )
    }
}

/// Parses a plane coordinate given either as a number or as a multiple of
/// pi (`pi`, `-pi`, `0.5pi`, `2*pi`, `π`).
pub fn parse_plane_bound(s: &str) -> Result<f64, String> {
    let text = s.trim().to_ascii_lowercase();

    let value = match text.strip_suffix("pi").or_else(|| text.strip_suffix('π')) {
        Some(coefficient) => {
            let factor = match coefficient.trim().trim_end_matches('*').trim() {
                "" | "+" => 1.0,
                "-" => -1.0,
                number => number
                    .parse::<f64>()
                    .map_err(|_| format!("invalid multiple of pi: {}", s))?,
            };
            factor * PI
        }
        None => text
            .parse::<f64>()
            .map_err(|_| format!("invalid plane coordinate: {}", s))?,
    };

    if !value.is_finite() {
        return Err(format!("plane coordinate must be finite: {}", s));
    }

    Ok(value)
}

fn parse_thread_count(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("thread count must be at least 1".to_string()),
        Ok(threads) => Ok(threads),
        Err(_) => Err(format!("invalid thread count: {}", s)),
    }
}
