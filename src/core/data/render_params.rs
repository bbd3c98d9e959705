use std::error::Error;
use std::f64::consts::PI;
use std::fmt;

use crate::core::data::complex::Complex;
use crate::core::data::complex_rect::{ComplexRect, ComplexRectError};
use crate::core::data::iteration_grid::IterationCount;
use crate::core::data::pixel_rect::{PixelRect, PixelRectError};
use crate::core::util::format_general::format_general;

pub const DEFAULT_WIDTH: u32 = 1024;
pub const DEFAULT_HEIGHT: u32 = 768;
pub const DEFAULT_CX: f64 = 9.984;
pub const DEFAULT_CY: f64 = 7.55;
pub const DEFAULT_MAX_ITERATIONS: u32 = 1024;
pub const DEFAULT_ESCAPE_RADIUS_SQUARED: f64 = 1e4;

/// Largest iteration cap whose counts still fit a sample. The escape loop
/// can run one step past the cap, so the cap itself must stay one below.
pub const MAX_ITERATIONS_LIMIT: u32 = IterationCount::MAX as u32 - 1;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum RenderParamsError {
    PixelRect(PixelRectError),
    ComplexRect(ComplexRectError),
    NonFiniteConstant { cx: f64, cy: f64 },
    MaxIterationsTooLarge { max_iterations: u32, limit: u32 },
    InvalidEscapeRadius { escape_radius_squared: f64 },
}

impl fmt::Display for RenderParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PixelRect(e) => write!(f, "invalid image size: {}", e),
            Self::ComplexRect(e) => write!(f, "invalid plane window: {}", e),
            Self::NonFiniteConstant { cx, cy } => {
                write!(f, "fractal constant must be finite: cx={}, cy={}", cx, cy)
            }
            Self::MaxIterationsTooLarge {
                max_iterations,
                limit,
            } => {
                write!(
                    f,
                    "maximum iterations {} exceeds the limit of {}",
                    max_iterations, limit
                )
            }
            Self::InvalidEscapeRadius {
                escape_radius_squared,
            } => {
                write!(
                    f,
                    "escape threshold must be positive and finite: {}",
                    escape_radius_squared
                )
            }
        }
    }
}

impl Error for RenderParamsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::PixelRect(e) => Some(e),
            Self::ComplexRect(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PixelRectError> for RenderParamsError {
    fn from(e: PixelRectError) -> Self {
        Self::PixelRect(e)
    }
}

impl From<ComplexRectError> for RenderParamsError {
    fn from(e: ComplexRectError) -> Self {
        Self::ComplexRect(e)
    }
}

/// Everything needed to render one Thorn image. Only constructible through
/// [`RenderParams::new`], so holding one means the values were validated.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderParams {
    pixel_rect: PixelRect,
    complex_rect: ComplexRect,
    c: Complex,
    max_iterations: u32,
    escape_radius_squared: f64,
}

impl RenderParams {
    pub fn new(
        pixel_rect: PixelRect,
        complex_rect: ComplexRect,
        c: Complex,
        max_iterations: u32,
        escape_radius_squared: f64,
    ) -> Result<Self, RenderParamsError> {
        if !c.is_finite() {
            return Err(RenderParamsError::NonFiniteConstant {
                cx: c.real,
                cy: c.imag,
            });
        }

        if max_iterations > MAX_ITERATIONS_LIMIT {
            return Err(RenderParamsError::MaxIterationsTooLarge {
                max_iterations,
                limit: MAX_ITERATIONS_LIMIT,
            });
        }

        if !(escape_radius_squared > 0.0 && escape_radius_squared.is_finite()) {
            return Err(RenderParamsError::InvalidEscapeRadius {
                escape_radius_squared,
            });
        }

        Ok(Self {
            pixel_rect,
            complex_rect,
            c,
            max_iterations,
            escape_radius_squared,
        })
    }

    /// Builds parameters from the flat values a caller usually has at hand.
    pub fn from_bounds(
        width: u32,
        height: u32,
        (xmin, xmax): (f64, f64),
        (ymin, ymax): (f64, f64),
        (cx, cy): (f64, f64),
        max_iterations: u32,
        escape_radius_squared: f64,
    ) -> Result<Self, RenderParamsError> {
        let pixel_rect = PixelRect::new(width, height)?;
        let complex_rect = ComplexRect::new(
            Complex {
                real: xmin,
                imag: ymin,
            },
            Complex {
                real: xmax,
                imag: ymax,
            },
        )?;

        Self::new(
            pixel_rect,
            complex_rect,
            Complex { real: cx, imag: cy },
            max_iterations,
            escape_radius_squared,
        )
    }

    #[must_use]
    pub fn pixel_rect(&self) -> PixelRect {
        self.pixel_rect
    }

    #[must_use]
    pub fn complex_rect(&self) -> ComplexRect {
        self.complex_rect
    }

    #[must_use]
    pub fn c(&self) -> Complex {
        self.c
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[must_use]
    pub fn escape_radius_squared(&self) -> f64 {
        self.escape_radius_squared
    }

    /// Text for the comment line of the output file header.
    #[must_use]
    pub fn comment(&self) -> String {
        format!(
            "Thorn fractal: cx={}, cy={}",
            format_general(self.c.real),
            format_general(self.c.imag)
        )
    }
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            pixel_rect: PixelRect::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
                .unwrap_or_else(|_| unreachable!("default image size is non-zero")),
            complex_rect: ComplexRect::new(
                Complex {
                    real: -PI,
                    imag: -PI,
                },
                Complex { real: PI, imag: PI },
            )
            .unwrap_or_else(|_| unreachable!("default plane window is valid")),
            c: Complex {
                real: DEFAULT_CX,
                imag: DEFAULT_CY,
            },
            max_iterations: DEFAULT_MAX_ITERATIONS,
            escape_radius_squared: DEFAULT_ESCAPE_RADIUS_SQUARED,
        }
    }
}
