use crate::core::data::complex::Complex;
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ComplexRectError {
    InvalidSize { width: f64, height: f64 },
    NonFinite { top_left: Complex, bottom_right: Complex },
}

impl fmt::Display for ComplexRectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(
                    f,
                    "complex rect size must be positive: {}x{}",
                    width, height
                )
            }
            Self::NonFinite { top_left, bottom_right } => {
                write!(
                    f,
                    "complex rect corners must be finite: ({}, {}) to ({}, {})",
                    top_left.real, top_left.imag, bottom_right.real, bottom_right.imag
                )
            }
        }
    }
}

impl Error for ComplexRectError {}

/// The plane window: `top_left` holds `(xmin, ymin)` and `bottom_right`
/// holds `(xmax, ymax)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ComplexRect {
    top_left: Complex,
    bottom_right: Complex,
}

impl ComplexRect {
    pub fn new(top_left: Complex, bottom_right: Complex) -> Result<Self, ComplexRectError> {
        if !top_left.is_finite() || !bottom_right.is_finite() {
            return Err(ComplexRectError::NonFinite {
                top_left,
                bottom_right,
            });
        }

        let width = bottom_right.real - top_left.real;
        let height = bottom_right.imag - top_left.imag;

        // also catches spans that overflow to infinity
        if !(width > 0.0 && width.is_finite() && height > 0.0 && height.is_finite()) {
            return Err(ComplexRectError::InvalidSize { width, height });
        }

        Ok(Self {
            top_left,
            bottom_right,
        })
    }

    #[must_use]
    pub fn top_left(&self) -> Complex {
        self.top_left
    }

    #[must_use]
    pub fn bottom_right(&self) -> Complex {
        self.bottom_right
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.bottom_right.real - self.top_left.real
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom_right.imag - self.top_left.imag
    }
}
