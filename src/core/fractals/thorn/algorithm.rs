use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::data::complex_rect::ComplexRect;
use crate::core::data::iteration_grid::IterationCount;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use crate::core::data::render_params::RenderParams;
use crate::core::util::pixel_to_complex_coords::{
    PixelToComplexCoordsError, pixel_to_complex_coords,
};

/// The Thorn (secant sea) escape-time recurrence:
///
/// ```text
/// re' = re / cos(im) + cx
/// im' = im / sin(re) + cy
/// ```
///
/// Near-zero `cos`/`sin` values blow the orbit up to infinity or NaN. That
/// is a property of the fractal, not an error: an infinite magnitude counts
/// as escaped and a NaN magnitude ends the loop because the comparison
/// fails.
#[derive(Debug, PartialEq)]
pub struct ThornAlgorithm {
    pixel_rect: PixelRect,
    complex_rect: ComplexRect,
    c: Complex,
    max_iterations: u32,
    escape_radius_squared: f64,
}

impl FractalAlgorithm for ThornAlgorithm {
    type Success = IterationCount;
    type Failure = PixelToComplexCoordsError;

    fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
        let z = pixel_to_complex_coords(pixel, self.pixel_rect, self.complex_rect)?;

        Ok(self.escape_time(z))
    }
}

impl ThornAlgorithm {
    #[must_use]
    pub fn new(params: &RenderParams) -> Self {
        Self {
            pixel_rect: params.pixel_rect(),
            complex_rect: params.complex_rect(),
            c: params.c(),
            max_iterations: params.max_iterations(),
            escape_radius_squared: params.escape_radius_squared(),
        }
    }

    /// Iterates from `z` and returns the loop counter on exit.
    ///
    /// The body always runs once, then the counter is compared against the
    /// cap *before* being incremented. A point that never escapes therefore
    /// reports `max_iterations + 1`, and the smallest possible count is 1.
    #[must_use]
    pub fn escape_time(&self, z: Complex) -> IterationCount {
        let mut z = z;
        let mut iteration: u32 = 0;

        loop {
            z = Complex {
                real: z.real / z.imag.cos(),
                imag: z.imag / z.real.sin(),
            } + self.c;

            let below_cap = iteration < self.max_iterations;
            iteration += 1;

            if !(below_cap && z.magnitude_squared() < self.escape_radius_squared) {
                break;
            }
        }

        // RenderParams caps max_iterations so that max_iterations + 1 fits
        iteration as IterationCount
    }
}
