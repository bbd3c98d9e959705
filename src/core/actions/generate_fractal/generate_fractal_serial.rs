use std::error::Error;

use crate::core::actions::generate_fractal::allocate_buffer::allocate_buffer;
use crate::core::actions::generate_fractal::errors::GenerateFractalError;
use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;

/// Single-threaded reference loop. Produces exactly what the parallel
/// generator produces, in the same row-major order.
pub fn generate_fractal_serial<Alg>(
    pixel_rect: PixelRect,
    algorithm: &Alg,
) -> Result<Vec<Alg::Success>, GenerateFractalError<Alg::Failure>>
where
    Alg: FractalAlgorithm,
    Alg::Success: Copy + Default,
    Alg::Failure: Error,
{
    let mut buffer = allocate_buffer(pixel_rect.size())?;
    let width = pixel_rect.width() as usize;

    for (y, row) in buffer.chunks_mut(width).enumerate() {
        for (x, cell) in row.iter_mut().enumerate() {
            let pixel = Point {
                x: x as u32,
                y: y as u32,
            };
            *cell = algorithm
                .compute(pixel)
                .map_err(GenerateFractalError::Algorithm)?;
        }
    }

    Ok(buffer)
}
