use rayon::prelude::*;
use std::error::Error;

use crate::core::actions::generate_fractal::allocate_buffer::allocate_buffer;
use crate::core::actions::generate_fractal::errors::GenerateFractalError;
use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;

/// Generates fractal data in parallel using rayon's work-stealing scheduler.
///
/// The buffer is allocated up front and split into rows; each rayon task
/// owns one row, so no locking is needed and the only synchronisation is
/// the implicit join at the end of `try_for_each`. Runs on whichever pool
/// is current, so wrap the call in `ThreadPool::install` to pin the
/// thread count.
///
/// Returns row-major results, identical to [`generate_fractal_serial`].
///
/// [`generate_fractal_serial`]: crate::core::actions::generate_fractal::generate_fractal_serial::generate_fractal_serial
pub fn generate_fractal_parallel_rayon<Alg>(
    pixel_rect: PixelRect,
    algorithm: &Alg,
) -> Result<Vec<Alg::Success>, GenerateFractalError<Alg::Failure>>
where
    Alg: FractalAlgorithm + Sync,
    Alg::Success: Copy + Default + Send,
    Alg::Failure: Error + Send,
{
    let mut buffer = allocate_buffer(pixel_rect.size())?;
    let width = pixel_rect.width() as usize;

    buffer
        .par_chunks_mut(width)
        .enumerate()
        .try_for_each(|(y, row)| {
            for (x, cell) in row.iter_mut().enumerate() {
                let pixel = Point {
                    x: x as u32,
                    y: y as u32,
                };
                *cell = algorithm
                    .compute(pixel)
                    .map_err(GenerateFractalError::Algorithm)?;
            }

            Ok::<(), GenerateFractalError<Alg::Failure>>(())
        })?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::generate_fractal::generate_fractal_serial::generate_fractal_serial;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, PartialEq)]
    struct StubError {}

    impl std::fmt::Display for StubError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "StubError")
        }
    }

    impl Error for StubError {}

    #[derive(Debug)]
    struct StubSuccessAlgorithm {}

    impl FractalAlgorithm for StubSuccessAlgorithm {
        type Success = u64;
        type Failure = StubError;

        fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
            Ok((pixel.x + pixel.y) as u64)
        }
    }

    #[derive(Debug)]
    struct StubFailureAlgorithm {}

    impl FractalAlgorithm for StubFailureAlgorithm {
        type Success = u64;
        type Failure = StubError;

        fn compute(&self, _: Point) -> Result<Self::Success, Self::Failure> {
            Err(StubError {})
        }
    }

    struct CountingAlgorithm {
        calls: AtomicUsize,
    }

    impl FractalAlgorithm for CountingAlgorithm {
        type Success = u32;
        type Failure = StubError;

        fn compute(&self, _: Point) -> Result<Self::Success, Self::Failure> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(1)
        }
    }

    #[test]
    fn test_rayon_generates_same_results_as_sequential() {
        let algorithm = StubSuccessAlgorithm {};
        let pixel_rect = PixelRect::new(11, 9).unwrap();

        let sequential_results = generate_fractal_serial(pixel_rect, &algorithm).unwrap();
        let rayon_results = generate_fractal_parallel_rayon(pixel_rect, &algorithm).unwrap();

        assert_eq!(rayon_results, sequential_results);
    }

    #[test]
    fn test_rayon_propagates_algorithm_failure() {
        let algorithm = StubFailureAlgorithm {};
        let pixel_rect = PixelRect::new(4, 5).unwrap();

        let result = generate_fractal_parallel_rayon(pixel_rect, &algorithm);

        assert!(matches!(result, Err(GenerateFractalError::Algorithm(StubError {}))));
    }

    #[test]
    fn test_rayon_with_single_pixel() {
        let algorithm = StubSuccessAlgorithm {};
        let pixel_rect = PixelRect::new(1, 1).unwrap();

        let rayon_results = generate_fractal_parallel_rayon(pixel_rect, &algorithm).unwrap();

        assert_eq!(rayon_results, vec![0]);
    }

    #[test]
    fn test_rayon_with_large_rect() {
        let algorithm = StubSuccessAlgorithm {};
        let pixel_rect = PixelRect::new(101, 101).unwrap();

        let sequential_results = generate_fractal_serial(pixel_rect, &algorithm).unwrap();
        let rayon_results = generate_fractal_parallel_rayon(pixel_rect, &algorithm).unwrap();

        assert_eq!(rayon_results, sequential_results);
    }

    #[test]
    fn test_every_pixel_computed_exactly_once() {
        let algorithm = CountingAlgorithm {
            calls: AtomicUsize::new(0),
        };
        let pixel_rect = PixelRect::new(37, 23).unwrap();

        let results = generate_fractal_parallel_rayon(pixel_rect, &algorithm).unwrap();

        assert_eq!(algorithm.calls.load(Ordering::Relaxed), 37 * 23);
        assert!(results.iter().all(|&v| v == 1));
    }

    #[test]
    fn test_rayon_inside_fixed_size_pool() {
        let algorithm = StubSuccessAlgorithm {};
        let pixel_rect = PixelRect::new(20, 15).unwrap();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(3)
            .build()
            .unwrap();

        let pooled = pool
            .install(|| generate_fractal_parallel_rayon(pixel_rect, &algorithm))
            .unwrap();
        let sequential_results = generate_fractal_serial(pixel_rect, &algorithm).unwrap();

        assert_eq!(pooled, sequential_results);
    }

    #[test]
    fn test_rayon_reports_grid_too_large_to_allocate() {
        let algorithm = StubSuccessAlgorithm {};
        let pixel_rect = PixelRect::new(u32::MAX, u32::MAX).unwrap();

        let result = generate_fractal_parallel_rayon(pixel_rect, &algorithm);

        assert!(matches!(result, Err(GenerateFractalError::Allocation(_))));
    }

    #[test]
    fn test_generate_fractal_error_displays_algorithm_error() {
        let err: GenerateFractalError<StubError> = GenerateFractalError::Algorithm(StubError {});
        assert_eq!(format!("{}", err), "fractal algorithm error: StubError");
    }
}
