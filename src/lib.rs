//! Renders the Thorn escape-time fractal into a grid of iteration counts and
//! writes it out as a binary PGM image.

mod controllers;
mod core;
mod input;
mod presenters;

pub use crate::controllers::ports::file_presenter::FilePresenterPort;
pub use crate::controllers::thorn::{ThornController, ThornControllerError};
pub use crate::core::actions::generate_fractal::errors::GenerateFractalError;
pub use crate::core::actions::generate_fractal::generate_fractal_parallel_rayon::generate_fractal_parallel_rayon;
pub use crate::core::actions::generate_fractal::generate_fractal_serial::generate_fractal_serial;
pub use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
pub use crate::core::data::complex::Complex;
pub use crate::core::data::complex_rect::{ComplexRect, ComplexRectError};
pub use crate::core::data::iteration_grid::{IterationCount, IterationGrid, IterationGridError};
pub use crate::core::data::pixel_rect::{PixelRect, PixelRectError};
pub use crate::core::data::point::Point;
pub use crate::core::data::render_params::{MAX_ITERATIONS_LIMIT, RenderParams, RenderParamsError};
pub use crate::core::fractals::thorn::algorithm::ThornAlgorithm;
pub use crate::core::util::pixel_to_complex_coords::PixelToComplexCoordsError;
pub use crate::input::cli::args::{Args, parse_plane_bound};
pub use crate::presenters::file::pgm::{PgmFilePresenter, encode_pgm};
