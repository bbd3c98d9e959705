use std::error::Error;
use std::fmt;
use std::path::Path;
use std::time::Instant;

use log::{debug, info};
use rayon::{ThreadPoolBuildError, ThreadPoolBuilder};

use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::actions::generate_fractal::errors::GenerateFractalError;
use crate::core::actions::generate_fractal::generate_fractal_parallel_rayon::generate_fractal_parallel_rayon;
use crate::core::data::iteration_grid::{IterationGrid, IterationGridError};
use crate::core::data::render_params::RenderParams;
use crate::core::fractals::thorn::algorithm::ThornAlgorithm;
use crate::core::util::pixel_to_complex_coords::PixelToComplexCoordsError;

#[derive(Debug)]
pub enum ThornControllerError {
    ThreadPool(ThreadPoolBuildError),
    Generate(GenerateFractalError<PixelToComplexCoordsError>),
    Grid(IterationGridError),
    Io(std::io::Error),
    NothingToWrite,
}

impl fmt::Display for ThornControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThreadPool(err) => write!(f, "could not start worker threads: {}", err),
            Self::Generate(err) => write!(f, "{}", err),
            Self::Grid(err) => write!(f, "generated grid is malformed: {}", err),
            Self::Io(err) => write!(f, "could not write image: {}", err),
            Self::NothingToWrite => write!(f, "no fractal has been generated"),
        }
    }
}

impl Error for ThornControllerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ThreadPool(err) => Some(err),
            Self::Generate(err) => Some(err),
            Self::Grid(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::NothingToWrite => None,
        }
    }
}

impl From<ThreadPoolBuildError> for ThornControllerError {
    fn from(err: ThreadPoolBuildError) -> Self {
        Self::ThreadPool(err)
    }
}

impl From<GenerateFractalError<PixelToComplexCoordsError>> for ThornControllerError {
    fn from(err: GenerateFractalError<PixelToComplexCoordsError>) -> Self {
        Self::Generate(err)
    }
}

impl From<IterationGridError> for ThornControllerError {
    fn from(err: IterationGridError) -> Self {
        Self::Grid(err)
    }
}

impl From<std::io::Error> for ThornControllerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Runs the render pipeline: evaluate the grid, then hand it to the
/// presenter. The grid lives only between [`generate`](Self::generate) and
/// [`write`](Self::write).
pub struct ThornController<P: FilePresenterPort> {
    presenter: P,
    threads: Option<usize>,
    grid: Option<IterationGrid>,
    comment: Option<String>,
}

impl<P: FilePresenterPort> ThornController<P> {
    pub fn new(presenter: P) -> Self {
        Self {
            presenter,
            threads: None,
            grid: None,
            comment: None,
        }
    }

    /// Evaluates on a dedicated pool of `threads` workers instead of rayon's
    /// global pool.
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn generate(&mut self, params: &RenderParams) -> Result<(), ThornControllerError> {
        let pixel_rect = params.pixel_rect();
        let window = params.complex_rect();

        info!(
            "Rendering Thorn fractal {}x{}",
            pixel_rect.width(),
            pixel_rect.height()
        );
        debug!(
            "c = ({}, {}), max iterations = {}, escape = {}",
            params.c().real,
            params.c().imag,
            params.max_iterations(),
            params.escape_radius_squared()
        );
        debug!(
            "window = [{}, {}) x [{}, {})",
            window.top_left().real,
            window.bottom_right().real,
            window.top_left().imag,
            window.bottom_right().imag
        );

        // drop any previous grid before allocating the next one
        self.grid = None;

        let algorithm = ThornAlgorithm::new(params);
        let start = Instant::now();
        let counts = match self.threads {
            Some(threads) => {
                let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;
                debug!("Using a pool of {} threads", pool.current_num_threads());
                pool.install(|| generate_fractal_parallel_rayon(pixel_rect, &algorithm))?
            }
            None => {
                debug!("Using {} rayon threads", rayon::current_num_threads());
                generate_fractal_parallel_rayon(pixel_rect, &algorithm)?
            }
        };
        info!("Generated in {:?}", start.elapsed());

        self.grid = Some(IterationGrid::from_data(pixel_rect, counts)?);
        self.comment = Some(params.comment());

        Ok(())
    }

    /// Writes the generated grid and releases it, whether or not the write
    /// succeeds.
    pub fn write(&mut self, filepath: impl AsRef<Path>) -> Result<(), ThornControllerError> {
        let grid = self.grid.take().ok_or(ThornControllerError::NothingToWrite)?;
        let comment = self.comment.take();
        let filepath = filepath.as_ref();

        self.presenter.present(&grid, comment.as_deref(), filepath)?;
        info!("Saved to {}", filepath.display());

        Ok(())
    }

    pub fn render(
        &mut self,
        params: &RenderParams,
        filepath: impl AsRef<Path>,
    ) -> Result<(), ThornControllerError> {
        self.generate(params)?;
        self.write(filepath)
    }

    #[must_use]
    pub fn grid(&self) -> Option<&IterationGrid> {
        self.grid.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::iteration_grid::IterationCount;
    use crate::core::data::pixel_rect::PixelRect;
    use crate::presenters::file::pgm::PgmFilePresenter;
    use std::cell::RefCell;
    use std::f64::consts::PI;

    #[derive(Default)]
    struct RecordingPresenter {
        presented: RefCell<Vec<(Vec<IterationCount>, Option<String>)>>,
    }

    impl FilePresenterPort for &RecordingPresenter {
        fn present(
            &self,
            grid: &IterationGrid,
            comment: Option<&str>,
            _filepath: impl AsRef<Path>,
        ) -> std::io::Result<()> {
            self.presented
                .borrow_mut()
                .push((grid.counts().to_vec(), comment.map(str::to_string)));
            Ok(())
        }
    }

    fn classic_params() -> RenderParams {
        RenderParams::from_bounds(2, 2, (-PI, PI), (-PI, PI), (9.984, 7.55), 255, 1e4).unwrap()
    }

    #[test]
    fn test_generate_then_write_hands_grid_to_presenter() {
        let presenter = RecordingPresenter::default();
        let mut controller = ThornController::new(&presenter);

        controller.generate(&classic_params()).unwrap();
        controller.write("unused.pgm").unwrap();

        let presented = presenter.presented.borrow();
        assert_eq!(presented.len(), 1);
        assert_eq!(presented[0].0, vec![1, 1, 5, 1]);
        assert_eq!(
            presented[0].1.as_deref(),
            Some("Thorn fractal: cx=9.984, cy=7.55")
        );
    }

    #[test]
    fn test_write_releases_grid() {
        let presenter = RecordingPresenter::default();
        let mut controller = ThornController::new(&presenter);

        controller.generate(&classic_params()).unwrap();
        assert!(controller.grid().is_some());

        controller.write("unused.pgm").unwrap();
        assert!(controller.grid().is_none());
        assert!(matches!(
            controller.write("unused.pgm"),
            Err(ThornControllerError::NothingToWrite)
        ));
    }

    #[test]
    fn test_dedicated_pool_matches_global_pool() {
        let params =
            RenderParams::from_bounds(32, 24, (-PI, PI), (-PI, PI), (9.984, 7.55), 1024, 1e4)
                .unwrap();
        let presenter = RecordingPresenter::default();

        let mut global = ThornController::new(&presenter);
        global.generate(&params).unwrap();
        let mut pooled = ThornController::new(&presenter).with_threads(2);
        pooled.generate(&params).unwrap();

        assert_eq!(global.grid(), pooled.grid());
    }

    #[test]
    fn test_render_writes_pgm_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("thorn.pgm");
        let mut controller = ThornController::new(PgmFilePresenter::new());

        controller.render(&classic_params(), &path).unwrap();

        let mut expected = b"P5\n# Thorn fractal: cx=9.984, cy=7.55\n2 2\n5\n".to_vec();
        expected.extend([1, 1, 5, 1]);
        assert_eq!(std::fs::read(&path).unwrap(), expected);
    }

    #[test]
    fn test_render_switches_to_two_byte_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep.pgm");
        let params =
            RenderParams::from_bounds(3, 2, (-1.0, 1.0), (-1.0, 1.0), (0.0, 0.0), 300, 1e4)
                .unwrap();
        let mut controller = ThornController::new(PgmFilePresenter::new());

        controller.render(&params, &path).unwrap();

        let mut expected = b"P5\n# Thorn fractal: cx=0, cy=0\n3 2\n301\n".to_vec();
        expected.extend([0, 6, 0, 8, 0, 8, 1, 45, 1, 45, 1, 45]);
        assert_eq!(std::fs::read(&path).unwrap(), expected);
    }

    #[test]
    fn test_render_reports_unopenable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("thorn.pgm");
        let mut controller = ThornController::new(PgmFilePresenter::new());

        let result = controller.render(&classic_params(), &path);

        assert!(matches!(result, Err(ThornControllerError::Io(_))));
        assert!(controller.grid().is_none());
    }

    #[test]
    fn test_oversized_image_reports_allocation_failure() {
        let params = RenderParams::from_bounds(
            u32::MAX,
            u32::MAX,
            (-PI, PI),
            (-PI, PI),
            (9.984, 7.55),
            1024,
            1e4,
        )
        .unwrap();
        let presenter = RecordingPresenter::default();
        let mut controller = ThornController::new(&presenter);

        let result = controller.generate(&params);

        assert!(matches!(
            result,
            Err(ThornControllerError::Generate(GenerateFractalError::Allocation(_)))
        ));
        assert!(controller.grid().is_none());
    }

    #[test]
    fn test_grid_error_is_reported() {
        let pixel_rect = PixelRect::new(2, 2).unwrap();
        let err: ThornControllerError = IterationGrid::from_data(pixel_rect, vec![1, 2, 3])
            .unwrap_err()
            .into();

        assert!(matches!(err, ThornControllerError::Grid(_)));
        assert!(err.source().is_some());
        assert_eq!(
            format!("{}", err),
            "generated grid is malformed: pixel rect size 4 does not match buffer size 3"
        );
    }

    #[test]
    fn test_zero_threads_uses_rayon_default() {
        // rayon treats 0 as "pick automatically"
        let presenter = RecordingPresenter::default();
        let mut controller = ThornController::new(&presenter).with_threads(0);

        assert!(controller.generate(&classic_params()).is_ok());
    }
}
