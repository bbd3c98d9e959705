use std::path::Path;

use crate::core::data::iteration_grid::IterationGrid;

pub trait FilePresenterPort {
    fn present(
        &self,
        grid: &IterationGrid,
        comment: Option<&str>,
        filepath: impl AsRef<Path>,
    ) -> std::io::Result<()>;
}
