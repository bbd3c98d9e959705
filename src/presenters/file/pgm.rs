use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::iteration_grid::{IterationCount, IterationGrid};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Samples above this value switch the file to two bytes per pixel.
const ONE_BYTE_MAX: IterationCount = u8::MAX as IterationCount;

/// Writes iteration grids as binary PGM ("P5") files.
pub struct PgmFilePresenter {}

impl FilePresenterPort for PgmFilePresenter {
    fn present(
        &self,
        grid: &IterationGrid,
        comment: Option<&str>,
        filepath: impl AsRef<Path>,
    ) -> std::io::Result<()> {
        let file = File::create(filepath)?;
        let mut writer = BufWriter::new(file);

        encode_pgm(&mut writer, grid, comment)?;
        writer.flush()?;

        Ok(())
    }
}

impl Default for PgmFilePresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl PgmFilePresenter {
    pub fn new() -> Self {
        Self {}
    }
}

/// Encodes `grid` as a binary PGM image.
///
/// The header declares the true maximum sample, so the grid is scanned once
/// before anything is written. Grids whose maximum fits a byte are written
/// one byte per sample. Otherwise each sample takes two bytes, high byte
/// first, split as `value / 255` and `value & 255`. That split is not a
/// clean base-256 split, but existing readers of these files expect it.
pub fn encode_pgm<W: Write>(
    writer: &mut W,
    grid: &IterationGrid,
    comment: Option<&str>,
) -> std::io::Result<()> {
    let max_value = grid.max_value();

    writeln!(writer, "P5")?;
    if let Some(comment) = comment {
        writeln!(writer, "# {}", single_line(comment))?;
    }
    writeln!(writer, "{} {}", grid.width(), grid.height())?;
    writeln!(writer, "{}", max_value)?;

    let bytes_per_sample = if max_value <= ONE_BYTE_MAX { 1 } else { 2 };
    let mut row_bytes = Vec::with_capacity(grid.width() as usize * bytes_per_sample);

    for row in grid.counts().chunks(grid.width() as usize) {
        row_bytes.clear();

        if bytes_per_sample == 1 {
            row_bytes.extend(row.iter().map(|&value| value as u8));
        } else {
            for &value in row {
                row_bytes.push((value / ONE_BYTE_MAX) as u8);
                row_bytes.push((value & ONE_BYTE_MAX) as u8);
            }
        }

        writer.write_all(&row_bytes)?;
    }

    Ok(())
}

// a comment must stay on its own header line
fn single_line(comment: &str) -> String {
    comment.replace(['\r', '\n'], " ")
}
