use crate::core::data::pixel_rect::PixelRect;
use std::error::Error;
use std::fmt;

/// Iterations taken by a single pixel before escaping or hitting the cap.
pub type IterationCount = u16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IterationGridError {
    BoundsMismatch {
        pixel_rect_size: usize,
        buffer_size: usize,
    },
}

impl fmt::Display for IterationGridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundsMismatch {
                pixel_rect_size,
                buffer_size,
            } => {
                write!(
                    f,
                    "pixel rect size {} does not match buffer size {}",
                    pixel_rect_size, buffer_size
                )
            }
        }
    }
}

impl Error for IterationGridError {}

/// Dense row-major buffer of iteration counts, one per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationGrid {
    pixel_rect: PixelRect,
    counts: Vec<IterationCount>,
}

impl IterationGrid {
    pub fn from_data(
        pixel_rect: PixelRect,
        counts: Vec<IterationCount>,
    ) -> Result<Self, IterationGridError> {
        if pixel_rect.size() != counts.len() {
            return Err(IterationGridError::BoundsMismatch {
                pixel_rect_size: pixel_rect.size(),
                buffer_size: counts.len(),
            });
        }

        Ok(Self { pixel_rect, counts })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixel_rect.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixel_rect.height()
    }

    #[must_use]
    pub fn counts(&self) -> &[IterationCount] {
        &self.counts
    }

    /// Largest count in the grid. A grid always has at least one pixel.
    #[must_use]
    pub fn max_value(&self) -> IterationCount {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}
