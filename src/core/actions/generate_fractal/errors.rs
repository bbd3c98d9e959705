use std::collections::TryReserveError;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum GenerateFractalError<AlgFailure: Error> {
    /// The output buffer could not be allocated. Nothing was computed.
    Allocation(TryReserveError),
    Algorithm(AlgFailure),
}

impl<AlgFailure: Error> fmt::Display for GenerateFractalError<AlgFailure> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocation(err) => write!(f, "could not allocate iteration grid: {}", err),
            Self::Algorithm(err) => write!(f, "fractal algorithm error: {}", err),
        }
    }
}

impl<AlgFailure: Error + 'static> Error for GenerateFractalError<AlgFailure> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Allocation(err) => Some(err),
            Self::Algorithm(err) => Some(err),
        }
    }
}

impl<AlgFailure: Error> From<TryReserveError> for GenerateFractalError<AlgFailure> {
    fn from(err: TryReserveError) -> Self {
        Self::Allocation(err)
    }
}
