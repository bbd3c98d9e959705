use std::collections::TryReserveError;

/// Allocates a zeroed buffer of `len` cells, reporting failure instead of
/// aborting the process.
pub fn allocate_buffer<T: Copy + Default>(len: usize) -> Result<Vec<T>, TryReserveError> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(len)?;
    buffer.resize(len, T::default());

    Ok(buffer)
}
