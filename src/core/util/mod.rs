pub mod format_general;
pub mod pixel_to_complex_coords;
