pub mod complex;
pub mod complex_rect;
pub mod iteration_grid;
pub mod pixel_rect;
pub mod point;
pub mod render_params;
