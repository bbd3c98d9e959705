pub mod ports;
pub mod thorn;
