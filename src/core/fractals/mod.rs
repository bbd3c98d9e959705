pub mod thorn;
