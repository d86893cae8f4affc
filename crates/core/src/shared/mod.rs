pub mod block;
pub mod bounding_box;
pub mod color;
pub mod constants;
pub mod frame;
