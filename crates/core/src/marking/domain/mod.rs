pub mod frame_marker;
