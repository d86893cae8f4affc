pub mod outline_marker;
