pub mod block_graph;
pub mod box_matcher;
pub mod color_classifier;
pub mod detector_config;
pub mod face_detector;
