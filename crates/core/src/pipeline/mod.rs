pub mod batch_mark_faces_use_case;
pub mod mark_faces_use_case;
pub mod pipeline_logger;
