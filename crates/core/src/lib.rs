//! Greedy face clustering for photo libraries.
//!
//! Consumes detections from an external [`detection::domain::face_detector::FaceDetector`]
//! and groups them into named people clusters. Detection backends, photo
//! storage, and rendering live outside this crate.

pub mod clustering;
pub mod detection;
pub mod pipeline;
pub mod shared;
