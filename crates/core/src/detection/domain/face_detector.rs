use crate::shared::bounding_box::BoundingBox;
use crate::shared::face::Embedding;
use crate::shared::photo::Photo;

/// One raw detector output, before it becomes a clustered face instance.
#[derive(Clone, Debug)]
pub struct Detection {
    pub bounding_box: BoundingBox,
    pub confidence: f32,
    /// `None` when the backend located a face but could not produce an
    /// embedding for it. Such detections are dropped (and counted) by the
    /// batch orchestrator rather than surfaced as errors.
    pub embedding: Option<Embedding>,
}

/// Domain interface for face detection and embedding extraction.
///
/// Implementations may be stateful (cached sessions, lazy model loads),
/// hence `&mut self`. Detections are returned in the backend's own order,
/// which the orchestrator preserves within each photo.
pub trait FaceDetector: Send {
    fn detect(&mut self, photo: &Photo) -> Result<Vec<Detection>, Box<dyn std::error::Error>>;
}
