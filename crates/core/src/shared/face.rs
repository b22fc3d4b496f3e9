use uuid::Uuid;

use crate::shared::bounding_box::BoundingBox;

/// Fixed-length feature vector summarizing a face's visual identity.
///
/// The length is set by the detection backend and must be identical across
/// every instance compared within one run.
pub type Embedding = Vec<f32>;

/// One detected face, pinned to its source photo.
///
/// Immutable after creation. Owned by exactly one cluster at a time;
/// ownership transfers wholesale when clusters merge.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceInstance {
    pub id: Uuid,
    pub photo_id: String,
    pub bounding_box: BoundingBox,
    pub embedding: Embedding,
    pub confidence: f32,
}

impl FaceInstance {
    pub fn new(
        photo_id: impl Into<String>,
        bounding_box: BoundingBox,
        embedding: Embedding,
        confidence: f32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            photo_id: photo_id.into(),
            bounding_box,
            embedding,
            confidence,
        }
    }
}
