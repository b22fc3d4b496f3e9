use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

use crate::clustering::domain::cluster_refiner::ClusterRefiner;
use crate::clustering::domain::face_cluster::FaceCluster;
use crate::clustering::domain::greedy_assigner::GreedyClusterAssigner;
use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::face::FaceInstance;
use crate::shared::photo::Photo;

/// Fraction of the progress bar spent on detection; the clustering pass
/// that follows is effectively instantaneous by comparison.
pub const DETECTION_PROGRESS_SHARE: f64 = 0.8;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("batch run cancelled")]
    Cancelled,
    #[error("batch already executed")]
    AlreadyExecuted,
}

/// Result of a completed batch run.
#[derive(Debug)]
pub struct BatchOutcome {
    pub clusters: Vec<FaceCluster>,
    /// Detections discarded because the backend produced no embedding for
    /// them. Diagnostic only; a dropped detection never fails the batch.
    pub dropped_detections: usize,
}

/// Orchestrates one full batch: detect faces photo-by-photo, then assign
/// and refine clusters over the accumulated instances.
///
/// Detection runs strictly sequentially in input photo order: the greedy
/// assigner is order-sensitive, so the instance list must reach it in a
/// deterministic order. Cancellation is checked between photos only; an
/// uncancelled run therefore keeps the full ordering contract.
///
/// This is a single-use struct: `execute` consumes the owned detector, so
/// calling it twice fails.
pub struct ClusterPhotosUseCase {
    detector: Option<Box<dyn FaceDetector>>,
    assigner: GreedyClusterAssigner,
    refiner: ClusterRefiner,
    on_progress: Option<Box<dyn Fn(f64) + Send>>,
    cancelled: Arc<AtomicBool>,
}

impl ClusterPhotosUseCase {
    pub fn new(
        detector: Box<dyn FaceDetector>,
        assigner: GreedyClusterAssigner,
        refiner: ClusterRefiner,
        on_progress: Option<Box<dyn Fn(f64) + Send>>,
        cancelled: Option<Arc<AtomicBool>>,
    ) -> Self {
        Self {
            detector: Some(detector),
            assigner,
            refiner,
            on_progress,
            cancelled: cancelled.unwrap_or_else(|| Arc::new(AtomicBool::new(false))),
        }
    }

    pub fn execute(&mut self, photos: &[Photo]) -> Result<BatchOutcome, BatchError> {
        let mut detector = self.detector.take().ok_or(BatchError::AlreadyExecuted)?;

        let total = photos.len();
        let mut faces: Vec<FaceInstance> = Vec::new();
        let mut dropped = 0usize;

        for (index, photo) in photos.iter().enumerate() {
            if self.cancelled.load(Ordering::Relaxed) {
                return Err(BatchError::Cancelled);
            }

            match detector.detect(photo) {
                Ok(detections) => {
                    for detection in detections {
                        match detection.embedding {
                            Some(embedding) if !embedding.is_empty() => {
                                faces.push(FaceInstance::new(
                                    photo.id.clone(),
                                    detection.bounding_box,
                                    embedding,
                                    detection.confidence,
                                ));
                            }
                            // Best-effort policy: a face without an
                            // embedding is dropped, not an error.
                            _ => dropped += 1,
                        }
                    }
                }
                Err(e) => {
                    log::warn!("face detection failed for photo {}: {e}", photo.id);
                }
            }

            self.report((index + 1) as f64 / total as f64 * DETECTION_PROGRESS_SHARE);
        }

        log::debug!(
            "detected {} faces across {} photos ({} dropped)",
            faces.len(),
            total,
            dropped
        );

        let clusters = self.refiner.refine(self.assigner.assign(faces), photos);

        Ok(BatchOutcome {
            clusters,
            dropped_detections: dropped,
        })
    }

    fn report(&self, fraction: f64) {
        if let Some(ref callback) = self.on_progress {
            callback(fraction);
        }
    }
}
