use thiserror::Error;
use uuid::Uuid;

use crate::clustering::domain::cluster_refiner::{ClusterRefiner, MIN_CLUSTER_SIZE};
use crate::clustering::domain::cluster_store::ClusterStore;
use crate::clustering::domain::face_cluster::FaceCluster;
use crate::clustering::domain::greedy_assigner::{
    GreedyClusterAssigner, DEFAULT_SIMILARITY_THRESHOLD,
};
use crate::detection::domain::face_detector::FaceDetector;
use crate::pipeline::infrastructure::background_batch_runner::{
    BackgroundBatchRunner, BatchEvent, BatchHandle,
};
use crate::shared::photo::Photo;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("a batch run is already in flight")]
    BatchInFlight,
}

/// Published-state facade over the clustering pipeline.
///
/// Owns the cluster store, the in-flight batch handle, and the snapshot
/// values a reactive consumer reads: the cluster list, a processing flag,
/// and a progress fraction in `[0, 1]`. The worker communicates through
/// the batch event channel only; `poll` (or `wait`) folds pending events
/// into the snapshot on the consuming side, so there is no shared mutable
/// state to lock.
///
/// Readers always see either the previous completed run's clusters or an
/// empty set, never a partial result. Mutators are rejected while a run
/// is in flight; the worker is the only writer until its terminal event
/// has been consumed.
pub struct ClusterEngine {
    store: ClusterStore,
    batch: Option<BatchHandle>,
    progress: f64,
    dropped_detections: usize,
    threshold: f32,
    min_cluster_size: usize,
}

impl ClusterEngine {
    pub fn new() -> Self {
        Self::with_settings(DEFAULT_SIMILARITY_THRESHOLD, MIN_CLUSTER_SIZE)
    }

    /// Engine with a host-tuned similarity threshold and noise floor.
    /// Changing either value affects future runs only; the published set
    /// is never re-clustered.
    pub fn with_settings(threshold: f32, min_cluster_size: usize) -> Self {
        Self {
            store: ClusterStore::new(),
            batch: None,
            progress: 0.0,
            dropped_detections: 0,
            threshold,
            min_cluster_size,
        }
    }

    /// Starts a background batch over `photos`.
    ///
    /// An empty batch is a successful no-op: the engine stays idle and
    /// publishes nothing. Starting while a run is in flight is rejected.
    pub fn start(
        &mut self,
        detector: Box<dyn FaceDetector>,
        photos: Vec<Photo>,
    ) -> Result<(), EngineError> {
        self.poll();
        if self.batch.is_some() {
            return Err(EngineError::BatchInFlight);
        }
        if photos.is_empty() {
            return Ok(());
        }

        log::info!("starting face clustering batch over {} photos", photos.len());
        self.progress = 0.0;
        self.batch = Some(BackgroundBatchRunner::spawn(
            detector,
            photos,
            GreedyClusterAssigner::new(self.threshold),
            ClusterRefiner::new(self.min_cluster_size),
        ));
        Ok(())
    }

    /// Folds all pending worker events into the snapshot, returning to
    /// idle if the run has ended. Cheap; intended to be called from a UI
    /// tick or before reads.
    pub fn poll(&mut self) {
        while let Some(event) = self.batch.as_ref().and_then(BatchHandle::try_next_event) {
            self.apply(event);
        }
    }

    /// Blocks until the in-flight run ends (if any), applying events in
    /// order along the way.
    pub fn wait(&mut self) {
        loop {
            let Some(handle) = self.batch.as_ref() else {
                return;
            };
            match handle.next_event() {
                Some(event) => self.apply(event),
                // Worker gone without a terminal event; drop the handle.
                None => self.finish_run(),
            }
        }
    }

    /// Requests cancellation of the in-flight run, if any. The previous
    /// published cluster set stays intact.
    pub fn cancel(&mut self) {
        if let Some(handle) = &self.batch {
            handle.cancel();
        }
    }

    pub fn is_processing(&self) -> bool {
        self.batch.is_some()
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn clusters(&self) -> &[FaceCluster] {
        self.store.clusters()
    }

    /// Detections dropped by the last completed run (no embedding).
    pub fn dropped_detections(&self) -> usize {
        self.dropped_detections
    }

    /// Renames a published cluster. Unknown ids are a no-op; a run in
    /// flight is an error, since the worker owns the collection until it
    /// publishes.
    pub fn rename_cluster(&mut self, cluster_id: Uuid, new_name: &str) -> Result<(), EngineError> {
        self.ensure_idle()?;
        self.store.rename(cluster_id, new_name);
        Ok(())
    }

    /// Merges `source_id` into `target_id`. Same no-op and in-flight
    /// semantics as `rename_cluster`; the target's representative photo
    /// is left stale by contract.
    pub fn merge_clusters(&mut self, source_id: Uuid, target_id: Uuid) -> Result<(), EngineError> {
        self.ensure_idle()?;
        self.store.merge(source_id, target_id);
        Ok(())
    }

    /// Photos containing members of the given cluster, in `all_photos`
    /// order, deduplicated.
    pub fn photos_for_cluster(&self, cluster_id: Uuid, all_photos: &[Photo]) -> Vec<Photo> {
        self.store.photos_for(cluster_id, all_photos)
    }

    fn ensure_idle(&mut self) -> Result<(), EngineError> {
        self.poll();
        if self.batch.is_some() {
            return Err(EngineError::BatchInFlight);
        }
        Ok(())
    }

    fn apply(&mut self, event: BatchEvent) {
        match event {
            BatchEvent::Progress(fraction) => self.progress = fraction,
            BatchEvent::Finished(outcome) => {
                log::info!(
                    "batch finished: {} clusters published ({} detections dropped)",
                    outcome.clusters.len(),
                    outcome.dropped_detections
                );
                self.store.replace(outcome.clusters);
                self.dropped_detections = outcome.dropped_detections;
                self.progress = 1.0;
                self.finish_run();
            }
            BatchEvent::Cancelled => {
                log::info!("batch cancelled; keeping previously published clusters");
                self.finish_run();
            }
        }
    }

    fn finish_run(&mut self) {
        if let Some(mut handle) = self.batch.take() {
            handle.join();
        }
    }
}

impl Default for ClusterEngine {
    fn default() -> Self {
        Self::new()
    }
}
