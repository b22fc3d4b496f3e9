use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crate::clustering::domain::cluster_refiner::ClusterRefiner;
use crate::clustering::domain::greedy_assigner::GreedyClusterAssigner;
use crate::detection::domain::face_detector::FaceDetector;
use crate::pipeline::cluster_photos_use_case::{BatchOutcome, ClusterPhotosUseCase};
use crate::shared::photo::Photo;

/// Events a batch worker publishes to the consuming side, in order.
///
/// A run emits zero or more `Progress` events followed by exactly one
/// terminal event (`Finished` or `Cancelled`). The channel is single
/// producer, so receipt order matches send order: progress is
/// monotonically non-decreasing and the terminal event happens-after
/// every progress update.
#[derive(Debug)]
pub enum BatchEvent {
    Progress(f64),
    Finished(BatchOutcome),
    Cancelled,
}

/// Consuming-side handle to one in-flight batch run.
pub struct BatchHandle {
    events: crossbeam_channel::Receiver<BatchEvent>,
    cancelled: Arc<AtomicBool>,
    worker: Option<thread::JoinHandle<()>>,
}

impl BatchHandle {
    /// Next pending event, without blocking.
    pub fn try_next_event(&self) -> Option<BatchEvent> {
        self.events.try_recv().ok()
    }

    /// Next event, blocking until the worker sends one. Returns `None`
    /// once the worker has exited and the channel is drained.
    pub fn next_event(&self) -> Option<BatchEvent> {
        self.events.recv().ok()
    }

    /// Requests cancellation. The worker notices between photos and ends
    /// the run with `BatchEvent::Cancelled` instead of a publication.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Waits for the worker thread to exit. Pending events stay readable.
    pub fn join(&mut self) {
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("batch worker thread panicked");
            }
        }
    }
}

/// Runs batches on a dedicated worker thread.
///
/// The caller's thread is never blocked: the worker owns the detector and
/// photo list by value and reports through the event channel. Detection
/// stays sequential inside the worker, preserving the deterministic input
/// order the greedy assigner requires.
pub struct BackgroundBatchRunner;

impl BackgroundBatchRunner {
    pub fn spawn(
        detector: Box<dyn FaceDetector>,
        photos: Vec<Photo>,
        assigner: GreedyClusterAssigner,
        refiner: ClusterRefiner,
    ) -> BatchHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let (event_tx, event_rx) = crossbeam_channel::unbounded::<BatchEvent>();

        let progress_tx = event_tx.clone();
        let on_progress: Box<dyn Fn(f64) + Send> = Box::new(move |fraction| {
            let _ = progress_tx.send(BatchEvent::Progress(fraction));
        });

        let mut use_case = ClusterPhotosUseCase::new(
            detector,
            assigner,
            refiner,
            Some(on_progress),
            Some(cancelled.clone()),
        );

        let worker = thread::spawn(move || match use_case.execute(&photos) {
            Ok(outcome) => {
                let _ = event_tx.send(BatchEvent::Finished(outcome));
            }
            Err(e) => {
                log::info!("batch run ended without publishing: {e}");
                let _ = event_tx.send(BatchEvent::Cancelled);
            }
        });

        BatchHandle {
            events: event_rx,
            cancelled,
            worker: Some(worker),
        }
    }
}
