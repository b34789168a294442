//! The sequential FIFO worker (§5).
//!
//! A run is a single logical task handled on a background thread,
//! independent of whatever drives the host's UI. Requests are processed
//! strictly in the order they're submitted; there is no preemption and
//! no mid-run cancellation. A failed run reports the task's own last-good
//! raster (its input) rather than a partial result, per §7's propagation
//! rule.

use crate::render::render;
use litho_core::{RenderRequest, RenderResponse};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

/// Returned by [`Worker::submit`] if the worker thread has already shut
/// down (its receiving half was dropped).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerClosed;

impl std::fmt::Display for WorkerClosed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "render worker has shut down")
    }
}

impl std::error::Error for WorkerClosed {}

/// A single background thread that runs [`render`] on each request in
/// the order it was submitted.
pub struct Worker {
    // `Option` so `Drop` can close the channel before joining: the
    // thread's `recv()` only returns `Err` (and the loop exits) once
    // every sender is gone, and fields aren't dropped until after
    // `Drop::drop` returns.
    requests: Option<Sender<RenderRequest>>,
    responses: Receiver<RenderResponse>,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    /// Spawns the worker thread.
    pub fn spawn() -> Self {
        let (req_tx, req_rx) = mpsc::channel::<RenderRequest>();
        let (resp_tx, resp_rx) = mpsc::channel::<RenderResponse>();

        let handle = thread::spawn(move || {
            while let Ok(request) = req_rx.recv() {
                let result = render(&request.source, &request.active, &request.params, &request.options)
                    .unwrap_or_else(|err| {
                        tracing::debug!(task = request.task_id.as_str(), %err, "run aborted, returning source unchanged");
                        request.source.clone()
                    });
                if resp_tx.send(RenderResponse { task_id: request.task_id, result }).is_err() {
                    break;
                }
            }
        });

        Self { requests: Some(req_tx), responses: resp_rx, handle: Some(handle) }
    }

    /// Queues a request. FIFO with respect to every prior `submit` call.
    pub fn submit(&self, request: RenderRequest) -> Result<(), WorkerClosed> {
        self.requests.as_ref().expect("sender held until drop").send(request).map_err(|_| WorkerClosed)
    }

    /// Blocks for the next response, in submission order.
    pub fn recv(&self) -> Option<RenderResponse> {
        self.responses.recv().ok()
    }

    /// Non-blocking poll for the next response.
    pub fn try_recv(&self) -> Option<RenderResponse> {
        self.responses.try_recv().ok()
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        // Drop the sender first so the thread's `recv()` wakes with
        // `Err` and the loop exits; only then is it safe to join.
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
