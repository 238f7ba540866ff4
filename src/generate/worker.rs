use crate::foundation::error::{CametraxError, CametraxResult};
use crate::foundation::ids::TicketId;
use crate::generate::service::GenerationService;
use crate::session::studio::PendingGeneration;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, mpsc};
use std::thread::JoinHandle;

/// A finished request, ready for [`crate::Studio::complete_generation`].
#[derive(Debug)]
pub struct Completion {
    /// The request as it was submitted.
    pub pending: PendingGeneration,
    /// Encoded image bytes or the service failure.
    pub result: CametraxResult<Vec<u8>>,
}

/// Handle to a request running on a worker thread.
///
/// The handle yields exactly one [`Completion`]; the receiver is dropped once it is delivered.
pub struct InFlight {
    pending: PendingGeneration,
    rx: Option<mpsc::Receiver<Completion>>,
    handle: Option<JoinHandle<()>>,
}

impl InFlight {
    /// Ticket of the running request.
    pub fn ticket(&self) -> TicketId {
        self.pending.ticket()
    }

    /// `true` once the completion has been handed out by [`InFlight::poll`].
    pub fn is_delivered(&self) -> bool {
        self.rx.is_none()
    }

    /// Non-blocking check for completion. Returns `None` after the completion was delivered.
    pub fn poll(&mut self) -> Option<Completion> {
        let done = match self.rx.as_ref()?.try_recv() {
            Ok(done) => done,
            Err(mpsc::TryRecvError::Empty) => return None,
            Err(mpsc::TryRecvError::Disconnected) => self.lost(),
        };
        self.rx = None;
        self.join();
        Some(done)
    }

    /// Block until the request completes.
    ///
    /// Returns `None` when [`InFlight::poll`] already delivered the completion.
    pub fn wait(mut self) -> Option<Completion> {
        let rx = self.rx.take()?;
        let done = match rx.recv() {
            Ok(done) => done,
            Err(_) => self.lost(),
        };
        self.join();
        Some(done)
    }

    fn lost(&self) -> Completion {
        Completion {
            pending: self.pending.clone(),
            result: Err(CametraxError::generation_failed(
                "generation worker exited without a result",
            )),
        }
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            tracing::error!(ticket = %self.pending.ticket(), "generation worker panicked");
        }
    }
}

/// Run `service` for `pending` on a dedicated thread.
///
/// A panicking service is reported as a generation failure.
pub fn spawn_generation(
    service: Arc<dyn GenerationService>,
    pending: PendingGeneration,
) -> CametraxResult<InFlight> {
    let (tx, rx) = mpsc::sync_channel(1);
    let job = pending.clone();
    let handle = std::thread::Builder::new()
        .name(format!("cametrax-gen-{}", pending.ticket()))
        .spawn(move || {
            let result = catch_unwind(AssertUnwindSafe(|| service.generate(job.request())))
                .unwrap_or_else(|_| {
                    Err(CametraxError::generation_failed("generation service panicked"))
                });
            let _ = tx.send(Completion {
                pending: job,
                result,
            });
        })
        .map_err(|e| CametraxError::Other(anyhow::anyhow!("spawn generation worker: {e}")))?;

    Ok(InFlight {
        pending,
        rx: Some(rx),
        handle: Some(handle),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/generate/worker.rs"]
mod tests;
