//! Tracking of the in-flight wisdom request.
//!
//! At most one wisdom request is outstanding at a time. Each request is
//! keyed by a monotonically increasing generation; a new request or a clear
//! aborts the previous task and bumps the generation, and a response whose
//! generation is no longer current is dropped by the caller instead of
//! overwriting a display it no longer belongs to.

use std::future::Future;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// A resolved wisdom request, tagged with the generation that started it.
#[derive(Debug)]
pub struct WisdomMessage {
    pub generation: u64,
    pub text: String,
}

/// Handle for the at-most-one outstanding wisdom request.
#[derive(Default)]
pub struct WisdomTask {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl WisdomTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supersede any outstanding request and spawn a new one.
    ///
    /// The fetched text is delivered on `tx` tagged with the new request's
    /// generation. Returns that generation.
    pub fn spawn<F>(&mut self, tx: UnboundedSender<WisdomMessage>, fetch: F) -> u64
    where
        F: Future<Output = String> + Send + 'static,
    {
        self.cancel();
        let generation = self.generation;
        self.handle = Some(tokio::spawn(async move {
            let text = fetch.await;
            // The receiver may already be gone on shutdown.
            let _ = tx.send(WisdomMessage { generation, text });
        }));
        generation
    }

    /// Abort the outstanding request, if any, and invalidate its responses.
    pub fn cancel(&mut self) {
        self.generation += 1;
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Whether a resolved message belongs to the current request.
    pub fn accepts(&self, message: &WisdomMessage) -> bool {
        self.handle.is_some() && message.generation == self.generation
    }
}
