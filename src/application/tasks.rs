//! Background job queue feeding results back to the UI thread.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

/// Runs jobs off the UI thread and collects their results.
///
/// Jobs run to completion; there is no cancellation. Results are picked up
/// by [`Tasks::drain`] on the owning thread, so the state they update is
/// only ever mutated from one place.
pub struct Tasks<T> {
    tx: Sender<T>,
    rx: Receiver<T>,
    inline: bool,
}

impl<T: Send + 'static> Tasks<T> {
    /// Jobs run on detached worker threads.
    pub fn threaded() -> Self {
        Self::with_mode(false)
    }

    /// Jobs run immediately on the calling thread. Results still wait for
    /// the next [`Tasks::drain`].
    pub fn inline() -> Self {
        Self::with_mode(true)
    }

    fn with_mode(inline: bool) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx, inline }
    }

    pub fn spawn<F>(&self, job: F)
    where
        F: FnOnce() -> T + Send + 'static,
    {
        if self.inline {
            let _ = self.tx.send(job());
            return;
        }
        let tx = self.tx.clone();
        thread::spawn(move || {
            // The receiver is gone once the app shuts down; nothing to do then.
            let _ = tx.send(job());
        });
    }

    /// Results that have arrived since the last call, in arrival order.
    pub fn drain(&self) -> Vec<T> {
        self.rx.try_iter().collect()
    }
}
