use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::AbortHandle;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

/// A single cancellable delayed task.
///
/// Scheduling replaces whatever was pending. The task is aborted on
/// [`cancel`](Self::cancel) and when the owner is dropped, so nothing fires
/// after shutdown.
#[derive(Debug, Default)]
pub struct DeferredPush {
    pending: Mutex<Option<AbortHandle>>,
}

impl DeferredPush {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `task` after `delay` unless cancelled or replaced first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut pending = self.lock();
        if let Some(previous) = pending.take() {
            previous.abort();
            debug!("replaced pending deferred push");
        }

        let deadline = Instant::now() + delay;
        let handle = tokio::spawn(async move {
            sleep_until(deadline).await;
            task.await;
        });
        *pending = Some(handle.abort_handle());
        debug!(delay_ms = delay.as_millis() as u64, "deferred push scheduled");
    }

    /// Aborts the pending task. Returns `true` if one was still waiting.
    pub fn cancel(&self) -> bool {
        match self.lock().take() {
            Some(handle) => {
                let was_waiting = !handle.is_finished();
                handle.abort();
                if was_waiting {
                    debug!("deferred push cancelled");
                }
                was_waiting
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.lock().as_ref().is_some_and(|handle| !handle.is_finished())
    }

    fn lock(&self) -> MutexGuard<'_, Option<AbortHandle>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for DeferredPush {
    fn drop(&mut self) {
        let pending = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }
}
