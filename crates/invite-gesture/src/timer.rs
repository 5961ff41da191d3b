//! Deferred one-shot callbacks.
//!
//! Visual transitions finish on a fixed clock before the host is told about
//! them. The callback runs on the tokio runtime after an absolute deadline
//! and can be aborted until then.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// A callback scheduled to run once at a deadline.
#[derive(Debug)]
pub struct DeferredCall {
    deadline: Instant,
    handle: JoinHandle<()>,
}

impl DeferredCall {
    /// Schedule `f` to run `delay` from now on the given runtime.
    ///
    /// The deadline is fixed here, not when the task is first polled.
    pub fn spawn_on<F>(runtime: &Handle, delay: Duration, f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let deadline = Instant::now() + delay;
        let handle = runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            f();
        });
        Self { deadline, handle }
    }

    /// When the callback is due.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Abort the callback if it has not run yet.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Whether the callback ran or was cancelled.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    async fn settle() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_at_deadline() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let call = DeferredCall::spawn_on(&Handle::current(), Duration::from_millis(300), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::advance(Duration::from_millis(299)).await;
        settle().await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        tokio::time::advance(Duration::from_millis(1)).await;
        settle().await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(call.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_deadline() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let call = DeferredCall::spawn_on(&Handle::current(), Duration::from_millis(300), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::advance(Duration::from_millis(100)).await;
        call.cancel();
        tokio::time::advance(Duration::from_secs(1)).await;
        settle().await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
