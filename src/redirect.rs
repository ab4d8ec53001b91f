//! Deferred post-submission redirect.
//!
//! A single scheduled action tied to the owning scope: dropping or canceling
//! the timer before the deadline guarantees the action never runs, so no
//! side effect can fire after the session is gone.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// One cancelable deferred action.
pub struct RedirectTimer {
    cancel: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl RedirectTimer {
    /// Schedules `action` to run once after `delay` unless canceled first.
    pub fn schedule<F>(delay: Duration, action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let (cancel, deadline) = mpsc::channel::<()>();
        let handle = thread::spawn(move || {
            // A cancel message wins the race against the deadline. The
            // sender is held by RedirectTimer, so Disconnected only occurs
            // after an explicit cancel or drop already consumed it.
            if matches!(deadline.recv_timeout(delay), Err(RecvTimeoutError::Timeout)) {
                action();
            }
        });
        Self {
            cancel,
            handle: Some(handle),
        }
    }

    /// Stops the timer. Once this returns the action is guaranteed not to
    /// run (it may already have run if the deadline passed first).
    pub fn cancel(mut self) {
        self.cancel_and_join();
    }

    /// Blocks until the timer fires (or was already canceled).
    pub fn wait(mut self) {
        self.join();
    }

    fn cancel_and_join(&mut self) {
        // Send fails only when the timer thread already finished.
        let _ = self.cancel.send(());
        self.join();
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RedirectTimer {
    fn drop(&mut self) {
        self.cancel_and_join();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn fires_exactly_once_after_the_delay() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let timer = RedirectTimer::schedule(Duration::from_millis(10), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        timer.wait();
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn cancel_prevents_the_action() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let timer = RedirectTimer::schedule(Duration::from_secs(60), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        timer.cancel();
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn drop_cancels_a_pending_timer() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        {
            let _timer = RedirectTimer::schedule(Duration::from_secs(60), move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
