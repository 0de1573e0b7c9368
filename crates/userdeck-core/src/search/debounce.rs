// ── Cancellable debounce timer ──
//
// One outstanding timer at a time. Arming cancels the previous timer's
// token before spawning the new one, so a superseded timer never fires.
// Callers still guard their callbacks with a sequence number: cancellation
// races with a timer that already elapsed and is waiting for a lock.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::trace;

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    /// Parent of every timer token; cancelled on shutdown.
    root: CancellationToken,
    pending: Option<CancellationToken>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            root: CancellationToken::new(),
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether a timer is armed and has neither fired nor been cancelled.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|t| !t.is_cancelled())
    }

    /// Cancel the outstanding timer. Returns `true` if one was armed.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(token) => {
                let was_live = !token.is_cancelled();
                token.cancel();
                was_live
            }
            None => false,
        }
    }

    /// Cancel any outstanding timer, then run `fire` after the delay
    /// unless cancelled first. Must be called within a tokio runtime.
    pub fn arm<F>(&mut self, fire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        if self.root.is_cancelled() {
            trace!("debouncer shut down, not arming");
            return;
        }

        let token = self.root.child_token();
        self.pending = Some(token.clone());
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::select! {
                biased;

                () = token.cancelled() => {
                    trace!("debounce timer cancelled");
                }
                () = tokio::time::sleep(delay) => {
                    // Mark as spent so `is_pending` turns false.
                    token.cancel();
                    fire();
                }
            }
        });
    }

    /// Cancel the outstanding timer and refuse to arm new ones.
    pub fn shutdown(&mut self) {
        self.cancel();
        self.root.cancel();
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.root.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl Fn() -> Box<dyn FnOnce() + Send>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let make = move || -> Box<dyn FnOnce() + Send> {
            let h = Arc::clone(&h);
            Box::new(move || {
                h.fetch_add(1, Ordering::SeqCst);
            })
        };
        (hits, make)
    }

    #[tokio::test(start_paused = true)]
    async fn fires_after_delay() {
        let (hits, make) = counter();
        let mut debouncer = Debouncer::new(Duration::from_millis(1000));

        debouncer.arm(make());
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_restarts_the_interval() {
        let (hits, make) = counter();
        let mut debouncer = Debouncer::new(Duration::from_millis(1000));

        debouncer.arm(make());
        tokio::time::sleep(Duration::from_millis(600)).await;
        debouncer.arm(make());
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_firing() {
        let (hits, make) = counter();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));

        debouncer.arm(make());
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_refuses_new_timers() {
        let (hits, make) = counter();
        let mut debouncer = Debouncer::new(Duration::ZERO);

        debouncer.shutdown();
        debouncer.arm(make());
        assert!(!debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
