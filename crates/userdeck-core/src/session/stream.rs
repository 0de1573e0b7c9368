// ── Snapshot subscriptions ──
//
// Consumers either poll `latest()` or await `changed()`; `into_stream`
// adapts the subscription for `StreamExt` combinators.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use super::state::SessionState;

/// A subscription to session snapshots.
pub struct SessionStream {
    current: Arc<SessionState>,
    receiver: watch::Receiver<Arc<SessionState>>,
}

impl SessionStream {
    pub(crate) fn new(receiver: watch::Receiver<Arc<SessionState>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// The snapshot captured at subscription time or by the last `changed()`.
    pub fn current(&self) -> &Arc<SessionState> {
        &self.current
    }

    /// The latest published snapshot.
    pub fn latest(&self) -> Arc<SessionState> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next snapshot. `None` once the session is gone.
    pub async fn changed(&mut self) -> Option<Arc<SessionState>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = Arc::clone(&snap);
        Some(snap)
    }

    /// Wait until a snapshot satisfies `pred`, checking the current one first.
    pub async fn wait_for(
        &mut self,
        mut pred: impl FnMut(&SessionState) -> bool,
    ) -> Option<Arc<SessionState>> {
        let snap = self
            .receiver
            .wait_for(|state| pred(state.as_ref()))
            .await
            .ok()?
            .clone();
        self.current = Arc::clone(&snap);
        Some(snap)
    }

    pub fn into_stream(self) -> SessionWatchStream {
        SessionWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter yielding every published snapshot, starting with the
/// current one.
pub struct SessionWatchStream {
    inner: WatchStream<Arc<SessionState>>,
}

impl Stream for SessionWatchStream {
    type Item = Arc<SessionState>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
