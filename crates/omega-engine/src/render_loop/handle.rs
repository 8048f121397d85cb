use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cancellation token for a running render loop.
///
/// Cloning shares the token. Cancelling is idempotent and takes effect at the
/// loop's next tick boundary. A default-constructed handle belongs to no loop;
/// cancelling it does nothing observable.
#[derive(Debug, Clone, Default)]
pub struct LoopHandle {
    cancelled: Arc<AtomicBool>,
}

impl LoopHandle {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
