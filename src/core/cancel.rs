//! Explicit cooperative cancellation passed by value to every worker.

use tokio_util::sync::{CancellationToken, DropGuard};

/// Owner side of a cancellation pair. Dropping it also cancels.
#[derive(Debug)]
pub struct CancelHandle {
    token: CancellationToken,
    _guard: DropGuard,
}

/// Observer side of a cancellation pair; cheap to clone.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    token: CancellationToken,
}

/// Create a linked handle/signal pair.
#[must_use]
pub fn cancel_pair() -> (CancelHandle, CancelSignal) {
    let token = CancellationToken::new();
    let signal = CancelSignal {
        token: token.clone(),
    };
    let handle = CancelHandle {
        _guard: token.clone().drop_guard(),
        token,
    };
    (handle, signal)
}

impl CancelHandle {
    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Another signal observing this handle.
    #[must_use]
    pub fn signal(&self) -> CancelSignal {
        CancelSignal {
            token: self.token.clone(),
        }
    }
}

impl CancelSignal {
    /// Whether cancellation has been requested (or the handle dropped).
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolve once cancellation is requested.
    pub async fn cancelled(&self) {
        self.token.cancelled().await;
    }
}
