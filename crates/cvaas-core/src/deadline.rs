// ── Session deadline and cancellation ──

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::error::CoreError;

/// Default upper bound for everything done on one session.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A fixed point in time after which every call on a session fails, plus
/// the token that aborts the session early.
#[derive(Debug, Clone)]
pub struct Deadline {
    at: Instant,
    timeout: Duration,
    cancel: CancellationToken,
}

impl Deadline {
    /// Start the clock now. The returned handle owns the cancel side.
    pub fn start(timeout: Duration) -> (Self, CancelHandle) {
        let cancel = CancellationToken::new();
        let deadline = Self {
            at: Instant::now() + timeout,
            timeout,
            cancel: cancel.clone(),
        };
        (deadline, CancelHandle::new(cancel))
    }

    /// Whether the cancel handle has fired.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Drive `fut` to completion unless the session is cancelled or its
    /// deadline passes first.
    pub async fn run<F, T>(&self, fut: F) -> Result<T, CoreError>
    where
        F: Future<Output = T>,
    {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(CoreError::Cancelled),
            () = tokio::time::sleep_until(self.at) => Err(CoreError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }),
            out = fut => Ok(out),
        }
    }
}

/// Owner of a session's cancellation.
///
/// Dropping the handle cancels the session, so in-flight and later calls
/// fail with [`CoreError::Cancelled`] once the caller is done with it.
#[derive(Debug)]
pub struct CancelHandle {
    token: CancellationToken,
    _guard: DropGuard,
}

impl CancelHandle {
    fn new(token: CancellationToken) -> Self {
        let guard = token.clone().drop_guard();
        Self {
            token,
            _guard: guard,
        }
    }

    /// Cancel the session now.
    pub fn cancel(&self) {
        self.token.cancel();
    }
}
