//! Quiet-window debouncing with "last request wins" semantics.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

/// Quiet window before a typed query is searched.
pub const DEFAULT_QUIET: Duration = Duration::from_millis(500);

/// Monotonically increasing request tokens shared by everyone that can
/// supersede a request.
///
/// A result is applied only if its token is still the latest one issued.
#[derive(Debug, Clone, Default)]
pub struct RequestTokens {
    latest: Arc<AtomicU64>,
}

impl RequestTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new token, superseding every earlier one.
    pub fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.latest() == token
    }

    /// Run `fut` under a fresh token and drop its output if a newer token was
    /// issued while it was running.
    pub async fn run_latest<F, T>(&self, fut: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        let token = self.issue();
        let out = fut.await;
        if self.is_current(token) {
            Some(out)
        } else {
            debug!(token, latest = self.latest(), "Discarding superseded result");
            None
        }
    }
}

/// Delays work until input has been quiet for a fixed window.
#[derive(Debug, Clone)]
pub struct Debouncer {
    tokens: RequestTokens,
    quiet: Duration,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET)
    }
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self::with_tokens(RequestTokens::new(), quiet)
    }

    /// Share tokens with other callers that can supersede debounced work.
    pub fn with_tokens(tokens: RequestTokens, quiet: Duration) -> Self {
        Self { tokens, quiet }
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    pub fn tokens(&self) -> &RequestTokens {
        &self.tokens
    }

    /// Wait out the quiet window, then run `work` unless a newer call arrived.
    ///
    /// Returns `None` when the call was superseded, either before `work` started
    /// (it never runs) or while it was in flight (its output is discarded).
    pub async fn run<F, Fut, T>(&self, work: F) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let token = self.tokens.issue();
        tokio::time::sleep(self.quiet).await;

        if !self.tokens.is_current(token) {
            debug!(token, "Debounced call superseded before start");
            return None;
        }

        let out = work().await;
        if self.tokens.is_current(token) {
            Some(out)
        } else {
            debug!(token, latest = self.tokens.latest(), "Debounced call superseded in flight");
            None
        }
    }
}
