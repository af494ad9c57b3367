//! Request-scoped context carrying cancellation and deadlines.
//!
//! A [`RequestContext`] is created at the start of a tool call or CLI command
//! and passed by reference through the service, resolver and catalog client.
//! Every catalog lookup is raced against it, so canceling the context (or letting
//! its deadline pass) stops all unfinished lookups at once while finished lookups
//! keep their results.
//!
//! # Example
//!
//! ```rust,no_run
//! use project_catalog_mcp::core::RequestContext;
//! use std::time::Duration;
//!
//! # async fn example() {
//! let (ctx, cancel) = RequestContext::with_cancel();
//! let ctx = ctx.with_timeout(Duration::from_secs(10));
//!
//! let result = ctx.run(async { Ok::<_, project_catalog_mcp::core::CatalogError>(42) }).await;
//! assert_eq!(result, Ok(42));
//!
//! cancel.cancel();
//! assert!(ctx.is_done());
//! # }
//! ```

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use super::CatalogError;

/// Cancellation signal and optional deadline for one request.
///
/// Clones share the same cancellation signal. Deadlines only ever tighten:
/// [`RequestContext::with_timeout`] keeps the earlier of the existing and the
/// new deadline.
#[derive(Debug, Clone)]
pub struct RequestContext {
    cancelled: watch::Receiver<bool>,
    deadline: Option<Instant>,
}

/// Handle that cancels every clone of the [`RequestContext`] it was created with.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    sender: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    /// Cancel the associated context. Idempotent.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

impl RequestContext {
    /// A context that is never canceled and has no deadline.
    #[must_use]
    pub fn background() -> Self {
        // The sender is dropped right away, so the signal can never flip.
        let (_sender, cancelled) = watch::channel(false);
        Self {
            cancelled,
            deadline: None,
        }
    }

    /// A cancelable context and the handle that cancels it.
    #[must_use]
    pub fn with_cancel() -> (Self, CancelHandle) {
        let (sender, cancelled) = watch::channel(false);
        (
            Self {
                cancelled,
                deadline: None,
            },
            CancelHandle {
                sender: Arc::new(sender),
            },
        )
    }

    /// Derive a context whose deadline is at most `timeout` from now.
    #[must_use]
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let candidate = Instant::now() + timeout;
        let deadline = match self.deadline {
            Some(existing) if existing <= candidate => existing,
            _ => candidate,
        };
        Self {
            cancelled: self.cancelled.clone(),
            deadline: Some(deadline),
        }
    }

    /// The deadline, if one is set.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// The error this context would report right now, if it is already done.
    #[must_use]
    pub fn err(&self) -> Option<CatalogError> {
        if *self.cancelled.borrow() {
            Some(CatalogError::Cancelled)
        } else if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            Some(CatalogError::DeadlineExceeded)
        } else {
            None
        }
    }

    /// True once the context is canceled or past its deadline.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.err().is_some()
    }

    /// Resolves when the context is canceled or its deadline passes.
    pub async fn done(&self) -> CatalogError {
        let mut cancelled = self.cancelled.clone();
        let cancellation = async move {
            loop {
                if *cancelled.borrow_and_update() {
                    return;
                }
                if cancelled.changed().await.is_err() {
                    // No handle left, cancellation can no longer happen.
                    std::future::pending::<()>().await;
                }
            }
        };

        match self.deadline {
            Some(deadline) => tokio::select! {
                () = cancellation => CatalogError::Cancelled,
                () = tokio::time::sleep_until(deadline) => CatalogError::DeadlineExceeded,
            },
            None => {
                cancellation.await;
                CatalogError::Cancelled
            }
        }
    }

    /// Run `future` unless the context finishes first.
    ///
    /// Fails fast without polling `future` when the context is already done.
    pub async fn run<T, F>(&self, future: F) -> Result<T, CatalogError>
    where
        F: Future<Output = Result<T, CatalogError>>,
    {
        if let Some(err) = self.err() {
            return Err(err);
        }

        tokio::select! {
            biased;
            err = self.done() => Err(err),
            result = future => result,
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::background()
    }
}
