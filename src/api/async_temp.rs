/*!
 * Async Temp Facade
 * Future-returning wrapper that runs blocking filesystem work off the caller
 */

use crate::core::errors::{Result, TempError};
use crate::monitoring::operation_span;
use crate::temp::{CleanupReport, ResourceHandle, ResourceRequest, TempManager};
use std::future::Future;
use std::path::PathBuf;
use tokio::task;

/// Async temp resource API
///
/// Each operation is submitted to tokio's blocking pool when the method is
/// called, not when the future is first polled. Dropping the returned
/// future, polled or not, does not cancel the work: the allocation or
/// cleanup still completes and its effect on tracking state is kept.
///
/// # Panics
/// `open`, `mkdir` and `cleanup` panic when called outside a tokio runtime.
#[derive(Debug, Clone, Default)]
pub struct AsyncTemp {
    inner: TempManager,
}

impl AsyncTemp {
    pub fn new(inner: TempManager) -> Self {
        Self { inner }
    }

    /// Enable or disable tracking (synchronous)
    pub fn track(&self, enabled: bool) {
        self.inner.track(enabled);
    }

    pub fn is_tracking(&self) -> bool {
        self.inner.is_tracking()
    }

    /// Create a temp file opened for read/write
    pub fn open<R: Into<ResourceRequest>>(
        &self,
        request: R,
    ) -> impl Future<Output = Result<ResourceHandle>> + Send + 'static {
        let request = request.into();
        self.spawn("open", move |manager| manager.open(request))
    }

    /// Create a temp directory and return its path
    pub fn mkdir<R: Into<ResourceRequest>>(
        &self,
        request: R,
    ) -> impl Future<Output = Result<PathBuf>> + Send + 'static {
        let request = request.into();
        self.spawn("mkdir", move |manager| manager.mkdir(request))
    }

    /// Generate a temp file name without creating it
    pub fn path<R: Into<ResourceRequest>>(&self, request: R) -> Result<PathBuf> {
        self.inner.path(request)
    }

    /// Remove every tracked resource
    pub fn cleanup(&self) -> impl Future<Output = Result<CleanupReport>> + Send + 'static {
        self.spawn("cleanup", |manager| manager.cleanup())
    }

    pub fn tracked_paths(&self) -> Vec<PathBuf> {
        self.inner.tracked_paths()
    }

    /// Blocking manager shared with this facade
    pub fn manager(&self) -> &TempManager {
        &self.inner
    }

    /// Start `op` on the blocking pool now; the returned future only joins it
    fn spawn<T, F>(
        &self,
        name: &'static str,
        op: F,
    ) -> impl Future<Output = Result<T>> + Send + 'static
    where
        T: Send + 'static,
        F: FnOnce(TempManager) -> Result<T> + Send + 'static,
    {
        let manager = self.inner.clone();
        let span = operation_span(name);
        let handle = task::spawn_blocking(move || span.in_scope(|| op(manager)));

        async move {
            match handle.await {
                Ok(result) => result,
                Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
                Err(e) => Err(TempError::TaskAborted(e.to_string())),
            }
        }
    }
}

impl From<TempManager> for AsyncTemp {
    fn from(inner: TempManager) -> Self {
        Self::new(inner)
    }
}
