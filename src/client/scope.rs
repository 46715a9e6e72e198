//! Request lifetimes tied to a screen.
//!
//! A [`RequestScope`] owns every request spawned through it. Cancelling or
//! dropping the scope aborts them, and [`RequestScope::replace`] supersedes
//! earlier requests so a slow stale response can never overwrite a newer one.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::{AbortHandle, JoinHandle};
use tracing::debug;

use super::error::{ClientError, ClientResult};

/// Owner of the in-flight requests for one screen.
#[derive(Debug, Default)]
pub struct RequestScope {
    generation: Arc<AtomicU64>,
    handles: Mutex<Vec<AbortHandle>>,
}

/// A request spawned in a [`RequestScope`].
#[derive(Debug)]
pub struct ScopedRequest<T> {
    handle: JoinHandle<ClientResult<T>>,
    generation: u64,
    current: Arc<AtomicU64>,
}

impl RequestScope {
    /// Creates an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns a request in the current generation.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F, T>(&self, request: F) -> ScopedRequest<T>
    where
        F: Future<Output = ClientResult<T>> + Send + 'static,
        T: Send + 'static,
    {
        let generation = self.generation.load(Ordering::SeqCst);
        let handle = tokio::spawn(request);

        let mut handles = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
        handles.retain(|h| !h.is_finished());
        handles.push(handle.abort_handle());

        ScopedRequest {
            handle,
            generation,
            current: Arc::clone(&self.generation),
        }
    }

    /// Cancels everything in flight, then spawns `request` as the only live one.
    ///
    /// # Example
    ///
    /// ```
    /// use hrms_engine::client::{ClientError, RequestScope};
    /// use std::time::Duration;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let scope = RequestScope::new();
    /// let slow = scope.spawn(async {
    ///     tokio::time::sleep(Duration::from_secs(5)).await;
    ///     Ok::<_, ClientError>("first tab")
    /// });
    /// let fast = scope.replace(async { Ok::<_, ClientError>("second tab") });
    ///
    /// assert_eq!(fast.join().await.unwrap(), "second tab");
    /// assert!(slow.join().await.unwrap_err().is_cancelled());
    /// # }
    /// ```
    pub fn replace<F, T>(&self, request: F) -> ScopedRequest<T>
    where
        F: Future<Output = ClientResult<T>> + Send + 'static,
        T: Send + 'static,
    {
        self.cancel();
        self.spawn(request)
    }

    /// Aborts every outstanding request and invalidates their results.
    pub fn cancel(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let mut handles = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
        let aborted = handles.len();
        for handle in handles.drain(..) {
            handle.abort();
        }
        if aborted > 0 {
            debug!(generation, aborted, "Request scope cancelled");
        }
    }

    /// Number of spawned requests that have not finished.
    pub fn in_flight(&self) -> usize {
        self.handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|h| !h.is_finished())
            .count()
    }
}

impl Drop for RequestScope {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<T> ScopedRequest<T> {
    /// Returns true if the scope has moved on since this request was spawned.
    pub fn is_superseded(&self) -> bool {
        self.current.load(Ordering::SeqCst) != self.generation
    }

    /// Waits for the request.
    ///
    /// Yields [`ClientError::Cancelled`] if the request was aborted or its
    /// generation was superseded, even when a response had already arrived.
    pub async fn join(self) -> ClientResult<T> {
        let outcome = self.handle.await;
        if self.current.load(Ordering::SeqCst) != self.generation {
            return Err(ClientError::Cancelled);
        }
        match outcome {
            Ok(result) => result,
            Err(err) if err.is_cancelled() => Err(ClientError::Cancelled),
            Err(err) => std::panic::resume_unwind(err.into_panic()),
        }
    }
}
