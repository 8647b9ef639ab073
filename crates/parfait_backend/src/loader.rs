// Copyright (c) The Parfait Project Authors.
// Licensed under the MIT License.

//! Deferred value computation for get-or-load operations.

use std::fmt::Debug;
use std::pin::Pin;

use crate::{Error, Result};

type BoxLoadFuture<V> = Pin<Box<dyn Future<Output = Result<V>> + Send>>;

/// A zero-argument deferred computation passed to
/// [`BackendCache::get_or_load`](crate::BackendCache::get_or_load).
///
/// The loader is consumed when invoked, so a single `get_or_load` call can
/// never run it more than once. Guaranteeing at-most-once invocation across
/// *concurrent* callers is the backend's job, not the caller's and not the
/// tiered facade's.
///
/// # Examples
///
/// ```
/// use parfait_backend::ValueLoader;
///
/// # futures::executor::block_on(async {
/// let loader = ValueLoader::new(|| async { "expensive".to_string() });
/// assert_eq!(loader.load().await?, "expensive");
/// # Ok::<(), parfait_backend::Error>(())
/// # });
/// ```
pub struct ValueLoader<V>(Box<dyn FnOnce() -> BoxLoadFuture<V> + Send>);

impl<V> ValueLoader<V> {
    /// Creates a loader from an infallible async computation.
    pub fn new<F, Fut>(load: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = V> + Send + 'static,
    {
        Self(Box::new(move || Box::pin(async move { Ok(load().await) })))
    }

    /// Creates a loader from a fallible async computation.
    ///
    /// A load failure propagates uncaught through the backend's
    /// `get_or_load` call and nothing is stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use parfait_backend::{Error, ValueLoader};
    ///
    /// # futures::executor::block_on(async {
    /// let loader = ValueLoader::<String>::fallible(|| async { Err(Error::from_message("origin down")) });
    /// assert!(loader.load().await.is_err());
    /// # });
    /// ```
    pub fn fallible<F, Fut>(load: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<V>> + Send + 'static,
    {
        Self(Box::new(move || Box::pin(load())))
    }

    /// Runs the deferred computation, consuming the loader.
    ///
    /// # Errors
    ///
    /// Returns whatever error the computation itself produced; loaders built
    /// with [`ValueLoader::new`] cannot fail.
    pub async fn load(self) -> Result<V> {
        (self.0)().await
    }
}

impl<V> From<V> for ValueLoader<V>
where
    V: Send + 'static,
{
    fn from(value: V) -> Self {
        Self::new(move || async move { value })
    }
}

impl<V> Debug for ValueLoader<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueLoader").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_on<F: Future>(f: F) -> F::Output {
        futures::executor::block_on(f)
    }

    #[test]
    fn load_runs_the_computation_once() {
        block_on(async {
            let loader = ValueLoader::new(|| async { 7 });
            assert_eq!(loader.load().await.expect("load failed"), 7);
        });
    }

    #[test]
    fn fallible_loader_propagates_errors() {
        block_on(async {
            let loader = ValueLoader::<i32>::fallible(|| async { Err(Error::from_message("boom")) });
            let err = loader.load().await.expect_err("load should fail");
            assert!(err.to_string().contains("boom"));
        });
    }

    #[test]
    fn from_value_yields_the_value() {
        block_on(async {
            let loader = ValueLoader::from("ready".to_string());
            assert_eq!(loader.load().await.expect("load failed"), "ready");
        });
    }
}
