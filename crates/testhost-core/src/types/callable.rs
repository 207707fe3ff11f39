//! Zero-argument callables contributed by candidate modules.
//!
//! A [`Callable`] is a cheap, clonable handle. Two handles compare equal
//! only when they point at the same underlying function.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;

use super::export::Export;
use crate::result::AppResult;

/// Trait for function implementations behind a [`Callable`].
#[async_trait]
pub trait HookFn: Send + Sync + fmt::Debug {
    /// Invokes the function with no arguments.
    async fn call(&self) -> AppResult<Export>;
}

/// Handle to a shared zero-argument function.
#[derive(Clone)]
pub struct Callable {
    /// Name used in logs and `Debug` output.
    name: Option<Arc<str>>,
    /// The function itself.
    inner: Arc<dyn HookFn>,
}

impl Callable {
    /// Creates a callable from an async closure.
    pub fn new<F, Fut>(func: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<Export>> + Send + 'static,
    {
        Self::from_handler(Arc::new(ClosureFn {
            func: Box::new(move || func().boxed()),
        }))
    }

    /// Creates a callable from a synchronous closure.
    pub fn sync<F>(func: F) -> Self
    where
        F: Fn() -> AppResult<Export> + Send + Sync + 'static,
    {
        Self::new(move || futures::future::ready(func()))
    }

    /// A callable that does nothing and returns `Export::Null`.
    pub fn noop() -> Self {
        Self::sync(|| Ok(Export::Null))
    }

    /// Wraps an existing `HookFn` implementation.
    pub fn from_handler(handler: Arc<dyn HookFn>) -> Self {
        Self {
            name: None,
            inner: handler,
        }
    }

    /// Attaches a display name.
    pub fn with_name(mut self, name: impl Into<Arc<str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the display name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Invokes the function and awaits its result.
    pub async fn call(&self) -> AppResult<Export> {
        self.inner.call().await
    }

    /// Returns whether both handles share the same underlying function.
    pub fn same_fn(&self, other: &Callable) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        self.same_fn(other)
    }
}

impl Eq for Callable {}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "Callable({name})"),
            None => write!(f, "Callable(<anonymous>)"),
        }
    }
}

/// Closure-backed `HookFn`.
struct ClosureFn {
    func: Box<dyn Fn() -> BoxFuture<'static, AppResult<Export>> + Send + Sync>,
}

impl fmt::Debug for ClosureFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosureFn")
            .field("func", &"<closure>")
            .finish()
    }
}

#[async_trait]
impl HookFn for ClosureFn {
    async fn call(&self) -> AppResult<Export> {
        (self.func)().await
    }
}
