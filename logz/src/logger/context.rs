//! Request-scoped log attributes.
//!
//! A [`LogContext`] is an immutable snapshot of key/value attributes. Deriving
//! a context with [`LogContext::with_attrs`] copies the parent's attributes
//! and adds new ones, so contexts form a chain where later attributes win.
//!
//! The active context is tracked per thread as a stack. [`LogContext::enter`]
//! pushes a context and the returned [`ContextGuard`] removes exactly that
//! entry when dropped, in whatever order guards are dropped. The JSON layer
//! adds the attributes of the context on top of the stack to every record.
//!
//! Async code carries a context across `.await` points with
//! [`LogContext::scope`], which enters the context on every poll.

use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    future::Future,
    marker::PhantomData,
    pin::Pin,
    sync::Arc,
    task::{self, Poll},
};

use pin_project::pin_project;
use serde_json::Value;

thread_local! {
    static STACK: RefCell<Vec<(u64, LogContext)>> = const { RefCell::new(Vec::new()) };
    static NEXT_ID: Cell<u64> = const { Cell::new(0) };
}

/// Immutable set of attributes attached to a unit of work.
///
/// Keys are case-insensitive and stored lower-cased.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LogContext {
    attrs: Arc<BTreeMap<String, Value>>,
}

impl LogContext {
    /// An empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The context active on the calling thread, or an empty one.
    #[must_use]
    pub fn current() -> Self {
        STACK
            .try_with(|stack| {
                stack
                    .borrow()
                    .last()
                    .map(|(_, context)| context.clone())
                    .unwrap_or_default()
            })
            .unwrap_or_default()
    }

    /// Returns a derived context holding this context's attributes plus `attrs`.
    ///
    /// An attribute whose key already exists replaces the old value.
    #[must_use]
    pub fn with_attrs<I, K, V>(&self, attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut merged = (*self.attrs).clone();
        for (key, value) in attrs {
            merged.insert(key.as_ref().to_lowercase(), value.into());
        }
        Self {
            attrs: Arc::new(merged),
        }
    }

    /// Looks up an attribute, ignoring case.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attrs.get(&key.to_lowercase())
    }

    /// Iterates over the attributes in key order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attrs.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Makes this the active context of the calling thread.
    ///
    /// The context stays active until the guard is dropped or another context
    /// is entered on top of it. Dropping the guard removes only this entry, so
    /// contexts entered before and after it are unaffected.
    #[must_use = "the context is only active while the guard is alive"]
    pub fn enter(&self) -> ContextGuard {
        let id = NEXT_ID
            .try_with(|next| {
                let id = next.get();
                next.set(id.wrapping_add(1));
                id
            })
            .ok()
            .and_then(|id| {
                STACK
                    .try_with(|stack| stack.borrow_mut().push((id, self.clone())))
                    .ok()
                    .map(|()| id)
            });
        ContextGuard {
            id,
            _not_send: PhantomData,
        }
    }

    /// Runs `f` with this context active.
    pub fn in_scope<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let _guard = self.enter();
        f()
    }

    /// Wraps `future` so this context is active whenever it is polled.
    ///
    /// The wrapper is `Send` when the future is, so it can be handed to a
    /// multi-threaded executor.
    pub fn scope<F: Future>(self, future: F) -> WithLogContext<F> {
        WithLogContext {
            inner: future,
            context: self,
        }
    }
}

/// A future running inside a [`LogContext`]. Created by [`LogContext::scope`].
#[pin_project]
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct WithLogContext<F> {
    #[pin]
    inner: F,
    context: LogContext,
}

impl<F> WithLogContext<F> {
    pub fn context(&self) -> &LogContext {
        &self.context
    }

    pub fn into_inner(self) -> F {
        self.inner
    }
}

impl<F: Future> Future for WithLogContext<F> {
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut task::Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let _guard = this.context.enter();
        this.inner.poll(cx)
    }
}

/// Derives a context from the current one and activates it.
///
/// Shorthand for `LogContext::current().with_attrs(attrs).enter()`.
#[must_use = "the context is only active while the guard is alive"]
pub fn set_context_attrs<I, K, V>(attrs: I) -> ContextGuard
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<Value>,
{
    LogContext::current().with_attrs(attrs).enter()
}

/// Deactivates the context it was created for on drop.
///
/// The guard is bound to the thread that created it. Use
/// [`LogContext::scope`] to keep a context across `.await` points.
#[derive(Debug)]
pub struct ContextGuard {
    id: Option<u64>,
    _not_send: PhantomData<*const ()>,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        let _ = STACK.try_with(|stack| {
            let mut stack = stack.borrow_mut();
            if let Some(index) = stack.iter().rposition(|(entry, _)| *entry == id) {
                stack.remove(index);
            }
        });
    }
}
