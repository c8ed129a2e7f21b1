//! Dispatch-pipeline wrappers around the pure reduction step.
//!
//! A [`Middleware`] wraps the dispatch function, forming an onion around the
//! terminal reducing step. Side effects (network calls, timers, logging)
//! belong exclusively in middleware or in plugin bodies, never in a reducer.
//!
//! Each middleware receives a [`StoreHandle`](super::StoreHandle) — a narrow
//! capability carrying a re-entrant dispatcher and a state accessor — and
//! the next dispatch function in the chain. It returns the dispatch function
//! that outer layers will call. A middleware may forward the action, drop
//! it, translate it, or dispatch derived actions through the handle.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use uniflow::flow::{DispatchFn, Middleware, Reducer, Store, StoreHandle};
//!
//! // Doubles every dispatched delta before it reaches the reducer.
//! let doubling = |_handle: &StoreHandle<i64, i64>, next: DispatchFn<i64>| -> DispatchFn<i64> {
//!     Arc::new(move |delta: i64| next(delta * 2))
//! };
//!
//! let store = Store::new(
//!     0_i64,
//!     vec![Arc::new(doubling) as Arc<dyn Middleware<i64, i64>>],
//!     Reducer::new(|state: i64, delta: &i64| state + delta),
//! );
//!
//! store.dispatch(3);
//! assert_eq!(store.state(), 6);
//! ```

use std::fmt;
use std::sync::Arc;

use super::store::StoreHandle;

/// The dispatch function type flowing through the middleware chain.
///
/// Dispatch has no return value; a reducer that cannot handle an action
/// encodes that by returning the unchanged state.
pub type DispatchFn<A> = Arc<dyn Fn(A) + Send + Sync>;

/// A dispatch-pipeline wrapper.
///
/// Given the store's capability handle and the next dispatch function,
/// produces the dispatch function for this layer. The first middleware in a
/// store's list is the outermost wrapper: it sees the action first on the
/// way in and, if it forwards, sees control return last on the way out.
///
/// Middleware is stateless from the store's point of view; closures over
/// external resources are the caller's responsibility. Asynchronous work
/// must not block inside the chain: return control and re-dispatch through
/// the handle when the result is ready.
pub trait Middleware<S, A>: Send + Sync {
    /// Wraps the next dispatch function, returning this layer's dispatch
    /// function.
    fn wrap(&self, handle: &StoreHandle<S, A>, next: DispatchFn<A>) -> DispatchFn<A>;
}

impl<S, A, F> Middleware<S, A> for F
where
    F: Fn(&StoreHandle<S, A>, DispatchFn<A>) -> DispatchFn<A> + Send + Sync,
{
    fn wrap(&self, handle: &StoreHandle<S, A>, next: DispatchFn<A>) -> DispatchFn<A> {
        self(handle, next)
    }
}

/// Returns a middleware that records every action through [`tracing`]
/// before forwarding it unchanged.
///
/// Logging is transparent to the pure computation: the final state equals
/// the state produced without this middleware.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use uniflow::flow::{Middleware, Reducer, Store, logging};
///
/// let store = Store::new(
///     0_i64,
///     vec![Arc::new(logging()) as Arc<dyn Middleware<i64, i64>>],
///     Reducer::new(|state: i64, delta: &i64| state + delta),
/// );
///
/// store.dispatch(5);
/// assert_eq!(store.state(), 5);
/// ```
#[must_use]
pub fn logging<S, A>() -> impl Middleware<S, A>
where
    S: 'static,
    A: fmt::Debug + Send + Sync + 'static,
{
    move |_handle: &StoreHandle<S, A>, next: DispatchFn<A>| -> DispatchFn<A> {
        Arc::new(move |action: A| {
            tracing::debug!(action = ?action, "dispatch");
            next(action);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{Reducer, Store};
    use std::sync::Mutex;

    #[test]
    fn test_closure_middleware_forwards() {
        let seen: Arc<Mutex<Vec<i64>>> = Arc::new(Mutex::new(Vec::new()));
        let record = Arc::clone(&seen);

        let recorder = move |_handle: &StoreHandle<i64, i64>,
                             next: DispatchFn<i64>|
              -> DispatchFn<i64> {
            let record = Arc::clone(&record);
            Arc::new(move |action: i64| {
                record.lock().expect("middleware log poisoned").push(action);
                next(action);
            })
        };

        let store = Store::new(
            0_i64,
            vec![Arc::new(recorder) as Arc<dyn Middleware<i64, i64>>],
            Reducer::new(|state: i64, delta: &i64| state + delta),
        );

        store.dispatch(2);
        store.dispatch(3);

        assert_eq!(store.state(), 5);
        assert_eq!(*seen.lock().expect("middleware log poisoned"), vec![2, 3]);
    }

    #[test]
    fn test_logging_middleware_is_transparent() {
        let store = Store::new(
            0_i64,
            vec![Arc::new(logging()) as Arc<dyn Middleware<i64, i64>>],
            Reducer::new(|state: i64, delta: &i64| state + delta),
        );

        store.dispatch_all([1, 2, 3]);
        assert_eq!(store.state(), 6);
    }
}
