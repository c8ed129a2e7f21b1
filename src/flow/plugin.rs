//! Declarative derived-state subscribers.

use std::fmt;
use std::sync::Arc;

use super::store::Dispatcher;

/// A declarative subscriber mapping global state to a derived local state
/// and reacting to distinct changes.
///
/// A plugin has no independent identity; its lifecycle is bound to the
/// store it is attached to via [`Store::attach`](super::Store::attach).
/// The transform runs on every commit; the body runs on the store's
/// background delivery thread, once per distinct derived value, with a
/// dispatcher bound to the owning store.
///
/// # Type Parameters
///
/// - `S`: The parent (global) state type
/// - `L`: The derived local state type
/// - `A`: The action type
///
/// # Example
///
/// ```
/// use uniflow::flow::Plugin;
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct AppState { count: i64, label: String }
///
/// let plugin: Plugin<AppState, i64, ()> = Plugin::new(
///     |state: &AppState| state.count,
///     |_dispatcher, count| println!("count is now {count}"),
/// );
/// ```
pub struct Plugin<S, L, A> {
    pub(crate) transform: Arc<dyn Fn(&S) -> L + Send + Sync>,
    pub(crate) body: Arc<dyn Fn(&Dispatcher<A>, L) + Send + Sync>,
}

impl<S, L, A> Plugin<S, L, A> {
    /// Creates a plugin from a state transform and a reaction body.
    pub fn new<T, B>(transform: T, body: B) -> Self
    where
        T: Fn(&S) -> L + Send + Sync + 'static,
        B: Fn(&Dispatcher<A>, L) + Send + Sync + 'static,
    {
        Self {
            transform: Arc::new(transform),
            body: Arc::new(body),
        }
    }
}

impl<S, L, A> Clone for Plugin<S, L, A> {
    fn clone(&self) -> Self {
        Self {
            transform: Arc::clone(&self.transform),
            body: Arc::clone(&self.body),
        }
    }
}

impl<S, L, A> fmt::Debug for Plugin<S, L, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Plugin").finish_non_exhaustive()
    }
}
