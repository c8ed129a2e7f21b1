//! A state container serializing all mutations through one boundary.
//!
//! [`Store`] owns a single state value, an ordered middleware list, and one
//! reducer. Callers [`dispatch`](Store::dispatch) actions; each action flows
//! through the middleware chain (outermost first) to the terminal step,
//! which reads the current state, runs the reducer, and commits the result —
//! one atomic critical section guarded by a single mutex, so at most one
//! reduction executes at any instant.
//!
//! Committed states are delivered to subscribers in commit order. Plugins
//! additionally derive a local state, deduplicate consecutive equal values,
//! and run their bodies on a dedicated background delivery thread.
//!
//! Middleware and independent subscriptions never hold the store itself:
//! they receive a [`StoreHandle`] — a non-owning capability whose operations
//! return [`StoreUnavailable`] once the store has been torn down, making the
//! stale-store case an explicit, testable outcome rather than a silent
//! no-op.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Weak};
use std::thread::{self, JoinHandle};

use parking_lot::{Mutex, RwLock};

use super::middleware::{DispatchFn, Middleware};
use super::plugin::Plugin;
use super::reducer::Reducer;

/// Error returned by [`Dispatcher`], [`StateAccessor`], and [`StoreHandle`]
/// operations after the owning [`Store`] has been torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreUnavailable;

impl fmt::Display for StoreUnavailable {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "store has been torn down")
    }
}

impl std::error::Error for StoreUnavailable {}

/// A non-owning handle that re-enters the full dispatch chain from the top.
///
/// Middleware uses this to dispatch derived actions; the action passes
/// through the whole chain again, outermost layer first.
pub struct Dispatcher<A> {
    chain: Weak<RwLock<DispatchFn<A>>>,
}

impl<A> Dispatcher<A> {
    /// Dispatches an action through the owning store's full chain.
    ///
    /// # Errors
    ///
    /// Returns [`StoreUnavailable`] if the owning store has been torn down.
    pub fn dispatch(&self, action: A) -> Result<(), StoreUnavailable> {
        let cell = self.chain.upgrade().ok_or(StoreUnavailable)?;
        let dispatch = cell.read().clone();
        dispatch(action);
        Ok(())
    }
}

impl<A> Clone for Dispatcher<A> {
    fn clone(&self) -> Self {
        Self {
            chain: Weak::clone(&self.chain),
        }
    }
}

impl<A> fmt::Debug for Dispatcher<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

/// A non-owning accessor for the current committed state.
pub struct StateAccessor<S> {
    state: Weak<Mutex<S>>,
}

impl<S: Clone> StateAccessor<S> {
    /// Returns a snapshot of the current committed state.
    ///
    /// # Errors
    ///
    /// Returns [`StoreUnavailable`] if the owning store has been torn down.
    pub fn current(&self) -> Result<S, StoreUnavailable> {
        self.state
            .upgrade()
            .map(|state| state.lock().clone())
            .ok_or(StoreUnavailable)
    }
}

impl<S> Clone for StateAccessor<S> {
    fn clone(&self) -> Self {
        Self {
            state: Weak::clone(&self.state),
        }
    }
}

impl<S> fmt::Debug for StateAccessor<S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("StateAccessor")
            .finish_non_exhaustive()
    }
}

/// The narrow capability interface handed to middleware and independent
/// subscription factories: a re-entrant dispatcher plus a state accessor,
/// with no reference to the store itself.
pub struct StoreHandle<S, A> {
    dispatcher: Dispatcher<A>,
    state: StateAccessor<S>,
}

impl<S, A> StoreHandle<S, A> {
    /// Dispatches an action through the owning store's full chain.
    ///
    /// # Errors
    ///
    /// Returns [`StoreUnavailable`] if the owning store has been torn down.
    pub fn dispatch(&self, action: A) -> Result<(), StoreUnavailable> {
        self.dispatcher.dispatch(action)
    }

    /// Returns a snapshot of the current committed state.
    ///
    /// # Errors
    ///
    /// Returns [`StoreUnavailable`] if the owning store has been torn down.
    pub fn state(&self) -> Result<S, StoreUnavailable>
    where
        S: Clone,
    {
        self.state.current()
    }

    /// Returns the re-entrant dispatcher on its own.
    #[must_use]
    pub fn dispatcher(&self) -> Dispatcher<A> {
        self.dispatcher.clone()
    }

    /// Returns the state accessor on its own.
    #[must_use]
    pub fn state_accessor(&self) -> StateAccessor<S> {
        self.state.clone()
    }
}

impl<S, A> Clone for StoreHandle<S, A> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
            state: self.state.clone(),
        }
    }
}

impl<S, A> fmt::Debug for StoreHandle<S, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("StoreHandle").finish_non_exhaustive()
    }
}

/// A cancellable subscription handle.
///
/// Cancelling (explicitly or by dropping the handle) stops further delivery;
/// callbacks already queued on the delivery thread still run.
#[must_use = "dropping a Subscription cancels it"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Creates a subscription from a cancellation action.
    pub fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Cancels the subscription, consuming the handle.
    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

enum Job {
    Run(Box<dyn FnOnce() + Send>),
    Shutdown,
}

struct ObserverEntry<S> {
    id: u64,
    notify: Arc<dyn Fn(&S) + Send + Sync>,
}

struct StoreCore<S, A> {
    reducer: Reducer<S, A>,
    // Single serialization boundary: read, reduce, and commit happen under
    // this lock, as does observer notification, which fixes commit order.
    state: Arc<Mutex<S>>,
    chain: Arc<RwLock<DispatchFn<A>>>,
    middleware: RwLock<Vec<Arc<dyn Middleware<S, A>>>>,
    observers: Mutex<Vec<ObserverEntry<S>>>,
    next_observer_id: AtomicU64,
}

impl<S, A> StoreCore<S, A>
where
    S: Clone + Send + 'static,
    A: Send + 'static,
{
    fn dispatch(&self, action: A) {
        let dispatch = self.chain.read().clone();
        dispatch(action);
    }

    /// One atomic critical section: read current state, run the reducer,
    /// commit, notify. A panicking reducer unwinds before the commit, so the
    /// prior state remains untouched.
    fn reduce(&self, action: A) {
        let mut state = self.state.lock();
        let next = self.reducer.reduce(state.clone(), &action);
        *state = next;
        tracing::trace!("state committed");

        // Snapshot so an observer cancelling its own subscription does not
        // re-enter the observers lock.
        let snapshot: Vec<Arc<dyn Fn(&S) + Send + Sync>> = self
            .observers
            .lock()
            .iter()
            .map(|entry| Arc::clone(&entry.notify))
            .collect();
        for notify in snapshot {
            notify(&state);
        }
    }

    fn rebuild_chain(self: &Arc<Self>) {
        let weak = Arc::downgrade(self);
        let terminal: DispatchFn<A> = Arc::new(move |action: A| {
            if let Some(core) = weak.upgrade() {
                core.reduce(action);
            }
        });

        let handle = self.handle();
        let chain = {
            let middleware = self.middleware.read();
            middleware
                .iter()
                .rev()
                .fold(terminal, |next, layer| layer.wrap(&handle, next))
        };

        *self.chain.write() = chain;
        tracing::debug!("dispatch chain rebuilt");
    }

    fn handle(&self) -> StoreHandle<S, A> {
        StoreHandle {
            dispatcher: Dispatcher {
                chain: Arc::downgrade(&self.chain),
            },
            state: StateAccessor {
                state: Arc::downgrade(&self.state),
            },
        }
    }

    /// Registers an observer and delivers the current state to it before any
    /// later commit can interleave.
    fn subscribe<F>(self: &Arc<Self>, observer: F) -> Subscription
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        let state = self.state.lock();
        observer(&state);

        let id = self.next_observer_id.fetch_add(1, Ordering::Relaxed);
        self.observers.lock().push(ObserverEntry {
            id,
            notify: Arc::new(observer),
        });
        drop(state);

        let weak = Arc::downgrade(self);
        Subscription::new(move || {
            if let Some(core) = weak.upgrade() {
                core.observers.lock().retain(|entry| entry.id != id);
            }
        })
    }
}

/// A unidirectional data flow store.
///
/// Owns one state value (replaced wholesale on every reduction, never
/// mutated in place), an ordered middleware list, one reducer, and the
/// subscriptions attached to it. Dropping the store cancels every retained
/// subscription, invalidates all outstanding handles, and joins the
/// background delivery thread after draining already-queued deliveries.
///
/// Multiple threads may dispatch concurrently through a shared reference;
/// reductions are applied in the order they acquire the serialization
/// boundary.
///
/// # Example
///
/// ```
/// use uniflow::flow::{Reducer, Store};
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct AppState { count: i64 }
///
/// #[derive(Clone, Debug)]
/// enum AppAction { Increment, Decrement }
///
/// let store = Store::new(
///     AppState { count: 0 },
///     Vec::new(),
///     Reducer::new(|state: AppState, action: &AppAction| match action {
///         AppAction::Increment => AppState { count: state.count + 1 },
///         AppAction::Decrement => AppState { count: state.count - 1 },
///     }),
/// );
///
/// store.dispatch(AppAction::Increment);
/// assert_eq!(store.state().count, 1);
/// ```
pub struct Store<S, A> {
    core: Arc<StoreCore<S, A>>,
    retained: Mutex<Vec<Subscription>>,
    jobs: Sender<Job>,
    worker: Option<JoinHandle<()>>,
}

impl<S, A> Store<S, A>
where
    S: Clone + Send + 'static,
    A: Send + 'static,
{
    /// Creates a store from an initial state, an ordered middleware list,
    /// and a composed reducer.
    #[must_use]
    pub fn new(
        initial_state: S,
        middleware: Vec<Arc<dyn Middleware<S, A>>>,
        reducer: Reducer<S, A>,
    ) -> Self {
        let core = Arc::new(StoreCore {
            reducer,
            state: Arc::new(Mutex::new(initial_state)),
            chain: Arc::new(RwLock::new(Arc::new(|_action: A| {}) as DispatchFn<A>)),
            middleware: RwLock::new(middleware),
            observers: Mutex::new(Vec::new()),
            next_observer_id: AtomicU64::new(0),
        });
        core.rebuild_chain();

        let (jobs, deliveries) = mpsc::channel::<Job>();
        let worker = thread::spawn(move || {
            while let Ok(job) = deliveries.recv() {
                match job {
                    Job::Run(run) => run(),
                    Job::Shutdown => break,
                }
            }
        });

        Self {
            core,
            retained: Mutex::new(Vec::new()),
            jobs,
            worker: Some(worker),
        }
    }

    /// Returns a snapshot of the current committed state.
    #[must_use]
    pub fn state(&self) -> S {
        self.core.state.lock().clone()
    }

    /// Dispatches an action through the middleware chain to the reducer.
    ///
    /// Blocks only for acquiring the serialization boundary and running the
    /// reducer. A panic from user reducer or middleware code propagates to
    /// the caller; the prior state remains committed.
    pub fn dispatch(&self, action: A) {
        tracing::trace!("dispatching action");
        self.core.dispatch(action);
    }

    /// Dispatches each action in order, fully processing one (including
    /// observer notification) before the next begins.
    pub fn dispatch_all<I>(&self, actions: I)
    where
        I: IntoIterator<Item = A>,
    {
        for action in actions {
            self.dispatch(action);
        }
    }

    /// Subscribes to committed states.
    ///
    /// The observer immediately receives the current state, then every
    /// subsequently committed state in commit order, on the thread that
    /// performed the commit. Observers must be fast and must not dispatch
    /// back into the store synchronously; cancelling a subscription from
    /// inside an observer is allowed and takes effect from the next commit.
    ///
    /// Dropping the returned [`Subscription`] cancels delivery.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        self.core.subscribe(observer)
    }

    /// Attaches a declarative plugin.
    ///
    /// On every commit the plugin's transform derives a local state;
    /// consecutive equal values are suppressed, and each distinct value
    /// (including the initial one) is delivered to the plugin body on the
    /// background delivery thread together with a bound dispatcher.
    ///
    /// The subscription is retained for the store's lifetime.
    pub fn attach<L>(&self, plugin: Plugin<S, L, A>)
    where
        L: Clone + PartialEq + Send + 'static,
    {
        let Plugin { transform, body } = plugin;
        let dispatcher = self.core.handle().dispatcher();
        let jobs = self.jobs.clone();
        let last_delivered: Mutex<Option<L>> = Mutex::new(None);

        let subscription = self.core.subscribe(move |state: &S| {
            let local = transform(state);
            let mut last = last_delivered.lock();
            if last.as_ref() == Some(&local) {
                return;
            }
            *last = Some(local.clone());

            let body = Arc::clone(&body);
            let dispatcher = dispatcher.clone();
            let _ = jobs.send(Job::Run(Box::new(move || body(&dispatcher, local))));
        });

        self.retained.lock().push(subscription);
    }

    /// Attaches an independent, store-scoped subscription.
    ///
    /// The factory receives a non-owning [`StoreHandle`]; a returned
    /// [`Subscription`] is retained until the store is dropped. The factory
    /// may return `None` to opt out.
    pub fn attach_with<F>(&self, factory: F)
    where
        F: FnOnce(StoreHandle<S, A>) -> Option<Subscription>,
    {
        if let Some(subscription) = factory(self.core.handle()) {
            self.retained.lock().push(subscription);
        }
    }

    /// Returns a non-owning capability handle for this store.
    #[must_use]
    pub fn handle(&self) -> StoreHandle<S, A> {
        self.core.handle()
    }

    /// Replaces the middleware list and rebuilds the dispatch chain.
    ///
    /// Dispatches already in flight complete with the chain that was active
    /// when they began.
    pub fn set_middleware(&self, middleware: Vec<Arc<dyn Middleware<S, A>>>) {
        *self.core.middleware.write() = middleware;
        self.core.rebuild_chain();
    }

    /// Appends a middleware as the new innermost layer and rebuilds the
    /// dispatch chain.
    pub fn add_middleware(&self, middleware: Arc<dyn Middleware<S, A>>) {
        self.core.middleware.write().push(middleware);
        self.core.rebuild_chain();
    }
}

impl<S, A> Drop for Store<S, A> {
    fn drop(&mut self) {
        for subscription in self.retained.lock().drain(..) {
            subscription.cancel();
        }
        self.core.observers.lock().clear();

        // Deliveries queued before the marker still run.
        let _ = self.jobs.send(Job::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl<S, A> fmt::Debug for Store<S, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Store")
            .field("middleware", &self.core.middleware.read().len())
            .field("observers", &self.core.observers.lock().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    struct CounterState {
        count: i64,
    }

    #[derive(Clone, Debug)]
    enum CounterAction {
        Increment,
        Decrement,
    }

    fn counter_store() -> Store<CounterState, CounterAction> {
        Store::new(
            CounterState { count: 0 },
            Vec::new(),
            Reducer::new(|state: CounterState, action: &CounterAction| match action {
                CounterAction::Increment => CounterState {
                    count: state.count + 1,
                },
                CounterAction::Decrement => CounterState {
                    count: state.count - 1,
                },
            }),
        )
    }

    #[test]
    fn test_dispatch_updates_state() {
        let store = counter_store();
        store.dispatch(CounterAction::Increment);
        assert_eq!(store.state().count, 1);
    }

    #[test]
    fn test_dispatch_all_in_order() {
        let store = counter_store();
        store.dispatch_all([
            CounterAction::Increment,
            CounterAction::Increment,
            CounterAction::Decrement,
        ]);
        assert_eq!(store.state().count, 1);
    }

    #[test]
    fn test_subscriber_receives_current_state_on_attach() {
        let store = counter_store();
        store.dispatch(CounterAction::Increment);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _subscription = store.subscribe(move |state: &CounterState| {
            sink.lock().push(state.count);
        });

        assert_eq!(*seen.lock(), vec![1]);
    }

    #[test]
    fn test_cancelled_subscription_stops_delivery() {
        let store = counter_store();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let subscription = store.subscribe(move |state: &CounterState| {
            sink.lock().push(state.count);
        });

        store.dispatch(CounterAction::Increment);
        subscription.cancel();
        store.dispatch(CounterAction::Increment);

        assert_eq!(*seen.lock(), vec![0, 1]);
    }

    #[test]
    fn test_handle_outlives_store_as_explicit_error() {
        let store = counter_store();
        let handle = store.handle();

        assert!(handle.dispatch(CounterAction::Increment).is_ok());
        assert_eq!(handle.state().map(|s| s.count), Ok(1));

        drop(store);

        assert_eq!(
            handle.dispatch(CounterAction::Increment),
            Err(StoreUnavailable)
        );
        assert_eq!(handle.state(), Err(StoreUnavailable));
    }

    #[test]
    fn test_attach_with_retains_subscription() {
        let store = counter_store();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        store.attach_with(|handle| {
            handle.dispatch(CounterAction::Increment).ok()?;
            sink.lock().push(handle.state().ok()?.count);
            Some(Subscription::new(|| {}))
        });

        assert_eq!(store.state().count, 1);
        assert_eq!(*seen.lock(), vec![1]);
    }

    #[test]
    fn test_attach_with_opt_out() {
        let store = counter_store();
        store.attach_with(|_handle| None);
        assert_eq!(store.retained.lock().len(), 0);
    }
}
