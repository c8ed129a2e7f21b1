//! Unidirectional data flow: reducers, middleware, and the store.
//!
//! This module implements a minimal Redux/Elm-style state-management
//! runtime:
//!
//! - [`Reducer`]: pure state transitions, composable as a monoid and
//!   liftable through optics to sub-state and sub-action spaces
//! - [`Middleware`]: onion layers wrapped around the terminal reducing
//!   step, for logging, async side effects, and action translation
//! - [`Store`]: owns the state, serializes every reduction through one
//!   boundary, and broadcasts committed states to subscribers
//! - [`Plugin`]: derived-state reactive subscribers with
//!   distinct-until-changed delivery
//! - [`Loadable`]: the lifecycle of an asynchronously produced value
//!
//! # Example
//!
//! Two feature reducers lifted into one whole-state reducer:
//!
//! ```
//! use uniflow::flow::{Reducer, Store};
//! use uniflow::{lens, prism};
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct AppState { count: i64, muted: bool }
//!
//! #[derive(Clone, Debug)]
//! enum AppAction { Counter(i64), Muted(bool) }
//!
//! let counter = Reducer::new(|count: i64, delta: &i64| count + delta)
//!     .lift(lens!(AppState, count), prism!(AppAction, Counter));
//! let mute = Reducer::new(|_muted: bool, next: &bool| *next)
//!     .lift(lens!(AppState, muted), prism!(AppAction, Muted));
//!
//! let store = Store::new(
//!     AppState { count: 0, muted: false },
//!     Vec::new(),
//!     counter.then(mute),
//! );
//!
//! store.dispatch(AppAction::Counter(3));
//! store.dispatch(AppAction::Muted(true));
//! assert_eq!(store.state(), AppState { count: 3, muted: true });
//! ```

mod loadable;
mod middleware;
mod plugin;
mod reducer;
mod store;

pub use loadable::Loadable;
pub use middleware::{DispatchFn, Middleware, logging};
pub use plugin::Plugin;
pub use reducer::Reducer;
pub use store::{Dispatcher, StateAccessor, Store, StoreHandle, StoreUnavailable, Subscription};
