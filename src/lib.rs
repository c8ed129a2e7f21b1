//! # uniflow
//!
//! A unidirectional data flow library for Rust providing optics,
//! composable reducers, and a middleware-driven store.
//!
//! ## Overview
//!
//! This library implements a minimal Redux/Elm-style state-management
//! runtime together with the optics needed to wire independently authored
//! feature reducers into one whole-state reducer:
//!
//! - **Optics**: Lens and Prism for immutable sub-state addressing
//! - **Function Composition**: identity, constant, compose, optional zipping
//! - **Flow**: Reducer composition, middleware-chain dispatch, and a
//!   `Store` that serializes all state mutations through one boundary
//!
//! ## Feature Flags
//!
//! - `optics`: Lens and Prism optics
//! - `compose`: Function composition utilities
//! - `flow`: Reducer, Middleware, Store, Plugin (implies `optics`)
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use uniflow::flow::{Reducer, Store};
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct AppState { count: i64 }
//!
//! #[derive(Clone, Debug)]
//! enum AppAction { Increment, Decrement }
//!
//! let reducer = Reducer::new(|state: AppState, action: &AppAction| match action {
//!     AppAction::Increment => AppState { count: state.count + 1 },
//!     AppAction::Decrement => AppState { count: state.count - 1 },
//! });
//!
//! let store = Store::new(AppState { count: 0 }, Vec::new(), reducer);
//! store.dispatch_all([AppAction::Increment, AppAction::Increment, AppAction::Decrement]);
//! assert_eq!(store.state().count, 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use uniflow::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "optics")]
    pub use crate::optics::*;

    #[cfg(feature = "compose")]
    pub use crate::compose::*;

    #[cfg(feature = "flow")]
    pub use crate::flow::*;
}

#[cfg(feature = "optics")]
pub mod optics;

#[cfg(feature = "compose")]
pub mod compose;

#[cfg(feature = "flow")]
pub mod flow;
