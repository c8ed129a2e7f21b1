//! Pure state transitions and their composition.
//!
//! A [`Reducer`] wraps one pure function `(State, &Action) -> State`.
//! Reducers form a monoid under sequential composition: [`Reducer::then`]
//! is the associative operation and [`Reducer::identity`] the unit.
//! [`Reducer::combine`] folds an ordered sequence of reducers into one.
//!
//! Reducers can be lifted to a larger state or action space through a
//! [`Lens`] or [`Prism`], so independently authored feature reducers can be
//! wired into one whole-state reducer without knowing about each other.
//!
//! # Examples
//!
//! ```
//! use uniflow::flow::Reducer;
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction { Increment, Decrement }
//!
//! let counter = Reducer::new(|count: i64, action: &CounterAction| match action {
//!     CounterAction::Increment => count + 1,
//!     CounterAction::Decrement => count - 1,
//! });
//!
//! assert_eq!(counter.reduce(0, &CounterAction::Increment), 1);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::optics::{Lens, Prism};

/// A pure state transition function from current state and an action to the
/// next state.
///
/// `Reducer` is cheap to clone; clones share the same underlying function.
/// Reducers are total: every action must be handled meaningfully or the
/// state passed through unchanged. There is no error channel for reduction.
///
/// # Type Parameters
///
/// - `S`: The state type
/// - `A`: The action type
pub struct Reducer<S, A> {
    run: Arc<dyn Fn(S, &A) -> S + Send + Sync>,
}

impl<S: 'static, A: 'static> Reducer<S, A> {
    /// Creates a reducer from a pure transition function.
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(S, &A) -> S + Send + Sync + 'static,
    {
        Self {
            run: Arc::new(function),
        }
    }

    /// Returns the identity reducer, which returns its input state unchanged
    /// for any action.
    ///
    /// The identity reducer is the two-sided unit of [`Reducer::then`]:
    /// composing it with any reducer `r` yields a reducer behaviorally equal
    /// to `r`.
    #[must_use]
    pub fn identity() -> Self {
        Self::new(|state, _| state)
    }

    /// Computes the next state from the current state and an action.
    #[must_use]
    pub fn reduce(&self, state: S, action: &A) -> S {
        (self.run)(state, action)
    }

    /// Sequentially composes this reducer with another.
    ///
    /// The returned reducer applies `self` first and `other` to its result;
    /// both see the same action. Composition is associative, and order is
    /// significant when both reducers act on the same action.
    ///
    /// # Example
    ///
    /// ```
    /// use uniflow::flow::Reducer;
    ///
    /// let add_one = Reducer::new(|s: i64, _: &()| s + 1);
    /// let double = Reducer::new(|s: i64, _: &()| s * 2);
    ///
    /// assert_eq!(add_one.clone().then(double.clone()).reduce(3, &()), 8);
    /// assert_eq!(double.then(add_one).reduce(3, &()), 7);
    /// ```
    #[must_use]
    pub fn then(self, other: Self) -> Self {
        Self::new(move |state, action| other.reduce(self.reduce(state, action), action))
    }

    /// Folds an ordered sequence of reducers into one, applying them left to
    /// right.
    ///
    /// An empty sequence yields the identity reducer.
    ///
    /// # Example
    ///
    /// ```
    /// use uniflow::flow::Reducer;
    ///
    /// let add_one = Reducer::new(|s: i64, _: &()| s + 1);
    /// let double = Reducer::new(|s: i64, _: &()| s * 2);
    ///
    /// let combined = Reducer::combine([add_one, double]);
    /// assert_eq!(combined.reduce(3, &()), 8);
    /// ```
    #[must_use]
    pub fn combine<I>(reducers: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        reducers
            .into_iter()
            .fold(Self::identity(), |accumulated, next| accumulated.then(next))
    }

    /// Lifts this reducer to a larger state space through a lens.
    ///
    /// The returned reducer reads the sub-state via `lens.get`, runs this
    /// reducer, and writes the result back via `lens.set`. All other parts
    /// of the larger state pass through unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use uniflow::flow::Reducer;
    /// use uniflow::lens;
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// struct AppState { count: i64, flag: bool }
    ///
    /// let counter = Reducer::new(|count: i64, _: &()| count + 1);
    /// let lifted = counter.lift_state(lens!(AppState, count));
    ///
    /// let state = AppState { count: 0, flag: true };
    /// let next = lifted.reduce(state, &());
    /// assert_eq!(next, AppState { count: 1, flag: true });
    /// ```
    pub fn lift_state<W: 'static, L>(self, lens: L) -> Reducer<W, A>
    where
        L: Lens<W, S> + Send + Sync + 'static,
    {
        Reducer::new(move |whole: W, action: &A| {
            let part = lens.get(&whole);
            let updated = self.reduce(part, action);
            lens.set(whole, updated)
        })
    }

    /// Lifts this reducer to a larger action space through a prism.
    ///
    /// The returned reducer fires only when the prism matches the global
    /// action; otherwise the state passes through unchanged. An unmatched
    /// action is not an error.
    ///
    /// # Example
    ///
    /// ```
    /// use uniflow::flow::Reducer;
    /// use uniflow::prism;
    ///
    /// #[derive(Clone, Debug)]
    /// enum AppAction { Counter(i64), Other(String) }
    ///
    /// let counter = Reducer::new(|count: i64, delta: &i64| count + delta);
    /// let lifted = counter.lift_action(prism!(AppAction, Counter));
    ///
    /// assert_eq!(lifted.reduce(1, &AppAction::Counter(5)), 6);
    /// assert_eq!(lifted.reduce(1, &AppAction::Other("ignored".into())), 1);
    /// ```
    pub fn lift_action<B: 'static, P>(self, prism: P) -> Reducer<S, B>
    where
        P: Prism<B, A> + Send + Sync + 'static,
    {
        Reducer::new(move |state: S, global: &B| match prism.preview(global) {
            Some(local) => self.reduce(state, &local),
            None => state,
        })
    }

    /// Lifts this reducer through both a lens and a prism.
    ///
    /// Short-circuits to the unchanged global state when the prism does not
    /// match; otherwise reads and writes the sub-state through the lens
    /// using the unwrapped local action.
    pub fn lift<W: 'static, B: 'static, L, P>(self, lens: L, prism: P) -> Reducer<W, B>
    where
        L: Lens<W, S> + Send + Sync + 'static,
        P: Prism<B, A> + Send + Sync + 'static,
    {
        Reducer::new(move |whole: W, global: &B| match prism.preview(global) {
            Some(local) => {
                let part = lens.get(&whole);
                let updated = self.reduce(part, &local);
                lens.set(whole, updated)
            }
            None => whole,
        })
    }
}

impl<S, A> Clone for Reducer<S, A> {
    fn clone(&self) -> Self {
        Self {
            run: Arc::clone(&self.run),
        }
    }
}

impl<S, A> fmt::Debug for Reducer<S, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Reducer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lens, prism};

    #[derive(Clone, PartialEq, Debug)]
    struct AppState {
        count: i64,
        flag: bool,
    }

    #[derive(Clone, Debug)]
    enum CounterAction {
        Increment,
        Decrement,
    }

    fn counter() -> Reducer<i64, CounterAction> {
        Reducer::new(|count, action| match action {
            CounterAction::Increment => count + 1,
            CounterAction::Decrement => count - 1,
        })
    }

    #[test]
    fn test_reduce() {
        assert_eq!(counter().reduce(0, &CounterAction::Increment), 1);
        assert_eq!(counter().reduce(0, &CounterAction::Decrement), -1);
    }

    #[test]
    fn test_identity_unit() {
        let reducer = counter().then(Reducer::identity());
        assert_eq!(reducer.reduce(4, &CounterAction::Increment), 5);

        let reducer = Reducer::identity().then(counter());
        assert_eq!(reducer.reduce(4, &CounterAction::Increment), 5);
    }

    #[test]
    fn test_then_threads_state() {
        let add_one = Reducer::new(|s: i64, _: &()| s + 1);
        let double = Reducer::new(|s: i64, _: &()| s * 2);
        assert_eq!(add_one.then(double).reduce(3, &()), 8);
    }

    #[test]
    fn test_combine_empty_is_identity() {
        let combined = Reducer::<i64, ()>::combine([]);
        assert_eq!(combined.reduce(42, &()), 42);
    }

    #[test]
    fn test_combine_left_to_right() {
        let add_one = Reducer::new(|s: i64, _: &()| s + 1);
        let double = Reducer::new(|s: i64, _: &()| s * 2);
        let subtract_three = Reducer::new(|s: i64, _: &()| s - 3);

        let combined = Reducer::combine([add_one, double, subtract_three]);
        assert_eq!(combined.reduce(3, &()), 5);
    }

    #[test]
    fn test_lift_state_leaves_rest_unchanged() {
        let lifted = counter().lift_state(lens!(AppState, count));
        let state = AppState {
            count: 0,
            flag: true,
        };

        let next = lifted.reduce(state, &CounterAction::Increment);
        assert_eq!(
            next,
            AppState {
                count: 1,
                flag: true,
            }
        );
    }

    #[test]
    fn test_lift_action_unmatched_passes_through() {
        #[derive(Clone, Debug)]
        enum GlobalAction {
            Counter(CounterAction),
            Unrelated(String),
        }

        let lifted = counter().lift_action(prism!(GlobalAction, Counter));

        assert_eq!(
            lifted.reduce(0, &GlobalAction::Counter(CounterAction::Increment)),
            1
        );
        assert_eq!(lifted.reduce(0, &GlobalAction::Unrelated("x".into())), 0);
    }

    #[test]
    fn test_lift_lens_and_prism() {
        #[derive(Clone, Debug)]
        enum GlobalAction {
            Counter(CounterAction),
            Unrelated(String),
        }

        let lifted = counter().lift(lens!(AppState, count), prism!(GlobalAction, Counter));
        let state = AppState {
            count: 2,
            flag: false,
        };

        let next = lifted.reduce(
            state.clone(),
            &GlobalAction::Counter(CounterAction::Decrement),
        );
        assert_eq!(
            next,
            AppState {
                count: 1,
                flag: false,
            }
        );

        let unchanged = lifted.reduce(state.clone(), &GlobalAction::Unrelated("x".into()));
        assert_eq!(unchanged, state);
    }
}
