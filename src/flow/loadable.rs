//! A sum type for values that load asynchronously.
//!
//! `Loadable` models the lifecycle of a value produced by a side effect:
//! nothing yet, loading with progress, loaded, or failed. It composes with
//! [`Prism`] so reducers can be lifted to fire only on one phase.

use crate::optics::{FunctionPrism, Prism};

/// The loading lifecycle of a value.
///
/// # Example
///
/// ```
/// use uniflow::flow::Loadable;
///
/// let loaded: Loadable<i32, String> = Loadable::Item(42);
/// assert_eq!(loaded.item(), Some(&42));
/// assert_eq!(loaded.map(|value| value * 2), Loadable::Item(84));
/// ```
#[derive(Clone, PartialEq, Debug)]
pub enum Loadable<T, E> {
    /// No value has been requested yet.
    Empty,
    /// A value is being produced; progress in `0.0..=1.0`.
    Loading(f32),
    /// The value is available.
    Item(T),
    /// Production failed.
    Error(E),
}

impl<T, E> Loadable<T, E> {
    /// Returns a loading value with zero progress.
    #[must_use]
    pub const fn indefinite_loading() -> Self {
        Self::Loading(0.0)
    }

    /// Returns the loaded value, if any.
    #[must_use]
    pub const fn item(&self) -> Option<&T> {
        match self {
            Self::Item(item) => Some(item),
            _ => None,
        }
    }

    /// Returns the loading progress, if currently loading.
    #[must_use]
    pub const fn progress(&self) -> Option<f32> {
        match self {
            Self::Loading(progress) => Some(*progress),
            _ => None,
        }
    }

    /// Returns the failure, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&E> {
        match self {
            Self::Error(error) => Some(error),
            _ => None,
        }
    }

    /// Maps the loaded value, passing the other phases through.
    pub fn map<U, F>(self, transform: F) -> Loadable<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Empty => Loadable::Empty,
            Self::Loading(progress) => Loadable::Loading(progress),
            Self::Item(item) => Loadable::Item(transform(item)),
            Self::Error(error) => Loadable::Error(error),
        }
    }

    /// Chains a loadable-producing function over the loaded value.
    pub fn flat_map<U, F>(self, transform: F) -> Loadable<U, E>
    where
        F: FnOnce(T) -> Loadable<U, E>,
    {
        match self {
            Self::Empty => Loadable::Empty,
            Self::Loading(progress) => Loadable::Loading(progress),
            Self::Item(item) => transform(item),
            Self::Error(error) => Loadable::Error(error),
        }
    }
}

impl<T: Clone, E: Clone> Loadable<T, E> {
    /// Returns the prism focused on the loaded value.
    #[must_use]
    pub fn item_prism() -> impl Prism<Self, T> + Clone {
        FunctionPrism::new(
            |source: &Self| source.item().cloned(),
            |item: T| Self::Item(item),
        )
    }

    /// Returns the prism focused on the loading progress.
    #[must_use]
    pub fn loading_prism() -> impl Prism<Self, f32> + Clone {
        FunctionPrism::new(
            |source: &Self| source.progress(),
            |progress: f32| Self::Loading(progress),
        )
    }

    /// Returns the prism focused on the failure.
    #[must_use]
    pub fn error_prism() -> impl Prism<Self, E> + Clone {
        FunctionPrism::new(
            |source: &Self| source.error().cloned(),
            |error: E| Self::Error(error),
        )
    }
}
