//! Lens optics for focusing on struct fields.
//!
//! A Lens is a bidirectional accessor for a sub-value inside a whole value.
//! Lenses are composable, allowing access to deeply nested fields, and two
//! lenses over the same whole can be paired into a lens on a tuple.
//!
//! # Laws
//!
//! Every Lens must satisfy three laws:
//!
//! 1. **GetPut Law**: Getting and setting back yields the original.
//!    ```text
//!    lens.set(source, lens.get(&source)) == source
//!    ```
//!
//! 2. **PutGet Law**: Setting then getting yields the set value.
//!    ```text
//!    lens.get(&lens.set(source, value)) == value
//!    ```
//!
//! 3. **PutPut Law**: Two consecutive sets is equivalent to the last set.
//!    ```text
//!    lens.set(lens.set(source, v1), v2) == lens.set(source, v2)
//!    ```
//!
//! # Examples
//!
//! ```
//! use uniflow::optics::{Lens, FunctionLens};
//! use uniflow::lens;
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Point { x: i32, y: i32 }
//!
//! let x_lens = lens!(Point, x);
//!
//! let point = Point { x: 10, y: 20 };
//! assert_eq!(x_lens.get(&point), 10);
//!
//! let updated = x_lens.set(point, 100);
//! assert_eq!(updated.x, 100);
//! ```

use std::marker::PhantomData;

/// A Lens focuses on a single part within a larger structure.
///
/// `get` returns the part by value (implementations clone), which lets
/// derived lenses such as [`PairLens`] synthesize parts that do not exist
/// contiguously in the source.
///
/// # Type Parameters
///
/// - `S`: The source type (the whole structure)
/// - `A`: The target type (the focused part)
///
/// # Laws
///
/// 1. **GetPut Law**: `lens.set(source, lens.get(&source)) == source`
/// 2. **PutGet Law**: `lens.get(&lens.set(source, value)) == value`
/// 3. **PutPut Law**: `lens.set(lens.set(source, v1), v2) == lens.set(source, v2)`
pub trait Lens<S, A> {
    /// Extracts the focused part from the source.
    fn get(&self, source: &S) -> A;

    /// Sets the focused part to a new value, returning a new source.
    ///
    /// All other parts of the source are passed through unchanged.
    fn set(&self, source: S, value: A) -> S;

    /// Modifies the focused part by applying a function.
    ///
    /// Equivalent to getting the current value, applying the function,
    /// and setting the result.
    ///
    /// # Example
    ///
    /// ```
    /// use uniflow::optics::Lens;
    /// use uniflow::lens;
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// struct Point { x: i32, y: i32 }
    ///
    /// let x_lens = lens!(Point, x);
    /// let point = Point { x: 10, y: 20 };
    /// let doubled = x_lens.modify(point, |x| x * 2);
    /// assert_eq!(doubled.x, 20);
    /// ```
    fn modify<F>(&self, source: S, function: F) -> S
    where
        F: FnOnce(A) -> A,
    {
        let current = self.get(&source);
        self.set(source, function(current))
    }

    /// Composes this lens with a lens into the focused part, yielding a
    /// lens on the nested part.
    ///
    /// # Example
    ///
    /// ```
    /// use uniflow::optics::Lens;
    /// use uniflow::lens;
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// struct Inner { value: i32 }
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// struct Outer { inner: Inner }
    ///
    /// let inner_lens = lens!(Outer, inner);
    /// let value_lens = lens!(Inner, value);
    /// let outer_value = inner_lens.compose(value_lens);
    ///
    /// let data = Outer { inner: Inner { value: 42 } };
    /// assert_eq!(outer_value.get(&data), 42);
    /// ```
    fn compose<B, L>(self, other: L) -> ComposedLens<Self, L, A>
    where
        Self: Sized,
        L: Lens<A, B>,
    {
        ComposedLens::new(self, other)
    }

    /// Pairs this lens with another lens over the same source, yielding a
    /// lens on the tuple of both parts.
    ///
    /// The pair lens is lawful only when the two lenses focus on disjoint
    /// parts of the source.
    ///
    /// # Example
    ///
    /// ```
    /// use uniflow::optics::Lens;
    /// use uniflow::lens;
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// struct Point { x: i32, y: i32 }
    ///
    /// let both = lens!(Point, x).pair(lens!(Point, y));
    ///
    /// let point = Point { x: 1, y: 2 };
    /// assert_eq!(both.get(&point), (1, 2));
    ///
    /// let moved = both.set(point, (10, 20));
    /// assert_eq!(moved, Point { x: 10, y: 20 });
    /// ```
    fn pair<B, L>(self, other: L) -> PairLens<Self, L>
    where
        Self: Sized,
        L: Lens<S, B>,
    {
        PairLens::new(self, other)
    }
}

/// A lens implemented using getter and setter functions.
///
/// This is the most common way to create a lens. The `lens!` macro
/// generates a `FunctionLens` internally.
///
/// # Example
///
/// ```
/// use uniflow::optics::{Lens, FunctionLens};
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let x_lens = FunctionLens::new(
///     |point: &Point| point.x,
///     |point: Point, x: i32| Point { x, ..point },
/// );
///
/// let point = Point { x: 10, y: 20 };
/// assert_eq!(x_lens.get(&point), 10);
/// ```
pub struct FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> A,
    St: Fn(S, A) -> S,
{
    getter: G,
    setter: St,
    _marker: PhantomData<(S, A)>,
}

impl<S, A, G, St> FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> A,
    St: Fn(S, A) -> S,
{
    /// Creates a new `FunctionLens` from a getter and setter.
    #[must_use]
    pub const fn new(getter: G, setter: St) -> Self {
        Self {
            getter,
            setter,
            _marker: PhantomData,
        }
    }
}

impl<S, A, G, St> Lens<S, A> for FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> A,
    St: Fn(S, A) -> S,
{
    fn get(&self, source: &S) -> A {
        (self.getter)(source)
    }

    fn set(&self, source: S, value: A) -> S {
        (self.setter)(source, value)
    }
}

impl<S, A, G, St> Clone for FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> A + Clone,
    St: Fn(S, A) -> S + Clone,
{
    fn clone(&self) -> Self {
        Self {
            getter: self.getter.clone(),
            setter: self.setter.clone(),
            _marker: PhantomData,
        }
    }
}

impl<S, A, G, St> std::fmt::Debug for FunctionLens<S, A, G, St>
where
    G: Fn(&S) -> A,
    St: Fn(S, A) -> S,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("FunctionLens")
            .finish_non_exhaustive()
    }
}

/// A lens composed of two lenses.
///
/// Focuses on a field nested inside an intermediate structure by running the
/// outer lens first and the inner lens on its result.
///
/// # Type Parameters
///
/// - `L1`: The type of the outer lens
/// - `L2`: The type of the inner lens
/// - `A`: The intermediate type (target of L1, source of L2)
pub struct ComposedLens<L1, L2, A> {
    first: L1,
    second: L2,
    _marker: PhantomData<A>,
}

impl<L1, L2, A> ComposedLens<L1, L2, A> {
    /// Creates a new composed lens from an outer and an inner lens.
    #[must_use]
    pub const fn new(first: L1, second: L2) -> Self {
        Self {
            first,
            second,
            _marker: PhantomData,
        }
    }
}

impl<S, A, B, L1, L2> Lens<S, B> for ComposedLens<L1, L2, A>
where
    L1: Lens<S, A>,
    L2: Lens<A, B>,
{
    fn get(&self, source: &S) -> B {
        let intermediate = self.first.get(source);
        self.second.get(&intermediate)
    }

    fn set(&self, source: S, value: B) -> S {
        let intermediate = self.first.get(&source);
        let updated = self.second.set(intermediate, value);
        self.first.set(source, updated)
    }
}

impl<L1: Clone, L2: Clone, A> Clone for ComposedLens<L1, L2, A> {
    fn clone(&self) -> Self {
        Self {
            first: self.first.clone(),
            second: self.second.clone(),
            _marker: PhantomData,
        }
    }
}

impl<L1: std::fmt::Debug, L2: std::fmt::Debug, A> std::fmt::Debug for ComposedLens<L1, L2, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ComposedLens")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}

/// Two lenses over the same source combined into a lens on a tuple.
///
/// Setting writes the second component first and the first component last,
/// so when the foci overlap the first lens wins. Lawful pair lenses require
/// disjoint foci.
pub struct PairLens<L1, L2> {
    first: L1,
    second: L2,
}

impl<L1, L2> PairLens<L1, L2> {
    /// Creates a new pair lens from two lenses over the same source.
    #[must_use]
    pub const fn new(first: L1, second: L2) -> Self {
        Self { first, second }
    }
}

impl<S, A, B, L1, L2> Lens<S, (A, B)> for PairLens<L1, L2>
where
    L1: Lens<S, A>,
    L2: Lens<S, B>,
{
    fn get(&self, source: &S) -> (A, B) {
        (self.first.get(source), self.second.get(source))
    }

    fn set(&self, source: S, value: (A, B)) -> S {
        let (a, b) = value;
        self.first.set(self.second.set(source, b), a)
    }
}

impl<L1: Clone, L2: Clone> Clone for PairLens<L1, L2> {
    fn clone(&self) -> Self {
        Self {
            first: self.first.clone(),
            second: self.second.clone(),
        }
    }
}

impl<L1: std::fmt::Debug, L2: std::fmt::Debug> std::fmt::Debug for PairLens<L1, L2> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("PairLens")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}

/// Creates a lens for a struct field.
///
/// This macro generates a [`FunctionLens`] that focuses on the specified
/// field of the given struct type. The field type must implement `Clone`.
///
/// # Syntax
///
/// ```text
/// lens!(StructType, field_name)
/// ```
///
/// # Example
///
/// ```
/// use uniflow::optics::Lens;
/// use uniflow::lens;
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let x_lens = lens!(Point, x);
///
/// let point = Point { x: 10, y: 20 };
/// assert_eq!(x_lens.get(&point), 10);
///
/// let updated = x_lens.set(point, 100);
/// assert_eq!(updated, Point { x: 100, y: 20 });
/// ```
#[macro_export]
macro_rules! lens {
    ($struct_type:ty, $field:ident) => {
        $crate::optics::FunctionLens::new(
            |source: &$struct_type| source.$field.clone(),
            |mut source: $struct_type, value| {
                source.$field = value;
                source
            },
        )
    };
}
