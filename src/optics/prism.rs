//! Prism optics for focusing on enum variants.
//!
//! A Prism is a partial bidirectional accessor for one variant of a
//! sum-typed value. Unlike a Lens which always succeeds, a Prism may fail
//! to extract a value if the source is not the expected variant.
//!
//! # Laws
//!
//! Every Prism must satisfy two laws:
//!
//! 1. **PreviewReview Law**: Reviewing then previewing yields the original value.
//!    ```text
//!    prism.preview(&prism.review(value)) == Some(value)
//!    ```
//!
//! 2. **ReviewPreview Law**: If preview succeeds, reviewing the result yields
//!    the original source.
//!    ```text
//!    if let Some(value) = prism.preview(&source) {
//!        prism.review(value) == source
//!    }
//!    ```
//!
//! # Examples
//!
//! ```
//! use uniflow::optics::{Prism, FunctionPrism};
//! use uniflow::prism;
//!
//! #[derive(Clone, PartialEq, Debug)]
//! enum Shape {
//!     Circle(f64),
//!     Rectangle(f64, f64),
//! }
//!
//! let circle_prism = prism!(Shape, Circle);
//!
//! let circle = Shape::Circle(5.0);
//! assert_eq!(circle_prism.preview(&circle), Some(5.0));
//!
//! let rect = Shape::Rectangle(3.0, 4.0);
//! assert_eq!(circle_prism.preview(&rect), None);
//!
//! let constructed = circle_prism.review(10.0);
//! assert!(matches!(constructed, Shape::Circle(r) if (r - 10.0).abs() < 1e-10));
//! ```

use std::marker::PhantomData;

/// A Prism focuses on a single variant of a sum type.
///
/// # Type Parameters
///
/// - `S`: The source type (the whole sum)
/// - `A`: The target type (the value inside the variant)
///
/// # Laws
///
/// 1. **PreviewReview Law**: `prism.preview(&prism.review(value)) == Some(value)`
/// 2. **ReviewPreview Law**: if preview succeeds, reviewing the extracted
///    value reconstructs the original source
pub trait Prism<S, A> {
    /// Attempts to extract the value from the source.
    ///
    /// Returns `Some` if the source is the expected variant, `None` otherwise.
    fn preview(&self, source: &S) -> Option<A>;

    /// Constructs the source from a value.
    ///
    /// Always succeeds, creating the expected variant from the given value.
    fn review(&self, value: A) -> S;

    /// Modifies the value if the source is the expected variant, or returns
    /// the source unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use uniflow::optics::Prism;
    /// use uniflow::prism;
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// enum Shape {
    ///     Circle(f64),
    ///     Rectangle(f64, f64),
    /// }
    ///
    /// let circle_prism = prism!(Shape, Circle);
    ///
    /// let doubled = circle_prism.modify_or_identity(Shape::Circle(5.0), |r| r * 2.0);
    /// assert!(matches!(doubled, Shape::Circle(r) if (r - 10.0).abs() < 1e-10));
    ///
    /// let rect = Shape::Rectangle(3.0, 4.0);
    /// let unchanged = circle_prism.modify_or_identity(rect.clone(), |r| r * 2.0);
    /// assert_eq!(unchanged, rect);
    /// ```
    fn modify_or_identity<F>(&self, source: S, function: F) -> S
    where
        F: FnOnce(A) -> A,
    {
        match self.preview(&source) {
            Some(value) => self.review(function(value)),
            None => source,
        }
    }

    /// Composes this prism with a prism into the focused variant, yielding
    /// a prism on the nested variant.
    ///
    /// # Example
    ///
    /// ```
    /// use uniflow::optics::Prism;
    /// use uniflow::prism;
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// enum Inner { Value(i32), Nothing }
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// enum Outer { Inner(Inner), Empty }
    ///
    /// let outer_value = prism!(Outer, Inner).compose(prism!(Inner, Value));
    ///
    /// let data = Outer::Inner(Inner::Value(42));
    /// assert_eq!(outer_value.preview(&data), Some(42));
    /// assert_eq!(outer_value.review(7), Outer::Inner(Inner::Value(7)));
    /// ```
    fn compose<B, P>(self, other: P) -> ComposedPrism<Self, P, A>
    where
        Self: Sized,
        P: Prism<A, B>,
    {
        ComposedPrism::new(self, other)
    }
}

/// A prism implemented using preview and review functions.
///
/// This is the most common way to create a prism. The `prism!` macro
/// generates a `FunctionPrism` internally.
///
/// # Example
///
/// ```
/// use uniflow::optics::{Prism, FunctionPrism};
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Shape {
///     Circle(f64),
///     Rectangle(f64, f64),
/// }
///
/// let circle_prism = FunctionPrism::new(
///     |shape: &Shape| match shape {
///         Shape::Circle(radius) => Some(*radius),
///         _ => None,
///     },
///     |radius: f64| Shape::Circle(radius),
/// );
///
/// let circle = Shape::Circle(5.0);
/// assert_eq!(circle_prism.preview(&circle), Some(5.0));
/// ```
pub struct FunctionPrism<S, A, Pr, Re>
where
    Pr: Fn(&S) -> Option<A>,
    Re: Fn(A) -> S,
{
    preview_function: Pr,
    review_function: Re,
    _marker: PhantomData<(S, A)>,
}

impl<S, A, Pr, Re> FunctionPrism<S, A, Pr, Re>
where
    Pr: Fn(&S) -> Option<A>,
    Re: Fn(A) -> S,
{
    /// Creates a new `FunctionPrism` from preview and review functions.
    #[must_use]
    pub const fn new(preview_function: Pr, review_function: Re) -> Self {
        Self {
            preview_function,
            review_function,
            _marker: PhantomData,
        }
    }
}

impl<S, A, Pr, Re> Prism<S, A> for FunctionPrism<S, A, Pr, Re>
where
    Pr: Fn(&S) -> Option<A>,
    Re: Fn(A) -> S,
{
    fn preview(&self, source: &S) -> Option<A> {
        (self.preview_function)(source)
    }

    fn review(&self, value: A) -> S {
        (self.review_function)(value)
    }
}

impl<S, A, Pr, Re> Clone for FunctionPrism<S, A, Pr, Re>
where
    Pr: Fn(&S) -> Option<A> + Clone,
    Re: Fn(A) -> S + Clone,
{
    fn clone(&self) -> Self {
        Self {
            preview_function: self.preview_function.clone(),
            review_function: self.review_function.clone(),
            _marker: PhantomData,
        }
    }
}

impl<S, A, Pr, Re> std::fmt::Debug for FunctionPrism<S, A, Pr, Re>
where
    Pr: Fn(&S) -> Option<A>,
    Re: Fn(A) -> S,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("FunctionPrism")
            .finish_non_exhaustive()
    }
}

/// A prism composed of two prisms.
///
/// Matches only when both the outer and the inner prism match.
///
/// # Type Parameters
///
/// - `P1`: The type of the outer prism
/// - `P2`: The type of the inner prism
/// - `A`: The intermediate type (target of P1, source of P2)
pub struct ComposedPrism<P1, P2, A> {
    first: P1,
    second: P2,
    _marker: PhantomData<A>,
}

impl<P1, P2, A> ComposedPrism<P1, P2, A> {
    /// Creates a new composed prism from an outer and an inner prism.
    #[must_use]
    pub const fn new(first: P1, second: P2) -> Self {
        Self {
            first,
            second,
            _marker: PhantomData,
        }
    }
}

impl<S, A, B, P1, P2> Prism<S, B> for ComposedPrism<P1, P2, A>
where
    P1: Prism<S, A>,
    P2: Prism<A, B>,
{
    fn preview(&self, source: &S) -> Option<B> {
        self.first
            .preview(source)
            .and_then(|intermediate| self.second.preview(&intermediate))
    }

    fn review(&self, value: B) -> S {
        self.first.review(self.second.review(value))
    }
}

impl<P1: Clone, P2: Clone, A> Clone for ComposedPrism<P1, P2, A> {
    fn clone(&self) -> Self {
        Self {
            first: self.first.clone(),
            second: self.second.clone(),
            _marker: PhantomData,
        }
    }
}

impl<P1: std::fmt::Debug, P2: std::fmt::Debug, A> std::fmt::Debug for ComposedPrism<P1, P2, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ComposedPrism")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}

/// Returns the prism treating `Option<T>` as a two-variant sum, focused on
/// the present variant.
///
/// Any optional value can participate in prism composition this way.
///
/// # Example
///
/// ```
/// use uniflow::optics::{Prism, some};
///
/// let present = some::<i32>();
///
/// assert_eq!(present.preview(&Some(5)), Some(5));
/// assert_eq!(present.preview(&None), None);
/// assert_eq!(present.review(7), Some(7));
/// ```
#[must_use]
pub fn some<T: Clone>() -> impl Prism<Option<T>, T> + Clone {
    FunctionPrism::new(|source: &Option<T>| source.clone(), |value: T| Some(value))
}

/// Creates a prism for an enum variant.
///
/// This macro generates a [`FunctionPrism`] that focuses on the specified
/// variant of the given enum type.
///
/// # Syntax
///
/// ```text
/// prism!(EnumType, VariantName)
/// prism!(EnumType<T, ...>, VariantName)
/// ```
///
/// # Limitations
///
/// This macro only works with tuple variants holding a single `Clone` value.
/// For variants with multiple fields or named fields, use
/// [`FunctionPrism::new`] directly.
///
/// # Example
///
/// ```
/// use uniflow::optics::Prism;
/// use uniflow::prism;
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum MyOption<T> {
///     Some(T),
///     None,
/// }
///
/// let some_prism = prism!(MyOption<i32>, Some);
///
/// assert_eq!(some_prism.preview(&MyOption::Some(42)), Some(42));
/// assert_eq!(some_prism.preview(&MyOption::None), None);
/// assert_eq!(some_prism.review(100), MyOption::Some(100));
/// ```
#[macro_export]
macro_rules! prism {
    ($enum_type:ident, $variant:ident) => {
        $crate::optics::FunctionPrism::new(
            |source: &$enum_type| match source {
                $enum_type::$variant(value) => Some(value.clone()),
                #[allow(unreachable_patterns)]
                _ => None,
            },
            |value| $enum_type::$variant(value),
        )
    };
    ($enum_type:ident < $($generic:tt),+ >, $variant:ident) => {
        $crate::optics::FunctionPrism::new(
            |source: &$enum_type<$($generic),+>| match source {
                $enum_type::$variant(value) => Some(value.clone()),
                #[allow(unreachable_patterns)]
                _ => None,
            },
            |value| $enum_type::$variant(value),
        )
    };
}
