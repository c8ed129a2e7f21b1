//! Helper functions (combinators) for function composition.
//!
//! This module provides fundamental combinators commonly used in functional
//! code:
//!
//! - [`identity`]: The identity function (I combinator)
//! - [`constant`]: Creates a function that always returns the same value (K combinator)
//! - [`compose`]: Left-to-right function composition
//! - [`compose_option`]: Left-to-right composition of partial functions
//! - [`zip2`] / [`zip3`]: Combine optionals into an optional tuple

/// Returns the value unchanged.
///
/// The identity function is the unit element of function composition:
/// `compose(identity, f)` and `compose(f, identity)` are both equivalent
/// to `f`.
///
/// # Examples
///
/// ```
/// use uniflow::compose::identity;
///
/// assert_eq!(identity(42), 42);
/// assert_eq!(identity("hello"), "hello");
/// ```
#[inline]
pub fn identity<T>(value: T) -> T {
    value
}

/// Creates a function that always returns the given value, ignoring its input.
///
/// Also known as the K combinator.
///
/// # Examples
///
/// ```
/// use uniflow::compose::constant;
///
/// let always_five = constant::<_, i32>(5);
/// assert_eq!(always_five(100), 5);
///
/// let zeros: Vec<i32> = vec![1, 2, 3].into_iter().map(constant(0)).collect();
/// assert_eq!(zeros, vec![0, 0, 0]);
/// ```
#[inline]
pub fn constant<T: Clone, U>(value: T) -> impl Fn(U) -> T {
    move |_| value.clone()
}

/// Composes two functions left to right.
///
/// `compose(f, g)` returns a function applying `f` first and `g` to its
/// result.
///
/// # Examples
///
/// ```
/// use uniflow::compose::compose;
///
/// let double = |x: i32| x * 2;
/// let increment = |x: i32| x + 1;
///
/// let double_then_increment = compose(double, increment);
/// assert_eq!(double_then_increment(5), 11);
/// ```
#[inline]
pub fn compose<A, B, C>(first: impl Fn(A) -> B, second: impl Fn(B) -> C) -> impl Fn(A) -> C {
    move |input| second(first(input))
}

/// Composes two partial functions left to right, short-circuiting on `None`.
///
/// # Examples
///
/// ```
/// use uniflow::compose::compose_option;
///
/// let parse = |s: &str| s.parse::<i32>().ok();
/// let half = |x: i32| if x % 2 == 0 { Some(x / 2) } else { None };
///
/// let parse_then_half = compose_option(parse, half);
/// assert_eq!(parse_then_half("42"), Some(21));
/// assert_eq!(parse_then_half("43"), None);
/// assert_eq!(parse_then_half("oops"), None);
/// ```
#[inline]
pub fn compose_option<A, B, C>(
    first: impl Fn(A) -> Option<B>,
    second: impl Fn(B) -> Option<C>,
) -> impl Fn(A) -> Option<C> {
    move |input| first(input).and_then(&second)
}

/// Combines two optionals into one optional pair.
///
/// Returns `Some` only when both inputs are `Some`.
///
/// # Examples
///
/// ```
/// use uniflow::compose::zip2;
///
/// assert_eq!(zip2(Some(1), Some("a")), Some((1, "a")));
/// assert_eq!(zip2(Some(1), None::<&str>), None);
/// ```
#[inline]
pub fn zip2<A, B>(first: Option<A>, second: Option<B>) -> Option<(A, B)> {
    first.and_then(|a| second.map(|b| (a, b)))
}

/// Combines three optionals into one optional triple.
///
/// Returns `Some` only when all inputs are `Some`.
///
/// # Examples
///
/// ```
/// use uniflow::compose::zip3;
///
/// assert_eq!(zip3(Some(1), Some(2), Some(3)), Some((1, 2, 3)));
/// assert_eq!(zip3(Some(1), None::<i32>, Some(3)), None);
/// ```
#[inline]
pub fn zip3<A, B, C>(first: Option<A>, second: Option<B>, third: Option<C>) -> Option<(A, B, C)> {
    first.and_then(|a| second.and_then(|b| third.map(|c| (a, b, c))))
}
