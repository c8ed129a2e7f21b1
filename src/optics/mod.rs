//! Optics for immutable data manipulation.
//!
//! This module provides composable accessors for immutable data structures.
//! Optics focus on specific parts of a value, enabling type-safe reading and
//! updating of deeply nested fields without mutation.
//!
//! # Available Optics
//!
//! - [`Lens`]: Focus on a single field (get/set access)
//! - [`Prism`]: Focus on a variant of a sum type (preview/review access)
//!
//! # Example with Lens
//!
//! ```
//! use uniflow::optics::Lens;
//! use uniflow::lens;
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Address { street: String, city: String }
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Person { name: String, address: Address }
//!
//! let person_street = lens!(Person, address).compose(lens!(Address, street));
//!
//! let person = Person {
//!     name: "Alice".to_string(),
//!     address: Address {
//!         street: "Main St".to_string(),
//!         city: "Tokyo".to_string(),
//!     },
//! };
//!
//! assert_eq!(person_street.get(&person), "Main St");
//!
//! let updated = person_street.set(person, "Oak Ave".to_string());
//! assert_eq!(updated.address.street, "Oak Ave");
//! assert_eq!(updated.address.city, "Tokyo");
//! ```
//!
//! # Example with Prism
//!
//! ```
//! use uniflow::optics::Prism;
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
//! assert_eq!(circle_prism.preview(&Shape::Circle(5.0)), Some(5.0));
//! assert_eq!(circle_prism.preview(&Shape::Rectangle(3.0, 4.0)), None);
//! ```

mod lens;
mod prism;

pub use lens::{ComposedLens, FunctionLens, Lens, PairLens};
pub use prism::{ComposedPrism, FunctionPrism, Prism, some};
