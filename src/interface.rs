//! Interfaces: what an erased value can do.
//!
//! The interface of an [`AnyFace<I, P>`](crate::AnyFace) is a trait object
//! type `I`. A concrete type can be stored in the container when it
//! implements [`Implements<I>`], which is a one-line declaration generated
//! by [`implements!`](crate::implements!).
//!
//! Built-in interfaces need no declaration:
//!
//! - [`dyn Opaque`](Opaque): no operations. Used when only copying,
//!   comparison and downcasting are wanted.
//! - `dyn Any`, `dyn Debug` and `dyn Display`: every `'static` type with the
//!   corresponding trait.
//!
//! # Composing several interfaces
//!
//! [`interfaces!`](crate::interfaces!) declares a composite trait that
//! inherits any number of interfaces and is implemented for every type that
//! implements all of them:
//!
//! ```
//! use anyface::{AnyFace, implements, interfaces};
//!
//! pub trait Area {
//!     fn area(&self) -> u32;
//! }
//!
//! pub trait Label {
//!     fn label(&self) -> String;
//! }
//!
//! interfaces! {
//!     pub trait Shape: Area + Label;
//! }
//!
//! #[derive(Clone, PartialEq, PartialOrd)]
//! struct Rect(u32, u32);
//!
//! impl Area for Rect {
//!     fn area(&self) -> u32 {
//!         self.0 * self.1
//!     }
//! }
//!
//! impl Label for Rect {
//!     fn label(&self) -> String {
//!         format!("{}x{}", self.0, self.1)
//!     }
//! }
//!
//! implements!(dyn Shape => Rect);
//!
//! let shape: AnyFace<dyn Shape> = AnyFace::new(Rect(2, 3));
//! assert_eq!(shape.call(|s| (s.label(), s.area())), ("2x3".to_string(), 6));
//! ```
//!
//! When two composed interfaces declare a method with the same name, calling
//! it through the composite is ambiguous and fails to compile:
//!
//! ```compile_fail
//! use anyface::{AnyFace, implements, interfaces, markers::Incomparable};
//!
//! pub trait Front {
//!     fn name(&self) -> String;
//! }
//!
//! pub trait Back {
//!     fn name(&self) -> String;
//! }
//!
//! interfaces! {
//!     pub trait Both: Front + Back;
//! }
//!
//! #[derive(Clone)]
//! struct Card;
//!
//! impl Front for Card {
//!     fn name(&self) -> String {
//!         "ace".to_string()
//!     }
//! }
//!
//! impl Back for Card {
//!     fn name(&self) -> String {
//!         "blue".to_string()
//!     }
//! }
//!
//! implements!(dyn Both => Card);
//!
//! let card: AnyFace<dyn Both, Incomparable> = AnyFace::new(Card);
//! card.call(|c| c.name());
//! ```
//!
//! Name the interface explicitly instead:
//!
//! ```
//! # use anyface::{AnyFace, implements, interfaces, markers::Incomparable};
//! # pub trait Front {
//! #     fn name(&self) -> String;
//! # }
//! # pub trait Back {
//! #     fn name(&self) -> String;
//! # }
//! # interfaces! {
//! #     pub trait Both: Front + Back;
//! # }
//! # #[derive(Clone)]
//! # struct Card;
//! # impl Front for Card {
//! #     fn name(&self) -> String {
//! #         "ace".to_string()
//! #     }
//! # }
//! # impl Back for Card {
//! #     fn name(&self) -> String {
//! #         "blue".to_string()
//! #     }
//! # }
//! # implements!(dyn Both => Card);
//! let card: AnyFace<dyn Both, Incomparable> = AnyFace::new(Card);
//!
//! assert_eq!(card.call(|c| Front::name(c)), "ace");
//! assert_eq!(card.call(|c| Back::name(c)), "blue");
//! ```
//!
//! # Forwarding
//!
//! To make an erased value usable with plain method syntax, implement the
//! interface for the container itself and forward through
//! [`call`](crate::AnyFace::call):
//!
//! ```
//! use anyface::{AnyFace, implements, markers::Incomparable};
//!
//! pub trait Speak {
//!     fn speak(&self) -> String;
//! }
//!
//! #[derive(Clone)]
//! struct Dog;
//!
//! impl Speak for Dog {
//!     fn speak(&self) -> String {
//!         "woof".to_string()
//!     }
//! }
//!
//! implements!(dyn Speak => Dog);
//!
//! type Animal = AnyFace<dyn Speak, Incomparable>;
//!
//! impl Speak for Animal {
//!     fn speak(&self) -> String {
//!         self.call(|animal| animal.speak())
//!     }
//! }
//!
//! assert_eq!(Animal::new(Dog).speak(), "woof");
//! ```

pub use anyface_internals::interface::{Implements, Opaque};
