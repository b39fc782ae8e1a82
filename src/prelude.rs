//! Commonly used items for convenient importing.
//!
//! # Usage
//!
//! ```rust
//! use anyface::prelude::*;
//!
//! pub trait Area {
//!     fn area(&self) -> f64;
//! }
//!
//! #[derive(Clone, PartialEq, PartialOrd)]
//! struct Square(f64);
//!
//! impl Area for Square {
//!     fn area(&self) -> f64 {
//!         self.0 * self.0
//!     }
//! }
//!
//! implements!(dyn Area => Square);
//!
//! let shape: AnyFace<dyn Area, markers::EqualityOnly> = AnyFace::new(Square(1.5));
//! assert_eq!(shape.call(|s| s.area()), 2.25);
//! ```
//!
//! # What's Included
//!
//! - **[`AnyFace`]**: The erased value container
//! - **[`Implements`]**: The bridge from a concrete type to an interface
//! - **[`implements!`]** and **[`interfaces!`]**: Macros declaring interface
//!   support and composite interfaces
//! - **[`handlers`]**: Comparison handlers
//! - **[`markers`]**: Comparison policy markers

pub use crate::{AnyFace, Implements, handlers, implements, interfaces, markers};
