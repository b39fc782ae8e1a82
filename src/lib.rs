#![cfg_attr(not(doc), no_std)]
#![deny(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    clippy::as_ptr_cast_mut,
    clippy::ptr_as_ptr,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Type-erased values with a caller-chosen interface and comparison policy.
//!
//! ## Overview
//!
//! [`AnyFace<I, P>`] holds a single value of any concrete type and exposes
//! exactly the operations of the interface `I` against it. The caller never
//! names the concrete type again after construction. What the container can
//! do is fixed by its two type parameters:
//!
//! - **`I`**, the interface: a trait object type such as `dyn Display`, a
//!   trait of your own, or a composite of several traits declared with
//!   [`interfaces!`].
//! - **`P`**, the comparison policy: one of
//!   [`Incomparable`](markers::Incomparable),
//!   [`EqualityOnly`](markers::EqualityOnly),
//!   [`OrderingOnly`](markers::OrderingOnly) or [`Full`](markers::Full).
//!
//! Comparisons work between erased values of *different* concrete types. By
//! default, such values are unequal and ordered by a per-type [`TypeTag`]. A
//! [handler](handlers) can override both for chosen pairs of types, which is
//! how a legacy id type and its replacement can share one ordered map.
//!
//! ## Quick Example
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! use anyface::{AnyFace, implements};
//!
//! pub trait Describe {
//!     fn describe(&self) -> String;
//! }
//!
//! impl Describe for i32 {
//!     fn describe(&self) -> String {
//!         format!("int {self}")
//!     }
//! }
//!
//! impl Describe for String {
//!     fn describe(&self) -> String {
//!         format!("text {self:?}")
//!     }
//! }
//!
//! implements!(dyn Describe => i32, String);
//!
//! type Key = AnyFace<dyn Describe>;
//!
//! let mut map: BTreeMap<Key, &str> = BTreeMap::new();
//! map.insert(Key::new(42), "answer");
//! map.insert(Key::new("42".to_string()), "not the answer");
//!
//! // Different concrete types never collide, even with "equal" contents
//! assert_eq!(map.len(), 2);
//! assert_eq!(map[&Key::new(42)], "answer");
//!
//! for key in map.keys() {
//!     println!("{}", key.call(|k| k.describe()));
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`interface`]: the [`Implements`] bridge and built-in interfaces
//! - [`markers`]: comparison policy markers
//! - [`handlers`]: comparison handlers, including cross-type rules
//! - [`type_tag`]: per-family type identifiers
//! - [`prelude`]: commonly used items
//!
//! ## Features
//!
//! - `std` (default): uses `std::sync::RwLock` for the type tag registry.
//!   Without it the crate is `no_std` (it still needs `alloc`) and uses a
//!   spin lock.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events at `TRACE` level when a type tag is
//! assigned and when two values are ordered by their tags because no rule
//! covers their types.
//!
//! [`tracing`]: https://docs.rs/tracing

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod macros;

pub mod handlers;
pub mod interface;
pub mod markers;
pub mod prelude;
pub mod type_tag;

mod any_face;
mod compare;
mod error;
mod registry_lock;

pub use self::{
    any_face::AnyFace,
    error::EmptyError,
    interface::{Implements, Opaque},
    type_tag::TypeTag,
};
