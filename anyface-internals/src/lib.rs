#![no_std]
#![deny(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::missing_docs_in_private_items,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
#![allow(rustdoc::private_intra_doc_links)]
//! Internal implementation crate for [`anyface`].
//!
//! # Overview
//!
//! This crate contains the low-level, type-erased holder and the unsafe
//! operations behind the [`anyface`] container. A value of some concrete type
//! `T` is boxed together with a `&'static` vtable that knows `T`, the
//! interface `I` it is viewed through, and the comparison handler chosen at
//! construction.
//!
//! **This crate is an implementation detail.** No semantic versioning guarantees
//! are provided. Users should depend on the [`anyface`] crate, not this one.
//!
//! # Architecture
//!
//! - **[`holder`]**: Type-erased value storage
//!   - [`RawHolder`]: Owned holder with [`Box`]-based allocation
//!   - [`RawHolderRef`]/[`RawHolderMut`]: Borrowed references (shared/mutable)
//!   - [`HolderData`]: `#[repr(C)]` wrapper enabling field access on erased
//!     types
//!   - [`HolderVtable`]: Function pointers for type-erased dispatch
//!
//! - **[`interface`]**: The [`Implements`] bridge from a concrete type to an
//!   interface trait object, plus the built-in [`Opaque`] interface
//!
//! - **[`handlers`]**: The [`CompareHandler`] trait the public crate
//!   implements once per comparison policy
//!
//! # Safety Strategy
//!
//! When a `HolderData<I, T>` is erased to `HolderData<I, Erased>`, the vtable
//! function pointers must keep matching the concrete type stored in memory.
//! This crate maintains that through:
//!
//! - **Module-based encapsulation**: the pointer and vtable fields are
//!   module-private, so the invariants are verifiable within a single file
//! - **`#[repr(C)]` layout**: the vtable can be read from an erased pointer
//!   without creating a reference of the wrong type
//! - **Documented vtable contracts**: each vtable method states exactly when
//!   it may be called
//!
//! [`anyface`]: https://docs.rs/anyface/latest/anyface/
//! [`HolderData`]: holder::data::HolderData
//! [`HolderVtable`]: holder::vtable::HolderVtable
//! [`CompareHandler`]: handlers::CompareHandler
//! [`Implements`]: interface::Implements
//! [`Opaque`]: interface::Opaque
//! [`Box`]: alloc::boxed::Box

extern crate alloc;

pub mod handlers;
mod holder;
pub mod interface;
mod util;

pub use holder::{RawHolder, RawHolderMut, RawHolderRef};
