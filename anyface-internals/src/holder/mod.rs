//! Module containing the type-erased value holder

pub(crate) mod data;
mod raw;
pub(crate) mod vtable;

pub use self::raw::{RawHolder, RawHolderMut, RawHolderRef};
