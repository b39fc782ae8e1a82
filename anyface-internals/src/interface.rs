//! Views of concrete values as interface trait objects.
//!
//! The holder vtable needs to turn a `&T` into a `&I` where `I` is a trait
//! object type such as `dyn Display`. Unsizing coercions cannot be expressed
//! generically over `I` on stable Rust, so every concrete type states the
//! conversion through [`Implements`]. The body of both methods is always just
//! `self`.

use core::{
    any::Any,
    fmt::{Debug, Display},
};

/// A concrete type that can be viewed as the interface `I`.
///
/// Implementations for user interfaces are normally generated with the
/// `implements!` macro of the public crate.
///
/// # Examples
///
/// ```
/// use anyface_internals::interface::Implements;
///
/// trait Area {
///     fn area(&self) -> f64;
/// }
///
/// #[derive(Clone)]
/// struct Square(f64);
///
/// impl Area for Square {
///     fn area(&self) -> f64 {
///         self.0 * self.0
///     }
/// }
///
/// impl Implements<dyn Area> for Square {
///     fn as_interface(&self) -> &(dyn Area + 'static) {
///         self
///     }
///
///     fn as_interface_mut(&mut self) -> &mut (dyn Area + 'static) {
///         self
///     }
/// }
///
/// assert_eq!(Implements::<dyn Area>::as_interface(&Square(3.0)).area(), 9.0);
/// ```
pub trait Implements<I: ?Sized + 'static>: 'static {
    /// Views `self` as the interface.
    fn as_interface(&self) -> &I;

    /// Views `self` mutably as the interface.
    fn as_interface_mut(&mut self) -> &mut I;
}

/// The empty interface: every type implements it and it offers no
/// operations.
///
/// Containers erased behind `dyn Opaque` can still be cloned, compared and
/// downcast, which is what the zero-interface case needs.
pub trait Opaque {}

impl<T: ?Sized> Opaque for T {}

impl<T: 'static> Implements<dyn Opaque> for T {
    #[inline]
    fn as_interface(&self) -> &(dyn Opaque + 'static) {
        self
    }

    #[inline]
    fn as_interface_mut(&mut self) -> &mut (dyn Opaque + 'static) {
        self
    }
}

impl<T: Any> Implements<dyn Any> for T {
    #[inline]
    fn as_interface(&self) -> &(dyn Any + 'static) {
        self
    }

    #[inline]
    fn as_interface_mut(&mut self) -> &mut (dyn Any + 'static) {
        self
    }
}

impl<T: Debug + 'static> Implements<dyn Debug> for T {
    #[inline]
    fn as_interface(&self) -> &(dyn Debug + 'static) {
        self
    }

    #[inline]
    fn as_interface_mut(&mut self) -> &mut (dyn Debug + 'static) {
        self
    }
}

impl<T: Display + 'static> Implements<dyn Display> for T {
    #[inline]
    fn as_interface(&self) -> &(dyn Display + 'static) {
        self
    }

    #[inline]
    fn as_interface_mut(&mut self) -> &mut (dyn Display + 'static) {
        self
    }
}
