//! Handlers that decide how erased values are compared.
//!
//! Comparison of two [`AnyFace`](crate::AnyFace) values goes through the
//! handler the left-hand value was constructed with. A handler is a type that
//! implements [`EqualityHandler<T>`] and/or [`OrderingHandler<T>`] for the
//! concrete types it knows about. Which of the two traits are needed depends
//! on the comparison policy of the container; see [`markers`](crate::markers).
//!
//! # Same-type and cross-type comparisons
//!
//! When both operands hold the same concrete type, the handler's
//! [`equals`](EqualityHandler::equals) or [`less`](OrderingHandler::less) is
//! called with both values.
//!
//! When the operands hold different types, the handler's
//! [`equals_foreign`](EqualityHandler::equals_foreign) or
//! [`less_foreign`](OrderingHandler::less_foreign) is asked first. It receives
//! the other operand as a [`ForeignValue`] and may return `None` to decline.
//! When it declines:
//!
//! - values of different types are never equal
//! - values of different types are ordered by their
//!   [`TypeTag`](crate::TypeTag)
//!
//! # Built-in Handlers
//!
//! ## [`Native`]
//!
//! Uses the value's own [`PartialEq`] and [`PartialOrd`] implementations and
//! has no cross-type rules. This is the handler used by
//! [`AnyFace::new`](crate::AnyFace::new).
//!
//! # Custom Handlers
//!
//! Types without comparison operators, or pairs of types that should compare
//! with each other, get a custom handler passed to
//! [`AnyFace::new_custom`](crate::AnyFace::new_custom).
//!
//! A cross-type rule is only ever asked on behalf of the left operand, so a
//! rule for the pair `(A, B)` must come with the mirrored rule for `(B, A)`,
//! and the two must agree. Otherwise `a < b` and `b < a` can both hold and
//! ordered collections misbehave. Debug builds check this in
//! [`Ord::cmp`].
//!
//! ```
//! use anyface::{
//!     AnyFace,
//!     handlers::{ForeignValue, OrderingHandler},
//!     markers::OrderingOnly,
//! };
//!
//! #[derive(Clone)]
//! struct Meters(f64);
//!
//! #[derive(Clone)]
//! struct Feet(f64);
//!
//! struct ByLength;
//!
//! impl ByLength {
//!     fn meters(other: ForeignValue<'_>) -> Option<f64> {
//!         other
//!             .downcast_ref::<Meters>()
//!             .map(|m| m.0)
//!             .or_else(|| other.downcast_ref::<Feet>().map(|f| f.0 * 0.3048))
//!     }
//! }
//!
//! impl OrderingHandler<Meters> for ByLength {
//!     fn less(value: &Meters, other: &Meters) -> bool {
//!         value.0 < other.0
//!     }
//!
//!     fn less_foreign(value: &Meters, other: ForeignValue<'_>) -> Option<bool> {
//!         Self::meters(other).map(|other| value.0 < other)
//!     }
//! }
//!
//! impl OrderingHandler<Feet> for ByLength {
//!     fn less(value: &Feet, other: &Feet) -> bool {
//!         value.0 < other.0
//!     }
//!
//!     fn less_foreign(value: &Feet, other: ForeignValue<'_>) -> Option<bool> {
//!         Self::meters(other).map(|other| value.0 * 0.3048 < other)
//!     }
//! }
//!
//! type Length = AnyFace<dyn core::any::Any, OrderingOnly>;
//!
//! let two_meters = Length::new_custom::<ByLength, _>(Meters(2.0));
//! let ten_feet = Length::new_custom::<ByLength, _>(Feet(10.0));
//!
//! assert!(two_meters < ten_feet);
//! assert!(!(ten_feet < two_meters));
//! assert!(ten_feet > two_meters);
//! ```

use core::{
    any::{Any, TypeId},
    marker::PhantomData,
};

use anyface_internals::handlers::CompareHandler;

use crate::markers::{EqualityOnly, Full, Incomparable, OrderingOnly};

/// Equality between values of type `T`, and optionally between `T` and other
/// types.
pub trait EqualityHandler<T>: 'static {
    /// Returns whether two values of type `T` are equal.
    fn equals(value: &T, other: &T) -> bool;

    /// Returns whether `value` equals a value of another concrete type, or
    /// `None` if this handler has no rule for that type.
    ///
    /// The default implementation has no rules.
    #[inline]
    fn equals_foreign(_value: &T, _other: ForeignValue<'_>) -> Option<bool> {
        None
    }
}

/// Strict ordering between values of type `T`, and optionally between `T`
/// and other types.
pub trait OrderingHandler<T>: 'static {
    /// Returns whether `value` orders strictly before `other`.
    fn less(value: &T, other: &T) -> bool;

    /// Returns whether `value` orders strictly before a value of another
    /// concrete type, or `None` if this handler has no rule for that type.
    ///
    /// The default implementation has no rules.
    #[inline]
    fn less_foreign(_value: &T, _other: ForeignValue<'_>) -> Option<bool> {
        None
    }
}

/// The other operand of a cross-type comparison.
///
/// Its concrete type is known to differ from the handler's own `T`. Use
/// [`downcast_ref`](Self::downcast_ref) to recognize the types the handler
/// has rules for.
#[derive(Copy, Clone, Debug)]
pub struct ForeignValue<'a> {
    value: &'a (dyn Any + 'static),
}

impl<'a> ForeignValue<'a> {
    #[inline]
    pub(crate) fn new(value: &'a (dyn Any + 'static)) -> Self {
        Self { value }
    }

    /// The [`TypeId`] of the other operand.
    #[inline]
    pub fn type_id(self) -> TypeId {
        Any::type_id(self.value)
    }

    /// Returns whether the other operand is a `U`.
    #[inline]
    pub fn is<U: Any>(self) -> bool {
        self.value.is::<U>()
    }

    /// Returns the other operand if it is a `U`.
    #[inline]
    pub fn downcast_ref<U: Any>(self) -> Option<&'a U> {
        self.value.downcast_ref::<U>()
    }
}

/// Handler that compares with the value's own [`PartialEq`] and
/// [`PartialOrd`] implementations.
///
/// # Examples
///
/// ```
/// use anyface::AnyFace;
///
/// let small: AnyFace = AnyFace::new(3);
/// let large: AnyFace = AnyFace::new(7);
/// let three: AnyFace = AnyFace::new(3);
///
/// assert!(small < large);
/// assert_ne!(small, large);
/// assert_eq!(small, three);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
pub struct Native;

impl<T: PartialEq> EqualityHandler<T> for Native {
    #[inline]
    fn equals(value: &T, other: &T) -> bool {
        value == other
    }
}

impl<T: PartialOrd> OrderingHandler<T> for Native {
    #[inline]
    fn less(value: &T, other: &T) -> bool {
        value < other
    }
}

/// Adapts a comparison policy `P` and a user handler `H` to the handler the
/// holder vtable stores. The operations a policy does not offer are never
/// reached, because the container has no trait impl that would call them.
pub(crate) struct Comparator<P, H>(PhantomData<fn() -> (P, H)>);

impl<T: 'static, H: 'static> CompareHandler<T> for Comparator<Incomparable, H> {
    fn equals(_value: &T, _other: &T) -> bool {
        unreachable!("values without an equality policy are never compared for equality")
    }

    fn equals_foreign(_value: &T, _other: &(dyn Any + 'static)) -> Option<bool> {
        unreachable!("values without an equality policy are never compared for equality")
    }

    fn less(_value: &T, _other: &T) -> bool {
        unreachable!("values without an ordering policy are never ordered")
    }

    fn less_foreign(_value: &T, _other: &(dyn Any + 'static)) -> Option<bool> {
        unreachable!("values without an ordering policy are never ordered")
    }
}

impl<T: 'static, H: EqualityHandler<T>> CompareHandler<T> for Comparator<EqualityOnly, H> {
    #[inline]
    fn equals(value: &T, other: &T) -> bool {
        H::equals(value, other)
    }

    #[inline]
    fn equals_foreign(value: &T, other: &(dyn Any + 'static)) -> Option<bool> {
        H::equals_foreign(value, ForeignValue::new(other))
    }

    fn less(_value: &T, _other: &T) -> bool {
        unreachable!("values without an ordering policy are never ordered")
    }

    fn less_foreign(_value: &T, _other: &(dyn Any + 'static)) -> Option<bool> {
        unreachable!("values without an ordering policy are never ordered")
    }
}

impl<T: 'static, H: OrderingHandler<T>> CompareHandler<T> for Comparator<OrderingOnly, H> {
    fn equals(_value: &T, _other: &T) -> bool {
        unreachable!("equality under an ordering-only policy is derived from `less`")
    }

    fn equals_foreign(_value: &T, _other: &(dyn Any + 'static)) -> Option<bool> {
        unreachable!("equality under an ordering-only policy is derived from `less`")
    }

    #[inline]
    fn less(value: &T, other: &T) -> bool {
        H::less(value, other)
    }

    #[inline]
    fn less_foreign(value: &T, other: &(dyn Any + 'static)) -> Option<bool> {
        H::less_foreign(value, ForeignValue::new(other))
    }
}

impl<T: 'static, H> CompareHandler<T> for Comparator<Full, H>
where
    H: EqualityHandler<T> + OrderingHandler<T>,
{
    #[inline]
    fn equals(value: &T, other: &T) -> bool {
        H::equals(value, other)
    }

    #[inline]
    fn equals_foreign(value: &T, other: &(dyn Any + 'static)) -> Option<bool> {
        H::equals_foreign(value, ForeignValue::new(other))
    }

    #[inline]
    fn less(value: &T, other: &T) -> bool {
        H::less(value, other)
    }

    #[inline]
    fn less_foreign(value: &T, other: &(dyn Any + 'static)) -> Option<bool> {
        H::less_foreign(value, ForeignValue::new(other))
    }
}
