//! Marker types and traits selecting the comparison policy of an erased value.
//!
//! The second type parameter of [`AnyFace<I, P>`](crate::AnyFace) is one of
//! the policy markers in this module. The policy is fixed when the container
//! type is named. It decides which comparison traits the container
//! implements and which traits a value must satisfy to be stored in it.
//!
//! | Policy           | `==`                       | `<`, `Ord` | Needs from `T` with [`Native`] |
//! |------------------|----------------------------|------------|--------------------------------|
//! | [`Incomparable`] | no                         | no         | nothing                        |
//! | [`EqualityOnly`] | handler `equals`           | no         | `PartialEq`                    |
//! | [`OrderingOnly`] | `!(a < b) && !(b < a)`     | yes        | `PartialOrd`                   |
//! | [`Full`]         | handler `equals`           | yes        | `PartialEq + PartialOrd`       |
//!
//! # Design Philosophy
//!
//! The constraints are enforced at construction time. It is impossible to
//! construct an `AnyFace<_, EqualityOnly>` from a value that has no equality
//! handler, and a missing comparison is a compile error rather than a runtime
//! failure:
//!
//! ```compile_fail
//! use anyface::{AnyFace, markers::Incomparable};
//!
//! let a: AnyFace<dyn core::any::Any, Incomparable> = AnyFace::new(1);
//! let b: AnyFace<dyn core::any::Any, Incomparable> = AnyFace::new(2);
//! let _ = a == b;
//! ```
//!
//! ```compile_fail
//! use anyface::{AnyFace, markers::EqualityOnly};
//!
//! struct NoEquality;
//!
//! # impl Clone for NoEquality { fn clone(&self) -> Self { NoEquality } }
//! let a: AnyFace<dyn core::any::Any, EqualityOnly> = AnyFace::new(NoEquality);
//! ```
//!
//! [`Native`]: crate::handlers::Native

use anyface_internals::{RawHolder, interface::Implements};

use crate::{
    AnyFace, compare,
    handlers::{Comparator, EqualityHandler, OrderingHandler},
};

/// Policy marker: erased values cannot be compared at all.
///
/// Stored values need no comparison operators.
///
/// # Examples
///
/// ```
/// use anyface::{AnyFace, markers::Incomparable};
///
/// #[derive(Clone)]
/// struct Opaque;
///
/// let value: AnyFace<dyn core::any::Any, Incomparable> = AnyFace::new(Opaque);
/// assert!(value.is::<Opaque>());
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
pub struct Incomparable;

/// Policy marker: erased values support `==` but not ordering.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
pub struct EqualityOnly;

/// Policy marker: erased values support ordering. Equality is derived from the
/// ordering as equivalence, so the container is usable as an ordered map key.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
///
/// use anyface::{AnyFace, markers::OrderingOnly};
///
/// let mut set: BTreeSet<AnyFace<dyn core::any::Any, OrderingOnly>> = BTreeSet::new();
/// set.insert(AnyFace::new(2));
/// set.insert(AnyFace::new(1));
/// set.insert(AnyFace::new(2));
///
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
pub struct OrderingOnly;

/// Policy marker: erased values support both equality and ordering. This is
/// the default policy.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
pub struct Full;

mod sealed_comparison_policy {
    use super::*;

    pub trait Sealed: 'static {}

    impl Sealed for Incomparable {}
    impl Sealed for EqualityOnly {}
    impl Sealed for OrderingOnly {}
    impl Sealed for Full {}
}

/// Marker trait implemented by the four policy markers.
///
/// This trait is sealed and cannot be implemented outside of this crate.
pub trait ComparisonPolicy: sealed_comparison_policy::Sealed {}

impl ComparisonPolicy for Incomparable {}
impl ComparisonPolicy for EqualityOnly {}
impl ComparisonPolicy for OrderingOnly {}
impl ComparisonPolicy for Full {}

/// Policies under which erased values implement [`PartialEq`].
///
/// Implemented for [`EqualityOnly`] and [`Full`], which use the handler's
/// `equals`, and for [`OrderingOnly`], which uses equivalence under `less`.
pub trait EqualityMarker: ComparisonPolicy + Sized {
    /// Compares two erased values under this policy.
    #[doc(hidden)]
    fn eq_erased<I: ?Sized + 'static>(lhs: &AnyFace<I, Self>, rhs: &AnyFace<I, Self>) -> bool;
}

impl EqualityMarker for EqualityOnly {
    #[inline]
    fn eq_erased<I: ?Sized + 'static>(lhs: &AnyFace<I, Self>, rhs: &AnyFace<I, Self>) -> bool {
        compare::equals(lhs, rhs)
    }
}

impl EqualityMarker for OrderingOnly {
    #[inline]
    fn eq_erased<I: ?Sized + 'static>(lhs: &AnyFace<I, Self>, rhs: &AnyFace<I, Self>) -> bool {
        !compare::less(lhs, rhs) && !compare::less(rhs, lhs)
    }
}

impl EqualityMarker for Full {
    #[inline]
    fn eq_erased<I: ?Sized + 'static>(lhs: &AnyFace<I, Self>, rhs: &AnyFace<I, Self>) -> bool {
        compare::equals(lhs, rhs)
    }
}

/// Policies under which erased values implement [`Ord`]: [`OrderingOnly`]
/// and [`Full`].
pub trait OrderingMarker: EqualityMarker {}

impl OrderingMarker for OrderingOnly {}
impl OrderingMarker for Full {}

/// A value type that can be stored in an erased container with policy `P`,
/// compared by the handler `H`.
///
/// This trait is the bound of [`AnyFace::new`](crate::AnyFace::new) and
/// [`AnyFace::new_custom`](crate::AnyFace::new_custom). It is implemented
/// automatically:
///
/// - For `P = Incomparable`: every `Clone + 'static` type, with any handler.
/// - For `P = EqualityOnly`: when `H: EqualityHandler<T>`.
/// - For `P = OrderingOnly`: when `H: OrderingHandler<T>`.
/// - For `P = Full`: when `H` implements both.
///
/// With the default [`Native`](crate::handlers::Native) handler this means
/// the value type needs `PartialEq` and/or `PartialOrd`.
pub trait ComparableUnder<P, H>: Sized + Clone + 'static {
    /// Moves the value into a holder viewed through `I`.
    #[doc(hidden)]
    fn into_holder<I: ?Sized + 'static>(self) -> RawHolder<I>
    where
        Self: Implements<I>;
}

impl<T, H> ComparableUnder<Incomparable, H> for T
where
    T: Clone + 'static,
    H: 'static,
{
    #[inline]
    fn into_holder<I: ?Sized + 'static>(self) -> RawHolder<I>
    where
        T: Implements<I>,
    {
        RawHolder::new::<T, Comparator<Incomparable, H>>(self)
    }
}

impl<T, H> ComparableUnder<EqualityOnly, H> for T
where
    T: Clone + 'static,
    H: EqualityHandler<T>,
{
    #[inline]
    fn into_holder<I: ?Sized + 'static>(self) -> RawHolder<I>
    where
        T: Implements<I>,
    {
        RawHolder::new::<T, Comparator<EqualityOnly, H>>(self)
    }
}

impl<T, H> ComparableUnder<OrderingOnly, H> for T
where
    T: Clone + 'static,
    H: OrderingHandler<T>,
{
    #[inline]
    fn into_holder<I: ?Sized + 'static>(self) -> RawHolder<I>
    where
        T: Implements<I>,
    {
        RawHolder::new::<T, Comparator<OrderingOnly, H>>(self)
    }
}

impl<T, H> ComparableUnder<Full, H> for T
where
    T: Clone + 'static,
    H: EqualityHandler<T> + OrderingHandler<T>,
{
    #[inline]
    fn into_holder<I: ?Sized + 'static>(self) -> RawHolder<I>
    where
        T: Implements<I>,
    {
        RawHolder::new::<T, Comparator<Full, H>>(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_surface() {
        use core::any::Any;

        static_assertions::assert_not_impl_any!(AnyFace<dyn Any, Incomparable>: PartialEq, PartialOrd);
        static_assertions::assert_impl_all!(AnyFace<dyn Any, EqualityOnly>: PartialEq);
        static_assertions::assert_not_impl_any!(AnyFace<dyn Any, EqualityOnly>: Eq, PartialOrd, Ord);
        static_assertions::assert_impl_all!(AnyFace<dyn Any, OrderingOnly>: PartialEq, Eq, PartialOrd, Ord);
        static_assertions::assert_impl_all!(AnyFace<dyn Any, Full>: PartialEq, Eq, PartialOrd, Ord);
    }
}
