//! The comparison handler baked into every holder vtable.
//!
//! A holder is created with exactly one [`CompareHandler`], chosen by the
//! public crate from the comparison policy and the user's handler. The vtable
//! stores monomorphized calls into it, so two erased values can be compared
//! without either side knowing the other's concrete type.

use core::any::Any;

/// Comparison behavior for values of type `T` stored in a holder.
///
/// The `*_foreign` methods are consulted only when the other operand holds a
/// different concrete type. Returning `None` from them means "no override for
/// this pair", and the caller applies its own fallback.
///
/// # Examples
///
/// ```
/// use core::any::Any;
///
/// use anyface_internals::handlers::CompareHandler;
///
/// struct ByValue;
///
/// impl CompareHandler<i32> for ByValue {
///     fn equals(value: &i32, other: &i32) -> bool {
///         value == other
///     }
///
///     fn equals_foreign(value: &i32, other: &(dyn Any + 'static)) -> Option<bool> {
///         other.downcast_ref::<i64>().map(|other| i64::from(*value) == *other)
///     }
///
///     fn less(value: &i32, other: &i32) -> bool {
///         value < other
///     }
///
///     fn less_foreign(_value: &i32, _other: &(dyn Any + 'static)) -> Option<bool> {
///         None
///     }
/// }
/// ```
pub trait CompareHandler<T>: 'static {
    /// Equality between two values of the same concrete type.
    fn equals(value: &T, other: &T) -> bool;

    /// Equality between `value` and a value of a different concrete type.
    fn equals_foreign(value: &T, other: &(dyn Any + 'static)) -> Option<bool>;

    /// Strict ordering between two values of the same concrete type.
    fn less(value: &T, other: &T) -> bool;

    /// Strict ordering between `value` and a value of a different concrete
    /// type.
    fn less_foreign(value: &T, other: &(dyn Any + 'static)) -> Option<bool>;
}
