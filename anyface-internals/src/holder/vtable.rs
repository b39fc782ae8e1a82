//! Vtable for type-erased holder operations.
//!
//! This module contains the [`HolderVtable`] which enables operating on a held
//! value when its concrete type `T` and its comparison handler `C` have been
//! erased. The vtable stores function pointers that dispatch to the correct
//! typed implementations.
//!
//! This module encapsulates the fields of [`HolderVtable`] so they cannot
//! be accessed directly. This visibility restriction guarantees the safety
//! invariant: **the vtable's type parameters must match the actual value type
//! stored in the [`HolderData`]**.
//!
//! # Safety Invariant
//!
//! This invariant is maintained because vtables are created as `&'static`
//! references via [`HolderVtable::new`], which pairs the function pointers
//! with specific types `T` and `C` at compile time.

use alloc::boxed::Box;
use core::{
    any::{Any, TypeId},
    ptr::NonNull,
};

use crate::{
    handlers::CompareHandler,
    holder::{
        data::HolderData,
        raw::{RawHolder, RawHolderMut, RawHolderRef},
    },
    interface::Implements,
    util::Erased,
};

/// Vtable for type-erased holder operations.
///
/// Contains function pointers for performing operations on held values without
/// knowing their concrete type at compile time.
///
/// # Safety Invariant
///
/// All function pointer fields are guaranteed to point to the functions
/// defined below instantiated with the value type `T` and handler type `C`
/// that were used to create this [`HolderVtable`].
pub(crate) struct HolderVtable<I: ?Sized + 'static> {
    /// Gets the [`TypeId`] of the value type that was used to create this
    /// [`HolderVtable`].
    type_id: fn() -> TypeId,
    /// Gets the [`core::any::type_name`] of the value type.
    type_name: fn() -> &'static str,
    /// Drops the [`Box<HolderData<I, T>>`] instance pointed to by this
    /// pointer.
    drop: unsafe fn(NonNull<HolderData<I, Erased>>),
    /// Deep-clones the held value into a fresh allocation.
    clone: unsafe fn(RawHolderRef<'_, I>) -> RawHolder<I>,
    /// Views the held value as [`Any`].
    as_any: unsafe fn(RawHolderRef<'_, I>) -> &'_ (dyn Any + 'static),
    /// Views the held value through the interface.
    as_interface: unsafe fn(RawHolderRef<'_, I>) -> &'_ I,
    /// Views the held value mutably through the interface.
    as_interface_mut: unsafe fn(RawHolderMut<'_, I>) -> &'_ mut I,
    /// Same-type equality from the handler.
    equals: unsafe fn(RawHolderRef<'_, I>, RawHolderRef<'_, I>) -> bool,
    /// Cross-type equality override from the handler.
    equals_foreign: unsafe fn(RawHolderRef<'_, I>, &(dyn Any + 'static)) -> Option<bool>,
    /// Same-type strict ordering from the handler.
    less: unsafe fn(RawHolderRef<'_, I>, RawHolderRef<'_, I>) -> bool,
    /// Cross-type strict ordering override from the handler.
    less_foreign: unsafe fn(RawHolderRef<'_, I>, &(dyn Any + 'static)) -> Option<bool>,
}

impl<I: ?Sized + 'static> HolderVtable<I> {
    /// Creates a new [`HolderVtable`] for the value type `T` and the
    /// handler type `C`.
    pub(super) const fn new<T, C>() -> &'static Self
    where
        T: Clone + Implements<I>,
        C: CompareHandler<T>,
    {
        const {
            &Self {
                type_id: TypeId::of::<T>,
                type_name: core::any::type_name::<T>,
                drop: drop::<I, T>,
                clone: clone::<I, T>,
                as_any: as_any::<I, T>,
                as_interface: as_interface::<I, T>,
                as_interface_mut: as_interface_mut::<I, T>,
                equals: equals::<I, T, C>,
                equals_foreign: equals_foreign::<I, T, C>,
                less: less::<I, T, C>,
                less_foreign: less_foreign::<I, T, C>,
            }
        }
    }

    /// Gets the [`TypeId`] of the value type that was used to create this
    /// [`HolderVtable`].
    #[inline]
    pub(super) fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    /// Gets the [`core::any::type_name`] of the value type that was used to
    /// create this [`HolderVtable`].
    #[inline]
    pub(super) fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    /// Drops the `Box<HolderData<I, T>>` instance pointed to by this pointer.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The pointer comes from [`Box<HolderData<I, T>>`] via
    ///    [`Box::into_raw`]
    /// 2. This [`HolderVtable`] must be a vtable for the value type stored in
    ///    the [`HolderData`].
    /// 3. This method drops the [`Box<HolderData<I, T>>`], so the caller must
    ///    ensure that the pointer has not previously been dropped, that it is
    ///    able to transfer ownership of the pointer, and that it will not use
    ///    the pointer after calling this method.
    #[inline]
    pub(super) unsafe fn drop(&self, ptr: NonNull<HolderData<I, Erased>>) {
        // SAFETY: We know that `self.drop` points to the function `drop::<I, T>`
        // below. That function's safety requirements are upheld:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        // 3. Guaranteed by the caller
        unsafe {
            (self.drop)(ptr);
        }
    }

    /// Clones the held value using the `clone::<I, T>` function this vtable
    /// was created with.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This [`HolderVtable`] must be a vtable for the value type stored in
    ///    the [`RawHolderRef`].
    #[inline]
    pub(super) unsafe fn clone(&self, ptr: RawHolderRef<'_, I>) -> RawHolder<I> {
        // SAFETY: We know that the `self.clone` field points to the function
        // `clone::<I, T>` below. That function's safety requirements are upheld:
        // 1. Guaranteed by the caller
        unsafe { (self.clone)(ptr) }
    }

    /// Views the held value as [`Any`].
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This [`HolderVtable`] must be a vtable for the value type stored in
    ///    the [`RawHolderRef`].
    #[inline]
    pub(super) unsafe fn as_any<'a>(&self, ptr: RawHolderRef<'a, I>) -> &'a (dyn Any + 'static) {
        // SAFETY: We know that the `self.as_any` field points to the function
        // `as_any::<I, T>` below. That function's safety requirements are upheld:
        // 1. Guaranteed by the caller
        unsafe { (self.as_any)(ptr) }
    }

    /// Views the held value through the interface `I`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This [`HolderVtable`] must be a vtable for the value type stored in
    ///    the [`RawHolderRef`].
    #[inline]
    pub(super) unsafe fn as_interface<'a>(&self, ptr: RawHolderRef<'a, I>) -> &'a I {
        // SAFETY: We know that the `self.as_interface` field points to the
        // function `as_interface::<I, T>` below. That function's safety
        // requirements are upheld:
        // 1. Guaranteed by the caller
        unsafe { (self.as_interface)(ptr) }
    }

    /// Views the held value mutably through the interface `I`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This [`HolderVtable`] must be a vtable for the value type stored in
    ///    the [`RawHolderMut`].
    #[inline]
    pub(super) unsafe fn as_interface_mut<'a>(&self, ptr: RawHolderMut<'a, I>) -> &'a mut I {
        // SAFETY: We know that the `self.as_interface_mut` field points to the
        // function `as_interface_mut::<I, T>` below. That function's safety
        // requirements are upheld:
        // 1. Guaranteed by the caller
        unsafe { (self.as_interface_mut)(ptr) }
    }

    /// Compares two held values of the same type with [`C::equals`].
    ///
    /// [`C::equals`]: CompareHandler::equals
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This [`HolderVtable`] must be a vtable for the value type stored in
    ///    both `ptr` and `other`.
    #[inline]
    pub(super) unsafe fn equals(&self, ptr: RawHolderRef<'_, I>, other: RawHolderRef<'_, I>) -> bool {
        // SAFETY: We know that the `self.equals` field points to the function
        // `equals::<I, T, C>` below. That function's safety requirements are
        // upheld:
        // 1. Guaranteed by the caller
        unsafe { (self.equals)(ptr, other) }
    }

    /// Asks [`C::equals_foreign`] about a value of another type.
    ///
    /// [`C::equals_foreign`]: CompareHandler::equals_foreign
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This [`HolderVtable`] must be a vtable for the value type stored in
    ///    the [`RawHolderRef`].
    #[inline]
    pub(super) unsafe fn equals_foreign(
        &self,
        ptr: RawHolderRef<'_, I>,
        other: &(dyn Any + 'static),
    ) -> Option<bool> {
        // SAFETY: We know that the `self.equals_foreign` field points to the
        // function `equals_foreign::<I, T, C>` below. That function's safety
        // requirements are upheld:
        // 1. Guaranteed by the caller
        unsafe { (self.equals_foreign)(ptr, other) }
    }

    /// Compares two held values of the same type with [`C::less`].
    ///
    /// [`C::less`]: CompareHandler::less
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This [`HolderVtable`] must be a vtable for the value type stored in
    ///    both `ptr` and `other`.
    #[inline]
    pub(super) unsafe fn less(&self, ptr: RawHolderRef<'_, I>, other: RawHolderRef<'_, I>) -> bool {
        // SAFETY: We know that the `self.less` field points to the function
        // `less::<I, T, C>` below. That function's safety requirements are
        // upheld:
        // 1. Guaranteed by the caller
        unsafe { (self.less)(ptr, other) }
    }

    /// Asks [`C::less_foreign`] about a value of another type.
    ///
    /// [`C::less_foreign`]: CompareHandler::less_foreign
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This [`HolderVtable`] must be a vtable for the value type stored in
    ///    the [`RawHolderRef`].
    #[inline]
    pub(super) unsafe fn less_foreign(
        &self,
        ptr: RawHolderRef<'_, I>,
        other: &(dyn Any + 'static),
    ) -> Option<bool> {
        // SAFETY: We know that the `self.less_foreign` field points to the
        // function `less_foreign::<I, T, C>` below. That function's safety
        // requirements are upheld:
        // 1. Guaranteed by the caller
        unsafe { (self.less_foreign)(ptr, other) }
    }
}

/// Drops the [`Box<HolderData<I, T>>`] instance pointed to by this pointer.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. The pointer comes from [`Box<HolderData<I, T>>`] via [`Box::into_raw`]
/// 2. The value type `T` matches the actual value type stored in the
///    [`HolderData`]
/// 3. This method drops the [`Box<HolderData<I, T>>`], so the caller must
///    ensure that the pointer has not previously been dropped, that it is able
///    to transfer ownership of the pointer, and that it will not use the
///    pointer after calling this method.
unsafe fn drop<I: ?Sized + 'static, T: 'static>(ptr: NonNull<HolderData<I, Erased>>) {
    let ptr: NonNull<HolderData<I, T>> = ptr.cast();
    let ptr = ptr.as_ptr();
    // SAFETY: Our pointer has the correct type as guaranteed by the caller, and it
    // came from a call to `Box::into_raw` as also guaranteed by our caller.
    let boxed = unsafe { Box::from_raw(ptr) };
    core::mem::drop(boxed);
}

/// Deep-clones the held value.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. The type `T` matches the actual value type stored in the
///    [`HolderData`]
unsafe fn clone<I: ?Sized + 'static, T: Clone + 'static>(ptr: RawHolderRef<'_, I>) -> RawHolder<I> {
    // SAFETY:
    // 1. Guaranteed by the caller
    let data: &HolderData<I, T> = unsafe { ptr.cast_inner::<T>() };
    RawHolder::from_data(data.cloned())
}

/// Views the held value as [`Any`].
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. The type `T` matches the actual value type stored in the
///    [`HolderData`]
unsafe fn as_any<'a, I: ?Sized + 'static, T: 'static>(
    ptr: RawHolderRef<'a, I>,
) -> &'a (dyn Any + 'static) {
    // SAFETY:
    // 1. Guaranteed by the caller
    let value: &'a T = unsafe { ptr.value_downcast_unchecked::<T>() };
    value
}

/// Views the held value through the interface `I`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. The type `T` matches the actual value type stored in the
///    [`HolderData`]
unsafe fn as_interface<'a, I: ?Sized + 'static, T: Implements<I>>(ptr: RawHolderRef<'a, I>) -> &'a I {
    // SAFETY:
    // 1. Guaranteed by the caller
    let value: &'a T = unsafe { ptr.value_downcast_unchecked::<T>() };
    <T as Implements<I>>::as_interface(value)
}

/// Views the held value mutably through the interface `I`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. The type `T` matches the actual value type stored in the
///    [`HolderData`]
unsafe fn as_interface_mut<'a, I: ?Sized + 'static, T: Implements<I>>(
    ptr: RawHolderMut<'a, I>,
) -> &'a mut I {
    // SAFETY:
    // 1. Guaranteed by the caller
    let value: &'a mut T = unsafe { ptr.value_downcast_mut_unchecked::<T>() };
    <T as Implements<I>>::as_interface_mut(value)
}

/// Compares two held values of type `T` using the handler's `equals`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. The type `T` matches the actual value type stored in both
///    [`HolderData`] instances
unsafe fn equals<I: ?Sized + 'static, T: 'static, C: CompareHandler<T>>(
    ptr: RawHolderRef<'_, I>,
    other: RawHolderRef<'_, I>,
) -> bool {
    // SAFETY:
    // 1. Guaranteed by the caller
    let value: &T = unsafe { ptr.value_downcast_unchecked::<T>() };
    // SAFETY:
    // 1. Guaranteed by the caller
    let other: &T = unsafe { other.value_downcast_unchecked::<T>() };
    C::equals(value, other)
}

/// Asks the handler whether a held `T` equals a value of another type.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. The type `T` matches the actual value type stored in the
///    [`HolderData`]
unsafe fn equals_foreign<I: ?Sized + 'static, T: 'static, C: CompareHandler<T>>(
    ptr: RawHolderRef<'_, I>,
    other: &(dyn Any + 'static),
) -> Option<bool> {
    // SAFETY:
    // 1. Guaranteed by the caller
    let value: &T = unsafe { ptr.value_downcast_unchecked::<T>() };
    C::equals_foreign(value, other)
}

/// Compares two held values of type `T` using the handler's `less`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. The type `T` matches the actual value type stored in both
///    [`HolderData`] instances
unsafe fn less<I: ?Sized + 'static, T: 'static, C: CompareHandler<T>>(
    ptr: RawHolderRef<'_, I>,
    other: RawHolderRef<'_, I>,
) -> bool {
    // SAFETY:
    // 1. Guaranteed by the caller
    let value: &T = unsafe { ptr.value_downcast_unchecked::<T>() };
    // SAFETY:
    // 1. Guaranteed by the caller
    let other: &T = unsafe { other.value_downcast_unchecked::<T>() };
    C::less(value, other)
}

/// Asks the handler whether a held `T` orders before a value of another type.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. The type `T` matches the actual value type stored in the
///    [`HolderData`]
unsafe fn less_foreign<I: ?Sized + 'static, T: 'static, C: CompareHandler<T>>(
    ptr: RawHolderRef<'_, I>,
    other: &(dyn Any + 'static),
) -> Option<bool> {
    // SAFETY:
    // 1. Guaranteed by the caller
    let value: &T = unsafe { ptr.value_downcast_unchecked::<T>() };
    C::less_foreign(value, other)
}
