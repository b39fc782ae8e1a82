//! This module encapsulates the fields of the [`HolderData`]. Since this is
//! the only place they are visible, the [`HolderVtable`] is guaranteed to
//! always be in sync with the type of the held value. They are in sync when
//! created, and the API offers no way to change the [`HolderVtable`] or the
//! value type after creation.

use crate::{
    handlers::CompareHandler,
    holder::{
        raw::{RawHolderMut, RawHolderRef},
        vtable::HolderVtable,
    },
    interface::Implements,
};

/// Type-erased holder data structure with vtable-based dispatch.
///
/// This struct uses `#[repr(C)]` to enable safe field access in type-erased
/// contexts, allowing access to the vtable field even when the concrete
/// value type `T` is unknown.
#[repr(C)]
pub(crate) struct HolderData<I: ?Sized + 'static, T: 'static> {
    /// The Vtable of this holder
    vtable: &'static HolderVtable<I>,
    /// The held value
    value: T,
}

impl<I: ?Sized + 'static, T: 'static> HolderData<I, T> {
    /// Creates a new [`HolderData`] whose vtable views `T` as `I` and
    /// compares it with `C`.
    #[inline]
    pub(super) fn new<C>(value: T) -> Self
    where
        T: Clone + Implements<I>,
        C: CompareHandler<T>,
    {
        Self {
            vtable: HolderVtable::new::<T, C>(),
            value,
        }
    }

    /// Deep-clones the value, keeping the vtable it was created with.
    #[inline]
    pub(super) fn cloned(&self) -> Self
    where
        T: Clone,
    {
        Self {
            vtable: self.vtable,
            value: self.value.clone(),
        }
    }
}

impl<'a, I: ?Sized + 'static> RawHolderRef<'a, I> {
    /// Returns a reference to the [`HolderVtable`] of the [`HolderData`]
    /// instance.
    #[inline]
    pub(super) fn vtable(self) -> &'static HolderVtable<I> {
        let ptr = self.as_ptr();
        // SAFETY: We don't know the actual inner value type, but we do know
        // that it points to an instance of `HolderData<I, T>` for some specific
        // `T`. Since `HolderData<I, T>` is `#[repr(C)]`, it is safe to create
        // pointers to the fields before the actual value.
        //
        // We need to take care to avoid creating an actual reference to
        // the `HolderData` itself though, as that would still be undefined
        // behavior since we don't have the right type.
        let vtable_ptr: *const &'static HolderVtable<I> = unsafe { &raw const (*ptr).vtable };

        // SAFETY: Dereferencing the pointer and getting out the `&'static
        // HolderVtable<I>` is valid for the same reasons
        unsafe { *vtable_ptr }
    }

    /// Accesses the held value as a reference to the specified type.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the type `T` matches the actual value type
    /// stored in the [`HolderData`].
    #[inline]
    pub unsafe fn value_downcast_unchecked<T: 'static>(self) -> &'a T {
        // SAFETY: The inner function requires that `T` matches the type stored,
        // but that is guaranteed by our caller.
        let this = unsafe { self.cast_inner::<T>() };
        &this.value
    }
}

impl<'a, I: ?Sized + 'static> RawHolderMut<'a, I> {
    /// Accesses the held value as a mutable reference to the specified type.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the type `T` matches the actual value type
    /// stored in the [`HolderData`].
    #[inline]
    pub unsafe fn value_downcast_mut_unchecked<T: 'static>(self) -> &'a mut T {
        // SAFETY: The inner function requires that `T` matches the type stored,
        // but that is guaranteed by our caller.
        let this = unsafe { self.cast_inner::<T>() };
        &mut this.value
    }
}
