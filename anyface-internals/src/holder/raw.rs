//! Type-erased holder pointer types.
//!
//! This module encapsulates the `ptr` field of [`RawHolder`], [`RawHolderRef`]
//! and [`RawHolderMut`], ensuring it is only visible within this module. This
//! visibility restriction guarantees the safety invariant: **the pointer always
//! comes from `Box<HolderData<I, T>>`**.
//!
//! # Safety Invariant
//!
//! Since the `ptr` field can only be set via [`RawHolder::new`] or by cloning
//! an existing holder (both of which go through `Box::into_raw`), and cannot
//! be modified afterward, the pointer provenance remains valid throughout the
//! value's lifetime.
//!
//! The [`RawHolder::drop`] implementation relies on this invariant to
//! safely reconstruct the `Box` and deallocate the memory.
//!
//! # Type Erasure
//!
//! The concrete type parameter `T` is erased by casting to
//! `HolderData<I, Erased>`. The interface `I` is not erased: it is the same
//! for every value a given container can hold, so it stays in the type.

use alloc::boxed::Box;
use core::{
    any::{Any, TypeId},
    marker::PhantomData,
    ptr::NonNull,
};

use crate::{
    handlers::CompareHandler, holder::data::HolderData, interface::Implements, util::Erased,
};

/// A pointer to a [`HolderData`] that is guaranteed to point to an
/// initialized instance of a [`HolderData<I, T>`] for some specific `T`,
/// though we do not know which actual `T` it is.
///
/// However, the pointer is allowed to transition into a non-initialized state
/// inside the [`RawHolder::drop`] method.
///
/// The pointer is guaranteed to have been created using [`Box::into_raw`].
///
/// We cannot use a [`Box<HolderData<I, T>>`] directly, because that does not
/// allow us to type-erase the `T`.
#[repr(transparent)]
pub struct RawHolder<I: ?Sized + 'static> {
    /// Pointer to the inner holder data
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long as
    /// this struct exists:
    ///
    /// 1. The pointer must have been created from a `Box<HolderData<I, T>>`
    ///    for some `T` using `Box::into_raw`.
    /// 2. The pointer will point to the same `HolderData<I, T>` for the entire
    ///    lifetime of this object.
    /// 3. The pointee is properly initialized for the entire lifetime of this
    ///    object, except during the execution of the `Drop` implementation.
    /// 4. This object uniquely owns the pointee.
    ptr: NonNull<HolderData<I, Erased>>,
}

impl<I: ?Sized + 'static> RawHolder<I> {
    /// Creates a new [`RawHolder`] holding `value`, viewed through the
    /// interface `I` and compared with the handler `C`.
    #[inline]
    pub fn new<T, C>(value: T) -> Self
    where
        T: Clone + Implements<I>,
        C: CompareHandler<T>,
    {
        Self::from_data(HolderData::new::<C>(value))
    }

    /// Boxes an already constructed [`HolderData`] and erases its value
    /// type.
    #[inline]
    pub(super) fn from_data<T: 'static>(data: HolderData<I, T>) -> Self {
        let ptr = Box::new(data);
        let ptr: *mut HolderData<I, T> = Box::into_raw(ptr);
        let ptr: *mut HolderData<I, Erased> = ptr.cast::<HolderData<I, Erased>>();

        // SAFETY: `Box::into_raw` returns a non-null pointer
        let ptr: NonNull<HolderData<I, Erased>> = unsafe { NonNull::new_unchecked(ptr) };

        Self { ptr }
    }

    /// Returns a reference to the [`HolderData`] instance.
    #[inline]
    pub fn as_ref(&self) -> RawHolderRef<'_, I> {
        RawHolderRef {
            ptr: self.ptr,
            _marker: PhantomData,
        }
    }

    /// Returns a mutable reference to the [`HolderData`] instance.
    ///
    /// This is safe because [`RawHolder`] uniquely owns its allocation, so a
    /// `&mut self` borrow guarantees exclusive access.
    #[inline]
    pub fn as_mut(&mut self) -> RawHolderMut<'_, I> {
        RawHolderMut {
            ptr: self.ptr,
            _marker: PhantomData,
        }
    }
}

impl<I: ?Sized + 'static> core::ops::Drop for RawHolder<I> {
    #[inline]
    fn drop(&mut self) {
        let vtable = self.as_ref().vtable();

        // SAFETY:
        // 1. The pointer comes from `Box::into_raw` (guaranteed by
        //    `RawHolder::from_data`)
        // 2. The vtable returned by `self.as_ref().vtable()` is guaranteed to match the
        //    data in the `HolderData`.
        // 3. The pointer is initialized and has not been previously freed as guaranteed
        //    by the invariants on this type. We are correctly transferring ownership
        //    here and the pointer is not used afterwards, as we are in the drop
        //    function.
        unsafe {
            vtable.drop(self.ptr);
        }
    }
}

/// A lifetime-bound pointer to a [`HolderData`] that is guaranteed to
/// point to an initialized instance of a [`HolderData<I, T>`] for some
/// specific `T`, though we do not know which actual `T` it is.
///
/// We cannot use a [`&'a HolderData<I, T>`] directly, because that would
/// require us to know the actual type of the value, which we do not.
///
/// [`&'a HolderData<I, T>`]: HolderData
#[repr(transparent)]
pub struct RawHolderRef<'a, I: ?Sized + 'static> {
    /// Pointer to the inner holder data
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long as
    /// this struct exists:
    ///
    /// 1. The pointer must have been created from a `Box<HolderData<I, T>>`
    ///    for some `T` using `Box::into_raw`.
    /// 2. The pointer will point to the same `HolderData<I, T>` for the entire
    ///    lifetime of this object.
    ptr: NonNull<HolderData<I, Erased>>,

    /// Marker to tell the compiler that we should
    /// behave the same as a `&'a HolderData<I, Erased>`
    _marker: PhantomData<&'a HolderData<I, Erased>>,
}

impl<I: ?Sized + 'static> Clone for RawHolderRef<'_, I> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: ?Sized + 'static> Copy for RawHolderRef<'_, I> {}

impl<'a, I: ?Sized + 'static> RawHolderRef<'a, I> {
    /// Casts the [`RawHolderRef`] to a [`HolderData<I, T>`] reference.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The type `T` matches the actual value type stored in the
    ///    [`HolderData`].
    #[inline]
    pub(super) unsafe fn cast_inner<T: 'static>(self) -> &'a HolderData<I, T> {
        // Debug assertion to catch type mismatches in case of bugs
        debug_assert_eq!(self.vtable().type_id(), TypeId::of::<T>());

        let this = self.ptr.cast::<HolderData<I, T>>();
        // SAFETY: Converting the NonNull pointer to a reference is sound because:
        // - The pointer is non-null, properly aligned, and dereferenceable (guaranteed
        //   by RawHolderRef's type invariants)
        // - The pointee is properly initialized (RawHolderRef's doc comment
        //   guarantees it points to an initialized HolderData<I, T> for some T)
        // - The type `T` matches the actual value type (guaranteed by caller)
        // - Shared access is allowed
        // - The reference lifetime 'a is valid (tied to RawHolderRef<'a>'s lifetime)
        unsafe { this.as_ref() }
    }

    /// Returns a raw pointer to the [`HolderData`] instance.
    #[inline]
    pub(super) fn as_ptr(self) -> *const HolderData<I, Erased> {
        self.ptr.as_ptr()
    }

    /// Returns the [`TypeId`] of the held value.
    #[inline]
    pub fn value_type_id(self) -> TypeId {
        self.vtable().type_id()
    }

    /// Returns the [`core::any::type_name`] of the held value.
    #[inline]
    pub fn value_type_name(self) -> &'static str {
        self.vtable().type_name()
    }

    /// Views the held value as [`Any`], for checked downcasting.
    #[inline]
    pub fn as_any(self) -> &'a (dyn Any + 'static) {
        let vtable = self.vtable();
        // SAFETY:
        // 1. The vtable returned by `self.vtable()` is guaranteed to match the data in
        //    the `HolderData`.
        unsafe { vtable.as_any(self) }
    }

    /// Views the held value through the interface `I`.
    #[inline]
    pub fn interface(self) -> &'a I {
        let vtable = self.vtable();
        // SAFETY:
        // 1. The vtable returned by `self.vtable()` is guaranteed to match the data in
        //    the `HolderData`.
        unsafe { vtable.as_interface(self) }
    }

    /// Deep-clones the held value into a new [`RawHolder`] sharing this
    /// holder's vtable.
    #[inline]
    pub fn clone_holder(self) -> RawHolder<I> {
        let vtable = self.vtable();
        // SAFETY:
        // 1. The vtable returned by `self.vtable()` is guaranteed to match the data in
        //    the `HolderData`.
        unsafe { vtable.clone(self) }
    }

    /// Compares two holders of the same concrete type for equality using the
    /// handler of `self`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `other` holds a value of the same concrete type as `self`.
    #[inline]
    pub unsafe fn equals_same_type(self, other: RawHolderRef<'_, I>) -> bool {
        debug_assert_eq!(self.value_type_id(), other.value_type_id());
        let vtable = self.vtable();
        // SAFETY:
        // 1. The vtable returned by `self.vtable()` is guaranteed to match the data in
        //    the `HolderData` of `self`.
        // 2. `other` holds the same type, guaranteed by the caller.
        unsafe { vtable.equals(self, other) }
    }

    /// Asks the handler of `self` whether it equals the value held by
    /// `other`, which has a different concrete type.
    ///
    /// Returns `None` when the handler has no rule for that pair.
    #[inline]
    pub fn equals_foreign(self, other: RawHolderRef<'_, I>) -> Option<bool> {
        let vtable = self.vtable();
        let other = other.as_any();
        // SAFETY:
        // 1. The vtable returned by `self.vtable()` is guaranteed to match the data in
        //    the `HolderData`.
        unsafe { vtable.equals_foreign(self, other) }
    }

    /// Compares two holders of the same concrete type for strict ordering
    /// using the handler of `self`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `other` holds a value of the same concrete type as `self`.
    #[inline]
    pub unsafe fn less_same_type(self, other: RawHolderRef<'_, I>) -> bool {
        debug_assert_eq!(self.value_type_id(), other.value_type_id());
        let vtable = self.vtable();
        // SAFETY:
        // 1. The vtable returned by `self.vtable()` is guaranteed to match the data in
        //    the `HolderData` of `self`.
        // 2. `other` holds the same type, guaranteed by the caller.
        unsafe { vtable.less(self, other) }
    }

    /// Asks the handler of `self` whether it orders strictly before the value
    /// held by `other`, which has a different concrete type.
    ///
    /// Returns `None` when the handler has no rule for that pair.
    #[inline]
    pub fn less_foreign(self, other: RawHolderRef<'_, I>) -> Option<bool> {
        let vtable = self.vtable();
        let other = other.as_any();
        // SAFETY:
        // 1. The vtable returned by `self.vtable()` is guaranteed to match the data in
        //    the `HolderData`.
        unsafe { vtable.less_foreign(self, other) }
    }
}

/// A mutable lifetime-bound pointer to a [`HolderData`] that is guaranteed to
/// point to an initialized instance of a [`HolderData<I, T>`] for some
/// specific `T`, though we do not know which actual `T` it is.
///
/// We cannot use a [`&'a mut HolderData<I, T>`] directly, because that would
/// require us to know the actual type of the value, which we do not.
///
/// [`&'a mut HolderData<I, T>`]: HolderData
#[repr(transparent)]
pub struct RawHolderMut<'a, I: ?Sized + 'static> {
    /// Pointer to the inner holder data
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long as
    /// this struct exists:
    ///
    /// 1. The pointer must have been created from a `Box<HolderData<I, T>>`
    ///    for some `T` using `Box::into_raw`.
    /// 2. The pointer will point to the same `HolderData<I, T>` for the entire
    ///    lifetime of this object.
    /// 3. This pointer represents exclusive mutable access to the
    ///    `HolderData` for the lifetime `'a`.
    ptr: NonNull<HolderData<I, Erased>>,

    /// Marker to tell the compiler that we should
    /// behave the same as a `&'a mut HolderData<I, Erased>`
    _marker: PhantomData<&'a mut HolderData<I, Erased>>,
}

impl<'a, I: ?Sized + 'static> RawHolderMut<'a, I> {
    /// Casts the [`RawHolderMut`] to a mutable [`HolderData<I, T>`]
    /// reference.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The type `T` matches the actual value type stored in the
    ///    [`HolderData`].
    #[inline]
    pub(super) unsafe fn cast_inner<T: 'static>(self) -> &'a mut HolderData<I, T> {
        // Debug assertion to catch type mismatches in case of bugs
        debug_assert_eq!(self.as_ref().vtable().type_id(), TypeId::of::<T>());

        let mut this = self.ptr.cast::<HolderData<I, T>>();
        // SAFETY: Converting the NonNull pointer to a mutable reference is sound
        // because:
        // - The pointer is non-null, properly aligned, and dereferenceable (guaranteed
        //   by RawHolderMut's type invariants)
        // - The pointee is properly initialized (guaranteed by RawHolderMut's type
        //   invariants)
        // - The type `T` matches the actual value type (guaranteed by caller)
        // - Access is exclusive for 'a (guaranteed by RawHolderMut's type invariants)
        unsafe { this.as_mut() }
    }

    /// Reborrows as a shared [`RawHolderRef`].
    #[inline]
    pub fn as_ref(&self) -> RawHolderRef<'_, I> {
        RawHolderRef {
            ptr: self.ptr,
            _marker: PhantomData,
        }
    }

    /// Reborrows for a shorter lifetime.
    #[inline]
    pub fn reborrow(&mut self) -> RawHolderMut<'_, I> {
        RawHolderMut {
            ptr: self.ptr,
            _marker: PhantomData,
        }
    }

    /// Views the held value mutably through the interface `I`.
    #[inline]
    pub fn interface_mut(self) -> &'a mut I {
        let vtable = self.as_ref().vtable();
        // SAFETY:
        // 1. The vtable returned by `vtable()` is guaranteed to match the data in the
        //    `HolderData`.
        unsafe { vtable.as_interface_mut(self) }
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec::Vec};
    use core::{
        fmt::{Debug, Display},
        sync::atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::interface::Opaque;

    struct Plain;

    impl<T: PartialEq + PartialOrd> CompareHandler<T> for Plain {
        fn equals(value: &T, other: &T) -> bool {
            value == other
        }

        fn equals_foreign(_value: &T, _other: &(dyn Any + 'static)) -> Option<bool> {
            None
        }

        fn less(value: &T, other: &T) -> bool {
            value < other
        }

        fn less_foreign(_value: &T, _other: &(dyn Any + 'static)) -> Option<bool> {
            None
        }
    }

    #[test]
    fn test_raw_holder_size() {
        assert_eq!(
            core::mem::size_of::<RawHolder<dyn Display>>(),
            core::mem::size_of::<usize>()
        );
        assert_eq!(
            core::mem::size_of::<Option<RawHolder<dyn Display>>>(),
            core::mem::size_of::<usize>()
        );
        assert_eq!(
            core::mem::size_of::<RawHolderRef<'_, dyn Display>>(),
            core::mem::size_of::<usize>()
        );
        assert_eq!(
            core::mem::size_of::<RawHolderMut<'_, dyn Display>>(),
            core::mem::size_of::<usize>()
        );
    }

    #[test]
    fn test_raw_holder_get_refs() {
        let holder = RawHolder::<dyn Display>::new::<i32, Plain>(100);
        let holder_ref = holder.as_ref();

        assert_eq!(holder_ref.value_type_id(), TypeId::of::<i32>());
        assert!(holder_ref.value_type_name().contains("i32"));
        assert_eq!(alloc::format!("{}", holder_ref.interface()), "100");
        assert_eq!(holder_ref.as_any().downcast_ref::<i32>(), Some(&100));
    }

    #[test]
    fn test_raw_holder_interface_mut() {
        trait Counter {
            fn bump(&mut self);
            fn get(&self) -> u32;
        }

        #[derive(Clone, PartialEq, PartialOrd)]
        struct Hits(u32);

        impl Counter for Hits {
            fn bump(&mut self) {
                self.0 += 1;
            }

            fn get(&self) -> u32 {
                self.0
            }
        }

        impl Implements<dyn Counter> for Hits {
            fn as_interface(&self) -> &(dyn Counter + 'static) {
                self
            }

            fn as_interface_mut(&mut self) -> &mut (dyn Counter + 'static) {
                self
            }
        }

        let mut holder = RawHolder::<dyn Counter>::new::<Hits, Plain>(Hits(1));
        holder.as_mut().interface_mut().bump();
        holder.as_mut().interface_mut().bump();
        assert_eq!(holder.as_ref().interface().get(), 3);

        // SAFETY: The holder was created from a `Hits`
        let hits = unsafe { holder.as_mut().value_downcast_mut_unchecked::<Hits>() };
        hits.0 = 10;
        assert_eq!(holder.as_ref().interface().get(), 10);
    }

    #[test]
    fn test_raw_holder_clone_is_deep() {
        let holder = RawHolder::<dyn Debug>::new::<String, Plain>(String::from("left"));
        let mut copy = holder.as_ref().clone_holder();

        // SAFETY: The holder was created from a `String`
        unsafe { copy.as_mut().value_downcast_mut_unchecked::<String>() }.push_str("-right");

        assert_eq!(alloc::format!("{:?}", holder.as_ref().interface()), "\"left\"");
        assert_eq!(alloc::format!("{:?}", copy.as_ref().interface()), "\"left-right\"");
        assert!(core::ptr::eq(holder.as_ref().vtable(), copy.as_ref().vtable()));
    }

    #[test]
    fn test_raw_holder_drop_count() {
        static DROPS: AtomicUsize = AtomicUsize::new(0);

        #[derive(Clone, PartialEq, PartialOrd)]
        struct Tracked;

        impl Drop for Tracked {
            fn drop(&mut self) {
                DROPS.fetch_add(1, Ordering::SeqCst);
            }
        }

        let holder = RawHolder::<dyn Opaque>::new::<Tracked, Plain>(Tracked);
        let copies: Vec<_> = (0..3).map(|_| holder.as_ref().clone_holder()).collect();
        assert_eq!(DROPS.load(Ordering::SeqCst), 0);

        drop(copies);
        assert_eq!(DROPS.load(Ordering::SeqCst), 3);

        drop(holder);
        assert_eq!(DROPS.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_raw_holder_compare_same_type() {
        let a = RawHolder::<dyn Opaque>::new::<i32, Plain>(3);
        let b = RawHolder::<dyn Opaque>::new::<i32, Plain>(5);

        // SAFETY: Both holders hold an `i32`
        unsafe {
            assert!(!a.as_ref().equals_same_type(b.as_ref()));
        }
        // SAFETY: Both holders hold an `i32`
        unsafe {
            assert!(a.as_ref().less_same_type(b.as_ref()));
        }
        // SAFETY: Both holders hold an `i32`
        unsafe {
            assert!(!b.as_ref().less_same_type(a.as_ref()));
        }
    }

    #[test]
    fn test_raw_holder_compare_foreign_without_rule() {
        let a = RawHolder::<dyn Opaque>::new::<i32, Plain>(3);
        let b = RawHolder::<dyn Opaque>::new::<u8, Plain>(3);

        assert_eq!(a.as_ref().equals_foreign(b.as_ref()), None);
        assert_eq!(a.as_ref().less_foreign(b.as_ref()), None);
    }

    #[test]
    fn test_send_sync() {
        static_assertions::assert_not_impl_any!(RawHolder<dyn Opaque>: Send, Sync);
        static_assertions::assert_not_impl_any!(RawHolderRef<'static, dyn Opaque>: Send, Sync);
        static_assertions::assert_not_impl_any!(RawHolderMut<'static, dyn Opaque>: Send, Sync);
    }
}
