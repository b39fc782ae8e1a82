use core::{any::TypeId, fmt, marker::PhantomData};

use anyface_internals::{RawHolder, RawHolderRef, interface::Implements};

use crate::{
    EmptyError, TypeTag, compare,
    handlers::Native,
    interface::Opaque,
    markers::{ComparableUnder, ComparisonPolicy, EqualityMarker, Full, OrderingMarker},
};

/// A type-erased value viewed through the interface `I` and compared under
/// the policy `P`.
///
/// An `AnyFace` owns zero or one value of some concrete type. The concrete
/// type is chosen at construction and hidden afterwards. Operations of `I`
/// are reached through [`call`](Self::call) and [`call_mut`](Self::call_mut)
/// (or through forwarding impls written on top of them), and comparisons
/// are available according to the policy `P`; see
/// [`markers`](crate::markers).
///
/// Cloning an `AnyFace` deep-clones the held value.
///
/// # Type Parameters
///
/// - `I`: the interface, a trait object type such as `dyn Display` or a
///   composite declared with [`interfaces!`](crate::interfaces!). Defaults to
///   [`dyn Opaque`](Opaque), the interface without operations.
/// - `P`: the comparison policy. Defaults to [`Full`].
///
/// # Examples
///
/// ```
/// use anyface::{AnyFace, implements};
///
/// trait Greet {
///     fn greet(&self, name: &str) -> String;
/// }
///
/// #[derive(Clone, PartialEq, PartialOrd)]
/// struct English;
///
/// #[derive(Clone, PartialEq, PartialOrd)]
/// struct Swedish;
///
/// impl Greet for English {
///     fn greet(&self, name: &str) -> String {
///         format!("Hello {name}")
///     }
/// }
///
/// impl Greet for Swedish {
///     fn greet(&self, name: &str) -> String {
///         format!("Hej {name}")
///     }
/// }
///
/// implements!(dyn Greet => English, Swedish);
///
/// let greeters: Vec<AnyFace<dyn Greet>> = vec![AnyFace::new(English), AnyFace::new(Swedish)];
/// let greetings: Vec<String> = greeters.iter().map(|g| g.call(|g| g.greet("Ada"))).collect();
///
/// assert_eq!(greetings, ["Hello Ada", "Hej Ada"]);
/// ```
pub struct AnyFace<I: ?Sized + 'static = dyn Opaque, P: 'static = Full> {
    content: Option<Content<I, P>>,
    _policy: PhantomData<fn() -> P>,
}

/// The tag and the holder of a non-empty [`AnyFace`].
///
/// The tag names the value type together with its comparison handler, so
/// two values share a tag only when they share both.
struct Content<I: ?Sized + 'static, P: 'static> {
    tag: TypeTag<AnyFace<I, P>>,
    raw: RawHolder<I>,
}

impl<I: ?Sized + 'static, P: ComparisonPolicy> AnyFace<I, P> {
    /// Creates an empty container.
    ///
    /// # Examples
    ///
    /// ```
    /// use anyface::AnyFace;
    ///
    /// let value: AnyFace = AnyFace::empty();
    /// assert!(value.is_empty());
    /// assert_eq!(value, AnyFace::default());
    /// ```
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            content: None,
            _policy: PhantomData,
        }
    }

    /// Creates a container holding `value`, compared with the value's own
    /// [`PartialEq`]/[`PartialOrd`] as far as the policy `P` needs them.
    ///
    /// # Examples
    ///
    /// ```
    /// use anyface::AnyFace;
    ///
    /// let value: AnyFace<dyn core::fmt::Display> = AnyFace::new(42);
    /// assert_eq!(value.call(|v| v.to_string()), "42");
    /// ```
    #[inline]
    pub fn new<T>(value: T) -> Self
    where
        T: Implements<I> + ComparableUnder<P, Native>,
    {
        Self::new_custom::<Native, T>(value)
    }

    /// Creates a container holding `value`, compared with the handler `H`.
    ///
    /// See [`handlers`](crate::handlers) for writing handlers.
    ///
    /// Values of the same type built with different handlers get different
    /// [`type_tag`](Self::type_tag)s, so comparing them goes through the
    /// cross-type rules of the handlers.
    #[inline]
    pub fn new_custom<H, T>(value: T) -> Self
    where
        H: 'static,
        T: Implements<I> + ComparableUnder<P, H>,
    {
        Self {
            content: Some(Content {
                tag: Self::tag_of_custom::<H, T>(),
                raw: <T as ComparableUnder<P, H>>::into_holder::<I>(value),
            }),
            _policy: PhantomData,
        }
    }

    /// Returns the tag of a `T` stored with [`new`](Self::new) in this
    /// container's family.
    ///
    /// # Examples
    ///
    /// ```
    /// use anyface::AnyFace;
    ///
    /// type Value = AnyFace;
    ///
    /// let value = Value::new(1u8);
    /// assert_eq!(value.type_tag(), Some(Value::tag_of::<u8>()));
    /// assert_ne!(value.type_tag(), Some(Value::tag_of::<u16>()));
    /// ```
    #[inline]
    pub fn tag_of<T: 'static>() -> TypeTag<Self> {
        Self::tag_of_custom::<Native, T>()
    }

    /// Returns the tag of a `T` stored with
    /// [`new_custom::<H, T>`](Self::new_custom) in this container's family.
    #[inline]
    pub fn tag_of_custom<H: 'static, T: 'static>() -> TypeTag<Self> {
        TypeTag::of::<(T, H)>()
    }
}

impl<I: ?Sized + 'static, P: 'static> AnyFace<I, P> {
    /// Returns `true` if the container holds no value.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
    }

    /// Drops the held value, if any, leaving the container empty.
    #[inline]
    pub fn clear(&mut self) {
        self.content = None;
    }

    /// Moves the held value out into a new container, leaving this one empty.
    #[inline]
    #[must_use]
    pub fn take(&mut self) -> Self {
        Self {
            content: self.content.take(),
            _policy: PhantomData,
        }
    }

    /// Returns the tag of the held value's concrete type, or `None` if empty.
    #[inline]
    pub fn type_tag(&self) -> Option<TypeTag<Self>> {
        self.content.as_ref().map(|content| content.tag)
    }

    /// Returns the [`TypeId`] of the held value, or `None` if empty.
    #[inline]
    pub fn inner_type_id(&self) -> Option<TypeId> {
        self.raw().map(RawHolderRef::value_type_id)
    }

    /// Returns the [`core::any::type_name`] of the held value, or `None` if
    /// empty.
    #[inline]
    pub fn inner_type_name(&self) -> Option<&'static str> {
        self.raw().map(RawHolderRef::value_type_name)
    }

    /// Returns `true` if the held value is a `T`.
    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.inner_type_id() == Some(TypeId::of::<T>())
    }

    /// Returns the held value if it is a `T`.
    #[inline]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.raw()?.as_any().downcast_ref::<T>()
    }

    /// Returns the held value mutably if it is a `T`.
    #[inline]
    pub fn downcast_mut<T: 'static>(&mut self) -> Option<&mut T> {
        if !self.is::<T>() {
            return None;
        }
        let content = self.content.as_mut()?;

        // SAFETY: The held value was just checked to be a `T`
        Some(unsafe { content.raw.as_mut().value_downcast_mut_unchecked::<T>() })
    }

    /// Views the held value through the interface, or `None` if empty.
    #[inline]
    pub fn interface(&self) -> Option<&I> {
        self.raw().map(RawHolderRef::interface)
    }

    /// Views the held value mutably through the interface, or `None` if
    /// empty.
    #[inline]
    pub fn interface_mut(&mut self) -> Option<&mut I> {
        self.content
            .as_mut()
            .map(|content| content.raw.as_mut().interface_mut())
    }

    /// Calls `f` with the held value viewed through the interface.
    ///
    /// This is the general way to reach an operation of `I`, including
    /// operations that take any number of extra arguments:
    ///
    /// ```
    /// use anyface::{AnyFace, implements};
    ///
    /// trait Scale {
    ///     fn scaled(&self, by: i32, plus: i32) -> i32;
    /// }
    ///
    /// impl Scale for i32 {
    ///     fn scaled(&self, by: i32, plus: i32) -> i32 {
    ///         self * by + plus
    ///     }
    /// }
    ///
    /// implements!(dyn Scale => i32);
    ///
    /// let value: AnyFace<dyn Scale> = AnyFace::new(4);
    /// assert_eq!(value.call(|v| v.scaled(10, 2)), 42);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the container is empty. Use [`try_call`](Self::try_call) to
    /// get an error instead.
    #[inline]
    #[track_caller]
    pub fn call<R>(&self, f: impl FnOnce(&I) -> R) -> R {
        match self.interface() {
            Some(interface) => f(interface),
            None => called_on_empty("call"),
        }
    }

    /// Calls `f` with the held value viewed mutably through the interface.
    ///
    /// # Panics
    ///
    /// Panics if the container is empty. Use
    /// [`try_call_mut`](Self::try_call_mut) to get an error instead.
    #[inline]
    #[track_caller]
    pub fn call_mut<R>(&mut self, f: impl FnOnce(&mut I) -> R) -> R {
        match self.interface_mut() {
            Some(interface) => f(interface),
            None => called_on_empty("call_mut"),
        }
    }

    /// Calls `f` with the held value viewed through the interface, or returns
    /// [`EmptyError`] if the container is empty.
    #[inline]
    pub fn try_call<R>(&self, f: impl FnOnce(&I) -> R) -> Result<R, EmptyError> {
        self.interface().map(f).ok_or(EmptyError)
    }

    /// Calls `f` with the held value viewed mutably through the interface,
    /// or returns [`EmptyError`] if the container is empty.
    #[inline]
    pub fn try_call_mut<R>(&mut self, f: impl FnOnce(&mut I) -> R) -> Result<R, EmptyError> {
        self.interface_mut().map(f).ok_or(EmptyError)
    }

    #[inline]
    fn raw(&self) -> Option<RawHolderRef<'_, I>> {
        self.content.as_ref().map(|content| content.raw.as_ref())
    }

    #[inline]
    pub(crate) fn parts(&self) -> Option<(TypeTag<Self>, RawHolderRef<'_, I>)> {
        self.content
            .as_ref()
            .map(|content| (content.tag, content.raw.as_ref()))
    }
}

impl<I: ?Sized + 'static, P: EqualityMarker> AnyFace<I, P> {
    /// Compares the held value with a raw value, as if the raw value had been
    /// erased with [`new`](Self::new).
    ///
    /// # Examples
    ///
    /// ```
    /// use anyface::AnyFace;
    ///
    /// let value: AnyFace = AnyFace::new(42);
    /// assert!(value.eq_value(&42));
    /// assert!(!value.eq_value(&42.0));
    /// ```
    pub fn eq_value<T>(&self, value: &T) -> bool
    where
        T: Implements<I> + ComparableUnder<P, Native>,
    {
        P::eq_erased(self, &Self::new(value.clone()))
    }
}

impl<I: ?Sized + 'static, P: OrderingMarker> AnyFace<I, P> {
    /// Orders the held value against a raw value, as if the raw value had
    /// been erased with [`new`](Self::new).
    pub fn cmp_value<T>(&self, value: &T) -> core::cmp::Ordering
    where
        T: Implements<I> + ComparableUnder<P, Native>,
    {
        compare::ordering(self, &Self::new(value.clone()))
    }
}

#[cold]
#[track_caller]
fn called_on_empty(method: &str) -> ! {
    panic!("`AnyFace::{method}` called on an empty value")
}

impl<I: ?Sized + 'static, P: 'static> Clone for AnyFace<I, P> {
    fn clone(&self) -> Self {
        Self {
            content: self.content.as_ref().map(|content| Content {
                tag: content.tag,
                raw: content.raw.as_ref().clone_holder(),
            }),
            _policy: PhantomData,
        }
    }
}

impl<I: ?Sized + 'static, P: ComparisonPolicy> Default for AnyFace<I, P> {
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl<I: ?Sized + 'static, P: 'static> fmt::Debug for AnyFace<I, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.parts() {
            Some((tag, raw)) => f
                .debug_struct("AnyFace")
                .field("type", &raw.value_type_name())
                .field("tag", &tag.index())
                .finish(),
            None => f.write_str("AnyFace(<empty>)"),
        }
    }
}

/// Displays the held value. An empty container displays as nothing.
impl<P: 'static> fmt::Display for AnyFace<dyn fmt::Display, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.interface() {
            Some(value) => fmt::Display::fmt(value, f),
            None => Ok(()),
        }
    }
}

impl<I: ?Sized + 'static, P: EqualityMarker> PartialEq for AnyFace<I, P> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        P::eq_erased(self, other)
    }
}

impl<I: ?Sized + 'static, P: OrderingMarker> Eq for AnyFace<I, P> {}

impl<I: ?Sized + 'static, P: OrderingMarker> PartialOrd for AnyFace<I, P> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }

    #[inline]
    fn lt(&self, other: &Self) -> bool {
        compare::less(self, other)
    }

    #[inline]
    fn le(&self, other: &Self) -> bool {
        !compare::less(other, self)
    }

    #[inline]
    fn gt(&self, other: &Self) -> bool {
        compare::less(other, self)
    }

    #[inline]
    fn ge(&self, other: &Self) -> bool {
        !compare::less(self, other)
    }
}

impl<I: ?Sized + 'static, P: OrderingMarker> Ord for AnyFace<I, P> {
    #[inline]
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        compare::ordering(self, other)
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec, vec::Vec};
    use core::{any::Any, fmt::Display};

    use super::*;
    use crate::markers::{EqualityOnly, Incomparable, OrderingOnly};

    #[test]
    fn test_size() {
        assert_eq!(
            core::mem::size_of::<AnyFace<dyn Display>>(),
            core::mem::size_of::<(u64, usize)>()
        );
    }

    #[test]
    fn test_send_sync() {
        static_assertions::assert_not_impl_any!(AnyFace<dyn Any>: Send, Sync);
    }

    #[test]
    fn test_empty_state_machine() {
        let mut value: AnyFace<dyn Display> = AnyFace::empty();
        assert!(value.is_empty());
        assert_eq!(value.type_tag(), None);
        assert_eq!(value.inner_type_name(), None);

        value = AnyFace::new(5);
        assert!(!value.is_empty());
        assert_eq!(value.to_string(), "5");

        let moved = value.take();
        assert!(value.is_empty());
        assert_eq!(moved.to_string(), "5");

        let mut moved = moved;
        moved.clear();
        assert!(moved.is_empty());
    }

    #[test]
    fn test_downcast() {
        let mut value: AnyFace<dyn Any, Incomparable> = AnyFace::new(vec![1, 2]);

        assert!(value.is::<Vec<i32>>());
        assert!(!value.is::<Vec<u32>>());
        assert_eq!(value.downcast_ref::<Vec<u32>>(), None);

        value.downcast_mut::<Vec<i32>>().unwrap().push(3);
        assert_eq!(value.downcast_ref::<Vec<i32>>(), Some(&vec![1, 2, 3]));
    }

    #[test]
    fn test_empty_comparisons() {
        let empty: AnyFace = AnyFace::empty();
        let other_empty: AnyFace = AnyFace::empty();
        let one: AnyFace = AnyFace::new(1);

        assert_eq!(empty, other_empty);
        assert_ne!(empty, one);
        assert!(empty < one);
        assert!(!(one < empty));
        assert!(!(empty < other_empty));
    }

    #[test]
    fn test_ordering_only_equivalence() {
        let a: AnyFace<dyn Any, OrderingOnly> = AnyFace::new(2.0f64);
        let b: AnyFace<dyn Any, OrderingOnly> = AnyFace::new(2.0f64);
        let nan: AnyFace<dyn Any, OrderingOnly> = AnyFace::new(f64::NAN);

        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), core::cmp::Ordering::Equal);
        // `NaN` is unordered with everything, so it is equivalent to it
        assert_eq!(a, nan);
    }

    #[test]
    fn test_equality_only_cross_type() {
        let a: AnyFace<dyn Any, EqualityOnly> = AnyFace::new(7u8);
        let b: AnyFace<dyn Any, EqualityOnly> = AnyFace::new(7u16);

        assert_ne!(a, b);
        assert!(a.eq_value(&7u8));
    }

    #[test]
    fn test_debug() {
        let value: AnyFace = AnyFace::new(3u32);
        let rendered = alloc::format!("{value:?}");
        assert!(rendered.starts_with("AnyFace { type: \"u32\""));
        assert_eq!(alloc::format!("{:?}", AnyFace::<dyn Opaque>::empty()), "AnyFace(<empty>)");
    }
}
