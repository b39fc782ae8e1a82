/// Declares a composite interface made of several interface traits.
///
/// The generated trait has the listed traits as supertraits and a blanket
/// implementation for every type implementing all of them, so `dyn
/// Composite` offers every operation of every member. Members are given as
/// trait names in scope.
///
/// # Examples
///
/// ```
/// use anyface::interfaces;
///
/// pub trait Calculation {
///     fn calculate(&self) -> i32;
/// }
///
/// pub trait Describe {
///     fn describe(&self) -> String;
/// }
///
/// interfaces! {
///     /// Everything a cell can do.
///     pub trait CellBehavior: Calculation + Describe;
/// }
///
/// impl Calculation for i32 {
///     fn calculate(&self) -> i32 {
///         *self
///     }
/// }
///
/// impl Describe for i32 {
///     fn describe(&self) -> String {
///         self.to_string()
///     }
/// }
///
/// let cell: &dyn CellBehavior = &7;
/// assert_eq!(cell.calculate(), 7);
/// assert_eq!(cell.describe(), "7");
/// ```
#[macro_export]
macro_rules! interfaces {
    ($(#[$meta:meta])* $vis:vis trait $name:ident: $first:ident $(+ $rest:ident)* $(;)?) => {
        $(#[$meta])*
        $vis trait $name: $first $(+ $rest)* {}

        impl<__T: ?::core::marker::Sized + $first $(+ $rest)*> $name for __T {}
    };
}

/// Declares that concrete types can be stored behind the interface `dyn I`.
///
/// This generates an [`Implements<dyn I>`](crate::Implements) impl for each
/// listed type. Each type must implement the trait `I`.
///
/// # Examples
///
/// ```
/// use anyface::{AnyFace, implements};
///
/// pub trait Named {
///     fn name(&self) -> &'static str;
/// }
///
/// #[derive(Clone, PartialEq, PartialOrd)]
/// struct Cat;
///
/// #[derive(Clone, PartialEq, PartialOrd)]
/// struct Owl;
///
/// impl Named for Cat {
///     fn name(&self) -> &'static str {
///         "cat"
///     }
/// }
///
/// impl Named for Owl {
///     fn name(&self) -> &'static str {
///         "owl"
///     }
/// }
///
/// implements!(dyn Named => Cat, Owl);
///
/// let pet: AnyFace<dyn Named> = AnyFace::new(Owl);
/// assert_eq!(pet.call(|pet| pet.name()), "owl");
/// ```
#[macro_export]
macro_rules! implements {
    (dyn $interface:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Implements<dyn $interface> for $ty {
                #[inline]
                fn as_interface(&self) -> &(dyn $interface + 'static) {
                    self
                }

                #[inline]
                fn as_interface_mut(&mut self) -> &mut (dyn $interface + 'static) {
                    self
                }
            }
        )+
    };
}
