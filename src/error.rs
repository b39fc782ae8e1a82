/// Error returned by [`AnyFace::try_call`](crate::AnyFace::try_call) and
/// [`AnyFace::try_call_mut`](crate::AnyFace::try_call_mut) when the container
/// holds no value.
///
/// # Examples
///
/// ```
/// use anyface::{AnyFace, EmptyError};
///
/// let empty: AnyFace<dyn core::fmt::Display> = AnyFace::empty();
/// assert_eq!(empty.try_call(|value| value.to_string()), Err(EmptyError));
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub struct EmptyError;

impl core::fmt::Debug for EmptyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EmptyError").finish()
    }
}

impl core::fmt::Display for EmptyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "operation called on an empty AnyFace")
    }
}

impl core::error::Error for EmptyError {}
