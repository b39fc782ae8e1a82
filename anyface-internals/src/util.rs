//! Internal utility types.

/// Marker type used when type-erasing held values.
///
/// This zero-sized type is a placeholder in generic type parameters once the
/// actual concrete type has been erased. `HolderData<I, Erased>` is a holder
/// whose concrete value type is unknown at the current scope.
pub(crate) struct Erased;
