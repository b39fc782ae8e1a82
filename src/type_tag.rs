//! Per-family identifiers for concrete types.
//!
//! A [`TypeTag<F>`] names a concrete type within a *family* `F`. Every
//! [`AnyFace<I, P>`](crate::AnyFace) instantiation is its own family, so tags
//! handed out for one erased container type are never mixed up with tags of
//! another.
//!
//! Tags are assigned lazily. The first time a type is asked about within a
//! family it receives the next free index, starting at `1`. It keeps that
//! index for the rest of the process. The ordering of tags is therefore the
//! order of first use, which makes it a total order suitable as a tiebreak
//! when comparing values of different types.
//!
//! # Examples
//!
//! ```
//! use anyface::TypeTag;
//!
//! struct Shapes;
//!
//! let circle = TypeTag::<Shapes>::of::<f32>();
//! let square = TypeTag::<Shapes>::of::<u32>();
//!
//! assert_eq!(circle, TypeTag::<Shapes>::of::<f32>());
//! assert_eq!(circle, TypeTag::<Shapes>::of_val(&1.5f32));
//! assert_ne!(circle, square);
//! assert!(circle < square || square < circle);
//! ```

use core::{
    any::{TypeId, type_name},
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
};

use hashbrown::HashMap;
use rustc_hash::FxBuildHasher;

use crate::registry_lock::RegistryLock;

/// Identifier of a concrete type within the family `F`.
///
/// Two tags of the same family are equal exactly when they name the same
/// concrete type. Tags of different families are different Rust types and
/// cannot be compared with each other.
pub struct TypeTag<F> {
    index: u64,
    _family: PhantomData<fn() -> F>,
}

impl<F: 'static> TypeTag<F> {
    /// Returns the tag of `T` in this family, assigning one on first use.
    ///
    /// Safe to call from several threads at once: each type is assigned
    /// exactly one tag.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            index: tag_index::<F, T>(),
            _family: PhantomData,
        }
    }

    /// Returns the tag of the referent type of `value`.
    ///
    /// Asking through a reference names the same type as asking for the value
    /// type itself.
    pub fn of_val<T: ?Sized + 'static>(_value: &T) -> Self {
        Self::of::<T>()
    }
}

impl<F> TypeTag<F> {
    /// The raw index of this tag. Indices start at `1` and grow in order of
    /// first use within the family.
    #[inline]
    pub const fn index(self) -> u64 {
        self.index
    }
}

impl<F> Clone for TypeTag<F> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<F> Copy for TypeTag<F> {}

impl<F> PartialEq for TypeTag<F> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<F> Eq for TypeTag<F> {}

impl<F> PartialOrd for TypeTag<F> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<F> Ord for TypeTag<F> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl<F> Hash for TypeTag<F> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<F> fmt::Debug for TypeTag<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeTag").field(&self.index).finish()
    }
}

#[derive(Default)]
struct TagRegistry {
    /// Assigned tags, keyed by `(family, type)`
    tags: HashMap<(TypeId, TypeId), u64, FxBuildHasher>,
    /// Last index handed out per family
    counters: HashMap<TypeId, u64, FxBuildHasher>,
}

static REGISTRY: RegistryLock<TagRegistry> = RegistryLock::new();

fn tag_index<F: 'static, T: ?Sized + 'static>() -> u64 {
    let key = (TypeId::of::<F>(), TypeId::of::<T>());

    let (index, assigned) = REGISTRY.find_or_insert(
        |registry| registry.tags.get(&key).copied(),
        |registry| {
            let counter = registry.counters.entry(key.0).or_insert(0);
            *counter += 1;
            registry.tags.insert(key, *counter);
            *counter
        },
    );

    if assigned {
        tracing::trace!(
            family = type_name::<F>(),
            value_type = type_name::<T>(),
            tag = index,
            "assigned type tag"
        );
    }

    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_family_starts_at_one() {
        struct Family;

        let first = TypeTag::<Family>::of::<u8>();
        let second = TypeTag::<Family>::of::<u16>();
        let third = TypeTag::<Family>::of::<u32>();

        assert_eq!(first.index(), 1);
        assert_eq!(second.index(), 2);
        assert_eq!(third.index(), 3);
        assert_eq!(TypeTag::<Family>::of::<u16>().index(), 2);
    }

    #[test]
    fn test_families_are_independent() {
        struct Left;
        struct Right;

        let left = TypeTag::<Left>::of::<str>();
        let right = TypeTag::<Right>::of::<bool>();
        let right_str = TypeTag::<Right>::of::<str>();

        assert_eq!(left.index(), 1);
        assert_eq!(right.index(), 1);
        assert_eq!(right_str.index(), 2);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_concurrent_first_use() {
        struct Raced;

        let handles: std::vec::Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| TypeTag::<Raced>::of::<[u8; 3]>().index()))
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 1);
        }
        assert_eq!(TypeTag::<Raced>::of::<[u8; 4]>().index(), 2);
    }

    #[test]
    fn test_tag_size() {
        assert_eq!(
            core::mem::size_of::<TypeTag<()>>(),
            core::mem::size_of::<u64>()
        );
    }
}
