//! Storage for process-global registries that only ever grow.
//!
//! The registry value is created on the first insert. Lookups take the read
//! lock. Inserts take the write lock and look again before inserting.

#[cfg(feature = "std")]
use std::sync as impl_;

#[cfg(not(feature = "std"))]
use spin as impl_;

pub(crate) struct RegistryLock<T: 'static + Send + Sync>(impl_::RwLock<Option<T>>);

impl<T: Default + Send + Sync + 'static> RegistryLock<T> {
    #[must_use]
    pub(crate) const fn new() -> Self {
        Self(impl_::RwLock::new(None))
    }

    /// Returns what `find` reports for the registry, running `insert` under the
    /// write lock when nothing is found.
    ///
    /// The flag is `true` when this call ran `insert`. Both locks are released
    /// by the time this returns.
    pub(crate) fn find_or_insert<R>(
        &self,
        find: impl Fn(&T) -> Option<R>,
        insert: impl FnOnce(&mut T) -> R,
    ) -> (R, bool) {
        if let Some(found) = self.read().as_ref().and_then(&find) {
            return (found, false);
        }

        let mut guard = self.write();
        let registry = guard.get_or_insert_with(T::default);

        // Another thread may have inserted between the two locks
        if let Some(found) = find(registry) {
            return (found, false);
        }

        (insert(registry), true)
    }

    #[inline]
    fn read(&self) -> impl_::RwLockReadGuard<'_, Option<T>> {
        #[cfg(not(feature = "std"))]
        let guard = self.0.read();

        // A panicking `insert` can leave an entry unfinished but never removes
        // one, so lookups stay valid on a poisoned lock
        #[cfg(feature = "std")]
        let guard = self.0.read().unwrap_or_else(|poisoned| poisoned.into_inner());

        guard
    }

    #[inline]
    fn write(&self) -> impl_::RwLockWriteGuard<'_, Option<T>> {
        #[cfg(not(feature = "std"))]
        let guard = self.0.write();

        #[cfg(feature = "std")]
        let guard = self.0.write().unwrap_or_else(|poisoned| poisoned.into_inner());

        guard
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn test_insert_runs_once() {
        static LOCK: RegistryLock<Vec<u32>> = RegistryLock::new();
        let position_of_seven = |values: &Vec<u32>| values.iter().position(|&value| value == 7);

        let (first, inserted) = LOCK.find_or_insert(position_of_seven, |values| {
            values.push(7);
            values.len() - 1
        });
        assert!(inserted);
        assert_eq!(first, 0);

        let (again, inserted) =
            LOCK.find_or_insert(position_of_seven, |_| unreachable!("already present"));
        assert!(!inserted);
        assert_eq!(again, 0);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_usable_after_panicking_insert() {
        static LOCK: RegistryLock<Vec<u32>> = RegistryLock::new();
        let position_of_seven = |values: &Vec<u32>| values.iter().position(|&value| value == 7);

        let failed = std::thread::spawn(move || {
            LOCK.find_or_insert(position_of_seven, |_| panic!("insert failed"))
        })
        .join();
        assert!(failed.is_err());

        let (position, inserted) = LOCK.find_or_insert(position_of_seven, |values| {
            values.push(7);
            values.len() - 1
        });
        assert!(inserted);
        assert_eq!(position, 0);
    }
}
