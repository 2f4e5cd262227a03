//! # Shared Store Handle
//!
//! The Entity Store is a single in-memory instance. Front-ends that serve
//! more than one caller share it through [`SharedStore`], which serializes
//! every read and mutation behind one lock so a caller never observes a
//! half-applied update.

use std::sync::{Arc, Mutex};

use crate::store::EntityStore;

/// Cloneable handle to the one Entity Store.
///
/// ## Thread Safety
/// `Arc<Mutex<EntityStore>>`: mutations are short and derivations read the
/// whole store, so a plain mutex is enough.
#[derive(Debug, Clone)]
pub struct SharedStore {
    store: Arc<Mutex<EntityStore>>,
}

impl SharedStore {
    pub fn new(store: EntityStore) -> Self {
        SharedStore {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Executes a function with read access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let summary = shared.with_store(|store| dashboard(&store.dashboard_source(), today));
    /// ```
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&EntityStore) -> R,
    {
        let store = self.store.lock().expect("Store mutex poisoned");
        f(&store)
    }

    /// Executes a function with write access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// shared.with_store_mut(|store| store.add_customer(new))?;
    /// ```
    pub fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut EntityStore) -> R,
    {
        let mut store = self.store.lock().expect("Store mutex poisoned");
        f(&mut store)
    }
}

impl Default for SharedStore {
    fn default() -> Self {
        Self::new(EntityStore::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures::new_customer;
    use std::thread;

    #[test]
    fn test_clones_share_one_store() {
        let shared = SharedStore::default();
        let other = shared.clone();

        other
            .with_store_mut(|store| store.add_customer(new_customer("Ahmed Hassan")))
            .unwrap();

        assert_eq!(shared.with_store(|store| store.customers().len()), 1);
    }

    #[test]
    fn test_concurrent_adds() {
        let shared = SharedStore::default();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || {
                    shared
                        .with_store_mut(|store| store.add_customer(new_customer(&format!("Customer {}", i))))
                        .unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        shared.with_store(|store| {
            assert_eq!(store.customers().len(), 4);
            let mut ids: Vec<_> = store.customers().iter().map(|c| c.id.clone()).collect();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), 4);
        });
    }
}
