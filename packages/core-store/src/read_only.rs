//! Read-only wrapper over any store.

use std::rc::Rc;

use crate::{Child, Path, SharedStore, Value, ValueKind, ValueStore};

/// Wraps a store to reject all writes.
///
/// Reads are forwarded unchanged. Children are wrapped as well, so no path
/// reached through a `ReadOnly` store can be written.
pub struct ReadOnly {
    inner: SharedStore,
}

impl ReadOnly {
    /// Create a new read-only wrapper.
    pub fn new(inner: SharedStore) -> Self {
        Self { inner }
    }

    /// Get a reference to the inner store.
    pub fn inner(&self) -> &SharedStore {
        &self.inner
    }
}

impl ValueStore for ReadOnly {
    fn has_key(&self, path: &Path) -> bool {
        self.inner.has_key(path)
    }

    fn leaf(&self, path: &Path) -> Option<Value> {
        self.inner.leaf(path)
    }

    fn get_as(&self, path: &Path, kind: ValueKind) -> Option<Value> {
        self.inner.get_as(path, kind)
    }

    fn children(&self, path: &Path) -> Vec<Child> {
        self.inner
            .children(path)
            .into_iter()
            .map(|child| {
                let (key, store) = child.into_parts();
                Child::new(key, Rc::new(ReadOnly::new(store)))
            })
            .collect()
    }

    fn child_keys(&self, path: &Path) -> Vec<String> {
        self.inner.child_keys(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{path, Error, PropertyTree, TreeStore, TypedStore, ValueStoreRef};

    fn wrapped() -> (Rc<std::cell::RefCell<PropertyTree>>, ReadOnly) {
        let tree = PropertyTree::new().into_shared();
        tree.borrow_mut().set_double("d", 0.1);
        tree.borrow_mut().set_int("d/i", 10);
        let store = ReadOnly::new(Rc::new(TreeStore::shared(tree.clone())));
        (tree, store)
    }

    #[test]
    fn reads_pass_through() {
        let (_, store) = wrapped();
        assert!(store.has_key(&path!("d/i")));
        assert_eq!(store.get::<f64>(&path!("d")), 0.1);
        assert_eq!(store.get::<f64>(&path!("d/i")), 10.0);
        assert!(store.inner().is_extendible());
    }

    #[test]
    fn writes_are_rejected() {
        let (tree, store) = wrapped();
        assert!(!store.is_extendible());
        assert!(matches!(
            store.set(&path!("d"), 1.0),
            Err(Error::Unsupported { .. })
        ));
        assert_eq!(tree.borrow().get_double("d").unwrap(), 0.1);
    }

    #[test]
    fn children_are_read_only_too() {
        let (_, store) = wrapped();
        let root = ValueStoreRef::from_store(store);
        let children = root.store().children(&path!(""));
        assert_eq!(children.len(), 1);
        let d = children[0].store();
        assert!(!d.is_extendible());
        assert!(matches!(
            d.add(&path!("x"), 1),
            Err(Error::Unsupported { operation: "add", .. })
        ));
        assert_eq!(d.get::<i64>(&path!("i")), 10);
    }
}
