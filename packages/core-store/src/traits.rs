//! Core traits: ValueStore and its typed extension.

use std::fmt;
use std::rc::Rc;

use crate::{Error, FromValue, Lookup, Path, Value, ValueKind};

/// A shared handle to any value store.
///
/// Layers, references and children all hold stores through this handle. A
/// store lives as long as any handle to it does.
pub type SharedStore = Rc<dyn ValueStore>;

/// A direct child of a node: its key segment and a store rooted at it.
#[derive(Clone)]
pub struct Child {
    key: String,
    store: SharedStore,
}

impl Child {
    pub fn new(key: impl Into<String>, store: SharedStore) -> Self {
        Self {
            key: key.into(),
            store,
        }
    }

    /// The key segment of this child under its parent.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// A store whose root is this child.
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn into_parts(self) -> (String, SharedStore) {
        (self.key, self.store)
    }
}

impl fmt::Debug for Child {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Child")
            .field("key", &self.key)
            .field("extendible", &self.store.is_extendible())
            .finish()
    }
}

/// Path-addressed, typed access to hierarchical data.
///
/// Every backing adapter and every composite store implements this trait.
/// Paths are relative to the store's own root; the empty path is the root.
///
/// Reads never fail: a missing node is `false`, `None` or an empty list.
/// Mutation is optional. Stores that cannot be written keep the default
/// `set_value`/`add_value`, which fail with [`Error::Unsupported`].
///
/// # Object Safety
///
/// This trait is object-safe: stores are shared as `Rc<dyn ValueStore>`.
pub trait ValueStore {
    /// Whether a node (leaf or internal) exists at `path`, whatever its type.
    fn has_key(&self, path: &Path) -> bool;

    /// The raw leaf value at `path`, if the node there holds one.
    fn leaf(&self, path: &Path) -> Option<Value>;

    /// The leaf at `path` read as `kind`.
    ///
    /// `None` if there is no leaf or it cannot be read as `kind` (see
    /// [`Value::coerce`]).
    fn get_as(&self, path: &Path, kind: ValueKind) -> Option<Value> {
        self.leaf(path).and_then(|value| value.coerce(kind))
    }

    /// The direct children of the node at `path`, in insertion order.
    ///
    /// Empty if the node has no children or does not exist.
    fn children(&self, path: &Path) -> Vec<Child>;

    /// The keys of the direct children at `path`, in the order of `children`.
    ///
    /// Stores override this when they can list keys without building a
    /// store per child.
    fn child_keys(&self, path: &Path) -> Vec<String> {
        self.children(path)
            .into_iter()
            .map(|child| child.into_parts().0)
            .collect()
    }

    /// Create or replace the leaf at `path`, creating intermediate nodes.
    fn set_value(&self, path: &Path, _value: Value) -> Result<(), Error> {
        Err(Error::unsupported("set", path))
    }

    /// Create the leaf at `path`.
    ///
    /// Fails with [`Error::AlreadyExists`] if the node already holds a value.
    fn add_value(&self, path: &Path, _value: Value) -> Result<(), Error> {
        Err(Error::unsupported("add", path))
    }

    /// Whether `set_value`/`add_value` are supported.
    fn is_extendible(&self) -> bool {
        false
    }
}

/// Generic typed access for every [`ValueStore`].
///
/// This trait is automatically implemented for all stores, including
/// `dyn ValueStore`.
///
/// # Example
///
/// ```rust
/// use valuestore_core::{path, PropertyTree, TreeStore, TypedStore};
///
/// let store = TreeStore::new(PropertyTree::new());
/// store.set(&path!("d/i"), 10).unwrap();
///
/// assert_eq!(store.get::<i64>(&path!("d/i")), 10);
/// assert_eq!(store.get::<f64>(&path!("d/i")), 10.0);
/// assert!(store.get::<bool>(&path!("d/i")).is_absent());
/// ```
pub trait TypedStore: ValueStore {
    /// Read the leaf at `path` as `T`.
    fn get<T: FromValue>(&self, path: &Path) -> Lookup<T> {
        let value = self.get_as(path, T::KIND).and_then(T::from_value);
        Lookup::from_option(path.clone(), value)
    }

    /// Create or replace the leaf at `path`.
    fn set<T: Into<Value>>(&self, path: &Path, value: T) -> Result<(), Error> {
        self.set_value(path, value.into())
    }

    /// Create the leaf at `path`, failing if one is already there.
    fn add<T: Into<Value>>(&self, path: &Path, value: T) -> Result<(), Error> {
        self.add_value(path, value.into())
    }
}

// Blanket implementation for all stores
impl<S: ValueStore + ?Sized> TypedStore for S {}

// Blanket implementations for shared and boxed stores

impl<S: ValueStore + ?Sized> ValueStore for Rc<S> {
    fn has_key(&self, path: &Path) -> bool {
        self.as_ref().has_key(path)
    }

    fn leaf(&self, path: &Path) -> Option<Value> {
        self.as_ref().leaf(path)
    }

    fn get_as(&self, path: &Path, kind: ValueKind) -> Option<Value> {
        self.as_ref().get_as(path, kind)
    }

    fn children(&self, path: &Path) -> Vec<Child> {
        self.as_ref().children(path)
    }

    fn child_keys(&self, path: &Path) -> Vec<String> {
        self.as_ref().child_keys(path)
    }

    fn set_value(&self, path: &Path, value: Value) -> Result<(), Error> {
        self.as_ref().set_value(path, value)
    }

    fn add_value(&self, path: &Path, value: Value) -> Result<(), Error> {
        self.as_ref().add_value(path, value)
    }

    fn is_extendible(&self) -> bool {
        self.as_ref().is_extendible()
    }
}

impl<S: ValueStore + ?Sized> ValueStore for Box<S> {
    fn has_key(&self, path: &Path) -> bool {
        self.as_ref().has_key(path)
    }

    fn leaf(&self, path: &Path) -> Option<Value> {
        self.as_ref().leaf(path)
    }

    fn get_as(&self, path: &Path, kind: ValueKind) -> Option<Value> {
        self.as_ref().get_as(path, kind)
    }

    fn children(&self, path: &Path) -> Vec<Child> {
        self.as_ref().children(path)
    }

    fn child_keys(&self, path: &Path) -> Vec<String> {
        self.as_ref().child_keys(path)
    }

    fn set_value(&self, path: &Path, value: Value) -> Result<(), Error> {
        self.as_ref().set_value(path, value)
    }

    fn add_value(&self, path: &Path, value: Value) -> Result<(), Error> {
        self.as_ref().add_value(path, value)
    }

    fn is_extendible(&self) -> bool {
        self.as_ref().is_extendible()
    }
}
