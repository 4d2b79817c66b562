//! ValueStoreRef: a scoped view of a store at a base path.
//!
//! A reference pairs a shared store with a base path. Navigating to a child
//! only extends the path; the store handle is shared and the data is never
//! copied. Because the handle is always the original store, a view into a
//! [`LayeredStore`](crate::LayeredStore) stays layered at every depth.

use std::fmt;
use std::rc::Rc;

use crate::{
    Error, FromValue, Lookup, Node, Path, PropertyTree, SharedStore, TypedStore, Value,
    ValueStore,
};

/// A lightweight handle to the subtree of a store at a base path.
///
/// Cloning a reference clones the handle, not the data. Dropping it never
/// destroys a store that is still held elsewhere.
///
/// # Example
///
/// ```rust
/// use valuestore_core::{PropertyTree, TreeStore, ValueStoreRef};
///
/// let mut pt = PropertyTree::new();
/// pt.set_double("d", 0.1);
/// pt.set_double("d/d", 0.2);
/// pt.set_double("d/d/d", 0.3);
/// let root = ValueStoreRef::from_store(TreeStore::new(pt));
///
/// let d = root.child("d");
/// assert_eq!(d.key(), Some("d"));
/// assert_eq!(d.get_double(""), 0.1);
/// assert_eq!(d.child("d").get_double("d"), 0.3);
/// assert_eq!(root.get_double("d/d"), d.child("d").get_double(""));
/// ```
#[derive(Clone)]
pub struct ValueStoreRef {
    store: SharedStore,
    base: Path,
}

impl ValueStoreRef {
    /// A reference to the root of a shared store.
    pub fn new(store: SharedStore) -> Self {
        Self::at(store, Path::root())
    }

    /// A reference to the root of a store it takes over.
    pub fn from_store<S: ValueStore + 'static>(store: S) -> Self {
        Self::new(Rc::new(store))
    }

    /// A reference to `base` within a shared store.
    pub fn at(store: SharedStore, base: Path) -> Self {
        Self { store, base }
    }

    /// The underlying store handle.
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// The base path of this view within the store.
    pub fn base_path(&self) -> &Path {
        &self.base
    }

    /// The key of this view under its parent; `None` at the store root.
    pub fn key(&self) -> Option<&str> {
        self.base.last()
    }

    fn resolve(&self, relative: &str) -> Path {
        self.base.child(relative)
    }

    /// A view of the child at `segment`.
    ///
    /// Existence is not checked here; a missing child simply reads as absent.
    /// A segment containing `/` descends several levels.
    pub fn child(&self, segment: &str) -> ValueStoreRef {
        Self::at(self.store.clone(), self.resolve(segment))
    }

    /// Views of the direct children, in the order the store reports them.
    ///
    /// A key that no path can address (empty, or containing `/`) is skipped.
    pub fn children(&self) -> Vec<ValueStoreRef> {
        self.store
            .child_keys(&self.base)
            .into_iter()
            .filter_map(|key| match self.base.try_child(&key) {
                Ok(base) => Some(Self::at(self.store.clone(), base)),
                Err(error) => {
                    log::warn!("Skipping child of '{}': {}", self.base, error);
                    None
                }
            })
            .collect()
    }

    /// Whether a node exists at `relative`, whatever its type.
    pub fn has_key(&self, relative: &str) -> bool {
        self.store.has_key(&self.resolve(relative))
    }

    /// Read the leaf at `relative` as `T`.
    pub fn get<T: FromValue>(&self, relative: &str) -> Lookup<T> {
        self.store.get(&self.resolve(relative))
    }

    /// The raw leaf value at `relative`.
    pub fn leaf(&self, relative: &str) -> Option<Value> {
        self.store.leaf(&self.resolve(relative))
    }

    pub fn get_bool(&self, relative: &str) -> Lookup<bool> {
        self.get(relative)
    }

    pub fn get_int(&self, relative: &str) -> Lookup<i64> {
        self.get(relative)
    }

    pub fn get_double(&self, relative: &str) -> Lookup<f64> {
        self.get(relative)
    }

    pub fn get_string(&self, relative: &str) -> Lookup<String> {
        self.get(relative)
    }

    /// Whether the underlying store accepts writes.
    pub fn is_extendible(&self) -> bool {
        self.store.is_extendible()
    }

    /// Create or replace the leaf at `relative`.
    pub fn set<T: Into<Value>>(&self, relative: &str, value: T) -> Result<(), Error> {
        self.store.set(&self.resolve(relative), value)
    }

    /// Create the leaf at `relative`, failing if a value is already there.
    pub fn add<T: Into<Value>>(&self, relative: &str, value: T) -> Result<(), Error> {
        self.store.add(&self.resolve(relative), value)
    }

    pub fn add_bool(&self, relative: &str, value: bool) -> Result<(), Error> {
        self.add(relative, value)
    }

    pub fn add_int(&self, relative: &str, value: i64) -> Result<(), Error> {
        self.add(relative, value)
    }

    pub fn add_double(&self, relative: &str, value: f64) -> Result<(), Error> {
        self.add(relative, value)
    }

    pub fn add_string(&self, relative: &str, value: impl Into<String>) -> Result<(), Error> {
        self.add(relative, Value::String(value.into()))
    }

    /// Copy this view's subtree into an independent [`PropertyTree`].
    ///
    /// The view's own node becomes the root of the snapshot, so every path is
    /// relative to this view. The snapshot shares nothing with the store:
    /// later writes to either side are not seen by the other.
    ///
    /// Each node copies the store's raw [`leaf`](ValueStore::leaf). Over a
    /// layered store that is the value of the first layer holding one, so a
    /// value a lower layer only provides through per-type fallthrough is not
    /// in the snapshot. Children whose keys no path can address are skipped.
    pub fn as_tree(&self) -> PropertyTree {
        let mut root = Node::new();
        copy_subtree(self.store.as_ref(), &self.base, &mut root);
        PropertyTree::from_node(root)
    }
}

fn copy_subtree(store: &dyn ValueStore, path: &Path, into: &mut Node) {
    if let Some(value) = store.leaf(path) {
        into.set_value(value);
    }
    for key in store.child_keys(path) {
        match (path.try_child(&key), into.child_entry(&key)) {
            (Ok(child_path), Ok(node)) => copy_subtree(store, &child_path, node),
            (Err(error), _) | (_, Err(error)) => {
                log::warn!("Skipping child of '{}': {}", path, error);
            }
        }
    }
}

impl fmt::Debug for ValueStoreRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueStoreRef")
            .field("base", &self.base.to_string())
            .field("extendible", &self.store.is_extendible())
            .finish()
    }
}

impl From<SharedStore> for ValueStoreRef {
    fn from(store: SharedStore) -> Self {
        Self::new(store)
    }
}
