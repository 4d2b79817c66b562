//! LayeredStore: resolve every key against an ordered stack of stores.
//!
//! Layer 0 has the highest precedence. Resolution is per key and per
//! requested type: a layer that holds a node at the path but cannot provide
//! the requested type does not stop the search, the next layer is asked.
//! Sibling structure from different layers is never merged into values; only
//! the list of children is a union.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::{Child, Error, Path, SharedStore, Value, ValueKind, ValueStore};

/// A read-only composition of stores ordered by precedence.
///
/// The layer sequence is fixed at construction. Each layer is shared, so it
/// stays alive as long as anyone else holds it, independently of this store.
/// Writes are rejected with [`Error::Unsupported`]; write to a layer directly.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use valuestore_core::{LayeredStore, PropertyTree, SharedStore, TreeStore, ValueStoreRef};
///
/// let mut defaults = PropertyTree::new();
/// defaults.set_double("a", 0.1);
/// defaults.set_double("d", 1.0);
/// let mut overrides = PropertyTree::new();
/// overrides.set_double("d", 0.1);
///
/// let top: SharedStore = Rc::new(TreeStore::new(overrides));
/// let bottom: SharedStore = Rc::new(TreeStore::new(defaults));
/// let layered = LayeredStore::new(vec![top, bottom]).unwrap();
/// let root = ValueStoreRef::from_store(layered);
///
/// assert_eq!(root.get_double("d"), 0.1);
/// assert_eq!(root.get_double("a"), 0.1);
/// assert!(!root.has_key("BLA"));
/// ```
pub struct LayeredStore {
    layers: Vec<SharedStore>,
}

impl LayeredStore {
    /// Create a layered store; `layers[0]` takes precedence over the rest.
    ///
    /// Fails with [`Error::EmptyLayers`] if `layers` is empty.
    pub fn new(layers: Vec<SharedStore>) -> Result<Self, Error> {
        if layers.is_empty() {
            return Err(Error::EmptyLayers);
        }
        Ok(Self { layers })
    }

    /// The layers in precedence order.
    pub fn layers(&self) -> &[SharedStore] {
        &self.layers
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Always false: a layered store has at least one layer.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn into_shared(self) -> SharedStore {
        Rc::new(self)
    }
}

impl ValueStore for LayeredStore {
    fn has_key(&self, path: &Path) -> bool {
        self.layers.iter().any(|layer| layer.has_key(path))
    }

    fn leaf(&self, path: &Path) -> Option<Value> {
        self.layers.iter().enumerate().find_map(|(index, layer)| {
            let value = layer.leaf(path)?;
            log::trace!("'{}' resolved in layer {}", path, index);
            Some(value)
        })
    }

    fn get_as(&self, path: &Path, kind: ValueKind) -> Option<Value> {
        self.layers.iter().enumerate().find_map(|(index, layer)| {
            let value = layer.get_as(path, kind)?;
            log::trace!("'{}' as {} resolved in layer {}", path, kind, index);
            Some(value)
        })
    }

    /// The union of the children of every layer.
    ///
    /// Keys are deduplicated and ordered by first appearance, walking the
    /// layers in precedence order. Each child is itself a `LayeredStore` over
    /// the child stores of the layers that contain that key, in precedence
    /// order, so lookups below it keep the same precedence.
    fn children(&self, path: &Path) -> Vec<Child> {
        let mut merged: Vec<(String, Vec<SharedStore>)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for layer in &self.layers {
            for child in layer.children(path) {
                let (key, store) = child.into_parts();
                match positions.get(&key) {
                    Some(&index) => merged[index].1.push(store),
                    None => {
                        positions.insert(key.clone(), merged.len());
                        merged.push((key, vec![store]));
                    }
                }
            }
        }

        merged
            .into_iter()
            .map(|(key, layers)| Child::new(key, Rc::new(LayeredStore { layers })))
            .collect()
    }

    /// The keys of [`children`](ValueStore::children), in the same order,
    /// without building a merged store per key.
    fn child_keys(&self, path: &Path) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut keys = Vec::new();
        for layer in &self.layers {
            for key in layer.child_keys(path) {
                if seen.insert(key.clone()) {
                    keys.push(key);
                }
            }
        }
        keys
    }
}
