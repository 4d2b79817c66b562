//! In-memory property tree and the store that exposes it.
//!
//! A [`PropertyTree`] is a plain, owned tree of [`Node`]s. Each node may hold
//! a leaf value and any number of uniquely keyed children at the same time,
//! and children keep the order in which they were first inserted.
//!
//! [`TreeStore`] puts a shared tree behind the [`ValueStore`] contract. Its
//! children are further `TreeStore`s over the same tree with a longer root
//! path, so navigating never copies data.

use std::cell::RefCell;
use std::rc::Rc;

use crate::{Child, Error, FromValue, Path, PathError, Value, ValueKind, ValueStore};

/// A node of a [`PropertyTree`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Node {
    value: Option<Value>,
    children: Vec<(String, Node)>,
}

impl Node {
    /// A node with neither value nor children.
    pub fn new() -> Self {
        Self::default()
    }

    /// A leaf node.
    pub fn with_value(value: impl Into<Value>) -> Self {
        Self {
            value: Some(value.into()),
            children: Vec::new(),
        }
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Replace this node's value, returning the previous one.
    pub fn set_value(&mut self, value: impl Into<Value>) -> Option<Value> {
        self.value.replace(value.into())
    }

    pub fn clear_value(&mut self) -> Option<Value> {
        self.value.take()
    }

    /// Children in insertion order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.children.iter().map(|(k, n)| (k.as_str(), n))
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// The keys of the children in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.children.iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn child(&self, key: &str) -> Option<&Node> {
        self.children.iter().find(|(k, _)| k == key).map(|(_, n)| n)
    }

    pub fn child_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.children
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, n)| n)
    }

    /// The child at `key`, appended as an empty node if missing.
    ///
    /// Keys must be addressable by a [`Path`]: an empty key or one that
    /// contains `/` is refused with [`PathError::InvalidComponent`].
    pub fn child_entry(&mut self, key: &str) -> Result<&mut Node, PathError> {
        Path::validate_component(key, 0)?;
        Ok(self.ensure_child(key))
    }

    // `key` is a component of a valid path.
    fn ensure_child(&mut self, key: &str) -> &mut Node {
        let index = match self.children.iter().position(|(k, _)| k == key) {
            Some(index) => index,
            None => {
                self.children.push((key.to_string(), Node::new()));
                self.children.len() - 1
            }
        };
        &mut self.children[index].1
    }

    /// The descendant at `path`, if it exists.
    pub fn get(&self, path: &Path) -> Option<&Node> {
        let mut current = self;
        for component in path.iter() {
            current = current.child(component)?;
        }
        Some(current)
    }

    pub fn get_mut(&mut self, path: &Path) -> Option<&mut Node> {
        let mut current = self;
        for component in path.iter() {
            current = current.child_mut(component)?;
        }
        Some(current)
    }

    /// The descendant at `path`, creating intermediate nodes as needed.
    pub fn entry(&mut self, path: &Path) -> &mut Node {
        let mut current = self;
        for component in path.iter() {
            current = current.ensure_child(component);
        }
        current
    }

    /// Remove the direct child at `key`, returning it.
    pub fn remove_child(&mut self, key: &str) -> Option<Node> {
        let index = self.children.iter().position(|(k, _)| k == key)?;
        Some(self.children.remove(index).1)
    }

    /// Number of values in this node and all its descendants.
    fn count_values(&self) -> usize {
        usize::from(self.value.is_some())
            + self
                .children
                .iter()
                .map(|(_, n)| n.count_values())
                .sum::<usize>()
    }
}

/// A standalone, owned property tree.
///
/// # Example
///
/// ```rust
/// use valuestore_core::PropertyTree;
///
/// let mut pt = PropertyTree::new();
/// pt.set_double("d", 0.1);
/// pt.set_double("d/i", 10.0);
/// pt.set_string("d/s", "BLA");
///
/// assert_eq!(pt.get_double("d").unwrap(), 0.1);
/// assert_eq!(pt.get_int("d/i").unwrap(), 10);
/// assert_eq!(pt.keys("d"), vec!["i", "s"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyTree {
    root: Node,
}

impl PropertyTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tree from an existing root node.
    pub fn from_node(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    pub fn into_node(self) -> Node {
        self.root
    }

    /// Wrap this tree in a shared handle for use with [`TreeStore::shared`].
    pub fn into_shared(self) -> Rc<RefCell<PropertyTree>> {
        Rc::new(RefCell::new(self))
    }

    /// True if the tree holds no values and no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.value.is_none() && self.root.children.is_empty()
    }

    /// Number of values stored in the tree.
    pub fn len(&self) -> usize {
        self.root.count_values()
    }

    pub fn node(&self, path: impl Into<Path>) -> Option<&Node> {
        self.root.get(&path.into())
    }

    pub fn has_key(&self, path: impl Into<Path>) -> bool {
        self.node(path).is_some()
    }

    /// The raw value at `path`.
    pub fn leaf(&self, path: impl Into<Path>) -> Option<&Value> {
        self.node(path).and_then(Node::value)
    }

    /// Keys of the children at `path`, in insertion order.
    pub fn keys(&self, path: impl Into<Path>) -> Vec<String> {
        self.node(path).map(Node::keys).unwrap_or_default()
    }

    /// Create or replace the value at `path`.
    pub fn set(&mut self, path: impl Into<Path>, value: impl Into<Value>) {
        self.root.entry(&path.into()).set_value(value);
    }

    /// Create the value at `path`.
    ///
    /// Fails with [`Error::AlreadyExists`] if a value is already there. An
    /// existing node without a value (an internal node) gains the value.
    pub fn add(&mut self, path: impl Into<Path>, value: impl Into<Value>) -> Result<(), Error> {
        let path = path.into();
        let node = self.root.entry(&path);
        if node.value.is_some() {
            return Err(Error::AlreadyExists { path });
        }
        node.set_value(value);
        Ok(())
    }

    pub fn set_bool(&mut self, path: impl Into<Path>, value: bool) {
        self.set(path, value);
    }

    pub fn set_int(&mut self, path: impl Into<Path>, value: i64) {
        self.set(path, value);
    }

    pub fn set_double(&mut self, path: impl Into<Path>, value: f64) {
        self.set(path, value);
    }

    pub fn set_string(&mut self, path: impl Into<Path>, value: impl Into<String>) {
        self.set(path, Value::String(value.into()));
    }

    /// Read the value at `path` as `T`.
    ///
    /// Unlike the store accessors this reports why a read failed:
    /// [`Error::NotFound`] if there is no value, [`Error::TypeMismatch`] if it
    /// cannot be read as `T`.
    pub fn get<T: FromValue>(&self, path: impl Into<Path>) -> Result<T, Error> {
        let path = path.into();
        let value = self
            .root
            .get(&path)
            .and_then(Node::value)
            .ok_or_else(|| Error::NotFound { path: path.clone() })?;
        value
            .coerce(T::KIND)
            .and_then(T::from_value)
            .ok_or_else(|| Error::TypeMismatch {
                path,
                expected: T::KIND,
                found: value.kind(),
            })
    }

    pub fn get_bool(&self, path: impl Into<Path>) -> Result<bool, Error> {
        self.get(path)
    }

    pub fn get_int(&self, path: impl Into<Path>) -> Result<i64, Error> {
        self.get(path)
    }

    pub fn get_double(&self, path: impl Into<Path>) -> Result<f64, Error> {
        self.get(path)
    }

    pub fn get_string(&self, path: impl Into<Path>) -> Result<String, Error> {
        self.get(path)
    }

    /// Remove the node at `path` with its whole subtree.
    ///
    /// Removing the root clears the tree.
    pub fn remove(&mut self, path: impl Into<Path>) -> Option<Node> {
        let path = path.into();
        match (path.parent(), path.last()) {
            (Some(parent), Some(key)) => self.root.get_mut(&parent)?.remove_child(key),
            _ => Some(std::mem::take(&mut self.root)),
        }
    }
}

/// A [`ValueStore`] over a shared [`PropertyTree`], rooted at a path in it.
///
/// Cloning a `TreeStore` shares the tree. Writes through any clone, or
/// through any child store, are visible to all of them and to whoever else
/// holds the tree handle.
///
/// # Example
///
/// ```rust
/// use valuestore_core::{path, PropertyTree, TreeStore, TypedStore, ValueStore};
///
/// let tree = PropertyTree::new().into_shared();
/// tree.borrow_mut().set_double("d/d", 0.2);
///
/// let store = TreeStore::shared(tree.clone());
/// store.add(&path!("ai"), 4).unwrap();
/// assert_eq!(tree.borrow().get_int("ai").unwrap(), 4);
///
/// let children = store.children(&path!(""));
/// let d = &children[0];
/// assert_eq!(d.key(), "d");
/// assert_eq!(d.store().get::<f64>(&path!("d")), 0.2);
/// ```
#[derive(Clone, Debug)]
pub struct TreeStore {
    tree: Rc<RefCell<PropertyTree>>,
    root: Path,
}

impl TreeStore {
    /// Create a store that owns `tree`.
    pub fn new(tree: PropertyTree) -> Self {
        Self::shared(tree.into_shared())
    }

    /// Create a store over a tree shared with the caller.
    pub fn shared(tree: Rc<RefCell<PropertyTree>>) -> Self {
        Self::at(tree, Path::root())
    }

    /// Create a store over the subtree of `tree` at `root`.
    pub fn at(tree: Rc<RefCell<PropertyTree>>, root: Path) -> Self {
        Self { tree, root }
    }

    /// The shared tree handle.
    pub fn tree(&self) -> Rc<RefCell<PropertyTree>> {
        self.tree.clone()
    }

    /// The path of this store's root within the tree.
    pub fn root_path(&self) -> &Path {
        &self.root
    }

    fn full_path(&self, path: &Path) -> Path {
        self.root.join(path)
    }
}

impl ValueStore for TreeStore {
    fn has_key(&self, path: &Path) -> bool {
        self.tree.borrow().root.get(&self.full_path(path)).is_some()
    }

    fn leaf(&self, path: &Path) -> Option<Value> {
        self.tree
            .borrow()
            .root
            .get(&self.full_path(path))
            .and_then(Node::value)
            .cloned()
    }

    fn get_as(&self, path: &Path, kind: ValueKind) -> Option<Value> {
        self.tree
            .borrow()
            .root
            .get(&self.full_path(path))
            .and_then(Node::value)
            .and_then(|value| value.coerce(kind))
    }

    fn children(&self, path: &Path) -> Vec<Child> {
        let full = self.full_path(path);
        self.child_keys(path)
            .into_iter()
            .filter_map(|key| {
                let root = full.try_child(&key).ok()?;
                let store = TreeStore::at(self.tree.clone(), root);
                Some(Child::new(key, Rc::new(store)))
            })
            .collect()
    }

    fn child_keys(&self, path: &Path) -> Vec<String> {
        self.tree
            .borrow()
            .root
            .get(&self.full_path(path))
            .map(Node::keys)
            .unwrap_or_default()
    }

    fn set_value(&self, path: &Path, value: Value) -> Result<(), Error> {
        self.tree.borrow_mut().set(self.full_path(path), value);
        Ok(())
    }

    fn add_value(&self, path: &Path, value: Value) -> Result<(), Error> {
        self.tree.borrow_mut().add(self.full_path(path), value)
    }

    fn is_extendible(&self) -> bool {
        true
    }
}
