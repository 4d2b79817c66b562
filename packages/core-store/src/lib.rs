//! Core value store: typed, path-addressed access to hierarchical data.
//!
//! This layer defines the contract and the pieces built on it:
//! - `Path`: `/`-separated path with non-empty components
//! - `Value`: scalar leaf value (bool, integer, float, string)
//! - `ValueStore`: the trait every backing store and composite implements
//! - `PropertyTree` / `TreeStore`: in-memory tree and its store adapter
//! - `LayeredStore`: per-key precedence over an ordered stack of stores
//! - `ValueStoreRef`: scoped view of a store at a base path
//! - `Lookup`: present/absent result of a typed read
//!
//! # Example
//!
//! ```rust
//! use valuestore_core::{PropertyTree, TreeStore, ValueStoreRef};
//!
//! let mut pt = PropertyTree::new();
//! pt.set_double("d", 0.1);
//! pt.set_double("d/d", 0.2);
//!
//! let root = ValueStoreRef::from_store(TreeStore::new(pt));
//! assert!(root.has_key("d/d"));
//! assert_eq!(root.child("d").get_double("d"), 0.2);
//! assert!(root.get_double("BLA").is_absent());
//! ```

mod error;
pub mod layered_store;
mod lookup;
mod path;
pub mod read_only;
mod reference;
mod traits;
mod tree;
mod value;

pub use error::Error;
pub use layered_store::LayeredStore;
pub use lookup::Lookup;
pub use path::{Path, PathError, SEPARATOR};
pub use read_only::ReadOnly;
pub use reference::ValueStoreRef;
pub use traits::{Child, SharedStore, TypedStore, ValueStore};
pub use tree::{Node, PropertyTree, TreeStore};
pub use value::{FromValue, Value, ValueKind};
