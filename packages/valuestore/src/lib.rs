//! valuestore: hierarchical, typed configuration data behind one interface.
//!
//! Data lives in backing stores (an in-memory [`PropertyTree`], a JSON file)
//! and is read through [`ValueStoreRef`] views that navigate without copying.
//! A [`LayeredStore`] stacks stores so the first layer with a value wins.
//!
//! ```rust
//! use std::rc::Rc;
//! use valuestore::{LayeredStore, PropertyTree, SharedStore, TreeStore, ValueStoreRef};
//!
//! let mut defaults = PropertyTree::new();
//! defaults.set_int("server/port", 80);
//! defaults.set_string("server/host", "localhost");
//! let mut overrides = PropertyTree::new();
//! overrides.set_int("server/port", 8080);
//!
//! let layers: Vec<SharedStore> = vec![
//!     Rc::new(TreeStore::new(overrides)),
//!     Rc::new(TreeStore::new(defaults)),
//! ];
//! let config = ValueStoreRef::from_store(LayeredStore::new(layers).unwrap());
//!
//! let server = config.child("server");
//! assert_eq!(server.get_int("port"), 8080);
//! assert_eq!(server.get_string("host"), "localhost");
//! ```

pub use valuestore_core::*;

/// JSON conversion and file-backed stores.
pub mod json {
    pub use valuestore_json::*;
}
