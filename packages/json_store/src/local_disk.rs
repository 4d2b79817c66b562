use std::cell::RefCell;
use std::rc::Rc;
use std::{fs, io, path};

use valuestore_core::{PropertyTree, SharedStore, TreeStore, ValueStoreRef};

use crate::{json_utils, Error};

/// A property tree loaded from, and saved back to, a JSON file.
///
/// The tree is held in memory and shared: every store and reference handed
/// out by this type reads and writes the same tree. Nothing touches the disk
/// until [`JsonFileStore::save`] or [`JsonFileStore::reload`] is called.
///
/// # Example
///
/// ```rust,no_run
/// use valuestore_json::JsonFileStore;
///
/// let file = JsonFileStore::open("settings.json")?;
/// let settings = file.reference();
/// settings.set("window/width", 800)?;
/// file.save()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct JsonFileStore {
    path: path::PathBuf,
    tree: Rc<RefCell<PropertyTree>>,
}

impl JsonFileStore {
    /// Load the tree from `path`. A missing file yields an empty tree.
    pub fn open(path: impl Into<path::PathBuf>) -> Result<JsonFileStore, Error> {
        let path = path.into();
        let tree = Self::load(&path)?;
        Ok(JsonFileStore {
            path,
            tree: tree.into_shared(),
        })
    }

    /// Bind an existing tree to `path` without reading the file.
    pub fn with_tree(path: impl Into<path::PathBuf>, tree: PropertyTree) -> JsonFileStore {
        JsonFileStore {
            path: path.into(),
            tree: tree.into_shared(),
        }
    }

    fn load(file_path: &path::Path) -> Result<PropertyTree, Error> {
        log::debug!("Reading {}...", file_path.display());
        match fs::read_to_string(file_path) {
            Ok(text) => json_utils::parse_str(&text),
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                log::debug!("{} does not exist, starting empty", file_path.display());
                Ok(PropertyTree::new())
            }
            Err(source) => Err(Error::Io {
                path: file_path.to_path_buf(),
                source,
            }),
        }
    }

    /// The file this store is bound to.
    pub fn path(&self) -> &path::Path {
        &self.path
    }

    /// The shared in-memory tree.
    pub fn tree(&self) -> Rc<RefCell<PropertyTree>> {
        self.tree.clone()
    }

    /// A store over the shared tree.
    pub fn store(&self) -> SharedStore {
        Rc::new(TreeStore::shared(self.tree.clone()))
    }

    /// A reference to the root of the shared tree.
    pub fn reference(&self) -> ValueStoreRef {
        ValueStoreRef::new(self.store())
    }

    /// Write the tree to the file as pretty JSON.
    pub fn save(&self) -> Result<(), Error> {
        log::debug!("Writing {}...", self.path.display());
        let text = json_utils::to_string_pretty(&self.tree.borrow())?;
        fs::write(&self.path, text).map_err(|source| Error::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the in-memory tree with the file's current contents.
    ///
    /// Stores and references already handed out see the new contents.
    pub fn reload(&self) -> Result<(), Error> {
        let tree = Self::load(&self.path)?;
        *self.tree.borrow_mut() = tree;
        Ok(())
    }
}
