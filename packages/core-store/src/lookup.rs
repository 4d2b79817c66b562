//! The result of a typed read: present or absent, never defaulted.

use crate::{Error, Path};

/// The outcome of reading a typed value at a path.
///
/// A `Lookup` is either present or absent. A node that exists but cannot be
/// read as `T` is absent, just like a missing node. Callers must branch on
/// presence explicitly; there is no default substitution. Forcing an absent
/// lookup with [`Lookup::get`] is a contract violation and panics.
///
/// # Example
///
/// ```rust
/// use valuestore_core::{PropertyTree, TreeStore, ValueStoreRef};
///
/// let mut tree = PropertyTree::new();
/// tree.set_double("d", 0.1);
/// let root = ValueStoreRef::from_store(TreeStore::new(tree));
///
/// assert_eq!(root.get_double("d").get(), 0.1);
/// assert!(root.get_double("BLA").is_absent());
/// assert!(root.get_double("BLA").try_get().is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct Lookup<T> {
    path: Path,
    value: Option<T>,
}

impl<T> Lookup<T> {
    /// A present lookup.
    pub fn present(path: Path, value: T) -> Self {
        Self {
            path,
            value: Some(value),
        }
    }

    /// An absent lookup.
    pub fn absent(path: Path) -> Self {
        Self { path, value: None }
    }

    pub(crate) fn from_option(path: Path, value: Option<T>) -> Self {
        Self { path, value }
    }

    /// The path this lookup was resolved at.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_absent(&self) -> bool {
        self.value.is_none()
    }

    /// Take the value.
    ///
    /// # Panics
    ///
    /// Panics if the lookup is absent. Use [`Lookup::try_get`] or
    /// [`Lookup::into_option`] when absence is expected.
    #[track_caller]
    pub fn get(self) -> T {
        match self.value {
            Some(value) => value,
            None => panic!("empty access: no value at '{}'", self.path),
        }
    }

    /// Take the value, or fail with [`Error::EmptyAccess`].
    pub fn try_get(self) -> Result<T, Error> {
        self.value.ok_or(Error::EmptyAccess { path: self.path })
    }

    pub fn into_option(self) -> Option<T> {
        self.value
    }

    pub fn as_option(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Map the present value, keeping the path.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        Lookup {
            path: self.path,
            value: self.value.map(f),
        }
    }
}

impl<T> From<Lookup<T>> for Option<T> {
    fn from(lookup: Lookup<T>) -> Self {
        lookup.value
    }
}

impl<T: PartialEq> PartialEq<T> for Lookup<T> {
    fn eq(&self, other: &T) -> bool {
        self.value.as_ref() == Some(other)
    }
}

impl PartialEq<&str> for Lookup<String> {
    fn eq(&self, other: &&str) -> bool {
        self.value.as_deref() == Some(*other)
    }
}
