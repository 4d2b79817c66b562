//! Path type with `/`-separated, non-empty components.

use std::fmt;

/// The reserved separator between path components.
pub const SEPARATOR: char = '/';

/// Errors related to path construction and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A path component is empty or contains the separator.
    InvalidComponent {
        component: String,
        position: usize,
        message: String,
    },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::InvalidComponent {
                component,
                position,
                message,
            } => {
                write!(
                    f,
                    "invalid path component '{}' at position {}: {}",
                    component, position, message
                )
            }
        }
    }
}

impl std::error::Error for PathError {}

/// A path addressing a node relative to some root.
///
/// The empty path denotes the root itself ("self"). Components are never
/// empty and never contain `/`, so splitting and rejoining is lossless.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Path {
    components: Vec<String>,
}

impl Path {
    /// The empty path.
    pub fn root() -> Self {
        Path {
            components: Vec::new(),
        }
    }

    /// Parse a path string.
    ///
    /// # Path Syntax
    ///
    /// - Components are separated by `/`
    /// - Empty components are ignored (normalizes `//`, leading and trailing `/`)
    /// - There is no escaping; a component can never contain `/`
    ///
    /// Parsing never fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valuestore_core::Path;
    ///
    /// let path = Path::parse("d/d/j");
    /// assert_eq!(path.len(), 3);
    ///
    /// assert_eq!(Path::parse("/foo/bar/"), Path::parse("foo/bar"));
    /// assert!(Path::parse("").is_empty());
    /// ```
    pub fn parse(s: &str) -> Self {
        Path {
            components: s
                .split(SEPARATOR)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Try to create a path from components, validating each.
    pub fn try_from_components<I, S>(components: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let components: Vec<String> = components.into_iter().map(Into::into).collect();
        for (i, component) in components.iter().enumerate() {
            Self::validate_component(component, i)?;
        }
        Ok(Path { components })
    }

    pub(crate) fn validate_component(component: &str, position: usize) -> Result<(), PathError> {
        if component.is_empty() {
            return Err(PathError::InvalidComponent {
                component: component.to_string(),
                position,
                message: "empty component".to_string(),
            });
        }
        if component.contains(SEPARATOR) {
            return Err(PathError::InvalidComponent {
                component: component.to_string(),
                position,
                message: format!("component contains separator '{}'", SEPARATOR),
            });
        }
        Ok(())
    }

    /// Check if this path is empty (denotes the root).
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Get the number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Iterate over components.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.components.iter()
    }

    /// The components as a slice.
    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// The last component, if any.
    pub fn last(&self) -> Option<&str> {
        self.components.last().map(String::as_str)
    }

    /// Join this path with another.
    #[must_use]
    pub fn join(&self, other: &Path) -> Path {
        let mut components = self.components.clone();
        components.extend(other.components.iter().cloned());
        Path { components }
    }

    /// Extend this path by a single segment string.
    ///
    /// The segment is parsed, so `"a/b"` appends two components and `""`
    /// appends none.
    #[must_use]
    pub fn child(&self, segment: &str) -> Path {
        self.join(&Path::parse(segment))
    }

    /// Extend this path by exactly one component.
    ///
    /// Unlike [`Path::child`] the key is never split: it must be non-empty and
    /// free of `/`, or this fails with [`PathError::InvalidComponent`].
    pub fn try_child(&self, key: &str) -> Result<Path, PathError> {
        Self::validate_component(key, self.len())?;
        let mut components = self.components.clone();
        components.push(key.to_string());
        Ok(Path { components })
    }

    /// The path without its last component; `None` for the root.
    pub fn parent(&self) -> Option<Path> {
        if self.is_empty() {
            return None;
        }
        Some(Path {
            components: self.components[..self.len() - 1].to_vec(),
        })
    }

    /// Check if this path has the given prefix.
    pub fn has_prefix(&self, prefix: &Path) -> bool {
        prefix.components.len() <= self.components.len()
            && prefix.components == self.components[..prefix.components.len()]
    }

    /// Strip a prefix from this path.
    ///
    /// Returns `None` if the prefix doesn't match.
    #[must_use]
    pub fn strip_prefix(&self, prefix: &Path) -> Option<Path> {
        if self.has_prefix(prefix) {
            Some(Path {
                components: self.components[prefix.components.len()..].to_vec(),
            })
        } else {
            None
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.components.join("/"))
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Path::parse(s)
    }
}

impl From<&Path> for Path {
    fn from(p: &Path) -> Self {
        p.clone()
    }
}

impl std::ops::Index<usize> for Path {
    type Output = String;

    fn index(&self, i: usize) -> &Self::Output {
        &self.components[i]
    }
}

/// Macro for creating paths from literals.
///
/// # Example
///
/// ```rust
/// use valuestore_core::path;
///
/// let p = path!("d/d/j");
/// assert_eq!(p.len(), 3);
/// ```
#[macro_export]
macro_rules! path {
    ($s:expr) => {
        $crate::Path::parse($s)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_basic_paths() {
        assert_eq!(Path::parse("").len(), 0);
        assert_eq!(Path::parse("foo").len(), 1);
        assert_eq!(Path::parse("foo/bar").len(), 2);
        assert_eq!(Path::parse("foo/bar/baz").len(), 3);
    }

    #[test]
    fn normalize_slashes() {
        assert_eq!(Path::parse("foo/bar/"), Path::parse("foo/bar"));
        assert_eq!(Path::parse("foo//bar"), Path::parse("foo/bar"));
        assert_eq!(Path::parse("/foo/bar"), Path::parse("foo/bar"));
        assert!(Path::parse("/").is_empty());
    }

    #[test]
    fn split_join_is_lossless() {
        for s in ["", "a", "a/b", "d/d/j", "with space/und-hyphen/1"] {
            assert_eq!(Path::parse(s).to_string(), s);
        }
    }

    #[test]
    fn any_non_empty_component_allowed() {
        let p = Path::parse("items/0/some-key.with.dots");
        assert_eq!(p.len(), 3);
        assert_eq!(&p[2], "some-key.with.dots");
    }

    #[test]
    fn try_from_components_rejects_empty() {
        let err = Path::try_from_components(["a", ""]).unwrap_err();
        assert!(err.to_string().contains("empty component"));
        assert!(err.to_string().contains("position 1"));
    }

    #[test]
    fn try_from_components_rejects_separator() {
        let err = Path::try_from_components(["a/b"]).unwrap_err();
        assert!(err.to_string().contains("separator"));
    }

    #[test]
    fn try_from_components_valid() {
        let p = Path::try_from_components(["foo", "bar"]).unwrap();
        assert_eq!(p, path!("foo/bar"));
    }

    #[test]
    fn child_and_parent() {
        let p = path!("d");
        assert_eq!(p.child("d"), path!("d/d"));
        assert_eq!(p.child(""), p);
        assert_eq!(p.child("a/b"), path!("d/a/b"));
        assert_eq!(path!("d/d").parent(), Some(path!("d")));
        assert_eq!(path!("").parent(), None);
        assert_eq!(path!("a/b").last(), Some("b"));
        assert_eq!(path!("").last(), None);
    }

    #[test]
    fn has_prefix_works() {
        let p = path!("foo/bar/baz");
        assert!(p.has_prefix(&path!("")));
        assert!(p.has_prefix(&path!("foo/bar")));
        assert!(!p.has_prefix(&path!("bar")));
        assert!(!p.has_prefix(&path!("foo/bar/baz/qux")));
    }

    #[test]
    fn strip_prefix_works() {
        let p = path!("foo/bar/baz");
        assert_eq!(p.strip_prefix(&path!("foo")), Some(path!("bar/baz")));
        assert_eq!(p.strip_prefix(&path!("other")), None);
    }

    #[test]
    fn join_with_empty() {
        let p1 = path!("foo");
        assert_eq!(p1.join(&Path::root()), p1);
        assert_eq!(Path::root().join(&p1), p1);
    }

    #[test]
    fn try_child_appends_one_component() {
        let p = path!("d");
        let child = p.try_child("j").unwrap();
        assert_eq!(child, path!("d/j"));
        assert_eq!(child.len(), 2);
    }

    #[test]
    fn try_child_rejects_unaddressable_keys() {
        let p = path!("d");
        assert!(matches!(
            p.try_child(""),
            Err(PathError::InvalidComponent { position: 1, .. })
        ));
        let err = p.try_child("a/b").unwrap_err();
        let display = format!("{}", err);
        assert!(display.contains("'a/b'"));
        assert!(display.contains("separator"));
    }
}
