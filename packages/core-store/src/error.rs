//! Error types for value stores.

use crate::path::{Path, PathError};
use crate::value::ValueKind;

/// Errors raised by value stores.
///
/// Missing keys are not errors: lookups report absence through
/// [`Lookup`](crate::Lookup), `Option` or `bool`. The variants here cover
/// contract violations (unsupported mutation, forced access to an absent
/// value) and the failures of the direct tree accessors and codecs.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Path validation error.
    #[error("path error: {0}")]
    Path(#[from] PathError),

    /// No node at the path.
    #[error("no value at '{path}'")]
    NotFound { path: Path },

    /// The node exists but its value is not of the requested kind.
    #[error("value at '{path}' is {found}, expected {expected}")]
    TypeMismatch {
        path: Path,
        expected: ValueKind,
        found: ValueKind,
    },

    /// The store does not support this operation (e.g. writing to a layered store).
    #[error("operation '{operation}' is not supported at '{path}'")]
    Unsupported {
        operation: &'static str,
        path: Path,
    },

    /// `add` found a value already present.
    #[error("a value already exists at '{path}'")]
    AlreadyExists { path: Path },

    /// A value was required but the lookup was absent.
    #[error("empty access: no value at '{path}'")]
    EmptyAccess { path: Path },

    /// A layered store was built without layers.
    #[error("a layered store needs at least one layer")]
    EmptyLayers,

    /// A tree could not be encoded into an external format.
    #[error("encode error: {message}")]
    Encode { message: String },

    /// External data could not be decoded into a tree.
    #[error("decode error: {message}")]
    Decode { message: String },

    /// Generic error with message.
    #[error("{message}")]
    Other { message: String },
}

impl Error {
    pub(crate) fn unsupported(operation: &'static str, path: &Path) -> Self {
        Error::Unsupported {
            operation,
            path: path.clone(),
        }
    }
}
