use std::{io, path};

use valuestore_core::Error as StoreError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: path::PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<Error> for StoreError {
    fn from(error: Error) -> Self {
        match error {
            Error::Store(inner) => inner,
            Error::Json(inner) => StoreError::Decode {
                message: inner.to_string(),
            },
            other => StoreError::Other {
                message: other.to_string(),
            },
        }
    }
}
