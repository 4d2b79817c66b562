//! JSON-backed value stores.
//!
//! Converts JSON documents to and from [`PropertyTree`]s and binds a tree to
//! a file on disk with [`JsonFileStore`].
//!
//! [`PropertyTree`]: valuestore_core::PropertyTree

mod error;
pub mod json_utils;
pub mod local_disk;

pub use error::Error;
pub use json_utils::{from_json, parse_str, to_json, to_string_pretty};
pub use local_disk::JsonFileStore;
