//! JSON state files
//!
//! Both coderman state files (the project config and the change tracker) are
//! small pretty-printed JSON documents in the workspace root. This module owns
//! reading them (absent vs corrupt are distinct outcomes) and writing them
//! atomically.

pub mod persistence;

pub use persistence::{read_json, write_json_atomic};
