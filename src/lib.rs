//! Coderman: change tracking and deployment for static sites
//!
//! Fingerprints the HTML/CSS files of a workspace with BLAKE3, compares the
//! result against the snapshot that was last deployed, and ships only what
//! changed.

pub mod cli;
pub mod config;
pub mod deploy;
pub mod error;
pub mod logging;
pub mod project;
pub mod snapshot;
pub mod store;
pub mod tracker;
pub mod types;
