//! Persistent map of creator id to last-observed post id.
//!
//! [`JsonFileStore::load`] fails open (an unreadable file is an empty map)
//! and [`JsonFileStore::save`] replaces the file atomically so an interrupted
//! write leaves the previous state intact.

pub mod error;
pub mod file;

use std::collections::BTreeMap;

pub use error::StoreError;
pub use file::JsonFileStore;

/// Creator id → last-observed post id.
///
/// Ordered so the persisted JSON is stable between runs.
pub type SeenState = BTreeMap<String, String>;
