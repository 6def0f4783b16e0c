//! File-backed document store for the grind tracker.
//!
//! The local-disk equivalent of a browser storage slot: one JSON file holds
//! the whole document, a sibling file holds the accent color. Writes are
//! whole-file and atomic (temp file + rename), so an interrupted save never
//! clobbers the previous valid document.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::JsonStore;
