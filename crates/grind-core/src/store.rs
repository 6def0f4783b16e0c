//! The `DocumentStore` trait and the accent-color helper.
//!
//! The trait is implemented by storage backends (e.g. `grind-store-json`).
//! The CLI depends on this abstraction, not on any concrete backend.

use crate::{Error, Result, document::Document};

/// Abstraction over a place the document (and the accent color) lives.
///
/// Persistence is synchronous and whole-document: every mutation writes the
/// full document back. `load` is fail-soft — a missing or corrupt slot yields
/// a fresh default document rather than an error, so a broken data file never
/// takes the tracker down.
pub trait DocumentStore {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the document, falling back to the default shape when the slot is
  /// absent or unreadable.
  fn load(&self) -> Document;

  /// Serialise and durably replace the stored document. Must never leave a
  /// partially-written document behind on failure.
  fn save(&self, doc: &Document) -> Result<(), Self::Error>;

  /// The accent-color slot, stored separately from the document.
  fn load_accent(&self) -> Option<String>;

  /// Store a normalised accent color (see [`normalize_accent`]).
  fn save_accent(&self, color: &str) -> Result<(), Self::Error>;
}

/// Validate an accent color and normalise it to lowercase `#rrggbb`.
pub fn normalize_accent(input: &str) -> Result<String> {
  let trimmed = input.trim();
  let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
  if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
    Ok(format!("#{}", hex.to_ascii_lowercase()))
  } else {
    Err(Error::InvalidColor(input.to_string()))
  }
}
