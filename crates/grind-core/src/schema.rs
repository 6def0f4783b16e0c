//! Serialised form of the document: parsing, migration, export.
//!
//! Stored documents may carry a `schemaVersion` field; its absence means
//! version 1, the original unversioned layout. Parsing dispatches through an
//! ordered migration table before the shape is validated and accepted, so a
//! future layout change is a new table entry rather than a scattering of
//! field-merge special cases.

use serde_json::Value;

use crate::{Error, Result, document::Document};

/// Newest layout this build reads and writes.
pub const SCHEMA_VERSION: u64 = 1;

/// The four collection keys of the storage layout.
pub const COLLECTION_KEYS: [&str; 4] =
  ["nextMonthRating", "nextMonthTopic", "topics4Weeks", "upsolve"];

/// In-order migrations: entry `(v, f)` rewrites a version-`v` value into
/// version `v + 1`. Empty while the current version is 1.
const MIGRATIONS: &[(u64, fn(Value) -> Value)] = &[];

/// Parse a raw serialised document: JSON parse, migrate, validate, merge over
/// the default shape (missing collections come out empty). The caller's
/// current document is untouched on any error.
pub fn parse_document(raw: &str) -> Result<Document> {
  let value: Value = serde_json::from_str(raw).map_err(Error::Parse)?;
  migrate(value)
}

/// Migrate a parsed value up to [`SCHEMA_VERSION`] and deserialise it.
pub fn migrate(mut value: Value) -> Result<Document> {
  let mut version = value
    .get("schemaVersion")
    .and_then(Value::as_u64)
    .unwrap_or(1);
  if version > SCHEMA_VERSION {
    return Err(Error::UnsupportedSchema(version));
  }
  for (from, step) in MIGRATIONS {
    if *from == version {
      value = step(value);
      version += 1;
    }
  }

  // A present collection key must at least be a sequence; anything else is a
  // malformed backup, not a mergeable document.
  for key in COLLECTION_KEYS {
    if let Some(v) = value.get(key)
      && !v.is_array()
    {
      return Err(Error::NotASequence(key));
    }
  }

  serde_json::from_value(value).map_err(Error::Parse)
}

/// Pretty-printed JSON of the full document, byte-for-byte re-importable.
pub fn export_document(doc: &Document) -> Result<String> {
  Ok(serde_json::to_string_pretty(doc)?)
}
