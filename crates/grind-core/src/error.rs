//! Error types for `grind-core`.

use thiserror::Error;

use crate::record::MAX_RESOURCES;

#[derive(Debug, Error)]
pub enum Error {
  #[error("missing required field: {0}")]
  MissingField(&'static str),

  #[error("a study topic holds at most {MAX_RESOURCES} resources (got {0})")]
  TooManyResources(usize),

  #[error("data is not valid JSON: {0}")]
  Parse(#[source] serde_json::Error),

  #[error(
    "unsupported schema version {0} (newest understood: {newest})",
    newest = crate::schema::SCHEMA_VERSION
  )]
  UnsupportedSchema(u64),

  #[error("collection {0:?} in imported data is not a sequence")]
  NotASequence(&'static str),

  #[error("invalid accent color {0:?} (expected #rrggbb)")]
  InvalidColor(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
