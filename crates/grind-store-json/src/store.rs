//! [`JsonStore`] — the on-disk implementation of [`DocumentStore`].

use std::{
  fs,
  io::ErrorKind,
  path::{Path, PathBuf},
};

use grind_core::{document::Document, schema, store::DocumentStore};

use crate::{Error, Result};

const DATA_FILE: &str = "data.json";
const ACCENT_FILE: &str = "accent";

/// A document store backed by one directory on local disk.
#[derive(Debug, Clone)]
pub struct JsonStore {
  dir: PathBuf,
}

impl JsonStore {
  /// Open a store rooted at `dir`, creating the directory if needed.
  pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
    let dir = dir.into();
    fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
    Ok(Self { dir })
  }

  pub fn data_path(&self) -> PathBuf { self.dir.join(DATA_FILE) }

  fn accent_path(&self) -> PathBuf { self.dir.join(ACCENT_FILE) }

  /// Write `contents` to `path` via a temp file in the same directory and an
  /// atomic rename. The previous file survives any failure.
  fn write_atomic(&self, path: &Path, contents: &str) -> Result<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents).map_err(|e| Error::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| Error::io(path, e))?;
    Ok(())
  }
}

impl DocumentStore for JsonStore {
  type Error = Error;

  fn load(&self) -> Document {
    let path = self.data_path();
    let raw = match fs::read_to_string(&path) {
      Ok(raw) => raw,
      Err(e) if e.kind() == ErrorKind::NotFound => return Document::default(),
      Err(e) => {
        tracing::warn!(path = %path.display(), error = %e, "unreadable data file, starting empty");
        return Document::default();
      }
    };
    match schema::parse_document(&raw) {
      Ok(doc) => doc,
      Err(e) => {
        tracing::warn!(path = %path.display(), error = %e, "corrupt data file, starting empty");
        Document::default()
      }
    }
  }

  fn save(&self, doc: &Document) -> Result<()> {
    let json = schema::export_document(doc).map_err(Error::Core)?;
    self.write_atomic(&self.data_path(), &json)
  }

  fn load_accent(&self) -> Option<String> {
    let raw = fs::read_to_string(self.accent_path()).ok()?;
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
  }

  fn save_accent(&self, color: &str) -> Result<()> {
    let normalized = grind_core::store::normalize_accent(color)?;
    self.write_atomic(&self.accent_path(), &normalized)
  }
}
