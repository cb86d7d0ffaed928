//! JSON backing file for a single store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{HomeMessageError, Result};

/// A file holding one pretty-printed JSON array.
///
/// The whole array is rewritten on every [`save`](Self::save); there is no
/// append log and no temp-file rename.
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    /// Ensure `dir` exists and point at `dir/filename`.
    ///
    /// The file itself is not created until the first save.
    pub fn create_in(dir: impl Into<PathBuf>, filename: &str) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| HomeMessageError::Write {
            path: dir.clone(),
            source,
        })?;

        Ok(Self {
            path: dir.join(filename),
        })
    }

    /// Full path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every element. A missing file is an empty collection.
    pub fn load<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(HomeMessageError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_slice(&bytes).map_err(|source| HomeMessageError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the file with `records`.
    pub fn save<T: Serialize>(&self, records: &[T]) -> Result<()> {
        let content = serde_json::to_vec_pretty(records).map_err(HomeMessageError::Encode)?;

        std::fs::write(&self.path, &content).map_err(|source| HomeMessageError::Write {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(
            "Wrote {} records ({} bytes) to {}",
            records.len(),
            content.len(),
            self.path.display()
        );
        Ok(())
    }
}
