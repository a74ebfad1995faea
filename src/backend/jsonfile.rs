//! Filesystem backend: one JSON document per key.

use std::io::ErrorKind;
use std::marker::PhantomData;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::backend::{Backend, BackendError};

/// A backend that persists each key as `<dir>/<key>.json`.
///
/// Keys are string-typed and used directly as file stems, so they must be
/// valid path components on the host filesystem. A missing file means the
/// key is absent; `save` rewrites the whole document.
pub struct JsonFileBackend<V> {
    dir: PathBuf,
    _value: PhantomData<fn() -> V>,
}

impl<V> JsonFileBackend<V> {
    /// Open a backend over `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, BackendError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            _value: PhantomData,
        })
    }

    /// The directory documents are stored under.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl<V> Backend<String, V> for JsonFileBackend<V>
where
    V: Serialize + DeserializeOwned,
{
    fn name(&self) -> &str {
        "jsonfile"
    }

    fn get(&self, key: &String) -> Result<Option<V>, BackendError> {
        let path = self.key_path(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let value = serde_json::from_slice(&bytes)?;
        Ok(Some(value))
    }

    fn save(&self, key: &String, value: &V) -> Result<(), BackendError> {
        let path = self.key_path(key);
        let bytes = serde_json::to_vec(value)?;
        fs::write(&path, &bytes)?;

        debug!(
            key = %key,
            path = %path.display(),
            size = bytes.len(),
            "Wrote cache document"
        );
        Ok(())
    }
}
