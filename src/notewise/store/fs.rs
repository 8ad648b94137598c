use super::KeyValueStore;
use crate::error::{NotewiseError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const VALUE_EXT: &str = ".json";

/// File-backed key-value store: each key is a `<key>.json` file in `root`.
pub struct FileKvStore {
    root: PathBuf,
}

impl FileKvStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(NotewiseError::Io)?;
        }
        Ok(())
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}{}", key, VALUE_EXT)))
    }
}

/// Keys become file names, so only a conservative character set is allowed.
fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(NotewiseError::Store(format!("Invalid storage key: {:?}", key)))
    }
}

impl KeyValueStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        // A key that could never have been written cannot be present.
        if validate_key(key).is_err() {
            return Ok(None);
        }
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(NotewiseError::Io)?;
        Ok(Some(content))
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        let target_path = self.path_for(key)?;
        self.ensure_dir()?;

        // Atomic Write
        let tmp_path = self.root.join(format!(".{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_path, value).map_err(NotewiseError::Io)?;
        fs::rename(&tmp_path, target_path).map_err(NotewiseError::Io)?;
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        if validate_key(key).is_err() {
            return Ok(());
        }
        let path = self.path_for(key)?;
        if path.exists() {
            fs::remove_file(path).map_err(NotewiseError::Io)?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(NotewiseError::Io)? {
            let entry = entry.map_err(NotewiseError::Io)?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            if let Some(key) = name.strip_suffix(VALUE_EXT) {
                if validate_key(key).is_ok() {
                    keys.push(key.to_string());
                }
            }
        }
        Ok(keys)
    }
}
