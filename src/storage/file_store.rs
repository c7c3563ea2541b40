//! File-backed key-value store with atomic writes

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use super::KeyValueStore;

const VALUE_EXTENSION: &str = "json";

// Keys become file names, so anything path-like or shell-hostile is encoded
const KEY_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b'*')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'|')
    .add(b'/')
    .add(b'\\')
    .add(b':')
    .add(b'.');

/// Stores each key as `<encoded key>.json` inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// The directory is created lazily on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        let encoded = utf8_percent_encode(key, KEY_ENCODE_SET).to_string();
        self.dir.join(format!("{}.{}", encoded, VALUE_EXTENSION))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let value = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read stored value: {}", path.display()))?;
        Ok(Some(value))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).with_context(|| {
                format!("Failed to create data directory: {}", self.dir.display())
            })?;
        }

        // Write atomically (temp file + rename)
        let path = self.path_for(key);
        let temp = path.with_extension(format!("{}.tmp", VALUE_EXTENSION));
        fs::write(&temp, value).context("Failed to write temp file")?;
        fs::rename(&temp, &path).context("Failed to rename temp file")?;

        Ok(())
    }
}
