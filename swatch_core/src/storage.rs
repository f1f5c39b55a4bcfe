use anyhow::Context;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::{Palette, StoreConfig};

/// Where a [`crate::PaletteStore`] keeps its palettes between sessions.
pub trait PaletteStorage {
    /// Read every palette. A store treats any error as "start empty".
    fn load(&self) -> anyhow::Result<Vec<Palette>>;

    /// Replace the persisted palettes with `palettes`.
    fn save(&mut self, palettes: &[Palette]) -> anyhow::Result<()>;
}

/// A pretty-printed JSON array of palettes in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.data_file.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PaletteStorage for JsonFileStorage {
    fn load(&self) -> anyhow::Result<Vec<Palette>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no palette file yet");
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&self.path).context("read palette json file")?;
        let palettes = serde_json::from_str::<Vec<Palette>>(&text).context("parse palette json")?;
        Ok(palettes)
    }

    fn save(&mut self, palettes: &[Palette]) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).context("create palette directory")?;
        }
        let json = serde_json::to_string_pretty(palettes).context("serialize palettes to json")?;
        fs::write(&self.path, json).context("write palette json file")?;
        Ok(())
    }
}

/// In-process storage. Clones share the same backing data, so a test can keep
/// a handle and inspect what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Rc<RefCell<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    json: Option<String>,
    saves: usize,
    fail_saves: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed with raw JSON, as if a previous session had written it.
    pub fn with_json(json: impl Into<String>) -> Self {
        let storage = Self::default();
        storage.inner.borrow_mut().json = Some(json.into());
        storage
    }

    pub fn json(&self) -> Option<String> {
        self.inner.borrow().json.clone()
    }

    pub fn save_count(&self) -> usize {
        self.inner.borrow().saves
    }

    /// Make every following save fail, like a read-only disk.
    pub fn set_fail_saves(&self, fail: bool) {
        self.inner.borrow_mut().fail_saves = fail;
    }
}

impl PaletteStorage for MemoryStorage {
    fn load(&self) -> anyhow::Result<Vec<Palette>> {
        match &self.inner.borrow().json {
            Some(json) => serde_json::from_str(json).context("parse palette json"),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, palettes: &[Palette]) -> anyhow::Result<()> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_saves {
            anyhow::bail!("storage is read-only");
        }
        inner.json = Some(serde_json::to_string(palettes).context("serialize palettes to json")?);
        inner.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColorEntry, Rgba};

    #[test]
    fn json_file_roundtrip() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let mut storage = JsonFileStorage::new(dir.path().join("nested").join("palettes.json"));

        let palettes = vec![Palette::new(
            0,
            "Warm",
            vec![ColorEntry::create(0, "Orange", Rgba::opaque(255, 128, 0))],
        )];
        storage.save(&palettes)?;

        let loaded = storage.load()?;
        assert_eq!(loaded, palettes);
        Ok(())
    }

    #[test]
    fn missing_file_loads_empty() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let storage = JsonFileStorage::new(dir.path().join("absent.json"));
        assert!(storage.load()?.is_empty());
        Ok(())
    }

    #[test]
    fn garbage_file_is_an_error() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("palettes.json");
        fs::write(&path, "{ not json")?;
        assert!(JsonFileStorage::new(path).load().is_err());
        Ok(())
    }

    #[test]
    fn memory_storage_counts_and_fails_saves() {
        let mut storage = MemoryStorage::new();
        assert!(storage.save(&[]).is_ok());
        assert_eq!(storage.save_count(), 1);

        storage.set_fail_saves(true);
        assert!(storage.save(&[]).is_err());
        assert_eq!(storage.save_count(), 1);
    }
}
