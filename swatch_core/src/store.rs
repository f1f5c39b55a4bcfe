use std::fmt;

use crate::{
    ColorEntry, JsonFileStorage, MemoryStorage, Palette, PaletteStorage, Rgba, Result, StoreConfig,
    SwatchError,
};

/// Called once after every completed mutation with the current palettes.
pub type ChangeHook = Box<dyn FnMut(&[Palette])>;

/// Every palette the user has, plus the storage they are written through to.
///
/// After any public mutating call returns, `palettes[i].id() == i` for every
/// palette and the storage has been asked to persist the new state.
pub struct PaletteStore {
    palettes: Vec<Palette>,
    storage: Box<dyn PaletteStorage>,
    on_change: Option<ChangeHook>,
    last_save_error: Option<String>,
}

impl fmt::Debug for PaletteStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaletteStore")
            .field("palettes", &self.palettes)
            .field("last_save_error", &self.last_save_error)
            .finish_non_exhaustive()
    }
}

impl PaletteStore {
    /// Load once from `storage`. A failed load starts with no palettes.
    pub fn open(storage: impl PaletteStorage + 'static) -> Self {
        let palettes = match storage.load() {
            Ok(palettes) => {
                tracing::info!(count = palettes.len(), "loaded palettes");
                palettes
            }
            Err(e) => {
                tracing::warn!("failed to load palettes, starting empty: {e:#}");
                Vec::new()
            }
        };

        let mut store = Self {
            palettes,
            storage: Box::new(storage),
            on_change: None,
            last_save_error: None,
        };
        store.renumber_from(0);
        store
    }

    pub fn open_file(config: &StoreConfig) -> Self {
        Self::open(JsonFileStorage::from_config(config))
    }

    pub fn in_memory() -> Self {
        Self::open(MemoryStorage::new())
    }

    pub fn set_on_change(&mut self, hook: impl FnMut(&[Palette]) + 'static) {
        self.on_change = Some(Box::new(hook));
    }

    pub fn palettes(&self) -> &[Palette] {
        &self.palettes
    }

    pub fn palette(&self, id: usize) -> Option<&Palette> {
        self.palettes.get(id)
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    /// The most recent save failure, cleared by the next successful save.
    pub fn last_save_error(&self) -> Option<&str> {
        self.last_save_error.as_deref()
    }

    pub fn add_palette(&mut self, name: impl Into<String>, entries: Vec<ColorEntry>) -> usize {
        let id = self.palettes.len();
        self.palettes.push(Palette::new(id, name, entries));
        tracing::debug!(palette = id, "added palette");
        self.commit();
        id
    }

    pub fn rename_palette(&mut self, name: impl Into<String>, target_id: usize) -> Result<()> {
        self.palette_mut(target_id)?.rename(name);
        tracing::debug!(palette = target_id, "renamed palette");
        self.commit();
        Ok(())
    }

    pub fn remove_palette(&mut self, id: usize) -> Result<Palette> {
        if id >= self.palettes.len() {
            return Err(miss(SwatchError::PaletteNotFound { id }));
        }
        let removed = self.palettes.remove(id);
        self.renumber_from(id);
        tracing::debug!(palette = id, "removed palette");
        self.commit();
        Ok(removed)
    }

    /// Append a color to the palette whose id is `palette_id`; returns the new color id.
    pub fn add_color_to_palette(
        &mut self,
        name: impl Into<String>,
        palette_id: usize,
        rgba: Rgba,
    ) -> Result<usize> {
        let color_id = self.palette_mut(palette_id)?.add_color(name, rgba);
        tracing::debug!(palette = palette_id, color = color_id, "added color");
        self.commit();
        Ok(color_id)
    }

    /// Rename the first color in the palette equal to `color` (same name and hex).
    ///
    /// Two entries sharing name and hex cannot be told apart here; the first
    /// one wins. Use [`PaletteStore::rename_color_at`] when the id is known.
    pub fn rename_color_in_palette(
        &mut self,
        name: impl Into<String>,
        color: &ColorEntry,
        palette_id: usize,
    ) -> Result<()> {
        let color_id = self.find_color(color, palette_id)?;
        self.rename_color_at(palette_id, color_id, name)
    }

    /// Remove the first color in the palette equal to `color`. First match wins,
    /// as with [`PaletteStore::rename_color_in_palette`].
    pub fn remove_color_from_palette(
        &mut self,
        color: &ColorEntry,
        palette_id: usize,
    ) -> Result<ColorEntry> {
        let color_id = self.find_color(color, palette_id)?;
        self.remove_color_at(palette_id, color_id)
    }

    pub fn rename_color_at(
        &mut self,
        palette_id: usize,
        color_id: usize,
        name: impl Into<String>,
    ) -> Result<()> {
        let palette = self.palette_mut(palette_id)?;
        if !palette.rename_color(color_id, name) {
            return Err(miss(SwatchError::ColorIdNotFound {
                palette: palette_id,
                color: color_id,
            }));
        }
        tracing::debug!(palette = palette_id, color = color_id, "renamed color");
        self.commit();
        Ok(())
    }

    pub fn remove_color_at(&mut self, palette_id: usize, color_id: usize) -> Result<ColorEntry> {
        let palette = self.palette_mut(palette_id)?;
        let Some(removed) = palette.remove_color(color_id) else {
            return Err(miss(SwatchError::ColorIdNotFound {
                palette: palette_id,
                color: color_id,
            }));
        };
        tracing::debug!(palette = palette_id, color = color_id, "removed color");
        self.commit();
        Ok(removed)
    }

    /// Write the current palettes through to storage. Failure is logged and
    /// remembered; the in-memory state stays authoritative.
    pub fn save(&mut self) -> anyhow::Result<()> {
        match self.storage.save(&self.palettes) {
            Ok(()) => {
                self.last_save_error = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("failed to save palettes: {e:#}");
                self.last_save_error = Some(format!("{e:#}"));
                Err(e)
            }
        }
    }

    fn commit(&mut self) {
        // failure is already logged and kept in last_save_error
        let _ = self.save();
        if let Some(hook) = self.on_change.as_mut() {
            hook(&self.palettes);
        }
    }

    fn palette_mut(&mut self, id: usize) -> Result<&mut Palette> {
        self.palettes
            .get_mut(id)
            .ok_or_else(|| miss(SwatchError::PaletteNotFound { id }))
    }

    fn find_color(&self, color: &ColorEntry, palette_id: usize) -> Result<usize> {
        let palette = self
            .palettes
            .get(palette_id)
            .ok_or_else(|| miss(SwatchError::PaletteNotFound { id: palette_id }))?;
        palette.position_of(color).ok_or_else(|| {
            miss(SwatchError::ColorNotFound {
                palette: palette_id,
                name: color.name().to_string(),
                hex: color.hex(),
            })
        })
    }

    fn renumber_from(&mut self, start: usize) {
        for (i, palette) in self.palettes.iter_mut().enumerate().skip(start) {
            palette.id = i;
            palette.renumber_from(0);
        }
    }
}

fn miss(err: SwatchError) -> SwatchError {
    tracing::warn!("{err}");
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    fn palette_ids(store: &PaletteStore) -> Vec<usize> {
        store.palettes().iter().map(Palette::id).collect()
    }

    fn store_with(storage: &MemoryStorage) -> PaletteStore {
        PaletteStore::open(storage.clone())
    }

    #[test]
    fn every_mutation_saves() -> anyhow::Result<()> {
        let storage = MemoryStorage::new();
        let mut store = store_with(&storage);

        let p = store.add_palette("Warm", Vec::new());
        store.add_color_to_palette("Red", p, Rgba::opaque(255, 0, 0))?;
        store.rename_palette("Hot", p)?;
        store.rename_color_at(p, 0, "Scarlet")?;
        store.remove_color_at(p, 0)?;
        store.remove_palette(p)?;

        assert_eq!(storage.save_count(), 6);
        assert!(store.is_empty());
        Ok(())
    }

    #[test]
    fn removing_a_palette_renumbers_later_ones() -> anyhow::Result<()> {
        let mut store = PaletteStore::in_memory();
        for name in ["a", "b", "c", "d"] {
            store.add_palette(name, Vec::new());
        }

        let removed = store.remove_palette(1)?;
        assert_eq!(removed.name(), "b");
        assert_eq!(palette_ids(&store), vec![0, 1, 2]);
        assert_eq!(store.palette(1).map(Palette::name), Some("c"));
        Ok(())
    }

    #[test]
    fn removing_a_color_by_value_renumbers() -> anyhow::Result<()> {
        let mut store = PaletteStore::in_memory();
        let p = store.add_palette("abc", Vec::new());
        store.add_color_to_palette("A", p, Rgba::opaque(255, 0, 0))?;
        store.add_color_to_palette("B", p, Rgba::opaque(0, 255, 0))?;
        store.add_color_to_palette("C", p, Rgba::opaque(0, 0, 255))?;

        let b = store.palettes()[p].entries()[1].clone();
        store.remove_color_from_palette(&b, p)?;

        let entries = store.palettes()[p].entries();
        let names: Vec<_> = entries.iter().map(|e| (e.name(), e.id())).collect();
        assert_eq!(names, vec![("A", 0), ("C", 1)]);
        Ok(())
    }

    #[test]
    fn lookup_miss_leaves_store_untouched() -> anyhow::Result<()> {
        let storage = MemoryStorage::new();
        let mut store = store_with(&storage);
        let p = store.add_palette("Only", Vec::new());
        store.add_color_to_palette("Red", p, Rgba::opaque(255, 0, 0))?;
        let before = store.palettes().to_vec();
        let saves = storage.save_count();

        let ghost = ColorEntry::create(0, "Ghost", Rgba::BLACK);
        let errs = [
            store.rename_palette("x", 9).unwrap_err(),
            store.remove_palette(9).unwrap_err(),
            store.add_color_to_palette("x", 9, Rgba::BLACK).unwrap_err(),
            store.rename_color_in_palette("x", &ghost, p).unwrap_err(),
            store.remove_color_from_palette(&ghost, p).unwrap_err(),
            store.remove_color_from_palette(&ghost, 4).unwrap_err(),
            store.rename_color_at(p, 5, "x").unwrap_err(),
            store.remove_color_at(p, 5).unwrap_err(),
        ];

        assert!(errs.iter().all(SwatchError::is_lookup_miss));
        assert!(matches!(errs[3], SwatchError::ColorNotFound { .. }));
        assert_eq!(store.palettes(), before.as_slice());
        assert_eq!(storage.save_count(), saves);
        Ok(())
    }

    #[test]
    fn value_lookup_acts_on_first_duplicate() -> anyhow::Result<()> {
        let mut store = PaletteStore::in_memory();
        let p = store.add_palette("dupes", Vec::new());
        store.add_color_to_palette("Twin", p, Rgba::opaque(1, 2, 3))?;
        store.add_color_to_palette("Twin", p, Rgba::opaque(1, 2, 3))?;

        let probe = store.palettes()[p].entries()[1].clone();
        store.rename_color_in_palette("First", &probe, p)?;

        let names: Vec<_> = store.palettes()[p].entries().iter().map(ColorEntry::name).collect();
        assert_eq!(names, vec!["First", "Twin"]);
        Ok(())
    }

    #[test]
    fn load_failure_starts_empty() {
        let storage = MemoryStorage::with_json("[{ broken");
        let store = store_with(&storage);
        assert!(store.is_empty());
    }

    #[test]
    fn load_reseats_ids_and_rederives_colors() {
        let json = r#"[
            {"id": 4, "name": "Loaded", "entries": [
                {"id": 7, "name": "Blue", "hex": 0, "hsl": [0, 0, 0], "rgba": [0, 0, 255, 255]},
                {"id": 7, "name": "Half", "rgba": [255, 255, 255, 128]}
            ]}
        ]"#;
        let store = store_with(&MemoryStorage::with_json(json));

        let p = &store.palettes()[0];
        assert_eq!(p.id(), 0);
        assert_eq!(p.entries()[0].id(), 0);
        assert_eq!(p.entries()[0].hex(), 0x0000FF);
        assert_eq!(p.entries()[1].id(), 1);
        assert_eq!(p.entries()[1].hex_string(), "FFFFFF80");
    }

    #[test]
    fn save_failure_keeps_memory_state() -> anyhow::Result<()> {
        let storage = MemoryStorage::new();
        let mut store = store_with(&storage);
        storage.set_fail_saves(true);

        let p = store.add_palette("Volatile", Vec::new());
        assert_eq!(store.palette(p).map(Palette::name), Some("Volatile"));
        assert!(store.last_save_error().is_some());

        storage.set_fail_saves(false);
        store.rename_palette("Durable", p)?;
        assert!(store.last_save_error().is_none());
        assert!(storage.json().is_some_and(|j| j.contains("Durable")));
        Ok(())
    }

    #[test]
    fn change_hook_fires_once_per_mutation() -> anyhow::Result<()> {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);

        let mut store = PaletteStore::in_memory();
        store.set_on_change(move |_| seen.set(seen.get() + 1));

        let p = store.add_palette("p", Vec::new());
        store.add_color_to_palette("c", p, Rgba::WHITE)?;
        let _ = store.remove_palette(3);

        assert_eq!(calls.get(), 2);
        Ok(())
    }

    #[test]
    fn persisted_state_reloads() -> anyhow::Result<()> {
        let storage = MemoryStorage::new();
        let mut store = store_with(&storage);
        let p = store.add_palette("Sea", Vec::new());
        store.add_color_to_palette("Teal", p, Rgba::new(0, 128, 128, 200))?;

        let reopened = store_with(&storage);
        assert_eq!(reopened.palettes(), store.palettes());
        Ok(())
    }
}
