use serde::{Deserialize, Serialize};

use crate::{ColorEntry, Rgba};

/// A named, ordered list of colors. `entries[i].id() == i` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub(crate) id: usize,
    name: String,
    entries: Vec<ColorEntry>,
}

impl Palette {
    pub fn new(id: usize, name: impl Into<String>, entries: Vec<ColorEntry>) -> Self {
        let mut palette = Self {
            id,
            name: name.into(),
            entries,
        };
        palette.renumber_from(0);
        palette
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[ColorEntry] {
        &self.entries
    }

    pub fn color(&self, id: usize) -> Option<&ColorEntry> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Append a color; returns its id.
    pub fn add_color(&mut self, name: impl Into<String>, rgba: Rgba) -> usize {
        let id = self.entries.len();
        self.entries.push(ColorEntry::create(id, name, rgba));
        id
    }

    /// Rename the color at `id`. Out of range is a caller bug: logged, returns false.
    pub fn rename_color(&mut self, id: usize, name: impl Into<String>) -> bool {
        match self.entries.get_mut(id) {
            Some(entry) => {
                entry.rename(name);
                true
            }
            None => {
                tracing::warn!(palette = self.id, color = id, "rename_color: id out of range");
                false
            }
        }
    }

    /// Remove the color at `id` and shift the ids of everything after it down by one.
    pub fn remove_color(&mut self, id: usize) -> Option<ColorEntry> {
        if id >= self.entries.len() {
            tracing::warn!(palette = self.id, color = id, "remove_color: id out of range");
            return None;
        }
        let removed = self.entries.remove(id);
        self.renumber_from(id);
        Some(removed)
    }

    /// First entry equal to `color` (same name and hex).
    pub fn position_of(&self, color: &ColorEntry) -> Option<usize> {
        self.entries.iter().position(|e| e == color)
    }

    pub(crate) fn renumber_from(&mut self, start: usize) {
        for (i, entry) in self.entries.iter_mut().enumerate().skip(start) {
            entry.set_id(i);
        }
    }
}
