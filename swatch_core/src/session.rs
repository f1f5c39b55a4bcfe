use crate::input::{self, HslField, RgbaField};
use crate::{ColorEntry, Hsl, PaletteStore, Result, Rgba, color};

pub const WORKING_COLOR_NAME: &str = "Selected Color";
pub const DEFAULT_COLOR_NAME: &str = "White";

/// The interactive edit state: the palette store plus the working color the
/// user is composing. Edits to the working color are never persisted; only
/// committing it into a palette is.
#[derive(Debug)]
pub struct Session {
    pub store: PaletteStore,
    working: ColorEntry,
}

impl Session {
    pub fn new(store: PaletteStore) -> Self {
        Self {
            store,
            working: ColorEntry::create(0, WORKING_COLOR_NAME, Rgba::WHITE),
        }
    }

    pub fn working(&self) -> &ColorEntry {
        &self.working
    }

    /// Zero-padded digits for an editable hex field. Unlike
    /// [`ColorEntry::hex_string`] this always reads back to the same color.
    pub fn working_hex_digits(&self) -> String {
        color::rgba_to_hex_digits(self.working.rgba())
    }

    pub fn set_working_rgba(&mut self, rgba: Rgba) {
        self.working.set_rgba(rgba);
    }

    /// Filter `text` like a hex field would, apply it, and return the filtered digits.
    pub fn set_working_hex(&mut self, text: &str) -> String {
        let digits = input::filter_hex_input(text);
        self.working.set_rgba(color::hex_to_rgba(&digits));
        digits
    }

    pub fn set_working_rgba_field(&mut self, field: RgbaField, text: &str) -> Result<()> {
        let value = input::parse_channel(field.label(), text)?;
        let rgba = field.set(self.working.rgba(), value);
        self.working.set_rgba(rgba);
        Ok(())
    }

    /// HSL carries no alpha, so the working color becomes opaque.
    pub fn set_working_hsl(&mut self, hsl: Hsl) {
        self.working.set_rgba(color::hsl_to_rgba(hsl));
    }

    pub fn set_working_hsl_field(&mut self, field: HslField, text: &str) -> Result<()> {
        let hsl = field.apply(self.working.hsl(), text)?;
        self.set_working_hsl(hsl);
        Ok(())
    }

    /// Load an existing palette color into the editor.
    pub fn pick(&mut self, color: &ColorEntry) {
        self.working.set_rgba(color.rgba());
    }

    /// Commit the working color into a palette under `name`.
    pub fn add_working_color_to_palette(
        &mut self,
        name: impl Into<String>,
        palette_id: usize,
    ) -> Result<usize> {
        self.store
            .add_color_to_palette(name, palette_id, self.working.rgba())
    }

    /// Create a palette holding a single white entry; returns its id.
    pub fn add_default_palette(&mut self, name: impl Into<String>) -> usize {
        let white = ColorEntry::create(0, DEFAULT_COLOR_NAME, Rgba::WHITE);
        self.store.add_palette(name, vec![white])
    }

    /// Create a palette whose only entry is the working color under `color_name`.
    pub fn add_working_color_to_new_palette(
        &mut self,
        color_name: impl Into<String>,
        palette_name: impl Into<String>,
    ) -> usize {
        let entry = ColorEntry::create(0, color_name, self.working.rgba());
        self.store.add_palette(palette_name, vec![entry])
    }
}
