use serde::{Deserialize, Serialize};

use crate::color::{self, ColorValues, Hsl, Rgba};

/// A named color. `rgba` is authoritative; `hex` and `hsl` are derived from it
/// and can only change through [`ColorEntry::set_rgba`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "LoadedEntry", into = "StoredEntry")]
pub struct ColorEntry {
    id: usize,
    name: String,
    rgba: Rgba,
    hex: u32,
    hsl: Hsl,
}

impl ColorEntry {
    pub fn create(id: usize, name: impl Into<String>, rgba: Rgba) -> Self {
        let ColorValues { hex, rgba, hsl } = ColorValues::from_rgba(rgba);
        Self {
            id,
            name: name.into(),
            rgba,
            hex,
            hsl,
        }
    }

    /// Build from raw integer components; unusable components become opaque white.
    pub fn from_components(id: usize, name: impl Into<String>, components: &[i64]) -> Self {
        let ColorValues { hex, rgba, hsl } = color::rgba_to_color_values(components);
        Self {
            id,
            name: name.into(),
            rgba,
            hex,
            hsl,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rgba(&self) -> Rgba {
        self.rgba
    }

    pub fn hex(&self) -> u32 {
        self.hex
    }

    pub fn hsl(&self) -> Hsl {
        self.hsl
    }

    pub fn values(&self) -> ColorValues {
        ColorValues {
            hex: self.hex,
            rgba: self.rgba,
            hsl: self.hsl,
        }
    }

    /// Uppercase digits of `hex` at its natural width (`0x00FF00` renders as `FF00`).
    pub fn hex_string(&self) -> String {
        format!("{:X}", self.hex)
    }

    pub fn set_rgba(&mut self, rgba: Rgba) {
        let (hex, hsl) = color::rgba_to_hsl_hex(rgba);
        self.rgba = rgba;
        self.hex = hex;
        self.hsl = hsl;
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub(crate) fn set_id(&mut self, id: usize) {
        self.id = id;
    }
}

/// Same name and same packed hex. Colors that only differ below hex
/// precision compare equal.
impl PartialEq for ColorEntry {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.hex == other.hex
    }
}

impl Eq for ColorEntry {}

/// On-disk shape. `hex` and `hsl` are written as a cache.
#[derive(Serialize)]
struct StoredEntry {
    id: usize,
    name: String,
    hex: u32,
    hsl: [u16; 3],
    rgba: Rgba,
}

/// What is read back: the cached fields are skipped whatever they hold.
#[derive(Deserialize)]
struct LoadedEntry {
    id: usize,
    name: String,
    rgba: Rgba,
}

impl From<LoadedEntry> for ColorEntry {
    fn from(loaded: LoadedEntry) -> Self {
        ColorEntry::create(loaded.id, loaded.name, loaded.rgba)
    }
}

impl From<ColorEntry> for StoredEntry {
    fn from(entry: ColorEntry) -> Self {
        StoredEntry {
            id: entry.id,
            name: entry.name,
            hex: entry.hex,
            hsl: entry.hsl.into(),
            rgba: entry.rgba,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn derived_fields_follow_rgba() {
        let mut e = ColorEntry::create(0, "Sky", Rgba::opaque(51, 102, 153));
        assert_eq!(e.hex(), 0x336699);
        assert_eq!(e.hsl(), Hsl::new(210, 50, 40).unwrap());

        e.set_rgba(Rgba::new(255, 0, 0, 128));
        assert_eq!(e.hex(), 0xFF000080);
        assert_eq!(e.hsl(), color::rgba_to_hsl(e.rgba()));
        assert_eq!(e.hex(), color::rgba_to_hex(e.rgba()));
    }

    #[test]
    fn hex_string_has_natural_width() {
        let green = ColorEntry::create(0, "g", Rgba::opaque(0, 255, 0));
        assert_eq!(green.hex_string(), "FF00");

        let red = ColorEntry::create(0, "r", Rgba::opaque(255, 0, 0));
        assert_eq!(red.hex_string(), "FF0000");

        let clear = ColorEntry::create(0, "c", Rgba::new(255, 0, 0, 0));
        assert_eq!(clear.hex_string(), "FF000000");
    }

    #[test]
    fn equality_ignores_id() {
        let a = ColorEntry::create(0, "Red", Rgba::opaque(255, 0, 0));
        let b = ColorEntry::create(3, "Red", Rgba::opaque(255, 0, 0));
        let c = ColorEntry::create(0, "Crimson", Rgba::opaque(255, 0, 0));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn broken_components_become_white() {
        let e = ColorEntry::from_components(2, "Broken", &[999, 0, 0, 255]);
        assert_eq!(e.rgba(), Rgba::WHITE);
        assert_eq!(e.hex(), 0xFFFFFF);
        assert_eq!(e.hsl(), Hsl::WHITE);
        assert_eq!(e.id(), 2);
    }

    #[test]
    fn stale_cache_is_rederived_on_load() -> anyhow::Result<()> {
        let json = r#"{"id":0,"name":"Blue","hex":1,"hsl":[1,2,3],"rgba":[0,0,255,255]}"#;
        let e: ColorEntry = serde_json::from_str(json)?;
        assert_eq!(e.hex(), 0x0000FF);
        assert_eq!(e.hsl(), Hsl::new(240, 100, 50)?);
        Ok(())
    }

    #[test]
    fn serializes_all_fields() -> anyhow::Result<()> {
        let e = ColorEntry::create(1, "Red", Rgba::opaque(255, 0, 0));
        let v = serde_json::to_value(&e)?;
        assert_eq!(
            v,
            serde_json::json!({
                "id": 1,
                "name": "Red",
                "hex": 0xFF0000,
                "hsl": [0, 100, 50],
                "rgba": [255, 0, 0, 255]
            })
        );
        Ok(())
    }

    #[test]
    fn unusable_cache_does_not_reject_the_entry() -> anyhow::Result<()> {
        let json = r#"{"id":0,"name":"Teal","hex":-1,"hsl":[999,-3,"x"],"rgba":[0,128,128,255]}"#;
        let e: ColorEntry = serde_json::from_str(json)?;
        assert_eq!(e.hex(), 0x008080);
        assert_eq!(e.hsl(), Hsl::new(180, 100, 25)?);

        let bare = r#"{"id":0,"name":"Teal","rgba":[0,128,128,255]}"#;
        assert_eq!(serde_json::from_str::<ColorEntry>(bare)?, e);
        Ok(())
    }

    #[test]
    fn out_of_range_channel_fails_to_parse() {
        let json = r#"{"id":0,"name":"Bad","rgba":[256,0,0,255]}"#;
        assert!(serde_json::from_str::<ColorEntry>(json).is_err());
    }
}
