use pretty_assertions::assert_eq;
use std::fs;

use swatch_core::{PaletteStore, Rgba, Session, StoreConfig};

#[test]
fn file_store_writes_through_and_reloads() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = StoreConfig::at(dir.path().join("Swatch").join("paletteData.json"));

    let mut store = PaletteStore::open_file(&config);
    assert!(store.is_empty());

    let warm = store.add_palette("Warm", Vec::new());
    store.add_color_to_palette("Orange", warm, Rgba::opaque(255, 128, 0))?;
    store.add_color_to_palette("Ember", warm, Rgba::new(200, 40, 0, 128))?;
    let cold = store.add_palette("Cold", Vec::new());
    store.add_color_to_palette("Ice", cold, Rgba::opaque(200, 240, 255))?;
    store.remove_palette(warm)?;

    let reopened = PaletteStore::open_file(&config);
    assert_eq!(reopened.palettes(), store.palettes());
    assert_eq!(reopened.palettes()[0].id(), 0);
    assert_eq!(reopened.palettes()[0].name(), "Cold");
    Ok(())
}

#[test]
fn file_layout_is_an_array_of_palettes() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = StoreConfig::at(dir.path().join("palettes.json"));

    let mut session = Session::new(PaletteStore::open_file(&config));
    let p = session.store.add_palette("Brand", Vec::new());
    session.set_working_hex("FF0000");
    session.add_working_color_to_palette("Signal", p)?;

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&config.data_file)?)?;
    assert_eq!(
        json,
        serde_json::json!([
            {
                "id": 0,
                "name": "Brand",
                "entries": [
                    {
                        "id": 0,
                        "name": "Signal",
                        "hex": 16711680,
                        "hsl": [0, 100, 50],
                        "rgba": [255, 0, 0, 255]
                    }
                ]
            }
        ])
    );
    Ok(())
}

#[test]
fn corrupt_file_starts_empty_and_is_replaced_on_save() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = StoreConfig::at(dir.path().join("palettes.json"));
    fs::write(&config.data_file, "not json at all")?;

    let mut store = PaletteStore::open_file(&config);
    assert!(store.is_empty());

    store.add_palette("Fresh", Vec::new());
    assert!(store.last_save_error().is_none());
    assert_eq!(PaletteStore::open_file(&config).len(), 1);
    Ok(())
}

#[test]
fn unwritable_location_keeps_session_usable() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    // a directory where the file should be makes every write fail
    let blocked = dir.path().join("palettes.json");
    fs::create_dir(&blocked)?;

    let mut store = PaletteStore::open_file(&StoreConfig::at(&blocked));
    let p = store.add_palette("Ephemeral", Vec::new());
    store.add_color_to_palette("Mist", p, Rgba::opaque(220, 220, 230))?;

    assert!(store.last_save_error().is_some());
    assert_eq!(store.palettes()[p].len(), 1);
    Ok(())
}
