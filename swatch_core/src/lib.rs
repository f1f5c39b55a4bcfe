pub mod color;
pub mod config;
pub mod entry;
pub mod error;
pub mod format;
pub mod input;
pub mod palette;
pub mod session;
pub mod storage;
pub mod store;

pub use color::{ColorValues, Hsl, Rgba};
pub use config::StoreConfig;
pub use entry::ColorEntry;
pub use error::{Result, SwatchError};
pub use format::ExportFormat;
pub use input::{HslField, RgbaField};
pub use palette::Palette;
pub use session::Session;
pub use storage::{JsonFileStorage, MemoryStorage, PaletteStorage};
pub use store::{ChangeHook, PaletteStore};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
