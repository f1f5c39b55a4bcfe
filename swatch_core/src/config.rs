use std::env;
use std::path::PathBuf;

use crate::{Result, SwatchError};

/// Overrides the palette file location when set.
pub const DATA_FILE_ENV: &str = "SWATCH_DATA_FILE";

const APP_DIR: &str = "Swatch";
const DATA_FILE_NAME: &str = "paletteData.json";

/// Where the palette file lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_file: PathBuf,
}

impl StoreConfig {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            data_file: path.into(),
        }
    }

    /// `$SWATCH_DATA_FILE`, else `<data dir>/Swatch/paletteData.json`.
    pub fn resolve() -> Result<Self> {
        if let Some(path) = env::var_os(DATA_FILE_ENV).filter(|p| !p.is_empty()) {
            return Ok(Self::at(path));
        }
        Self::default_location()
    }

    /// An explicit path wins over the environment and the platform default.
    pub fn resolve_with(explicit: Option<&str>) -> Result<Self> {
        match explicit {
            Some(path) => Ok(Self::at(path)),
            None => Self::resolve(),
        }
    }

    pub fn default_location() -> Result<Self> {
        let dir = dirs::data_dir().ok_or(SwatchError::NoDataDir)?;
        Ok(Self::at(dir.join(APP_DIR).join(DATA_FILE_NAME)))
    }
}
