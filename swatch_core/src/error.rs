use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwatchError {
    /// A palette id that is not present in the store (stale reference).
    #[error("palette {id} not found")]
    PaletteNotFound { id: usize },

    /// A color lookup inside an existing palette missed.
    #[error("color '{name}' (#{hex:X}) not found in palette {palette}")]
    ColorNotFound {
        palette: usize,
        name: String,
        hex: u32,
    },

    /// A color id that is out of range for its palette.
    #[error("color {color} not found in palette {palette}")]
    ColorIdNotFound { palette: usize, color: usize },

    /// A textual field failed validation; nothing was changed.
    #[error("{field} rejected: '{value}'")]
    InputRejected { field: &'static str, value: String },

    #[error("no per-user data directory available")]
    NoDataDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SwatchError {
    pub(crate) fn rejected(field: &'static str, value: impl Into<String>) -> Self {
        Self::InputRejected {
            field,
            value: value.into(),
        }
    }

    /// True for the stale-reference family of errors.
    pub fn is_lookup_miss(&self) -> bool {
        matches!(
            self,
            Self::PaletteNotFound { .. } | Self::ColorNotFound { .. } | Self::ColorIdNotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SwatchError>;
