use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SliderError>;

#[derive(Debug, Error)]
pub enum SliderError {
    #[error("Initial value {initial} of slider '{name}' must be between 0 and {max}")]
    InvalidRange { name: String, initial: i32, max: i32 },

    #[error("Slider '{0}' is already part of this panel")]
    DuplicateSlider(String),

    #[error("No slider named '{0}'")]
    MissingKey(String),

    #[error("Saved slider values in '{}' are unusable: {reason}", .path.display())]
    CorruptState { path: PathBuf, reason: String },

    #[error("Could not access slider values file '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Slider panel backend failed")]
    Backend(#[source] std::io::Error),
}
