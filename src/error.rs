use std::path::PathBuf;

use crate::buffer::ChannelOrder;

/// Errors raised while decoding, rendering or displaying an image.
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("failed to decode {}: {message}", .path.display())]
    Decode { path: PathBuf, message: String },

    #[error("pixel data has {actual} bytes, expected {expected}")]
    Shape { expected: usize, actual: usize },

    #[error("buffer is in {actual} order, display expects {expected}")]
    ChannelOrder {
        expected: ChannelOrder,
        actual: ChannelOrder,
    },

    #[error("plot rendering failed: {0}")]
    Render(String),

    #[error("viewer failed: {0}")]
    Gui(String),
}

impl DemoError {
    pub(crate) fn decode(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        DemoError::Decode {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DemoError>;
