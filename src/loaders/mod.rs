//! The three display pathways. Each one decodes the image at a caller-given
//! path, settles the channel order its display expects, and packages the
//! result as a [`Figure`] for the viewer.

pub mod alternate;
pub mod converted;
pub mod native;

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::buffer::PixelBuffer;
use crate::error::Result;
use crate::viewer::Figure;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Native BGR buffer in a key-dismissed image window
    Native,
    /// BGR converted to RGB, plotted with axes
    Converted,
    /// RGB from the alternate decoder, plotted without axes
    Alternate,
}

impl Method {
    pub const ALL: [Method; 3] = [Method::Native, Method::Converted, Method::Alternate];

    /// Decodes `path` into the buffer this method displays.
    pub fn load(self, path: &Path) -> Result<PixelBuffer> {
        match self {
            Method::Native => native::load(path),
            Method::Converted => converted::load(path),
            Method::Alternate => alternate::load(path),
        }
    }

    /// Decodes `path` and prepares it for display.
    pub fn figure(self, path: &Path) -> Result<Figure> {
        match self {
            Method::Native => native::figure(path),
            Method::Converted => converted::figure(path),
            Method::Alternate => alternate::figure(path),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Native => f.write_str("native"),
            Method::Converted => f.write_str("converted"),
            Method::Alternate => f.write_str("alternate"),
        }
    }
}
