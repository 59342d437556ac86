use std::path::Path;

use crate::buffer::{ChannelOrder, PixelBuffer};
use crate::error::{DemoError, Result};
use crate::plot::{Axes, render_figure};
use crate::viewer::Figure;

// the converted plot has been closed by now, so its figure number is free again
pub const WINDOW_TITLE: &str = "Figure 1";

/// Decodes with the `image` crate, which already yields red-green-blue.
pub fn load(path: &Path) -> Result<PixelBuffer> {
    let rgb = image::open(path)
        .map_err(|e| DemoError::decode(path, e))?
        .into_rgb8();
    let (width, height) = rgb.dimensions();
    tracing::debug!(path = %path.display(), width, height, "decoded with image");
    PixelBuffer::new(width, height, ChannelOrder::Rgb, rgb.into_raw())
}

/// Plotted with the axes turned off.
pub fn figure(path: &Path) -> Result<Figure> {
    let buffer = load(path)?;
    let plot = render_figure(&buffer, Axes::Hidden)?;
    Ok(Figure::plot(WINDOW_TITLE, plot))
}
