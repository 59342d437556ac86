use std::path::Path;

use crate::buffer::{ChannelOrder, PixelBuffer};
use crate::error::Result;
use crate::plot::{Axes, render_figure};
use crate::viewer::Figure;

pub const WINDOW_TITLE: &str = "Figure 1";

/// Same decode as the native loader, then reordered to red-green-blue.
pub fn load(path: &Path) -> Result<PixelBuffer> {
    let bgr = super::native::load(path)?;
    Ok(bgr.to_order(ChannelOrder::Rgb))
}

pub fn figure(path: &Path) -> Result<Figure> {
    let buffer = load(path)?;
    let plot = render_figure(&buffer, Axes::Visible)?;
    Ok(Figure::plot(WINDOW_TITLE, plot))
}
