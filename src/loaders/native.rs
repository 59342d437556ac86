use std::path::Path;

use kornia::image::{allocator::CpuAllocator, color_spaces::Rgb8};
use kornia::io::functional as F;

use crate::buffer::{ChannelOrder, PixelBuffer};
use crate::error::{DemoError, Result};
use crate::viewer::{Dismiss, Figure};

pub const WINDOW_TITLE: &str = "Loaded Image";

/// Decodes `path` with kornia and stores the samples blue-green-red.
pub fn load(path: &Path) -> Result<PixelBuffer> {
    let image: Rgb8<CpuAllocator> =
        F::read_image_any_rgb8(path).map_err(|e| DemoError::decode(path, e))?;
    let size = image.size();
    tracing::debug!(
        path = %path.display(),
        width = size.width,
        height = size.height,
        "decoded with kornia"
    );

    let rgb = PixelBuffer::new(
        size.width as u32,
        size.height as u32,
        ChannelOrder::Rgb,
        image.as_slice().to_vec(),
    )?;
    Ok(rgb.to_order(ChannelOrder::Bgr))
}

/// The BGR buffer shown at native size until any key is pressed.
pub fn figure(path: &Path) -> Result<Figure> {
    let buffer = load(path)?;
    Figure::window(WINDOW_TITLE, &buffer, Dismiss::AnyKey)
}
