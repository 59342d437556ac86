//! Plotting figure: draws an RGB buffer into a fixed-size canvas the way an
//! `imshow` call lays it out, with an optional frame and tick marks.

use image::imageops::{self, FilterType};
use plotters::prelude::*;

use crate::buffer::{ChannelOrder, PixelBuffer};
use crate::error::{DemoError, Result};

/// 6.4 x 4.8 inches at 100 dpi.
pub const CANVAS_WIDTH: u32 = 640;
pub const CANVAS_HEIGHT: u32 = 480;

// Default subplot rectangle, as fractions of the canvas.
const AXES_LEFT: f32 = 0.125;
const AXES_RIGHT: f32 = 0.9;
const AXES_BOTTOM: f32 = 0.11;
const AXES_TOP: f32 = 0.88;

const MAX_TICKS: usize = 9;
const TICK_LENGTH: i32 = 5;
const TICK_MULTIPLIERS: [f32; 4] = [1.0, 2.0, 2.5, 5.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axes {
    /// Frame around the image plus tick marks on the left and bottom edges.
    Visible,
    Hidden,
}

/// Pixel rectangle inside the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PlotRect {
    #[cfg(test)]
    fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

#[derive(Debug, Clone)]
pub struct RenderedFigure {
    /// The whole canvas, RGB.
    pub canvas: PixelBuffer,
    /// Where the scaled image landed.
    pub image_area: PlotRect,
}

/// The axes box inside a `CANVAS_WIDTH` x `CANVAS_HEIGHT` canvas.
pub fn axes_box() -> PlotRect {
    let w = CANVAS_WIDTH as f32;
    let h = CANVAS_HEIGHT as f32;
    let x = (AXES_LEFT * w).round() as u32;
    let y = ((1.0 - AXES_TOP) * h).round() as u32;
    let right = (AXES_RIGHT * w).round() as u32;
    let bottom = ((1.0 - AXES_BOTTOM) * h).round() as u32;
    PlotRect {
        x,
        y,
        width: right - x,
        height: bottom - y,
    }
}

/// Largest equal-aspect rectangle for a `width` x `height` image, centred in
/// the axes box.
pub fn image_placement(width: u32, height: u32) -> PlotRect {
    let area = axes_box();
    if width == 0 || height == 0 {
        return PlotRect {
            x: area.x,
            y: area.y,
            width: 0,
            height: 0,
        };
    }
    let scale = f32::min(
        area.width as f32 / width as f32,
        area.height as f32 / height as f32,
    );
    let draw_w = ((width as f32 * scale).round() as u32).clamp(1, area.width);
    let draw_h = ((height as f32 * scale).round() as u32).clamp(1, area.height);
    PlotRect {
        x: area.x + (area.width - draw_w) / 2,
        y: area.y + (area.height - draw_h) / 2,
        width: draw_w,
        height: draw_h,
    }
}

/// Tick values in image pixel coordinates for an axis spanning `extent`
/// pixels. Steps are 1, 2, 2.5 or 5 times a power of ten, with at most
/// `MAX_TICKS` ticks starting at zero.
pub fn nice_ticks(extent: u32) -> Vec<f32> {
    if extent == 0 {
        return Vec::new();
    }
    // pixel centres sit on integers, so the axis runs to extent - 0.5
    let span = extent as f32 - 0.5;
    let mut magnitude = 1.0f32;
    loop {
        for mult in TICK_MULTIPLIERS {
            let step = mult * magnitude;
            let count = (span / step).floor() as usize + 1;
            if count <= MAX_TICKS {
                return (0..count).map(|i| i as f32 * step).collect();
            }
        }
        magnitude *= 10.0;
    }
}

/// Renders `buffer` into a white canvas. The buffer must be RGB.
pub fn render_figure(buffer: &PixelBuffer, axes: Axes) -> Result<RenderedFigure> {
    if buffer.order() != ChannelOrder::Rgb {
        return Err(DemoError::ChannelOrder {
            expected: ChannelOrder::Rgb,
            actual: buffer.order(),
        });
    }

    let (width, height) = buffer.dimensions();
    let area = image_placement(width, height);
    let mut rgb = vec![255u8; CANVAS_WIDTH as usize * CANVAS_HEIGHT as usize * 3];

    if area.width > 0 && area.height > 0 {
        let source = image::RgbImage::from_raw(width, height, buffer.as_slice().to_vec())
            .ok_or_else(|| DemoError::Render("invalid pixel buffer dimensions".to_string()))?;
        let scaled = imageops::resize(&source, area.width, area.height, FilterType::Nearest);
        blit(&mut rgb, &scaled, area);
    }

    if axes == Axes::Visible && area.width > 0 {
        draw_axes(&mut rgb, (width, height), area).map_err(DemoError::Render)?;
    }

    tracing::debug!(width, height, ?axes, ?area, "rendered figure");

    Ok(RenderedFigure {
        canvas: PixelBuffer::new(CANVAS_WIDTH, CANVAS_HEIGHT, ChannelOrder::Rgb, rgb)?,
        image_area: area,
    })
}

fn blit(canvas: &mut [u8], scaled: &image::RgbImage, area: PlotRect) {
    let row_bytes = area.width as usize * 3;
    for (row, src) in scaled.as_raw().chunks_exact(row_bytes).enumerate() {
        let start = ((area.y as usize + row) * CANVAS_WIDTH as usize + area.x as usize) * 3;
        canvas[start..start + row_bytes].copy_from_slice(src);
    }
}

fn draw_axes(
    canvas: &mut [u8],
    image_size: (u32, u32),
    area: PlotRect,
) -> std::result::Result<(), String> {
    let root =
        BitMapBackend::with_buffer(canvas, (CANVAS_WIDTH, CANVAS_HEIGHT)).into_drawing_area();

    let left = area.x as i32 - 1;
    let top = area.y as i32 - 1;
    let right = (area.x + area.width) as i32;
    let bottom = (area.y + area.height) as i32;

    root.draw(&PathElement::new(
        [(left, top), (right, top), (right, bottom), (left, bottom), (left, top)],
        BLACK,
    ))
    .map_err(|e| e.to_string())?;

    let scale_x = area.width as f32 / image_size.0 as f32;
    for v in nice_ticks(image_size.0) {
        let x = area.x as i32 + ((v + 0.5) * scale_x).floor() as i32;
        root.draw(&PathElement::new([(x, bottom), (x, bottom + TICK_LENGTH)], BLACK))
            .map_err(|e| e.to_string())?;
    }

    let scale_y = area.height as f32 / image_size.1 as f32;
    for v in nice_ticks(image_size.1) {
        let y = area.y as i32 + ((v + 0.5) * scale_y).floor() as i32;
        root.draw(&PathElement::new([(left - TICK_LENGTH, y), (left, y)], BLACK))
            .map_err(|e| e.to_string())?;
    }

    root.present().map_err(|e| e.to_string())?;
    Ok(())
}
