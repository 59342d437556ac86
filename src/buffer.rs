//! Decoded pixel buffers tagged with the order their channels are stored in.

use std::fmt;

use serde::Serialize;

use crate::error::{DemoError, Result};

const CHANNELS: usize = 3;

/// Per-pixel storage order of the three colour components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    Bgr,
    Rgb,
}

impl ChannelOrder {
    pub fn swapped(self) -> Self {
        match self {
            ChannelOrder::Bgr => ChannelOrder::Rgb,
            ChannelOrder::Rgb => ChannelOrder::Bgr,
        }
    }
}

impl fmt::Display for ChannelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelOrder::Bgr => f.write_str("BGR"),
            ChannelOrder::Rgb => f.write_str("RGB"),
        }
    }
}

/// Owned height x width x 3 buffer of 8-bit samples, tightly packed row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    order: ChannelOrder,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps raw interleaved samples. Fails when `data` does not hold exactly
    /// `width * height * 3` bytes.
    pub fn new(width: u32, height: u32, order: ChannelOrder, data: Vec<u8>) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or(DemoError::Shape {
                expected: usize::MAX,
                actual: data.len(),
            })?;
        if data.len() != expected {
            return Err(DemoError::Shape {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            order,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn order(&self) -> ChannelOrder {
        self.order
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Samples at `(x, y)` in the buffer's own channel order.
    ///
    /// # Panics
    /// Panics if `(x, y)` is outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}x{}",
            self.width,
            self.height
        );
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    /// Samples at `(x, y)` as red, green, blue whatever the storage order.
    pub fn rgb_at(&self, x: u32, y: u32) -> [u8; 3] {
        let [a, b, c] = self.pixel(x, y);
        match self.order {
            ChannelOrder::Rgb => [a, b, c],
            ChannelOrder::Bgr => [c, b, a],
        }
    }

    /// Exchanges the first and third channel planes and flips the order tag.
    pub fn swap_red_blue(mut self) -> Self {
        for px in self.data.chunks_exact_mut(CHANNELS) {
            px.swap(0, 2);
        }
        self.order = self.order.swapped();
        self
    }

    pub fn to_order(self, order: ChannelOrder) -> Self {
        if self.order == order {
            self
        } else {
            self.swap_red_blue()
        }
    }

    /// Opaque RGBA bytes, as GPU image handles expect them.
    pub fn to_rgba(&self) -> Vec<u8> {
        let (r, b) = match self.order {
            ChannelOrder::Rgb => (0, 2),
            ChannelOrder::Bgr => (2, 0),
        };
        let mut rgba = Vec::with_capacity(self.data.len() / CHANNELS * 4);
        for px in self.data.chunks_exact(CHANNELS) {
            rgba.extend_from_slice(&[px[r], px[1], px[b], 255]);
        }
        rgba
    }
}
