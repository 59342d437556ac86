//! Loads one image and shows it three ways: a native blue-green-red image
//! window, and two red-green-blue plotting figures fed by different decoders.

pub mod buffer;
pub mod error;
pub mod loaders;
pub mod plot;
pub mod viewer;

pub use buffer::{ChannelOrder, PixelBuffer};
pub use error::DemoError;
pub use loaders::Method;
