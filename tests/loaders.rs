use image::{Rgb, RgbImage};
use image_basics::loaders::{alternate, converted, native};
use image_basics::{ChannelOrder, DemoError, Method};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};

fn write_png(dir: &Path, name: &str, img: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    img.save(&path).expect("failed to write fixture");
    path
}

/// 5x3 gradient so every pixel has distinct red and blue values.
fn gradient() -> RgbImage {
    RgbImage::from_fn(5, 3, |x, y| {
        Rgb([(x * 50) as u8, (y * 60 + 10) as u8, (200 - x * 30) as u8])
    })
}

#[test]
fn all_loaders_report_image_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "gradient.png", &gradient());
    for method in Method::ALL {
        let buffer = method.load(&path).expect("load failed");
        assert_eq!(buffer.dimensions(), (5, 3), "{method}");
    }
}

#[test]
fn converted_is_native_with_outer_planes_swapped() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "gradient.png", &gradient());

    let bgr = native::load(&path).unwrap();
    let rgb = converted::load(&path).unwrap();
    assert_eq!(bgr.order(), ChannelOrder::Bgr);
    assert_eq!(rgb.order(), ChannelOrder::Rgb);

    for y in 0..3 {
        for x in 0..5 {
            let [b, g, r] = bgr.pixel(x, y);
            assert_eq!(rgb.pixel(x, y), [r, g, b], "at ({x}, {y})");
        }
    }
}

#[test]
fn alternate_decoder_matches_converted() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "gradient.png", &gradient());

    let from_kornia = converted::load(&path).unwrap();
    let from_image = alternate::load(&path).unwrap();
    assert_eq!(from_image, from_kornia);
    assert_eq!(from_image.as_slice(), gradient().as_raw().as_slice());
}

#[test]
fn missing_file_fails_every_loader() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does_not_exist.png");
    for method in Method::ALL {
        let err = method.load(&path).unwrap_err();
        assert!(matches!(&err, DemoError::Decode { path: p, .. } if p == &path), "{method}: {err}");
        assert!(method.figure(&path).is_err(), "{method}");
    }
}

#[test]
fn garbage_file_fails_every_loader() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noise.png");
    std::fs::write(&path, b"definitely not a png").unwrap();
    for method in Method::ALL {
        assert!(method.load(&path).is_err(), "{method}");
    }
}

#[test]
fn red_image_channel_orders() {
    let dir = tempfile::tempdir().unwrap();
    let red = RgbImage::from_pixel(2, 2, Rgb([255, 0, 0]));
    let path = write_png(dir.path(), "red.png", &red);

    assert_eq!(native::load(&path).unwrap().pixel(0, 0), [0, 0, 255]);
    assert_eq!(converted::load(&path).unwrap().pixel(0, 0), [255, 0, 0]);
    assert_eq!(alternate::load(&path).unwrap().pixel(0, 0), [255, 0, 0]);
}

#[test]
fn figures_carry_titles_and_display_colours() {
    let dir = tempfile::tempdir().unwrap();
    let red = RgbImage::from_pixel(2, 2, Rgb([255, 0, 0]));
    let path = write_png(dir.path(), "red.png", &red);

    let window = Method::Native.figure(&path).unwrap();
    assert_eq!(window.title, "Loaded Image");
    assert_eq!((window.width, window.height), (2, 2));
    // the window reads its BGR buffer back as red
    assert_eq!(&window.rgba[..4], &[255, 0, 0, 255]);

    let plotted = Method::Converted.figure(&path).unwrap();
    assert_eq!(plotted.title, "Figure 1");
    assert_eq!((plotted.width, plotted.height), (640, 480));

    let bare = Method::Alternate.figure(&path).unwrap();
    assert_eq!(bare.title, "Figure 1");
    // both plots put the same red image in the same place
    let centre = ((240 * 640 + 320) * 4) as usize;
    assert_eq!(&plotted.rgba[centre..centre + 4], &[255, 0, 0, 255]);
    assert_eq!(&bare.rgba[centre..centre + 4], &[255, 0, 0, 255]);
}

#[test]
fn bundled_sample_is_blue() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("images/blue.png");
    let rgb = alternate::load(&path).unwrap();
    assert_eq!(rgb.dimensions(), (64, 48));
    assert_eq!(rgb.pixel(10, 10), [0, 0, 255]);
    assert_eq!(native::load(&path).unwrap().pixel(10, 10), [255, 0, 0]);
}
